use pagepool::PagePool;

fn main() {
    env_logger::init();

    let mut pool = PagePool::<4096>::new().expect("could not map the pool region");

    for alignment in [8, 16, 32, 64, 128, 256] {
        let ptr = pool
            .alloc_aligned(100, alignment)
            .expect("invalid request")
            .expect("pool exhausted");

        println!(
            "{alignment:>3}-byte alignment -> {:p} (mod {alignment} = {})",
            ptr.as_ptr(),
            ptr.as_ptr() as usize % alignment
        );

        unsafe { pool.free(ptr.as_ptr()).expect("free failed") };
    }
}
