use pagepool::PagePool;

fn main() {
    env_logger::init();

    // 4097 bytes rounds up to two pages on a 4 KiB-page machine.
    let mut pool = PagePool::<4097>::new().expect("could not map the pool region");
    println!("mapped {} bytes", pool.region_size());
    println!("{pool:?}");

    let mut ptrs = Vec::new();
    for i in 0..5 {
        let ptr = pool
            .alloc(101)
            .expect("invalid request")
            .expect("pool exhausted");
        println!("ptr{i} = {:p}", ptr.as_ptr());
        ptrs.push(ptr);
    }
    println!("{pool:?}");

    for ptr in ptrs {
        unsafe { pool.free(ptr.as_ptr()).expect("free failed") };
    }
    println!("{pool:?}");
}
