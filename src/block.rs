use std::{mem, ptr::NonNull};

/// Sentinel written into every live block header. Checked on free as a
/// best-effort screen against pointers this pool never handed out.
pub(crate) const MAGIC: u32 = 0xDEAD_BEEF;

/// Record embedded at the start of every free span.
///
/// `size` counts the whole span, record included, so `addr + size` is the
/// first byte past the span. `next` points at the following free span by
/// address, which means walking the list visits the region front to back.
#[repr(C)]
pub(crate) struct FreeNode {
    pub size: usize,
    pub next: Option<NonNull<FreeNode>>,
}

/// Header written at the start of every allocated span.
///
/// `size` counts the bytes from just past the reserved prefix to the end
/// of the span. The span layout looks like this:
///
/// ```text
/// +---------------+----....----+------+---------------------+
/// | magic | size  |   slack    | shim |       payload       |
/// +---------------+----....----+------+---------------------+
///                                     ^
///                                     pointer handed out
/// ```
///
/// The shim byte sits immediately before the payload and records how many
/// slack bytes the payload skipped to land on its alignment boundary, which
/// is how `free` walks back to this header from a bare payload pointer.
#[repr(C)]
pub(crate) struct BlockHeader {
    pub magic: u32,
    pub size: usize,
}

/// Reserved prefix of every span, free or allocated.
///
/// A block must be reinterpretable as a free node in place when it is
/// freed, so the prefix is the larger of the two records and is used
/// uniformly on both paths.
pub(crate) const RESERVED: usize = {
    let node = mem::size_of::<FreeNode>();
    let header = mem::size_of::<BlockHeader>();
    if node > header { node } else { header }
};

/// Strictest alignment either record demands. Span carving only ever
/// produces record addresses that are a multiple of this.
pub(crate) const RECORD_ALIGN: usize = {
    let node = mem::align_of::<FreeNode>();
    let header = mem::align_of::<BlockHeader>();
    if node > header { node } else { header }
};
