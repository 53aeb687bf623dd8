use std::io;

use thiserror::Error;

/// Errors surfaced by [`PagePool`](crate::PagePool) operations.
///
/// Pool exhaustion is deliberately not represented here: an allocation
/// that does not fit returns `Ok(None)` so the caller decides the policy.
#[derive(Debug, Error)]
pub enum PoolError {
    /// `alloc` was asked for zero bytes.
    #[error("size must be a positive integer")]
    ZeroSize,

    /// `alloc` was given an alignment of zero or one that is not a power
    /// of two.
    #[error("alignment must be a power of two, got {0}")]
    BadAlignment(usize),

    /// The requested alignment exceeds what the one-byte padding shim can
    /// record.
    #[error("alignment is limited to 256 bytes, got {0}")]
    AlignmentTooLarge(usize),

    /// The OS refused the anonymous mapping backing the pool.
    #[error("failed to map {requested} bytes from the OS")]
    MapFailed {
        requested: usize,
        #[source]
        source: io::Error,
    },

    /// `free` was handed a null pointer.
    #[error("cannot free a null pointer")]
    NullPointer,

    /// `free` was handed a pointer outside the pool's region.
    #[error("pointer {0:#x} does not belong to this pool")]
    ForeignPointer(usize),

    /// The bytes behind the pointer do not carry a valid block header.
    #[error("no valid block header behind pointer {0:#x}")]
    BadMagic(usize),
}
