use std::ptr::NonNull;

use crate::{error::PoolError, os, utils::align_up};

/// Owner of the one anonymous mapping backing a pool.
///
/// The span is acquired in full on construction and returned in full on
/// drop. It is never grown, shrunk, or remapped in between, so every
/// pointer the pool hands out stays valid for the pool's whole lifetime.
/// Moving a `Region` moves ownership of the mapping with it and the unmap
/// runs exactly once, on the final owner.
pub(crate) struct Region {
    base: NonNull<u8>,
    size: usize,
}

impl Region {
    /// Maps `request` bytes rounded up to a whole number of OS pages.
    /// A request that is already a page multiple is kept as is.
    pub fn map(request: usize) -> Result<Self, PoolError> {
        let size = align_up(request, os::page_size());

        let base = unsafe { os::map(size) }.map_err(|source| PoolError::MapFailed {
            requested: size,
            source,
        })?;

        Ok(Self { base, size })
    }

    #[inline]
    pub fn base(&self) -> NonNull<u8> {
        self.base
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether `addr` falls inside the mapped span.
    #[inline]
    pub fn contains(&self, addr: usize) -> bool {
        let base = self.base.as_ptr() as usize;
        addr >= base && addr < base + self.size
    }
}

impl Drop for Region {
    fn drop(&mut self) {
        // The process is tearing the pool down and nothing actionable
        // remains, so a failed unmap is logged rather than raised.
        if let Err(err) = unsafe { os::unmap(self.base.as_ptr(), self.size) } {
            log::error!("failed to unmap {} bytes at {:p}: {err}", self.size, self.base);
        }
    }
}
