//! Platform layer of the allocator.
//!
//! The pool only ever needs three things from the host: the page size, one
//! anonymous private read/write mapping, and the symmetric unmap. As the
//! allocator, our top level view of this has nothing to do with the
//! concrete APIs offered by each platform, so those live behind a trait
//! with one impl per target family.

use std::io;
use std::ptr::NonNull;
use std::sync::OnceLock;

/// Cached page size. Querying it involves a syscall on unix, and the value
/// never changes for the life of the process.
static PAGE_SIZE: OnceLock<usize> = OnceLock::new();

/// Abstraction over the host's virtual memory calls.
trait HostMemory {
    /// Maps `len` bytes of anonymous private read/write memory at an
    /// address of the host's choosing.
    unsafe fn map(len: usize) -> io::Result<NonNull<u8>>;

    /// Returns the mapping of `len` bytes starting at `addr` to the host.
    unsafe fn unmap(addr: *mut u8, len: usize) -> io::Result<()>;

    /// Virtual memory page size of the machine in bytes. Usually 4096.
    fn page_size() -> usize;
}

/// Backend selected for the current platform.
struct Host;

#[inline]
pub(crate) fn page_size() -> usize {
    *PAGE_SIZE.get_or_init(Host::page_size)
}

/// Wrapper over [`HostMemory::map`].
#[inline]
pub(crate) unsafe fn map(len: usize) -> io::Result<NonNull<u8>> {
    unsafe { Host::map(len) }
}

/// Wrapper over [`HostMemory::unmap`].
///
/// **SAFETY**: `addr` and `len` must describe exactly one span previously
/// returned by [`map`], and nothing may touch those bytes afterwards.
#[inline]
pub(crate) unsafe fn unmap(addr: *mut u8, len: usize) -> io::Result<()> {
    unsafe { Host::unmap(addr, len) }
}

#[cfg(unix)]
mod unix {
    use super::{Host, HostMemory};

    use libc::{mmap, munmap, off_t, size_t};

    use std::io;
    use std::os::raw::{c_int, c_void};
    use std::ptr::NonNull;

    impl HostMemory for Host {
        unsafe fn map(len: usize) -> io::Result<NonNull<u8>> {
            // mmap parameters.
            const ADDR: *mut c_void = std::ptr::null_mut::<c_void>();
            // Read-write only memory.
            const PROT: c_int = libc::PROT_READ | libc::PROT_WRITE;
            const FLAGS: c_int = libc::MAP_PRIVATE | libc::MAP_ANONYMOUS;
            const FD: c_int = -1;
            const OFFSET: off_t = 0;

            unsafe {
                let addr = mmap(ADDR, len as size_t, PROT, FLAGS, FD, OFFSET);

                if addr == libc::MAP_FAILED {
                    Err(io::Error::last_os_error())
                } else {
                    Ok(NonNull::new_unchecked(addr).cast::<u8>())
                }
            }
        }

        unsafe fn unmap(addr: *mut u8, len: usize) -> io::Result<()> {
            unsafe {
                if munmap(addr as *mut c_void, len as size_t) != 0 {
                    return Err(io::Error::last_os_error());
                }
            }

            Ok(())
        }

        fn page_size() -> usize {
            unsafe { libc::sysconf(libc::_SC_PAGE_SIZE) as usize }
        }
    }
}

#[cfg(windows)]
mod windows {
    use super::{Host, HostMemory};

    use windows::Win32::System::{Memory, SystemInformation};

    use std::io;
    use std::mem::MaybeUninit;
    use std::os::raw::c_void;
    use std::ptr::NonNull;

    impl HostMemory for Host {
        unsafe fn map(len: usize) -> io::Result<NonNull<u8>> {
            // Read-write only.
            let protection = Memory::PAGE_READWRITE;
            let flags = Memory::MEM_RESERVE | Memory::MEM_COMMIT;

            unsafe {
                let addr = Memory::VirtualAlloc(None, len, flags, protection);

                NonNull::new(addr.cast()).ok_or_else(io::Error::last_os_error)
            }
        }

        unsafe fn unmap(addr: *mut u8, _len: usize) -> io::Result<()> {
            unsafe {
                Memory::VirtualFree(addr as *mut c_void, 0, Memory::MEM_RELEASE)
                    .map_err(io::Error::other)
            }
        }

        fn page_size() -> usize {
            unsafe {
                let mut system_info = MaybeUninit::uninit();
                SystemInformation::GetSystemInfo(system_info.as_mut_ptr());

                system_info.assume_init().dwPageSize as usize
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_size_is_a_nonzero_power_of_two() {
        let page = page_size();
        assert!(page > 0);
        assert!(page.is_power_of_two());
    }

    #[test]
    fn mapped_memory_is_zeroed_and_writable() {
        let len = page_size();
        unsafe {
            let base = map(len).expect("anonymous mapping should succeed");
            assert!((0..len).all(|i| base.as_ptr().add(i).read() == 0));

            base.as_ptr().write(0xFF);
            assert_eq!(base.as_ptr().read(), 0xFF);

            unmap(base.as_ptr(), len).expect("unmap should succeed");
        }
    }
}
