//! Allocation failure reporting.

use std::alloc::Layout;
use std::error::Error;
use std::fmt;

/// Returned when an allocator cannot satisfy a request.
///
/// Carries the layout that was asked for, so callers can report how much
/// memory the failing operation wanted. Zero-sized layouts are rejected
/// with this error as well — ripple allocators never forward a zero-sized
/// request to the platform allocator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AllocError {
    /// The layout that could not be satisfied.
    pub layout: Layout,
}

impl AllocError {
    /// Build an error for a request of `size` bytes of `T`-element storage.
    ///
    /// Used on the capacity-overflow path, where no valid [`Layout`] exists
    /// for the request; the reported layout falls back to a single
    /// element's layout.
    pub(crate) fn overflow<T>() -> Self {
        Self {
            layout: Layout::new::<T>(),
        }
    }
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "allocation of {} bytes (align {}) failed",
            self.layout.size(),
            self.layout.align()
        )
    }
}

impl Error for AllocError {}
