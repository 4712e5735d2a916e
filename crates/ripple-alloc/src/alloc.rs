//! The four-operation allocator capability and its [`System`] default.

use std::alloc::Layout;
use std::ptr::NonNull;

use crate::error::AllocError;

/// A pluggable allocation capability.
///
/// Four operations: allocate, allocate-zeroed, reallocate, deallocate.
/// Containers are handed an `Allocator` at construction and route every
/// backing-buffer operation through it for their entire lifetime.
///
/// Zero-sized layouts are invalid for all four operations; implementations
/// must return [`AllocError`] rather than forwarding them.
///
/// # Safety
///
/// Implementations must satisfy the usual allocator contract:
///
/// - A pointer returned by `allocate`, `allocate_zeroed`, or `reallocate`
///   is valid for reads and writes of the requested layout until it is
///   passed to `deallocate` or `reallocate` on the same allocator.
/// - `reallocate` preserves the first `min(old, new)` bytes of the block.
/// - Returned pointers honour the layout's alignment.
pub unsafe trait Allocator {
    /// Allocate a block for `layout`. The contents are uninitialised.
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError>;

    /// Allocate a block for `layout` with every byte set to zero.
    fn allocate_zeroed(&self, layout: Layout) -> Result<NonNull<u8>, AllocError>;

    /// Resize the block at `ptr` from `old_layout` to `new_size` bytes,
    /// keeping `old_layout.align()`.
    ///
    /// On success the old pointer is invalidated and the first
    /// `min(old_layout.size(), new_size)` bytes are preserved.
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by this allocator for `old_layout` and
    /// not yet freed. `new_size` must be non-zero and must not overflow
    /// `isize::MAX` when rounded up to `old_layout.align()`.
    unsafe fn reallocate(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_size: usize,
    ) -> Result<NonNull<u8>, AllocError>;

    /// Return the block at `ptr` to the allocator.
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by this allocator for `layout` and not
    /// yet freed.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);
}

// A shared reference to an allocator is itself an allocator, so containers
// can borrow a long-lived capability instead of owning one.
unsafe impl<A: Allocator + ?Sized> Allocator for &A {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        (**self).allocate(layout)
    }

    fn allocate_zeroed(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        (**self).allocate_zeroed(layout)
    }

    unsafe fn reallocate(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_size: usize,
    ) -> Result<NonNull<u8>, AllocError> {
        // SAFETY: caller upholds the reallocate contract.
        unsafe { (**self).reallocate(ptr, old_layout, new_size) }
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: caller upholds the deallocate contract.
        unsafe { (**self).deallocate(ptr, layout) }
    }
}

/// The platform allocator, as a zero-sized capability.
///
/// A direct pass-through to [`std::alloc`]. This is the default allocator
/// for every ripple container that is not handed an explicit one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct System;

unsafe impl Allocator for System {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        if layout.size() == 0 {
            return Err(AllocError { layout });
        }
        // SAFETY: layout has non-zero size.
        let ptr = unsafe { std::alloc::alloc(layout) };
        NonNull::new(ptr).ok_or(AllocError { layout })
    }

    fn allocate_zeroed(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        if layout.size() == 0 {
            return Err(AllocError { layout });
        }
        // SAFETY: layout has non-zero size.
        let ptr = unsafe { std::alloc::alloc_zeroed(layout) };
        NonNull::new(ptr).ok_or(AllocError { layout })
    }

    unsafe fn reallocate(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_size: usize,
    ) -> Result<NonNull<u8>, AllocError> {
        if new_size == 0 {
            return Err(AllocError { layout: old_layout });
        }
        // SAFETY: caller guarantees ptr/old_layout came from this allocator
        // and new_size is valid for old_layout.align().
        let ptr = unsafe { std::alloc::realloc(ptr.as_ptr(), old_layout, new_size) };
        NonNull::new(ptr).ok_or_else(|| {
            let layout = Layout::from_size_align(new_size, old_layout.align())
                .unwrap_or(old_layout);
            AllocError { layout }
        })
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: caller guarantees ptr/layout came from this allocator.
        unsafe { std::alloc::dealloc(ptr.as_ptr(), layout) }
    }
}
