//! Capacity-only typed buffers allocated through an injected capability.

use std::alloc::Layout;
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;

use crate::{AllocError, Allocator};

/// A raw, typed backing buffer.
///
/// `RawBuf` owns a block of `capacity` slots of `T` and the allocator it
/// was carved from, and nothing else: it never reads, writes, or drops
/// elements. Tracking which slots hold live values is the owning
/// container's contract. Dropping a `RawBuf` returns the block to its
/// allocator without touching the contents.
///
/// Zero-sized `T` is not supported; containers reject it at construction.
pub struct RawBuf<T, A: Allocator> {
    ptr: NonNull<T>,
    cap: usize,
    alloc: A,
    _marker: PhantomData<T>,
}

impl<T, A: Allocator> RawBuf<T, A> {
    /// Create an empty buffer (capacity 0, no allocation) bound to `alloc`.
    pub fn new_in(alloc: A) -> Self {
        debug_assert!(mem::size_of::<T>() != 0, "zero-sized elements unsupported");
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
            alloc,
            _marker: PhantomData,
        }
    }

    /// Adopt an existing block of `cap` slots.
    ///
    /// # Safety
    ///
    /// `ptr` must point to a block of exactly `Layout::array::<T>(cap)`
    /// obtained from `alloc` (or an allocator interchangeable with it, such
    /// as the global allocator for [`System`](crate::System)) and not yet
    /// freed. `cap` must be non-zero.
    pub unsafe fn from_raw_parts_in(ptr: NonNull<T>, cap: usize, alloc: A) -> Self {
        debug_assert!(cap > 0);
        Self {
            ptr,
            cap,
            alloc,
            _marker: PhantomData,
        }
    }

    /// Pointer to the first slot.
    ///
    /// Dangling (but well-aligned) while the capacity is 0.
    pub fn ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Number of slots in the block.
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// The allocator this buffer grows and frees through.
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Grow the block to exactly `new_cap` slots.
    ///
    /// The first `capacity()` slots keep their bytes. On failure the buffer
    /// is unchanged.
    pub fn grow_exact(&mut self, new_cap: usize) -> Result<(), AllocError> {
        debug_assert!(new_cap > self.cap);
        let new_layout = Self::layout_for(new_cap)?;
        let ptr = if self.cap == 0 {
            self.alloc.allocate(new_layout)?
        } else {
            let old_layout = Self::layout_for(self.cap)?;
            // SAFETY: ptr was returned by self.alloc for old_layout and is
            // still live; new_layout.size() was validated just above.
            unsafe {
                self.alloc
                    .reallocate(self.ptr.cast(), old_layout, new_layout.size())?
            }
        };
        self.ptr = ptr.cast();
        self.cap = new_cap;
        Ok(())
    }

    /// Shrink the block to exactly `new_cap` slots.
    ///
    /// The first `new_cap` slots keep their bytes; shrinking to 0 returns
    /// the block to the allocator. On failure the buffer is unchanged.
    pub fn shrink_exact(&mut self, new_cap: usize) -> Result<(), AllocError> {
        debug_assert!(new_cap < self.cap);
        let old_layout = Self::layout_for(self.cap)?;
        if new_cap == 0 {
            // SAFETY: ptr was returned by self.alloc for old_layout.
            unsafe { self.alloc.deallocate(self.ptr.cast(), old_layout) };
            self.ptr = NonNull::dangling();
            self.cap = 0;
            return Ok(());
        }
        let new_layout = Self::layout_for(new_cap)?;
        // SAFETY: ptr was returned by self.alloc for old_layout and is
        // still live; new_layout.size() is non-zero and smaller.
        let ptr = unsafe {
            self.alloc
                .reallocate(self.ptr.cast(), old_layout, new_layout.size())?
        };
        self.ptr = ptr.cast();
        self.cap = new_cap;
        Ok(())
    }

    fn layout_for(cap: usize) -> Result<Layout, AllocError> {
        Layout::array::<T>(cap).map_err(|_| AllocError::overflow::<T>())
    }
}

impl<T, A: Allocator> Drop for RawBuf<T, A> {
    fn drop(&mut self) {
        if self.cap > 0 {
            let layout =
                Layout::array::<T>(self.cap).expect("live capacity always has a valid layout");
            // SAFETY: ptr was returned by self.alloc for this layout and
            // has not been freed; cap > 0 means the block is live.
            unsafe { self.alloc.deallocate(self.ptr.cast(), layout) };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::System;
    use std::cell::Cell;

    /// Counts calls through the capability, for injection tests.
    #[derive(Default)]
    struct TrackingAlloc {
        allocs: Cell<usize>,
        reallocs: Cell<usize>,
        deallocs: Cell<usize>,
    }

    unsafe impl Allocator for TrackingAlloc {
        fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
            self.allocs.set(self.allocs.get() + 1);
            System.allocate(layout)
        }

        fn allocate_zeroed(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
            self.allocs.set(self.allocs.get() + 1);
            System.allocate_zeroed(layout)
        }

        unsafe fn reallocate(
            &self,
            ptr: NonNull<u8>,
            old_layout: Layout,
            new_size: usize,
        ) -> Result<NonNull<u8>, AllocError> {
            self.reallocs.set(self.reallocs.get() + 1);
            unsafe { System.reallocate(ptr, old_layout, new_size) }
        }

        unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
            self.deallocs.set(self.deallocs.get() + 1);
            unsafe { System.deallocate(ptr, layout) }
        }
    }

    #[test]
    fn new_in_does_not_allocate() {
        let alloc = TrackingAlloc::default();
        let buf: RawBuf<u64, _> = RawBuf::new_in(&alloc);
        assert_eq!(buf.capacity(), 0);
        assert_eq!(alloc.allocs.get(), 0);
    }

    #[test]
    fn grow_writes_survive_regrowth() {
        let mut buf: RawBuf<u64, System> = RawBuf::new_in(System);
        buf.grow_exact(10).unwrap();
        assert_eq!(buf.capacity(), 10);
        // SAFETY: slots 0..10 are allocated.
        unsafe {
            for i in 0..10 {
                buf.ptr().add(i).write(i as u64 * 3);
            }
        }
        buf.grow_exact(20).unwrap();
        assert_eq!(buf.capacity(), 20);
        // SAFETY: first 10 slots were initialised before the grow.
        unsafe {
            for i in 0..10 {
                assert_eq!(buf.ptr().add(i).read(), i as u64 * 3);
            }
        }
    }

    #[test]
    fn shrink_preserves_prefix() {
        let mut buf: RawBuf<u32, System> = RawBuf::new_in(System);
        buf.grow_exact(16).unwrap();
        // SAFETY: slots 0..16 are allocated.
        unsafe {
            for i in 0..16 {
                buf.ptr().add(i).write(i as u32);
            }
        }
        buf.shrink_exact(4).unwrap();
        assert_eq!(buf.capacity(), 4);
        // SAFETY: slots 0..4 survived the shrink with their bytes.
        unsafe {
            for i in 0..4 {
                assert_eq!(buf.ptr().add(i).read(), i as u32);
            }
        }
    }

    #[test]
    fn shrink_to_zero_frees_the_block() {
        let alloc = TrackingAlloc::default();
        let mut buf: RawBuf<u32, _> = RawBuf::new_in(&alloc);
        buf.grow_exact(8).unwrap();
        buf.shrink_exact(0).unwrap();
        assert_eq!(buf.capacity(), 0);
        assert_eq!(alloc.deallocs.get(), 1);
        drop(buf);
        // Dropping an empty buffer must not free again.
        assert_eq!(alloc.deallocs.get(), 1);
    }

    #[test]
    fn every_operation_routes_through_the_capability() {
        let alloc = TrackingAlloc::default();
        let mut buf: RawBuf<u8, _> = RawBuf::new_in(&alloc);
        buf.grow_exact(10).unwrap();
        buf.grow_exact(20).unwrap();
        drop(buf);
        assert_eq!(alloc.allocs.get(), 1);
        assert_eq!(alloc.reallocs.get(), 1);
        assert_eq!(alloc.deallocs.get(), 1);
    }

    #[test]
    fn adopts_a_vec_buffer() {
        let mut vec = std::mem::ManuallyDrop::new(vec![7u32, 8, 9]);
        let (ptr, len, cap) = (vec.as_mut_ptr(), vec.len(), vec.capacity());
        // SAFETY: the Vec's buffer came from the global allocator with
        // Layout::array::<u32>(cap); ManuallyDrop hands ownership to us.
        let buf =
            unsafe { RawBuf::from_raw_parts_in(NonNull::new(ptr).unwrap(), cap, System) };
        assert_eq!(buf.capacity(), cap);
        // SAFETY: the first `len` slots hold the Vec's elements.
        unsafe {
            for i in 0..len {
                assert_eq!(buf.ptr().add(i).read(), 7 + i as u32);
            }
        }
    }

    #[test]
    fn capacity_overflow_is_an_error() {
        let mut buf: RawBuf<u64, System> = RawBuf::new_in(System);
        assert!(buf.grow_exact(usize::MAX / 2).is_err());
        assert_eq!(buf.capacity(), 0);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn regrow_and_shrink_preserve_the_prefix(
                first in 1usize..64,
                extra in 1usize..64,
                keep in 1usize..64,
            ) {
                let keep = keep.min(first);
                let mut buf: RawBuf<u32, System> = RawBuf::new_in(System);
                buf.grow_exact(first).unwrap();
                // SAFETY: slots 0..first are allocated.
                unsafe {
                    for i in 0..first {
                        buf.ptr().add(i).write(i as u32);
                    }
                }
                buf.grow_exact(first + extra).unwrap();
                if keep < buf.capacity() {
                    buf.shrink_exact(keep).unwrap();
                }
                prop_assert!(buf.capacity() >= keep);
                // SAFETY: slots 0..keep kept their bytes across both moves.
                unsafe {
                    for i in 0..keep {
                        prop_assert_eq!(buf.ptr().add(i).read(), i as u32);
                    }
                }
            }
        }
    }
}
