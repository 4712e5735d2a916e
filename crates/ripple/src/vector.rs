//! The observed dynamic-array engine.
//!
//! [`Vector`] owns its backing buffer (through [`RawBuf`]) and, once the
//! first subscriber arrives, an [`Observer`]. The allocator, comparator,
//! and teardown hook are injected capabilities. Every observable operation
//! validates first, notifies second, and mutates last, so subscribers
//! always see pre-mutation state; the one exception is `make_ordered`,
//! which notifies after the sort that establishes its invariant.

use std::cmp::Ordering;
use std::fmt;
use std::mem::{self, ManuallyDrop};
use std::ops::Deref;
use std::ptr::{self, NonNull};
use std::slice;

use ripple_alloc::{Allocator, RawBuf, System};

use crate::action::ActionSet;
use crate::error::VectorError;
use crate::event::Event;
use crate::flags::Flags;
use crate::observer::{Observer, SubscriptionId};

/// Capacity of the first allocation, in elements.
///
/// `resize` and `reserve` requests below this are clamped up to it.
pub const MIN_CAPACITY: usize = 10;

/// Multiplier applied to the capacity on lazy growth.
pub const GROWTH_FACTOR: usize = 2;

/// Three-way element comparator.
///
/// Ascending convention: `Ordering::Less` means the first argument sorts
/// before the second. Ordered mode inserts a newcomer before the first
/// existing element that compares `Greater` than it, so equal elements
/// keep their arrival order.
pub type Comparator<T> = fn(&T, &T) -> Ordering;

/// Per-element teardown hook.
///
/// Runs on an element immediately before the container drops it (erase,
/// replace, shrinking resize, final teardown). Dropping itself is always
/// performed by the container; the hook is for releasing resources the
/// element type cannot release through [`Drop`] alone.
pub type Teardown<T> = fn(&mut T);

/// A growable, optionally sorted, optionally observed element buffer.
///
/// Grows from empty to [`MIN_CAPACITY`] slots on the first insertion and
/// doubles on every lazy growth after that. All backing-buffer traffic
/// goes through the injected [`Allocator`]; [`System`] is the default.
///
/// # Example
///
/// ```
/// # fn main() -> Result<(), ripple::VectorError> {
/// use ripple::Vector;
///
/// let mut v: Vector<u32> = Vector::new()?;
/// assert_eq!(v.capacity(), 0);
/// v.add(7)?;
/// assert_eq!(v.capacity(), 10);
/// assert_eq!(v.as_slice(), &[7]);
/// # Ok(())
/// # }
/// ```
pub struct Vector<T, A: Allocator = System> {
    buf: RawBuf<T, A>,
    len: usize,
    flags: Flags,
    cmp: Option<Comparator<T>>,
    teardown: Option<Teardown<T>>,
    observer: Option<Observer<T>>,
}

impl<T> Vector<T> {
    /// Create an empty vector (capacity 0, no allocation) on the platform
    /// allocator.
    ///
    /// Zero-sized element types are rejected.
    pub fn new() -> Result<Self, VectorError> {
        Self::new_in(System)
    }

    /// Adopt a caller-owned, already-populated buffer.
    ///
    /// Ownership of the `Vec`'s allocation transfers without copying; its
    /// length becomes the vector's size and its capacity the vector's
    /// capacity. Zero-sized element types are rejected.
    pub fn from_vec(vec: Vec<T>) -> Result<Self, VectorError> {
        if mem::size_of::<T>() == 0 {
            return Err(VectorError::ZeroSizedElement);
        }
        let mut vec = ManuallyDrop::new(vec);
        let len = vec.len();
        let cap = vec.capacity();
        let buf = if cap == 0 {
            RawBuf::new_in(System)
        } else {
            let ptr = NonNull::new(vec.as_mut_ptr()).expect("Vec buffers are non-null");
            // SAFETY: the Vec's block came from the global allocator with
            // Layout::array::<T>(cap); ManuallyDrop hands it to us.
            unsafe { RawBuf::from_raw_parts_in(ptr, cap, System) }
        };
        Ok(Self {
            buf,
            len,
            flags: Flags::EMPTY,
            cmp: None,
            teardown: None,
            observer: None,
        })
    }
}

impl<T, A: Allocator> Vector<T, A> {
    /// Create an empty vector bound to `alloc` for its entire lifetime.
    ///
    /// Zero-sized element types are rejected. Pass `&A` to share one
    /// allocator across containers without giving up ownership.
    pub fn new_in(alloc: A) -> Result<Self, VectorError> {
        if mem::size_of::<T>() == 0 {
            return Err(VectorError::ZeroSizedElement);
        }
        Ok(Self {
            buf: RawBuf::new_in(alloc),
            len: 0,
            flags: Flags::EMPTY,
            cmp: None,
            teardown: None,
            observer: None,
        })
    }

    // --- state -----------------------------------------------------------

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if there are no live elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of allocated element slots.
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Size of one element in bytes.
    pub const fn element_size(&self) -> usize {
        mem::size_of::<T>()
    }

    /// The current mode flags.
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Returns `true` if the container is in static mode.
    pub fn is_static(&self) -> bool {
        self.flags.contains(Flags::STATIC)
    }

    /// Returns `true` if the container is in ordered mode.
    pub fn is_ordered(&self) -> bool {
        self.flags.contains(Flags::ORDERED)
    }

    /// The injected allocator.
    pub fn allocator(&self) -> &A {
        self.buf.allocator()
    }

    /// Set flags directly. Only [`Flags::SETTABLE`] flags are accepted;
    /// ORDERED and OBSERVED are managed by [`Vector::make_ordered`] and
    /// [`Vector::subscribe`].
    pub fn set_flags(&mut self, flags: Flags) -> Result<(), VectorError> {
        let reserved = flags.difference(Flags::SETTABLE);
        if !reserved.is_empty() {
            return Err(VectorError::ReservedFlags(reserved));
        }
        self.flags.set(flags);
        Ok(())
    }

    /// Clear flags directly. Same restrictions as [`Vector::set_flags`].
    pub fn clear_flags(&mut self, flags: Flags) -> Result<(), VectorError> {
        let reserved = flags.difference(Flags::SETTABLE);
        if !reserved.is_empty() {
            return Err(VectorError::ReservedFlags(reserved));
        }
        self.flags.clear(flags);
        Ok(())
    }

    /// Set [`Flags::RECURSIVE_TEARDOWN`]: apply the teardown hook during
    /// `clear` as well as targeted removals.
    pub fn set_recursive_teardown(&mut self) {
        self.flags.set(Flags::RECURSIVE_TEARDOWN);
    }

    /// Install the three-way comparator used by ordered mode, `sort`, and
    /// `make_ordered`.
    pub fn set_comparator(&mut self, cmp: Comparator<T>) {
        self.cmp = Some(cmp);
    }

    /// Install the per-element teardown hook.
    pub fn set_teardown(&mut self, hook: Teardown<T>) {
        self.teardown = Some(hook);
    }

    // --- capacity --------------------------------------------------------

    /// Grow the backing buffer to at least `min_capacity` slots (clamped
    /// up to [`MIN_CAPACITY`]), sized to the exact need.
    ///
    /// Never shrinks and never notifies; [`Vector::resize`] is the
    /// observable capacity operation. Rejected in static mode when growth
    /// would be required.
    pub fn reserve(&mut self, min_capacity: usize) -> Result<(), VectorError> {
        let target = min_capacity.max(MIN_CAPACITY);
        if target <= self.buf.capacity() {
            return Ok(());
        }
        if self.flags.contains(Flags::STATIC) {
            return Err(VectorError::StaticMode);
        }
        self.buf.grow_exact(target)?;
        Ok(())
    }

    /// Reallocate the backing buffer to exactly `new_capacity` slots
    /// (clamped up to [`MIN_CAPACITY`]).
    ///
    /// Rejected in static mode. Notifies [`Event::Resize`] before
    /// touching the buffer. When shrinking below the current length, every
    /// element beyond the new bound is torn down (hook, then drop) before
    /// the reallocation.
    pub fn resize(&mut self, new_capacity: usize) -> Result<(), VectorError> {
        if self.flags.contains(Flags::STATIC) {
            return Err(VectorError::StaticMode);
        }
        let target = new_capacity.max(MIN_CAPACITY);
        if target == self.buf.capacity() {
            return Ok(());
        }
        self.emit(&Event::Resize {
            new_capacity: target,
        });
        if target > self.buf.capacity() {
            self.buf.grow_exact(target)?;
        } else {
            if self.len > target {
                let old_len = self.len;
                self.len = target;
                self.teardown_range(target, old_len, true);
            }
            self.buf.shrink_exact(target)?;
        }
        Ok(())
    }

    // --- addition --------------------------------------------------------

    /// Add one element.
    ///
    /// In ordered mode the element is placed before the first existing
    /// element the comparator orders after it (stable for equals);
    /// otherwise it is appended at the tail. Grows the buffer if full;
    /// growth is rejected in static mode. Notifies [`Event::Add`].
    pub fn add(&mut self, elem: T) -> Result<(), VectorError> {
        if self.flags.contains(Flags::ORDERED) {
            let cmp = self.cmp.ok_or(VectorError::ComparatorUnset)?;
            self.ensure_room_for_one()?;
            self.emit(&Event::Add { elem: &elem });
            let index = self.ordered_position(&elem, cmp);
            // SAFETY: room was ensured; index <= len.
            unsafe { self.insert_unchecked(index, elem) };
        } else {
            self.ensure_room_for_one()?;
            self.emit(&Event::Add { elem: &elem });
            // SAFETY: room was ensured; slot `len` is within capacity.
            unsafe { self.buf.ptr().add(self.len).write(elem) };
            self.len += 1;
        }
        Ok(())
    }

    /// Insert `elem` at `index`, shifting `[index, len)` right one slot.
    ///
    /// Rejected in ordered mode (use [`Vector::add`]). `index` must lie in
    /// `[0, len)`. Grows the buffer if full; growth is rejected in static
    /// mode. Notifies [`Event::Insert`].
    pub fn insert(&mut self, index: usize, elem: T) -> Result<(), VectorError> {
        if self.flags.contains(Flags::ORDERED) {
            return Err(VectorError::OrderedMode);
        }
        self.ensure_index(index)?;
        self.ensure_room_for_one()?;
        self.emit(&Event::Insert { index, elem: &elem });
        // SAFETY: room was ensured; index < len.
        unsafe { self.insert_unchecked(index, elem) };
        Ok(())
    }

    /// Clone `other`'s elements onto this vector's tail, in order.
    ///
    /// Element types match by construction; mixing them is a compile
    /// error. Grows eagerly to the exact combined size if needed (rejected
    /// in static mode). Notifies [`Event::Append`] before copying. On an
    /// ordered vector the combined sequence is re-sorted afterwards to
    /// keep the invariant.
    pub fn append<B: Allocator>(&mut self, other: &Vector<T, B>) -> Result<(), VectorError>
    where
        T: Clone,
    {
        let needed = self.len + other.len;
        if needed > self.buf.capacity() {
            if self.flags.contains(Flags::STATIC) {
                return Err(VectorError::StaticMode);
            }
            self.buf.grow_exact(needed.max(MIN_CAPACITY))?;
        }
        self.emit(&Event::Append {
            tail: other.as_slice(),
        });
        for elem in other.as_slice() {
            // SAFETY: capacity covers `needed`; one live element is added
            // per write, so a panicking clone leaks at most dead slots.
            unsafe { self.buf.ptr().add(self.len).write(elem.clone()) };
            self.len += 1;
        }
        if self.flags.contains(Flags::ORDERED) {
            if let Some(cmp) = self.cmp {
                self.as_mut_slice().sort_by(cmp);
            }
        }
        Ok(())
    }

    // --- removal ---------------------------------------------------------

    /// Tear down and remove the element at `index`, shifting the tail
    /// left one slot.
    ///
    /// The element is torn down exactly once (hook, then drop). Notifies
    /// [`Event::Erase`] with the doomed element while it is still live.
    pub fn erase(&mut self, index: usize) -> Result<(), VectorError> {
        self.ensure_index(index)?;
        let (elems, observer) = self.parts();
        if let Some(obs) = observer {
            obs.notify(&Event::Erase {
                index,
                elem: &elems[index],
            });
        }
        let hook = self.teardown;
        // SAFETY: index < len; the slot is torn down exactly once and then
        // overwritten by the left shift, so no double drop is possible.
        unsafe {
            let slot = self.buf.ptr().add(index);
            if let Some(hook) = hook {
                hook(&mut *slot);
            }
            ptr::drop_in_place(slot);
            ptr::copy(slot.add(1), slot, self.len - index - 1);
        }
        self.len -= 1;
        Ok(())
    }

    /// Tear down the element at `index` and overwrite it with `elem`.
    ///
    /// Notifies [`Event::Replace`] with the incoming element.
    pub fn replace(&mut self, index: usize, elem: T) -> Result<(), VectorError> {
        self.ensure_index(index)?;
        self.emit(&Event::Replace { index, elem: &elem });
        let hook = self.teardown;
        // SAFETY: index < len; the old value is torn down once, then the
        // slot is re-initialised with the incoming element.
        unsafe {
            let slot = self.buf.ptr().add(index);
            if let Some(hook) = hook {
                hook(&mut *slot);
            }
            ptr::drop_in_place(slot);
            slot.write(elem);
        }
        Ok(())
    }

    /// Remove every element; capacity and buffer are retained.
    ///
    /// Elements are dropped. The teardown hook runs only when
    /// [`Flags::RECURSIVE_TEARDOWN`] is set. Notifies [`Event::Clear`].
    pub fn clear(&mut self) {
        self.emit(&Event::Clear);
        let run_hook = self.flags.contains(Flags::RECURSIVE_TEARDOWN);
        let old_len = self.len;
        self.len = 0;
        self.teardown_range(0, old_len, run_hook);
    }

    // --- derived containers ----------------------------------------------

    /// Produce an independent copy with a fresh, exactly-sized backing
    /// buffer.
    ///
    /// Flags (minus OBSERVED), comparator, and teardown hook carry over;
    /// subscribers do not. Notifies [`Event::Copy`] on the source. Takes
    /// `&mut self` because notification may run stateful callbacks.
    pub fn copy(&mut self) -> Result<Vector<T, A>, VectorError>
    where
        T: Clone,
        A: Clone,
    {
        self.emit(&Event::Copy);
        let mut out = self.derived(self.flags.difference(Flags::OBSERVED))?;
        if self.len > 0 {
            out.buf.grow_exact(self.len.max(MIN_CAPACITY))?;
        }
        for elem in self.as_slice() {
            // SAFETY: out has capacity for every source element.
            unsafe { out.buf.ptr().add(out.len).write(elem.clone()) };
            out.len += 1;
        }
        Ok(out)
    }

    /// Copy the half-open element range `[begin, end)` into a brand-new
    /// vector.
    ///
    /// Requires `begin < end` and `end <= len`. The source is unchanged.
    /// Notifies [`Event::Slice`]. STATIC and OBSERVED are not carried to
    /// the result.
    pub fn slice(&mut self, begin: usize, end: usize) -> Result<Vector<T, A>, VectorError>
    where
        T: Clone,
        A: Clone,
    {
        if begin >= end || end > self.len {
            return Err(VectorError::InvalidRange {
                begin,
                end,
                len: self.len,
            });
        }
        let mut out =
            self.derived(self.flags.difference(Flags::OBSERVED | Flags::STATIC))?;
        out.buf.grow_exact((end - begin).max(MIN_CAPACITY))?;
        for elem in &self.as_slice()[begin..end] {
            // SAFETY: out has capacity for the whole range.
            unsafe { out.buf.ptr().add(out.len).write(elem.clone()) };
            out.len += 1;
        }
        if let Some(obs) = self.observer.as_mut() {
            obs.notify(&Event::Slice {
                begin,
                end,
                elems: out.as_slice(),
            });
        }
        Ok(out)
    }

    /// Copy the elements `pred` accepts into a brand-new vector,
    /// preserving input order.
    ///
    /// `pred` receives each element and its index; returning `true` keeps
    /// the element. The source is unchanged. Notifies [`Event::Filter`]
    /// with the kept elements. STATIC and OBSERVED are not carried to the
    /// result.
    pub fn filter<F>(&mut self, mut pred: F) -> Result<Vector<T, A>, VectorError>
    where
        T: Clone,
        A: Clone,
        F: FnMut(&T, usize) -> bool,
    {
        let mut out =
            self.derived(self.flags.difference(Flags::OBSERVED | Flags::STATIC))?;
        for (index, elem) in self.as_slice().iter().enumerate() {
            if pred(elem, index) {
                out.ensure_room_for_one()?;
                // SAFETY: room was ensured on out.
                unsafe { out.buf.ptr().add(out.len).write(elem.clone()) };
                out.len += 1;
            }
        }
        if let Some(obs) = self.observer.as_mut() {
            obs.notify(&Event::Filter {
                kept: out.as_slice(),
            });
        }
        Ok(out)
    }

    /// Empty vector sharing this one's allocator, comparator, and hook.
    fn derived(&self, flags: Flags) -> Result<Vector<T, A>, VectorError>
    where
        A: Clone,
    {
        let mut out = Vector::new_in(self.buf.allocator().clone())?;
        out.flags = flags;
        out.cmp = self.cmp;
        out.teardown = self.teardown;
        Ok(out)
    }

    // --- ordering --------------------------------------------------------

    /// Sort the elements in place with the installed comparator (stable,
    /// O(n log n)).
    ///
    /// Notifies [`Event::Sort`] before sorting.
    pub fn sort(&mut self) -> Result<(), VectorError> {
        let cmp = self.cmp.ok_or(VectorError::ComparatorUnset)?;
        self.emit(&Event::Sort);
        self.as_mut_slice().sort_by(cmp);
        Ok(())
    }

    /// Enter static mode: every operation that would reallocate is
    /// rejected from now on. Notifies [`Event::MakeStatic`].
    pub fn make_static(&mut self) {
        self.emit(&Event::MakeStatic);
        self.flags.set(Flags::STATIC);
    }

    /// Enter ordered mode: sort now and keep the sequence sorted through
    /// every later mutation. Requires a comparator. Notifies
    /// [`Event::MakeOrdered`] after the establishing sort.
    pub fn make_ordered(&mut self) -> Result<(), VectorError> {
        let cmp = self.cmp.ok_or(VectorError::ComparatorUnset)?;
        self.flags.set(Flags::ORDERED);
        self.as_mut_slice().sort_by(cmp);
        self.emit(&Event::MakeOrdered);
        Ok(())
    }

    // --- data hand-off ---------------------------------------------------

    /// Release the live elements to the caller and tear down the
    /// container.
    ///
    /// Ownership of the elements transfers; teardown hooks are
    /// deliberately not run because the caller now owns the living values.
    /// Notifies [`Event::ReleaseData`]; no destruct notification follows.
    pub fn into_vec(mut self) -> Vec<T> {
        self.emit(&Event::ReleaseData);
        let len = self.len;
        let mut out = Vec::with_capacity(len);
        // SAFETY: the first len slots are live; their ownership moves into
        // `out` by bitwise copy and the originals are never dropped (the
        // container is dismantled below without running element drops).
        unsafe {
            ptr::copy_nonoverlapping(self.buf.ptr(), out.as_mut_ptr(), len);
            out.set_len(len);
        }
        let this = ManuallyDrop::new(self);
        // SAFETY: each owned field is read exactly once and `this` is
        // never dropped, so nothing is freed twice. Dropping the RawBuf
        // returns the block without touching the moved-out elements.
        unsafe {
            drop(ptr::read(&this.observer));
            drop(ptr::read(&this.buf));
        }
        out
    }

    /// Clone the live elements into an independent `Vec` on the global
    /// allocator, leaving the container fully usable.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.as_slice().to_vec()
    }

    // --- access ----------------------------------------------------------

    /// The live elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: the first len slots are live; with len 0 the pointer is
        // dangling but well-aligned, which from_raw_parts permits.
        unsafe { slice::from_raw_parts(self.buf.ptr(), self.len) }
    }

    /// The live elements as a mutable slice.
    ///
    /// Writing through this can violate the ordered-mode invariant; the
    /// container does not re-check it.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as for as_slice, plus &mut self guarantees uniqueness.
        unsafe { slice::from_raw_parts_mut(self.buf.ptr(), self.len) }
    }

    /// Shared access to the element at `index`.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    /// Mutable access to the element at `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    /// The first element, if any.
    pub fn first(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// The last element, if any.
    pub fn last(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Iterate over the live elements.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Iterate mutably over the live elements. Same ordered-mode caveat
    /// as [`Vector::as_mut_slice`].
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Call `f` on every element (mutably) with its index.
    ///
    /// An empty container is an error rather than a no-op.
    pub fn for_each<F>(&mut self, mut f: F) -> Result<(), VectorError>
    where
        F: FnMut(&mut T, usize),
    {
        if self.len == 0 {
            return Err(VectorError::Empty);
        }
        for (index, elem) in self.as_mut_slice().iter_mut().enumerate() {
            f(elem, index);
        }
        Ok(())
    }

    /// Linear-scan for the first element `cmp` reports equal to `target`.
    ///
    /// An empty container is an error; a fruitless scan is
    /// [`VectorError::NotFound`].
    pub fn find(&self, target: &T, cmp: Comparator<T>) -> Result<usize, VectorError> {
        if self.len == 0 {
            return Err(VectorError::Empty);
        }
        self.as_slice()
            .iter()
            .position(|elem| cmp(elem, target) == Ordering::Equal)
            .ok_or(VectorError::NotFound)
    }

    // --- notification ----------------------------------------------------

    /// Register `callback` for every action in `mask`.
    ///
    /// The observer is created lazily on the first subscription and
    /// [`Flags::OBSERVED`] is set. Returns the subscription handle.
    pub fn subscribe<F>(
        &mut self,
        mask: ActionSet,
        callback: F,
    ) -> Result<SubscriptionId, VectorError>
    where
        F: FnMut(&Event<'_, T>) + 'static,
    {
        let obs = self.observer.get_or_insert_with(Observer::new);
        let id = obs.subscribe(mask, callback)?;
        self.flags.set(Flags::OBSERVED);
        Ok(id)
    }

    /// OR `mask` into an existing subscription's action set. Returns the
    /// union mask now in effect.
    pub fn extend_subscription(
        &mut self,
        id: SubscriptionId,
        mask: ActionSet,
    ) -> Result<ActionSet, VectorError> {
        self.observer
            .as_mut()
            .ok_or(VectorError::UnknownSubscription(id))?
            .extend_subscription(id, mask)
    }

    /// Clear the bits of `mask` from a subscription, removing it entirely
    /// when its mask empties. Returns the mask still in effect.
    pub fn unsubscribe(
        &mut self,
        id: SubscriptionId,
        mask: ActionSet,
    ) -> Result<ActionSet, VectorError> {
        self.observer
            .as_mut()
            .ok_or(VectorError::UnknownSubscription(id))?
            .unsubscribe(id, mask)
    }

    /// Number of subscriber records.
    pub fn subscriber_count(&self) -> usize {
        self.observer.as_ref().map_or(0, Observer::len)
    }

    /// Union of all subscriber masks.
    pub fn watched(&self) -> ActionSet {
        self.observer.as_ref().map_or(ActionSet::EMPTY, Observer::watched)
    }

    // --- internals -------------------------------------------------------

    fn ensure_index(&self, index: usize) -> Result<(), VectorError> {
        if index >= self.len {
            return Err(VectorError::OutOfBounds {
                index,
                len: self.len,
            });
        }
        Ok(())
    }

    /// Make room for one more element: lazy minimum-then-doubling growth.
    fn ensure_room_for_one(&mut self) -> Result<(), VectorError> {
        if self.len < self.buf.capacity() {
            return Ok(());
        }
        if self.flags.contains(Flags::STATIC) {
            return Err(VectorError::StaticMode);
        }
        let target = if self.buf.capacity() == 0 {
            MIN_CAPACITY
        } else {
            self.buf.capacity() * GROWTH_FACTOR
        };
        self.buf.grow_exact(target)?;
        Ok(())
    }

    /// First index whose element the comparator orders strictly after
    /// `elem`, or `len` when no such element exists.
    fn ordered_position(&self, elem: &T, cmp: Comparator<T>) -> usize {
        self.as_slice()
            .iter()
            .position(|existing| cmp(existing, elem) == Ordering::Greater)
            .unwrap_or(self.len)
    }

    /// Shift `[index, len)` right one slot and write `elem` into the gap.
    ///
    /// # Safety
    ///
    /// Caller ensures `capacity > len` and `index <= len`.
    unsafe fn insert_unchecked(&mut self, index: usize, elem: T) {
        // SAFETY: per the caller contract there is a free slot past the
        // tail, so the shifted range stays in bounds.
        unsafe {
            let slot = self.buf.ptr().add(index);
            ptr::copy(slot, slot.add(1), self.len - index);
            slot.write(elem);
        }
        self.len += 1;
    }

    /// Tear down the live elements in `[begin, end)`, each exactly once.
    ///
    /// The hook runs only when `run_hook` is set; dropping is
    /// unconditional. Callers must have already fenced the range off from
    /// the live window (`self.len`).
    fn teardown_range(&mut self, begin: usize, end: usize, run_hook: bool) {
        let hook = if run_hook { self.teardown } else { None };
        for i in begin..end {
            // SAFETY: the range held live elements and callers have
            // excluded it from self.len, so each slot is dropped once.
            unsafe {
                let slot = self.buf.ptr().add(i);
                if let Some(hook) = hook {
                    hook(&mut *slot);
                }
                ptr::drop_in_place(slot);
            }
        }
    }

    /// Deliver an event whose payload does not borrow the buffer.
    fn emit(&mut self, event: &Event<'_, T>) {
        if let Some(obs) = self.observer.as_mut() {
            obs.notify(event);
        }
    }

    /// Pre-mutation element view plus observer access, for events whose
    /// payload borrows the live buffer.
    fn parts(&mut self) -> (&[T], Option<&mut Observer<T>>) {
        let ptr = self.buf.ptr();
        let len = self.len;
        // SAFETY: the first len slots are live; the observer is a disjoint
        // field, so handing out both borrows at once is sound.
        let elems = unsafe { slice::from_raw_parts(ptr, len) };
        (elems, self.observer.as_mut())
    }
}

impl<T, A: Allocator> Drop for Vector<T, A> {
    /// Tear down the container: notify [`Event::Destruct`], run the
    /// teardown hook over every live element (if installed), drop the
    /// elements, then release the observer and the backing buffer.
    fn drop(&mut self) {
        self.emit(&Event::Destruct);
        let old_len = self.len;
        self.len = 0;
        self.teardown_range(0, old_len, true);
    }
}

impl<T, A: Allocator> Deref for Vector<T, A> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for Vector<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vector")
            .field("len", &self.len)
            .field("capacity", &self.buf.capacity())
            .field("flags", &self.flags)
            .field("elems", &self.as_slice())
            .finish()
    }
}
