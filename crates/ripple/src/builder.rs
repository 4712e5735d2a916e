//! One-call construction of configured vectors.

use ripple_alloc::{Allocator, System};

use crate::error::VectorError;
use crate::vector::{Comparator, Teardown, Vector};

/// Builder collecting a vector's configuration before construction.
///
/// Every knob is optional; `VectorBuilder::new().build()` is equivalent to
/// [`Vector::new`]. Ordered mode requires a comparator, so
/// [`VectorBuilder::ordered`] takes one rather than leaving the pairing to
/// the caller.
///
/// # Example
///
/// ```
/// # fn main() -> Result<(), ripple::VectorError> {
/// use ripple::VectorBuilder;
///
/// let mut scores = VectorBuilder::new()
///     .capacity(64)
///     .ordered(|a: &u32, b: &u32| a.cmp(b))
///     .build()?;
/// scores.add(30)?;
/// scores.add(10)?;
/// assert_eq!(scores.as_slice(), &[10, 30]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct VectorBuilder<T> {
    capacity: usize,
    static_mode: bool,
    recursive_teardown: bool,
    ordered: bool,
    cmp: Option<Comparator<T>>,
    teardown: Option<Teardown<T>>,
}

impl<T> VectorBuilder<T> {
    /// Start from the all-defaults configuration.
    pub fn new() -> Self {
        Self {
            capacity: 0,
            static_mode: false,
            recursive_teardown: false,
            ordered: false,
            cmp: None,
            teardown: None,
        }
    }

    /// Pre-allocate at least `capacity` slots (clamped up to the engine
    /// minimum).
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Install a comparator without entering ordered mode; `sort` and
    /// `make_ordered` become available on the built vector.
    pub fn comparator(mut self, cmp: Comparator<T>) -> Self {
        self.cmp = Some(cmp);
        self
    }

    /// Build in ordered mode, keeping elements sorted under `cmp` from the
    /// first insertion on.
    pub fn ordered(mut self, cmp: Comparator<T>) -> Self {
        self.cmp = Some(cmp);
        self.ordered = true;
        self
    }

    /// Install the per-element teardown hook.
    pub fn teardown(mut self, hook: Teardown<T>) -> Self {
        self.teardown = Some(hook);
        self
    }

    /// Run the teardown hook on `clear` as well as targeted removals.
    pub fn recursive_teardown(mut self) -> Self {
        self.recursive_teardown = true;
        self
    }

    /// Freeze the capacity once built: the vector rejects every operation
    /// that would reallocate. Combine with [`VectorBuilder::capacity`] to
    /// get a usable fixed-size container.
    pub fn static_mode(mut self) -> Self {
        self.static_mode = true;
        self
    }

    /// Build on the platform allocator.
    pub fn build(self) -> Result<Vector<T>, VectorError> {
        self.build_in(System)
    }

    /// Build on an injected allocator.
    pub fn build_in<A: Allocator>(self, alloc: A) -> Result<Vector<T, A>, VectorError> {
        let mut vector = Vector::new_in(alloc)?;
        if let Some(cmp) = self.cmp {
            vector.set_comparator(cmp);
        }
        if let Some(hook) = self.teardown {
            vector.set_teardown(hook);
        }
        if self.capacity > 0 {
            vector.reserve(self.capacity)?;
        }
        if self.ordered {
            vector.make_ordered()?;
        }
        if self.recursive_teardown {
            vector.set_recursive_teardown();
        }
        // Static last, so the pre-allocation above is not rejected.
        if self.static_mode {
            vector.make_static();
        }
        Ok(vector)
    }
}

impl<T> Default for VectorBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
