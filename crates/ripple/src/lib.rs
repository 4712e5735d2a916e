//! Ripple: observed dynamic arrays with pluggable allocation.
//!
//! A [`Vector`] is a growable element buffer with three opt-in behaviours
//! layered on top:
//!
//! - **Ordered mode** keeps the elements sorted under an installed
//!   comparator through every mutation ([`Vector::make_ordered`]).
//! - **Static mode** freezes the capacity; operations that would
//!   reallocate are rejected ([`Vector::make_static`]).
//! - **Observation** delivers typed [`Event`]s to subscribers before each
//!   structural mutation lands ([`Vector::subscribe`]), selected by a
//!   16-bit [`ActionSet`] mask.
//!
//! All backing-buffer traffic flows through an injected
//! [`Allocator`] capability; [`System`] (the platform allocator) is the
//! default. Zero-sized element types are rejected at construction.
//!
//! # Quick start
//!
//! ```rust
//! # fn main() -> Result<(), ripple::VectorError> {
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use ripple::{Action, Event, Vector};
//!
//! let mut numbers: Vector<u32> = Vector::new()?;
//!
//! // Watch additions and erasures; the callback owns its state.
//! let log = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&log);
//! let sub = numbers.subscribe(Action::Add | Action::Erase, move |event| {
//!     if let Event::Add { elem } = event {
//!         sink.borrow_mut().push(**elem);
//!     }
//! })?;
//!
//! for n in [3, 1, 2] {
//!     numbers.add(n)?;
//! }
//! assert_eq!(numbers.as_slice(), &[3, 1, 2]);
//! assert_eq!(*log.borrow(), [3, 1, 2]);
//!
//! numbers.unsubscribe(sub, ripple::ActionSet::ALL)?;
//! assert_eq!(numbers.subscriber_count(), 0);
//! # Ok(())
//! # }
//! ```
//!
//! # Crates
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`alloc`] | `ripple-alloc` | [`Allocator`] capability, [`RawBuf`](alloc::RawBuf), [`System`] |
//! | (root) | `ripple` | [`Vector`], [`Observer`], actions, events, errors |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_op_in_unsafe_fn)]

/// Allocator capability and raw backing buffers (`ripple-alloc`).
pub use ripple_alloc as alloc;

mod action;
mod builder;
mod error;
mod event;
mod flags;
mod observer;
mod store;
mod vector;

pub use action::{Action, ActionSet, ACTIONS};
pub use builder::VectorBuilder;
pub use error::VectorError;
pub use event::Event;
pub use flags::Flags;
pub use observer::{EventFn, Observer, SubscriptionId};
pub use ripple_alloc::{AllocError, Allocator, System};
pub use store::RecordStore;
pub use vector::{Comparator, Teardown, Vector, GROWTH_FACTOR, MIN_CAPACITY};
