//! Allocator capability and raw backing buffers for ripple containers.
//!
//! Provides the pluggable allocation seam used by every ripple container.
//! This crate owns the raw block management; element lifecycle on top of
//! the blocks lives with the containers. Every unsafe block carries a
//! `SAFETY:` comment.
//!
//! # Architecture
//!
//! ```text
//! Vector<T, A>  (crates/ripple)
//! └── RawBuf<T, A>        capacity-only typed buffer
//!     └── A: Allocator    four-operation capability
//!         └── System      pass-through to std::alloc (default)
//! ```
//!
//! The [`Allocator`] trait is a capability, not a registry: each container
//! instance is handed its allocator at construction and keeps it for life.
//! There is no process-wide "current allocator". Shared allocators are
//! expressed as `&A`, which also implements [`Allocator`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod alloc;
mod error;
mod raw;

pub use alloc::{Allocator, System};
pub use error::AllocError;
pub use raw::RawBuf;
