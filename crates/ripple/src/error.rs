//! Error types for the ripple container engine.
//!
//! Every fallible operation returns `Result<_, VectorError>`; there is no
//! sticky per-container error state. The null-argument failure modes of
//! pointer-based designs do not exist here (the type system rules them
//! out), and appending across element types is a compile error rather than
//! a runtime mismatch.

use std::error::Error;
use std::fmt;

use ripple_alloc::AllocError;

use crate::flags::Flags;
use crate::observer::SubscriptionId;

/// Errors from [`Vector`](crate::Vector) and [`Observer`](crate::Observer)
/// operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VectorError {
    /// The allocator could not satisfy a backing-buffer request.
    Alloc(AllocError),
    /// The element type is zero-sized; such containers cannot be built.
    ZeroSizedElement,
    /// A reallocating operation was called on a static-mode container.
    StaticMode,
    /// Positional `insert` was called on an ordered-mode container.
    OrderedMode,
    /// The operation needs a comparator and none is installed.
    ComparatorUnset,
    /// An index was outside the live element window.
    OutOfBounds {
        /// The offending index.
        index: usize,
        /// The number of live elements at call time.
        len: usize,
    },
    /// A slice range was empty, inverted, or past the end.
    InvalidRange {
        /// Start of the requested half-open range.
        begin: usize,
        /// End of the requested half-open range.
        end: usize,
        /// The number of live elements at call time.
        len: usize,
    },
    /// The operation requires at least one element.
    Empty,
    /// No element matched the search.
    NotFound,
    /// A subscription was requested with an empty action set.
    EmptyActionSet,
    /// No subscriber exists for the given handle.
    UnknownSubscription(SubscriptionId),
    /// `set_flags`/`clear_flags` was passed a managed flag.
    ReservedFlags(Flags),
}

impl fmt::Display for VectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alloc(err) => write!(f, "backing buffer allocation failed: {err}"),
            Self::ZeroSizedElement => write!(f, "zero-sized element types are not supported"),
            Self::StaticMode => write!(f, "static-mode container rejects reallocation"),
            Self::OrderedMode => {
                write!(f, "ordered-mode container rejects positional insert (use add)")
            }
            Self::ComparatorUnset => write!(f, "no comparator installed"),
            Self::OutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for length {len}")
            }
            Self::InvalidRange { begin, end, len } => {
                write!(f, "invalid range {begin}..{end} for length {len}")
            }
            Self::Empty => write!(f, "container is empty"),
            Self::NotFound => write!(f, "no matching element"),
            Self::EmptyActionSet => write!(f, "subscription action set is empty"),
            Self::UnknownSubscription(id) => write!(f, "unknown subscription {id}"),
            Self::ReservedFlags(flags) => {
                write!(f, "flags {flags:?} are managed and cannot be set directly")
            }
        }
    }
}

impl Error for VectorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Alloc(err) => Some(err),
            _ => None,
        }
    }
}

impl From<AllocError> for VectorError {
    fn from(err: AllocError) -> Self {
        Self::Alloc(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_error_is_chained() {
        let inner = AllocError {
            layout: std::alloc::Layout::new::<u64>(),
        };
        let err = VectorError::from(inner);
        assert!(err.source().is_some());
        assert!(err.to_string().contains("allocation"));
    }

    #[test]
    fn out_of_bounds_reports_both_numbers() {
        let msg = VectorError::OutOfBounds { index: 7, len: 3 }.to_string();
        assert!(msg.contains('7'));
        assert!(msg.contains('3'));
    }
}
