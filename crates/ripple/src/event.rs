//! Typed mutation events delivered to subscribers.

use crate::action::Action;

/// A pending structural mutation, delivered to subscribers before it is
/// applied.
///
/// Each variant corresponds to one [`Action`] and carries that operation's
/// operands. Payload references point at pre-mutation state: an
/// [`Event::Erase`] hands out the element that is about to disappear, an
/// [`Event::Insert`] the element that is about to be written, and so on.
///
/// The one exception to pre-mutation delivery is [`Event::MakeOrdered`],
/// which fires after the sort that establishes the ordered invariant.
#[derive(Debug)]
pub enum Event<'a, T> {
    /// The container is entering ordered mode (fires post-sort).
    MakeOrdered,
    /// The container is entering static mode.
    MakeStatic,
    /// The backing capacity is about to change.
    Resize {
        /// The capacity after the reallocation, in elements.
        new_capacity: usize,
    },
    /// Another container's elements are about to be copied onto the tail.
    Append {
        /// The elements that will be appended, in order.
        tail: &'a [T],
    },
    /// One element is about to be added (tail or ordered position).
    Add {
        /// The incoming element.
        elem: &'a T,
    },
    /// One element is about to be inserted, shifting the tail right.
    Insert {
        /// The insertion index.
        index: usize,
        /// The incoming element.
        elem: &'a T,
    },
    /// The container is being torn down.
    Destruct,
    /// One element is about to be erased, shifting the tail left.
    Erase {
        /// The index being erased.
        index: usize,
        /// The element that is about to be torn down.
        elem: &'a T,
    },
    /// All elements are about to be removed; capacity is retained.
    Clear,
    /// One element is about to be overwritten in place.
    Replace {
        /// The index being replaced.
        index: usize,
        /// The incoming element.
        elem: &'a T,
    },
    /// The elements are about to be sorted by the installed comparator.
    Sort,
    /// A full copy of the container is being produced.
    Copy,
    /// A filtered copy is being produced; the source is unchanged.
    Filter {
        /// The elements the predicate kept, in input order.
        kept: &'a [T],
    },
    /// A sub-range copy is being produced; the source is unchanged.
    Slice {
        /// Start of the half-open element range.
        begin: usize,
        /// End of the half-open element range.
        end: usize,
        /// The elements in the range.
        elems: &'a [T],
    },
    /// The live elements are being released to the caller.
    ReleaseData,
}

impl<T> Event<'_, T> {
    /// The action bit this event is delivered under.
    pub fn action(&self) -> Action {
        match self {
            Self::MakeOrdered => Action::MakeOrdered,
            Self::MakeStatic => Action::MakeStatic,
            Self::Resize { .. } => Action::Resize,
            Self::Append { .. } => Action::Append,
            Self::Add { .. } => Action::Add,
            Self::Insert { .. } => Action::Insert,
            Self::Destruct => Action::Destruct,
            Self::Erase { .. } => Action::Erase,
            Self::Clear => Action::Clear,
            Self::Replace { .. } => Action::Replace,
            Self::Sort => Action::Sort,
            Self::Copy => Action::Copy,
            Self::Filter { .. } => Action::Filter,
            Self::Slice { .. } => Action::Slice,
            Self::ReleaseData => Action::ReleaseData,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_variants_map_to_their_actions() {
        let elem = 5u32;
        let tail = [1u32, 2];
        assert_eq!(Event::Add { elem: &elem }.action(), Action::Add);
        assert_eq!(
            Event::Insert { index: 0, elem: &elem }.action(),
            Action::Insert
        );
        assert_eq!(Event::Append { tail: &tail }.action(), Action::Append);
        assert_eq!(
            Event::Erase { index: 1, elem: &elem }.action(),
            Action::Erase
        );
        assert_eq!(
            Event::Resize::<u32> { new_capacity: 20 }.action(),
            Action::Resize
        );
        assert_eq!(Event::<'_, u32>::Destruct.action(), Action::Destruct);
        assert_eq!(Event::<'_, u32>::ReleaseData.action(), Action::ReleaseData);
    }
}
