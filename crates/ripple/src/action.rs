//! Mutation actions and the [`ActionSet`] bitmask.
//!
//! Every structural mutation a [`Vector`](crate::Vector) can perform has a
//! distinct [`Action`] bit. Subscribers register an [`ActionSet`] and are
//! only invoked for events whose action is in their set. The bit layout is
//! part of the public contract and never changes.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// A structural mutation a subscriber can watch for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// The container entered ordered mode.
    MakeOrdered,
    /// The container entered static mode.
    MakeStatic,
    /// The backing capacity is about to change.
    Resize,
    /// Another container's elements are about to be copied onto the tail.
    Append,
    /// One element is about to be added (tail or ordered position).
    Add,
    /// One element is about to be inserted at a position.
    Insert,
    /// The container is being torn down.
    Destruct,
    /// One element is about to be erased.
    Erase,
    /// All elements are about to be removed.
    Clear,
    /// One element is about to be overwritten.
    Replace,
    /// The elements are about to be sorted.
    Sort,
    /// A full copy is being produced.
    Copy,
    /// A filtered copy is being produced.
    Filter,
    /// A sub-range copy is being produced.
    Slice,
    /// The backing elements are being released to the caller.
    ReleaseData,
}

/// All actions, in bit order. Bit `n` of an [`ActionSet`] is `ACTIONS[n]`.
pub const ACTIONS: [Action; 15] = [
    Action::MakeOrdered,
    Action::MakeStatic,
    Action::Resize,
    Action::Append,
    Action::Add,
    Action::Insert,
    Action::Destruct,
    Action::Erase,
    Action::Clear,
    Action::Replace,
    Action::Sort,
    Action::Copy,
    Action::Filter,
    Action::Slice,
    Action::ReleaseData,
];

impl Action {
    /// The bit this action occupies in an [`ActionSet`].
    pub const fn bit(self) -> u16 {
        1 << self as u16
    }

    /// A set containing only this action.
    pub const fn mask(self) -> ActionSet {
        ActionSet(self.bit())
    }
}

/// A set of [`Action`]s implemented as a `u16` bitset.
///
/// The bit positions are stable: `MakeOrdered` is bit 0 through
/// `ReleaseData` at bit 14, in declaration order.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionSet(u16);

impl ActionSet {
    /// The empty set.
    pub const EMPTY: ActionSet = ActionSet(0);

    /// Every action.
    pub const ALL: ActionSet = ActionSet((1 << 15) - 1);

    /// The addition group: `Append | Add | Insert`.
    pub const ADDITION: ActionSet = ActionSet(
        Action::Append.bit() | Action::Add.bit() | Action::Insert.bit(),
    );

    /// The removal group: `Destruct | Erase | Clear | Replace`.
    pub const REMOVING: ActionSet = ActionSet(
        Action::Destruct.bit()
            | Action::Erase.bit()
            | Action::Clear.bit()
            | Action::Replace.bit(),
    );

    /// Create an empty set.
    pub const fn empty() -> Self {
        Self::EMPTY
    }

    /// Returns `true` if the set contains no actions.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of actions in the set.
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Add an action to the set.
    pub fn insert(&mut self, action: Action) {
        self.0 |= action.bit();
    }

    /// Remove an action from the set.
    pub fn remove(&mut self, action: Action) {
        self.0 &= !action.bit();
    }

    /// Check whether the set contains `action`.
    pub const fn contains(self, action: Action) -> bool {
        self.0 & action.bit() != 0
    }

    /// Check whether the two sets share any action.
    pub const fn intersects(self, other: ActionSet) -> bool {
        self.0 & other.0 != 0
    }

    /// Return the union of two sets (`self | other`).
    pub const fn union(self, other: ActionSet) -> ActionSet {
        ActionSet(self.0 | other.0)
    }

    /// Return the intersection of two sets (`self & other`).
    pub const fn intersection(self, other: ActionSet) -> ActionSet {
        ActionSet(self.0 & other.0)
    }

    /// Return `self` without the actions in `other`.
    pub const fn difference(self, other: ActionSet) -> ActionSet {
        ActionSet(self.0 & !other.0)
    }

    /// The raw bits. Stable across versions.
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Iterate over the actions in the set, in bit order.
    pub fn iter(self) -> impl Iterator<Item = Action> {
        ACTIONS
            .into_iter()
            .filter(move |action| self.contains(*action))
    }
}

impl From<Action> for ActionSet {
    fn from(action: Action) -> Self {
        action.mask()
    }
}

impl BitOr for ActionSet {
    type Output = ActionSet;

    fn bitor(self, rhs: ActionSet) -> ActionSet {
        self.union(rhs)
    }
}

impl BitOr<Action> for ActionSet {
    type Output = ActionSet;

    fn bitor(self, rhs: Action) -> ActionSet {
        self.union(rhs.mask())
    }
}

impl BitOr for Action {
    type Output = ActionSet;

    fn bitor(self, rhs: Action) -> ActionSet {
        self.mask().union(rhs.mask())
    }
}

impl BitOr<ActionSet> for Action {
    type Output = ActionSet;

    fn bitor(self, rhs: ActionSet) -> ActionSet {
        self.mask().union(rhs)
    }
}

impl BitOrAssign for ActionSet {
    fn bitor_assign(&mut self, rhs: ActionSet) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for ActionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn bit_layout_is_stable() {
        // Part of the public contract; these values never change.
        assert_eq!(Action::MakeOrdered.bit(), 1 << 0);
        assert_eq!(Action::MakeStatic.bit(), 1 << 1);
        assert_eq!(Action::Resize.bit(), 1 << 2);
        assert_eq!(Action::Append.bit(), 1 << 3);
        assert_eq!(Action::Add.bit(), 1 << 4);
        assert_eq!(Action::Insert.bit(), 1 << 5);
        assert_eq!(Action::Destruct.bit(), 1 << 6);
        assert_eq!(Action::Erase.bit(), 1 << 7);
        assert_eq!(Action::Clear.bit(), 1 << 8);
        assert_eq!(Action::Replace.bit(), 1 << 9);
        assert_eq!(Action::Sort.bit(), 1 << 10);
        assert_eq!(Action::Copy.bit(), 1 << 11);
        assert_eq!(Action::Filter.bit(), 1 << 12);
        assert_eq!(Action::Slice.bit(), 1 << 13);
        assert_eq!(Action::ReleaseData.bit(), 1 << 14);
    }

    #[test]
    fn groups_hold_their_members() {
        assert_eq!(
            ActionSet::ADDITION,
            Action::Append | Action::Add | Action::Insert
        );
        assert_eq!(
            ActionSet::REMOVING,
            Action::Destruct | Action::Erase | Action::Clear | Action::Replace
        );
        assert!(!ActionSet::ADDITION.intersects(ActionSet::REMOVING));
    }

    #[test]
    fn all_contains_every_action() {
        for action in ACTIONS {
            assert!(ActionSet::ALL.contains(action));
        }
        assert_eq!(ActionSet::ALL.len(), ACTIONS.len());
    }

    fn arb_action_set() -> impl Strategy<Value = ActionSet> {
        (0u16..(1 << 15)).prop_map(ActionSet)
    }

    proptest! {
        #[test]
        fn union_commutative(a in arb_action_set(), b in arb_action_set()) {
            prop_assert_eq!(a.union(b), b.union(a));
        }

        #[test]
        fn union_associative(
            a in arb_action_set(),
            b in arb_action_set(),
            c in arb_action_set(),
        ) {
            prop_assert_eq!(a.union(b).union(c), a.union(b.union(c)));
        }

        #[test]
        fn union_idempotent(a in arb_action_set()) {
            prop_assert_eq!(a.union(a), a);
        }

        #[test]
        fn intersection_with_empty_is_empty(a in arb_action_set()) {
            prop_assert_eq!(a.intersection(ActionSet::EMPTY), ActionSet::EMPTY);
            prop_assert!(!a.intersects(ActionSet::EMPTY));
        }

        #[test]
        fn difference_removes_members(a in arb_action_set(), b in arb_action_set()) {
            let diff = a.difference(b);
            for action in diff.iter() {
                prop_assert!(a.contains(action));
                prop_assert!(!b.contains(action));
            }
        }

        #[test]
        fn insert_then_contains(a in arb_action_set(), idx in 0usize..15) {
            let mut set = a;
            set.insert(ACTIONS[idx]);
            prop_assert!(set.contains(ACTIONS[idx]));
            set.remove(ACTIONS[idx]);
            prop_assert!(!set.contains(ACTIONS[idx]));
        }

        #[test]
        fn len_matches_iter_count(a in arb_action_set()) {
            prop_assert_eq!(a.len(), a.iter().count());
        }
    }
}
