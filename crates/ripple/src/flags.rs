//! Container mode flags.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Mode flags of a [`Vector`](crate::Vector), as a `u8` bitset.
///
/// The four flags are independent and combinable. [`Flags::STATIC`] and
/// [`Flags::RECURSIVE_TEARDOWN`] can be set and cleared directly;
/// [`Flags::OBSERVED`] and [`Flags::ORDERED`] are managed by
/// `subscribe`/`make_ordered` and are rejected by the direct flag setters.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Flags(u8);

impl Flags {
    /// No flags.
    pub const EMPTY: Flags = Flags(0);

    /// The container rejects any operation that would reallocate.
    pub const STATIC: Flags = Flags(1 << 0);

    /// The container has an attached observer.
    pub const OBSERVED: Flags = Flags(1 << 1);

    /// The element teardown hook also runs during `clear`, not just
    /// targeted removals and final teardown.
    pub const RECURSIVE_TEARDOWN: Flags = Flags(1 << 2);

    /// The element sequence is kept sorted by the installed comparator.
    pub const ORDERED: Flags = Flags(1 << 3);

    /// The flags callers may pass to `set_flags`/`clear_flags`.
    pub const SETTABLE: Flags = Flags(Self::STATIC.0 | Self::RECURSIVE_TEARDOWN.0);

    /// Returns `true` if no flag is set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Check whether every flag in `other` is set in `self`.
    pub const fn contains(self, other: Flags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Check whether the two sets share any flag.
    pub const fn intersects(self, other: Flags) -> bool {
        self.0 & other.0 != 0
    }

    /// Return the union of two flag sets.
    pub const fn union(self, other: Flags) -> Flags {
        Flags(self.0 | other.0)
    }

    /// Return `self` without the flags in `other`.
    pub const fn difference(self, other: Flags) -> Flags {
        Flags(self.0 & !other.0)
    }

    /// Set every flag in `other`.
    pub fn set(&mut self, other: Flags) {
        self.0 |= other.0;
    }

    /// Clear every flag in `other`.
    pub fn clear(&mut self, other: Flags) {
        self.0 &= !other.0;
    }

    /// The raw bits. Stable across versions.
    pub const fn bits(self) -> u8 {
        self.0
    }
}

impl BitOr for Flags {
    type Output = Flags;

    fn bitor(self, rhs: Flags) -> Flags {
        self.union(rhs)
    }
}

impl BitOrAssign for Flags {
    fn bitor_assign(&mut self, rhs: Flags) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(Flags, &str); 4] = [
            (Flags::STATIC, "STATIC"),
            (Flags::OBSERVED, "OBSERVED"),
            (Flags::RECURSIVE_TEARDOWN, "RECURSIVE_TEARDOWN"),
            (Flags::ORDERED, "ORDERED"),
        ];
        let mut set = f.debug_set();
        for (flag, name) in NAMES {
            if self.contains(flag) {
                set.entry(&name);
            }
        }
        set.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_layout_is_stable() {
        assert_eq!(Flags::STATIC.bits(), 1 << 0);
        assert_eq!(Flags::OBSERVED.bits(), 1 << 1);
        assert_eq!(Flags::RECURSIVE_TEARDOWN.bits(), 1 << 2);
        assert_eq!(Flags::ORDERED.bits(), 1 << 3);
    }

    #[test]
    fn flags_combine_independently() {
        let mut flags = Flags::EMPTY;
        flags.set(Flags::STATIC | Flags::ORDERED);
        assert!(flags.contains(Flags::STATIC));
        assert!(flags.contains(Flags::ORDERED));
        assert!(!flags.contains(Flags::OBSERVED));
        flags.clear(Flags::STATIC);
        assert!(!flags.contains(Flags::STATIC));
        assert!(flags.contains(Flags::ORDERED));
    }

    #[test]
    fn settable_excludes_managed_flags() {
        assert!(Flags::SETTABLE.contains(Flags::STATIC));
        assert!(Flags::SETTABLE.contains(Flags::RECURSIVE_TEARDOWN));
        assert!(!Flags::SETTABLE.intersects(Flags::OBSERVED | Flags::ORDERED));
    }
}
