//! Fixed-growth record store.
//!
//! A deliberately narrow collection: append a record, erase a record by
//! index, enumerate records. The [`Observer`](crate::Observer) keeps its
//! subscriber entries here. Storage starts at a fixed capacity and doubles
//! when full; it never shrinks.

/// Append/erase-only store of fixed-size records.
///
/// Records keep their relative order; erasing shifts the remainder left by
/// one slot. Growth is eager at construction ([`RecordStore::START_CAPACITY`]
/// slots) and doubles whenever the store fills.
#[derive(Debug)]
pub struct RecordStore<R> {
    records: Vec<R>,
    cap: usize,
}

impl<R> RecordStore<R> {
    /// Capacity allocated at construction.
    pub const START_CAPACITY: usize = 8;

    /// Capacity multiplier applied when the store fills.
    pub const GROWTH_FACTOR: usize = 2;

    /// Create a store with [`Self::START_CAPACITY`] slots pre-allocated.
    pub fn new() -> Self {
        Self {
            records: Vec::with_capacity(Self::START_CAPACITY),
            cap: Self::START_CAPACITY,
        }
    }

    /// Number of records in the store.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Current capacity under the fixed-growth policy.
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Append a record, doubling capacity first if the store is full.
    ///
    /// Returns the new record's index.
    pub fn push(&mut self, record: R) -> usize {
        if self.records.len() == self.cap {
            let grown = self.cap * Self::GROWTH_FACTOR;
            self.records.reserve_exact(grown - self.records.len());
            self.cap = grown;
        }
        self.records.push(record);
        self.records.len() - 1
    }

    /// Remove and return the record at `index`, shifting the remainder
    /// left. Returns `None` if `index` is out of range.
    pub fn erase_at(&mut self, index: usize) -> Option<R> {
        if index >= self.records.len() {
            return None;
        }
        Some(self.records.remove(index))
    }

    /// Shared access to the record at `index`.
    pub fn get(&self, index: usize) -> Option<&R> {
        self.records.get(index)
    }

    /// Mutable access to the record at `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut R> {
        self.records.get_mut(index)
    }

    /// Iterate over the records in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.records.iter()
    }

    /// Iterate mutably over the records in insertion order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, R> {
        self.records.iter_mut()
    }
}

impl<R> Default for RecordStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_fixed_capacity() {
        let store: RecordStore<u32> = RecordStore::new();
        assert_eq!(store.capacity(), RecordStore::<u32>::START_CAPACITY);
        assert!(store.is_empty());
    }

    #[test]
    fn capacity_doubles_when_full() {
        let mut store = RecordStore::new();
        for i in 0..8 {
            store.push(i);
        }
        assert_eq!(store.capacity(), 8);
        store.push(8);
        assert_eq!(store.capacity(), 16);
        for i in 9..17 {
            store.push(i);
        }
        assert_eq!(store.capacity(), 32);
        assert_eq!(store.len(), 17);
    }

    #[test]
    fn erase_preserves_record_order() {
        let mut store = RecordStore::new();
        for i in 0..5 {
            store.push(i * 10);
        }
        assert_eq!(store.erase_at(1), Some(10));
        let remaining: Vec<_> = store.iter().copied().collect();
        assert_eq!(remaining, [0, 20, 30, 40]);
    }

    #[test]
    fn erase_out_of_range_is_none() {
        let mut store: RecordStore<u8> = RecordStore::new();
        store.push(1);
        assert_eq!(store.erase_at(1), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn push_returns_the_record_index() {
        let mut store = RecordStore::new();
        assert_eq!(store.push("a"), 0);
        assert_eq!(store.push("b"), 1);
        store.erase_at(0);
        assert_eq!(store.push("c"), 1);
    }
}
