//! Fixed-capacity ring pool
//!
//! Inserting always claims the slot under the cursor and advances it, whether
//! or not that slot still holds a live member. There is no backpressure: once
//! more than `capacity` members are alive, the oldest one is silently replaced.
//! Bullets rely on this so that firing can never fail.

use serde::{Deserialize, Serialize};

/// Anything stored in a `RingPool` must report whether it is still alive
pub trait Pooled {
    fn is_live(&self) -> bool;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RingPool<T> {
    slots: Vec<T>,
    /// Slot the next insert will overwrite (always `< slots.len()`)
    next: usize,
    /// Total inserts since construction
    inserted: u64,
}

impl<T: Pooled + Default + Clone> RingPool<T> {
    /// Create a pool with `capacity` dead slots (at least one)
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![T::default(); capacity.max(1)],
            next: 0,
            inserted: 0,
        }
    }
}

impl<T: Pooled> RingPool<T> {
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Index the next insert will land in
    #[inline]
    pub fn next_index(&self) -> usize {
        self.next
    }

    #[inline]
    pub fn total_inserted(&self) -> u64 {
        self.inserted
    }

    /// Store `value` in the slot under the cursor, evicting whatever is there.
    /// Returns the slot index used.
    pub fn insert_overwriting(&mut self, value: T) -> usize {
        let index = self.next;
        if self.slots[index].is_live() {
            log::trace!("Ring pool full at slot {}, evicting live member", index);
        }
        self.slots[index] = value;
        self.next = (self.next + 1) % self.slots.len();
        self.inserted += 1;
        index
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index)
    }

    /// Live members with their slot index, in slot order
    pub fn iter_live(&self) -> impl Iterator<Item = (usize, &T)> {
        self.slots.iter().enumerate().filter(|(_, s)| s.is_live())
    }

    /// Mutable live members with their slot index, in slot order
    pub fn iter_live_mut(&mut self) -> impl Iterator<Item = (usize, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter(|(_, s)| s.is_live())
    }

    pub fn for_each_live<F: FnMut(usize, &T)>(&self, mut f: F) {
        for (i, slot) in self.iter_live() {
            f(i, slot);
        }
    }

    /// Liveness is re-checked per slot, so `f` may kill the member it is given
    pub fn for_each_live_mut<F: FnMut(usize, &mut T)>(&mut self, mut f: F) {
        for (i, slot) in self.iter_live_mut() {
            f(i, slot);
        }
    }

    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_live()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Slot {
        id: u32,
        live: bool,
    }

    impl Pooled for Slot {
        fn is_live(&self) -> bool {
            self.live
        }
    }

    fn live(id: u32) -> Slot {
        Slot { id, live: true }
    }

    #[test]
    fn test_new_pool_is_empty() {
        let pool: RingPool<Slot> = RingPool::with_capacity(8);
        assert_eq!(pool.capacity(), 8);
        assert_eq!(pool.live_count(), 0);
        assert_eq!(pool.iter_live().count(), 0);
    }

    #[test]
    fn test_zero_capacity_rounds_up() {
        let mut pool: RingPool<Slot> = RingPool::with_capacity(0);
        assert_eq!(pool.capacity(), 1);
        assert_eq!(pool.insert_overwriting(live(1)), 0);
        assert_eq!(pool.insert_overwriting(live(2)), 0);
        assert_eq!(pool.get(0).map(|s| s.id), Some(2));
    }

    #[test]
    fn test_wraparound_overwrites_oldest() {
        let capacity = 4;
        let mut pool = RingPool::with_capacity(capacity);
        for id in 0..capacity as u32 {
            pool.insert_overwriting(live(id));
        }
        assert_eq!(pool.live_count(), capacity);

        // One past capacity lands on the first slot, live or not
        let index = pool.insert_overwriting(live(99));
        assert_eq!(index, 0);
        assert_eq!(pool.get(0), Some(&live(99)));
        assert_eq!(pool.live_count(), capacity);
        assert_eq!(pool.next_index(), 1);
        assert_eq!(pool.total_inserted(), 5);
    }

    #[test]
    fn test_killing_members_in_place() {
        let mut pool = RingPool::with_capacity(4);
        pool.insert_overwriting(live(1));
        pool.insert_overwriting(live(2));
        pool.insert_overwriting(live(3));

        pool.for_each_live_mut(|_, s| {
            if s.id == 2 {
                s.live = false;
            }
        });

        let mut seen = Vec::new();
        pool.for_each_live(|i, s| seen.push((i, s.id)));
        assert_eq!(seen, vec![(0, 1), (2, 3)]);
    }

    #[test]
    fn test_get_out_of_range_is_none() {
        let pool: RingPool<Slot> = RingPool::with_capacity(2);
        assert!(pool.get(2).is_none());
    }

    proptest! {
        #[test]
        fn prop_insert_index_in_range(capacity in 1usize..64, inserts in 0usize..500) {
            let mut pool = RingPool::with_capacity(capacity);
            for n in 0..inserts {
                let index = pool.insert_overwriting(live(n as u32));
                prop_assert!(index < capacity);
                prop_assert_eq!(index, n % capacity);
            }
            prop_assert_eq!(pool.live_count(), inserts.min(capacity));
        }
    }
}
