use crate::cache::RandomState;
use std::borrow::Borrow;
use std::collections::HashSet;
use std::hash::{BuildHasher, Hash};

/// Where a key was found by [`Generations::lookup`].
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Lookup<'a, K> {
    Active,
    Standby(&'a K),
    Absent,
}

/// Two hash sets used in rotation. One is active and receives inserts, the other holds the
/// previous batch until the active one fills up.
#[derive(Debug)]
pub(crate) struct Generations<K, S = RandomState> {
    sets: [HashSet<K, S>; 2],
    active: usize,
    capacity: usize,
    count: usize,
}

impl<K, S> Generations<K, S>
where
    S: BuildHasher + Clone,
{
    pub(crate) fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            sets: [
                HashSet::with_hasher(hash_builder.clone()),
                HashSet::with_hasher(hash_builder),
            ],
            active: 0,
            capacity,
            count: 0,
        }
    }
}

impl<K, S> Generations<K, S> {
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    /// Replaces the rotation threshold and returns the old one. Nothing is evicted here, the
    /// next insert compares against the new value.
    pub(crate) fn set_capacity(&mut self, capacity: usize) -> usize {
        std::mem::replace(&mut self.capacity, capacity)
    }

    pub(crate) fn active_len(&self) -> usize {
        self.sets[self.active].len()
    }

    pub(crate) fn clear(&mut self) {
        self.sets[0].clear();
        self.sets[1].clear();
        self.count = 0;
    }

    fn standby(&self) -> usize {
        self.active ^ 1
    }
}

impl<K, S> Generations<K, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Adds `key` to the active generation, rotating first if it is full. Returns whether a
    /// rotation happened.
    ///
    /// If hashing `key` panics after a rotation, the rotation stays applied.
    pub(crate) fn insert(&mut self, key: K) -> bool {
        let rotated = self.count >= self.capacity;

        if rotated {
            self.rotate();
        }

        // duplicates are absorbed by the set but still counted
        self.sets[self.active].insert(key);
        self.count += 1;

        rotated
    }

    fn rotate(&mut self) {
        let previous_count = self.count;

        self.active = self.standby();
        self.count = 0;

        // the new active set still holds the batch from two rotations ago
        self.sets[self.active].clear();

        tracing::trace!(
            active = self.active,
            previous_count,
            capacity = self.capacity,
            "rotated cache generations"
        );
    }

    pub(crate) fn lookup<Q>(&self, key: &Q) -> Lookup<'_, K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        if self.sets[self.active].contains(key) {
            return Lookup::Active;
        }

        match self.sets[self.standby()].get(key) {
            Some(stored) => Lookup::Standby(stored),
            None => Lookup::Absent,
        }
    }

    /// Number of distinct keys across both generations.
    pub(crate) fn len(&self) -> usize {
        self.standby_only().count() + self.active_len()
    }

    pub(crate) fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.sets[self.active]
            .iter()
            .chain(self.standby_only())
            .cloned()
            .collect()
    }

    fn standby_only(&self) -> impl Iterator<Item = &K> {
        let active = &self.sets[self.active];
        self.sets[self.standby()]
            .iter()
            .filter(move |key| !active.contains(*key))
    }
}
