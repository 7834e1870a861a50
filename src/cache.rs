use crate::Stats;
use crate::error::ConfigError;
use generations::{Generations, Lookup};
use parking_lot::Mutex;
use stats::Counters;
use std::borrow::Borrow;
use std::hash::{BuildHasher, Hash};
use std::time::Instant;

mod generations;
pub(crate) mod stats;

pub(crate) type RandomState = ahash::RandomState;

/// Number of keys a generation holds before it rotates, unless configured otherwise.
pub const DEFAULT_CAPACITY: usize = 1000;

/// Thread-safe membership cache that approximates recency with two rotating generations.
///
/// Inserts go into the active generation. Once it has received `capacity` inserts, the older
/// standby generation is discarded, the active one becomes the standby and a fresh generation
/// takes over. A key is cached while it is in either generation, and a key found only in the
/// standby generation is promoted back into the active one.
///
/// Eviction happens in batches of `capacity` keys, so this is not an exact LRU: at most
/// `2 * capacity` keys are retained, and at least the last `capacity` inserts are.
///
/// Every operation runs under a single lock. Wrap the cache in a [`std::sync::Arc`] to share it
/// between threads; all operations only require shared references.
#[derive(Debug)]
pub struct Cache<K, S = RandomState> {
    state: Mutex<Generations<K, S>>,
    counters: Counters,
    metrics_last_accessed: Mutex<Instant>,
}

impl<K> Cache<K, RandomState>
where
    K: Clone + Eq + Hash,
{
    /// Creates a new cache whose generations hold [`DEFAULT_CAPACITY`] keys each.
    pub fn new() -> Cache<K, RandomState> {
        Cache::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a new cache whose generations rotate after `capacity` inserts.
    ///
    /// A capacity of zero is accepted: every insert then rotates, so the cache only remembers
    /// the two most recently inserted keys. Use [`Cache::try_with_capacity`] to reject it.
    pub fn with_capacity(capacity: usize) -> Cache<K, RandomState> {
        Cache::with_capacity_and_hasher(capacity, Default::default())
    }

    /// Like [`Cache::with_capacity`], but fails on a zero capacity.
    pub fn try_with_capacity(capacity: usize) -> Result<Cache<K, RandomState>, ConfigError> {
        Cache::try_with_capacity_and_hasher(capacity, Default::default())
    }
}

impl<K> Default for Cache<K, RandomState>
where
    K: Clone + Eq + Hash,
{
    fn default() -> Self {
        Cache::new()
    }
}

impl<K, S> Cache<K, S>
where
    K: Clone + Eq + Hash,
    S: BuildHasher + Clone,
{
    /// Creates a new cache whose generations rotate after `capacity` inserts, using
    /// `hash_builder` to hash the keys.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Cache<K, S> {
        Self {
            state: Mutex::new(Generations::with_capacity_and_hasher(
                capacity,
                hash_builder,
            )),
            counters: Counters::default(),
            metrics_last_accessed: Mutex::new(Instant::now()),
        }
    }

    /// Like [`Cache::with_capacity_and_hasher`], but fails on a zero capacity.
    pub fn try_with_capacity_and_hasher(
        capacity: usize,
        hash_builder: S,
    ) -> Result<Cache<K, S>, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }

        Ok(Cache::with_capacity_and_hasher(capacity, hash_builder))
    }
}

impl<K, S> Cache<K, S>
where
    K: Clone + Eq + Hash,
    S: BuildHasher,
{
    /// Inserts a key into the active generation.
    ///
    /// If the active generation is full, the generations rotate first: the standby generation
    /// is dropped and the key starts a fresh active generation. Inserting a key that is already
    /// present still counts towards the capacity of the active generation.
    ///
    /// A panic in the key's [`Hash`] or [`Eq`] implementation propagates to the caller. A
    /// rotation performed before the panic is not undone.
    pub fn insert(&self, key: K) {
        let rotated = self.state.lock().insert(key);

        if rotated {
            self.counters.increment_rotation_count();
        }
    }

    /// Returns `true` if the key is in either generation.
    ///
    /// A key found only in the standby generation is re-inserted into the active one, which
    /// keeps it cached across the next rotation. The lookup and the re-insert take the lock
    /// separately, so a concurrent rotation may happen in between.
    pub fn find<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let resurrected = {
            let state = self.state.lock();

            match state.lookup(key) {
                Lookup::Active => {
                    self.counters.increment_hit_count();
                    return true;
                }
                Lookup::Standby(stored) => stored.clone(),
                Lookup::Absent => {
                    self.counters.increment_miss_count();
                    return false;
                }
            }
        };

        self.counters.increment_hit_count();
        self.counters.increment_resurrection_count();
        tracing::trace!("promoting key from standby generation");

        self.insert(resurrected);

        true
    }

    /// Returns `true` if the key is in either generation, without promoting it or touching the
    /// hit and miss counters.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        !matches!(self.state.lock().lookup(key), Lookup::Absent)
    }

    /// Returns the number of distinct keys across both generations.
    pub fn len(&self) -> usize {
        self.state.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a snapshot of the distinct keys across both generations, in no particular order.
    pub fn keys(&self) -> Vec<K> {
        self.state.lock().keys()
    }
}

impl<K, S> Cache<K, S> {
    /// Removes all keys from both generations. The capacity is kept.
    pub fn clear(&self) {
        self.state.lock().clear();
        tracing::debug!("cleared cache generations");
    }

    /// Changes the number of inserts after which the active generation rotates.
    ///
    /// Nothing is evicted right away. If the active generation already holds more keys than the
    /// new capacity, the next insert rotates.
    pub fn set_size(&self, capacity: usize) {
        let previous = self.state.lock().set_capacity(capacity);
        tracing::debug!(previous, capacity, "changed cache capacity");
    }

    /// Like [`Cache::set_size`], but fails on a zero capacity and leaves the cache untouched.
    pub fn try_set_size(&self, capacity: usize) -> Result<(), ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }

        self.set_size(capacity);
        Ok(())
    }

    pub fn capacity(&self) -> usize {
        self.state.lock().capacity()
    }

    /// Returns the number of keys held by the active generation.
    pub fn active_len(&self) -> usize {
        self.state.lock().active_len()
    }

    /// Returns the counters accumulated since the previous call and resets them.
    pub fn stats(&self) -> Stats {
        let mut stats = Stats::default();

        let millis_elapsed = {
            let mut guard = self.metrics_last_accessed.lock();
            let millis_elapsed = guard.elapsed().as_millis();
            *guard = Instant::now();
            millis_elapsed
        };

        stats.millis_elapsed = millis_elapsed;
        self.counters.drain_into(&mut stats);

        stats
    }
}
