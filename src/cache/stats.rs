use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Stats {
    pub miss_count: u64,
    pub hit_count: u64,
    /// Number of times the active generation filled up and was swapped out.
    pub rotation_count: u64,
    /// Number of hits served from the standby generation and promoted back.
    pub resurrection_count: u64,
    pub millis_elapsed: u128,
}

#[derive(Debug, Default)]
pub(crate) struct Counters {
    hit_count: AtomicU64,
    miss_count: AtomicU64,
    rotation_count: AtomicU64,
    resurrection_count: AtomicU64,
}

impl Counters {
    pub(crate) fn increment_hit_count(&self) {
        self.hit_count.fetch_add(1, Ordering::AcqRel);
    }

    pub(crate) fn increment_miss_count(&self) {
        self.miss_count.fetch_add(1, Ordering::AcqRel);
    }

    pub(crate) fn increment_rotation_count(&self) {
        self.rotation_count.fetch_add(1, Ordering::AcqRel);
    }

    pub(crate) fn increment_resurrection_count(&self) {
        self.resurrection_count.fetch_add(1, Ordering::AcqRel);
    }

    /// Moves the current counts into `stats` and zeroes them.
    pub(crate) fn drain_into(&self, stats: &mut Stats) {
        stats.hit_count = self.hit_count.swap(0, Ordering::AcqRel);
        stats.miss_count = self.miss_count.swap(0, Ordering::AcqRel);
        stats.rotation_count = self.rotation_count.swap(0, Ordering::AcqRel);
        stats.resurrection_count = self.resurrection_count.swap(0, Ordering::AcqRel);
    }
}
