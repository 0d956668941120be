//! Shared highway counters: a racy path and a lock-guarded path.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use rand::Rng;

/// Shared distance accumulators contrasting an unsynchronized
/// read-modify-write against a mutex-serialized one.
///
/// Construct one per simulation run and share it via `Arc`; tests get an
/// independent counter each.
///
/// The unsafe path splits its read-modify-write across a short jittered
/// delay, so concurrent callers overwrite each other and the total
/// under-counts. The cell itself is atomic, so the lost updates happen
/// without undefined behavior. The safe path serializes under a lock and
/// always equals the exact sum of applied deltas.
///
/// # Examples
///
/// ```
/// use fleetsim::sim::HighwayCounter;
///
/// let counter = HighwayCounter::new();
/// counter.increment_safe(3);
/// counter.increment_safe(2);
/// assert_eq!(counter.safe_total(), 5);
/// counter.reset_all();
/// assert_eq!(counter.safe_total(), 0);
/// ```
#[derive(Debug)]
pub struct HighwayCounter {
    unsafe_total: AtomicU64,
    safe_total: Mutex<u64>,
}

impl HighwayCounter {
    /// Creates a counter with both accumulators at zero.
    pub fn new() -> Self {
        Self {
            unsafe_total: AtomicU64::new(0),
            safe_total: Mutex::new(0),
        }
    }

    /// Racy increment: read the total, wait, write the sum back.
    ///
    /// Concurrent callers may overwrite each other's update; the jittered
    /// delay widens that window. Never use where the total matters.
    pub fn increment_unsafe(&self, km: u64) {
        let read = self.unsafe_total.load(Ordering::Relaxed);
        let jitter = rand::rng().random_range(50..250);
        thread::sleep(Duration::from_micros(jitter));
        self.unsafe_total.store(read + km, Ordering::Relaxed);
    }

    /// Serialized increment; the total stays exact.
    pub fn increment_safe(&self, km: u64) {
        *self.safe_total.lock().expect("safe counter lock poisoned") += km;
    }

    /// Current value of the racy accumulator.
    pub fn unsafe_total(&self) -> u64 {
        self.unsafe_total.load(Ordering::Relaxed)
    }

    /// Current value of the lock-guarded accumulator.
    pub fn safe_total(&self) -> u64 {
        *self.safe_total.lock().expect("safe counter lock poisoned")
    }

    /// Zeroes both accumulators.
    ///
    /// Intended between runs with no controllers active; a reset concurrent
    /// with in-flight increments lands in no defined order relative to
    /// them.
    pub fn reset_all(&self) {
        self.unsafe_total.store(0, Ordering::Relaxed);
        *self.safe_total.lock().expect("safe counter lock poisoned") = 0;
    }
}

impl Default for HighwayCounter {
    fn default() -> Self {
        Self::new()
    }
}
