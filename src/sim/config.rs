//! Simulation timing parameters.

use std::time::Duration;

/// Timing and quantum parameters for vehicle task controllers.
///
/// Defaults drive one 1 km tick per second with a 200 ms pause poll; tests
/// shrink the intervals to keep runs fast.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use fleetsim::sim::SimConfig;
///
/// let config = SimConfig::new()
///     .with_km_per_tick(2)
///     .with_tick_interval(Duration::from_millis(5));
/// assert_eq!(config.km_per_tick(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimConfig {
    km_per_tick: u64,
    tick_interval: Duration,
    pause_poll: Duration,
}

impl SimConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self {
            km_per_tick: 1,
            tick_interval: Duration::from_secs(1),
            pause_poll: Duration::from_millis(200),
        }
    }

    /// Sets the distance quantum advanced per tick.
    pub fn with_km_per_tick(mut self, km: u64) -> Self {
        self.km_per_tick = km;
        self
    }

    /// Sets the wait between ticks.
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Sets the polling interval while paused.
    pub fn with_pause_poll(mut self, interval: Duration) -> Self {
        self.pause_poll = interval;
        self
    }

    /// Distance quantum advanced per tick.
    pub fn km_per_tick(&self) -> u64 {
        self.km_per_tick
    }

    /// Wait between ticks.
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Polling interval while paused.
    pub fn pause_poll(&self) -> Duration {
        self.pause_poll
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}
