//! Per-vehicle task controller: an independent worker thread with a
//! pause/resume/stop lifecycle.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};

use tracing::{debug, info};

use crate::error::FleetError;
use crate::models::Vehicle;

use super::{HighwayCounter, SimConfig};

/// Lifecycle state of a [`VehicleController`].
///
/// `Stopped` is terminal and reachable from every other state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// Constructed; the worker has not been launched.
    Created,
    /// Worker ticking.
    Running,
    /// Worker idle, polling for resume or stop.
    Paused,
    /// Worker terminated.
    Stopped,
}

struct ControlBlock {
    state: Mutex<ControllerState>,
    signal: Condvar,
    use_safe_counter: AtomicBool,
}

impl ControlBlock {
    fn state(&self) -> ControllerState {
        *self.state.lock().expect("controller state lock poisoned")
    }

    /// Moves `from` to `to` if the controller is currently in `from`,
    /// waking the worker. Returns whether the transition happened.
    fn transition(&self, from: ControllerState, to: ControllerState) -> bool {
        let mut state = self.state.lock().expect("controller state lock poisoned");
        if *state == from {
            *state = to;
            self.signal.notify_all();
            true
        } else {
            false
        }
    }
}

/// Drives one vehicle on an independent worker thread.
///
/// Each controller owns its vehicle behind a mutex; the shared counter is
/// the only state contended with other controllers. While running, each
/// tick advances the odometer by the configured quantum, draws fuel
/// (running out self-transitions to [`ControllerState::Paused`], not
/// stopped), and touches the shared counter on the unsafe or safe path per
/// the controller's mode. Both the pause poll and the inter-tick wait are
/// condvar waits, so a stop wakes the worker immediately. Dropping the
/// controller stops it.
pub struct VehicleController {
    id: String,
    vehicle: Arc<Mutex<Vehicle>>,
    counter: Arc<HighwayCounter>,
    control: Arc<ControlBlock>,
    config: SimConfig,
    worker: Option<JoinHandle<()>>,
}

impl VehicleController {
    /// Wraps a vehicle for simulation; the worker launches on
    /// [`VehicleController::start`].
    pub fn new(
        vehicle: Vehicle,
        counter: Arc<HighwayCounter>,
        use_safe_counter: bool,
        config: SimConfig,
    ) -> Self {
        Self {
            id: vehicle.id().to_string(),
            vehicle: Arc::new(Mutex::new(vehicle)),
            counter,
            control: Arc::new(ControlBlock {
                state: Mutex::new(ControllerState::Created),
                signal: Condvar::new(),
                use_safe_counter: AtomicBool::new(use_safe_counter),
            }),
            config,
            worker: None,
        }
    }

    /// Id of the controlled vehicle.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Launches the worker thread. Only the first call has any effect.
    pub fn start(&mut self) {
        if !self
            .control
            .transition(ControllerState::Created, ControllerState::Running)
        {
            return;
        }
        debug!(id = %self.id, "controller started");
        let vehicle = Arc::clone(&self.vehicle);
        let counter = Arc::clone(&self.counter);
        let control = Arc::clone(&self.control);
        let config = self.config;
        self.worker = Some(thread::spawn(move || {
            run_worker(&vehicle, &counter, &control, &config);
        }));
    }

    /// Suspends ticking; the worker keeps polling for resume or stop.
    pub fn pause(&self) {
        if self
            .control
            .transition(ControllerState::Running, ControllerState::Paused)
        {
            debug!(id = %self.id, "controller paused");
        }
    }

    /// Resumes ticking after a pause, manual or out-of-fuel.
    pub fn resume(&self) {
        if self
            .control
            .transition(ControllerState::Paused, ControllerState::Running)
        {
            debug!(id = %self.id, "controller resumed");
        }
    }

    /// Stops and joins the worker. Idempotent; reachable from any state.
    pub fn stop(&mut self) {
        {
            let mut state = self
                .control
                .state
                .lock()
                .expect("controller state lock poisoned");
            *state = ControllerState::Stopped;
            self.control.signal.notify_all();
        }
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
            debug!(id = %self.id, "controller stopped");
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ControllerState {
        self.control.state()
    }

    /// Whether the controller is paused (manually or out of fuel).
    pub fn is_paused(&self) -> bool {
        self.state() == ControllerState::Paused
    }

    /// Selects the counter path used by subsequent ticks.
    pub fn set_use_safe_counter(&self, use_safe: bool) {
        self.control.use_safe_counter.store(use_safe, Ordering::Relaxed);
    }

    /// Handle to the controlled vehicle.
    pub fn vehicle_handle(&self) -> Arc<Mutex<Vehicle>> {
        Arc::clone(&self.vehicle)
    }

    /// Formatted status line of the controlled vehicle.
    pub fn status_line(&self) -> String {
        self.vehicle
            .lock()
            .expect("vehicle lock poisoned")
            .to_string()
    }
}

impl Drop for VehicleController {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_worker(
    vehicle: &Mutex<Vehicle>,
    counter: &HighwayCounter,
    control: &ControlBlock,
    config: &SimConfig,
) {
    loop {
        let state = control.state.lock().expect("controller state lock poisoned");
        match *state {
            ControllerState::Stopped => break,
            ControllerState::Created | ControllerState::Paused => {
                let _ = control
                    .signal
                    .wait_timeout(state, config.pause_poll())
                    .expect("controller state lock poisoned");
            }
            ControllerState::Running => {
                drop(state);
                tick(vehicle, counter, control, config);
                let state = control.state.lock().expect("controller state lock poisoned");
                if *state == ControllerState::Stopped {
                    break;
                }
                let _ = control
                    .signal
                    .wait_timeout(state, config.tick_interval())
                    .expect("controller state lock poisoned");
            }
        }
    }
}

fn tick(vehicle: &Mutex<Vehicle>, counter: &HighwayCounter, control: &ControlBlock, config: &SimConfig) {
    let km = config.km_per_tick();
    {
        let mut v = vehicle.lock().expect("vehicle lock poisoned");
        v.advance_mileage(km as f64);
        if let Err(FleetError::InsufficientFuel { .. }) = v.consume_fuel(km as f64) {
            // out of fuel pauses the vehicle; it stays resumable after a refuel
            if control.transition(ControllerState::Running, ControllerState::Paused) {
                info!(id = v.id(), "out of fuel, pausing");
            }
        }
    }
    if control.use_safe_counter.load(Ordering::Relaxed) {
        counter.increment_safe(km);
    } else {
        counter.increment_unsafe(km);
    }
}
