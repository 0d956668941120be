//! Bulk controller management for a simulation run.

use std::sync::Arc;

use crate::models::Vehicle;

use super::{HighwayCounter, SimConfig, VehicleController};

/// A simulation run: one controller per vehicle plus the shared counter.
///
/// Bulk operations apply independently per controller with no atomicity
/// across controllers; a caller may observe a mix of states while one is in
/// flight.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use fleetsim::models::Vehicle;
/// use fleetsim::sim::{HighwayCounter, SimConfig, Simulation};
///
/// let counter = Arc::new(HighwayCounter::new());
/// let ship = Vehicle::cargo_ship("S001", "Cutty", 40.0, 0.0, true, 0.0, false).unwrap();
/// let mut sim = Simulation::new(vec![ship], Arc::clone(&counter), true, SimConfig::default());
/// sim.start_all();
/// sim.stop_all();
/// assert_eq!(sim.snapshot_vehicles().len(), 1);
/// ```
pub struct Simulation {
    controllers: Vec<VehicleController>,
    counter: Arc<HighwayCounter>,
}

impl Simulation {
    /// Wraps each vehicle in a controller sharing `counter`.
    pub fn new(
        vehicles: Vec<Vehicle>,
        counter: Arc<HighwayCounter>,
        use_safe_counter: bool,
        config: SimConfig,
    ) -> Self {
        let controllers = vehicles
            .into_iter()
            .map(|v| VehicleController::new(v, Arc::clone(&counter), use_safe_counter, config))
            .collect();
        Self { controllers, counter }
    }

    /// Starts every controller.
    pub fn start_all(&mut self) {
        for c in &mut self.controllers {
            c.start();
        }
    }

    /// Pauses every running controller.
    pub fn pause_all(&self) {
        for c in &self.controllers {
            c.pause();
        }
    }

    /// Resumes every paused controller.
    pub fn resume_all(&self) {
        for c in &self.controllers {
            c.resume();
        }
    }

    /// Stops and joins every controller.
    pub fn stop_all(&mut self) {
        for c in &mut self.controllers {
            c.stop();
        }
    }

    /// Switches every controller's counter path for subsequent ticks.
    pub fn set_safe_mode(&self, use_safe: bool) {
        for c in &self.controllers {
            c.set_use_safe_counter(use_safe);
        }
    }

    /// The controller for the vehicle with the given id.
    pub fn controller(&self, id: &str) -> Option<&VehicleController> {
        self.controllers.iter().find(|c| c.id() == id)
    }

    /// All controllers, in construction order.
    pub fn controllers(&self) -> &[VehicleController] {
        &self.controllers
    }

    /// The shared counter for this run.
    pub fn counter(&self) -> &Arc<HighwayCounter> {
        &self.counter
    }

    /// Clones the current state of every controlled vehicle.
    pub fn snapshot_vehicles(&self) -> Vec<Vehicle> {
        self.controllers
            .iter()
            .map(|c| c.vehicle_handle().lock().expect("vehicle lock poisoned").clone())
            .collect()
    }
}
