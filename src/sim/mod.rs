//! Concurrent simulation layer: shared highway counters and per-vehicle
//! task controllers.
//!
//! One worker thread per vehicle; no two workers share vehicle state, so
//! the shared counter is the only contended resource. Its two update paths
//! exist to contrast lost updates against a mutex-serialized total.

mod config;
mod controller;
mod counter;
mod simulation;

pub use config::SimConfig;
pub use controller::{ControllerState, VehicleController};
pub use counter::HighwayCounter;
pub use simulation::Simulation;
