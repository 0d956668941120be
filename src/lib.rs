//! # fleetsim
//!
//! Heterogeneous vehicle fleet modeling and simulation: a capability-based
//! vehicle model, a fleet registry with aggregate operations and a
//! delimited-record persistence format, and a thread-per-vehicle simulation
//! that contrasts an unsynchronized shared counter with a lock-guarded one.
//!
//! ## Modules
//!
//! - [`models`] — Vehicle domain types (Vehicle, variant kinds, capability records)
//! - [`fleet`] — Fleet registry, broadcast operations, reporting, persistence
//! - [`sim`] — Shared highway counters and per-vehicle task controllers
//! - [`error`] — Crate-wide error type

pub mod error;
pub mod fleet;
pub mod models;
pub mod sim;

pub use error::FleetError;
