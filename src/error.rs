//! Crate-wide error type.

use thiserror::Error;

/// Errors produced by vehicle, fleet, and simulation operations.
///
/// Capability and movement operations fail fast and leave state unchanged.
/// Fleet broadcast operations and persistence loading catch these per item
/// and continue with the rest of the batch.
#[derive(Debug, Error)]
pub enum FleetError {
    /// Negative amount or distance, insufficient removable quantity, or an
    /// action the variant does not support (e.g. refueling a sail-equipped
    /// ship).
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// The fuel level would go negative.
    #[error("insufficient fuel: need {needed:.2}, have {available:.2}")]
    InsufficientFuel {
        /// Fuel required to complete the operation.
        needed: f64,
        /// Fuel currently in the tank.
        available: f64,
    },

    /// Capacity exceeded on board or load.
    #[error("overload: total {attempted:.2} exceeds capacity {capacity:.2}")]
    Overload {
        /// Total that the operation would have produced.
        attempted: f64,
        /// Fixed capacity of the carrier.
        capacity: f64,
    },

    /// A vehicle with this id is already registered.
    #[error("duplicate vehicle id: {0}")]
    DuplicateIdentity(String),

    /// No vehicle with this id is registered.
    #[error("no vehicle with id: {0}")]
    NotFound(String),

    /// Malformed persisted record.
    #[error("parse error: {0}")]
    ParseError(String),

    /// Underlying file I/O failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
