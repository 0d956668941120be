//! Vehicle domain model: variant kinds, capability records, and the vehicle
//! entity itself.
//!
//! A vehicle is a single data entity carrying a [`VehicleKind`] tag for its
//! concrete variant plus the capability records that variant composes
//! ([`FuelTank`], [`PassengerCabin`], [`CargoHold`]). Behavior dispatches on
//! the tag; capacities are fixed at construction and never exceeded.

mod capability;
mod kind;
mod vehicle;

pub use capability::{CargoHold, FuelTank, PassengerCabin};
pub use kind::{VehicleKind, VehicleType};
pub use vehicle::{
    Vehicle, AIRPLANE_CARGO_CAPACITY, AIRPLANE_PASSENGER_CAPACITY, BUS_CARGO_CAPACITY,
    BUS_PASSENGER_CAPACITY, CARGO_SHIP_CARGO_CAPACITY, CAR_PASSENGER_CAPACITY,
    MAINTENANCE_MILEAGE_THRESHOLD, TRUCK_CARGO_CAPACITY,
};
