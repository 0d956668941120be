//! Vehicle variant tags and class-of-vehicle constants.

use std::fmt;
use std::str::FromStr;

use crate::error::FleetError;

/// A concrete vehicle variant together with its variant-specific data.
#[derive(Debug, Clone, PartialEq)]
pub enum VehicleKind {
    /// Road car.
    Car {
        /// Wheel count.
        wheels: u32,
    },
    /// Passenger bus with a small cargo bay.
    Bus {
        /// Wheel count.
        wheels: u32,
    },
    /// Freight truck.
    Truck {
        /// Wheel count.
        wheels: u32,
    },
    /// Passenger and cargo airplane.
    Airplane {
        /// Cruising ceiling in meters.
        max_altitude: f64,
    },
    /// Cargo ship, optionally sail-equipped.
    CargoShip {
        /// Sail-equipped ships carry no fuel.
        has_sail: bool,
    },
}

impl VehicleKind {
    /// The fieldless tag identifying this variant.
    pub fn vehicle_type(&self) -> VehicleType {
        match self {
            VehicleKind::Car { .. } => VehicleType::Car,
            VehicleKind::Bus { .. } => VehicleType::Bus,
            VehicleKind::Truck { .. } => VehicleType::Truck,
            VehicleKind::Airplane { .. } => VehicleType::Airplane,
            VehicleKind::CargoShip { .. } => VehicleType::CargoShip,
        }
    }

    /// Journey-time correction factor for this class of vehicle.
    ///
    /// Road traffic adds 10%, air routing saves 5%, water currents add 15%.
    pub fn journey_factor(&self) -> f64 {
        match self {
            VehicleKind::Car { .. } | VehicleKind::Bus { .. } | VehicleKind::Truck { .. } => 1.1,
            VehicleKind::Airplane { .. } => 0.95,
            VehicleKind::CargoShip { .. } => 1.15,
        }
    }
}

/// Identifies a vehicle variant without its data.
///
/// Doubles as the leading type tag in persisted records; `Display` and
/// `FromStr` round-trip the tag spelling.
///
/// # Examples
///
/// ```
/// use fleetsim::models::VehicleType;
///
/// let t: VehicleType = "CargoShip".parse().unwrap();
/// assert_eq!(t, VehicleType::CargoShip);
/// assert_eq!(t.to_string(), "CargoShip");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VehicleType {
    /// Road car.
    Car,
    /// Passenger bus.
    Bus,
    /// Freight truck.
    Truck,
    /// Airplane.
    Airplane,
    /// Cargo ship.
    CargoShip,
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VehicleType::Car => "Car",
            VehicleType::Bus => "Bus",
            VehicleType::Truck => "Truck",
            VehicleType::Airplane => "Airplane",
            VehicleType::CargoShip => "CargoShip",
        };
        f.write_str(name)
    }
}

impl FromStr for VehicleType {
    type Err = FleetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Car" => Ok(VehicleType::Car),
            "Bus" => Ok(VehicleType::Bus),
            "Truck" => Ok(VehicleType::Truck),
            "Airplane" => Ok(VehicleType::Airplane),
            "CargoShip" => Ok(VehicleType::CargoShip),
            other => Err(FleetError::ParseError(format!(
                "unknown vehicle type: '{other}'"
            ))),
        }
    }
}
