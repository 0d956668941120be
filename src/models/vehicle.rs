//! The vehicle entity: identity, odometer, and capability dispatch.

use std::cmp::Ordering;
use std::fmt;

use crate::error::FleetError;

use super::capability::{CargoHold, FuelTank, PassengerCabin};
use super::kind::{VehicleKind, VehicleType};

/// Mileage above which every variant reports needing maintenance.
pub const MAINTENANCE_MILEAGE_THRESHOLD: f64 = 10_000.0;

/// Passenger capacity of a car.
pub const CAR_PASSENGER_CAPACITY: u32 = 5;
/// Passenger capacity of a bus.
pub const BUS_PASSENGER_CAPACITY: u32 = 50;
/// Cargo capacity of a bus, in kg.
pub const BUS_CARGO_CAPACITY: f64 = 500.0;
/// Cargo capacity of a truck, in kg.
pub const TRUCK_CARGO_CAPACITY: f64 = 5_000.0;
/// Passenger capacity of an airplane.
pub const AIRPLANE_PASSENGER_CAPACITY: u32 = 200;
/// Cargo capacity of an airplane, in kg.
pub const AIRPLANE_CARGO_CAPACITY: f64 = 10_000.0;
/// Cargo capacity of a cargo ship, in kg.
pub const CARGO_SHIP_CARGO_CAPACITY: f64 = 5_000.0;

/// A fleet vehicle: identity and odometer plus the capability records its
/// variant composes (fuel tank, passenger cabin, cargo hold).
///
/// Construction goes through one constructor per variant ([`Vehicle::car`],
/// [`Vehicle::bus`], [`Vehicle::truck`], [`Vehicle::airplane`],
/// [`Vehicle::cargo_ship`]), each validating capacities through the same
/// paths the runtime operations use. Capacities are fixed for the vehicle's
/// lifetime and never exceeded; a failed operation leaves all state
/// unchanged.
///
/// # Examples
///
/// ```
/// use fleetsim::models::Vehicle;
///
/// let mut car = Vehicle::car("C001", "Toyota", 120.0, 4, 0.0, 2, false).unwrap();
/// car.refuel(10.0).unwrap();
/// car.travel(30.0).unwrap();
/// assert_eq!(car.current_mileage(), 30.0);
/// assert!(car.fuel_level() < 10.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    id: String,
    model: String,
    max_speed: f64,
    mileage: f64,
    kind: VehicleKind,
    fuel: Option<FuelTank>,
    passengers: Option<PassengerCabin>,
    cargo: Option<CargoHold>,
    maintenance_scheduled: bool,
}

impl Vehicle {
    fn base(
        id: impl Into<String>,
        model: impl Into<String>,
        max_speed: f64,
        mileage: f64,
        kind: VehicleKind,
        maintenance_scheduled: bool,
    ) -> Result<Self, FleetError> {
        if max_speed <= 0.0 {
            return Err(FleetError::InvalidOperation(format!(
                "max speed must be positive, got {max_speed}"
            )));
        }
        if mileage < 0.0 {
            return Err(FleetError::InvalidOperation(format!(
                "mileage must be non-negative, got {mileage}"
            )));
        }
        Ok(Self {
            id: id.into(),
            model: model.into(),
            max_speed,
            mileage,
            kind,
            fuel: None,
            passengers: None,
            cargo: None,
            maintenance_scheduled,
        })
    }

    /// Creates a car with `passengers` already aboard.
    pub fn car(
        id: impl Into<String>,
        model: impl Into<String>,
        max_speed: f64,
        wheels: u32,
        mileage: f64,
        passengers: u32,
        maintenance: bool,
    ) -> Result<Self, FleetError> {
        let mut v = Self::base(
            id,
            model,
            max_speed,
            mileage,
            VehicleKind::Car { wheels },
            maintenance,
        )?;
        let mut cabin = PassengerCabin::new(CAR_PASSENGER_CAPACITY);
        cabin.board(passengers)?;
        v.fuel = Some(FuelTank::new());
        v.passengers = Some(cabin);
        Ok(v)
    }

    /// Creates a bus with `passengers` aboard and `cargo` loaded.
    pub fn bus(
        id: impl Into<String>,
        model: impl Into<String>,
        max_speed: f64,
        wheels: u32,
        mileage: f64,
        passengers: u32,
        cargo: f64,
        maintenance: bool,
    ) -> Result<Self, FleetError> {
        let mut v = Self::base(
            id,
            model,
            max_speed,
            mileage,
            VehicleKind::Bus { wheels },
            maintenance,
        )?;
        let mut cabin = PassengerCabin::new(BUS_PASSENGER_CAPACITY);
        cabin.board(passengers)?;
        let mut hold = CargoHold::new(BUS_CARGO_CAPACITY);
        hold.load(cargo)?;
        v.fuel = Some(FuelTank::new());
        v.passengers = Some(cabin);
        v.cargo = Some(hold);
        Ok(v)
    }

    /// Creates a truck with `cargo` loaded.
    pub fn truck(
        id: impl Into<String>,
        model: impl Into<String>,
        max_speed: f64,
        wheels: u32,
        mileage: f64,
        cargo: f64,
        maintenance: bool,
    ) -> Result<Self, FleetError> {
        let mut v = Self::base(
            id,
            model,
            max_speed,
            mileage,
            VehicleKind::Truck { wheels },
            maintenance,
        )?;
        let mut hold = CargoHold::new(TRUCK_CARGO_CAPACITY);
        hold.load(cargo)?;
        v.fuel = Some(FuelTank::new());
        v.cargo = Some(hold);
        Ok(v)
    }

    /// Creates an airplane with `passengers` aboard and `cargo` loaded.
    pub fn airplane(
        id: impl Into<String>,
        model: impl Into<String>,
        max_speed: f64,
        mileage: f64,
        max_altitude: f64,
        passengers: u32,
        cargo: f64,
        maintenance: bool,
    ) -> Result<Self, FleetError> {
        let mut v = Self::base(
            id,
            model,
            max_speed,
            mileage,
            VehicleKind::Airplane { max_altitude },
            maintenance,
        )?;
        let mut cabin = PassengerCabin::new(AIRPLANE_PASSENGER_CAPACITY);
        cabin.board(passengers)?;
        let mut hold = CargoHold::new(AIRPLANE_CARGO_CAPACITY);
        hold.load(cargo)?;
        v.fuel = Some(FuelTank::new());
        v.passengers = Some(cabin);
        v.cargo = Some(hold);
        Ok(v)
    }

    /// Creates a cargo ship with `cargo` loaded.
    ///
    /// A sail-equipped ship carries no fuel tank: it never consumes fuel
    /// and cannot be refueled.
    pub fn cargo_ship(
        id: impl Into<String>,
        model: impl Into<String>,
        max_speed: f64,
        mileage: f64,
        has_sail: bool,
        cargo: f64,
        maintenance: bool,
    ) -> Result<Self, FleetError> {
        let mut v = Self::base(
            id,
            model,
            max_speed,
            mileage,
            VehicleKind::CargoShip { has_sail },
            maintenance,
        )?;
        let mut hold = CargoHold::new(CARGO_SHIP_CARGO_CAPACITY);
        hold.load(cargo)?;
        if !has_sail {
            v.fuel = Some(FuelTank::new());
        }
        v.cargo = Some(hold);
        Ok(v)
    }

    /// Unique identity, immutable after creation.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Maximum speed in km/h.
    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    /// Odometer reading in km.
    pub fn current_mileage(&self) -> f64 {
        self.mileage
    }

    /// Variant tag and variant-specific data.
    pub fn kind(&self) -> &VehicleKind {
        &self.kind
    }

    /// Fieldless variant tag.
    pub fn vehicle_type(&self) -> VehicleType {
        self.kind.vehicle_type()
    }

    /// Current fuel level; 0 for a vehicle without a tank.
    pub fn fuel_level(&self) -> f64 {
        self.fuel.as_ref().map(FuelTank::level).unwrap_or(0.0)
    }

    /// The passenger cabin, if this variant carries passengers.
    pub fn passengers(&self) -> Option<&PassengerCabin> {
        self.passengers.as_ref()
    }

    /// Passengers currently aboard; 0 for a variant without a cabin.
    pub fn current_passengers(&self) -> u32 {
        self.passengers
            .as_ref()
            .map(PassengerCabin::current)
            .unwrap_or(0)
    }

    /// The cargo hold, if this variant carries cargo.
    pub fn cargo(&self) -> Option<&CargoHold> {
        self.cargo.as_ref()
    }

    /// Cargo currently loaded; 0 for a variant without a hold.
    pub fn current_cargo(&self) -> f64 {
        self.cargo.as_ref().map(CargoHold::current).unwrap_or(0.0)
    }

    /// Moves the vehicle by `distance` km.
    ///
    /// Rejects negative distances with [`FleetError::InvalidOperation`]. A
    /// fuel-consuming vehicle must hold fuel for the whole distance up
    /// front; on success the fuel is drawn and the odometer advances by
    /// exactly `distance`. On any failure nothing changes. A vehicle
    /// without a tank (sail-equipped ship) advances unconditionally once
    /// the distance is validated.
    pub fn travel(&mut self, distance: f64) -> Result<(), FleetError> {
        if distance < 0.0 {
            return Err(FleetError::InvalidOperation(format!(
                "negative travel distance: {distance}"
            )));
        }
        let efficiency = self.fuel_efficiency();
        if let Some(tank) = &mut self.fuel {
            tank.consume(distance / efficiency)?;
        }
        self.mileage += distance;
        Ok(())
    }

    /// Fuel efficiency in km per unit of fuel.
    ///
    /// Pure function of the variant and its current load: a truck hauling
    /// more than half its cargo capacity runs 10% less efficient, and a
    /// sail-equipped ship reports 0.
    pub fn fuel_efficiency(&self) -> f64 {
        match &self.kind {
            VehicleKind::Car { .. } => 15.0,
            VehicleKind::Bus { .. } => 10.0,
            VehicleKind::Truck { .. } => {
                let half_loaded = self
                    .cargo
                    .as_ref()
                    .is_some_and(|hold| hold.current() > 0.5 * hold.capacity());
                if half_loaded {
                    8.0 * 0.9
                } else {
                    8.0
                }
            }
            VehicleKind::Airplane { .. } => 5.0,
            VehicleKind::CargoShip { has_sail } => {
                if *has_sail {
                    0.0
                } else {
                    4.0
                }
            }
        }
    }

    /// Estimated journey time in hours for `distance` km.
    ///
    /// `distance / max_speed` scaled by the class-of-vehicle factor.
    /// Advisory only; never consulted by [`Vehicle::travel`].
    pub fn estimate_journey_time(&self, distance: f64) -> f64 {
        distance / self.max_speed * self.kind.journey_factor()
    }

    /// Adds fuel to the tank.
    pub fn refuel(&mut self, amount: f64) -> Result<(), FleetError> {
        match &mut self.fuel {
            Some(tank) => tank.refuel(amount),
            None => Err(FleetError::InvalidOperation(format!(
                "sail-equipped ship {} cannot refuel",
                self.id
            ))),
        }
    }

    /// Draws the fuel needed to cover `distance` km, returning the new
    /// level.
    ///
    /// A vehicle without a tank (sail-equipped ship) consumes nothing and
    /// reports 0.
    pub fn consume_fuel(&mut self, distance: f64) -> Result<f64, FleetError> {
        if distance < 0.0 {
            return Err(FleetError::InvalidOperation(format!(
                "negative distance: {distance}"
            )));
        }
        let efficiency = self.fuel_efficiency();
        match &mut self.fuel {
            Some(tank) => tank.consume(distance / efficiency),
            None => Ok(0.0),
        }
    }

    /// Boards `count` passengers.
    pub fn board_passengers(&mut self, count: u32) -> Result<(), FleetError> {
        match &mut self.passengers {
            Some(cabin) => cabin.board(count),
            None => Err(FleetError::InvalidOperation(format!(
                "{} does not carry passengers",
                self.id
            ))),
        }
    }

    /// Disembarks `count` passengers.
    pub fn disembark_passengers(&mut self, count: u32) -> Result<(), FleetError> {
        match &mut self.passengers {
            Some(cabin) => cabin.disembark(count),
            None => Err(FleetError::InvalidOperation(format!(
                "{} does not carry passengers",
                self.id
            ))),
        }
    }

    /// Loads `weight` of cargo.
    pub fn load_cargo(&mut self, weight: f64) -> Result<(), FleetError> {
        match &mut self.cargo {
            Some(hold) => hold.load(weight),
            None => Err(FleetError::InvalidOperation(format!(
                "{} does not carry cargo",
                self.id
            ))),
        }
    }

    /// Unloads `weight` of cargo.
    pub fn unload_cargo(&mut self, weight: f64) -> Result<(), FleetError> {
        match &mut self.cargo {
            Some(hold) => hold.unload(weight),
            None => Err(FleetError::InvalidOperation(format!(
                "{} does not carry cargo",
                self.id
            ))),
        }
    }

    /// Flags the vehicle for maintenance.
    pub fn schedule_maintenance(&mut self) {
        self.maintenance_scheduled = true;
    }

    /// Whether the vehicle is due for maintenance.
    ///
    /// Every variant is due past the mileage threshold; a car is also due
    /// whenever maintenance has been explicitly scheduled. The other
    /// variants ignore the scheduled flag here.
    pub fn needs_maintenance(&self) -> bool {
        let over_threshold = self.mileage > MAINTENANCE_MILEAGE_THRESHOLD;
        match self.kind {
            VehicleKind::Car { .. } => over_threshold || self.maintenance_scheduled,
            _ => over_threshold,
        }
    }

    /// Services the vehicle, clearing the scheduled-maintenance flag.
    pub fn perform_maintenance(&mut self) {
        self.maintenance_scheduled = false;
    }

    /// Adds `km` straight to the odometer with no fuel accounting.
    ///
    /// The simulation tick pairs this with an explicit
    /// [`Vehicle::consume_fuel`] call. Non-positive values are ignored; the
    /// odometer never runs backwards.
    pub fn advance_mileage(&mut self, km: f64) {
        if km > 0.0 {
            self.mileage += km;
        }
    }

    /// Orders vehicles by fuel efficiency.
    pub fn cmp_by_efficiency(&self, other: &Vehicle) -> Ordering {
        self.fuel_efficiency().total_cmp(&other.fuel_efficiency())
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            VehicleKind::Car { wheels } => write!(
                f,
                "Car, ID: {}, Model: {}, Speed: {:.2}, Wheels: {}, Mileage: {:.2}, \
                 Passengers: {}, Maintenance Needed?: {}, Fuel Level: {:.2}",
                self.id,
                self.model,
                self.max_speed,
                wheels,
                self.mileage,
                self.current_passengers(),
                self.needs_maintenance(),
                self.fuel_level()
            ),
            VehicleKind::Bus { wheels } => write!(
                f,
                "Bus, ID: {}, Model: {}, Speed: {:.2}, Wheels: {}, Mileage: {:.2}, \
                 Passengers: {}, Cargo: {:.2}, Maintenance Needed?: {}, Fuel Level: {:.2}",
                self.id,
                self.model,
                self.max_speed,
                wheels,
                self.mileage,
                self.current_passengers(),
                self.current_cargo(),
                self.needs_maintenance(),
                self.fuel_level()
            ),
            VehicleKind::Truck { wheels } => write!(
                f,
                "Truck, ID: {}, Model: {}, Speed: {:.2}, Wheels: {}, Mileage: {:.2}, \
                 Cargo: {:.2}, Maintenance Needed?: {}, Fuel Level: {:.2}",
                self.id,
                self.model,
                self.max_speed,
                wheels,
                self.mileage,
                self.current_cargo(),
                self.needs_maintenance(),
                self.fuel_level()
            ),
            VehicleKind::Airplane { max_altitude } => write!(
                f,
                "Airplane, ID: {}, Model: {}, Speed: {:.2}, Mileage: {:.2}, Altitude: {:.2}, \
                 Passengers: {}, Cargo: {:.2}, Maintenance Needed?: {}, Fuel Level: {:.2}",
                self.id,
                self.model,
                self.max_speed,
                self.mileage,
                max_altitude,
                self.current_passengers(),
                self.current_cargo(),
                self.needs_maintenance(),
                self.fuel_level()
            ),
            VehicleKind::CargoShip { has_sail } => write!(
                f,
                "CargoShip, ID: {}, Model: {}, Speed: {:.2}, Mileage: {:.2}, Sail?: {}, \
                 Cargo: {:.2}, Maintenance Needed?: {}, Fuel Level: {:.2}",
                self.id,
                self.model,
                self.max_speed,
                self.mileage,
                has_sail,
                self.current_cargo(),
                self.needs_maintenance(),
                self.fuel_level()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fueled_car() -> Vehicle {
        let mut car = Vehicle::car("C001", "Toyota", 120.0, 4, 0.0, 0, false).unwrap();
        car.refuel(10.0).unwrap();
        car
    }

    #[test]
    fn test_constructors_validate_base_fields() {
        assert!(Vehicle::car("C1", "X", 0.0, 4, 0.0, 0, false).is_err());
        assert!(Vehicle::car("C1", "X", -10.0, 4, 0.0, 0, false).is_err());
        assert!(Vehicle::car("C1", "X", 100.0, 4, -1.0, 0, false).is_err());
    }

    #[test]
    fn test_constructors_validate_initial_load() {
        assert!(matches!(
            Vehicle::car("C1", "X", 100.0, 4, 0.0, 6, false),
            Err(FleetError::Overload { .. })
        ));
        assert!(matches!(
            Vehicle::truck("T1", "X", 100.0, 6, 0.0, 5_000.1, false),
            Err(FleetError::Overload { .. })
        ));
        assert!(Vehicle::bus("B1", "X", 90.0, 6, 0.0, 50, 500.0, false).is_ok());
    }

    #[test]
    fn test_travel_negative_rejected() {
        let mut car = fueled_car();
        let err = car.travel(-1.0).unwrap_err();
        assert!(matches!(err, FleetError::InvalidOperation(_)));
        assert_eq!(car.current_mileage(), 0.0);
        assert_eq!(car.fuel_level(), 10.0);
    }

    #[test]
    fn test_travel_consumes_fuel_and_advances() {
        let mut car = fueled_car();
        car.travel(30.0).unwrap();
        assert_eq!(car.current_mileage(), 30.0);
        assert!((car.fuel_level() - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_travel_insufficient_fuel_is_atomic() {
        let mut car = fueled_car();
        // 10 units of fuel at efficiency 15 covers at most 150 km
        let err = car.travel(151.0).unwrap_err();
        assert!(matches!(err, FleetError::InsufficientFuel { .. }));
        assert_eq!(car.current_mileage(), 0.0);
        assert_eq!(car.fuel_level(), 10.0);
    }

    #[test]
    fn test_efficiency_constants_per_variant() {
        let car = Vehicle::car("C1", "X", 100.0, 4, 0.0, 0, false).unwrap();
        let bus = Vehicle::bus("B1", "X", 90.0, 6, 0.0, 0, 0.0, false).unwrap();
        let plane = Vehicle::airplane("A1", "X", 850.0, 0.0, 10_000.0, 0, 0.0, false).unwrap();
        let ship = Vehicle::cargo_ship("S1", "X", 40.0, 0.0, false, 0.0, false).unwrap();
        assert_eq!(car.fuel_efficiency(), 15.0);
        assert_eq!(bus.fuel_efficiency(), 10.0);
        assert_eq!(plane.fuel_efficiency(), 5.0);
        assert_eq!(ship.fuel_efficiency(), 4.0);
    }

    #[test]
    fn test_truck_efficiency_drops_when_half_loaded() {
        let mut truck = Vehicle::truck("T1", "Volvo", 100.0, 6, 0.0, 0.0, false).unwrap();
        assert_eq!(truck.fuel_efficiency(), 8.0);
        truck.load_cargo(2_500.0).unwrap();
        assert_eq!(truck.fuel_efficiency(), 8.0);
        truck.load_cargo(0.1).unwrap();
        assert!((truck.fuel_efficiency() - 7.2).abs() < 1e-9);
        truck.unload_cargo(1_000.0).unwrap();
        assert_eq!(truck.fuel_efficiency(), 8.0);
    }

    #[test]
    fn test_journey_time_class_factors() {
        let car = Vehicle::car("C1", "X", 100.0, 4, 0.0, 0, false).unwrap();
        let plane = Vehicle::airplane("A1", "X", 100.0, 0.0, 10_000.0, 0, 0.0, false).unwrap();
        let ship = Vehicle::cargo_ship("S1", "X", 100.0, 0.0, true, 0.0, false).unwrap();
        assert!((car.estimate_journey_time(100.0) - 1.1).abs() < 1e-9);
        assert!((plane.estimate_journey_time(100.0) - 0.95).abs() < 1e-9);
        assert!((ship.estimate_journey_time(100.0) - 1.15).abs() < 1e-9);
    }

    #[test]
    fn test_sail_ship_has_no_fuel_behavior() {
        let mut ship = Vehicle::cargo_ship("S1", "Cutty", 30.0, 0.0, true, 100.0, false).unwrap();
        assert!(ship.refuel(10.0).is_err());
        assert_eq!(ship.fuel_level(), 0.0);
        assert_eq!(ship.consume_fuel(50.0).unwrap(), 0.0);
        assert_eq!(ship.fuel_level(), 0.0);
        // sail ships still travel freely
        ship.travel(500.0).unwrap();
        assert_eq!(ship.current_mileage(), 500.0);
    }

    #[test]
    fn test_powered_ship_consumes_fuel() {
        let mut ship = Vehicle::cargo_ship("S1", "Maersk", 40.0, 0.0, false, 0.0, false).unwrap();
        ship.refuel(10.0).unwrap();
        assert!((ship.consume_fuel(20.0).unwrap() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_maintenance_rule_car_honors_flag() {
        let mut car = Vehicle::car("C1", "X", 100.0, 4, 0.0, 0, false).unwrap();
        assert!(!car.needs_maintenance());
        car.schedule_maintenance();
        assert!(car.needs_maintenance());
        car.perform_maintenance();
        assert!(!car.needs_maintenance());
    }

    #[test]
    fn test_maintenance_rule_truck_ignores_flag() {
        let mut truck = Vehicle::truck("T1", "X", 100.0, 6, 0.0, 0.0, false).unwrap();
        truck.schedule_maintenance();
        assert!(!truck.needs_maintenance());
        truck.advance_mileage(10_000.1);
        assert!(truck.needs_maintenance());
        // servicing clears the flag but mileage keeps the vehicle due
        truck.perform_maintenance();
        assert!(truck.needs_maintenance());
    }

    #[test]
    fn test_consume_fuel_rejects_negative_distance() {
        let mut car = fueled_car();
        assert!(car.consume_fuel(-5.0).is_err());
        assert_eq!(car.fuel_level(), 10.0);
    }

    #[test]
    fn test_advance_mileage_never_decreases() {
        let mut car = fueled_car();
        car.advance_mileage(5.0);
        car.advance_mileage(-3.0);
        assert_eq!(car.current_mileage(), 5.0);
    }

    #[test]
    fn test_display_includes_variant_fields() {
        let car = fueled_car();
        let line = car.to_string();
        assert!(line.starts_with("Car, ID: C001"));
        assert!(line.contains("Wheels: 4"));
        assert!(line.contains("Fuel Level: 10.00"));

        let ship = Vehicle::cargo_ship("S1", "Cutty", 30.0, 0.0, true, 100.0, false).unwrap();
        assert!(ship.to_string().contains("Sail?: true"));
    }

    #[test]
    fn test_cmp_by_efficiency() {
        let car = Vehicle::car("C1", "X", 100.0, 4, 0.0, 0, false).unwrap();
        let plane = Vehicle::airplane("A1", "X", 850.0, 0.0, 10_000.0, 0, 0.0, false).unwrap();
        assert_eq!(plane.cmp_by_efficiency(&car), Ordering::Less);
        assert_eq!(car.cmp_by_efficiency(&car), Ordering::Equal);
    }
}
