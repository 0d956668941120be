//! Fleet registry and broadcast operations.

use tracing::{debug, info, warn};

use crate::error::FleetError;
use crate::models::{Vehicle, VehicleType};

/// A per-vehicle failure isolated by a fleet broadcast operation.
#[derive(Debug)]
pub struct BroadcastFailure {
    /// Id of the vehicle that failed.
    pub vehicle_id: String,
    /// What went wrong.
    pub error: FleetError,
}

/// An insertion-ordered registry of vehicles with unique identities.
///
/// Broadcast operations apply best-effort: a per-vehicle failure is logged
/// and collected, and the remaining vehicles still run.
///
/// # Examples
///
/// ```
/// use fleetsim::fleet::Fleet;
/// use fleetsim::models::Vehicle;
///
/// let mut fleet = Fleet::new();
/// fleet
///     .add(Vehicle::car("C001", "Toyota", 120.0, 4, 0.0, 0, false).unwrap())
///     .unwrap();
/// assert_eq!(fleet.len(), 1);
/// let duplicate = Vehicle::car("C001", "Honda", 110.0, 4, 0.0, 0, false).unwrap();
/// assert!(fleet.add(duplicate).is_err());
/// ```
#[derive(Debug, Default)]
pub struct Fleet {
    vehicles: Vec<Vehicle>,
}

impl Fleet {
    /// Creates an empty fleet.
    pub fn new() -> Self {
        Self { vehicles: Vec::new() }
    }

    /// Builds a fleet from `vehicles`, rejecting duplicate ids.
    pub fn from_vehicles(vehicles: Vec<Vehicle>) -> Result<Self, FleetError> {
        let mut fleet = Self::new();
        for v in vehicles {
            fleet.add(v)?;
        }
        Ok(fleet)
    }

    /// Registers a vehicle, preserving insertion order.
    ///
    /// Fails with [`FleetError::DuplicateIdentity`] if the id is taken.
    pub fn add(&mut self, vehicle: Vehicle) -> Result<(), FleetError> {
        if self.vehicles.iter().any(|v| v.id() == vehicle.id()) {
            return Err(FleetError::DuplicateIdentity(vehicle.id().to_string()));
        }
        debug!(id = vehicle.id(), "vehicle added to fleet");
        self.vehicles.push(vehicle);
        Ok(())
    }

    /// Removes and returns the vehicle with the given id.
    ///
    /// Fails with [`FleetError::NotFound`] if absent.
    pub fn remove(&mut self, id: &str) -> Result<Vehicle, FleetError> {
        match self.vehicles.iter().position(|v| v.id() == id) {
            Some(idx) => {
                debug!(id, "vehicle removed from fleet");
                Ok(self.vehicles.remove(idx))
            }
            None => Err(FleetError::NotFound(id.to_string())),
        }
    }

    /// The vehicle with the given id, if registered.
    pub fn get(&self, id: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id() == id)
    }

    /// Mutable access to the vehicle with the given id.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Vehicle> {
        self.vehicles.iter_mut().find(|v| v.id() == id)
    }

    /// The registered vehicles in registry order.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Number of registered vehicles.
    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    /// Returns `true` if no vehicles are registered.
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Consumes the fleet, yielding its vehicles in registry order.
    pub fn into_vehicles(self) -> Vec<Vehicle> {
        self.vehicles
    }

    /// Moves every vehicle by `distance`, isolating per-vehicle failures.
    pub fn start_all_journeys(&mut self, distance: f64) -> Vec<BroadcastFailure> {
        let mut failures = Vec::new();
        for v in &mut self.vehicles {
            if let Err(error) = v.travel(distance) {
                warn!(id = v.id(), %error, "journey failed");
                failures.push(BroadcastFailure {
                    vehicle_id: v.id().to_string(),
                    error,
                });
            }
        }
        failures
    }

    /// Refuels every vehicle by `amount`, isolating per-vehicle failures
    /// (a sail-equipped ship rejects the refuel and is reported, not fatal).
    pub fn refuel_all(&mut self, amount: f64) -> Vec<BroadcastFailure> {
        let mut failures = Vec::new();
        for v in &mut self.vehicles {
            if let Err(error) = v.refuel(amount) {
                warn!(id = v.id(), %error, "refuel failed");
                failures.push(BroadcastFailure {
                    vehicle_id: v.id().to_string(),
                    error,
                });
            }
        }
        failures
    }

    /// Draws fuel for `distance` from every vehicle and sums the levels
    /// each reports back.
    ///
    /// A vehicle without enough fuel is skipped and contributes zero; a
    /// tankless vehicle reports zero. Returns the sum and the isolated
    /// failures.
    pub fn total_fuel_consumption(&mut self, distance: f64) -> (f64, Vec<BroadcastFailure>) {
        let mut total = 0.0;
        let mut failures = Vec::new();
        for v in &mut self.vehicles {
            match v.consume_fuel(distance) {
                Ok(level) => total += level,
                Err(error) => {
                    warn!(id = v.id(), %error, "fuel draw failed");
                    failures.push(BroadcastFailure {
                        vehicle_id: v.id().to_string(),
                        error,
                    });
                }
            }
        }
        (total, failures)
    }

    /// Services every vehicle currently needing maintenance, returning
    /// their ids.
    pub fn maintain_all(&mut self) -> Vec<String> {
        let mut serviced = Vec::new();
        for v in &mut self.vehicles {
            if v.needs_maintenance() {
                v.perform_maintenance();
                info!(id = v.id(), "maintenance complete");
                serviced.push(v.id().to_string());
            }
        }
        serviced
    }

    /// Ids of the vehicles of the given variant, in registry order.
    pub fn search_by_type(&self, vehicle_type: VehicleType) -> Vec<&str> {
        self.vehicles
            .iter()
            .filter(|v| v.vehicle_type() == vehicle_type)
            .map(|v| v.id())
            .collect()
    }

    /// Ids of the vehicles currently needing maintenance, in registry order.
    pub fn vehicles_needing_maintenance(&self) -> Vec<&str> {
        self.vehicles
            .iter()
            .filter(|v| v.needs_maintenance())
            .map(|v| v.id())
            .collect()
    }

    /// Reorders the registry in place by fuel efficiency (stable).
    pub fn sort_by_efficiency(&mut self) {
        self.vehicles.sort_by(Vehicle::cmp_by_efficiency);
    }

    /// Reorders the registry in place by maximum speed (stable).
    pub fn sort_by_speed(&mut self) {
        self.vehicles
            .sort_by(|a, b| a.max_speed().total_cmp(&b.max_speed()));
    }

    /// Reorders the registry in place by model name (stable).
    pub fn sort_by_model(&mut self) {
        self.vehicles.sort_by(|a, b| a.model().cmp(b.model()));
    }

    /// Reorders the registry in place by mileage (stable).
    pub fn sort_by_mileage(&mut self) {
        self.vehicles
            .sort_by(|a, b| a.current_mileage().total_cmp(&b.current_mileage()));
    }

    /// The vehicle with the highest maximum speed, if any.
    pub fn fastest(&self) -> Option<&Vehicle> {
        self.vehicles
            .iter()
            .max_by(|a, b| a.max_speed().total_cmp(&b.max_speed()))
    }

    /// The vehicle with the lowest maximum speed, if any.
    pub fn slowest(&self) -> Option<&Vehicle> {
        self.vehicles
            .iter()
            .min_by(|a, b| a.max_speed().total_cmp(&b.max_speed()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_fleet() -> Fleet {
        let mut fleet = Fleet::new();
        fleet
            .add(Vehicle::car("C001", "Toyota", 120.0, 4, 0.0, 0, false).unwrap())
            .unwrap();
        fleet
            .add(Vehicle::truck("T001", "Volvo", 100.0, 6, 0.0, 0.0, false).unwrap())
            .unwrap();
        fleet
            .add(Vehicle::cargo_ship("S001", "Cutty", 30.0, 0.0, true, 0.0, false).unwrap())
            .unwrap();
        fleet
    }

    #[test]
    fn test_add_rejects_duplicate_id() {
        let mut fleet = demo_fleet();
        let dup = Vehicle::bus("C001", "Mercedes", 90.0, 6, 0.0, 0, 0.0, false).unwrap();
        assert!(matches!(
            fleet.add(dup),
            Err(FleetError::DuplicateIdentity(id)) if id == "C001"
        ));
        assert_eq!(fleet.len(), 3);
    }

    #[test]
    fn test_remove_missing_is_not_found() {
        let mut fleet = demo_fleet();
        assert!(matches!(
            fleet.remove("X999"),
            Err(FleetError::NotFound(id)) if id == "X999"
        ));
        let removed = fleet.remove("T001").unwrap();
        assert_eq!(removed.id(), "T001");
        assert_eq!(fleet.len(), 2);
    }

    #[test]
    fn test_start_all_journeys_isolates_failures() {
        let mut fleet = demo_fleet();
        fleet.get_mut("T001").unwrap().refuel(100.0).unwrap();
        // C001 has no fuel and fails; T001 and the sail ship move
        let failures = fleet.start_all_journeys(50.0);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].vehicle_id, "C001");
        assert_eq!(fleet.get("C001").unwrap().current_mileage(), 0.0);
        assert_eq!(fleet.get("T001").unwrap().current_mileage(), 50.0);
        assert_eq!(fleet.get("S001").unwrap().current_mileage(), 50.0);
    }

    #[test]
    fn test_refuel_all_reports_sail_ship() {
        let mut fleet = demo_fleet();
        let failures = fleet.refuel_all(25.0);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].vehicle_id, "S001");
        assert_eq!(fleet.get("C001").unwrap().fuel_level(), 25.0);
        assert_eq!(fleet.get("T001").unwrap().fuel_level(), 25.0);
    }

    #[test]
    fn test_total_fuel_consumption_sums_reported_levels() {
        let mut fleet = demo_fleet();
        fleet.get_mut("C001").unwrap().refuel(15.0).unwrap();
        // car: 15 - 15/15 = 14; truck: empty, skipped; sail ship: 0
        let (total, failures) = fleet.total_fuel_consumption(15.0);
        assert!((total - 14.0).abs() < 1e-9);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].vehicle_id, "T001");
        // the skipped truck is untouched
        assert_eq!(fleet.get("T001").unwrap().fuel_level(), 0.0);
    }

    #[test]
    fn test_maintain_all_services_only_due_vehicles() {
        let mut fleet = demo_fleet();
        fleet.get_mut("C001").unwrap().schedule_maintenance();
        fleet.get_mut("T001").unwrap().advance_mileage(20_000.0);
        let serviced = fleet.maintain_all();
        assert_eq!(serviced, vec!["C001".to_string(), "T001".to_string()]);
        assert!(!fleet.get("C001").unwrap().needs_maintenance());
        // mileage keeps the truck due even after service
        assert!(fleet.get("T001").unwrap().needs_maintenance());
    }

    #[test]
    fn test_search_by_type() {
        let fleet = demo_fleet();
        assert_eq!(fleet.search_by_type(VehicleType::Car), vec!["C001"]);
        assert_eq!(fleet.search_by_type(VehicleType::CargoShip), vec!["S001"]);
        assert!(fleet.search_by_type(VehicleType::Airplane).is_empty());
    }

    #[test]
    fn test_sort_by_efficiency_orders_ascending() {
        let mut fleet = demo_fleet();
        fleet.sort_by_efficiency();
        let ids: Vec<_> = fleet.vehicles().iter().map(Vehicle::id).collect();
        // sail ship 0, truck 8, car 15
        assert_eq!(ids, vec!["S001", "T001", "C001"]);
    }

    #[test]
    fn test_sort_by_model_is_lexicographic() {
        let mut fleet = demo_fleet();
        fleet.sort_by_model();
        let models: Vec<_> = fleet.vehicles().iter().map(Vehicle::model).collect();
        assert_eq!(models, vec!["Cutty", "Toyota", "Volvo"]);
    }

    #[test]
    fn test_fastest_and_slowest() {
        let fleet = demo_fleet();
        assert_eq!(fleet.fastest().unwrap().id(), "C001");
        assert_eq!(fleet.slowest().unwrap().id(), "S001");
        assert!(Fleet::new().fastest().is_none());
    }

    #[test]
    fn test_from_vehicles_rejects_duplicates() {
        let a = Vehicle::car("C1", "X", 100.0, 4, 0.0, 0, false).unwrap();
        let b = Vehicle::car("C1", "Y", 100.0, 4, 0.0, 0, false).unwrap();
        assert!(Fleet::from_vehicles(vec![a, b]).is_err());
    }
}
