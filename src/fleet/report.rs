//! Deterministic fleet-wide reporting.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::VehicleType;

use super::Fleet;

/// Aggregate snapshot of a fleet.
///
/// Produced by [`Fleet::generate_report`]. `Display` renders the
/// human-readable report text; the struct serializes for machine consumers.
/// Average efficiency is the arithmetic mean of every vehicle's efficiency,
/// fuel-consuming or not, and 0.0 for an empty fleet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetReport {
    /// Total number of registered vehicles.
    pub total: usize,
    /// Number of cars.
    pub car_count: usize,
    /// Number of buses.
    pub bus_count: usize,
    /// Number of trucks.
    pub truck_count: usize,
    /// Number of airplanes.
    pub airplane_count: usize,
    /// Number of cargo ships.
    pub cargo_ship_count: usize,
    /// Arithmetic mean of all vehicles' fuel efficiency.
    pub average_efficiency: f64,
    /// Sum of all vehicles' mileage.
    pub total_mileage: f64,
    /// Number of vehicles currently needing maintenance.
    pub needing_maintenance: usize,
}

impl Fleet {
    /// Aggregates counts, mean efficiency, and mileage across the fleet.
    pub fn generate_report(&self) -> FleetReport {
        let mut report = FleetReport {
            total: self.len(),
            car_count: 0,
            bus_count: 0,
            truck_count: 0,
            airplane_count: 0,
            cargo_ship_count: 0,
            average_efficiency: 0.0,
            total_mileage: 0.0,
            needing_maintenance: 0,
        };
        let mut total_efficiency = 0.0;
        for v in self.vehicles() {
            match v.vehicle_type() {
                VehicleType::Car => report.car_count += 1,
                VehicleType::Bus => report.bus_count += 1,
                VehicleType::Truck => report.truck_count += 1,
                VehicleType::Airplane => report.airplane_count += 1,
                VehicleType::CargoShip => report.cargo_ship_count += 1,
            }
            total_efficiency += v.fuel_efficiency();
            report.total_mileage += v.current_mileage();
            if v.needs_maintenance() {
                report.needing_maintenance += 1;
            }
        }
        if report.total > 0 {
            report.average_efficiency = total_efficiency / report.total as f64;
        }
        report
    }
}

impl fmt::Display for FleetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Fleet Report ===")?;
        writeln!(f, "Total Vehicles           : {}", self.total)?;
        writeln!(f, "Count by Type")?;
        writeln!(f, "     Cars                : {}", self.car_count)?;
        writeln!(f, "     Buses               : {}", self.bus_count)?;
        writeln!(f, "     Trucks              : {}", self.truck_count)?;
        writeln!(f, "     Airplanes           : {}", self.airplane_count)?;
        writeln!(f, "     Cargo Ships         : {}", self.cargo_ship_count)?;
        writeln!(f, "Average Efficiency       : {:.2} km/l", self.average_efficiency)?;
        writeln!(f, "Total Mileage            : {:.2} km", self.total_mileage)?;
        write!(f, "Vehicles for Maintenance : {}", self.needing_maintenance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Vehicle;

    #[test]
    fn test_report_car_and_truck() {
        let mut fleet = Fleet::new();
        fleet
            .add(Vehicle::car("C001", "Toyota", 120.0, 4, 50.0, 0, false).unwrap())
            .unwrap();
        fleet
            .add(Vehicle::truck("T001", "Volvo", 100.0, 6, 200.0, 0.0, false).unwrap())
            .unwrap();

        let report = fleet.generate_report();
        assert_eq!(report.total, 2);
        assert_eq!(report.car_count, 1);
        assert_eq!(report.truck_count, 1);
        assert_eq!(report.bus_count, 0);
        assert!((report.average_efficiency - 11.5).abs() < 1e-9);
        assert!((report.total_mileage - 250.0).abs() < 1e-9);
        assert_eq!(report.needing_maintenance, 0);
    }

    #[test]
    fn test_empty_fleet_reports_zeroes() {
        let report = Fleet::new().generate_report();
        assert_eq!(report.total, 0);
        assert_eq!(report.average_efficiency, 0.0);
        assert_eq!(report.total_mileage, 0.0);
    }

    #[test]
    fn test_report_counts_maintenance() {
        let mut fleet = Fleet::new();
        fleet
            .add(Vehicle::car("C001", "Toyota", 120.0, 4, 10_500.0, 0, false).unwrap())
            .unwrap();
        fleet
            .add(Vehicle::bus("B001", "Mercedes", 90.0, 6, 0.0, 0, 0.0, false).unwrap())
            .unwrap();
        assert_eq!(fleet.generate_report().needing_maintenance, 1);
    }

    #[test]
    fn test_report_display_layout() {
        let mut fleet = Fleet::new();
        fleet
            .add(Vehicle::car("C001", "Toyota", 120.0, 4, 50.0, 0, false).unwrap())
            .unwrap();
        let text = fleet.generate_report().to_string();
        assert!(text.starts_with("=== Fleet Report ==="));
        assert!(text.contains("Total Vehicles           : 1"));
        assert!(text.contains("Average Efficiency       : 15.00 km/l"));
        assert!(text.ends_with("Vehicles for Maintenance : 0"));
    }

    #[test]
    fn test_report_serializes_to_json() {
        let mut fleet = Fleet::new();
        fleet
            .add(Vehicle::car("C001", "Toyota", 120.0, 4, 50.0, 0, false).unwrap())
            .unwrap();
        let report = fleet.generate_report();
        let json = serde_json::to_string(&report).unwrap();
        let back: FleetReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
