//! Capability records composed into vehicles.
//!
//! Each record is a narrow contract a variant may carry: a fuel tank, a
//! passenger cabin, a cargo hold. Every operation validates its precondition
//! up front and mutates only on success.

use crate::error::FleetError;

/// Fuel storage for a fuel-consuming vehicle.
///
/// # Examples
///
/// ```
/// use fleetsim::models::FuelTank;
///
/// let mut tank = FuelTank::new();
/// tank.refuel(20.0).unwrap();
/// assert_eq!(tank.consume(5.0).unwrap(), 15.0);
/// assert!(tank.consume(100.0).is_err());
/// assert_eq!(tank.level(), 15.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FuelTank {
    level: f64,
}

impl FuelTank {
    /// Creates an empty tank.
    pub fn new() -> Self {
        Self { level: 0.0 }
    }

    /// Current fuel level.
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Adds fuel to the tank. Rejects negative amounts.
    pub fn refuel(&mut self, amount: f64) -> Result<(), FleetError> {
        if amount < 0.0 {
            return Err(FleetError::InvalidOperation(format!(
                "negative fuel amount: {amount}"
            )));
        }
        self.level += amount;
        Ok(())
    }

    /// Draws `amount` of fuel, returning the new level.
    ///
    /// Fails with [`FleetError::InsufficientFuel`] and leaves the tank
    /// unchanged if the level would go negative.
    pub fn consume(&mut self, amount: f64) -> Result<f64, FleetError> {
        let new_level = self.level - amount;
        if new_level < 0.0 {
            return Err(FleetError::InsufficientFuel {
                needed: amount,
                available: self.level,
            });
        }
        self.level = new_level;
        Ok(new_level)
    }
}

impl Default for FuelTank {
    fn default() -> Self {
        Self::new()
    }
}

/// Seating for a passenger-carrying vehicle.
///
/// Capacity is fixed at construction; the current count never exceeds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassengerCabin {
    capacity: u32,
    current: u32,
}

impl PassengerCabin {
    /// Creates an empty cabin with the given fixed capacity.
    pub fn new(capacity: u32) -> Self {
        Self { capacity, current: 0 }
    }

    /// Maximum passenger count.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Passengers currently aboard.
    pub fn current(&self) -> u32 {
        self.current
    }

    /// Boards `count` passengers.
    ///
    /// Fails with [`FleetError::Overload`] iff the cabin would exceed its
    /// capacity; otherwise the count increases by exactly `count`.
    pub fn board(&mut self, count: u32) -> Result<(), FleetError> {
        let attempted = self.current + count;
        if attempted > self.capacity {
            return Err(FleetError::Overload {
                attempted: f64::from(attempted),
                capacity: f64::from(self.capacity),
            });
        }
        self.current = attempted;
        Ok(())
    }

    /// Disembarks `count` passengers.
    ///
    /// Fails if fewer than `count` are aboard.
    pub fn disembark(&mut self, count: u32) -> Result<(), FleetError> {
        if count > self.current {
            return Err(FleetError::InvalidOperation(format!(
                "cannot disembark {count}, only {} aboard",
                self.current
            )));
        }
        self.current -= count;
        Ok(())
    }
}

/// Cargo storage for a freight-carrying vehicle.
///
/// Capacity is fixed at construction; the current weight never exceeds it.
#[derive(Debug, Clone, PartialEq)]
pub struct CargoHold {
    capacity: f64,
    current: f64,
}

impl CargoHold {
    /// Creates an empty hold with the given fixed capacity.
    pub fn new(capacity: f64) -> Self {
        Self { capacity, current: 0.0 }
    }

    /// Maximum cargo weight.
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Cargo currently loaded.
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Loads `weight` of cargo.
    ///
    /// Rejects negative weights; fails with [`FleetError::Overload`] iff the
    /// hold would exceed its capacity.
    pub fn load(&mut self, weight: f64) -> Result<(), FleetError> {
        if weight < 0.0 {
            return Err(FleetError::InvalidOperation(format!(
                "negative cargo weight: {weight}"
            )));
        }
        let attempted = self.current + weight;
        if attempted > self.capacity {
            return Err(FleetError::Overload {
                attempted,
                capacity: self.capacity,
            });
        }
        self.current = attempted;
        Ok(())
    }

    /// Unloads `weight` of cargo.
    ///
    /// Rejects negative weights and fails if less than `weight` is loaded.
    pub fn unload(&mut self, weight: f64) -> Result<(), FleetError> {
        if weight < 0.0 {
            return Err(FleetError::InvalidOperation(format!(
                "negative cargo weight: {weight}"
            )));
        }
        if weight > self.current {
            return Err(FleetError::InvalidOperation(format!(
                "cannot unload {weight:.2}, only {:.2} loaded",
                self.current
            )));
        }
        self.current -= weight;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tank_refuel_and_consume() {
        let mut tank = FuelTank::new();
        assert_eq!(tank.level(), 0.0);
        tank.refuel(50.0).unwrap();
        assert_eq!(tank.level(), 50.0);
        assert_eq!(tank.consume(20.0).unwrap(), 30.0);
        assert_eq!(tank.level(), 30.0);
    }

    #[test]
    fn test_tank_rejects_negative_refuel() {
        let mut tank = FuelTank::new();
        tank.refuel(10.0).unwrap();
        assert!(matches!(
            tank.refuel(-1.0),
            Err(FleetError::InvalidOperation(_))
        ));
        assert_eq!(tank.level(), 10.0);
    }

    #[test]
    fn test_tank_consume_insufficient_leaves_level() {
        let mut tank = FuelTank::new();
        tank.refuel(5.0).unwrap();
        assert!(matches!(
            tank.consume(5.1),
            Err(FleetError::InsufficientFuel { .. })
        ));
        assert_eq!(tank.level(), 5.0);
    }

    #[test]
    fn test_cabin_board_to_capacity() {
        let mut cabin = PassengerCabin::new(5);
        cabin.board(3).unwrap();
        cabin.board(2).unwrap();
        assert_eq!(cabin.current(), 5);
        assert!(matches!(cabin.board(1), Err(FleetError::Overload { .. })));
        assert_eq!(cabin.current(), 5);
    }

    #[test]
    fn test_cabin_disembark_insufficient() {
        let mut cabin = PassengerCabin::new(5);
        cabin.board(2).unwrap();
        assert!(cabin.disembark(3).is_err());
        assert_eq!(cabin.current(), 2);
        cabin.disembark(2).unwrap();
        assert_eq!(cabin.current(), 0);
    }

    #[test]
    fn test_hold_load_boundary() {
        let mut hold = CargoHold::new(500.0);
        hold.load(500.0).unwrap();
        assert_eq!(hold.current(), 500.0);
        assert!(matches!(hold.load(0.1), Err(FleetError::Overload { .. })));
        assert_eq!(hold.current(), 500.0);
    }

    #[test]
    fn test_hold_rejects_negative_weights() {
        let mut hold = CargoHold::new(100.0);
        assert!(hold.load(-1.0).is_err());
        assert!(hold.unload(-1.0).is_err());
        assert_eq!(hold.current(), 0.0);
    }

    #[test]
    fn test_hold_unload_insufficient() {
        let mut hold = CargoHold::new(100.0);
        hold.load(40.0).unwrap();
        assert!(hold.unload(41.0).is_err());
        assert_eq!(hold.current(), 40.0);
    }
}
