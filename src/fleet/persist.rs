//! Delimited persisted-record encoding and registry load/save.
//!
//! One record per vehicle: a type tag followed by the variant's fields in a
//! fixed order, fuel level last. Floats are written with two decimals. The
//! trailing fuel field may be omitted on decode. A malformed record fails
//! on its own; loading skips it and continues with the rest.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::error::FleetError;
use crate::models::{Vehicle, VehicleKind, VehicleType};

use super::Fleet;

/// Outcome of loading records into a fleet.
#[derive(Debug)]
pub struct LoadOutcome {
    /// How many records loaded.
    pub loaded: usize,
    /// Skipped records: 1-based line number and the failure.
    pub skipped: Vec<(usize, FleetError)>,
}

/// Encodes a vehicle as one persisted record.
pub fn encode_record(v: &Vehicle) -> String {
    match v.kind() {
        VehicleKind::Car { wheels } => format!(
            "Car,{},{},{:.2},{},{:.2},{},{},{:.2}",
            v.id(),
            v.model(),
            v.max_speed(),
            wheels,
            v.current_mileage(),
            v.current_passengers(),
            v.needs_maintenance(),
            v.fuel_level()
        ),
        VehicleKind::Bus { wheels } => format!(
            "Bus,{},{},{:.2},{},{:.2},{},{:.2},{},{:.2}",
            v.id(),
            v.model(),
            v.max_speed(),
            wheels,
            v.current_mileage(),
            v.current_passengers(),
            v.current_cargo(),
            v.needs_maintenance(),
            v.fuel_level()
        ),
        VehicleKind::Truck { wheels } => format!(
            "Truck,{},{},{:.2},{},{:.2},{:.2},{},{:.2}",
            v.id(),
            v.model(),
            v.max_speed(),
            wheels,
            v.current_mileage(),
            v.current_cargo(),
            v.needs_maintenance(),
            v.fuel_level()
        ),
        VehicleKind::Airplane { max_altitude } => format!(
            "Airplane,{},{},{:.2},{:.2},{:.2},{},{:.2},{},{:.2}",
            v.id(),
            v.model(),
            v.max_speed(),
            v.current_mileage(),
            max_altitude,
            v.current_passengers(),
            v.current_cargo(),
            v.needs_maintenance(),
            v.fuel_level()
        ),
        VehicleKind::CargoShip { has_sail } => format!(
            "CargoShip,{},{},{:.2},{:.2},{},{:.2},{},{:.2}",
            v.id(),
            v.model(),
            v.max_speed(),
            v.current_mileage(),
            has_sail,
            v.current_cargo(),
            v.needs_maintenance(),
            v.fuel_level()
        ),
    }
}

/// Decodes one persisted record into a vehicle.
///
/// Field count or type mismatches fail with [`FleetError::ParseError`]
/// naming the offending field; capacity violations surface as the
/// corresponding domain error.
pub fn decode_record(line: &str) -> Result<Vehicle, FleetError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let tag: VehicleType = field(&fields, 0)?.parse()?;
    match tag {
        VehicleType::Car => {
            expect_len(&fields, 8)?;
            let mut v = Vehicle::car(
                field(&fields, 1)?,
                field(&fields, 2)?,
                parse_f64(&fields, 3)?,
                parse_u32(&fields, 4)?,
                parse_f64(&fields, 5)?,
                parse_u32(&fields, 6)?,
                parse_bool(&fields, 7)?,
            )?;
            apply_fuel(&mut v, &fields, 8)?;
            Ok(v)
        }
        VehicleType::Bus => {
            expect_len(&fields, 9)?;
            let mut v = Vehicle::bus(
                field(&fields, 1)?,
                field(&fields, 2)?,
                parse_f64(&fields, 3)?,
                parse_u32(&fields, 4)?,
                parse_f64(&fields, 5)?,
                parse_u32(&fields, 6)?,
                parse_f64(&fields, 7)?,
                parse_bool(&fields, 8)?,
            )?;
            apply_fuel(&mut v, &fields, 9)?;
            Ok(v)
        }
        VehicleType::Truck => {
            expect_len(&fields, 8)?;
            let mut v = Vehicle::truck(
                field(&fields, 1)?,
                field(&fields, 2)?,
                parse_f64(&fields, 3)?,
                parse_u32(&fields, 4)?,
                parse_f64(&fields, 5)?,
                parse_f64(&fields, 6)?,
                parse_bool(&fields, 7)?,
            )?;
            apply_fuel(&mut v, &fields, 8)?;
            Ok(v)
        }
        VehicleType::Airplane => {
            expect_len(&fields, 9)?;
            let mut v = Vehicle::airplane(
                field(&fields, 1)?,
                field(&fields, 2)?,
                parse_f64(&fields, 3)?,
                parse_f64(&fields, 4)?,
                parse_f64(&fields, 5)?,
                parse_u32(&fields, 6)?,
                parse_f64(&fields, 7)?,
                parse_bool(&fields, 8)?,
            )?;
            apply_fuel(&mut v, &fields, 9)?;
            Ok(v)
        }
        VehicleType::CargoShip => {
            expect_len(&fields, 8)?;
            let mut v = Vehicle::cargo_ship(
                field(&fields, 1)?,
                field(&fields, 2)?,
                parse_f64(&fields, 3)?,
                parse_f64(&fields, 4)?,
                parse_bool(&fields, 5)?,
                parse_f64(&fields, 6)?,
                parse_bool(&fields, 7)?,
            )?;
            apply_fuel(&mut v, &fields, 8)?;
            Ok(v)
        }
    }
}

fn field<'a>(fields: &[&'a str], idx: usize) -> Result<&'a str, FleetError> {
    fields
        .get(idx)
        .copied()
        .ok_or_else(|| FleetError::ParseError(format!("missing field {idx}")))
}

fn parse_f64(fields: &[&str], idx: usize) -> Result<f64, FleetError> {
    let raw = field(fields, idx)?;
    raw.parse()
        .map_err(|_| FleetError::ParseError(format!("field {idx}: expected number, got '{raw}'")))
}

fn parse_u32(fields: &[&str], idx: usize) -> Result<u32, FleetError> {
    let raw = field(fields, idx)?;
    raw.parse()
        .map_err(|_| FleetError::ParseError(format!("field {idx}: expected integer, got '{raw}'")))
}

fn parse_bool(fields: &[&str], idx: usize) -> Result<bool, FleetError> {
    let raw = field(fields, idx)?;
    raw.parse()
        .map_err(|_| FleetError::ParseError(format!("field {idx}: expected bool, got '{raw}'")))
}

/// Records may carry the fuel level as a trailing field; `min_len` is the
/// record length without it.
fn expect_len(fields: &[&str], min_len: usize) -> Result<(), FleetError> {
    if fields.len() != min_len && fields.len() != min_len + 1 {
        return Err(FleetError::ParseError(format!(
            "expected {} or {} fields, got {}",
            min_len,
            min_len + 1,
            fields.len()
        )));
    }
    Ok(())
}

// A zero fuel field is skipped so sail-ship records load; a positive value
// on a sail ship fails the same way a runtime refuel would.
fn apply_fuel(v: &mut Vehicle, fields: &[&str], idx: usize) -> Result<(), FleetError> {
    if fields.len() > idx {
        let fuel = parse_f64(fields, idx)?;
        if fuel > 0.0 {
            v.refuel(fuel)?;
        }
    }
    Ok(())
}

impl Fleet {
    /// Replaces the registry with the decodable records from `lines`.
    ///
    /// Blank lines are ignored. Malformed records and in-file duplicate ids
    /// are skipped with a diagnostic each; the rest load in order.
    pub fn load_records<'a, I>(&mut self, lines: I) -> LoadOutcome
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut fresh = Fleet::new();
        let mut skipped = Vec::new();
        for (lineno, line) in lines.into_iter().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let outcome = decode_record(line).and_then(|v| fresh.add(v));
            if let Err(error) = outcome {
                warn!(line = lineno + 1, %error, "skipping unreadable fleet record");
                skipped.push((lineno + 1, error));
            }
        }
        let loaded = fresh.len();
        *self = fresh;
        LoadOutcome { loaded, skipped }
    }

    /// Encodes every vehicle as one record, in registry order.
    pub fn export_records(&self) -> Vec<String> {
        self.vehicles().iter().map(encode_record).collect()
    }

    /// Writes the fleet to `path`, one record per line.
    pub fn save_to_path(&self, path: impl AsRef<Path>) -> Result<(), FleetError> {
        let mut text = self.export_records().join("\n");
        if !text.is_empty() {
            text.push('\n');
        }
        fs::write(path.as_ref(), text)?;
        info!(path = %path.as_ref().display(), vehicles = self.len(), "fleet saved");
        Ok(())
    }

    /// Loads the fleet from `path`, replacing the registry.
    pub fn load_from_path(&mut self, path: impl AsRef<Path>) -> Result<LoadOutcome, FleetError> {
        let text = fs::read_to_string(path.as_ref())?;
        let outcome = self.load_records(text.lines());
        info!(path = %path.as_ref().display(), loaded = outcome.loaded, "fleet loaded");
        Ok(outcome)
    }
}
