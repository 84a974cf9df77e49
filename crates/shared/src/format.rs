//! Display strings for vehicle records.

use crate::{domain::Vehicle, error::FormatError};

const PISTON: &str = "piston";

/// Trim description such as `GT 2.0L Turbo 8 spd Automatic`.
pub fn vehicle_options(vehicle: &Vehicle) -> Result<String, FormatError> {
    let mut parts: Vec<String> = Vec::with_capacity(4);

    if let Some(prefix) = vehicle.badge.as_deref().or(vehicle.version.as_deref()) {
        parts.push(prefix.to_string());
    }

    if vehicle.motor_type != PISTON {
        return Err(FormatError::UnsupportedMotorType(vehicle.motor_type.clone()));
    }
    let displacement = vehicle
        .displacement_thousandths()
        .ok_or_else(|| FormatError::MissingField {
            vehicle_id: vehicle.id.to_string(),
            field: "displacement",
        })?;
    parts.push(format!("{:.1}L", f64::from(displacement) / 1000.0));
    if let Some(induction) = vehicle.induction.as_deref() {
        parts.push(induction.to_string());
    }

    let transmission = match vehicle.transmission_type.as_deref() {
        Some("A") => Some("Automatic"),
        Some("M") => Some("Manual"),
        _ => None,
    };
    if let Some(transmission) = transmission {
        match vehicle.num_gears {
            Some(gears) => parts.push(format!("{gears} spd {transmission}")),
            None => parts.push(transmission.to_string()),
        }
    }

    Ok(parts.join(" "))
}

/// `1994 Toyota Supra`.
pub fn vehicle_title(year: i32, make_name: &str, model_name: &str) -> String {
    format!("{year} {make_name} {model_name}")
}

#[cfg(test)]
#[path = "tests/format_tests.rs"]
mod tests;
