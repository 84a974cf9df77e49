//! How each slot's records are identified and shown in a picker.

use shared::{
    domain::{Make, Model, Vehicle, VehicleType, YearModel},
    format::vehicle_options,
};
use tracing::warn;

pub trait PickerOption {
    /// Stable value used to match user input and compare selections.
    fn option_id(&self) -> String;
    fn option_label(&self) -> String;
}

impl PickerOption for Make {
    fn option_id(&self) -> String {
        self.id.to_string()
    }

    fn option_label(&self) -> String {
        self.name.clone()
    }
}

impl PickerOption for VehicleType {
    fn option_id(&self) -> String {
        self.id.to_string()
    }

    fn option_label(&self) -> String {
        self.name.clone()
    }
}

impl PickerOption for Model {
    fn option_id(&self) -> String {
        self.id.to_string()
    }

    fn option_label(&self) -> String {
        self.name.clone()
    }
}

impl PickerOption for YearModel {
    fn option_id(&self) -> String {
        self.year.to_string()
    }

    fn option_label(&self) -> String {
        self.year.to_string()
    }
}

impl PickerOption for Vehicle {
    fn option_id(&self) -> String {
        self.id.to_string()
    }

    fn option_label(&self) -> String {
        vehicle_label(self)
    }
}

/// Trim description. When it cannot be formatted, falls back to the server's
/// own description, then the title, then the id.
pub fn vehicle_label(vehicle: &Vehicle) -> String {
    match vehicle_options(vehicle) {
        Ok(label) => label,
        Err(err) => {
            warn!(vehicle_id = %vehicle.id, error = %err, "vehicle options unavailable");
            vehicle
                .year_model_spec
                .clone()
                .or_else(|| vehicle.title.clone())
                .unwrap_or_else(|| vehicle.id.to_string())
        }
    }
}

/// Find the option whose id equals `needle` or whose label matches it case-insensitively.
pub fn find_option<'a, T: PickerOption>(options: &'a [T], needle: &str) -> Option<&'a T> {
    let needle = needle.trim();
    options
        .iter()
        .find(|option| option.option_id() == needle)
        .or_else(|| {
            options
                .iter()
                .find(|option| option.option_label().eq_ignore_ascii_case(needle))
        })
}

#[cfg(test)]
#[path = "tests/labels_tests.rs"]
mod tests;
