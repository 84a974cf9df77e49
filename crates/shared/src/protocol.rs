use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{
    domain::{Make, Model, ModelType, Vehicle, VehicleType, YearModel},
    error::DecodeError,
};

/// Paginated list envelope returned by every lookup endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,
}

impl<T> Page<T> {
    /// True when the server reports pages after `requested`. No `pages` means one page.
    pub fn has_more_after(&self, requested: u32) -> bool {
        self.pages.is_some_and(|pages| requested < pages)
    }
}

/// Field checks applied after deserialization, so no half-filled record leaks out.
pub trait Record {
    const KIND: &'static str;

    fn validate(&self) -> Result<(), String>;
}

fn require(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("empty {field}"));
    }
    Ok(())
}

impl Record for Make {
    const KIND: &'static str = "make";

    fn validate(&self) -> Result<(), String> {
        require("id", self.id.as_str())?;
        require("name", &self.name)
    }
}

impl Record for VehicleType {
    const KIND: &'static str = "type";

    fn validate(&self) -> Result<(), String> {
        require("id", self.id.as_str())?;
        require("name", &self.name)
    }
}

impl Record for Model {
    const KIND: &'static str = "model";

    fn validate(&self) -> Result<(), String> {
        require("id", self.id.as_str())?;
        require("name", &self.name)?;
        require("vehicleMakeId", self.vehicle_make_id.as_str())?;
        match &self.vehicle_type {
            ModelType::Record(vehicle_type) => vehicle_type
                .validate()
                .map_err(|reason| format!("type: {reason}")),
            ModelType::Id(id) => require("typeId", id.as_str()),
        }
    }
}

impl Record for YearModel {
    const KIND: &'static str = "year model";

    fn validate(&self) -> Result<(), String> {
        require("vehicleMakeId", self.vehicle_make_id.as_str())?;
        require("vehicleModelId", self.vehicle_model_id.as_str())?;
        if self.year <= 0 {
            return Err(format!("invalid year {}", self.year));
        }
        Ok(())
    }
}

impl Record for Vehicle {
    const KIND: &'static str = "vehicle";

    fn validate(&self) -> Result<(), String> {
        require("id", self.id.as_str())?;
        require("vehicleYearModelId", self.vehicle_year_model_id.as_str())?;
        require("motorType", &self.motor_type)
    }
}

/// Decode a page envelope and validate each record in it.
pub fn decode_page<T>(bytes: &[u8]) -> Result<Page<T>, DecodeError>
where
    T: Record + DeserializeOwned,
{
    let page: Page<T> = serde_json::from_slice(bytes)?;
    for (index, item) in page.items.iter().enumerate() {
        item.validate()
            .map_err(|reason| DecodeError::InvalidRecord {
                record: T::KIND,
                index,
                reason,
            })?;
    }
    Ok(page)
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
