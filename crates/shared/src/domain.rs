use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

id_newtype!(MakeId);
id_newtype!(TypeId);
id_newtype!(ModelId);
id_newtype!(YearModelId);
id_newtype!(VehicleId);

/// Position of a slot in the selection chain. Ordering follows the cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Make,
    Type,
    Model,
    YearModel,
    Vehicle,
}

impl Level {
    pub const ALL: [Level; 5] = [
        Level::Make,
        Level::Type,
        Level::Model,
        Level::YearModel,
        Level::Vehicle,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Levels strictly after this one, in cascade order.
    pub fn downstream(self) -> impl Iterator<Item = Level> {
        Self::ALL.into_iter().skip(self.index() + 1)
    }

    pub fn name(self) -> &'static str {
        match self {
            Level::Make => "make",
            Level::Type => "type",
            Level::Model => "model",
            Level::YearModel => "year",
            Level::Vehicle => "vehicle",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Make {
    pub id: MakeId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleType {
    pub id: TypeId,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub id: ModelId,
    pub name: String,
    pub vehicle_make_id: MakeId,
    #[serde(rename = "type", alias = "typeId")]
    pub vehicle_type: ModelType,
}

/// A model's body type: the full record, or only its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModelType {
    Record(VehicleType),
    Id(TypeId),
}

impl ModelType {
    pub fn id(&self) -> &TypeId {
        match self {
            ModelType::Record(vehicle_type) => &vehicle_type.id,
            ModelType::Id(id) => id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<YearModelId>,
    pub vehicle_make_id: MakeId,
    pub vehicle_model_id: ModelId,
    pub year: i32,
}

/// One trim level within a year model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: VehicleId,
    pub vehicle_year_model_id: YearModelId,
    pub motor_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Thousandths of a litre.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub displacement: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub displacement_liters: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub induction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elec_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transmission_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_gears: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Trim description computed by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_model_spec: Option<String>,
}

impl Vehicle {
    /// A bare piston vehicle; remaining attributes default to absent.
    pub fn piston(
        id: impl Into<String>,
        year_model_id: impl Into<String>,
        displacement: u32,
    ) -> Self {
        Self {
            id: VehicleId::new(id),
            vehicle_year_model_id: YearModelId::new(year_model_id),
            motor_type: "piston".into(),
            badge: None,
            version: None,
            displacement: Some(displacement),
            displacement_liters: None,
            induction: None,
            fuel_type: None,
            power: None,
            elec_type: None,
            transmission_type: None,
            num_gears: None,
            title: None,
            year_model_spec: None,
        }
    }

    /// Displacement in thousandths of a litre, whichever unit the server sent.
    pub fn displacement_thousandths(&self) -> Option<u32> {
        self.displacement.or_else(|| {
            self.displacement_liters
                .filter(|liters| liters.is_finite() && *liters >= 0.0)
                .map(|liters| (liters * 1000.0).round() as u32)
        })
    }
}
