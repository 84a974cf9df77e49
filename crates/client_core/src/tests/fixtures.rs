use std::{
    collections::{HashMap, HashSet},
    time::Duration,
};

use async_trait::async_trait;
use shared::domain::{
    Make, MakeId, Model, ModelId, ModelType, TypeId, Vehicle, VehicleType, YearModel,
};

use crate::fetcher::{FetchError, OptionFetcher};

pub(crate) fn make(id: &str, name: &str) -> Make {
    Make {
        id: MakeId::new(id),
        name: name.into(),
    }
}

pub(crate) fn vehicle_type(id: &str, name: &str) -> VehicleType {
    VehicleType {
        id: TypeId::new(id),
        name: name.into(),
        description: format!("{name} body style"),
    }
}

pub(crate) fn model(id: &str, name: &str, make_id: &str, vehicle_type: VehicleType) -> Model {
    Model {
        id: ModelId::new(id),
        name: name.into(),
        vehicle_make_id: MakeId::new(make_id),
        vehicle_type: ModelType::Record(vehicle_type),
    }
}

pub(crate) fn year_model(make_id: &str, model_id: &str, year: i32) -> YearModel {
    YearModel {
        id: None,
        vehicle_make_id: MakeId::new(make_id),
        vehicle_model_id: ModelId::new(model_id),
        year,
    }
}

pub(crate) fn vehicle(id: &str, badge: &str) -> Vehicle {
    let mut vehicle = Vehicle::piston(id, "ym", 2000);
    vehicle.badge = Some(badge.into());
    vehicle.induction = Some("Turbo".into());
    vehicle.transmission_type = Some("A".into());
    vehicle.num_gears = Some(8);
    vehicle
}

/// In-memory lookup data. Missing entries answer with an empty list.
#[derive(Default)]
pub(crate) struct StaticFetcher {
    pub makes: Vec<Make>,
    pub types: HashMap<String, Vec<VehicleType>>,
    pub models: HashMap<(String, String), Vec<Model>>,
    pub year_models: HashMap<String, Vec<YearModel>>,
    pub vehicles: HashMap<(String, i32), Vec<Vehicle>>,
    pub type_delays: HashMap<String, Duration>,
    pub failing_makes: HashSet<String>,
    pub crashing_makes: HashSet<String>,
}

/// Toyota has coupes and SUVs, Honda hatches; `empty` has no types and `broken` fails.
pub(crate) fn catalog() -> StaticFetcher {
    let coupe = vehicle_type("coupe", "Coupe");
    let suv = vehicle_type("suv", "SUV");
    let hatch = vehicle_type("hatch", "Hatchback");

    let mut fetcher = StaticFetcher {
        makes: vec![
            make("toyota", "Toyota"),
            make("honda", "Honda"),
            make("empty", "Empty Motors"),
            make("broken", "Broken Motors"),
        ],
        ..StaticFetcher::default()
    };
    fetcher
        .types
        .insert("toyota".into(), vec![coupe.clone(), suv.clone()]);
    fetcher.types.insert("honda".into(), vec![hatch.clone()]);
    fetcher.models.insert(
        ("toyota".into(), "coupe".into()),
        vec![
            model("supra", "Supra", "toyota", coupe.clone()),
            model("gr86", "GR86", "toyota", coupe),
        ],
    );
    fetcher.models.insert(
        ("toyota".into(), "suv".into()),
        vec![model("rav4", "RAV4", "toyota", suv)],
    );
    fetcher.models.insert(
        ("honda".into(), "hatch".into()),
        vec![model("civic", "Civic", "honda", hatch)],
    );
    fetcher.year_models.insert(
        "supra".into(),
        vec![
            year_model("toyota", "supra", 1994),
            year_model("toyota", "supra", 2020),
        ],
    );
    fetcher.vehicles.insert(
        ("supra".into(), 2020),
        vec![vehicle("supra-gt", "GT"), vehicle("supra-rz", "RZ")],
    );
    fetcher.failing_makes.insert("broken".into());
    fetcher
}

#[async_trait]
impl OptionFetcher for StaticFetcher {
    async fn makes(&self) -> Result<Vec<Make>, FetchError> {
        Ok(self.makes.clone())
    }

    async fn types(&self, make: &MakeId) -> Result<Vec<VehicleType>, FetchError> {
        if let Some(delay) = self.type_delays.get(make.as_str()) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing_makes.contains(make.as_str()) {
            return Err(FetchError::Status(500));
        }
        if self.crashing_makes.contains(make.as_str()) {
            panic!("type lookup for {make} crashed");
        }
        Ok(self.types.get(make.as_str()).cloned().unwrap_or_default())
    }

    async fn models(
        &self,
        make: &MakeId,
        vehicle_type: &TypeId,
    ) -> Result<Vec<Model>, FetchError> {
        let key = (make.to_string(), vehicle_type.to_string());
        Ok(self.models.get(&key).cloned().unwrap_or_default())
    }

    async fn year_models(
        &self,
        _make: &MakeId,
        _vehicle_type: &TypeId,
        model: &ModelId,
    ) -> Result<Vec<YearModel>, FetchError> {
        Ok(self.year_models.get(model.as_str()).cloned().unwrap_or_default())
    }

    async fn vehicles(
        &self,
        _make: &MakeId,
        _vehicle_type: &TypeId,
        model: &ModelId,
        year: i32,
    ) -> Result<Vec<Vehicle>, FetchError> {
        let key = (model.to_string(), year);
        Ok(self.vehicles.get(&key).cloned().unwrap_or_default())
    }
}
