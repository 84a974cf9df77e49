use async_trait::async_trait;
use shared::{
    domain::{Make, MakeId, Model, ModelId, TypeId, Vehicle, VehicleType, YearModel},
    error::DecodeError,
};
use thiserror::Error;
use url::Url;

use crate::cascade::{OptionList, OptionQuery};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid api base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    MalformedResponse(#[from] DecodeError),
    #[error("option fetcher is unavailable")]
    Unavailable,
    #[error("option fetch task failed: {0}")]
    TaskFailed(String),
}

/// Source of the option list for each slot, filtered by the upstream identifiers.
#[async_trait]
pub trait OptionFetcher: Send + Sync {
    async fn makes(&self) -> Result<Vec<Make>, FetchError>;
    async fn types(&self, make: &MakeId) -> Result<Vec<VehicleType>, FetchError>;
    async fn models(
        &self,
        make: &MakeId,
        vehicle_type: &TypeId,
    ) -> Result<Vec<Model>, FetchError>;
    async fn year_models(
        &self,
        make: &MakeId,
        vehicle_type: &TypeId,
        model: &ModelId,
    ) -> Result<Vec<YearModel>, FetchError>;
    async fn vehicles(
        &self,
        make: &MakeId,
        vehicle_type: &TypeId,
        model: &ModelId,
        year: i32,
    ) -> Result<Vec<Vehicle>, FetchError>;
}

pub struct MissingOptionFetcher;

#[async_trait]
impl OptionFetcher for MissingOptionFetcher {
    async fn makes(&self) -> Result<Vec<Make>, FetchError> {
        Err(FetchError::Unavailable)
    }

    async fn types(&self, _make: &MakeId) -> Result<Vec<VehicleType>, FetchError> {
        Err(FetchError::Unavailable)
    }

    async fn models(
        &self,
        _make: &MakeId,
        _vehicle_type: &TypeId,
    ) -> Result<Vec<Model>, FetchError> {
        Err(FetchError::Unavailable)
    }

    async fn year_models(
        &self,
        _make: &MakeId,
        _vehicle_type: &TypeId,
        _model: &ModelId,
    ) -> Result<Vec<YearModel>, FetchError> {
        Err(FetchError::Unavailable)
    }

    async fn vehicles(
        &self,
        _make: &MakeId,
        _vehicle_type: &TypeId,
        _model: &ModelId,
        _year: i32,
    ) -> Result<Vec<Vehicle>, FetchError> {
        Err(FetchError::Unavailable)
    }
}

/// Run the fetch a query describes.
pub async fn fetch_options(
    fetcher: &dyn OptionFetcher,
    query: &OptionQuery,
) -> Result<OptionList, FetchError> {
    let list = match query {
        OptionQuery::Makes => OptionList::Makes(fetcher.makes().await?),
        OptionQuery::Types { make } => OptionList::Types(fetcher.types(make).await?),
        OptionQuery::Models { make, vehicle_type } => {
            OptionList::Models(fetcher.models(make, vehicle_type).await?)
        }
        OptionQuery::YearModels {
            make,
            vehicle_type,
            model,
        } => OptionList::YearModels(fetcher.year_models(make, vehicle_type, model).await?),
        OptionQuery::Vehicles {
            make,
            vehicle_type,
            model,
            year,
        } => OptionList::Vehicles(fetcher.vehicles(make, vehicle_type, model, *year).await?),
    };
    Ok(list)
}

/// Image reference for a make. `None` means the picker shows no logo.
pub trait LogoLookup: Send + Sync {
    fn logo_url(&self, make: &MakeId) -> Option<Url>;
}
