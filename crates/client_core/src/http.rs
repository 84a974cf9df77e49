//! reqwest-backed option fetcher for the vehicle lookup API.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Make, MakeId, Model, ModelId, TypeId, Vehicle, VehicleType, YearModel},
    protocol::{decode_page, Page, Record},
};
use tracing::{debug, warn};
use url::Url;

use crate::{
    fetcher::{FetchError, LogoLookup, OptionFetcher},
    settings::Settings,
};

const MAX_PAGES: u32 = 200;

pub struct HttpOptionFetcher {
    http: Client,
    base_url: Url,
    page_size: u32,
}

impl HttpOptionFetcher {
    pub fn new(settings: &Settings) -> Result<Self, FetchError> {
        Self::with_client(Client::new(), settings)
    }

    pub fn with_client(http: Client, settings: &Settings) -> Result<Self, FetchError> {
        Ok(Self {
            http,
            base_url: parse_base_url(&settings.api_base_url)?,
            page_size: settings.page_size.max(1),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, FetchError> {
        self.base_url
            .join(path)
            .map_err(|err| FetchError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: err.to_string(),
            })
    }

    /// Collect every page of a list endpoint, in server order.
    async fn fetch_all<T>(&self, path: &str, params: &[(&str, String)]) -> Result<Vec<T>, FetchError>
    where
        T: Record + DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let size = self.page_size.to_string();
        let mut items = Vec::new();
        let mut page_number = 1u32;

        loop {
            let res = self
                .http
                .get(url.clone())
                .query(params)
                .query(&[("page", page_number.to_string()), ("size", size.clone())])
                .send()
                .await?;

            if res.status() == StatusCode::NOT_FOUND && page_number == 1 {
                debug!(%url, "lookup returned 404; treating as no options");
                break;
            }
            if !res.status().is_success() {
                return Err(FetchError::Status(res.status().as_u16()));
            }

            let body = res.bytes().await?;
            let page: Page<T> = decode_page(&body)?;
            let more = page.has_more_after(page_number) && !page.items.is_empty();
            items.extend(page.items);
            if !more {
                break;
            }
            if page_number >= MAX_PAGES {
                warn!(%url, pages = page_number, "stopping pagination at page limit");
                break;
            }
            page_number += 1;
        }

        debug!(%url, count = items.len(), "fetched option list");
        Ok(items)
    }
}

#[async_trait]
impl OptionFetcher for HttpOptionFetcher {
    async fn makes(&self) -> Result<Vec<Make>, FetchError> {
        self.fetch_all("vehicles/makes", &[]).await
    }

    async fn types(&self, make: &MakeId) -> Result<Vec<VehicleType>, FetchError> {
        self.fetch_all("vehicles/types", &[("mk", make.to_string())])
            .await
    }

    async fn models(
        &self,
        make: &MakeId,
        vehicle_type: &TypeId,
    ) -> Result<Vec<Model>, FetchError> {
        self.fetch_all(
            "vehicles/models",
            &[("mk", make.to_string()), ("t", vehicle_type.to_string())],
        )
        .await
    }

    async fn year_models(
        &self,
        make: &MakeId,
        vehicle_type: &TypeId,
        model: &ModelId,
    ) -> Result<Vec<YearModel>, FetchError> {
        self.fetch_all(
            "vehicles/years",
            &[
                ("mk", make.to_string()),
                ("t", vehicle_type.to_string()),
                ("mdl", model.to_string()),
            ],
        )
        .await
    }

    async fn vehicles(
        &self,
        make: &MakeId,
        vehicle_type: &TypeId,
        model: &ModelId,
        year: i32,
    ) -> Result<Vec<Vehicle>, FetchError> {
        self.fetch_all(
            "vehicles/stock",
            &[
                ("mk", make.to_string()),
                ("t", vehicle_type.to_string()),
                ("mdl", model.to_string()),
                ("y", year.to_string()),
            ],
        )
        .await
    }
}

impl LogoLookup for HttpOptionFetcher {
    fn logo_url(&self, make: &MakeId) -> Option<Url> {
        let mut url = self.base_url.join("logo/").ok()?;
        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .push(make.as_str());
        Some(url)
    }
}

/// Parse the configured base URL, forcing a trailing slash so endpoint paths join under it.
pub fn parse_base_url(raw: &str) -> Result<Url, FetchError> {
    let invalid = |reason: String| FetchError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };

    let mut url = Url::parse(raw.trim()).map_err(|err| invalid(err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

#[cfg(test)]
#[path = "tests/http_tests.rs"]
mod tests;
