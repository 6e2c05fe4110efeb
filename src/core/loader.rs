use crate::config::cli::LocalStorage;
use crate::domain::model::Vehicle;
use crate::domain::ports::{CatalogSource, Storage};
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::is_http_location;
use async_trait::async_trait;
use reqwest::Client;

pub const DEFAULT_CATALOG_LOCATION: &str = "data/cars.json";

pub fn parse_listing(bytes: &[u8]) -> Result<Vec<Vehicle>> {
    let listing: Vec<Vehicle> = serde_json::from_slice(bytes)?;
    Ok(listing)
}

/// Listing served over HTTP.
pub struct HttpCatalogSource {
    client: Client,
    url: String,
}

impl HttpCatalogSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), url)
    }

    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn load_listing(&self) -> Result<Vec<Vehicle>> {
        tracing::debug!("Requesting catalog from: {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        tracing::debug!("Catalog response status: {}", status);

        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        let body = response.bytes().await?;
        let listing = parse_listing(&body)?;
        tracing::debug!("Parsed {} vehicles from {}", listing.len(), self.url);
        Ok(listing)
    }

    fn location(&self) -> String {
        self.url.clone()
    }
}

/// Listing read through a [`Storage`] backend, e.g. a local `data/cars.json`.
pub struct StorageCatalogSource<S: Storage> {
    storage: S,
    path: String,
}

impl<S: Storage> StorageCatalogSource<S> {
    pub fn new(storage: S, path: impl Into<String>) -> Self {
        Self {
            storage,
            path: path.into(),
        }
    }
}

#[async_trait]
impl<S: Storage> CatalogSource for StorageCatalogSource<S> {
    async fn load_listing(&self) -> Result<Vec<Vehicle>> {
        tracing::debug!("Reading catalog from: {}", self.path);
        let bytes = self.storage.read_file(&self.path).await?;
        let listing = parse_listing(&bytes)?;
        tracing::debug!("Parsed {} vehicles from {}", listing.len(), self.path);
        Ok(listing)
    }

    fn location(&self) -> String {
        self.path.clone()
    }
}

/// http(s) 位置走網路，其餘視為相對於目前目錄的檔案
pub fn catalog_source_for(location: &str, client: Client) -> Box<dyn CatalogSource> {
    if is_http_location(location) {
        Box::new(HttpCatalogSource::with_client(client, location))
    } else {
        Box::new(StorageCatalogSource::new(
            LocalStorage::new(".".to_string()),
            location,
        ))
    }
}
