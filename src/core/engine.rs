use crate::core::loader::catalog_source_for;
use crate::core::page::{DetailPage, DetailState, GridPage, GridState};
use crate::domain::model::Page;
use crate::domain::ports::{CatalogSource, ConfigProvider, Storage};
use crate::utils::error::Result;
use crate::utils::validation::validate_page_marker;
use reqwest::Client;

/// Final state of a page session, whichever flow ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    Ready,
    Shown,
    NotFound,
    MissingParam,
    Error,
}

impl PageStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Ready | Self::Shown)
    }

    /// CLI exit code: 0 rendered, 2 user-facing miss, 1 load failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Ready | Self::Shown => 0,
            Self::NotFound | Self::MissingParam => 2,
            Self::Error => 1,
        }
    }
}

impl From<GridState> for PageStatus {
    fn from(state: GridState) -> Self {
        match state {
            GridState::Ready => Self::Ready,
            // Loading 只會在 load 之前出現，視同失敗
            GridState::Loading | GridState::Error => Self::Error,
        }
    }
}

impl From<DetailState> for PageStatus {
    fn from(state: DetailState) -> Self {
        match state {
            DetailState::Shown => Self::Shown,
            DetailState::NotFound => Self::NotFound,
            DetailState::MissingParam => Self::MissingParam,
            DetailState::Loading | DetailState::Error => Self::Error,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub page: Page,
    pub status: PageStatus,
    pub file_name: String,
    pub output_path: String,
    pub markup: String,
    /// 頁面顯示錯誤訊息時給使用者的下一步建議
    pub hint: Option<&'static str>,
}

/// Runs one page session from configuration and publishes its markup.
pub struct SiteEngine<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
}

impl<S: Storage, C: ConfigProvider> SiteEngine<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            client: Client::new(),
        }
    }

    pub async fn run(&self) -> Result<RenderedPage> {
        let source = catalog_source_for(self.config.catalog_source(), self.client.clone());
        self.run_with_source(source.as_ref()).await
    }

    pub async fn run_with_source(&self, source: &dyn CatalogSource) -> Result<RenderedPage> {
        let page = validate_page_marker("page", self.config.page_marker())?;
        let options = self.config.site_options();
        tracing::info!("Rendering '{}' page from {}", page.marker(), source.location());

        let (status, file_name, markup, hint) = match page {
            Page::Catalog => {
                let mut grid = GridPage::open(source, options.clone()).await;
                let selection = self.config.selection();
                if !selection.is_default() {
                    grid.apply(selection);
                }
                (
                    PageStatus::from(grid.state()),
                    options.grid_page.clone(),
                    grid.render_surface(),
                    None,
                )
            }
            Page::Car => {
                let detail = DetailPage::open(source, self.config.query(), &options).await;
                (
                    PageStatus::from(detail.state()),
                    options.detail_page.clone(),
                    detail.render_surface(),
                    detail.error().map(|e| e.recovery_suggestion()),
                )
            }
        };

        tracing::debug!("Writing {} bytes to {}", markup.len(), file_name);
        self.storage.write_file(&file_name, markup.as_bytes()).await?;

        let output_path = format!("{}/{}", self.config.output_path(), file_name);
        tracing::info!("Page status {:?}, saved to {}", status, output_path);

        Ok(RenderedPage {
            page,
            status,
            file_name,
            output_path,
            markup,
            hint,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::{DETAIL_NOT_FOUND_MESSAGE, GRID_LOAD_ERROR_MESSAGE};
    use crate::domain::model::{Selection, SiteOptions, SortMode};
    use crate::utils::error::CatalogError;
    use httpmock::prelude::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                CatalogError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        catalog_source: String,
        page: String,
        selection: Selection,
        query: String,
    }

    impl MockConfig {
        fn new(catalog_source: String, page: &str) -> Self {
            Self {
                catalog_source,
                page: page.to_string(),
                selection: Selection::default(),
                query: String::new(),
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn catalog_source(&self) -> &str {
            &self.catalog_source
        }

        fn output_path(&self) -> &str {
            "test_output"
        }

        fn page_marker(&self) -> &str {
            &self.page
        }

        fn selection(&self) -> Selection {
            self.selection.clone()
        }

        fn query(&self) -> &str {
            &self.query
        }
    }

    fn mock_listing(server: &MockServer) -> httpmock::Mock<'_> {
        server.mock(|when, then| {
            when.method(GET).path("/data/cars.json");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([
                    {"id": 1, "brand": "Toyota", "model": "Prius", "year": 2019, "odometer": 61000,
                     "engine": "1.8L Hybrid", "drive": "FWD", "location": "Tbilisi",
                     "status": "In stock", "price": 12000, "vin": "JTDKN3DU0K0000001"},
                    {"id": 2, "brand": "BMW", "model": "X3", "year": 2021, "odometer": 24000,
                     "engine": "2.0L", "drive": "AWD", "location": "Poti",
                     "status": "In transit", "price": 25000, "vin": "5UXTY5C00M0000002"}
                ]));
        })
    }

    #[tokio::test]
    async fn test_catalog_page_applies_configured_selection() {
        let server = MockServer::start();
        let api_mock = mock_listing(&server);

        let mut config = MockConfig::new(server.url("/data/cars.json"), "catalog");
        config.selection = Selection::from_controls("", "", SortMode::PriceDesc);

        let storage = MockStorage::new();
        let engine = SiteEngine::new(storage.clone(), config);
        let rendered = engine.run().await.unwrap();

        api_mock.assert();
        assert_eq!(rendered.page, Page::Catalog);
        assert_eq!(rendered.status, PageStatus::Ready);
        assert_eq!(rendered.output_path, "test_output/cars.html");
        assert!(rendered.hint.is_none());

        let bmw_at = rendered.markup.find("BMW X3").unwrap();
        let toyota_at = rendered.markup.find("Toyota Prius").unwrap();
        assert!(bmw_at < toyota_at);

        let stored = storage.get_file("cars.html").await.unwrap();
        assert_eq!(String::from_utf8(stored).unwrap(), rendered.markup);
    }

    #[tokio::test]
    async fn test_catalog_page_server_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/data/cars.json");
            then.status(500);
        });

        let config = MockConfig::new(server.url("/data/cars.json"), "catalog");
        let engine = SiteEngine::new(MockStorage::new(), config);
        let rendered = engine.run().await.unwrap();

        assert_eq!(rendered.status, PageStatus::Error);
        assert!(!rendered.status.is_success());
        assert_eq!(rendered.status.exit_code(), 1);
        assert!(rendered.markup.contains(GRID_LOAD_ERROR_MESSAGE));
    }

    #[tokio::test]
    async fn test_car_page_not_found() {
        let server = MockServer::start();
        mock_listing(&server);

        let mut config = MockConfig::new(server.url("/data/cars.json"), "car");
        config.query = "?id=99".to_string();

        let storage = MockStorage::new();
        let engine = SiteEngine::new(storage.clone(), config);
        let rendered = engine.run().await.unwrap();

        assert_eq!(rendered.status, PageStatus::NotFound);
        assert_eq!(rendered.file_name, SiteOptions::default().detail_page);
        assert!(rendered.markup.contains(DETAIL_NOT_FOUND_MESSAGE));
        assert!(storage.get_file("car.html").await.is_some());
        assert_eq!(rendered.hint, Some("Pick an id that exists in the listing"));
    }

    #[tokio::test]
    async fn test_car_page_missing_id_has_hint() {
        let config = MockConfig::new("http://127.0.0.1:9/data/cars.json".to_string(), "car");
        let engine = SiteEngine::new(MockStorage::new(), config);
        let rendered = engine.run().await.unwrap();

        assert_eq!(rendered.status, PageStatus::MissingParam);
        assert_eq!(rendered.status.exit_code(), 2);
        assert_eq!(rendered.hint, Some("Pass the vehicle id, e.g. --query 'id=42'"));
    }

    #[tokio::test]
    async fn test_unknown_page_marker_is_config_error() {
        let config = MockConfig::new("data/cars.json".to_string(), "home");
        let engine = SiteEngine::new(MockStorage::new(), config);

        let err = engine.run().await.unwrap_err();
        assert!(err.is_config_error());
    }
}
