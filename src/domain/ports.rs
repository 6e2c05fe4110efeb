use crate::domain::model::{Selection, SiteOptions, Vehicle};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn catalog_source(&self) -> &str;
    fn output_path(&self) -> &str;
    fn page_marker(&self) -> &str;
    fn selection(&self) -> Selection;
    fn query(&self) -> &str;

    fn site_options(&self) -> SiteOptions {
        SiteOptions::default()
    }
}

/// Where the vehicle listing comes from.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetches the full listing. Every call goes back to the source.
    async fn load_listing(&self) -> Result<Vec<Vehicle>>;

    fn location(&self) -> String;
}
