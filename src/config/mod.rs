pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::loader::DEFAULT_CATALOG_LOCATION;
#[cfg(feature = "cli")]
use crate::domain::model::{Selection, SortMode};
#[cfg(feature = "cli")]
use crate::domain::ports::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "car-catalog")]
#[command(about = "Render the vehicle catalog grid or a single car page")]
pub struct CliConfig {
    /// Listing location: an http(s) URL or a local JSON file
    #[arg(long, default_value = DEFAULT_CATALOG_LOCATION)]
    pub source: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// Page marker: `catalog` or `car`
    #[arg(long, default_value = "catalog")]
    pub page: String,

    #[arg(long, default_value = "")]
    pub brand: String,

    #[arg(long, default_value = "")]
    pub year: String,

    /// none, price-asc or price-desc
    #[arg(long, default_value = "none")]
    pub sort: SortMode,

    /// URL query string of the car page, e.g. `?id=42`
    #[arg(long, default_value = "")]
    pub query: String,

    #[arg(long, help = "Also print the rendered markup to stdout")]
    pub stdout: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn catalog_source(&self) -> &str {
        &self.source
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn page_marker(&self) -> &str {
        &self.page
    }

    fn selection(&self) -> Selection {
        Selection::from_controls(&self.brand, &self.year, self.sort)
    }

    fn query(&self) -> &str {
        &self.query
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_source_location("source", &self.source)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_page_marker("page", &self.page)?;
        Ok(())
    }
}
