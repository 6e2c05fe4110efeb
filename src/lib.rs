pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::cli::LocalStorage;
#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use core::engine::{PageStatus, RenderedPage, SiteEngine};
pub use core::loader::{HttpCatalogSource, StorageCatalogSource};
pub use core::page::{DetailPage, DetailState, GridPage, GridState};
pub use utils::error::{CatalogError, Result};
