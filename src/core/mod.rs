pub mod engine;
pub mod loader;
pub mod page;
pub mod render;
pub mod view;

pub use crate::domain::model::{Page, Selection, SiteOptions, SortMode, Vehicle, VehicleId};
pub use crate::domain::ports::{CatalogSource, ConfigProvider, Storage};
pub use crate::utils::error::Result;
