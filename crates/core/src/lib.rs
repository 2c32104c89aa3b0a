#![forbid(unsafe_code)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod model;
pub mod navigation;
pub mod routes;
pub mod time;

pub use catalog::{Catalog, CatalogError};
pub use config::{AppConfig, AppConfigDraft, ConfigError, ProgressPolicy};
pub use error::Error;
pub use time::Clock;
