use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::model::{ModuleError, PercentError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Module(#[from] ModuleError),
    #[error(transparent)]
    Percent(#[from] PercentError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
