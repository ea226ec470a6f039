//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read site config `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid folio.toml: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("folio.toml: {0}")]
    Validation(String),
}
