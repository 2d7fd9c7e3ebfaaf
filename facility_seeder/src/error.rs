use shared::error::{ConfigError, InitializationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error(transparent)]
    Init(#[from] InitializationError),
    #[error("failed to read seed file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("seed file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("seed data violates facility rules: {}", .0.join("; "))]
    Invalid(Vec<String>),
    #[error("db error: {0}")]
    Db(#[from] sqlx::Error),
}

impl From<ConfigError> for SeedError {
    fn from(e: ConfigError) -> Self {
        Self::Init(InitializationError::Config(e))
    }
}
