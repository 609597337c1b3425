//! CLI error types.

use vita_config::ConfigError;
use vita_data::DataError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Data(#[from] DataError),

    #[error("{0}")]
    Validation(String),
}
