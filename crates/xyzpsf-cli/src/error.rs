use std::path::PathBuf;
use thiserror::Error;
use xyzpsf::core::masses::MassTableLoadError;
use xyzpsf::workflows::convert::ConvertError;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] ConvertError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load mass table: {0}")]
    MassTable(#[from] MassTableLoadError),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
