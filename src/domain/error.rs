use std::path::PathBuf;
use thiserror::Error;

/// Schemy unified error type
#[derive(Error, Debug)]
pub enum SchemyError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Output path {} already exists", path.display())]
    OutputExists { path: PathBuf },

    #[error("Output path {} is a directory", path.display())]
    OutputIsDirectory { path: PathBuf },

    #[error("Output directory {} does not exist", path.display())]
    OutputDirectoryNotFound { path: PathBuf },

    #[error("Airtable API error (HTTP {status}, {kind}): {message}")]
    Api {
        status: u16,
        kind: String,
        message: String,
    },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to write output file {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("created new configuration file with default values; please edit the file and run the command again: {}", path.display())]
    ConfigCreated { path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SchemyResult<T> = Result<T, SchemyError>;
