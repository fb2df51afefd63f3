use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FfxiError {
    #[error("Failed to read input {path:?}: {source}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse input {path:?}: {source}")]
    ParseInput {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write output {path:?}: {source}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FfxiError>;
