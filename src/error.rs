use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by the fetch client. Every variant is recoverable by
/// calling again; none of them escape the client as a panic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("API key not configured")]
    Unauthenticated,

    #[error("request failed: {0}")]
    Transport(String),

    #[error("{0}")]
    RemoteRejected(String),

    #[error("No user data returned")]
    EmptyResult,
}

#[derive(Error, Debug)]
pub enum ViewerError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to write config file at {path}: {source}")]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Issue not found: {0}")]
    IssueNotFound(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

pub type Result<T> = std::result::Result<T, ViewerError>;
