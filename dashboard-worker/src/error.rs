//! Error types for the dashboard worker
//!
//! Uses thiserror for ergonomic error definitions.
//! Fetch failures never reach the page: they are folded into a
//! [`Placeholder`] and rendered as "Error" or "No Data".

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Custom Result type using our Error
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Dashboard errors
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network / transport errors
    #[error("HTTP error: {0}")]
    Http(String),

    /// Non-2xx response from the statistics API
    #[error("Statistics API error: HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// The statistics API answered `success: false`
    #[error("Statistics API reported failure: {0}")]
    Upstream(String),

    /// Body decoded but did not have the expected shape
    #[error("Malformed payload: {0}")]
    Payload(String),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Valid response without data for the requested day or feed
    #[error("No data: {0}")]
    NoData(String),

    /// Worker runtime errors
    #[error("Worker error: {0}")]
    Worker(String),

    /// Snapshot storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Text shown in every field that depends on a failed feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placeholder {
    Error,
    NoData,
}

impl Placeholder {
    pub fn text(self) -> &'static str {
        match self {
            Placeholder::Error => "Error",
            Placeholder::NoData => "No Data",
        }
    }
}

impl DashboardError {
    /// Placeholder a display field shows for this error
    pub fn placeholder(&self) -> Placeholder {
        match self {
            DashboardError::NoData(_) => Placeholder::NoData,
            _ => Placeholder::Error,
        }
    }
}

impl From<worker::Error> for DashboardError {
    fn from(err: worker::Error) -> Self {
        DashboardError::Worker(err.to_string())
    }
}

impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            DashboardError::Payload(err.to_string())
        } else {
            DashboardError::Http(err.to_string())
        }
    }
}

impl From<DashboardError> for worker::Error {
    fn from(err: DashboardError) -> Self {
        worker::Error::RustError(err.to_string())
    }
}
