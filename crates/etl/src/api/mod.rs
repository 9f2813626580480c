//! Loyverse REST API client.
//!
//! # API Reference
//!
//! - Base URL: `https://api.loyverse.com/v1.0`
//! - Authentication: personal access token via `Authorization: Bearer <key>`
//! - Pagination: collections return at most `limit` items plus a `cursor`
//!   field while more pages exist; the cursor is echoed back as a query
//!   parameter to fetch the next page.
//!
//! # Architecture
//!
//! - [`Transport`] is the seam between request building and HTTP.
//!   [`HttpTransport`] is the reqwest implementation.
//! - [`Endpoint`] is generic over a [`Resource`] marker type. Generic calls
//!   (`get`, `from_id`, `create`, ...) work for every resource; filters that
//!   only exist for one collection are implemented on that marker only
//!   (see [`customers`] and [`receipts`]).
//! - [`Loyverse`] is the registry holding one endpoint per resource.

pub mod customers;
pub mod endpoint;
pub mod receipts;
pub mod registry;
pub mod resource;
pub mod transport;

pub use endpoint::Endpoint;
pub use registry::Loyverse;
pub use resource::*;
pub use transport::{HttpTransport, Query, Transport};

use thiserror::Error;

/// Errors that can occur when interacting with the Loyverse API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Unauthorized (missing or revoked API key).
    #[error("Unauthorized: {status} - check LOYVERSE_API_KEY")]
    Unauthorized { status: u16 },

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A request payload had the wrong shape.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

impl ApiError {
    /// HTTP status carried by the error, if the server answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::Unauthorized { status } => Some(*status),
            Self::NotFound(_) => Some(404),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::Parse(_) | Self::InvalidPayload(_) => None,
        }
    }

    /// Map an error status and body to the matching variant.
    pub(crate) fn from_status(status: u16, path: &str, message: String) -> Self {
        match status {
            401 | 403 => Self::Unauthorized { status },
            404 => Self::NotFound(path.to_string()),
            _ => Self::Api { status, message },
        }
    }
}
