//! Content API wire structures.

use serde::Deserialize;

/// Error body returned by the content API.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    /// Human readable error.
    pub error: String,
}
