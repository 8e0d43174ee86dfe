//! Pagination error types.

use thiserror::Error;

/// Errors that can occur while reading pages and cursors
#[derive(Debug, Error)]
pub enum PageError {
    /// A continuation cursor was present but empty
    #[error("Cursor must not be empty")]
    EmptyCursor,

    /// The page body was not valid JSON or did not match the page shape
    #[error("Page decoding failed: {0}")]
    Decode(#[from] serde_json::Error),
}
