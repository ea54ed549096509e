//! Error types for reading sessions and the narrative collaborator.

use thiserror::Error;

/// Result type for session operations.
pub type ReadingResult<T> = Result<T, ReadingError>;

/// Result type for narrative requests.
pub type NarrativeResult<T> = Result<T, NarrativeError>;

/// Errors that can occur while driving a reading session.
#[derive(Debug, Error)]
pub enum ReadingError {
    /// No reading has been started (or it was reset).
    #[error("no active reading")]
    NoActiveReading,

    /// A reveal targeted a position outside the spread.
    #[error("position {index} is out of range for a spread of {len} cards")]
    InvalidPosition {
        /// The requested position.
        index: usize,
        /// Number of positions in the active spread.
        len: usize,
    },

    /// A reading was started outside a Tokio runtime, so the narrative
    /// request could not be scheduled.
    #[error("no async runtime available to request the narrative")]
    NoRuntime,

    /// The spread or draw was rejected by the draw engine.
    #[error(transparent)]
    Tarot(#[from] tarot_core::TarotError),
}

/// Failures of the narrative-generation collaborator.
#[derive(Debug, Error)]
pub enum NarrativeError {
    /// Required configuration (such as the API key) is missing.
    #[error("narrative service not configured: {0}")]
    NotConfigured(&'static str),

    /// The HTTP request could not be sent or its body could not be read.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// Response status code.
        status: reqwest::StatusCode,
        /// Response body, for diagnostics.
        body: String,
    },

    /// The response body was not the expected JSON shape.
    #[error("JSON decode failed: {0}")]
    Json(#[from] serde_json::Error),

    /// The service answered successfully but without any text.
    #[error("empty response")]
    EmptyResponse,

    /// The background request ended without producing a result.
    #[error("narrative task ended without a result")]
    TaskEnded,
}
