//! Structured error types for the Pennant layout engine.
//!
//! A failure here is either a genuine input error (unknown template, unknown
//! border style, missing page) or a render-time problem. Degraded-capability
//! paths — missing text metrics, malformed colors — are handled with
//! fallbacks at the call site and never surface as errors.

use thiserror::Error;

/// The unified error type returned by all public Pennant API functions.
#[derive(Debug, Error)]
pub enum PennantError {
    /// JSON input failed to parse as a valid banner.
    #[error("failed to parse banner: {0}")]
    Parse(#[from] serde_json::Error),

    /// No built-in template with the given id.
    #[error("unknown template \"{0}\"")]
    UnknownTemplate(String),

    /// No border style with the given id in the catalog.
    #[error("unknown border style \"{0}\"")]
    UnknownBorderStyle(String),

    /// An element was addressed to a page that does not exist. The mutator
    /// contract guarantees pages are created before elements are appended,
    /// so hitting this is a programming error in the caller.
    #[error("page {0} not found")]
    PageNotFound(u32),

    /// Output generation failed.
    #[error("render failed: {0}")]
    Render(String),
}
