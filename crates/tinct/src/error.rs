#![forbid(unsafe_code)]

//! Top-level error type for tinct consumers.

use thiserror::Error;
use tinct_color::InvalidColorError;
use tinct_theme::SchemaViolationError;

/// Any failure surfaced by the theming engine.
///
/// Every failure is reported synchronously to the caller; nothing inside the
/// engine retries, logs-and-swallows, or partially applies.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A malformed color input to a color operation.
    #[error(transparent)]
    InvalidColor(#[from] InvalidColorError),
    /// A submitted settings tree that fails boundary validation.
    #[error(transparent)]
    SchemaViolation(#[from] SchemaViolationError),
}
