//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant where a core parse can fail inside them.

use thiserror::Error;

/// Errors produced while interpreting core values from user input.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown transit mode {0:?}: expected \"walk\", \"drive\", \"other\" or \"all\"")]
    UnknownMode(String),

    #[error("invalid coordinate ({lat}, {lon}): latitude must be within ±90 and longitude within ±180")]
    InvalidCoordinate { lat: f32, lon: f32 },
}

/// Shorthand result type for `rt-core`.
pub type CoreResult<T> = Result<T, CoreError>;
