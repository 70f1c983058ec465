//! # UI Error Types
//!
//! Only two situations surface as `Err`: malformed configuration at
//! construction time, and out-of-range index operations. Everything else a
//! widget can get wrong per frame (duplicate child insert, scroll overshoot,
//! key input without focus) is absorbed locally so the render loop never
//! halts on a widget fault.

use thiserror::Error;

/// Errors that can surface from the UI core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UiError {
    /// Malformed theme or layout parameters at construction.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Out-of-range option or selection index.
    #[error("index {index} out of range: {len} options")]
    InvalidIndex {
        /// The rejected index.
        index: usize,
        /// Number of options present.
        len: usize,
    },
}

/// Result type for UI operations.
pub type UiResult<T> = Result<T, UiError>;
