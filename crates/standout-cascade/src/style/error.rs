//! Style declaration errors.

use thiserror::Error;

/// Error returned when a static declaration cannot be compiled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleError {
    /// A property value cannot be resolved when the declaration is compiled.
    #[error("invalid declaration for '{property}': {reason}")]
    InvalidDeclaration { property: String, reason: String },
}
