//! Error types for od-types.

use thiserror::Error;

/// Errors that can occur when working with types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// The raw identifier is not a non-negative decimal number.
    #[error("invalid player identifier {0:?}: expected a non-negative decimal number")]
    InvalidIdentifier(String),

    /// The identifier parsed, but the resulting account id is negative or
    /// does not fit the 32-bit account space.
    #[error("player identifier {raw} resolves to account id {resolved}, which is not a valid account id")]
    IdentifierOutOfRange { raw: String, resolved: i128 },
}
