//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Only boundary parsing can fail in this domain: ledger mutations themselves
/// are total and degrade to "no change" instead of erroring.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A product key that is not part of the catalog.
    #[error("unknown product: {0}")]
    UnknownProduct(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn unknown_product(key: impl Into<String>) -> Self {
        Self::UnknownProduct(key.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        assert_eq!(
            DomainError::unknown_product("sopaipillas").to_string(),
            "unknown product: sopaipillas"
        );
        assert_eq!(
            DomainError::validation("empty").to_string(),
            "validation failed: empty"
        );
    }
}
