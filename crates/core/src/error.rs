//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every failure in this system is a deterministic rejection of user input;
/// there is no IO underneath the domain layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. a required form field was left empty).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A conflict with existing state (e.g. a barcode already in use).
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Text suitable for a user-facing notification.
    pub fn user_message(&self) -> String {
        match self {
            DomainError::Validation(msg) | DomainError::Conflict(msg) => msg.clone(),
            DomainError::InvalidId(msg) => format!("Invalid id: {msg}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_strips_the_error_prefix() {
        let err = DomainError::conflict("This barcode already exists!");
        assert_eq!(err.to_string(), "conflict: This barcode already exists!");
        assert_eq!(err.user_message(), "This barcode already exists!");
    }

    #[test]
    fn invalid_id_names_the_problem() {
        let err = "abc".parse::<crate::MedicineId>().unwrap_err();
        assert!(err.user_message().starts_with("Invalid id: MedicineId"));
    }
}
