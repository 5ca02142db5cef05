//! Crate-wide error types
//!
//! `CoreError` captures the failure patterns shared across modules: coded
//! business failures, validation problems, bad arguments, and missing
//! resources. Module-specific errors (for example
//! [`SnowflakeError`](crate::snowflake::SnowflakeError)) stay local to their
//! module and compose with `CoreError` at the call site when needed.
//!
//! Every error exposes a stable machine-readable code via
//! [`CoreError::code`]; messages are for humans and may change freely.

use thiserror::Error;

/// Result alias using [`CoreError`].
pub type CoreResult<T> = Result<T, CoreError>;

/// Stock error codes used by the non-business variants.
pub mod codes {
    /// Input failed a validation rule.
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    /// A caller-supplied argument was unusable.
    pub const INVALID_ARGUMENT: &str = "INVALID_ARGUMENT";
    /// The requested resource does not exist.
    pub const DATA_NOT_FOUND: &str = "DATA_NOT_FOUND";
    /// A domain rule rejected the operation.
    pub const BUSINESS_RULE_ERROR: &str = "BUSINESS_RULE_ERROR";
}

/// Common error type for Keystone services.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A coded business failure; the code travels with the message.
    #[error("[{code}] {message}")]
    Business {
        /// Stable machine-readable code.
        code: String,
        /// Human-readable description.
        message: String,
    },

    /// Input failed validation.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A caller-supplied argument was unusable.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),
}

impl CoreError {
    /// Create a coded business error.
    pub fn business(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Business { code: code.into(), message: message.into() }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an invalid-argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create a not-found error.
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound(resource.into())
    }

    /// The stable code for this error.
    pub fn code(&self) -> &str {
        match self {
            Self::Business { code, .. } => code,
            Self::Validation(_) => codes::VALIDATION_ERROR,
            Self::InvalidArgument(_) => codes::INVALID_ARGUMENT,
            Self::NotFound(_) => codes::DATA_NOT_FOUND,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for error.
    use super::*;

    /// Validates `CoreError::business` behavior for the code and display
    /// scenario.
    ///
    /// Assertions:
    /// - Confirms `error.code()` equals the supplied code.
    /// - Confirms the display string carries both code and message.
    #[test]
    fn test_business_error_code_and_display() {
        let error = CoreError::business("QUOTA_EXCEEDED", "monthly quota exhausted");

        assert_eq!(error.code(), "QUOTA_EXCEEDED");
        assert_eq!(error.to_string(), "[QUOTA_EXCEEDED] monthly quota exhausted");
    }

    /// Validates stock codes for the non-business variants.
    #[test]
    fn test_stock_codes() {
        assert_eq!(CoreError::validation("bad email").code(), codes::VALIDATION_ERROR);
        assert_eq!(CoreError::invalid_argument("page 0").code(), codes::INVALID_ARGUMENT);
        assert_eq!(CoreError::not_found("user 42").code(), codes::DATA_NOT_FOUND);
    }
}
