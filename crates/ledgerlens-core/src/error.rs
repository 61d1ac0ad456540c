//! Error types for ledgerlens-core
//!
//! The engine only ever rejects malformed input. Empty periods, zero totals
//! and missing categories are valid, zero-valued results and never show up
//! here.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Transaction failed validation
    InvalidTransaction,
    /// Period bounds or granularity are invalid
    InvalidPeriod,
    /// Transaction source could not produce a snapshot
    SourceError,
    /// A total grew past the representable range
    AmountOverflow,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::InvalidTransaction => write!(f, "INVALID_TRANSACTION"),
            ErrorCode::InvalidPeriod => write!(f, "INVALID_PERIOD"),
            ErrorCode::SourceError => write!(f, "SOURCE_ERROR"),
            ErrorCode::AmountOverflow => write!(f, "AMOUNT_OVERFLOW"),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Operation may be affected
    Warning,
    /// Operation failed
    Error,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
        }
    }
}

/// Detailed error information for API consumers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    /// Create a new error detail
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    /// Add detail information
    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Main error type for ledgerlens-core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid transaction {id}: {reason}")]
    InvalidTransaction { id: String, reason: String },

    #[error("Invalid period: {message}")]
    InvalidPeriod { message: String },

    #[error("Transaction source error: {message}")]
    SourceError { message: String },

    #[error("Amount overflow: {message}")]
    AmountOverflow { message: String },
}

impl CoreError {
    pub(crate) fn invalid_transaction(id: impl Into<String>, reason: impl Into<String>) -> Self {
        CoreError::InvalidTransaction { id: id.into(), reason: reason.into() }
    }

    pub(crate) fn invalid_period(message: impl Into<String>) -> Self {
        CoreError::InvalidPeriod { message: message.into() }
    }

    pub(crate) fn amount_overflow(message: impl Into<String>) -> Self {
        CoreError::AmountOverflow { message: message.into() }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::InvalidTransaction { .. } => ErrorCode::InvalidTransaction,
            CoreError::InvalidPeriod { .. } => ErrorCode::InvalidPeriod,
            CoreError::SourceError { .. } => ErrorCode::SourceError,
            CoreError::AmountOverflow { .. } => ErrorCode::AmountOverflow,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::InvalidTransaction { .. } => ErrorSeverity::Error,
            CoreError::InvalidPeriod { .. } => ErrorSeverity::Warning,
            CoreError::SourceError { .. } => ErrorSeverity::Error,
            CoreError::AmountOverflow { .. } => ErrorSeverity::Error,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::InvalidTransaction { id, reason } => {
                details = details.with_detail(serde_json::json!({ "id": id, "reason": reason }));
                details = details.with_suggestion(
                    "Amounts must be non-negative; the direction is carried by the kind.".to_string()
                );
                details = details.with_suggestion(
                    "Kind must be 'income' or 'expense' and category must not be empty.".to_string()
                );
            }
            CoreError::InvalidPeriod { .. } => {
                details = details.with_suggestion(
                    "Granularity must be 'month' or 'year' and start must not be after end.".to_string()
                );
            }
            CoreError::SourceError { message } => {
                details = details.with_detail(serde_json::json!({ "source_message": message }));
                details = details.with_suggestion(
                    "Check that the transaction file exists and holds a JSON array.".to_string()
                );
            }
            CoreError::AmountOverflow { .. } => {
                details = details.with_suggestion(
                    "Look for transactions with implausibly large amounts.".to_string()
                );
            }
        }

        details
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

/// Error logger trait
pub trait ErrorLogger {
    /// Log an error raised while performing `operation`
    fn log_error(&self, error: &CoreError, operation: &str);
}

/// Default error logger using log crate
#[derive(Debug, Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &CoreError, operation: &str) {
        match error.severity() {
            ErrorSeverity::Warning => log::warn!(
                target: "ledgerlens::error",
                "WARNING [{}] {} - Operation: {}",
                error.code(),
                error,
                operation
            ),
            ErrorSeverity::Error => log::error!(
                target: "ledgerlens::error",
                "ERROR [{}] {} - Operation: {}",
                error.code(),
                error.to_details(),
                operation
            ),
        }
    }
}

// ==================== Tests ====================
