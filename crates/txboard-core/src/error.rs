//! Error types for txboard-core
//!
//! Error codes, severity levels and detailed messages with suggestions for
//! everything the board can fail at: missing identity, bad month keys,
//! empty selections and store failures.

use thiserror::Error;
use serde::{Deserialize, Serialize};
use txboard_store::StoreError;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// No current user identity
    NoUser,
    /// Month key is not YYYY-MM
    InvalidMonth,
    /// Bulk action with nothing selected
    EmptySelection,
    /// Transaction list could not be fetched
    FetchFailed,
    /// Delete request was rejected or failed
    DeleteFailed,
    /// Configuration error
    ConfigError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::NoUser => write!(f, "NO_USER"),
            ErrorCode::InvalidMonth => write!(f, "INVALID_MONTH"),
            ErrorCode::EmptySelection => write!(f, "EMPTY_SELECTION"),
            ErrorCode::FetchFailed => write!(f, "FETCH_FAILED"),
            ErrorCode::DeleteFailed => write!(f, "DELETE_FAILED"),
            ErrorCode::ConfigError => write!(f, "CONFIG_ERROR"),
        }
    }
}

/// Detailed error information for API responses
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

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
            ErrorSeverity::Critical => write!(f, "critical"),
        }
    }
}

impl ErrorSeverity {
    /// Log level errors of this severity are reported at
    pub fn level(&self) -> log::Level {
        match self {
            ErrorSeverity::Info => log::Level::Info,
            ErrorSeverity::Warning => log::Level::Warn,
            ErrorSeverity::Error | ErrorSeverity::Critical => log::Level::Error,
        }
    }
}

/// Main error type for txboard-core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("No current user")]
    NoUser,

    #[error("Invalid month: {value}")]
    InvalidMonth { value: String },

    #[error("No transactions selected")]
    EmptySelection,

    #[error("Error fetching transactions: {source}")]
    Fetch { source: StoreError },

    #[error("Error deleting transactions: {source}")]
    Delete { ids: Vec<String>, source: StoreError },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::NoUser => ErrorCode::NoUser,
            CoreError::InvalidMonth { .. } => ErrorCode::InvalidMonth,
            CoreError::EmptySelection => ErrorCode::EmptySelection,
            CoreError::Fetch { .. } => ErrorCode::FetchFailed,
            CoreError::Delete { .. } => ErrorCode::DeleteFailed,
            CoreError::ConfigError { .. } => ErrorCode::ConfigError,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::NoUser => ErrorSeverity::Info,
            CoreError::InvalidMonth { .. } => ErrorSeverity::Warning,
            CoreError::EmptySelection => ErrorSeverity::Warning,
            CoreError::Fetch { .. } => ErrorSeverity::Error,
            CoreError::Delete { .. } => ErrorSeverity::Error,
            CoreError::ConfigError { .. } => ErrorSeverity::Critical,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::InvalidMonth { value } => {
                details = details.with_detail(serde_json::json!({ "month": value }));
                details = details.with_suggestion("Use the YYYY-MM format, e.g. 2024-03.".to_string());
            }
            CoreError::EmptySelection => {
                details = details.with_suggestion(
                    "Select at least one transaction before deleting.".to_string()
                );
            }
            CoreError::Fetch { source } => {
                if matches!(source, StoreError::Unauthorized { .. }) {
                    details = details.with_suggestion("Check store.api_key in your config.".to_string());
                }
                details = details.with_suggestion("Reload the list to try again.".to_string());
            }
            CoreError::Delete { ids, .. } => {
                details = details.with_detail(serde_json::json!({ "ids": ids }));
                details = details.with_suggestion(
                    "The selection was kept; click delete again to retry.".to_string()
                );
            }
            _ => {}
        }

        details
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

/// Error context for reporting
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Operation being performed
    pub operation: String,
    /// Owner the operation ran for
    pub owner_id: Option<String>,
}

impl ErrorContext {
    pub fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
            owner_id: None,
        }
    }

    pub fn with_owner(mut self, owner_id: Option<&str>) -> Self {
        self.owner_id = owner_id.map(str::to_string);
        self
    }
}

/// Error logger trait
pub trait ErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext);
}

/// Default error logger using log crate
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext) {
        let severity = error.severity();
        log::log!(
            target: "txboard::error",
            severity.level(),
            "{} [{}] {} - Operation: {} - Owner: {:?}",
            severity.to_string().to_uppercase(),
            error.code(),
            error.to_details(),
            context.operation,
            context.owner_id
        );
    }
}

// ==================== Tests ====================
