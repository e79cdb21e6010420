//! Error types for the folder dialog
//!
//! Provides error handling for:
//! - Gateway failures (structured application errors vs. opaque ones)
//! - Dialog misuse after unmount and illegal phase changes
//! - Configuration loading

use crate::state_machine::DialogPhase;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Machine-readable code carried by a structured application error
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AppErrorCode {
    /// Resource with the same identity already exists
    AlreadyExists,
    /// Referenced resource does not exist
    NotFound,
    /// Caller is not allowed to perform the action
    Unauthorized,
    /// Request payload was rejected
    InvalidRequest,
    /// Plan or quota limit reached
    LimitExceeded,
    /// Rate limited
    TooManyRequests,
    /// Server could not classify the failure
    UnknownError,
    /// Any code this client does not know about
    Unrecognized(String),
}

impl AppErrorCode {
    /// Wire representation (`SCREAMING_SNAKE_CASE`)
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::AlreadyExists => "ALREADY_EXISTS",
            Self::NotFound => "NOT_FOUND",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::LimitExceeded => "LIMIT_EXCEEDED",
            Self::TooManyRequests => "TOO_MANY_REQUESTS",
            Self::UnknownError => "UNKNOWN_ERROR",
            Self::Unrecognized(code) => code,
        }
    }
}

impl From<&str> for AppErrorCode {
    fn from(value: &str) -> Self {
        match value {
            "ALREADY_EXISTS" => Self::AlreadyExists,
            "NOT_FOUND" => Self::NotFound,
            "UNAUTHORIZED" => Self::Unauthorized,
            "INVALID_REQUEST" => Self::InvalidRequest,
            "LIMIT_EXCEEDED" => Self::LimitExceeded,
            "TOO_MANY_REQUESTS" => Self::TooManyRequests,
            "UNKNOWN_ERROR" => Self::UnknownError,
            other => Self::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for AppErrorCode {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<AppErrorCode> for String {
    fn from(value: AppErrorCode) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for AppErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured application error reported by the remote service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppError {
    /// Error code
    pub code: AppErrorCode,
    /// Server-side message, never shown to the user directly
    #[serde(default)]
    pub message: Option<String>,
}

impl AppError {
    /// Create an application error
    #[inline]
    #[must_use]
    pub fn new(code: AppErrorCode) -> Self {
        Self {
            code,
            message: None,
        }
    }

    /// With server message
    #[inline]
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: {message}", self.code),
            None => write!(f, "{}", self.code),
        }
    }
}

/// Failure returned by a creation gateway
///
/// Never shown as-is; always passed through the error classifier first.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// Error the service reported with a machine-readable code
    #[error("application error: {0}")]
    Structured(AppError),

    /// Anything else (transport failures, malformed responses)
    #[error("opaque gateway failure: {0}")]
    Opaque(String),
}

impl GatewayError {
    /// Structured error with the given code
    #[inline]
    #[must_use]
    pub fn app(code: AppErrorCode) -> Self {
        Self::Structured(AppError::new(code))
    }

    /// Opaque error with a description
    #[inline]
    pub fn opaque(description: impl Into<String>) -> Self {
        Self::Opaque(description.into())
    }

    /// Application error code, if structured
    #[inline]
    #[must_use]
    pub fn code(&self) -> Option<&AppErrorCode> {
        match self {
            Self::Structured(err) => Some(&err.code),
            Self::Opaque(_) => None,
        }
    }
}

impl From<AppError> for GatewayError {
    fn from(value: AppError) -> Self {
        Self::Structured(value)
    }
}

/// Illegal dialog phase change
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StateMachineError {
    /// Transition not in the dialog's transition table
    #[error("illegal transition: {from:?} -> {to:?}")]
    IllegalTransition {
        /// Phase before
        from: DialogPhase,
        /// Requested phase
        to: DialogPhase,
    },
}

/// Dialog controller errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DialogError {
    /// Controller was unmounted; no further effects are allowed
    #[error("dialog has been unmounted")]
    Unmounted,

    /// Phase change rejected by the transition table
    #[error("state machine error: {0}")]
    StateMachine(#[from] StateMachineError),
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for this schema
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config could not be rendered
    #[error("failed to render config: {0}")]
    Render(#[from] toml::ser::Error),

    /// Parsed but semantically invalid
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_error_code_round_trips_known_and_unknown() {
        assert_eq!(AppErrorCode::from("ALREADY_EXISTS"), AppErrorCode::AlreadyExists);
        assert_eq!(
            AppErrorCode::from("SCHEMA_FAILED"),
            AppErrorCode::Unrecognized("SCHEMA_FAILED".to_string())
        );
        assert_eq!(AppErrorCode::Unrecognized("X".into()).as_str(), "X");
    }

    #[test]
    fn gateway_error_display() {
        let err = GatewayError::Structured(
            AppError::new(AppErrorCode::NotFound).with_message("parent missing"),
        );
        assert_eq!(err.to_string(), "application error: NOT_FOUND: parent missing");
        assert!(GatewayError::opaque("timeout").to_string().contains("timeout"));
    }

    #[test]
    fn gateway_error_code() {
        assert_eq!(
            GatewayError::app(AppErrorCode::AlreadyExists).code(),
            Some(&AppErrorCode::AlreadyExists)
        );
        assert_eq!(GatewayError::opaque("x").code(), None);
    }

    #[test]
    fn dialog_error_from_state_machine() {
        let err: DialogError = StateMachineError::IllegalTransition {
            from: DialogPhase::Closed,
            to: DialogPhase::Submitting,
        }
        .into();
        assert!(err.to_string().contains("Closed"));
    }
}
