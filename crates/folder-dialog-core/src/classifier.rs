//! Error classification
//!
//! Collapses every gateway failure into two buckets: a name conflict the user
//! can act on, and everything else.

use crate::config::DialogMessages;
use crate::error::{AppErrorCode, GatewayError};
use crate::sinks::Notification;
use serde::Serialize;

/// Display-ready failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifiedError {
    /// Name already taken under the same parent and tenant
    Conflict {
        /// Notification title
        title: String,
        /// Notification body
        message: String,
    },
    /// Any other failure
    Unknown {
        /// Notification title
        title: String,
        /// Notification body
        message: String,
    },
}

impl ClassifiedError {
    /// Notification title
    #[inline]
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Conflict { title, .. } | Self::Unknown { title, .. } => title,
        }
    }

    /// Notification body
    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Conflict { message, .. } | Self::Unknown { message, .. } => message,
        }
    }

    /// Whether this is the conflict bucket
    #[inline]
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    /// Destructive notification for this failure
    #[must_use]
    pub fn to_notification(&self) -> Notification {
        Notification::destructive(self.title(), self.message())
    }
}

/// Maps gateway failures to [`ClassifiedError`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorClassifier {
    title: String,
    conflict: String,
    unknown: String,
}

impl ErrorClassifier {
    /// Classifier using the configured strings
    #[must_use]
    pub fn new(messages: &DialogMessages) -> Self {
        Self {
            title: messages.error_title.clone(),
            conflict: messages.conflict.clone(),
            unknown: messages.unknown.clone(),
        }
    }

    /// Classify a gateway failure. Total: never fails.
    #[must_use]
    pub fn classify(&self, error: &GatewayError) -> ClassifiedError {
        // Compare wire codes so a hand-built `Unrecognized("ALREADY_EXISTS")` still matches.
        let already_exists = error
            .code()
            .is_some_and(|code| code.as_str() == AppErrorCode::AlreadyExists.as_str());
        if already_exists {
            ClassifiedError::Conflict {
                title: self.title.clone(),
                message: self.conflict.clone(),
            }
        } else {
            ClassifiedError::Unknown {
                title: self.title.clone(),
                message: self.unknown.clone(),
            }
        }
    }

    /// Parse a raw payload and classify it
    #[must_use]
    pub fn classify_payload(&self, payload: &serde_json::Value) -> ClassifiedError {
        self.classify(&GatewayError::from_payload(payload))
    }
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new(&DialogMessages::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::sinks::NotificationVariant;
    use serde_json::json;

    #[test]
    fn already_exists_is_conflict() {
        let classified =
            ErrorClassifier::default().classify(&GatewayError::app(AppErrorCode::AlreadyExists));
        assert_eq!(
            classified,
            ClassifiedError::Conflict {
                title: "Folder creation error".into(),
                message: "This folder name is already taken.".into(),
            }
        );
    }

    #[test]
    fn unrecognized_wrapping_known_conflict_code_is_conflict() {
        let error = GatewayError::app(AppErrorCode::Unrecognized("ALREADY_EXISTS".into()));
        assert!(ErrorClassifier::default().classify(&error).is_conflict());
    }

    #[test]
    fn other_codes_are_unknown() {
        let classifier = ErrorClassifier::default();
        for code in [
            AppErrorCode::NotFound,
            AppErrorCode::Unauthorized,
            AppErrorCode::LimitExceeded,
            AppErrorCode::Unrecognized("WHATEVER".into()),
        ] {
            let classified = classifier.classify(&GatewayError::Structured(
                AppError::new(code).with_message("server detail"),
            ));
            assert!(!classified.is_conflict());
            assert_eq!(
                classified.message(),
                "An unknown error occurred while creating the folder."
            );
        }
    }

    #[test]
    fn opaque_is_unknown() {
        let classified = ErrorClassifier::default().classify(&GatewayError::opaque("ECONNRESET"));
        assert!(matches!(classified, ClassifiedError::Unknown { .. }));
    }

    #[test]
    fn classify_payload_handles_garbage() {
        let classifier = ErrorClassifier::default();
        assert!(classifier
            .classify_payload(&json!({ "code": "ALREADY_EXISTS" }))
            .is_conflict());
        assert!(!classifier.classify_payload(&json!(42)).is_conflict());
    }

    #[test]
    fn notification_is_destructive_with_title() {
        let notification = ErrorClassifier::default()
            .classify(&GatewayError::opaque("x"))
            .to_notification();
        assert_eq!(notification.variant, NotificationVariant::Destructive);
        assert_eq!(notification.title.as_deref(), Some("Folder creation error"));
    }

    #[test]
    fn uses_configured_messages() {
        let messages = DialogMessages {
            conflict: "Taken".into(),
            ..DialogMessages::default()
        };
        let classified = ErrorClassifier::new(&messages)
            .classify(&GatewayError::app(AppErrorCode::AlreadyExists));
        assert_eq!(classified.message(), "Taken");
    }
}
