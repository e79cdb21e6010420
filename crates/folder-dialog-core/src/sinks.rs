//! Outbound fire-and-forget sinks: notifications and navigation.

use serde::{Deserialize, Serialize};

/// Notification style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationVariant {
    /// Neutral / success
    #[default]
    Default,
    /// Error
    Destructive,
}

/// Toast-style notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Optional heading
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Body text
    pub description: String,
    /// Style
    pub variant: NotificationVariant,
}

impl Notification {
    /// Untitled default notification
    #[must_use]
    pub fn info(description: impl Into<String>) -> Self {
        Self {
            title: None,
            description: description.into(),
            variant: NotificationVariant::Default,
        }
    }

    /// Titled destructive notification
    #[must_use]
    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: description.into(),
            variant: NotificationVariant::Destructive,
        }
    }
}

/// Receives notifications; return values are never used
pub trait NotificationSink: Send + Sync {
    /// Show a notification
    fn notify(&self, notification: Notification);
}

/// Receives navigation requests
pub trait Navigator: Send + Sync {
    /// Navigate to an absolute application path
    fn navigate_to(&self, path: &str);
}
