//! Dialog configuration
//!
//! Everything the controller needs that is not ambient context: which kind of
//! folder it creates, the path segment used for folder routes, the user-facing
//! strings, and how stale responses are treated. Loadable from TOML; every
//! field has a default so partial files are fine.

use crate::error::ConfigError;
use crate::types::FolderKind;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Controller configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogConfig {
    /// Kind of folder this dialog creates
    pub kind: FolderKind,
    /// Path segment between the listing path and the folder id
    pub folder_segment: String,
    /// Ignore gateway responses that settle after the dialog was closed
    pub discard_stale_responses: bool,
    /// Notification and validation strings
    pub messages: DialogMessages,
    /// Static copy for the renderer
    pub copy: DialogCopy,
}

impl DialogConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With folder kind
    #[inline]
    #[must_use]
    pub fn with_kind(mut self, kind: FolderKind) -> Self {
        self.kind = kind;
        self
    }

    /// With folder path segment
    #[inline]
    #[must_use]
    pub fn with_folder_segment(mut self, segment: impl Into<String>) -> Self {
        self.folder_segment = segment.into();
        self
    }

    /// With stale response policy
    #[inline]
    #[must_use]
    pub fn with_discard_stale_responses(mut self, discard: bool) -> Self {
        self.discard_stale_responses = discard;
        self
    }

    /// With messages
    #[inline]
    #[must_use]
    pub fn with_messages(mut self, messages: DialogMessages) -> Self {
        self.messages = messages;
        self
    }

    /// Parse and validate a TOML document
    ///
    /// # Errors
    /// - `ConfigError::Parse` if the document does not match the schema
    /// - `ConfigError::Invalid` if a value is out of range
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    ///
    /// # Errors
    /// - `ConfigError::Io` if the file cannot be read
    /// - see [`DialogConfig::from_toml_str`]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&source)
    }

    /// Render as TOML
    ///
    /// # Errors
    /// `ConfigError::Render` if serialization fails
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check semantic constraints
    ///
    /// # Errors
    /// `ConfigError::Invalid` if the folder segment is empty or contains `/`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.folder_segment.is_empty() {
            return Err(ConfigError::Invalid("folder_segment must not be empty".to_string()));
        }
        if self.folder_segment.contains('/') {
            return Err(ConfigError::Invalid(format!(
                "folder_segment must be a single path segment, got '{}'",
                self.folder_segment
            )));
        }
        Ok(())
    }
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            kind: FolderKind::Template,
            folder_segment: "f".to_string(),
            discard_stale_responses: true,
            messages: DialogMessages::default(),
            copy: DialogCopy::default(),
        }
    }
}

/// User-facing strings emitted by the controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogMessages {
    /// Success notification body
    pub created: String,
    /// Title shared by both failure notifications
    pub error_title: String,
    /// Body when the name is already taken
    pub conflict: String,
    /// Body for every other failure
    pub unknown: String,
    /// Inline error for an empty name
    pub name_required: String,
}

impl Default for DialogMessages {
    fn default() -> Self {
        Self {
            created: "Folder created successfully".to_string(),
            error_title: "Folder creation error".to_string(),
            conflict: "This folder name is already taken.".to_string(),
            unknown: "An unknown error occurred while creating the folder.".to_string(),
            name_required: "Folder name is required".to_string(),
        }
    }
}

/// Static copy shown by the renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogCopy {
    /// Dialog heading
    pub title: String,
    /// Dialog description
    pub description: String,
    /// Label of the name field
    pub field_label: String,
    /// Placeholder of the name field
    pub placeholder: String,
    /// Cancel button
    pub cancel_label: String,
    /// Submit button
    pub submit_label: String,
    /// Default trigger button
    pub trigger_label: String,
}

impl Default for DialogCopy {
    fn default() -> Self {
        Self {
            title: "Create new folder".to_string(),
            description: "Enter a name for your new folder. Folders help you organise your templates."
                .to_string(),
            field_label: "Folder name".to_string(),
            placeholder: "My folder".to_string(),
            cancel_label: "Cancel".to_string(),
            submit_label: "Create".to_string(),
            trigger_label: "Create folder".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = DialogConfig::from_toml_str(
            r#"
            kind = "document"

            [messages]
            conflict = "Name taken"
            "#,
        )
        .unwrap();

        assert_eq!(config.kind, FolderKind::Document);
        assert_eq!(config.folder_segment, "f");
        assert!(config.discard_stale_responses);
        assert_eq!(config.messages.conflict, "Name taken");
        assert_eq!(config.messages.error_title, "Folder creation error");
    }

    #[test]
    fn rejects_bad_segment() {
        assert!(matches!(
            DialogConfig::from_toml_str("folder_segment = \"\""),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            DialogConfig::from_toml_str("folder_segment = \"a/b\""),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn rejects_unknown_kind() {
        assert!(matches!(
            DialogConfig::from_toml_str("kind = \"archive\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn rendered_default_parses_back() {
        let rendered = DialogConfig::default().to_toml_string().unwrap();
        assert_eq!(DialogConfig::from_toml_str(&rendered).unwrap(), DialogConfig::default());
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dialog.toml");
        std::fs::write(&path, "folder_segment = \"folder\"\n").unwrap();

        let config = DialogConfig::load(&path).unwrap();
        assert_eq!(config.folder_segment, "folder");

        assert!(matches!(
            DialogConfig::load(dir.path().join("missing.toml")),
            Err(ConfigError::Io(_))
        ));
    }
}
