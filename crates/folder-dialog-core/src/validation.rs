//! Submit-time validation for the create-folder form
//!
//! The schema is a list of declarative field rules. Validation is pure and
//! returns either the validated input or a map of inline field errors.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Fields of the create-folder form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    /// Folder name
    Name,
}

impl FormField {
    /// Field key as used by form renderers
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inline errors keyed by field
pub type FieldErrors = BTreeMap<FormField, String>;

/// Raw form values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormValues {
    /// Folder name as typed
    pub name: String,
}

impl FormValues {
    /// Value of a field
    #[inline]
    #[must_use]
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
        }
    }

    /// Set a field
    #[inline]
    pub fn set(&mut self, field: FormField, value: String) {
        match field {
            FormField::Name => self.name = value,
        }
    }
}

/// Input that passed the schema
///
/// Only constructible through [`CreateFolderSchema::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedInput {
    name: String,
}

impl ValidatedInput {
    /// Validated folder name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Take the name
    #[inline]
    #[must_use]
    pub fn into_name(self) -> String {
        self.name
    }
}

/// Minimum-length rule on one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRule {
    /// Field the rule applies to
    pub field: FormField,
    /// Minimum length in characters, measured on the raw value
    pub min_len: usize,
    /// Error shown when the rule fails
    pub message: String,
}

impl FieldRule {
    /// Field must be non-empty
    #[inline]
    #[must_use]
    pub fn required(field: FormField, message: impl Into<String>) -> Self {
        Self {
            field,
            min_len: 1,
            message: message.into(),
        }
    }

    fn check(&self, values: &FormValues) -> Option<String> {
        // Raw length; whitespace-only names pass and are left to the server.
        (values.get(self.field).chars().count() < self.min_len).then(|| self.message.clone())
    }
}

/// Schema for the create-folder form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateFolderSchema {
    rules: Vec<FieldRule>,
}

impl CreateFolderSchema {
    /// Schema requiring a non-empty name
    #[must_use]
    pub fn new(name_required: impl Into<String>) -> Self {
        Self {
            rules: vec![FieldRule::required(FormField::Name, name_required)],
        }
    }

    /// Rules in evaluation order
    #[inline]
    #[must_use]
    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    /// Validate form values
    ///
    /// The first failing rule per field wins.
    ///
    /// # Errors
    /// Returns the field errors if any rule fails
    pub fn validate(&self, values: &FormValues) -> Result<ValidatedInput, FieldErrors> {
        let mut errors = FieldErrors::new();
        for rule in &self.rules {
            if errors.contains_key(&rule.field) {
                continue;
            }
            if let Some(message) = rule.check(values) {
                errors.insert(rule.field, message);
            }
        }

        if errors.is_empty() {
            Ok(ValidatedInput {
                name: values.name.clone(),
            })
        } else {
            Err(errors)
        }
    }
}

impl Default for CreateFolderSchema {
    fn default() -> Self {
        Self::new("Folder name is required")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(name: &str) -> FormValues {
        FormValues {
            name: name.to_string(),
        }
    }

    #[test]
    fn empty_name_is_rejected() {
        let errors = CreateFolderSchema::default().validate(&values("")).unwrap_err();
        assert_eq!(
            errors.get(&FormField::Name).map(String::as_str),
            Some("Folder name is required")
        );
    }

    #[test]
    fn whitespace_name_passes_raw_length_check() {
        let input = CreateFolderSchema::default().validate(&values(" ")).unwrap();
        assert_eq!(input.name(), " ");
    }

    #[test]
    fn no_upper_bound_or_charset() {
        let long = "é/😀".repeat(500);
        let input = CreateFolderSchema::default().validate(&values(&long)).unwrap();
        assert_eq!(input.into_name(), long);
    }

    #[test]
    fn custom_message() {
        let errors = CreateFolderSchema::new("Name required").validate(&values("")).unwrap_err();
        assert_eq!(errors[&FormField::Name], "Name required");
    }
}
