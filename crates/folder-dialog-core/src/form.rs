//! Form controller
//!
//! Holds the field values, the last validation errors and the submitting flag.
//! `submit` is single-flight: a call made while another is in flight returns
//! [`FormSubmission::Busy`] without validating or invoking the handler.

use crate::validation::{CreateFolderSchema, FieldErrors, FormField, FormValues, ValidatedInput};
use parking_lot::Mutex;
use std::future::Future;

/// Observable form state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    /// Current values
    pub values: FormValues,
    /// Errors from the last submit attempt
    pub field_errors: FieldErrors,
    /// Handler in flight
    pub is_submitting: bool,
}

/// Result of [`FormController::submit`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormSubmission<T> {
    /// Validation failed; handler not invoked
    Invalid(FieldErrors),
    /// Another submission is in flight; nothing happened
    Busy,
    /// Handler ran to completion with this output
    Completed(T),
}

/// Form state owner
#[derive(Debug)]
pub struct FormController {
    schema: CreateFolderSchema,
    state: Mutex<FormState>,
}

impl FormController {
    /// Create a controller with empty values
    #[inline]
    #[must_use]
    pub fn new(schema: CreateFolderSchema) -> Self {
        Self {
            schema,
            state: Mutex::new(FormState::default()),
        }
    }

    /// Snapshot of the current state
    #[must_use]
    pub fn state(&self) -> FormState {
        self.state.lock().clone()
    }

    /// Whether a submission is in flight
    #[inline]
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.state.lock().is_submitting
    }

    /// Update a field without revalidating
    pub fn set_field(&self, field: FormField, value: impl Into<String>) {
        self.state.lock().values.set(field, value.into());
    }

    /// Clear values and field errors
    ///
    /// Leaves `is_submitting` alone; an in-flight handler still owns it.
    pub fn reset(&self) {
        let mut state = self.state.lock();
        state.values = FormValues::default();
        state.field_errors.clear();
    }

    /// Validate and, if valid, run `handler` with the validated input
    ///
    /// `is_submitting` is true exactly while the handler future is alive,
    /// including when the returned future is dropped before completion.
    pub async fn submit<F, Fut, T>(&self, handler: F) -> FormSubmission<T>
    where
        F: FnOnce(ValidatedInput) -> Fut,
        Fut: Future<Output = T>,
    {
        let input = {
            let mut state = self.state.lock();
            if state.is_submitting {
                return FormSubmission::Busy;
            }
            state.field_errors.clear();
            match self.schema.validate(&state.values) {
                Ok(input) => {
                    state.is_submitting = true;
                    input
                }
                Err(errors) => {
                    state.field_errors = errors.clone();
                    return FormSubmission::Invalid(errors);
                }
            }
        };

        let _guard = SubmittingGuard { form: self };
        FormSubmission::Completed(handler(input).await)
    }
}

impl Default for FormController {
    fn default() -> Self {
        Self::new(CreateFolderSchema::default())
    }
}

/// Clears `is_submitting` on drop
struct SubmittingGuard<'a> {
    form: &'a FormController,
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        self.form.state.lock().is_submitting = false;
    }
}
