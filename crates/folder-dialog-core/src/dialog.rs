//! Dialog controller
//!
//! Owns the dialog phase and the form, and wires a valid submission to the
//! creation gateway:
//!
//! ```text
//! Closed --open--> Idle --submit(valid)--> Submitting --ok--> Closed
//!                   ^  \--request_close--> Closed           |
//!                   \------------------ err ----------------/
//! ```
//!
//! Every transition into `Closed` resets the form and advances the
//! generation counter. A gateway response whose generation no longer matches
//! is dropped when `discard_stale_responses` is set.
//!
//! Renderers either poll [`DialogController::snapshot`] or hold the receiver
//! from [`DialogController::subscribe`], which is updated after every change.

use crate::classifier::{ClassifiedError, ErrorClassifier};
use crate::config::{DialogConfig, DialogCopy};
use crate::error::{DialogError, GatewayError};
use crate::form::{FormController, FormState, FormSubmission};
use crate::gateway::CreationGateway;
use crate::navigation::NavigationPlanner;
use crate::sinks::{Navigator, Notification, NotificationSink};
use crate::state_machine::{validate_transition, DialogPhase};
use crate::types::{CreateFolderRequest, DialogContext, FolderRecord};
use crate::validation::{CreateFolderSchema, FieldErrors, FormField, ValidatedInput};
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// What a call to [`DialogController::submit`] did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// Validation failed; errors are shown inline, gateway not called
    Invalid(FieldErrors),
    /// Dialog closed or a request already in flight; nothing happened
    Ignored,
    /// Folder created, dialog closed, navigation requested
    Created {
        /// Record returned by the gateway
        record: FolderRecord,
        /// Path navigated to
        path: String,
    },
    /// Creation failed; dialog stays open with input kept
    Failed(ClassifiedError),
    /// Response arrived after the dialog moved on and was dropped
    Discarded,
}

/// Renderer-facing view of the dialog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DialogSnapshot {
    /// Current phase
    pub phase: DialogPhase,
    /// Name field value
    pub name: String,
    /// Inline field errors
    pub field_errors: FieldErrors,
    /// Request in flight
    pub is_submitting: bool,
}

impl DialogSnapshot {
    fn from_parts(phase: DialogPhase, form: FormState) -> Self {
        Self {
            phase,
            name: form.values.name,
            field_errors: form.field_errors,
            is_submitting: form.is_submitting,
        }
    }
}

/// Visual trigger that opens the dialog
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DialogTrigger {
    /// Built-in button labelled from [`DialogCopy::trigger_label`]
    #[default]
    Default,
    /// Caller-supplied trigger
    Custom(String),
}

impl DialogTrigger {
    /// Label to render
    #[must_use]
    pub fn label<'a>(&'a self, copy: &'a DialogCopy) -> &'a str {
        match self {
            Self::Default => &copy.trigger_label,
            Self::Custom(label) => label,
        }
    }
}

/// State machine around one create-folder dialog
pub struct DialogController {
    config: DialogConfig,
    trigger: DialogTrigger,
    context: RwLock<DialogContext>,
    form: FormController,
    phase: Mutex<DialogPhase>,
    generation: AtomicU64,
    planner: NavigationPlanner,
    classifier: ErrorClassifier,
    gateway: Arc<dyn CreationGateway>,
    notifier: Arc<dyn NotificationSink>,
    navigator: Arc<dyn Navigator>,
    snapshots: watch::Sender<DialogSnapshot>,
}

impl fmt::Debug for DialogController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogController")
            .field("config", &self.config)
            .field("phase", &self.phase())
            .field("generation", &self.generation())
            .field("form", &self.form)
            .finish_non_exhaustive()
    }
}

impl DialogController {
    /// Create a closed dialog with an empty context
    #[must_use]
    pub fn new(
        config: DialogConfig,
        gateway: Arc<dyn CreationGateway>,
        notifier: Arc<dyn NotificationSink>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let schema = CreateFolderSchema::new(config.messages.name_required.clone());
        let (snapshots, _) = watch::channel(DialogSnapshot::default());
        Self {
            planner: NavigationPlanner::new(config.folder_segment.clone()),
            classifier: ErrorClassifier::new(&config.messages),
            config,
            trigger: DialogTrigger::Default,
            context: RwLock::new(DialogContext::default()),
            form: FormController::new(schema),
            phase: Mutex::new(DialogPhase::Closed),
            generation: AtomicU64::new(0),
            gateway,
            notifier,
            navigator,
            snapshots,
        }
    }

    /// With ambient context
    #[must_use]
    pub fn with_context(self, context: DialogContext) -> Self {
        *self.context.write() = context;
        self
    }

    /// With a caller-supplied trigger
    #[must_use]
    pub fn with_trigger(mut self, trigger: DialogTrigger) -> Self {
        self.trigger = trigger;
        self
    }

    /// Configuration in use
    #[inline]
    #[must_use]
    pub fn config(&self) -> &DialogConfig {
        &self.config
    }

    /// Static copy for the renderer
    #[inline]
    #[must_use]
    pub fn copy(&self) -> &DialogCopy {
        &self.config.copy
    }

    /// Trigger label to render
    #[inline]
    #[must_use]
    pub fn trigger_label(&self) -> &str {
        self.trigger.label(&self.config.copy)
    }

    /// Current phase
    #[inline]
    #[must_use]
    pub fn phase(&self) -> DialogPhase {
        *self.phase.lock()
    }

    /// Whether the modal is visible
    #[inline]
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.phase().is_open()
    }

    /// Current generation; advances on every close and on unmount
    #[inline]
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Current ambient context
    #[must_use]
    pub fn context(&self) -> DialogContext {
        self.context.read().clone()
    }

    /// Replace the ambient context (route or team changed)
    ///
    /// Read at the start of the next submission and when planning navigation.
    pub fn set_context(&self, context: DialogContext) {
        *self.context.write() = context;
    }

    /// Current view
    #[must_use]
    pub fn snapshot(&self) -> DialogSnapshot {
        DialogSnapshot::from_parts(self.phase(), self.form.state())
    }

    /// Receiver updated after every state change
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<DialogSnapshot> {
        self.snapshots.subscribe()
    }

    /// Show the dialog. No-op when already open.
    ///
    /// # Errors
    /// `DialogError::Unmounted` after [`DialogController::unmount`]
    pub fn open(&self) -> Result<(), DialogError> {
        match self.phase() {
            DialogPhase::Unmounted => Err(DialogError::Unmounted),
            DialogPhase::Idle | DialogPhase::Submitting => Ok(()),
            DialogPhase::Closed => {
                self.transition(DialogPhase::Idle)?;
                tracing::debug!("Folder dialog opened");
                self.publish();
                Ok(())
            }
        }
    }

    /// Hide the dialog and reset the form. No-op when already closed.
    ///
    /// Closing while a request is in flight does not cancel it; its result is
    /// handled according to `discard_stale_responses`.
    ///
    /// # Errors
    /// `DialogError::Unmounted` after [`DialogController::unmount`]
    pub fn request_close(&self) -> Result<(), DialogError> {
        match self.phase() {
            DialogPhase::Unmounted => Err(DialogError::Unmounted),
            DialogPhase::Closed => Ok(()),
            DialogPhase::Submitting => {
                tracing::debug!("Folder dialog closed with a request in flight");
                self.close()
            }
            DialogPhase::Idle => self.close(),
        }
    }

    /// Host "open changed" binding
    ///
    /// # Errors
    /// `DialogError::Unmounted` after [`DialogController::unmount`]
    pub fn set_open(&self, open: bool) -> Result<(), DialogError> {
        if open {
            self.open()
        } else {
            self.request_close()
        }
    }

    /// Edit a field. Ignored while closed.
    ///
    /// # Errors
    /// `DialogError::Unmounted` after [`DialogController::unmount`]
    pub fn set_field(&self, field: FormField, value: impl Into<String>) -> Result<(), DialogError> {
        match self.phase() {
            DialogPhase::Unmounted => Err(DialogError::Unmounted),
            DialogPhase::Closed => {
                tracing::debug!("Ignoring edit of '{}' while closed", field);
                Ok(())
            }
            DialogPhase::Idle | DialogPhase::Submitting => {
                self.form.set_field(field, value);
                self.publish();
                Ok(())
            }
        }
    }

    /// Submit the form
    ///
    /// Validates, then calls the gateway at most once per in-flight request.
    ///
    /// # Errors
    /// `DialogError::Unmounted` after [`DialogController::unmount`]
    pub async fn submit(&self) -> Result<SubmitOutcome, DialogError> {
        match self.phase() {
            DialogPhase::Unmounted => return Err(DialogError::Unmounted),
            DialogPhase::Closed => {
                tracing::debug!("Submit ignored: dialog closed");
                return Ok(SubmitOutcome::Ignored);
            }
            DialogPhase::Submitting => {
                tracing::debug!("Submit ignored: request already in flight");
                return Ok(SubmitOutcome::Ignored);
            }
            DialogPhase::Idle => {}
        }

        // Declared before the form future so it drops after the form's own guard.
        let _settle = SettleOnDrop {
            dialog: self,
            generation: self.generation(),
        };
        let outcome = match self.form.submit(|input| self.create_folder(input)).await {
            FormSubmission::Invalid(errors) => {
                tracing::debug!("Submit rejected by validation: {} field error(s)", errors.len());
                Ok(SubmitOutcome::Invalid(errors))
            }
            FormSubmission::Busy => {
                tracing::debug!("Submit ignored: previous request has not settled");
                Ok(SubmitOutcome::Ignored)
            }
            FormSubmission::Completed(result) => result,
        };

        self.publish();
        outcome
    }

    /// Tear down. Terminal; later calls fail and in-flight results are dropped.
    pub fn unmount(&self) {
        if self.transition(DialogPhase::Unmounted).is_ok() {
            self.generation.fetch_add(1, Ordering::SeqCst);
            tracing::debug!("Folder dialog unmounted");
            self.publish();
        }
    }

    async fn create_folder(&self, input: ValidatedInput) -> Result<SubmitOutcome, DialogError> {
        self.transition(DialogPhase::Submitting)?;
        let generation = self.generation();
        let request = {
            let context = self.context.read();
            CreateFolderRequest::new(input.into_name(), self.config.kind, &context)
        };
        self.publish();

        tracing::info!("Creating {} folder '{}'", request.kind(), request.name());
        let result = self.gateway.create(request).await;

        if self.is_stale(generation) {
            tracing::debug!("Dropping folder creation response from generation {}", generation);
            return Ok(SubmitOutcome::Discarded);
        }

        match result {
            Ok(record) => Ok(self.on_created(record)),
            Err(error) => self.on_failed(&error),
        }
    }

    fn on_created(&self, record: FolderRecord) -> SubmitOutcome {
        // Close before navigating so the notification lands on the new route.
        if self.is_open() {
            if let Err(e) = self.close() {
                tracing::warn!("Failed to close dialog after creation: {}", e);
            }
        }
        self.notifier
            .notify(Notification::info(self.config.messages.created.clone()));

        let tenant = self.context.read().tenant.clone();
        let path = self
            .planner
            .path_for(self.config.kind, &record.id, tenant.as_ref());
        self.navigator.navigate_to(&path);

        tracing::info!("Folder {} created, navigating to {}", record.id, path);
        SubmitOutcome::Created { record, path }
    }

    fn on_failed(&self, error: &GatewayError) -> Result<SubmitOutcome, DialogError> {
        if self.phase() == DialogPhase::Submitting {
            self.transition(DialogPhase::Idle)?;
        }

        let classified = self.classifier.classify(error);
        tracing::warn!(
            conflict = classified.is_conflict(),
            "Folder creation failed: {}",
            error
        );
        self.notifier.notify(classified.to_notification());
        Ok(SubmitOutcome::Failed(classified))
    }

    fn is_stale(&self, generation: u64) -> bool {
        if self.phase() == DialogPhase::Unmounted {
            return true;
        }
        self.config.discard_stale_responses && self.generation() != generation
    }

    fn close(&self) -> Result<(), DialogError> {
        self.transition(DialogPhase::Closed)?;
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.form.reset();
        tracing::debug!("Folder dialog closed");
        self.publish();
        Ok(())
    }

    fn transition(&self, to: DialogPhase) -> Result<DialogPhase, DialogError> {
        let mut phase = self.phase.lock();
        validate_transition(*phase, to)?;
        Ok(std::mem::replace(&mut *phase, to))
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.snapshot());
    }
}

/// Returns a submission abandoned mid-flight to `Idle`
///
/// Only acts while the phase is still `Submitting` for the same generation; a
/// close, a completed request or an unmount leaves nothing to undo.
struct SettleOnDrop<'a> {
    dialog: &'a DialogController,
    generation: u64,
}

impl Drop for SettleOnDrop<'_> {
    fn drop(&mut self) {
        let dialog = self.dialog;
        if dialog.generation() != self.generation || dialog.phase() != DialogPhase::Submitting {
            return;
        }
        if dialog.transition(DialogPhase::Idle).is_ok() {
            tracing::debug!("Submission dropped while in flight; dialog back to idle");
            dialog.publish();
        }
    }
}
