//! Folder Dialog Core
//!
//! Headless controller for a "create folder" dialog:
//! - Submit-time validation of the folder name
//! - Single-flight submission to a remote creation gateway
//! - Classification of gateway failures into conflict / unknown
//! - Post-create close, notification and navigation, in that order
//!
//! Hosts provide three collaborators (gateway, notification sink, navigator)
//! and render from [`DialogSnapshot`]s.
//!
//! # Example
//!
//! ```rust,ignore
//! use folder_dialog_core::prelude::*;
//!
//! # async fn example(gateway: Arc<dyn CreationGateway>,
//! #     notifier: Arc<dyn NotificationSink>, navigator: Arc<dyn Navigator>)
//! #     -> Result<(), DialogError> {
//! let dialog = DialogController::new(DialogConfig::new(), gateway, notifier, navigator)
//!     .with_context(DialogContext::new().with_parent("folder-1"));
//!
//! dialog.open()?;
//! dialog.set_field(FormField::Name, "Invoices")?;
//! match dialog.submit().await? {
//!     SubmitOutcome::Created { path, .. } => println!("now at {path}"),
//!     other => println!("{other:?}"),
//! }
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod classifier;
pub mod config;
pub mod dialog;
pub mod error;
pub mod form;
pub mod gateway;
pub mod navigation;
pub mod sinks;
pub mod state_machine;
pub mod types;
pub mod validation;

// Test harness
pub mod test_harness;

pub use classifier::{ClassifiedError, ErrorClassifier};
pub use config::{DialogConfig, DialogCopy, DialogMessages};
pub use dialog::{DialogController, DialogSnapshot, DialogTrigger, SubmitOutcome};
pub use error::{AppError, AppErrorCode, ConfigError, DialogError, GatewayError, StateMachineError};
pub use form::{FormController, FormState, FormSubmission};
pub use gateway::CreationGateway;
pub use navigation::NavigationPlanner;
pub use sinks::{Navigator, Notification, NotificationSink, NotificationVariant};
pub use state_machine::DialogPhase;
pub use types::{
    CreateFolderRequest, DialogContext, FolderId, FolderKind, FolderRecord, TeamId, TenantContext,
};
pub use validation::{CreateFolderSchema, FieldErrors, FormField, FormValues, ValidatedInput};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for embedding the dialog
    pub use crate::{
        CreationGateway, DialogConfig, DialogContext, DialogController, DialogError,
        DialogSnapshot, FormField, Navigator, NotificationSink, SubmitOutcome,
    };
    pub use std::sync::Arc;
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
