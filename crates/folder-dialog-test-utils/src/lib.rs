//! Testing utilities for the folder dialog workspace
//!
//! Shared gateways, fixtures and wiring helpers.

#![allow(missing_docs)]

use async_trait::async_trait;
use folder_dialog_core::test_harness::{RecordingNavigator, RecordingNotifier};
use folder_dialog_core::{
    AppError, AppErrorCode, CreateFolderRequest, CreationGateway, DialogConfig, DialogContext,
    DialogController, DialogPhase, DialogSnapshot, FolderRecord, GatewayError, Navigator,
    Notification, NotificationSink,
};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{watch, Semaphore};

/// Gateway that replays queued responses
///
/// When gated, every `create` call waits for a [`ScriptedGateway::release`]
/// before answering, which lets tests hold a request in flight. When the queue
/// is empty the gateway answers with a record built from the request.
#[derive(Debug, Default)]
pub struct ScriptedGateway {
    responses: Mutex<VecDeque<Result<FolderRecord, GatewayError>>>,
    requests: Mutex<Vec<CreateFolderRequest>>,
    calls: AtomicUsize,
    gate: Option<Semaphore>,
}

impl ScriptedGateway {
    /// Ungated gateway
    pub fn new() -> Self {
        Self::default()
    }

    /// Gateway that holds every call until released
    pub fn gated() -> Self {
        Self {
            gate: Some(Semaphore::new(0)),
            ..Self::default()
        }
    }

    /// Queue a response
    pub fn respond(self, response: Result<FolderRecord, GatewayError>) -> Self {
        self.responses.lock().push_back(response);
        self
    }

    /// Let one held call proceed
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }

    /// Number of `create` calls so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Requests received, in order
    pub fn requests(&self) -> Vec<CreateFolderRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl CreationGateway for ScriptedGateway {
    async fn create(&self, request: CreateFolderRequest) -> Result<FolderRecord, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(request.clone());

        if let Some(gate) = &self.gate {
            gate.acquire()
                .await
                .map_err(|_| GatewayError::opaque("gate closed"))?
                .forget();
        }

        let queued = self.responses.lock().pop_front();
        queued.unwrap_or_else(|| {
            Ok(FolderRecord::from_request(
                format!("folder-{}", self.calls()),
                &request,
            ))
        })
    }
}

/// Dialog wired to recording sinks
pub struct TestDialog {
    pub dialog: DialogController,
    pub notifier: Arc<RecordingNotifier>,
    pub navigator: Arc<RecordingNavigator>,
}

/// Wire a dialog with default config and empty context
pub fn setup_dialog(gateway: Arc<dyn CreationGateway>) -> TestDialog {
    setup_dialog_with(DialogConfig::default(), DialogContext::default(), gateway)
}

/// Wire a dialog with explicit config and context
pub fn setup_dialog_with(
    config: DialogConfig,
    context: DialogContext,
    gateway: Arc<dyn CreationGateway>,
) -> TestDialog {
    let notifier = Arc::new(RecordingNotifier::new());
    let navigator = Arc::new(RecordingNavigator::new());
    let dialog = DialogController::new(config, gateway, notifier.clone(), navigator.clone())
        .with_context(context);
    TestDialog {
        dialog,
        notifier,
        navigator,
    }
}

/// One outbound call, with the phase the dialog had published at that moment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkCall {
    Notify {
        phase: Option<DialogPhase>,
        description: String,
    },
    Navigate {
        phase: Option<DialogPhase>,
        path: String,
    },
}

/// Notification sink and navigator sharing one ordered call log
///
/// Once attached to a dialog's snapshot stream, every call also records the
/// phase subscribers could see when the call was made.
#[derive(Debug, Default)]
pub struct SinkRecorder {
    calls: Mutex<Vec<SinkCall>>,
    snapshots: Mutex<Option<watch::Receiver<DialogSnapshot>>>,
}

impl SinkRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe `dialog`'s published snapshots
    pub fn attach(&self, dialog: &DialogController) {
        *self.snapshots.lock() = Some(dialog.subscribe());
    }

    /// Calls so far, in order
    pub fn calls(&self) -> Vec<SinkCall> {
        self.calls.lock().clone()
    }

    fn observed_phase(&self) -> Option<DialogPhase> {
        self.snapshots.lock().as_ref().map(|rx| rx.borrow().phase)
    }
}

impl NotificationSink for SinkRecorder {
    fn notify(&self, notification: Notification) {
        let phase = self.observed_phase();
        self.calls.lock().push(SinkCall::Notify {
            phase,
            description: notification.description,
        });
    }
}

impl Navigator for SinkRecorder {
    fn navigate_to(&self, path: &str) {
        let phase = self.observed_phase();
        self.calls.lock().push(SinkCall::Navigate {
            phase,
            path: path.to_string(),
        });
    }
}

/// Wire a dialog whose sinks share one [`SinkRecorder`]
pub fn setup_recorded_dialog(
    gateway: Arc<dyn CreationGateway>,
) -> (DialogController, Arc<SinkRecorder>) {
    let recorder = Arc::new(SinkRecorder::new());
    let dialog = DialogController::new(
        DialogConfig::default(),
        gateway,
        recorder.clone(),
        recorder.clone(),
    );
    recorder.attach(&dialog);
    (dialog, recorder)
}

pub fn folder_record(id: &str) -> FolderRecord {
    FolderRecord::new(id, "New folder")
}

pub fn already_exists_error() -> GatewayError {
    GatewayError::Structured(
        AppError::new(AppErrorCode::AlreadyExists).with_message("Folder already exists"),
    )
}

/// Error as a transport would surface it before parsing
pub fn raw_transport_error() -> GatewayError {
    GatewayError::from_payload(&serde_json::json!("fetch failed: ECONNREFUSED"))
}
