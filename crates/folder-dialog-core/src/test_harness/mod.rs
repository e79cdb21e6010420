// Test harness module
// In-process collaborators and a scripted session simulator

pub mod simulator;

pub use simulator::*;

use crate::error::{AppError, AppErrorCode, GatewayError};
use crate::gateway::CreationGateway;
use crate::sinks::{Navigator, Notification, NotificationSink};
use crate::types::{CreateFolderRequest, FolderId, FolderKind, FolderRecord, TeamId};
use async_trait::async_trait;
use parking_lot::Mutex;

/// Gateway backed by a vector of folders
///
/// Mirrors the remote service's checks: a name must be unique among siblings
/// of the same kind and team, and a parent must exist in the same scope.
#[derive(Debug, Default)]
pub struct InMemoryGateway {
    folders: Mutex<Vec<FolderRecord>>,
    requests: Mutex<Vec<CreateFolderRequest>>,
}

impl InMemoryGateway {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an existing folder
    #[must_use]
    pub fn with_folder(self, record: FolderRecord) -> Self {
        self.folders.lock().push(record);
        self
    }

    /// All stored folders
    #[must_use]
    pub fn folders(&self) -> Vec<FolderRecord> {
        self.folders.lock().clone()
    }

    /// Requests received, in order
    #[must_use]
    pub fn requests(&self) -> Vec<CreateFolderRequest> {
        self.requests.lock().clone()
    }

    fn in_scope(record: &FolderRecord, kind: FolderKind, team: Option<TeamId>) -> bool {
        record.kind == kind && record.team_id == team
    }
}

#[async_trait]
impl CreationGateway for InMemoryGateway {
    async fn create(&self, request: CreateFolderRequest) -> Result<FolderRecord, GatewayError> {
        self.requests.lock().push(request.clone());
        let mut folders = self.folders.lock();

        if let Some(parent) = request.parent_id() {
            let parent_exists = folders.iter().any(|f| {
                &f.id == parent && Self::in_scope(f, request.kind(), request.team_id())
            });
            if !parent_exists {
                return Err(AppError::new(AppErrorCode::NotFound)
                    .with_message(format!("parent folder {parent} not found"))
                    .into());
            }
        }

        let duplicate = folders.iter().any(|f| {
            Self::in_scope(f, request.kind(), request.team_id())
                && f.parent_id.as_ref() == request.parent_id()
                && f.name == request.name()
        });
        if duplicate {
            return Err(AppError::new(AppErrorCode::AlreadyExists)
                .with_message(format!("folder '{}' already exists", request.name()))
                .into());
        }

        let record = FolderRecord::from_request(
            FolderId::new(uuid::Uuid::new_v4().simple().to_string()),
            &request,
        );
        folders.push(record.clone());
        Ok(record)
    }
}

/// Notification sink that keeps everything it receives
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    /// Empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Received notifications, in order
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().clone()
    }
}

impl NotificationSink for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications.lock().push(notification);
    }
}

/// Navigator that keeps every requested path
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    paths: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    /// Empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requested paths, in order
    #[must_use]
    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate_to(&self, path: &str) {
        self.paths.lock().push(path.to_string());
    }
}
