//! Session simulator
//!
//! Replays a scripted sequence of user actions against a dialog wired to the
//! in-memory gateway and recording sinks, and reports everything observable.

use super::{InMemoryGateway, RecordingNavigator, RecordingNotifier};
use crate::config::DialogConfig;
use crate::dialog::{DialogController, DialogSnapshot, SubmitOutcome};
use crate::error::DialogError;
use crate::sinks::Notification;
use crate::types::{CreateFolderRequest, DialogContext, FolderId, FolderRecord, TeamId, TenantContext};
use crate::validation::FormField;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One user action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum SessionStep {
    /// Click the trigger
    Open,
    /// Type into the name field
    SetName(String),
    /// Press submit
    Submit,
    /// Press cancel / dismiss
    Close,
}

/// Scripted session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionScript {
    /// Team URL slug; the team id is derived as 1
    pub team_url: Option<String>,
    /// Parent folder id; seeded into the store if set
    pub parent_id: Option<String>,
    /// Names already present next to the new folder
    pub existing: Vec<String>,
    /// Actions to replay
    pub steps: Vec<SessionStep>,
}

impl SessionScript {
    /// Open, type `name`, submit
    #[must_use]
    pub fn create(name: impl Into<String>) -> Self {
        Self {
            steps: vec![
                SessionStep::Open,
                SessionStep::SetName(name.into()),
                SessionStep::Submit,
            ],
            ..Self::default()
        }
    }

    /// With team
    #[must_use]
    pub fn with_team(mut self, url: impl Into<String>) -> Self {
        self.team_url = Some(url.into());
        self
    }

    /// With parent folder
    #[must_use]
    pub fn with_parent(mut self, id: impl Into<String>) -> Self {
        self.parent_id = Some(id.into());
        self
    }

    /// With a pre-existing sibling name
    #[must_use]
    pub fn with_existing(mut self, name: impl Into<String>) -> Self {
        self.existing.push(name.into());
        self
    }

    fn context(&self) -> DialogContext {
        DialogContext {
            parent_id: self.parent_id.clone().map(FolderId::new),
            tenant: self
                .team_url
                .clone()
                .map(|url| TenantContext::new(TeamId(1), url)),
        }
    }
}

/// Everything observable after a session
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    /// Outcome of each submit step, in order
    pub submissions: Vec<SubmitOutcome>,
    /// Notifications emitted
    pub notifications: Vec<Notification>,
    /// Paths navigated to
    pub navigations: Vec<String>,
    /// Requests the gateway received
    pub requests: Vec<CreateFolderRequest>,
    /// Dialog state at the end
    pub final_state: DialogSnapshot,
}

impl SessionReport {
    /// Whether any submission created a folder
    #[must_use]
    pub fn created(&self) -> bool {
        self.submissions
            .iter()
            .any(|s| matches!(s, SubmitOutcome::Created { .. }))
    }
}

/// Replay `script` against a fresh dialog
///
/// # Errors
/// Propagates [`DialogError`] from the controller
pub async fn run_session(
    config: DialogConfig,
    script: &SessionScript,
) -> Result<SessionReport, DialogError> {
    let context = script.context();
    let team_id = context.tenant.as_ref().map(|t| t.id);

    let mut gateway = InMemoryGateway::new();
    if let Some(parent) = &context.parent_id {
        let mut record = FolderRecord::new(parent.clone(), "parent");
        record.kind = config.kind;
        record.team_id = team_id;
        gateway = gateway.with_folder(record);
    }
    for (i, name) in script.existing.iter().enumerate() {
        let mut record = FolderRecord::new(format!("existing-{i}"), name.clone());
        record.kind = config.kind;
        record.team_id = team_id;
        record.parent_id = context.parent_id.clone();
        gateway = gateway.with_folder(record);
    }

    let gateway = Arc::new(gateway);
    let notifier = Arc::new(RecordingNotifier::new());
    let navigator = Arc::new(RecordingNavigator::new());
    let dialog = DialogController::new(config, gateway.clone(), notifier.clone(), navigator.clone())
        .with_context(context);

    let mut submissions = Vec::new();
    for step in &script.steps {
        tracing::debug!("Simulator step: {:?}", step);
        match step {
            SessionStep::Open => dialog.open()?,
            SessionStep::SetName(name) => dialog.set_field(FormField::Name, name.clone())?,
            SessionStep::Submit => submissions.push(dialog.submit().await?),
            SessionStep::Close => dialog.request_close()?,
        }
    }

    Ok(SessionReport {
        submissions,
        notifications: notifier.notifications(),
        navigations: navigator.paths(),
        requests: gateway.requests(),
        final_state: dialog.snapshot(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_machine::DialogPhase;

    #[tokio::test]
    async fn create_session_navigates() {
        let report = run_session(DialogConfig::default(), &SessionScript::create("Invoices").with_team("acme"))
            .await
            .unwrap();

        assert!(report.created());
        assert_eq!(report.navigations.len(), 1);
        assert!(report.navigations[0].starts_with("/t/acme/templates/f/"));
        assert_eq!(report.final_state.phase, DialogPhase::Closed);
    }

    #[tokio::test]
    async fn existing_name_conflicts_and_keeps_input() {
        let script = SessionScript::create("Invoices")
            .with_parent("p1")
            .with_existing("Invoices");
        let report = run_session(DialogConfig::default(), &script).await.unwrap();

        assert!(!report.created());
        assert!(matches!(&report.submissions[0], SubmitOutcome::Failed(e) if e.is_conflict()));
        assert_eq!(report.final_state.phase, DialogPhase::Idle);
        assert_eq!(report.final_state.name, "Invoices");
        assert!(report.navigations.is_empty());
    }

    #[test]
    fn script_parses_from_json() {
        let script: SessionScript = serde_json::from_str(
            r#"{ "existing": ["A"], "steps": [
                { "action": "open" },
                { "action": "set_name", "value": "B" },
                { "action": "submit" }
            ] }"#,
        )
        .unwrap();
        assert_eq!(script.steps.len(), 3);
        assert_eq!(script.steps[1], SessionStep::SetName("B".into()));
    }
}
