//! Core types for folder creation
//!
//! Identifiers, the request/record pair exchanged with the gateway, and the
//! ambient context (parent folder, tenant) a dialog reads at submit time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Folder identifier assigned by the remote service
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FolderId(String);

impl FolderId {
    /// Wrap a raw identifier
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FolderId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for FolderId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Team (tenant) identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(pub u64);

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a folder groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FolderKind {
    /// Template folders
    #[default]
    Template,
    /// Document folders
    Document,
}

impl FolderKind {
    /// Listing path segment for this kind
    #[inline]
    #[must_use]
    pub fn listing_segment(self) -> &'static str {
        match self {
            Self::Template => "templates",
            Self::Document => "documents",
        }
    }

    /// Stable lowercase name
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Template => "template",
            Self::Document => "document",
        }
    }
}

impl fmt::Display for FolderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FolderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "template" | "templates" => Ok(Self::Template),
            "document" | "documents" => Ok(Self::Document),
            other => Err(format!("unknown folder kind: {other}")),
        }
    }
}

/// Tenant scoping supplied by the host application
///
/// Read-only to the dialog. `url` is the team's URL slug used in paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TenantContext {
    /// Team identifier, sent with the request
    pub id: TeamId,
    /// Team URL slug
    pub url: String,
}

impl TenantContext {
    /// Create a tenant context
    #[inline]
    #[must_use]
    pub fn new(id: TeamId, url: impl Into<String>) -> Self {
        Self {
            id,
            url: url.into(),
        }
    }
}

/// Ambient inputs a dialog reads when building a request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialogContext {
    /// Parent folder taken from the current route
    pub parent_id: Option<FolderId>,
    /// Current team, if any
    pub tenant: Option<TenantContext>,
}

impl DialogContext {
    /// Empty context: root folder, no team
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With parent folder
    #[inline]
    #[must_use]
    pub fn with_parent(mut self, parent_id: impl Into<FolderId>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// With tenant
    #[inline]
    #[must_use]
    pub fn with_tenant(mut self, tenant: TenantContext) -> Self {
        self.tenant = Some(tenant);
        self
    }
}

/// Request sent to the creation gateway
///
/// Built fresh for every submission and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFolderRequest {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_id: Option<FolderId>,
    #[serde(rename = "type")]
    kind: FolderKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    team_id: Option<TeamId>,
}

impl CreateFolderRequest {
    /// Build a request from validated input and context
    #[must_use]
    pub fn new(name: impl Into<String>, kind: FolderKind, context: &DialogContext) -> Self {
        Self {
            name: name.into(),
            parent_id: context.parent_id.clone(),
            kind,
            team_id: context.tenant.as_ref().map(|t| t.id),
        }
    }

    /// Folder name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parent folder, if nested
    #[inline]
    #[must_use]
    pub fn parent_id(&self) -> Option<&FolderId> {
        self.parent_id.as_ref()
    }

    /// Folder kind
    #[inline]
    #[must_use]
    pub fn kind(&self) -> FolderKind {
        self.kind
    }

    /// Team scope
    #[inline]
    #[must_use]
    pub fn team_id(&self) -> Option<TeamId> {
        self.team_id
    }
}

/// Folder as returned by the remote service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderRecord {
    /// Assigned identifier
    pub id: FolderId,
    /// Folder name
    pub name: String,
    /// Parent folder
    #[serde(default)]
    pub parent_id: Option<FolderId>,
    /// Folder kind
    #[serde(rename = "type")]
    pub kind: FolderKind,
    /// Owning team
    #[serde(default)]
    pub team_id: Option<TeamId>,
}

impl FolderRecord {
    /// Record with only id and name set (root, template, no team)
    #[must_use]
    pub fn new(id: impl Into<FolderId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_id: None,
            kind: FolderKind::Template,
            team_id: None,
        }
    }

    /// Record matching a request, with the given id
    #[must_use]
    pub fn from_request(id: impl Into<FolderId>, request: &CreateFolderRequest) -> Self {
        Self {
            id: id.into(),
            name: request.name.clone(),
            parent_id: request.parent_id.clone(),
            kind: request.kind,
            team_id: request.team_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_takes_scope_from_context() {
        let ctx = DialogContext::new()
            .with_parent("p1")
            .with_tenant(TenantContext::new(TeamId(7), "acme"));
        let req = CreateFolderRequest::new("Invoices", FolderKind::Document, &ctx);

        assert_eq!(req.name(), "Invoices");
        assert_eq!(req.parent_id(), Some(&FolderId::new("p1")));
        assert_eq!(req.kind(), FolderKind::Document);
        assert_eq!(req.team_id(), Some(TeamId(7)));
    }

    #[test]
    fn request_serializes_wire_shape() {
        let req = CreateFolderRequest::new("A", FolderKind::Template, &DialogContext::new());
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "A", "type": "template" }));
    }

    #[test]
    fn folder_kind_parses() {
        assert_eq!("Templates".parse::<FolderKind>().unwrap(), FolderKind::Template);
        assert_eq!("document".parse::<FolderKind>().unwrap(), FolderKind::Document);
        assert!("archive".parse::<FolderKind>().is_err());
    }
}
