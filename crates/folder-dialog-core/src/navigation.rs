//! Post-create navigation
//!
//! Paths look like `/templates/f/<id>` without a tenant and
//! `/t/<team-url>/templates/f/<id>` with one. The listing segment follows the
//! kind the dialog was configured for, not whatever the service echoes back.

use crate::types::{FolderId, FolderKind, TenantContext};

/// Computes where to go after a folder is created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationPlanner {
    folder_segment: String,
}

impl NavigationPlanner {
    /// Planner with the given folder segment (normally `f`)
    #[inline]
    #[must_use]
    pub fn new(folder_segment: impl Into<String>) -> Self {
        Self {
            folder_segment: folder_segment.into(),
        }
    }

    /// Listing path for a kind, scoped to the tenant if any
    #[must_use]
    pub fn listing_path(kind: FolderKind, tenant: Option<&TenantContext>) -> String {
        match tenant {
            Some(tenant) => format!("/t/{}/{}", tenant.url, kind.listing_segment()),
            None => format!("/{}", kind.listing_segment()),
        }
    }

    /// Destination path for a newly created folder
    #[must_use]
    pub fn path_for(
        &self,
        kind: FolderKind,
        id: &FolderId,
        tenant: Option<&TenantContext>,
    ) -> String {
        format!(
            "{}/{}/{}",
            Self::listing_path(kind, tenant),
            self.folder_segment,
            id
        )
    }
}

impl Default for NavigationPlanner {
    fn default() -> Self {
        Self::new("f")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TeamId;

    fn id(raw: &str) -> FolderId {
        FolderId::new(raw)
    }

    #[test]
    fn root_path_without_tenant() {
        let path = NavigationPlanner::default().path_for(FolderKind::Template, &id("abc"), None);
        assert_eq!(path, "/templates/f/abc");
    }

    #[test]
    fn tenant_scoped_path() {
        let tenant = TenantContext::new(TeamId(3), "acme");
        let path = NavigationPlanner::default().path_for(
            FolderKind::Template,
            &id("abc"),
            Some(&tenant),
        );
        assert_eq!(path, "/t/acme/templates/f/abc");
    }

    #[test]
    fn document_folders_use_documents_listing() {
        let path = NavigationPlanner::default().path_for(FolderKind::Document, &id("d1"), None);
        assert_eq!(path, "/documents/f/d1");
    }

    #[test]
    fn custom_segment() {
        let path = NavigationPlanner::new("folder").path_for(FolderKind::Template, &id("x"), None);
        assert_eq!(path, "/templates/folder/x");
    }
}
