//! The external persistence collaborator contract.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ProjectResult;
use crate::model::{Project, ProjectDraft, ProjectFilter, ProjectUpdate};

/// Abstract project persistence API.
///
/// Implementations must uphold the version contract: a created project
/// starts at version 1, and every successful update increments the
/// version by exactly 1 and refreshes `updated_at`.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn create_project(&self, draft: ProjectDraft) -> ProjectResult<Project>;

    async fn get_project(&self, id: Uuid) -> ProjectResult<Project>;

    async fn update_project(&self, id: Uuid, update: ProjectUpdate) -> ProjectResult<Project>;

    async fn delete_project(&self, id: Uuid) -> ProjectResult<()>;

    async fn list_projects(&self, filter: ProjectFilter) -> ProjectResult<Vec<Project>>;

    /// Refreshes `last_opened_at`. Invoked best-effort after a load; it
    /// does not bump the version.
    async fn touch_last_opened(&self, id: Uuid) -> ProjectResult<()>;
}
