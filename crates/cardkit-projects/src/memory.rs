//! In-memory project store.
//!
//! The default collaborator for tests and offline sessions; enforces
//! the same version and timestamp contract as any real backend.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ProjectError, ProjectResult};
use crate::model::{Project, ProjectDraft, ProjectFilter, ProjectUpdate};
use crate::traits::ProjectStore;

#[derive(Debug, Default)]
pub struct MemoryProjectStore {
    projects: RwLock<HashMap<Uuid, Project>>,
}

impl MemoryProjectStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectStore for MemoryProjectStore {
    async fn create_project(&self, draft: ProjectDraft) -> ProjectResult<Project> {
        let project = Project::from_draft(draft, Utc::now());
        self.projects
            .write()
            .await
            .insert(project.id, project.clone());
        Ok(project)
    }

    async fn get_project(&self, id: Uuid) -> ProjectResult<Project> {
        self.projects
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(ProjectError::ProjectNotFound(id))
    }

    async fn update_project(&self, id: Uuid, update: ProjectUpdate) -> ProjectResult<Project> {
        let mut projects = self.projects.write().await;
        let project = projects
            .get_mut(&id)
            .ok_or(ProjectError::ProjectNotFound(id))?;
        update.apply_to(project);
        project.version += 1;
        project.updated_at = Utc::now();
        Ok(project.clone())
    }

    async fn delete_project(&self, id: Uuid) -> ProjectResult<()> {
        self.projects
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(ProjectError::ProjectNotFound(id))
    }

    async fn list_projects(&self, filter: ProjectFilter) -> ProjectResult<Vec<Project>> {
        let projects = self.projects.read().await;
        let mut out: Vec<Project> = projects
            .values()
            .filter(|project| filter.matches(project))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(out)
    }

    async fn touch_last_opened(&self, id: Uuid) -> ProjectResult<()> {
        let mut projects = self.projects.write().await;
        let project = projects
            .get_mut(&id)
            .ok_or(ProjectError::ProjectNotFound(id))?;
        project.last_opened_at = Utc::now();
        Ok(())
    }
}
