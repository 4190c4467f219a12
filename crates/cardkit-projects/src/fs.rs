//! File-backed project store.
//!
//! One JSON file per project under a directory. Useful for local-first
//! sessions and as a reference implementation of the store contract.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::error::{ProjectError, ProjectResult};
use crate::model::{Project, ProjectDraft, ProjectFilter, ProjectUpdate};
use crate::traits::ProjectStore;

#[derive(Debug, Clone)]
pub struct FsProjectStore {
    directory: PathBuf,
}

impl FsProjectStore {
    /// Opens a store rooted at a directory, creating it if needed.
    pub async fn open(directory: impl AsRef<Path>) -> ProjectResult<Self> {
        let directory = directory.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&directory).await?;
        Ok(Self { directory })
    }

    fn path_for(&self, id: Uuid) -> PathBuf {
        self.directory.join(format!("{id}.json"))
    }

    async fn read(&self, id: Uuid) -> ProjectResult<Project> {
        let bytes = match tokio::fs::read(self.path_for(id)).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(ProjectError::ProjectNotFound(id));
            }
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn write(&self, project: &Project) -> ProjectResult<()> {
        let bytes = serde_json::to_vec_pretty(project)?;
        tokio::fs::write(self.path_for(project.id), bytes).await?;
        Ok(())
    }
}

#[async_trait]
impl ProjectStore for FsProjectStore {
    async fn create_project(&self, draft: ProjectDraft) -> ProjectResult<Project> {
        let project = Project::from_draft(draft, Utc::now());
        self.write(&project).await?;
        debug!(id = %project.id, "project file created");
        Ok(project)
    }

    async fn get_project(&self, id: Uuid) -> ProjectResult<Project> {
        self.read(id).await
    }

    async fn update_project(&self, id: Uuid, update: ProjectUpdate) -> ProjectResult<Project> {
        let mut project = self.read(id).await?;
        update.apply_to(&mut project);
        project.version += 1;
        project.updated_at = Utc::now();
        self.write(&project).await?;
        Ok(project)
    }

    async fn delete_project(&self, id: Uuid) -> ProjectResult<()> {
        match tokio::fs::remove_file(self.path_for(id)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(ProjectError::ProjectNotFound(id))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn list_projects(&self, filter: ProjectFilter) -> ProjectResult<Vec<Project>> {
        let mut out = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.directory).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension() != Some(std::ffi::OsStr::new("json")) {
                continue;
            }
            let bytes = tokio::fs::read(&path).await?;
            match serde_json::from_slice::<Project>(&bytes) {
                Ok(project) if filter.matches(&project) => out.push(project),
                Ok(_) => {}
                Err(err) => {
                    // One unreadable file must not hide the rest.
                    tracing::warn!(path = %path.display(), %err, "skipping unreadable project file");
                }
            }
        }
        out.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(out)
    }

    async fn touch_last_opened(&self, id: Uuid) -> ProjectResult<()> {
        let mut project = self.read(id).await?;
        project.last_opened_at = Utc::now();
        self.write(&project).await
    }
}
