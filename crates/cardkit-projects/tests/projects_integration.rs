//! End-to-end persistence bridge behavior over the in-memory store.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

use cardkit_designer::EditorSession;
use cardkit_projects::{
    MemoryProjectStore, Project, ProjectBridge, ProjectDraft, ProjectError, ProjectFilter,
    ProjectResult, ProjectStore, ProjectUpdate, SaveOptions, SkiaThumbnailer,
};

fn bridge_over(store: Arc<dyn ProjectStore>) -> ProjectBridge {
    ProjectBridge::new(store, Arc::new(SkiaThumbnailer))
}

#[tokio::test]
async fn test_save_new_then_update_bumps_version() {
    let store = Arc::new(MemoryProjectStore::new());
    let mut bridge = bridge_over(store);
    let mut session = EditorSession::new();
    session.add_rect(10.0, 10.0, 100.0, 50.0);

    let created = bridge
        .save(
            &mut session,
            SaveOptions {
                create_new: true,
                name: Some("Invite".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(created.version, 1);
    assert!(!session.is_dirty());
    assert!(created.thumbnail.is_some());

    session.add_circle(50.0, 50.0, 20.0);
    assert!(session.is_dirty());

    let updated = bridge
        .save(&mut session, SaveOptions::default())
        .await
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.version, 2);
    assert!(updated.updated_at > created.updated_at);
    assert!(!session.is_dirty());
}

#[tokio::test]
async fn test_load_restores_document_and_refreshes_last_opened() {
    let store = Arc::new(MemoryProjectStore::new());
    let mut bridge = bridge_over(store.clone());
    let mut session = EditorSession::new();
    session.add_text("Save the date", 40.0, 60.0);
    session.resize_canvas(500.0, 700.0);

    let saved = bridge
        .save(&mut session, SaveOptions::default())
        .await
        .unwrap();
    let document = session.document().clone();

    // A fresh session, as after switching projects.
    let mut restored = EditorSession::new();
    let outcome = bridge.load(&mut restored, saved.id).await.unwrap();
    assert!(!outcome.used_fallback);
    assert_eq!(restored.document(), &document);
    assert!(!restored.is_dirty());

    let fetched = store.get_project(saved.id).await.unwrap();
    assert!(fetched.last_opened_at > saved.last_opened_at);
}

#[tokio::test]
async fn test_corrupt_design_data_falls_back_to_default() {
    let store = Arc::new(MemoryProjectStore::new());
    let broken = store
        .create_project(ProjectDraft {
            name: "Broken".to_string(),
            design_data: json!([1, 2, 3]),
            canvas_width: 600.0,
            canvas_height: 800.0,
            canvas_rotation: 0,
            background_color: "#ffffff".to_string(),
            background_kind: "color".to_string(),
            background_gradient: None,
            thumbnail: None,
            is_template: false,
            tags: Vec::new(),
        })
        .await
        .unwrap();

    let mut bridge = bridge_over(store);
    let mut session = EditorSession::new();
    session.add_rect(0.0, 0.0, 10.0, 10.0);

    let outcome = bridge.load(&mut session, broken.id).await.unwrap();
    assert!(outcome.used_fallback);
    // The session is usable on the documented default document.
    assert!(session.document().is_empty());
    assert_eq!(session.document().width, 600.0);
    assert!(!session.is_dirty());
}

#[tokio::test]
async fn test_autosave_fires_after_quiet_period() {
    let store = Arc::new(MemoryProjectStore::new());
    let mut bridge = ProjectBridge::with_autosave_delay(
        store,
        Arc::new(SkiaThumbnailer),
        Duration::from_millis(50),
    );
    let mut session = EditorSession::new();

    let created = bridge
        .save(&mut session, SaveOptions::default())
        .await
        .unwrap();

    session.add_rect(0.0, 0.0, 10.0, 10.0);
    // Too soon: the edit arms the timer but the delay has not elapsed.
    assert!(bridge.maybe_autosave(&mut session).await.is_none());

    tokio::time::sleep(Duration::from_millis(80)).await;
    let saved = bridge
        .maybe_autosave(&mut session)
        .await
        .expect("autosave due")
        .unwrap();
    assert_eq!(saved.version, created.version + 1);
    assert!(!session.is_dirty());

    // Clean session: nothing further to autosave.
    tokio::time::sleep(Duration::from_millis(80)).await;
    assert!(bridge.maybe_autosave(&mut session).await.is_none());
}

#[tokio::test]
async fn test_autosave_debounces_on_new_edits() {
    let store = Arc::new(MemoryProjectStore::new());
    let mut bridge = ProjectBridge::with_autosave_delay(
        store,
        Arc::new(SkiaThumbnailer),
        Duration::from_millis(80),
    );
    let mut session = EditorSession::new();
    bridge
        .save(&mut session, SaveOptions::default())
        .await
        .unwrap();

    session.add_rect(0.0, 0.0, 10.0, 10.0);
    assert!(bridge.maybe_autosave(&mut session).await.is_none());

    tokio::time::sleep(Duration::from_millis(50)).await;
    // A new edit restarts the countdown.
    session.add_circle(5.0, 5.0, 2.0);
    assert!(bridge.maybe_autosave(&mut session).await.is_none());

    tokio::time::sleep(Duration::from_millis(50)).await;
    // 100ms after the first edit but only 50ms after the last.
    assert!(bridge.maybe_autosave(&mut session).await.is_none());

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(bridge.maybe_autosave(&mut session).await.is_some());
}

/// Store double whose writes always fail.
struct FailingStore;

#[async_trait]
impl ProjectStore for FailingStore {
    async fn create_project(&self, _draft: ProjectDraft) -> ProjectResult<Project> {
        Err(ProjectError::Storage("backend offline".to_string()))
    }
    async fn get_project(&self, id: Uuid) -> ProjectResult<Project> {
        Err(ProjectError::ProjectNotFound(id))
    }
    async fn update_project(&self, _id: Uuid, _update: ProjectUpdate) -> ProjectResult<Project> {
        Err(ProjectError::Storage("backend offline".to_string()))
    }
    async fn delete_project(&self, _id: Uuid) -> ProjectResult<()> {
        Err(ProjectError::Storage("backend offline".to_string()))
    }
    async fn list_projects(&self, _filter: ProjectFilter) -> ProjectResult<Vec<Project>> {
        Ok(Vec::new())
    }
    async fn touch_last_opened(&self, _id: Uuid) -> ProjectResult<()> {
        Err(ProjectError::Storage("backend offline".to_string()))
    }
}

#[tokio::test]
async fn test_failed_save_keeps_dirty_and_document_intact() {
    let mut bridge = bridge_over(Arc::new(FailingStore));
    let mut session = EditorSession::new();
    session.add_rect(0.0, 0.0, 10.0, 10.0);
    let document = session.document().clone();

    let err = bridge
        .save(&mut session, SaveOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ProjectError::Storage(_)));
    assert!(session.is_dirty());
    assert_eq!(session.document(), &document);
    // Still usable for continued local editing.
    session.add_circle(5.0, 5.0, 2.0);
    assert_eq!(session.document().len(), 2);
}

#[tokio::test]
async fn test_close_attempts_final_save_and_survives_failure() {
    // Failing backend: close must not error out or panic.
    let mut bridge = bridge_over(Arc::new(FailingStore));
    let mut session = EditorSession::new();
    session.add_rect(0.0, 0.0, 10.0, 10.0);
    bridge.close(&mut session).await;
    assert!(bridge.open_project().is_none());

    // Working backend: the pending change lands in the final save.
    let store = Arc::new(MemoryProjectStore::new());
    let mut bridge = bridge_over(store.clone());
    let mut session = EditorSession::new();
    let created = bridge
        .save(&mut session, SaveOptions::default())
        .await
        .unwrap();
    session.add_rect(0.0, 0.0, 10.0, 10.0);
    bridge.close(&mut session).await;

    let fetched = store.get_project(created.id).await.unwrap();
    assert_eq!(fetched.version, 2);
}
