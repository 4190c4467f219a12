//! The persistence bridge: maps the in-memory session to and from
//! durable project records.
//!
//! Store calls are async and never mutate the document; the document
//! stays exclusively owned by the single editing session. If the
//! document changes while a save is in flight, the session's edit stamp
//! keeps the dirty flag set so a later autosave still fires.

use std::sync::Arc;
use std::time::{Duration, Instant};

use base64::Engine as _;
use tracing::{debug, warn};
use uuid::Uuid;

use cardkit_core::constants::AUTOSAVE_DELAY_SECS;
use cardkit_designer::serialization::{self, DesignData};
use cardkit_designer::{BackgroundKind, EditorSession};

use crate::error::ProjectResult;
use crate::model::{Project, ProjectDraft, ProjectUpdate};
use crate::thumbnail::Thumbnailer;
use crate::traits::ProjectStore;

/// Debounced autosave deadline: restarted on every edit so it fires a
/// fixed delay after the *last* edit, not on a wall-clock cadence.
#[derive(Debug, Clone)]
pub struct AutosaveTimer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl AutosaveTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// (Re)starts the countdown from `now`.
    pub fn restart(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn clear(&mut self) {
        self.deadline = None;
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now >= deadline)
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }
}

/// Options for [`ProjectBridge::save`].
#[derive(Debug, Clone, Default)]
pub struct SaveOptions {
    /// Force creation of a new project even when one is open.
    pub create_new: bool,
    /// Rename on save; `None` keeps the stored name.
    pub name: Option<String>,
}

/// The project currently bound to the session.
#[derive(Debug, Clone)]
pub struct OpenProject {
    pub id: Uuid,
    pub name: String,
    pub version: i64,
}

/// Outcome of a load, flagging the corrupt-data fallback.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub project: Project,
    /// True when the stored design data was unreadable and the default
    /// empty document was installed instead.
    pub used_fallback: bool,
}

pub struct ProjectBridge {
    store: Arc<dyn ProjectStore>,
    thumbnailer: Arc<dyn Thumbnailer>,
    open: Option<OpenProject>,
    autosave: AutosaveTimer,
    last_seen_stamp: u64,
}

impl ProjectBridge {
    pub fn new(store: Arc<dyn ProjectStore>, thumbnailer: Arc<dyn Thumbnailer>) -> Self {
        Self::with_autosave_delay(store, thumbnailer, Duration::from_secs(AUTOSAVE_DELAY_SECS))
    }

    pub fn with_autosave_delay(
        store: Arc<dyn ProjectStore>,
        thumbnailer: Arc<dyn Thumbnailer>,
        delay: Duration,
    ) -> Self {
        Self {
            store,
            thumbnailer,
            open: None,
            autosave: AutosaveTimer::new(delay),
            last_seen_stamp: 0,
        }
    }

    pub fn open_project(&self) -> Option<&OpenProject> {
        self.open.as_ref()
    }

    /// Saves the session. Creates a new project when requested or when
    /// none is open; otherwise updates the open one, which bumps its
    /// version by 1. On failure the dirty flag stays set and the
    /// in-memory state is untouched.
    pub async fn save(
        &mut self,
        session: &mut EditorSession,
        options: SaveOptions,
    ) -> ProjectResult<Project> {
        let stamp = session.edit_stamp();
        let design = serialization::serialize_design(session.document(), session.panel());
        let design_data = serialization::to_value(&design)?;
        let thumbnail = self.capture_thumbnail(session);

        let document = session.document();
        let background_kind = background_kind_name(document.background.kind).to_string();
        let background_gradient = serde_json::to_value(&document.background.gradient).ok();

        let project = match (&self.open, options.create_new) {
            (Some(open), false) => {
                let update = ProjectUpdate {
                    name: options.name,
                    design_data: Some(design_data),
                    canvas_width: Some(document.width),
                    canvas_height: Some(document.height),
                    canvas_rotation: Some(document.rotation_degrees),
                    background_color: Some(document.background.color.as_hex().to_string()),
                    background_kind: Some(background_kind),
                    background_gradient: Some(background_gradient),
                    thumbnail: Some(thumbnail),
                    ..Default::default()
                };
                self.store.update_project(open.id, update).await?
            }
            _ => {
                let draft = ProjectDraft {
                    name: options.name.unwrap_or_else(|| "Untitled".to_string()),
                    design_data,
                    canvas_width: document.width,
                    canvas_height: document.height,
                    canvas_rotation: document.rotation_degrees,
                    background_color: document.background.color.as_hex().to_string(),
                    background_kind,
                    background_gradient,
                    thumbnail,
                    is_template: false,
                    tags: Vec::new(),
                };
                self.store.create_project(draft).await?
            }
        };

        self.open = Some(OpenProject {
            id: project.id,
            name: project.name.clone(),
            version: project.version,
        });
        session.mark_saved(stamp);
        self.autosave.clear();
        self.last_seen_stamp = session.edit_stamp();
        debug!(id = %project.id, version = project.version, "project saved");
        Ok(project)
    }

    /// Loads a project into the session. Corrupt design data falls back
    /// to the default empty document instead of failing the session;
    /// the `last_opened_at` refresh is best-effort.
    pub async fn load(
        &mut self,
        session: &mut EditorSession,
        id: Uuid,
    ) -> ProjectResult<LoadOutcome> {
        let project = self.store.get_project(id).await?;

        let (design, used_fallback) = match serialization::from_value(project.design_data.clone())
        {
            Ok(design) => (design, false),
            Err(err) => {
                warn!(id = %id, %err, "stored design data unreadable, using default document");
                (DesignData::default(), true)
            }
        };
        session.load_design(design);
        self.open = Some(OpenProject {
            id: project.id,
            name: project.name.clone(),
            version: project.version,
        });
        self.autosave.clear();
        self.last_seen_stamp = session.edit_stamp();

        if let Err(err) = self.store.touch_last_opened(id).await {
            warn!(id = %id, %err, "could not refresh last_opened_at");
        }
        Ok(LoadOutcome {
            project,
            used_fallback,
        })
    }

    /// Observes session edits and fires a save once the debounce delay
    /// has passed with no further edits. Call from the host's idle loop.
    pub async fn maybe_autosave(
        &mut self,
        session: &mut EditorSession,
    ) -> Option<ProjectResult<Project>> {
        let now = Instant::now();
        if session.edit_stamp() != self.last_seen_stamp {
            self.last_seen_stamp = session.edit_stamp();
            if session.is_dirty() {
                self.autosave.restart(now);
            }
        }
        if self.open.is_some() && session.is_dirty() && self.autosave.is_due(now) {
            self.autosave.clear();
            debug!("autosave firing");
            return Some(self.save(session, SaveOptions::default()).await);
        }
        None
    }

    /// Closes the open project with a best-effort final save; the
    /// session is discarded by the caller regardless of the outcome.
    pub async fn close(&mut self, session: &mut EditorSession) {
        if self.open.is_some() && session.is_dirty() {
            if let Err(err) = self.save(session, SaveOptions::default()).await {
                warn!(%err, "final save failed, discarding anyway");
            }
        }
        self.open = None;
        self.autosave.clear();
    }

    fn capture_thumbnail(&self, session: &EditorSession) -> Option<String> {
        match self.thumbnailer.render_png(session.document()) {
            Ok(png) => Some(base64::engine::general_purpose::STANDARD.encode(png)),
            Err(err) => {
                // A failed thumbnail must not block the save itself.
                warn!(%err, "thumbnail capture failed");
                None
            }
        }
    }
}

fn background_kind_name(kind: BackgroundKind) -> &'static str {
    match kind {
        BackgroundKind::Color => "color",
        BackgroundKind::Gradient => "gradient",
        BackgroundKind::Image => "image",
    }
}

impl std::fmt::Debug for ProjectBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectBridge")
            .field("open", &self.open)
            .field("autosave", &self.autosave)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_fires_after_delay() {
        let mut timer = AutosaveTimer::new(Duration::from_secs(30));
        let t0 = Instant::now();
        assert!(!timer.is_due(t0));

        timer.restart(t0);
        assert!(!timer.is_due(t0 + Duration::from_secs(29)));
        assert!(timer.is_due(t0 + Duration::from_secs(30)));
    }

    #[test]
    fn test_timer_debounces_on_new_edits() {
        let mut timer = AutosaveTimer::new(Duration::from_secs(30));
        let t0 = Instant::now();
        timer.restart(t0);
        // A later edit pushes the deadline out.
        timer.restart(t0 + Duration::from_secs(20));
        assert!(!timer.is_due(t0 + Duration::from_secs(35)));
        assert!(timer.is_due(t0 + Duration::from_secs(50)));
    }

    #[test]
    fn test_timer_clear_disarms() {
        let mut timer = AutosaveTimer::new(Duration::from_secs(30));
        let t0 = Instant::now();
        timer.restart(t0);
        timer.clear();
        assert!(!timer.is_armed());
        assert!(!timer.is_due(t0 + Duration::from_secs(60)));
    }
}
