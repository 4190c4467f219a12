//! The editing session: the interaction layer over a canvas document.
//!
//! Owns the document, history stack, clipboard slot, selection and dirty
//! flag. Every structurally completed mutation is checkpointed here, so
//! keyboard shortcuts, panel buttons and programmatic callers all share
//! one code path. Lock enforcement also lives here: locked objects are
//! not selectable, movable, rotatable or scalable, while document-level
//! property updates deliberately bypass the lock (it is a UI affordance,
//! not a data-integrity guarantee).

use base64::Engine as _;
use tracing::debug;

use cardkit_core::constants::{IMAGE_FIT_BOX, PASTE_OFFSET};
use cardkit_core::Point;

use crate::background::{Background, BackgroundImage, BackgroundKind, BackgroundPatch, ImageFit};
use crate::clipboard::ClipboardSlot;
use crate::document::{CanvasDocument, ObjectPatch};
use crate::error::{DesignerError, DesignerResult};
use crate::history::HistoryStack;
use crate::model::{ImageObject, ObjectId, PolygonObject};
use crate::serialization::{DesignData, PanelState};

/// In-progress drag/resize/rotate gesture. Frames mutate the document
/// directly; only the completed gesture is checkpointed.
#[derive(Debug, Clone, Copy)]
struct Gesture {
    moved: bool,
}

/// A single-user editing session over one canvas document.
#[derive(Debug, Clone)]
pub struct EditorSession {
    document: CanvasDocument,
    history: HistoryStack,
    clipboard: ClipboardSlot,
    selection: Option<ObjectId>,
    panel: PanelState,
    dirty: bool,
    edits: u64,
    gesture: Option<Gesture>,
}

impl EditorSession {
    /// Opens a session over an empty canvas. The empty state is itself
    /// recorded so applying a template can be undone back to it.
    pub fn new() -> Self {
        let document = CanvasDocument::default();
        let mut history = HistoryStack::new();
        history.checkpoint(&document);
        Self {
            document,
            history,
            clipboard: ClipboardSlot::new(),
            selection: None,
            panel: PanelState::default(),
            dirty: false,
            edits: 0,
            gesture: None,
        }
    }

    /// Replaces the document with a template. Checkpointed, so an
    /// immediate undo returns to the state before the template landed.
    pub fn apply_template(&mut self, template: CanvasDocument) {
        self.document = template;
        self.selection = None;
        self.commit();
    }

    pub fn document(&self) -> &CanvasDocument {
        &self.document
    }

    pub fn panel(&self) -> &PanelState {
        &self.panel
    }

    /// Updates panel state (active tool, grid, default style). Auxiliary
    /// UI state: persisted with the design but not checkpoint-worthy.
    pub fn set_panel(&mut self, panel: PanelState) {
        self.panel = panel;
    }

    pub fn selection(&self) -> Option<ObjectId> {
        self.selection
    }

    fn commit(&mut self) {
        self.history.checkpoint(&self.document);
        self.dirty = true;
        self.edits += 1;
    }

    // ------------------------------------------------------------------
    // Object creation
    // ------------------------------------------------------------------

    pub fn add_text(&mut self, content: impl Into<String>, x: f64, y: f64) -> ObjectId {
        let id = self
            .document
            .add_text(content, x, y, &self.panel.defaults);
        self.selection = Some(id);
        self.commit();
        id
    }

    pub fn add_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> ObjectId {
        let id = self
            .document
            .add_rect(x, y, width, height, &self.panel.defaults);
        self.selection = Some(id);
        self.commit();
        id
    }

    pub fn add_circle(&mut self, cx: f64, cy: f64, radius: f64) -> ObjectId {
        let id = self
            .document
            .add_circle(cx, cy, radius, &self.panel.defaults);
        self.selection = Some(id);
        self.commit();
        id
    }

    pub fn add_triangle(&mut self, x: f64, y: f64, width: f64, height: f64) -> ObjectId {
        let id = self
            .document
            .add_triangle(x, y, width, height, &self.panel.defaults);
        self.selection = Some(id);
        self.commit();
        id
    }

    pub fn add_polygon(&mut self, cx: f64, cy: f64, polygon: PolygonObject) -> ObjectId {
        let id = self
            .document
            .add_polygon(cx, cy, polygon, &self.panel.defaults);
        self.selection = Some(id);
        self.commit();
        id
    }

    pub fn add_line(&mut self, start: Point, end: Point) -> ObjectId {
        let id = self
            .document
            .add_line(start, end, &self.panel.defaults);
        self.selection = Some(id);
        self.commit();
        id
    }

    pub fn group(&mut self, ids: &[ObjectId]) -> Option<ObjectId> {
        let id = self
            .document
            .group_objects(ids, &self.panel.defaults)?;
        self.selection = Some(id);
        self.commit();
        Some(id)
    }

    /// Inserts an uploaded image. The bytes are probed for natural
    /// dimensions and kept as an opaque data URI; the object is scaled
    /// to fit the standard box and centered on the canvas.
    pub fn insert_image(&mut self, bytes: &[u8]) -> DesignerResult<ObjectId> {
        let (width, height) = probe_image(bytes)?;
        let image = ImageObject::new(data_uri(bytes), f64::from(width), f64::from(height));
        let scale = image.fit_scale(IMAGE_FIT_BOX);
        let x = (self.document.width - image.natural_width * scale) / 2.0;
        let y = (self.document.height - image.natural_height * scale) / 2.0;
        let id = self
            .document
            .add_image(image, x, y, &self.panel.defaults);
        if let Some(object) = self.document.get_mut(id) {
            object.transform.set_scale(scale, scale);
        }
        self.selection = Some(id);
        self.commit();
        Ok(id)
    }

    /// Installs an uploaded image as the canvas background.
    pub fn set_background_image(&mut self, bytes: &[u8]) -> DesignerResult<()> {
        probe_image(bytes)?;
        self.document.patch_background(BackgroundPatch {
            kind: Some(BackgroundKind::Image),
            image: Some(BackgroundImage {
                source: data_uri(bytes),
                fit: ImageFit::Cover,
            }),
            ..Default::default()
        });
        self.commit();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Removal, update, selection
    // ------------------------------------------------------------------

    /// Removes an object (and group children). Unknown ids no-op so
    /// delete buttons stay idempotent.
    pub fn remove_object(&mut self, id: ObjectId) {
        if self.document.remove_object(id) == 0 {
            return;
        }
        if self
            .selection
            .is_some_and(|selected| !self.document.contains(selected))
        {
            self.selection = None;
        }
        self.commit();
    }

    pub fn delete_selection(&mut self) {
        if let Some(id) = self.selection {
            self.remove_object(id);
        }
    }

    /// Applies a property patch. Bypasses the lock flag by design so
    /// property-panel edits and restores work on locked objects.
    pub fn update_object(&mut self, id: ObjectId, patch: &ObjectPatch) -> DesignerResult<()> {
        self.document.update_object(id, patch)?;
        self.commit();
        Ok(())
    }

    /// Selects an object. Locked and unknown objects are not selectable;
    /// both are benign no-ops that report failure.
    pub fn select(&mut self, id: ObjectId) -> bool {
        match self.document.get(id) {
            Some(object) if !object.locked => {
                self.selection = Some(id);
                true
            }
            _ => false,
        }
    }

    pub fn deselect(&mut self) {
        self.selection = None;
    }

    // ------------------------------------------------------------------
    // Interaction-layer transforms (lock-enforced)
    // ------------------------------------------------------------------

    /// Moves an object by a delta. Refused for locked objects.
    pub fn try_move(&mut self, id: ObjectId, dx: f64, dy: f64) -> bool {
        if !self.unlocked(id) {
            return false;
        }
        if let Some(object) = self.document.get_mut(id) {
            object.transform.translate(dx, dy);
            self.commit();
            return true;
        }
        false
    }

    /// Sets an object's rotation. Refused for locked objects.
    pub fn try_rotate(&mut self, id: ObjectId, angle_degrees: f64) -> bool {
        if !self.unlocked(id) {
            return false;
        }
        if let Some(object) = self.document.get_mut(id) {
            object.transform.angle_degrees = angle_degrees;
            self.commit();
            return true;
        }
        false
    }

    /// Multiplies an object's scale. Refused for locked objects; zero
    /// factors are clamped by the transform itself.
    pub fn try_scale(&mut self, id: ObjectId, sx: f64, sy: f64) -> bool {
        if !self.unlocked(id) {
            return false;
        }
        if let Some(object) = self.document.get_mut(id) {
            object.transform.scale_by(sx, sy);
            self.commit();
            return true;
        }
        false
    }

    fn unlocked(&self, id: ObjectId) -> bool {
        self.document.get(id).is_some_and(|object| !object.locked)
    }

    /// Starts a drag gesture on the selection. Frames mutate without
    /// checkpointing; [`EditorSession::end_drag`] records the result.
    pub fn begin_drag(&mut self) {
        self.gesture = Some(Gesture { moved: false });
    }

    /// One incremental frame of an active drag.
    pub fn drag_by(&mut self, dx: f64, dy: f64) -> bool {
        let Some(gesture) = self.gesture.as_mut() else {
            return false;
        };
        let Some(id) = self.selection else {
            return false;
        };
        let Some(object) = self.document.get_mut(id) else {
            return false;
        };
        if object.locked {
            return false;
        }
        object.transform.translate(dx, dy);
        gesture.moved = true;
        true
    }

    /// Completes the gesture; checkpoints once if anything moved.
    pub fn end_drag(&mut self) {
        if let Some(gesture) = self.gesture.take() {
            if gesture.moved {
                self.commit();
            }
        }
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo(&mut self) -> bool {
        let Some(document) = self.history.undo() else {
            return false;
        };
        self.document = document;
        self.prune_selection();
        self.dirty = true;
        self.edits += 1;
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(document) = self.history.redo() else {
            return false;
        };
        self.document = document;
        self.prune_selection();
        self.dirty = true;
        self.edits += 1;
        true
    }

    fn prune_selection(&mut self) {
        if self
            .selection
            .is_some_and(|id| !self.document.contains(id))
        {
            self.selection = None;
        }
    }

    // ------------------------------------------------------------------
    // Clipboard
    // ------------------------------------------------------------------

    /// Copies the selection into the clipboard slot. Does not alter the
    /// document, so no checkpoint.
    pub fn copy_selection(&mut self) -> bool {
        match self.selection {
            Some(id) => self.clipboard.copy(&self.document, id),
            None => false,
        }
    }

    /// Pastes the held object front-most, offset so the copy is visibly
    /// distinct, and selects it.
    pub fn paste(&mut self) -> Option<ObjectId> {
        let id = self.clipboard.paste(&mut self.document)?;
        self.selection = Some(id);
        self.commit();
        Some(id)
    }

    /// Clone-in-place shortcut that skips the clipboard.
    pub fn duplicate_selection(&mut self) -> Option<ObjectId> {
        let source = self.selection?;
        let id = self
            .document
            .duplicate_object(source, Some((PASTE_OFFSET, PASTE_OFFSET)))
            .ok()?;
        self.selection = Some(id);
        self.commit();
        Some(id)
    }

    // ------------------------------------------------------------------
    // Layers
    // ------------------------------------------------------------------

    pub fn bring_to_front(&mut self, id: ObjectId) -> bool {
        let changed = self.document.bring_to_front(id);
        if changed {
            self.commit();
        }
        changed
    }

    pub fn send_to_back(&mut self, id: ObjectId) -> bool {
        let changed = self.document.send_to_back(id);
        if changed {
            self.commit();
        }
        changed
    }

    pub fn move_forward(&mut self, id: ObjectId) -> bool {
        let changed = self.document.move_forward(id);
        if changed {
            self.commit();
        }
        changed
    }

    pub fn move_backward(&mut self, id: ObjectId) -> bool {
        let changed = self.document.move_backward(id);
        if changed {
            self.commit();
        }
        changed
    }

    pub fn move_to_layer(&mut self, id: ObjectId, one_based_index: usize) -> bool {
        let changed = self.document.move_to_index(id, one_based_index);
        if changed {
            self.commit();
        }
        changed
    }

    pub fn layer_info(&self, id: ObjectId) -> Option<(usize, usize)> {
        self.document.layer_info(id)
    }

    // ------------------------------------------------------------------
    // Canvas-level mutations
    // ------------------------------------------------------------------

    pub fn resize_canvas(&mut self, width: f64, height: f64) {
        self.document.resize(width, height);
        self.commit();
    }

    pub fn rotate_canvas_clockwise(&mut self) {
        self.document.rotate_clockwise();
        self.commit();
    }

    pub fn set_background(&mut self, background: Background) {
        self.document.set_background(background);
        self.commit();
    }

    pub fn patch_background(&mut self, patch: BackgroundPatch) {
        self.document.patch_background(patch);
        self.commit();
    }

    // ------------------------------------------------------------------
    // Dirty tracking and load/save hooks
    // ------------------------------------------------------------------

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Monotonic edit counter. A saver records the stamp before
    /// serializing and passes it back to [`EditorSession::mark_saved`];
    /// edits landing while the save was in flight keep the flag set.
    pub fn edit_stamp(&self) -> u64 {
        self.edits
    }

    /// Clears the dirty flag, unless the document changed after the
    /// given stamp was taken.
    pub fn mark_saved(&mut self, stamp: u64) {
        if stamp == self.edits {
            self.dirty = false;
        } else {
            debug!(
                stale = self.edits - stamp,
                "save completed against an older snapshot, still dirty"
            );
        }
    }

    /// Replaces the session state from loaded design data. History and
    /// selection reset; the freshly loaded document is clean.
    pub fn load_design(&mut self, design: DesignData) {
        self.document = design.document;
        self.panel = design.panel;
        self.selection = None;
        self.history.clear();
        self.history.checkpoint(&self.document);
        self.dirty = false;
        self.edits += 1;
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

fn probe_image(bytes: &[u8]) -> DesignerResult<(u32, u32)> {
    let decoded = image::load_from_memory(bytes).map_err(|err| DesignerError::InvalidValue {
        field: "image".to_string(),
        reason: err.to_string(),
    })?;
    Ok(decoded.to_rgba8().dimensions())
}

fn data_uri(bytes: &[u8]) -> String {
    let mime = image::guess_format(bytes)
        .map(|format| format.to_mime_type())
        .unwrap_or("application/octet-stream");
    let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{mime};base64,{payload}")
}
