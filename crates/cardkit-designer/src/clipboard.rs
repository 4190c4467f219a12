//! Single-slot clipboard for scene objects.
//!
//! Owned by the editing session. Holds at most one deep-cloned object
//! (with its transitive group children); only an explicit copy replaces
//! the contents - undo/redo never touch it.

use tracing::debug;

use cardkit_core::constants::PASTE_OFFSET;

use crate::document::CanvasDocument;
use crate::model::{ObjectId, SceneObject};

#[derive(Debug, Clone, Default)]
pub struct ClipboardSlot {
    held: Option<Vec<SceneObject>>,
}

impl ClipboardSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_none()
    }

    /// Deep-clones the referenced object into the slot, overwriting any
    /// previous contents. Silently a no-op when the id does not resolve.
    /// Returns whether anything was copied.
    pub fn copy(&mut self, document: &CanvasDocument, id: ObjectId) -> bool {
        match document.subtree(id) {
            Some(subtree) => {
                debug!(id, objects = subtree.len(), "copied to clipboard");
                self.held = Some(subtree);
                true
            }
            None => false,
        }
    }

    /// Clones the held object into the document with fresh ids, offset
    /// by the fixed paste delta, inserted front-most. Repeated pastes
    /// are independent clones. Returns the new root id, to become the
    /// selection; `None` when the slot is empty.
    pub fn paste(&self, document: &mut CanvasDocument) -> Option<ObjectId> {
        let held = self.held.as_ref()?;
        document
            .adopt_subtree(held.clone(), Some((PASTE_OFFSET, PASTE_OFFSET)))
            .ok()
    }
}
