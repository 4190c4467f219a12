//! # CardKit Designer
//!
//! The design-canvas engine behind the invitation/card editor: the
//! document model, undo/redo history, layer ordering, clipboard,
//! background/fill resolution and rasterization.
//!
//! ## Architecture
//!
//! The engine layers like this:
//!
//! ```text
//! EditorSession (interaction layer: selection, locks, gestures, dirty flag)
//!   ├── CanvasDocument (ordered object sequence = z-order, background)
//!   │     └── SceneObject (text, shapes, images, groups)
//!   ├── HistoryStack (bounded snapshot undo/redo)
//!   └── ClipboardSlot (single deep-cloned object)
//!
//! Resolver (declarative fill -> concrete paint, pure)
//!   └── Renderer (tiny-skia raster backend: thumbnails, export)
//!
//! Serialization (design data <-> document + panel state)
//! ```
//!
//! The document is authoritative data with no rendering callbacks in it;
//! the renderer is one adapter over the same model, and any backend able
//! to place, transform and stack 2D primitives can reproduce it from the
//! resolver's output.

pub mod background;
pub mod clipboard;
pub mod document;
pub mod editor;
pub mod error;
pub mod fonts;
pub mod history;
mod layers;
pub mod model;
pub mod renderer;
pub mod resolver;
pub mod serialization;
pub mod templates;

pub use background::{Background, BackgroundImage, BackgroundKind, BackgroundPatch, ImageFit};
pub use clipboard::ClipboardSlot;
pub use document::{CanvasDocument, ObjectPatch};
pub use editor::EditorSession;
pub use error::{DesignerError, DesignerResult};
pub use history::HistoryStack;
pub use model::{
    CircleObject, FontStyle, FontWeight, GroupObject, ImageObject, LineObject, ObjectDefaults,
    ObjectId, ObjectKind, PolygonObject, RectObject, SceneObject, TextAlign, TextDecoration,
    TextObject, TriangleObject,
};
pub use resolver::{resolve_background, resolve_fill, BackgroundPaint, ResolvedPaint};
pub use serialization::{from_value, serialize_design, to_value, DesignData, PanelState};
