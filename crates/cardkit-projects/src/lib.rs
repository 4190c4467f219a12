//! # CardKit Projects
//!
//! Project persistence for the CardKit design engine: the durable
//! project record, the abstract store contract, in-memory and
//! file-backed store implementations, and the bridge that serializes
//! the editing session, captures thumbnails, tracks the dirty flag and
//! schedules debounced autosaves.

pub mod bridge;
pub mod error;
pub mod fs;
pub mod memory;
pub mod model;
pub mod thumbnail;
pub mod traits;

pub use bridge::{AutosaveTimer, LoadOutcome, OpenProject, ProjectBridge, SaveOptions};
pub use error::{ProjectError, ProjectResult};
pub use fs::FsProjectStore;
pub use memory::MemoryProjectStore;
pub use model::{Project, ProjectDraft, ProjectFilter, ProjectUpdate};
pub use thumbnail::{SkiaThumbnailer, Thumbnailer};
pub use traits::ProjectStore;
