//! Engine-wide tunables.

/// Default canvas width in canvas units when a project carries no size.
pub const DEFAULT_CANVAS_WIDTH: f64 = 600.0;

/// Default canvas height in canvas units when a project carries no size.
pub const DEFAULT_CANVAS_HEIGHT: f64 = 800.0;

/// Maximum number of snapshots retained by the history stack.
pub const HISTORY_CAPACITY: usize = 20;

/// Offset applied to both axes of a pasted object so the copy is
/// visibly distinguishable from its source.
pub const PASTE_OFFSET: f64 = 20.0;

/// Inserted images are scaled down to fit within this square box,
/// preserving aspect ratio.
pub const IMAGE_FIT_BOX: f64 = 300.0;

/// Seconds of editing silence before an autosave fires.
pub const AUTOSAVE_DELAY_SECS: u64 = 30;

/// Smallest representable scale factor magnitude. Zero scale would make
/// an object's bounding box non-invertible.
pub const MIN_SCALE: f64 = 0.01;

/// Resolution multiplier used when rendering project thumbnails.
pub const THUMBNAIL_SCALE: f32 = 0.25;

/// Background color of a freshly created document.
pub const DEFAULT_BACKGROUND_COLOR: &str = "#ffffff";
