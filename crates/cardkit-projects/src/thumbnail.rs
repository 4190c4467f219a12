//! Thumbnail capture seam.
//!
//! The bridge renders thumbnails through this trait so tests and
//! alternative backends can substitute the rasterizer.

use cardkit_designer::{renderer, CanvasDocument};

use crate::error::{ProjectError, ProjectResult};

/// Renders a PNG snapshot of a document for the project browser.
pub trait Thumbnailer: Send + Sync {
    fn render_png(&self, document: &CanvasDocument) -> ProjectResult<Vec<u8>>;
}

/// The tiny-skia raster backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkiaThumbnailer;

impl Thumbnailer for SkiaThumbnailer {
    fn render_png(&self, document: &CanvasDocument) -> ProjectResult<Vec<u8>> {
        renderer::render_thumbnail_png(document).map_err(|err| ProjectError::Render(err.to_string()))
    }
}
