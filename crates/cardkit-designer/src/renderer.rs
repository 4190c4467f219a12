//! Raster renderer for canvas documents.
//!
//! Renders a document to a pixmap at an arbitrary resolution multiplier
//! using tiny-skia. Used for project thumbnails and export; any other
//! backend can reproduce the same output from the document plus the
//! resolver's paint parameters.
//!
//! The canvas presentation rotation is a view concern and is not baked
//! into the raster output.

use rusttype::{point as rt_point, Scale};
use tiny_skia::{
    FillRule, IntSize, LinearGradient, Paint, PathBuilder, Pixmap, PixmapPaint, Point as SkiaPoint,
    PremultipliedColorU8, RadialGradient, SpreadMode, Stroke as SkiaStroke, Transform,
};
use tracing::warn;

use base64::Engine as _;
use cardkit_core::constants::THUMBNAIL_SCALE;

use crate::background::ImageFit;
use crate::document::CanvasDocument;
use crate::error::{DesignerError, DesignerResult};
use crate::fonts;
use crate::model::{ObjectId, ObjectKind, SceneObject, TextAlign, TextObject};
use crate::resolver::{resolve_background, resolve_fill, BackgroundPaint, ResolvedPaint};

/// Renders the document at a resolution multiplier.
pub fn render_document(document: &CanvasDocument, scale: f32) -> DesignerResult<Pixmap> {
    let width = (document.width as f32 * scale).round().max(1.0) as u32;
    let height = (document.height as f32 * scale).round().max(1.0) as u32;
    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| DesignerError::Render(format!("cannot allocate {width}x{height} pixmap")))?;

    draw_background(&mut pixmap, document, scale);

    let grouped = grouped_ids(document);
    let root = Transform::from_scale(scale, scale);
    for object in document.objects() {
        if grouped.contains(&object.id) {
            continue;
        }
        draw_object(&mut pixmap, document, object, root, 1.0);
    }
    Ok(pixmap)
}

/// Renders the thumbnail PNG recorded on a project at save time.
pub fn render_thumbnail_png(document: &CanvasDocument) -> DesignerResult<Vec<u8>> {
    let pixmap = render_document(document, THUMBNAIL_SCALE)?;
    pixmap
        .encode_png()
        .map_err(|err| DesignerError::Render(err.to_string()))
}

/// Renders and PNG-encodes at an arbitrary multiplier (export path).
pub fn export_png(document: &CanvasDocument, scale: f32) -> DesignerResult<Vec<u8>> {
    let pixmap = render_document(document, scale)?;
    pixmap
        .encode_png()
        .map_err(|err| DesignerError::Render(err.to_string()))
}

/// Ids referenced as a child by any group; skipped at the top level and
/// painted through their group instead.
fn grouped_ids(document: &CanvasDocument) -> Vec<ObjectId> {
    let mut ids = Vec::new();
    for object in document.objects() {
        if let ObjectKind::Group(group) = &object.kind {
            ids.extend_from_slice(&group.children);
        }
    }
    ids
}

fn draw_background(pixmap: &mut Pixmap, document: &CanvasDocument, scale: f32) {
    let full = Transform::from_scale(scale, scale);
    match resolve_background(&document.background, document.width, document.height) {
        BackgroundPaint::Paint(resolved) => {
            fill_whole(pixmap, &resolved, full);
        }
        BackgroundPaint::Image { source, fit } => match pixmap_from_source(&source) {
            Some(image) => draw_background_image(pixmap, &image, fit, document, scale),
            None => {
                warn!("background image source did not decode, using color");
                let fallback = ResolvedPaint::Solid {
                    color: document.background.color.to_rgba8(),
                };
                fill_whole(pixmap, &fallback, full);
            }
        },
    }
}

fn fill_whole(pixmap: &mut Pixmap, resolved: &ResolvedPaint, shader_ts: Transform) {
    let Some(rect) =
        tiny_skia::Rect::from_xywh(0.0, 0.0, pixmap.width() as f32, pixmap.height() as f32)
    else {
        return;
    };
    let paint = paint_for(resolved, 1.0, shader_ts);
    pixmap.fill_rect(rect, &paint, Transform::identity(), None);
}

fn draw_background_image(
    pixmap: &mut Pixmap,
    image: &Pixmap,
    fit: ImageFit,
    document: &CanvasDocument,
    scale: f32,
) {
    let (cw, ch) = (document.width as f32, document.height as f32);
    let (iw, ih) = (image.width() as f32, image.height() as f32);
    if iw <= 0.0 || ih <= 0.0 {
        return;
    }
    let (sx, sy) = match fit {
        ImageFit::Stretch => (cw / iw, ch / ih),
        ImageFit::Cover => {
            let s = (cw / iw).max(ch / ih);
            (s, s)
        }
        ImageFit::Contain => {
            let s = (cw / iw).min(ch / ih);
            (s, s)
        }
    };
    let tx = (cw - iw * sx) / 2.0;
    let ty = (ch - ih * sy) / 2.0;
    let ts = Transform::from_scale(sx, sy)
        .post_translate(tx, ty)
        .post_scale(scale, scale);
    pixmap.draw_pixmap(0, 0, image.as_ref(), &PixmapPaint::default(), ts, None);
}

fn draw_object(
    pixmap: &mut Pixmap,
    document: &CanvasDocument,
    object: &SceneObject,
    parent: Transform,
    parent_opacity: f32,
) {
    let t = &object.transform;
    // Scale, then rotate about the object's origin, then place it.
    let local = Transform::from_scale(t.scale_x as f32, t.scale_y as f32)
        .post_concat(Transform::from_rotate(t.angle_degrees as f32))
        .post_translate(t.x as f32, t.y as f32);
    let world = local.post_concat(parent);
    let opacity = parent_opacity * object.opacity.clamp(0.0, 1.0) as f32;
    if opacity <= 0.0 {
        return;
    }

    match &object.kind {
        ObjectKind::Group(group) => {
            for child_id in &group.children {
                if let Some(child) = document.get(*child_id) {
                    draw_object(pixmap, document, child, world, opacity);
                }
            }
        }
        ObjectKind::Text(text) => draw_text(pixmap, text, world, opacity),
        ObjectKind::Image(image) => {
            match pixmap_from_source(&image.source) {
                Some(decoded) => {
                    // Map natural pixels onto the declared natural size.
                    let sx = image.natural_width as f32 / decoded.width().max(1) as f32;
                    let sy = image.natural_height as f32 / decoded.height().max(1) as f32;
                    let ts = Transform::from_scale(sx, sy).post_concat(world);
                    let paint = PixmapPaint {
                        opacity,
                        ..PixmapPaint::default()
                    };
                    pixmap.draw_pixmap(0, 0, decoded.as_ref(), &paint, ts, None);
                }
                None => {
                    // Placeholder box for sources this backend cannot fetch.
                    if let Some(path) = rect_path(image.natural_width, image.natural_height) {
                        let resolved = ResolvedPaint::Solid {
                            color: [204, 204, 204, 255],
                        };
                        let paint = paint_for(&resolved, opacity, world);
                        pixmap.fill_path(&path, &paint, FillRule::Winding, world, None);
                    }
                }
            }
        }
        kind => {
            if let Some(path) = shape_path(kind) {
                let (min_x, min_y, max_x, max_y) = kind.local_bounds();
                let resolved =
                    resolve_fill(&object.fill, max_x - min_x, max_y - min_y);
                // Gradient coordinates are bounding-box relative.
                let shader_ts = world.pre_translate(min_x as f32, min_y as f32);

                if !matches!(kind, ObjectKind::Line(_)) {
                    let paint = paint_for(&resolved, opacity, shader_ts);
                    pixmap.fill_path(&path, &paint, FillRule::Winding, world, None);
                }

                let stroke_width = match kind {
                    ObjectKind::Line(_) => object.stroke.width.max(1.0),
                    _ => object.stroke.width,
                };
                if stroke_width > 0.0 {
                    let resolved_stroke = ResolvedPaint::Solid {
                        color: object.stroke.color.to_rgba8(),
                    };
                    let paint = paint_for(&resolved_stroke, opacity, world);
                    let stroke = SkiaStroke {
                        width: stroke_width as f32,
                        ..SkiaStroke::default()
                    };
                    pixmap.stroke_path(&path, &paint, &stroke, world, None);
                }
            }
        }
    }
}

fn shape_path(kind: &ObjectKind) -> Option<tiny_skia::Path> {
    match kind {
        ObjectKind::Rect(rect) => rect_path(rect.width, rect.height),
        ObjectKind::Circle(circle) => {
            PathBuilder::from_circle(0.0, 0.0, circle.radius as f32)
        }
        ObjectKind::Triangle(triangle) => {
            let (w, h) = (triangle.width as f32, triangle.height as f32);
            let mut pb = PathBuilder::new();
            pb.move_to(w / 2.0, 0.0);
            pb.line_to(w, h);
            pb.line_to(0.0, h);
            pb.close();
            pb.finish()
        }
        ObjectKind::Polygon(polygon) => {
            let mut vertices = polygon.vertices.iter();
            let first = vertices.next()?;
            let mut pb = PathBuilder::new();
            pb.move_to(first.x as f32, first.y as f32);
            for v in vertices {
                pb.line_to(v.x as f32, v.y as f32);
            }
            pb.close();
            pb.finish()
        }
        ObjectKind::Line(line) => {
            let mut pb = PathBuilder::new();
            pb.move_to(line.start.x as f32, line.start.y as f32);
            pb.line_to(line.end.x as f32, line.end.y as f32);
            pb.finish()
        }
        _ => None,
    }
}

fn rect_path(width: f64, height: f64) -> Option<tiny_skia::Path> {
    tiny_skia::Rect::from_xywh(0.0, 0.0, width as f32, height as f32)
        .map(PathBuilder::from_rect)
}

fn paint_for<'a>(resolved: &ResolvedPaint, opacity: f32, shader_ts: Transform) -> Paint<'a> {
    let mut paint = Paint {
        anti_alias: true,
        ..Paint::default()
    };
    let apply_opacity = |rgba: [u8; 4]| -> tiny_skia::Color {
        let alpha = (rgba[3] as f32 * opacity).round().clamp(0.0, 255.0) as u8;
        tiny_skia::Color::from_rgba8(rgba[0], rgba[1], rgba[2], alpha)
    };
    match resolved {
        ResolvedPaint::Solid { color } => {
            paint.set_color(apply_opacity(*color));
        }
        ResolvedPaint::Linear { start, end, stops } => {
            let skia_stops = stops
                .iter()
                .map(|(offset, rgba)| {
                    tiny_skia::GradientStop::new(*offset as f32, apply_opacity(*rgba))
                })
                .collect();
            if let Some(shader) = LinearGradient::new(
                SkiaPoint::from_xy(start.0 as f32, start.1 as f32),
                SkiaPoint::from_xy(end.0 as f32, end.1 as f32),
                skia_stops,
                SpreadMode::Pad,
                shader_ts,
            ) {
                paint.shader = shader;
            }
        }
        ResolvedPaint::Radial { center, radius, stops } => {
            let skia_stops = stops
                .iter()
                .map(|(offset, rgba)| {
                    tiny_skia::GradientStop::new(*offset as f32, apply_opacity(*rgba))
                })
                .collect();
            let center = SkiaPoint::from_xy(center.0 as f32, center.1 as f32);
            if let Some(shader) =
                RadialGradient::new(center, center, *radius as f32, skia_stops, SpreadMode::Pad, shader_ts)
            {
                paint.shader = shader;
            }
        }
    }
    paint
}

fn draw_text(pixmap: &mut Pixmap, text: &TextObject, world: Transform, opacity: f32) {
    use crate::model::{FontStyle, FontWeight};

    let Some(font) = fonts::font_for(
        &text.font_family,
        text.weight == FontWeight::Bold,
        text.style == FontStyle::Italic,
    ) else {
        warn!(family = %text.font_family, "no font resolved, skipping text raster");
        return;
    };

    if let Some(background) = &text.background {
        let (_, _, w, h) = text.local_bounds();
        if let Some(path) = rect_path(w, h) {
            let resolved = ResolvedPaint::Solid {
                color: background.to_rgba8(),
            };
            let paint = paint_for(&resolved, opacity, world);
            pixmap.fill_path(&path, &paint, FillRule::Winding, world, None);
        }
    }

    let (_, _, block_width, _) = text.local_bounds();
    let rt_scale = Scale::uniform(text.font_size as f32);
    let v_metrics = font.v_metrics(rt_scale);
    let line_height = v_metrics.ascent - v_metrics.descent + v_metrics.line_gap;
    let color = text.color.to_rgba8();

    let mut baseline = v_metrics.ascent;
    for line in text.content.lines() {
        let glyphs: Vec<_> = font
            .layout(line, rt_scale, rt_point(0.0, baseline))
            .collect();
        let line_width = glyphs
            .last()
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0);
        let shift = match text.align {
            TextAlign::Left => 0.0,
            TextAlign::Center => ((block_width as f32) - line_width) / 2.0,
            TextAlign::Right => (block_width as f32) - line_width,
        };
        for glyph in &glyphs {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                let lx = (bb.min.x + gx as i32) as f32 + shift;
                let ly = (bb.min.y + gy as i32) as f32;
                let mut mapped = [SkiaPoint::from_xy(lx, ly)];
                world.map_points(&mut mapped);
                let alpha = coverage * opacity * (color[3] as f32 / 255.0);
                blend_pixel(pixmap, mapped[0].x, mapped[0].y, color, alpha);
            });
        }
        baseline += line_height;
    }
}

/// Source-over blend of one straight-alpha pixel.
fn blend_pixel(pixmap: &mut Pixmap, x: f32, y: f32, rgb: [u8; 4], alpha: f32) {
    if alpha <= 0.0 {
        return;
    }
    let (px, py) = (x.round() as i64, y.round() as i64);
    if px < 0 || py < 0 || px >= pixmap.width() as i64 || py >= pixmap.height() as i64 {
        return;
    }
    let index = py as usize * pixmap.width() as usize + px as usize;
    let pixels = pixmap.pixels_mut();
    let dst = pixels[index].demultiply();

    let a = alpha.clamp(0.0, 1.0);
    let blend = |src: u8, dst: u8| -> u8 {
        (src as f32 * a + dst as f32 * (1.0 - a)).round() as u8
    };
    let out_r = blend(rgb[0], dst.red());
    let out_g = blend(rgb[1], dst.green());
    let out_b = blend(rgb[2], dst.blue());
    let out_a = (255.0 * a + dst.alpha() as f32 * (1.0 - a)).round() as u8;
    let premultiplied: PremultipliedColorU8 =
        tiny_skia::ColorU8::from_rgba(out_r, out_g, out_b, out_a).premultiply();
    pixels[index] = premultiplied;
}

/// Decodes a `data:` URI into a premultiplied pixmap. Opaque non-data
/// sources cannot be fetched by this backend.
fn pixmap_from_source(source: &str) -> Option<Pixmap> {
    let (_, payload) = source.split_once(";base64,")?;
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .ok()?;
    let decoded = image::load_from_memory(&bytes).ok()?.to_rgba8();
    let (width, height) = decoded.dimensions();
    let mut data = decoded.into_raw();
    // tiny-skia expects premultiplied alpha.
    for pixel in data.chunks_exact_mut(4) {
        let a = pixel[3] as u16;
        pixel[0] = (pixel[0] as u16 * a / 255) as u8;
        pixel[1] = (pixel[1] as u16 * a / 255) as u8;
        pixel[2] = (pixel[2] as u16 * a / 255) as u8;
    }
    Pixmap::from_vec(data, IntSize::from_wh(width, height)?)
}
