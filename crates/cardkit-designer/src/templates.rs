//! Built-in starter templates.
//!
//! Each template constructs a fully populated canvas document; the
//! editor session checkpoints the result so the first undo returns to
//! an empty canvas.

use cardkit_core::{
    Color, Fill, Gradient, GradientDirection, GradientKind, GradientPreset, GradientStop,
};

use crate::background::{Background, BackgroundKind};
use crate::document::{CanvasDocument, ObjectPatch};
use crate::model::{ObjectDefaults, PolygonObject};

/// Names accepted by [`by_name`], for template pickers.
pub const TEMPLATE_NAMES: &[&str] = &["blank", "birthday", "wedding"];

pub fn by_name(name: &str) -> Option<CanvasDocument> {
    match name {
        "blank" => Some(blank()),
        "birthday" => Some(birthday()),
        "wedding" => Some(wedding()),
        _ => None,
    }
}

/// An empty white canvas at the default size.
pub fn blank() -> CanvasDocument {
    CanvasDocument::default()
}

/// A bright birthday card: gradient backdrop, banner, headline and a
/// scattering of stars.
pub fn birthday() -> CanvasDocument {
    let defaults = ObjectDefaults::default();
    let mut doc = CanvasDocument::default();

    doc.set_background(Background {
        kind: BackgroundKind::Gradient,
        gradient: Gradient {
            kind: GradientKind::Linear,
            stops: vec![
                stop(0.0, "#fdeb71"),
                stop(1.0, "#f8d800"),
            ],
            direction: GradientDirection::Preset(GradientPreset::ToBottom),
        },
        ..Background::default()
    });

    let banner = doc.add_rect(60.0, 120.0, 480.0, 140.0, &defaults);
    set_fill(&mut doc, banner, "#ffffff");

    let headline = doc.add_text("Happy Birthday!", 110.0, 160.0, &defaults);
    let _ = doc.update_object(
        headline,
        &ObjectPatch {
            font_size: Some(42.0),
            text_color: Some(color("#e74c3c")),
            ..Default::default()
        },
    );

    for (x, y) in [(120.0, 520.0), (300.0, 580.0), (470.0, 510.0)] {
        let star = doc.add_polygon(x, y, PolygonObject::star(5, 40.0, 16.0), &defaults);
        set_fill(&mut doc, star, "#f39c12");
    }
    doc
}

/// A restrained wedding invitation: ivory background, rule lines and
/// serif headline.
pub fn wedding() -> CanvasDocument {
    let defaults = ObjectDefaults::default();
    let mut doc = CanvasDocument::default();

    doc.patch_background(crate::background::BackgroundPatch {
        color: Some(color("#fdf8f0")),
        ..Default::default()
    });

    let headline = doc.add_text("Together with their families", 90.0, 220.0, &defaults);
    let _ = doc.update_object(
        headline,
        &ObjectPatch {
            font_size: Some(28.0),
            text_color: Some(color("#7f6a50")),
            ..Default::default()
        },
    );

    for y in [180.0, 640.0] {
        let rule = doc.add_rect(100.0, y, 400.0, 2.0, &defaults);
        set_fill(&mut doc, rule, "#c9b598");
    }
    doc
}

fn stop(offset: f64, hex: &str) -> GradientStop {
    GradientStop {
        offset,
        color: color(hex),
    }
}

fn color(hex: &str) -> Color {
    Color::from_hex(hex).unwrap_or_else(|_| Color::black())
}

fn set_fill(doc: &mut CanvasDocument, id: crate::model::ObjectId, hex: &str) {
    let _ = doc.update_object(
        id,
        &ObjectPatch {
            fill: Some(Fill::solid(color(hex))),
            ..Default::default()
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_named_template_builds() {
        for name in TEMPLATE_NAMES {
            let doc = by_name(name).unwrap();
            assert_eq!(doc.rotation_degrees, 0);
        }
        assert!(by_name("corporate").is_none());
    }

    #[test]
    fn test_birthday_has_content() {
        let doc = birthday();
        assert!(doc.len() >= 5);
        assert_eq!(doc.background.kind, BackgroundKind::Gradient);
    }
}
