//! Fill and background resolution.
//!
//! Pure functions mapping a declarative fill specification to concrete
//! paint parameters for a given target size. Called on every resize and
//! property edit, so determinism and freedom from side effects matter
//! here; the rendering backend consumes the output as-is.

use cardkit_core::{Fill, Gradient, GradientDirection, GradientKind, GradientPreset};

use crate::background::{Background, BackgroundKind, ImageFit};

/// A resolved gradient stop: offset plus straight (unpremultiplied) RGBA.
pub type PaintStop = (f64, [u8; 4]);

/// Concrete paint parameters for a target of known size.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedPaint {
    Solid {
        color: [u8; 4],
    },
    Linear {
        start: (f64, f64),
        end: (f64, f64),
        stops: Vec<PaintStop>,
    },
    Radial {
        center: (f64, f64),
        radius: f64,
        stops: Vec<PaintStop>,
    },
}

/// Background paint: either a resolvable fill or an image reference the
/// backend must fetch itself.
#[derive(Debug, Clone, PartialEq)]
pub enum BackgroundPaint {
    Paint(ResolvedPaint),
    Image { source: String, fit: ImageFit },
}

/// Resolves a fill against a target's dimensions.
pub fn resolve_fill(fill: &Fill, width: f64, height: f64) -> ResolvedPaint {
    match fill {
        Fill::Color { color } => ResolvedPaint::Solid {
            color: color.to_rgba8(),
        },
        Fill::Gradient { gradient } => resolve_gradient(gradient, width, height),
    }
}

/// Resolves a gradient against a target's dimensions. Radial gradients
/// always center on the target's bounding box, ignoring any direction.
pub fn resolve_gradient(gradient: &Gradient, width: f64, height: f64) -> ResolvedPaint {
    let stops: Vec<PaintStop> = gradient
        .stops
        .iter()
        .map(|stop| (stop.offset, stop.color.to_rgba8()))
        .collect();
    match gradient.kind {
        GradientKind::Linear => {
            let (start, end) = linear_axis(gradient.direction, width, height);
            ResolvedPaint::Linear { start, end, stops }
        }
        GradientKind::Radial => ResolvedPaint::Radial {
            center: (width / 2.0, height / 2.0),
            radius: width.max(height) / 2.0,
            stops,
        },
    }
}

/// Resolves the document background. Image backgrounds pass the source
/// through untouched; a missing image falls back to the stored color.
pub fn resolve_background(background: &Background, width: f64, height: f64) -> BackgroundPaint {
    match background.kind {
        BackgroundKind::Color => BackgroundPaint::Paint(ResolvedPaint::Solid {
            color: background.color.to_rgba8(),
        }),
        BackgroundKind::Gradient => {
            BackgroundPaint::Paint(resolve_gradient(&background.gradient, width, height))
        }
        BackgroundKind::Image => match &background.image {
            Some(image) => BackgroundPaint::Image {
                source: image.source.clone(),
                fit: image.fit,
            },
            None => BackgroundPaint::Paint(ResolvedPaint::Solid {
                color: background.color.to_rgba8(),
            }),
        },
    }
}

/// Maps a linear direction to absolute start/end coordinates scaled to
/// the target. Edge presets run along the matching axis, corner presets
/// connect opposite corners, and angle presets place the axis through
/// the center at half the diagonal's length.
fn linear_axis(direction: GradientDirection, w: f64, h: f64) -> ((f64, f64), (f64, f64)) {
    use GradientPreset::*;
    match direction {
        GradientDirection::Coords { x1, y1, x2, y2 } => ((x1 * w, y1 * h), (x2 * w, y2 * h)),
        GradientDirection::Preset(preset) => match preset {
            ToBottom => ((0.0, 0.0), (0.0, h)),
            ToTop => ((0.0, h), (0.0, 0.0)),
            ToRight => ((0.0, 0.0), (w, 0.0)),
            ToLeft => ((w, 0.0), (0.0, 0.0)),
            ToBottomRight => ((0.0, 0.0), (w, h)),
            ToBottomLeft => ((w, 0.0), (0.0, h)),
            ToTopRight => ((0.0, h), (w, 0.0)),
            ToTopLeft => ((w, h), (0.0, 0.0)),
            Angle45 => angle_axis(45.0, w, h),
            Angle135 => angle_axis(135.0, w, h),
            Angle225 => angle_axis(225.0, w, h),
            Angle315 => angle_axis(315.0, w, h),
        },
    }
}

fn angle_axis(degrees: f64, w: f64, h: f64) -> ((f64, f64), (f64, f64)) {
    let center = (w / 2.0, h / 2.0);
    let half = (w * w + h * h).sqrt() / 2.0;
    let radians = degrees.to_radians();
    let (dx, dy) = (radians.cos() * half, radians.sin() * half);
    ((center.0 - dx, center.1 - dy), (center.0 + dx, center.1 + dy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardkit_core::{Color, GradientStop};

    fn gradient(kind: GradientKind, direction: GradientDirection) -> Gradient {
        Gradient {
            kind,
            stops: vec![
                GradientStop {
                    offset: 0.0,
                    color: Color::white(),
                },
                GradientStop {
                    offset: 1.0,
                    color: Color::black(),
                },
            ],
            direction,
        }
    }

    #[test]
    fn test_solid_color_passes_through() {
        let fill = Fill::solid(Color::from_hex("#ff8000").unwrap());
        let paint = resolve_fill(&fill, 100.0, 100.0);
        assert_eq!(paint, ResolvedPaint::Solid { color: [255, 128, 0, 255] });
    }

    #[test]
    fn test_to_right_on_200_by_100() {
        let g = gradient(
            GradientKind::Linear,
            GradientDirection::Preset(GradientPreset::ToRight),
        );
        match resolve_gradient(&g, 200.0, 100.0) {
            ResolvedPaint::Linear { start, end, .. } => {
                assert_eq!(start, (0.0, 0.0));
                assert_eq!(end, (200.0, 0.0));
            }
            other => panic!("expected linear paint, got {other:?}"),
        }
    }

    #[test]
    fn test_edge_and_corner_presets() {
        let cases = [
            (GradientPreset::ToBottom, (0.0, 0.0), (0.0, 50.0)),
            (GradientPreset::ToTop, (0.0, 50.0), (0.0, 0.0)),
            (GradientPreset::ToLeft, (80.0, 0.0), (0.0, 0.0)),
            (GradientPreset::ToBottomRight, (0.0, 0.0), (80.0, 50.0)),
            (GradientPreset::ToTopLeft, (80.0, 50.0), (0.0, 0.0)),
        ];
        for (preset, start, end) in cases {
            let g = gradient(GradientKind::Linear, GradientDirection::Preset(preset));
            match resolve_gradient(&g, 80.0, 50.0) {
                ResolvedPaint::Linear { start: s, end: e, .. } => {
                    assert_eq!(s, start, "{preset:?}");
                    assert_eq!(e, end, "{preset:?}");
                }
                other => panic!("expected linear paint, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_angle_preset_spans_the_diagonal() {
        let g = gradient(
            GradientKind::Linear,
            GradientDirection::Preset(GradientPreset::Angle45),
        );
        match resolve_gradient(&g, 60.0, 80.0) {
            ResolvedPaint::Linear { start, end, .. } => {
                // Axis through the center, total length = diagonal.
                let mid = ((start.0 + end.0) / 2.0, (start.1 + end.1) / 2.0);
                assert!((mid.0 - 30.0).abs() < 1e-9);
                assert!((mid.1 - 40.0).abs() < 1e-9);
                let len = ((end.0 - start.0).powi(2) + (end.1 - start.1).powi(2)).sqrt();
                assert!((len - 100.0).abs() < 1e-9);
            }
            other => panic!("expected linear paint, got {other:?}"),
        }
    }

    #[test]
    fn test_radial_ignores_direction() {
        let g = gradient(
            GradientKind::Radial,
            GradientDirection::Preset(GradientPreset::ToLeft),
        );
        match resolve_gradient(&g, 200.0, 100.0) {
            ResolvedPaint::Radial { center, radius, .. } => {
                assert_eq!(center, (100.0, 50.0));
                assert_eq!(radius, 100.0);
            }
            other => panic!("expected radial paint, got {other:?}"),
        }
    }

    #[test]
    fn test_explicit_coords_scale_to_target() {
        let g = gradient(
            GradientKind::Linear,
            GradientDirection::Coords {
                x1: 0.25,
                y1: 0.0,
                x2: 0.75,
                y2: 1.0,
            },
        );
        match resolve_gradient(&g, 200.0, 100.0) {
            ResolvedPaint::Linear { start, end, .. } => {
                assert_eq!(start, (50.0, 0.0));
                assert_eq!(end, (150.0, 100.0));
            }
            other => panic!("expected linear paint, got {other:?}"),
        }
    }

    #[test]
    fn test_resolver_is_deterministic_across_resizes() {
        let g = gradient(
            GradientKind::Linear,
            GradientDirection::Preset(GradientPreset::ToBottom),
        );
        let first = resolve_gradient(&g, 300.0, 400.0);
        let second = resolve_gradient(&g, 300.0, 400.0);
        assert_eq!(first, second);
        assert_ne!(first, resolve_gradient(&g, 300.0, 500.0));
    }
}
