//! Canvas background model.
//!
//! All three branches (color, gradient, image) are retained regardless of
//! the active kind, so switching kinds back and forth restores what was
//! chosen earlier.

use serde::{Deserialize, Serialize};

use cardkit_core::constants::DEFAULT_BACKGROUND_COLOR;
use cardkit_core::{Color, Gradient, GradientDirection, GradientKind, GradientStop};

/// Which background branch is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundKind {
    Color,
    Gradient,
    Image,
}

/// How a background image is mapped onto the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFit {
    #[default]
    Cover,
    Contain,
    Stretch,
}

/// A background image reference with its fit setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundImage {
    pub source: String,
    #[serde(default)]
    pub fit: ImageFit,
}

/// The full background specification of a canvas document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Background {
    pub kind: BackgroundKind,
    pub color: Color,
    pub gradient: Gradient,
    pub image: Option<BackgroundImage>,
}

impl Default for Background {
    fn default() -> Self {
        Self {
            kind: BackgroundKind::Color,
            color: Color::from_hex(DEFAULT_BACKGROUND_COLOR)
                .unwrap_or_else(|_| Color::white()),
            gradient: default_gradient(),
            image: None,
        }
    }
}

fn default_gradient() -> Gradient {
    // Always structurally valid, so a kind switch to gradient has
    // something to show before the user configures stops.
    Gradient {
        kind: GradientKind::Linear,
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
        direction: GradientDirection::default(),
    }
}

/// Partial update of a background. `None` fields keep their current
/// value; setting one sub-field never discards the others.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackgroundPatch {
    pub kind: Option<BackgroundKind>,
    pub color: Option<Color>,
    pub gradient: Option<Gradient>,
    pub gradient_direction: Option<GradientDirection>,
    pub image: Option<BackgroundImage>,
}

impl Background {
    /// Applies a patch, preserving every field the patch leaves out.
    pub fn apply(&mut self, patch: BackgroundPatch) {
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(gradient) = patch.gradient {
            self.gradient = gradient;
        }
        if let Some(direction) = patch.gradient_direction {
            self.gradient.direction = direction;
        }
        if let Some(image) = patch.image {
            self.image = Some(image);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardkit_core::GradientPreset;

    #[test]
    fn test_patch_preserves_unrelated_fields() {
        let mut bg = Background::default();
        let original_color = bg.color.clone();

        // Switch to gradient, then change only the direction.
        bg.apply(BackgroundPatch {
            kind: Some(BackgroundKind::Gradient),
            ..Default::default()
        });
        bg.apply(BackgroundPatch {
            gradient_direction: Some(GradientDirection::Preset(GradientPreset::ToRight)),
            ..Default::default()
        });
        assert_eq!(
            bg.gradient.direction,
            GradientDirection::Preset(GradientPreset::ToRight)
        );

        // Switching back to color restores the color chosen before.
        bg.apply(BackgroundPatch {
            kind: Some(BackgroundKind::Color),
            ..Default::default()
        });
        assert_eq!(bg.color, original_color);
        assert_eq!(
            bg.gradient.direction,
            GradientDirection::Preset(GradientPreset::ToRight)
        );
    }
}
