//! Fill and color model: solid colors, linear/radial gradients with
//! directional presets, and stroke styling.

use serde::{Deserialize, Serialize};

use crate::error::{StyleError, StyleResult};

/// A validated hex color (`#rgb`, `#rrggbb` or `#rrggbbaa`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    /// Parses a hex color string, normalizing to lowercase.
    pub fn from_hex(hex: &str) -> StyleResult<Self> {
        let value = hex.trim().to_ascii_lowercase();
        let digits = value
            .strip_prefix('#')
            .ok_or_else(|| StyleError::InvalidColor(hex.to_string()))?;
        let valid_len = matches!(digits.len(), 3 | 6 | 8);
        if !valid_len || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(StyleError::InvalidColor(hex.to_string()));
        }
        Ok(Self(value))
    }

    /// The normalized hex form, including the leading `#`.
    pub fn as_hex(&self) -> &str {
        &self.0
    }

    /// Expands to RGBA bytes. Alpha is 255 unless an 8-digit form was given.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let digits = &self.0[1..];
        let component = |hi: u8, lo: u8| -> u8 {
            let hex = |c: u8| (c as char).to_digit(16).unwrap_or(0) as u8;
            hex(hi) * 16 + hex(lo)
        };
        let bytes = digits.as_bytes();
        match bytes.len() {
            3 => [
                component(bytes[0], bytes[0]),
                component(bytes[1], bytes[1]),
                component(bytes[2], bytes[2]),
                255,
            ],
            6 => [
                component(bytes[0], bytes[1]),
                component(bytes[2], bytes[3]),
                component(bytes[4], bytes[5]),
                255,
            ],
            8 => [
                component(bytes[0], bytes[1]),
                component(bytes[2], bytes[3]),
                component(bytes[4], bytes[5]),
                component(bytes[6], bytes[7]),
            ],
            _ => [0, 0, 0, 255],
        }
    }

    pub fn white() -> Self {
        Self("#ffffff".to_string())
    }

    pub fn black() -> Self {
        Self("#000000".to_string())
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stroke styling shared by all scene objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            color: Color::black(),
            width: 0.0,
        }
    }
}

/// Gradient flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    Linear,
    Radial,
}

/// A single gradient color stop. Offsets live in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Color,
}

/// Named linear-gradient directions: the four edges, the four corner
/// diagonals, and four absolute angles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GradientPreset {
    ToTop,
    ToBottom,
    ToLeft,
    ToRight,
    ToTopLeft,
    ToTopRight,
    ToBottomLeft,
    ToBottomRight,
    Angle45,
    Angle135,
    Angle225,
    Angle315,
}

/// Direction of a linear gradient: a named preset or explicit normalized
/// start/end coordinates. Radial gradients ignore direction entirely.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GradientDirection {
    Preset(GradientPreset),
    Coords { x1: f64, y1: f64, x2: f64, y2: f64 },
}

impl Default for GradientDirection {
    fn default() -> Self {
        Self::Preset(GradientPreset::ToBottom)
    }
}

/// A declarative gradient specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    pub kind: GradientKind,
    pub stops: Vec<GradientStop>,
    #[serde(default)]
    pub direction: GradientDirection,
}

impl Gradient {
    /// Builds a validated gradient.
    pub fn new(
        kind: GradientKind,
        stops: Vec<GradientStop>,
        direction: GradientDirection,
    ) -> StyleResult<Self> {
        let gradient = Self {
            kind,
            stops,
            direction,
        };
        gradient.validate()?;
        Ok(gradient)
    }

    /// Checks the structural invariants: at least two stops, offsets in
    /// `[0, 1]` and strictly increasing.
    pub fn validate(&self) -> StyleResult<()> {
        if self.stops.len() < 2 {
            return Err(StyleError::InvalidGradient {
                reason: format!("requires at least 2 stops, got {}", self.stops.len()),
            });
        }
        let mut previous = f64::NEG_INFINITY;
        for stop in &self.stops {
            if !(0.0..=1.0).contains(&stop.offset) {
                return Err(StyleError::InvalidGradient {
                    reason: format!("stop offset {} outside [0, 1]", stop.offset),
                });
            }
            if stop.offset <= previous {
                return Err(StyleError::InvalidGradient {
                    reason: "stop offsets must be strictly increasing".to_string(),
                });
            }
            previous = stop.offset;
        }
        Ok(())
    }
}

/// A tagged fill value: a solid color or a gradient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Fill {
    Color { color: Color },
    Gradient { gradient: Gradient },
}

impl Fill {
    pub fn solid(color: Color) -> Self {
        Self::Color { color }
    }

    pub fn gradient(gradient: Gradient) -> Self {
        Self::Gradient { gradient }
    }
}

impl Default for Fill {
    fn default() -> Self {
        Self::Color {
            color: Color::black(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stops(offsets: &[f64]) -> Vec<GradientStop> {
        offsets
            .iter()
            .map(|&offset| GradientStop {
                offset,
                color: Color::black(),
            })
            .collect()
    }

    #[test]
    fn test_color_parsing() {
        assert_eq!(Color::from_hex("#FFAA00").unwrap().as_hex(), "#ffaa00");
        assert_eq!(Color::from_hex("#abc").unwrap().to_rgba8(), [170, 187, 204, 255]);
        assert_eq!(
            Color::from_hex("#11223344").unwrap().to_rgba8(),
            [17, 34, 51, 68]
        );
        assert!(Color::from_hex("red").is_err());
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#gggggg").is_err());
    }

    #[test]
    fn test_gradient_requires_two_stops() {
        let err = Gradient::new(
            GradientKind::Linear,
            stops(&[0.0]),
            GradientDirection::default(),
        )
        .unwrap_err();
        assert!(matches!(err, StyleError::InvalidGradient { .. }));
    }

    #[test]
    fn test_gradient_offsets_must_increase() {
        assert!(Gradient::new(
            GradientKind::Linear,
            stops(&[0.0, 0.5, 0.5]),
            GradientDirection::default(),
        )
        .is_err());
        assert!(Gradient::new(
            GradientKind::Radial,
            stops(&[0.0, 0.4, 1.0]),
            GradientDirection::default(),
        )
        .is_ok());
    }

    #[test]
    fn test_gradient_offset_range() {
        assert!(Gradient::new(
            GradientKind::Linear,
            stops(&[-0.1, 1.0]),
            GradientDirection::default(),
        )
        .is_err());
    }

    #[test]
    fn test_fill_serde_round_trip() {
        let fill = Fill::gradient(
            Gradient::new(
                GradientKind::Linear,
                stops(&[0.0, 1.0]),
                GradientDirection::Preset(GradientPreset::ToRight),
            )
            .unwrap(),
        );
        let json = serde_json::to_string(&fill).unwrap();
        let back: Fill = serde_json::from_str(&json).unwrap();
        assert_eq!(fill, back);
    }
}
