use serde::{Deserialize, Serialize};

use cardkit_core::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDecoration {
    #[default]
    None,
    Underline,
    Linethrough,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// A block of text with its typographic properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextObject {
    pub content: String,
    pub font_family: String,
    pub font_size: f64,
    #[serde(default)]
    pub weight: FontWeight,
    #[serde(default)]
    pub style: FontStyle,
    #[serde(default)]
    pub decoration: TextDecoration,
    #[serde(default)]
    pub align: TextAlign,
    pub color: Color,
    /// Optional highlight behind the glyphs.
    #[serde(default)]
    pub background: Option<Color>,
}

impl TextObject {
    pub fn new(content: impl Into<String>, font_family: impl Into<String>, font_size: f64) -> Self {
        Self {
            content: content.into(),
            font_family: font_family.into(),
            font_size,
            weight: FontWeight::default(),
            style: FontStyle::default(),
            decoration: TextDecoration::default(),
            align: TextAlign::default(),
            color: Color::black(),
            background: None,
        }
    }

    /// Approximate local-space bounds from line count and glyph advance.
    /// Exact metrics depend on the resolved font; this estimate is what
    /// layout and selection work against.
    pub fn local_bounds(&self) -> (f64, f64, f64, f64) {
        let lines: Vec<&str> = self.content.lines().collect();
        let line_count = lines.len().max(1) as f64;
        let widest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as f64;
        let width = widest * self.font_size * 0.6;
        let height = line_count * self.font_size * 1.2;
        (0.0, 0.0, width, height)
    }
}
