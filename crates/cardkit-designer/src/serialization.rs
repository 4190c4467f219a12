//! Design-data serialization.
//!
//! A structural dump of the canvas document plus the auxiliary
//! property-panel state, sufficient to exactly reconstruct the session.
//! Decoding tolerates missing fields by falling back to the documented
//! defaults (600x800 canvas, white background, zero rotation) instead of
//! failing; only structurally corrupt JSON is an error.

use serde::{Deserialize, Serialize};

use crate::document::CanvasDocument;
use crate::model::ObjectDefaults;

/// On-disk format version, bumped on breaking layout changes.
pub const DESIGN_FORMAT_VERSION: &str = "1.0";

/// Property-panel state persisted alongside the document so a reload
/// restores the UI where the user left it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelState {
    pub active_tool: String,
    pub show_grid: bool,
    pub defaults: ObjectDefaults,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            active_tool: "select".to_string(),
            show_grid: true,
            defaults: ObjectDefaults::default(),
        }
    }
}

/// The serialization root stored in a project record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignData {
    pub version: String,
    pub document: CanvasDocument,
    pub panel: PanelState,
}

impl Default for DesignData {
    fn default() -> Self {
        Self {
            version: DESIGN_FORMAT_VERSION.to_string(),
            document: CanvasDocument::default(),
            panel: PanelState::default(),
        }
    }
}

/// Dumps the session state into a design-data record.
pub fn serialize_design(document: &CanvasDocument, panel: &PanelState) -> DesignData {
    DesignData {
        version: DESIGN_FORMAT_VERSION.to_string(),
        document: document.clone(),
        panel: panel.clone(),
    }
}

/// Encodes design data as a JSON value for the persistence layer.
pub fn to_value(design: &DesignData) -> serde_json::Result<serde_json::Value> {
    serde_json::to_value(design)
}

/// Decodes design data from a JSON value. Missing fields fall back to
/// defaults; corrupt structure is an error the caller recovers from.
pub fn from_value(value: serde_json::Value) -> serde_json::Result<DesignData> {
    serde_json::from_value(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ObjectDefaults;
    use cardkit_core::constants::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};
    use serde_json::json;

    #[test]
    fn test_round_trip_is_identity() {
        let defaults = ObjectDefaults::default();
        let mut doc = CanvasDocument::new(400.0, 500.0);
        doc.add_text("Hello", 20.0, 30.0, &defaults);
        doc.add_rect(0.0, 0.0, 100.0, 60.0, &defaults);
        doc.rotate_clockwise();

        let design = serialize_design(&doc, &PanelState::default());
        let value = to_value(&design).unwrap();
        let back = from_value(value).unwrap();
        assert_eq!(back, design);
        assert_eq!(back.document, doc);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let design = from_value(json!({})).unwrap();
        assert_eq!(design.document.width, DEFAULT_CANVAS_WIDTH);
        assert_eq!(design.document.height, DEFAULT_CANVAS_HEIGHT);
        assert_eq!(design.document.rotation_degrees, 0);
        assert!(design.document.is_empty());
        assert!(design.panel.show_grid);
    }

    #[test]
    fn test_corrupt_structure_is_an_error() {
        assert!(from_value(json!({ "document": "not an object" })).is_err());
        assert!(from_value(json!([1, 2, 3])).is_err());
    }
}
