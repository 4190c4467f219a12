//! The persistence-facing project record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored project: serialized design state plus the metadata the
/// project browser shows.
///
/// `version` goes up by exactly 1 on every successful update, which is
/// also the only cross-session conflict signal (last write wins).
/// The thumbnail is consistent with the document at save time only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    /// Serialized design data (`cardkit_designer::DesignData`), kept
    /// opaque here so a corrupt record can still be listed and loaded
    /// with a fallback.
    pub design_data: serde_json::Value,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub canvas_rotation: i32,
    pub background_color: String,
    pub background_kind: String,
    #[serde(default)]
    pub background_gradient: Option<serde_json::Value>,
    /// Base64-encoded PNG snapshot rendered at save time.
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub is_template: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    pub version: i64,
    pub last_opened_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a project. The store assigns id, version 1 and
/// the timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDraft {
    pub name: String,
    pub design_data: serde_json::Value,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub canvas_rotation: i32,
    pub background_color: String,
    pub background_kind: String,
    #[serde(default)]
    pub background_gradient: Option<serde_json::Value>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub is_template: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Partial update of a project. `None` fields keep their stored value.
/// A successful update always bumps `version` and refreshes
/// `updated_at`, whatever subset of fields it carries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub design_data: Option<serde_json::Value>,
    pub canvas_width: Option<f64>,
    pub canvas_height: Option<f64>,
    pub canvas_rotation: Option<i32>,
    pub background_color: Option<String>,
    pub background_kind: Option<String>,
    pub background_gradient: Option<Option<serde_json::Value>>,
    pub thumbnail: Option<Option<String>>,
    pub is_template: Option<bool>,
    pub tags: Option<Vec<String>>,
}

impl ProjectUpdate {
    /// Merges the update into a stored record, leaving version and
    /// timestamp handling to the store.
    pub fn apply_to(&self, project: &mut Project) {
        if let Some(name) = &self.name {
            project.name = name.clone();
        }
        if let Some(design_data) = &self.design_data {
            project.design_data = design_data.clone();
        }
        if let Some(width) = self.canvas_width {
            project.canvas_width = width;
        }
        if let Some(height) = self.canvas_height {
            project.canvas_height = height;
        }
        if let Some(rotation) = self.canvas_rotation {
            project.canvas_rotation = rotation;
        }
        if let Some(color) = &self.background_color {
            project.background_color = color.clone();
        }
        if let Some(kind) = &self.background_kind {
            project.background_kind = kind.clone();
        }
        if let Some(gradient) = &self.background_gradient {
            project.background_gradient = gradient.clone();
        }
        if let Some(thumbnail) = &self.thumbnail {
            project.thumbnail = thumbnail.clone();
        }
        if let Some(is_template) = self.is_template {
            project.is_template = is_template;
        }
        if let Some(tags) = &self.tags {
            project.tags = tags.clone();
        }
    }
}

/// Listing filter for the project browser.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectFilter {
    pub is_template: Option<bool>,
    /// When set, a project must carry every requested tag.
    pub tags: Option<Vec<String>>,
}

impl ProjectFilter {
    pub fn matches(&self, project: &Project) -> bool {
        if let Some(is_template) = self.is_template {
            if project.is_template != is_template {
                return false;
            }
        }
        if let Some(tags) = &self.tags {
            if !tags.iter().all(|tag| project.tags.contains(tag)) {
                return false;
            }
        }
        true
    }
}

impl Project {
    /// Materializes a draft into a stored record. Shared by store
    /// implementations so they agree on the creation contract.
    pub fn from_draft(draft: ProjectDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: draft.name,
            design_data: draft.design_data,
            canvas_width: draft.canvas_width,
            canvas_height: draft.canvas_height,
            canvas_rotation: draft.canvas_rotation,
            background_color: draft.background_color,
            background_kind: draft.background_kind,
            background_gradient: draft.background_gradient,
            thumbnail: draft.thumbnail,
            is_template: draft.is_template,
            tags: draft.tags,
            version: 1,
            last_opened_at: now,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn draft(name: &str) -> ProjectDraft {
        ProjectDraft {
            name: name.to_string(),
            design_data: json!({}),
            canvas_width: 600.0,
            canvas_height: 800.0,
            canvas_rotation: 0,
            background_color: "#ffffff".to_string(),
            background_kind: "color".to_string(),
            background_gradient: None,
            thumbnail: None,
            is_template: false,
            tags: vec!["birthday".to_string()],
        }
    }

    #[test]
    fn test_draft_starts_at_version_one() {
        let project = Project::from_draft(draft("Party"), Utc::now());
        assert_eq!(project.version, 1);
        assert_eq!(project.created_at, project.updated_at);
    }

    #[test]
    fn test_filter_matching() {
        let project = Project::from_draft(draft("Party"), Utc::now());
        assert!(ProjectFilter::default().matches(&project));
        assert!(ProjectFilter {
            tags: Some(vec!["birthday".to_string()]),
            ..Default::default()
        }
        .matches(&project));
        assert!(!ProjectFilter {
            tags: Some(vec!["wedding".to_string()]),
            ..Default::default()
        }
        .matches(&project));
        assert!(!ProjectFilter {
            is_template: Some(true),
            ..Default::default()
        }
        .matches(&project));
    }

    #[test]
    fn test_update_merges_partial_fields() {
        let mut project = Project::from_draft(draft("Party"), Utc::now());
        ProjectUpdate {
            name: Some("Garden Party".to_string()),
            thumbnail: Some(Some("cGpn".to_string())),
            ..Default::default()
        }
        .apply_to(&mut project);
        assert_eq!(project.name, "Garden Party");
        assert_eq!(project.thumbnail.as_deref(), Some("cGpn"));
        assert_eq!(project.canvas_width, 600.0);
    }
}
