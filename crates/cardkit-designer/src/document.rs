//! The canvas document: an ordered sequence of scene objects plus canvas
//! size, presentation rotation and background.
//!
//! The sequence *is* the z-order: the first object is back-most, the last
//! is front-most. Object ids are unique within a document and allocated
//! from a monotonic counter.

use serde::{Deserialize, Serialize};
use tracing::debug;

use cardkit_core::constants::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};
use cardkit_core::{Fill, Point, Transform};

use crate::background::{Background, BackgroundPatch};
use crate::error::{DesignerError, DesignerResult};
use crate::model::{
    CircleObject, FontStyle, FontWeight, GroupObject, ImageObject, LineObject, ObjectDefaults,
    ObjectId, ObjectKind, PolygonObject, RectObject, SceneObject, TextAlign, TextDecoration,
    TextObject, TriangleObject,
};

/// The mutable document graph behind an editing session. Serialization
/// root for project persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasDocument {
    pub width: f64,
    pub height: f64,
    /// View-only rotation of the whole canvas, distinct from any
    /// object's own rotation. Controls only ever set 0/90/180/270.
    pub rotation_degrees: i32,
    pub background: Background,
    objects: Vec<SceneObject>,
    next_id: ObjectId,
}

impl Default for CanvasDocument {
    fn default() -> Self {
        Self::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT)
    }
}

impl CanvasDocument {
    /// Creates an empty document with the given canvas size.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            rotation_degrees: 0,
            background: Background::default(),
            objects: Vec::new(),
            next_id: 1,
        }
    }

    /// Number of objects, including group children.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Objects in draw order (back to front).
    pub fn objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter()
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.get(id).is_some()
    }

    /// Zero-based position of an object in the draw order.
    pub(crate) fn index_of(&self, id: ObjectId) -> Option<usize> {
        self.objects.iter().position(|o| o.id == id)
    }

    pub(crate) fn allocate_id(&mut self) -> ObjectId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn objects_mut(&mut self) -> &mut Vec<SceneObject> {
        &mut self.objects
    }

    // ------------------------------------------------------------------
    // Object construction
    // ------------------------------------------------------------------

    /// Appends an object built from a kind payload; new objects are
    /// always topmost. Returns the assigned id.
    pub fn add_object(&mut self, kind: ObjectKind, defaults: &ObjectDefaults) -> ObjectId {
        let id = self.allocate_id();
        let object = SceneObject::new(id, kind, defaults);
        debug!(id, kind = object.kind.name(), "object added");
        self.objects.push(object);
        id
    }

    /// Adds a text block at a position.
    pub fn add_text(
        &mut self,
        content: impl Into<String>,
        x: f64,
        y: f64,
        defaults: &ObjectDefaults,
    ) -> ObjectId {
        let mut text = TextObject::new(content, defaults.font_family.clone(), defaults.font_size);
        text.color = defaults.text_color.clone();
        let id = self.add_object(ObjectKind::Text(text), defaults);
        self.place(id, x, y);
        id
    }

    /// Adds a rectangle with its top-left corner at a position.
    pub fn add_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        defaults: &ObjectDefaults,
    ) -> ObjectId {
        let id = self.add_object(ObjectKind::Rect(RectObject::new(width, height)), defaults);
        self.place(id, x, y);
        id
    }

    /// Adds a circle centered at a position.
    pub fn add_circle(&mut self, cx: f64, cy: f64, radius: f64, defaults: &ObjectDefaults) -> ObjectId {
        let id = self.add_object(ObjectKind::Circle(CircleObject::new(radius)), defaults);
        self.place(id, cx, cy);
        id
    }

    /// Adds a triangle with its bounding box top-left at a position.
    pub fn add_triangle(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        defaults: &ObjectDefaults,
    ) -> ObjectId {
        let id = self.add_object(
            ObjectKind::Triangle(TriangleObject::new(width, height)),
            defaults,
        );
        self.place(id, x, y);
        id
    }

    /// Adds a polygon (or star) centered at a position.
    pub fn add_polygon(
        &mut self,
        cx: f64,
        cy: f64,
        polygon: PolygonObject,
        defaults: &ObjectDefaults,
    ) -> ObjectId {
        let id = self.add_object(ObjectKind::Polygon(polygon), defaults);
        self.place(id, cx, cy);
        id
    }

    /// Adds a line between two canvas points. The object origin lands on
    /// the first endpoint.
    pub fn add_line(&mut self, start: Point, end: Point, defaults: &ObjectDefaults) -> ObjectId {
        let local_end = Point::new(end.x - start.x, end.y - start.y);
        let id = self.add_object(
            ObjectKind::Line(LineObject::new(Point::new(0.0, 0.0), local_end)),
            defaults,
        );
        self.place(id, start.x, start.y);
        id
    }

    /// Adds an image object at a position.
    pub fn add_image(
        &mut self,
        image: ImageObject,
        x: f64,
        y: f64,
        defaults: &ObjectDefaults,
    ) -> ObjectId {
        let id = self.add_object(ObjectKind::Image(image), defaults);
        self.place(id, x, y);
        id
    }

    /// Groups existing objects. Children stay in the sequence; the group
    /// records their paint order. Ids that do not resolve are dropped.
    /// Returns `None` when fewer than two children resolve.
    pub fn group_objects(
        &mut self,
        ids: &[ObjectId],
        defaults: &ObjectDefaults,
    ) -> Option<ObjectId> {
        let children: Vec<ObjectId> = ids.iter().copied().filter(|&id| self.contains(id)).collect();
        if children.len() < 2 {
            return None;
        }
        Some(self.add_object(ObjectKind::Group(GroupObject::new(children)), defaults))
    }

    fn place(&mut self, id: ObjectId, x: f64, y: f64) {
        if let Some(object) = self.get_mut(id) {
            object.transform = Transform::at(x, y);
        }
    }

    // ------------------------------------------------------------------
    // Removal, update, cloning
    // ------------------------------------------------------------------

    /// Removes an object and, if it is a group, all of its transitive
    /// children. Unknown ids are a no-op so delete buttons stay
    /// idempotent. Returns the number of objects removed.
    pub fn remove_object(&mut self, id: ObjectId) -> usize {
        let Some(root) = self.get(id) else {
            return 0;
        };
        let mut doomed = vec![root.id];
        let mut queue = match &root.kind {
            ObjectKind::Group(group) => group.children.clone(),
            _ => Vec::new(),
        };
        while let Some(child_id) = queue.pop() {
            if doomed.contains(&child_id) {
                continue;
            }
            if let Some(child) = self.get(child_id) {
                doomed.push(child_id);
                if let ObjectKind::Group(group) = &child.kind {
                    queue.extend_from_slice(&group.children);
                }
            }
        }
        let before = self.objects.len();
        self.objects.retain(|o| !doomed.contains(&o.id));
        let removed = before - self.objects.len();
        debug!(id, removed, "object removed");
        removed
    }

    /// Merges a partial property update into an existing object. Unknown
    /// ids are an error here: the caller asked for *this* object.
    pub fn update_object(&mut self, id: ObjectId, patch: &ObjectPatch) -> DesignerResult<()> {
        let object = self
            .get_mut(id)
            .ok_or(DesignerError::ObjectNotFound(id))?;
        patch.apply_to(object)
    }

    /// Deep-clones an object and its transitive group children without
    /// touching the document. Root first. `None` when the id does not
    /// resolve.
    pub fn subtree(&self, id: ObjectId) -> Option<Vec<SceneObject>> {
        let root = self.get(id)?.clone();
        let mut out = vec![root];
        let mut cursor = 0;
        while cursor < out.len() {
            if let ObjectKind::Group(group) = &out[cursor].kind {
                let child_ids = group.children.clone();
                for child_id in child_ids {
                    if out.iter().any(|o| o.id == child_id) {
                        continue;
                    }
                    if let Some(child) = self.get(child_id) {
                        out.push(child.clone());
                    }
                }
            }
            cursor += 1;
        }
        Some(out)
    }

    /// Inserts a cloned subtree with freshly allocated ids, optionally
    /// offsetting the root's position. Children keep their transforms
    /// (they are group-relative). Returns the new root id.
    pub fn adopt_subtree(
        &mut self,
        mut objects: Vec<SceneObject>,
        offset: Option<(f64, f64)>,
    ) -> DesignerResult<ObjectId> {
        if objects.is_empty() {
            return Err(DesignerError::InvalidValue {
                field: "subtree".to_string(),
                reason: "empty".to_string(),
            });
        }
        let mut mapping = Vec::with_capacity(objects.len());
        for object in &mut objects {
            let new_id = self.allocate_id();
            mapping.push((object.id, new_id));
            object.id = new_id;
        }
        for object in &mut objects {
            if let ObjectKind::Group(group) = &mut object.kind {
                for child in &mut group.children {
                    if let Some(&(_, new_id)) = mapping.iter().find(|&&(old, _)| old == *child) {
                        *child = new_id;
                    }
                }
            }
        }
        if let Some((dx, dy)) = offset {
            objects[0].transform = objects[0].transform.offset_by(dx, dy);
        }
        let root = objects.remove(0);
        let root_id = root.id;
        // Children first so the root ends up topmost.
        self.objects.extend(objects);
        self.objects.push(root);
        Ok(root_id)
    }

    /// Clones an object (deep for groups) into the document with fresh
    /// ids, offset by the given delta. Returns the new root id.
    pub fn duplicate_object(
        &mut self,
        id: ObjectId,
        offset: Option<(f64, f64)>,
    ) -> DesignerResult<ObjectId> {
        let subtree = self
            .subtree(id)
            .ok_or(DesignerError::ObjectNotFound(id))?;
        self.adopt_subtree(subtree, offset)
    }

    // ------------------------------------------------------------------
    // Canvas-level operations
    // ------------------------------------------------------------------

    /// Changes the canvas size. Object coordinates are canvas-absolute,
    /// so nothing is rescaled; objects may overflow the new bounds.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Sets the presentation rotation. Does not alter any object.
    pub fn set_rotation(&mut self, degrees: i32) {
        self.rotation_degrees = degrees;
    }

    /// Steps the presentation rotation clockwise through the quarter
    /// turns, the only values the controls exercise.
    pub fn rotate_clockwise(&mut self) {
        self.rotation_degrees = (self.rotation_degrees + 90).rem_euclid(360);
    }

    /// Replaces the background wholesale.
    pub fn set_background(&mut self, background: Background) {
        self.background = background;
    }

    /// Patches background sub-fields, preserving the rest.
    pub fn patch_background(&mut self, patch: BackgroundPatch) {
        self.background.apply(patch);
    }
}

/// Partial property update for [`CanvasDocument::update_object`].
///
/// Common fields apply to every kind; kind-specific fields are rejected
/// with [`DesignerError::PropertyNotApplicable`] when the target is of a
/// different kind. Unknown fields in a JSON patch are rejected outright.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ObjectPatch {
    // Common
    pub name: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub scale_x: Option<f64>,
    pub scale_y: Option<f64>,
    pub angle_degrees: Option<f64>,
    pub fill: Option<Fill>,
    pub stroke_color: Option<cardkit_core::Color>,
    pub stroke_width: Option<f64>,
    pub opacity: Option<f64>,
    pub locked: Option<bool>,
    // Text
    pub content: Option<String>,
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub font_weight: Option<FontWeight>,
    pub font_style: Option<FontStyle>,
    pub decoration: Option<TextDecoration>,
    pub align: Option<TextAlign>,
    pub text_color: Option<cardkit_core::Color>,
    pub text_background: Option<Option<cardkit_core::Color>>,
    // Rect / triangle
    pub width: Option<f64>,
    pub height: Option<f64>,
    // Circle
    pub radius: Option<f64>,
    // Polygon
    pub vertices: Option<Vec<Point>>,
    // Line
    pub start: Option<Point>,
    pub end: Option<Point>,
    // Image
    pub source: Option<String>,
}

impl ObjectPatch {
    /// Decodes a patch from loose JSON, mapping unknown fields to
    /// [`DesignerError::UnknownProperty`].
    pub fn from_value(value: serde_json::Value) -> DesignerResult<Self> {
        serde_json::from_value(value).map_err(|err| {
            let message = err.to_string();
            if message.starts_with("unknown field") {
                DesignerError::UnknownProperty(message)
            } else {
                DesignerError::InvalidValue {
                    field: "patch".to_string(),
                    reason: message,
                }
            }
        })
    }

    /// Applies the patch to an object, validating values first so a
    /// rejected patch leaves the object untouched.
    pub fn apply_to(&self, object: &mut SceneObject) -> DesignerResult<()> {
        self.validate(object)?;

        if let Some(name) = &self.name {
            object.name = name.clone();
        }
        if let Some(x) = self.x {
            object.transform.x = x;
        }
        if let Some(y) = self.y {
            object.transform.y = y;
        }
        if self.scale_x.is_some() || self.scale_y.is_some() {
            let sx = self.scale_x.unwrap_or(object.transform.scale_x);
            let sy = self.scale_y.unwrap_or(object.transform.scale_y);
            object.transform.set_scale(sx, sy);
        }
        if let Some(angle) = self.angle_degrees {
            object.transform.angle_degrees = angle;
        }
        if let Some(fill) = &self.fill {
            object.fill = fill.clone();
        }
        if let Some(color) = &self.stroke_color {
            object.stroke.color = color.clone();
        }
        if let Some(width) = self.stroke_width {
            object.stroke.width = width;
        }
        if let Some(opacity) = self.opacity {
            object.set_opacity(opacity);
        }
        if let Some(locked) = self.locked {
            object.locked = locked;
        }

        match &mut object.kind {
            ObjectKind::Text(text) => {
                if let Some(content) = &self.content {
                    text.content = content.clone();
                }
                if let Some(family) = &self.font_family {
                    text.font_family = family.clone();
                }
                if let Some(size) = self.font_size {
                    text.font_size = size;
                }
                if let Some(weight) = self.font_weight {
                    text.weight = weight;
                }
                if let Some(style) = self.font_style {
                    text.style = style;
                }
                if let Some(decoration) = self.decoration {
                    text.decoration = decoration;
                }
                if let Some(align) = self.align {
                    text.align = align;
                }
                if let Some(color) = &self.text_color {
                    text.color = color.clone();
                }
                if let Some(background) = &self.text_background {
                    text.background = background.clone();
                }
            }
            ObjectKind::Rect(rect) => {
                if let Some(width) = self.width {
                    rect.width = width;
                }
                if let Some(height) = self.height {
                    rect.height = height;
                }
            }
            ObjectKind::Triangle(triangle) => {
                if let Some(width) = self.width {
                    triangle.width = width;
                }
                if let Some(height) = self.height {
                    triangle.height = height;
                }
            }
            ObjectKind::Circle(circle) => {
                if let Some(radius) = self.radius {
                    circle.radius = radius;
                }
            }
            ObjectKind::Polygon(polygon) => {
                if let Some(vertices) = &self.vertices {
                    polygon.vertices = vertices.clone();
                }
            }
            ObjectKind::Line(line) => {
                if let Some(start) = self.start {
                    line.start = start;
                }
                if let Some(end) = self.end {
                    line.end = end;
                }
            }
            ObjectKind::Image(image) => {
                if let Some(source) = &self.source {
                    image.source = source.clone();
                }
            }
            ObjectKind::Group(_) => {}
        }
        Ok(())
    }

    fn validate(&self, object: &SceneObject) -> DesignerResult<()> {
        if let Some(Fill::Gradient { gradient }) = &self.fill {
            gradient.validate()?;
        }
        if let Some(width) = self.stroke_width {
            if width < 0.0 || !width.is_finite() {
                return Err(DesignerError::InvalidValue {
                    field: "stroke_width".to_string(),
                    reason: format!("{width} is not a valid stroke width"),
                });
            }
        }
        if let Some(size) = self.font_size {
            if size <= 0.0 || !size.is_finite() {
                return Err(DesignerError::InvalidValue {
                    field: "font_size".to_string(),
                    reason: format!("{size} is not a valid font size"),
                });
            }
        }

        let kind = object.kind.name();
        let reject = |property: &str| -> DesignerResult<()> {
            Err(DesignerError::PropertyNotApplicable {
                property: property.to_string(),
                kind: kind.to_string(),
            })
        };

        let is_text = matches!(object.kind, ObjectKind::Text(_));
        if !is_text {
            if self.content.is_some() {
                return reject("content");
            }
            if self.font_family.is_some() {
                return reject("font_family");
            }
            if self.font_size.is_some() {
                return reject("font_size");
            }
            if self.font_weight.is_some() {
                return reject("font_weight");
            }
            if self.font_style.is_some() {
                return reject("font_style");
            }
            if self.decoration.is_some() {
                return reject("decoration");
            }
            if self.align.is_some() {
                return reject("align");
            }
            if self.text_color.is_some() {
                return reject("text_color");
            }
            if self.text_background.is_some() {
                return reject("text_background");
            }
        }
        if self.width.is_some() || self.height.is_some() {
            if !matches!(object.kind, ObjectKind::Rect(_) | ObjectKind::Triangle(_)) {
                return reject(if self.width.is_some() { "width" } else { "height" });
            }
        }
        if self.radius.is_some() && !matches!(object.kind, ObjectKind::Circle(_)) {
            return reject("radius");
        }
        if self.vertices.is_some() && !matches!(object.kind, ObjectKind::Polygon(_)) {
            return reject("vertices");
        }
        if (self.start.is_some() || self.end.is_some())
            && !matches!(object.kind, ObjectKind::Line(_))
        {
            return reject(if self.start.is_some() { "start" } else { "end" });
        }
        if self.source.is_some() && !matches!(object.kind, ObjectKind::Image(_)) {
            return reject("source");
        }
        Ok(())
    }
}
