use serde::{Deserialize, Serialize};

use super::ObjectId;

/// A group of other objects. Children stay members of the document
/// sequence; this list fixes their paint order within the group, and the
/// group's transform composes with each child's own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupObject {
    pub children: Vec<ObjectId>,
}

impl GroupObject {
    pub fn new(children: Vec<ObjectId>) -> Self {
        Self { children }
    }
}
