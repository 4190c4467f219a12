//! Z-order operations on the document's object sequence.
//!
//! Front = last element. Layer numbers shown to the user are 1-based
//! from the back, so higher numbers are visually in front.

use crate::document::CanvasDocument;
use crate::model::ObjectId;

impl CanvasDocument {
    /// Moves the object to the end of the sequence (visually front-most).
    /// Relative order of all other objects is preserved. Returns whether
    /// anything moved.
    pub fn bring_to_front(&mut self, id: ObjectId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let objects = self.objects_mut();
        if index + 1 == objects.len() {
            return false;
        }
        let object = objects.remove(index);
        objects.push(object);
        true
    }

    /// Moves the object to the start of the sequence (visually back-most).
    pub fn send_to_back(&mut self, id: ObjectId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        if index == 0 {
            return false;
        }
        let objects = self.objects_mut();
        let object = objects.remove(index);
        objects.insert(0, object);
        true
    }

    /// Swaps the object with its neighbor toward the front. No-op when
    /// already front-most.
    pub fn move_forward(&mut self, id: ObjectId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let objects = self.objects_mut();
        if index + 1 >= objects.len() {
            return false;
        }
        objects.swap(index, index + 1);
        true
    }

    /// Swaps the object with its neighbor toward the back. No-op when
    /// already back-most.
    pub fn move_backward(&mut self, id: ObjectId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        if index == 0 {
            return false;
        }
        self.objects_mut().swap(index, index - 1);
        true
    }

    /// Relocates the object to a 1-based layer index counted from the
    /// back, clamped into `[1, len]`. Everything else keeps its relative
    /// order.
    pub fn move_to_index(&mut self, id: ObjectId, target_one_based: usize) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let len = self.len();
        let target = target_one_based.clamp(1, len) - 1;
        if target == index {
            return false;
        }
        let objects = self.objects_mut();
        let object = objects.remove(index);
        objects.insert(target, object);
        true
    }

    /// Layer position for UI display: `(one_based_index_from_back, total)`.
    /// Index 1 is the back-most (first-drawn) object.
    pub fn layer_info(&self, id: ObjectId) -> Option<(usize, usize)> {
        self.index_of(id).map(|index| (index + 1, self.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ObjectDefaults;

    fn doc_abc() -> (CanvasDocument, ObjectId, ObjectId, ObjectId) {
        let defaults = ObjectDefaults::default();
        let mut doc = CanvasDocument::default();
        let a = doc.add_rect(0.0, 0.0, 10.0, 10.0, &defaults);
        let b = doc.add_rect(10.0, 0.0, 10.0, 10.0, &defaults);
        let c = doc.add_rect(20.0, 0.0, 10.0, 10.0, &defaults);
        (doc, a, b, c)
    }

    fn order(doc: &CanvasDocument) -> Vec<ObjectId> {
        doc.objects().map(|o| o.id).collect()
    }

    #[test]
    fn test_bring_to_front_preserves_other_order() {
        let (mut doc, a, b, c) = doc_abc();
        assert!(doc.bring_to_front(a));
        assert_eq!(order(&doc), vec![b, c, a]);
    }

    #[test]
    fn test_send_to_back() {
        let (mut doc, a, b, c) = doc_abc();
        assert!(doc.send_to_back(c));
        assert_eq!(order(&doc), vec![c, a, b]);
    }

    #[test]
    fn test_move_forward_backward_extremes_are_noops() {
        let (mut doc, a, _b, c) = doc_abc();
        assert!(!doc.move_forward(c));
        assert!(!doc.move_backward(a));
    }

    #[test]
    fn test_move_to_index_clamps() {
        let (mut doc, a, b, c) = doc_abc();
        assert!(doc.move_to_index(a, 99));
        assert_eq!(order(&doc), vec![b, c, a]);
        assert!(doc.move_to_index(a, 0));
        assert_eq!(order(&doc), vec![a, b, c]);
    }

    #[test]
    fn test_layer_info_scenario() {
        // Document [A, B, C], A back-most.
        let (mut doc, a, b, c) = doc_abc();
        assert_eq!(doc.layer_info(c), Some((3, 3)));

        doc.move_to_index(a, 3);
        assert_eq!(order(&doc), vec![b, c, a]);
        assert_eq!(doc.layer_info(b), Some((1, 3)));
        assert_eq!(doc.layer_info(c), Some((2, 3)));
        assert_eq!(doc.layer_info(a), Some((3, 3)));
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let (mut doc, ..) = doc_abc();
        let before = order(&doc);
        assert!(!doc.bring_to_front(999));
        assert!(!doc.move_to_index(999, 1));
        assert_eq!(order(&doc), before);
        assert_eq!(doc.layer_info(999), None);
    }
}
