//! Layer ordering through the editing session.

use cardkit_designer::{EditorSession, ObjectId};

fn session_abc() -> (EditorSession, ObjectId, ObjectId, ObjectId) {
    let mut session = EditorSession::new();
    let a = session.add_rect(0.0, 0.0, 10.0, 10.0);
    let b = session.add_rect(20.0, 0.0, 10.0, 10.0);
    let c = session.add_rect(40.0, 0.0, 10.0, 10.0);
    (session, a, b, c)
}

fn order(session: &EditorSession) -> Vec<ObjectId> {
    session.document().objects().map(|o| o.id).collect()
}

#[test]
fn test_front_then_back_lands_backmost_preserving_others() {
    let (mut session, a, b, c) = session_abc();
    assert!(session.bring_to_front(b));
    assert!(session.send_to_back(b));
    assert_eq!(session.layer_info(b), Some((1, 3)));
    assert_eq!(order(&session), vec![b, a, c]);
}

#[test]
fn test_move_to_index_scenario() {
    let (mut session, a, b, c) = session_abc();
    assert_eq!(session.layer_info(c), Some((3, 3)));
    assert_eq!(session.layer_info(b), Some((2, 3)));

    assert!(session.move_to_layer(a, 3));
    assert_eq!(order(&session), vec![b, c, a]);
    assert_eq!(session.layer_info(b), Some((1, 3)));
    assert_eq!(session.layer_info(c), Some((2, 3)));
    assert_eq!(session.layer_info(a), Some((3, 3)));
}

#[test]
fn test_reorder_is_undoable() {
    let (mut session, a, b, c) = session_abc();
    session.bring_to_front(a);
    assert_eq!(order(&session), vec![b, c, a]);
    assert!(session.undo());
    assert_eq!(order(&session), vec![a, b, c]);
}

#[test]
fn test_noop_reorder_does_not_checkpoint() {
    let (mut session, _a, _b, c) = session_abc();
    let before = session.edit_stamp();
    // Already front-most: nothing to record.
    assert!(!session.bring_to_front(c));
    assert_eq!(session.edit_stamp(), before);
}
