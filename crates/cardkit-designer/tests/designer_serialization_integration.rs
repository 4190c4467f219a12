//! Design-data round-trip and fallback behavior.

use cardkit_designer::{
    from_value, serialize_design, templates, to_value, EditorSession, PanelState,
};
use proptest::prelude::*;

#[test]
fn test_template_documents_round_trip() {
    for name in templates::TEMPLATE_NAMES {
        let doc = templates::by_name(name).unwrap();
        let design = serialize_design(&doc, &PanelState::default());
        let back = from_value(to_value(&design).unwrap()).unwrap();
        assert_eq!(back.document, doc, "template {name}");
    }
}

#[test]
fn test_session_state_survives_save_load() {
    let mut session = EditorSession::new();
    session.apply_template(templates::wedding());
    let id = session.add_rect(10.0, 20.0, 100.0, 50.0);
    session.try_rotate(id, 30.0);
    session.resize_canvas(500.0, 700.0);
    session.rotate_canvas_clockwise();

    let design = serialize_design(session.document(), session.panel());
    let value = to_value(&design).unwrap();

    let mut restored = EditorSession::new();
    restored.load_design(from_value(value).unwrap());

    assert_eq!(restored.document(), session.document());
    assert!(!restored.is_dirty());
    // Ids keep flowing without collisions after a reload.
    let fresh = restored.add_circle(0.0, 0.0, 5.0);
    assert!(restored.document().objects().filter(|o| o.id == fresh).count() == 1);
}

proptest! {
    #[test]
    fn prop_serialize_deserialize_is_identity(
        rects in proptest::collection::vec(
            (0.0..600.0f64, 0.0..800.0f64, 1.0..300.0f64, 1.0..300.0f64, 0.0..360.0f64),
            0..12,
        ),
        texts in proptest::collection::vec("[ -~]{0,24}", 0..4),
        rotation_steps in 0usize..4,
    ) {
        let mut session = EditorSession::new();
        for (x, y, w, h, angle) in rects {
            let id = session.add_rect(x, y, w, h);
            session.try_rotate(id, angle);
        }
        for text in texts {
            session.add_text(text, 5.0, 5.0);
        }
        for _ in 0..rotation_steps {
            session.rotate_canvas_clockwise();
        }

        let design = serialize_design(session.document(), session.panel());
        let back = from_value(to_value(&design).unwrap()).unwrap();
        prop_assert_eq!(&back, &design);
        prop_assert_eq!(&back.document, session.document());
    }
}
