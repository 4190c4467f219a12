//! Undo/redo behavior through the editing session.

use cardkit_designer::{CanvasDocument, EditorSession, ObjectPatch};
use proptest::prelude::*;

#[test]
fn test_mutations_then_undos_restore_original() {
    let mut session = EditorSession::new();
    session.add_rect(0.0, 0.0, 50.0, 50.0);
    let baseline: CanvasDocument = session.document().clone();

    session.add_circle(100.0, 100.0, 25.0);
    session.add_text("RSVP", 10.0, 10.0);
    let id = session.add_rect(200.0, 200.0, 10.0, 10.0);
    session.remove_object(id);

    for _ in 0..4 {
        assert!(session.undo());
    }
    assert_eq!(session.document(), &baseline);
}

#[test]
fn test_redo_restores_exact_pre_undo_state() {
    let mut session = EditorSession::new();
    session.add_rect(0.0, 0.0, 50.0, 50.0);
    session.add_circle(100.0, 100.0, 25.0);
    let latest = session.document().clone();

    assert!(session.undo());
    assert_ne!(session.document(), &latest);
    assert!(session.redo());
    assert_eq!(session.document(), &latest);
}

#[test]
fn test_new_mutation_after_undo_discards_redo() {
    let mut session = EditorSession::new();
    session.add_rect(0.0, 0.0, 50.0, 50.0);
    session.add_circle(100.0, 100.0, 25.0);

    assert!(session.undo());
    session.add_text("Surprise", 5.0, 5.0);
    assert!(!session.can_redo());
    assert!(!session.redo());
}

#[test]
fn test_history_cap_limits_recoverable_depth() {
    let mut session = EditorSession::new();
    // 25 checkpoints land on a 20-entry stack: only 19 undos remain.
    for i in 0..25 {
        session.add_rect(f64::from(i), 0.0, 5.0, 5.0);
    }
    let mut undos = 0;
    while session.undo() {
        undos += 1;
    }
    assert_eq!(undos, 19);
    // The oldest recoverable state still has the first 6 rectangles.
    assert_eq!(session.document().len(), 6);
}

#[test]
fn test_undo_immediately_after_template_returns_to_empty() {
    let mut session = EditorSession::new();
    session.apply_template(cardkit_designer::templates::birthday());
    assert!(session.undo());
    assert!(session.document().is_empty());
    assert!(!session.undo());
}

#[derive(Debug, Clone)]
enum Mutation {
    AddRect { x: f64, y: f64, w: f64, h: f64 },
    AddCircle { x: f64, y: f64, r: f64 },
    AddText(String),
    MoveFirst { dx: f64, dy: f64 },
    RecolorFirst,
}

fn mutation_strategy() -> impl Strategy<Value = Mutation> {
    prop_oneof![
        (0.0..500.0, 0.0..500.0, 1.0..200.0, 1.0..200.0)
            .prop_map(|(x, y, w, h)| Mutation::AddRect { x, y, w, h }),
        (0.0..500.0, 0.0..500.0, 1.0..100.0)
            .prop_map(|(x, y, r)| Mutation::AddCircle { x, y, r }),
        "[a-z]{1,12}".prop_map(Mutation::AddText),
        (-50.0..50.0, -50.0..50.0).prop_map(|(dx, dy)| Mutation::MoveFirst { dx, dy }),
        Just(Mutation::RecolorFirst),
    ]
}

/// Applies a mutation, always producing exactly one checkpoint.
fn apply(session: &mut EditorSession, mutation: &Mutation) {
    let first = session.document().objects().next().map(|o| o.id);
    match mutation {
        Mutation::AddRect { x, y, w, h } => {
            session.add_rect(*x, *y, *w, *h);
        }
        Mutation::AddCircle { x, y, r } => {
            session.add_circle(*x, *y, *r);
        }
        Mutation::AddText(content) => {
            session.add_text(content.clone(), 0.0, 0.0);
        }
        Mutation::MoveFirst { dx, dy } => match first {
            Some(id) => {
                assert!(session.try_move(id, *dx, *dy));
            }
            None => {
                session.add_rect(0.0, 0.0, 10.0, 10.0);
            }
        },
        Mutation::RecolorFirst => match first {
            Some(id) => {
                let patch = ObjectPatch {
                    opacity: Some(0.5),
                    ..Default::default()
                };
                session.update_object(id, &patch).unwrap();
            }
            None => {
                session.add_rect(0.0, 0.0, 10.0, 10.0);
            }
        },
    }
}

proptest! {
    #[test]
    fn prop_n_mutations_n_undos_round_trip(
        mutations in proptest::collection::vec(mutation_strategy(), 1..19)
    ) {
        let mut session = EditorSession::new();
        session.add_rect(1.0, 1.0, 1.0, 1.0);
        let baseline = session.document().clone();

        for mutation in &mutations {
            apply(&mut session, mutation);
        }
        for _ in 0..mutations.len() {
            prop_assert!(session.undo());
        }
        prop_assert_eq!(session.document(), &baseline);
    }
}
