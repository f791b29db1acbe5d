use super::*;
use smallvec::smallvec;

fn setup() -> (TermStore, ConstraintStore, TermId, TermId) {
    let mut terms = TermStore::new();
    let x = terms.var();
    let five = terms.integer(5);
    (terms, ConstraintStore::new(), x, five)
}

#[test]
fn post_attaches_to_variables() {
    let (mut terms, mut store, x, five) = setup();
    let id = store.post(
        &mut terms,
        ConstraintKind::Disunification,
        x,
        five,
        smallvec![(x, 1)],
    );
    assert_eq!(store.len(), 1);
    assert_eq!(terms.variable_node(x).unwrap().constraints.as_slice(), &[id]);
    assert_eq!(store.get(id).kind, ConstraintKind::Disunification);
}

#[test]
fn truncate_detaches() {
    let (mut terms, mut store, x, five) = setup();
    store.post(
        &mut terms,
        ConstraintKind::ArithmeticGreater,
        x,
        five,
        smallvec![(x, 1)],
    );
    store.truncate(&mut terms, 0);
    assert_eq!(store.len(), 0);
    assert!(terms.variable_node(x).unwrap().constraints.is_empty());
}

#[test]
fn discard_is_undoable() {
    let (mut terms, mut store, x, five) = setup();
    let id = store.post(
        &mut terms,
        ConstraintKind::Disunification,
        x,
        five,
        smallvec![(x, 1)],
    );
    store.discard(id);
    store.discard(id);
    assert_eq!(store.discarded_len(), 1);
    assert_eq!(store.active().count(), 0);

    store.restore_discarded(0);
    assert!(!store.get(id).discarded);
    assert_eq!(store.active().count(), 1);
}

#[test]
fn active_is_newest_first() {
    let (mut terms, mut store, x, five) = setup();
    let first = store.post(
        &mut terms,
        ConstraintKind::ArithmeticGreater,
        x,
        five,
        smallvec![(x, 1)],
    );
    store.post(
        &mut terms,
        ConstraintKind::ArithmeticSmaller,
        x,
        five,
        smallvec![(x, 1)],
    );
    let kinds: Vec<_> = store.active().map(|c| c.kind).collect();
    assert_eq!(
        kinds,
        vec![ConstraintKind::ArithmeticSmaller, ConstraintKind::ArithmeticGreater]
    );
    store.discard(first);
    assert_eq!(store.active().count(), 1);
}

#[test]
fn active_constraint_display() {
    let (mut terms, mut store, x, five) = setup();
    let id = store.post(
        &mut terms,
        ConstraintKind::Disunification,
        x,
        five,
        smallvec![(x, 1)],
    );
    let view = ActiveConstraint::reify(&terms, store.get(id));
    assert_eq!(view.left, Value::Variable(x));
    assert_eq!(view.to_string(), format!("_G{} != 5", x.raw()));
}
