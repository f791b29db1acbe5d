use super::*;

fn state() -> SearchState {
    SearchState::new(TermStore::new())
}

// ========== HAPPY PATH: IDENTICAL TERMS ==========

#[test]
fn unify_same_var() {
    let mut s = state();
    let x = s.terms.var();
    let before = s.snapshot();
    assert!(unify(&mut s, x, x));
    assert_eq!(s.snapshot(), before, "same var should bind nothing");
}

#[test]
fn unify_same_complex_term() {
    let mut s = state();
    let x = s.terms.var();
    let nil = s.terms.atom("nil");
    let t = s.terms.compound("cons", [x, nil]);
    let before = s.snapshot();
    assert!(unify(&mut s, t, t));
    assert_eq!(s.snapshot(), before);
}

#[test]
fn unify_structurally_equal_ground_terms() {
    let mut s = state();
    let a1 = s.terms.atom("a");
    let a2 = s.terms.atom("a");
    let one1 = s.terms.integer(1);
    let one2 = s.terms.integer(1);
    let left = s.terms.compound("f", [a1, one1]);
    let right = s.terms.compound("f", [a2, one2]);
    let before = s.snapshot();
    assert!(unify(&mut s, left, right));
    assert_eq!(s.snapshot().assigned(), before.assigned());
}

// ========== BINDING ==========

#[test]
fn younger_variable_binds_to_older() {
    let mut s = state();
    let old = s.terms.var();
    let young = s.terms.var();
    assert!(unify(&mut s, old, young));
    assert!(s.terms.is_unassigned(old));
    assert_eq!(s.terms.deref(young), old);

    let mut s = state();
    let old = s.terms.var();
    let young = s.terms.var();
    assert!(unify(&mut s, young, old));
    assert!(s.terms.is_unassigned(old));
    assert_eq!(s.terms.deref(young), old);
}

#[test]
fn variable_binds_to_compound_from_either_side() {
    let mut s = state();
    let x = s.terms.var();
    let a = s.terms.atom("a");
    assert!(unify(&mut s, a, x));
    assert_eq!(s.terms.deref(x), a);
}

#[test]
fn nested_bindings_left_to_right() {
    let mut s = state();
    let x = s.terms.var();
    let y = s.terms.var();
    let a = s.terms.atom("a");
    let b = s.terms.atom("b");
    let left = s.terms.compound("f", [x, y]);
    let right = s.terms.compound("f", [a, b]);
    assert!(unify(&mut s, left, right));
    assert_eq!(s.assigned_since(0), &[x, y]);
}

#[test]
fn numbers_compare_by_value() {
    let mut s = state();
    let half = s.terms.number(crate::rational::Rational::new(1, 2));
    let two_quarters = s.terms.number(crate::rational::Rational::new(2, 4));
    let one = s.terms.integer(1);
    assert!(unify(&mut s, half, two_quarters));
    assert!(!unify(&mut s, half, one));
}

// ========== FAILURE ==========

#[test]
fn functor_clash_fails() {
    let mut s = state();
    let a = s.terms.atom("a");
    let b = s.terms.atom("b");
    assert!(!unify(&mut s, a, b));
}

#[test]
fn arity_mismatch_fails() {
    let mut s = state();
    let a = s.terms.atom("a");
    let f1 = s.terms.compound("f", [a]);
    let f2 = s.terms.compound("f", [a, a]);
    assert!(!unify(&mut s, f1, f2));
}

#[test]
fn number_against_compound_fails() {
    let mut s = state();
    let one = s.terms.integer(1);
    let a = s.terms.atom("a");
    assert!(!unify(&mut s, one, a));
}

#[test]
fn occurs_check_rejects_cycle() {
    let mut s = state();
    let x = s.terms.var();
    let fx = s.terms.compound("f", [x]);
    assert!(!unify(&mut s, x, fx));
    assert!(s.terms.is_unassigned(x));
}

#[test]
fn failure_rolls_back_partial_bindings() {
    let mut s = state();
    let x = s.terms.var();
    let a = s.terms.atom("a");
    let b = s.terms.atom("b");
    let c = s.terms.atom("c");
    let left = s.terms.compound("f", [x, b]);
    let right = s.terms.compound("f", [a, c]);
    let before = s.snapshot();
    assert!(!unify(&mut s, left, right));
    assert!(s.terms.is_unassigned(x));
    assert_eq!(s.snapshot(), before);
}

#[test]
fn occurs_sees_through_bindings() {
    let mut s = state();
    let x = s.terms.var();
    let y = s.terms.var();
    let gy = s.terms.compound("g", [y]);
    s.bind(y, x);
    assert!(occurs(&s.terms, x, gy));
}
