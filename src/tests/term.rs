use super::*;

// ========== CONSTRUCTION ==========

#[test]
fn ids_follow_creation_order() {
    let mut terms = TermStore::new();
    let a = terms.var();
    let b = terms.var();
    assert!(a < b);
    assert_eq!(terms.len(), 2);
}

#[test]
fn compound_view() {
    let mut terms = TermStore::new();
    let a = terms.atom("a");
    let x = terms.var();
    let edge = terms.compound("edge", [a, x]);
    match terms.view(edge) {
        TermView::Compound { name, args } => {
            assert_eq!(name, "edge");
            assert_eq!(args, &[a, x]);
        }
        other => panic!("expected compound, got {:?}", other),
    }
}

#[test]
fn number_view() {
    let mut terms = TermStore::new();
    let n = terms.number(Rational::new(1, 2));
    assert_eq!(terms.view(n), TermView::Number(&Rational::new(1, 2)));
}

#[test]
fn operator_helpers_use_reserved_names() {
    let mut terms = TermStore::new();
    let x = terms.var();
    let one = terms.integer(1);
    let goal = terms.ge(x, one);
    assert_eq!(terms.operator_of(goal), Some((Operator::GreaterEqual, 2)));
    let sum = terms.add(x, one);
    assert_eq!(terms.operator_of(sum), Some((Operator::Add, 2)));
    let user = terms.atom("p");
    assert_eq!(terms.operator_of(user), None);
}

#[test]
fn children_record_parents() {
    let mut terms = TermStore::new();
    let x = terms.var();
    let f = terms.compound("f", [x, x]);
    assert_eq!(terms.parents(x), &[f, f]);
}

#[test]
fn conjunction_nests_right() {
    let mut terms = TermStore::new();
    let a = terms.atom("a");
    let b = terms.atom("b");
    let c = terms.atom("c");
    let conj = terms.conjunction(&[a, b, c]).unwrap();
    assert_eq!(terms.value(conj).to_string(), ",(a, ,(b, c))");
    assert_eq!(terms.conjunction(&[a]), Some(a));
    assert_eq!(terms.conjunction(&[]), None);
}

// ========== BINDING ==========

#[test]
fn deref_follows_chain() {
    let mut terms = TermStore::new();
    let x = terms.var();
    let y = terms.var();
    let five = terms.integer(5);
    terms.bind(y, x);
    terms.bind(x, five);
    assert_eq!(terms.deref(y), five);
    assert_eq!(terms.previous(x), &[y]);
    assert_eq!(terms.previous(five), &[x]);
}

#[test]
fn unbind_restores_unassigned() {
    let mut terms = TermStore::new();
    let x = terms.var();
    let a = terms.atom("a");
    terms.bind(x, a);
    assert!(!terms.is_unassigned(x));
    terms.unbind(x);
    assert!(terms.is_unassigned(x));
    assert!(terms.previous(a).is_empty());
}

#[test]
fn truncate_removes_parent_edges() {
    let mut terms = TermStore::new();
    let x = terms.var();
    let mark = terms.len();
    terms.compound("f", [x]);
    terms.compound("g", [x]);
    assert_eq!(terms.parents(x).len(), 2);
    terms.truncate(mark);
    assert_eq!(terms.len(), mark);
    assert!(terms.parents(x).is_empty());
}

#[test]
fn call_stack_flag_is_per_node() {
    let mut terms = TermStore::new();
    let p1 = terms.atom("p");
    let p2 = terms.atom("p");
    terms.set_in_call_stack(p1, true);
    assert!(terms.compound_node(p1).unwrap().in_call_stack);
    assert!(!terms.compound_node(p2).unwrap().in_call_stack);
}

// ========== VALUES ==========

#[test]
fn value_is_dereferenced() {
    let mut terms = TermStore::new();
    let x = terms.var();
    let three = terms.integer(3);
    let p = terms.compound("p", [x]);
    terms.bind(x, three);
    assert_eq!(terms.value(p).to_string(), "p(3)");
}

#[test]
fn value_display_forms() {
    let mut terms = TermStore::new();
    let x = terms.var();
    let half = terms.number(Rational::new(1, 2));
    let nil = terms.atom("nil");
    let t = terms.compound("t", [x, half, nil]);
    assert_eq!(
        terms.value(t).to_string(),
        format!("t(_G{}, 1/2, nil)", x.raw())
    );
}

#[test]
fn value_groundness() {
    let mut terms = TermStore::new();
    let x = terms.var();
    let a = terms.atom("a");
    let open = terms.compound("f", [a, x]);
    let closed = terms.compound("f", [a, a]);
    assert!(!terms.value(open).is_ground());
    assert!(terms.value(closed).is_ground());
}

#[test]
fn variables_in_first_occurrence_order() {
    let mut terms = TermStore::new();
    let x = terms.var();
    let y = terms.var();
    let inner = terms.compound("g", [y, x]);
    let t = terms.compound("f", [x, inner, y]);
    assert_eq!(terms.variables_of(t), vec![x, y]);
}

#[test]
fn variables_skip_bound() {
    let mut terms = TermStore::new();
    let x = terms.var();
    let y = terms.var();
    let t = terms.compound("f", [x, y]);
    terms.bind(x, y);
    assert_eq!(terms.variables_of(t), vec![y]);
}
