use crate::term::{Node, TermId, TermStore};
use crate::trail::SearchState;
use smallvec::SmallVec;

#[cfg(feature = "tracing")]
use crate::trace::trace;

#[derive(Clone, Copy)]
enum Shape {
    Number,
    Variable,
    Compound,
}

fn shape(terms: &TermStore, id: TermId) -> Shape {
    match terms.node(id) {
        Node::Number(_) => Shape::Number,
        Node::Variable(_) => Shape::Variable,
        Node::Compound(_) => Shape::Compound,
    }
}

/// Unify two terms in place, recording every binding on the trail.
///
/// Children are unified left to right. On failure every binding made by
/// this call is undone, so the trail is exactly as it was on entry.
///
/// Uses an explicit worklist to avoid recursion.
/// Implements occurs-check to prevent infinite terms.
pub(crate) fn unify(state: &mut SearchState, left: TermId, right: TermId) -> bool {
    let before = state.snapshot();
    let mut worklist: SmallVec<[(TermId, TermId); 32]> = SmallVec::new();
    worklist.push((left, right));

    while let Some((a, b)) = worklist.pop() {
        let a = state.terms.deref(a);
        let b = state.terms.deref(b);
        if a == b {
            continue;
        }

        let ok = match (shape(&state.terms, a), shape(&state.terms, b)) {
            (Shape::Compound, Shape::Compound) => {
                match (state.terms.compound_node(a), state.terms.compound_node(b)) {
                    (Some(ca), Some(cb))
                        if ca.name == cb.name && ca.args.len() == cb.args.len() =>
                    {
                        // Reverse so the leftmost pair is popped first.
                        for (&x, &y) in ca.args.iter().zip(cb.args.iter()).rev() {
                            worklist.push((x, y));
                        }
                        true
                    }
                    _ => false,
                }
            }
            (Shape::Variable, _) => unify_variable(state, a, b),
            (_, Shape::Variable) => unify_variable(state, b, a),
            (Shape::Number, Shape::Number) => {
                state.terms.number_value(a) == state.terms.number_value(b)
            }
            _ => false,
        };

        if !ok {
            #[cfg(feature = "tracing")]
            trace!(left = a.raw(), right = b.raw(), "unify_clash");
            state.restore(before);
            state.metrics.record_unification_failure();
            return false;
        }
    }

    state.metrics.record_unification();
    true
}

/// Bind an unassigned variable to a dereferenced term.
///
/// Between two variables the younger one is bound to the older one.
fn unify_variable(state: &mut SearchState, var: TermId, term: TermId) -> bool {
    match shape(&state.terms, term) {
        Shape::Compound if occurs(&state.terms, var, term) => {
            #[cfg(feature = "tracing")]
            trace!(var = var.raw(), "unify_occurs_check_failed");
            false
        }
        _ if term == var => true,
        Shape::Variable if var < term => {
            state.bind(term, var);
            true
        }
        _ => {
            state.bind(var, term);
            true
        }
    }
}

/// Check whether `var` occurs in the dereferenced children of `term`.
pub(crate) fn occurs(terms: &TermStore, var: TermId, term: TermId) -> bool {
    let mut stack: SmallVec<[TermId; 16]> = SmallVec::new();
    if let Some(compound) = terms.compound_node(term) {
        stack.extend(compound.args.iter().copied());
    }
    while let Some(current) = stack.pop() {
        let current = terms.deref(current);
        if current == var {
            return true;
        }
        if let Some(compound) = terms.compound_node(current) {
            stack.extend(compound.args.iter().copied());
        }
    }
    false
}

#[cfg(test)]
mod tests;
