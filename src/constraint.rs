//! The constraint store.
//!
//! Constraints are posted when a disequality or arithmetic comparison cannot
//! be decided yet. Each one is attached to the variables that were unassigned
//! when it was posted, so that binding any of them triggers re-evaluation.
//! Removal and the discarded flag are both trail-undoable: constraints are
//! popped in stack order and discards are recorded on their own stack.

use crate::term::{TermId, TermStore, Value};
use smallvec::SmallVec;

/// Index of a constraint in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstraintId(u32);

impl ConstraintId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// What a constraint asserts about its two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    /// The two sides must never unify.
    Disunification,
    /// `left = right` as arithmetic.
    ArithmeticEquality,
    /// `left != right` as arithmetic.
    ArithmeticInequality,
    /// `left > right`.
    ArithmeticGreater,
    /// `left < right`.
    ArithmeticSmaller,
}

impl ConstraintKind {
    /// The operator symbol the constraint is written with.
    pub fn symbol(self) -> &'static str {
        match self {
            ConstraintKind::Disunification | ConstraintKind::ArithmeticInequality => "!=",
            ConstraintKind::ArithmeticEquality => "=",
            ConstraintKind::ArithmeticGreater => ">",
            ConstraintKind::ArithmeticSmaller => "<",
        }
    }
}

/// Unassigned variables of a term pair with their occurrence counts, in
/// first-occurrence order.
pub(crate) type VariableCounts = SmallVec<[(TermId, u32); 4]>;

#[derive(Debug, Clone)]
pub(crate) struct Constraint {
    pub(crate) left: TermId,
    pub(crate) right: TermId,
    pub(crate) kind: ConstraintKind,
    pub(crate) variables: VariableCounts,
    pub(crate) discarded: bool,
}

#[derive(Debug, Default)]
pub(crate) struct ConstraintStore {
    constraints: Vec<Constraint>,
    discarded: Vec<ConstraintId>,
}

impl ConstraintStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn len(&self) -> usize {
        self.constraints.len()
    }

    pub(crate) fn discarded_len(&self) -> usize {
        self.discarded.len()
    }

    pub(crate) fn get(&self, id: ConstraintId) -> &Constraint {
        &self.constraints[id.index()]
    }

    /// Store a constraint and attach it to each of its variables.
    pub(crate) fn post(
        &mut self,
        terms: &mut TermStore,
        kind: ConstraintKind,
        left: TermId,
        right: TermId,
        variables: VariableCounts,
    ) -> ConstraintId {
        let id = ConstraintId(self.constraints.len() as u32);
        for &(var, _) in variables.iter() {
            if let Some(cell) = terms.variable_mut(var) {
                cell.constraints.push(id);
            }
        }
        self.constraints.push(Constraint {
            left,
            right,
            kind,
            variables,
            discarded: false,
        });
        id
    }

    /// Mark a constraint as permanently satisfied.
    pub(crate) fn discard(&mut self, id: ConstraintId) {
        let constraint = &mut self.constraints[id.index()];
        if !constraint.discarded {
            constraint.discarded = true;
            self.discarded.push(id);
        }
    }

    /// Clear discard marks recorded after the store had `len` of them.
    pub(crate) fn restore_discarded(&mut self, len: usize) {
        while self.discarded.len() > len {
            if let Some(id) = self.discarded.pop() {
                self.constraints[id.index()].discarded = false;
            }
        }
    }

    /// Pop constraints posted after the store had `len` of them, detaching
    /// each from its variables.
    pub(crate) fn truncate(&mut self, terms: &mut TermStore, len: usize) {
        while self.constraints.len() > len {
            let Some(constraint) = self.constraints.pop() else { break };
            let id = ConstraintId(self.constraints.len() as u32);
            for (var, _) in constraint.variables {
                if let Some(cell) = terms.variable_mut(var) {
                    if let Some(pos) = cell.constraints.iter().rposition(|&c| c == id) {
                        cell.constraints.remove(pos);
                    }
                }
            }
        }
    }

    /// Active constraints, most recently posted first.
    pub(crate) fn active(&self) -> impl Iterator<Item = &Constraint> {
        self.constraints.iter().rev().filter(|c| !c.discarded)
    }
}

/// A still-active constraint reported with a solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveConstraint {
    pub kind: ConstraintKind,
    pub left: Value,
    pub right: Value,
}

impl ActiveConstraint {
    pub(crate) fn reify(terms: &TermStore, constraint: &Constraint) -> Self {
        Self {
            kind: constraint.kind,
            left: terms.value(constraint.left),
            right: terms.value(constraint.right),
        }
    }
}

impl std::fmt::Display for ActiveConstraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.left, self.kind.symbol(), self.right)
    }
}

#[cfg(test)]
#[path = "tests/constraint.rs"]
mod tests;
