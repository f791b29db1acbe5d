//! The execution trail.
//!
//! All mutable search state lives in [`SearchState`]. Every mutation is
//! pushed onto one of seven stacks, and an [`ExecutionState`] snapshot of
//! their lengths is enough to undo everything done after it. Restoring is
//! the only way the engine ever backtracks.

use crate::constraint::{ConstraintId, ConstraintStore};
use crate::metrics::SearchMetrics;
use crate::term::{Node, TermId, TermStore};
use rustc_hash::FxHashSet;

/// Lengths of the trail stacks at one point in the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ExecutionState {
    assigned: usize,
    delayed_queries: usize,
    call_stack: usize,
    constraints: usize,
    discarded: usize,
    terms: usize,
    path: usize,
}

impl ExecutionState {
    pub(crate) fn assigned(&self) -> usize {
        self.assigned
    }
}

/// One choice taken on the way to a solution.
///
/// The full sequence of choices identifies a derivation; two solutions with
/// the same sequence are the same solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Choice {
    DisjunctionLeft,
    DisjunctionRight,
    /// Index of the program clause used to expand a goal.
    Clause(usize),
}

/// Mutable state shared by every frame of a search.
pub(crate) struct SearchState {
    pub(crate) terms: TermStore,
    pub(crate) constraints: ConstraintStore,
    assigned: Vec<TermId>,
    delayed_queries: Vec<TermId>,
    call_stack: Vec<TermId>,
    path: Vec<Choice>,
    pub(crate) metrics: SearchMetrics,
}

impl SearchState {
    pub(crate) fn new(terms: TermStore) -> Self {
        Self {
            terms,
            constraints: ConstraintStore::new(),
            assigned: Vec::new(),
            delayed_queries: Vec::new(),
            call_stack: Vec::new(),
            path: Vec::new(),
            metrics: SearchMetrics::new(),
        }
    }

    pub(crate) fn snapshot(&self) -> ExecutionState {
        ExecutionState {
            assigned: self.assigned.len(),
            delayed_queries: self.delayed_queries.len(),
            call_stack: self.call_stack.len(),
            constraints: self.constraints.len(),
            discarded: self.constraints.discarded_len(),
            terms: self.terms.len(),
            path: self.path.len(),
        }
    }

    /// Undo every mutation made since `state` was taken, newest first.
    pub(crate) fn restore(&mut self, state: ExecutionState) {
        self.metrics.record_restore();

        while self.assigned.len() > state.assigned {
            if let Some(var) = self.assigned.pop() {
                self.terms.unbind(var);
            }
        }

        while self.delayed_queries.len() > state.delayed_queries {
            if let Some(var) = self.delayed_queries.pop() {
                if let Some(cell) = self.terms.variable_mut(var) {
                    cell.delayed_query = false;
                }
            }
        }

        while self.call_stack.len() > state.call_stack {
            if let Some(goal) = self.call_stack.pop() {
                self.terms.set_in_call_stack(goal, false);
            }
        }

        self.constraints.restore_discarded(state.discarded);
        self.constraints.truncate(&mut self.terms, state.constraints);
        self.terms.truncate(state.terms);
        self.path.truncate(state.path);
    }

    /// Bind `var` to `target` and record it on the trail.
    pub(crate) fn bind(&mut self, var: TermId, target: TermId) {
        self.terms.bind(var, target);
        self.assigned.push(var);
    }

    /// Variables bound since the trail held `from` assignments, oldest first.
    pub(crate) fn assigned_since(&self, from: usize) -> &[TermId] {
        &self.assigned[from..]
    }

    /// Push `goal` onto the call stack, recording `choice` on the path.
    ///
    /// Returns the state to restore to undo the registration.
    pub(crate) fn register_query(&mut self, goal: TermId, choice: Option<Choice>) -> ExecutionState {
        let before = self.snapshot();
        self.terms.set_in_call_stack(goal, true);
        self.call_stack.push(goal);
        if let Some(choice) = choice {
            self.path.push(choice);
        }
        before
    }

    /// Flag an unassigned variable as a delayed query.
    pub(crate) fn register_delayed_query(&mut self, var: TermId) -> ExecutionState {
        let before = self.snapshot();
        if let Some(cell) = self.terms.variable_mut(var) {
            cell.delayed_query = true;
        }
        self.delayed_queries.push(var);
        before
    }

    pub(crate) fn call_depth(&self) -> usize {
        self.call_stack.len()
    }

    pub(crate) fn path(&self) -> &[Choice] {
        &self.path
    }

    /// Whether `var`, or any variable bound onto it, is a delayed query.
    pub(crate) fn is_delayed_query(&self, var: TermId) -> bool {
        let mut stack = vec![var];
        while let Some(current) = stack.pop() {
            if self
                .terms
                .variable_node(current)
                .is_some_and(|cell| cell.delayed_query)
            {
                return true;
            }
            stack.extend(self.terms.previous(current).iter().copied());
        }
        false
    }

    /// Delayed-query variables still unassigned, dereferenced, newest first.
    pub(crate) fn pending_delayed_queries(&self) -> Vec<TermId> {
        self.delayed_queries
            .iter()
            .rev()
            .map(|&var| self.terms.deref(var))
            .filter(|&var| self.terms.is_unassigned(var))
            .collect()
    }

    /// Gather the non-discarded constraints that can observe a change to
    /// `term`: its own, and those of every variable bound onto it or onto a
    /// compound containing it.
    pub(crate) fn collect_constraints(
        &self,
        term: TermId,
        visited: &mut FxHashSet<TermId>,
        out: &mut Vec<ConstraintId>,
    ) {
        let mut stack = vec![term];
        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            stack.extend(self.terms.previous(current).iter().copied());
            stack.extend(self.terms.parents(current).iter().copied());
            if let Node::Variable(cell) = self.terms.node(current) {
                for &id in cell.constraints.iter() {
                    if !self.constraints.get(id).discarded && !out.contains(&id) {
                        out.push(id);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/trail.rs"]
mod tests;
