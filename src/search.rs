//! The resolution machine.
//!
//! A search is a stack of frames, one per goal that is still able to produce
//! answers. Each frame knows its parent, and frames above it belong to its
//! descendants: a conjunction keeps its left conjunct's frames suspended
//! below those of the right conjunct it is currently running.
//!
//! The machine is driven by three kinds of step:
//! - `Call` dispatches a goal and pushes whatever frame it needs;
//! - `Notify` reports a child's answer (`Yielded`) or its end (`Exhausted`)
//!   to the parent frame;
//! - `Redo` asks for the next answer. Only a frame with no live children can
//!   be asked directly, and that is always the frame on top of the stack.
//!
//! Every frame undoes its own trail mutations before reporting `Exhausted`.

use crate::arith::{self, Evaluation};
use crate::constraint::{ConstraintId, ConstraintKind, VariableCounts};
use crate::program::{instantiate, Program};
use crate::rational::Rational;
use crate::symbol::Operator;
use crate::term::{Node, TermId};
use crate::trail::{Choice, ExecutionState, SearchState};
use crate::unify::unify;
use hashbrown::HashMap;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

#[cfg(feature = "tracing")]
use crate::trace::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Branch {
    Left,
    Right,
}

/// State of one clause being tried by a [`Frame::Deduction`].
#[derive(Debug)]
struct Expansion {
    undo: ExecutionState,
    clause: usize,
    /// Fresh names given to the clause variables seen in the head. The body
    /// is renamed with the same map once the head has unified.
    renaming: HashMap<TermId, TermId>,
    in_body: bool,
}

#[derive(Debug)]
enum Frame {
    /// Answered once. The next redo undoes `undo` and ends it.
    Once { undo: Option<ExecutionState> },
    /// Forwards the answers of a single rewritten goal.
    Delegate { undo: ExecutionState },
    Conjunction {
        undo: ExecutionState,
        right: TermId,
        branch: Branch,
    },
    Disjunction {
        undo: ExecutionState,
        goal: TermId,
        right: TermId,
        branch: Branch,
    },
    /// A user predicate resolved against the program, clause by clause.
    Deduction {
        goal: TermId,
        next_clause: usize,
        current: Option<Expansion>,
    },
}

#[derive(Debug)]
struct Entry {
    frame: Frame,
    parent: Option<usize>,
}

#[derive(Debug, Clone, Copy)]
enum Signal {
    Yielded,
    Exhausted,
}

#[derive(Debug, Clone, Copy)]
enum Step {
    Call { goal: TermId, parent: Option<usize> },
    Redo,
    Notify { target: Option<usize>, signal: Signal },
}

fn fail(parent: Option<usize>) -> Step {
    Step::Notify {
        target: parent,
        signal: Signal::Exhausted,
    }
}

fn holds(kind: ConstraintKind, left: &Rational, right: &Rational) -> bool {
    match kind {
        ConstraintKind::ArithmeticInequality => left != right,
        ConstraintKind::ArithmeticGreater => left > right,
        ConstraintKind::ArithmeticSmaller => left < right,
        ConstraintKind::ArithmeticEquality => left == right,
        ConstraintKind::Disunification => unreachable!("disunification is not a comparison"),
    }
}

/// One depth-bounded pass over a goal.
#[derive(Debug)]
pub(crate) struct Search {
    frames: Vec<Entry>,
    root: Option<TermId>,
    depth_limit: usize,
    truncated: bool,
    finished: bool,
}

impl Search {
    pub(crate) fn new(goal: TermId, depth_limit: usize) -> Self {
        Self {
            frames: Vec::new(),
            root: Some(goal),
            depth_limit,
            truncated: false,
            finished: false,
        }
    }

    /// Whether any goal was cut off by the depth bound so far.
    pub(crate) fn truncated(&self) -> bool {
        self.truncated
    }

    /// Advance to the next answer.
    ///
    /// On `true` the state holds the bindings, constraints and path of the
    /// answer. On `false` the pass is over and every frame has restored the
    /// state it mutated.
    pub(crate) fn next_solution(&mut self, program: &Program, state: &mut SearchState) -> bool {
        if self.finished {
            return false;
        }

        let mut step = match self.root.take() {
            Some(goal) => Step::Call { goal, parent: None },
            None => Step::Redo,
        };

        loop {
            step = match step {
                Step::Call { goal, parent } => self.call(program, state, goal, parent),
                Step::Redo => self.redo(state),
                Step::Notify {
                    target: None,
                    signal: Signal::Yielded,
                } => return true,
                Step::Notify {
                    target: None,
                    signal: Signal::Exhausted,
                } => {
                    self.finished = true;
                    return false;
                }
                Step::Notify {
                    target: Some(index),
                    signal,
                } => self.resume(program, state, index, signal),
            };
        }
    }

    fn push(&mut self, frame: Frame, parent: Option<usize>) -> usize {
        self.frames.push(Entry { frame, parent });
        self.frames.len() - 1
    }

    fn pop(&mut self, index: usize) {
        debug_assert_eq!(index + 1, self.frames.len(), "popping a frame with live children");
        self.frames.truncate(index);
    }

    fn yield_once(&mut self, undo: Option<ExecutionState>, parent: Option<usize>) -> Step {
        self.push(Frame::Once { undo }, parent);
        Step::Notify {
            target: parent,
            signal: Signal::Yielded,
        }
    }

    fn redo(&mut self, state: &mut SearchState) -> Step {
        let Some(entry) = self.frames.pop() else {
            return fail(None);
        };
        match entry.frame {
            Frame::Once { undo } => {
                if let Some(undo) = undo {
                    state.restore(undo);
                }
                fail(entry.parent)
            }
            other => unreachable!("redo reached a frame with live children: {:?}", other),
        }
    }

    // ========== DISPATCH ==========

    fn call(
        &mut self,
        program: &Program,
        state: &mut SearchState,
        goal: TermId,
        parent: Option<usize>,
    ) -> Step {
        state.metrics.record_goal();
        let goal = state.terms.deref(goal);

        let (is_variable, in_call_stack) = match state.terms.node(goal) {
            Node::Number(_) => return self.yield_once(None, parent),
            Node::Variable(_) => (true, false),
            Node::Compound(compound) => (false, compound.in_call_stack),
        };

        if is_variable {
            if state.is_delayed_query(goal) {
                return self.yield_once(None, parent);
            }
            let undo = state.register_delayed_query(goal);
            return self.yield_once(Some(undo), parent);
        }

        // A goal already being proven counts as proven.
        if in_call_stack {
            return self.yield_once(None, parent);
        }

        if state.call_depth() >= self.depth_limit {
            #[cfg(feature = "tracing")]
            debug!(depth = state.call_depth(), goal = goal.raw(), "depth_limit_hit");
            state.metrics.record_depth_limit_hit();
            self.truncated = true;
            return fail(parent);
        }

        let args: SmallVec<[TermId; 4]> = state
            .terms
            .compound_node(goal)
            .map(|compound| compound.args.clone())
            .unwrap_or_default();

        match state.terms.operator_of(goal) {
            Some((Operator::Not, 1)) => self.negation(program, state, goal, args[0], parent),
            Some((Operator::Conjunction, 2)) => {
                let undo = state.register_query(goal, None);
                let index = self.push(
                    Frame::Conjunction {
                        undo,
                        right: args[1],
                        branch: Branch::Left,
                    },
                    parent,
                );
                Step::Call {
                    goal: args[0],
                    parent: Some(index),
                }
            }
            Some((Operator::Disjunction, 2)) => {
                let undo = state.register_query(goal, Some(Choice::DisjunctionLeft));
                let index = self.push(
                    Frame::Disjunction {
                        undo,
                        goal,
                        right: args[1],
                        branch: Branch::Left,
                    },
                    parent,
                );
                Step::Call {
                    goal: args[0],
                    parent: Some(index),
                }
            }
            Some((Operator::GreaterEqual, 2)) => {
                self.relax_comparison(state, goal, args[0], args[1], Operator::Greater, parent)
            }
            Some((Operator::SmallerEqual, 2)) => {
                self.relax_comparison(state, goal, args[0], args[1], Operator::Smaller, parent)
            }
            Some((Operator::Equal, 2)) => {
                let (left, right) = (args[0], args[1]);
                match (
                    arith::evaluate(&state.terms, left),
                    arith::evaluate(&state.terms, right),
                ) {
                    (Some(l), Some(r)) if l.operations > 0 || r.operations > 0 => {
                        self.arithmetic_equality(state, goal, (left, l), (right, r), parent)
                    }
                    _ => self.unification(state, goal, left, right, parent),
                }
            }
            Some((op @ (Operator::Unequal | Operator::Greater | Operator::Smaller), 2)) => {
                let (left, right) = (args[0], args[1]);
                match (
                    arith::evaluate(&state.terms, left),
                    arith::evaluate(&state.terms, right),
                ) {
                    (Some(l), Some(r))
                        if op != Operator::Unequal || l.operations + r.operations > 0 =>
                    {
                        let kind = match op {
                            Operator::Greater => ConstraintKind::ArithmeticGreater,
                            Operator::Smaller => ConstraintKind::ArithmeticSmaller,
                            _ => ConstraintKind::ArithmeticInequality,
                        };
                        self.arithmetic_comparison(state, goal, (left, l), (right, r), kind, parent)
                    }
                    _ => self.disunification(state, goal, left, right, parent),
                }
            }
            _ => {
                let index = self.push(
                    Frame::Deduction {
                        goal,
                        next_clause: 0,
                        current: None,
                    },
                    parent,
                );
                self.next_clause(program, state, index)
            }
        }
    }

    // ========== CHILD EVENTS ==========

    fn resume(
        &mut self,
        program: &Program,
        state: &mut SearchState,
        index: usize,
        signal: Signal,
    ) -> Step {
        let parent = self.frames[index].parent;
        let forward = Step::Notify {
            target: parent,
            signal: Signal::Yielded,
        };

        match (&mut self.frames[index].frame, signal) {
            (Frame::Delegate { .. }, Signal::Yielded) => forward,
            (Frame::Delegate { undo }, Signal::Exhausted) => {
                let undo = *undo;
                self.pop(index);
                state.restore(undo);
                fail(parent)
            }

            (Frame::Conjunction { right, branch, .. }, Signal::Yielded) => match *branch {
                Branch::Left => {
                    *branch = Branch::Right;
                    Step::Call {
                        goal: *right,
                        parent: Some(index),
                    }
                }
                Branch::Right => forward,
            },
            (Frame::Conjunction { undo, branch, .. }, Signal::Exhausted) => match *branch {
                Branch::Right => {
                    *branch = Branch::Left;
                    Step::Redo
                }
                Branch::Left => {
                    let undo = *undo;
                    self.pop(index);
                    state.restore(undo);
                    fail(parent)
                }
            },

            (Frame::Disjunction { .. }, Signal::Yielded) => forward,
            (
                Frame::Disjunction {
                    undo,
                    goal,
                    right,
                    branch,
                },
                Signal::Exhausted,
            ) => match *branch {
                Branch::Left => {
                    state.restore(*undo);
                    *undo = state.register_query(*goal, Some(Choice::DisjunctionRight));
                    *branch = Branch::Right;
                    Step::Call {
                        goal: *right,
                        parent: Some(index),
                    }
                }
                Branch::Right => {
                    let undo = *undo;
                    self.pop(index);
                    state.restore(undo);
                    fail(parent)
                }
            },

            (
                Frame::Deduction {
                    current: Some(expansion),
                    ..
                },
                Signal::Yielded,
            ) => match program.clauses()[expansion.clause].body {
                // The head unification answers at most once.
                Some(body) if !expansion.in_body => {
                    let renaming = &mut expansion.renaming;
                    let body = instantiate(&mut state.terms, body, renaming);
                    expansion.in_body = true;
                    Step::Call {
                        goal: body,
                        parent: Some(index),
                    }
                }
                _ => forward,
            },
            (Frame::Deduction { current, .. }, Signal::Exhausted) => {
                let Some(expansion) = current.as_mut() else {
                    unreachable!("deduction notified before trying a clause")
                };
                if expansion.in_body {
                    expansion.in_body = false;
                    Step::Redo
                } else {
                    let undo = expansion.undo;
                    *current = None;
                    state.restore(undo);
                    self.next_clause(program, state, index)
                }
            }

            (frame, _) => unreachable!("frame cannot receive child events: {:?}", frame),
        }
    }

    // ========== BUILTINS ==========

    fn negation(
        &mut self,
        program: &Program,
        state: &mut SearchState,
        goal: TermId,
        inner: TermId,
        parent: Option<usize>,
    ) -> Step {
        let undo = state.register_query(goal, None);

        let mut probe = Search::new(inner, self.depth_limit);
        let found = probe.next_solution(program, state);
        let truncated = probe.truncated();
        if truncated {
            self.truncated = true;
        }

        #[cfg(feature = "tracing")]
        trace!(goal = goal.raw(), found, truncated, "negation_probe");

        if !found && !truncated {
            self.yield_once(Some(undo), parent)
        } else {
            state.restore(undo);
            fail(parent)
        }
    }

    /// `a >= b` runs as `a = b ; a > b`, and `<=` likewise.
    fn relax_comparison(
        &mut self,
        state: &mut SearchState,
        goal: TermId,
        left: TermId,
        right: TermId,
        strict: Operator,
        parent: Option<usize>,
    ) -> Step {
        let undo = state.register_query(goal, None);
        let equal = state.terms.eq(left, right);
        let strictly = state.terms.operator(strict, [left, right]);
        let either = state.terms.or(equal, strictly);
        let index = self.push(Frame::Delegate { undo }, parent);
        Step::Call {
            goal: either,
            parent: Some(index),
        }
    }

    fn unification(
        &mut self,
        state: &mut SearchState,
        goal: TermId,
        left: TermId,
        right: TermId,
        parent: Option<usize>,
    ) -> Step {
        let undo = state.register_query(goal, None);
        if !unify(state, left, right) {
            state.restore(undo);
            return fail(parent);
        }

        let mut visited = FxHashSet::default();
        let mut pending: Vec<ConstraintId> = Vec::new();
        let mut new_queries: SmallVec<[TermId; 4]> = SmallVec::new();

        let assigned: SmallVec<[TermId; 8]> =
            state.assigned_since(undo.assigned()).iter().copied().collect();
        for var in assigned {
            state.collect_constraints(var, &mut visited, &mut pending);

            if state.is_delayed_query(var) {
                let next = state.terms.variable_node(var).and_then(|cell| cell.next);
                if let Some(query) = next {
                    let surfaced = state
                        .terms
                        .compound_node(query)
                        .is_some_and(|compound| !compound.in_call_stack);
                    if surfaced && !new_queries.contains(&query) {
                        new_queries.push(query);
                    }
                }
            }
        }

        let mut discards: SmallVec<[ConstraintId; 4]> = SmallVec::new();
        if !recheck(state, &pending, &mut discards, &mut new_queries) {
            state.restore(undo);
            return fail(parent);
        }

        for id in discards {
            #[cfg(feature = "tracing")]
            trace!(?id, "constraint_discarded");
            state.constraints.discard(id);
            state.metrics.record_constraint_discarded();
        }

        match state.terms.conjunction(&new_queries) {
            None => self.yield_once(Some(undo), parent),
            Some(follow_up) => {
                let index = self.push(Frame::Delegate { undo }, parent);
                Step::Call {
                    goal: follow_up,
                    parent: Some(index),
                }
            }
        }
    }

    fn disunification(
        &mut self,
        state: &mut SearchState,
        goal: TermId,
        left: TermId,
        right: TermId,
        parent: Option<usize>,
    ) -> Step {
        let undo = state.register_query(goal, None);
        let left = state.terms.deref(left);
        let right = state.terms.deref(right);

        let trial = state.snapshot();
        let unified = unify(state, left, right);
        let bound_any = state.snapshot().assigned() != trial.assigned();
        state.restore(trial);

        match (unified, bound_any) {
            // Already identical: can never become different.
            (true, false) => {
                state.restore(undo);
                fail(parent)
            }
            (true, true) => {
                let (left, right) = strip_common(state, left, right).unwrap_or((left, right));
                let mut vars = VariableCounts::new();
                arith::unassigned_variables(&state.terms, left, &mut vars);
                arith::unassigned_variables(&state.terms, right, &mut vars);
                self.post(state, ConstraintKind::Disunification, left, right, vars, undo, parent)
            }
            (false, _) => self.yield_once(Some(undo), parent),
        }
    }

    fn arithmetic_equality(
        &mut self,
        state: &mut SearchState,
        goal: TermId,
        (left, left_eval): (TermId, Evaluation),
        (right, right_eval): (TermId, Evaluation),
        parent: Option<usize>,
    ) -> Step {
        let undo = state.register_query(goal, None);
        if left_eval.is_invalid() || right_eval.is_invalid() {
            state.restore(undo);
            return fail(parent);
        }

        let left = arith::simplify(&mut state.terms, left);
        let right = arith::simplify(&mut state.terms, right);
        let mut vars = VariableCounts::new();
        arith::unassigned_variables(&state.terms, left, &mut vars);
        arith::unassigned_variables(&state.terms, right, &mut vars);

        let (side, target) = match (left_eval.value, right_eval.value) {
            (Some(l), Some(r)) => {
                return if l == r {
                    self.yield_once(Some(undo), parent)
                } else {
                    state.restore(undo);
                    fail(parent)
                };
            }
            (None, Some(r)) => (left, r),
            (Some(l), None) => (right, l),
            (None, None) => {
                return self.post(
                    state,
                    ConstraintKind::ArithmeticEquality,
                    left,
                    right,
                    vars,
                    undo,
                    parent,
                )
            }
        };

        match solve_single(state, side, target) {
            Solved::Assignment(assignment) => {
                let index = self.push(Frame::Delegate { undo }, parent);
                Step::Call {
                    goal: assignment,
                    parent: Some(index),
                }
            }
            Solved::Invalid => {
                state.restore(undo);
                fail(parent)
            }
            Solved::Undetermined => self.post(
                state,
                ConstraintKind::ArithmeticEquality,
                left,
                right,
                vars,
                undo,
                parent,
            ),
        }
    }

    /// `!=`, `>` and `<` between arithmetic expressions.
    fn arithmetic_comparison(
        &mut self,
        state: &mut SearchState,
        goal: TermId,
        (left, left_eval): (TermId, Evaluation),
        (right, right_eval): (TermId, Evaluation),
        kind: ConstraintKind,
        parent: Option<usize>,
    ) -> Step {
        let undo = state.register_query(goal, None);
        if left_eval.is_invalid() || right_eval.is_invalid() {
            state.restore(undo);
            return fail(parent);
        }

        if let (Some(l), Some(r)) = (&left_eval.value, &right_eval.value) {
            return if holds(kind, l, r) {
                self.yield_once(Some(undo), parent)
            } else {
                state.restore(undo);
                fail(parent)
            };
        }

        let left = arith::simplify(&mut state.terms, left);
        let right = arith::simplify(&mut state.terms, right);
        let mut vars = VariableCounts::new();
        arith::unassigned_variables(&state.terms, left, &mut vars);
        arith::unassigned_variables(&state.terms, right, &mut vars);
        self.post(state, kind, left, right, vars, undo, parent)
    }

    #[allow(clippy::too_many_arguments)]
    fn post(
        &mut self,
        state: &mut SearchState,
        kind: ConstraintKind,
        left: TermId,
        right: TermId,
        vars: VariableCounts,
        undo: ExecutionState,
        parent: Option<usize>,
    ) -> Step {
        let _id = state
            .constraints
            .post(&mut state.terms, kind, left, right, vars);
        #[cfg(feature = "tracing")]
        trace!(id = ?_id, ?kind, "constraint_posted");
        state.metrics.record_constraint_posted();
        self.yield_once(Some(undo), parent)
    }

    // ========== INVERSE DEDUCTION ==========

    /// Try the next program clause whose head matches the goal of the
    /// deduction frame at `index`, or end the frame if none is left.
    fn next_clause(&mut self, program: &Program, state: &mut SearchState, index: usize) -> Step {
        let Frame::Deduction {
            goal, next_clause, ..
        } = self.frames[index].frame
        else {
            unreachable!("next_clause on a frame that is not a deduction")
        };

        let (name, arity) = match state.terms.compound_node(goal) {
            Some(compound) => (compound.name, compound.args.len()),
            None => unreachable!("deduction on a term that is not a compound"),
        };

        let found = program.clauses()[next_clause..]
            .iter()
            .position(|clause| clause.name == name && clause.arity == arity)
            .map(|offset| next_clause + offset);

        let Some(clause_index) = found else {
            let parent = self.frames[index].parent;
            self.pop(index);
            return fail(parent);
        };

        let clause = &program.clauses()[clause_index];
        #[cfg(feature = "tracing")]
        trace!(goal = goal.raw(), clause = clause_index, "clause_expansion");
        state.metrics.record_clause_expansion();

        let undo = state.register_query(goal, Some(Choice::Clause(clause_index)));
        let mut renaming = HashMap::new();
        let head = instantiate(&mut state.terms, clause.head, &mut renaming);
        let unification = state.terms.eq(goal, head);

        self.frames[index].frame = Frame::Deduction {
            goal,
            next_clause: clause_index + 1,
            current: Some(Expansion {
                undo,
                clause: clause_index,
                renaming,
                in_body: false,
            }),
        };

        Step::Call {
            goal: unification,
            parent: Some(index),
        }
    }
}

/// Decide again every constraint that a unification may have affected.
///
/// Returns `false` if one of them now fails. Constraints proven to hold
/// forever are collected in `discards`; solved arithmetic equalities add an
/// assignment goal to `new_queries`.
fn recheck(
    state: &mut SearchState,
    pending: &[ConstraintId],
    discards: &mut SmallVec<[ConstraintId; 4]>,
    new_queries: &mut SmallVec<[TermId; 4]>,
) -> bool {
    for &id in pending {
        let constraint = state.constraints.get(id);
        let kind = constraint.kind;
        let left = state.terms.deref(constraint.left);
        let right = state.terms.deref(constraint.right);

        if kind == ConstraintKind::Disunification {
            let trial = state.snapshot();
            if unify(state, left, right) {
                if state.snapshot().assigned() == trial.assigned() {
                    return false;
                }
                state.restore(trial);
            } else {
                discards.push(id);
            }
            continue;
        }

        let (Some(left_eval), Some(right_eval)) = (
            arith::evaluate(&state.terms, left),
            arith::evaluate(&state.terms, right),
        ) else {
            return false;
        };
        if left_eval.is_invalid() || right_eval.is_invalid() {
            return false;
        }

        let solvable = kind == ConstraintKind::ArithmeticEquality;
        let solved = match (left_eval.value, right_eval.value) {
            (Some(l), Some(r)) => {
                if !holds(kind, &l, &r) {
                    return false;
                }
                discards.push(id);
                continue;
            }
            (None, Some(target)) if solvable => solve_single(state, left, target),
            (Some(target), None) if solvable => solve_single(state, right, target),
            _ => continue,
        };

        match solved {
            Solved::Assignment(assignment) => {
                new_queries.push(assignment);
                discards.push(id);
            }
            Solved::Invalid => return false,
            Solved::Undetermined => {}
        }
    }
    true
}

enum Solved {
    Assignment(TermId),
    Invalid,
    Undetermined,
}

/// Turn `side = target` into an assignment goal when `side` holds a single
/// occurrence of a single unassigned variable.
fn solve_single(state: &mut SearchState, side: TermId, target: Rational) -> Solved {
    let mut vars = VariableCounts::new();
    arith::unassigned_variables(&state.terms, side, &mut vars);
    let &[(var, 1)] = vars.as_slice() else {
        return Solved::Undetermined;
    };
    let value = arith::extract_variable_value(&state.terms, var, side, target);
    if !value.is_valid() {
        return Solved::Invalid;
    }
    let number = state.terms.number(value);
    Solved::Assignment(state.terms.eq(var, number))
}

/// Remove the identical parts of two terms known to unify.
///
/// Returns `None` when nothing differs.
fn strip_common(state: &mut SearchState, left: TermId, right: TermId) -> Option<(TermId, TermId)> {
    if left == right {
        return None;
    }
    if let (Some(l), Some(r)) = (
        state.terms.number_value(left),
        state.terms.number_value(right),
    ) {
        return if l == r { None } else { Some((left, right)) };
    }

    let (Some(lc), Some(rc)) = (
        state.terms.compound_node(left),
        state.terms.compound_node(right),
    ) else {
        return Some((left, right));
    };
    let (left_name, right_name) = (lc.name, rc.name);
    let pairs: SmallVec<[(TermId, TermId); 4]> =
        lc.args.iter().copied().zip(rc.args.iter().copied()).collect();

    let mut left_args: SmallVec<[TermId; 4]> = SmallVec::new();
    let mut right_args: SmallVec<[TermId; 4]> = SmallVec::new();
    for (l, r) in pairs {
        let l = state.terms.deref(l);
        let r = state.terms.deref(r);
        if let Some((l, r)) = strip_common(state, l, r) {
            left_args.push(l);
            right_args.push(r);
        }
    }

    if left_args.is_empty() {
        None
    } else {
        Some((
            state.terms.compound_with(left_name, left_args),
            state.terms.compound_with(right_name, right_args),
        ))
    }
}

#[cfg(test)]
#[path = "tests/search.rs"]
mod tests;
