//! Engine - top-level query driver.
//!
//! The driver runs the resolution machine in passes of increasing depth:
//! 1. Run a full depth-bounded pass, yielding each answer as it is found
//! 2. If any goal was cut off by the bound, widen the bound and run again
//! 3. Suppress answers whose derivation path was already reported
//!
//! Answers surface lazily through the [`Solutions`] iterator.

use crate::constraint::ActiveConstraint;
use crate::metrics::MetricsReport;
use crate::program::Program;
use crate::search::Search;
use crate::term::{TermId, TermStore, Value};
use crate::trail::{Choice, ExecutionState, SearchState};
use hashbrown::HashSet;
use std::iter::FusedIterator;

#[cfg(feature = "tracing")]
use crate::trace::{debug, debug_span, trace};

/// Depth bounds for iterative deepening.
///
/// The depth of a goal is the number of goals on the call stack above it.
/// A pass that cut a goal off at `limit` is rerun with
/// `limit * depth_multiplier`, up to `max_depth`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub initial_depth: usize,
    pub max_depth: usize,
    pub depth_multiplier: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            initial_depth: 50,
            max_depth: 2000,
            depth_multiplier: 2,
        }
    }
}

impl SearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial_depth(mut self, depth: usize) -> Self {
        self.initial_depth = depth;
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_depth_multiplier(mut self, multiplier: usize) -> Self {
        self.depth_multiplier = multiplier;
        self
    }

    /// Bound of the first pass. Never zero unless `max_depth` is.
    pub(crate) fn first_limit(&self) -> usize {
        self.initial_depth.max(1).min(self.max_depth)
    }

    /// Bound of the pass following one run at `limit`. Always grows until
    /// it reaches `max_depth`.
    pub(crate) fn widen(&self, limit: usize) -> usize {
        limit
            .saturating_mul(self.depth_multiplier.max(2))
            .max(limit.saturating_add(1))
            .min(self.max_depth)
    }
}

/// The unresolved assumptions a solution depends on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolutionAssumptions {
    /// Delayed-query variables still unassigned, most recent first.
    pub delayed_queries: Vec<Value>,
    /// Constraints still active, most recent first.
    pub active_constraints: Vec<ActiveConstraint>,
}

impl SolutionAssumptions {
    /// True when the solution holds unconditionally.
    pub fn is_empty(&self) -> bool {
        self.delayed_queries.is_empty() && self.active_constraints.is_empty()
    }
}

/// One answer to a query.
///
/// A solution owns its values and stays valid after the iterator moves on.
/// Variable ids inside it are names only: the search may free and reuse the
/// store slots they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub assumptions: SolutionAssumptions,
    bindings: Vec<(TermId, Value)>,
}

impl Solution {
    /// The value of a query variable in this solution.
    pub fn value(&self, var: TermId) -> Option<&Value> {
        self.bindings
            .iter()
            .find(|(candidate, _)| *candidate == var)
            .map(|(_, value)| value)
    }

    /// Every query variable with its value, in order of first occurrence in
    /// the query.
    pub fn bindings(&self) -> &[(TermId, Value)] {
        &self.bindings
    }
}

/// Runs queries against a program.
///
/// Owns the term store, so program and query terms must be built in
/// [`ExecutionEnvironment::terms_mut`] (or in the store handed to
/// [`ExecutionEnvironment::new`]).
pub struct ExecutionEnvironment {
    program: Program,
    state: SearchState,
    config: SearchConfig,
}

impl ExecutionEnvironment {
    /// Create an environment over `terms`, in which `program` was built.
    pub fn new(terms: TermStore, program: Program) -> Self {
        Self {
            program,
            state: SearchState::new(terms),
            config: SearchConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Replace the program. Its terms must live in this environment's store.
    pub fn set_program(&mut self, program: Program) {
        self.program = program;
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Get reference to the term store.
    pub fn terms(&self) -> &TermStore {
        &self.state.terms
    }

    /// Get mutable reference to the term store.
    pub fn terms_mut(&mut self) -> &mut TermStore {
        &mut self.state.terms
    }

    /// Start enumerating the solutions of `query`.
    ///
    /// Nothing is searched until the iterator is advanced. Dropping the
    /// iterator undoes every binding and allocation the search made.
    pub fn execute_query(&mut self, query: TermId) -> Solutions<'_> {
        self.state.metrics.reset();
        let variables = self.state.terms.variables_of(query);
        let root = self.state.snapshot();
        Solutions {
            program: &self.program,
            state: &mut self.state,
            config: self.config,
            query,
            variables,
            root,
            pass: None,
            depth_limit: self.config.first_limit(),
            seen: HashSet::new(),
            finished: false,
        }
    }

    /// Count the solutions of `query` (consumes them).
    pub fn count_solutions(&mut self, query: TermId) -> usize {
        self.execute_query(query).count()
    }
}

/// Lazy stream of the distinct solutions of one query.
pub struct Solutions<'a> {
    program: &'a Program,
    state: &'a mut SearchState,
    config: SearchConfig,
    query: TermId,
    variables: Vec<TermId>,
    root: ExecutionState,
    pass: Option<Search>,
    depth_limit: usize,
    seen: HashSet<Vec<Choice>>,
    finished: bool,
}

impl Solutions<'_> {
    /// Counters for this query so far.
    pub fn metrics(&self) -> MetricsReport {
        self.state.metrics.report()
    }

    /// Depth bound of the pass currently running.
    pub fn depth_limit(&self) -> usize {
        self.depth_limit
    }

    fn solution(&self) -> Solution {
        let terms = &self.state.terms;
        Solution {
            assumptions: SolutionAssumptions {
                delayed_queries: self
                    .state
                    .pending_delayed_queries()
                    .into_iter()
                    .map(|var| terms.value(var))
                    .collect(),
                active_constraints: self
                    .state
                    .constraints
                    .active()
                    .map(|constraint| ActiveConstraint::reify(terms, constraint))
                    .collect(),
            },
            bindings: self
                .variables
                .iter()
                .map(|&var| (var, terms.value(var)))
                .collect(),
        }
    }
}

impl Iterator for Solutions<'_> {
    type Item = Solution;

    fn next(&mut self) -> Option<Solution> {
        if self.finished {
            return None;
        }

        loop {
            #[cfg(feature = "tracing")]
            let _pass = debug_span!("pass", depth_limit = self.depth_limit).entered();

            if self.pass.is_none() {
                #[cfg(feature = "tracing")]
                debug!(depth_limit = self.depth_limit, "pass_start");
                self.state.metrics.record_pass();
            }
            let (query, depth_limit) = (self.query, self.depth_limit);
            let search = self
                .pass
                .get_or_insert_with(|| Search::new(query, depth_limit));

            if search.next_solution(self.program, self.state) {
                if self.seen.insert(self.state.path().to_vec()) {
                    #[cfg(feature = "tracing")]
                    trace!(path_len = self.state.path().len(), "solution_yielded");
                    self.state.metrics.record_solution();
                    return Some(self.solution());
                }
                #[cfg(feature = "tracing")]
                trace!(path_len = self.state.path().len(), "solution_suppressed");
                self.state.metrics.record_duplicate();
                continue;
            }

            let truncated = search.truncated();
            self.pass = None;
            self.state.restore(self.root);

            if !truncated || self.depth_limit >= self.config.max_depth {
                self.finished = true;
                return None;
            }
            self.depth_limit = self.config.widen(self.depth_limit);
        }
    }
}

impl FusedIterator for Solutions<'_> {}

impl Drop for Solutions<'_> {
    fn drop(&mut self) {
        self.pass = None;
        self.state.restore(self.root);
    }
}

#[cfg(test)]
#[path = "tests/engine.rs"]
mod tests;
