//! Search metrics collection for profiling and analysis.
//!
//! Plain counters bumped by the resolution machine. The engine is
//! single-threaded, so no atomics are needed; a query's counters are reset
//! when it starts and can be read back at any point through
//! [`crate::Solutions::metrics`].
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut solutions = env.execute_query(query);
//! let first = solutions.next();
//! let report = solutions.metrics();
//! println!("Passes: {}, Restores: {}", report.passes, report.restores);
//! ```

/// Aggregate counters collected during a query.
#[derive(Debug, Clone, Default)]
pub struct SearchMetrics {
    passes: u64,
    goals_started: u64,
    unifications: u64,
    unification_failures: u64,
    clause_expansions: u64,
    depth_limit_hits: u64,
    restores: u64,
    constraints_posted: u64,
    constraints_discarded: u64,
    solutions_yielded: u64,
    duplicates_suppressed: u64,
}

impl SearchMetrics {
    /// Create a new metrics collector with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the start of an iterative-deepening pass.
    #[inline]
    pub fn record_pass(&mut self) {
        self.passes += 1;
    }

    /// Record a goal being dispatched.
    #[inline]
    pub fn record_goal(&mut self) {
        self.goals_started += 1;
    }

    /// Record a unification attempt that succeeded.
    #[inline]
    pub fn record_unification(&mut self) {
        self.unifications += 1;
    }

    /// Record a unification attempt that failed.
    #[inline]
    pub fn record_unification_failure(&mut self) {
        self.unification_failures += 1;
    }

    /// Record a program clause being tried against a goal.
    #[inline]
    pub fn record_clause_expansion(&mut self) {
        self.clause_expansions += 1;
    }

    /// Record a goal cut off by the depth bound.
    #[inline]
    pub fn record_depth_limit_hit(&mut self) {
        self.depth_limit_hits += 1;
    }

    /// Record a trail restore.
    #[inline]
    pub fn record_restore(&mut self) {
        self.restores += 1;
    }

    #[inline]
    pub fn record_constraint_posted(&mut self) {
        self.constraints_posted += 1;
    }

    #[inline]
    pub fn record_constraint_discarded(&mut self) {
        self.constraints_discarded += 1;
    }

    #[inline]
    pub fn record_solution(&mut self) {
        self.solutions_yielded += 1;
    }

    /// Record a solution dropped because its path was already reported.
    #[inline]
    pub fn record_duplicate(&mut self) {
        self.duplicates_suppressed += 1;
    }

    /// Generate a snapshot report of all metrics.
    pub fn report(&self) -> MetricsReport {
        MetricsReport {
            passes: self.passes,
            goals_started: self.goals_started,
            unifications: self.unifications,
            unification_failures: self.unification_failures,
            clause_expansions: self.clause_expansions,
            depth_limit_hits: self.depth_limit_hits,
            restores: self.restores,
            constraints_posted: self.constraints_posted,
            constraints_discarded: self.constraints_discarded,
            solutions_yielded: self.solutions_yielded,
            duplicates_suppressed: self.duplicates_suppressed,
        }
    }

    /// Reset all metrics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Snapshot of metrics at a point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricsReport {
    pub passes: u64,
    pub goals_started: u64,
    pub unifications: u64,
    pub unification_failures: u64,
    pub clause_expansions: u64,
    pub depth_limit_hits: u64,
    pub restores: u64,
    pub constraints_posted: u64,
    pub constraints_discarded: u64,
    pub solutions_yielded: u64,
    pub duplicates_suppressed: u64,
}

impl MetricsReport {
    /// Calculate unification success rate.
    pub fn unification_success_rate(&self) -> f64 {
        let total = self.unifications + self.unification_failures;
        if total == 0 {
            1.0
        } else {
            self.unifications as f64 / total as f64
        }
    }
}

impl std::fmt::Display for MetricsReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Search Metrics ===")?;
        writeln!(f, "Passes:             {}", self.passes)?;
        writeln!(f, "Goals started:      {}", self.goals_started)?;
        writeln!(
            f,
            "Unifications:       {} ({} failures, {:.1}% success)",
            self.unifications,
            self.unification_failures,
            self.unification_success_rate() * 100.0
        )?;
        writeln!(f, "Clause expansions:  {}", self.clause_expansions)?;
        writeln!(f, "Depth limit hits:   {}", self.depth_limit_hits)?;
        writeln!(f, "Restores:           {}", self.restores)?;
        writeln!(
            f,
            "Constraints:        {} posted, {} discarded",
            self.constraints_posted, self.constraints_discarded
        )?;
        writeln!(
            f,
            "Solutions:          {} yielded, {} duplicates suppressed",
            self.solutions_yielded, self.duplicates_suppressed
        )?;
        Ok(())
    }
}
