//! Horn-clause resolution over rationals with delayed constraints.
//!
//! Programs and queries are terms built in a [`TermStore`]. An
//! [`ExecutionEnvironment`] runs a query against a [`Program`] by depth-first
//! resolution with iterative deepening and yields each distinct
//! [`Solution`] lazily, together with the constraints and delayed goals it
//! still depends on.
//!
//! ```rust
//! use hornq::{ExecutionEnvironment, Program, TermStore};
//!
//! let mut terms = TermStore::new();
//! let a = terms.atom("a");
//! let b = terms.atom("b");
//! let fact = terms.compound("edge", [a, b]);
//! let program = Program::new(&terms, [fact]).unwrap();
//!
//! let x = terms.var();
//! let query = terms.compound("edge", [a, x]);
//!
//! let mut env = ExecutionEnvironment::new(terms, program);
//! let answers: Vec<_> = env.execute_query(query).collect();
//! assert_eq!(answers.len(), 1);
//! assert_eq!(answers[0].value(x).unwrap().to_string(), "b");
//! ```

mod arith;
pub mod constraint;
pub mod engine;
pub mod metrics;
pub mod program;
pub mod rational;
mod search;
pub mod symbol;
pub mod term;
pub mod trace;
mod trail;
mod unify;

pub use constraint::{ActiveConstraint, ConstraintKind};
pub use engine::{
    ExecutionEnvironment, SearchConfig, Solution, SolutionAssumptions, Solutions,
};
pub use metrics::{MetricsReport, SearchMetrics};
pub use program::{Program, ProgramError};
pub use rational::Rational;
pub use symbol::Operator;
pub use term::{TermId, TermStore, TermView, Value};
pub use trail::Choice;
