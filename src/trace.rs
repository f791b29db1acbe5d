//! Feature-gated tracing for the search engine.
//!
//! With the `tracing` feature this module re-exports the tracing crate's
//! macros. Without it `trace!` and `debug!` expand to nothing, so
//! instrumented call sites cost nothing in default builds.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[cfg(feature = "tracing")]
//! use crate::trace::{debug, trace};
//!
//! #[cfg(feature = "tracing")]
//! debug!(depth_limit, "pass_start");
//! ```
//!
//! Every step of the solution iterator runs inside a `pass` debug span that
//! carries the current depth limit.
//!
//! Events emitted by the engine:
//! - `pass_start`, `depth_limit_hit` (debug)
//! - `clause_expansion`, `negation_probe`, `constraint_posted`,
//!   `constraint_discarded`, `solution_yielded`, `solution_suppressed` (trace)

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, trace};

#[cfg(not(feature = "tracing"))]
mod noop {
    #[macro_export]
    macro_rules! trace {
        ($($tt:tt)*) => {};
    }

    #[macro_export]
    macro_rules! debug {
        ($($tt:tt)*) => {};
    }

    pub use crate::{debug, trace};
}

#[cfg(not(feature = "tracing"))]
pub use noop::*;

/// Install a stderr subscriber filtered by `RUST_LOG` (default `info`).
///
/// Safe to call more than once; later calls are ignored.
#[cfg(feature = "tracing")]
pub fn init_subscriber() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true)
                .with_ansi(false),
        )
        .with(filter)
        .try_init()
        .ok();
}

#[cfg(not(feature = "tracing"))]
pub fn init_subscriber() {}

#[cfg(test)]
#[path = "tests/trace.rs"]
mod tests;
