use super::*;

#[test]
fn macros_accept_engine_event_shapes() {
    debug!(depth_limit = 50usize, "pass_start");
    trace!(goal = 3u32, clause = 1usize, "clause_expansion");
    trace!(path_len = 2usize, "solution_yielded");
}

#[cfg(feature = "tracing")]
#[test]
fn pass_span_can_be_entered() {
    let _pass = debug_span!("pass", depth_limit = 50usize).entered();
    debug!("inside pass");
}

#[test]
fn init_subscriber_is_idempotent() {
    init_subscriber();
    init_subscriber();
}
