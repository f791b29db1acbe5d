use super::*;
use crate::constraint::ConstraintKind;

/// `num(0). num(s(X)) :- num(X).`
fn naturals(terms: &mut TermStore) -> Program {
    let zero = terms.integer(0);
    let base = terms.compound("num", [zero]);
    let x = terms.var();
    let succ = terms.compound("s", [x]);
    let head = terms.compound("num", [succ]);
    let body = terms.compound("num", [x]);
    let step = terms.clause(head, body);
    Program::new(terms, [base, step]).unwrap()
}

fn nat(n: usize) -> String {
    (0..n).fold("0".to_string(), |acc, _| format!("s({})", acc))
}

// ========== CONFIG ==========

#[test]
fn config_defaults() {
    let config = SearchConfig::default();
    assert_eq!(config.initial_depth, 50);
    assert_eq!(config.max_depth, 2000);
    assert_eq!(config.depth_multiplier, 2);
    assert_eq!(config.first_limit(), 50);
}

#[test]
fn config_widening_is_capped() {
    let config = SearchConfig::new()
        .with_initial_depth(100)
        .with_max_depth(300)
        .with_depth_multiplier(2);
    assert_eq!(config.widen(100), 200);
    assert_eq!(config.widen(200), 300);

    let small = SearchConfig::new().with_initial_depth(500).with_max_depth(100);
    assert_eq!(small.first_limit(), 100);

    // A multiplier below 2 would never terminate the deepening loop.
    let stuck = SearchConfig::new().with_depth_multiplier(1);
    assert_eq!(stuck.widen(50), 100);
}

// ========== QUERIES ==========

#[test]
fn facts_bind_query_variables() {
    let mut terms = TermStore::new();
    let a = terms.atom("a");
    let b = terms.atom("b");
    let c = terms.atom("c");
    let ab = terms.compound("edge", [a, b]);
    let ac = terms.compound("edge", [a, c]);
    let program = Program::new(&terms, [ab, ac]).unwrap();

    let x = terms.var();
    let query = terms.compound("edge", [a, x]);
    let mut env = ExecutionEnvironment::new(terms, program);

    let values: Vec<String> = env
        .execute_query(query)
        .map(|solution| solution.value(x).unwrap().to_string())
        .collect();
    assert_eq!(values, vec!["b", "c"]);
    assert_eq!(env.count_solutions(query), 2);
}

#[test]
fn bindings_list_query_variables_in_order() {
    let mut terms = TermStore::new();
    let x = terms.var();
    let y = terms.var();
    let one = terms.integer(1);
    let bind_y = terms.eq(y, one);
    let bind_x = terms.eq(x, y);
    let query = terms.and(bind_y, bind_x);
    let mut env = ExecutionEnvironment::new(terms, Program::empty());

    let solution = env.execute_query(query).next().unwrap();
    let vars: Vec<TermId> = solution.bindings().iter().map(|(var, _)| *var).collect();
    assert_eq!(vars, vec![y, x]);
    assert_eq!(solution.value(x).unwrap().to_string(), "1");
    assert!(solution.assumptions.is_empty());
}

#[test]
fn solutions_report_active_constraints() {
    let mut terms = TermStore::new();
    let x = terms.var();
    let five = terms.integer(5);
    let query = terms.neq(x, five);
    let mut env = ExecutionEnvironment::new(terms, Program::empty());

    let solutions: Vec<Solution> = env.execute_query(query).collect();
    assert_eq!(solutions.len(), 1);
    let constraints = &solutions[0].assumptions.active_constraints;
    assert_eq!(constraints.len(), 1);
    assert_eq!(constraints[0].kind, ConstraintKind::Disunification);
    assert_eq!(constraints[0].to_string(), format!("_G{} != 5", x.raw()));
    assert_eq!(solutions[0].value(x), Some(&Value::Variable(x)));
}

#[test]
fn solutions_report_delayed_queries() {
    let mut terms = TermStore::new();
    let x = terms.var();
    let mut env = ExecutionEnvironment::new(terms, Program::empty());
    let solution = env.execute_query(x).next().unwrap();
    assert_eq!(solution.assumptions.delayed_queries, vec![Value::Variable(x)]);
}

#[test]
fn dropping_the_iterator_restores_the_store() {
    let mut terms = TermStore::new();
    let program = naturals(&mut terms);
    let x = terms.var();
    let query = terms.compound("num", [x]);
    let mut env = ExecutionEnvironment::new(terms, program);
    let len = env.terms().len();

    {
        let mut solutions = env.execute_query(query);
        solutions.next().unwrap();
        solutions.next().unwrap();
    }
    assert_eq!(env.terms().len(), len);
    assert!(env.terms().is_unassigned(x));
}

#[test]
fn set_program_replaces_clauses() {
    let mut terms = TermStore::new();
    let p = terms.atom("p");
    let query = terms.atom("p");
    let mut env = ExecutionEnvironment::new(terms, Program::empty());
    assert_eq!(env.count_solutions(query), 0);

    let program = Program::new(env.terms(), [p]).unwrap();
    env.set_program(program);
    assert_eq!(env.program().len(), 1);
    assert_eq!(env.count_solutions(query), 1);
}

// ========== ITERATIVE DEEPENING ==========

#[test]
fn finite_search_runs_a_single_pass() {
    let mut terms = TermStore::new();
    let program = naturals(&mut terms);
    let two = terms.integer(2);
    let one = terms.compound("s", [two]);
    let query = terms.compound("num", [one]);
    let mut env = ExecutionEnvironment::new(terms, program);

    let mut solutions = env.execute_query(query);
    assert!(solutions.next().is_none());
    let report = solutions.metrics();
    assert_eq!(report.passes, 1);
    assert_eq!(report.depth_limit_hits, 0);
}

#[test]
fn deepening_yields_each_answer_once_in_order() {
    let mut terms = TermStore::new();
    let program = naturals(&mut terms);
    let x = terms.var();
    let query = terms.compound("num", [x]);
    let config = SearchConfig::new()
        .with_initial_depth(10)
        .with_max_depth(40)
        .with_depth_multiplier(2);
    let mut env = ExecutionEnvironment::new(terms, program).with_config(config);

    let mut solutions = env.execute_query(query);
    let values: Vec<String> = solutions
        .by_ref()
        .map(|solution| solution.value(x).unwrap().to_string())
        .collect();

    assert!(values.len() >= 10);
    for (n, value) in values.iter().enumerate() {
        assert_eq!(value, &nat(n));
    }

    let report = solutions.metrics();
    assert_eq!(report.passes, 3);
    assert!(report.depth_limit_hits > 0);
    assert!(report.duplicates_suppressed > 0);
    assert_eq!(report.solutions_yielded as usize, values.len());
    assert_eq!(solutions.depth_limit(), 40);
}

#[test]
fn exhausted_iterator_stays_exhausted() {
    let mut terms = TermStore::new();
    let one = terms.integer(1);
    let mut env = ExecutionEnvironment::new(terms, Program::empty());
    let mut solutions = env.execute_query(one);
    assert!(solutions.next().is_some());
    assert!(solutions.next().is_none());
    assert!(solutions.next().is_none());
}

#[test]
fn zero_initial_depth_still_deepens() {
    let config = SearchConfig::new().with_initial_depth(0).with_max_depth(100);
    assert_eq!(config.first_limit(), 1);
    assert_eq!(config.widen(0), 1);
    assert_eq!(config.widen(99), 100);

    let mut terms = TermStore::new();
    let p = terms.atom("p");
    let program = Program::new(&terms, [p]).unwrap();
    let query = terms.atom("p");
    let mut env = ExecutionEnvironment::new(terms, program).with_config(config);
    assert_eq!(env.count_solutions(query), 1);
}
