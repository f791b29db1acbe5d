//! Reachability over a small directed graph.

use hornq::{ExecutionEnvironment, Program, TermId, TermStore};

const NODES: [&str; 5] = ["a", "b", "c", "d", "e"];

/// `edge` facts a->b->c->d->e plus the transitive closure `path`.
fn graph() -> (TermStore, Program) {
    let mut terms = TermStore::new();
    let mut entries = Vec::new();

    for pair in NODES.windows(2) {
        let from = terms.atom(pair[0]);
        let to = terms.atom(pair[1]);
        entries.push(terms.compound("edge", [from, to]));
    }

    // path(A, B) :- edge(A, B).
    let a = terms.var();
    let b = terms.var();
    let head = terms.compound("path", [a, b]);
    let body = terms.compound("edge", [a, b]);
    entries.push(terms.clause(head, body));

    // path(A, B) :- edge(A, Aux), path(Aux, B).
    let a = terms.var();
    let b = terms.var();
    let aux = terms.var();
    let head = terms.compound("path", [a, b]);
    let step = terms.compound("edge", [a, aux]);
    let rest = terms.compound("path", [aux, b]);
    let body = terms.and(step, rest);
    entries.push(terms.clause(head, body));

    let program = Program::new(&terms, entries).unwrap();
    (terms, program)
}

fn path_query(terms: &mut TermStore, from: &str, to: Option<&str>) -> (TermId, TermId) {
    let from = terms.atom(from);
    let to = match to {
        Some(name) => terms.atom(name),
        None => terms.var(),
    };
    (terms.compound("path", [from, to]), to)
}

#[test]
fn connected_pair_has_one_derivation() {
    let (mut terms, program) = graph();
    let (query, _) = path_query(&mut terms, "a", Some("e"));
    let mut env = ExecutionEnvironment::new(terms, program);
    assert_eq!(env.count_solutions(query), 1);
}

#[test]
fn edges_are_directed() {
    let (mut terms, program) = graph();
    let (query, _) = path_query(&mut terms, "e", Some("a"));
    let mut env = ExecutionEnvironment::new(terms, program);
    assert_eq!(env.count_solutions(query), 0);
}

#[test]
fn reachable_nodes_are_enumerated() {
    let (mut terms, program) = graph();
    let (query, result) = path_query(&mut terms, "a", None);
    let mut env = ExecutionEnvironment::new(terms, program);

    let reached: Vec<String> = env
        .execute_query(query)
        .map(|solution| {
            assert!(solution.assumptions.is_empty());
            solution.value(result).unwrap().to_string()
        })
        .collect();
    assert_eq!(reached, vec!["b", "c", "d", "e"]);
}

#[test]
fn sink_reaches_nothing() {
    let (mut terms, program) = graph();
    let (query, _) = path_query(&mut terms, "e", None);
    let mut env = ExecutionEnvironment::new(terms, program);
    assert_eq!(env.count_solutions(query), 0);
}

#[test]
fn finite_graph_needs_no_deepening() {
    let (mut terms, program) = graph();
    let (query, _) = path_query(&mut terms, "a", None);
    let mut env = ExecutionEnvironment::new(terms, program);
    let mut solutions = env.execute_query(query);
    assert_eq!(solutions.by_ref().count(), 4);
    let report = solutions.metrics();
    assert_eq!(report.passes, 1);
    assert_eq!(report.depth_limit_hits, 0);
    assert_eq!(report.duplicates_suppressed, 0);
}
