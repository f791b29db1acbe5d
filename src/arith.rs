//! Arithmetic expressions over exact rationals.
//!
//! An arithmetic expression is a number, a variable, or a binary `+ - * /`
//! compound whose operands are arithmetic expressions. Everything here
//! works on dereferenced terms.

use crate::constraint::VariableCounts;
use crate::rational::Rational;
use crate::symbol::Operator;
use crate::term::{Node, TermId, TermStore};
use crate::unify::occurs;
use smallvec::smallvec;

/// Result of evaluating an arithmetic expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Evaluation {
    /// The value, if no unassigned variable occurs in the expression. May be
    /// the invalid rational.
    pub(crate) value: Option<Rational>,
    /// Number of arithmetic operators in the expression.
    pub(crate) operations: usize,
}

impl Evaluation {
    pub(crate) fn is_invalid(&self) -> bool {
        self.value.as_ref().is_some_and(|v| !v.is_valid())
    }
}

/// The arithmetic operator heading `id`, if it is a binary `+ - * /`.
fn arithmetic_operator(terms: &TermStore, id: TermId) -> Option<(Operator, TermId, TermId)> {
    match terms.operator_of(id)? {
        (op, 2) if op.is_arithmetic() => {
            let args = &terms.compound_node(id)?.args;
            Some((op, args[0], args[1]))
        }
        _ => None,
    }
}

fn apply(op: Operator, left: &Rational, right: &Rational) -> Rational {
    match op {
        Operator::Add => left + right,
        Operator::Subtract => left - right,
        Operator::Multiply => left * right,
        Operator::Divide => left / right,
        _ => unreachable!("{} is not an arithmetic operator", op.name()),
    }
}

/// Evaluate `id` as an arithmetic expression.
///
/// Returns `None` when the term is not an arithmetic expression at all.
pub(crate) fn evaluate(terms: &TermStore, id: TermId) -> Option<Evaluation> {
    let id = terms.deref(id);
    match terms.node(id) {
        Node::Variable(_) => Some(Evaluation {
            value: None,
            operations: 0,
        }),
        Node::Number(value) => Some(Evaluation {
            value: Some(value.clone()),
            operations: 0,
        }),
        Node::Compound(_) => {
            let (op, left, right) = arithmetic_operator(terms, id)?;
            let left = evaluate(terms, left)?;
            let right = evaluate(terms, right)?;
            let value = match (&left.value, &right.value) {
                (Some(l), Some(r)) => Some(apply(op, l, r)),
                _ => None,
            };
            Some(Evaluation {
                value,
                operations: left.operations + right.operations + 1,
            })
        }
    }
}

/// Fold every ground sub-expression of `id` into a number.
///
/// Returns `id` itself (dereferenced) when nothing changed; otherwise the
/// rebuilt expression, allocated in the store. Bound variables inside the
/// result are replaced by what they point to.
pub(crate) fn simplify(terms: &mut TermStore, id: TermId) -> TermId {
    let id = terms.deref(id);
    let Some((op, left, right)) = arithmetic_operator(terms, id) else {
        return id;
    };

    let left_simplified = simplify(terms, left);
    let right_simplified = simplify(terms, right);

    if let (Some(l), Some(r)) = (
        terms.number_value(left_simplified),
        terms.number_value(right_simplified),
    ) {
        let value = apply(op, l, r);
        return terms.number(value);
    }

    if left_simplified != left || right_simplified != right {
        let name = terms.symbols().operator_id(op);
        terms.compound_with(name, smallvec![left_simplified, right_simplified])
    } else {
        id
    }
}

/// Count the unassigned variables of `id` into `out`, keeping
/// first-occurrence order.
pub(crate) fn unassigned_variables(terms: &TermStore, id: TermId, out: &mut VariableCounts) {
    let mut stack = vec![id];
    while let Some(current) = stack.pop() {
        let current = terms.deref(current);
        match terms.node(current) {
            Node::Variable(_) => match out.iter_mut().find(|(var, _)| *var == current) {
                Some((_, count)) => *count += 1,
                None => out.push((current, 1)),
            },
            Node::Compound(compound) => stack.extend(compound.args.iter().rev().copied()),
            Node::Number(_) => {}
        }
    }
}

/// Solve `expression = target` for `var`, which must occur exactly once in
/// `expression` while every other leaf is ground.
///
/// Walks from the root towards the variable, inverting one operator per
/// level. The result may be invalid (e.g. the variable is multiplied by 0).
pub(crate) fn extract_variable_value(
    terms: &TermStore,
    var: TermId,
    expression: TermId,
    target: Rational,
) -> Rational {
    let mut expression = terms.deref(expression);
    let mut target = target;

    while let Some((op, left, right)) = arithmetic_operator(terms, expression) {
        let left = terms.deref(left);
        let right = terms.deref(right);

        if left == var || occurs(terms, var, left) {
            let other = ground_value(terms, right);
            target = match op {
                Operator::Add => &target - &other,
                Operator::Subtract => &target + &other,
                Operator::Multiply => &target / &other,
                Operator::Divide => &target * &other,
                _ => unreachable!(),
            };
            expression = left;
        } else {
            let other = ground_value(terms, left);
            target = match op {
                Operator::Add => &target - &other,
                Operator::Subtract => &other - &target,
                Operator::Multiply => &target / &other,
                Operator::Divide => &other / &target,
                _ => unreachable!(),
            };
            expression = right;
        }
    }

    target
}

fn ground_value(terms: &TermStore, id: TermId) -> Rational {
    evaluate(terms, id)
        .and_then(|evaluation| evaluation.value)
        .unwrap_or_else(Rational::invalid)
}

#[cfg(test)]
#[path = "tests/arith.rs"]
mod tests;
