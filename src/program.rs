//! Programs: ordered lists of facts and Horn clauses.

use crate::symbol::{FuncId, Operator};
use crate::term::{Node, TermId, TermStore};
use hashbrown::HashMap;
use smallvec::SmallVec;
use std::fmt;

/// One fact or clause of a program, split into head and body.
#[derive(Debug, Clone)]
pub(crate) struct Clause {
    pub(crate) head: TermId,
    /// `None` for facts.
    pub(crate) body: Option<TermId>,
    pub(crate) name: FuncId,
    pub(crate) arity: usize,
}

/// A validated, immutable list of facts and clauses.
///
/// The terms stay in the [`TermStore`] they were built in; the program only
/// records where heads and bodies are. Clauses are tried in the order given.
#[derive(Debug, Clone, Default)]
pub struct Program {
    clauses: Vec<Clause>,
}

/// Error returned when a program fails validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgramError {
    /// The entry is a number or a variable.
    NotACompound { index: usize },
    /// A `:-` compound without exactly two children.
    MalformedClause { index: usize, arity: usize },
    /// The head of a clause is a number or a variable.
    HeadNotCompound { index: usize },
    /// A fact or clause head defines a reserved operator.
    ReservedPredicate { index: usize, name: String },
}

impl fmt::Display for ProgramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgramError::NotACompound { index } => {
                write!(f, "entry {} is not a fact or clause", index)
            }
            ProgramError::MalformedClause { index, arity } => {
                write!(f, "clause {} has {} parts, expected head and body", index, arity)
            }
            ProgramError::HeadNotCompound { index } => {
                write!(f, "clause {} has a head that is not a compound term", index)
            }
            ProgramError::ReservedPredicate { index, name } => {
                write!(f, "entry {} redefines reserved operator `{}`", index, name)
            }
        }
    }
}

impl std::error::Error for ProgramError {}

impl Program {
    /// Validate `entries` and build a program from them.
    pub fn new(
        terms: &TermStore,
        entries: impl IntoIterator<Item = TermId>,
    ) -> Result<Self, ProgramError> {
        let clauses = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| Self::clause(terms, index, entry))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { clauses })
    }

    /// A program with no clauses.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub(crate) fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    fn clause(terms: &TermStore, index: usize, entry: TermId) -> Result<Clause, ProgramError> {
        let entry = terms.deref(entry);
        let compound = terms
            .compound_node(entry)
            .ok_or(ProgramError::NotACompound { index })?;

        let (head, body) = if terms.symbols().operator(compound.name) == Some(Operator::Clause) {
            if compound.args.len() != 2 {
                return Err(ProgramError::MalformedClause {
                    index,
                    arity: compound.args.len(),
                });
            }
            (terms.deref(compound.args[0]), Some(compound.args[1]))
        } else {
            (entry, None)
        };

        let head_node = terms
            .compound_node(head)
            .ok_or(ProgramError::HeadNotCompound { index })?;
        if let Some(op) = terms.symbols().operator(head_node.name) {
            return Err(ProgramError::ReservedPredicate {
                index,
                name: op.name().to_string(),
            });
        }

        Ok(Clause {
            head,
            body,
            name: head_node.name,
            arity: head_node.args.len(),
        })
    }
}

/// Copy `term` with every variable replaced by a fresh one.
///
/// `renaming` maps original variables to their copies and is shared between
/// the head and the body of one clause instance.
pub(crate) fn instantiate(
    terms: &mut TermStore,
    term: TermId,
    renaming: &mut HashMap<TermId, TermId>,
) -> TermId {
    match terms.node(term) {
        Node::Number(value) => {
            let value = value.clone();
            terms.number(value)
        }
        Node::Variable(_) => *renaming.entry(term).or_insert_with(|| terms.var()),
        Node::Compound(compound) => {
            let name = compound.name;
            let args = compound.args.clone();
            let copies: SmallVec<[TermId; 4]> = args
                .iter()
                .map(|&arg| instantiate(terms, arg, renaming))
                .collect();
            terms.compound_with(name, copies)
        }
    }
}

#[cfg(test)]
#[path = "tests/program.rs"]
mod tests;
