use crate::constraint::ConstraintId;
use crate::rational::Rational;
use crate::symbol::{FuncId, Operator, SymbolStore};
use smallvec::SmallVec;
use std::fmt;

/// Unique identifier for a term in the term store.
///
/// Ids are handed out in creation order, so for two live variables the
/// smaller id is always the older one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TermId(u32);

impl TermId {
    /// Get the raw u32 value (for debugging/display).
    pub fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A term node: a number, a logic variable, or a compound.
#[derive(Debug, Clone)]
pub(crate) enum Node {
    Number(Rational),
    Variable(Variable),
    Compound(Compound),
}

/// Mutable state of a logic variable.
#[derive(Debug, Clone, Default)]
pub(crate) struct Variable {
    /// The term this variable is bound to. `None` means unassigned.
    pub(crate) next: Option<TermId>,
    /// Set while the variable is registered as a delayed query.
    pub(crate) delayed_query: bool,
    /// Constraints this variable took part in when they were posted.
    pub(crate) constraints: SmallVec<[ConstraintId; 2]>,
}

/// A functor applied to an ordered, fixed list of children.
#[derive(Debug, Clone)]
pub(crate) struct Compound {
    pub(crate) name: FuncId,
    pub(crate) args: SmallVec<[TermId; 4]>,
    /// Set while this exact node is on the query call stack.
    pub(crate) in_call_stack: bool,
}

#[derive(Debug, Clone)]
struct Slot {
    node: Node,
    /// Variables bound directly onto this term.
    previous: SmallVec<[TermId; 2]>,
    /// Compounds that hold this term as a child.
    parents: SmallVec<[TermId; 2]>,
}

impl Slot {
    fn new(node: Node) -> Self {
        Self {
            node,
            previous: SmallVec::new(),
            parents: SmallVec::new(),
        }
    }
}

/// Borrowed, one-level view of a term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TermView<'a> {
    Number(&'a Rational),
    /// A variable, together with its binding if it has one.
    Variable(Option<TermId>),
    Compound { name: &'a str, args: &'a [TermId] },
}

/// Arena owning every term: the caller's program and query terms as well as
/// everything the engine instantiates while searching.
///
/// The arena is the only owner; terms refer to each other by [`TermId`].
/// Engine allocations are stack-ordered and released by truncating the arena
/// back to a recorded length, which also removes the child-to-parent
/// back-edges those compounds added.
pub struct TermStore {
    slots: Vec<Slot>,
    symbols: SymbolStore,
}

impl TermStore {
    /// Create a new empty term store.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            symbols: SymbolStore::new(),
        }
    }

    /// Number of terms currently allocated.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn symbols(&self) -> &SymbolStore {
        &self.symbols
    }

    fn alloc(&mut self, node: Node) -> TermId {
        let id = TermId(u32::try_from(self.slots.len()).expect("term arena exhausted"));
        self.slots.push(Slot::new(node));
        id
    }

    // ========== CONSTRUCTION ==========

    /// Create a number term.
    pub fn number(&mut self, value: impl Into<Rational>) -> TermId {
        self.alloc(Node::Number(value.into()))
    }

    /// Create an integral number term.
    pub fn integer(&mut self, value: i64) -> TermId {
        self.number(Rational::integer(value))
    }

    /// Create a fresh, unassigned variable.
    pub fn var(&mut self) -> TermId {
        self.alloc(Node::Variable(Variable::default()))
    }

    /// Create a compound term `name(args...)`.
    pub fn compound(&mut self, name: &str, args: impl IntoIterator<Item = TermId>) -> TermId {
        let name = self.symbols.intern(name);
        self.compound_with(name, args.into_iter().collect())
    }

    /// Create a zero-arity compound.
    pub fn atom(&mut self, name: &str) -> TermId {
        self.compound(name, std::iter::empty())
    }

    /// Create a compound named by a reserved operator.
    pub fn operator(&mut self, op: Operator, args: impl IntoIterator<Item = TermId>) -> TermId {
        let name = self.symbols.operator_id(op);
        self.compound_with(name, args.into_iter().collect())
    }

    pub(crate) fn compound_with(&mut self, name: FuncId, args: SmallVec<[TermId; 4]>) -> TermId {
        let id = TermId(u32::try_from(self.slots.len()).expect("term arena exhausted"));
        for &child in args.iter() {
            self.slots[child.index()].parents.push(id);
        }
        self.alloc(Node::Compound(Compound {
            name,
            args,
            in_call_stack: false,
        }))
    }

    pub fn and(&mut self, left: TermId, right: TermId) -> TermId {
        self.operator(Operator::Conjunction, [left, right])
    }

    pub fn or(&mut self, left: TermId, right: TermId) -> TermId {
        self.operator(Operator::Disjunction, [left, right])
    }

    pub fn not(&mut self, goal: TermId) -> TermId {
        self.operator(Operator::Not, [goal])
    }

    pub fn eq(&mut self, left: TermId, right: TermId) -> TermId {
        self.operator(Operator::Equal, [left, right])
    }

    pub fn neq(&mut self, left: TermId, right: TermId) -> TermId {
        self.operator(Operator::Unequal, [left, right])
    }

    pub fn gt(&mut self, left: TermId, right: TermId) -> TermId {
        self.operator(Operator::Greater, [left, right])
    }

    pub fn ge(&mut self, left: TermId, right: TermId) -> TermId {
        self.operator(Operator::GreaterEqual, [left, right])
    }

    pub fn lt(&mut self, left: TermId, right: TermId) -> TermId {
        self.operator(Operator::Smaller, [left, right])
    }

    pub fn le(&mut self, left: TermId, right: TermId) -> TermId {
        self.operator(Operator::SmallerEqual, [left, right])
    }

    pub fn add(&mut self, left: TermId, right: TermId) -> TermId {
        self.operator(Operator::Add, [left, right])
    }

    pub fn sub(&mut self, left: TermId, right: TermId) -> TermId {
        self.operator(Operator::Subtract, [left, right])
    }

    pub fn mul(&mut self, left: TermId, right: TermId) -> TermId {
        self.operator(Operator::Multiply, [left, right])
    }

    pub fn div(&mut self, left: TermId, right: TermId) -> TermId {
        self.operator(Operator::Divide, [left, right])
    }

    /// Create the Horn clause `head :- body`.
    pub fn clause(&mut self, head: TermId, body: TermId) -> TermId {
        self.operator(Operator::Clause, [head, body])
    }

    /// Build the right-nested conjunction of `goals`.
    ///
    /// Returns `None` for an empty list and the goal itself for a single one.
    pub fn conjunction(&mut self, goals: &[TermId]) -> Option<TermId> {
        let (&last, init) = goals.split_last()?;
        Some(
            init.iter()
                .rev()
                .fold(last, |acc, &goal| self.and(goal, acc)),
        )
    }

    // ========== INSPECTION ==========

    /// Follow variable bindings until reaching an unassigned variable or a
    /// non-variable term.
    pub fn deref(&self, mut id: TermId) -> TermId {
        while let Node::Variable(Variable { next: Some(next), .. }) = self.node(id) {
            id = *next;
        }
        id
    }

    /// A one-level view of the term, without dereferencing.
    pub fn view(&self, id: TermId) -> TermView<'_> {
        match self.node(id) {
            Node::Number(value) => TermView::Number(value),
            Node::Variable(var) => TermView::Variable(var.next),
            Node::Compound(compound) => TermView::Compound {
                name: self.name(compound.name),
                args: &compound.args,
            },
        }
    }

    /// Whether the term is a variable with no binding.
    pub fn is_unassigned(&self, id: TermId) -> bool {
        matches!(self.node(id), Node::Variable(Variable { next: None, .. }))
    }

    /// The fully dereferenced value of a term, as an owned tree.
    pub fn value(&self, id: TermId) -> Value {
        let id = self.deref(id);
        match self.node(id) {
            Node::Number(value) => Value::Number(value.clone()),
            Node::Variable(_) => Value::Variable(id),
            Node::Compound(compound) => Value::Compound {
                name: self.name(compound.name).to_string(),
                args: compound.args.iter().map(|&arg| self.value(arg)).collect(),
            },
        }
    }

    /// The unassigned variables of a term, dereferenced, in order of first
    /// occurrence.
    pub fn variables_of(&self, id: TermId) -> Vec<TermId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let current = self.deref(current);
            match self.node(current) {
                Node::Variable(_) => {
                    if !out.contains(&current) {
                        out.push(current);
                    }
                }
                Node::Compound(compound) => stack.extend(compound.args.iter().rev()),
                Node::Number(_) => {}
            }
        }
        out
    }

    pub(crate) fn name(&self, id: FuncId) -> &str {
        self.symbols.resolve(id).unwrap_or("<unknown>")
    }

    pub(crate) fn node(&self, id: TermId) -> &Node {
        &self.slots[id.index()].node
    }

    pub(crate) fn compound_node(&self, id: TermId) -> Option<&Compound> {
        match self.node(id) {
            Node::Compound(compound) => Some(compound),
            _ => None,
        }
    }

    pub(crate) fn variable_node(&self, id: TermId) -> Option<&Variable> {
        match self.node(id) {
            Node::Variable(var) => Some(var),
            _ => None,
        }
    }

    pub(crate) fn variable_mut(&mut self, id: TermId) -> Option<&mut Variable> {
        match &mut self.slots[id.index()].node {
            Node::Variable(var) => Some(var),
            _ => None,
        }
    }

    pub(crate) fn number_value(&self, id: TermId) -> Option<&Rational> {
        match self.node(id) {
            Node::Number(value) => Some(value),
            _ => None,
        }
    }

    /// The reserved operator a compound is named by, with its arity.
    pub(crate) fn operator_of(&self, id: TermId) -> Option<(Operator, usize)> {
        let compound = self.compound_node(id)?;
        let op = self.symbols.operator(compound.name)?;
        Some((op, compound.args.len()))
    }

    pub(crate) fn set_in_call_stack(&mut self, id: TermId, value: bool) {
        if let Node::Compound(compound) = &mut self.slots[id.index()].node {
            compound.in_call_stack = value;
        }
    }

    pub(crate) fn previous(&self, id: TermId) -> &[TermId] {
        &self.slots[id.index()].previous
    }

    pub(crate) fn parents(&self, id: TermId) -> &[TermId] {
        &self.slots[id.index()].parents
    }

    // ========== BINDING & RELEASE ==========

    /// Point `var` at `target` and record the reverse edge.
    pub(crate) fn bind(&mut self, var: TermId, target: TermId) {
        if let Some(cell) = self.variable_mut(var) {
            debug_assert!(cell.next.is_none(), "binding an assigned variable");
            cell.next = Some(target);
            self.slots[target.index()].previous.push(var);
        }
    }

    /// Undo [`TermStore::bind`].
    pub(crate) fn unbind(&mut self, var: TermId) {
        let Some(target) = self.variable_mut(var).and_then(|cell| cell.next.take()) else {
            return;
        };
        let previous = &mut self.slots[target.index()].previous;
        if let Some(pos) = previous.iter().rposition(|&p| p == var) {
            previous.remove(pos);
        }
    }

    /// Release every term allocated after the arena had `len` entries.
    pub(crate) fn truncate(&mut self, len: usize) {
        while self.slots.len() > len {
            let Some(slot) = self.slots.pop() else { break };
            let id = TermId(self.slots.len() as u32);
            if let Node::Compound(compound) = slot.node {
                for child in compound.args {
                    let parents = &mut self.slots[child.index()].parents;
                    if let Some(pos) = parents.iter().rposition(|&p| p == id) {
                        parents.remove(pos);
                    }
                }
            }
        }
    }
}

impl Default for TermStore {
    fn default() -> Self {
        Self::new()
    }
}

/// An owned, fully dereferenced term, as reported in solutions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Number(Rational),
    /// An unassigned variable, named by its representative id.
    ///
    /// Ids of variables created during a search are released on
    /// backtracking, so the id is only a name once the search has moved on.
    Variable(TermId),
    Compound { name: String, args: Vec<Value> },
}

impl Value {
    pub fn as_number(&self) -> Option<&Rational> {
        match self {
            Value::Number(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_variable(&self) -> Option<TermId> {
        match self {
            Value::Variable(id) => Some(*id),
            _ => None,
        }
    }

    /// True when no variable occurs in the value.
    pub fn is_ground(&self) -> bool {
        match self {
            Value::Number(_) => true,
            Value::Variable(_) => false,
            Value::Compound { args, .. } => args.iter().all(Value::is_ground),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(value) => write!(f, "{}", value),
            Value::Variable(id) => write!(f, "_G{}", id.raw()),
            Value::Compound { name, args } if args.is_empty() => write!(f, "{}", name),
            Value::Compound { name, args } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/term.rs"]
mod tests;
