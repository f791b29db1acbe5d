use lasso::{Rodeo, Spur};

/// A unique identifier for a functor symbol.
/// This is an interned string ID for fast equality comparison.
pub type FuncId = Spur;

/// The functor names the engine interprets itself.
///
/// Programs may not define predicates under any of these names, with the
/// exception of [`Operator::Clause`], which is how clauses are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Disjunction,
    Conjunction,
    Equal,
    Unequal,
    Greater,
    GreaterEqual,
    Smaller,
    SmallerEqual,
    Not,
    Clause,
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub const ALL: [Operator; 14] = [
        Operator::Disjunction,
        Operator::Conjunction,
        Operator::Equal,
        Operator::Unequal,
        Operator::Greater,
        Operator::GreaterEqual,
        Operator::Smaller,
        Operator::SmallerEqual,
        Operator::Not,
        Operator::Clause,
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];

    /// The surface name of the operator.
    pub fn name(self) -> &'static str {
        match self {
            Operator::Disjunction => ";",
            Operator::Conjunction => ",",
            Operator::Equal => "=",
            Operator::Unequal => "!=",
            Operator::Greater => ">",
            Operator::GreaterEqual => ">=",
            Operator::Smaller => "<",
            Operator::SmallerEqual => "<=",
            Operator::Not => "not",
            Operator::Clause => ":-",
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
        }
    }

    /// `+ - * /`, the operators of arithmetic expressions.
    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            Operator::Add | Operator::Subtract | Operator::Multiply | Operator::Divide
        )
    }
}

/// Symbol store for interning functor names.
///
/// Guarantees:
/// - Same string always produces same FuncId
/// - Different strings always produce different FuncIds
/// - FuncId can be resolved back to the original string
/// - The reserved operator names are interned up front
pub struct SymbolStore {
    rodeo: Rodeo,
    operators: [FuncId; 14],
}

impl SymbolStore {
    /// Create a store holding only the reserved operator names.
    pub fn new() -> Self {
        let mut rodeo = Rodeo::new();
        let operators = Operator::ALL.map(|op| rodeo.get_or_intern_static(op.name()));
        Self { rodeo, operators }
    }

    /// Intern a symbol string, returning its unique FuncId.
    /// If the symbol was already interned, returns the existing FuncId.
    pub fn intern(&mut self, name: &str) -> FuncId {
        self.rodeo.get_or_intern(name)
    }

    /// Resolve a FuncId back to its string representation.
    /// Returns None if the FuncId was not created by this store.
    pub fn resolve(&self, id: FuncId) -> Option<&str> {
        self.rodeo.try_resolve(&id)
    }

    /// Get the FuncId for a symbol if it exists, without interning.
    pub fn get(&self, name: &str) -> Option<FuncId> {
        self.rodeo.get(name)
    }

    /// The FuncId of a reserved operator.
    pub fn operator_id(&self, op: Operator) -> FuncId {
        self.operators[op as usize]
    }

    /// The reserved operator a symbol names, if any.
    pub fn operator(&self, id: FuncId) -> Option<Operator> {
        self.operators
            .iter()
            .position(|&candidate| candidate == id)
            .map(|index| Operator::ALL[index])
    }
}

impl Default for SymbolStore {
    fn default() -> Self {
        Self::new()
    }
}
