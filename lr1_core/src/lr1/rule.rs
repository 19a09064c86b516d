use crate::Symbol;

/// A production of the grammar
///
/// Rules are numbered by declaration order; rule 0 is the start production.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    pub id: usize,
    /// Index of the lhs in the grammar's nonterminal set
    pub lhs: usize,
    pub rhs: Vec<Symbol>,
    /// The production as it was written, e.g. `E->E+T`
    pub text: String,
}
