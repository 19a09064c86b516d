use thiserror::Error;

use crate::Conflict;

/// Errors raised while building a grammar from production strings
///
/// No partially built grammar is ever handed out alongside one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    #[error("Grammar has no productions")]
    NoProductions,
    #[error("Production `{production}` lacks the `->` separator")]
    MissingSeparator { production: String },
    #[error("Production `{production}` has an empty left-hand side")]
    EmptyLhs { production: String },
    #[error("Production `{production}` has an empty right-hand side (nullable rules are not supported)")]
    EmptyRhs { production: String },
    #[error("Right-hand side of `{production}` cannot be segmented into known symbols at offset {offset}")]
    UnknownSymbol { production: String, offset: usize },
    #[error("The end marker `$` cannot be part of the alphabet")]
    ReservedTerminal,
    #[error("The end marker `$` cannot be the lhs of `{production}`")]
    ReservedNonterminal { production: String },
    #[error("{name} is a terminal of the alphabet and cannot be the lhs of a production")]
    TerminalAsNonterminal { name: String },
    #[error("The end marker `$` may only end the start production, found in `{production}`")]
    MisplacedEndMarker { production: String },
    #[error("Start symbol {nonterminal} is also the lhs of rule {rule}")]
    DuplicateStartRule { nonterminal: String, rule: usize },
}

/// Errors raised while flattening an automaton into an action table
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("Conflict in state {} on {}: {}", .0.state, .0.symbol_name, .0.describe())]
    Conflict(Conflict),
}

/// A rendered table cell that does not denote an action
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid action `{0}`")]
pub struct InvalidAction(pub String);

/// Reasons for rejecting an input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unrecognized symbol at offset {offset} (after `{consumed}`)")]
    UnrecognizedSymbol { offset: usize, consumed: String },
    #[error("No table entry for state {state} on `{token}` (after `{consumed}`)")]
    MissingTableEntry {
        state: usize,
        token: String,
        consumed: String,
    },
    #[error("Internal error: stack underflow while reducing by rule {rule} in state {state}")]
    ReduceStackUnderflow { rule: usize, state: usize },
    #[error("Internal error: stack holds `{found}` where rule {rule} expects its right-hand side")]
    RhsMismatch { rule: usize, found: String },
    #[error("Internal error: no goto from state {state} on {nonterminal}")]
    MissingGoto { state: usize, nonterminal: String },
    #[error("Internal error: goto entry in state {state} on terminal `{token}`")]
    GotoOnTerminal { state: usize, token: String },
}

impl ParseError {
    /// Whether this error signals an inconsistency between automaton and table rather than a
    /// rejected input
    pub fn is_internal(&self) -> bool {
        match self {
            ParseError::UnrecognizedSymbol { .. } | ParseError::MissingTableEntry { .. } => false,
            ParseError::ReduceStackUnderflow { .. }
            | ParseError::RhsMismatch { .. }
            | ParseError::MissingGoto { .. }
            | ParseError::GotoOnTerminal { .. } => true,
        }
    }
}
