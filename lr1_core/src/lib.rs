//! Canonical LR(1) parser generator
//!
//! A `Grammar` is built from an alphabet and `LHS->RHS` production strings, turned into an
//! `Automaton`, flattened into an `ActionTable` and finally driven by a `Parser`:
//!
//! ```
//! use lr1_core::{ActionTable, Automaton, Grammar, Parser};
//!
//! let grammar = Grammar::build(
//!     vec!["+", "*", "(", ")", "id"],
//!     &["S->E$", "E->E+T", "E->T", "T->T*F", "T->F", "F->(E)", "F->id"],
//! )
//! .unwrap();
//! let table = ActionTable::build(Automaton::build(grammar));
//! assert!(!table.has_conflicts());
//!
//! let parser = Parser::new(&table);
//! assert!(parser.parse("id+id*id").is_ok());
//! assert!(parser.parse("id+").is_err());
//! ```

#[macro_use]
mod trace;

mod error;
mod lr1;

pub use crate::error::{GrammarError, InvalidAction, ParseError, TableError};
pub use crate::lr1::*;
