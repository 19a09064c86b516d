mod symbol;
pub use self::symbol::{Symbol, Terminal, END_MARKER};

mod rule;
pub use self::rule::Rule;

mod grammar;
pub use self::grammar::{Grammar, TerminalSet};

mod item;
pub use self::item::Item;

mod state;
pub use self::state::State;

pub mod automaton;
pub use self::automaton::{Automaton, Exploration, Transition};

mod action;
pub use self::action::Action;

mod action_table;
pub use self::action_table::{ActionTable, Conflict, ConflictPolicy};

mod parser;
pub use self::parser::{Derivation, ParseStack, Parser, StackEntry, Token, Tokens};

pub mod report;
pub use self::report::TableGrid;
