use std::error::Error;
use std::fs;

use lr1_core::{ActionTable, Automaton, ConflictPolicy, Grammar};
use thiserror::Error;

const TERMINALS_PREFIX: &str = "terminals:";

/// Contents of a grammar description file
///
/// Blank lines and lines starting with `#` are skipped. `terminals:` lines declare the alphabet
/// (whitespace separated), every other line is a production.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrammarFile {
    pub terminals: Vec<String>,
    pub productions: Vec<String>,
}

impl GrammarFile {
    pub fn parse(content: &str) -> Self {
        let mut file = GrammarFile::default();
        for line in content.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if line.starts_with(TERMINALS_PREFIX) {
                file.terminals.extend(
                    line[TERMINALS_PREFIX.len()..]
                        .split_whitespace()
                        .map(str::to_owned),
                );
            } else {
                file.productions.push(line.to_owned());
            }
        }
        file
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{filename} declares no terminals")]
    NoTerminals { filename: String },
    #[error("{filename} contains no productions")]
    NoProductions { filename: String },
}

pub fn load_grammar(filename: &str) -> Result<Grammar, Box<dyn Error>> {
    let content = fs::read_to_string(filename)?;
    let file = GrammarFile::parse(&content);
    if file.terminals.is_empty() {
        return Err(Box::new(LoadError::NoTerminals {
            filename: filename.to_owned(),
        }));
    }
    if file.productions.is_empty() {
        return Err(Box::new(LoadError::NoProductions {
            filename: filename.to_owned(),
        }));
    }
    let grammar = Grammar::build(file.terminals, &file.productions)?;
    Ok(grammar)
}

pub fn generate_automaton(filename: &str) -> Result<Automaton, Box<dyn Error>> {
    Ok(Automaton::build(load_grammar(filename)?))
}

pub fn generate_action_table(filename: &str, strict: bool) -> Result<ActionTable, Box<dyn Error>> {
    let policy = if strict {
        ConflictPolicy::Fail
    } else {
        ConflictPolicy::FirstWins
    };
    let table = ActionTable::build_with(generate_automaton(filename)?, policy)?;
    Ok(table)
}
