use std::ops::Range;

use crate::{Action, ActionTable, Grammar, ParseError, Rule, Symbol, Terminal, END_MARKER};

/// A terminal recognized in the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub terminal: Terminal,
    /// Byte range in the input; empty for the end marker
    pub span: Range<usize>,
}

/// Lazy tokenizer over an input string
///
/// At each position the candidate grows one character at a time until it equals a terminal of
/// the alphabet. Once the input is exhausted a single `$` token is produced. The iterator ends
/// after the end marker or the first error.
pub struct Tokens<'g, 'i> {
    grammar: &'g Grammar,
    input: &'i str,
    pos: usize,
    done: bool,
}

impl<'g, 'i> Tokens<'g, 'i> {
    pub fn new(grammar: &'g Grammar, input: &'i str) -> Self {
        Self {
            grammar,
            input,
            pos: 0,
            done: false,
        }
    }

    fn unrecognized(&mut self) -> ParseError {
        self.done = true;
        ParseError::UnrecognizedSymbol {
            offset: self.pos,
            consumed: self.input[..self.pos].to_owned(),
        }
    }
}

impl<'g, 'i> Iterator for Tokens<'g, 'i> {
    type Item = Result<Token, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let start = self.pos;
        if start == self.input.len() {
            self.done = true;
            return Some(Ok(Token {
                terminal: Terminal::End,
                span: start..start,
            }));
        }
        for (offset, c) in self.input[start..].char_indices() {
            let end = start + offset + c.len_utf8();
            let candidate = &self.input[start..end];
            // `$` only ever terminates the input
            if candidate == END_MARKER {
                return Some(Err(self.unrecognized()));
            }
            if let Some(idx) = self.grammar.alphabet().get_index_of(candidate) {
                self.pos = end;
                return Some(Ok(Token {
                    terminal: Terminal::Token(idx),
                    span: start..end,
                }));
            }
        }
        Some(Err(self.unrecognized()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackEntry {
    State(usize),
    Symbol(Symbol),
}

/// Parse stack alternating state numbers and symbols, with state 0 at the bottom
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStack {
    entries: Vec<StackEntry>,
}

impl Default for ParseStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ParseStack {
    pub fn new() -> Self {
        ParseStack {
            entries: vec![StackEntry::State(0)],
        }
    }

    /// The state on top of the stack
    pub fn top_state(&self) -> Option<usize> {
        self.entries.iter().rev().find_map(|entry| match entry {
            StackEntry::State(state) => Some(*state),
            StackEntry::Symbol(_) => None,
        })
    }

    pub fn push(&mut self, symbol: Symbol, state: usize) {
        self.entries.push(StackEntry::Symbol(symbol));
        self.entries.push(StackEntry::State(state));
    }

    /// Pop the rhs of `rule` off the stack, skipping state numbers
    ///
    /// Fails if the stack runs out of symbols or the popped symbols are not the rule's rhs. The
    /// state exposed below the rhs is left on top.
    pub fn pop_rhs(&mut self, rule: &Rule, grammar: &Grammar) -> Result<(), ParseError> {
        let state = self.top_state().unwrap_or(0);
        let mut popped = Vec::with_capacity(rule.rhs.len());
        while popped.len() < rule.rhs.len() {
            match self.entries.pop() {
                Some(StackEntry::State(_)) => {}
                Some(StackEntry::Symbol(symbol)) => popped.push(symbol),
                None => {
                    return Err(ParseError::ReduceStackUnderflow {
                        rule: rule.id,
                        state,
                    })
                }
            }
        }
        popped.reverse();
        if popped != rule.rhs {
            let found: Vec<&str> = popped.iter().map(|s| grammar.symbol_name(*s)).collect();
            return Err(ParseError::RhsMismatch {
                rule: rule.id,
                found: found.concat(),
            });
        }
        match self.entries.last() {
            Some(StackEntry::State(_)) => Ok(()),
            _ => Err(ParseError::ReduceStackUnderflow {
                rule: rule.id,
                state,
            }),
        }
    }

    /// Render the stack bottom to top, e.g. `0 E 1 + 6`
    pub fn render(&self, grammar: &Grammar) -> String {
        let entries: Vec<String> = self
            .entries
            .iter()
            .map(|entry| match entry {
                StackEntry::State(state) => state.to_string(),
                StackEntry::Symbol(symbol) => grammar.symbol_name(*symbol).to_owned(),
            })
            .collect();
        entries.join(" ")
    }
}

/// Outcome of an accepted parse
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Derivation {
    /// Rules reduced by, in order: a rightmost derivation in reverse
    pub reductions: Vec<usize>,
    /// Number of shifted terminals, including a shifted `$`
    pub shifts: usize,
}

/// Shift-reduce parser driven by an action table
///
/// The parser holds no state of its own; every call to `parse` works on a fresh stack, so a
/// single table can serve any number of parses at the same time.
#[derive(Debug, Clone, Copy)]
pub struct Parser<'t> {
    table: &'t ActionTable,
}

impl<'t> Parser<'t> {
    pub fn new(table: &'t ActionTable) -> Self {
        Parser { table }
    }

    pub fn tokenize<'i>(&self, input: &'i str) -> Tokens<'t, 'i> {
        Tokens::new(self.table.grammar(), input)
    }

    /// Parse an input string over the alphabet; `$` is appended implicitly
    ///
    /// Reduction by rule 0 accepts. Conflicts have been settled when the table was built, so
    /// the outcome is deterministic for any grammar.
    pub fn parse(&self, input: &str) -> Result<Derivation, ParseError> {
        let grammar = self.table.grammar();
        let mut tokens = self.tokenize(input);
        let mut stack = ParseStack::new();
        let mut derivation = Derivation::default();
        let mut token = next_token(&mut tokens, input)?;

        loop {
            let state = stack.top_state().unwrap_or(0);
            let symbol = Symbol::Terminal(token.terminal);
            let action = match self.table.entry(state, symbol) {
                Some(action) => action,
                None => {
                    lr1_trace!(
                        "reject: no entry for state {} on {} [{}]",
                        state,
                        grammar.terminal_name(token.terminal),
                        stack.render(grammar)
                    );
                    return Err(ParseError::MissingTableEntry {
                        state,
                        token: grammar.terminal_name(token.terminal).to_owned(),
                        consumed: input[..token.span.start].to_owned(),
                    });
                }
            };

            match action {
                Action::Shift(next) => {
                    stack.push(symbol, next);
                    derivation.shifts += 1;
                    lr1_trace!("shift {} [{}]", grammar.symbol_name(symbol), stack.render(grammar));
                    // The end marker is never consumed
                    if token.terminal != Terminal::End {
                        token = next_token(&mut tokens, input)?;
                    }
                }
                Action::Reduce(0) => {
                    lr1_trace!("accept [{}]", stack.render(grammar));
                    return Ok(derivation);
                }
                Action::Reduce(rule_idx) => {
                    let rule = &grammar.rules()[rule_idx];
                    stack.pop_rhs(rule, grammar)?;
                    let exposed = stack.top_state().unwrap_or(0);
                    let lhs = Symbol::Nonterminal(rule.lhs);
                    match self.table.entry(exposed, lhs) {
                        Some(Action::Goto(target)) => stack.push(lhs, target),
                        _ => {
                            return Err(ParseError::MissingGoto {
                                state: exposed,
                                nonterminal: grammar.nonterminal_name(rule.lhs).to_owned(),
                            })
                        }
                    }
                    derivation.reductions.push(rule_idx);
                    lr1_trace!("reduce by {} [{}]", rule.text, stack.render(grammar));
                }
                Action::Goto(_) => {
                    return Err(ParseError::GotoOnTerminal {
                        state,
                        token: grammar.terminal_name(token.terminal).to_owned(),
                    })
                }
            }
        }
    }

    /// Whether the input is accepted
    pub fn accepts(&self, input: &str) -> bool {
        self.parse(input).is_ok()
    }
}

fn next_token(tokens: &mut Tokens, input: &str) -> Result<Token, ParseError> {
    // The tokenizer yields `$` before it runs dry
    tokens.next().unwrap_or_else(|| {
        Ok(Token {
            terminal: Terminal::End,
            span: input.len()..input.len(),
        })
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Automaton;
    use matches::assert_matches;
    use pretty_assertions::assert_eq;

    fn expression_table() -> ActionTable {
        let grammar = Grammar::build(
            vec!["+", "*", "(", ")", "id"],
            &["S->E$", "E->E+T", "E->T", "T->T*F", "T->F", "F->(E)", "F->id"],
        )
        .unwrap();
        ActionTable::build(Automaton::build(grammar))
    }

    #[test]
    fn test_tokenize() {
        let table = expression_table();
        let parser = Parser::new(&table);
        let names: Vec<String> = parser
            .tokenize("id+(id)")
            .map(|t| table.grammar().terminal_name(t.unwrap().terminal).to_owned())
            .collect();
        assert_eq!(names, vec!["id", "+", "(", "id", ")", "$"]);

        let mut tokens = parser.tokenize("id*");
        assert_eq!(tokens.next().unwrap().unwrap().span, 0..2);
        assert_eq!(tokens.next().unwrap().unwrap().span, 2..3);
        assert_eq!(tokens.next().unwrap().unwrap().terminal, Terminal::End);
        assert!(tokens.next().is_none());
    }

    #[test]
    fn test_tokenize_unrecognized() {
        let table = expression_table();
        let parser = Parser::new(&table);
        let mut tokens = parser.tokenize("id+i");
        assert!(tokens.next().unwrap().is_ok());
        assert!(tokens.next().unwrap().is_ok());
        assert_matches!(
            tokens.next(),
            Some(Err(ParseError::UnrecognizedSymbol { offset: 3, .. }))
        );
        assert!(tokens.next().is_none());

        let mut tokens = parser.tokenize("$id");
        assert_matches!(
            tokens.next(),
            Some(Err(ParseError::UnrecognizedSymbol { offset: 0, .. }))
        );
    }

    #[test]
    fn test_parse() {
        let table = expression_table();
        let parser = Parser::new(&table);
        let derivation = parser.parse("id+id*id").unwrap();
        assert_eq!(derivation.reductions, vec![6, 4, 2, 6, 4, 6, 3, 1]);
        // id + id * id and the end marker
        assert_eq!(derivation.shifts, 6);
        assert_eq!(parser.parse("id").unwrap().reductions, vec![6, 4, 2]);
        assert!(parser.accepts("(id)*id"));
    }

    #[test]
    fn test_reject() {
        let table = expression_table();
        let parser = Parser::new(&table);
        assert_eq!(
            parser.parse("id+"),
            Err(ParseError::MissingTableEntry {
                state: 6,
                token: "$".to_owned(),
                consumed: "id+".to_owned(),
            })
        );
        assert_matches!(
            parser.parse("(id"),
            Err(ParseError::MissingTableEntry { state: 13, ref consumed, .. }) if consumed == "(id"
        );
        assert_matches!(
            parser.parse(""),
            Err(ParseError::MissingTableEntry { state: 0, .. })
        );
        assert_matches!(
            parser.parse("id+x"),
            Err(ParseError::UnrecognizedSymbol { offset: 3, .. })
        );
        assert!(!parser.parse("id id").unwrap_err().is_internal());
    }

    #[test]
    fn test_stack_invariants() {
        let table = expression_table();
        let grammar = table.grammar();
        let id = grammar.symbol("id").unwrap();
        let plus = grammar.symbol("+").unwrap();

        let mut stack = ParseStack::new();
        assert_matches!(
            stack.pop_rhs(&grammar.rules()[6], grammar),
            Err(ParseError::ReduceStackUnderflow { rule: 6, state: 0 })
        );

        let mut stack = ParseStack::new();
        stack.push(plus, 6);
        let err = stack.pop_rhs(&grammar.rules()[6], grammar).unwrap_err();
        assert_eq!(
            err,
            ParseError::RhsMismatch {
                rule: 6,
                found: "+".to_owned()
            }
        );
        assert!(err.is_internal());

        let mut stack = ParseStack::new();
        stack.push(id, 5);
        assert_eq!(stack.render(grammar), "0 id 5");
        assert_eq!(stack.top_state(), Some(5));
        stack.pop_rhs(&grammar.rules()[6], grammar).unwrap();
        assert_eq!(stack, ParseStack::new());
    }
}
