#![cfg(test)]

use lr1_core::{ParseError, Parser, Terminal};
use matches::assert_matches;
use test_utils::{Sample, EXPRESSION};

#[test]
fn test_unknown_terminals() {
    let table = EXPRESSION.table();
    let parser = Parser::new(&table);
    assert_matches!(
        parser.parse("idx"),
        Err(ParseError::UnrecognizedSymbol { offset: 2, ref consumed }) if consumed == "id"
    );
    assert_matches!(
        parser.parse("i"),
        Err(ParseError::UnrecognizedSymbol { offset: 0, .. })
    );
    assert_matches!(
        parser.parse("id + id"),
        Err(ParseError::UnrecognizedSymbol { offset: 2, .. })
    );
}

#[test]
fn test_end_marker_in_input() {
    let table = EXPRESSION.table();
    let parser = Parser::new(&table);
    assert_matches!(
        parser.parse("id$"),
        Err(ParseError::UnrecognizedSymbol { offset: 2, .. })
    );
    assert_matches!(
        parser.parse("$"),
        Err(ParseError::UnrecognizedSymbol { offset: 0, .. })
    );
}

#[test]
fn test_tokenizer_is_lazy() {
    let table = EXPRESSION.table();
    let parser = Parser::new(&table);
    // The syntax error comes before the unknown symbol is ever looked at
    assert_matches!(
        parser.parse("+x"),
        Err(ParseError::MissingTableEntry { state: 0, ref token, .. }) if token == "+"
    );
}

#[test]
fn test_shortest_prefix_wins() {
    let sample = Sample {
        alphabet: &["a", "ab", "b"],
        productions: &["S->L$", "L->abL", "L->b"],
    };
    let grammar = sample.grammar();
    let table = sample.table();
    let parser = Parser::new(&table);
    let terminals: Vec<Terminal> = parser
        .tokenize("abb")
        .map(|token| token.unwrap().terminal)
        .collect();
    assert_eq!(
        terminals,
        vec![
            grammar.terminal("a").unwrap(),
            grammar.terminal("b").unwrap(),
            grammar.terminal("b").unwrap(),
            Terminal::End
        ]
    );
    // Rules segment `ab` as one terminal, the tokenizer never produces it
    assert_eq!(grammar.rules()[1].rhs.len(), 2);
    assert!(!parser.accepts("abb"));
    assert!(parser.accepts("b"));
}
