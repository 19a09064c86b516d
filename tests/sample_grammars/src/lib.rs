#![cfg(test)]

use std::sync::Arc;
use std::thread;

use lr1_core::report::TableGrid;
use lr1_core::{
    Action, ActionTable, Automaton, ConflictPolicy, Exploration, ParseError, Parser, TableError,
};
use matches::assert_matches;
use pretty_assertions::assert_eq;
use test_utils::{AMBIGUOUS_SUM, DOUBLE_T, EXPRESSION, MD, SPLIT_LOOKAHEAD};

fn reductions(table: &ActionTable, input: &str) -> Vec<usize> {
    Parser::new(table).parse(input).unwrap().reductions
}

fn missing_entry(table: &ActionTable, input: &str) -> (usize, String, String) {
    match Parser::new(table).parse(input) {
        Err(ParseError::MissingTableEntry {
            state,
            token,
            consumed,
        }) => (state, token, consumed),
        other => panic!("expected a missing table entry for {:?}, got {:?}", input, other),
    }
}

#[test]
fn test_expression_accepts() {
    let table = EXPRESSION.table();
    assert_eq!(table.state_count(), 23);
    assert!(!table.has_conflicts());

    let derivation = Parser::new(&table).parse("(id+id)*id").unwrap();
    assert_eq!(derivation.reductions, vec![6, 4, 2, 6, 4, 1, 5, 4, 6, 3, 2]);
    // Every terminal plus the end marker
    assert_eq!(derivation.shifts, 8);
    assert_eq!(reductions(&table, "id*(id)"), vec![6, 4, 6, 4, 2, 5, 3, 2]);
    assert_eq!(reductions(&table, "((id))"), vec![6, 4, 2, 5, 4, 2, 5, 4, 2]);
}

#[test]
fn test_expression_rejects() {
    let table = EXPRESSION.table();
    assert_eq!(
        missing_entry(&table, "id+*id"),
        (6, "*".to_owned(), "id+".to_owned())
    );
    assert_eq!(missing_entry(&table, "()"), (4, ")".to_owned(), "(".to_owned()));
    assert_eq!(missing_entry(&table, "id)"), (5, ")".to_owned(), "id".to_owned()));
    assert!(!Parser::new(&table).accepts(""));
}

#[test]
fn test_md_grammar() {
    let table = MD.table();
    assert_eq!(table.state_count(), 11);
    assert!(!table.has_conflicts());
    assert_eq!(reductions(&table, "dd"), vec![3, 3, 1]);
    assert_eq!(reductions(&table, "mdmmd"), vec![3, 2, 3, 2, 2, 1]);
    assert_eq!(reductions(&table, "mmmdd"), vec![3, 2, 2, 2, 3, 1]);
    assert_eq!(missing_entry(&table, "md"), (4, "$".to_owned(), "md".to_owned()));
}

#[test]
fn test_ambiguous_sum_shifts() {
    let table = AMBIGUOUS_SUM.table();
    assert_eq!(table.state_count(), 6);
    assert_eq!(table.conflicts().len(), 1);
    // Shifting makes `+` right associative
    assert_eq!(reductions(&table, "id+id+id"), vec![2, 2, 2, 1, 1]);
    assert_eq!(reductions(&table, "id"), vec![2]);
    assert_eq!(missing_entry(&table, "id+"), (3, "$".to_owned(), "id+".to_owned()));

    let result = ActionTable::build_with(AMBIGUOUS_SUM.automaton(), ConflictPolicy::Fail);
    assert_matches!(result, Err(TableError::Conflict(ref c)) if c.state == 5 && c.symbol_name == "+");
}

#[test]
fn test_split_lookahead() {
    let automaton = SPLIT_LOOKAHEAD.automaton();
    assert_eq!(automaton.state_count(), 15);
    let table = ActionTable::build_with(automaton, ConflictPolicy::Fail).unwrap();
    assert_eq!(reductions(&table, "acd"), vec![5, 1]);
    assert_eq!(reductions(&table, "ace"), vec![6, 3]);
    assert_eq!(reductions(&table, "bcd"), vec![6, 2]);
    assert_eq!(reductions(&table, "bce"), vec![5, 4]);
    assert_eq!(missing_entry(&table, "acc"), (7, "c".to_owned(), "ac".to_owned()));
}

#[test]
fn test_first_action_wins() {
    let table = DOUBLE_T.table();
    assert_eq!(table.state_count(), 7);
    let conflict = &table.conflicts()[0];
    assert_eq!((conflict.state, conflict.symbol_name.as_str()), (3, "t"));
    assert_matches!(conflict.chosen, Action::Shift(_));
    assert_eq!(conflict.discarded, vec![Action::Reduce(2)]);

    // `tt` would need the discarded reduction
    assert_eq!(missing_entry(&table, "tt"), (6, "$".to_owned(), "tt".to_owned()));
    assert_eq!(missing_entry(&table, "t"), (3, "$".to_owned(), "t".to_owned()));
    assert_eq!(reductions(&table, "ttt"), vec![3, 1]);
}

#[test]
fn test_exploration_order_is_irrelevant() {
    for sample in &[EXPRESSION, MD, AMBIGUOUS_SUM, SPLIT_LOOKAHEAD, DOUBLE_T] {
        let breadth_first = Automaton::build_with(sample.grammar(), Exploration::BreadthFirst);
        let depth_first = Automaton::build_with(sample.grammar(), Exploration::DepthFirst);
        assert_eq!(
            TableGrid::new(&ActionTable::build(breadth_first)),
            TableGrid::new(&ActionTable::build(depth_first))
        );
    }
}

#[test]
fn test_concurrent_parses() {
    let table = Arc::new(EXPRESSION.table());
    let inputs = vec!["id", "id+id", "(id)*id", "id+", "((id)", "id*id*id"];
    let handles: Vec<_> = inputs
        .iter()
        .map(|input| {
            let table = Arc::clone(&table);
            let input = input.to_string();
            thread::spawn(move || Parser::new(&table).accepts(&input))
        })
        .collect();
    let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec![true, true, true, false, false, true]);
}
