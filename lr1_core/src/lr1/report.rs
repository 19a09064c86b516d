use std::fmt;

use crate::{ActionTable, Automaton, Grammar};

/// Rendering of an empty table cell
pub const ABSENT: &str = "-";

/// One line per nonterminal: `E : {(, id}`
pub fn first_sets_report(grammar: &Grammar) -> String {
    let mut output = String::new();
    for (idx, name) in grammar.nonterminals().iter().enumerate() {
        output.push_str(&format!(
            "{} : {}\n",
            name,
            grammar.terminal_set_string(grammar.first_of(idx))
        ));
    }
    output
}

/// One line per rule: `1: E->E+T`
pub fn rules_report(grammar: &Grammar) -> String {
    let mut output = String::new();
    for rule in grammar.rules() {
        output.push_str(&format!("{}: {}\n", rule.id, rule.text));
    }
    output
}

/// All states in breadth first order, each with its items and outgoing transitions
pub fn automaton_report(automaton: &Automaton) -> String {
    let grammar = &automaton.grammar;
    let mut output = String::new();
    for (idx, state) in automaton.states.iter().enumerate() {
        output.push_str(&format!("\nState {}\n--------\n", idx));
        for item in state.items.iter() {
            output.push_str(&item.render(grammar));
            output.push('\n');
        }
        for transition in automaton.transitions_from(idx) {
            output.push_str(&format!(
                "Goes to {} on {}\n",
                transition.to,
                grammar.symbol_name(transition.symbol)
            ));
        }
    }
    output
}

/// A conflicting cell as listed below the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictRow {
    pub state: usize,
    pub symbol: String,
    pub entries: Vec<String>,
    pub chosen: String,
}

/// The action table rendered as strings
///
/// The first column holds the state number, every other column one symbol. Cells hold the
/// `Display` form of their action or `ABSENT`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableGrid {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub conflicts: Vec<ConflictRow>,
}

impl TableGrid {
    pub fn new(table: &ActionTable) -> Self {
        let grammar = table.grammar();
        let mut header = vec!["#".to_owned()];
        header.extend(
            table
                .columns()
                .iter()
                .map(|s| grammar.symbol_name(*s).to_owned()),
        );

        let rows = (0..table.state_count())
            .map(|state| {
                let mut row = vec![state.to_string()];
                row.extend(table.columns().iter().map(|symbol| {
                    table
                        .entry(state, *symbol)
                        .map_or(ABSENT.to_owned(), |a| a.to_string())
                }));
                row
            })
            .collect();

        let conflicts = table
            .conflicts()
            .iter()
            .map(|conflict| ConflictRow {
                state: conflict.state,
                symbol: conflict.symbol_name.clone(),
                entries: conflict.competing().map(|a| a.to_string()).collect(),
                chosen: conflict.chosen.to_string(),
            })
            .collect();

        TableGrid {
            header,
            rows,
            conflicts,
        }
    }

    /// Rendered cell for a state and a column of the action table
    pub fn cell(&self, state: usize, column: usize) -> Option<&str> {
        self.rows
            .get(state)
            .and_then(|row| row.get(column + 1))
            .map(String::as_str)
    }
}

impl fmt::Display for TableGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        let mut widths: Vec<usize> = self.header.iter().map(String::len).collect();
        for row in self.rows.iter() {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(cell.len());
            }
        }
        write_row(f, &self.header, &widths)?;
        for row in self.rows.iter() {
            write_row(f, row, &widths)?;
        }

        if !self.conflicts.is_empty() {
            writeln!(f)?;
            writeln!(f, "WARNING: the table has conflicts, the first entry of each cell is kept")?;
            writeln!(f, "Cell\tEntries\tChosen")?;
            for conflict in self.conflicts.iter() {
                writeln!(
                    f,
                    "{}, {}\t{}\t{}",
                    conflict.state,
                    conflict.symbol,
                    conflict.entries.join(" / "),
                    conflict.chosen
                )?;
            }
        }
        Ok(())
    }
}

fn write_row(f: &mut fmt::Formatter, row: &[String], widths: &[usize]) -> fmt::Result {
    let cells: Vec<String> = row
        .iter()
        .zip(widths.iter())
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    writeln!(f, "{}", cells.join("  ").trim_end())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Action;
    use pretty_assertions::assert_eq;

    fn table(alphabet: Vec<&str>, productions: &[&str]) -> ActionTable {
        let grammar = Grammar::build(alphabet, productions).unwrap();
        ActionTable::build(Automaton::build(grammar))
    }

    #[test]
    fn test_first_sets_report() {
        let grammar =
            Grammar::build(vec!["m", "d"], &["S->P$", "P->CC", "C->mC", "C->d"]).unwrap();
        assert_eq!(
            first_sets_report(&grammar),
            "S : {m, d}\nP : {m, d}\nC : {m, d}\n"
        );
        assert_eq!(
            rules_report(&grammar),
            "0: S->P$\n1: P->CC\n2: C->mC\n3: C->d\n"
        );
    }

    #[test]
    fn test_automaton_report() {
        let table = table(vec!["a"], &["S->A$", "A->a"]);
        let report = automaton_report(table.automaton());
        let expected = "
State 0
--------
S->.A$    {$}
A->.a    {$}
Goes to 1 on A
Goes to 2 on a

State 1
--------
S->A.$    {$}
Goes to 3 on $

State 2
--------
A->a.    {$}

State 3
--------
S->A$.    {$}
";
        assert_eq!(report, expected);
    }

    #[test]
    fn test_grid_round_trip() {
        let table = table(
            vec!["+", "*", "(", ")", "id"],
            &["S->E$", "E->E+T", "E->T", "T->T*F", "T->F", "F->(E)", "F->id"],
        );
        let grid = TableGrid::new(&table);
        assert_eq!(grid.rows.len(), table.state_count());
        let header: Vec<&str> = grid.header[1..].iter().map(String::as_str).collect();
        assert_eq!(header, vec!["S", "E", "T", "F", "+", "*", "(", ")", "id", "$"]);
        for state in 0..table.state_count() {
            for (column, symbol) in table.columns().iter().enumerate() {
                let cell = grid.cell(state, column).unwrap();
                let parsed = if cell == ABSENT {
                    None
                } else {
                    Some(cell.parse::<Action>().unwrap())
                };
                assert_eq!(parsed, table.entry(state, *symbol));
            }
        }
        assert!(grid.conflicts.is_empty());
        assert!(!grid.to_string().contains("WARNING"));
    }

    #[test]
    fn test_grid_conflicts() {
        let table = table(vec!["+", "id"], &["S->E$", "E->E+E", "E->id"]);
        let grid = TableGrid::new(&table);
        assert_eq!(
            grid.conflicts,
            vec![ConflictRow {
                state: 5,
                symbol: "+".to_owned(),
                entries: vec!["s3".to_owned(), "r1".to_owned()],
                chosen: "s3".to_owned(),
            }]
        );
        let plus = table.grammar().symbol("+").unwrap();
        assert_eq!(table.entry(5, plus), Some(Action::Shift(3)));
        assert!(grid.to_string().contains("5, +\ts3 / r1\ts3"));
    }
}
