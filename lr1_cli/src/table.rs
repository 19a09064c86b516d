use std::error::Error;
use std::fs::File;

use prettytable as pt;
use prettytable::cell;
use prettytable::row;

use lr1_core::report::{TableGrid, ABSENT};
use lr1_core::ActionTable;

use crate::load;

pub fn print_table(input_filename: &str, strict: bool) -> Result<(), Box<dyn Error>> {
    let action_table = load::generate_action_table(input_filename, strict)?;
    let pretty_table = generate_pretty_table(&action_table);
    println!("{}", pretty_table);
    print_conflicts(&action_table);
    Ok(())
}

/// Prints the aligned text grid without item closures
pub fn print_grid(input_filename: &str, strict: bool) -> Result<(), Box<dyn Error>> {
    let action_table = load::generate_action_table(input_filename, strict)?;
    print!("{}", TableGrid::new(&action_table));
    Ok(())
}

pub fn write_table_csv(
    input_filename: &str,
    strict: bool,
    csv_filename: &str,
) -> Result<(), Box<dyn Error>> {
    let action_table = load::generate_action_table(input_filename, strict)?;
    let pretty_table = generate_pretty_table(&action_table);
    let csv_file = File::create(csv_filename)?;
    pretty_table.to_csv(csv_file)?;
    print_conflicts(&action_table);
    Ok(())
}

fn print_conflicts(action_table: &ActionTable) {
    if !action_table.has_conflicts() {
        return;
    }
    let mut table = pt::Table::new();
    table.add_row(row!["Cell", "Entries", "Chosen"]);
    for conflict in TableGrid::new(action_table).conflicts {
        table.add_row(row![
            format!("{}, {}", conflict.state, conflict.symbol),
            conflict.entries.join(" / "),
            conflict.chosen
        ]);
    }
    eprintln!("WARNING: the table has conflicts, the first entry of each cell is kept");
    eprintln!("{}", table);
}

fn generate_pretty_table(action_table: &ActionTable) -> pt::Table {
    let grammar = action_table.grammar();
    let grid = TableGrid::new(action_table);
    let mut table = pt::Table::new();

    let mut title_row = row!["#", "LR(1) item closure", "Lookahead"];
    for symbol in grid.header.iter().skip(1) {
        title_row.add_cell(cell!(symbol));
    }
    table.add_row(title_row);

    for (i, state) in action_table.automaton().states.iter().enumerate() {
        let (items, lookaheads): (Vec<_>, Vec<_>) = state
            .items
            .iter()
            .map(|item| {
                (
                    item.augmented_rule_string(grammar),
                    item.lookahead_string(grammar),
                )
            }).unzip();

        let mut row = row![i, items.join("\n"), lookaheads.join("\n")];
        for column in 0..action_table.columns().len() {
            let entry = grid.cell(i, column).filter(|c| *c != ABSENT).unwrap_or("");
            row.add_cell(cell![entry]);
        }
        table.add_row(row);
    }

    table
}
