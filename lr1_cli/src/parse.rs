use std::error::Error;

use lr1_core::report;
use lr1_core::{Derivation, Grammar, ParseError, Parser};

use crate::load;

pub fn print_first_sets(filename: &str) -> Result<(), Box<dyn Error>> {
    let grammar = load::load_grammar(filename)?;
    println!("Rules\n-----");
    print!("{}", report::rules_report(&grammar));
    println!("\nFIRST sets\n----------");
    print!("{}", report::first_sets_report(&grammar));
    Ok(())
}

pub fn print_automaton(filename: &str) -> Result<(), Box<dyn Error>> {
    let automaton = load::generate_automaton(filename)?;
    print!("{}", report::automaton_report(&automaton));
    Ok(())
}

pub fn parse_inputs(
    filename: &str,
    inputs: &[&str],
    strict: bool,
    show_derivation: bool,
) -> Result<(), Box<dyn Error>> {
    let table = load::generate_action_table(filename, strict)?;
    let parser = Parser::new(&table);
    for input in inputs {
        println!("{}", describe_outcome(table.grammar(), input, &parser.parse(input), show_derivation));
    }
    Ok(())
}

fn describe_outcome(
    grammar: &Grammar,
    input: &str,
    outcome: &Result<Derivation, ParseError>,
    show_derivation: bool,
) -> String {
    match outcome {
        Ok(derivation) => {
            let mut output = format!("{}: ACCEPTED", input);
            if show_derivation {
                for rule in derivation
                    .reductions
                    .iter()
                    .filter_map(|id| grammar.rule(*id))
                {
                    output.push_str(&format!("\n  {}: {}", rule.id, rule.text));
                }
            }
            output
        }
        Err(err) => format!("{}: REJECTED ({})", input, err),
    }
}
