use std::error::Error;
use std::process;

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};

mod graphviz;
mod load;
mod parse;
mod table;

fn main() {
    if let Err(err) = cli() {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}

fn file_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("file")
        .help("Grammar file with a `terminals:` line and one production per line")
        .required(true)
}

fn strict_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("strict")
        .long("--strict")
        .help("Fail instead of keeping the first action when the table has conflicts")
}

fn cli() -> Result<(), Box<dyn Error>> {
    let matches = App::new("lr1_cli")
        .about("Tool for inspecting canonical LR(1) parsers generated from a grammar file")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand(
            SubCommand::with_name("first")
                .arg(file_arg())
                .about("Prints the numbered rules and the FIRST set of every nonterminal"),
        ).subcommand(
            SubCommand::with_name("automaton")
                .arg(file_arg())
                .about("Prints the LR(1) states with their items and transitions"),
        ).subcommand(
            SubCommand::with_name("table")
                .arg(file_arg())
                .arg(
                    Arg::with_name("csv")
                        .long("--csv")
                        .takes_value(true)
                        .help("Write the action table to a specified CSV file"),
                ).arg(
                    Arg::with_name("plain")
                        .long("--plain")
                        .help("Print the bare action table without item closures"),
                ).arg(strict_arg())
                .about("Prints the action table and its conflicts"),
        ).subcommand(
            SubCommand::with_name("graph")
                .arg(file_arg())
                .arg(
                    Arg::with_name("output")
                        .long("--output")
                        .short("-o")
                        .takes_value(true)
                        .help("Write the generated graphviz graph to a file (*.dot)"),
                ).about("Outputs a graphviz graph showing the LR(1) states"),
        ).subcommand(
            SubCommand::with_name("parse")
                .arg(file_arg())
                .arg(
                    Arg::with_name("input")
                        .help("Strings over the alphabet to parse")
                        .multiple(true)
                        .required(true),
                ).arg(
                    Arg::with_name("derivation")
                        .long("--derivation")
                        .short("-d")
                        .help("Print the rules reduced by for accepted strings"),
                ).arg(strict_arg())
                .about("Parses strings with the generated parser and reports acceptance"),
        ).setting(AppSettings::ArgRequiredElseHelp)
        .get_matches();

    match matches.subcommand() {
        ("first", Some(opts)) => parse::print_first_sets(required(opts, "file")?),
        ("automaton", Some(opts)) => parse::print_automaton(required(opts, "file")?),
        ("table", Some(opts)) => {
            let filename = required(opts, "file")?;
            let strict = opts.is_present("strict");
            if let Some(csv_filename) = opts.value_of("csv") {
                table::write_table_csv(filename, strict, csv_filename)
            } else if opts.is_present("plain") {
                table::print_grid(filename, strict)
            } else {
                table::print_table(filename, strict)
            }
        }
        ("graph", Some(opts)) => {
            let filename = required(opts, "file")?;
            if let Some(output_filename) = opts.value_of("output") {
                graphviz::write_graphviz_graph(filename, output_filename)
            } else {
                graphviz::show_graphviz_graph(filename)
            }
        }
        ("parse", Some(opts)) => {
            let inputs: Vec<&str> = opts.values_of("input").map_or(Vec::new(), |v| v.collect());
            parse::parse_inputs(
                required(opts, "file")?,
                &inputs,
                opts.is_present("strict"),
                opts.is_present("derivation"),
            )
        }
        _ => Ok(()),
    }
}

fn required<'a>(opts: &'a ArgMatches, name: &str) -> Result<&'a str, Box<dyn Error>> {
    opts.value_of(name)
        .ok_or_else(|| format!("missing argument <{}>", name).into())
}
