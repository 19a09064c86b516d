use std::error::Error;
use std::fs;
use std::io::Write;
use tempfile::NamedTempFile;

use lr1_core::Automaton;

use crate::load;

pub fn write_graphviz_graph(
    input_filename: &str,
    output_filename: &str,
) -> Result<(), Box<dyn Error>> {
    let automaton = load::generate_automaton(input_filename)?;
    let graphviz_string = render_graphviz_graph(&automaton);
    fs::write(output_filename, graphviz_string)?;
    Ok(())
}

pub fn show_graphviz_graph(filename: &str) -> Result<(), Box<dyn Error>> {
    let automaton = load::generate_automaton(filename)?;
    let graphviz_string = render_graphviz_graph(&automaton);
    // We need the tempfile filename in order to open it with an associated application
    let mut temp_file = NamedTempFile::new()?;
    let path = format!("{}.dot", temp_file.path().display());
    write!(temp_file, "{}", graphviz_string)?;
    temp_file.persist(&path)?;
    open::that(&path)?;
    Ok(())
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_label(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

fn render_graphviz_graph(automaton: &Automaton) -> String {
    let grammar = &automaton.grammar;
    let mut lines = Vec::new();
    lines.push("digraph lr1_states {".to_owned());
    for (state_idx, state) in automaton.states.iter().enumerate() {
        // Create graphviz box with table for the state
        let table_rows: Vec<String> = state
            .items
            .iter()
            .map(|item| {
                let mut la_string = escape_html(&item.lookahead_string(grammar));
                if item.is_pos_at_end(grammar) {
                    // Use underline to mark a reduce action
                    la_string = format!("<U>{}</U>", la_string);
                }
                format!(
                    "      <TR><TD>{}</TD><TD>{}</TD></TR>",
                    escape_html(&item.augmented_rule_string(grammar)),
                    la_string
                )
            }).collect();
        let table_row_string = table_rows.join("\n");
        let table_head = format!(
            "      <TR><TD><B>State #{}</B></TD><TD><B>Lookahead</B></TD></TR>",
            state_idx
        );
        let line = format!(
            r#"  State{} [shape=plain label=<
    <TABLE BORDER="0" CELLBORDER="1" CELLSPACING="0">
{}
{}
    </TABLE>
  >];"#,
            state_idx, table_head, table_row_string
        );
        lines.push(line);
        // Create state transitions, shifts and gotos alike
        for transition in automaton.transitions_from(state_idx) {
            lines.push(format!(
                r#"  State{} -> State{} [label="{}"];"#,
                state_idx,
                transition.to,
                escape_label(grammar.symbol_name(transition.symbol))
            ))
        }
    }
    lines.push("}".to_owned());
    lines.join("\n")
}
