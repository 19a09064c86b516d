use std::collections::HashMap;

use crate::{Action, Automaton, Grammar, Symbol, TableError};

/// What to do when two different actions are proposed for the same cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// The first action written into a cell stays; later ones go to the conflict log
    FirstWins,
    /// Refuse to build a table with conflicts
    Fail,
}

impl Default for ConflictPolicy {
    fn default() -> Self {
        ConflictPolicy::FirstWins
    }
}

/// All actions proposed for one cell of the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub state: usize,
    pub symbol: Symbol,
    pub symbol_name: String,
    /// The action that was written first and stays in the table
    pub chosen: Action,
    /// Later actions, in the order they were proposed
    pub discarded: Vec<Action>,
}

impl Conflict {
    /// All competing actions, the chosen one first
    pub fn competing(&self) -> impl Iterator<Item = Action> + '_ {
        std::iter::once(self.chosen).chain(self.discarded.iter().cloned())
    }

    pub fn describe(&self) -> String {
        let actions: Vec<String> = self.competing().map(|a| a.to_string()).collect();
        format!("{} (chose {})", actions.join(" / "), self.chosen)
    }
}

/// Dense action table: one row per state, one column per symbol
///
/// Columns are ordered like `Grammar::symbols`: nonterminals, the alphabet, then `$`.
#[derive(Debug, Clone)]
pub struct ActionTable {
    automaton: Automaton,
    columns: Vec<Symbol>,
    column_index: HashMap<Symbol, usize>,
    cells: Vec<Option<Action>>,
    conflicts: Vec<Conflict>,
}

impl ActionTable {
    /// Build the table, resolving conflicts in favour of the first action
    pub fn build(automaton: Automaton) -> Self {
        ActionTableGenerator::new(automaton).generate()
    }

    /// Build the table with an explicit conflict policy
    ///
    /// With `ConflictPolicy::Fail`, the first conflict encountered is returned as an error.
    pub fn build_with(automaton: Automaton, policy: ConflictPolicy) -> Result<Self, TableError> {
        let table = Self::build(automaton);
        match (policy, table.conflicts.first()) {
            (ConflictPolicy::Fail, Some(conflict)) => Err(TableError::Conflict(conflict.clone())),
            _ => Ok(table),
        }
    }

    /// The authoritative action for a cell; `None` means a syntax error
    pub fn entry(&self, state: usize, symbol: Symbol) -> Option<Action> {
        let column = *self.column_index.get(&symbol)?;
        if state >= self.state_count() {
            return None;
        }
        self.cells[state * self.columns.len() + column]
    }

    pub fn entry_by_name(&self, state: usize, symbol: &str) -> Option<Action> {
        self.entry(state, self.grammar().symbol(symbol)?)
    }

    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }

    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }

    pub fn columns(&self) -> &[Symbol] {
        &self.columns
    }

    pub fn state_count(&self) -> usize {
        self.automaton.state_count()
    }

    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    pub fn grammar(&self) -> &Grammar {
        &self.automaton.grammar
    }
}

struct ActionTableGenerator {
    table: ActionTable,
    // Position of a cell's entry in the conflict log
    conflict_index: HashMap<(usize, usize), usize>,
}

impl ActionTableGenerator {
    fn new(automaton: Automaton) -> Self {
        let columns = automaton.grammar.symbols();
        let column_index = columns.iter().enumerate().map(|(i, s)| (*s, i)).collect();
        let cells = vec![None; automaton.state_count() * columns.len()];
        Self {
            table: ActionTable {
                automaton,
                columns,
                column_index,
                cells,
                conflicts: Vec::new(),
            },
            conflict_index: HashMap::new(),
        }
    }

    fn generate(mut self) -> ActionTable {
        let mut proposals = Vec::new();
        for (state_idx, state) in self.table.automaton.states.iter().enumerate() {
            // Shift and goto actions
            for transition in self.table.automaton.transitions_from(state_idx) {
                let action = if transition.symbol.is_terminal() {
                    Action::Shift(transition.to)
                } else {
                    Action::Goto(transition.to)
                };
                proposals.push((state_idx, transition.symbol, action));
            }

            // Reduce actions for every item with the dot at the end
            if state.is_reduce_state() {
                for item in state.items.iter() {
                    if item.is_pos_at_end(&self.table.automaton.grammar) {
                        for terminal in item.lookahead.iter() {
                            proposals.push((
                                state_idx,
                                Symbol::Terminal(*terminal),
                                Action::Reduce(item.rule),
                            ));
                        }
                    }
                }
            }
        }

        for (state, symbol, action) in proposals {
            self.set_entry(state, symbol, action);
        }
        self.table
    }

    fn set_entry(&mut self, state: usize, symbol: Symbol, action: Action) {
        let column = self.table.column_index[&symbol];
        let cell = state * self.table.columns.len() + column;
        let existing = match self.table.cells[cell] {
            None => {
                self.table.cells[cell] = Some(action);
                return;
            }
            Some(existing) => existing,
        };
        // The same reduction proposed by items that only differ in lookahead does not compete
        if existing == action {
            return;
        }

        lr1_trace!(
            "conflict in state {} on {}: keeping {}, discarding {}",
            state,
            self.table.grammar().symbol_name(symbol),
            existing,
            action
        );
        match self.conflict_index.get(&(state, column)) {
            Some(&idx) => {
                let conflict = &mut self.table.conflicts[idx];
                if !conflict.discarded.contains(&action) {
                    conflict.discarded.push(action);
                }
            }
            None => {
                self.conflict_index
                    .insert((state, column), self.table.conflicts.len());
                let symbol_name = self.table.grammar().symbol_name(symbol).to_owned();
                self.table.conflicts.push(Conflict {
                    state,
                    symbol,
                    symbol_name,
                    chosen: existing,
                    discarded: vec![action],
                });
            }
        }
    }
}
