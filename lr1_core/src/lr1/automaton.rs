use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::mem;

use crate::{Grammar, Item, State, Symbol, Terminal, TerminalSet};

/// Order in which the frontier of undiscovered states is expanded
///
/// This only affects discovery order. States are renumbered breadth first once the graph is
/// complete, so every exploration yields the same automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exploration {
    BreadthFirst,
    DepthFirst,
}

impl Default for Exploration {
    fn default() -> Self {
        Exploration::BreadthFirst
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transition {
    pub from: usize,
    pub symbol: Symbol,
    pub to: usize,
}

/// Canonical LR(1) automaton
///
/// State 0 is the closure of the start rule with lookahead `$`. States are numbered in breadth
/// first order from there and transitions are grouped by their source state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Automaton {
    pub grammar: Grammar,
    pub states: Vec<State>,
    /// Grouped by source state, in increasing order
    pub transitions: Vec<Transition>,
    edges: HashMap<(usize, Symbol), usize>,
    // transitions[offsets[s]..offsets[s + 1]] leave state s
    offsets: Vec<usize>,
}

impl Automaton {
    /// Build the canonical LR(1) collection for a grammar
    pub fn build(grammar: Grammar) -> Self {
        Self::build_with(grammar, Exploration::default())
    }

    pub fn build_with(grammar: Grammar, exploration: Exploration) -> Self {
        let (states, outgoing) = {
            let mut generator = AutomatonGenerator::new(&grammar);
            generator.generate(exploration);
            (generator.states, generator.outgoing)
        };
        let (states, transitions) = number_breadth_first(states, &outgoing);
        let edges = transitions
            .iter()
            .map(|t| ((t.from, t.symbol), t.to))
            .collect();
        let mut offsets = vec![0; states.len() + 1];
        for transition in transitions.iter() {
            offsets[transition.from + 1] += 1;
        }
        for idx in 1..offsets.len() {
            offsets[idx] += offsets[idx - 1];
        }
        Automaton {
            grammar,
            states,
            transitions,
            edges,
            offsets,
        }
    }

    pub fn state(&self, idx: usize) -> Option<&State> {
        self.states.get(idx)
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Target of the transition leaving `state` on `symbol`, if there is one
    pub fn goto(&self, state: usize, symbol: Symbol) -> Option<usize> {
        self.edges.get(&(state, symbol)).cloned()
    }

    pub fn transitions_from(&self, state: usize) -> impl Iterator<Item = &Transition> {
        let range = match (self.offsets.get(state), self.offsets.get(state + 1)) {
            (Some(&start), Some(&end)) => start..end,
            _ => 0..0,
        };
        self.transitions[range].iter()
    }
}

/// Move an item set into its closure
///
/// For every item with the dot in front of a nonterminal `N`, all rules of `N` are added with
/// the dot at the start. Their lookahead is FIRST of the symbol following `N`, or the item's own
/// lookahead if `N` is rightmost. An item is only skipped if an item with the same rule, dot
/// and lookahead set is already present.
pub fn closure(grammar: &Grammar, kernel: Vec<Item>) -> Vec<Item> {
    let mut seen = HashSet::new();
    let mut items: Vec<Item> = kernel
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect();

    let mut idx = 0;
    while idx < items.len() {
        let expansion = {
            let item = &items[idx];
            match item.next_symbol(grammar) {
                Some(Symbol::Nonterminal(n)) => {
                    let lookahead = match item.symbol_after_next(grammar) {
                        Some(symbol) => grammar.first_of_symbol(symbol),
                        None => item.lookahead.clone(),
                    };
                    Some((n, lookahead))
                }
                _ => None,
            }
        };
        if let Some((nonterminal, lookahead)) = expansion {
            for &rule in grammar.rule_ids_with_lhs(nonterminal) {
                let new_item = Item::new(rule, lookahead.clone());
                if seen.insert(new_item.clone()) {
                    items.push(new_item);
                }
            }
        }
        idx += 1;
    }
    items
}

/// Items reached from `items` by moving the dot over `symbol`, closed
///
/// Returns `None` if no item expects `symbol` next.
pub fn goto(grammar: &Grammar, items: &[Item], symbol: Symbol) -> Option<Vec<Item>> {
    let kernel: Vec<Item> = items
        .iter()
        .filter(|item| item.next_symbol(grammar) == Some(symbol))
        .map(Item::advance)
        .collect();
    if kernel.is_empty() {
        None
    } else {
        Some(closure(grammar, kernel))
    }
}

struct AutomatonGenerator<'g> {
    grammar: &'g Grammar,
    symbols: Vec<Symbol>,
    states: Vec<State>,
    /// Outgoing transitions per state, in symbol order
    outgoing: Vec<Vec<(Symbol, usize)>>,
    // Discovered states by item set; states are only ever identified by content
    index: HashMap<BTreeSet<Item>, usize>,
}

impl<'g> AutomatonGenerator<'g> {
    fn new(grammar: &'g Grammar) -> Self {
        Self {
            grammar,
            symbols: grammar.symbols(),
            states: Vec::new(),
            outgoing: Vec::new(),
            index: HashMap::new(),
        }
    }

    fn generate(&mut self, exploration: Exploration) {
        let mut lookahead = TerminalSet::new();
        lookahead.insert(Terminal::End);
        let initial = closure(self.grammar, vec![Item::new(0, lookahead)]);
        let mut frontier = VecDeque::new();
        frontier.push_back(self.add_state(initial));

        loop {
            let current = match exploration {
                Exploration::BreadthFirst => frontier.pop_front(),
                Exploration::DepthFirst => frontier.pop_back(),
            };
            let current = match current {
                Some(current) => current,
                None => break,
            };
            for symbol in self.symbols.clone() {
                let items = match goto(self.grammar, &self.states[current].items, symbol) {
                    Some(items) => items,
                    None => continue,
                };
                // Check for an existing state with the same item set and use that instead of a
                // new state if possible
                let key: BTreeSet<Item> = items.iter().cloned().collect();
                let target = match self.index.get(&key) {
                    Some(&existing) => existing,
                    None => {
                        let idx = self.add_state(items);
                        frontier.push_back(idx);
                        idx
                    }
                };
                lr1_trace!(
                    "{} --{}--> {}",
                    current,
                    self.grammar.symbol_name(symbol),
                    target
                );
                self.outgoing[current].push((symbol, target));
            }
        }
    }

    fn add_state(&mut self, items: Vec<Item>) -> usize {
        let idx = self.states.len();
        self.index.insert(items.iter().cloned().collect(), idx);
        self.states.push(State::new(items, self.grammar));
        self.outgoing.push(Vec::new());
        lr1_trace!("discovered state {}", idx);
        idx
    }
}

/// Renumber states in breadth first order starting at state 0
fn number_breadth_first(
    mut states: Vec<State>,
    outgoing: &[Vec<(Symbol, usize)>],
) -> (Vec<State>, Vec<Transition>) {
    let mut numbers: Vec<Option<usize>> = vec![None; states.len()];
    let mut order = vec![0];
    let mut transitions = Vec::new();
    let mut queue = VecDeque::new();
    numbers[0] = Some(0);
    queue.push_back((0, 0));

    while let Some((old, from)) = queue.pop_front() {
        for &(symbol, target) in outgoing[old].iter() {
            let to = match numbers[target] {
                Some(to) => to,
                None => {
                    let to = order.len();
                    numbers[target] = Some(to);
                    order.push(target);
                    queue.push_back((target, to));
                    to
                }
            };
            transitions.push(Transition { from, symbol, to });
        }
    }

    let states = order
        .into_iter()
        .map(|old| mem::take(&mut states[old]))
        .collect();
    (states, transitions)
}
