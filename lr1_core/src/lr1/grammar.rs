use std::collections::{BTreeSet, VecDeque};

use indexmap::IndexSet;

use crate::{GrammarError, Rule, Symbol, Terminal, END_MARKER};

/// Set of terminals, as used for FIRST sets and lookaheads
///
/// Using BTreeSet here, as it implements Hash and Ord
pub type TerminalSet = BTreeSet<Terminal>;

/// A context free grammar over string symbols
///
/// Built once from an alphabet and a list of `LHS->RHS` production strings, then frozen. The
/// lhs of the first production is the start symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    alphabet: IndexSet<String>,
    nonterminals: IndexSet<String>,
    rules: Vec<Rule>,
    rules_by_lhs: Vec<Vec<usize>>,
    first_sets: Vec<TerminalSet>,
}

impl Grammar {
    /// Build a grammar from an alphabet of terminals and production strings
    ///
    /// Duplicate terminals are ignored. Every rhs has to be segmentable, left to right, into
    /// terminals, nonterminals and the end marker `$` (which may only close the start production).
    /// A lhs can neither be `$` nor a terminal of the alphabet.
    ///
    /// ```
    /// # use lr1_core::Grammar;
    /// let grammar = Grammar::build(vec!["a", "b"], &["S->P$", "P->aP", "P->b"]).unwrap();
    /// assert!(grammar.is_nonterminal("P"));
    /// assert_eq!(grammar.rule_count(), 3);
    /// ```
    pub fn build<A, S, P>(alphabet: A, productions: &[P]) -> Result<Self, GrammarError>
    where
        A: IntoIterator<Item = S>,
        S: Into<String>,
        P: AsRef<str>,
    {
        let alphabet: IndexSet<String> = alphabet
            .into_iter()
            .map(Into::into)
            .filter(|t| !t.is_empty())
            .collect();
        if alphabet.contains(END_MARKER) {
            return Err(GrammarError::ReservedTerminal);
        }
        if productions.is_empty() {
            return Err(GrammarError::NoProductions);
        }

        // Nonterminals have to be known before any rhs can be segmented
        let mut split = Vec::with_capacity(productions.len());
        let mut nonterminals = IndexSet::new();
        for production in productions.iter().map(AsRef::as_ref) {
            let (lhs, rhs) = split_production(production)?;
            if lhs == END_MARKER {
                return Err(GrammarError::ReservedNonterminal {
                    production: production.to_owned(),
                });
            }
            if alphabet.contains(lhs) {
                return Err(GrammarError::TerminalAsNonterminal {
                    name: lhs.to_owned(),
                });
            }
            let (lhs, _) = nonterminals.insert_full(lhs.to_owned());
            split.push((production, lhs, rhs));
        }

        let mut grammar = Grammar {
            alphabet,
            nonterminals,
            rules: Vec::with_capacity(split.len()),
            rules_by_lhs: Vec::new(),
            first_sets: Vec::new(),
        };

        for (id, (production, lhs, rhs)) in split.into_iter().enumerate() {
            let rhs = grammar.segment(production, rhs)?;
            let end_pos = rhs.iter().position(|s| *s == Symbol::Terminal(Terminal::End));
            if let Some(pos) = end_pos {
                if id != 0 || pos + 1 != rhs.len() {
                    return Err(GrammarError::MisplacedEndMarker {
                        production: production.to_owned(),
                    });
                }
            }
            if id != 0 && lhs == 0 {
                return Err(GrammarError::DuplicateStartRule {
                    nonterminal: grammar.nonterminals[0].clone(),
                    rule: id,
                });
            }
            grammar.rules.push(Rule {
                id,
                lhs,
                rhs,
                text: production.to_owned(),
            });
        }

        grammar.rules_by_lhs = vec![Vec::new(); grammar.nonterminals.len()];
        for rule in grammar.rules.iter() {
            grammar.rules_by_lhs[rule.lhs].push(rule.id);
        }
        grammar.first_sets = grammar.compute_first_sets();
        Ok(grammar)
    }

    /// Split an rhs into symbols using greedy longest match
    fn segment(&self, production: &str, rhs: &str) -> Result<Vec<Symbol>, GrammarError> {
        let mut symbols = Vec::new();
        let mut offset = 0;
        while offset < rhs.len() {
            let rest = &rhs[offset..];
            let mut best: Option<(usize, Symbol)> = None;
            let candidates = self
                .nonterminals
                .iter()
                .enumerate()
                .map(|(idx, name)| (name.as_str(), Symbol::Nonterminal(idx)))
                .chain(
                    self.alphabet
                        .iter()
                        .enumerate()
                        .map(|(idx, name)| (name.as_str(), Symbol::Terminal(Terminal::Token(idx)))),
                )
                .chain(std::iter::once((END_MARKER, Symbol::Terminal(Terminal::End))));
            for (name, symbol) in candidates {
                // Ties go to the candidate seen first, i.e. nonterminals win over terminals
                let longer = best.map_or(true, |(len, _)| name.len() > len);
                if longer && rest.starts_with(name) {
                    best = Some((name.len(), symbol));
                }
            }
            match best {
                Some((len, symbol)) => {
                    symbols.push(symbol);
                    offset += len;
                }
                None => {
                    return Err(GrammarError::UnknownSymbol {
                        production: production.to_owned(),
                        offset,
                    })
                }
            }
        }
        Ok(symbols)
    }

    /// Compute the FIRST sets of all nonterminals
    ///
    /// Worklist fixpoint: a nonterminal is recomputed whenever the FIRST set of a nonterminal
    /// starting one of its rules grew. Rules are assumed not to derive the empty string, so only
    /// the leftmost rhs symbol is considered.
    fn compute_first_sets(&self) -> Vec<TerminalSet> {
        let count = self.nonterminals.len();
        let mut first_sets = vec![TerminalSet::new(); count];

        // dependents[b] holds all a with a rule a -> b ...
        let mut dependents = vec![BTreeSet::new(); count];
        for rule in self.rules.iter() {
            if let Some(Symbol::Nonterminal(n)) = rule.rhs.first() {
                dependents[*n].insert(rule.lhs);
            }
        }

        let mut worklist: VecDeque<usize> = (0..count).collect();
        let mut queued = vec![true; count];
        let mut passes = 0;
        while let Some(nonterminal) = worklist.pop_front() {
            queued[nonterminal] = false;
            passes += 1;
            let mut first = first_sets[nonterminal].clone();
            for &rule_idx in self.rules_by_lhs[nonterminal].iter() {
                match self.rules[rule_idx].rhs[0] {
                    Symbol::Terminal(t) => {
                        first.insert(t);
                    }
                    Symbol::Nonterminal(n) => {
                        first.extend(first_sets[n].iter().cloned());
                    }
                }
            }
            if first.len() != first_sets[nonterminal].len() {
                first_sets[nonterminal] = first;
                for &dependent in dependents[nonterminal].iter() {
                    if !queued[dependent] {
                        queued[dependent] = true;
                        worklist.push_back(dependent);
                    }
                }
            }
        }
        lr1_trace!("FIRST sets reached a fixpoint after {} visits", passes);
        first_sets
    }

    /// FIRST set of a nonterminal, empty for unknown names
    pub fn first_set(&self, nonterminal: &str) -> TerminalSet {
        self.nonterminals
            .get_index_of(nonterminal)
            .map(|idx| self.first_sets[idx].clone())
            .unwrap_or_default()
    }

    /// FIRST set of a nonterminal by index
    pub fn first_of(&self, nonterminal: usize) -> &TerminalSet {
        &self.first_sets[nonterminal]
    }

    /// FIRST set of a single symbol; a terminal's FIRST set is the terminal itself
    pub fn first_of_symbol(&self, symbol: Symbol) -> TerminalSet {
        match symbol {
            Symbol::Terminal(t) => {
                let mut set = TerminalSet::new();
                set.insert(t);
                set
            }
            Symbol::Nonterminal(n) => self.first_sets[n].clone(),
        }
    }

    /// Rules with the given lhs, in declaration order
    pub fn rules_with_lhs<'g>(&'g self, nonterminal: &str) -> impl Iterator<Item = &'g Rule> + 'g {
        let ids: &[usize] = match self.nonterminals.get_index_of(nonterminal) {
            Some(idx) => &self.rules_by_lhs[idx],
            None => &[],
        };
        ids.iter().map(move |&id| &self.rules[id])
    }

    pub(crate) fn rule_ids_with_lhs(&self, nonterminal: usize) -> &[usize] {
        &self.rules_by_lhs[nonterminal]
    }

    pub fn is_nonterminal(&self, symbol: &str) -> bool {
        self.nonterminals.contains(symbol)
    }

    pub fn alphabet(&self) -> &IndexSet<String> {
        &self.alphabet
    }

    pub fn nonterminals(&self) -> &IndexSet<String> {
        &self.nonterminals
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn rule(&self, id: usize) -> Option<&Rule> {
        self.rules.get(id)
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn start_rule(&self) -> &Rule {
        &self.rules[0]
    }

    /// All terminals including the end marker, in alphabet order
    pub fn terminals(&self) -> impl Iterator<Item = Terminal> {
        (0..self.alphabet.len())
            .map(Terminal::Token)
            .chain(std::iter::once(Terminal::End))
    }

    /// All symbols: nonterminals, then the alphabet, then the end marker
    pub fn symbols(&self) -> Vec<Symbol> {
        (0..self.nonterminals.len())
            .map(Symbol::Nonterminal)
            .chain(self.terminals().map(Symbol::Terminal))
            .collect()
    }

    /// Look up a terminal of the alphabet (or `$`) by name
    pub fn terminal(&self, name: &str) -> Option<Terminal> {
        if name == END_MARKER {
            return Some(Terminal::End);
        }
        self.alphabet.get_index_of(name).map(Terminal::Token)
    }

    /// Look up any symbol by name, preferring nonterminals
    pub fn symbol(&self, name: &str) -> Option<Symbol> {
        match self.nonterminals.get_index_of(name) {
            Some(idx) => Some(Symbol::Nonterminal(idx)),
            None => self.terminal(name).map(Symbol::Terminal),
        }
    }

    pub fn terminal_name(&self, terminal: Terminal) -> &str {
        match terminal {
            Terminal::Token(idx) => &self.alphabet[idx],
            Terminal::End => END_MARKER,
        }
    }

    pub fn nonterminal_name(&self, nonterminal: usize) -> &str {
        &self.nonterminals[nonterminal]
    }

    pub fn symbol_name(&self, symbol: Symbol) -> &str {
        match symbol {
            Symbol::Terminal(t) => self.terminal_name(t),
            Symbol::Nonterminal(n) => self.nonterminal_name(n),
        }
    }

    /// Render a terminal set as `{a, b, $}`
    pub fn terminal_set_string(&self, set: &TerminalSet) -> String {
        let names: Vec<&str> = set.iter().map(|t| self.terminal_name(*t)).collect();
        format!("{{{}}}", names.join(", "))
    }
}

fn split_production(production: &str) -> Result<(&str, &str), GrammarError> {
    let idx = production
        .find("->")
        .ok_or_else(|| GrammarError::MissingSeparator {
            production: production.to_owned(),
        })?;
    let lhs = production[..idx].trim();
    let rhs = production[idx + 2..].trim();
    if lhs.is_empty() {
        return Err(GrammarError::EmptyLhs {
            production: production.to_owned(),
        });
    }
    if rhs.is_empty() {
        return Err(GrammarError::EmptyRhs {
            production: production.to_owned(),
        });
    }
    Ok((lhs, rhs))
}
