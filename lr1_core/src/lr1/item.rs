use crate::{Grammar, Rule, Symbol, TerminalSet};

/// LR(1) item
///
/// Two items are only equal if rule, dot position and the whole lookahead set match. Items
/// sharing a core but differing in their lookahead are kept apart.
#[derive(Eq, PartialEq, Ord, PartialOrd, Hash, Clone, Debug)]
pub struct Item {
    pub rule: usize,
    /// Position of the dot in the rule's rhs, in `0..=rhs.len()`
    pub dot: usize,
    pub lookahead: TerminalSet,
}

impl Item {
    pub fn new(rule: usize, lookahead: TerminalSet) -> Self {
        Item {
            rule,
            dot: 0,
            lookahead,
        }
    }

    /// The same item with the dot moved over the next symbol
    pub fn advance(&self) -> Self {
        Item {
            rule: self.rule,
            dot: self.dot + 1,
            lookahead: self.lookahead.clone(),
        }
    }

    pub fn next_symbol(&self, grammar: &Grammar) -> Option<Symbol> {
        self.rule_of(grammar).rhs.get(self.dot).cloned()
    }

    /// The symbol following the next symbol, which decides the lookahead of expansions
    pub fn symbol_after_next(&self, grammar: &Grammar) -> Option<Symbol> {
        self.rule_of(grammar).rhs.get(self.dot + 1).cloned()
    }

    pub fn is_pos_at_end(&self, grammar: &Grammar) -> bool {
        self.dot >= self.rule_of(grammar).rhs.len()
    }

    fn rule_of<'g>(&self, grammar: &'g Grammar) -> &'g Rule {
        &grammar.rules()[self.rule]
    }

    /// The rule with the dot rendered inline, e.g. `E->E.+T`
    pub fn augmented_rule_string(&self, grammar: &Grammar) -> String {
        let rule = self.rule_of(grammar);
        let mut result = format!("{}->", grammar.nonterminal_name(rule.lhs));
        for (p, symbol) in rule.rhs.iter().enumerate() {
            if p == self.dot {
                result.push('.');
            }
            result.push_str(grammar.symbol_name(*symbol));
        }
        if self.dot == rule.rhs.len() {
            result.push('.');
        }
        result
    }

    pub fn lookahead_string(&self, grammar: &Grammar) -> String {
        grammar.terminal_set_string(&self.lookahead)
    }

    pub fn render(&self, grammar: &Grammar) -> String {
        format!(
            "{}    {}",
            self.augmented_rule_string(grammar),
            self.lookahead_string(grammar)
        )
    }
}
