use std::collections::BTreeSet;

use crate::{Grammar, Item};

/// A closure-complete set of items
///
/// Items are kept in the order the closure produced them (kernel items first). Equality is set
/// equality of the items, regardless of that order.
#[derive(Debug, Clone, Default)]
pub struct State {
    pub items: Vec<Item>,
    /// Whether any item has its dot at the end
    pub reduce: bool,
}

impl State {
    pub fn new(items: Vec<Item>, grammar: &Grammar) -> Self {
        let reduce = items.iter().any(|item| item.is_pos_at_end(grammar));
        State { items, reduce }
    }

    pub fn is_reduce_state(&self) -> bool {
        self.reduce
    }

    pub fn item_set(&self) -> BTreeSet<Item> {
        self.items.iter().cloned().collect()
    }
}

impl PartialEq for State {
    fn eq(&self, other: &State) -> bool {
        self.items.len() == other.items.len() && self.item_set() == other.item_set()
    }
}

impl Eq for State {}
