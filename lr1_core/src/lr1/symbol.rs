/// Name of the end marker terminal. It is never part of the alphabet.
pub const END_MARKER: &str = "$";

/// A terminal: either an index into the grammar's alphabet or the end marker `$`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Terminal {
    Token(usize),
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    Terminal(Terminal),
    /// Index into the grammar's nonterminal set
    Nonterminal(usize),
}

impl Symbol {
    pub fn is_terminal(self) -> bool {
        match self {
            Symbol::Terminal(_) => true,
            Symbol::Nonterminal(_) => false,
        }
    }
}

impl From<Terminal> for Symbol {
    fn from(t: Terminal) -> Self {
        Symbol::Terminal(t)
    }
}
