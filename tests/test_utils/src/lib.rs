use lr1_core::{ActionTable, Automaton, Grammar};

/// A grammar given as its alphabet and productions
pub struct Sample {
    pub alphabet: &'static [&'static str],
    pub productions: &'static [&'static str],
}

impl Sample {
    pub fn grammar(&self) -> Grammar {
        Grammar::build(self.alphabet.iter().cloned(), self.productions)
            .expect("sample grammars are well-formed")
    }

    pub fn automaton(&self) -> Automaton {
        Automaton::build(self.grammar())
    }

    pub fn table(&self) -> ActionTable {
        ActionTable::build(self.automaton())
    }
}

/// Sums and products over identifiers with parentheses
pub const EXPRESSION: Sample = Sample {
    alphabet: &["+", "*", "(", ")", "id"],
    productions: &[
        "S->E$", "E->E+T", "E->T", "T->T*F", "T->F", "F->(E)", "F->id",
    ],
};

/// Two `C`s, each a run of `m`s closed by a `d`
pub const MD: Sample = Sample {
    alphabet: &["m", "d"],
    productions: &["S->P$", "P->CC", "C->mC", "C->d"],
};

/// Ambiguous sums; shifting on `+` wins the conflict
pub const AMBIGUOUS_SUM: Sample = Sample {
    alphabet: &["+", "id"],
    productions: &["S->E$", "E->E+E", "E->id"],
};

/// LR(1) but not LALR(1)
pub const SPLIT_LOOKAHEAD: Sample = Sample {
    alphabet: &["a", "b", "c", "d", "e"],
    productions: &[
        "S->X$", "X->aAd", "X->bBd", "X->aBe", "X->bAe", "A->c", "B->c",
    ],
};

/// `T->t` and `T->tt` compete on the second `t`
pub const DOUBLE_T: Sample = Sample {
    alphabet: &["t"],
    productions: &["S->R$", "R->Tt", "T->t", "T->tt"],
};
