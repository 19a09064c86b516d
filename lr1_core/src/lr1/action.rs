use std::fmt;
use std::str::FromStr;

use crate::InvalidAction;

/// Entry of the action table
///
/// There is no separate accept action: reducing by rule 0 accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Shift(usize),
    Goto(usize),
    Reduce(usize),
}

impl Action {
    pub fn is_accept(self) -> bool {
        self == Action::Reduce(0)
    }
}

/// Rendered as type and target, e.g. `s4`, `g2`, `r1`
impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            Action::Shift(state) => write!(f, "s{}", state),
            Action::Goto(state) => write!(f, "g{}", state),
            Action::Reduce(rule) => write!(f, "r{}", rule),
        }
    }
}

impl FromStr for Action {
    type Err = InvalidAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidAction(s.to_owned());
        let mut chars = s.chars();
        let kind = chars.next().ok_or_else(invalid)?;
        let target: usize = chars.as_str().parse().map_err(|_| invalid())?;
        match kind {
            's' => Ok(Action::Shift(target)),
            'g' => Ok(Action::Goto(target)),
            'r' => Ok(Action::Reduce(target)),
            _ => Err(invalid()),
        }
    }
}
