use std::fmt;

use crate::network::signal::Signal;

/// Logic gate representation
///
/// Only 2-input And and Xor gates are supported: together with signal
/// inversion they form a Xor-And graph (XAG), the representation used for
/// reversible synthesis.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Gate {
    /// 2-input And gate
    And(Signal, Signal),
    /// 2-input Xor gate
    Xor(Signal, Signal),
}

impl Gate {
    /// Obtain the two signals feeding this gate
    pub fn dependencies(&self) -> [Signal; 2] {
        use Gate::*;
        match self {
            And(a, b) | Xor(a, b) => [*a, *b],
        }
    }

    /// Obtain all internal variables feeding this gate (not inputs or constants)
    pub fn vars(&self) -> Vec<u32> {
        self.dependencies()
            .iter()
            .filter(|s| s.is_var())
            .map(|s| s.var())
            .collect()
    }

    /// Returns whether the gate is an And
    pub fn is_and(&self) -> bool {
        matches!(self, Gate::And(_, _))
    }

    /// Returns whether the gate is a Xor
    pub fn is_xor(&self) -> bool {
        matches!(self, Gate::Xor(_, _))
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Gate::*;
        match self {
            And(a, b) => write!(f, "And({a}, {b})"),
            Xor(a, b) => write!(f, "Xor({a}, {b})"),
        }
    }
}
