//! Compute gate statistics on networks

use std::fmt;

use crate::{Gate, Network};

/// Number of inputs, outputs and gates in a network
#[derive(Clone, Copy, Debug)]
pub struct NetworkStats {
    /// Number of inputs
    pub nb_inputs: usize,
    /// Number of outputs
    pub nb_outputs: usize,
    /// Number of And2
    pub nb_and: usize,
    /// Number of Xor2
    pub nb_xor: usize,
    /// Number of gates with an explicit weight
    pub nb_weighted: usize,
}

impl NetworkStats {
    /// Total number of gates
    pub fn nb_gates(&self) -> usize {
        self.nb_and + self.nb_xor
    }
}

impl fmt::Display for NetworkStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Stats:")?;
        writeln!(f, "  Inputs: {}", self.nb_inputs)?;
        writeln!(f, "  Outputs: {}", self.nb_outputs)?;
        writeln!(f, "  Gates: {}", self.nb_gates())?;
        if self.nb_and != 0 {
            writeln!(f, "  And2: {}", self.nb_and)?;
        }
        if self.nb_xor != 0 {
            writeln!(f, "  Xor2: {}", self.nb_xor)?;
        }
        if self.nb_weighted != 0 {
            writeln!(f, "  Weighted: {}", self.nb_weighted)?;
        }
        fmt::Result::Ok(())
    }
}

/// Compute the statistics of the network
pub fn stats(a: &Network) -> NetworkStats {
    let mut ret = NetworkStats {
        nb_inputs: a.nb_inputs(),
        nb_outputs: a.nb_outputs(),
        nb_and: 0,
        nb_xor: 0,
        nb_weighted: 0,
    };
    for i in 0..a.nb_nodes() {
        match a.gate(i) {
            Gate::And(_, _) => ret.nb_and += 1,
            Gate::Xor(_, _) => ret.nb_xor += 1,
        }
        if a.has_weights() && a.gate_weight(i) != 1 {
            ret.nb_weighted += 1;
        }
    }
    ret
}

#[cfg(test)]
mod tests {
    use super::stats;
    use crate::Network;

    #[test]
    fn test_stats() {
        let mut net = Network::new();
        let i0 = net.add_input();
        let i1 = net.add_input();
        let a = net.and(i0, i1);
        let x = net.xor(a, i1);
        net.add_output(x);
        net.set_gate_weight(0, 2);

        let st = stats(&net);
        assert_eq!(st.nb_inputs, 2);
        assert_eq!(st.nb_outputs, 1);
        assert_eq!(st.nb_gates(), 2);
        assert_eq!(st.nb_and, 1);
        assert_eq!(st.nb_xor, 1);
        assert_eq!(st.nb_weighted, 1);
    }
}
