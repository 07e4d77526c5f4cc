use core::fmt;

use crate::network::gates::Gate;
use crate::network::signal::Signal;

/// Representation of a combinational logic network as a Xor-And graph, used as
/// the main representation for reversible synthesis
///
/// Gates may optionally carry a positive integer weight, used as the cost of
/// computing or uncomputing the corresponding node in a reversible schedule.
#[derive(Debug, Clone, Default)]
pub struct Network {
    nb_inputs: usize,
    nodes: Vec<Gate>,
    outputs: Vec<Signal>,
    weights: Vec<u32>,
}

impl Network {
    /// Create a new network
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the number of primary inputs
    pub fn nb_inputs(&self) -> usize {
        self.nb_inputs
    }

    /// Return the number of primary outputs
    pub fn nb_outputs(&self) -> usize {
        self.outputs.len()
    }

    /// Return the number of nodes in the network
    pub fn nb_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Get the input at index i
    pub fn input(&self, i: usize) -> Signal {
        assert!(i < self.nb_inputs());
        Signal::from_input(i as u32)
    }

    /// Get the output at index i
    pub fn output(&self, i: usize) -> Signal {
        assert!(i < self.nb_outputs());
        self.outputs[i]
    }

    /// Get the variable at index i
    pub fn node(&self, i: usize) -> Signal {
        Signal::from_var(i as u32)
    }

    /// Get the gate at index i
    pub fn gate(&self, i: usize) -> &Gate {
        &self.nodes[i]
    }

    /// Add a new primary input
    pub fn add_input(&mut self) -> Signal {
        self.nb_inputs += 1;
        self.input(self.nb_inputs() - 1)
    }

    /// Add multiple primary inputs
    pub fn add_inputs(&mut self, nb: usize) {
        self.nb_inputs += nb;
    }

    /// Add a new primary output based on an existing signal
    pub fn add_output(&mut self, l: Signal) {
        self.outputs.push(l)
    }

    /// Create an And2 gate
    pub fn and(&mut self, a: Signal, b: Signal) -> Signal {
        self.add(Gate::And(a, b))
    }

    /// Create an Or2 gate, lowered to And with inverted signals
    pub fn or(&mut self, a: Signal, b: Signal) -> Signal {
        !self.and(!a, !b)
    }

    /// Create a Xor2 gate
    pub fn xor(&mut self, a: Signal, b: Signal) -> Signal {
        self.add(Gate::Xor(a, b))
    }

    /// Create an n-ary And as a tree
    pub fn and_n(&mut self, sigs: &[Signal]) -> Signal {
        if sigs.is_empty() {
            Signal::one()
        } else if sigs.len() == 1 {
            sigs[0]
        } else {
            let mut next_sigs = Vec::new();
            for i in (0..sigs.len()).step_by(2) {
                if i + 1 < sigs.len() {
                    next_sigs.push(self.and(sigs[i], sigs[i + 1]));
                } else {
                    next_sigs.push(sigs[i]);
                }
            }
            self.and_n(&next_sigs)
        }
    }

    /// Create an n-ary Or as a tree
    pub fn or_n(&mut self, sigs: &[Signal]) -> Signal {
        let ands: Vec<Signal> = sigs.iter().map(|&s| !s).collect();
        !self.and_n(&ands)
    }

    /// Create an n-ary Xor as a tree
    pub fn xor_n(&mut self, sigs: &[Signal]) -> Signal {
        if sigs.is_empty() {
            Signal::zero()
        } else if sigs.len() == 1 {
            sigs[0]
        } else {
            let mut next_sigs = Vec::new();
            for i in (0..sigs.len()).step_by(2) {
                if i + 1 < sigs.len() {
                    next_sigs.push(self.xor(sigs[i], sigs[i + 1]));
                } else {
                    next_sigs.push(sigs[i]);
                }
            }
            self.xor_n(&next_sigs)
        }
    }

    /// Add a new gate
    pub fn add(&mut self, gate: Gate) -> Signal {
        let l = Signal::from_var(self.nodes.len() as u32);
        self.nodes.push(gate);
        if !self.weights.is_empty() {
            self.weights.push(1);
        }
        l
    }

    /// Set the weight of the gate at index i
    ///
    /// Weights are positive; gates without an explicit weight default to 1.
    pub fn set_gate_weight(&mut self, i: usize, weight: u32) {
        assert!(weight > 0, "Gate weights must be positive");
        assert!(i < self.nb_nodes());
        if self.weights.is_empty() {
            self.weights = vec![1; self.nb_nodes()];
        }
        self.weights[i] = weight;
    }

    /// Get the weight of the gate at index i (1 unless set explicitly)
    pub fn gate_weight(&self, i: usize) -> u32 {
        assert!(i < self.nb_nodes());
        if self.weights.is_empty() {
            1
        } else {
            self.weights[i]
        }
    }

    /// Returns whether any gate carries an explicit weight
    pub fn has_weights(&self) -> bool {
        !self.weights.is_empty()
    }

    /// Return whether the network is topologically sorted
    pub fn is_topo_sorted(&self) -> bool {
        for (i, g) in self.nodes.iter().enumerate() {
            let ind = i as u32;
            for v in g.vars() {
                if v >= ind {
                    return false;
                }
            }
        }
        true
    }

    /// Check consistency of the datastructure
    pub fn check(&self) {
        for i in 0..self.nb_nodes() {
            for v in self.gate(i).dependencies() {
                assert!(self.is_valid(v), "Invalid signal {v}");
            }
        }
        for i in 0..self.nb_outputs() {
            let v = self.output(i);
            assert!(self.is_valid(v), "Invalid output {v}");
        }
        if !self.weights.is_empty() {
            assert_eq!(self.weights.len(), self.nb_nodes());
        }
        assert!(
            self.is_topo_sorted(),
            "The network is not topologically sorted"
        );
    }

    /// Returns whether a signal is valid (within bounds) in the network
    pub(crate) fn is_valid(&self, s: Signal) -> bool {
        if s.is_input() {
            s.input() < self.nb_inputs() as u32
        } else if s.is_var() {
            s.var() < self.nb_nodes() as u32
        } else {
            true
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Network with {} inputs, {} outputs:",
            self.nb_inputs(),
            self.nb_outputs()
        )?;
        for i in 0..self.nb_nodes() {
            writeln!(f, "\t{} = {}", self.node(i), self.gate(i))?;
        }
        for i in 0..self.nb_outputs() {
            writeln!(f, "\to{} = {}", i, self.output(i))?;
        }
        Ok(())
    }
}
