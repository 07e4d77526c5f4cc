//! SAT encoding of the reversible pebbling game

use crate::pebbling::schedule::{ActionKind, Schedule};
use crate::pebbling::view::PebbleView;
use crate::sat::{cardinality, Lit, SatResult, SatSolver};

/// State and action variables for one time step
///
/// `s[i]` is true iff gate i holds a pebble at this step; `a[i]` is true iff
/// gate i is computed or uncomputed between the previous step and this one.
struct StepVars {
    s: Vec<Lit>,
    a: Vec<Lit>,
}

/// Incremental SAT encoder for the reversible pebbling game
///
/// The encoding grows one time step at a time. Transition clauses are
/// permanent; the constraints tying the last step to the primary outputs are
/// passed as assumptions, so a failed horizon can be extended and re-solved
/// on the same solver.
pub struct PebbleEncoder<'a, N: PebbleView, S: SatSolver> {
    net: &'a N,
    pebble_limit: usize,
    max_weight: usize,
    solver: S,
    steps: Vec<StepVars>,
}

impl<'a, N: PebbleView, S: SatSolver> PebbleEncoder<'a, N, S> {
    /// Create an encoder on the given network and solver
    ///
    /// A zero pebble limit leaves the number of pebbles unconstrained; a zero
    /// weight bound disables the weight constraint.
    pub fn new(net: &'a N, pebble_limit: usize, max_weight: usize, solver: S) -> Self {
        PebbleEncoder {
            net,
            pebble_limit,
            max_weight,
            solver,
            steps: Vec::new(),
        }
    }

    /// Number of time steps encoded so far
    pub fn current_step(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    fn new_step_vars(&mut self) -> StepVars {
        let nb_gates = self.net.nb_gates();
        StepVars {
            s: (0..nb_gates).map(|_| self.solver.new_var()).collect(),
            a: (0..nb_gates).map(|_| self.solver.new_var()).collect(),
        }
    }

    /// Encode the initial step, with every gate clear and no action
    pub fn init(&mut self) {
        assert!(self.steps.is_empty(), "init() must be called exactly once");
        let first = self.new_step_vars();
        for var in 0..self.net.nb_gates() {
            self.solver.add_clause(&[-first.s[var]]);
            self.solver.add_clause(&[-first.a[var]]);
        }
        self.steps.push(first);
    }

    /// Extend the horizon by one step, emitting the transition clauses
    pub fn add_step(&mut self) {
        assert!(!self.steps.is_empty(), "init() must be called first");
        let next = self.new_step_vars();
        let net = self.net;
        let offset = net.gate_offset();
        let prev = self.steps.last().unwrap();
        let solver = &mut self.solver;
        for var in 0..net.nb_gates() {
            let (sp, sn, an) = (prev.s[var], next.s[var], next.a[var]);
            // A flip is only legal with every gate fan-in pebbled on both sides
            net.foreach_fanin(offset + var as u32, |child| {
                if child >= offset {
                    let c = (child - offset) as usize;
                    for held in [prev.s[c], next.s[c]] {
                        solver.add_clause(&[sp, -sn, held]);
                        solver.add_clause(&[-sp, sn, held]);
                    }
                }
            });
            // The action variable tracks the flip exactly
            solver.add_clause(&[sp, -sn, an]);
            solver.add_clause(&[-sp, sn, an]);
            solver.add_clause(&[sp, sn, -an]);
            solver.add_clause(&[-sp, -sn, -an]);
        }
        if self.pebble_limit > 0 {
            solver.add_atmost(&next.s, self.pebble_limit);
        }
        self.steps.push(next);
    }

    /// Solve with the last step constrained to hold exactly the primary outputs
    ///
    /// The output constraints are assumptions and vanish with the call; the
    /// weight bound, when active, is guarded and retired on failure. Either
    /// way an unsatisfiable horizon leaves the solver ready for the next
    /// [`add_step`](Self::add_step).
    pub fn solve(&mut self) -> SatResult {
        assert!(
            self.current_step() >= 1,
            "add_step() must be called before solve()"
        );
        let offset = self.net.gate_offset();
        let outputs = self.net.output_nodes();
        let last = self.steps.last().unwrap();
        let mut assumptions = Vec::new();
        for var in 0..self.net.nb_gates() {
            let node = offset + var as u32;
            if outputs.contains(&node) {
                assumptions.push(last.s[var]);
            } else {
                assumptions.push(-last.s[var]);
            }
        }

        let mut guard = None;
        if self.net.has_weights() && self.max_weight > 0 {
            let mut lits = Vec::new();
            for step in &self.steps[1..] {
                for var in 0..self.net.nb_gates() {
                    let weight = self.net.gate_weight(offset + var as u32);
                    for _ in 0..weight {
                        lits.push(step.a[var]);
                    }
                }
            }
            let en = self.solver.new_var();
            cardinality::encode_atmost(&mut self.solver, &lits, self.max_weight, Some(-en));
            assumptions.push(en);
            guard = Some(en);
        }

        let result = self.solver.solve(&assumptions);
        if result == SatResult::Unsat {
            if let Some(en) = guard {
                self.solver.add_clause(&[-en]);
            }
        }
        result
    }

    /// Read the model into an ordered schedule
    ///
    /// Only valid right after a successful [`solve`](Self::solve). Within each
    /// step, uncompute actions are emitted before compute actions. A model
    /// where an action variable disagrees with the state flip indicates an
    /// encoding bug and panics.
    pub fn extract_result(&self) -> Schedule {
        let offset = self.net.gate_offset();
        let mut schedule = Schedule::new();
        for k in 0..self.steps.len() {
            let step = &self.steps[k];
            let mut actions = Vec::new();
            for var in 0..self.net.nb_gates() {
                if self.solver.value(step.a[var]) {
                    assert!(k > 0, "Action on the initial step");
                    let held_before = self.solver.value(self.steps[k - 1].s[var]);
                    let held_after = self.solver.value(step.s[var]);
                    assert!(held_before != held_after, "Action without a state flip");
                    actions.push((var as u32, held_after));
                }
            }
            // Free pebbles before claiming new ones
            actions.sort_by_key(|(_, held)| *held);
            for (var, held) in actions {
                let kind = if held {
                    ActionKind::Compute
                } else {
                    ActionKind::Uncompute
                };
                schedule.push((offset + var, kind));
            }
        }
        schedule
    }
}

#[cfg(test)]
mod tests {
    use super::PebbleEncoder;
    use crate::pebbling::schedule::ActionKind::*;
    use crate::pebbling::view::PebbleView;
    use crate::sat::{CadicalSolver, SatResult};
    use crate::Network;

    fn solve_at<N: PebbleView>(encoder: &mut PebbleEncoder<N, CadicalSolver>) -> usize {
        encoder.init();
        loop {
            encoder.add_step();
            if encoder.solve() == SatResult::Sat {
                return encoder.current_step();
            }
            assert!(encoder.current_step() < 20, "No horizon found");
        }
    }

    #[test]
    fn test_single_and() {
        let mut net = Network::new();
        let i0 = net.add_input();
        let i1 = net.add_input();
        let a = net.and(i0, i1);
        net.add_output(a);

        let mut encoder = PebbleEncoder::new(&net, 1, 0, CadicalSolver::new());
        let horizon = solve_at(&mut encoder);
        assert_eq!(horizon, 1);
        assert_eq!(encoder.extract_result(), vec![(3, Compute)]);
    }

    #[test]
    fn test_chain() {
        // Gate 5 needs gate 4 pebbled on both sides of its flips
        let mut net = Network::new();
        let i0 = net.add_input();
        let i1 = net.add_input();
        let i2 = net.add_input();
        let a = net.and(i0, i1);
        let b = net.and(a, i2);
        net.add_output(b);

        let mut encoder = PebbleEncoder::new(&net, 2, 0, CadicalSolver::new());
        let horizon = solve_at(&mut encoder);
        assert_eq!(horizon, 3);
        assert_eq!(
            encoder.extract_result(),
            vec![(4, Compute), (5, Compute), (4, Uncompute)]
        );
    }

    #[test]
    fn test_unsat_budget() {
        // The chain is infeasible with a single pebble at any horizon
        let mut net = Network::new();
        let i0 = net.add_input();
        let i1 = net.add_input();
        let i2 = net.add_input();
        let a = net.and(i0, i1);
        let b = net.and(a, i2);
        net.add_output(b);

        let mut encoder = PebbleEncoder::new(&net, 1, 0, CadicalSolver::new());
        encoder.init();
        for _ in 0..6 {
            encoder.add_step();
            assert_eq!(encoder.solve(), SatResult::Unsat);
        }
    }

    #[test]
    fn test_output_on_input() {
        let mut net = Network::new();
        let i0 = net.add_input();
        let i1 = net.add_input();
        net.and(i0, i1);
        net.add_output(i0);

        let mut encoder = PebbleEncoder::new(&net, 1, 0, CadicalSolver::new());
        let horizon = solve_at(&mut encoder);
        assert_eq!(horizon, 1);
        assert_eq!(encoder.extract_result(), vec![]);
    }

    #[test]
    fn test_weight_bound() {
        let mut net = Network::new();
        let i0 = net.add_input();
        let i1 = net.add_input();
        let a = net.and(i0, i1);
        net.add_output(a);
        net.set_gate_weight(0, 2);

        // The single compute costs 2: a bound of 1 fails at every horizon
        let mut encoder = PebbleEncoder::new(&net, 0, 1, CadicalSolver::new());
        encoder.init();
        for _ in 0..4 {
            encoder.add_step();
            assert_eq!(encoder.solve(), SatResult::Unsat);
        }

        let mut encoder = PebbleEncoder::new(&net, 0, 2, CadicalSolver::new());
        let horizon = solve_at(&mut encoder);
        assert_eq!(horizon, 1);
        assert_eq!(encoder.extract_result(), vec![(3, Compute)]);
    }

    /// A k-LUT style network: node ids leave room for an explicit zero constant
    struct LutNetwork {
        nb_pis: usize,
        fanins: Vec<Vec<u32>>,
        outputs: Vec<u32>,
    }

    impl PebbleView for LutNetwork {
        fn nb_pis(&self) -> usize {
            self.nb_pis
        }
        fn nb_gates(&self) -> usize {
            self.fanins.len()
        }
        fn gate_offset(&self) -> u32 {
            self.nb_pis as u32 + 2
        }
        fn foreach_fanin<F: FnMut(u32)>(&self, node: u32, mut f: F) {
            for child in &self.fanins[(node - self.gate_offset()) as usize] {
                f(*child);
            }
        }
        fn output_nodes(&self) -> Vec<u32> {
            self.outputs.clone()
        }
    }

    #[test]
    fn test_shifted_offset() {
        // PIs are nodes 2 and 3; the single gate is node 4
        let net = LutNetwork {
            nb_pis: 2,
            fanins: vec![vec![2, 3]],
            outputs: vec![4],
        };
        let mut encoder = PebbleEncoder::new(&net, 1, 0, CadicalSolver::new());
        let horizon = solve_at(&mut encoder);
        assert_eq!(horizon, 1);
        assert_eq!(encoder.extract_result(), vec![(4, Compute)]);
    }
}
