//! Reversible schedules: ordered compute and uncompute actions

use crate::pebbling::view::PebbleView;

/// Kind of action applied to a node of the schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// Pebble the node, computing its value into an ancilla
    Compute,
    /// Remove the pebble, recovering the ancilla
    Uncompute,
}

/// Ordered list of pebbling actions as (node id, kind) pairs
///
/// Within one solver time step, uncompute actions come before compute actions,
/// so that replaying the list never claims a pebble before a freed one is
/// available.
pub type Schedule = Vec<(u32, ActionKind)>;

/// Total action weight of a schedule
pub fn schedule_weight<N: PebbleView>(net: &N, schedule: &Schedule) -> u64 {
    schedule
        .iter()
        .map(|(node, _)| net.gate_weight(*node) as u64)
        .sum()
}

/// Largest number of pebbles simultaneously in use while replaying a schedule
pub fn peak_pebbles<N: PebbleView>(net: &N, schedule: &Schedule) -> usize {
    let offset = net.gate_offset();
    let mut pebbled = vec![false; net.nb_gates()];
    let mut nb_pebbled = 0usize;
    let mut peak = 0usize;
    for (node, kind) in schedule {
        let var = (*node - offset) as usize;
        match kind {
            ActionKind::Compute => {
                assert!(!pebbled[var]);
                pebbled[var] = true;
                nb_pebbled += 1;
            }
            ActionKind::Uncompute => {
                assert!(pebbled[var]);
                pebbled[var] = false;
                nb_pebbled -= 1;
            }
        }
        peak = peak.max(nb_pebbled);
    }
    peak
}

/// Replay a schedule and check that it is a legal pebbling of the network
///
/// Panics if an action breaks the rules of the game: computing a pebbled node
/// or uncomputing a clear one, touching a node whose gate fan-ins are not all
/// pebbled, exceeding the pebble limit (when nonzero), or ending with any
/// pebble besides the primary outputs.
pub fn check_schedule<N: PebbleView>(net: &N, schedule: &Schedule, pebble_limit: usize) {
    let offset = net.gate_offset();
    let nb_gates = net.nb_gates();
    let mut pebbled = vec![false; nb_gates];
    let mut nb_pebbled = 0usize;

    for (node, kind) in schedule {
        assert!(
            *node >= offset && *node < offset + nb_gates as u32,
            "Action on node {node}, which is not a gate"
        );
        let var = (*node - offset) as usize;
        let mut fanins_ok = true;
        net.foreach_fanin(*node, |child| {
            if child >= offset {
                fanins_ok &= pebbled[(child - offset) as usize];
            }
        });
        assert!(fanins_ok, "Action on node {node} with an unpebbled fan-in");
        match kind {
            ActionKind::Compute => {
                assert!(!pebbled[var], "Node {node} is already pebbled");
                pebbled[var] = true;
                nb_pebbled += 1;
            }
            ActionKind::Uncompute => {
                assert!(pebbled[var], "Node {node} is not pebbled");
                pebbled[var] = false;
                nb_pebbled -= 1;
            }
        }
        if pebble_limit > 0 {
            assert!(
                nb_pebbled <= pebble_limit,
                "More than {pebble_limit} pebbles in use"
            );
        }
    }

    let outputs = net.output_nodes();
    for var in 0..nb_gates {
        let node = offset + var as u32;
        let is_output = outputs.contains(&node);
        assert_eq!(
            pebbled[var], is_output,
            "Node {node} ends the schedule in the wrong state"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{check_schedule, peak_pebbles, schedule_weight, ActionKind::*};
    use crate::Network;

    fn chain() -> Network {
        let mut net = Network::new();
        let i0 = net.add_input();
        let i1 = net.add_input();
        let i2 = net.add_input();
        let a = net.and(i0, i1);
        let b = net.and(a, i2);
        net.add_output(b);
        net
    }

    #[test]
    fn test_legal() {
        let net = chain();
        check_schedule(&net, &vec![(4, Compute), (5, Compute), (4, Uncompute)], 2);
    }

    #[test]
    #[should_panic]
    fn test_missing_fanin() {
        let net = chain();
        check_schedule(&net, &vec![(5, Compute)], 0);
    }

    #[test]
    #[should_panic]
    fn test_leftover_pebble() {
        let net = chain();
        check_schedule(&net, &vec![(4, Compute), (5, Compute)], 0);
    }

    #[test]
    #[should_panic]
    fn test_limit_exceeded() {
        let net = chain();
        check_schedule(&net, &vec![(4, Compute), (5, Compute), (4, Uncompute)], 1);
    }

    #[test]
    fn test_peak() {
        let net = chain();
        let schedule = vec![(4, Compute), (5, Compute), (4, Uncompute)];
        assert_eq!(peak_pebbles(&net, &schedule), 2);
        assert_eq!(peak_pebbles(&net, &vec![]), 0);
    }

    #[test]
    fn test_weight() {
        let mut net = chain();
        net.set_gate_weight(0, 3);
        let schedule = vec![(4, Compute), (5, Compute), (4, Uncompute)];
        assert_eq!(schedule_weight(&net, &schedule), 7);
    }
}
