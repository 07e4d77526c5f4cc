//! Iterative search for a reversible schedule
//!
//! The search grows the time horizon one step at a time until the encoding
//! becomes satisfiable, and wraps that inner loop in an outer loop adjusting
//! the pebble budget: on failure the budget can be raised and the search
//! retried, or on success lowered to look for a tighter schedule.

use kdam::{tqdm, Bar, BarExt};

use crate::pebbling::encoder::PebbleEncoder;
use crate::pebbling::schedule::Schedule;
use crate::pebbling::view::PebbleView;
use crate::sat::{CadicalSolver, SatResult, SatSolver};

/// Parameters for the pebbling search
#[derive(Debug, Clone)]
pub struct PebblingParams {
    /// Show progress bar
    pub progress: bool,
    /// Maximum number of pebbles to use (0 means no limit)
    pub pebble_limit: usize,
    /// Conflict limit for the SAT solver (0 means no limit)
    pub conflict_limit: u32,
    /// Increment the pebble limit if a failure occurs
    pub increment_on_failure: bool,
    /// Decrement the pebble limit if satisfiable
    pub decrement_on_success: bool,
    /// Maximum number of steps allowed
    pub max_steps: usize,
    /// Maximum total action weight (0 means no limit)
    pub max_weight: usize,
}

impl Default for PebblingParams {
    fn default() -> Self {
        PebblingParams {
            progress: false,
            pebble_limit: 0,
            conflict_limit: 0,
            increment_on_failure: false,
            decrement_on_success: false,
            max_steps: 1000,
            max_weight: 0,
        }
    }
}

/// Grow the horizon until the encoding is satisfiable or the search gives up
///
/// Gives up when the solver's conflict budget runs out or the step cap is hit.
fn run_to_horizon<N: PebbleView, S: SatSolver>(
    encoder: &mut PebbleEncoder<N, S>,
    max_steps: usize,
    bar: &mut Bar,
) -> SatResult {
    encoder.init();
    loop {
        if encoder.current_step() >= max_steps {
            return SatResult::Unknown;
        }
        encoder.add_step();
        bar.update_to(encoder.current_step()).unwrap();
        let result = encoder.solve();
        if result != SatResult::Unsat {
            return result;
        }
    }
}

/// Compute a reversible schedule for the network within the pebble budget
///
/// Returns the actions of the last successful search and the pebble limit
/// they were found under (which differs from the starting limit when the
/// limit is incremented or decremented), or None when no satisfiable horizon
/// was found under the given parameters. Each budget is tried on a fresh
/// solver, since the budget constraints are baked into the permanent clauses.
pub fn pebble_schedule<N: PebbleView>(
    net: &N,
    params: &PebblingParams,
) -> Option<(Schedule, usize)> {
    assert!(
        !params.increment_on_failure || !params.decrement_on_success,
        "Cannot both increment and decrement the pebble limit"
    );

    let mut limit = params.pebble_limit;
    let mut best = None;
    loop {
        let solver = CadicalSolver::with_conflict_limit(params.conflict_limit);
        let mut encoder = PebbleEncoder::new(net, limit, params.max_weight, solver);
        let mut bar = tqdm!(total = params.max_steps, disable = !params.progress);
        bar.set_description(format!("Pebbling with {limit} pebbles"));

        match run_to_horizon(&mut encoder, params.max_steps, &mut bar) {
            SatResult::Unknown => {
                if params.increment_on_failure {
                    limit += 1;
                    continue;
                }
                if !params.decrement_on_success {
                    return None;
                }
            }
            SatResult::Sat => {
                best = Some((encoder.extract_result(), limit));
                if params.decrement_on_success && limit > 1 {
                    limit -= 1;
                    continue;
                }
            }
            SatResult::Unsat => unreachable!("The inner search never ends on unsat"),
        }
        return best;
    }
}
