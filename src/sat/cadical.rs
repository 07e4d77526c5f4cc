//! Binding of the solver interface to CaDiCaL

use cat_solver::Solver;

use crate::sat::{Lit, SatResult, SatSolver};

/// Incremental SAT solving through the CaDiCaL bindings
pub struct CadicalSolver {
    solver: Solver,
    nb_vars: i32,
    conflict_limit: u32,
}

impl CadicalSolver {
    /// Create a solver with no conflict budget
    pub fn new() -> Self {
        Self::with_conflict_limit(0)
    }

    /// Create a solver giving up after the given number of conflicts per call (0 for no limit)
    pub fn with_conflict_limit(conflict_limit: u32) -> Self {
        CadicalSolver {
            solver: Solver::new(),
            nb_vars: 0,
            conflict_limit,
        }
    }
}

impl Default for CadicalSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SatSolver for CadicalSolver {
    fn new_var(&mut self) -> Lit {
        self.nb_vars += 1;
        self.nb_vars
    }

    fn add_clause(&mut self, lits: &[Lit]) {
        self.solver.add_clause(lits.iter().copied());
    }

    fn solve(&mut self, assumptions: &[Lit]) -> SatResult {
        if self.conflict_limit != 0 {
            // Limits are consumed by each call and must be re-armed
            let _ = self.solver.set_limit("conflicts", self.conflict_limit);
        }
        match self.solver.solve_with(assumptions.iter().copied()) {
            Some(true) => SatResult::Sat,
            Some(false) => SatResult::Unsat,
            None => SatResult::Unknown,
        }
    }

    fn value(&self, lit: Lit) -> bool {
        self.solver.value(lit).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::CadicalSolver;
    use crate::sat::{SatResult, SatSolver};

    #[test]
    fn test_solve() {
        let mut solver = CadicalSolver::new();
        let a = solver.new_var();
        let b = solver.new_var();
        solver.add_clause(&[a, b]);
        solver.add_clause(&[-a, b]);
        assert_eq!(solver.solve(&[]), SatResult::Sat);
        assert!(solver.value(b));
        assert_eq!(solver.solve(&[-b]), SatResult::Unsat);
        // The clause database survives a failed call
        assert_eq!(solver.solve(&[a]), SatResult::Sat);
        assert!(solver.value(a));
        assert!(solver.value(b));
    }

    #[test]
    fn test_empty() {
        let mut solver = CadicalSolver::new();
        assert_eq!(solver.solve(&[]), SatResult::Sat);
    }
}
