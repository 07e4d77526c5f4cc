//! Clausal encoding of at-most-k cardinality constraints
//!
//! Uses the sequential counter encoding: auxiliary variables track, for each
//! prefix of the literal list, whether at least j of its literals are true.
//! Repeated literals are allowed, which makes the same encoding usable for
//! small weighted sums by listing each literal once per unit of weight.

use crate::sat::{Lit, SatSolver};

/// Constrain at most `bound` of `lits` to be true
///
/// If a guard literal is given, it is appended to every emitted clause: the
/// constraint is then only enforced while the guard's complement is assumed,
/// and can be retired for good by adding the guard as a unit clause.
pub fn encode_atmost<S: SatSolver>(solver: &mut S, lits: &[Lit], bound: usize, guard: Option<Lit>) {
    /// Emit a clause, with the guard literal appended when present
    fn emit<S: SatSolver>(solver: &mut S, guard: Option<Lit>, c: &[Lit]) {
        let mut clause = c.to_vec();
        if let Some(g) = guard {
            clause.push(g);
        }
        solver.add_clause(&clause);
    }

    if bound >= lits.len() {
        return;
    }
    if bound == 0 {
        for l in lits {
            emit(solver, guard, &[-l]);
        }
        return;
    }

    let n = lits.len();
    let k = bound;
    // count[i][j]: at least j+1 of the first i+1 literals are true
    let mut count = Vec::new();
    for _ in 0..n - 1 {
        let row: Vec<Lit> = (0..k).map(|_| solver.new_var()).collect();
        count.push(row);
    }

    emit(solver, guard, &[-lits[0], count[0][0]]);
    for j in 1..k {
        emit(solver, guard, &[-count[0][j]]);
    }
    for i in 1..n - 1 {
        emit(solver, guard, &[-lits[i], count[i][0]]);
        emit(solver, guard, &[-count[i - 1][0], count[i][0]]);
        for j in 1..k {
            emit(solver, guard, &[-lits[i], -count[i - 1][j - 1], count[i][j]]);
            emit(solver, guard, &[-count[i - 1][j], count[i][j]]);
        }
        emit(solver, guard, &[-lits[i], -count[i - 1][k - 1]]);
    }
    emit(solver, guard, &[-lits[n - 1], -count[n - 2][k - 1]]);
}

#[cfg(test)]
mod tests {
    use super::encode_atmost;
    use crate::sat::{CadicalSolver, SatResult, SatSolver};

    fn fresh_vars(solver: &mut CadicalSolver, n: usize) -> Vec<i32> {
        (0..n).map(|_| solver.new_var()).collect()
    }

    #[test]
    fn test_atmost_basic() {
        let mut solver = CadicalSolver::new();
        let xs = fresh_vars(&mut solver, 4);
        solver.add_atmost(&xs, 2);
        // Two true literals fit the bound
        assert_eq!(solver.solve(&[xs[0], xs[1]]), SatResult::Sat);
        // Three do not
        assert_eq!(solver.solve(&[xs[0], xs[1], xs[2]]), SatResult::Unsat);
    }

    #[test]
    fn test_atmost_zero() {
        let mut solver = CadicalSolver::new();
        let xs = fresh_vars(&mut solver, 3);
        solver.add_atmost(&xs, 0);
        assert_eq!(solver.solve(&[]), SatResult::Sat);
        assert_eq!(solver.solve(&[xs[1]]), SatResult::Unsat);
    }

    #[test]
    fn test_atmost_trivial() {
        let mut solver = CadicalSolver::new();
        let xs = fresh_vars(&mut solver, 3);
        // Bound above the number of literals: no constraint at all
        solver.add_atmost(&xs, 3);
        assert_eq!(solver.solve(&xs), SatResult::Sat);
    }

    #[test]
    fn test_atmost_duplicated() {
        let mut solver = CadicalSolver::new();
        let xs = fresh_vars(&mut solver, 2);
        // x0 counts twice: setting it alone exhausts a bound of 2
        let weighted = [xs[0], xs[0], xs[1]];
        solver.add_atmost(&weighted, 2);
        assert_eq!(solver.solve(&[xs[0]]), SatResult::Sat);
        assert_eq!(solver.solve(&[xs[0], xs[1]]), SatResult::Unsat);
        assert_eq!(solver.solve(&[xs[1]]), SatResult::Sat);
    }

    #[test]
    fn test_atmost_guarded() {
        let mut solver = CadicalSolver::new();
        let xs = fresh_vars(&mut solver, 3);
        let en = solver.new_var();
        encode_atmost(&mut solver, &xs, 1, Some(-en));
        // Enforced while the guard is assumed
        assert_eq!(solver.solve(&[en, xs[0], xs[1]]), SatResult::Unsat);
        // Retired by the unit clause
        solver.add_clause(&[-en]);
        assert_eq!(solver.solve(&[xs[0], xs[1], xs[2]]), SatResult::Sat);
    }
}
