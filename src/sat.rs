//! Interface to incremental SAT solving
//!
//! The solver is accessed through a small capability interface, so that the
//! encoding logic never depends on a specific solver crate. Literals follow
//! the DIMACS convention: variables are positive integers and a negative
//! literal denotes the complement.

mod cadical;
pub mod cardinality;

pub use cadical::CadicalSolver;

/// A boolean literal in DIMACS convention (non-zero, negative for complement)
pub type Lit = i32;

/// Outcome of a SAT call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SatResult {
    /// A satisfying assignment was found
    Sat,
    /// The formula is unsatisfiable under the given assumptions
    Unsat,
    /// The solver gave up, typically because the conflict budget ran out
    Unknown,
}

/// Capabilities required from an incremental SAT solver
pub trait SatSolver {
    /// Allocate a fresh variable and return its positive literal
    fn new_var(&mut self) -> Lit;

    /// Add a clause over the given literals
    fn add_clause(&mut self, lits: &[Lit]);

    /// Solve under the given assumption literals
    ///
    /// Assumptions hold for this call only; clauses added so far are permanent.
    fn solve(&mut self, assumptions: &[Lit]) -> SatResult;

    /// Read the value of a literal in the model after a [`SatResult::Sat`] outcome
    ///
    /// Literals left unassigned by the solver read as false.
    fn value(&self, lit: Lit) -> bool;

    /// Constrain at most `bound` of the given literals to be true
    ///
    /// The default implementation compiles the constraint to clauses; a solver
    /// with native cardinality support may override it.
    fn add_atmost(&mut self, lits: &[Lit], bound: usize)
    where
        Self: Sized,
    {
        cardinality::encode_atmost(self, lits, bound, None);
    }
}
