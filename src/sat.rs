use varisat::{ExtendFormula, Lit, Solver};

use crate::hitman::prelude::*;

/// Minimal seam to the propositional solver: a clause list and a variable
/// count go in, a satisfiability verdict comes out. Queries are
/// self-contained; implementations hold no state between calls.
pub trait SatSolver {
    fn satisfiable(&self, clauses: &[Clause], num_vars: usize) -> Result<bool>;
}

/// The embedded CDCL backend.
#[derive(Clone, Copy, Debug, Default)]
pub struct VarisatSolver;

impl SatSolver for VarisatSolver {
    fn satisfiable(&self, clauses: &[Clause], _num_vars: usize) -> Result<bool> {
        let mut solver = Solver::new();
        for clause in clauses {
            let lits: Vec<Lit> = clause.iter().map(|&l| Lit::from_dimacs(l as isize)).collect();
            solver.add_clause(&lits);
        }
        solver
            .solve()
            .map_err(|e| anyhow!("sat solver failure: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::{SatSolver, VarisatSolver};

    #[test]
    fn verdicts_on_tiny_formulas() {
        let solver = VarisatSolver;
        assert!(solver.satisfiable(&[vec![1, 2], vec![-1]], 2).unwrap());
        assert!(!solver.satisfiable(&[vec![1], vec![-1]], 1).unwrap());
        assert!(solver.satisfiable(&[], 0).unwrap());
    }
}
