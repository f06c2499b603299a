use itertools::Itertools;

/// A disjunction of DIMACS-style literals; positive numbers assert the
/// variable, negative numbers its negation.
pub type Clause = Vec<i32>;

/// A conjunction of clauses.
pub type Cnf = Vec<Clause>;

/// Clauses asserting that at least `n` of `vars` are true: every
/// (|vars| - n + 1)-subset must contain a true literal.
pub fn at_least(n: usize, vars: &[i32]) -> Cnf {
    assert!(n <= vars.len(), "at_least({n}) over {} variables", vars.len());
    if n == 0 {
        return vec![];
    }
    vars.iter()
        .copied()
        .combinations(vars.len() - (n - 1))
        .collect()
}

/// Clauses asserting that at most `n` of `vars` are true: every
/// (n + 1)-subset must contain a false literal.
pub fn at_most(n: usize, vars: &[i32]) -> Cnf {
    assert!(n <= vars.len(), "at_most({n}) over {} variables", vars.len());
    if n == vars.len() {
        return vec![];
    }
    vars.iter().map(|&v| -v).combinations(n + 1).collect()
}

/// Clauses asserting that exactly `n` of `vars` are true.
pub fn exactly(n: usize, vars: &[i32]) -> Cnf {
    if vars.is_empty() {
        return vec![];
    }
    if n == 0 {
        return at_most(0, vars);
    }
    if n == vars.len() {
        return at_least(n, vars);
    }
    let mut clauses = at_most(n, vars);
    clauses.extend(at_least(n, vars));
    clauses
}

/// Clauses forbidding `a[i]` and `b[i]` from holding simultaneously.
pub fn pairwise_exclude(a: &[i32], b: &[i32]) -> Cnf {
    assert_eq!(a.len(), b.len(), "pairwise_exclude over unequal lists");
    a.iter().zip(b.iter()).map(|(&x, &y)| vec![-x, -y]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Brute-forces every assignment of `vars` and checks that the clause
    /// set is satisfied exactly when the predicate holds on the true-count.
    fn check_against_counts(clauses: &Cnf, vars: &[i32], holds: impl Fn(usize) -> bool) {
        for mask in 0..(1u32 << vars.len()) {
            let truth = |lit: i32| {
                let idx = vars.iter().position(|&v| v == lit.abs()).unwrap();
                let set = mask & (1 << idx) != 0;
                if lit > 0 { set } else { !set }
            };
            let satisfied = clauses.iter().all(|c| c.iter().any(|&l| truth(l)));
            let count = (0..vars.len()).filter(|&k| mask & (1 << k) != 0).count();
            assert_eq!(satisfied, holds(count), "mask {mask:b}");
        }
    }

    #[test]
    fn at_least_matches_its_semantics() {
        let vars = [1, 2, 3, 4];
        for n in 0..=4 {
            check_against_counts(&at_least(n, &vars), &vars, |c| c >= n);
        }
    }

    #[test]
    fn at_most_matches_its_semantics() {
        let vars = [1, 2, 3, 4];
        for n in 0..=4 {
            check_against_counts(&at_most(n, &vars), &vars, |c| c <= n);
        }
    }

    #[test]
    fn exactly_matches_its_semantics() {
        let vars = [1, 2, 3];
        for n in 0..=3 {
            check_against_counts(&exactly(n, &vars), &vars, |c| c == n);
        }
        assert!(exactly(0, &[]).is_empty());
    }

    #[test]
    fn boundary_cases_emit_nothing() {
        assert!(at_least(0, &[1, 2]).is_empty());
        assert!(at_most(2, &[1, 2]).is_empty());
    }

    #[test]
    fn pairwise_exclusion_shape() {
        let clauses = pairwise_exclude(&[1, 2], &[5, 6]);
        assert_eq!(clauses, vec![vec![-1, -5], vec![-2, -6]]);
    }

    #[test]
    #[should_panic]
    fn at_least_rejects_oversized_n() {
        at_least(3, &[1, 2]);
    }
}
