//! Crate `generator` produces random planted-satisfiable k-CNF formulas
//! (component C5): draw a random witness, then repeatedly sample a clause
//! that is guaranteed not to falsify it, weighted toward clauses that
//! barely survive (the formula this produces is hard for local search,
//! not merely satisfiable by construction).
//!
//! Only `k = 3` is implemented, matching the only weight table the
//! reference ships.
use crate::assignment::Assignment;
use crate::formula::Formula;
use crate::types::{Clause, Lit, LiteralEncoding};
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use rand_pcg::Pcg64;

const K: usize = 3;

/// Unnormalized survival weight for a candidate clause with `x` literals
/// true under the witness. Index 0 is never used (such candidates are
/// discarded before weighting). These are not a probability distribution;
/// callers MUST renormalize over whichever candidates survive a given
/// draw.
const WEIGHT_TABLE: [f64; 4] = [0.0, 0.191, 0.118, 0.073];

/// Draws a planted-satisfiable 3-CNF formula with `n` variables and
/// clause/variable ratio approximately `ratio`, reproducible from `seed`.
///
/// The reference implementation this is ported from emits `M + 1` clauses
/// rather than `M = floor(ratio * n)`; that off-by-one is carried over
/// verbatim rather than silently corrected (see `DESIGN.md`).
pub fn generate_planted(n: usize, ratio: f64, seed: u64) -> Formula {
    assert!(n >= K, "need at least {} variables for a {}-CNF", K, K);
    let mut rng = Pcg64::seed_from_u64(seed);
    let witness = Assignment::random(n, seed);
    let m = (ratio * n as f64).floor() as usize;

    let mut clauses: Vec<Clause> = Vec::with_capacity(m + 1);
    for _ in 0..=m {
        clauses.push(sample_clause(n, &witness, &mut rng));
    }

    let formula = Formula::from_parts(clauses, n, Some(witness.clone()));
    assert!(
        formula.is_satisfied_by(&witness),
        "generator produced a formula that does not satisfy its own witness"
    );
    formula
}

fn sample_clause(n: usize, witness: &Assignment, rng: &mut Pcg64) -> Clause {
    let vars = sample_distinct_vars(n, rng);

    let mut candidates: Vec<Clause> = Vec::with_capacity(1 << K);
    let mut weights: Vec<f64> = Vec::with_capacity(1 << K);
    for pattern in 0u32..(1 << K) {
        let clause: Clause = (0..K)
            .map(|i| {
                let v = vars[i] as Lit;
                if (pattern >> i) & 1 == 0 {
                    v
                } else {
                    -v
                }
            })
            .collect();
        let x = clause.iter().filter(|&&l| witness.is_true(l)).count();
        if x == 0 {
            continue;
        }
        candidates.push(clause);
        weights.push(WEIGHT_TABLE[x]);
    }

    debug_assert!(
        !candidates.is_empty(),
        "at least one of the 2^k sign patterns satisfies the witness"
    );
    let dist = WeightedIndex::new(&weights).expect("surviving candidates have positive weight");
    candidates.swap_remove(dist.sample(rng))
}

fn sample_distinct_vars(n: usize, rng: &mut Pcg64) -> [usize; K] {
    let mut vars = [0usize; K];
    let mut chosen = std::collections::HashSet::with_capacity(K);
    let mut i = 0;
    while i < K {
        let v = rng.gen_range(1..=n);
        if chosen.insert(v) {
            vars[i] = v;
            i += 1;
        }
    }
    vars
}

/// Output filename convention for a driver that writes generated formulas
/// to disk: `n<N>-r<ratio:.2>-k<k>-<16 hex digits>.cnf`. Not invoked by
/// this crate; exposed so a driver needn't re-derive the digest.
pub fn output_filename(formula: &Formula, k: usize) -> String {
    format!(
        "n{}-r{:.2}-k{}-{:016x}.cnf",
        formula.num_vars(),
        formula.ratio(),
        k,
        formula.content_digest()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_witness_guarantee() {
        let f = generate_planted(20, 4.2, 42);
        assert!(f.is_satisfied_by(f.satisfying_assignment().unwrap()));
    }

    // S5: same seed, bit-identical formula.
    #[test]
    fn test_determinism_s5() {
        let a = generate_planted(20, 4.2, 42);
        let b = generate_planted(20, 4.2, 42);
        assert_eq!(a, b);
    }

    #[test]
    fn test_clause_count_is_m_plus_one() {
        let f = generate_planted(10, 3.0, 1);
        assert_eq!(f.num_clauses(), 10 * 3 + 1);
    }

    #[test]
    fn test_every_clause_is_3cnf_over_distinct_vars() {
        let f = generate_planted(15, 2.0, 9);
        for clause in f.clauses() {
            assert_eq!(clause.len(), K);
            let vars: std::collections::HashSet<usize> = clause.iter().map(|l| l.vi()).collect();
            assert_eq!(vars.len(), K);
        }
    }
}
