//! Property tests over the universal invariants: any flip sequence keeps
//! the scoreboard self-consistent, a flip and its inverse restore every
//! piece of state bit-exactly, the planted generator always satisfies
//! its own witness, and a formula survives a DIMACS round trip.
use proptest::prelude::*;
use satscore::assignment::Assignment;
use satscore::formula::Formula;
use satscore::generator::generate_planted;
use satscore::scoreboard::Scoreboard;
use satscore::types::ScoreMode;

fn arb_formula(max_vars: usize, max_clauses: usize) -> impl Strategy<Value = (Formula, usize)> {
    (2..=max_vars).prop_flat_map(move |n| {
        let literal = (1..=n as i32).prop_flat_map(|v| prop::bool::ANY.prop_map(move |neg| if neg { -v } else { v }));
        let clauses = prop::collection::vec(
            prop::collection::vec(literal, 1..=3.min(n)),
            1..=max_clauses,
        );
        (clauses, Just(n))
    }).prop_map(|(clauses, n)| (Formula::from_parts(clauses, n, None), n))
}

/// Like [`arb_formula`], but sometimes attaches a `Some(witness)` satisfying
/// assignment, so the round-trip property also covers the `c assgn 0x...`
/// comment line, not just bare clauses.
fn arb_formula_with_optional_witness(
    max_vars: usize,
    max_clauses: usize,
) -> impl Strategy<Value = (Formula, usize)> {
    (2..=max_vars).prop_flat_map(move |n| {
        let literal = (1..=n as i32).prop_flat_map(|v| prop::bool::ANY.prop_map(move |neg| if neg { -v } else { v }));
        let clauses = prop::collection::vec(
            prop::collection::vec(literal, 1..=3.min(n)),
            1..=max_clauses,
        );
        let witness_bits = prop::option::of(any::<u128>());
        (clauses, witness_bits, Just(n))
    }).prop_map(|(clauses, witness_bits, n)| {
        let witness = witness_bits.map(|bits| Assignment::new(bits, n));
        (Formula::from_parts(clauses, n, witness), n)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn self_test_holds_after_any_flip_sequence(
        (formula, n) in arb_formula(8, 12),
        bits in any::<u128>(),
        flips in prop::collection::vec(1usize..=8, 0..30),
    ) {
        let flips: Vec<usize> = flips.into_iter().map(|v| v.min(n).max(1)).collect();
        let assignment = Assignment::new(bits, n);
        let mut sb = Scoreboard::new(&formula, assignment, ScoreMode::Diff);
        prop_assert!(sb.self_test());
        for v in flips {
            sb.flip(v);
            prop_assert!(sb.self_test());
        }
    }

    #[test]
    fn bucket_containment_holds(
        (formula, n) in arb_formula(8, 10),
        bits in any::<u128>(),
    ) {
        let assignment = Assignment::new(bits, n);
        let sb = Scoreboard::new(&formula, assignment, ScoreMode::BreakOnly);
        for v in 1..=n {
            prop_assert!(sb.score(v) >= 0);
        }
        let (best, vars) = sb.best_bucket();
        for &v in vars {
            prop_assert_eq!(sb.score(v), best);
        }
    }

    #[test]
    fn flip_involution_restores_state(
        (formula, n) in arb_formula(8, 10),
        bits in any::<u128>(),
        v in 1usize..=8,
    ) {
        let v = v.min(n).max(1);
        let assignment = Assignment::new(bits, n);
        let mut sb = Scoreboard::new(&formula, assignment.clone(), ScoreMode::Diff);
        let before_scores: Vec<i64> = (1..=n).map(|w| sb.score(w)).collect();

        sb.flip(v);
        sb.flip(v);

        prop_assert_eq!(sb.assignment(), &assignment);
        let after_scores: Vec<i64> = (1..=n).map(|w| sb.score(w)).collect();
        prop_assert_eq!(before_scores, after_scores);
        prop_assert!(sb.self_test());
    }

    #[test]
    fn generator_always_satisfies_its_witness(n in 3usize..30, ratio in 0.5f64..6.0, seed in any::<u64>()) {
        let f = generate_planted(n, ratio, seed);
        prop_assert!(f.is_satisfied_by(f.satisfying_assignment().unwrap()));
    }

    // Invariant 8 (spec.md §8): parse(serialize(F)) == F, for arbitrary
    // generated formulas, with and without an attached witness — not just
    // the single literal S4 fixture.
    #[test]
    fn dimacs_round_trip_holds((formula, _n) in arb_formula_with_optional_witness(8, 12)) {
        let text = formula.serialize();
        let parsed = Formula::parse(&text).unwrap();
        prop_assert_eq!(parsed, formula);
    }
}
