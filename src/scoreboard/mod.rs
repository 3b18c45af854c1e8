//! Crate `scoreboard` is the incremental scoring substrate (component C4):
//! per-clause true-literal counters and critical variables, per-variable
//! scores, and the best-score bucket index. Construction is a single pass
//! over the formula; thereafter every update goes through [`Scoreboard::flip`]
//! in amortized sub-linear time.
//!
//! Two scoring policies share one flip control flow, parameterized by
//! [`ScoreMode`]: `Diff` (GSAT-style, `score = make - break`) and
//! `BreakOnly` (WalkSAT/ProbSAT-style, `score = break`). The per-flip
//! branches differ only in which bucket primitive is applied and how many
//! times; the scan order never does.
mod buckets;

use crate::falselist::Falselist;
use crate::formula::Formula;
use crate::types::{ClauseId, Lit, LiteralEncoding, ScoreMode, VarId};
use buckets::Buckets;

/// Owns the mutable [`Assignment`](crate::assignment::Assignment) and
/// [`Falselist`] of a single solver instance; borrows the immutable
/// [`Formula`] it scores against. Not re-entrant: a flip runs to
/// completion without yielding.
pub struct Scoreboard<'f> {
    formula: &'f Formula,
    assignment: crate::assignment::Assignment,
    falselist: Falselist,
    buckets: Buckets,
    num_true_lit: Vec<usize>,
    /// `crit_var[c]` is meaningful only while `num_true_lit[c] == 1`; `0`
    /// (not a valid `VarId`) otherwise.
    crit_var: Vec<VarId>,
}

impl<'f> Scoreboard<'f> {
    /// Builds a scoreboard for `formula` from a freshly given assignment,
    /// in a single pass over the clauses.
    pub fn new(
        formula: &'f Formula,
        assignment: crate::assignment::Assignment,
        mode: ScoreMode,
    ) -> Self {
        assert_eq!(
            assignment.len(),
            formula.num_vars(),
            "assignment width must match the formula's variable count"
        );
        let n = formula.num_vars();
        let m = formula.num_clauses();
        let mut falselist = Falselist::new();
        let mut buckets = Buckets::new(n, mode, formula.max_occs());
        let mut num_true_lit = vec![0usize; m];
        let mut crit_var = vec![0 as VarId; m];

        for (c, clause) in formula.clauses().iter().enumerate() {
            let mut t = 0usize;
            let mut cv: VarId = 0;
            for &l in clause {
                if assignment.is_true(l) {
                    t += 1;
                    cv = l.vi();
                }
            }
            num_true_lit[c] = t;
            if t == 1 {
                crit_var[c] = cv;
                match mode {
                    ScoreMode::Diff => buckets.score_down(cv),
                    ScoreMode::BreakOnly => buckets.score_up(cv),
                }
            } else if t == 0 {
                falselist.add(c);
                if mode == ScoreMode::Diff {
                    for &l in clause {
                        buckets.score_up(l.vi());
                    }
                }
            }
        }

        Scoreboard {
            formula,
            assignment,
            falselist,
            buckets,
            num_true_lit,
            crit_var,
        }
    }

    pub fn mode(&self) -> ScoreMode {
        self.buckets.mode()
    }

    pub fn assignment(&self) -> &crate::assignment::Assignment {
        &self.assignment
    }

    pub fn falselist(&self) -> &Falselist {
        &self.falselist
    }

    pub fn score(&self, v: VarId) -> i64 {
        self.buckets.score(v)
    }

    pub fn num_true_lit(&self, c: ClauseId) -> usize {
        self.num_true_lit[c]
    }

    pub fn crit_var(&self, c: ClauseId) -> VarId {
        self.crit_var[c]
    }

    /// `(best_score, buckets[best_score])`.
    pub fn best_bucket(&self) -> (i64, &[VarId]) {
        self.buckets.best_bucket()
    }

    /// Flips variable `v`: updates the assignment, then scans
    /// `occurrences[sat]` and `occurrences[unsat]`, in that order, to
    /// bring every per-clause counter, per-variable score, bucket
    /// membership, and the falselist back into a consistent state. The two
    /// scans MUST NOT be interleaved: doing so would double-count
    /// transitions.
    pub fn flip(&mut self, v: VarId) {
        let mode = self.mode();
        let formula = self.formula;

        self.assignment.flip(v);
        let sat: Lit = if self.assignment.value(v) {
            v as Lit
        } else {
            -(v as Lit)
        };
        let unsat: Lit = -sat;

        for &c in formula.get_occurrences(sat) {
            if self.num_true_lit[c] == 0 {
                self.falselist.remove(c);
                match mode {
                    ScoreMode::Diff => {
                        for &l in formula.clause(c) {
                            self.buckets.score_down(l.vi());
                        }
                        self.buckets.score_down(v);
                    }
                    ScoreMode::BreakOnly => {
                        self.buckets.score_up(v);
                    }
                }
                self.crit_var[c] = v;
            } else if self.num_true_lit[c] == 1 {
                let cv = self.crit_var[c];
                match mode {
                    ScoreMode::Diff => self.buckets.score_up(cv),
                    ScoreMode::BreakOnly => self.buckets.score_down(cv),
                }
            }
            self.num_true_lit[c] += 1;
        }

        for &c in formula.get_occurrences(unsat) {
            if self.num_true_lit[c] == 1 {
                self.falselist.add(c);
                match mode {
                    ScoreMode::Diff => {
                        for &l in formula.clause(c) {
                            self.buckets.score_up(l.vi());
                        }
                        self.buckets.score_up(v);
                    }
                    ScoreMode::BreakOnly => {
                        self.buckets.score_down(v);
                    }
                }
                self.crit_var[c] = v;
            } else if self.num_true_lit[c] == 2 {
                let l = *formula
                    .clause(c)
                    .iter()
                    .find(|&&l| self.assignment.is_true(l))
                    .expect("clause with 2 true literals must have one findable by scan");
                let w = l.vi();
                self.crit_var[c] = w;
                match mode {
                    ScoreMode::Diff => self.buckets.score_down(w),
                    ScoreMode::BreakOnly => self.buckets.score_up(w),
                }
            }
            self.num_true_lit[c] -= 1;
        }

        log::debug!("flip({}): best_score now {}", v, self.buckets.best_score());
    }

    /// Recomputes every per-clause and per-variable field from scratch and
    /// compares against the incremental state. `O(N + sum of clause
    /// lengths)`. Testing only: logs the first mismatch found at `warn`
    /// level and returns `false`, rather than silently repairing anything.
    pub fn self_test(&self) -> bool {
        let n = self.formula.num_vars();
        let mut make = vec![0i64; n + 1];
        let mut break_ = vec![0i64; n + 1];

        for (c, clause) in self.formula.clauses().iter().enumerate() {
            let mut t = 0usize;
            let mut cv: VarId = 0;
            for &l in clause {
                if self.assignment.is_true(l) {
                    t += 1;
                    cv = l.vi();
                }
            }
            if t != self.num_true_lit[c] {
                log::warn!(
                    "self_test: clause {} true-literal count mismatch: incremental={}, recomputed={}",
                    c, self.num_true_lit[c], t
                );
                return false;
            }
            match t {
                0 => {
                    for &l in clause {
                        make[l.vi()] += 1;
                    }
                    if !self.falselist.contains(c) {
                        log::warn!(
                            "self_test: clause {} unsatisfied but absent from falselist",
                            c
                        );
                        return false;
                    }
                }
                1 => {
                    if cv != self.crit_var[c] {
                        log::warn!("self_test: clause {} critical variable mismatch", c);
                        return false;
                    }
                    break_[cv] += 1;
                }
                _ => {
                    if self.falselist.contains(c) {
                        log::warn!("self_test: clause {} satisfied but present in falselist", c);
                        return false;
                    }
                }
            }
        }

        for v in 1..=n {
            let expected = match self.mode() {
                ScoreMode::Diff => make[v] - break_[v],
                ScoreMode::BreakOnly => break_[v],
            };
            if expected != self.buckets.score(v) {
                log::warn!(
                    "self_test: variable {} score mismatch: incremental={}, recomputed={}",
                    v, self.buckets.score(v), expected
                );
                return false;
            }
            if !self.buckets.contains_in_own_bucket(v) {
                log::warn!("self_test: variable {} not present in its own bucket", v);
                return false;
            }
        }
        true
    }
}
