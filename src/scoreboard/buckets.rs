//! The best-score bucket index backing [`super::Scoreboard`]: a bucket
//! array keyed by score, with on-demand growth past the static
//! `[-max_occs, max_occs]` window (scores may swing outside it by up to
//! two units during a single flip) and O(1) membership changes via
//! swap-with-last, the same trick [`crate::falselist::Falselist`] uses for
//! clause membership.
use crate::types::{ScoreMode, VarId};

#[derive(Debug, Clone)]
pub(crate) struct Buckets {
    mode: ScoreMode,
    score: Vec<i64>,
    slot: Vec<usize>,
    buckets: Vec<Vec<VarId>>,
    offset: i64,
    best_score: i64,
}

impl Buckets {
    /// All `n` variables start at score 0. `max_occs` sizes the initial
    /// window; it is not a hard limit.
    pub(crate) fn new(n: usize, mode: ScoreMode, max_occs: usize) -> Self {
        let span = max_occs as i64 + 2;
        let width = (2 * span + 1) as usize;
        let offset = span;
        let mut buckets = vec![Vec::new(); width];
        let score = vec![0i64; n + 1];
        let mut slot = vec![0usize; n + 1];
        let zero_idx = offset as usize;
        for v in 1..=n {
            slot[v] = buckets[zero_idx].len();
            buckets[zero_idx].push(v);
        }
        Buckets {
            mode,
            score,
            slot,
            buckets,
            offset,
            best_score: 0,
        }
    }

    pub(crate) fn mode(&self) -> ScoreMode {
        self.mode
    }

    pub(crate) fn score(&self, v: VarId) -> i64 {
        self.score[v]
    }

    pub(crate) fn best_score(&self) -> i64 {
        self.best_score
    }

    pub(crate) fn best_bucket(&self) -> (i64, &[VarId]) {
        (self.best_score, self.bucket_slice(self.best_score))
    }

    pub(crate) fn contains_in_own_bucket(&self, v: VarId) -> bool {
        self.bucket_slice(self.score[v]).contains(&v)
    }

    fn idx(&self, s: i64) -> i64 {
        s + self.offset
    }

    fn bucket_slice(&self, s: i64) -> &[VarId] {
        let i = self.idx(s);
        if i < 0 || i as usize >= self.buckets.len() {
            &[]
        } else {
            &self.buckets[i as usize]
        }
    }

    fn bucket_len(&self, s: i64) -> usize {
        self.bucket_slice(s).len()
    }

    fn ensure_capacity(&mut self, s: i64) {
        while s + self.offset < 0 {
            self.buckets.insert(0, Vec::new());
            self.offset += 1;
        }
        while (s + self.offset) as usize >= self.buckets.len() {
            self.buckets.push(Vec::new());
        }
    }

    fn remove_from_bucket(&mut self, v: VarId, s: i64) {
        let i = self.idx(s) as usize;
        let bucket = &mut self.buckets[i];
        let pos = self.slot[v];
        let last = bucket.len() - 1;
        if pos != last {
            bucket.swap(pos, last);
            let moved = bucket[pos];
            self.slot[moved] = pos;
        }
        bucket.pop();
    }

    fn add_to_bucket(&mut self, v: VarId, s: i64) {
        self.ensure_capacity(s);
        let i = self.idx(s) as usize;
        self.slot[v] = self.buckets[i].len();
        self.buckets[i].push(v);
    }

    /// `score[v] += 1`, keeping bucket membership and `best_score` consistent.
    pub(crate) fn score_up(&mut self, v: VarId) {
        let s = self.score[v];
        match self.mode {
            ScoreMode::Diff => {
                if self.best_score == s {
                    self.best_score += 1;
                }
            }
            ScoreMode::BreakOnly => {
                if self.best_score == s && self.bucket_len(s) == 1 {
                    self.best_score += 1;
                }
            }
        }
        self.remove_from_bucket(v, s);
        self.add_to_bucket(v, s + 1);
        self.score[v] = s + 1;
        log::trace!("score_up({}): {} -> {}", v, s, s + 1);
    }

    /// `score[v] -= 1`, keeping bucket membership and `best_score` consistent.
    pub(crate) fn score_down(&mut self, v: VarId) {
        let s = self.score[v];
        self.remove_from_bucket(v, s);
        match self.mode {
            ScoreMode::Diff => {
                if self.best_score == s && self.bucket_len(s) == 0 {
                    self.best_score -= 1;
                }
            }
            ScoreMode::BreakOnly => {
                // best_score tracks the minimum break; a member arriving
                // below it is adopted immediately.
                if s - 1 < self.best_score {
                    self.best_score = s - 1;
                }
            }
        }
        self.add_to_bucket(v, s - 1);
        self.score[v] = s - 1;
        log::trace!("score_down({}): {} -> {}", v, s, s - 1);
    }
}
