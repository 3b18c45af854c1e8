//! Basic types shared by every component: variable ids, literals, and the
//! scoring mode tag.
use std::fmt;

/// Variables are numbered `1..=N`.
pub type VarId = usize;

/// A literal is a signed integer; `+v` means "v is true", `-v` means
/// "v is false". `0` is reserved as the DIMACS end-of-clause sentinel and
/// never appears as an internal literal.
pub type Lit = i32;

/// Converters between a [`Lit`](type.Lit.html) and the [`VarId`](type.VarId.html) it names.
///
/// # Examples
///
/// ```
/// use satscore::types::LiteralEncoding;
/// assert_eq!(1, (1i32).vi());
/// assert_eq!(1, (-1i32).vi());
/// assert!((1i32).positive());
/// assert!(!(-1i32).positive());
/// assert_eq!(-1, (1i32).negate());
/// ```
pub trait LiteralEncoding {
    /// the variable this literal names, stripped of its sign.
    fn vi(&self) -> VarId;
    /// `true` iff the literal asserts its variable is true.
    fn positive(&self) -> bool;
    /// the complementary literal.
    fn negate(&self) -> Lit;
}

impl LiteralEncoding for Lit {
    fn vi(&self) -> VarId {
        self.unsigned_abs() as VarId
    }
    fn positive(&self) -> bool {
        *self > 0
    }
    fn negate(&self) -> Lit {
        -self
    }
}

/// Scoring policy for the [`Scoreboard`](crate::scoreboard::Scoreboard).
///
/// `Diff` is the GSAT-style policy (`score = make - break`); `BreakOnly`
/// is the WalkSAT/ProbSAT-style policy (`score = break`, always `>= 0`).
/// The per-flip control flow is identical in both modes; only which
/// primitive is applied, and how many times, differs. See
/// [`crate::scoreboard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreMode {
    Diff,
    BreakOnly,
}

impl fmt::Display for ScoreMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ScoreMode::Diff => write!(f, "diff"),
            ScoreMode::BreakOnly => write!(f, "break-only"),
        }
    }
}

/// A clause is an ordered sequence of non-zero literals. Duplicates and
/// tautologies are not filtered; that is the caller's responsibility.
pub type Clause = Vec<Lit>;

/// Clauses are addressed by their position in [`Formula::clauses`](crate::formula::Formula::clauses).
pub type ClauseId = usize;
