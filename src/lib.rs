/*!
# satscore

`satscore` is the incremental scoring substrate for stochastic local
search (GSAT / WalkSAT / ProbSAT-family) SAT solvers: given a CNF formula
and a candidate truth assignment, it maintains — in amortized sub-linear
time per single-variable flip — the per-clause true-literal counts and
critical variables, the per-variable make/break scores, a best-score
bucket index, and the set of currently unsatisfied clauses.

This crate does not implement a search loop, a flip heuristic, or a CLI;
it implements the data structures and update algorithms those things are
built on top of. A consumer picks a variable (by reading
[`scoreboard::Scoreboard::best_bucket`] or sampling
[`falselist::Falselist`]) and calls
[`scoreboard::Scoreboard::flip`]; everything else follows.

## Usage

```
use satscore::assignment::Assignment;
use satscore::formula::Formula;
use satscore::scoreboard::Scoreboard;
use satscore::types::ScoreMode;

let formula = Formula::from_parts(vec![vec![1, 2, 3]], 3, None);
let assignment = Assignment::new(0, 3);
let mut scoreboard = Scoreboard::new(&formula, assignment, ScoreMode::Diff);
let (_best_score, vars) = scoreboard.best_bucket();
let v = vars[0];
scoreboard.flip(v);
assert!(scoreboard.self_test());
```
*/
/// Crate `assignment` provides the packed truth assignment (C1).
pub mod assignment;
/// Crate `error` provides the DIMACS parse error taxonomy.
pub mod error;
/// Crate `falselist` provides the unsatisfied-clause set (C3).
pub mod falselist;
/// Crate `formula` provides clauses, occurrence lists, and DIMACS I/O (C2).
pub mod formula;
/// Crate `generator` produces planted-satisfiable random k-CNF formulas (C5).
pub mod generator;
/// Crate `scoreboard` is the incremental scoring substrate (C4).
pub mod scoreboard;
/// Crate `types` provides literal/variable encoding and the scoring mode tag.
pub mod types;
