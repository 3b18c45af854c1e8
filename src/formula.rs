//! Crate `formula` provides the CNF formula representation (component C2):
//! clauses, the literal-to-clause occurrence index, DIMACS parsing and
//! serialization, and satisfaction checking.
use crate::assignment::Assignment;
use crate::error::{FormulaParseError, FormulaParseErrorKind};
use crate::types::{Clause, ClauseId, Lit, LiteralEncoding, VarId};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// An immutable CNF formula together with its precomputed occurrence
/// index. Built once, shared read-only across an arbitrary number of
/// `Scoreboard`s and threads.
#[derive(Debug, Clone)]
pub struct Formula {
    clauses: Vec<Clause>,
    num_vars: usize,
    max_clause_length: usize,
    max_occs: usize,
    ratio: f64,
    /// `occurrences[num_vars as i32 + lit]` is the ascending sequence of
    /// clause indices containing `lit`. Entry `num_vars` (lit == 0) is
    /// always empty; it exists only so the offset arithmetic needs no
    /// branch.
    occurrences: Vec<Vec<ClauseId>>,
    satisfying_assignment: Option<Assignment>,
    /// Non-`assgn` `c` comment lines, carried verbatim through a round trip.
    comments: Vec<String>,
}

fn occ_index(num_vars: usize, lit: Lit) -> usize {
    (num_vars as i64 + lit as i64) as usize
}

impl Formula {
    /// Builds a formula from parts, taking ownership of `clauses` verbatim
    /// (no deduplication, no tautology filtering: that's the caller's job).
    pub fn from_parts(
        clauses: Vec<Clause>,
        num_vars: usize,
        satisfying_assignment: Option<Assignment>,
    ) -> Self {
        Self::build(clauses, num_vars, satisfying_assignment, Vec::new())
    }

    fn build(
        clauses: Vec<Clause>,
        num_vars: usize,
        satisfying_assignment: Option<Assignment>,
        comments: Vec<String>,
    ) -> Self {
        let num_clauses = clauses.len();
        let mut occurrences = vec![Vec::new(); 2 * num_vars + 1];
        let mut max_clause_length = 0;
        for (c, clause) in clauses.iter().enumerate() {
            max_clause_length = max_clause_length.max(clause.len());
            for &l in clause {
                debug_assert!(
                    l != 0 && l.vi() <= num_vars,
                    "literal {} out of range for {} variables",
                    l,
                    num_vars
                );
                occurrences[occ_index(num_vars, l)].push(c);
            }
        }
        let max_occs = occurrences.iter().map(Vec::len).max().unwrap_or(0);
        let ratio = if num_vars == 0 {
            0.0
        } else {
            num_clauses as f64 / num_vars as f64
        };
        Formula {
            clauses,
            num_vars,
            max_clause_length,
            max_occs,
            ratio,
            occurrences,
            satisfying_assignment,
            comments,
        }
    }

    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    pub fn max_clause_length(&self) -> usize {
        self.max_clause_length
    }

    pub fn max_occs(&self) -> usize {
        self.max_occs
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn clause(&self, c: ClauseId) -> &[Lit] {
        &self.clauses[c]
    }

    pub fn satisfying_assignment(&self) -> Option<&Assignment> {
        self.satisfying_assignment.as_ref()
    }

    /// The ascending sequence of clauses containing literal `l`.
    /// `l` must be nonzero and `|l| <= num_vars`.
    pub fn get_occurrences(&self, l: Lit) -> &[ClauseId] {
        debug_assert!(l != 0 && l.vi() <= self.num_vars);
        &self.occurrences[occ_index(self.num_vars, l)]
    }

    /// `true` iff every clause has at least one literal true under `a`.
    pub fn is_satisfied_by(&self, a: &Assignment) -> bool {
        self.clauses
            .iter()
            .all(|clause| clause.iter().any(|&l| a.is_true(l)))
    }

    /// A stable 64-bit digest of the formula's visible fields, used only by
    /// an external driver's output filename convention; not consumed by
    /// anything in this crate.
    pub fn content_digest(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.num_vars.hash(&mut hasher);
        self.clauses.hash(&mut hasher);
        if let Some(a) = &self.satisfying_assignment {
            a.to_hex().hash(&mut hasher);
        }
        hasher.finish()
    }

    /// Parses a DIMACS CNF document.
    pub fn parse(text: &str) -> Result<Self, FormulaParseError> {
        let mut comments = Vec::new();
        let mut witness_hex: Option<(usize, String)> = None;
        let mut header: Option<(usize, usize)> = None;
        let mut clauses: Vec<Clause> = Vec::new();
        let mut current: Clause = Vec::new();

        for (idx, raw_line) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw_line.trim_end();
            if line.trim().is_empty() {
                continue;
            }
            if let Some(rest) = line.strip_prefix('c') {
                let rest = rest.trim();
                if let Some(hex) = rest.strip_prefix("assgn") {
                    witness_hex = Some((line_no, hex.trim().to_string()));
                } else {
                    comments.push(rest.to_string());
                }
                continue;
            }
            if let Some(rest) = line.strip_prefix('p') {
                let mut it = rest.split_whitespace();
                let tag = it.next();
                if tag != Some("cnf") {
                    return Err(FormulaParseError::new(
                        line_no,
                        FormulaParseErrorKind::BadHeader(line.to_string()),
                    ));
                }
                let n: usize = it
                    .next()
                    .ok_or_else(|| {
                        FormulaParseError::new(
                            line_no,
                            FormulaParseErrorKind::BadHeader(line.to_string()),
                        )
                    })?
                    .parse()
                    .map_err(|_| {
                        FormulaParseError::new(
                            line_no,
                            FormulaParseErrorKind::BadHeader(line.to_string()),
                        )
                    })?;
                let m: usize = it
                    .next()
                    .ok_or_else(|| {
                        FormulaParseError::new(
                            line_no,
                            FormulaParseErrorKind::BadHeader(line.to_string()),
                        )
                    })?
                    .parse()
                    .map_err(|_| {
                        FormulaParseError::new(
                            line_no,
                            FormulaParseErrorKind::BadHeader(line.to_string()),
                        )
                    })?;
                header = Some((n, m));
                continue;
            }
            let (num_vars, _num_clauses) = header.ok_or_else(|| {
                FormulaParseError::new(line_no, FormulaParseErrorKind::MissingHeader)
            })?;
            for tok in line.split_whitespace() {
                let lit: i64 = tok.parse().map_err(|_| {
                    FormulaParseError::new(
                        line_no,
                        FormulaParseErrorKind::BadInteger(tok.to_string()),
                    )
                })?;
                if lit == 0 {
                    clauses.push(std::mem::take(&mut current));
                    continue;
                }
                if lit.unsigned_abs() as usize > num_vars {
                    return Err(FormulaParseError::new(
                        line_no,
                        FormulaParseErrorKind::LiteralOutOfRange { lit, num_vars },
                    ));
                }
                current.push(lit as Lit);
            }
        }

        let (num_vars, _num_clauses) =
            header.ok_or_else(|| FormulaParseError::new(1, FormulaParseErrorKind::MissingHeader))?;
        if !current.is_empty() {
            return Err(FormulaParseError::new(
                text.lines().count(),
                FormulaParseErrorKind::UnterminatedClause,
            ));
        }
        let satisfying_assignment = match witness_hex {
            Some((line_no, hex)) => match Assignment::from_hex(&hex, num_vars) {
                Ok(a) => Some(a),
                Err(()) => {
                    return Err(FormulaParseError::new(
                        line_no,
                        FormulaParseErrorKind::BadWitness(hex),
                    ))
                }
            },
            None => None,
        };
        Ok(Self::build(clauses, num_vars, satisfying_assignment, comments))
    }

    /// Serializes to DIMACS text: comments verbatim, then `c assgn <hex>`
    /// if a witness is known, then `p cnf N M`, then each clause terminated
    /// by `0`.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for line in &self.comments {
            out.push_str("c ");
            out.push_str(line);
            out.push('\n');
        }
        if let Some(a) = &self.satisfying_assignment {
            out.push_str(&format!("c assgn 0x{}\n", a.to_hex()));
        }
        out.push_str(&format!("p cnf {} {}\n", self.num_vars, self.clauses.len()));
        for clause in &self.clauses {
            for l in clause {
                out.push_str(&l.to_string());
                out.push(' ');
            }
            out.push_str("0\n");
        }
        out
    }
}

impl PartialEq for Formula {
    fn eq(&self, other: &Self) -> bool {
        self.num_vars == other.num_vars
            && self.clauses == other.clauses
            && self.satisfying_assignment == other.satisfying_assignment
    }
}
impl Eq for Formula {}

#[cfg(test)]
mod tests {
    use super::*;

    // S1: a single clause, all false.
    #[test]
    fn test_single_clause() {
        let f = Formula::from_parts(vec![vec![1, 2, 3]], 3, None);
        assert_eq!(f.num_clauses(), 1);
        assert_eq!(f.max_occs(), 1);
        assert_eq!(f.get_occurrences(1), &[0]);
        assert_eq!(f.get_occurrences(-1), &[] as &[ClauseId]);
    }

    #[test]
    fn test_is_satisfied_by() {
        let f = Formula::from_parts(vec![vec![1, 2, 3]], 3, None);
        assert!(!f.is_satisfied_by(&Assignment::new(0, 3)));
        assert!(f.is_satisfied_by(&Assignment::new(0b001, 3)));
    }

    // S4: round trip.
    #[test]
    fn test_round_trip_s4() {
        let witness = Assignment::new(5, 3);
        let f = Formula::from_parts(vec![vec![1, -2, 3], vec![-1, 2, 3]], 3, Some(witness));
        let text = f.serialize();
        assert!(text.starts_with("c assgn 0x5\np cnf 3 2\n1 -2 3 0\n-1 2 3 0\n"));
        let parsed = Formula::parse(&text).unwrap();
        assert_eq!(f, parsed);
    }

    #[test]
    fn test_missing_header_is_parse_error() {
        let err = Formula::parse("1 2 0\n").unwrap_err();
        assert!(matches!(err.kind, FormulaParseErrorKind::MissingHeader));
    }

    #[test]
    fn test_bad_witness_is_parse_error_not_panic() {
        let err = Formula::parse("c assgn 0xzz\np cnf 3 1\n1 2 3 0\n").unwrap_err();
        assert_eq!(err.line, 1);
        assert!(matches!(err.kind, FormulaParseErrorKind::BadWitness(ref s) if s == "0xzz"));
    }

    #[test]
    fn test_literal_out_of_range_is_parse_error() {
        let err = Formula::parse("p cnf 2 1\n1 3 0\n").unwrap_err();
        assert!(matches!(
            err.kind,
            FormulaParseErrorKind::LiteralOutOfRange { .. }
        ));
    }
}
