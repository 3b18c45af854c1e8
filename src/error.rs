//! Crate `error` provides the input-error taxonomy. Programming errors
//! (precondition violations) are never represented here; they go through
//! `assert!`/`debug_assert!`/`panic!` instead, per the two-class error
//! model.
use thiserror::Error;

/// A malformed DIMACS document. Carries the 1-indexed line the parser was
/// looking at when it gave up.
#[derive(Debug, Error)]
#[error("DIMACS parse error at line {line}: {kind}")]
pub struct FormulaParseError {
    pub line: usize,
    pub kind: FormulaParseErrorKind,
}

/// The specific way a DIMACS document failed to parse.
#[derive(Debug, Error)]
pub enum FormulaParseErrorKind {
    #[error("missing 'p cnf <vars> <clauses>' header")]
    MissingHeader,
    #[error("malformed header line: {0:?}")]
    BadHeader(String),
    #[error("expected an integer, found {0:?}")]
    BadInteger(String),
    #[error("clause not terminated by a literal 0")]
    UnterminatedClause,
    #[error("literal {lit} out of range for {num_vars} variables")]
    LiteralOutOfRange { lit: i64, num_vars: usize },
    #[error("malformed 'c assgn' witness comment: {0:?}")]
    BadWitness(String),
}

impl FormulaParseError {
    pub(crate) fn new(line: usize, kind: FormulaParseErrorKind) -> Self {
        FormulaParseError { line, kind }
    }
}
