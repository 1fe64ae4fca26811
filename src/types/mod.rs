//! Module `types' provides various building blocks, including
//! some common traits.

/// methods on flags used in Var and Clause
pub mod flags;
/// methods on literals
pub mod lit;
/// methods on WCNF file
pub mod wcnf;

pub use self::{flags::*, lit::*, wcnf::*};

pub use crate::config::Config;

use std::io;

/// Var index, starting with one. Zero is never used.
pub type VarId = usize;

/// Clause index, starting with zero.
pub type ClauseId = usize;

/// Weight of a soft clause, or the "top" weight marking hard clauses.
pub type Weight = u64;

/// A clause in the form handed over by a loader or an encoder:
/// a weight and a list of DIMACS literals.
pub type WeightedClause = (Weight, Vec<i32>);

/// API for object instantiation based on `Configuration` and an instance.
/// This is implemented by the search modules which are sized at load time.
pub trait Instantiate<T> {
    /// make and return an object from `Config` and a source `T`.
    fn instantiate(config: &Config, source: &T) -> Self;
}

/// Errors.
/// The loading errors abort before any search state is built;
/// the others signal internal invariant violations.
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    // Exceptions caused by file operations
    #[error("I/O error: {0}")]
    IOError(#[from] io::Error),
    #[error("invalid header: {0}")]
    InvalidHeader(String),
    #[error("line {line}: can't parse '{token}'")]
    ParseError { line: usize, token: String },
    // A clause contains a literal out of the range defined in its header.
    // '0' is an example.
    #[error("clause {clause} contains literal {lit} out of range 1..={num_vars}")]
    InvalidLiteral {
        clause: ClauseId,
        lit: i32,
        num_vars: usize,
    },
    #[error("declared {declared} clauses but read {read}")]
    InconsistentClauseCount { declared: usize, read: usize },
    // A given instance contains an empty clause
    #[error("clause {0} is empty")]
    EmptyClause(ClauseId),
    #[error("clause {clause} has an invalid weight {weight}")]
    InvalidWeight { clause: ClauseId, weight: Weight },
    #[error("invalid assignment: {0}")]
    InvalidAssignment(String),
    #[error("reported cost {reported} but the assignment costs {verified}")]
    VerificationMismatch { reported: Weight, verified: Weight },
    #[error("hard clause {0} is falsified by the reported assignment")]
    HardClauseViolated(ClauseId),
    #[error("internal inconsistency: {0}")]
    SolverBug(String),
}

/// A Return type used by solver functions.
pub type MaybeInconsistent = Result<(), SolverError>;
