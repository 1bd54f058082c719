use std::io;

use thiserror::Error;

/// Unrecoverable states the type checker should have excluded. These abort
/// the run and are never rendered as diagnostics.
#[derive(Error, Debug)]
pub enum Fault {
    #[error("type checker missed {0}")]
    TypeCheckerMissed(String),
    #[error("'{0}' is not callable")]
    NotCallable(String),
    #[error("'{function}' expects {expected} arguments but received {received}")]
    ArityMismatch {
        function: String,
        expected: usize,
        received: usize,
    },
    #[error("cannot pop the global scope")]
    PopGlobalScope,
    #[error("{0} is not a valid unicode scalar value")]
    InvalidUnicodeScalar(i64),
    #[error("index {index} is out of bounds for length {len}")]
    IndexOutOfBounds { index: i64, len: usize },
    #[error("division by zero")]
    DivisionByZero,
    #[error("integer overflow")]
    IntegerOverflow,
    #[error("empty range {lower}..{upper}")]
    EmptyRange { lower: String, upper: String },
    #[error("negative array length {0}")]
    NegativeLength(i64),
    #[error("'{0}' was called after the frame it was declared in returned")]
    FrameExpired(String),
    #[error("'return' escaped its function")]
    ReturnOutsideFunction,
    #[error("expression is not assignable")]
    NotAssignable,
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}
