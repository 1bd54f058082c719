use std::fmt::Display;

use thiserror::Error;

use crate::{ast::{operators::Operator, types::Type}, Span};

use super::{diagnostics::AggregatedErrors, fault::Fault};

/// A diagnostic kind paired with the source range it refers to.
#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    span: Span,
    phase: ErrorPhase,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, span: Span) -> Self {
        Error {
            phase: error_impl.phase(),
            internal_error: error_impl,
            span,
        }
    }

    /// Overrides the stage recorded for kinds more than one stage emits.
    pub fn in_phase(mut self, phase: ErrorPhase) -> Self {
        self.phase = phase;
        self
    }

    pub fn get_span(&self) -> &Span {
        &self.span
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_phase(&self) -> ErrorPhase {
        self.phase
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::ExpectedExpression => "ExpectedExpression",
            ErrorImpl::NotAType { .. } => "NotAType",
            ErrorImpl::InvalidOperator { .. } => "InvalidOperator",
            ErrorImpl::CannotExecute { .. } => "CannotExecute",
            ErrorImpl::DoesNotExist { .. } => "DoesNotExist",
            ErrorImpl::IncorrectNumberOfArgs { .. } => "IncorrectNumberOfArgs",
            ErrorImpl::IncorrectType { .. } => "IncorrectType",
            ErrorImpl::CannotReturnHere => "CannotReturnHere",
            ErrorImpl::NumericValuesOnly => "NumericValuesOnly",
            ErrorImpl::AlreadyInScope { .. } => "AlreadyInScope",
            ErrorImpl::FunctionAlreadyDeclared { .. } => "FunctionAlreadyDeclared",
            ErrorImpl::CannotIndexInto { .. } => "CannotIndexInto",
            ErrorImpl::InvalidAssignmentTarget => "InvalidAssignmentTarget",
            ErrorImpl::NotAllCodePathsReturn => "NotAllCodePathsReturn",
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.internal_error)
    }
}

/// The pipeline stage a diagnostic originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPhase {
    Lex,
    Syntax,
    Type,
}

impl Display for ErrorPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorPhase::Lex => write!(f, "lex error"),
            ErrorPhase::Syntax => write!(f, "syntax error"),
            ErrorPhase::Type => write!(f, "type error"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("Unexpected Token '{token}'")]
    UnexpectedToken { token: String },
    #[error("Unterminated string literal")]
    UnterminatedString,
    #[error("Invalid number '{token}', is it above the integer limit?")]
    NumberParseError { token: String },
    #[error("Expected expression")]
    ExpectedExpression,
    #[error("No such type '{name}'")]
    NotAType { name: String },
    #[error("Invalid operator '{operator}'")]
    InvalidOperator { operator: Operator },
    #[error("Cannot call non function type '{ident}'")]
    CannotExecute { ident: String },
    #[error("'{ident}' does not exist")]
    DoesNotExist { ident: String },
    #[error("Incorrect number of arguments; Expected {expected} but got {received}")]
    IncorrectNumberOfArgs { expected: usize, received: usize },
    #[error("Incorrect type; Expected '{expected}' but got '{received}'")]
    IncorrectType { expected: Type, received: Type },
    #[error("Cannot 'return' here")]
    CannotReturnHere,
    #[error("Numeric values only")]
    NumericValuesOnly,
    #[error("'{ident}' is already in scope")]
    AlreadyInScope { ident: String },
    #[error("Function '{function}' already declared")]
    FunctionAlreadyDeclared { function: String },
    #[error("Cannot index into type '{ty}'")]
    CannotIndexInto { ty: Type },
    #[error("Cannot assign to this expression")]
    InvalidAssignmentTarget,
    #[error("Not all codepaths return a value")]
    NotAllCodePathsReturn,
}

impl ErrorImpl {
    /// The stage that usually emits this kind. The lexer reports stray
    /// characters as `UnexpectedToken` too and overrides it.
    pub fn phase(&self) -> ErrorPhase {
        match self {
            ErrorImpl::UnterminatedString => ErrorPhase::Lex,
            ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::NumberParseError { .. }
            | ErrorImpl::ExpectedExpression
            | ErrorImpl::NotAType { .. } => ErrorPhase::Syntax,
            _ => ErrorPhase::Type,
        }
    }
}

/// Everything that can stop a compile-and-run invocation.
#[derive(Error, Debug)]
pub enum FlightError {
    #[error("{0}")]
    Diagnostics(#[from] AggregatedErrors),
    #[error("No main function")]
    NoMainFunction,
    #[error("Runtime fault: {0}")]
    Fault(#[from] Fault),
}
