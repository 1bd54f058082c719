//! Error types and error reporting.
//!
//! - `errors`: user-facing diagnostic kinds with source spans, and the
//!   top-level error returned by the pipeline
//! - `diagnostics`: the sink every stage records into, and its aggregated
//!   caret-underlined report
//! - `fault`: internal invariant violations raised while running a program

pub mod diagnostics;
pub mod errors;
pub mod fault;

#[cfg(test)]
mod tests;
