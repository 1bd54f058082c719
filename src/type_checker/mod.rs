//! Static checking.
//!
//! - `type_checker`: infers a type for every expression and records
//!   violations as diagnostics without stopping
//! - `flow_analysis`: checks that non-void functions return on every path

pub mod flow_analysis;
pub mod type_checker;

#[cfg(test)]
mod tests;
