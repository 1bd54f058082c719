//! Runtime: values, assignable storage locations and the evaluator.

pub mod interpreter;
pub mod storage;
pub mod value;
