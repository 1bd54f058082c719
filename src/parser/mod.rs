//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that pulls tokens from the lexer and
//! builds the statement list of one source file. It uses a Pratt parser for
//! expressions and handles:
//!
//! - Statement parsing (functions, variables, control flow, blocks)
//! - Expression parsing (binary ops, calls, subscripts, assignment)
//! - Type parsing for annotations
//! - Error recovery by skipping to the start of the next line
//!
//! Assignment, subscript and call are registered as postfix handlers with
//! the highest binding power, so they always attach to the operand before
//! them.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;
