//! Lexical analysis.
//!
//! The lexer is pull-based: the parser asks for one token at a time. Every
//! token records the trivia on both sides of it, which the parser uses to
//! find line starts when recovering from a syntax error.

pub mod lexer;
pub mod tokens;
