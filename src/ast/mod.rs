/// AST (Abstract Syntax Tree) module
/// Statements and expressions are closed sum types; every traversal is one
/// exhaustive match.
///
/// Submodules:
/// - expressions: expression nodes
/// - operators: infix operators
/// - statements: statement nodes
/// - types: the static types of the language
pub mod expressions;
pub mod operators;
pub mod statements;
pub mod types;
