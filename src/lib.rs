#![allow(clippy::module_inception)]

use std::{io::Write, rc::Rc};

use tracing::{debug, info_span};

use crate::{
    ast::statements::Stmt,
    errors::{diagnostics::Diagnostics, errors::FlightError},
    interpreter::interpreter::Interpreter,
    parser::parser::parse,
    type_checker::type_checker::type_check,
};

pub mod ast;
pub mod builtins;
pub mod errors;
pub mod interpreter;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod scope;
pub mod type_checker;

extern crate regex;

/// A byte offset into a named source file.
#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub usize, pub Rc<String>);

/// Half-open source range `[start, end)` within one file.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: usize, end: usize, file: &Rc<String>) -> Self {
        Span {
            start: Position(start, Rc::clone(file)),
            end: Position(end, Rc::clone(file)),
        }
    }

    /// Lower bound of `self` through the upper bound of `other`.
    pub fn spanning(&self, other: &Span) -> Span {
        Span {
            start: self.start.clone(),
            end: other.end.clone(),
        }
    }

    pub fn file(&self) -> &Rc<String> {
        &self.start.1
    }

    pub fn len(&self) -> usize {
        self.end.0.saturating_sub(self.start.0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Returns the 1-based line number, the text of that line and the
/// character column of `position` within it.
pub fn get_line_at_position(content: &str, position: usize) -> (usize, String, usize) {
    let mut pos = position.min(content.len());
    while !content.is_char_boundary(pos) {
        pos -= 1;
    }

    let line_start = content[..pos].rfind('\n').map_or(0, |i| i + 1);
    let line_end = content[pos..].find('\n').map_or(content.len(), |i| pos + i);
    let line_number = content[..pos].matches('\n').count() + 1;
    let column = content[line_start..pos].chars().count();

    let line = content[line_start..line_end].trim_end_matches('\r');
    (line_number, line.to_string(), column)
}

/// One unit of program text handed in by the host.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub contents: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, contents: impl Into<String>) -> Self {
        SourceFile {
            name: name.into(),
            contents: contents.into(),
        }
    }
}

/// Lexes, parses and type checks every source, pooling the statements of
/// all files into one program. Any recorded diagnostic fails the whole
/// compilation with one aggregated report.
pub fn compile(sources: &[SourceFile]) -> Result<Vec<Stmt>, FlightError> {
    let mut diagnostics = Diagnostics::new();
    let mut program = Vec::new();

    for source in sources {
        let _span = info_span!("lex+parse", file = %source.name).entered();
        let file = diagnostics.add_source(&source.name, &source.contents);
        let statements = parse(&source.contents, file, &mut diagnostics);
        debug!(statements = statements.len(), "parsed source file");
        program.extend(statements);
    }

    {
        let _span = info_span!("type_check").entered();
        type_check(&program, &mut diagnostics)?;
        debug!(diagnostics = diagnostics.errors().len(), "type checked program");
    }

    diagnostics.validate()?;
    Ok(program)
}

/// Compiles the sources and, if they are valid, runs `main`. Everything the
/// program prints goes to `output`.
pub fn run(sources: &[SourceFile], output: &mut dyn Write) -> Result<(), FlightError> {
    let program = compile(sources)?;

    let _span = info_span!("interpret").entered();
    Interpreter::new(output).run(&program)
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::{get_line_at_position, Span};

    #[test]
    fn test_get_line_at_position() {
        let content = "Hello, world!\nsecond\n\nTesting { }\n";

        let (line_number, line, line_pos) = get_line_at_position(content, 10);
        assert_eq!(line_number, 1);
        assert_eq!(line, "Hello, world!");
        assert_eq!(line_pos, 10);

        let (line_number, line, line_pos) = get_line_at_position(content, 30);
        assert_eq!(line_number, 4);
        assert_eq!(line, "Testing { }");
        assert_eq!(line_pos, 8);
    }

    #[test]
    fn test_get_line_at_position_counts_characters() {
        let content = "let é = 1\nlet x = ü";
        let offset = content.rfind('ü').unwrap();

        let (line_number, line, column) = get_line_at_position(content, offset);
        assert_eq!(line_number, 2);
        assert_eq!(line, "let x = ü");
        assert_eq!(column, 8);
    }

    #[test]
    fn test_get_line_at_end_of_input() {
        let (line_number, line, column) = get_line_at_position("abc\ndef", 7);
        assert_eq!(line_number, 2);
        assert_eq!(line, "def");
        assert_eq!(column, 3);
    }

    #[test]
    fn test_span_spanning() {
        let file = Rc::new(String::from("test.fl"));
        let callee = Span::new(4, 7, &file);
        let close = Span::new(12, 13, &file);

        let call = callee.spanning(&close);
        assert_eq!(call.start.0, 4);
        assert_eq!(call.end.0, 13);
        assert_eq!(call.len(), 9);
    }
}
