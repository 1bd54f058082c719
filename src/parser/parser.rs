//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the `parse` entry point.
//! The parser keeps two tokens of lookahead over a pull-based lexer and
//! dispatches through lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix and postfix expressions
//! - Binding powers for operator precedence

use std::{collections::HashMap, mem, rc::Rc};

use crate::{
    ast::statements::Stmt,
    errors::{
        diagnostics::Diagnostics,
        errors::{Error, ErrorImpl},
    },
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler,
        NUDLookup, StmtHandler, StmtLookup,
    },
    stmt::parse_stmt_or_recover,
};

/// The main parser structure that maintains parsing state.
pub struct Parser<'a> {
    lexer: Lexer,
    diagnostics: &'a mut Diagnostics,
    current: Token,
    peek: Token,
    /// Number of tokens consumed so far, used to guarantee recovery makes
    /// progress.
    consumed: usize,
    stmt_lookup: StmtLookup,
    nud_lookup: NUDLookup,
    led_lookup: LEDLookup,
    binding_power_lookup: BPLookup,
}

impl<'a> Parser<'a> {
    pub fn new(source: &str, file: Rc<String>, diagnostics: &'a mut Diagnostics) -> Self {
        let mut lexer = Lexer::new(source, file);
        let current = lexer.next_token(diagnostics);
        let peek = lexer.next_token(diagnostics);

        Parser {
            lexer,
            diagnostics,
            current,
            peek,
            consumed: 0,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        }
    }

    pub fn current_token(&self) -> &Token {
        &self.current
    }

    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    pub fn peek_token(&self) -> &Token {
        &self.peek
    }

    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Advances to the next token and returns the previous token.
    pub fn advance(&mut self) -> Token {
        let next = self.lexer.next_token(self.diagnostics);
        let upcoming = mem::replace(&mut self.peek, next);
        self.consumed += 1;
        mem::replace(&mut self.current, upcoming)
    }

    pub fn unexpected_token(&self) -> Error {
        Error::new(
            ErrorImpl::UnexpectedToken {
                token: self.current.description(),
            },
            self.current.span.clone(),
        )
    }

    /// Expects a token of the specified kind and consumes it.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        if self.current.kind != expected_kind {
            Err(self.unexpected_token())
        } else {
            Ok(self.advance())
        }
    }

    pub fn record(&mut self, error: Error) {
        self.diagnostics.record(error);
    }

    /// Discards tokens until one starts a new line. A statement that failed
    /// without consuming anything loses its first token so parsing always
    /// moves forward.
    pub fn recover(&mut self, consumed_before: usize) {
        if self.consumed == consumed_before && self.current.kind != TokenKind::EOF {
            self.advance();
        }

        while self.current.kind != TokenKind::EOF && !self.current.starts_line() {
            self.advance();
        }
    }

    pub fn get_stmt_handler(&self, kind: TokenKind) -> Option<StmtHandler> {
        self.stmt_lookup.get(&kind).copied()
    }

    pub fn get_nud_handler(&self, kind: TokenKind) -> Option<NUDHandler> {
        self.nud_lookup.get(&kind).copied()
    }

    pub fn get_led_handler(&self, kind: TokenKind) -> Option<LEDHandler> {
        self.led_lookup.get(&kind).copied()
    }

    pub fn get_binding_power(&self, kind: TokenKind) -> Option<BindingPower> {
        self.binding_power_lookup.get(&kind).copied()
    }

    /// Registers a left denotation (infix or postfix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }
}

/// Parses one source file into its top-level statements.
///
/// Syntax errors are recorded in `diagnostics` and parsing resumes at the
/// next line, so the returned list holds every statement that parsed.
pub fn parse(source: &str, file: Rc<String>, diagnostics: &mut Diagnostics) -> Vec<Stmt> {
    let mut parser = Parser::new(source, file, diagnostics);
    create_token_lookups(&mut parser);

    let mut body = vec![];

    while parser.current_token_kind() != TokenKind::EOF {
        if let Some(stmt) = parse_stmt_or_recover(&mut parser) {
            body.push(stmt);
        }
    }

    body
}
