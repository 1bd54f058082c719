use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("fn", TokenKind::Fn);
        map.insert("let", TokenKind::Let);
        map.insert("return", TokenKind::Return);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("for", TokenKind::For);
        map.insert("in", TokenKind::In);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Int,
    Float,
    String,
    Identifier,
    True,
    False,

    OpenParen,
    CloseParen,
    OpenCurly,
    CloseCurly,
    OpenBracket,
    CloseBracket,

    Comma,
    Colon,
    DotDot,

    Plus,
    Dash,
    Star,
    Slash,

    Assignment, // =
    Equals,     // ==
    Not,        // !
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    // Reserved
    Fn,
    Let,
    Return,
    If,
    Else,
    While,
    For,
    In,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// What separates a token from its neighbour on one side.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Trivia {
    None,
    Whitespace,
    /// The separating whitespace contains at least one line break.
    Newline,
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
    pub leading_trivia: Trivia,
    pub trailing_trivia: Trivia,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}

impl Token {
    pub fn starts_line(&self) -> bool {
        self.leading_trivia == Trivia::Newline
    }

    /// Text used when a token is named in a diagnostic.
    pub fn description(&self) -> String {
        match self.kind {
            TokenKind::EOF => String::from("<eof>"),
            _ => self.value.clone(),
        }
    }

    /// The token rendered back to source form.
    pub fn source_text(&self) -> String {
        match self.kind {
            TokenKind::String => format!("\"{}\"", self.value),
            TokenKind::EOF => String::new(),
            _ => self.value.clone(),
        }
    }
}
