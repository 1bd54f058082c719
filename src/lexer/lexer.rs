use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    errors::{
        diagnostics::Diagnostics,
        errors::{Error, ErrorImpl, ErrorPhase},
    },
    Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, Trivia, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &str, &mut Diagnostics) -> Token;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

fn pattern(regex: &str, handler: RegexHandler) -> RegexPattern {
    RegexPattern {
        regex: Regex::new(regex).unwrap(),
        handler,
    }
}

lazy_static! {
    static ref SKIP: Regex = Regex::new("^(\\s+|//[^\\n]*)").unwrap();

    // Longer operators come before their prefixes.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        pattern("^[\\p{L}_][\\p{L}\\p{N}_]*", symbol_handler),
        pattern("^[0-9]+(\\.[0-9]+)?", number_handler),
        pattern("^\"[^\"]*\"?", string_handler),
        pattern("^\\.\\.", MK_DEFAULT_HANDLER!(TokenKind::DotDot)),
        pattern("^==", MK_DEFAULT_HANDLER!(TokenKind::Equals)),
        pattern("^!=", MK_DEFAULT_HANDLER!(TokenKind::NotEquals)),
        pattern("^!", MK_DEFAULT_HANDLER!(TokenKind::Not)),
        pattern("^=", MK_DEFAULT_HANDLER!(TokenKind::Assignment)),
        pattern("^<=", MK_DEFAULT_HANDLER!(TokenKind::LessEquals)),
        pattern("^<", MK_DEFAULT_HANDLER!(TokenKind::Less)),
        pattern("^>=", MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals)),
        pattern("^>", MK_DEFAULT_HANDLER!(TokenKind::Greater)),
        pattern("^\\[", MK_DEFAULT_HANDLER!(TokenKind::OpenBracket)),
        pattern("^\\]", MK_DEFAULT_HANDLER!(TokenKind::CloseBracket)),
        pattern("^\\{", MK_DEFAULT_HANDLER!(TokenKind::OpenCurly)),
        pattern("^\\}", MK_DEFAULT_HANDLER!(TokenKind::CloseCurly)),
        pattern("^\\(", MK_DEFAULT_HANDLER!(TokenKind::OpenParen)),
        pattern("^\\)", MK_DEFAULT_HANDLER!(TokenKind::CloseParen)),
        pattern("^,", MK_DEFAULT_HANDLER!(TokenKind::Comma)),
        pattern("^:", MK_DEFAULT_HANDLER!(TokenKind::Colon)),
        pattern("^\\+", MK_DEFAULT_HANDLER!(TokenKind::Plus)),
        pattern("^-", MK_DEFAULT_HANDLER!(TokenKind::Dash)),
        pattern("^\\*", MK_DEFAULT_HANDLER!(TokenKind::Star)),
        pattern("^/", MK_DEFAULT_HANDLER!(TokenKind::Slash)),
    ];
}

/// Pull-based tokenizer over one source file.
pub struct Lexer {
    source: String,
    pos: usize,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: &str, file: Rc<String>) -> Lexer {
        Lexer {
            source: String::from(source),
            pos: 0,
            file,
        }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn file(&self) -> &Rc<String> {
        &self.file
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.source.len());
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Builds a token covering `[start, end)`, classifying the trivia on
    /// either side of that range.
    pub fn make_token(&self, kind: TokenKind, value: String, start: usize, end: usize) -> Token {
        let leading = classify_trivia(self.source[..start].chars().rev());
        let trailing = classify_trivia(self.source[end..].chars());

        MK_TOKEN!(kind, value, Span::new(start, end, &self.file), leading, trailing)
    }

    fn skip_trivia(&mut self) {
        while let Some(found) = SKIP.find(self.remainder()) {
            let len = found.end();
            self.advance_n(len);
        }
    }

    /// Produces the next token. Unrecognised characters are reported and
    /// skipped. Once the input is exhausted every call returns EOF.
    pub fn next_token(&mut self, diagnostics: &mut Diagnostics) -> Token {
        loop {
            self.skip_trivia();

            if self.at_eof() {
                return self.make_token(TokenKind::EOF, String::from("EOF"), self.pos, self.pos);
            }

            let matched = PATTERNS.iter().find_map(|pattern| {
                pattern
                    .regex
                    .find(self.remainder())
                    .map(|found| (pattern.handler, found.as_str().to_string()))
            });

            if let Some((handler, text)) = matched {
                return handler(self, &text, diagnostics);
            }

            let Some(unknown) = self.remainder().chars().next() else {
                continue;
            };
            let start = self.pos;
            self.advance_n(unknown.len_utf8());
            diagnostics.record(
                Error::new(
                    ErrorImpl::UnexpectedToken {
                        token: unknown.to_string(),
                    },
                    Span::new(start, self.pos, &self.file),
                )
                .in_phase(ErrorPhase::Lex),
            );
        }
    }
}

fn classify_trivia(chars: impl Iterator<Item = char>) -> Trivia {
    let mut trivia = Trivia::None;

    for ch in chars {
        if ch == '\n' {
            return Trivia::Newline;
        } else if ch.is_whitespace() {
            trivia = Trivia::Whitespace;
        } else {
            break;
        }
    }

    trivia
}

fn number_handler(lexer: &mut Lexer, matched: &str, _diagnostics: &mut Diagnostics) -> Token {
    let kind = if matched.contains('.') {
        TokenKind::Float
    } else {
        TokenKind::Int
    };

    let start = lexer.pos();
    lexer.advance_n(matched.len());
    lexer.make_token(kind, String::from(matched), start, lexer.pos())
}

fn string_handler(lexer: &mut Lexer, matched: &str, diagnostics: &mut Diagnostics) -> Token {
    let start = lexer.pos();
    lexer.advance_n(matched.len());
    let end = lexer.pos();

    let terminated = matched.len() >= 2 && matched.ends_with('"');
    let contents_end = if terminated { end - 1 } else { end };
    let contents = String::from(&matched[1..contents_end - start]);

    let mut token = lexer.make_token(TokenKind::String, contents, start, end);
    token.span = Span::new(start + 1, contents_end, lexer.file());

    if !terminated {
        diagnostics.add(ErrorImpl::UnterminatedString, &Span::new(start, end, lexer.file()));
    }

    token
}

fn symbol_handler(lexer: &mut Lexer, matched: &str, _diagnostics: &mut Diagnostics) -> Token {
    let kind = RESERVED_LOOKUP
        .get(matched)
        .copied()
        .unwrap_or(TokenKind::Identifier);

    let start = lexer.pos();
    lexer.advance_n(matched.len());
    lexer.make_token(kind, String::from(matched), start, lexer.pos())
}

/// Lexes a whole file, including the trailing EOF token.
pub fn tokenize(source: &str, file: Rc<String>, diagnostics: &mut Diagnostics) -> Vec<Token> {
    let mut lexer = Lexer::new(source, file);
    let mut tokens = vec![];

    loop {
        let token = lexer.next_token(diagnostics);
        let done = token.kind == TokenKind::EOF;
        tokens.push(token);

        if done {
            return tokens;
        }
    }
}
