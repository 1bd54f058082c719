//! Utility macros for the lexer.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DEFAULT_HANDLER!` - Creates a lexer handler for fixed punctuation tokens

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's source text
/// * `$span` - The source span
/// * `$leading` - Trivia immediately before the token
/// * `$trailing` - Trivia immediately after the token
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Int, "42".to_string(), span, Trivia::None, Trivia::Newline);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr, $leading:expr, $trailing:expr) => {
        Token {
            kind: $kind,
            value: $value,
            span: $span,
            leading_trivia: $leading,
            trailing_trivia: $trailing,
        }
    };
}

/// Creates a lexer handler for a punctuation or operator token.
///
/// The generated handler consumes the matched text and emits a token of
/// the given kind covering it.
///
/// # Example
///
/// ```ignore
/// RegexPattern {
///     regex: Regex::new("^\\+").unwrap(),
///     handler: MK_DEFAULT_HANDLER!(TokenKind::Plus),
/// }
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr) => {
        |lexer: &mut Lexer, matched: &str, _diagnostics: &mut Diagnostics| {
            let start = lexer.pos();
            lexer.advance_n(matched.len());
            let end = lexer.pos();
            lexer.make_token($kind, String::from(matched), start, end)
        }
    };
}
