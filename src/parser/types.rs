//! Type annotation parsing.
//!
//! Annotations are either one of the primitive type names or `[T]` for an
//! array of `T`, nested to any depth.

use crate::{
    ast::types::Type,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::parser::Parser;

/// Parses a type annotation, returning it with the source range it covers.
pub fn parse_type(parser: &mut Parser) -> Result<(Type, Span), Error> {
    if parser.current_token_kind() == TokenKind::OpenBracket {
        let start = parser.advance().span;
        let (element, _) = parse_type(parser)?;
        let end = parser.expect(TokenKind::CloseBracket)?.span;

        return Ok((Type::array_of(element), start.spanning(&end)));
    }

    let token = parser.expect(TokenKind::Identifier)?;
    let ty = match token.value.as_str() {
        "int" => Type::Int,
        "float" => Type::Float,
        "string" => Type::String,
        "bool" => Type::Bool,
        "void" => Type::Void,
        _ => {
            return Err(Error::new(
                ErrorImpl::NotAType { name: token.value },
                token.span,
            ))
        }
    };

    Ok((ty, token.span))
}
