use crate::{
    ast::{
        expressions::{
            ArrayExpr, AssignmentExpr, BinaryExpr, BoolExpr, CallExpr, Expr, FloatExpr, IntExpr,
            StringExpr, SubscriptExpr, SymbolExpr,
        },
        operators::Operator,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser};

/// Parses an expression whose infix operators all bind tighter than `bp`.
pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    let token_kind = parser.current_token_kind();
    let Some(nud) = parser.get_nud_handler(token_kind) else {
        return Err(Error::new(
            ErrorImpl::ExpectedExpression,
            parser.current_token().span.clone(),
        ));
    };

    let mut left = nud(parser)?;

    loop {
        let token_kind = parser.current_token_kind();
        let Some(token_bp) = parser.get_binding_power(token_kind) else {
            break;
        };

        if token_bp <= bp {
            break;
        }

        // Only a bare identifier can be called.
        if token_kind == TokenKind::OpenParen && !matches!(left, Expr::Symbol(_)) {
            break;
        }

        let Some(led) = parser.get_led_handler(token_kind) else {
            break;
        };
        left = led(parser, left, token_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.current_token().clone();

    let expr = match token.kind {
        TokenKind::Int => match token.value.parse() {
            Ok(value) => Expr::Int(IntExpr {
                value,
                span: token.span,
            }),
            Err(_) => {
                return Err(Error::new(
                    ErrorImpl::NumberParseError { token: token.value },
                    token.span,
                ))
            }
        },
        TokenKind::Float => match token.value.parse() {
            Ok(value) => Expr::Float(FloatExpr {
                value,
                span: token.span,
            }),
            Err(_) => {
                return Err(Error::new(
                    ErrorImpl::NumberParseError { token: token.value },
                    token.span,
                ))
            }
        },
        TokenKind::String => Expr::String(StringExpr {
            value: token.value,
            span: token.span,
        }),
        TokenKind::True | TokenKind::False => Expr::Bool(BoolExpr {
            value: token.kind == TokenKind::True,
            span: token.span,
        }),
        TokenKind::Identifier => Expr::Symbol(SymbolExpr {
            value: token.value,
            span: token.span,
        }),
        _ => return Err(parser.unexpected_token()),
    };

    parser.advance();
    Ok(expr)
}

/// `[a, b, c]`. Separating commas are optional.
pub fn parse_array_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().span;
    let mut elements = vec![];

    while parser.current_token_kind() != TokenKind::CloseBracket
        && parser.current_token_kind() != TokenKind::EOF
    {
        elements.push(parse_expr(parser, BindingPower::Default)?);

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        }
    }

    let end = parser.expect(TokenKind::CloseBracket)?.span;

    Ok(Expr::Array(ArrayExpr {
        elements,
        span: start.spanning(&end),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let Some(operator) = Operator::from_token_kind(operator_token.kind) else {
        return Err(Error::new(
            ErrorImpl::UnexpectedToken {
                token: operator_token.description(),
            },
            operator_token.span,
        ));
    };

    let right = parse_expr(parser, bp)?;

    Ok(Expr::Binary(BinaryExpr {
        span: left.get_span().spanning(right.get_span()),
        left: Box::new(left),
        operator,
        right: Box::new(right),
    }))
}

pub fn parse_assignment_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    parser.advance();
    let rhs = parse_expr(parser, BindingPower::Default)?;

    Ok(Expr::Assignment(AssignmentExpr {
        span: left.get_span().spanning(rhs.get_span()),
        assignee: Box::new(left),
        value: Box::new(rhs),
    }))
}

pub fn parse_subscript_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    parser.advance();
    let index = parse_expr(parser, BindingPower::Default)?;
    let end = parser.expect(TokenKind::CloseBracket)?.span;

    Ok(Expr::Subscript(SubscriptExpr {
        span: left.get_span().spanning(&end),
        value: Box::new(left),
        index: Box::new(index),
    }))
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    let Expr::Symbol(callee) = left else {
        return Err(parser.unexpected_token());
    };

    parser.advance();
    let mut arguments = vec![];

    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            arguments.push(parse_expr(parser, BindingPower::Default)?);

            if parser.current_token_kind() == TokenKind::Comma {
                parser.advance();
            } else {
                break;
            }
        }
    }

    let end = parser.expect(TokenKind::CloseParen)?.span;

    Ok(Expr::Call(CallExpr {
        span: callee.span.spanning(&end),
        callee: callee.value,
        callee_span: callee.span,
        arguments,
    }))
}
