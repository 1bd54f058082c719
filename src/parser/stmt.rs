use std::rc::Rc;

use crate::{
    ast::{
        statements::{
            BlockStmt, ElseBranch, ExpressionStmt, FnDeclStmt, ForStmt, IfStmt, ReturnStmt, Stmt,
            VarDeclStmt, WhileStmt,
        },
        types::Type,
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::{parser::Parser, types::parse_type};

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if let Some(handler) = parser.get_stmt_handler(parser.current_token_kind()) {
        return handler(parser);
    }

    let expression = parse_expr(parser, BindingPower::Default)?;
    Ok(Stmt::Expression(ExpressionStmt { expression }))
}

/// Parses one statement. On failure the error is recorded, the parser skips
/// to the next line and `None` is returned.
pub fn parse_stmt_or_recover(parser: &mut Parser) -> Option<Stmt> {
    let consumed_before = parser.consumed();

    match parse_stmt(parser) {
        Ok(stmt) => Some(stmt),
        Err(error) => {
            parser.record(error);
            parser.recover(consumed_before);
            None
        }
    }
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<BlockStmt, Error> {
    let start = parser.expect(TokenKind::OpenCurly)?.span;
    let mut body = vec![];

    while parser.current_token_kind() != TokenKind::CloseCurly
        && parser.current_token_kind() != TokenKind::EOF
    {
        if let Some(stmt) = parse_stmt_or_recover(parser) {
            body.push(stmt);
        }
    }

    let end = parser.expect(TokenKind::CloseCurly)?.span;

    Ok(BlockStmt {
        body,
        span: start.spanning(&end),
    })
}

pub fn parse_block(parser: &mut Parser) -> Result<Stmt, Error> {
    Ok(Stmt::Block(parse_block_stmt(parser)?))
}

pub fn parse_fn_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span;
    let identifier = parser.expect(TokenKind::Identifier)?.value;

    parser.expect(TokenKind::OpenParen)?;
    let mut parameters = vec![];

    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            let name = parser.expect(TokenKind::Identifier)?.value;
            parser.expect(TokenKind::Colon)?;
            let (ty, _) = parse_type(parser)?;
            parameters.push((name, ty));

            if parser.current_token_kind() == TokenKind::Comma {
                parser.advance();
            } else {
                break;
            }
        }
    }

    let mut end = parser.expect(TokenKind::CloseParen)?.span;
    let return_type = if parser.current_token_kind() == TokenKind::OpenCurly {
        Type::Void
    } else {
        let (ty, span) = parse_type(parser)?;
        end = span;
        ty
    };

    let body = parse_block_stmt(parser)?;

    Ok(Stmt::FnDecl(Rc::new(FnDeclStmt {
        identifier,
        parameters,
        return_type,
        body,
        span: start.spanning(&end),
    })))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span;
    let value = parse_expr(parser, BindingPower::Default)?;

    Ok(Stmt::Return(ReturnStmt {
        span: start.spanning(value.get_span()),
        value,
    }))
}

pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span;
    let identifier = parser.expect(TokenKind::Identifier)?.value;
    parser.expect(TokenKind::Assignment)?;
    let assigned_value = parse_expr(parser, BindingPower::Default)?;

    Ok(Stmt::VarDecl(VarDeclStmt {
        span: start.spanning(assigned_value.get_span()),
        identifier,
        assigned_value,
    }))
}

fn parse_if(parser: &mut Parser) -> Result<IfStmt, Error> {
    let start = parser.advance().span;
    let condition = parse_expr(parser, BindingPower::Default)?;
    let span = start.spanning(condition.get_span());
    let then_body = parse_block_stmt(parser)?;

    let else_body = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();

        if parser.current_token_kind() == TokenKind::If {
            Some(ElseBranch::ElseIf(Box::new(parse_if(parser)?)))
        } else {
            Some(ElseBranch::Else(parse_block_stmt(parser)?))
        }
    } else {
        None
    };

    Ok(IfStmt {
        condition,
        then_body,
        else_body,
        span,
    })
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    Ok(Stmt::If(parse_if(parser)?))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span;
    let condition = parse_expr(parser, BindingPower::Default)?;
    let span = start.spanning(condition.get_span());
    let body = parse_block_stmt(parser)?;

    Ok(Stmt::While(WhileStmt {
        condition,
        body,
        span,
    }))
}

/// `for i in lower..upper { ... }`
pub fn parse_for_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span;
    let variable = parser.expect(TokenKind::Identifier)?.value;
    parser.expect(TokenKind::In)?;
    let lower = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::DotDot)?;
    let upper = parse_expr(parser, BindingPower::Default)?;
    let span = start.spanning(upper.get_span());
    let body = parse_block_stmt(parser)?;

    Ok(Stmt::For(ForStmt {
        variable,
        lower,
        upper,
        body,
        span,
    }))
}
