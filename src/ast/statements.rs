use std::{rc::Rc, slice::Iter};

use crate::Span;

use super::{expressions::Expr, types::Type};

#[derive(Debug, Clone)]
pub struct BlockStmt {
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl BlockStmt {
    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.body.iter()
    }
}

#[derive(Debug, Clone)]
pub struct ExpressionStmt {
    pub expression: Expr,
}

#[derive(Debug, Clone)]
pub struct VarDeclStmt {
    pub identifier: String,
    pub assigned_value: Expr,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ReturnStmt {
    pub value: Expr,
    pub span: Span,
}

/// Shared so runtime function values can point back at their declaration.
#[derive(Debug)]
pub struct FnDeclStmt {
    pub identifier: String,
    pub parameters: Vec<(String, Type)>,
    pub return_type: Type,
    pub body: BlockStmt,
    pub span: Span,
}

impl FnDeclStmt {
    pub fn signature(&self) -> Type {
        let parameters = self.parameters.iter().map(|(_, ty)| ty.clone()).collect();
        Type::Function(Some(parameters), Box::new(self.return_type.clone()))
    }
}

#[derive(Debug, Clone)]
pub enum ElseBranch {
    Else(BlockStmt),
    ElseIf(Box<IfStmt>),
}

#[derive(Debug, Clone)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_body: BlockStmt,
    pub else_body: Option<ElseBranch>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: BlockStmt,
    pub span: Span,
}

/// `for variable in lower..upper`, upper bound exclusive.
#[derive(Debug, Clone)]
pub struct ForStmt {
    pub variable: String,
    pub lower: Expr,
    pub upper: Expr,
    pub body: BlockStmt,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum Stmt {
    FnDecl(Rc<FnDeclStmt>),
    Return(ReturnStmt),
    VarDecl(VarDeclStmt),
    Expression(ExpressionStmt),
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
    Block(BlockStmt),
}

impl Stmt {
    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::FnDecl(stmt) => &stmt.span,
            Stmt::Return(stmt) => &stmt.span,
            Stmt::VarDecl(stmt) => &stmt.span,
            Stmt::Expression(stmt) => stmt.expression.get_span(),
            Stmt::If(stmt) => &stmt.span,
            Stmt::While(stmt) => &stmt.span,
            Stmt::For(stmt) => &stmt.span,
            Stmt::Block(stmt) => &stmt.span,
        }
    }
}
