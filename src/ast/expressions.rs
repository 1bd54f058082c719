use crate::Span;

use super::operators::Operator;

// LITERALS

#[derive(Debug, Clone)]
pub struct IntExpr {
    pub value: i64,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct FloatExpr {
    pub value: f64,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct StringExpr {
    pub value: String,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct BoolExpr {
    pub value: bool,
    pub span: Span,
}

/// Array literal. An empty literal has element type void.
#[derive(Debug, Clone)]
pub struct ArrayExpr {
    pub elements: Vec<Expr>,
    pub span: Span,
}

// COMPLEX

#[derive(Debug, Clone)]
pub struct SymbolExpr {
    pub value: String,
    pub span: Span,
}

/// Call of a named function. Only identifiers can be called.
#[derive(Debug, Clone)]
pub struct CallExpr {
    pub callee: String,
    pub callee_span: Span,
    pub arguments: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct SubscriptExpr {
    pub value: Box<Expr>,
    pub index: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: Operator,
    pub right: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct AssignmentExpr {
    pub assignee: Box<Expr>,
    pub value: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum Expr {
    Int(IntExpr),
    Float(FloatExpr),
    String(StringExpr),
    Bool(BoolExpr),
    Array(ArrayExpr),
    Symbol(SymbolExpr),
    Call(CallExpr),
    Subscript(SubscriptExpr),
    Binary(BinaryExpr),
    Assignment(AssignmentExpr),
}

impl Expr {
    pub fn get_span(&self) -> &Span {
        match self {
            Expr::Int(expr) => &expr.span,
            Expr::Float(expr) => &expr.span,
            Expr::String(expr) => &expr.span,
            Expr::Bool(expr) => &expr.span,
            Expr::Array(expr) => &expr.span,
            Expr::Symbol(expr) => &expr.span,
            Expr::Call(expr) => &expr.span,
            Expr::Subscript(expr) => &expr.span,
            Expr::Binary(expr) => &expr.span,
            Expr::Assignment(expr) => &expr.span,
        }
    }

    /// Identifiers and subscript chains rooted at one.
    pub fn is_assignable(&self) -> bool {
        match self {
            Expr::Symbol(_) => true,
            Expr::Subscript(subscript) => subscript.value.is_assignable(),
            _ => false,
        }
    }
}
