use std::fmt::Display;

use crate::lexer::tokens::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    NotEqual,
    Equal,
    Lt,
    LtOrEq,
    Gt,
    GtOrEq,
    Plus,
    Minus,
    Divide,
    Multiply,
}

impl Operator {
    pub fn from_token_kind(kind: TokenKind) -> Option<Operator> {
        match kind {
            TokenKind::NotEquals => Some(Operator::NotEqual),
            TokenKind::Equals => Some(Operator::Equal),
            TokenKind::Less => Some(Operator::Lt),
            TokenKind::LessEquals => Some(Operator::LtOrEq),
            TokenKind::Greater => Some(Operator::Gt),
            TokenKind::GreaterEquals => Some(Operator::GtOrEq),
            TokenKind::Plus => Some(Operator::Plus),
            TokenKind::Dash => Some(Operator::Minus),
            TokenKind::Slash => Some(Operator::Divide),
            TokenKind::Star => Some(Operator::Multiply),
            _ => None,
        }
    }

    pub fn is_equality(&self) -> bool {
        matches!(self, Operator::Equal | Operator::NotEqual)
    }

    pub fn is_ordering(&self) -> bool {
        matches!(
            self,
            Operator::Lt | Operator::LtOrEq | Operator::Gt | Operator::GtOrEq
        )
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            Operator::NotEqual => "!=",
            Operator::Equal => "==",
            Operator::Lt => "<",
            Operator::LtOrEq => "<=",
            Operator::Gt => ">",
            Operator::GtOrEq => ">=",
            Operator::Plus => "+",
            Operator::Minus => "-",
            Operator::Divide => "/",
            Operator::Multiply => "*",
        };
        write!(f, "{}", symbol)
    }
}
