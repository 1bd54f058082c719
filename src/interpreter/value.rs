use std::{fmt::Display, rc::Rc};

use crate::{ast::statements::FnDeclStmt, builtins::builtins::Builtin, scope::scope::FrameHandle};

/// A runtime value. Aggregates are copied on read; writes go back through
/// a storage location.
#[derive(Debug, Clone)]
pub enum Value {
    Builtin(Builtin),
    /// A user function and the frame it was declared in.
    Function(Rc<FnDeclStmt>, FrameHandle),
    Int(i64),
    Float(f64),
    String(String),
    Bool(bool),
    Array(Vec<Value>),
    Void,
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Builtin(_) | Value::Function(..) => "function",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Bool(_) => "bool",
            Value::Array(_) => "array",
            Value::Void => "void",
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Builtin(builtin) => write!(f, "{}", builtin.name()),
            Value::Function(function, _) => write!(f, "{}", function.identifier),
            Value::Int(value) => write!(f, "{}", value),
            Value::Float(value) => write!(f, "{:?}", value),
            Value::String(value) => write!(f, "{}", value),
            Value::Bool(value) => write!(f, "{}", value),
            Value::Array(values) => {
                let values = values
                    .iter()
                    .map(|value| value.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "[{}]", values)
            }
            Value::Void => write!(f, "void"),
        }
    }
}

/// Structural equality. Ints compare equal to floats of the same value and
/// functions compare by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Builtin(l), Value::Builtin(r)) => l == r,
            (Value::Function(l, l_frame), Value::Function(r, r_frame)) => {
                Rc::ptr_eq(l, r) && l_frame == r_frame
            },
            (Value::Int(l), Value::Int(r)) => l == r,
            (Value::Float(l), Value::Float(r)) => l == r,
            (Value::Int(l), Value::Float(r)) => (*l as f64) == *r,
            (Value::Float(l), Value::Int(r)) => *l == (*r as f64),
            (Value::String(l), Value::String(r)) => l == r,
            (Value::Bool(l), Value::Bool(r)) => l == r,
            (Value::Array(l), Value::Array(r)) => l == r,
            (Value::Void, Value::Void) => true,
            _ => false,
        }
    }
}
