//! Static types of the language.
//!
//! Types appear in annotations written by the user (parameters and return
//! types) and are inferred for every expression by the type checker.

use std::fmt::Display;

#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Int,
    Float,
    String,
    Bool,
    Void,
    Array(Box<Type>),
    /// Parameter list and return type. `None` parameters accept any
    /// arguments.
    Function(Option<Vec<Type>>, Box<Type>),
}

impl Type {
    pub fn is_numeric(&self) -> bool {
        matches!(self, Type::Int | Type::Float)
    }

    pub fn array_of(element: Type) -> Type {
        Type::Array(Box::new(element))
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Float => write!(f, "float"),
            Type::String => write!(f, "string"),
            Type::Bool => write!(f, "bool"),
            Type::Void => write!(f, "void"),
            Type::Array(element) => write!(f, "[{}]", element),
            Type::Function(None, returns) => write!(f, "fn(...) {}", returns),
            Type::Function(Some(parameters), returns) => {
                let parameters = parameters
                    .iter()
                    .map(|parameter| parameter.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "fn({}) {}", parameters, returns)
            }
        }
    }
}
