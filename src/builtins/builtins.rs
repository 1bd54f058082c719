use std::io::Write;

use rand::Rng;

use crate::{ast::types::Type, errors::fault::Fault, interpreter::value::Value};

/// Native functions. The type checker reads their signatures and the
/// interpreter executes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Print,
    ToString,
    RandomInt,
    RandomFloat,
    IToF,
    FToI,
    IntArray,
    UnicodeToString,
    Len,
}

impl Builtin {
    pub const ALL: [Builtin; 9] = [
        Builtin::Print,
        Builtin::ToString,
        Builtin::RandomInt,
        Builtin::RandomFloat,
        Builtin::IToF,
        Builtin::FToI,
        Builtin::IntArray,
        Builtin::UnicodeToString,
        Builtin::Len,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Builtin::Print => "print",
            Builtin::ToString => "to_string",
            Builtin::RandomInt => "random_int",
            Builtin::RandomFloat => "random_float",
            Builtin::IToF => "itof",
            Builtin::FToI => "ftoi",
            Builtin::IntArray => "int_array",
            Builtin::UnicodeToString => "unicode_to_string",
            Builtin::Len => "len",
        }
    }

    /// Variadic builtins carry no parameter list.
    pub fn signature(&self) -> Type {
        let (parameters, returns) = match self {
            Builtin::Print => (None, Type::Void),
            Builtin::ToString => (None, Type::String),
            Builtin::RandomInt => (Some(vec![Type::Int, Type::Int]), Type::Int),
            Builtin::RandomFloat => (Some(vec![Type::Float, Type::Float]), Type::Float),
            Builtin::IToF => (Some(vec![Type::Int]), Type::Float),
            Builtin::FToI => (Some(vec![Type::Float]), Type::Int),
            Builtin::IntArray => (Some(vec![Type::Int, Type::Int]), Type::array_of(Type::Int)),
            Builtin::UnicodeToString => (Some(vec![Type::Int]), Type::String),
            Builtin::Len => (None, Type::Int),
        };

        Type::Function(parameters, Box::new(returns))
    }

    pub fn execute(&self, args: &[Value], output: &mut dyn Write) -> Result<Value, Fault> {
        match (self, args) {
            (Builtin::Print, _) => {
                write!(output, "{}", concatenate(args))?;
                Ok(Value::Void)
            }
            (Builtin::ToString, _) => Ok(Value::String(concatenate(args))),
            (Builtin::RandomInt, [Value::Int(lower), Value::Int(upper)]) => {
                if lower >= upper {
                    return Err(Fault::EmptyRange {
                        lower: lower.to_string(),
                        upper: upper.to_string(),
                    });
                }

                Ok(Value::Int(rand::thread_rng().gen_range(*lower..*upper)))
            }
            (Builtin::RandomFloat, [Value::Float(lower), Value::Float(upper)]) => {
                if lower >= upper || !lower.is_finite() || !upper.is_finite() {
                    return Err(Fault::EmptyRange {
                        lower: format!("{:?}", lower),
                        upper: format!("{:?}", upper),
                    });
                }

                Ok(Value::Float(rand::thread_rng().gen_range(*lower..*upper)))
            }
            (Builtin::IToF, [Value::Int(value)]) => Ok(Value::Float(*value as f64)),
            // Truncates toward zero; out of range values saturate.
            (Builtin::FToI, [Value::Float(value)]) => Ok(Value::Int(*value as i64)),
            (Builtin::IntArray, [Value::Int(value), Value::Int(length)]) => {
                let length = usize::try_from(*length).map_err(|_| Fault::NegativeLength(*length))?;
                Ok(Value::Array(vec![Value::Int(*value); length]))
            }
            (Builtin::UnicodeToString, [Value::Int(scalar)]) => u32::try_from(*scalar)
                .ok()
                .and_then(char::from_u32)
                .map(|ch| Value::String(ch.to_string()))
                .ok_or(Fault::InvalidUnicodeScalar(*scalar)),
            (Builtin::Len, _) => {
                let len = match args.first() {
                    Some(Value::Array(values)) => values.len(),
                    Some(Value::String(string)) => string.chars().count(),
                    _ => 0,
                };
                Ok(Value::Int(len as i64))
            }
            _ => Err(Fault::TypeCheckerMissed(format!(
                "the arguments passed to '{}'",
                self.name()
            ))),
        }
    }
}

fn concatenate(args: &[Value]) -> String {
    args.iter().map(|arg| arg.to_string()).collect()
}
