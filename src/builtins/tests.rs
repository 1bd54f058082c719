use crate::{ast::types::Type, errors::fault::Fault, interpreter::value::Value};

use super::builtins::Builtin;

fn call(builtin: Builtin, args: &[Value]) -> Result<Value, Fault> {
    let mut output = Vec::new();
    builtin.execute(args, &mut output)
}

#[test]
fn test_names_are_unique() {
    let mut names = Builtin::ALL.iter().map(|b| b.name()).collect::<Vec<_>>();
    names.sort();
    names.dedup();

    assert_eq!(names.len(), Builtin::ALL.len());
}

#[test]
fn test_variadic_signatures() {
    assert_eq!(Builtin::Print.signature(), Type::Function(None, Box::new(Type::Void)));
    assert_eq!(Builtin::Len.signature(), Type::Function(None, Box::new(Type::Int)));
    assert_eq!(
        Builtin::IntArray.signature(),
        Type::Function(
            Some(vec![Type::Int, Type::Int]),
            Box::new(Type::array_of(Type::Int))
        )
    );
}

#[test]
fn test_print_concatenates_without_newline() {
    let mut output = Vec::new();
    let result = Builtin::Print
        .execute(
            &[Value::String("a".into()), Value::Int(1), Value::Float(2.0)],
            &mut output,
        )
        .unwrap();

    assert_eq!(result, Value::Void);
    assert_eq!(String::from_utf8(output).unwrap(), "a12.0");
}

#[test]
fn test_to_string() {
    let result = call(
        Builtin::ToString,
        &[
            Value::Array(vec![Value::Int(1), Value::Bool(true)]),
            Value::String("!".into()),
        ],
    )
    .unwrap();

    assert_eq!(result, Value::String("[1, true]!".into()));
}

#[test]
fn test_len() {
    let array = Value::Array(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);

    assert_eq!(call(Builtin::Len, &[array]).unwrap(), Value::Int(3));
    assert_eq!(call(Builtin::Len, &[Value::String("hello".into())]).unwrap(), Value::Int(5));
    assert_eq!(call(Builtin::Len, &[Value::String("héé".into())]).unwrap(), Value::Int(3));
    assert_eq!(call(Builtin::Len, &[Value::Int(42)]).unwrap(), Value::Int(0));
    assert_eq!(call(Builtin::Len, &[]).unwrap(), Value::Int(0));
}

#[test]
fn test_numeric_conversions() {
    assert_eq!(call(Builtin::IToF, &[Value::Int(3)]).unwrap(), Value::Float(3.0));
    assert_eq!(call(Builtin::FToI, &[Value::Float(2.9)]).unwrap(), Value::Int(2));
    assert_eq!(call(Builtin::FToI, &[Value::Float(-2.9)]).unwrap(), Value::Int(-2));
}

#[test]
fn test_random_stays_in_range() {
    for _ in 0..100 {
        let Value::Int(value) = call(Builtin::RandomInt, &[Value::Int(3), Value::Int(6)]).unwrap() else {
            panic!("expected an int");
        };
        assert!((3..6).contains(&value));

        let Value::Float(value) =
            call(Builtin::RandomFloat, &[Value::Float(0.5), Value::Float(1.0)]).unwrap()
        else {
            panic!("expected a float");
        };
        assert!((0.5..1.0).contains(&value));
    }
}

#[test]
fn test_random_empty_range() {
    assert!(matches!(
        call(Builtin::RandomInt, &[Value::Int(4), Value::Int(4)]),
        Err(Fault::EmptyRange { .. })
    ));
    assert!(matches!(
        call(Builtin::RandomFloat, &[Value::Float(1.0), Value::Float(f64::NAN)]),
        Err(Fault::EmptyRange { .. })
    ));
}

#[test]
fn test_int_array() {
    assert_eq!(
        call(Builtin::IntArray, &[Value::Int(7), Value::Int(2)]).unwrap(),
        Value::Array(vec![Value::Int(7), Value::Int(7)])
    );
    assert!(matches!(
        call(Builtin::IntArray, &[Value::Int(7), Value::Int(-1)]),
        Err(Fault::NegativeLength(-1))
    ));
}

#[test]
fn test_unicode_to_string() {
    assert_eq!(
        call(Builtin::UnicodeToString, &[Value::Int(0x41)]).unwrap(),
        Value::String("A".into())
    );
    assert!(matches!(
        call(Builtin::UnicodeToString, &[Value::Int(0xD800)]),
        Err(Fault::InvalidUnicodeScalar(0xD800))
    ));
}

#[test]
fn test_wrong_arguments_fault() {
    assert!(matches!(
        call(Builtin::IToF, &[Value::String("1".into())]),
        Err(Fault::TypeCheckerMissed(_))
    ));
}
