//! Unit tests for the type checker and return path analysis.

use std::rc::Rc;

use crate::{
    ast::{statements::Stmt, types::Type},
    errors::{diagnostics::Diagnostics, errors::ErrorImpl},
    parser::parser::parse,
};

use super::{
    flow_analysis::{analyze_block, FlowResult},
    type_checker::type_check,
};

fn check(source: &str) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    let program = parse(source, Rc::new("test.fl".to_string()), &mut diagnostics);
    assert!(
        !diagnostics.has_errors(),
        "source should parse: {:?}",
        diagnostics.errors()
    );

    type_check(&program, &mut diagnostics).unwrap();
    diagnostics
}

fn error_names(source: &str) -> Vec<String> {
    check(source)
        .errors()
        .iter()
        .map(|error| error.get_error_name().to_string())
        .collect()
}

fn assert_accepts(source: &str) {
    let names = error_names(source);
    assert!(names.is_empty(), "unexpected errors: {:?}", names);
}

#[test]
fn test_accepts_valid_program() {
    assert_accepts(
        "fn add(a: int, b: int) int {\n    return a + b\n}\n\
         fn main() {\n    let xs = [1, 2, 3]\n    xs[0] = add(xs[1], 4)\n    print(\"sum \", xs[0], \"\\n\")\n}",
    );
}

#[test]
fn test_missing_return_is_rejected() {
    assert_eq!(error_names("fn f() int {\n}"), vec!["NotAllCodePathsReturn"]);
    assert_accepts("fn f() int {\n    return 1\n}");
}

#[test]
fn test_if_without_else_may_fall_through() {
    assert_eq!(
        error_names("fn f(a: bool) int {\n    if a {\n        return 1\n    }\n}"),
        vec!["NotAllCodePathsReturn"]
    );
    assert_accepts(
        "fn f(a: bool) int {\n    if a {\n        return 1\n    } else if a == false {\n        return 2\n    } else {\n        return 3\n    }\n}",
    );
}

#[test]
fn test_loop_bodies_count_as_returning() {
    // A loop whose body returns is accepted even though it may never run.
    assert_accepts("fn f(a: bool) int {\n    while a {\n        return 1\n    }\n}");
    assert_accepts("fn f() int {\n    for i in 0..0 {\n        return i\n    }\n}");
}

#[test]
fn test_void_functions_need_no_return() {
    assert_accepts("fn f() {\n    let a = 1\n}");
}

#[test]
fn test_flow_result_of_function_body() {
    let mut diagnostics = Diagnostics::new();
    let program = parse(
        "fn f() int {\n    let a = 1\n    return a\n    print(a)\n}",
        Rc::new("test.fl".to_string()),
        &mut diagnostics,
    );

    let Stmt::FnDecl(function) = &program[0] else {
        panic!("expected a function");
    };
    assert_eq!(analyze_block(&function.body), FlowResult::Returns);
    assert_eq!(
        FlowResult::Returns.merging(FlowResult::MayFallThrough),
        FlowResult::MayFallThrough
    );
}

#[test]
fn test_unknown_callee_reports_once() {
    let diagnostics = check("missing(1)");

    assert_eq!(diagnostics.errors().len(), 1);
    assert_eq!(
        diagnostics.errors()[0].get_kind(),
        &ErrorImpl::DoesNotExist {
            ident: "missing".to_string()
        }
    );
}

#[test]
fn test_redeclaration_in_same_frame() {
    assert_eq!(error_names("let a = 1\nlet a = 2"), vec!["AlreadyInScope"]);
}

#[test]
fn test_shadowing_a_global_inside_a_function() {
    assert_accepts("let a = 1\nfn main() {\n    let a = \"two\"\n    print(a)\n}");
}

#[test]
fn test_top_level_functions_do_not_see_caller_locals() {
    assert_eq!(
        error_names("fn helper() {\n    print(x)\n}\nfn main() {\n    let x = 1\n    helper()\n}"),
        vec!["DoesNotExist"]
    );
}

#[test]
fn test_nested_function_calls_itself() {
    assert_accepts(
        "fn main() {\n    fn g(n: int) int {\n        if n == 0 {\n            return 0\n        }\n        return g(n - 1)\n    }\n    print(g(3))\n}",
    );
}

#[test]
fn test_nested_function_sees_enclosing_locals() {
    assert_accepts("fn main() {\n    let k = 5\n    fn g() int {\n        return k\n    }\n    print(g())\n}");
    assert_eq!(
        error_names("fn main() {\n    fn g() int {\n        return k\n    }\n    let k = 5\n}"),
        vec!["DoesNotExist", "IncorrectType"]
    );
}

#[test]
fn test_forward_reference_between_functions() {
    assert_accepts("fn main() {\n    print(later(2))\n}\nfn later(a: int) int {\n    return a * 2\n}");
}

#[test]
fn test_duplicate_function() {
    assert_eq!(
        error_names("fn f() { }\nfn f() { }"),
        vec!["FunctionAlreadyDeclared"]
    );
    assert_eq!(error_names("fn len() { }"), vec!["FunctionAlreadyDeclared"]);
}

#[test]
fn test_duplicate_parameter() {
    assert_eq!(error_names("fn f(a: int, a: int) { }"), vec!["AlreadyInScope"]);
}

#[test]
fn test_return_type_mismatch() {
    let diagnostics = check("fn f() int {\n    return \"one\"\n}");

    assert_eq!(
        diagnostics.errors()[0].get_kind(),
        &ErrorImpl::IncorrectType {
            expected: Type::Int,
            received: Type::String
        }
    );
}

#[test]
fn test_return_outside_function() {
    assert_eq!(error_names("return 1"), vec!["CannotReturnHere"]);
}

#[test]
fn test_conditions_must_be_bool() {
    assert_eq!(error_names("if 1 { }"), vec!["IncorrectType"]);
    assert_eq!(error_names("while \"yes\" { }"), vec!["IncorrectType"]);
}

#[test]
fn test_array_elements_share_a_type() {
    assert_eq!(
        error_names("let a = [1, \"two\", 3, 4.0]"),
        vec!["IncorrectType", "IncorrectType"]
    );
    assert_accepts("let a = []");
}

#[test]
fn test_subscript_rules() {
    assert_accepts("let s = \"abc\"\nlet c = s[0] + \"d\"");
    assert_eq!(error_names("let a = 1\nlet b = a[0]"), vec!["CannotIndexInto"]);
    assert_eq!(error_names("let a = [1]\nlet b = a[\"0\"]"), vec!["IncorrectType"]);
}

#[test]
fn test_call_arguments() {
    assert_eq!(
        error_names("let a = random_int(1)"),
        vec!["IncorrectNumberOfArgs"]
    );
    assert_eq!(error_names("let a = itof(1.5)"), vec!["IncorrectType"]);
    assert_eq!(error_names("let a = 1\na(2)"), vec!["CannotExecute"]);
    assert_accepts("print(1, \"a\", [2], 3.0)");
}

#[test]
fn test_arithmetic_operands_must_be_numeric() {
    assert_eq!(error_names("let a = true - 1"), vec!["NumericValuesOnly"]);
    assert_eq!(error_names("let a = \"a\" < \"b\""), vec!["NumericValuesOnly", "NumericValuesOnly"]);
    assert_eq!(error_names("let a = true + false"), vec!["InvalidOperator"]);
}

#[test]
fn test_binary_result_types() {
    assert_accepts(
        "let a = 1 + 2.0\nlet b = 0.5\nb = a\nlet c = \"n\" + 1\nlet d = [1] + 2\nlet e = 1 == \"x\"\nlet f = true\nf = e",
    );
    assert_eq!(error_names("let a = 1 * 2\na = 1.5"), vec!["IncorrectType"]);
}

#[test]
fn test_assignment_rules() {
    assert_eq!(error_names("let a = 1\na = \"one\""), vec!["IncorrectType"]);
    assert_eq!(error_names("1 = 2"), vec!["InvalidAssignmentTarget"]);
    assert_eq!(error_names("f()[0] = 2\nfn f() [int] { return [1] }"), vec!["InvalidAssignmentTarget"]);
}

#[test]
fn test_for_bounds_must_be_int() {
    assert_eq!(error_names("for i in 0..1.5 { }"), vec!["IncorrectType"]);
    assert_accepts("for i in 0..3 {\n    let j = i + 1\n}");
}

#[test]
fn test_checking_continues_after_errors() {
    assert_eq!(
        error_names("let a = nope\nlet b = 1 + true\nreturn 2"),
        vec!["DoesNotExist", "InvalidOperator", "CannotReturnHere"]
    );
}
