//! Integration tests for the complete pipeline.
//!
//! Each test feeds source text through `flight::run` or `flight::compile`
//! and checks the program output or the aggregated diagnostic report.

use flight::{errors::errors::FlightError, SourceFile};

fn run_program(source: &str) -> Result<String, FlightError> {
    run_files(&[("main.fl", source)])
}

fn run_files(files: &[(&str, &str)]) -> Result<String, FlightError> {
    let sources = files
        .iter()
        .map(|(name, contents)| SourceFile::new(*name, *contents))
        .collect::<Vec<_>>();

    let mut output = Vec::new();
    flight::run(&sources, &mut output)?;
    Ok(String::from_utf8(output).unwrap())
}

fn output_of(source: &str) -> String {
    match run_program(source) {
        Ok(output) => output,
        Err(error) => panic!("program failed:\n{}", error),
    }
}

fn report_of(source: &str) -> String {
    match run_program(source) {
        Err(FlightError::Diagnostics(errors)) => errors.to_string(),
        Err(other) => panic!("expected diagnostics, got {}", other),
        Ok(output) => panic!("expected diagnostics, program printed {:?}", output),
    }
}

#[test]
fn test_hello_world() {
    assert_eq!(
        output_of("fn main() {\n    print(\"hello\", \" \", \"world\")\n}"),
        "hello world"
    );
}

#[test]
fn test_subtraction_is_left_associative() {
    assert_eq!(output_of("fn main() {\n    print(1 - 2 - 3)\n}"), "-4");
}

#[test]
fn test_precedence() {
    assert_eq!(
        output_of("fn main() {\n    print(1 + 2 * 3, \" \", (1 + 2) * 3, \" \", 7 / 2, \" \", 7.0 / 2)\n}"),
        "7 9 3 3.5"
    );
}

#[test]
fn test_recursion() {
    let source = "fn fib(n: int) int {\n    if n < 2 {\n        return n\n    }\n    return fib(n - 1) + fib(n - 2)\n}\n\
                  fn main() {\n    print(fib(15))\n}";

    assert_eq!(output_of(source), "610");
}

#[test]
fn test_nested_function_recursion() {
    let source = "fn main() {\n    fn g(n: int) int {\n        if n == 0 {\n            return 0\n        }\n        return g(n - 1) + 2\n    }\n    print(g(3))\n}";

    assert_eq!(output_of(source), "6");
}

#[test]
fn test_nested_subscript_write_back() {
    let source = "fn main() {\n    let grid = [[1, 2], [3, 4]]\n    grid[1][0] = 9\n    print(grid, \" \", grid[1][0])\n}";

    assert_eq!(output_of(source), "[[1, 2], [9, 4]] 9");
}

#[test]
fn test_string_subscript_write_inserts() {
    let source = "fn main() {\n    let s = \"abc\"\n    s[1] = \"X\"\n    print(s)\n}";

    assert_eq!(output_of(source), "aXbc");
}

#[test]
fn test_len_and_int_array() {
    let source = "fn main() {\n    let a = int_array(0, 4)\n    print(len(a), \" \", len(\"héllo\"), \" \", len(), \" \", len(3))\n}";

    assert_eq!(output_of(source), "4 5 0 0");
}

#[test]
fn test_for_and_while_loops() {
    let source = "fn main() {\n    let total = 0\n    for i in 0..5 {\n        total = total + i\n    }\n    \
                  let n = 3\n    while n > 0 {\n        print(n)\n        n = n - 1\n    }\n    print(\" \", total)\n}";

    assert_eq!(output_of(source), "321 10");
}

#[test]
fn test_return_from_inside_a_loop() {
    let source = "fn first_even(xs: [int]) int {\n    for i in 0..len(xs) {\n        if xs[i] / 2 * 2 == xs[i] {\n            return xs[i]\n        }\n    }\n    return 0 - 1\n}\n\
                  fn main() {\n    print(first_even([3, 5, 8, 10]))\n}";

    assert_eq!(output_of(source), "8");
}

#[test]
fn test_array_append_and_concatenation() {
    let source = "fn main() {\n    let a = [1] + 2\n    print(\"a = \" + a, \" \", 1 + \"!\", \" \", to_string(1.0, true))\n}";

    assert_eq!(output_of(source), "a = [1, 2] 1! 1.0true");
}

#[test]
fn test_conversions_and_unicode() {
    let source = "fn main() {\n    print(ftoi(2.9), \" \", itof(2), \" \", unicode_to_string(955), \" \", 100000000000000000000.0)\n}";

    assert_eq!(output_of(source), "2 2.0 λ 1e20");
}

#[test]
fn test_random_stays_in_range() {
    let source = "fn main() {\n    for i in 0..20 {\n        let r = random_int(3, 5)\n        if r < 3 {\n            print(\"low\")\n        }\n        if r >= 5 {\n            print(\"high\")\n        }\n    }\n}";

    assert_eq!(output_of(source), "");
}

#[test]
fn test_top_level_statements_run_before_main() {
    let source = "let greeting = \"hi\"\nprint(\"> \")\nfn main() {\n    print(\"main\")\n}";

    assert_eq!(output_of(source), "> main");
}

#[test]
fn test_files_are_pooled() {
    let output = run_files(&[
        ("lib.fl", "fn double(a: int) int {\n    return a * 2\n}"),
        ("main.fl", "fn main() {\n    print(double(21))\n}"),
    ])
    .unwrap();

    assert_eq!(output, "42");
}

#[test]
fn test_missing_main() {
    assert!(matches!(
        run_program("fn helper() { }"),
        Err(FlightError::NoMainFunction)
    ));
    assert!(matches!(
        run_program("fn main(a: int) { }"),
        Err(FlightError::NoMainFunction)
    ));
}

#[test]
fn test_unknown_function_is_a_single_diagnostic() {
    let report = report_of("fn main() {\n    missing(1)\n}");

    assert_eq!(
        report,
        "main.fl:2:5: 'missing' does not exist\n    missing(1)\n    ^^^^^^^"
    );
}

#[test]
fn test_syntax_errors_on_separate_lines_are_reported_together() {
    let report = report_of("fn main() {\n    let = 1\n    let b = )\n}");

    let blocks = report.split("\n\n").collect::<Vec<_>>();
    assert_eq!(blocks.len(), 2);
    assert!(blocks[0].starts_with("main.fl:2:"));
    assert!(blocks[1].starts_with("main.fl:3:"));
}

#[test]
fn test_type_errors_do_not_run_the_program() {
    let report = report_of("fn main() {\n    print(\"ran\")\n    let a = 1 + true\n}");

    assert!(report.contains("Invalid operator '+'"));
}

#[test]
fn test_missing_return_path() {
    let report = report_of("fn f(a: bool) int {\n    if a {\n        return 1\n    }\n}\nfn main() { }");

    assert!(report.starts_with("main.fl:1:1: Not all codepaths return a value"));
}

#[test]
fn test_division_by_zero_is_a_fault() {
    let result = run_program("fn main() {\n    let zero = 0\n    print(1 / zero)\n}");

    assert!(matches!(result, Err(FlightError::Fault(_))));
}

#[test]
fn test_check_only_compiles() {
    let sources = [SourceFile::new("main.fl", "fn main() {\n    print(1)\n}")];

    let program = flight::compile(&sources).unwrap();
    assert_eq!(program.len(), 1);
}
