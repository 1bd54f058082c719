//! Unit tests for diagnostic kinds and the aggregated report.

use crate::ast::types::Type;
use crate::errors::diagnostics::Diagnostics;
use crate::errors::errors::{Error, ErrorImpl, ErrorPhase};
use crate::Span;
use std::rc::Rc;

#[test]
fn test_error_creation() {
    let file = Rc::new("test.fl".to_string());
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "@".to_string(),
        },
        Span::new(10, 11, &file),
    );

    assert_eq!(error.get_error_name(), "UnexpectedToken");
    assert_eq!(error.get_span().start.0, 10);
    assert_eq!(error.get_phase(), ErrorPhase::Syntax);
    assert_eq!(error.in_phase(ErrorPhase::Lex).get_phase(), ErrorPhase::Lex);
}

#[test]
fn test_error_phases() {
    assert_eq!(ErrorImpl::UnterminatedString.phase(), ErrorPhase::Lex);
    assert_eq!(ErrorImpl::ExpectedExpression.phase(), ErrorPhase::Syntax);
    assert_eq!(
        ErrorImpl::NotAType {
            name: "foo".to_string()
        }
        .phase(),
        ErrorPhase::Syntax
    );
    assert_eq!(ErrorImpl::NotAllCodePathsReturn.phase(), ErrorPhase::Type);
}

#[test]
fn test_incorrect_type_message() {
    let error = ErrorImpl::IncorrectType {
        expected: Type::Int,
        received: Type::Array(Box::new(Type::String)),
    };

    assert_eq!(
        error.to_string(),
        "Incorrect type; Expected 'int' but got '[string]'"
    );
}

#[test]
fn test_validate_without_errors() {
    let diagnostics = Diagnostics::new();
    assert!(diagnostics.validate().is_ok());
}

#[test]
fn test_render_with_caret() {
    let mut diagnostics = Diagnostics::new();
    let file = diagnostics.add_source("src/main.fl", "fn main() {\n    foo(1)\n}\n");
    diagnostics.add(
        ErrorImpl::DoesNotExist {
            ident: "foo".to_string(),
        },
        &Span::new(16, 19, &file),
    );

    let report = diagnostics.validate().unwrap_err();
    assert_eq!(report.messages.len(), 1);
    assert_eq!(
        report.messages[0],
        "main.fl:2:5: 'foo' does not exist\n    foo(1)\n    ^^^"
    );
}

#[test]
fn test_render_empty_span_has_one_caret() {
    let mut diagnostics = Diagnostics::new();
    let file = diagnostics.add_source("a.fl", "let x =");
    diagnostics.add(ErrorImpl::ExpectedExpression, &Span::new(7, 7, &file));

    let report = diagnostics.validate().unwrap_err();
    assert!(report.messages[0].ends_with("\nlet x =\n       ^"));
}

#[test]
fn test_aggregated_in_recording_order() {
    let mut diagnostics = Diagnostics::new();
    let file = diagnostics.add_source("a.fl", "one\ntwo\n");
    diagnostics.add(ErrorImpl::ExpectedExpression, &Span::new(4, 7, &file));
    diagnostics.add(ErrorImpl::CannotReturnHere, &Span::new(0, 3, &file));
    assert!(diagnostics.has_errors());

    let report = diagnostics.validate().unwrap_err();
    let text = report.to_string();
    let first = text.find("a.fl:2:1").unwrap();
    let second = text.find("a.fl:1:1").unwrap();
    assert!(first < second);
    assert!(text.contains("^^^\n\na.fl:1:1"));
}
