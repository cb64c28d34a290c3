//! Error reporting

use super::helpers::{run, simple_data};
use crate::error::TrellisError;
use crate::template::error::TemplateError;
use serde_json::json;

fn template_error(body: &str) -> TemplateError {
    match run(body, simple_data()).unwrap_err() {
        TrellisError::Template { source, .. } => source,
        other => panic!("expected template error, got {other}"),
    }
}

#[test]
fn test_undefined_key_reports_line() {
    assert_eq!(
        template_error("ok\n\n{{nope}}"),
        TemplateError::UndefinedName {
            name: "nope".into(),
            line: 3
        }
    );
}

#[test]
fn test_undefined_key_inside_loop_reports_file_line() {
    let err = run("{{each items |x|}}\n{{x.missing}}{{/each}}", json!({"items": [{}]}))
        .unwrap_err();
    let TrellisError::Template { source, .. } = err else {
        panic!("expected template error");
    };
    assert_eq!(
        source,
        TemplateError::UndefinedName {
            name: "x.missing".into(),
            line: 2
        }
    );
}

#[test]
fn test_unclosed_tag() {
    assert!(matches!(
        template_error("text {{title"),
        TemplateError::Syntax { ref message, line: 1 } if message == "Unclosed tag"
    ));
}

#[test]
fn test_unclosed_each() {
    assert!(matches!(
        template_error("{{each items |x|}}{{x}}"),
        TemplateError::Syntax { ref message, .. } if message == "Unclosed each block"
    ));
}

#[test]
fn test_unexpected_block_end() {
    assert!(matches!(
        template_error("{{/each}}"),
        TemplateError::Syntax { ref message, .. }
            if message == "Unexpected {{/each}} without matching {{each}}"
    ));
}

#[test]
fn test_invalid_each_syntax() {
    assert!(matches!(
        template_error("{{each items}}{{/each}}"),
        TemplateError::Syntax { .. }
    ));
}

#[test]
fn test_each_over_scalar() {
    assert!(matches!(
        template_error("{{each title |x|}}{{/each}}"),
        TemplateError::Syntax { ref message, .. } if message.contains("is not a list")
    ));
}

#[test]
fn test_each_over_missing_key() {
    assert!(matches!(
        template_error("{{each nothing |x|}}{{/each}}"),
        TemplateError::UndefinedName { ref name, .. } if name == "nothing"
    ));
}

#[test]
fn test_object_cannot_be_emitted() {
    let err = run("{{paper}}", json!({"paper": {"title": "x"}})).unwrap_err();
    assert!(err.to_string().contains("'paper' is an object"));
}

#[test]
fn test_malformed_expression() {
    assert!(matches!(
        template_error("{{ call(1, }}"),
        TemplateError::Syntax { .. }
    ));
}

#[test]
fn test_error_carries_path() {
    let err = run("{{nope}}", simple_data()).unwrap_err();
    assert!(err.to_string().starts_with("TEMPLATE_ERROR: test.tpl:"));
}

#[test]
fn test_deeply_nested_expression_is_a_syntax_error() {
    let body = format!("{{{{ {}1{} }}}}", "[".repeat(40_000), "]".repeat(40_000));
    assert!(matches!(
        template_error(&body),
        TemplateError::Syntax { ref message, line: 1 } if message.contains("nested deeper than")
    ));
}
