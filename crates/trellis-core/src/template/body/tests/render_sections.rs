//! {{section}} blocks

use std::path::Path;

use super::helpers::{simple_data, MapScope};
use crate::template::body::BodyInterpreter;

fn interpreter() -> BodyInterpreter<'static> {
    BodyInterpreter::new(Path::new("sections.tpl"))
}

#[test]
fn test_first_declaration_is_stored_and_emitted() {
    let mut scope = MapScope::new(simple_data());
    let output = interpreter()
        .execute("<{{section \"head\"}}{{title}}{{/section}}>", &mut scope)
        .unwrap();
    assert_eq!(output, "<My Title>");
    assert_eq!(scope.sections["head"], "My Title");
}

#[test]
fn test_existing_section_wins_over_block_content() {
    let mut scope = MapScope::new(simple_data());
    scope
        .sections
        .insert("head".to_string(), "from child".to_string());

    let output = interpreter()
        .execute("{{section 'head'}}default{{/section}}", &mut scope)
        .unwrap();
    assert_eq!(output, "from child");
}

#[test]
fn test_section_key_may_be_an_expression() {
    let mut scope = MapScope::new(simple_data());
    interpreter()
        .execute("{{section title}}x{{/section}}", &mut scope)
        .unwrap();
    assert_eq!(scope.sections["My Title"], "x");
}

#[test]
fn test_nested_sections() {
    let mut scope = MapScope::new(simple_data());
    let output = interpreter()
        .execute(
            "{{section 'outer'}}[{{section 'inner'}}in{{/section}}]{{/section}}",
            &mut scope,
        )
        .unwrap();
    assert_eq!(output, "[in]");
    assert_eq!(scope.sections["inner"], "in");
    assert_eq!(scope.sections["outer"], "[in]");
}

#[test]
fn test_non_string_section_key_fails() {
    let mut scope = MapScope::new(simple_data());
    let err = interpreter()
        .execute("{{section count}}x{{/section}}", &mut scope)
        .unwrap_err();
    assert!(err.to_string().contains("Section name must be a string"));
}
