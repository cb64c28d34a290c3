//! {{each}} loops

use super::helpers::{nested_data, run};
use serde_json::json;

#[test]
fn test_simple_each() {
    let data = json!({"items": ["a", "b", "c"]});
    assert_eq!(
        run("{{each items |x|}}[{{x}}]{{/each}}", data).unwrap(),
        "[a][b][c]"
    );
}

#[test]
fn test_each_with_spaces() {
    let data = json!({"items": [1, 2]});
    assert_eq!(
        run("{{ each items | x | }}{{ x }},{{ /each }}", data).unwrap(),
        "1,2,"
    );
}

#[test]
fn test_each_over_objects_with_field_access() {
    let body = "{{each paper.authors |author|}}- {{author.name}}\n{{/each}}";
    assert_eq!(
        run(body, nested_data()).unwrap(),
        "- John Doe\n- Jane Smith\n"
    );
}

#[test]
fn test_nested_each() {
    let body = "{{each paper.authors |a|}}{{a.name}}:{{each a.tags |t|}}{{t}}{{/each}};{{/each}}";
    assert_eq!(
        run(body, nested_data()).unwrap(),
        "John Doe:ab;Jane Smith:;"
    );
}

#[test]
fn test_loop_variable_shadows_outer_name() {
    let data = json!({"x": "outer", "items": ["inner"]});
    assert_eq!(
        run("{{x}} {{each items |x|}}{{x}}{{/each}} {{x}}", data).unwrap(),
        "outer inner outer"
    );
}

#[test]
fn test_outer_names_visible_inside_loop() {
    let data = json!({"sep": "/", "items": ["a", "b"]});
    assert_eq!(
        run("{{each items |i|}}{{i}}{{sep}}{{/each}}", data).unwrap(),
        "a/b/"
    );
}

#[test]
fn test_empty_array_renders_nothing() {
    let data = json!({"items": []});
    assert_eq!(
        run("before{{each items |x|}}{{x}}{{/each}}after", data).unwrap(),
        "beforeafter"
    );
}

#[test]
fn test_calls_inside_loop_receive_item() {
    let data = json!({"items": ["a", "b"]});
    assert_eq!(
        run("{{each items |x|}}{{ upper(x) }}{{/each}}", data).unwrap(),
        "AB"
    );
}
