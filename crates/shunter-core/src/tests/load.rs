use serde_json::json;

use crate::element::{Element, LineBreak, LineBreaks};
use crate::load::from_value;
use crate::{sequence, terminal};

#[test]
fn load_sugar_forms() {
    assert_eq!(from_value(&json!(null)).unwrap(), Element::Skip);
    assert_eq!(from_value(&json!("INT")).unwrap(), terminal("INT"));
    assert_eq!(
        from_value(&json!(["a", "b"])).unwrap(),
        sequence(["a", "b"])
    );
}

#[test]
fn load_tagged_nodes() {
    let loaded = from_value(&json!({
        "non_terminal": "expr",
        "href": "#expr",
        "title": "expression",
    }))
    .unwrap();
    let Element::NonTerminal(node) = loaded else {
        panic!("expected a non-terminal, got {loaded:?}");
    };
    assert_eq!(node.text, "expr");
    assert_eq!(node.href.as_deref(), Some("#expr"));
    assert_eq!(node.title.as_deref(), Some("expression"));
    assert!(node.resolve);
}

#[test]
fn load_choice_with_default() {
    let loaded = from_value(&json!({ "choice": ["INT", "STR"], "default": 1 })).unwrap();
    assert_eq!(
        loaded,
        Element::Choice {
            items: vec![terminal("INT"), terminal("STR")],
            default: 1,
        }
    );
}

#[test]
fn load_rejects_out_of_range_default() {
    let err = from_value(&json!({ "choice": ["INT"], "default": 3 })).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid diagram at `$.choice.default`: default should be an index in 0..1, got 3"
    );
}

#[test]
fn load_rejects_ambiguous_constructor() {
    let err = from_value(&json!({ "terminal": "a", "comment": "b" })).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid diagram at `$`: cannot determine element type: expected exactly one constructor key"
    );
}

#[test]
fn load_rejects_unexpected_parameter() {
    let err = from_value(&json!({ "barrier": "a", "skip": true })).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid diagram at `$`: barrier got unexpected parameter: skip"
    );
}

#[test]
fn load_rejects_linebreaks_length_mismatch() {
    let err = from_value(&json!({
        "sequence": ["a", "b", "c"],
        "linebreaks": ["SOFT"],
    }))
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid diagram at `$.sequence.linebreaks`: linebreaks should have one entry per join (2), got 1"
    );
}

#[test]
fn load_linebreak_spellings() {
    let loaded = from_value(&json!({
        "sequence": ["a", "b", "c"],
        "linebreaks": ["HARD", "NO_BREAK"],
    }))
    .unwrap();
    let Element::Sequence { linebreaks, .. } = loaded else {
        panic!("expected a sequence");
    };
    assert_eq!(
        linebreaks,
        LineBreaks::PerJoin(vec![LineBreak::Hard, LineBreak::NoBreak])
    );

    let loaded = from_value(&json!({ "sequence": ["a", "b"], "linebreaks": "SOFT" })).unwrap();
    let Element::Sequence { linebreaks, .. } = loaded else {
        panic!("expected a sequence");
    };
    assert_eq!(linebreaks, LineBreaks::Uniform(LineBreak::Soft));
}

#[test]
fn load_reports_paths_into_nested_items() {
    let err = from_value(&json!({ "sequence": ["a", { "optional": 3 }] })).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid diagram at `$.sequence[1].optional`: diagram item should be null, string, list or object, got a number"
    );
}

#[test]
fn load_rejects_multiline_text() {
    let err = from_value(&json!({ "terminal": "a\nb" })).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid diagram at `$.terminal`: node text should be a single line"
    );
}

#[test]
fn load_rejects_repeat_top_with_top_skip_rail() {
    let err = from_value(&json!({ "zero_or_more": "a", "repeat_top": true })).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid diagram at `$.zero_or_more`: repeat_top conflicts with a top-side skip rail; set skip_bottom"
    );

    from_value(&json!({
        "zero_or_more": "a",
        "repeat_top": true,
        "skip_bottom": true,
    }))
    .unwrap();
}
