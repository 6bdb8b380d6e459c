use shunter_core::{Element, one_or_more, optional, sequence, skip, terminal};
use shunter_render::{SvgRenderSettings, TextRenderSettings, render_svg, render_text};

fn text(element: &Element) -> String {
    render_text(element, &TextRenderSettings::default()).unwrap()
}

#[test]
fn optional_is_sugar_for_a_choice_over_skip() {
    let sugar = sequence([optional("A"), "x".into()]);
    let lowered = sequence([
        Element::Choice {
            items: vec![skip(), terminal("A")],
            default: 1,
        },
        "x".into(),
    ]);
    assert_eq!(text(&sugar), text(&lowered));
}

#[test]
fn zero_or_more_is_sugar_for_optional_one_or_more() {
    let sugar = shunter_core::zero_or_more(terminal("A"), Some(terminal(",")));
    let lowered = optional(one_or_more(terminal("A"), Some(terminal(","))));
    assert_eq!(text(&sugar), text(&lowered));
}

#[test]
fn barrier_is_transparent_to_measurement_and_drawing() {
    let bare = sequence([terminal("A"), terminal("B")]);
    let wrapped = sequence([
        shunter_core::barrier(terminal("A")),
        shunter_core::barrier(terminal("B")),
    ]);
    assert_eq!(text(&bare), text(&wrapped));
}

#[test]
fn rendering_is_pure() {
    let tree = sequence([
        optional("DISTINCT"),
        one_or_more(terminal("expr"), Some(terminal(","))),
    ]);
    assert_eq!(text(&tree), text(&tree));

    let settings = SvgRenderSettings::default();
    assert_eq!(
        render_svg(&tree, &settings).unwrap(),
        render_svg(&tree, &settings).unwrap(),
    );
}

#[test]
fn an_empty_sequence_renders_like_a_skip() {
    let empty = Element::Sequence {
        items: vec![],
        linebreaks: Default::default(),
    };
    assert_eq!(text(&empty), text(&skip()));
}

#[test]
fn list_and_string_sugar_match_their_typed_forms() {
    let sugar: Element = vec![Element::from("a"), Element::from("b")].into();
    let typed = sequence([terminal("a"), terminal("b")]);
    assert_eq!(text(&sugar), text(&typed));
}

#[test]
fn reverse_keeps_the_drawing_total() {
    let tree = sequence([
        optional("DISTINCT"),
        one_or_more(terminal("expr"), Some(terminal(","))),
    ]);
    let normal = text(&tree);
    let reversed = render_text(
        &tree,
        &TextRenderSettings {
            reverse: true,
            ..TextRenderSettings::default()
        },
    )
    .unwrap();
    assert_eq!(normal.lines().count(), reversed.lines().count());
    for needle in ["DISTINCT", "expr", ","] {
        assert!(reversed.contains(needle), "{needle} lost in reverse");
    }
}
