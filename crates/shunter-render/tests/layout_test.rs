use shunter_core::{Element, LineBreak, LineBreaks, choice, sequence, terminal};
use shunter_render::{TextRenderSettings, render_text};

#[test]
fn choice_places_default_on_the_main_line() {
    let tree = choice(["INT", "STR", "(expr)"], 1);
    let out = render_text(&tree, &TextRenderSettings::default()).unwrap();
    let lines: Vec<&str> = out.lines().collect();

    let row_of = |needle: &str| {
        lines
            .iter()
            .position(|line| line.contains(needle))
            .unwrap_or_else(|| panic!("{needle} missing from:\n{out}"))
    };
    let int = row_of("INT");
    let str_ = row_of("STR");
    let expr = row_of("(expr)");

    assert!(int < str_, "alternative 0 bulges above the default");
    assert!(str_ < expr, "alternative 2 bulges below the default");
    // the default alternative carries the start/end markers on its line
    assert!(lines[str_].contains("├┼"), "{out}");
    assert!(lines[str_].contains("┼┤"), "{out}");
}

#[test]
fn soft_breaks_wrap_into_a_stack_of_rows() {
    let items: Vec<Element> = (1..=10).map(|i| terminal(format!("TOKEN{i:02}"))).collect();
    let tree = Element::Sequence {
        items,
        linebreaks: LineBreaks::Uniform(LineBreak::Soft),
    };
    let settings = TextRenderSettings {
        max_width: 30.0,
        ..TextRenderSettings::default()
    };
    let out = render_text(&tree, &settings).unwrap();

    // each terminal is 11 cells wide; at most two fit into 30 cells
    let token_rows: Vec<&str> = out.lines().filter(|line| line.contains("TOKEN")).collect();
    assert_eq!(token_rows.len(), 5, "{out}");
    for row in &token_rows {
        assert_eq!(row.matches("TOKEN").count(), 2, "{out}");
    }

    // wrapping never reorders children
    let mut seen = Vec::new();
    for line in out.lines() {
        let mut from = 0;
        while let Some(i) = line[from..].find("TOKEN") {
            let start = from + i + "TOKEN".len();
            seen.push(line[start..start + 2].to_string());
            from = start;
        }
    }
    let expected: Vec<String> = (1..=10).map(|i| format!("{i:02}")).collect();
    assert_eq!(seen, expected);
}

#[test]
fn hard_breaks_always_split() {
    let tree = Element::Sequence {
        items: vec![terminal("a"), terminal("b")],
        linebreaks: LineBreaks::Uniform(LineBreak::Hard),
    };
    let out = render_text(&tree, &TextRenderSettings::default()).unwrap();
    let a = out.lines().position(|l| l.contains("┤ a ├")).unwrap();
    let b = out.lines().position(|l| l.contains("┤ b ├")).unwrap();
    assert!(a < b, "{out}");
}

#[test]
fn no_break_joins_never_split() {
    let items: Vec<Element> = (1..=10).map(|i| terminal(format!("TOKEN{i:02}"))).collect();
    let tree = Element::NoBreak { items };
    let settings = TextRenderSettings {
        max_width: 30.0,
        ..TextRenderSettings::default()
    };
    let out = render_text(&tree, &settings).unwrap();
    let token_rows = out.lines().filter(|line| line.contains("TOKEN")).count();
    assert_eq!(token_rows, 1, "{out}");
}

#[test]
fn default_joins_do_not_wrap_inside_a_choice() {
    let long_sequence = sequence((1..=6).map(|i| terminal(format!("TOKEN{i:02}"))));
    let tree = choice([long_sequence, terminal("short")], 0);
    let settings = TextRenderSettings {
        max_width: 30.0,
        ..TextRenderSettings::default()
    };
    let out = render_text(&tree, &settings).unwrap();
    let token_rows = out.lines().filter(|line| line.contains("TOKEN")).count();
    assert_eq!(token_rows, 1, "{out}");
}

#[test]
fn an_overwide_child_is_kept_on_its_own_row() {
    let tree = Element::Sequence {
        items: vec![
            terminal("AN_EXTREMELY_LONG_TERMINAL_LABEL"),
            terminal("x"),
        ],
        linebreaks: LineBreaks::Uniform(LineBreak::Soft),
    };
    let settings = TextRenderSettings {
        max_width: 20.0,
        ..TextRenderSettings::default()
    };
    let out = render_text(&tree, &settings).unwrap();
    assert!(out.contains("AN_EXTREMELY_LONG_TERMINAL_LABEL"));
    let long = out
        .lines()
        .position(|l| l.contains("AN_EXTREMELY"))
        .unwrap();
    let short = out.lines().position(|l| l.contains("┤ x ├")).unwrap();
    assert!(long < short, "{out}");
}

#[test]
fn loading_errors_surface_from_typed_trees() {
    let tree = Element::Choice {
        items: vec![terminal("a")],
        default: 5,
    };
    let err = render_text(&tree, &TextRenderSettings::default()).unwrap_err();
    assert!(matches!(err, shunter_core::Error::Loading { .. }));
    assert!(err.to_string().contains("choice default"));

    let tree = Element::Sequence {
        items: vec![terminal("a"), terminal("b")],
        linebreaks: LineBreaks::PerJoin(vec![]),
    };
    let err = render_text(&tree, &TextRenderSettings::default()).unwrap_err();
    assert!(err.to_string().contains("linebreaks"));
}
