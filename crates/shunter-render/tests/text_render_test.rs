use shunter_core::{group, non_terminal, one_or_more, optional, sequence, terminal};
use shunter_render::{TextRenderSettings, render_text};

fn render(element: &shunter_core::Element) -> String {
    render_text(element, &TextRenderSettings::default()).unwrap()
}

#[test]
fn single_terminal() {
    let out = render(&terminal("INT"));
    let expected = concat!(
        "      ┌─────┐\n",
        "├┼────┤ INT ├────┼┤\n",
        "      └─────┘\n",
    );
    assert_eq!(out, expected);
}

#[test]
fn single_terminal_simple_end_class() {
    let settings = TextRenderSettings {
        end_class: shunter_render::EndClass::Simple,
        ..TextRenderSettings::default()
    };
    let out = render_text(&terminal("INT"), &settings).unwrap();
    let main = out
        .lines()
        .find(|line| line.contains("INT"))
        .expect("main line exists");
    assert!(main.starts_with("\u{251c}\u{2500}"));
    assert!(main.ends_with("\u{2500}\u{2524}"));
    assert!(!main.contains('\u{253c}'));
}

#[test]
fn non_terminal_uses_double_struck_box() {
    let out = render(&non_terminal("expr"));
    assert!(out.contains("\u{2562} expr \u{255f}"));
    assert!(out.contains('\u{2554}'));
    assert!(out.contains('\u{255d}'));
}

#[test]
fn optional_draws_bypass_rail_above() {
    let out = render(&sequence([optional("DISTINCT"), "x".into()]));
    let lines: Vec<&str> = out.lines().collect();
    let rail = lines
        .iter()
        .position(|line| line.contains('\u{256d}'))
        .expect("a bypass rail exists");
    let main = lines
        .iter()
        .position(|line| line.contains("DISTINCT"))
        .expect("the body is drawn");
    assert!(rail < main, "the skip rail sits above the body");
    // the rail spans the optional only; it rejoins before `x`
    assert!(!lines[rail].contains('x'));
    assert!(lines[rail].contains('\u{256e}'));
    assert!(lines[rail].contains('\u{2192}'));
    // branch verticals carry direction arrows
    assert!(out.contains('\u{2191}'));
    assert!(out.contains('\u{2193}'));
    // `x` sits on the main line, after the rejoin
    assert!(lines[main].contains("\u{2524} x \u{251c}"));
}

#[test]
fn loop_with_separator_on_return_line() {
    let out = render(&one_or_more(non_terminal("expr"), Some(terminal(","))));
    let lines: Vec<&str> = out.lines().collect();
    let body = lines
        .iter()
        .position(|line| line.contains("expr"))
        .expect("body exists");
    let sep = lines
        .iter()
        .position(|line| line.contains("\u{2524} , \u{251c}"))
        .expect("separator on the return line");
    assert!(body < sep, "the return line sits below the body");
    // u-turns on both ends of the return path
    assert!(out.contains('\u{2570}'));
    assert!(out.contains('\u{256f}'));
}

#[test]
fn group_draws_captioned_box() {
    let out = render(&group(terminal("x"), Some("modifiers")));
    assert!(out.contains("modifiers"));
    // the main line crosses the group border on both sides
    let main = out
        .lines()
        .find(|line| line.contains("\u{2524} x \u{251c}"))
        .expect("body inside the group");
    assert_eq!(main.matches('\u{253c}').count(), 4, "{out}");
}

#[test]
fn render_is_deterministic() {
    let tree = sequence([optional("DISTINCT"), non_terminal("expr"), "x".into()]);
    let a = render(&tree);
    let b = render(&tree);
    assert_eq!(a, b);
}

#[test]
fn reverse_mirrors_order_on_the_main_line() {
    let tree = sequence([terminal("A"), terminal("B")]);
    let normal = render(&tree);
    let reversed = render_text(
        &tree,
        &TextRenderSettings {
            reverse: true,
            ..TextRenderSettings::default()
        },
    )
    .unwrap();

    let pos = |out: &str, needle: char| {
        out.lines()
            .find_map(|line| line.find(needle))
            .expect("glyph exists")
    };
    assert!(pos(&normal, 'A') < pos(&normal, 'B'));
    assert!(pos(&reversed, 'B') < pos(&reversed, 'A'));

    // mirroring does not change the canvas size
    assert_eq!(normal.lines().count(), reversed.lines().count());
    let width = |out: &str| out.lines().map(str::len).max().unwrap_or(0);
    assert_eq!(width(&normal), width(&reversed));
}

#[test]
fn debug_footer_lists_emitted_groups() {
    let settings = TextRenderSettings {
        debug: true,
        ..TextRenderSettings::default()
    };
    let out = render_text(&terminal("INT"), &settings).unwrap();
    assert!(out.contains("~ 0 sequence\n"));
    assert!(out.contains("~ 0.1 terminal\n"));
    assert!(out.contains("~ 0.0 marker\n"));
    assert!(out.contains("~ 0.2 marker\n"));
}
