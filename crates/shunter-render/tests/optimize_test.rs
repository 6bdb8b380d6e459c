use shunter_core::{Element, barrier, optional, sequence, terminal};
use shunter_render::{TextRenderSettings, render_text};

fn render(element: &Element) -> String {
    render_text(element, &TextRenderSettings::default()).unwrap()
}

fn rail_line(out: &str) -> &str {
    out.lines()
        .find(|line| line.contains('╭'))
        .unwrap_or_else(|| panic!("no bypass rail in:\n{out}"))
}

#[test]
fn adjacent_optionals_share_one_skip_rail() {
    let out = render(&sequence([optional("A"), optional("B")]));
    let rail = rail_line(&out);
    // one continuous rail with a tee junction at the join
    assert_eq!(rail.matches('╭').count(), 1, "{out}");
    assert_eq!(rail.matches('╮').count(), 1, "{out}");
    assert_eq!(rail.matches('┬').count(), 1, "{out}");
}

#[test]
fn barrier_keeps_rails_apart() {
    let out = render(&sequence([optional("A"), barrier(optional("B"))]));
    let rail = rail_line(&out);
    assert_eq!(rail.matches('╭').count(), 2, "{out}");
    assert_eq!(rail.matches('╮').count(), 2, "{out}");
    assert_eq!(rail.matches('┬').count(), 0, "{out}");
}

#[test]
fn opposite_sides_are_not_fused() {
    let top = optional("A");
    let bottom = Element::Optional {
        item: Box::new(terminal("B")),
        skip: false,
        skip_bottom: true,
    };
    let out = render(&sequence([top, bottom]));
    let rail = rail_line(&out);
    assert_eq!(rail.matches('┬').count(), 0, "{out}");
}

#[test]
fn three_optionals_fuse_into_one_rail() {
    let out = render(&sequence([optional("A"), optional("B"), optional("C")]));
    let rail = rail_line(&out);
    assert_eq!(rail.matches('╭').count(), 1, "{out}");
    assert_eq!(rail.matches('╮').count(), 1, "{out}");
    assert_eq!(rail.matches('┬').count(), 2, "{out}");
}

#[test]
fn fusion_does_not_change_the_bodies() {
    let out = render(&sequence([optional("A"), optional("B")]));
    assert!(out.contains("┤ A ├"));
    assert!(out.contains("┤ B ├"));
}
