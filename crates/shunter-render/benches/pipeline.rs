use criterion::{Criterion, criterion_group, criterion_main};
use shunter_core::{Element, choice, non_terminal, one_or_more, optional, sequence, terminal};
use shunter_render::{SvgRenderSettings, TextRenderSettings, render_svg, render_text};

fn fixtures() -> Vec<(&'static str, Element)> {
    vec![
        ("terminal", terminal("INT")),
        (
            "select",
            sequence([
                terminal("SELECT"),
                optional("DISTINCT"),
                one_or_more(non_terminal("result_column"), Some(terminal(","))),
                terminal("FROM"),
                non_terminal("table_or_subquery"),
            ]),
        ),
        (
            "wide_choice",
            choice(
                (0..12).map(|i| terminal(format!("KEYWORD{i:02}"))),
                5,
            ),
        ),
        (
            "wrapping",
            sequence((0..24).map(|i| optional(terminal(format!("OPT{i:02}"))))),
        ),
    ]
}

fn bench_render_svg(c: &mut Criterion) {
    let settings = SvgRenderSettings::default();
    let mut group = c.benchmark_group("render_svg");
    for (name, tree) in fixtures() {
        group.bench_function(name, |b| {
            b.iter(|| render_svg(&tree, &settings).unwrap());
        });
    }
    group.finish();
}

fn bench_render_text(c: &mut Criterion) {
    let settings = TextRenderSettings::default();
    let mut group = c.benchmark_group("render_text");
    for (name, tree) in fixtures() {
        group.bench_function(name, |b| {
            b.iter(|| render_text(&tree, &settings).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_render_svg, bench_render_text);
criterion_main!(benches);
