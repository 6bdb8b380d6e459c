use crate::measure::{
    CellTextMeasure, GlyphTableTextMeasure, SimpleTextMeasure, TextMeasure,
};

#[test]
fn simple_measure_rounds_up() {
    let measure = SimpleTextMeasure::menlo_14();
    let metrics = measure.measure("SELECT").unwrap();
    assert_eq!(metrics.width, (6.0f64 * 8.44).ceil());
    assert_eq!(metrics.height, 16.0);
}

#[test]
fn simple_measure_counts_wide_glyphs() {
    let measure = SimpleTextMeasure::menlo_14();
    let narrow = measure.measure("xx").unwrap();
    let wide = measure.measure("\u{6f22}").unwrap();
    assert!(wide.width < narrow.width * 2.0);
    assert!(wide.width > narrow.width / 2.0);
}

#[test]
fn simple_measure_empty_text_keeps_line_height() {
    let measure = SimpleTextMeasure::menlo_14();
    let metrics = measure.measure("").unwrap();
    assert_eq!(metrics.width, 0.0);
    assert_eq!(metrics.height, 16.0);
}

#[test]
fn glyph_table_overrides_default_advance() {
    let measure = GlyphTableTextMeasure::new(8.0, 14.0, 15.4, 12.0)
        .with_advance('i', 4.0)
        .with_advances(['m', 'w'], 12.0);
    let metrics = measure.measure("im").unwrap();
    assert_eq!(metrics.width, 16.0);
    let metrics = measure.measure("xx").unwrap();
    assert_eq!(metrics.width, 16.0);
}

#[test]
fn cell_measure_counts_cells() {
    let metrics = CellTextMeasure.measure("INT").unwrap();
    assert_eq!(metrics.width, 3.0);
    assert_eq!(metrics.height, 1.0);

    // Wide glyphs take two cells.
    let metrics = CellTextMeasure.measure("\u{6f22}\u{5b57}").unwrap();
    assert_eq!(metrics.width, 4.0);
}
