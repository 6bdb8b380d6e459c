use shunter_core::{Element, TextNode, optional, sequence, terminal};
use shunter_render::{ArrowStyle, EndClass, SvgRenderSettings, render_svg, render_svg_value};

#[test]
fn single_terminal_document_shape() {
    let out = render_svg(&terminal("INT"), &SvgRenderSettings::default()).unwrap();

    assert!(out.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
    assert!(out.contains("viewBox=\"0 0 108 24\""), "{out}");
    assert!(out.contains("role=\"img\""));
    // exactly one box with rounded ends and one label
    assert_eq!(out.matches("class=\"node terminal\"").count(), 1);
    assert!(out.contains("rx=\"10\""));
    assert_eq!(out.matches(">INT</tspan>").count(), 1);
    // two complex end markers
    assert_eq!(out.matches("m10 -20v20").count(), 1, "{out}");
    assert_eq!(out.matches("m-10 -20v20").count(), 1, "{out}");
    // default stylesheet is embedded
    assert!(out.contains("<style>path{stroke-width:1.5;"));
    assert!(out.ends_with("</svg>"));
}

#[test]
fn simple_end_class_drops_the_second_tick() {
    let settings = SvgRenderSettings {
        end_class: EndClass::Simple,
        ..SvgRenderSettings::default()
    };
    let out = render_svg(&terminal("INT"), &settings).unwrap();
    assert_eq!(out.matches("m10 -20v20").count(), 0);
    assert_eq!(out.matches("m-10 -20v20").count(), 0);
}

#[test]
fn optional_emits_quarter_circle_arcs() {
    let out = render_svg(
        &sequence([optional("DISTINCT"), "x".into()]),
        &SvgRenderSettings::default(),
    )
    .unwrap();
    // four bend corners around the bypass rail
    assert!(out.matches("a10 10 0 0 ").count() >= 4, "{out}");
}

#[test]
fn hyperlinks_wrap_the_label() {
    let node = TextNode::new("expr")
        .with_href("#expr")
        .with_title("expression");
    let out = render_svg(
        &Element::NonTerminal(node),
        &SvgRenderSettings::default(),
    )
    .unwrap();
    assert!(out.contains("<a xlink:href=\"#expr\" title=\"expression\">"), "{out}");
    assert!(out.contains("class=\"node non-terminal\""));
}

#[test]
fn labels_are_xml_escaped() {
    let out = render_svg(&terminal("<&>"), &SvgRenderSettings::default()).unwrap();
    assert!(out.contains(">&lt;&amp;&gt;</tspan>"), "{out}");
}

#[test]
fn title_and_description_are_emitted() {
    let settings = SvgRenderSettings {
        title: Some("select".to_string()),
        description: Some("a select statement".to_string()),
        ..SvgRenderSettings::default()
    };
    let out = render_svg(&terminal("INT"), &settings).unwrap();
    assert!(out.contains("aria-label=\"select\""));
    assert!(out.contains("<title>select</title>"));
    assert!(out.contains("<desc>a select statement</desc>"));
}

#[test]
fn arrow_style_none_emits_no_arrow_defs() {
    let out = render_svg(&optional("A"), &SvgRenderSettings::default()).unwrap();
    assert!(out.contains("<defs></defs>"));
    assert!(!out.contains("<use"));
}

#[test]
fn triangle_arrows_are_stamped_on_skip_rails() {
    let settings = SvgRenderSettings {
        arrow_style: ArrowStyle::Triangle,
        ..SvgRenderSettings::default()
    };
    let out = render_svg(&optional("DISTINCT"), &settings).unwrap();
    assert!(out.contains("id=\"sd-arrow\""));
    assert!(out.contains("class=\"arrow arrow-triangle\" d=\"M 0 0 L -10 -4 L -10 4 z\""));
    assert!(out.contains("<use href=\"#sd-arrow\""), "{out}");
}

#[test]
fn no_stylesheet_when_css_style_is_cleared() {
    let settings = SvgRenderSettings {
        css_style: None,
        ..SvgRenderSettings::default()
    };
    let out = render_svg(&terminal("INT"), &settings).unwrap();
    assert!(!out.contains("<style>"));
}

#[test]
fn debug_mode_tags_node_groups() {
    let settings = SvgRenderSettings {
        debug: true,
        ..SvgRenderSettings::default()
    };
    let out = render_svg(&terminal("INT"), &settings).unwrap();
    assert!(out.contains("data-dbg-id=\"0.1\""));
    assert!(out.contains("data-dbg-kind=\"terminal\""));
}

#[test]
fn data_literal_rendering_matches_the_typed_tree() {
    let value = serde_json::json!({ "sequence": [{ "optional": "DISTINCT" }, "x"] });
    let settings = SvgRenderSettings::default();
    let from_value = render_svg_value(&value, &settings).unwrap();
    let from_tree = render_svg(
        &sequence([optional("DISTINCT"), "x".into()]),
        &settings,
    )
    .unwrap();
    assert_eq!(from_value, from_tree);
}
