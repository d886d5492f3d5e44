use super::*;
use crate::parse;

fn svg_of(text: &str) -> String {
    let parsed = parse(text);
    let frame = parsed.frame("default", 0).unwrap();
    frame_to_svg(frame, &RenderOpts::default()).unwrap()
}

#[test]
fn empty_frame_is_a_blank_default_canvas() {
    let svg = svg_of("$v DEBUG");
    assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="800" height="800""#));
    assert!(svg.contains(r##"fill="#FFFFFF""##));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert!(!svg.contains("<g>"));
}

#[test]
fn grid_emits_cells_text_walls_and_lines() {
    let svg = svg_of(
        "$v CANVAS 100 200\n$v GRID 1 2 black navy white\nCELL_TEXT\n\"a<b\" x\nLINES\n1\nred 2 0 0 1 0",
    );
    assert!(svg.contains(r#"width="200" height="100""#));
    assert_eq!(svg.matches("<rect ").count(), 3);
    assert!(svg.contains("<title>(0, 0): a&lt;b</title>"));
    assert!(svg.contains(">a&lt;b</text>"));
    // 1x3 vertical + 2x2 horizontal
    assert_eq!(svg.matches("<line ").count(), 7);
    assert!(svg.contains(r#"<polyline points="50,50 150,50""#));
    assert_eq!(svg.matches("<circle ").count(), 2);
}

#[test]
fn plane_shapes_honor_explicit_line_width() {
    let svg = svg_of(
        "$v 2D_PLANE 10 10\nLINES\n2\nblue 5 1 0 0 10 10\nred 1 0 10 10 0\nCIRCLES\n1\nblack none 1 5 5 1",
    );
    assert!(svg.contains(r#"<line x1="0" y1="0" x2="800" y2="800" stroke="blue" stroke-width="5"/>"#));
    assert!(svg.contains(r#"stroke="red" stroke-width="1"/>"#));
    assert!(svg.contains(r#"<circle cx="400" cy="400" r="80" fill="none" stroke="black""#));
}

#[test]
fn options_flow_into_attributes() {
    let opts = RenderOpts {
        background: "black".to_string(),
        wall_width: 4.5,
        ..RenderOpts::default()
    };
    let parsed = parse("$v GRID 1 1 red red white");
    let svg = frame_to_svg(parsed.frame("default", 0).unwrap(), &opts).unwrap();
    assert!(svg.contains(r#"fill="black""#));
    assert!(svg.contains(r#"stroke-width="4.5""#));
}

#[test]
fn escape_covers_markup_characters() {
    assert_eq!(escape(r#"<a & "b">'"#), "&lt;a &amp; &quot;b&quot;&gt;&apos;");
}
