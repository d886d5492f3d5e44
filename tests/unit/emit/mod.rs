use super::*;
use crate::{
    foundation::core::{ItemBounds, Point},
    model::command::{CanvasCommand, LineGroup, Segment},
    parse::parse,
};

const LOG: &str = "\
noise before
$v CANVAS 300 400
$v GRID(0, 0, 200, 300) 3 3 black navy white
CELL_COLORS
red white white
white gray white
white white red
CELL_TEXT
S \"two words\" \"\"
\"\" x \"\"
\"\" \"\" end
WALL_VERTICAL
YNYY
YYNY
YYYY
LINES
2
blue 3 0 0 1 1 2 2
green 2 0.5 0.5 1.5 1.5
$v SCORE 12 pts
$v TEXTAREA hello   there
$v DEBUG
$v COMMIT
$v(plane) 2D_PLANE(10, 10, 90, 90) 50 100
CIRCLES
1
black red 2 5 5 1 10 10 0.25
LINES
2
blue 1 0 0 10 10
teal 2.5 1 1 1 2 2
POLYGONS
1
black none 3 0 0 4 0 2 3
$v(plane) BAR_GRAPH orange -1 10.5
3 a 1 b 2.25 c -0.5
$v(plane) COMMIT
$v(plane) SCORE 0
";

fn commands(modes: &ParsedModes) -> Vec<(String, Vec<Vec<Command>>)> {
    modes
        .iter()
        .map(|(mode, frames)| {
            (
                mode.to_owned(),
                frames.iter().map(|f| f.commands.clone()).collect(),
            )
        })
        .collect()
}

#[test]
fn emitted_text_parses_back_to_the_same_commands() {
    let parsed = parse(LOG);
    assert!(
        parsed.iter().all(|(_, frames)| frames.iter().all(|f| f.errors.is_empty())),
        "{parsed:?}"
    );
    assert_eq!(parsed.frames("default").len(), 1);
    assert_eq!(parsed.frames("plane").len(), 2);

    let text = emit_modes(&parsed).unwrap();
    let reparsed = parse(&text);
    assert_eq!(commands(&reparsed), commands(&parsed));
    assert!(
        reparsed
            .iter()
            .all(|(_, frames)| frames.iter().all(|f| f.errors.is_empty()))
    );
}

#[test]
fn emitting_is_stable_after_one_pass() {
    let once = emit_modes(&parse(LOG)).unwrap();
    let twice = emit_modes(&parse(&once)).unwrap();
    assert_eq!(once, twice);
    let reparsed = parse(&once);
    assert_eq!(
        reparsed.frames("plane")[1].raw_text,
        "$v(plane) SCORE 0\n$v(plane) COMMIT\n"
    );
}

#[test]
fn grid_uses_the_dominant_color_and_sparse_blocks() {
    let mut grid = GridCommand::filled(2, 2, "black", "black", "white", None);
    grid.grid_colors[0][1] = "red".to_owned();
    grid.grid_texts[0][0] = "a b".to_owned();
    let frame = Frame {
        commands: vec![Command::Grid(grid)],
        ..Frame::default()
    };
    assert_eq!(
        emit_frame("default", &frame).unwrap(),
        "\
$v(default) GRID 2 2 black black white
CELL_COLORS_POS
1
red 1 0 1
CELL_TEXT
\"a b\" \"\"
\"\" \"\"
$v(default) COMMIT
"
    );
}

#[test]
fn grid_walls_and_bounds_are_written_when_present() {
    let bounds = ItemBounds::new(0.0, 0.0, 60.0, 40.0).unwrap();
    let mut grid = GridCommand::filled(1, 2, "k", "k", "w", Some(bounds));
    grid.wall_horizontal[1] = "NY".to_owned();
    grid.grid_lines.push(crate::model::command::GridLine {
        color: "red".to_owned(),
        points: vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)],
    });
    let frame = Frame {
        commands: vec![Command::Grid(grid)],
        ..Frame::default()
    };
    assert_eq!(
        emit_frame("m", &frame).unwrap(),
        "\
$v(m) GRID(0, 0, 60, 40) 1 2 k k w
LINES
1
red 2 0 0 1 0
WALL_HORIZONTAL
YY
NY
$v(m) COMMIT
"
    );
}

#[test]
fn plane_line_widths_use_the_widened_form() {
    let mut plane = PlaneCommand::empty(10.0, 20.0, None);
    plane.line_groups.push(LineGroup {
        color: "red".to_owned(),
        width: Some(2.5),
        lines: vec![Segment {
            ax: 0.0,
            ay: 0.0,
            bx: 1.0,
            by: 1.0,
        }],
    });
    let frame = Frame {
        commands: vec![Command::Plane(plane.clone())],
        ..Frame::default()
    };
    let text = emit_frame("default", &frame).unwrap();
    assert_eq!(
        text,
        "$v(default) 2D_PLANE 10 20\nLINES\n1\nred 2.5 1 0 0 1 1\n$v(default) COMMIT\n"
    );
    let reparsed = parse(&text);
    assert_eq!(
        reparsed.frame("default", 0).unwrap().commands,
        vec![Command::Plane(plane)]
    );
}

#[test]
fn frames_without_commands_are_skipped() {
    assert_eq!(emit_frame("default", &Frame::default()).unwrap(), "");
    assert_eq!(emit_modes(&ParsedModes::default()).unwrap(), "");
}

#[test]
fn unwritable_values_are_rejected() {
    let one = |command: Command| Frame {
        commands: vec![command],
        ..Frame::default()
    };

    let spaced = GridCommand::filled(1, 1, "dark red", "k", "w", None);
    let err = emit_frame("default", &one(Command::Grid(spaced))).unwrap_err();
    assert!(matches!(err, VdslError::Validation(_)));
    assert!(err.to_string().contains("'dark red' must be a single token"));

    let text = Command::TextArea {
        text: "two\nlines".to_owned(),
    };
    assert!(emit_frame("default", &one(text)).is_err());

    let canvas = Command::Canvas(CanvasCommand {
        h: f64::NAN,
        w: 10.0,
    });
    assert!(emit_frame("default", &one(canvas)).is_err());

    let mut quoted = GridCommand::filled(1, 1, "k", "k", "w", None);
    quoted.grid_texts[0][0] = "say \"hi\"".to_owned();
    assert!(emit_frame("default", &one(Command::Grid(quoted))).is_err());

    assert!(emit_frame("a)b", &one(Command::Debug)).is_err());
}
