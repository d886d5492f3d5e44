use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Label {
    Fixed,
    Count,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Label::Fixed => "FIXED",
            Label::Count => "COUNT",
        })
    }
}

impl SubBlock for Label {
    fn from_label(label: &str) -> Option<Self> {
        match label {
            "FIXED" => Some(Label::Fixed),
            "COUNT" => Some(Label::Count),
            _ => None,
        }
    }
}

fn shape(kind: Label) -> BlockShape {
    match kind {
        Label::Fixed => BlockShape::Rows(2),
        Label::Count => BlockShape::Counted,
    }
}

fn run(text: &str) -> (Vec<(Label, Vec<String>)>, ModeState, usize) {
    let mut cursor = LineCursor::new(text);
    let mut state = ModeState::default();
    let mut seen = Vec::new();
    read_sub_blocks(&mut cursor, &mut state, shape, |kind, rows, _| {
        seen.push((kind, rows.iter().map(|r| r.text().to_string()).collect()));
    });
    (seen, state, cursor.index())
}

#[test]
fn consumes_blocks_in_any_order_and_stops_at_foreign_line() {
    let (seen, state, idx) = run("FIXED\na\nb\nCOUNT\n1\nc\n$v COMMIT");
    assert_eq!(
        seen,
        vec![
            (Label::Fixed, vec!["a".to_string(), "b".to_string()]),
            (Label::Count, vec!["c".to_string()]),
        ]
    );
    assert_eq!(idx, 6);
    assert_eq!(state.raw_text, "FIXED\na\nb\nCOUNT\n1\nc\n");
    assert!(state.errors.is_empty());
}

#[test]
fn blank_lines_between_blocks_are_recorded() {
    let (seen, state, idx) = run("FIXED\na\nb\n\n  \nCOUNT\n0\nnext");
    assert_eq!(seen.len(), 2);
    assert_eq!(idx, 7);
    assert_eq!(state.raw_text, "FIXED\na\nb\n\n  \nCOUNT\n0\n");
}

#[test]
fn blank_lines_before_a_foreign_line_are_recorded() {
    let (seen, state, idx) = run("FIXED\na\nb\n\n \nGRID");
    assert_eq!(seen.len(), 1);
    assert_eq!(idx, 5);
    assert_eq!(state.raw_text, "FIXED\na\nb\n\n \n");
}

#[test]
fn blank_lines_at_end_of_input_are_left_alone() {
    let (seen, state, idx) = run("FIXED\na\nb\n\n");
    assert_eq!(seen.len(), 1);
    assert_eq!(idx, 3);
    assert_eq!(state.raw_text, "FIXED\na\nb\n");
}

#[test]
fn truncated_blocks_keep_partial_rows() {
    let (seen, state, _) = run("COUNT\n3\nx\ny");
    assert_eq!(seen, vec![(Label::Count, vec!["x".to_string(), "y".to_string()])]);
    assert_eq!(
        state.errors,
        vec!["Line 1: COUNT expected 3 entries, input ended after 2"]
    );
}

#[test]
fn bad_count_line_ends_the_block() {
    let (seen, state, idx) = run("COUNT\nmany\nFIXED\na\nb");
    assert_eq!(seen[0], (Label::Count, vec![]));
    assert_eq!(seen[1].0, Label::Fixed);
    assert_eq!(idx, 5);
    assert_eq!(state.errors, vec!["Line 2: invalid COUNT count 'many'"]);
}

#[test]
fn missing_count_line_is_reported() {
    let (_, state, _) = run("COUNT");
    assert_eq!(state.errors, vec!["Line 1: COUNT is missing its count line"]);
}

#[test]
fn group_line_splits_head_count_and_values() {
    let mut state = ModeState::default();
    let row = Row {
        line_no: 4,
        raw: "red blue 2 1 2 3 4 5",
    };
    let g = group_line(&row, Label::Count, 2, &mut state).unwrap();
    assert_eq!(g.head, vec!["red", "blue"]);
    assert_eq!(g.count, 2);
    let pairs = g.tuples(2, |v| Some((v[0], v[1])));
    assert_eq!(pairs, vec![(1.0, 2.0), (3.0, 4.0)]);
}

#[test]
fn tuples_skip_bad_values_and_ignore_partial_tail() {
    let g = GroupLine {
        head: vec![],
        count: 5,
        values: vec!["1", "x", "3", "4", "5"],
    };
    assert_eq!(g.tuples(2, |v| Some(v[0] + v[1])), vec![7.0]);
}

#[test]
fn malformed_group_lines_are_reported() {
    let mut state = ModeState::default();
    let short = Row {
        line_no: 2,
        raw: "red",
    };
    assert!(group_line(&short, Label::Count, 1, &mut state).is_none());
    let bad = Row {
        line_no: 3,
        raw: "red x 1 2",
    };
    assert!(group_line(&bad, Label::Count, 1, &mut state).is_none());
    assert_eq!(
        state.errors,
        vec![
            "Line 2: malformed COUNT entry 'red'",
            "Line 3: invalid COUNT entry count 'x'",
        ]
    );
}
