use super::*;

#[test]
fn keyword_stops_at_whitespace_or_paren() {
    assert_eq!(split_keyword("COMMIT"), ("COMMIT", ""));
    assert_eq!(split_keyword("GRID 2 2 a b c"), ("GRID", " 2 2 a b c"));
    assert_eq!(
        split_keyword("GRID(0, 0, 9, 9) 3 3"),
        ("GRID", "(0, 0, 9, 9) 3 3")
    );
    assert_eq!(split_keyword(""), ("", ""));
}

#[test]
fn bounds_tuple_with_and_without_spaces() {
    let (b, rest) = extract_bounds("(0,0,400,400) 5 5 black").unwrap();
    assert_eq!(b, Some(ItemBounds::new(0.0, 0.0, 400.0, 400.0).unwrap()));
    assert_eq!(rest.split_whitespace().collect::<Vec<_>>(), ["5", "5", "black"]);

    let (b, _) = extract_bounds("(10, 20.5, 30, 40) 1 1").unwrap();
    let b = b.unwrap();
    assert_eq!(b.top, 20.5);
    assert_eq!(b.right, 30.0);
}

#[test]
fn headers_without_bounds_pass_through() {
    let (b, rest) = extract_bounds(" 3 4 red").unwrap();
    assert!(b.is_none());
    assert_eq!(rest, "3 4 red");
}

#[test]
fn malformed_bounds_are_reported() {
    assert!(extract_bounds("(0,0,1 2 3").unwrap_err().contains("unclosed"));
    assert!(extract_bounds("(0,0,1) 2").unwrap_err().contains("needs 4 values"));
    assert!(extract_bounds("(0,a,1,1) 2").unwrap_err().contains("not a number"));
    assert!(extract_bounds("(5,0,1,1) 2").unwrap_err().contains("left < right"));
}

#[test]
fn numbers_reject_non_finite_and_garbage() {
    assert_eq!(parse_f64("1.5"), Some(1.5));
    assert_eq!(parse_f64("-2e2"), Some(-200.0));
    assert_eq!(parse_f64("NaN"), None);
    assert_eq!(parse_f64("inf"), None);
    assert_eq!(parse_f64("xyz"), None);
    assert_eq!(parse_count("3"), Some(3));
    assert_eq!(parse_count("-1"), None);
    assert_eq!(parse_index("-1"), Some(-1));
}

#[test]
fn cell_tokens_handle_quotes_and_barewords() {
    assert_eq!(
        scan_cell_tokens(r#"a "b c" "" d"#),
        vec!["a", "b c", "", "d"]
    );
    assert_eq!(scan_cell_tokens("   "), Vec::<String>::new());
    assert_eq!(scan_cell_tokens(r#""open x"#), vec![r#""open"#, "x"]);
    assert_eq!(scan_cell_tokens(r#""a b"c"#), vec!["a b", "c"]);
}

#[test]
fn cursor_tracks_line_numbers_and_blank_skips() {
    let mut c = LineCursor::new("a\n\n  \nb");
    assert_eq!(c.line_no(), 1);
    let row = c.take_row().unwrap();
    assert_eq!(row, Row { line_no: 1, raw: "a" });
    assert_eq!(c.next_non_blank(), Some(3));
    c.advance();
    c.advance();
    assert_eq!(c.current(), Some("b"));
    c.advance();
    assert!(c.take_row().is_none());
    assert_eq!(c.index(), 4);
}

#[test]
fn row_text_and_tokens_trim() {
    let row = Row {
        line_no: 7,
        raw: "  red  1 2 \r",
    };
    assert_eq!(row.text(), "red  1 2");
    assert_eq!(row.tokens(), vec!["red", "1", "2"]);
}
