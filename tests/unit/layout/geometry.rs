use super::*;

fn b(l: f64, t: f64, r: f64, bt: f64) -> ItemBounds {
    ItemBounds::new(l, t, r, bt).unwrap()
}

#[test]
fn bounds_resolve_explicit_then_canvas_then_default() {
    let own = b(10.0, 10.0, 20.0, 20.0);
    let canvas = CanvasSize {
        width: 300.0,
        height: 200.0,
    };
    assert_eq!(resolve_bounds(Some(own), Some(canvas)), own);
    assert_eq!(resolve_bounds(None, Some(canvas)), b(0.0, 0.0, 300.0, 200.0));
    assert_eq!(resolve_bounds(None, None), b(0.0, 0.0, 800.0, 800.0));
}

#[test]
fn overlap_ignores_shared_edges() {
    let a = b(0.0, 0.0, 100.0, 100.0);
    assert!(rects_overlap(a, b(50.0, 50.0, 150.0, 150.0)));
    assert!(!rects_overlap(a, b(100.0, 0.0, 200.0, 100.0)));
    assert!(!rects_overlap(a, b(0.0, 100.0, 100.0, 200.0)));
    assert!(rects_overlap(a, b(10.0, 10.0, 20.0, 20.0)));
}

#[test]
fn cell_rects_tile_the_bounds() {
    let bounds = b(100.0, 50.0, 400.0, 250.0);
    assert_eq!(
        grid_cell_rect(bounds, 2, 3, 0, 0),
        Rect::new(100.0, 50.0, 200.0, 150.0)
    );
    assert_eq!(
        grid_cell_rect(bounds, 2, 3, 1, 2),
        Rect::new(300.0, 150.0, 400.0, 250.0)
    );
    assert_eq!(
        grid_point(bounds, 2, 3, Point::new(1.0, 0.0)),
        Point::new(250.0, 100.0)
    );
}

#[test]
fn display_text_truncates_after_five_chars() {
    assert_eq!(display_text("abcde"), "abcde");
    assert_eq!(display_text("abcdef"), "abcde...");
    assert_eq!(display_text(""), "");
    assert_eq!(display_text("日本語のテキスト"), "日本語のテ...");
}

#[test]
fn font_size_follows_longest_text() {
    let short = vec![vec!["ab".to_string(), "".to_string()]];
    // min(100 * 0.7, 100 / 2 * 1.2) = 60, clamped to 30
    assert_eq!(unified_font_size(&short, 100.0, 100.0), 30.0);
    // min(20 * 0.7, 40 / 2 * 1.2) = 14
    assert!((unified_font_size(&short, 40.0, 20.0) - 14.0).abs() < 1e-9);

    let long = vec![vec!["abcdefgh".to_string()]];
    // displayed length 8: min(50 * 0.6, 55 / 5.5) = 10
    assert!((unified_font_size(&long, 55.0, 50.0) - 10.0).abs() < 1e-9);

    let empty: Vec<Vec<String>> = vec![vec![String::new(); 2]; 2];
    // max_len 0 divides by 1: min(10 * 0.7, 10 * 1.2) = 7
    assert!((unified_font_size(&empty, 10.0, 10.0) - 7.0).abs() < 1e-9);
}

#[test]
fn plane_coordinates_scale_per_axis() {
    let bounds = b(0.0, 100.0, 200.0, 500.0);
    assert_eq!(
        plane_scale(bounds, 10.0, 20.0, 10.0, 5.0),
        Point::new(100.0, 300.0)
    );
    assert_eq!(plane_radius(bounds, 20.0, 2.0), 20.0);
}
