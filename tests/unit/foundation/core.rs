use super::*;

#[test]
fn bounds_reject_inverted_and_non_finite_edges() {
    assert!(ItemBounds::new(0.0, 0.0, 10.0, 10.0).is_ok());
    assert!(ItemBounds::new(10.0, 0.0, 10.0, 10.0).is_err());
    assert!(ItemBounds::new(0.0, 5.0, 10.0, 1.0).is_err());
    assert!(ItemBounds::new(0.0, 0.0, f64::INFINITY, 10.0).is_err());
}

#[test]
fn bounds_from_canvas_and_rect_agree() {
    let b = ItemBounds::from_canvas(CanvasSize {
        width: 640.0,
        height: 480.0,
    });
    assert_eq!(b.width(), 640.0);
    assert_eq!(b.height(), 480.0);
    assert_eq!(b.to_rect(), Rect::new(0.0, 0.0, 640.0, 480.0));
    assert_eq!(b.to_string(), "(0, 0, 640, 480)");
}

#[test]
fn default_canvas_is_800_square() {
    assert_eq!(CanvasSize::default(), CanvasSize::DEFAULT);
    assert_eq!(CanvasSize::DEFAULT.width, 800.0);
    assert_eq!(CanvasSize::DEFAULT.height, 800.0);
}
