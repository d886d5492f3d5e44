use crate::foundation::core::{CanvasSize, ItemBounds, Point, Rect};

/// Longest cell text shown before it is cut and suffixed with `...`.
pub const MAX_CELL_TEXT_CHARS: usize = 5;

/// Largest font size used for cell text, in pixels.
pub const MAX_CELL_FONT_SIZE: f64 = 30.0;

/// Placement of a spatial command: its own bounds, else the frame canvas, else 800x800.
pub fn resolve_bounds(explicit: Option<ItemBounds>, canvas: Option<CanvasSize>) -> ItemBounds {
    explicit.unwrap_or_else(|| ItemBounds::from_canvas(canvas.unwrap_or_default()))
}

/// Whether two rectangles share interior area. Touching edges do not count.
pub fn rects_overlap(a: ItemBounds, b: ItemBounds) -> bool {
    !(a.right <= b.left || b.right <= a.left || a.bottom <= b.top || b.bottom <= a.top)
}

/// Width and height of one cell of an `h x w` grid laid over `bounds`.
pub fn grid_cell_size(bounds: ItemBounds, h: usize, w: usize) -> (f64, f64) {
    (bounds.width() / w as f64, bounds.height() / h as f64)
}

/// Pixel rectangle of cell `(row, col)`.
pub fn grid_cell_rect(bounds: ItemBounds, h: usize, w: usize, row: usize, col: usize) -> Rect {
    let (cw, ch) = grid_cell_size(bounds, h, w);
    let x0 = bounds.left + col as f64 * cw;
    let y0 = bounds.top + row as f64 * ch;
    Rect::new(x0, y0, x0 + cw, y0 + ch)
}

/// Pixel center of a point given in cell units (`x` = column, `y` = row).
pub fn grid_point(bounds: ItemBounds, h: usize, w: usize, at: Point) -> Point {
    let (cw, ch) = grid_cell_size(bounds, h, w);
    Point::new(
        bounds.left + (at.x + 0.5) * cw,
        bounds.top + (at.y + 0.5) * ch,
    )
}

/// Cell text as displayed: at most five characters, then `...`.
pub fn display_text(text: &str) -> String {
    if text.chars().count() > MAX_CELL_TEXT_CHARS {
        let mut s: String = text.chars().take(MAX_CELL_TEXT_CHARS).collect();
        s.push_str("...");
        s
    } else {
        text.to_owned()
    }
}

/// One font size for all cells of a grid, fitted to its longest displayed text.
pub fn unified_font_size(texts: &[Vec<String>], cell_w: f64, cell_h: f64) -> f64 {
    let max_len = texts
        .iter()
        .flatten()
        .map(|t| display_text(t).chars().count())
        .max()
        .unwrap_or(0);
    let size = if max_len <= 4 {
        (cell_h * 0.7).min(cell_w / max_len.max(1) as f64 * 1.2)
    } else {
        (cell_h * 0.6).min(cell_w / 5.5)
    };
    size.min(MAX_CELL_FONT_SIZE)
}

/// Map plane coordinates into `bounds`; the plane spans `w x h` logical units.
pub fn plane_scale(bounds: ItemBounds, h: f64, w: f64, x: f64, y: f64) -> Point {
    Point::new(
        bounds.left + x / w * bounds.width(),
        bounds.top + y / h * bounds.height(),
    )
}

/// Radii scale with the horizontal axis only.
pub fn plane_radius(bounds: ItemBounds, w: f64, r: f64) -> f64 {
    r * bounds.width() / w
}

#[cfg(test)]
#[path = "../../tests/unit/layout/geometry.rs"]
mod tests;
