use crate::{
    foundation::{
        core::{CanvasSize, Circle, ItemBounds, Line, Point, Rect},
        error::{VdslError, VdslResult},
    },
    layout::geometry::{
        display_text, grid_cell_rect, grid_cell_size, grid_point, plane_radius, plane_scale,
        resolve_bounds, unified_font_size,
    },
    model::{
        command::{Command, GridCommand, PlaneCommand},
        frame::Frame,
    },
};

/// Vertex dots on grid polylines are this fraction of the smaller cell side.
pub const POLYLINE_DOT_RATIO: f64 = 0.05;

/// Pixel-space primitives for one frame, ready to be drawn in order.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameLayout {
    /// First `CANVAS` of the frame, or 800x800.
    pub canvas: CanvasSize,
    /// Spatial commands in input order.
    pub items: Vec<ItemLayout>,
}

/// One spatial command in pixel space.
#[derive(Clone, Debug, PartialEq)]
pub enum ItemLayout {
    /// A laid out `GRID`.
    Grid(GridLayout),
    /// A laid out `2D_PLANE`.
    Plane(PlaneLayout),
}

/// Cells, walls and polylines of one grid.
#[derive(Clone, Debug, PartialEq)]
pub struct GridLayout {
    /// Resolved placement.
    pub bounds: ItemBounds,
    /// Wall color.
    pub border_color: String,
    /// Cell text color.
    pub text_color: String,
    /// Shared by every cell of this grid.
    pub font_size: f64,
    /// Row-major cells.
    pub cells: Vec<CellLayout>,
    /// Wall segments, vertical walls first.
    pub walls: Vec<Line>,
    /// Polylines with at least two points.
    pub polylines: Vec<PolylineLayout>,
}

/// One grid cell.
#[derive(Clone, Debug, PartialEq)]
pub struct CellLayout {
    /// Row index.
    pub row: usize,
    /// Column index.
    pub col: usize,
    /// Pixel rectangle.
    pub rect: Rect,
    /// Fill color.
    pub fill: String,
    /// Possibly truncated text drawn in the cell.
    pub text: String,
    /// `"(row, col): full text"`
    pub tooltip: String,
}

/// Grid polyline through cell centers.
#[derive(Clone, Debug, PartialEq)]
pub struct PolylineLayout {
    /// Stroke and dot color.
    pub color: String,
    /// Vertices in pixels.
    pub points: Vec<Point>,
    /// One dot per vertex.
    pub dots: Vec<Circle>,
}

/// Shapes of one plane, scaled into its bounds.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaneLayout {
    /// Resolved placement.
    pub bounds: ItemBounds,
    /// Circles of every group, in group order.
    pub circles: Vec<CircleLayout>,
    /// Segments of every group, in group order.
    pub segments: Vec<SegmentLayout>,
    /// Polygons with at least three points.
    pub polygons: Vec<PolygonLayout>,
}

/// A plane circle.
#[derive(Clone, Debug, PartialEq)]
pub struct CircleLayout {
    /// Center and radius in pixels.
    pub circle: Circle,
    /// Stroke color.
    pub stroke: String,
    /// Fill color.
    pub fill: String,
}

/// A plane segment.
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentLayout {
    /// Endpoints in pixels.
    pub line: Line,
    /// Stroke color.
    pub color: String,
    /// Explicit stroke width from the log, if any.
    pub width: Option<f64>,
}

/// A plane polygon.
#[derive(Clone, Debug, PartialEq)]
pub struct PolygonLayout {
    /// Vertices in pixels.
    pub points: Vec<Point>,
    /// Stroke color.
    pub stroke: String,
    /// Fill color.
    pub fill: String,
}

impl FrameLayout {
    /// Lay out every spatial command of `frame` on its canvas.
    #[tracing::instrument(skip(frame), fields(commands = frame.commands.len()))]
    pub fn compute(frame: &Frame) -> VdslResult<Self> {
        let canvas = frame.canvas();
        let mut items = Vec::new();
        for cmd in &frame.commands {
            match cmd {
                Command::Grid(g) => {
                    let bounds = resolve_bounds(g.bounds, canvas);
                    items.push(ItemLayout::Grid(layout_grid(g, bounds)?));
                }
                Command::Plane(p) => {
                    let bounds = resolve_bounds(p.bounds, canvas);
                    items.push(ItemLayout::Plane(layout_plane(p, bounds)?));
                }
                _ => {}
            }
        }
        Ok(Self {
            canvas: canvas.unwrap_or_default(),
            items,
        })
    }
}

/// Pixel layout of one grid inside `bounds`.
pub fn layout_grid(g: &GridCommand, bounds: ItemBounds) -> VdslResult<GridLayout> {
    if g.h == 0 || g.w == 0 {
        return Err(VdslError::layout(format!(
            "grid must have at least one cell, got {}x{}",
            g.h, g.w
        )));
    }
    let (cw, ch) = grid_cell_size(bounds, g.h, g.w);

    let mut cells = Vec::with_capacity(g.h * g.w);
    for row in 0..g.h {
        for col in 0..g.w {
            let fill = g
                .grid_colors
                .get(row)
                .and_then(|r| r.get(col))
                .map_or("#FFFFFF", String::as_str);
            let raw = g
                .grid_texts
                .get(row)
                .and_then(|r| r.get(col))
                .map_or("", String::as_str);
            cells.push(CellLayout {
                row,
                col,
                rect: grid_cell_rect(bounds, g.h, g.w, row, col),
                fill: fill.to_owned(),
                text: display_text(raw),
                tooltip: format!("({row}, {col}): {raw}"),
            });
        }
    }

    let mut walls = Vec::new();
    for row in 0..g.h {
        for col in 0..=g.w {
            if g.has_vertical_wall(row, col) {
                let x = bounds.left + col as f64 * cw;
                let y = bounds.top + row as f64 * ch;
                walls.push(Line::new((x, y), (x, y + ch)));
            }
        }
    }
    for row in 0..=g.h {
        for col in 0..g.w {
            if g.has_horizontal_wall(row, col) {
                let x = bounds.left + col as f64 * cw;
                let y = bounds.top + row as f64 * ch;
                walls.push(Line::new((x, y), (x + cw, y)));
            }
        }
    }

    let dot_r = cw.min(ch) * POLYLINE_DOT_RATIO;
    let polylines = g
        .grid_lines
        .iter()
        .filter(|l| l.points.len() >= 2)
        .map(|l| {
            let points: Vec<Point> = l
                .points
                .iter()
                .map(|&p| grid_point(bounds, g.h, g.w, p))
                .collect();
            PolylineLayout {
                color: l.color.clone(),
                dots: points.iter().map(|&c| Circle::new(c, dot_r)).collect(),
                points,
            }
        })
        .collect();

    Ok(GridLayout {
        bounds,
        border_color: g.border_color.clone(),
        text_color: g.text_color.clone(),
        font_size: unified_font_size(&g.grid_texts, cw, ch),
        cells,
        walls,
        polylines,
    })
}

/// Pixel layout of one plane inside `bounds`.
pub fn layout_plane(p: &PlaneCommand, bounds: ItemBounds) -> VdslResult<PlaneLayout> {
    if !(p.h > 0.0 && p.w > 0.0) {
        return Err(VdslError::layout(format!(
            "plane extent must be positive, got {}x{}",
            p.h, p.w
        )));
    }
    let at = |x: f64, y: f64| plane_scale(bounds, p.h, p.w, x, y);

    let circles = p
        .circle_groups
        .iter()
        .flat_map(|g| {
            g.circles.iter().map(|c| CircleLayout {
                circle: Circle::new(at(c.x, c.y), plane_radius(bounds, p.w, c.r)),
                stroke: g.line_color.clone(),
                fill: g.fill_color.clone(),
            })
        })
        .collect();

    let segments = p
        .line_groups
        .iter()
        .flat_map(|g| {
            g.lines.iter().map(|s| SegmentLayout {
                line: Line::new(at(s.ax, s.ay), at(s.bx, s.by)),
                color: g.color.clone(),
                width: g.width,
            })
        })
        .collect();

    let polygons = p
        .polygon_groups
        .iter()
        .filter(|g| g.polygon.points.len() >= 3)
        .map(|g| PolygonLayout {
            points: g.polygon.points.iter().map(|q| at(q.x, q.y)).collect(),
            stroke: g.line_color.clone(),
            fill: g.fill_color.clone(),
        })
        .collect();

    Ok(PlaneLayout {
        bounds,
        circles,
        segments,
        polygons,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/layout/scene.rs"]
mod tests;
