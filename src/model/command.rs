use std::fmt;

use crate::foundation::core::{CanvasSize, ItemBounds, Point};

/// A single typed draw directive decoded from one `$v` line (plus its sub-blocks).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type")]
pub enum Command {
    /// Nominal canvas size; default bounds for spatial commands of the same frame.
    #[serde(rename = "CANVAS")]
    Canvas(CanvasCommand),
    /// Rectangular cell grid.
    #[serde(rename = "GRID")]
    Grid(GridCommand),
    /// Continuous coordinate plane with circles, segments and polygons.
    #[serde(rename = "2D_PLANE")]
    Plane(PlaneCommand),
    /// Labelled bar chart.
    #[serde(rename = "BAR_GRAPH")]
    BarGraph(BarGraphCommand),
    /// Opaque text panel.
    #[serde(rename = "TEXTAREA")]
    TextArea {
        /// Text shown verbatim.
        text: String,
    },
    /// Opaque score string (display only, never parsed as a number).
    #[serde(rename = "SCORE")]
    Score {
        /// Score as written in the log.
        score: String,
    },
    /// Marker asking the presentation layer to show the frame's raw text.
    #[serde(rename = "DEBUG")]
    Debug,
}

/// Discriminant of [`Command`], named the way the DSL spells it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// `CANVAS`
    Canvas,
    /// `GRID`
    Grid,
    /// `2D_PLANE`
    Plane,
    /// `BAR_GRAPH`
    BarGraph,
    /// `TEXTAREA`
    TextArea,
    /// `SCORE`
    Score,
    /// `DEBUG`
    Debug,
}

impl CommandKind {
    /// DSL keyword of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            CommandKind::Canvas => "CANVAS",
            CommandKind::Grid => "GRID",
            CommandKind::Plane => "2D_PLANE",
            CommandKind::BarGraph => "BAR_GRAPH",
            CommandKind::TextArea => "TEXTAREA",
            CommandKind::Score => "SCORE",
            CommandKind::Debug => "DEBUG",
        }
    }

    /// Kinds that occupy a rectangle of the canvas.
    pub fn is_spatial(self) -> bool {
        matches!(self, CommandKind::Grid | CommandKind::Plane)
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Command {
    /// Discriminant of this command.
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Canvas(_) => CommandKind::Canvas,
            Command::Grid(_) => CommandKind::Grid,
            Command::Plane(_) => CommandKind::Plane,
            Command::BarGraph(_) => CommandKind::BarGraph,
            Command::TextArea { .. } => CommandKind::TextArea,
            Command::Score { .. } => CommandKind::Score,
            Command::Debug => CommandKind::Debug,
        }
    }

    /// Explicit bounds of a spatial command, if any were written.
    pub fn bounds(&self) -> Option<ItemBounds> {
        match self {
            Command::Grid(g) => g.bounds,
            Command::Plane(p) => p.bounds,
            _ => None,
        }
    }
}

/// `CANVAS H W`
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CanvasCommand {
    /// Height in pixels.
    #[serde(rename = "H")]
    pub h: f64,
    /// Width in pixels.
    #[serde(rename = "W")]
    pub w: f64,
}

impl CanvasCommand {
    /// Canvas as a width/height pair.
    pub fn size(self) -> CanvasSize {
        CanvasSize {
            width: self.w,
            height: self.h,
        }
    }
}

/// `GRID H W borderColor textColor defaultCellColor` and its sub-blocks.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridCommand {
    /// Row count.
    #[serde(rename = "H")]
    pub h: usize,
    /// Column count.
    #[serde(rename = "W")]
    pub w: usize,
    /// Wall stroke color.
    pub border_color: String,
    /// Cell text color.
    pub text_color: String,
    /// `H x W` fill colors, row-major.
    pub grid_colors: Vec<Vec<String>>,
    /// `H x W` cell texts, row-major.
    pub grid_texts: Vec<Vec<String>>,
    /// Polylines in cell units.
    pub grid_lines: Vec<GridLine>,
    /// `H` strings of `W + 1` wall flags; `'Y'` at `j` is a wall left of column `j`.
    pub wall_vertical: Vec<String>,
    /// `H + 1` strings of `W` wall flags; `'Y'` at row `i` is a wall above row `i`.
    pub wall_horizontal: Vec<String>,
    /// Explicit placement inside the canvas.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<ItemBounds>,
}

impl GridCommand {
    /// A grid with every cell painted `default_cell_color`, no text, no lines and all walls.
    pub fn filled(
        h: usize,
        w: usize,
        border_color: impl Into<String>,
        text_color: impl Into<String>,
        default_cell_color: &str,
        bounds: Option<ItemBounds>,
    ) -> Self {
        Self {
            h,
            w,
            border_color: border_color.into(),
            text_color: text_color.into(),
            grid_colors: vec![vec![default_cell_color.to_owned(); w]; h],
            grid_texts: vec![vec![String::new(); w]; h],
            grid_lines: Vec::new(),
            wall_vertical: vec!["Y".repeat(w + 1); h],
            wall_horizontal: vec!["Y".repeat(w); h + 1],
            bounds,
        }
    }

    /// Whether a wall is drawn left of column `col` in row `row` (`col` in `0..=W`).
    pub fn has_vertical_wall(&self, row: usize, col: usize) -> bool {
        wall_flag(&self.wall_vertical, row, col)
    }

    /// Whether a wall is drawn above row `row` in column `col` (`row` in `0..=H`).
    pub fn has_horizontal_wall(&self, row: usize, col: usize) -> bool {
        wall_flag(&self.wall_horizontal, row, col)
    }
}

fn wall_flag(rows: &[String], row: usize, col: usize) -> bool {
    rows.get(row)
        .and_then(|s| s.chars().nth(col))
        .is_some_and(|c| c == 'Y')
}

/// Polyline drawn over a grid, points in cell units (cell centers).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GridLine {
    /// Stroke color.
    pub color: String,
    /// Vertices; `x` is the column, `y` the row.
    pub points: Vec<Point>,
}

/// `2D_PLANE H W` and its sub-blocks.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaneCommand {
    /// Logical height.
    #[serde(rename = "H")]
    pub h: f64,
    /// Logical width.
    #[serde(rename = "W")]
    pub w: f64,
    /// Circle groups sharing stroke and fill.
    pub circle_groups: Vec<CircleGroup>,
    /// Groups of independent segments.
    pub line_groups: Vec<LineGroup>,
    /// One polygon per group.
    pub polygon_groups: Vec<PolygonGroup>,
    /// Explicit placement inside the canvas.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<ItemBounds>,
}

impl PlaneCommand {
    /// An empty plane of logical extent `w x h`.
    pub fn empty(h: f64, w: f64, bounds: Option<ItemBounds>) -> Self {
        Self {
            h,
            w,
            circle_groups: Vec::new(),
            line_groups: Vec::new(),
            polygon_groups: Vec::new(),
            bounds,
        }
    }
}

/// Circle in plane coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlaneCircle {
    /// Center x.
    pub x: f64,
    /// Center y.
    pub y: f64,
    /// Radius, in units of the plane width.
    pub r: f64,
}

/// Circles sharing stroke and fill colors.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircleGroup {
    /// Stroke color.
    pub line_color: String,
    /// Fill color.
    pub fill_color: String,
    /// Member circles.
    pub circles: Vec<PlaneCircle>,
}

/// Segment from `(ax, ay)` to `(bx, by)` in plane coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Segment {
    /// Start x.
    pub ax: f64,
    /// Start y.
    pub ay: f64,
    /// End x.
    pub bx: f64,
    /// End y.
    pub by: f64,
}

/// Independent segments sharing a color.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LineGroup {
    /// Stroke color.
    pub color: String,
    /// Stroke width in pixels, when the log spelled one out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Member segments.
    pub lines: Vec<Segment>,
}

/// Closed polygon in plane coordinates.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Polygon {
    /// Vertices in drawing order.
    pub points: Vec<Point>,
}

/// A polygon with its stroke and fill.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolygonGroup {
    /// Stroke color.
    pub line_color: String,
    /// Fill color.
    pub fill_color: String,
    /// The polygon.
    pub polygon: Polygon,
}

/// `BAR_GRAPH fillColor yMin yMax` plus its data line.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarGraphCommand {
    /// Bar fill color.
    pub fill_color: String,
    /// Lower end of the value axis.
    pub y_min: f64,
    /// Upper end of the value axis; always greater than `y_min`.
    pub y_max: f64,
    /// Bars in input order.
    pub items: Vec<BarGraphItem>,
}

/// One labelled bar.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BarGraphItem {
    /// Label under the bar.
    pub label: String,
    /// Bar value.
    pub value: f64,
}

#[cfg(test)]
#[path = "../../tests/unit/model/command.rs"]
mod tests;
