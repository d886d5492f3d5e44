use std::fmt;

use crate::{
    foundation::core::{ItemBounds, Point},
    model::command::{Command, GridCommand, GridLine},
    parse::{
        accumulator::ModeState,
        block::{BlockShape, SubBlock, group_line, read_sub_blocks},
        line::{LineCursor, Row, extract_bounds, parse_count, parse_index, scan_cell_tokens},
    },
};

/// Upper bound on `H * W` for one grid.
pub(crate) const MAX_GRID_CELLS: usize = 4_000_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum GridBlock {
    CellColors,
    CellColorsPos,
    CellText,
    Lines,
    WallVertical,
    WallHorizontal,
}

impl SubBlock for GridBlock {
    fn from_label(label: &str) -> Option<Self> {
        match label {
            "CELL_COLORS" => Some(GridBlock::CellColors),
            "CELL_COLORS_POS" => Some(GridBlock::CellColorsPos),
            "CELL_TEXT" => Some(GridBlock::CellText),
            "LINES" => Some(GridBlock::Lines),
            "WALL_VERTICAL" => Some(GridBlock::WallVertical),
            "WALL_HORIZONTAL" => Some(GridBlock::WallHorizontal),
            _ => None,
        }
    }
}

impl fmt::Display for GridBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GridBlock::CellColors => "CELL_COLORS",
            GridBlock::CellColorsPos => "CELL_COLORS_POS",
            GridBlock::CellText => "CELL_TEXT",
            GridBlock::Lines => "LINES",
            GridBlock::WallVertical => "WALL_VERTICAL",
            GridBlock::WallHorizontal => "WALL_HORIZONTAL",
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct GridHeader<'a> {
    pub(crate) h: usize,
    pub(crate) w: usize,
    pub(crate) border_color: &'a str,
    pub(crate) text_color: &'a str,
    pub(crate) default_cell_color: &'a str,
    pub(crate) bounds: Option<ItemBounds>,
}

/// `[(l, t, r, b)] H W borderColor textColor defaultCellColor`
pub(crate) fn parse_grid_header(rest: &str) -> Result<GridHeader<'_>, String> {
    let (bounds, params) = extract_bounds(rest).map_err(|e| format!("GRID {e}"))?;
    let params: Vec<&str> = params.split_whitespace().collect();
    let [h, w, border_color, text_color, default_cell_color] = params[..] else {
        return Err(format!(
            "GRID expects 5 parameters (H W borderColor textColor defaultCellColor), got {}",
            params.len()
        ));
    };
    let (Some(h_val), Some(w_val)) = (parse_count(h), parse_count(w)) else {
        return Err(format!(
            "GRID H and W must be positive integers, got '{h}' and '{w}'"
        ));
    };
    if h_val == 0 || w_val == 0 {
        return Err(format!(
            "GRID H and W must be positive integers, got '{h}' and '{w}'"
        ));
    }
    if h_val.saturating_mul(w_val) > MAX_GRID_CELLS {
        return Err(format!(
            "GRID {h_val}x{w_val} exceeds the limit of {MAX_GRID_CELLS} cells"
        ));
    }
    Ok(GridHeader {
        h: h_val,
        w: w_val,
        border_color,
        text_color,
        default_cell_color,
        bounds,
    })
}

/// Parse a `GRID` header at the cursor plus all of its sub-blocks.
pub(crate) fn parse_grid(cursor: &mut LineCursor<'_>, state: &mut ModeState, rest: &str) {
    let line_no = cursor.line_no();
    cursor.advance();
    let header = match parse_grid_header(rest) {
        Ok(header) => header,
        Err(msg) => {
            state.error(line_no, msg);
            return;
        }
    };

    let mut grid = GridCommand::filled(
        header.h,
        header.w,
        header.border_color,
        header.text_color,
        header.default_cell_color,
        header.bounds,
    );
    let (h, w) = (grid.h, grid.w);
    read_sub_blocks(
        cursor,
        state,
        |kind| match kind {
            GridBlock::CellColors | GridBlock::CellText | GridBlock::WallVertical => {
                BlockShape::Rows(h)
            }
            GridBlock::WallHorizontal => BlockShape::Rows(h + 1),
            GridBlock::CellColorsPos | GridBlock::Lines => BlockShape::Counted,
        },
        |kind, rows, state| match kind {
            GridBlock::CellColors => apply_cell_colors(&mut grid, &rows),
            GridBlock::CellColorsPos => apply_cell_colors_pos(&mut grid, &rows, state),
            GridBlock::CellText => apply_cell_text(&mut grid, &rows),
            GridBlock::Lines => apply_lines(&mut grid, &rows, state),
            GridBlock::WallVertical => {
                apply_walls(&mut grid.wall_vertical, kind, w + 1, &rows, state)
            }
            GridBlock::WallHorizontal => {
                apply_walls(&mut grid.wall_horizontal, kind, w, &rows, state)
            }
        },
    );
    state.push(line_no, Command::Grid(grid));
}

pub(crate) fn apply_cell_colors(grid: &mut GridCommand, rows: &[Row<'_>]) {
    for (cells, row) in grid.grid_colors.iter_mut().zip(rows) {
        for (cell, tok) in cells.iter_mut().zip(row.raw.split_whitespace()) {
            *cell = tok.to_owned();
        }
    }
}

/// Out-of-range or non-integer positions are dropped without a diagnostic.
pub(crate) fn apply_cell_colors_pos(
    grid: &mut GridCommand,
    rows: &[Row<'_>],
    state: &mut ModeState,
) {
    let (h, w) = (grid.h, grid.w);
    for row in rows {
        let Some(entry) = group_line(row, GridBlock::CellColorsPos, 1, state) else {
            continue;
        };
        let color = entry.head[0];
        for pair in entry.values.chunks_exact(2).take(entry.count) {
            let (Some(r), Some(c)) = (parse_index(pair[0]), parse_index(pair[1])) else {
                continue;
            };
            if let (Ok(r), Ok(c)) = (usize::try_from(r), usize::try_from(c))
                && r < h
                && c < w
            {
                grid.grid_colors[r][c] = color.to_owned();
            }
        }
    }
}

pub(crate) fn apply_cell_text(grid: &mut GridCommand, rows: &[Row<'_>]) {
    for (cells, row) in grid.grid_texts.iter_mut().zip(rows) {
        for (cell, tok) in cells.iter_mut().zip(scan_cell_tokens(row.raw)) {
            *cell = tok;
        }
    }
}

/// Short rows are kept as written (missing walls read as open) with a diagnostic; long rows
/// are clipped.
pub(crate) fn apply_walls(
    walls: &mut [String],
    kind: GridBlock,
    expected: usize,
    rows: &[Row<'_>],
    state: &mut ModeState,
) {
    for (i, (slot, row)) in walls.iter_mut().zip(rows).enumerate() {
        let text = row.text();
        let len = text.chars().count();
        if len < expected {
            state.error(
                row.line_no,
                format!("{kind} row {i} has {len} characters, expected {expected}"),
            );
            *slot = text.to_owned();
        } else {
            *slot = text.chars().take(expected).collect();
        }
    }
}

pub(crate) fn apply_lines(grid: &mut GridCommand, rows: &[Row<'_>], state: &mut ModeState) {
    for row in rows {
        let Some(entry) = group_line(row, GridBlock::Lines, 1, state) else {
            continue;
        };
        let points = entry.tuples(2, |v| Some(Point::new(v[0], v[1])));
        if points.is_empty() {
            continue;
        }
        grid.grid_lines.push(GridLine {
            color: entry.head[0].to_owned(),
            points,
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/parse/grid.rs"]
mod tests;
