use std::fmt;

use crate::{
    foundation::core::{ItemBounds, Point},
    model::command::{
        CircleGroup, Command, LineGroup, PlaneCircle, PlaneCommand, Polygon, PolygonGroup, Segment,
    },
    parse::{
        accumulator::ModeState,
        block::{BlockShape, GroupLine, SubBlock, group_line, read_sub_blocks},
        line::{LineCursor, Row, extract_bounds, parse_count, parse_f64},
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PlaneBlock {
    Circles,
    Lines,
    Polygons,
}

impl SubBlock for PlaneBlock {
    fn from_label(label: &str) -> Option<Self> {
        match label {
            "CIRCLES" => Some(PlaneBlock::Circles),
            "LINES" => Some(PlaneBlock::Lines),
            "POLYGONS" => Some(PlaneBlock::Polygons),
            _ => None,
        }
    }
}

impl fmt::Display for PlaneBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PlaneBlock::Circles => "CIRCLES",
            PlaneBlock::Lines => "LINES",
            PlaneBlock::Polygons => "POLYGONS",
        })
    }
}

/// `[(l, t, r, b)] H W` as positive floats.
pub(crate) fn parse_plane_header(rest: &str) -> Result<(f64, f64, Option<ItemBounds>), String> {
    let (bounds, params) = extract_bounds(rest).map_err(|e| format!("2D_PLANE {e}"))?;
    let params: Vec<&str> = params.split_whitespace().collect();
    let [h, w] = params[..] else {
        return Err(format!(
            "2D_PLANE expects 2 parameters (H W), got {}",
            params.len()
        ));
    };
    match (parse_f64(h), parse_f64(w)) {
        (Some(h), Some(w)) if h > 0.0 && w > 0.0 => Ok((h, w, bounds)),
        _ => Err(format!(
            "2D_PLANE H and W must be positive numbers, got '{h}' and '{w}'"
        )),
    }
}

/// Parse a `2D_PLANE` header at the cursor plus all of its sub-blocks.
pub(crate) fn parse_plane(cursor: &mut LineCursor<'_>, state: &mut ModeState, rest: &str) {
    let line_no = cursor.line_no();
    cursor.advance();
    let (h, w, bounds) = match parse_plane_header(rest) {
        Ok(header) => header,
        Err(msg) => {
            state.error(line_no, msg);
            return;
        }
    };

    let mut plane = PlaneCommand::empty(h, w, bounds);
    read_sub_blocks(
        cursor,
        state,
        |_: PlaneBlock| BlockShape::Counted,
        |kind, rows, state| match kind {
            PlaneBlock::Circles => apply_circles(&mut plane, &rows, state),
            PlaneBlock::Lines => apply_segments(&mut plane, &rows, state),
            PlaneBlock::Polygons => apply_polygons(&mut plane, &rows, state),
        },
    );
    state.push(line_no, Command::Plane(plane));
}

pub(crate) fn apply_circles(plane: &mut PlaneCommand, rows: &[Row<'_>], state: &mut ModeState) {
    for row in rows {
        let Some(entry) = group_line(row, PlaneBlock::Circles, 2, state) else {
            continue;
        };
        let circles = entry.tuples(3, |v| {
            (v[2] >= 0.0).then_some(PlaneCircle {
                x: v[0],
                y: v[1],
                r: v[2],
            })
        });
        if circles.is_empty() {
            continue;
        }
        plane.circle_groups.push(CircleGroup {
            line_color: entry.head[0].to_owned(),
            fill_color: entry.head[1].to_owned(),
            circles,
        });
    }
}

/// Entries are `color count ax ay bx by ...`; the emitter's `color width count ...` form is
/// recognised when only that reading accounts for every token.
pub(crate) fn apply_segments(plane: &mut PlaneCommand, rows: &[Row<'_>], state: &mut ModeState) {
    for row in rows {
        let (entry, width) = match widened_line_entry(row) {
            Some((entry, width)) => (entry, Some(width)),
            None => match group_line(row, PlaneBlock::Lines, 1, state) {
                Some(entry) => (entry, None),
                None => continue,
            },
        };
        let lines = entry.tuples(4, |v| {
            Some(Segment {
                ax: v[0],
                ay: v[1],
                bx: v[2],
                by: v[3],
            })
        });
        if lines.is_empty() {
            continue;
        }
        plane.line_groups.push(LineGroup {
            color: entry.head[0].to_owned(),
            width,
            lines,
        });
    }
}

fn widened_line_entry<'a>(row: &Row<'a>) -> Option<(GroupLine<'a>, f64)> {
    let tokens = row.tokens();
    let n = tokens.len();
    let plain_fits =
        n >= 2 && parse_count(tokens[1]).is_some_and(|c| c.checked_mul(4) == Some(n - 2));
    if plain_fits || n < 3 {
        return None;
    }
    let width = parse_f64(tokens[1]).filter(|w| *w > 0.0)?;
    let count = parse_count(tokens[2]).filter(|c| c.checked_mul(4) == Some(n - 3))?;
    Some((
        GroupLine {
            head: vec![tokens[0]],
            count,
            values: tokens[3..].to_vec(),
        },
        width,
    ))
}

pub(crate) fn apply_polygons(plane: &mut PlaneCommand, rows: &[Row<'_>], state: &mut ModeState) {
    for row in rows {
        let Some(entry) = group_line(row, PlaneBlock::Polygons, 2, state) else {
            continue;
        };
        let points = entry.tuples(2, |v| Some(Point::new(v[0], v[1])));
        if points.is_empty() {
            continue;
        }
        plane.polygon_groups.push(PolygonGroup {
            line_color: entry.head[0].to_owned(),
            fill_color: entry.head[1].to_owned(),
            polygon: Polygon { points },
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/parse/plane.rs"]
mod tests;
