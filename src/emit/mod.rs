//! `$v` text emitter, the inverse of [`crate::parse`].
//!
//! A frame is written as its commands in order followed by `COMMIT`, always with an explicit
//! `$v(mode)` prefix. Parsing the output yields the same commands. Raw text and diagnostics are
//! not carried over: the re-parsed raw text is the emitted text itself, and frames without
//! commands are skipped since `COMMIT` alone commits nothing.
//!
//! Values the parser could not read back (strings with whitespace where one token is expected,
//! multi-line text, non-finite numbers) are rejected with [`VdslError::Validation`].

use std::{borrow::Cow, collections::HashMap, fmt::Write as _};

use crate::{
    foundation::error::{VdslError, VdslResult},
    model::{
        command::{BarGraphCommand, Command, GridCommand, PlaneCommand},
        frame::{Frame, ParsedModes},
    },
};

/// Every frame of every mode, modes in name order.
#[tracing::instrument(skip(modes), fields(frames = modes.total_frames()))]
pub fn emit_modes(modes: &ParsedModes) -> VdslResult<String> {
    let mut out = String::new();
    for (mode, frames) in modes.iter() {
        for frame in frames {
            write_frame(&mut out, mode, frame)?;
        }
    }
    Ok(out)
}

/// One frame as `$v(mode)` lines ending in `COMMIT`.
pub fn emit_frame(mode: &str, frame: &Frame) -> VdslResult<String> {
    let mut out = String::new();
    write_frame(&mut out, mode, frame)?;
    Ok(out)
}

fn write_frame(out: &mut String, mode: &str, frame: &Frame) -> VdslResult<()> {
    if mode.is_empty() || mode.contains([')', '\n', '\r']) {
        return Err(VdslError::validation(format!(
            "mode '{mode}' cannot be written as $v(mode)"
        )));
    }
    if frame.commands.is_empty() {
        return Ok(());
    }
    let prefix = format!("$v({mode})");
    for command in &frame.commands {
        match command {
            Command::Canvas(c) => {
                writeln!(out, "{prefix} CANVAS {} {}", num(c.h)?, num(c.w)?)?;
            }
            Command::Grid(g) => write_grid(out, &prefix, g)?,
            Command::Plane(p) => write_plane(out, &prefix, p)?,
            Command::BarGraph(b) => write_bar_graph(out, &prefix, b)?,
            Command::TextArea { text } => {
                writeln!(out, "{prefix} TEXTAREA {}", line_text("TEXTAREA", text)?)?;
            }
            Command::Score { score } => {
                writeln!(out, "{prefix} SCORE {}", line_text("SCORE", score)?)?;
            }
            Command::Debug => writeln!(out, "{prefix} DEBUG")?,
        }
    }
    writeln!(out, "{prefix} COMMIT")?;
    Ok(())
}

fn write_grid(out: &mut String, prefix: &str, g: &GridCommand) -> VdslResult<()> {
    let sized = |rows: &[Vec<String>]| rows.len() == g.h && rows.iter().all(|r| r.len() == g.w);
    if g.h == 0 || g.w == 0 || !sized(&g.grid_colors) || !sized(&g.grid_texts) {
        return Err(VdslError::validation(format!(
            "GRID {}x{} has cell tables of the wrong shape",
            g.h, g.w
        )));
    }

    // The most frequent color goes in the header; the rest become CELL_COLORS_POS entries.
    let mut order: Vec<&str> = Vec::new();
    let mut cells: HashMap<&str, Vec<(usize, usize)>> = HashMap::new();
    for (r, row) in g.grid_colors.iter().enumerate() {
        for (c, color) in row.iter().enumerate() {
            cells
                .entry(color.as_str())
                .or_insert_with(|| {
                    order.push(color.as_str());
                    Vec::new()
                })
                .push((r, c));
        }
    }
    let default = order
        .iter()
        .rev()
        .copied()
        .max_by_key(|color| cells.get(color).map_or(0, Vec::len))
        .unwrap_or_default();

    write!(out, "{prefix} GRID")?;
    if let Some(bounds) = g.bounds {
        write!(out, "{bounds}")?;
    }
    writeln!(
        out,
        " {} {} {} {} {}",
        g.h,
        g.w,
        token("border color", &g.border_color)?,
        token("text color", &g.text_color)?,
        token("cell color", default)?
    )?;

    if order.len() > 1 {
        writeln!(out, "CELL_COLORS_POS\n{}", order.len() - 1)?;
        for color in order.iter().filter(|c| **c != default) {
            let positions = cells.get(color).map_or(&[][..], Vec::as_slice);
            write!(out, "{} {}", token("cell color", color)?, positions.len())?;
            for (r, c) in positions {
                write!(out, " {r} {c}")?;
            }
            out.push('\n');
        }
    }

    if g.grid_texts.iter().flatten().any(|t| !t.is_empty()) {
        out.push_str("CELL_TEXT\n");
        for row in &g.grid_texts {
            let texts = row
                .iter()
                .map(String::as_str)
                .map(cell_text)
                .collect::<VdslResult<Vec<_>>>()?;
            writeln!(out, "{}", texts.join(" "))?;
        }
    }

    if !g.grid_lines.is_empty() {
        writeln!(out, "LINES\n{}", g.grid_lines.len())?;
        for line in &g.grid_lines {
            write!(out, "{} {}", token("line color", &line.color)?, line.points.len())?;
            for p in &line.points {
                write!(out, " {} {}", num(p.x)?, num(p.y)?)?;
            }
            out.push('\n');
        }
    }

    write_walls(out, "WALL_VERTICAL", &g.wall_vertical, g.h, g.w + 1)?;
    write_walls(out, "WALL_HORIZONTAL", &g.wall_horizontal, g.h + 1, g.w)?;
    Ok(())
}

/// Omitted when every wall is present, which is what a bare header produces.
fn write_walls(
    out: &mut String,
    label: &str,
    rows: &[String],
    expected_rows: usize,
    width: usize,
) -> VdslResult<()> {
    if rows.len() != expected_rows {
        return Err(VdslError::validation(format!(
            "{label} has {} rows, expected {expected_rows}",
            rows.len()
        )));
    }
    let full = "Y".repeat(width);
    if rows.iter().all(|r| *r == full) {
        return Ok(());
    }
    writeln!(out, "{label}")?;
    for row in rows {
        if row.trim() != row.as_str() || row.contains(['\n', '\r']) {
            return Err(VdslError::validation(format!(
                "{label} row '{row}' cannot be written on one line"
            )));
        }
        writeln!(out, "{row}")?;
    }
    Ok(())
}

fn write_plane(out: &mut String, prefix: &str, p: &PlaneCommand) -> VdslResult<()> {
    write!(out, "{prefix} 2D_PLANE")?;
    if let Some(bounds) = p.bounds {
        write!(out, "{bounds}")?;
    }
    writeln!(out, " {} {}", num(p.h)?, num(p.w)?)?;

    if !p.circle_groups.is_empty() {
        writeln!(out, "CIRCLES\n{}", p.circle_groups.len())?;
        for group in &p.circle_groups {
            write!(
                out,
                "{} {} {}",
                token("line color", &group.line_color)?,
                token("fill color", &group.fill_color)?,
                group.circles.len()
            )?;
            for c in &group.circles {
                write!(out, " {} {} {}", num(c.x)?, num(c.y)?, num(c.r)?)?;
            }
            out.push('\n');
        }
    }

    if !p.line_groups.is_empty() {
        writeln!(out, "LINES\n{}", p.line_groups.len())?;
        for group in &p.line_groups {
            write!(out, "{}", token("line color", &group.color)?)?;
            if let Some(width) = group.width {
                if !(width.is_finite() && width > 0.0) {
                    return Err(VdslError::validation(format!(
                        "LINES width {width} must be a positive number"
                    )));
                }
                write!(out, " {width}")?;
            }
            write!(out, " {}", group.lines.len())?;
            for s in &group.lines {
                write!(
                    out,
                    " {} {} {} {}",
                    num(s.ax)?,
                    num(s.ay)?,
                    num(s.bx)?,
                    num(s.by)?
                )?;
            }
            out.push('\n');
        }
    }

    if !p.polygon_groups.is_empty() {
        writeln!(out, "POLYGONS\n{}", p.polygon_groups.len())?;
        for group in &p.polygon_groups {
            let points = &group.polygon.points;
            write!(
                out,
                "{} {} {}",
                token("line color", &group.line_color)?,
                token("fill color", &group.fill_color)?,
                points.len()
            )?;
            for v in points {
                write!(out, " {} {}", num(v.x)?, num(v.y)?)?;
            }
            out.push('\n');
        }
    }
    Ok(())
}

fn write_bar_graph(out: &mut String, prefix: &str, b: &BarGraphCommand) -> VdslResult<()> {
    writeln!(
        out,
        "{prefix} BAR_GRAPH {} {} {}",
        token("fill color", &b.fill_color)?,
        num(b.y_min)?,
        num(b.y_max)?
    )?;
    write!(out, "{}", b.items.len())?;
    for item in &b.items {
        write!(out, " {} {}", token("bar label", &item.label)?, num(item.value)?)?;
    }
    out.push('\n');
    Ok(())
}

/// A value read back as exactly one whitespace-separated token.
fn token<'a>(what: &str, value: &'a str) -> VdslResult<&'a str> {
    if value.is_empty() || value.contains(char::is_whitespace) {
        return Err(VdslError::validation(format!(
            "{what} '{value}' must be a single token"
        )));
    }
    Ok(value)
}

/// The rest of a command line; the parser trims it.
fn line_text<'a>(keyword: &str, value: &'a str) -> VdslResult<&'a str> {
    if value.trim() != value || value.contains(['\n', '\r']) {
        return Err(VdslError::validation(format!(
            "{keyword} text '{value}' cannot be written on one trimmed line"
        )));
    }
    Ok(value)
}

/// Bare when unambiguous, otherwise quoted; text containing quotes and whitespace has no form.
fn cell_text(value: &str) -> VdslResult<Cow<'_, str>> {
    if !value.is_empty() && !value.contains(char::is_whitespace) && !value.starts_with('"') {
        return Ok(Cow::Borrowed(value));
    }
    if !value.contains(['"', '\n', '\r']) {
        return Ok(Cow::Owned(format!("\"{value}\"")));
    }
    Err(VdslError::validation(format!(
        "cell text '{value}' cannot be written in CELL_TEXT"
    )))
}

fn num(v: f64) -> VdslResult<f64> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(VdslError::validation(format!("{v} is not a finite number")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/emit/mod.rs"]
mod tests;
