//! `$v` log parser.
//!
//! [`parse`] walks the input once. Lines that do not start with `$v` are ignored; every other
//! line is routed to its mode, recorded verbatim into that mode's pending raw text and
//! dispatched on its keyword. Block commands (`GRID`, `2D_PLANE`, `BAR_GRAPH`) consume their
//! own data lines. `COMMIT` turns a mode's pending commands into a [`Frame`]; whatever is still
//! pending at the end of input is committed the same way.
//!
//! Problems in the input never abort parsing. They are attached as `"Line {n}: ..."` strings to
//! the frame they belong to.
//!
//! [`Frame`]: crate::model::frame::Frame

pub(crate) mod accumulator;
pub(crate) mod bar_graph;
pub(crate) mod block;
pub(crate) mod grid;
pub(crate) mod line;
pub(crate) mod plane;
pub(crate) mod router;

use crate::{
    model::{
        command::{CanvasCommand, Command},
        frame::ParsedModes,
    },
    parse::{
        accumulator::{Accumulator, ModeState},
        line::{LineCursor, parse_f64, split_keyword},
        router::route,
    },
};

/// Parse a whole log into per-mode frame sequences.
///
/// Never fails; the result always contains the `"default"` mode.
#[tracing::instrument(skip(text), fields(bytes = text.len()))]
pub fn parse(text: &str) -> ParsedModes {
    let mut cursor = LineCursor::new(text);
    let mut acc = Accumulator::default();

    while let Some(raw) = cursor.current() {
        let Some(routed) = route(raw.trim()) else {
            cursor.advance();
            continue;
        };
        let line_no = cursor.line_no();
        let state = acc.state(routed.mode);
        state.record_line(raw);

        let (keyword, rest) = split_keyword(routed.body);
        match keyword {
            "COMMIT" => {
                cursor.advance();
                acc.commit(routed.mode);
            }
            "DEBUG" => {
                cursor.advance();
                state.push(line_no, Command::Debug);
            }
            "TEXTAREA" => {
                cursor.advance();
                state.push(
                    line_no,
                    Command::TextArea {
                        text: rest.trim().to_owned(),
                    },
                );
            }
            "SCORE" => {
                cursor.advance();
                state.push(
                    line_no,
                    Command::Score {
                        score: rest.trim().to_owned(),
                    },
                );
            }
            "CANVAS" => {
                cursor.advance();
                parse_canvas(state, line_no, rest);
            }
            "GRID" => grid::parse_grid(&mut cursor, state, rest),
            "2D_PLANE" => plane::parse_plane(&mut cursor, state, rest),
            "BAR_GRAPH" => bar_graph::parse_bar_graph(&mut cursor, state, rest),
            "" => cursor.advance(),
            _ => {
                cursor.advance();
                let token = routed.body.split_whitespace().next().unwrap_or(keyword);
                state.error(line_no, format!("Unknown command '{token}'"));
            }
        }
    }

    acc.finish()
}

fn parse_canvas(state: &mut ModeState, line_no: usize, rest: &str) {
    let params: Vec<&str> = rest.split_whitespace().collect();
    let [h, w] = params[..] else {
        state.error(
            line_no,
            format!("CANVAS expects 2 parameters (H W), got {}", params.len()),
        );
        return;
    };
    match (parse_f64(h), parse_f64(w)) {
        (Some(h), Some(w)) if h > 0.0 && w > 0.0 => {
            state.push(line_no, Command::Canvas(CanvasCommand { h, w }));
        }
        _ => state.error(
            line_no,
            format!("CANVAS H and W must be positive numbers, got '{h}' and '{w}'"),
        ),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/parse/mod.rs"]
mod tests;
