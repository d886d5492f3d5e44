//! Sub-block reader shared by `GRID` and `2D_PLANE`.
//!
//! After a header line, labelled sub-blocks may follow in any order. Reading them is a small
//! state machine: while [`Phase::AwaitingHeader`] blank lines are skipped and the next line is
//! peeked; a known label switches to [`Phase::Consuming`], which takes either a fixed number of
//! rows or a count line followed by that many rows, hands them to the caller and returns to
//! awaiting. Any other line ends the block without being consumed.

use std::fmt;

use crate::parse::{
    accumulator::ModeState,
    line::{LineCursor, Row, parse_count},
};

/// How many data lines follow a sub-block label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BlockShape {
    /// A fixed number of rows, known from the header.
    Rows(usize),
    /// One count line `N`, then `N` rows.
    Counted,
}

/// A family of sub-block labels.
pub(crate) trait SubBlock: Copy + fmt::Display {
    fn from_label(label: &str) -> Option<Self>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase<K> {
    AwaitingHeader,
    Consuming { kind: K, label_line: usize },
}

/// Consume every sub-block following a header, feeding data rows to `apply`.
///
/// All consumed lines are recorded into the mode's raw text. Blank lines are consumed up to the
/// next non-blank line, whether or not it starts another sub-block; blanks at the end of input
/// are left alone.
pub(crate) fn read_sub_blocks<'a, K: SubBlock>(
    cursor: &mut LineCursor<'a>,
    state: &mut ModeState,
    shape: impl Fn(K) -> BlockShape,
    mut apply: impl FnMut(K, Vec<Row<'a>>, &mut ModeState),
) {
    let mut phase = Phase::AwaitingHeader;
    loop {
        phase = match phase {
            Phase::AwaitingHeader => {
                let Some(next) = cursor.next_non_blank() else {
                    return;
                };
                while cursor.index() < next {
                    if let Some(blank) = cursor.take_row() {
                        state.record_line(blank.raw);
                    }
                }
                let label = cursor
                    .current()
                    .and_then(|l| l.split_whitespace().next())
                    .unwrap_or("");
                let Some(kind) = K::from_label(label) else {
                    return;
                };
                let Some(label_row) = cursor.take_row() else {
                    return;
                };
                state.record_line(label_row.raw);
                Phase::Consuming {
                    kind,
                    label_line: label_row.line_no,
                }
            }
            Phase::Consuming { kind, label_line } => {
                let rows = match shape(kind) {
                    BlockShape::Rows(n) => take_rows(cursor, state, kind, label_line, n, "rows"),
                    BlockShape::Counted => take_counted(cursor, state, kind, label_line),
                };
                apply(kind, rows, state);
                Phase::AwaitingHeader
            }
        };
    }
}

fn take_rows<'a, K: SubBlock>(
    cursor: &mut LineCursor<'a>,
    state: &mut ModeState,
    kind: K,
    label_line: usize,
    n: usize,
    what: &str,
) -> Vec<Row<'a>> {
    let mut rows = Vec::with_capacity(n.min(1024));
    for taken in 0..n {
        let Some(row) = cursor.take_row() else {
            state.error(
                label_line,
                format!("{kind} expected {n} {what}, input ended after {taken}"),
            );
            break;
        };
        state.record_line(row.raw);
        rows.push(row);
    }
    rows
}

fn take_counted<'a, K: SubBlock>(
    cursor: &mut LineCursor<'a>,
    state: &mut ModeState,
    kind: K,
    label_line: usize,
) -> Vec<Row<'a>> {
    let Some(count_row) = cursor.take_row() else {
        state.error(label_line, format!("{kind} is missing its count line"));
        return Vec::new();
    };
    state.record_line(count_row.raw);
    let Some(n) = count_row.tokens().first().copied().and_then(parse_count) else {
        state.error(
            count_row.line_no,
            format!("invalid {kind} count '{}'", count_row.text()),
        );
        return Vec::new();
    };
    take_rows(cursor, state, kind, label_line, n, "entries")
}

/// A counted-block entry: `lead` fixed fields, a count, then the values.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct GroupLine<'a> {
    pub(crate) head: Vec<&'a str>,
    pub(crate) count: usize,
    pub(crate) values: Vec<&'a str>,
}

impl GroupLine<'_> {
    /// Parse up to `count` tuples of `stride` values; tuples with an unparsable value or
    /// rejected by `build` are skipped, an incomplete trailing tuple is ignored.
    pub(crate) fn tuples<T>(
        &self,
        stride: usize,
        mut build: impl FnMut(&[f64]) -> Option<T>,
    ) -> Vec<T> {
        let mut buf = Vec::with_capacity(stride);
        self.values
            .chunks_exact(stride)
            .take(self.count)
            .filter_map(|chunk| {
                buf.clear();
                for tok in chunk {
                    buf.push(crate::parse::line::parse_f64(tok)?);
                }
                build(&buf)
            })
            .collect()
    }
}

/// Split an entry row into `lead` fields, a count and values; reports malformed rows.
pub(crate) fn group_line<'a, K: SubBlock>(
    row: &Row<'a>,
    kind: K,
    lead: usize,
    state: &mut ModeState,
) -> Option<GroupLine<'a>> {
    let tokens = row.tokens();
    if tokens.len() <= lead {
        state.error(
            row.line_no,
            format!("malformed {kind} entry '{}'", row.text()),
        );
        return None;
    }
    let Some(count) = parse_count(tokens[lead]) else {
        state.error(
            row.line_no,
            format!("invalid {kind} entry count '{}'", tokens[lead]),
        );
        return None;
    };
    Some(GroupLine {
        head: tokens[..lead].to_vec(),
        count,
        values: tokens[lead + 1..].to_vec(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/parse/block.rs"]
mod tests;
