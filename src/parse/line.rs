use crate::foundation::core::ItemBounds;

/// One physical input line with its 1-based number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Row<'a> {
    pub(crate) line_no: usize,
    pub(crate) raw: &'a str,
}

impl<'a> Row<'a> {
    pub(crate) fn text(&self) -> &'a str {
        self.raw.trim()
    }

    pub(crate) fn tokens(&self) -> Vec<&'a str> {
        self.raw.split_whitespace().collect()
    }
}

/// Forward-only cursor over the input lines.
#[derive(Debug)]
pub(crate) struct LineCursor<'a> {
    lines: Vec<&'a str>,
    idx: usize,
}

impl<'a> LineCursor<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self {
            lines: text.split('\n').collect(),
            idx: 0,
        }
    }

    pub(crate) fn index(&self) -> usize {
        self.idx
    }

    pub(crate) fn line_no(&self) -> usize {
        self.idx + 1
    }

    pub(crate) fn current(&self) -> Option<&'a str> {
        self.lines.get(self.idx).copied()
    }

    pub(crate) fn advance(&mut self) {
        self.idx = (self.idx + 1).min(self.lines.len());
    }

    /// Return the current line and move past it.
    pub(crate) fn take_row(&mut self) -> Option<Row<'a>> {
        let raw = self.current()?;
        let row = Row {
            line_no: self.line_no(),
            raw,
        };
        self.advance();
        Some(row)
    }

    /// Index of the first non-blank line at or after the cursor.
    pub(crate) fn next_non_blank(&self) -> Option<usize> {
        (self.idx..self.lines.len()).find(|&i| !self.lines[i].trim().is_empty())
    }
}

/// Split a command body into its keyword and the remainder.
///
/// The keyword ends at the first whitespace or `(`, so `GRID(0, 0, 9, 9) 3 3 ...` yields
/// `("GRID", "(0, 0, 9, 9) 3 3 ...")`.
pub(crate) fn split_keyword(body: &str) -> (&str, &str) {
    let end = body
        .find(|c: char| c.is_whitespace() || c == '(')
        .unwrap_or(body.len());
    (&body[..end], &body[end..])
}

/// Strip an optional `(left, top, right, bottom)` tuple from the front of a header.
pub(crate) fn extract_bounds(rest: &str) -> Result<(Option<ItemBounds>, &str), String> {
    let rest = rest.trim_start();
    let Some(tuple) = rest.strip_prefix('(') else {
        return Ok((None, rest));
    };
    let Some(close) = tuple.find(')') else {
        return Err(format!("unclosed bounds tuple '{rest}'"));
    };
    let inner = &tuple[..close];
    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    if parts.len() != 4 {
        return Err(format!(
            "bounds tuple '({inner})' needs 4 values (left, top, right, bottom), got {}",
            parts.len()
        ));
    }
    let mut edges = [0.0f64; 4];
    for (slot, part) in edges.iter_mut().zip(&parts) {
        *slot = parse_f64(part).ok_or_else(|| format!("bounds value '{part}' is not a number"))?;
    }
    let bounds = ItemBounds::new(edges[0], edges[1], edges[2], edges[3])
        .map_err(|_| format!("bounds '({inner})' must satisfy left < right and top < bottom"))?;
    Ok((Some(bounds), &tuple[close + 1..]))
}

/// Finite float, or `None`.
pub(crate) fn parse_f64(tok: &str) -> Option<f64> {
    tok.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub(crate) fn parse_count(tok: &str) -> Option<usize> {
    tok.parse::<usize>().ok()
}

pub(crate) fn parse_index(tok: &str) -> Option<i64> {
    tok.parse::<i64>().ok()
}

/// Scan a `CELL_TEXT` row: `"quoted text"` yields its inner text (possibly empty), anything
/// else is a whitespace-delimited run.
pub(crate) fn scan_cell_tokens(line: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut rest = line.trim_start();
    while !rest.is_empty() {
        if let Some(quoted) = rest.strip_prefix('"')
            && let Some(close) = quoted.find('"')
        {
            out.push(quoted[..close].to_owned());
            rest = quoted[close + 1..].trim_start();
            continue;
        }
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        out.push(rest[..end].to_owned());
        rest = rest[end..].trim_start();
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/parse/line.rs"]
mod tests;
