use crate::{
    model::command::{BarGraphCommand, BarGraphItem, Command},
    parse::{
        accumulator::ModeState,
        line::{LineCursor, parse_count, parse_f64},
    },
};

/// `fillColor yMin yMax`
pub(crate) fn parse_bar_graph_header(rest: &str) -> Result<BarGraphCommand, String> {
    let params: Vec<&str> = rest.split_whitespace().collect();
    let [fill_color, y_min, y_max] = params[..] else {
        return Err(format!(
            "BAR_GRAPH expects 3 parameters (fillColor yMin yMax), got {}",
            params.len()
        ));
    };
    match (parse_f64(y_min), parse_f64(y_max)) {
        (Some(lo), Some(hi)) if lo < hi => Ok(BarGraphCommand {
            fill_color: fill_color.to_owned(),
            y_min: lo,
            y_max: hi,
            items: Vec::new(),
        }),
        (Some(_), Some(_)) => Err(format!(
            "BAR_GRAPH yMin must be less than yMax, got {y_min} and {y_max}"
        )),
        _ => Err(format!(
            "BAR_GRAPH yMin and yMax must be numbers, got '{y_min}' and '{y_max}'"
        )),
    }
}

/// Parse a `BAR_GRAPH` header at the cursor and the single data line after it.
pub(crate) fn parse_bar_graph(cursor: &mut LineCursor<'_>, state: &mut ModeState, rest: &str) {
    let line_no = cursor.line_no();
    cursor.advance();
    let mut graph = match parse_bar_graph_header(rest) {
        Ok(graph) => graph,
        Err(msg) => {
            state.error(line_no, msg);
            return;
        }
    };

    let Some(data) = cursor.take_row() else {
        state.error(line_no, "BAR_GRAPH is missing its data line");
        state.push(line_no, Command::BarGraph(graph));
        return;
    };
    state.record_line(data.raw);

    let tokens = data.tokens();
    let Some(n) = tokens.first().copied().and_then(parse_count) else {
        state.error(
            data.line_no,
            format!("invalid BAR_GRAPH item count '{}'", tokens.first().unwrap_or(&"")),
        );
        state.push(line_no, Command::BarGraph(graph));
        return;
    };

    let mut pairs = tokens[1..].chunks(2);
    for k in 0..n {
        let Some(&[label, value]) = pairs.next() else {
            state.error(
                data.line_no,
                format!("BAR_GRAPH declared {n} items but data ends after {k}"),
            );
            break;
        };
        match parse_f64(value) {
            Some(value) => graph.items.push(BarGraphItem {
                label: label.to_owned(),
                value,
            }),
            None => state.error(
                data.line_no,
                format!("BAR_GRAPH item '{label}' has non-numeric value '{value}'"),
            ),
        }
    }
    state.push(line_no, Command::BarGraph(graph));
}

#[cfg(test)]
#[path = "../../tests/unit/parse/bar_graph.rs"]
mod tests;
