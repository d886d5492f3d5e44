use crate::model::frame::DEFAULT_MODE;

/// A `$v` line split into its mode and command body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Routed<'a> {
    pub(crate) mode: &'a str,
    pub(crate) body: &'a str,
}

/// Recognize the `$v` / `$v(mode)` prefix of an already trimmed line.
///
/// Returns `None` for inert lines, including `$v(` lines without a non-empty `(name)`.
pub(crate) fn route(line: &str) -> Option<Routed<'_>> {
    if line.starts_with("$v(") {
        let close = line.find(')')?;
        if close <= 3 {
            return None;
        }
        return Some(Routed {
            mode: &line[3..close],
            body: line[close + 1..].trim(),
        });
    }
    let body = line.strip_prefix("$v")?;
    Some(Routed {
        mode: DEFAULT_MODE,
        body: body.trim(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/parse/router.rs"]
mod tests;
