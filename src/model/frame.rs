use std::collections::BTreeMap;

use crate::{
    foundation::core::CanvasSize,
    foundation::error::{VdslError, VdslResult},
    model::command::{Command, CommandKind},
};

/// Mode used by `$v` lines without an explicit `(name)`.
pub const DEFAULT_MODE: &str = "default";

/// One committed snapshot of draw commands plus diagnostics; one playback step.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    /// Commands in input order.
    pub commands: Vec<Command>,
    /// Source lines that contributed to this frame, each terminated by `\n`.
    pub raw_text: String,
    /// `true` iff a `DEBUG` command is present.
    pub show_debug: bool,
    /// Soft diagnostics (`"Line {n}: ..."`) collected while building the frame.
    pub errors: Vec<String>,
}

impl Frame {
    /// First `CANVAS` size declared in the frame.
    pub fn canvas(&self) -> Option<CanvasSize> {
        self.commands.iter().find_map(|c| match c {
            Command::Canvas(canvas) => Some(canvas.size()),
            _ => None,
        })
    }

    /// Declared canvas, or the 800x800 fallback.
    pub fn canvas_or_default(&self) -> CanvasSize {
        self.canvas().unwrap_or_default()
    }

    /// Last `SCORE` written in the frame.
    pub fn score(&self) -> Option<&str> {
        self.commands.iter().rev().find_map(|c| match c {
            Command::Score { score } => Some(score.as_str()),
            _ => None,
        })
    }

    /// Texts of all `TEXTAREA` commands in order.
    pub fn text_areas(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            Command::TextArea { text } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Number of commands of a given kind.
    pub fn count_of(&self, kind: CommandKind) -> usize {
        self.commands.iter().filter(|c| c.kind() == kind).count()
    }
}

/// Result of [`crate::parse`]: every mode seen in the input with its frames.
///
/// Modes are kept sorted by name. `"default"` is always present, possibly with no frames.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ParsedModes {
    modes: BTreeMap<String, Vec<Frame>>,
}

impl Default for ParsedModes {
    fn default() -> Self {
        let mut modes = BTreeMap::new();
        modes.insert(DEFAULT_MODE.to_owned(), Vec::new());
        Self { modes }
    }
}

impl ParsedModes {
    pub(crate) fn ensure_mode(&mut self, mode: &str) {
        if !self.modes.contains_key(mode) {
            self.modes.insert(mode.to_owned(), Vec::new());
        }
    }

    pub(crate) fn push_frame(&mut self, mode: &str, frame: Frame) {
        self.modes.entry(mode.to_owned()).or_default().push(frame);
    }

    /// Frames of a mode; empty for unknown modes.
    pub fn frames(&self, mode: &str) -> &[Frame] {
        self.modes.get(mode).map(Vec::as_slice).unwrap_or(&[])
    }

    /// One frame, or a validation error naming what was missing.
    pub fn frame(&self, mode: &str, index: usize) -> VdslResult<&Frame> {
        let frames = self
            .modes
            .get(mode)
            .ok_or_else(|| VdslError::validation(format!("unknown mode '{mode}'")))?;
        frames.get(index).ok_or_else(|| {
            VdslError::validation(format!(
                "frame {index} is out of range for mode '{mode}' ({} frames)",
                frames.len()
            ))
        })
    }

    /// Whether a mode key exists (even with zero frames).
    pub fn contains_mode(&self, mode: &str) -> bool {
        self.modes.contains_key(mode)
    }

    /// All mode names, sorted.
    pub fn mode_names(&self) -> impl Iterator<Item = &str> {
        self.modes.keys().map(String::as_str)
    }

    /// Sorted modes that have at least one frame; `["default"]` when none do.
    pub fn playable_modes(&self) -> Vec<&str> {
        let modes: Vec<&str> = self
            .modes
            .iter()
            .filter(|(_, frames)| !frames.is_empty())
            .map(|(name, _)| name.as_str())
            .collect();
        if modes.is_empty() {
            vec![DEFAULT_MODE]
        } else {
            modes
        }
    }

    /// `(mode, frames)` pairs, sorted by mode.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Frame])> {
        self.modes.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Total frame count across all modes.
    pub fn total_frames(&self) -> usize {
        self.modes.values().map(Vec::len).sum()
    }

    /// JSON object `{mode: Frame[]}` in the DSL's own field names.
    pub fn to_json(&self, pretty: bool) -> VdslResult<String> {
        let s = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/frame.rs"]
mod tests;
