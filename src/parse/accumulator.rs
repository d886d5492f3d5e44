use std::{collections::BTreeMap, fmt};

use crate::{
    foundation::core::ItemBounds,
    layout::geometry::{rects_overlap, resolve_bounds},
    model::command::{Command, CommandKind},
    model::frame::{Frame, ParsedModes},
};

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PendingCommand {
    pub(crate) line_no: usize,
    pub(crate) command: Command,
}

/// Uncommitted state of one mode.
#[derive(Clone, Debug, Default)]
pub(crate) struct ModeState {
    pub(crate) commands: Vec<PendingCommand>,
    pub(crate) raw_text: String,
    pub(crate) errors: Vec<String>,
}

impl ModeState {
    pub(crate) fn record_line(&mut self, raw: &str) {
        self.raw_text.push_str(raw);
        self.raw_text.push('\n');
    }

    pub(crate) fn error(&mut self, line_no: usize, msg: impl fmt::Display) {
        self.errors.push(format!("Line {line_no}: {msg}"));
    }

    pub(crate) fn push(&mut self, line_no: usize, command: Command) {
        self.commands.push(PendingCommand { line_no, command });
    }

    pub(crate) fn has_commands(&self) -> bool {
        !self.commands.is_empty()
    }

    /// Validate the pending commands and turn everything pending into a frame.
    pub(crate) fn finalize(&mut self) -> Frame {
        self.enforce_exclusivity();
        self.check_overlaps();

        let commands: Vec<Command> = std::mem::take(&mut self.commands)
            .into_iter()
            .map(|p| p.command)
            .collect();
        let show_debug = commands.iter().any(|c| c.kind() == CommandKind::Debug);
        Frame {
            commands,
            raw_text: std::mem::take(&mut self.raw_text),
            show_debug,
            errors: std::mem::take(&mut self.errors),
        }
    }

    /// GRID and 2D_PLANE never share a frame: the kind seen first wins.
    fn enforce_exclusivity(&mut self) {
        let first_of = |kind: CommandKind| {
            self.commands
                .iter()
                .position(|p| p.command.kind() == kind)
        };
        let (Some(grid), Some(plane)) = (first_of(CommandKind::Grid), first_of(CommandKind::Plane))
        else {
            return;
        };
        let (keep, drop) = if grid < plane {
            (CommandKind::Grid, CommandKind::Plane)
        } else {
            (CommandKind::Plane, CommandKind::Grid)
        };

        let dropped: Vec<usize> = self
            .commands
            .iter()
            .filter(|p| p.command.kind() == drop)
            .map(|p| p.line_no)
            .collect();
        self.commands.retain(|p| p.command.kind() != drop);
        self.error(
            dropped[0],
            format!(
                "GRID and 2D_PLANE cannot share a frame; keeping {keep}, dropped {} {drop} command(s)",
                dropped.len()
            ),
        );
    }

    /// Advisory only: overlapping items are reported and kept.
    fn check_overlaps(&mut self) {
        let canvas = self.commands.iter().find_map(|p| match &p.command {
            Command::Canvas(c) => Some(c.size()),
            _ => None,
        });
        let placed: Vec<(usize, CommandKind, ItemBounds)> = self
            .commands
            .iter()
            .filter(|p| p.command.kind().is_spatial())
            .map(|p| {
                (
                    p.line_no,
                    p.command.kind(),
                    resolve_bounds(p.command.bounds(), canvas),
                )
            })
            .collect();

        for (i, &(line_a, kind_a, a)) in placed.iter().enumerate() {
            for &(line_b, kind_b, b) in &placed[i + 1..] {
                if rects_overlap(a, b) {
                    self.error(
                        line_b,
                        format!("{kind_b} bounds {b} overlap {kind_a} bounds {a} from line {line_a}"),
                    );
                }
            }
        }
    }
}

/// Per-mode pending state for one `parse` call, plus the frames committed so far.
#[derive(Debug, Default)]
pub(crate) struct Accumulator {
    pending: BTreeMap<String, ModeState>,
    out: ParsedModes,
}

impl Accumulator {
    /// Pending state of a mode, registering the mode in the output on first sight.
    pub(crate) fn state(&mut self, mode: &str) -> &mut ModeState {
        self.out.ensure_mode(mode);
        self.pending.entry(mode.to_owned()).or_default()
    }

    /// Finalize a mode's frame; a no-op while nothing is pending.
    pub(crate) fn commit(&mut self, mode: &str) {
        let Some(state) = self.pending.get_mut(mode) else {
            return;
        };
        if !state.has_commands() {
            return;
        }
        let frame = state.finalize();
        tracing::debug!(
            mode,
            frame = self.out.frames(mode).len(),
            commands = frame.commands.len(),
            errors = frame.errors.len(),
            "committed frame"
        );
        self.out.push_frame(mode, frame);
    }

    /// Flush every mode with pending commands, as if each ended with `COMMIT`.
    pub(crate) fn finish(mut self) -> ParsedModes {
        let modes: Vec<String> = self.pending.keys().cloned().collect();
        for mode in &modes {
            self.commit(mode);
        }
        for (mode, state) in &self.pending {
            if !state.errors.is_empty() {
                tracing::warn!(
                    mode = mode.as_str(),
                    errors = state.errors.len(),
                    "diagnostics discarded: no command left to commit"
                );
            }
        }
        self.out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/parse/accumulator.rs"]
mod tests;
