/// `$v` commands.
pub mod command;
/// Frames and the per-mode result of a parse.
pub mod frame;
