/// Pure coordinate math shared by layout and validation.
pub mod geometry;
/// Per-frame pixel primitives.
pub mod scene;
