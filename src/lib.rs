//! vdsl decodes `$v` visualization logs into replayable frames and lays them out in pixels.
//!
//! A solver prints `$v ...` lines next to its normal output; this crate turns such a log into
//! named modes, each an ordered list of [`Frame`]s of typed [`Command`]s:
//!
//! - [`parse`] the log into [`ParsedModes`] (never fails; problems become per-frame errors)
//! - compute a [`FrameLayout`] for a frame with the pure geometry in [`layout`]
//! - draw it with [`frame_to_svg`] or [`rasterize_frame`]
//! - write frames back out as `$v` text with [`emit_modes`] or [`emit_frame`]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod emit;
mod foundation;

/// Pixel-space geometry for grids and planes.
pub mod layout;
/// Typed commands and committed frames.
pub mod model;
mod parse;
/// SVG and raster output.
pub mod render;

pub use crate::emit::{emit_frame, emit_modes};
pub use crate::foundation::core::{CanvasSize, Circle, ItemBounds, Line, Point, Rect, Vec2};
pub use crate::foundation::error::{VdslError, VdslResult};

pub use crate::layout::geometry::{
    display_text, grid_cell_rect, grid_point, plane_radius, plane_scale, rects_overlap,
    resolve_bounds, unified_font_size,
};
pub use crate::layout::scene::{FrameLayout, GridLayout, ItemLayout, PlaneLayout};
pub use crate::model::command::{
    BarGraphCommand, BarGraphItem, CanvasCommand, CircleGroup, Command, CommandKind, GridCommand,
    GridLine, LineGroup, PlaneCircle, PlaneCommand, Polygon, PolygonGroup, Segment,
};
pub use crate::model::frame::{DEFAULT_MODE, Frame, ParsedModes};
pub use crate::parse::parse;
pub use crate::render::raster::{RgbaImage, rasterize_frame, rasterize_svg, system_fontdb};
pub use crate::render::svg::{RenderOpts, frame_to_svg};
