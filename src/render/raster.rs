use std::sync::Arc;

use crate::{
    foundation::error::{VdslError, VdslResult},
    model::frame::Frame,
    render::svg::{RenderOpts, frame_to_svg},
};

/// Largest raster side accepted, in pixels.
pub const MAX_RASTER_DIM: u32 = 16_384;

/// Unpremultiplied RGBA8 image, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbaImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height * 4` bytes.
    pub data: Vec<u8>,
}

/// Font database with the system fonts loaded; building one is slow, so callers rasterizing
/// many frames should build it once.
pub fn system_fontdb() -> Arc<usvg::fontdb::Database> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    Arc::new(db)
}

/// Rasterize one frame at `scale` times its canvas size.
#[tracing::instrument(skip(frame, opts, fontdb))]
pub fn rasterize_frame(
    frame: &Frame,
    opts: &RenderOpts,
    fontdb: Arc<usvg::fontdb::Database>,
    scale: f32,
) -> VdslResult<RgbaImage> {
    let svg = frame_to_svg(frame, opts)?;
    rasterize_svg(&svg, fontdb, scale)
}

/// Rasterize an SVG document at `scale` times its declared size.
pub fn rasterize_svg(
    svg: &str,
    fontdb: Arc<usvg::fontdb::Database>,
    scale: f32,
) -> VdslResult<RgbaImage> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(VdslError::validation(format!(
            "raster scale must be positive, got {scale}"
        )));
    }
    let opts = usvg::Options {
        fontdb,
        ..Default::default()
    };
    let tree = usvg::Tree::from_str(svg, &opts)
        .map_err(|e| VdslError::render(format!("parse svg tree: {e}")))?;

    let size = tree.size();
    let width = to_px(size.width() * scale)?;
    let height = to_px(size.height() * scale)?;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| VdslError::render("failed to allocate pixmap"))?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );

    let data = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    Ok(RgbaImage {
        width,
        height,
        data,
    })
}

fn to_px(v: f32) -> VdslResult<u32> {
    if !v.is_finite() || v < 1.0 {
        return Err(VdslError::render(format!("invalid raster dimension {v}")));
    }
    let px = v.ceil() as u32;
    if px > MAX_RASTER_DIM {
        return Err(VdslError::render(format!(
            "raster dimension {px} exceeds {MAX_RASTER_DIM}"
        )));
    }
    Ok(px)
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
