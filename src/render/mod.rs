/// `usvg`/`resvg` rasterization.
pub mod raster;
/// SVG document output.
pub mod svg;
