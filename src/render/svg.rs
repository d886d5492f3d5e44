use std::fmt::Write as _;

use crate::{
    foundation::error::VdslResult,
    layout::scene::{FrameLayout, GridLayout, ItemLayout, PlaneLayout},
    model::frame::Frame,
};

/// Drawing options shared by the SVG and raster outputs.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderOpts {
    /// Canvas fill behind every item.
    pub background: String,
    /// Grid wall stroke width in pixels.
    pub wall_width: f64,
    /// Grid polyline stroke width in pixels.
    pub polyline_width: f64,
    /// Stroke width for plane shapes without an explicit width.
    pub plane_stroke_width: f64,
    /// Font family for cell text.
    pub font_family: String,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            background: "#FFFFFF".to_owned(),
            wall_width: 2.0,
            polyline_width: 3.0,
            plane_stroke_width: 1.0,
            font_family: "sans-serif".to_owned(),
        }
    }
}

/// Standalone SVG document for one frame.
#[tracing::instrument(skip(frame, opts))]
pub fn frame_to_svg(frame: &Frame, opts: &RenderOpts) -> VdslResult<String> {
    let layout = FrameLayout::compute(frame)?;
    layout_to_svg(&layout, opts)
}

/// SVG document for an already computed layout.
pub fn layout_to_svg(layout: &FrameLayout, opts: &RenderOpts) -> VdslResult<String> {
    let (w, h) = (layout.canvas.width, layout.canvas.height);
    let mut out = String::new();
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    )?;
    writeln!(
        out,
        r#"<rect x="0" y="0" width="{w}" height="{h}" fill="{}"/>"#,
        escape(&opts.background)
    )?;
    for item in &layout.items {
        match item {
            ItemLayout::Grid(g) => write_grid(&mut out, g, opts)?,
            ItemLayout::Plane(p) => write_plane(&mut out, p, opts)?,
        }
    }
    out.push_str("</svg>\n");
    Ok(out)
}

fn write_grid(out: &mut String, g: &GridLayout, opts: &RenderOpts) -> std::fmt::Result {
    out.push_str("<g>\n");
    for cell in &g.cells {
        let r = cell.rect;
        writeln!(
            out,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}" stroke="none"><title>{}</title></rect>"#,
            r.x0,
            r.y0,
            r.width(),
            r.height(),
            escape(&cell.fill),
            escape(&cell.tooltip)
        )?;
    }
    for cell in g.cells.iter().filter(|c| !c.text.is_empty()) {
        let c = cell.rect.center();
        writeln!(
            out,
            r#"<text x="{}" y="{}" fill="{}" font-size="{}" font-family="{}" text-anchor="middle" dominant-baseline="middle">{}</text>"#,
            c.x,
            c.y,
            escape(&g.text_color),
            g.font_size,
            escape(&opts.font_family),
            escape(&cell.text)
        )?;
    }
    let border = escape(&g.border_color);
    for wall in &g.walls {
        writeln!(
            out,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{border}" stroke-width="{}"/>"#,
            wall.p0.x, wall.p0.y, wall.p1.x, wall.p1.y, opts.wall_width
        )?;
    }
    for line in &g.polylines {
        let color = escape(&line.color);
        let points: Vec<String> = line
            .points
            .iter()
            .map(|p| format!("{},{}", p.x, p.y))
            .collect();
        writeln!(
            out,
            r#"<polyline points="{}" fill="none" stroke="{color}" stroke-width="{}" stroke-linejoin="round" stroke-linecap="round"/>"#,
            points.join(" "),
            opts.polyline_width
        )?;
        for dot in &line.dots {
            writeln!(
                out,
                r#"<circle cx="{}" cy="{}" r="{}" fill="{color}"/>"#,
                dot.center.x, dot.center.y, dot.radius
            )?;
        }
    }
    out.push_str("</g>\n");
    Ok(())
}

fn write_plane(out: &mut String, p: &PlaneLayout, opts: &RenderOpts) -> std::fmt::Result {
    out.push_str("<g>\n");
    for poly in &p.polygons {
        let points: Vec<String> = poly
            .points
            .iter()
            .map(|q| format!("{},{}", q.x, q.y))
            .collect();
        writeln!(
            out,
            r#"<polygon points="{}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
            points.join(" "),
            escape(&poly.fill),
            escape(&poly.stroke),
            opts.plane_stroke_width
        )?;
    }
    for seg in &p.segments {
        writeln!(
            out,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
            seg.line.p0.x,
            seg.line.p0.y,
            seg.line.p1.x,
            seg.line.p1.y,
            escape(&seg.color),
            seg.width.unwrap_or(opts.plane_stroke_width)
        )?;
    }
    for c in &p.circles {
        writeln!(
            out,
            r#"<circle cx="{}" cy="{}" r="{}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
            c.circle.center.x,
            c.circle.center.y,
            c.circle.radius,
            escape(&c.fill),
            escape(&c.stroke),
            opts.plane_stroke_width
        )?;
    }
    out.push_str("</g>\n");
    Ok(())
}

/// XML-escape text and attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
