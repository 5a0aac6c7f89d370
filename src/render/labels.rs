use std::fmt::Write as _;

use crate::assets::svg_raster::{has_fonts, parse_svg, rasterize_svg};
use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{LayoutError, LayoutResult};
use crate::overlay::plan::GuideOp;
use crate::render::frame::RasterImage;

const LABEL_FONT_FAMILY: &str = "sans-serif";

/// SVG document holding every label op of a plan, or `None` when there are none.
pub fn labels_svg<'a>(canvas: Canvas, ops: impl IntoIterator<Item = &'a GuideOp>) -> Option<String> {
    let mut body = String::new();
    for op in ops {
        let GuideOp::Label {
            text,
            anchor,
            font_size,
            color,
            opacity,
        } = op
        else {
            continue;
        };
        let fill = Rgba8 { a: 255, ..*color };
        let fill_opacity = (f64::from(color.a) / 255.0) * opacity.clamp(0.0, 1.0);
        // Writing into a String cannot fail.
        let _ = write!(
            body,
            r#"<text x="{:.3}" y="{:.3}" font-family="{LABEL_FONT_FAMILY}" font-size="{:.3}" text-anchor="middle" fill="{}" fill-opacity="{:.4}">{}</text>"#,
            anchor.x,
            anchor.y,
            font_size,
            fill.to_hex(),
            fill_opacity,
            escape_xml(text),
        );
    }

    if body.is_empty() {
        return None;
    }
    Some(format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">{body}</svg>"#,
        w = canvas.width,
        h = canvas.height,
    ))
}

/// Rasterize the label layer at canvas size.
///
/// Fails when no font face is installed, since the layer would render empty.
pub fn rasterize_labels(canvas: Canvas, svg: &str) -> LayoutResult<RasterImage> {
    if !has_fonts() {
        return Err(LayoutError::render("no font faces available for label text"));
    }
    let tree = parse_svg(svg)?;
    rasterize_svg(&tree, canvas.width, canvas.height)
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/labels.rs"]
mod tests;
