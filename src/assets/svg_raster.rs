use std::sync::{Arc, OnceLock};

use crate::foundation::error::{LayoutError, LayoutResult};
use crate::render::frame::RasterImage;

/// Largest raster edge produced from SVG input.
pub const MAX_SVG_DIM: u32 = 8_192;

/// System font database shared by every SVG parse. Read-only once built.
fn shared_fontdb() -> Arc<usvg::fontdb::Database> {
    static FONTDB: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();
    FONTDB
        .get_or_init(|| {
            let mut db = usvg::fontdb::Database::new();
            db.load_system_fonts();
            if let Some(family) = pick_sans_serif_family(&db) {
                tracing::debug!(%family, "sans-serif family");
                db.set_sans_serif_family(family);
            }
            tracing::debug!(faces = db.len(), "loaded system fonts");
            Arc::new(db)
        })
        .clone()
}

/// Candidates for generic `sans-serif`, in preference order.
const PREFERRED_SANS: [&str; 5] = [
    "Arial",
    "Helvetica",
    "DejaVu Sans",
    "Liberation Sans",
    "Noto Sans",
];

/// fontdb maps `sans-serif` to Arial, which many hosts lack. Pick a family that is installed,
/// falling back to the first face's family.
fn pick_sans_serif_family(db: &usvg::fontdb::Database) -> Option<String> {
    let installed = |name: &str| {
        db.faces()
            .any(|face| face.families.iter().any(|(f, _)| f == name))
    };
    PREFERRED_SANS
        .into_iter()
        .find(|&name| installed(name))
        .map(str::to_owned)
        .or_else(|| {
            db.faces()
                .find_map(|face| face.families.first().map(|(f, _)| f.clone()))
        })
}

/// Whether any font face is available for SVG text.
pub fn has_fonts() -> bool {
    shared_fontdb().len() > 0
}

pub fn parse_svg(svg: &str) -> LayoutResult<usvg::Tree> {
    let opts = usvg::Options {
        fontdb: shared_fontdb(),
        ..Default::default()
    };
    usvg::Tree::from_str(svg, &opts).map_err(|e| LayoutError::render(format!("parse svg: {e}")))
}

/// Raster size for `tree` with its longest edge scaled to `max_dim`.
pub fn preview_size(tree: &usvg::Tree, max_dim: u32) -> LayoutResult<(u32, u32)> {
    let size = tree.size();
    let (w, h) = (f64::from(size.width()), f64::from(size.height()));
    if !w.is_finite() || !h.is_finite() || w <= 0.0 || h <= 0.0 {
        return Err(LayoutError::render("svg has invalid width/height"));
    }
    if max_dim == 0 || max_dim > MAX_SVG_DIM {
        return Err(LayoutError::render(format!(
            "preview size must be in 1..={MAX_SVG_DIM}, got {max_dim}"
        )));
    }

    let k = f64::from(max_dim) / w.max(h);
    let pw = ((w * k).round() as u32).clamp(1, max_dim);
    let ph = ((h * k).round() as u32).clamp(1, max_dim);
    Ok((pw, ph))
}

/// Rasterize `tree` stretched to `width`×`height`.
pub fn rasterize_svg(tree: &usvg::Tree, width: u32, height: u32) -> LayoutResult<RasterImage> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| LayoutError::render("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    RasterImage::new(width, height, pixmap.take())
}

/// Thumbnail of a pattern's artwork, longest edge `max_dim` pixels.
#[tracing::instrument(skip(svg))]
pub fn render_artwork_preview(svg: &str, max_dim: u32) -> LayoutResult<RasterImage> {
    let tree = parse_svg(svg)?;
    let (w, h) = preview_size(&tree, max_dim)?;
    rasterize_svg(&tree, w, h)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/svg_raster.rs"]
mod tests;
