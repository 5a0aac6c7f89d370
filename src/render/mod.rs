pub mod cpu;
pub mod frame;
pub mod labels;

use crate::assets::decode::{EncodedImage, MediaType, decode_raster, encode_raster};
use crate::foundation::error::LayoutResult;
use crate::overlay::compile::compile_overlay;
use crate::overlay::detect::{ContentAreaDetector, FixedContentAreas};
use crate::overlay::spec::OverlaySpec;
use crate::render::frame::RasterImage;

/// Render `spec`'s guides over `source` using the built-in content areas.
///
/// The result always has the source's dimensions. `source` is never modified.
pub fn render_overlay(source: &RasterImage, spec: &OverlaySpec) -> LayoutResult<RasterImage> {
    render_overlay_with(source, spec, &FixedContentAreas::default())
}

/// Like [`render_overlay`], with a caller-supplied content area detector for smart margins.
#[tracing::instrument(
    skip(source, spec, detector),
    fields(width = source.width, height = source.height, algorithm = ?spec.algorithm)
)]
pub fn render_overlay_with(
    source: &RasterImage,
    spec: &OverlaySpec,
    detector: &dyn ContentAreaDetector,
) -> LayoutResult<RasterImage> {
    let plan = compile_overlay(source.canvas(), spec, detector);
    tracing::debug!(ops = plan.ops.len(), backdrop_opacity = plan.backdrop.opacity, "compiled overlay");
    cpu::execute_plan(&plan, source)
}

/// Decode `bytes` declared as `mime`, render the overlay and re-encode in the same format.
pub fn render_overlay_bytes(
    bytes: &[u8],
    mime: &str,
    spec: &OverlaySpec,
) -> LayoutResult<EncodedImage> {
    let media_type = MediaType::from_mime(mime)?;
    let source = decode_raster(bytes, media_type)?;
    let rendered = render_overlay(&source, spec)?;
    encode_raster(&rendered, media_type)
}

#[cfg(test)]
#[path = "../../tests/unit/render/mod.rs"]
mod tests;
