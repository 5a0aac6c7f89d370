//! Layout retrieval and overlay generation for a digital notebook.
//!
//! Two independent pipelines live here:
//!
//! - Retrieval: rank a [`PatternSource`] catalog against a free-text [`Query`] and package the
//!   shortlist as [`GeneratedLayout`]s (see [`LayoutEngine`]).
//! - Overlay: draw ruled, grid, calendar or smart-margin guides over a photographed page
//!   ([`render_overlay`], [`render_overlay_bytes`]).
//!
//! Everything is synchronous and deterministic; no call keeps state between invocations.
#![forbid(unsafe_code)]

pub mod assets;
pub mod catalog;
pub mod foundation;
pub mod overlay;
pub mod render;
pub mod retrieval;

pub use crate::foundation::core::{Affine, Canvas, Point, Rect, Rgba8, Vec2};
pub use crate::foundation::error::{LayoutError, LayoutResult};

pub use crate::catalog::pattern::{
    Category, EditableElement, ElementKind, ElementStyle, LayoutPattern,
};
pub use crate::catalog::store::{InMemoryCatalog, PatternSource};

pub use crate::retrieval::assemble::{
    AssemblyOpts, AssemblyRequest, GeneratedLayout, LayoutMetadata, assemble,
};
pub use crate::retrieval::engine::{EngineOpts, LayoutEngine, LayoutResponse};
pub use crate::retrieval::query::Query;
pub use crate::retrieval::rank::{RankingOpts, ScoredCandidate, rank};
pub use crate::retrieval::suggest::suggest;

pub use crate::overlay::compile::compile_overlay;
pub use crate::overlay::detect::{
    ContentArea, ContentAreaDetector, ContentAreaKind, FixedContentAreas,
};
pub use crate::overlay::plan::{GuideOp, OverlayPlan};
pub use crate::overlay::spec::{
    LineSpacing, OverlayAlgorithm, OverlaySpec, PaperLineType, Placement,
};

pub use crate::assets::decode::{EncodedImage, MediaType, decode_raster, encode_raster};
pub use crate::assets::svg_raster::render_artwork_preview;
pub use crate::render::frame::RasterImage;
pub use crate::render::{render_overlay, render_overlay_bytes, render_overlay_with};
