use serde::Serialize;

use crate::foundation::core::{Affine, Canvas, Point, Rect, Rgba8};

#[derive(Clone, Debug, PartialEq, Serialize)]
/// Backend-agnostic description of one overlay render.
///
/// The plan consists of:
/// - the output canvas (always the source image's size)
/// - how the source image is drawn underneath (`backdrop`)
/// - guide operations in painter's order (`ops`)
///
/// Guide coordinates are canvas pixels and ignore the backdrop transform.
pub struct OverlayPlan {
    pub canvas: Canvas,
    pub backdrop: Backdrop,
    pub ops: Vec<GuideOp>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
/// Source image placement under the guides.
pub struct Backdrop {
    pub transform: Affine,
    /// In `[0, 1]`.
    pub opacity: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Dash {
    pub on: f64,
    pub off: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct StrokeStyle {
    pub color: Rgba8,
    /// Multiplied into the colour's alpha at draw time.
    pub opacity: f64,
    pub width: f64,
    pub dash: Option<Dash>,
}

impl StrokeStyle {
    pub fn solid(color: Rgba8, opacity: f64, width: f64) -> Self {
        Self {
            color,
            opacity,
            width,
            dash: None,
        }
    }

    pub fn dashed(mut self, on: f64, off: f64) -> Self {
        self.dash = Some(Dash { on, off });
        self
    }

    /// Colour with the stroke opacity folded into alpha.
    pub fn effective_color(&self) -> Rgba8 {
        self.color.with_opacity(self.opacity)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum GuideOp {
    Line {
        from: Point,
        to: Point,
        stroke: StrokeStyle,
    },
    Rect {
        rect: Rect,
        stroke: StrokeStyle,
    },
    /// Text centred horizontally on `anchor.x`, baseline at `anchor.y`.
    Label {
        text: String,
        anchor: Point,
        font_size: f64,
        color: Rgba8,
        opacity: f64,
    },
}

impl OverlayPlan {
    /// Y coordinates of horizontal line ops, in op order.
    pub fn horizontal_line_ys(&self) -> Vec<f64> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                GuideOp::Line { from, to, .. } if from.y == to.y && from.x != to.x => Some(from.y),
                _ => None,
            })
            .collect()
    }

    /// X coordinates of vertical line ops, in op order.
    pub fn vertical_line_xs(&self) -> Vec<f64> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                GuideOp::Line { from, to, .. } if from.x == to.x && from.y != to.y => Some(from.x),
                _ => None,
            })
            .collect()
    }

    pub fn labels(&self) -> impl Iterator<Item = &GuideOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, GuideOp::Label { .. }))
    }

    pub fn rects(&self) -> impl Iterator<Item = &Rect> {
        self.ops.iter().filter_map(|op| match op {
            GuideOp::Rect { rect, .. } => Some(rect),
            _ => None,
        })
    }
}
