use crate::foundation::core::{Canvas, Point, Rect, Rgba8};
use crate::overlay::detect::ContentAreaDetector;
use crate::overlay::plan::{Backdrop, GuideOp, OverlayPlan, StrokeStyle};
use crate::overlay::spec::{OverlayAlgorithm, OverlaySpec, PaperLineType};

/// X position of the ruled-paper margin line; ruled lines start here when it is enabled.
pub const MARGIN_X: f64 = 60.0;
pub const MARGIN_COLOR: Rgba8 = Rgba8::opaque(0xe5, 0x39, 0x35);
const MARGIN_OPACITY_FACTOR: f64 = 0.8;
const MARGIN_WIDTH: f64 = 2.0;

const RULED_WIDTH: f64 = 1.0;
const GRID_WIDTH: f64 = 0.5;

pub const CALENDAR_HEADER_HEIGHT: f64 = 60.0;
pub const CALENDAR_COLUMNS: u32 = 7;
pub const CALENDAR_ROWS: u32 = 6;
const CALENDAR_BACKDROP_OPACITY: f64 = 0.4;
const CALENDAR_LABEL_Y: f64 = 30.0;
const CALENDAR_LABEL_OPACITY: f64 = 0.8;
const CALENDAR_LABEL_SIZE: f64 = 14.0;
const DAY_LABELS: [&str; 7] = ["S", "M", "T", "W", "T", "F", "S"];

const SMART_DASH: (f64, f64) = (5.0, 5.0);
const SMART_RULE_SPACING: f64 = 20.0;
const SMART_RULE_INSET: f64 = 10.0;
const SMART_RULE_OPACITY_FACTOR: f64 = 0.6;

/// Turn an overlay spec into drawable geometry for a canvas of the source image's size.
pub fn compile_overlay(
    canvas: Canvas,
    spec: &OverlaySpec,
    detector: &dyn ContentAreaDetector,
) -> OverlayPlan {
    let opacity = clamp_unit(spec.overlay_opacity);
    let spacing = spec.spacing_px();

    let (backdrop_opacity, ops) = match spec.algorithm {
        OverlayAlgorithm::Ruled => (1.0, ruled_ops(canvas, spec, spacing, opacity)),
        OverlayAlgorithm::Grid => (1.0, grid_ops(canvas, spec, spacing, opacity)),
        OverlayAlgorithm::Calendar => (CALENDAR_BACKDROP_OPACITY, calendar_ops(canvas, spec, opacity)),
        OverlayAlgorithm::SmartMargins => (1.0, smart_margin_ops(canvas, spec, opacity, detector)),
    };

    OverlayPlan {
        canvas,
        backdrop: Backdrop {
            transform: spec.placement.to_affine(canvas),
            opacity: backdrop_opacity,
        },
        ops,
    }
}

fn ruled_ops(canvas: Canvas, spec: &OverlaySpec, spacing: f64, opacity: f64) -> Vec<GuideOp> {
    let (w, h) = (canvas.width_f64(), canvas.height_f64());
    let stroke = StrokeStyle::solid(spec.line_color, opacity, RULED_WIDTH);
    let x0 = if spec.margin_line { MARGIN_X } else { 0.0 };

    let mut ops: Vec<GuideOp> = steps(spacing, h)
        .map(|y| GuideOp::Line {
            from: Point::new(x0, y),
            to: Point::new(w, y),
            stroke,
        })
        .collect();

    if spec.margin_line {
        ops.push(GuideOp::Line {
            from: Point::new(MARGIN_X, 0.0),
            to: Point::new(MARGIN_X, h),
            stroke: StrokeStyle::solid(MARGIN_COLOR, MARGIN_OPACITY_FACTOR * opacity, MARGIN_WIDTH),
        });
    }
    ops
}

fn grid_ops(canvas: Canvas, spec: &OverlaySpec, spacing: f64, opacity: f64) -> Vec<GuideOp> {
    let (w, h) = (canvas.width_f64(), canvas.height_f64());
    let stroke = StrokeStyle::solid(spec.line_color, opacity, GRID_WIDTH);

    let verticals = steps(spacing, w).map(|x| GuideOp::Line {
        from: Point::new(x, 0.0),
        to: Point::new(x, h),
        stroke,
    });
    let horizontals = steps(spacing, h).map(|y| GuideOp::Line {
        from: Point::new(0.0, y),
        to: Point::new(w, y),
        stroke,
    });
    verticals.chain(horizontals).collect()
}

fn calendar_ops(canvas: Canvas, spec: &OverlaySpec, opacity: f64) -> Vec<GuideOp> {
    let (w, h) = (canvas.width_f64(), canvas.height_f64());
    let stroke = StrokeStyle::solid(spec.line_color, opacity, RULED_WIDTH);
    let cell_w = w / f64::from(CALENDAR_COLUMNS);
    let grid_h = h - CALENDAR_HEADER_HEIGHT;

    let mut ops = Vec::with_capacity((CALENDAR_COLUMNS * 2 + CALENDAR_ROWS + 2) as usize);

    if grid_h > 0.0 {
        let cell_h = grid_h / f64::from(CALENDAR_ROWS);
        for col in 0..=CALENDAR_COLUMNS {
            let x = f64::from(col) * cell_w;
            ops.push(GuideOp::Line {
                from: Point::new(x, CALENDAR_HEADER_HEIGHT),
                to: Point::new(x, h),
                stroke,
            });
        }
        for row in 0..=CALENDAR_ROWS {
            let y = CALENDAR_HEADER_HEIGHT + f64::from(row) * cell_h;
            ops.push(GuideOp::Line {
                from: Point::new(0.0, y),
                to: Point::new(w, y),
                stroke,
            });
        }
    }

    for (col, day) in DAY_LABELS.iter().enumerate() {
        ops.push(GuideOp::Label {
            text: (*day).to_owned(),
            anchor: Point::new((col as f64 + 0.5) * cell_w, CALENDAR_LABEL_Y),
            font_size: CALENDAR_LABEL_SIZE,
            color: spec.line_color,
            opacity: CALENDAR_LABEL_OPACITY,
        });
    }
    ops
}

fn smart_margin_ops(
    canvas: Canvas,
    spec: &OverlaySpec,
    opacity: f64,
    detector: &dyn ContentAreaDetector,
) -> Vec<GuideOp> {
    let frame = StrokeStyle::solid(spec.line_color, opacity, RULED_WIDTH)
        .dashed(SMART_DASH.0, SMART_DASH.1);
    let rule = StrokeStyle::solid(
        spec.line_color,
        SMART_RULE_OPACITY_FACTOR * opacity,
        RULED_WIDTH,
    );

    let mut ops = Vec::new();
    for area in detector.detect(canvas) {
        ops.push(GuideOp::Rect {
            rect: area.rect,
            stroke: frame,
        });
        if spec.paper == PaperLineType::Ruled {
            ops.extend(interior_rules(area.rect, rule));
        }
    }
    ops
}

fn interior_rules(rect: Rect, stroke: StrokeStyle) -> impl Iterator<Item = GuideOp> {
    let x0 = rect.x0 + SMART_RULE_INSET;
    let x1 = rect.x1 - SMART_RULE_INSET;
    let has_width = x1 > x0;
    steps(SMART_RULE_SPACING, rect.height())
        .filter(move |_| has_width)
        .map(move |dy| GuideOp::Line {
            from: Point::new(x0, rect.y0 + dy),
            to: Point::new(x1, rect.y0 + dy),
            stroke,
        })
}

/// `spacing, 2·spacing, …` strictly below `limit`. Empty for non-positive spacing.
fn steps(spacing: f64, limit: f64) -> impl Iterator<Item = f64> {
    let valid = spacing.is_finite() && spacing > 0.0;
    (1u32..)
        .map(move |i| f64::from(i) * spacing)
        .take_while(move |&v| valid && v < limit)
}

fn clamp_unit(v: f64) -> f64 {
    if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/compile.rs"]
mod tests;
