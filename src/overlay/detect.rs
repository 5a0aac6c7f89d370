use serde::{Deserialize, Serialize};

use crate::foundation::core::{Canvas, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentAreaKind {
    Header,
    Body,
    CalendarCorner,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContentArea {
    pub kind: ContentAreaKind,
    pub rect: Rect,
}

/// Finds the regions of a page that smart margins should frame.
pub trait ContentAreaDetector {
    /// Areas in canvas pixel space, in drawing order. Every returned rect lies inside the canvas
    /// and has a positive area.
    fn detect(&self, canvas: Canvas) -> Vec<ContentArea>;
}

/// Stand-in detector returning a constant header band, body band and bottom-right calendar
/// corner.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FixedContentAreas {
    /// Left/right inset of the header and body bands.
    pub side_inset: f64,
    pub header_top: f64,
    pub header_height: f64,
    pub body_top: f64,
    /// Gap between the body band and the bottom edge.
    pub body_bottom_gap: f64,
    pub corner_width: f64,
    pub corner_height: f64,
    /// Gap between the calendar corner and the right/bottom edges.
    pub corner_inset: f64,
}

impl Default for FixedContentAreas {
    fn default() -> Self {
        Self {
            side_inset: 50.0,
            header_top: 50.0,
            header_height: 100.0,
            body_top: 200.0,
            body_bottom_gap: 100.0,
            corner_width: 150.0,
            corner_height: 100.0,
            corner_inset: 50.0,
        }
    }
}

impl ContentAreaDetector for FixedContentAreas {
    fn detect(&self, canvas: Canvas) -> Vec<ContentArea> {
        let (w, h) = (canvas.width_f64(), canvas.height_f64());
        let bounds = Rect::new(0.0, 0.0, w, h);

        let header = Rect::new(
            self.side_inset,
            self.header_top,
            w - self.side_inset,
            self.header_top + self.header_height,
        );
        let body = Rect::new(
            self.side_inset,
            self.body_top,
            w - self.side_inset,
            h - self.body_bottom_gap,
        );
        let corner = Rect::new(
            w - self.corner_inset - self.corner_width,
            h - self.corner_inset - self.corner_height,
            w - self.corner_inset,
            h - self.corner_inset,
        );

        [
            (ContentAreaKind::Header, header),
            (ContentAreaKind::Body, body),
            (ContentAreaKind::CalendarCorner, corner),
        ]
        .into_iter()
        .filter(|(_, r)| r.x1 > r.x0 && r.y1 > r.y0)
        .map(|(kind, r)| (kind, r.intersect(bounds)))
        .filter(|(_, r)| r.width() > 0.0 && r.height() > 0.0)
        .map(|(kind, rect)| ContentArea { kind, rect })
        .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/detect.rs"]
mod tests;
