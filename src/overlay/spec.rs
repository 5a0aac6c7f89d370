use serde::{Deserialize, Serialize};

use crate::foundation::core::{Affine, Canvas, Rgba8, Vec2};

/// Which guide geometry to draw.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverlayAlgorithm {
    #[default]
    Ruled,
    Grid,
    Calendar,
    SmartMargins,
}

/// Paper style flag. Only consulted by [`OverlayAlgorithm::SmartMargins`], where `Ruled` adds
/// interior lines to each content area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaperLineType {
    #[default]
    Ruled,
    Grid,
    Dots,
    Blank,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineSpacing {
    Narrow,
    #[default]
    Normal,
    Wide,
}

impl LineSpacing {
    /// Pixel spacing for ruled paper (also used by the calendar table).
    pub fn ruled_px(self) -> f64 {
        match self {
            LineSpacing::Narrow => 18.0,
            LineSpacing::Normal => 24.0,
            LineSpacing::Wide => 32.0,
        }
    }

    pub fn grid_px(self) -> f64 {
        match self {
            LineSpacing::Narrow => 15.0,
            LineSpacing::Normal => 20.0,
            LineSpacing::Wide => 30.0,
        }
    }

    pub fn px_for(self, algorithm: OverlayAlgorithm) -> f64 {
        match algorithm {
            OverlayAlgorithm::Grid => self.grid_px(),
            OverlayAlgorithm::Ruled | OverlayAlgorithm::Calendar | OverlayAlgorithm::SmartMargins => {
                self.ruled_px()
            }
        }
    }
}

/// Affine placement of the source image on the output canvas.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Placement {
    pub offset_x: f64,
    pub offset_y: f64,
    pub scale: f64,
    pub rotation_degrees: f64,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            scale: 1.0,
            rotation_degrees: 0.0,
        }
    }
}

impl Placement {
    /// `translate(offset) · rotate_about(centre) · scale`.
    pub fn to_affine(self, canvas: Canvas) -> Affine {
        let translate = Affine::translate(Vec2::new(self.offset_x, self.offset_y));
        let rotate = if self.rotation_degrees == 0.0 {
            Affine::IDENTITY
        } else {
            Affine::rotate_about(self.rotation_degrees.to_radians(), canvas.center())
        };
        translate * rotate * Affine::scale(self.scale)
    }

    pub fn is_identity(self) -> bool {
        self == Self::default()
    }
}

/// Parameters of one overlay render.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OverlaySpec {
    pub algorithm: OverlayAlgorithm,
    pub line_spacing: LineSpacing,
    pub margin_line: bool,
    pub line_color: Rgba8,
    /// In `[0, 1]`.
    pub overlay_opacity: f64,
    pub paper: PaperLineType,
    pub placement: Placement,
}

impl Default for OverlaySpec {
    fn default() -> Self {
        Self {
            algorithm: OverlayAlgorithm::Ruled,
            line_spacing: LineSpacing::Normal,
            margin_line: false,
            line_color: Rgba8::opaque(0x99, 0xb4, 0xd6),
            overlay_opacity: 0.7,
            paper: PaperLineType::Ruled,
            placement: Placement::default(),
        }
    }
}

impl OverlaySpec {
    pub fn new(algorithm: OverlayAlgorithm) -> Self {
        Self {
            algorithm,
            ..Self::default()
        }
    }

    pub fn spacing_px(&self) -> f64 {
        self.line_spacing.px_for(self.algorithm)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/spec.rs"]
mod tests;
