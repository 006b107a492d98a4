//! Renderer-facing geometry for the ring-light glow and the indicator.
//!
//! Everything here is a pure function of the displayed intensity and the
//! surface size, so any toolkit can draw it.

use crate::animator::{Animator, Channel};
use crate::config::RingLightConfig;

/// Width and height of the interaction surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Size {
    /// Create a size.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle, origin at the top-left of the surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// Create a rectangle.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the rectangle covers no area.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Glow bands along the four screen edges.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Edges {
    /// Band along the top edge.
    pub top: Rect,
    /// Band along the bottom edge.
    pub bottom: Rect,
    /// Band along the left edge.
    pub left: Rect,
    /// Band along the right edge.
    pub right: Rect,
}

/// Square glows filling the four screen corners.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Corners {
    /// Top-left corner.
    pub top_left: Rect,
    /// Top-right corner.
    pub top_right: Rect,
    /// Bottom-left corner.
    pub bottom_left: Rect,
    /// Bottom-right corner.
    pub bottom_right: Rect,
}

/// Glow geometry for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GlowLayout {
    /// Opacity of the glow, equal to the intensity.
    pub alpha: f32,
    /// Edge bands.
    pub edges: Edges,
    /// Corner glows.
    pub corners: Corners,
}

impl GlowLayout {
    /// All eight regions: edges first, then corners.
    pub fn regions(&self) -> [Rect; 8] {
        [
            self.edges.top,
            self.edges.bottom,
            self.edges.left,
            self.edges.right,
            self.corners.top_left,
            self.corners.top_right,
            self.corners.bottom_left,
            self.corners.bottom_right,
        ]
    }

    /// Whether the light is off.
    pub fn is_dark(&self) -> bool {
        self.alpha <= 0.0
    }
}

/// Lays out the ring-light glow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingLight {
    /// Edge band thickness at full intensity, as a fraction of the surface dimension.
    pub edge_coverage: f32,
    /// Corner side at full intensity, as a fraction of the shorter surface side.
    pub corner_coverage: f32,
}

impl RingLight {
    /// Take coverage fractions from a config.
    pub fn from_config(config: &RingLightConfig) -> Self {
        Self {
            edge_coverage: config.edge_coverage,
            corner_coverage: config.corner_coverage,
        }
    }

    /// Compute the glow for `intensity` on a surface of `size`.
    ///
    /// Intensity is clamped to `[0, 1]`. Top and bottom bands scale with the
    /// surface height, left and right bands with its width.
    pub fn layout(&self, intensity: f32, size: Size) -> GlowLayout {
        let intensity = if intensity.is_nan() {
            0.0
        } else {
            intensity.clamp(0.0, 1.0)
        };
        let Size { width, height } = size;

        let horizontal_band = intensity * self.edge_coverage * height;
        let vertical_band = intensity * self.edge_coverage * width;
        let corner = intensity * self.corner_coverage * width.min(height);

        GlowLayout {
            alpha: intensity,
            edges: Edges {
                top: Rect::new(0.0, 0.0, width, horizontal_band),
                bottom: Rect::new(0.0, height - horizontal_band, width, horizontal_band),
                left: Rect::new(0.0, 0.0, vertical_band, height),
                right: Rect::new(width - vertical_band, 0.0, vertical_band, height),
            },
            corners: Corners {
                top_left: Rect::new(0.0, 0.0, corner, corner),
                top_right: Rect::new(width - corner, 0.0, corner, corner),
                bottom_left: Rect::new(0.0, height - corner, corner, corner),
                bottom_right: Rect::new(width - corner, height - corner, corner, corner),
            },
        }
    }
}

impl Default for RingLight {
    fn default() -> Self {
        Self::from_config(&RingLightConfig::default())
    }
}

/// What the intensity indicator should look like this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorView {
    /// Whether the indicator is logically shown (it may still be fading out when false).
    pub visible: bool,
    /// Current opacity.
    pub opacity: f32,
    /// Current scale.
    pub scale: f32,
    /// Filled proportion of the slider track, equal to the displayed intensity.
    pub fill: f32,
}

impl IndicatorView {
    /// Read the indicator channels from an animator.
    pub fn from_animator<A: Animator + ?Sized>(animator: &A, visible: bool) -> Self {
        Self {
            visible,
            opacity: animator.value(Channel::IndicatorOpacity).clamp(0.0, 1.0),
            scale: animator.value(Channel::IndicatorScale),
            fill: animator.value(Channel::Intensity).clamp(0.0, 1.0),
        }
    }

    /// Whether anything needs drawing.
    pub fn is_drawn(&self) -> bool {
        self.opacity > 0.0
    }
}

/// What sits behind the glow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backdrop {
    /// Live front-camera preview.
    CameraPreview,
    /// Static view explaining that camera access is needed.
    PermissionExplainer,
}

impl Backdrop {
    /// Pick the backdrop from the camera permission flag.
    pub fn from_permission(granted: bool) -> Self {
        if granted {
            Backdrop::CameraPreview
        } else {
            Backdrop::PermissionExplainer
        }
    }
}
