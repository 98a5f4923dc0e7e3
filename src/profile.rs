//! Size profiles: pixel constants of the token artwork re-expressed as
//! fractions of the chart side, so the planner works in the same units as
//! token positions regardless of the chart's on-screen size.

use serde::{Deserialize, Serialize};

use crate::log::{debug, warn};

/// Pixel constants of a token and its label at a given layout density.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasePixelConstants {
    pub dot_diameter: f32,
    pub label_char_width: f32,
    pub label_pad_width: f32,
    pub label_height: f32,
}

impl BasePixelConstants {
    /// Constants used for small (mobile) charts.
    pub fn compact() -> Self {
        Self {
            dot_diameter: 16.0,
            label_char_width: 6.0,
            label_pad_width: 4.0,
            label_height: 14.0,
        }
    }

    /// Constants used for large (desktop) charts.
    pub fn desktop() -> Self {
        Self {
            dot_diameter: 24.0,
            label_char_width: 7.5,
            label_pad_width: 6.0,
            label_height: 18.0,
        }
    }

    /// Estimated pixel width of a label's text.
    pub fn label_pixel_width(&self, text: &str) -> f32 {
        let chars = text.trim().chars().count() as f32;
        chars * self.label_char_width.max(0.0)
    }
}

impl Default for BasePixelConstants {
    fn default() -> Self {
        Self::desktop()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileKind {
    Compact,
    Desktop,
}

impl ProfileKind {
    /// Conventional choice: compact up to and including `breakpoint_px`.
    pub fn for_container(width_px: f32, breakpoint_px: f32) -> Self {
        if width_px <= breakpoint_px {
            Self::Compact
        } else {
            Self::Desktop
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "compact" | "mobile" => Some(Self::Compact),
            "desktop" => Some(Self::Desktop),
            _ => None,
        }
    }
}

/// Normalized geometry of tokens and labels for one chart size.
///
/// All lengths except `chart_side_px` are fractions of the chart side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeProfile {
    pub chart_side_px: f32,
    pub dot_radius: f32,
    pub label_char_width: f32,
    pub label_pad_width: f32,
    pub label_height: f32,
}

impl SizeProfile {
    pub fn degenerate() -> Self {
        Self {
            chart_side_px: 0.0,
            dot_radius: 0.0,
            label_char_width: 0.0,
            label_pad_width: 0.0,
            label_height: 0.0,
        }
    }

    /// Distance from a token's center to the near edge of its label.
    pub fn label_offset(&self) -> f32 {
        self.dot_radius + self.label_pad_width
    }

    pub fn normalize_px(&self, px: f32) -> f32 {
        normalize(px, self.chart_side_px)
    }

    /// Normalized footprint width of a label of `label_pixel_width` pixels,
    /// padding included. Non-positive widths leave only the padding.
    pub fn label_width(&self, label_pixel_width: f32) -> f32 {
        let text = if label_pixel_width > 0.0 {
            self.normalize_px(label_pixel_width)
        } else {
            0.0
        };
        text + 2.0 * self.label_pad_width
    }
}

fn normalize(px: f32, side: f32) -> f32 {
    if side > 0.0 && side.is_finite() && px.is_finite() {
        px / side
    } else {
        0.0
    }
}

/// Derive a size profile for a chart rendered at the given container size.
///
/// Charts are square; when the dimensions differ the width wins. A
/// container with no positive dimension yields an all-zero profile.
pub fn to_normalized_sizes(
    base: &BasePixelConstants,
    container_width_px: f32,
    container_height_px: f32,
) -> SizeProfile {
    let usable = |v: f32| v > 0.0 && v.is_finite();
    let side = if usable(container_width_px) {
        container_width_px
    } else if usable(container_height_px) {
        container_height_px
    } else {
        warn!(
            width = container_width_px,
            height = container_height_px,
            "degenerate chart container, size profile collapses to zero"
        );
        return SizeProfile::degenerate();
    };
    if usable(container_height_px) && (container_width_px - container_height_px).abs() > 0.5 {
        debug!(
            width = container_width_px,
            height = container_height_px,
            "non-square chart container, using width as chart side"
        );
    }
    SizeProfile {
        chart_side_px: side,
        dot_radius: normalize(base.dot_diameter * 0.5, side),
        label_char_width: normalize(base.label_char_width, side),
        label_pad_width: normalize(base.label_pad_width, side),
        label_height: normalize(base.label_height, side),
    }
}
