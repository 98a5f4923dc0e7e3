use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::profile::BasePixelConstants;

/// A point on the chart in normalized space.
///
/// Both components are fractions of the chart side in `[0, 1]`, origin at
/// the bottom-left corner with `y` growing upward. The fields are private so
/// an out-of-range position can never be built or deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawPosition")]
pub struct Position {
    x: f32,
    y: f32,
}

#[derive(Deserialize)]
struct RawPosition {
    x: f32,
    y: f32,
}

impl From<RawPosition> for Position {
    fn from(raw: RawPosition) -> Self {
        Self::new(raw.x, raw.y)
    }
}

impl Position {
    pub const CENTER: Position = Position { x: 0.5, y: 0.5 };

    /// Clamps both components into `[0, 1]`. Non-finite components fall back
    /// to the chart midpoint.
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: clamp_unit(x),
            y: clamp_unit(y),
        }
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::CENTER
    }
}

pub(crate) fn clamp_unit(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.5
    }
}

/// Rendered bounds of the chart in pixels, as reported by the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl PixelRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// A square chart anchored at the origin.
    pub fn square(side: f32) -> Self {
        Self::new(0.0, 0.0, side, side)
    }

    // Negative or NaN extents collapse to zero.
    pub(crate) fn extent_x(&self) -> f32 {
        self.width.max(0.0)
    }

    pub(crate) fn extent_y(&self) -> f32 {
        self.height.max(0.0)
    }

    pub fn right(&self) -> f32 {
        self.left + self.extent_x()
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.extent_y()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelCandidate {
    pub id: String,
    pub position: Position,
    pub label_pixel_width: f32,
}

impl LabelCandidate {
    pub fn new(id: impl Into<String>, position: Position, label_pixel_width: f32) -> Self {
        Self {
            id: id.into(),
            position,
            label_pixel_width,
        }
    }
}

/// Side of a token's dot on which its label is drawn.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum AnchorDirection {
    N,
    S,
    E,
    W,
    #[default]
    NE,
    NW,
    SE,
    SW,
}

impl AnchorDirection {
    /// Evaluation order of the planner. Earlier entries win exact ties.
    pub const PRIORITY: [AnchorDirection; 8] = [
        AnchorDirection::NE,
        AnchorDirection::N,
        AnchorDirection::E,
        AnchorDirection::NW,
        AnchorDirection::SE,
        AnchorDirection::S,
        AnchorDirection::W,
        AnchorDirection::SW,
    ];

    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "n" => Some(Self::N),
            "s" => Some(Self::S),
            "e" => Some(Self::E),
            "w" => Some(Self::W),
            "ne" => Some(Self::NE),
            "nw" => Some(Self::NW),
            "se" => Some(Self::SE),
            "sw" => Some(Self::SW),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::N => "n",
            Self::S => "s",
            Self::E => "e",
            Self::W => "w",
            Self::NE => "ne",
            Self::NW => "nw",
            Self::SE => "se",
            Self::SW => "sw",
        }
    }

    /// Unit step of the anchor in normalized space: `x` east, `y` north.
    pub fn step(self) -> (f32, f32) {
        match self {
            Self::N => (0.0, 1.0),
            Self::S => (0.0, -1.0),
            Self::E => (1.0, 0.0),
            Self::W => (-1.0, 0.0),
            Self::NE => (1.0, 1.0),
            Self::NW => (-1.0, 1.0),
            Self::SE => (1.0, -1.0),
            Self::SW => (-1.0, -1.0),
        }
    }

    pub fn is_diagonal(self) -> bool {
        let (dx, dy) = self.step();
        dx != 0.0 && dy != 0.0
    }

    pub(crate) fn priority_rank(self) -> usize {
        Self::PRIORITY
            .iter()
            .position(|dir| *dir == self)
            .unwrap_or(Self::PRIORITY.len())
    }
}

impl fmt::Display for AnchorDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label anchor per candidate id, freshly computed on every planner call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnchorAssignment(BTreeMap<String, AnchorDirection>);

impl AnchorAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<AnchorDirection> {
        self.0.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, AnchorDirection)> + '_ {
        self.0.iter().map(|(id, dir)| (id.as_str(), *dir))
    }

    pub(crate) fn insert(&mut self, id: String, anchor: AnchorDirection) {
        self.0.insert(id, anchor);
    }
}

impl IntoIterator for AnchorAssignment {
    type Item = (String, AnchorDirection);
    type IntoIter = std::collections::btree_map::IntoIter<String, AnchorDirection>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// One token as described in a scene document.
///
/// The label width comes from `labelWidth` (pixels) when present, otherwise
/// it is estimated from `label`, falling back to the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneToken {
    pub id: String,
    pub x: f32,
    pub y: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_width: Option<f32>,
}

impl SceneToken {
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    pub fn label_text(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }

    pub fn to_candidate(&self, base: &BasePixelConstants) -> LabelCandidate {
        let width = match self.label_width {
            Some(width) => width,
            None => base.label_pixel_width(self.label_text()),
        };
        LabelCandidate::new(self.id.clone(), self.position(), width)
    }
}

/// The set of visible tokens handed to the planner in one pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub tokens: Vec<SceneToken>,
}

impl Scene {
    pub fn candidates(&self, base: &BasePixelConstants) -> Vec<LabelCandidate> {
        self.tokens
            .iter()
            .map(|token| token.to_candidate(base))
            .collect()
    }
}
