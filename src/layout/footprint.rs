// Label footprints and the obstacle grid used while scoring anchors.
// Everything here is in normalized chart space with y growing upward.

use std::collections::{HashMap, HashSet};
use std::f32::consts::FRAC_1_SQRT_2;

use serde::{Deserialize, Serialize};

use crate::ir::{AnchorDirection, Position};
use crate::profile::SizeProfile;

/// Axis-aligned rectangle a label (or dot) occupies. `x`/`y` is the
/// bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Footprint {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    pub fn overlap_area(&self, other: &Footprint) -> f32 {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.top().min(other.top());
        let w = (x1 - x0).max(0.0);
        let h = (y1 - y0).max(0.0);
        w * h
    }

    /// Area of the footprint lying outside the unit chart square.
    pub fn outside_area(&self) -> f32 {
        let area = self.area();
        if area <= 0.0 {
            return 0.0;
        }
        let x0 = self.x.max(0.0);
        let y0 = self.y.max(0.0);
        let x1 = self.right().min(1.0);
        let y1 = self.top().min(1.0);
        let inside_w = (x1 - x0).max(0.0);
        let inside_h = (y1 - y0).max(0.0);
        (area - inside_w * inside_h).max(0.0)
    }

    /// Whether any edge crosses the unit chart square by more than
    /// [`CHART_EDGE_EPS`]. Zero-area footprints are checked too.
    pub fn leaves_chart(&self) -> bool {
        self.x < -CHART_EDGE_EPS
            || self.y < -CHART_EDGE_EPS
            || self.right() > 1.0 + CHART_EDGE_EPS
            || self.top() > 1.0 + CHART_EDGE_EPS
    }
}

/// Slack allowed on chart edges; `x + width` is not exact in f32.
pub const CHART_EDGE_EPS: f32 = 1e-6;

/// Footprint of a label anchored on `anchor` of a token at `position`.
///
/// The label sits `profile.label_offset()` away from the token center in the
/// anchor's direction; diagonal anchors split that distance over both axes.
/// `label_width` is already normalized and padded.
pub fn label_footprint(
    position: Position,
    anchor: AnchorDirection,
    label_width: f32,
    profile: &SizeProfile,
) -> Footprint {
    let width = label_width.max(0.0);
    let height = profile.label_height.max(0.0);
    let offset = profile.label_offset().max(0.0);
    let reach = if anchor.is_diagonal() {
        offset * FRAC_1_SQRT_2
    } else {
        offset
    };
    let (dx, dy) = anchor.step();
    let x = if dx > 0.0 {
        position.x() + reach
    } else if dx < 0.0 {
        position.x() - reach - width
    } else {
        position.x() - width * 0.5
    };
    let y = if dy > 0.0 {
        position.y() + reach
    } else if dy < 0.0 {
        position.y() - reach - height
    } else {
        position.y() - height * 0.5
    };
    Footprint::new(x, y, width, height)
}

/// Square bounding the token's dot.
pub(crate) fn dot_footprint(position: Position, profile: &SizeProfile) -> Footprint {
    let r = profile.dot_radius.max(0.0);
    Footprint::new(position.x() - r, position.y() - r, r * 2.0, r * 2.0)
}

// Cell coordinates are clamped so oversized footprints stay cheap to index.
// Clamping is monotone, so overlapping footprints still share a cell.
const GRID_COORD_MIN: f32 = -2.0;
const GRID_COORD_MAX: f32 = 3.0;

/// Uniform grid over footprints for overlap queries.
pub(crate) struct ObstacleGrid {
    cell: f32,
    /// Maps grid cell (ix, iy) to indices into the obstacle list.
    cells: HashMap<(i32, i32), Vec<usize>>,
}

impl ObstacleGrid {
    pub(crate) fn new(cell: f32, rects: &[Footprint]) -> Self {
        let cell = if cell.is_finite() { cell.max(0.01) } else { 0.1 };
        let mut grid = Self {
            cell,
            cells: HashMap::new(),
        };
        for (i, rect) in rects.iter().enumerate() {
            grid.insert(i, rect);
        }
        grid
    }

    fn cell_range(&self, rect: &Footprint) -> (i32, i32, i32, i32) {
        let index = |v: f32| {
            let v = if v.is_finite() { v } else { 0.0 };
            (v.clamp(GRID_COORD_MIN, GRID_COORD_MAX) / self.cell).floor() as i32
        };
        (
            index(rect.x),
            index(rect.y),
            index(rect.right()),
            index(rect.top()),
        )
    }

    pub(crate) fn insert(&mut self, idx: usize, rect: &Footprint) {
        let (x0, y0, x1, y1) = self.cell_range(rect);
        for ix in x0..=x1 {
            for iy in y0..=y1 {
                self.cells.entry((ix, iy)).or_default().push(idx);
            }
        }
    }

    /// Indices of obstacles that could overlap with `rect`, each reported once,
    /// in a stable order.
    pub(crate) fn query(&self, rect: &Footprint) -> impl Iterator<Item = usize> + '_ {
        let (x0, y0, x1, y1) = self.cell_range(rect);
        let mut seen = HashSet::new();
        (x0..=x1)
            .flat_map(move |ix| (y0..=y1).map(move |iy| (ix, iy)))
            .flat_map(move |key| {
                self.cells
                    .get(&key)
                    .map(|v| v.as_slice())
                    .unwrap_or(&[])
                    .iter()
                    .copied()
            })
            .filter(move |idx| seen.insert(*idx))
    }
}
