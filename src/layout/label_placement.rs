// Label anchor planning for tokens on the chart.
// Pure geometry: candidates and a size profile in, one anchor per id out.

use std::cmp::Ordering;

use super::footprint::{Footprint, ObstacleGrid, dot_footprint, label_footprint};
use crate::config::PlannerConfig;
use crate::ir::{AnchorAssignment, AnchorDirection, LabelCandidate, Position};
use crate::log::debug;
use crate::profile::SizeProfile;

const MIN_SCORED_AREA: f32 = 1e-9;

/// Outcome of planning a single candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPlacement {
    pub id: String,
    pub position: Position,
    pub anchor: AnchorDirection,
    pub footprint: Footprint,
    /// Primary penalty of the chosen anchor; `0.0` means clear and in bounds.
    pub penalty: f32,
}

/// Assign a label anchor to every candidate using the default weights.
pub fn plan_label_anchors(candidates: &[LabelCandidate], profile: &SizeProfile) -> AnchorAssignment {
    plan_label_anchors_with(candidates, profile, &PlannerConfig::default())
}

pub fn plan_label_anchors_with(
    candidates: &[LabelCandidate],
    profile: &SizeProfile,
    config: &PlannerConfig,
) -> AnchorAssignment {
    let mut assignment = AnchorAssignment::new();
    for placement in plan_label_footprints_with(candidates, profile, config) {
        assignment.insert(placement.id, placement.anchor);
    }
    assignment
}

pub fn plan_label_footprints(
    candidates: &[LabelCandidate],
    profile: &SizeProfile,
) -> Vec<LabelPlacement> {
    plan_label_footprints_with(candidates, profile, &PlannerConfig::default())
}

/// Greedy, order-stable anchor assignment.
///
/// Candidates are processed in ascending id order. Each one tries the eight
/// anchors in [`AnchorDirection::PRIORITY`] order and keeps the footprint with
/// the lowest penalty against the chart bounds, the labels placed so far and
/// the other tokens' dots. The result is sorted by id and contains one entry
/// per input candidate.
pub fn plan_label_footprints_with(
    candidates: &[LabelCandidate],
    profile: &SizeProfile,
    config: &PlannerConfig,
) -> Vec<LabelPlacement> {
    let mut order: Vec<&LabelCandidate> = candidates.iter().collect();
    order.sort_by(|a, b| compare_candidates(a, b));

    let dots: Vec<Footprint> = order
        .iter()
        .map(|candidate| dot_footprint(candidate.position, profile))
        .collect();
    let dot_grid = ObstacleGrid::new(config.grid_cell, &dots);

    let mut placed: Vec<Footprint> = Vec::with_capacity(order.len());
    let mut placed_grid = ObstacleGrid::new(config.grid_cell, &[]);
    let mut placements = Vec::with_capacity(order.len());

    for (idx, candidate) in order.iter().enumerate() {
        let label_width = profile.label_width(candidate.label_pixel_width);
        let score_anchor = |anchor: AnchorDirection| {
            let rect = label_footprint(candidate.position, anchor, label_width, profile);
            let primary = anchor_penalty(
                &rect,
                idx,
                &placed,
                &placed_grid,
                &dots,
                &dot_grid,
                config,
            );
            (anchor, rect, (primary, anchor.priority_rank() as f32))
        };
        let (anchor, footprint, score) = AnchorDirection::PRIORITY[1..].iter().fold(
            score_anchor(AnchorDirection::PRIORITY[0]),
            |best, &anchor| {
                let next = score_anchor(anchor);
                if candidate_better(next.2, best.2, config.tie_epsilon) {
                    next
                } else {
                    best
                }
            },
        );
        debug!(
            id = %candidate.id,
            anchor = %anchor,
            penalty = score.0,
            "placed token label"
        );
        placed_grid.insert(placed.len(), &footprint);
        placed.push(footprint);
        placements.push(LabelPlacement {
            id: candidate.id.clone(),
            position: candidate.position,
            anchor,
            footprint,
            penalty: score.0,
        });
    }
    placements
}

// Id first; the geometric keys only matter for duplicate ids.
fn compare_candidates(a: &LabelCandidate, b: &LabelCandidate) -> Ordering {
    a.id.cmp(&b.id)
        .then_with(|| a.position.x().total_cmp(&b.position.x()))
        .then_with(|| a.position.y().total_cmp(&b.position.y()))
        .then_with(|| a.label_pixel_width.total_cmp(&b.label_pixel_width))
}

/// Penalty of a footprint, relative to its own area.
///
/// Leaving the chart costs a flat `outside_penalty` on top of the
/// proportional term, so any in-bounds anchor beats any out-of-bounds one
/// unless overlaps pile up.
fn anchor_penalty(
    rect: &Footprint,
    own_idx: usize,
    placed: &[Footprint],
    placed_grid: &ObstacleGrid,
    dots: &[Footprint],
    dot_grid: &ObstacleGrid,
    config: &PlannerConfig,
) -> f32 {
    let area = rect.area().max(MIN_SCORED_AREA);
    let mut penalty = 0.0;

    if rect.leaves_chart() {
        penalty += config.outside_penalty + (rect.outside_area() / area) * config.outside_weight;
    }

    for i in placed_grid.query(rect) {
        let ov = rect.overlap_area(&placed[i]);
        if ov > 0.0 {
            penalty += (ov / area) * config.label_overlap_weight;
        }
    }

    for i in dot_grid.query(rect) {
        if i == own_idx {
            continue;
        }
        let ov = rect.overlap_area(&dots[i]);
        if ov > 0.0 {
            penalty += (ov / area) * config.dot_overlap_weight;
        }
    }
    penalty
}

fn candidate_better(candidate: (f32, f32), best: (f32, f32), eps: f32) -> bool {
    if candidate.0 + eps < best.0 {
        return true;
    }
    (candidate.0 - best.0).abs() <= eps && candidate.1 < best.1
}
