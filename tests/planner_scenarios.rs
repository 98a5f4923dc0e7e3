use tokenplot::{
    AnchorDirection, BasePixelConstants, LabelCandidate, Position, plan_label_anchors,
    plan_label_footprints, to_normalized_sizes,
};

const OVERLAP_TOLERANCE: f32 = 1e-6;

fn candidate(id: &str, x: f32, y: f32, width: f32) -> LabelCandidate {
    LabelCandidate::new(id, Position::new(x, y), width)
}

fn assert_no_overlaps(placements: &[tokenplot::LabelPlacement]) {
    for (i, a) in placements.iter().enumerate() {
        for b in &placements[i + 1..] {
            let overlap = a.footprint.overlap_area(&b.footprint);
            assert!(
                overlap <= OVERLAP_TOLERANCE,
                "{} ({}) and {} ({}) overlap by {overlap}",
                a.id,
                a.anchor,
                b.id,
                b.anchor
            );
        }
    }
}

#[test]
fn three_spread_tokens_on_small_chart() {
    let profile = to_normalized_sizes(&BasePixelConstants::compact(), 280.0, 280.0);
    let candidates = vec![
        candidate("A", 0.1, 0.1, 40.0),
        candidate("B", 0.9, 0.9, 40.0),
        candidate("C", 0.5, 0.5, 40.0),
    ];
    let placements = plan_label_footprints(&candidates, &profile);
    let anchor = |id: &str| placements.iter().find(|p| p.id == id).unwrap().anchor;

    assert_eq!(anchor("A"), AnchorDirection::NE);
    assert_eq!(anchor("C"), AnchorDirection::NE);
    // A 40px label cannot fit north-east of (0.9, 0.9) on a 280px chart.
    assert_eq!(anchor("B"), AnchorDirection::N);
    for placement in &placements {
        assert!(!placement.footprint.leaves_chart(), "{}", placement.id);
    }
    assert_no_overlaps(&placements);
}

#[test]
fn coincident_tokens_both_get_anchors() {
    let profile = to_normalized_sizes(&BasePixelConstants::compact(), 280.0, 280.0);
    let candidates = vec![candidate("a", 0.5, 0.5, 40.0), candidate("b", 0.5, 0.5, 40.0)];
    let plan = plan_label_anchors(&candidates, &profile);
    assert_eq!(plan.len(), 2);
    assert_eq!(plan.get("a"), Some(AnchorDirection::NE));
    assert_eq!(plan.get("b"), Some(AnchorDirection::E));
    assert_no_overlaps(&plan_label_footprints(&candidates, &profile));
}

#[test]
fn caller_order_does_not_change_the_result() {
    let profile = to_normalized_sizes(&BasePixelConstants::desktop(), 640.0, 640.0);
    let mut candidates = vec![
        candidate("zoe", 0.42, 0.55, 24.0),
        candidate("amir", 0.45, 0.52, 32.0),
        candidate("li", 0.40, 0.50, 16.0),
        candidate("noor", 0.48, 0.58, 40.0),
        candidate("sam", 0.95, 0.05, 24.0),
        candidate("kai", 0.02, 0.97, 24.0),
    ];
    let baseline = plan_label_anchors(&candidates, &profile);
    let baseline_json = serde_json::to_string(&baseline).unwrap();

    for shift in 1..candidates.len() {
        candidates.rotate_left(1);
        let plan = plan_label_anchors(&candidates, &profile);
        assert_eq!(plan, baseline, "rotation {shift} changed the assignment");
        assert_eq!(serde_json::to_string(&plan).unwrap(), baseline_json);
    }
    candidates.reverse();
    assert_eq!(plan_label_anchors(&candidates, &profile), baseline);
}

#[test]
fn repeated_calls_are_identical() {
    let profile = to_normalized_sizes(&BasePixelConstants::compact(), 320.0, 320.0);
    let candidates: Vec<LabelCandidate> = (0..12)
        .map(|i| {
            let t = i as f32 / 12.0;
            candidate(&format!("t{i:02}"), 0.3 + 0.4 * t, 0.5 + 0.1 * (t * 6.0).sin(), 30.0)
        })
        .collect();
    let first = plan_label_footprints(&candidates, &profile);
    let second = plan_label_footprints(&candidates, &profile);
    assert_eq!(first, second);
}

#[test]
fn degenerate_label_widths_are_total() {
    let profile = to_normalized_sizes(&BasePixelConstants::compact(), 280.0, 280.0);
    let candidates = vec![
        candidate("zero", 0.3, 0.3, 0.0),
        candidate("negative", 0.6, 0.3, -25.0),
        candidate("huge", 0.5, 0.7, 10_000.0),
        candidate("nan", 0.2, 0.8, f32::NAN),
        candidate("same-1", 0.7, 0.7, 20.0),
        candidate("same-2", 0.7, 0.7, 20.0),
    ];
    let plan = plan_label_anchors(&candidates, &profile);
    assert_eq!(plan.len(), candidates.len());
    for c in &candidates {
        assert!(plan.get(&c.id).is_some(), "{} missing", c.id);
    }
}

#[test]
fn empty_input_yields_empty_assignment() {
    let profile = to_normalized_sizes(&BasePixelConstants::compact(), 280.0, 280.0);
    assert!(plan_label_anchors(&[], &profile).is_empty());
}

#[test]
fn crowded_row_spreads_labels() {
    let profile = to_normalized_sizes(&BasePixelConstants::desktop(), 600.0, 600.0);
    let candidates = vec![
        candidate("p1", 0.30, 0.5, 30.0),
        candidate("p2", 0.40, 0.5, 30.0),
        candidate("p3", 0.50, 0.5, 30.0),
        candidate("p4", 0.60, 0.5, 30.0),
    ];
    let placements = plan_label_footprints(&candidates, &profile);
    assert_no_overlaps(&placements);
}
