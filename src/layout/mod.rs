mod footprint;
pub(crate) mod label_placement;

pub use footprint::{CHART_EDGE_EPS, Footprint, label_footprint};
pub use label_placement::{
    LabelPlacement, plan_label_anchors, plan_label_anchors_with, plan_label_footprints,
    plan_label_footprints_with,
};
