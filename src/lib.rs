#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod ir;
pub mod layout;
pub mod layout_dump;
mod log;
pub mod parser;
pub mod profile;
pub mod transform;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, PlannerConfig, ProfileConfig, load_config};
pub use error::Error;
pub use ir::{AnchorAssignment, AnchorDirection, LabelCandidate, PixelRect, Position, Scene};
pub use layout::{
    Footprint, LabelPlacement, plan_label_anchors, plan_label_anchors_with, plan_label_footprints,
};
pub use parser::parse_scene;
pub use profile::{BasePixelConstants, ProfileKind, SizeProfile, to_normalized_sizes};
pub use transform::{
    PercentOffset, is_within_graph, normalized_to_percent, normalized_to_pixel, percent_to_pixel,
    pixel_to_normalized,
};
