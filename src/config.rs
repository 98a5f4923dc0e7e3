use crate::profile::{BasePixelConstants, ProfileKind};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Scoring weights of the label anchor planner.
///
/// Penalties are measured relative to the candidate label's own footprint
/// area, so an overlap of `1.0` means "fully covered".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerConfig {
    /// Flat penalty for any footprint that leaves the chart.
    pub outside_penalty: f32,
    /// Additional penalty per unit of footprint area outside the chart.
    pub outside_weight: f32,
    pub label_overlap_weight: f32,
    pub dot_overlap_weight: f32,
    /// Penalties closer than this are treated as equal and fall back to
    /// anchor priority.
    pub tie_epsilon: f32,
    /// Cell size of the obstacle grid, in normalized units.
    pub grid_cell: f32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            outside_penalty: 10.0,
            outside_weight: 4.0,
            label_overlap_weight: 1.0,
            dot_overlap_weight: 1.6,
            tie_epsilon: 1e-6,
            grid_cell: 0.1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileConfig {
    pub compact: BasePixelConstants,
    pub desktop: BasePixelConstants,
    /// Widest chart, in pixels, that still uses the compact constants.
    pub compact_max_width: f32,
}

impl ProfileConfig {
    pub fn constants(&self, kind: ProfileKind) -> BasePixelConstants {
        match kind {
            ProfileKind::Compact => self.compact,
            ProfileKind::Desktop => self.desktop,
        }
    }

    pub fn kind_for_width(&self, width_px: f32) -> ProfileKind {
        ProfileKind::for_container(width_px, self.compact_max_width)
    }
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            compact: BasePixelConstants::compact(),
            desktop: BasePixelConstants::desktop(),
            compact_max_width: 480.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub planner: PlannerConfig,
    pub profiles: ProfileConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    planner: Option<PlannerConfigFile>,
    profiles: Option<ProfileConfigFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlannerConfigFile {
    outside_penalty: Option<f32>,
    outside_weight: Option<f32>,
    label_overlap_weight: Option<f32>,
    dot_overlap_weight: Option<f32>,
    tie_epsilon: Option<f32>,
    grid_cell: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileConfigFile {
    compact: Option<BaseConstantsFile>,
    desktop: Option<BaseConstantsFile>,
    compact_max_width: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BaseConstantsFile {
    dot_diameter: Option<f32>,
    label_char_width: Option<f32>,
    label_pad_width: Option<f32>,
    label_height: Option<f32>,
}

impl BaseConstantsFile {
    fn apply(self, target: &mut BasePixelConstants) {
        if let Some(v) = self.dot_diameter {
            target.dot_diameter = v;
        }
        if let Some(v) = self.label_char_width {
            target.label_char_width = v;
        }
        if let Some(v) = self.label_pad_width {
            target.label_pad_width = v;
        }
        if let Some(v) = self.label_height {
            target.label_height = v;
        }
    }
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Apply a JSON override document on top of the defaults. Every field is
/// optional.
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = serde_json::from_str(contents)?;

    if let Some(planner) = parsed.planner {
        if let Some(v) = planner.outside_penalty {
            config.planner.outside_penalty = v;
        }
        if let Some(v) = planner.outside_weight {
            config.planner.outside_weight = v;
        }
        if let Some(v) = planner.label_overlap_weight {
            config.planner.label_overlap_weight = v;
        }
        if let Some(v) = planner.dot_overlap_weight {
            config.planner.dot_overlap_weight = v;
        }
        if let Some(v) = planner.tie_epsilon {
            config.planner.tie_epsilon = v.max(0.0);
        }
        if let Some(v) = planner.grid_cell {
            config.planner.grid_cell = v;
        }
    }

    if let Some(profiles) = parsed.profiles {
        if let Some(compact) = profiles.compact {
            compact.apply(&mut config.profiles.compact);
        }
        if let Some(desktop) = profiles.desktop {
            desktop.apply(&mut config.profiles.desktop);
        }
        if let Some(v) = profiles.compact_max_width {
            config.profiles.compact_max_width = v;
        }
    }

    Ok(config)
}
