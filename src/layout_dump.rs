use crate::layout::{Footprint, LabelPlacement};
use crate::profile::{ProfileKind, SizeProfile};
use crate::transform::normalized_to_percent;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementDump {
    pub chart_width: f32,
    pub chart_height: f32,
    pub profile: ProfileKind,
    pub size_profile: SizeProfile,
    pub tokens: Vec<TokenDump>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenDump {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub anchor: String,
    /// CSS `left` offset of the token, e.g. `"12.5%"`.
    pub left: String,
    /// CSS `top` offset of the token.
    pub top: String,
    pub footprint: Footprint,
    pub penalty: f32,
}

impl PlacementDump {
    pub fn from_placements(
        placements: &[LabelPlacement],
        chart_width: f32,
        chart_height: f32,
        profile: ProfileKind,
        size_profile: SizeProfile,
    ) -> Self {
        let tokens = placements
            .iter()
            .map(|placement| {
                let offset = normalized_to_percent(placement.position);
                TokenDump {
                    id: placement.id.clone(),
                    x: placement.position.x(),
                    y: placement.position.y(),
                    anchor: placement.anchor.to_string(),
                    left: offset.left_css(),
                    top: offset.top_css(),
                    footprint: placement.footprint,
                    penalty: placement.penalty,
                }
            })
            .collect();

        PlacementDump {
            chart_width,
            chart_height,
            profile,
            size_profile,
            tokens,
        }
    }
}

pub fn write_placement_dump<W: Write>(writer: W, dump: &PlacementDump) -> anyhow::Result<()> {
    let mut writer = writer;
    serde_json::to_writer_pretty(&mut writer, dump)?;
    writeln!(writer)?;
    Ok(())
}
