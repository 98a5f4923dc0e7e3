use crate::error::{Error, Result};
use crate::ir::Scene;
use crate::log::warn;
use std::collections::HashSet;

/// Parse a scene document.
///
/// Strict JSON is tried first and JSON5 (comments, trailing commas, bare
/// keys) second. Token ids must be non-empty and unique; coordinates outside
/// the chart are accepted and clamped when converted to positions.
pub fn parse_scene(input: &str) -> Result<Scene> {
    let scene = match serde_json::from_str::<Scene>(input) {
        Ok(scene) => scene,
        Err(json_err) => json5::from_str::<Scene>(input).map_err(|json5_err| {
            Error::SceneParse(format!("{json_err}; as JSON5: {json5_err}"))
        })?,
    };
    validate_scene(&scene)?;
    Ok(scene)
}

fn validate_scene(scene: &Scene) -> Result<()> {
    if scene.tokens.is_empty() {
        return Err(Error::EmptyScene);
    }
    let mut seen = HashSet::new();
    for (index, token) in scene.tokens.iter().enumerate() {
        let invalid = |reason: &str| Error::InvalidToken {
            index,
            id: token.id.clone(),
            reason: reason.to_string(),
        };
        if token.id.trim().is_empty() {
            return Err(invalid("id must not be empty"));
        }
        if !seen.insert(token.id.as_str()) {
            return Err(invalid("duplicate id"));
        }
        if !token.x.is_finite() || !token.y.is_finite() {
            return Err(invalid("coordinates must be finite"));
        }
        if token.label_width.is_some_and(|width| !width.is_finite()) {
            return Err(invalid("label width must be finite"));
        }
        if !(0.0..=1.0).contains(&token.x) || !(0.0..=1.0).contains(&token.y) {
            warn!(
                id = %token.id,
                x = token.x,
                y = token.y,
                "token outside the chart, clamping"
            );
        }
    }
    Ok(())
}
