use serde::{Deserialize, Serialize};

use crate::error::DealError;
use crate::scoring::ScoringWeights;

const BALANCED_JSON: &str = include_str!("../../../../presets/balanced.json");
const MARGIN_FIRST_JSON: &str = include_str!("../../../../presets/margin-first.json");
const TRAFFIC_JSON: &str = include_str!("../../../../presets/traffic.json");

/// Available built-in weight presets. The first is the default.
pub const PRESETS: &[&str] = &["balanced", "margin-first", "traffic"];

/// A named weight set shipped with the crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightPreset {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub weights: ScoringWeights,
}

/// Load a built-in preset by name.
pub fn load_preset(name: &str) -> Result<WeightPreset, DealError> {
    let json = match name {
        "balanced" => BALANCED_JSON,
        "margin-first" => MARGIN_FIRST_JSON,
        "traffic" => TRAFFIC_JSON,
        _ => {
            return Err(DealError::UnknownPreset {
                name: name.to_string(),
                available: PRESETS.join(", "),
            })
        }
    };
    let preset: WeightPreset = serde_json::from_str(json)?;
    preset.weights.validate()?;
    Ok(preset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_presets_load_and_validate() {
        for name in PRESETS {
            let preset = load_preset(name).unwrap();
            assert_eq!(preset.name, *name);
            assert!(!preset.description.is_empty());
        }
    }

    #[test]
    fn test_balanced_matches_default_weights() {
        assert_eq!(load_preset("balanced").unwrap().weights, ScoringWeights::default());
    }

    #[test]
    fn test_margin_first_weights_margin_highest() {
        let w = load_preset("margin-first").unwrap().weights;
        assert_eq!(w.margin, 0.40);
    }

    #[test]
    fn test_unknown_preset() {
        let err = load_preset("xyz").unwrap_err();
        assert!(err.to_string().contains("balanced, margin-first, traffic"));
    }
}
