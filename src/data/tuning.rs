use bevy::prelude::*;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static EMBEDDED: Lazy<VisualTuning> =
    Lazy::new(|| VisualTuning::from_json(include_str!("./content/tuning.json")));

/// Tunable parameters for the two canvas effects, parsed once from the
/// embedded JSON. Anything missing or malformed falls back to the compiled
/// defaults rather than aborting.
#[derive(Resource, Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualTuning {
    pub field: FieldTuning,
    pub halo: HaloTuning,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldTuning {
    pub particles: usize,
    pub drift: f32,
    pub connection_distance: f32,
    pub connection_alpha: f32,
    pub attraction_radius: f32,
    pub attraction_strength: f32,
    pub attraction_damping: f32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct HaloTuning {
    pub orbiters: usize,
    pub radius_min: f32,
    pub radius_span: f32,
    pub pulse_cadence: u64,
    pub pulse_radius: f32,
    pub pulse_opacity: f32,
    pub pulse_growth: f32,
    pub pulse_decay: f32,
}

impl VisualTuning {
    pub fn embedded() -> Self {
        EMBEDDED.clone()
    }

    pub fn from_json(json: &str) -> Self {
        serde_json::from_str(json).unwrap_or_else(|err| {
            warn!("Failed to parse visual tuning JSON, using defaults: {}", err);
            VisualTuning::default()
        })
    }
}

impl Default for VisualTuning {
    fn default() -> Self {
        Self {
            field: FieldTuning::default(),
            halo: HaloTuning::default(),
        }
    }
}

impl Default for FieldTuning {
    fn default() -> Self {
        Self {
            particles: 50,
            drift: 0.4,
            connection_distance: 160.0,
            connection_alpha: 0.05,
            attraction_radius: 180.0,
            attraction_strength: 1.0e-4,
            attraction_damping: 0.99,
        }
    }
}

impl Default for HaloTuning {
    fn default() -> Self {
        Self {
            orbiters: 24,
            radius_min: 140.0,
            radius_span: 50.0,
            pulse_cadence: 90,
            pulse_radius: 125.0,
            pulse_opacity: 0.25,
            pulse_growth: 0.5,
            pulse_decay: 0.003,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_tuning_parses() {
        let tuning = VisualTuning::embedded();
        assert_eq!(tuning.field.particles, 50);
        assert_eq!(tuning.halo.pulse_cadence, 90);
    }

    #[test]
    fn malformed_json_falls_back_to_defaults() {
        let tuning = VisualTuning::from_json("{ not json");
        assert_eq!(tuning.field.particles, FieldTuning::default().particles);
    }

    #[test]
    fn partial_json_keeps_defaults_for_missing_fields() {
        let tuning = VisualTuning::from_json(r#"{ "field": { "particles": 12 } }"#);
        assert_eq!(tuning.field.particles, 12);
        assert_eq!(tuning.field.connection_distance, 160.0);
        assert_eq!(tuning.halo.orbiters, 24);
    }
}
