//! Visualizer settings.
//!
//! Settings are a flat key/value map. Session-wide defaults live in
//! [`VisualizerSettings`]; each circuit may carry a [`SettingsOverrides`]
//! whose present values win over the defaults.
//!
//! Settings files are YAML or JSON maps holding any subset of the keys:
//!
//! ```yaml
//! qubit_size: 2.0
//! heatmap_max_slices: 20
//! render_bloch_spheres: true
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

use crate::error::{VizError, VizResult};

/// Every recognized setting key.
pub const SETTING_KEYS: [&str; 19] = [
    // appearance
    "qubit_size",
    "connection_thickness",
    "inactive_alpha",
    "render_bloch_spheres",
    // layout
    "core_distance",
    "repel_force",
    "attract_force",
    "cooling_factor",
    "iterations",
    // heatmap
    "heatmap_max_slices",
    "heatmap_base_size",
    "heatmap_fade_threshold",
    "heatmap_green_threshold",
    "heatmap_yellow_threshold",
    "heatmap_intensity_power",
    "heatmap_min_intensity",
    "heatmap_border_width",
    // fidelity
    "one_qubit_fidelity_base",
    "two_qubit_fidelity_base",
];

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VisualizerSettings {
    /// Rendered qubit radius.
    #[serde(default = "default_qubit_size")]
    pub qubit_size: f64,
    /// Width of coupling edges.
    #[serde(default = "default_connection_thickness")]
    pub connection_thickness: f64,
    /// Opacity of qubits idle in the current slice.
    #[serde(default = "default_inactive_alpha")]
    pub inactive_alpha: f64,
    /// Draw Bloch spheres instead of plain qubits.
    #[serde(default)]
    pub render_bloch_spheres: bool,

    /// Spacing between cores of a modular device.
    #[serde(default = "default_core_distance")]
    pub core_distance: f64,
    /// Force-directed layout: repulsion strength.
    #[serde(default = "default_repel_force")]
    pub repel_force: f64,
    /// Force-directed layout: attraction along edges.
    #[serde(default = "default_attract_force")]
    pub attract_force: f64,
    /// Force-directed layout: per-iteration temperature decay.
    #[serde(default = "default_cooling_factor")]
    pub cooling_factor: f64,
    /// Force-directed layout: iteration count.
    #[serde(default = "default_iterations")]
    pub iterations: u32,

    /// Slices accumulated into the interaction heatmap.
    #[serde(default = "default_heatmap_max_slices")]
    pub heatmap_max_slices: u32,
    /// Heatmap point size.
    #[serde(default = "default_heatmap_base_size")]
    pub heatmap_base_size: f64,
    /// Intensity below which heatmap points fade out.
    #[serde(default = "default_heatmap_fade_threshold")]
    pub heatmap_fade_threshold: f64,
    /// Intensity where the colour ramp turns from green.
    #[serde(default = "default_heatmap_green_threshold")]
    pub heatmap_green_threshold: f64,
    /// Intensity where the colour ramp turns from yellow.
    #[serde(default = "default_heatmap_yellow_threshold")]
    pub heatmap_yellow_threshold: f64,
    /// Exponent applied to raw intensities.
    #[serde(default = "default_heatmap_intensity_power")]
    pub heatmap_intensity_power: f64,
    /// Floor for rendered intensities.
    #[serde(default = "default_heatmap_min_intensity")]
    pub heatmap_min_intensity: f64,
    /// Outline width of heatmap points.
    #[serde(default)]
    pub heatmap_border_width: f64,

    /// Base fidelity of a single-qubit gate.
    #[serde(default = "default_one_qubit_fidelity_base")]
    pub one_qubit_fidelity_base: f64,
    /// Base fidelity of a two-qubit gate.
    #[serde(default = "default_two_qubit_fidelity_base")]
    pub two_qubit_fidelity_base: f64,
}

fn default_qubit_size() -> f64 {
    1.5
}

fn default_connection_thickness() -> f64 {
    0.05
}

fn default_inactive_alpha() -> f64 {
    0.1
}

fn default_core_distance() -> f64 {
    50.0
}

fn default_repel_force() -> f64 {
    1.2
}

fn default_attract_force() -> f64 {
    0.05
}

fn default_cooling_factor() -> f64 {
    0.99
}

fn default_iterations() -> u32 {
    300
}

fn default_heatmap_max_slices() -> u32 {
    10
}

fn default_heatmap_base_size() -> f64 {
    1000.0
}

fn default_heatmap_fade_threshold() -> f64 {
    0.1
}

fn default_heatmap_green_threshold() -> f64 {
    0.3
}

fn default_heatmap_yellow_threshold() -> f64 {
    0.7
}

fn default_heatmap_intensity_power() -> f64 {
    0.3
}

fn default_heatmap_min_intensity() -> f64 {
    0.01
}

fn default_one_qubit_fidelity_base() -> f64 {
    0.99
}

fn default_two_qubit_fidelity_base() -> f64 {
    0.98
}

impl Default for VisualizerSettings {
    fn default() -> Self {
        VisualizerSettings {
            qubit_size: default_qubit_size(),
            connection_thickness: default_connection_thickness(),
            inactive_alpha: default_inactive_alpha(),
            render_bloch_spheres: false,
            core_distance: default_core_distance(),
            repel_force: default_repel_force(),
            attract_force: default_attract_force(),
            cooling_factor: default_cooling_factor(),
            iterations: default_iterations(),
            heatmap_max_slices: default_heatmap_max_slices(),
            heatmap_base_size: default_heatmap_base_size(),
            heatmap_fade_threshold: default_heatmap_fade_threshold(),
            heatmap_green_threshold: default_heatmap_green_threshold(),
            heatmap_yellow_threshold: default_heatmap_yellow_threshold(),
            heatmap_intensity_power: default_heatmap_intensity_power(),
            heatmap_min_intensity: default_heatmap_min_intensity(),
            heatmap_border_width: 0.0,
            one_qubit_fidelity_base: default_one_qubit_fidelity_base(),
            two_qubit_fidelity_base: default_two_qubit_fidelity_base(),
        }
    }
}

impl VisualizerSettings {
    /// Apply `overrides` on top of these settings. Present override values
    /// win; `self` is left untouched.
    #[must_use]
    pub fn merged(&self, overrides: &SettingsOverrides) -> Self {
        let o = overrides;
        VisualizerSettings {
            qubit_size: o.qubit_size.unwrap_or(self.qubit_size),
            connection_thickness: o.connection_thickness.unwrap_or(self.connection_thickness),
            inactive_alpha: o.inactive_alpha.unwrap_or(self.inactive_alpha),
            render_bloch_spheres: o.render_bloch_spheres.unwrap_or(self.render_bloch_spheres),
            core_distance: o.core_distance.unwrap_or(self.core_distance),
            repel_force: o.repel_force.unwrap_or(self.repel_force),
            attract_force: o.attract_force.unwrap_or(self.attract_force),
            cooling_factor: o.cooling_factor.unwrap_or(self.cooling_factor),
            iterations: o.iterations.unwrap_or(self.iterations),
            heatmap_max_slices: o.heatmap_max_slices.unwrap_or(self.heatmap_max_slices),
            heatmap_base_size: o.heatmap_base_size.unwrap_or(self.heatmap_base_size),
            heatmap_fade_threshold: o
                .heatmap_fade_threshold
                .unwrap_or(self.heatmap_fade_threshold),
            heatmap_green_threshold: o
                .heatmap_green_threshold
                .unwrap_or(self.heatmap_green_threshold),
            heatmap_yellow_threshold: o
                .heatmap_yellow_threshold
                .unwrap_or(self.heatmap_yellow_threshold),
            heatmap_intensity_power: o
                .heatmap_intensity_power
                .unwrap_or(self.heatmap_intensity_power),
            heatmap_min_intensity: o
                .heatmap_min_intensity
                .unwrap_or(self.heatmap_min_intensity),
            heatmap_border_width: o.heatmap_border_width.unwrap_or(self.heatmap_border_width),
            one_qubit_fidelity_base: o
                .one_qubit_fidelity_base
                .unwrap_or(self.one_qubit_fidelity_base),
            two_qubit_fidelity_base: o
                .two_qubit_fidelity_base
                .unwrap_or(self.two_qubit_fidelity_base),
        }
    }

    /// Merge and check in one step.
    pub fn resolve(&self, overrides: Option<&SettingsOverrides>) -> VizResult<Self> {
        let resolved = match overrides {
            Some(o) => self.merged(o),
            None => self.clone(),
        };
        resolved.validate()?;
        Ok(resolved)
    }

    /// Check that every numeric value can be written to JSON.
    ///
    /// Values are otherwise passed through to the front end unchanged; no
    /// ranges or relations between keys are enforced.
    pub fn validate(&self) -> VizResult<()> {
        let numbers = [
            ("qubit_size", self.qubit_size),
            ("connection_thickness", self.connection_thickness),
            ("inactive_alpha", self.inactive_alpha),
            ("core_distance", self.core_distance),
            ("repel_force", self.repel_force),
            ("attract_force", self.attract_force),
            ("cooling_factor", self.cooling_factor),
            ("heatmap_base_size", self.heatmap_base_size),
            ("heatmap_fade_threshold", self.heatmap_fade_threshold),
            ("heatmap_green_threshold", self.heatmap_green_threshold),
            ("heatmap_yellow_threshold", self.heatmap_yellow_threshold),
            ("heatmap_intensity_power", self.heatmap_intensity_power),
            ("heatmap_min_intensity", self.heatmap_min_intensity),
            ("heatmap_border_width", self.heatmap_border_width),
            ("one_qubit_fidelity_base", self.one_qubit_fidelity_base),
            ("two_qubit_fidelity_base", self.two_qubit_fidelity_base),
        ];
        for (key, value) in numbers {
            if !value.is_finite() {
                return Err(VizError::invalid(key, format!("must be finite, got {value}")));
            }
        }
        Ok(())
    }

    /// Defaults overridden by a settings file.
    ///
    /// `.yaml`/`.yml` files are read as YAML, anything else as JSON.
    pub fn from_path(path: impl AsRef<Path>) -> VizResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));
        if is_yaml {
            Self::from_yaml_str(&source)
        } else {
            Self::from_json_str(&source)
        }
    }

    /// Defaults overridden by a YAML map.
    pub fn from_yaml_str(yaml: &str) -> VizResult<Self> {
        let value: Value = serde_yaml_ng::from_str(yaml)?;
        Self::from_value(&value)
    }

    /// Defaults overridden by a JSON object.
    pub fn from_json_str(json: &str) -> VizResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    fn from_value(value: &Value) -> VizResult<Self> {
        let overrides = match value {
            // `~` or an empty YAML document
            Value::Null => SettingsOverrides::default(),
            Value::Object(map) => SettingsOverrides::from_map(map)?,
            other => {
                return Err(VizError::invalid(
                    "<root>",
                    format!("expected a map of settings, got {other}"),
                ));
            }
        };
        Self::default().resolve(Some(&overrides))
    }
}

/// Per-circuit settings; absent values fall back to the session defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qubit_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_thickness: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inactive_alpha: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render_bloch_spheres: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub core_distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repel_force: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attract_force: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooling_factor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iterations: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heatmap_max_slices: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heatmap_base_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heatmap_fade_threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heatmap_green_threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heatmap_yellow_threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heatmap_intensity_power: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heatmap_min_intensity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heatmap_border_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_qubit_fidelity_base: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub two_qubit_fidelity_base: Option<f64>,
}

fn as_f64(key: &str, value: &Value) -> VizResult<f64> {
    value
        .as_f64()
        .ok_or_else(|| VizError::invalid(key, format!("expected a number, got {value}")))
}

fn as_u32(key: &str, value: &Value) -> VizResult<u32> {
    value
        .as_u64()
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| {
            VizError::invalid(key, format!("expected a non-negative integer, got {value}"))
        })
}

fn as_bool(key: &str, value: &Value) -> VizResult<bool> {
    value
        .as_bool()
        .ok_or_else(|| VizError::invalid(key, format!("expected true or false, got {value}")))
}

impl SettingsOverrides {
    /// Build overrides from a flat key/value map.
    ///
    /// Unknown keys fail with [`VizError::UnknownSetting`], mistyped values
    /// with [`VizError::InvalidSetting`].
    pub fn from_map(map: &Map<String, Value>) -> VizResult<Self> {
        let mut o = SettingsOverrides::default();
        for (key, value) in map {
            let k = key.as_str();
            match k {
                "qubit_size" => o.qubit_size = Some(as_f64(k, value)?),
                "connection_thickness" => o.connection_thickness = Some(as_f64(k, value)?),
                "inactive_alpha" => o.inactive_alpha = Some(as_f64(k, value)?),
                "render_bloch_spheres" => o.render_bloch_spheres = Some(as_bool(k, value)?),
                "core_distance" => o.core_distance = Some(as_f64(k, value)?),
                "repel_force" => o.repel_force = Some(as_f64(k, value)?),
                "attract_force" => o.attract_force = Some(as_f64(k, value)?),
                "cooling_factor" => o.cooling_factor = Some(as_f64(k, value)?),
                "iterations" => o.iterations = Some(as_u32(k, value)?),
                "heatmap_max_slices" => o.heatmap_max_slices = Some(as_u32(k, value)?),
                "heatmap_base_size" => o.heatmap_base_size = Some(as_f64(k, value)?),
                "heatmap_fade_threshold" => o.heatmap_fade_threshold = Some(as_f64(k, value)?),
                "heatmap_green_threshold" => o.heatmap_green_threshold = Some(as_f64(k, value)?),
                "heatmap_yellow_threshold" => {
                    o.heatmap_yellow_threshold = Some(as_f64(k, value)?);
                }
                "heatmap_intensity_power" => o.heatmap_intensity_power = Some(as_f64(k, value)?),
                "heatmap_min_intensity" => o.heatmap_min_intensity = Some(as_f64(k, value)?),
                "heatmap_border_width" => o.heatmap_border_width = Some(as_f64(k, value)?),
                "one_qubit_fidelity_base" => o.one_qubit_fidelity_base = Some(as_f64(k, value)?),
                "two_qubit_fidelity_base" => o.two_qubit_fidelity_base = Some(as_f64(k, value)?),
                _ => return Err(VizError::UnknownSetting(key.clone())),
            }
        }
        Ok(o)
    }

    /// Build overrides from `key=value` pairs; values are parsed as JSON
    /// scalars (`2.5`, `true`, `40`).
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> VizResult<Self> {
        let mut map = Map::new();
        for (key, raw) in pairs {
            let value = serde_json::from_str(raw.trim())
                .map_err(|_| VizError::invalid(key, format!("cannot parse '{raw}'")))?;
            map.insert(key.to_string(), value);
        }
        Self::from_map(&map)
    }

    /// Whether no value is overridden.
    pub fn is_empty(&self) -> bool {
        *self == SettingsOverrides::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_defaults_match_documented_values() {
        let s = VisualizerSettings::default();
        assert_eq!(s.qubit_size, 1.5);
        assert_eq!(s.iterations, 300);
        assert_eq!(s.heatmap_max_slices, 10);
        assert_eq!(s.heatmap_base_size, 1000.0);
        assert_eq!(s.two_qubit_fidelity_base, 0.98);
        assert!(!s.render_bloch_spheres);
        s.validate().unwrap();
    }

    #[test]
    fn test_default_serializes_every_key() {
        let value = serde_json::to_value(VisualizerSettings::default()).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), SETTING_KEYS.len());
        for key in SETTING_KEYS {
            assert!(obj.contains_key(key), "missing {key}");
        }
    }

    #[test]
    fn test_override_wins_and_defaults_fill_rest() {
        let overrides =
            SettingsOverrides::from_map(&map(json!({"qubit_size": 3.0, "iterations": 50})))
                .unwrap();
        let defaults = VisualizerSettings::default();
        let merged = defaults.merged(&overrides);

        assert_eq!(merged.qubit_size, 3.0);
        assert_eq!(merged.iterations, 50);
        assert_eq!(merged.repel_force, defaults.repel_force);
        // defaults untouched
        assert_eq!(defaults.qubit_size, 1.5);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = SettingsOverrides::from_map(&map(json!({"qubit_colour": "red"}))).unwrap_err();
        assert!(matches!(err, VizError::UnknownSetting(ref k) if k == "qubit_colour"));
    }

    #[test]
    fn test_wrong_type_rejected() {
        let err = SettingsOverrides::from_map(&map(json!({"iterations": 2.5}))).unwrap_err();
        assert!(matches!(err, VizError::InvalidSetting { ref key, .. } if key == "iterations"));

        let err =
            SettingsOverrides::from_map(&map(json!({"render_bloch_spheres": 1}))).unwrap_err();
        assert!(matches!(err, VizError::InvalidSetting { .. }));
    }

    #[test]
    fn test_every_known_key_accepted() {
        let mut m = Map::new();
        for key in SETTING_KEYS {
            let value = match key {
                "render_bloch_spheres" => json!(true),
                "iterations" | "heatmap_max_slices" => json!(5),
                _ => json!(0.5),
            };
            m.insert(key.to_string(), value);
        }
        let overrides = SettingsOverrides::from_map(&m).unwrap();
        assert!(!overrides.is_empty());
        assert_eq!(serde_json::to_value(&overrides).unwrap().as_object().unwrap().len(), 19);
    }

    #[test]
    fn test_resolve_passes_values_through() {
        let defaults = VisualizerSettings::default();

        // yellow below the default green threshold
        let yellow = SettingsOverrides::from_map(&map(json!({"heatmap_yellow_threshold": 0.25})))
            .unwrap();
        let resolved = defaults.resolve(Some(&yellow)).unwrap();
        assert_eq!(resolved.heatmap_yellow_threshold, 0.25);
        assert_eq!(resolved.heatmap_green_threshold, 0.3);

        let outside = SettingsOverrides {
            cooling_factor: Some(1.01),
            inactive_alpha: Some(1.5),
            heatmap_max_slices: Some(0),
            ..Default::default()
        };
        let resolved = defaults.resolve(Some(&outside)).unwrap();
        assert_eq!(resolved.cooling_factor, 1.01);
        assert_eq!(resolved.inactive_alpha, 1.5);
        assert_eq!(resolved.heatmap_max_slices, 0);

        assert_eq!(defaults.resolve(None).unwrap(), defaults);
    }

    #[test]
    fn test_resolve_rejects_non_finite() {
        let bad = SettingsOverrides {
            qubit_size: Some(f64::NAN),
            ..Default::default()
        };
        assert!(matches!(
            VisualizerSettings::default().resolve(Some(&bad)),
            Err(VizError::InvalidSetting { ref key, .. }) if key == "qubit_size"
        ));
    }

    #[test]
    fn test_from_pairs() {
        let overrides =
            SettingsOverrides::from_pairs([("qubit_size", "2.5"), ("render_bloch_spheres", "true")])
                .unwrap();
        assert_eq!(overrides.qubit_size, Some(2.5));
        assert_eq!(overrides.render_bloch_spheres, Some(true));

        assert!(SettingsOverrides::from_pairs([("qubit_size", "big")]).is_err());
    }

    #[test]
    fn test_yaml_and_json_files() {
        let yaml = "qubit_size: 2.0\nheatmap_max_slices: 20\n";
        let s = VisualizerSettings::from_yaml_str(yaml).unwrap();
        assert_eq!(s.qubit_size, 2.0);
        assert_eq!(s.heatmap_max_slices, 20);

        let s = VisualizerSettings::from_json_str(r#"{"cooling_factor": 0.9}"#).unwrap();
        assert_eq!(s.cooling_factor, 0.9);

        assert_eq!(
            VisualizerSettings::from_yaml_str("~\n").unwrap(),
            VisualizerSettings::default()
        );
        assert!(matches!(
            VisualizerSettings::from_yaml_str("bogus: 1\n"),
            Err(VizError::UnknownSetting(_))
        ));
        assert!(VisualizerSettings::from_yaml_str("- 1\n- 2\n").is_err());
    }

    #[test]
    fn test_from_path_picks_format_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = dir.path().join("settings.yml");
        std::fs::write(&yaml, "repel_force: 2.0\n").unwrap();
        assert_eq!(VisualizerSettings::from_path(&yaml).unwrap().repel_force, 2.0);

        let json = dir.path().join("settings.json");
        std::fs::write(&json, r#"{"attract_force": 0.1}"#).unwrap();
        assert_eq!(VisualizerSettings::from_path(&json).unwrap().attract_force, 0.1);
    }
}
