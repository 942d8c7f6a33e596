use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Tree-wide chart configuration, fixed for the lifetime of a context.
///
/// Serializable so host applications can persist/load chart setup without
/// inventing their own format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    #[serde(default = "default_animate")]
    pub animate: bool,
    #[serde(default = "default_animation_duration_ms")]
    pub animation_duration_ms: u32,
    #[serde(default = "default_border_radius")]
    pub border_radius: IndexMap<String, f64>,
    #[serde(default = "default_spacing")]
    pub spacing: IndexMap<String, f64>,
    #[serde(default = "default_shadows")]
    pub shadows: IndexMap<String, String>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            animate: default_animate(),
            animation_duration_ms: default_animation_duration_ms(),
            border_radius: default_border_radius(),
            spacing: default_spacing(),
            shadows: default_shadows(),
        }
    }
}

impl ChartConfig {
    #[must_use]
    pub fn with_animate(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }

    #[must_use]
    pub fn with_animation_duration_ms(mut self, duration_ms: u32) -> Self {
        self.animation_duration_ms = duration_ms;
        self
    }

    #[must_use]
    pub fn with_border_radius(mut self, size: impl Into<String>, radius_px: f64) -> Self {
        self.border_radius.insert(size.into(), radius_px);
        self
    }

    #[must_use]
    pub fn with_spacing(mut self, size: impl Into<String>, spacing_px: f64) -> Self {
        self.spacing.insert(size.into(), spacing_px);
        self
    }

    #[must_use]
    pub fn with_shadow(mut self, size: impl Into<String>, shadow: impl Into<String>) -> Self {
        self.shadows.insert(size.into(), shadow.into());
        self
    }

    /// Radius for a named size, `0` when the size is not configured.
    #[must_use]
    pub fn radius(&self, size: &str) -> f64 {
        self.border_radius.get(size).copied().unwrap_or(0.0)
    }

    pub fn validate(&self) -> ChartResult<()> {
        for (name, value) in self.border_radius.iter().chain(self.spacing.iter()) {
            if !value.is_finite() || *value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "size `{name}` must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    /// Deserializes and validates config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

fn default_animate() -> bool {
    true
}

fn default_animation_duration_ms() -> u32 {
    400
}

fn default_border_radius() -> IndexMap<String, f64> {
    [("xs", 2.0), ("s", 4.0), ("m", 6.0), ("l", 8.0), ("xl", 12.0)]
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v))
        .collect()
}

fn default_spacing() -> IndexMap<String, f64> {
    [("xs", 4.0), ("s", 8.0), ("m", 12.0), ("l", 16.0), ("xl", 24.0)]
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v))
        .collect()
}

fn default_shadows() -> IndexMap<String, String> {
    [
        ("s", "0 1px 2px rgba(0, 0, 0, 0.05)"),
        ("m", "0 4px 6px rgba(0, 0, 0, 0.1)"),
        ("l", "0 10px 15px rgba(0, 0, 0, 0.1)"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_owned(), v.to_owned()))
    .collect()
}
