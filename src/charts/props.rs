use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::{ChartLayout, DataRecord, Viewport, value_as_f64};
use crate::error::{ChartError, ChartResult};
use crate::shared::{MarginOptions, ValueFormatter};

/// One data series. `key` is its identity and must be unique per chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesConfig {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl SeriesConfig {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: None,
            color: None,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Legend and tooltip label.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.key)
    }
}

/// Props surface shared by every leaf chart.
#[derive(Clone)]
pub struct ChartProps {
    pub data: Vec<DataRecord>,
    /// Category (or numeric X for scatter) field.
    pub x_key: String,
    pub series: Vec<SeriesConfig>,
    /// Replaces the context palette when set.
    pub colors: Option<Vec<String>>,
    pub show_grid: bool,
    pub show_legend: bool,
    pub show_tooltip: bool,
    pub show_x_axis: bool,
    pub show_y_axis: bool,
    pub x_axis_formatter: Option<ValueFormatter>,
    pub y_axis_formatter: Option<ValueFormatter>,
    pub tooltip_formatter: Option<ValueFormatter>,
    /// Falls back to the context config when unset.
    pub animate: Option<bool>,
    pub animation_duration_ms: Option<u32>,
    pub class_name: Option<String>,
    pub aria_label: Option<String>,
    pub viewport: Viewport,
    pub layout: ChartLayout,
    /// Explicit per-side margin overrides; layout flags are derived per chart.
    pub margin: MarginOptions,
    /// Series plotted against the secondary axis on the right.
    pub right_axis_keys: IndexSet<String>,
    pub reference_values: Vec<f64>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub max_tick_chars: Option<usize>,
}

impl std::fmt::Debug for ChartProps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartProps")
            .field("data_len", &self.data.len())
            .field("x_key", &self.x_key)
            .field("series", &self.series)
            .field("colors", &self.colors)
            .field("show_grid", &self.show_grid)
            .field("show_legend", &self.show_legend)
            .field("show_tooltip", &self.show_tooltip)
            .field("viewport", &self.viewport)
            .field("layout", &self.layout)
            .field("right_axis_keys", &self.right_axis_keys)
            .finish_non_exhaustive()
    }
}

impl Default for ChartProps {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            x_key: "name".to_owned(),
            series: Vec::new(),
            colors: None,
            show_grid: true,
            show_legend: true,
            show_tooltip: true,
            show_x_axis: true,
            show_y_axis: true,
            x_axis_formatter: None,
            y_axis_formatter: None,
            tooltip_formatter: None,
            animate: None,
            animation_duration_ms: None,
            class_name: None,
            aria_label: None,
            viewport: Viewport::default(),
            layout: ChartLayout::Horizontal,
            margin: MarginOptions::default(),
            right_axis_keys: IndexSet::new(),
            reference_values: Vec::new(),
            x_label: None,
            y_label: None,
            max_tick_chars: None,
        }
    }
}

impl ChartProps {
    #[must_use]
    pub fn new(data: Vec<DataRecord>, x_key: impl Into<String>) -> Self {
        Self {
            data,
            x_key: x_key.into(),
            ..Self::default()
        }
    }

    /// Parses `data` from a JSON array of objects.
    pub fn from_json_data(input: &str, x_key: impl Into<String>) -> ChartResult<Self> {
        let data: Vec<DataRecord> = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse chart data: {e}")))?;
        Ok(Self::new(data, x_key))
    }

    #[must_use]
    pub fn with_series(mut self, series: SeriesConfig) -> Self {
        self.series.push(series);
        self
    }

    #[must_use]
    pub fn with_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.colors = Some(colors.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_grid(mut self, show: bool) -> Self {
        self.show_grid = show;
        self
    }

    #[must_use]
    pub fn with_legend(mut self, show: bool) -> Self {
        self.show_legend = show;
        self
    }

    #[must_use]
    pub fn with_tooltip(mut self, show: bool) -> Self {
        self.show_tooltip = show;
        self
    }

    #[must_use]
    pub fn with_axes(mut self, show_x: bool, show_y: bool) -> Self {
        self.show_x_axis = show_x;
        self.show_y_axis = show_y;
        self
    }

    #[must_use]
    pub fn with_x_axis_formatter(
        mut self,
        formatter: impl Fn(&Value) -> String + Send + Sync + 'static,
    ) -> Self {
        self.x_axis_formatter = Some(Arc::new(formatter));
        self
    }

    #[must_use]
    pub fn with_y_axis_formatter(
        mut self,
        formatter: impl Fn(&Value) -> String + Send + Sync + 'static,
    ) -> Self {
        self.y_axis_formatter = Some(Arc::new(formatter));
        self
    }

    #[must_use]
    pub fn with_tooltip_formatter(
        mut self,
        formatter: impl Fn(&Value) -> String + Send + Sync + 'static,
    ) -> Self {
        self.tooltip_formatter = Some(Arc::new(formatter));
        self
    }

    #[must_use]
    pub fn with_animation(mut self, animate: bool, duration_ms: Option<u32>) -> Self {
        self.animate = Some(animate);
        self.animation_duration_ms = duration_ms;
        self
    }

    #[must_use]
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    #[must_use]
    pub fn with_aria_label(mut self, aria_label: impl Into<String>) -> Self {
        self.aria_label = Some(aria_label.into());
        self
    }

    #[must_use]
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    #[must_use]
    pub fn with_layout(mut self, layout: ChartLayout) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_margin(mut self, margin: MarginOptions) -> Self {
        self.margin = margin;
        self
    }

    #[must_use]
    pub fn with_right_axis_key(mut self, key: impl Into<String>) -> Self {
        self.right_axis_keys.insert(key.into());
        self
    }

    #[must_use]
    pub fn with_reference_value(mut self, value: f64) -> Self {
        self.reference_values.push(value);
        self
    }

    #[must_use]
    pub fn with_axis_labels(mut self, x_label: Option<String>, y_label: Option<String>) -> Self {
        self.x_label = x_label;
        self.y_label = y_label;
        self
    }

    #[must_use]
    pub fn with_max_tick_chars(mut self, max_chars: usize) -> Self {
        self.max_tick_chars = Some(max_chars);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        let mut seen = IndexSet::with_capacity(self.series.len());
        for series in &self.series {
            if !seen.insert(series.key.as_str()) {
                return Err(ChartError::DuplicateSeriesKey(series.key.clone()));
            }
        }
        if self.reference_values.iter().any(|v| !v.is_finite()) {
            return Err(ChartError::InvalidData(
                "reference values must be finite".to_owned(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn series_keys(&self) -> Vec<String> {
        self.series.iter().map(|s| s.key.clone()).collect()
    }

    /// Display names for series that set one.
    #[must_use]
    pub fn series_names(&self) -> IndexMap<String, String> {
        self.series
            .iter()
            .filter_map(|s| s.name.clone().map(|name| (s.key.clone(), name)))
            .collect()
    }

    #[must_use]
    pub fn has_axis_labels(&self) -> bool {
        self.x_label.is_some() || self.y_label.is_some()
    }

    /// Numeric value of `key` in row `index`.
    #[must_use]
    pub fn value(&self, index: usize, key: &str) -> Option<f64> {
        self.data.get(index)?.get(key).and_then(value_as_f64)
    }

    /// Raw category field of row `index` (`Null` when absent).
    #[must_use]
    pub fn category(&self, index: usize) -> Value {
        self.data
            .get(index)
            .and_then(|row| row.get(&self.x_key))
            .cloned()
            .unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_series_keys_are_rejected() {
        let props = ChartProps::default()
            .with_series(SeriesConfig::new("a"))
            .with_series(SeriesConfig::new("a"));
        assert!(matches!(
            props.validate(),
            Err(ChartError::DuplicateSeriesKey(key)) if key == "a"
        ));
    }

    #[test]
    fn data_parses_from_json_rows() {
        let props = ChartProps::from_json_data(r#"[{"name":"Jan","v":"4"},{"name":"Feb"}]"#, "name")
            .expect("rows parse");
        assert_eq!(props.value(0, "v"), Some(4.0));
        assert_eq!(props.value(1, "v"), None);
        assert_eq!(props.category(1), Value::from("Feb"));
    }
}
