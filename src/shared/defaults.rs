use serde::{Deserialize, Serialize};

use crate::core::Margins;

pub const DEFAULT_TICK_FONT_SIZE: f64 = 12.0;
pub const DEFAULT_TICK_MAX_CHARS: usize = 12;
pub const DEFAULT_TICK_COUNT: usize = 5;
pub const TICK_SIZE: f64 = 6.0;
/// Rough glyph advance used for label layout without a text shaper.
pub const LABEL_CHAR_WIDTH: f64 = 7.0;

pub const GRID_DASH: (f64, f64) = (3.0, 3.0);

pub const DIMMED_OPACITY: f64 = 0.25;
pub const INACTIVE_LEGEND_OPACITY: f64 = 0.5;
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;
pub const ACTIVE_STROKE_WIDTH: f64 = 3.0;
pub const DEFAULT_DOT_RADIUS: f64 = 3.0;
pub const ACTIVE_DOT_RADIUS: f64 = 5.0;
pub const AREA_FILL_OPACITY: f64 = 0.3;
pub const ACTIVE_SECTOR_OFFSET: f64 = 6.0;

/// Gutter reserved for a vertical axis, inside the margins.
pub const Y_AXIS_WIDTH: f64 = 60.0;
/// Gutter reserved for a horizontal axis, inside the margins.
pub const X_AXIS_HEIGHT: f64 = 30.0;

pub const MARGIN_TOP: f64 = 10.0;
pub const MARGIN_SIDE: f64 = 10.0;
pub const MARGIN_DUAL_AXIS_RIGHT: f64 = 40.0;
pub const MARGIN_HORIZONTAL_LEFT: f64 = 80.0;
pub const MARGIN_AXIS_LABEL_LEFT: f64 = 60.0;
pub const MARGIN_AXIS_LABEL_BOTTOM: f64 = 40.0;
pub const MARGIN_LEGEND_BOTTOM: f64 = 30.0;

/// Tick label styling shared by every axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickStyle {
    pub font_size: f64,
    pub fill: String,
}

/// Inputs to `get_chart_margins`. Explicit sides override the rule table.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarginOptions {
    /// Categories run along Y (horizontal bars).
    pub is_horizontal: bool,
    pub has_dual_axis: bool,
    pub has_axis_labels: bool,
    pub show_legend: bool,
    pub top: Option<f64>,
    pub right: Option<f64>,
    pub bottom: Option<f64>,
    pub left: Option<f64>,
}

impl MarginOptions {
    #[must_use]
    pub fn horizontal(mut self, is_horizontal: bool) -> Self {
        self.is_horizontal = is_horizontal;
        self
    }

    #[must_use]
    pub fn dual_axis(mut self, has_dual_axis: bool) -> Self {
        self.has_dual_axis = has_dual_axis;
        self
    }

    #[must_use]
    pub fn axis_labels(mut self, has_axis_labels: bool) -> Self {
        self.has_axis_labels = has_axis_labels;
        self
    }

    #[must_use]
    pub fn legend(mut self, show_legend: bool) -> Self {
        self.show_legend = show_legend;
        self
    }
}

/// Single source of truth for outer chart margins.
#[must_use]
pub fn get_chart_margins(options: &MarginOptions) -> Margins {
    let right = if options.has_dual_axis {
        MARGIN_DUAL_AXIS_RIGHT
    } else {
        MARGIN_SIDE
    };
    let left = if options.is_horizontal {
        MARGIN_HORIZONTAL_LEFT
    } else if options.has_axis_labels {
        MARGIN_AXIS_LABEL_LEFT
    } else {
        0.0
    };
    let bottom = if options.show_legend {
        MARGIN_LEGEND_BOTTOM
    } else if options.has_axis_labels {
        MARGIN_AXIS_LABEL_BOTTOM
    } else {
        0.0
    };

    Margins {
        top: options.top.unwrap_or(MARGIN_TOP),
        right: options.right.unwrap_or(right),
        bottom: options.bottom.unwrap_or(bottom),
        left: options.left.unwrap_or(left),
    }
}
