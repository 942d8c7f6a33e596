use crate::context::ChartConfig;
use crate::shared::{DEFAULT_TICK_FONT_SIZE, GRID_DASH, TickStyle};
use crate::theme::ResolvedSemanticColors;

/// Tooltip surface styling.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipStyle {
    pub background: String,
    pub border: String,
    pub text: String,
    pub radius: f64,
    pub font_size: f64,
}

/// Everything a leaf chart needs to paint chrome, already resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartTheme {
    pub colors: ResolvedSemanticColors,
    pub animate: bool,
    pub animation_duration_ms: u32,
    pub tick: TickStyle,
    pub grid_dash: (f64, f64),
    pub tooltip: TooltipStyle,
}

impl ChartTheme {
    pub(crate) fn derive(colors: ResolvedSemanticColors, config: &ChartConfig) -> Self {
        let tick = TickStyle {
            font_size: DEFAULT_TICK_FONT_SIZE,
            fill: colors.text_muted().to_owned(),
        };
        let tooltip = TooltipStyle {
            background: colors.background_elevated().to_owned(),
            border: colors.border().to_owned(),
            text: colors.text().to_owned(),
            radius: config.radius("m"),
            font_size: DEFAULT_TICK_FONT_SIZE,
        };
        Self {
            colors,
            animate: config.animate,
            animation_duration_ms: config.animation_duration_ms,
            tick,
            grid_dash: GRID_DASH,
            tooltip,
        }
    }
}
