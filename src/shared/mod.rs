//! Backend-agnostic building blocks every leaf chart composes.

mod axes;
mod defaults;
mod grid;
mod legend;
mod tick;
mod tooltip;

pub use axes::{AxisScale, ChartAxes};
pub use defaults::{
    ACTIVE_DOT_RADIUS, ACTIVE_SECTOR_OFFSET, ACTIVE_STROKE_WIDTH, AREA_FILL_OPACITY,
    DEFAULT_DOT_RADIUS, DEFAULT_STROKE_WIDTH, DEFAULT_TICK_COUNT, DEFAULT_TICK_FONT_SIZE,
    DEFAULT_TICK_MAX_CHARS, DIMMED_OPACITY, GRID_DASH, INACTIVE_LEGEND_OPACITY, LABEL_CHAR_WIDTH,
    MARGIN_AXIS_LABEL_BOTTOM, MARGIN_AXIS_LABEL_LEFT, MARGIN_DUAL_AXIS_RIGHT,
    MARGIN_HORIZONTAL_LEFT, MARGIN_LEGEND_BOTTOM, MARGIN_SIDE, MARGIN_TOP, MarginOptions,
    TICK_SIZE, TickStyle, X_AXIS_HEIGHT, Y_AXIS_WIDTH, get_chart_margins,
};
pub use grid::ChartGrid;
pub use legend::ChartLegendLayer;
pub use tick::{TruncatedTick, ValueFormatter, format_number, format_value, truncate_tick};
pub use tooltip::ChartTooltipLayer;

