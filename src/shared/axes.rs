use serde_json::Value;

use crate::context::{AxisOrientation, AxisProps, AxisTick, AxisType, ChartPrimitives};
use crate::core::{BandScale, ChartLayout, LinearScale, Point, Rect};
use crate::hooks::ChartTheme;
use crate::shared::{
    DEFAULT_TICK_COUNT, DEFAULT_TICK_MAX_CHARS, TICK_SIZE, ValueFormatter, format_value,
    truncate_tick,
};

/// Scale behind one cartesian axis.
#[derive(Debug, Clone, PartialEq)]
pub enum AxisScale {
    Category { band: BandScale, labels: Vec<Value> },
    Number { scale: LinearScale },
}

impl AxisScale {
    #[must_use]
    pub fn axis_type(&self) -> AxisType {
        match self {
            Self::Category { .. } => AxisType::Category,
            Self::Number { .. } => AxisType::Number,
        }
    }

    /// Pixel offsets of tick marks, also used for grid lines.
    #[must_use]
    pub fn tick_offsets(&self) -> Vec<f64> {
        match self {
            Self::Category { band, .. } => (0..band.count()).map(|i| band.center(i)).collect(),
            Self::Number { scale } => number_tick_values(*scale)
                .into_iter()
                .map(|v| scale.map(v))
                .collect(),
        }
    }

    fn ticks(&self, formatter: Option<&ValueFormatter>, max_chars: usize) -> Vec<AxisTick> {
        match self {
            Self::Category { band, labels } => labels
                .iter()
                .enumerate()
                .map(|(i, value)| AxisTick {
                    offset: band.center(i),
                    label: truncate_tick(&format_value(formatter, value), max_chars),
                })
                .collect(),
            Self::Number { scale } => number_tick_values(*scale)
                .into_iter()
                .map(|v| AxisTick {
                    offset: scale.map(v),
                    label: truncate_tick(&format_value(formatter, &Value::from(v)), max_chars),
                })
                .collect(),
        }
    }
}

fn number_tick_values(scale: LinearScale) -> Vec<f64> {
    let (start, end) = scale.domain();
    let (low, high) = (start.min(end), start.max(end));
    let epsilon = (high - low).abs() * 1e-9;
    scale
        .ticks(DEFAULT_TICK_COUNT)
        .into_iter()
        .filter(|v| *v >= low - epsilon && *v <= high + epsilon)
        .collect()
}

/// Axis typing and tick rendering shared by every cartesian chart.
#[derive(Clone, Default)]
pub struct ChartAxes<'a> {
    pub layout: ChartLayout,
    pub x_type: Option<AxisType>,
    pub y_type: Option<AxisType>,
    pub show_x: bool,
    pub show_y: bool,
    pub x_formatter: Option<&'a ValueFormatter>,
    pub y_formatter: Option<&'a ValueFormatter>,
    pub max_tick_chars: Option<usize>,
    pub x_label: Option<&'a str>,
    pub y_label: Option<&'a str>,
}

impl std::fmt::Debug for ChartAxes<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartAxes")
            .field("layout", &self.layout)
            .field("x_type", &self.x_type)
            .field("y_type", &self.y_type)
            .field("show_x", &self.show_x)
            .field("show_y", &self.show_y)
            .field("max_tick_chars", &self.max_tick_chars)
            .finish_non_exhaustive()
    }
}

impl<'a> ChartAxes<'a> {
    /// Formatter of whichever axis carries the categories.
    #[must_use]
    pub fn category_formatter(&self) -> Option<&'a ValueFormatter> {
        match self.resolve_types() {
            (AxisType::Category, _) => self.x_formatter,
            _ => self.y_formatter,
        }
    }

    /// `(x, y)` axis types: layout decides unless overridden.
    #[must_use]
    pub fn resolve_types(&self) -> (AxisType, AxisType) {
        let (x, y) = match self.layout {
            ChartLayout::Horizontal => (AxisType::Category, AxisType::Number),
            ChartLayout::Vertical => (AxisType::Number, AxisType::Category),
        };
        (self.x_type.unwrap_or(x), self.y_type.unwrap_or(y))
    }

    /// Emits X, left Y and (when given) right Y axes around `plot`.
    #[allow(clippy::too_many_arguments)]
    pub fn render<P: ChartPrimitives>(
        &self,
        components: &P,
        scene: &mut P::Scene,
        plot: Rect,
        x: &AxisScale,
        y: &AxisScale,
        y_right: Option<&AxisScale>,
        theme: &ChartTheme,
    ) {
        let max_chars = self.max_tick_chars.unwrap_or(DEFAULT_TICK_MAX_CHARS);
        let stroke = theme.colors.axis().to_owned();

        if self.show_x {
            components.x_axis(
                scene,
                &AxisProps {
                    orientation: AxisOrientation::Bottom,
                    axis_type: x.axis_type(),
                    start: Point::new(plot.x, plot.bottom()),
                    end: Point::new(plot.right(), plot.bottom()),
                    ticks: x.ticks(self.x_formatter, max_chars),
                    stroke: stroke.clone(),
                    tick_style: theme.tick.clone(),
                    tick_size: TICK_SIZE,
                    label: self.x_label.map(str::to_owned),
                },
            );
        }

        if self.show_y {
            components.y_axis(
                scene,
                &AxisProps {
                    orientation: AxisOrientation::Left,
                    axis_type: y.axis_type(),
                    start: Point::new(plot.x, plot.bottom()),
                    end: Point::new(plot.x, plot.y),
                    ticks: y.ticks(self.y_formatter, max_chars),
                    stroke: stroke.clone(),
                    tick_style: theme.tick.clone(),
                    tick_size: TICK_SIZE,
                    label: self.y_label.map(str::to_owned),
                },
            );
            if let Some(right) = y_right {
                components.y_axis(
                    scene,
                    &AxisProps {
                        orientation: AxisOrientation::Right,
                        axis_type: right.axis_type(),
                        start: Point::new(plot.right(), plot.bottom()),
                        end: Point::new(plot.right(), plot.y),
                        ticks: right.ticks(self.y_formatter, max_chars),
                        stroke,
                        tick_style: theme.tick.clone(),
                        tick_size: TICK_SIZE,
                        label: None,
                    },
                );
            }
        }
    }
}
