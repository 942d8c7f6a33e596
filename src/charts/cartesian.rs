//! Layout shared by category charts: margins, scales, grid, axes,
//! reference lines and the tooltip/legend overlays.

use crate::context::{AxisType, ChartKind, ChartPrimitives, ReferenceLineProps, TooltipEntry};
use crate::core::{
    BandScale, ChartLayout, LinearScale, Margins, PlotArea, Point, Rect, numeric_extent,
    value_domain,
};
use crate::error::ChartResult;
use crate::shared::{
    AxisScale, ChartAxes, ChartGrid, GRID_DASH, MarginOptions, X_AXIS_HEIGHT, Y_AXIS_WIDTH,
    format_number, format_value, get_chart_margins,
};
use crate::theme::SemanticRole;

use super::{ChartProps, RenderPass};

/// Plot area after margins and axis gutters.
pub(crate) fn plot_area(props: &ChartProps, is_horizontal: bool, dual_axis: bool) -> PlotArea {
    let margins = get_chart_margins(&MarginOptions {
        is_horizontal,
        has_dual_axis: dual_axis,
        has_axis_labels: props.has_axis_labels(),
        show_legend: props.show_legend,
        ..props.margin
    });
    let gutters = Margins::new(
        0.0,
        if dual_axis && props.show_y_axis {
            Y_AXIS_WIDTH
        } else {
            0.0
        },
        if props.show_x_axis { X_AXIS_HEIGHT } else { 0.0 },
        if props.show_y_axis { Y_AXIS_WIDTH } else { 0.0 },
    );
    PlotArea::inset(props.viewport, margins, gutters)
}

/// Value domain over the visible series in `keys`.
pub(crate) fn series_domain<'k>(
    props: &ChartProps,
    keys: impl IntoIterator<Item = &'k str>,
    extra: &[f64],
    include_zero: bool,
) -> ChartResult<LinearScale> {
    let keys: Vec<&str> = keys.into_iter().collect();
    let values = (0..props.data.len())
        .flat_map(|row| keys.iter().filter_map(move |key| props.value(row, key)))
        .chain(extra.iter().copied());
    let (start, end) = value_domain(numeric_extent(values), include_zero);
    LinearScale::new(start, end)
}

/// Scales and geometry of one category chart.
#[derive(Debug, Clone)]
pub(crate) struct CartesianPlot {
    pub plot: Rect,
    pub layout: ChartLayout,
    pub category: BandScale,
    pub value: LinearScale,
    pub value_right: Option<LinearScale>,
    pub colors: Vec<String>,
}

impl CartesianPlot {
    /// Builds scales, opens the scene and emits grid, axes and reference lines.
    pub fn open<P: ChartPrimitives>(
        pass: &mut RenderPass<'_, P>,
        kind: ChartKind,
    ) -> ChartResult<(Self, P::Scene)> {
        let colors = pass.series_colors();
        let props = pass.props();
        let layout = props.layout;
        let dual_axis = layout == ChartLayout::Horizontal
            && props
                .series
                .iter()
                .any(|s| props.right_axis_keys.contains(&s.key));
        let area = plot_area(props, layout == ChartLayout::Vertical, dual_axis);
        let plot = area.bounds;

        let visible: Vec<&str> = props
            .series
            .iter()
            .map(|s| s.key.as_str())
            .filter(|key| !pass.is_hidden(key))
            .collect();
        let left_keys = visible
            .iter()
            .copied()
            .filter(|key| !props.right_axis_keys.contains(*key));
        let right_keys: Vec<&str> = visible
            .iter()
            .copied()
            .filter(|key| props.right_axis_keys.contains(*key))
            .collect();

        let (category, value, value_right) = match layout {
            ChartLayout::Horizontal => {
                let category = BandScale::new(props.data.len(), plot.x, plot.right());
                let value = series_domain(props, left_keys, &props.reference_values, true)?
                    .with_range(plot.bottom(), plot.y);
                let right = if dual_axis {
                    Some(series_domain(props, right_keys, &[], true)?.with_range(plot.bottom(), plot.y))
                } else {
                    None
                };
                (category, value, right)
            }
            ChartLayout::Vertical => {
                let category = BandScale::new(props.data.len(), plot.y, plot.bottom());
                let value = series_domain(props, left_keys, &props.reference_values, true)?
                    .with_range(plot.x, plot.right());
                (category, value, None)
            }
        };

        let cartesian = Self {
            plot,
            layout,
            category,
            value,
            value_right,
            colors,
        };

        let components = pass.components();
        let mut scene = components.chart(kind, &pass.shell(area));
        cartesian.draw_chrome(pass, &mut scene);
        Ok((cartesian, scene))
    }

    fn category_axis(&self, props: &ChartProps) -> AxisScale {
        AxisScale::Category {
            band: self.category,
            labels: (0..props.data.len()).map(|i| props.category(i)).collect(),
        }
    }

    fn axes<'p>(&self, props: &'p ChartProps) -> ChartAxes<'p> {
        ChartAxes {
            layout: self.layout,
            x_type: None,
            y_type: None,
            show_x: props.show_x_axis,
            show_y: props.show_y_axis,
            x_formatter: props.x_axis_formatter.as_ref(),
            y_formatter: props.y_axis_formatter.as_ref(),
            max_tick_chars: props.max_tick_chars,
            x_label: props.x_label.as_deref(),
            y_label: props.y_label.as_deref(),
        }
    }

    fn draw_chrome<P: ChartPrimitives>(&self, pass: &RenderPass<'_, P>, scene: &mut P::Scene) {
        let props = pass.props();
        let theme = pass.theme();
        let category = self.category_axis(props);
        let value = AxisScale::Number { scale: self.value };
        let right = self.value_right.map(|scale| AxisScale::Number { scale });
        let axes = self.axes(props);
        let (x, y) = match axes.resolve_types().0 {
            AxisType::Category => (&category, &value),
            AxisType::Number => (&value, &category),
        };

        if props.show_grid {
            ChartGrid::default().render(
                pass.components(),
                scene,
                pass.resolver(),
                theme,
                self.plot,
                y.tick_offsets(),
                x.tick_offsets(),
            );
        }

        axes.render(pass.components(), scene, self.plot, x, y, right.as_ref(), theme);

        let stroke = theme.colors.get(SemanticRole::Warning).to_owned();
        for reference in &props.reference_values {
            let at = self.value.map(*reference);
            let (from, to) = match self.layout {
                ChartLayout::Horizontal => (Point::new(self.plot.x, at), Point::new(self.plot.right(), at)),
                ChartLayout::Vertical => (Point::new(at, self.plot.bottom()), Point::new(at, self.plot.y)),
            };
            pass.components().reference_line(
                scene,
                &ReferenceLineProps {
                    from,
                    to,
                    stroke: stroke.clone(),
                    dash: Some(GRID_DASH),
                    label: Some(format_number(*reference)),
                    tick_style: theme.tick.clone(),
                },
            );
        }
    }

    /// Scale a series is plotted against.
    pub fn scale_for(&self, props: &ChartProps, key: &str) -> LinearScale {
        match self.value_right {
            Some(right) if props.right_axis_keys.contains(key) => right,
            _ => self.value,
        }
    }

    /// Pixel position of `value` at the center of category `index`.
    pub fn point(&self, scale: LinearScale, index: usize, value: f64) -> Point {
        let along = self.category.center(index);
        let across = scale.map(value);
        match self.layout {
            ChartLayout::Horizontal => Point::new(along, across),
            ChartLayout::Vertical => Point::new(across, along),
        }
    }

    /// Pixel coordinate of zero (clamped into the domain) on `scale`.
    pub fn baseline(scale: LinearScale) -> f64 {
        let (start, end) = scale.domain();
        scale.map(0.0_f64.clamp(start.min(end), start.max(end)))
    }

    /// `(row, point)` for every row where `key` has a numeric value.
    pub fn series_points(&self, props: &ChartProps, key: &str) -> Vec<(usize, Point)> {
        let scale = self.scale_for(props, key);
        (0..props.data.len())
            .filter_map(|row| props.value(row, key).map(|v| (row, self.point(scale, row, v))))
            .collect()
    }

    /// Full band of category `index` across the plot.
    pub fn band_rect(&self, index: usize) -> Rect {
        let start = self.category.band_start(index);
        let width = self.category.bandwidth();
        match self.layout {
            ChartLayout::Horizontal => Rect::new(start, self.plot.y, width, self.plot.height),
            ChartLayout::Vertical => Rect::new(self.plot.x, start, self.plot.width, width),
        }
    }

    /// Tooltip for the active row and legend for every series.
    pub fn close<P: ChartPrimitives>(&self, pass: &mut RenderPass<'_, P>, scene: &mut P::Scene) {
        let props = pass.props();
        if let Some(row) = pass.active_datum().filter(|row| *row < props.data.len()) {
            let entries: Vec<TooltipEntry> = props
                .series
                .iter()
                .enumerate()
                .filter(|(_, s)| !pass.is_hidden(&s.key))
                .filter_map(|(index, series)| {
                    let value = props.data[row].get(&series.key)?;
                    Some(TooltipEntry {
                        name: series.display_name().to_owned(),
                        value: format_value(props.tooltip_formatter.as_ref(), value),
                        color: self.colors[index].clone(),
                    })
                })
                .collect();
            let title = format_value(self.axes(props).category_formatter(), &props.category(row));
            let band = self.band_rect(row);
            let anchor = match self.layout {
                ChartLayout::Horizontal => Point::new(band.right(), self.plot.y),
                ChartLayout::Vertical => Point::new(self.plot.x, band.bottom()),
            };
            pass.tooltip(scene, anchor, title, entries, Some(band));
        }

        let keys = props.series_keys();
        let names = props.series_names();
        pass.legend(scene, &keys, &names, &self.colors);
    }
}
