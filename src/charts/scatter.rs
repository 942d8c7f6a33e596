use crate::context::{
    AxisType, ChartKind, ChartPrimitives, ScatterPoint, ScatterProps, TooltipEntry, ZAxisProps,
};
use crate::core::{LinearScale, Point, Rect, numeric_extent, value_domain};
use crate::error::ChartResult;
use crate::interaction::HitTarget;
use crate::shared::{AxisScale, ChartAxes, ChartGrid, format_value};

use super::cartesian::{plot_area, series_domain};
use super::{Chart, ChartProps, RenderPass};

const DEFAULT_Z_RANGE: (f64, f64) = (4.0, 12.0);

/// Numeric X against numeric Y, optionally sizing marks by a Z field.
#[derive(Debug, Clone)]
pub struct ScatterChart {
    pub props: ChartProps,
    pub z_key: Option<String>,
    pub z_range: (f64, f64),
}

impl ScatterChart {
    #[must_use]
    pub fn new(props: ChartProps) -> Self {
        Self {
            props,
            z_key: None,
            z_range: DEFAULT_Z_RANGE,
        }
    }

    #[must_use]
    pub fn with_z_key(mut self, key: impl Into<String>, range: (f64, f64)) -> Self {
        self.z_key = Some(key.into());
        self.z_range = range;
        self
    }

    fn z_scale(&self) -> Option<LinearScale> {
        let key = self.z_key.as_deref()?;
        let props = &self.props;
        let extent = numeric_extent((0..props.data.len()).filter_map(|row| props.value(row, key)));
        let (start, end) = value_domain(extent, false);
        LinearScale::new(start, end)
            .ok()
            .map(|scale| scale.with_range(self.z_range.0, self.z_range.1))
    }
}

impl Chart for ScatterChart {
    fn kind(&self) -> ChartKind {
        ChartKind::ScatterChart
    }

    fn props(&self) -> &ChartProps {
        &self.props
    }

    fn compose<P: ChartPrimitives>(&self, pass: &mut RenderPass<'_, P>) -> ChartResult<P::Scene> {
        let colors = pass.series_colors();
        let props = pass.props();
        let area = plot_area(props, false, false);
        let plot = area.bounds;

        let x_extent =
            numeric_extent((0..props.data.len()).filter_map(|row| props.value(row, &props.x_key)));
        let (x0, x1) = value_domain(x_extent, false);
        let x_scale = LinearScale::new(x0, x1)?.with_range(plot.x, plot.right());
        let visible = props
            .series
            .iter()
            .map(|s| s.key.as_str())
            .filter(|key| !pass.is_hidden(key))
            .collect::<Vec<_>>();
        let y_scale = series_domain(props, visible, &props.reference_values, false)?
            .with_range(plot.bottom(), plot.y);

        let components = pass.components();
        let mut scene = components.scatter_chart(&pass.shell(area));
        let x_axis = AxisScale::Number { scale: x_scale };
        let y_axis = AxisScale::Number { scale: y_scale };
        let theme = pass.theme();

        if props.show_grid {
            ChartGrid::default().render(
                components,
                &mut scene,
                pass.resolver(),
                theme,
                plot,
                y_axis.tick_offsets(),
                x_axis.tick_offsets(),
            );
        }
        ChartAxes {
            layout: props.layout,
            x_type: Some(AxisType::Number),
            y_type: Some(AxisType::Number),
            show_x: props.show_x_axis,
            show_y: props.show_y_axis,
            x_formatter: props.x_axis_formatter.as_ref(),
            y_formatter: props.y_axis_formatter.as_ref(),
            max_tick_chars: props.max_tick_chars,
            x_label: props.x_label.as_deref(),
            y_label: props.y_label.as_deref(),
        }
        .render(components, &mut scene, plot, &x_axis, &y_axis, None, theme);

        let z_scale = self.z_scale();
        if let Some(key) = &self.z_key {
            components.z_axis(
                &mut scene,
                &ZAxisProps {
                    data_key: key.clone(),
                    range: self.z_range,
                },
            );
        }

        let animation = pass.animation();
        let mut marks = Vec::new();
        for (index, series) in props.series.iter().enumerate() {
            let emphasis = pass.emphasis(index, &series.key);
            if !emphasis.visible {
                continue;
            }
            let mut points = Vec::new();
            for row in 0..props.data.len() {
                let (Some(x), Some(y)) = (
                    props.value(row, &props.x_key),
                    props.value(row, &series.key),
                ) else {
                    continue;
                };
                let radius = match (z_scale, self.z_key.as_deref()) {
                    (Some(z), Some(key)) => props
                        .value(row, key)
                        .map_or(self.z_range.0, |value| z.map(value)),
                    _ => emphasis.dot_radius + 1.0,
                };
                let center = Point::new(x_scale.map(x), y_scale.map(y));
                marks.push((
                    Rect::new(center.x, center.y, 0.0, 0.0).inflate(radius + 2.0),
                    HitTarget::Series {
                        index,
                        datum: Some(row),
                    },
                ));
                points.push(ScatterPoint { center, radius });
            }
            components.scatter(
                &mut scene,
                &ScatterProps {
                    data_key: series.key.clone(),
                    name: series.display_name().to_owned(),
                    points,
                    fill: colors[index].clone(),
                    opacity: emphasis.opacity,
                    animation,
                },
            );
        }
        for (bounds, target) in marks {
            pass.hit(bounds, target);
        }

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
                        color: colors[index].clone(),
                    })
                })
                .collect();
            let x_value = props.data[row]
                .get(&props.x_key)
                .cloned()
                .unwrap_or_default();
            let anchor = props
                .value(row, &props.x_key)
                .map_or(Point::new(plot.x, plot.y), |x| Point::new(x_scale.map(x), plot.y));
            pass.tooltip(
                &mut scene,
                anchor,
                format_value(props.x_axis_formatter.as_ref(), &x_value),
                entries,
                None,
            );
        }

        pass.legend(&mut scene, &props.series_keys(), &props.series_names(), &colors);
        Ok(scene)
    }
}
