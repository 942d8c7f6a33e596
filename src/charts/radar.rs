use std::f64::consts::TAU;

use serde_json::Value;

use crate::context::{
    ChartKind, ChartPrimitives, PolarAngleAxisProps, PolarAngleTick, PolarGridProps,
    PolarRadiusAxisProps, PolarRadiusTick, RadarProps, SectorProps, TooltipEntry,
};
use crate::core::{LinearScale, Point, Rect, value_label};
use crate::error::ChartResult;
use crate::interaction::HitTarget;
use crate::shared::{
    AREA_FILL_OPACITY, DEFAULT_TICK_COUNT, DEFAULT_TICK_MAX_CHARS, format_number, format_value,
    truncate_tick,
};

use super::cartesian::series_domain;
use super::pie::radial_area;
use super::{Chart, ChartProps, RenderPass};

/// Room left outside the grid for angle labels.
const LABEL_ROOM: f64 = 24.0;
const LABEL_OFFSET: f64 = 12.0;
const VERTEX_HIT_SLOP: f64 = 6.0;

/// One spoke per data row, one polygon per series.
#[derive(Debug, Clone)]
pub struct RadarChart {
    pub props: ChartProps,
    pub fill_opacity: f64,
}

impl RadarChart {
    #[must_use]
    pub fn new(props: ChartProps) -> Self {
        Self {
            props,
            fill_opacity: AREA_FILL_OPACITY,
        }
    }
}

impl Chart for RadarChart {
    fn kind(&self) -> ChartKind {
        ChartKind::RadarChart
    }

    fn props(&self) -> &ChartProps {
        &self.props
    }

    fn compose<P: ChartPrimitives>(&self, pass: &mut RenderPass<'_, P>) -> ChartResult<P::Scene> {
        let colors = pass.series_colors();
        let props = pass.props();
        let area = radial_area(props);
        let center = area.bounds.center();
        let radius = (area.bounds.width.min(area.bounds.height) / 2.0 - LABEL_ROOM).max(0.0);

        let visible: Vec<&str> = props
            .series
            .iter()
            .map(|s| s.key.as_str())
            .filter(|key| !pass.is_hidden(key))
            .collect();
        let (_, high) = series_domain(props, visible, &[], true)?.domain();
        let high = if high > 0.0 { high } else { 1.0 };
        let scale = LinearScale::new(0.0, high)?.with_range(0.0, radius);

        let count = props.data.len();
        let angles: Vec<f64> = (0..count).map(|i| TAU * i as f64 / count as f64).collect();
        let ticks: Vec<f64> = scale
            .ticks(DEFAULT_TICK_COUNT)
            .into_iter()
            .filter(|v| *v > 0.0 && *v <= high)
            .collect();

        let components = pass.components();
        let mut scene = components.radar_chart(&pass.shell(area));
        let theme = pass.theme();

        if props.show_grid && !angles.is_empty() {
            components.polar_grid(
                &mut scene,
                &PolarGridProps {
                    center,
                    radii: ticks.iter().map(|v| scale.map(*v)).collect(),
                    angles: angles.clone(),
                    stroke: theme.colors.grid().to_owned(),
                },
            );
        }
        if props.show_x_axis {
            let max_chars = props.max_tick_chars.unwrap_or(DEFAULT_TICK_MAX_CHARS);
            components.polar_angle_axis(
                &mut scene,
                &PolarAngleAxisProps {
                    center,
                    radius,
                    ticks: angles
                        .iter()
                        .enumerate()
                        .map(|(row, angle)| PolarAngleTick {
                            angle: *angle,
                            position: SectorProps::polar(center, radius + LABEL_OFFSET, *angle),
                            label: truncate_tick(
                                &format_value(props.x_axis_formatter.as_ref(), &props.category(row)),
                                max_chars,
                            ),
                        })
                        .collect(),
                    tick_style: theme.tick.clone(),
                },
            );
        }
        if props.show_y_axis {
            components.polar_radius_axis(
                &mut scene,
                &PolarRadiusAxisProps {
                    center,
                    angle: 0.0,
                    ticks: ticks
                        .iter()
                        .map(|v| PolarRadiusTick {
                            radius: scale.map(*v),
                            position: SectorProps::polar(center, scale.map(*v), 0.0),
                            label: match props.y_axis_formatter.as_ref() {
                                Some(format) => format(&Value::from(*v)),
                                None => format_number(*v),
                            },
                        })
                        .collect(),
                    stroke: theme.colors.axis().to_owned(),
                    tick_style: theme.tick.clone(),
                },
            );
        }

        let animation = pass.animation();
        for (index, series) in props.series.iter().enumerate() {
            let emphasis = pass.emphasis(index, &series.key);
            if !emphasis.visible || angles.is_empty() {
                continue;
            }
            let points: Vec<Point> = angles
                .iter()
                .enumerate()
                .map(|(row, angle)| {
                    let value = props.value(row, &series.key).unwrap_or(0.0).max(0.0);
                    SectorProps::polar(center, scale.map(value), *angle)
                })
                .collect();
            for (row, point) in points.iter().enumerate() {
                pass.hit(
                    Rect::new(point.x, point.y, 0.0, 0.0).inflate(VERTEX_HIT_SLOP),
                    HitTarget::Series {
                        index,
                        datum: Some(row),
                    },
                );
            }
            components.radar(
                &mut scene,
                &RadarProps {
                    data_key: series.key.clone(),
                    name: series.display_name().to_owned(),
                    points,
                    stroke: colors[index].clone(),
                    fill: colors[index].clone(),
                    fill_opacity: self.fill_opacity,
                    stroke_width: emphasis.stroke_width,
                    opacity: emphasis.opacity,
                    animation,
                },
            );
        }

        if let Some(row) = pass.active_datum().filter(|row| *row < count) {
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
            let anchor = SectorProps::polar(center, radius, angles[row]);
            pass.tooltip(
                &mut scene,
                anchor,
                value_label(&props.category(row)),
                entries,
                None,
            );
        }

        pass.legend(&mut scene, &props.series_keys(), &props.series_names(), &colors);
        Ok(scene)
    }
}
