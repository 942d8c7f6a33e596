use std::collections::HashSet;
use std::f64::consts::TAU;

use indexmap::IndexMap;

use crate::context::{ChartKind, ChartPrimitives, PieProps, SectorProps, TooltipEntry};
use crate::core::{PlotArea, Point, Rect, value_label};
use crate::error::ChartResult;
use crate::interaction::HitTarget;
use crate::shared::{ACTIVE_SECTOR_OFFSET, MarginOptions, format_value, get_chart_margins};

use super::{Chart, ChartProps, RenderPass};

/// Share of the plot's half-extent used by the outer radius.
const OUTER_RADIUS_RATIO: f64 = 0.8;

/// One slice per data row: `x_key` names it, the first series' key sizes it.
#[derive(Debug, Clone)]
pub struct PieChart {
    pub props: ChartProps,
    /// Donut hole as a fraction of the outer radius.
    pub inner_radius_ratio: f64,
}

impl PieChart {
    #[must_use]
    pub fn new(props: ChartProps) -> Self {
        Self {
            props,
            inner_radius_ratio: 0.0,
        }
    }

    #[must_use]
    pub fn donut(mut self, inner_radius_ratio: f64) -> Self {
        self.inner_radius_ratio = inner_radius_ratio.clamp(0.0, 0.95);
        self
    }

    /// Slice keys in row order: the row's name, or its index when unnamed.
    /// A repeated name gets `#row` appended so every slice toggles alone.
    fn slice_keys(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        (0..self.props.data.len())
            .map(|row| {
                let label = value_label(&self.props.category(row));
                let mut key = if label.is_empty() { row.to_string() } else { label };
                while !seen.insert(key.clone()) {
                    key = format!("{key} #{row}");
                }
                key
            })
            .collect()
    }
}

/// Plot area for radial charts: margins only, no axis gutters.
pub(crate) fn radial_area(props: &ChartProps) -> PlotArea {
    let margins = get_chart_margins(&MarginOptions {
        is_horizontal: false,
        has_dual_axis: false,
        has_axis_labels: false,
        show_legend: props.show_legend,
        ..props.margin
    });
    PlotArea::inset(props.viewport, margins, Default::default())
}

impl Chart for PieChart {
    fn kind(&self) -> ChartKind {
        ChartKind::PieChart
    }

    fn props(&self) -> &ChartProps {
        &self.props
    }

    fn compose<P: ChartPrimitives>(&self, pass: &mut RenderPass<'_, P>) -> ChartResult<P::Scene> {
        let props = pass.props();
        let area = radial_area(props);
        let bounds = area.bounds;
        let center = bounds.center();
        let outer_radius = bounds.width.min(bounds.height) / 2.0 * OUTER_RADIUS_RATIO;
        let inner_radius = outer_radius * self.inner_radius_ratio;

        let keys = self.slice_keys();
        let colors = pass.item_colors(keys.len());
        let colors: Vec<String> = if colors.is_empty() {
            Vec::new()
        } else {
            (0..keys.len()).map(|i| colors[i % colors.len()].clone()).collect()
        };
        let value_key = props.series.first().map(|s| s.key.as_str());
        let values: Vec<f64> = (0..props.data.len())
            .map(|row| {
                value_key
                    .and_then(|key| props.value(row, key))
                    .map_or(0.0, |v| v.max(0.0))
            })
            .collect();
        let total: f64 = keys
            .iter()
            .zip(&values)
            .filter(|(key, _)| !pass.is_hidden(key))
            .map(|(_, v)| v)
            .sum();

        let mut scene = pass.components().pie_chart(&pass.shell(area));
        let stroke = pass.theme().colors.background().to_owned();
        let mut sectors = Vec::new();
        let mut angle = 0.0;
        for (index, key) in keys.iter().enumerate() {
            let emphasis = pass.emphasis(index, key);
            if !emphasis.visible || total <= 0.0 || values[index] <= 0.0 {
                continue;
            }
            let sweep = values[index] / total * TAU;
            let sector = SectorProps {
                index,
                name: key.clone(),
                center,
                inner_radius,
                outer_radius: if emphasis.active {
                    outer_radius + ACTIVE_SECTOR_OFFSET
                } else {
                    outer_radius
                },
                start_angle: angle,
                end_angle: angle + sweep,
                fill: colors.get(index).cloned().unwrap_or_default(),
                opacity: emphasis.opacity,
                stroke: stroke.clone(),
            };
            pass.hit(
                centroid_box(&sector),
                HitTarget::Series {
                    index,
                    datum: Some(index),
                },
            );
            sectors.push(sector);
            angle += sweep;
        }

        let active = pass.active_datum().or(pass.hover().active_index());
        let tooltip = active.and_then(|index| {
            let sector = sectors.iter().find(|s| s.index == index)?;
            let raw = props.data[index].get(value_key?)?;
            Some((sector_centroid(sector), index, raw.clone()))
        });

        pass.components().pie(
            &mut scene,
            &PieProps {
                data_key: value_key.unwrap_or_default().to_owned(),
                name_key: props.x_key.clone(),
                center,
                inner_radius,
                outer_radius,
                sectors,
                animation: pass.animation(),
            },
        );

        if let Some((anchor, index, raw)) = tooltip {
            let entry = TooltipEntry {
                name: keys[index].clone(),
                value: format_value(props.tooltip_formatter.as_ref(), &raw),
                color: colors.get(index).cloned().unwrap_or_default(),
            };
            pass.tooltip(&mut scene, anchor, keys[index].clone(), vec![entry], None);
        }

        pass.legend(&mut scene, &keys, &IndexMap::new(), &colors);
        Ok(scene)
    }
}

fn sector_centroid(sector: &SectorProps) -> Point {
    let mid = (sector.start_angle + sector.end_angle) / 2.0;
    let radius = (sector.inner_radius + sector.outer_radius) / 2.0;
    SectorProps::polar(sector.center, radius, mid)
}

/// Square around the sector centroid sized to stay inside the slice.
fn centroid_box(sector: &SectorProps) -> Rect {
    let centroid = sector_centroid(sector);
    let mid_radius = (sector.inner_radius + sector.outer_radius) / 2.0;
    let arc = (sector.end_angle - sector.start_angle) * mid_radius;
    let half = (arc / 2.0).min((sector.outer_radius - sector.inner_radius) / 2.0) / std::f64::consts::SQRT_2;
    Rect::new(centroid.x, centroid.y, 0.0, 0.0).inflate(half.max(1.0))
}
