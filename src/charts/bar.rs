use crate::context::{BarProps, CellProps, ChartKind, ChartPrimitives};
use crate::core::{ChartLayout, Point, Rect};
use crate::error::ChartResult;
use crate::interaction::HitTarget;

use super::cartesian::CartesianPlot;
use super::{Chart, ChartProps, RenderPass};

#[derive(Debug, Clone)]
pub struct BarChart {
    pub props: ChartProps,
    /// Colors each category individually through `Cell` overrides.
    pub color_by_category: bool,
    pub radius: Option<f64>,
}

impl BarChart {
    #[must_use]
    pub fn new(props: ChartProps) -> Self {
        Self {
            props,
            color_by_category: false,
            radius: None,
        }
    }

    #[must_use]
    pub fn with_color_by_category(mut self, enabled: bool) -> Self {
        self.color_by_category = enabled;
        self
    }

    #[must_use]
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius.max(0.0));
        self
    }
}

impl Chart for BarChart {
    fn kind(&self) -> ChartKind {
        ChartKind::BarChart
    }

    fn props(&self) -> &ChartProps {
        &self.props
    }

    fn compose<P: ChartPrimitives>(&self, pass: &mut RenderPass<'_, P>) -> ChartResult<P::Scene> {
        let (plot, mut scene) = CartesianPlot::open(pass, self.kind())?;
        let style = BarStyle {
            color_by_category: self.color_by_category,
            radius: self.radius.unwrap_or_else(|| pass.theme().tooltip.radius / 2.0),
        };
        draw_bars(&plot, pass, &mut scene, style, |_| true);
        plot.close(pass, &mut scene);
        Ok(scene)
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct BarStyle {
    pub color_by_category: bool,
    pub radius: f64,
}

/// Emits grouped bars: visible accepted series share each category band.
pub(crate) fn draw_bars<P: ChartPrimitives>(
    plot: &CartesianPlot,
    pass: &mut RenderPass<'_, P>,
    scene: &mut P::Scene,
    style: BarStyle,
    include: impl Fn(&str) -> bool,
) {
    let props = pass.props();
    let animation = pass.animation();
    let slots: Vec<usize> = props
        .series
        .iter()
        .enumerate()
        .filter(|(_, s)| include(&s.key) && !pass.is_hidden(&s.key))
        .map(|(index, _)| index)
        .collect();
    if slots.is_empty() {
        return;
    }
    let cell_colors = if style.color_by_category {
        Some(pass.item_colors(props.data.len()))
    } else {
        None
    };
    let thickness = plot.category.bandwidth() / slots.len() as f64;

    for (slot, index) in slots.iter().copied().enumerate() {
        let series = &props.series[index];
        let emphasis = pass.emphasis(index, &series.key);
        let scale = plot.scale_for(props, &series.key);
        let zero = CartesianPlot::baseline(scale);

        let mut rects = Vec::new();
        let mut cells = Vec::new();
        for row in 0..props.data.len() {
            let Some(value) = props.value(row, &series.key) else {
                continue;
            };
            let lead = plot.category.band_start(row) + thickness * slot as f64;
            let end = scale.map(value);
            let rect = match plot.layout {
                ChartLayout::Horizontal => Rect::from_corners(
                    Point::new(lead, zero),
                    Point::new(lead + thickness, end),
                ),
                ChartLayout::Vertical => Rect::from_corners(
                    Point::new(zero, lead),
                    Point::new(end, lead + thickness),
                ),
            };
            pass.hit(
                rect,
                HitTarget::Series {
                    index,
                    datum: Some(row),
                },
            );
            if let Some(colors) = cell_colors.as_ref().filter(|c| !c.is_empty()) {
                cells.push(CellProps {
                    index: rects.len(),
                    fill: colors[row % colors.len()].clone(),
                    opacity: emphasis.opacity,
                });
            }
            rects.push(rect);
        }

        pass.components().bar(
            scene,
            &BarProps {
                data_key: series.key.clone(),
                name: series.display_name().to_owned(),
                rects,
                fill: plot.colors[index].clone(),
                opacity: emphasis.opacity,
                radius: style.radius,
                cells,
                animation,
            },
        );
    }
}
