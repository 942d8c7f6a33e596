use crate::context::{AreaProps, ChartKind, ChartPrimitives};
use crate::core::{ChartLayout, Rect};
use crate::error::ChartResult;
use crate::interaction::HitTarget;
use crate::shared::AREA_FILL_OPACITY;

use super::cartesian::CartesianPlot;
use super::{Chart, ChartProps, RenderPass};

const POINT_HIT_SLOP: f64 = 6.0;

#[derive(Debug, Clone)]
pub struct AreaChart {
    pub props: ChartProps,
    pub fill_opacity: f64,
}

impl AreaChart {
    #[must_use]
    pub fn new(props: ChartProps) -> Self {
        Self {
            props,
            fill_opacity: AREA_FILL_OPACITY,
        }
    }

    #[must_use]
    pub fn with_fill_opacity(mut self, fill_opacity: f64) -> Self {
        self.fill_opacity = fill_opacity.clamp(0.0, 1.0);
        self
    }
}

impl Chart for AreaChart {
    fn kind(&self) -> ChartKind {
        ChartKind::AreaChart
    }

    fn props(&self) -> &ChartProps {
        &self.props
    }

    fn compose<P: ChartPrimitives>(&self, pass: &mut RenderPass<'_, P>) -> ChartResult<P::Scene> {
        let (plot, mut scene) = CartesianPlot::open(pass, self.kind())?;
        let props = pass.props();
        let animation = pass.animation();

        for (index, series) in props.series.iter().enumerate() {
            let emphasis = pass.emphasis(index, &series.key);
            if !emphasis.visible {
                continue;
            }
            let points = plot.series_points(props, &series.key);
            for (row, point) in &points {
                pass.hit(
                    Rect::new(point.x, point.y, 0.0, 0.0).inflate(POINT_HIT_SLOP),
                    HitTarget::Series {
                        index,
                        datum: Some(*row),
                    },
                );
            }
            let color = plot.colors[index].clone();
            pass.components().area(
                &mut scene,
                &AreaProps {
                    data_key: series.key.clone(),
                    name: series.display_name().to_owned(),
                    points: points.into_iter().map(|(_, p)| p).collect(),
                    baseline: CartesianPlot::baseline(plot.scale_for(props, &series.key)),
                    vertical: plot.layout == ChartLayout::Vertical,
                    stroke: color.clone(),
                    fill: color,
                    fill_opacity: self.fill_opacity,
                    stroke_width: emphasis.stroke_width,
                    opacity: emphasis.opacity,
                    animation,
                },
            );
        }

        plot.close(pass, &mut scene);
        Ok(scene)
    }
}
