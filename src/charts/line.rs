use crate::context::{ChartKind, ChartPrimitives, LineProps};
use crate::core::Rect;
use crate::error::ChartResult;
use crate::interaction::HitTarget;

use super::cartesian::CartesianPlot;
use super::{Chart, ChartProps, RenderPass};

/// Extra pixels around a dot that still count as hovering it.
const DOT_HIT_SLOP: f64 = 6.0;

#[derive(Debug, Clone)]
pub struct LineChart {
    pub props: ChartProps,
    pub show_dots: bool,
}

impl LineChart {
    #[must_use]
    pub fn new(props: ChartProps) -> Self {
        Self {
            props,
            show_dots: true,
        }
    }

    #[must_use]
    pub fn with_dots(mut self, show_dots: bool) -> Self {
        self.show_dots = show_dots;
        self
    }
}

impl Chart for LineChart {
    fn kind(&self) -> ChartKind {
        ChartKind::LineChart
    }

    fn props(&self) -> &ChartProps {
        &self.props
    }

    fn compose<P: ChartPrimitives>(&self, pass: &mut RenderPass<'_, P>) -> ChartResult<P::Scene> {
        let (plot, mut scene) = CartesianPlot::open(pass, self.kind())?;
        draw_lines(&plot, pass, &mut scene, self.show_dots, |_| true);
        plot.close(pass, &mut scene);
        Ok(scene)
    }
}

/// Emits one `Line` per visible series accepted by `include`.
pub(crate) fn draw_lines<P: ChartPrimitives>(
    plot: &CartesianPlot,
    pass: &mut RenderPass<'_, P>,
    scene: &mut P::Scene,
    show_dots: bool,
    include: impl Fn(&str) -> bool,
) {
    let props = pass.props();
    let animation = pass.animation();
    for (index, series) in props.series.iter().enumerate() {
        if !include(&series.key) {
            continue;
        }
        let emphasis = pass.emphasis(index, &series.key);
        if !emphasis.visible {
            continue;
        }
        let points = plot.series_points(props, &series.key);
        for (row, point) in &points {
            pass.hit(
                Rect::new(point.x, point.y, 0.0, 0.0).inflate(DOT_HIT_SLOP),
                HitTarget::Series {
                    index,
                    datum: Some(*row),
                },
            );
        }
        pass.components().line(
            scene,
            &LineProps {
                data_key: series.key.clone(),
                name: series.display_name().to_owned(),
                points: points.into_iter().map(|(_, p)| p).collect(),
                stroke: plot.colors[index].clone(),
                stroke_width: emphasis.stroke_width,
                opacity: emphasis.opacity,
                dot_radius: if show_dots { emphasis.dot_radius } else { 0.0 },
                animation,
            },
        );
    }
}
