use indexmap::IndexSet;

use crate::context::{ChartKind, ChartPrimitives};
use crate::error::ChartResult;

use super::bar::{BarStyle, draw_bars};
use super::cartesian::CartesianPlot;
use super::line::draw_lines;
use super::{Chart, ChartProps, RenderPass};

/// Bars for `bar_keys`, lines for every other series, on shared axes.
#[derive(Debug, Clone)]
pub struct ComposedChart {
    pub props: ChartProps,
    pub bar_keys: IndexSet<String>,
}

impl ComposedChart {
    #[must_use]
    pub fn new(props: ChartProps) -> Self {
        Self {
            props,
            bar_keys: IndexSet::new(),
        }
    }

    #[must_use]
    pub fn with_bar_key(mut self, key: impl Into<String>) -> Self {
        self.bar_keys.insert(key.into());
        self
    }
}

impl Chart for ComposedChart {
    fn kind(&self) -> ChartKind {
        ChartKind::ComposedChart
    }

    fn props(&self) -> &ChartProps {
        &self.props
    }

    fn compose<P: ChartPrimitives>(&self, pass: &mut RenderPass<'_, P>) -> ChartResult<P::Scene> {
        let (plot, mut scene) = CartesianPlot::open(pass, self.kind())?;
        let style = BarStyle {
            color_by_category: false,
            radius: pass.theme().tooltip.radius / 2.0,
        };
        draw_bars(&plot, pass, &mut scene, style, |key| self.bar_keys.contains(key));
        draw_lines(&plot, pass, &mut scene, true, |key| !self.bar_keys.contains(key));
        plot.close(pass, &mut scene);
        Ok(scene)
    }
}
