use crate::context::{ChartPrimitives, GridProps};
use crate::core::Rect;
use crate::hooks::ChartTheme;
use crate::theme::ColorResolver;

/// Thin wrapper over the backend's cartesian grid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartGrid {
    /// Explicit stroke; the resolved semantic grid color otherwise.
    pub stroke: Option<String>,
    pub hide_horizontal: bool,
    pub hide_vertical: bool,
}

impl ChartGrid {
    #[must_use]
    pub fn stroke_color(&self, resolver: &ColorResolver, theme: &ChartTheme) -> String {
        match &self.stroke {
            Some(stroke) => resolver.resolve_css_color(stroke),
            None => theme.colors.grid().to_owned(),
        }
    }

    /// `horizontal` are Y offsets, `vertical` X offsets.
    #[allow(clippy::too_many_arguments)]
    pub fn render<P: ChartPrimitives>(
        &self,
        components: &P,
        scene: &mut P::Scene,
        resolver: &ColorResolver,
        theme: &ChartTheme,
        bounds: Rect,
        horizontal: Vec<f64>,
        vertical: Vec<f64>,
    ) {
        components.cartesian_grid(
            scene,
            &GridProps {
                bounds,
                horizontal: if self.hide_horizontal {
                    Vec::new()
                } else {
                    horizontal
                },
                vertical: if self.hide_vertical {
                    Vec::new()
                } else {
                    vertical
                },
                stroke: self.stroke_color(resolver, theme),
                dash: Some(theme.grid_dash),
            },
        );
    }
}
