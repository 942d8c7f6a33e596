use std::rc::Rc;

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::context::{
    AnimationProps, ChartContext, ChartKind, ChartPrimitives, ChartShellProps, TooltipEntry,
};
use crate::core::{PlotArea, Point, Rect};
use crate::error::ChartResult;
use crate::hooks::{
    ChartHooks, ChartTheme, FALLBACK_LEGEND_COLOR, LegendClick, LegendPayloadInput,
    SeriesVisibility, use_legend_payload,
};
use crate::interaction::{
    ChartEvent, HitMap, HitTarget, HoverSource, HoverState, InteractionState, SeriesEmphasis,
};
use crate::shared::{ChartLegendLayer, ChartTooltipLayer};
use crate::theme::ColorResolver;

use super::ChartProps;

/// A leaf chart: one visual grammar composed from backend primitives.
pub trait Chart {
    fn kind(&self) -> ChartKind;
    fn props(&self) -> &ChartProps;

    /// Opens the scene and emits every primitive of this chart.
    fn compose<P: ChartPrimitives>(&self, pass: &mut RenderPass<'_, P>) -> ChartResult<P::Scene>;
}

/// Per-instance UI state: hidden series, hover, derived-value memos and
/// the hit regions of the last render.
///
/// Never shared between chart instances.
#[derive(Debug, Default)]
pub struct ChartInstance {
    visibility: SeriesVisibility,
    interaction: InteractionState,
    hooks: ChartHooks,
    hits: HitMap,
    legend_keys: Vec<String>,
}

impl ChartInstance {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn visibility(&self) -> &SeriesVisibility {
        &self.visibility
    }

    #[must_use]
    pub fn interaction(&self) -> InteractionState {
        self.interaction
    }

    #[must_use]
    pub fn hover(&self) -> HoverState {
        self.interaction.hover()
    }

    #[must_use]
    pub fn is_dimmed(&self, index: usize) -> bool {
        self.interaction.is_dimmed(index)
    }

    #[must_use]
    pub fn hooks(&self) -> &ChartHooks {
        &self.hooks
    }

    #[must_use]
    pub fn hit_map(&self) -> &HitMap {
        &self.hits
    }

    pub fn toggle_series(&mut self, key: &str) {
        self.visibility.toggle_series(key);
    }

    /// Applies one UI event. Returns `true` when a re-render is needed.
    pub fn dispatch(&mut self, event: ChartEvent) -> bool {
        let before = (self.interaction, self.visibility.hidden_keys().len());
        match event {
            ChartEvent::DataEnter { index, datum } => {
                self.interaction.set_hover(index, HoverSource::Data);
                self.interaction.set_active_datum(datum);
            }
            ChartEvent::LegendEnter { index } => {
                self.interaction.set_hover(index, HoverSource::Legend);
            }
            ChartEvent::DataLeave | ChartEvent::LegendLeave => {
                self.interaction.clear_hover();
                self.interaction.set_active_datum(None);
            }
            ChartEvent::LegendClick(click) => {
                self.visibility.handle_legend_click(&click);
            }
            ChartEvent::PointerMove { x, y } => match self.hits.hit_test(x, y) {
                Some(HitTarget::Series { index, datum }) => {
                    self.interaction.set_hover(index, HoverSource::Data);
                    self.interaction.set_active_datum(datum);
                }
                Some(HitTarget::Legend { index }) => {
                    self.interaction.set_hover(index, HoverSource::Legend);
                    self.interaction.set_active_datum(None);
                }
                None => {
                    self.interaction.clear_hover();
                    self.interaction.set_active_datum(None);
                }
            },
            ChartEvent::PointerLeave => {
                self.interaction.clear_hover();
                self.interaction.set_active_datum(None);
            }
        }
        let changed = before != (self.interaction, self.visibility.hidden_keys().len());
        trace!(changed, hover = ?self.interaction.hover(), "chart event applied");
        changed
    }

    /// Clicks at `(x, y)`: toggles the legend item under the pointer, if any.
    pub fn click_at(&mut self, x: f64, y: f64) -> bool {
        match self.hits.hit_test(x, y) {
            Some(HitTarget::Legend { index }) => {
                let click = LegendClick {
                    data_key: self.legend_keys.get(index).cloned(),
                };
                self.dispatch(ChartEvent::LegendClick(click))
            }
            _ => false,
        }
    }

    /// Composes `chart` through the context's backend and finishes the scene.
    pub fn render<C: Chart, P: ChartPrimitives>(
        &mut self,
        context: &ChartContext<P>,
        chart: &C,
    ) -> ChartResult<P::Output> {
        let props = chart.props();
        props.validate()?;
        self.hits.clear();
        self.legend_keys.clear();

        let theme = self.hooks.use_chart_theme(context);
        let components = context.use_chart_components();
        debug!(
            kind = chart.kind().name(),
            backend = components.backend_name(),
            series = props.series.len(),
            rows = props.data.len(),
            "render chart"
        );

        let mut pass = RenderPass {
            context,
            props,
            theme,
            hooks: &mut self.hooks,
            visibility: &self.visibility,
            interaction: self.interaction,
            hits: &mut self.hits,
            legend_keys: &mut self.legend_keys,
        };
        let scene = chart.compose(&mut pass)?;
        components.finish(scene)
    }
}

/// Everything a leaf chart reads and writes during one render.
pub struct RenderPass<'a, P: ChartPrimitives> {
    context: &'a ChartContext<P>,
    props: &'a ChartProps,
    theme: Rc<ChartTheme>,
    hooks: &'a mut ChartHooks,
    visibility: &'a SeriesVisibility,
    interaction: InteractionState,
    hits: &'a mut HitMap,
    legend_keys: &'a mut Vec<String>,
}

impl<'a, P: ChartPrimitives> RenderPass<'a, P> {
    #[must_use]
    pub fn components(&self) -> &'a P {
        self.context.use_chart_components()
    }

    #[must_use]
    pub fn resolver(&self) -> &ColorResolver {
        self.context.resolver()
    }

    #[must_use]
    pub fn props(&self) -> &'a ChartProps {
        self.props
    }

    #[must_use]
    pub fn theme(&self) -> &ChartTheme {
        &self.theme
    }

    #[must_use]
    pub fn hover(&self) -> HoverState {
        self.interaction.hover()
    }

    #[must_use]
    pub fn active_datum(&self) -> Option<usize> {
        self.interaction.active_datum()
    }

    #[must_use]
    pub fn is_hidden(&self, key: &str) -> bool {
        self.visibility.is_hidden(key)
    }

    /// Hidden overrides dimmed; see `SeriesEmphasis::resolve`.
    #[must_use]
    pub fn emphasis(&self, index: usize, key: &str) -> SeriesEmphasis {
        SeriesEmphasis::resolve(index, self.is_hidden(key), self.hover())
    }

    #[must_use]
    pub fn animation(&self) -> AnimationProps {
        AnimationProps {
            active: self.props.animate.unwrap_or(self.theme.animate),
            duration_ms: self
                .props
                .animation_duration_ms
                .unwrap_or(self.theme.animation_duration_ms),
        }
    }

    /// One resolved color per configured series; a series' own `color`
    /// wins over the palette or the `colors` prop.
    pub fn series_colors(&mut self) -> Vec<String> {
        let count = self.props.series.len();
        let base = self
            .hooks
            .use_chart_colors(self.context, count, self.props.colors.as_deref());
        let resolver = self.context.resolver();
        self.props
            .series
            .iter()
            .enumerate()
            .map(|(index, series)| match &series.color {
                Some(color) => resolver.resolve_css_color(color),
                None if base.is_empty() => FALLBACK_LEGEND_COLOR.to_owned(),
                None => base[index % base.len()].clone(),
            })
            .collect()
    }

    /// Resolved colors for `count` items colored individually (slices, cells).
    pub fn item_colors(&mut self, count: usize) -> Rc<Vec<String>> {
        self.hooks
            .use_chart_colors(self.context, count, self.props.colors.as_deref())
    }

    #[must_use]
    pub fn shell(&self, plot: PlotArea) -> ChartShellProps {
        ChartShellProps {
            viewport: self.props.viewport,
            plot,
            background: self.theme.colors.background().to_owned(),
            class_name: self.props.class_name.clone(),
            aria_label: self.props.aria_label.clone(),
        }
    }

    pub fn hit(&mut self, bounds: Rect, target: HitTarget) {
        self.hits.push(bounds, target);
    }

    /// Emits the legend for `keys` and records their hit regions.
    pub fn legend(
        &mut self,
        scene: &mut P::Scene,
        keys: &[String],
        names: &IndexMap<String, String>,
        colors: &[String],
    ) {
        if !self.props.show_legend {
            return;
        }
        let payload = use_legend_payload(LegendPayloadInput {
            keys,
            names,
            colors,
            inactive_keys: self.visibility.hidden_keys(),
        });
        let props = ChartLegendLayer::layout(self.props.viewport, &payload, self.hover(), &self.theme);
        self.legend_keys.clear();
        self.legend_keys.extend(keys.iter().cloned());
        ChartLegendLayer::render(self.context.use_chart_components(), scene, &props, self.hits);
    }

    /// Emits the tooltip box when tooltips are enabled and `entries` is non-empty.
    pub fn tooltip(
        &self,
        scene: &mut P::Scene,
        anchor: Point,
        title: String,
        entries: Vec<TooltipEntry>,
        cursor: Option<Rect>,
    ) {
        if !self.props.show_tooltip || entries.is_empty() {
            return;
        }
        let props = ChartTooltipLayer::layout(
            self.props.viewport,
            anchor,
            title,
            entries,
            cursor,
            &self.theme,
        );
        ChartTooltipLayer::render(self.components(), scene, &props);
    }
}
