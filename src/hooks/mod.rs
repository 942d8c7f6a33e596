//! Per-render derivations from the chart context and chart props.
//!
//! Each chart instance owns one `ChartHooks`; its memo slots keep derived
//! values pointer-stable across renders until their inputs change.

mod legend;
mod memo;
mod theme;
mod visibility;

use std::rc::Rc;

use tracing::trace;

pub use legend::{
    FALLBACK_LEGEND_COLOR, LegendPayloadInput, LegendPayloadItem, use_legend_payload,
};
pub use memo::{Memo, MemoStats};
pub use theme::{ChartTheme, TooltipStyle};
pub use visibility::{LegendClick, SeriesVisibility};

use crate::context::{ChartContext, ChartPrimitives, ContextId};
use crate::theme::{ResolvedSemanticColors, SemanticColors};

type ColorsKey = (Option<Vec<String>>, usize, ContextId);

#[derive(Debug, Default)]
pub struct ChartHooks {
    colors: Memo<ColorsKey, Vec<String>>,
    semantic: Memo<(ContextId, SemanticColors), ResolvedSemanticColors>,
    theme: Memo<ContextId, ChartTheme>,
}

impl ChartHooks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolved series colors: `custom_colors` when given, otherwise the
    /// first `count` palette entries.
    ///
    /// Custom colors are used as-is in length; matching `count` is the
    /// caller's job.
    pub fn use_chart_colors<P: ChartPrimitives>(
        &mut self,
        context: &ChartContext<P>,
        count: usize,
        custom_colors: Option<&[String]>,
    ) -> Rc<Vec<String>> {
        let key = (custom_colors.map(<[String]>::to_vec), count, context.id());
        self.colors.get_or_compute(key, || {
            trace!(count, custom = custom_colors.is_some(), "resolving chart colors");
            let resolver = context.resolver();
            match custom_colors {
                Some(colors) => colors
                    .iter()
                    .map(|c| resolver.resolve_css_color(c))
                    .collect(),
                None => context
                    .get_colors(count)
                    .iter()
                    .map(|c| resolver.resolve_css_color(c))
                    .collect(),
            }
        })
    }

    pub fn use_resolved_semantic_colors<P: ChartPrimitives>(
        &mut self,
        context: &ChartContext<P>,
    ) -> Rc<ResolvedSemanticColors> {
        let unresolved = context.semantic_colors();
        let key = (context.id(), unresolved.clone());
        self.semantic
            .get_or_compute(key, || unresolved.resolve(context.resolver()))
    }

    pub fn use_chart_theme<P: ChartPrimitives>(
        &mut self,
        context: &ChartContext<P>,
    ) -> Rc<ChartTheme> {
        let colors = self.use_resolved_semantic_colors(context);
        self.theme.get_or_compute(context.id(), || {
            ChartTheme::derive(ResolvedSemanticColors::clone(&colors), context.config())
        })
    }

    #[must_use]
    pub fn colors_stats(&self) -> MemoStats {
        self.colors.stats()
    }

    #[must_use]
    pub fn semantic_stats(&self) -> MemoStats {
        self.semantic.stats()
    }
}
