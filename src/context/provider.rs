use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::{ChartConfig, ChartPrimitives};
use crate::error::{ChartError, ChartResult};
use crate::theme::{ColorResolver, Palette, SemanticColors, TokenTable};

static NEXT_CONTEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one context value; memoized derivations key on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextId(u64);

impl ContextId {
    fn next() -> Self {
        Self(NEXT_CONTEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Serializable theme bundle for building a provider from one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderConfig {
    pub config: ChartConfig,
    pub semantic_colors: SemanticColors,
    pub palette: Palette,
    pub tokens: TokenTable,
}

/// Builder for a `ChartContext`.
#[derive(Debug, Clone, Default)]
pub struct ChartProvider {
    settings: ProviderConfig,
}

impl ChartProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_config(settings: ProviderConfig) -> Self {
        Self { settings }
    }

    /// Parses a `ProviderConfig` JSON document.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let settings: ProviderConfig = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse provider: {e}")))?;
        settings.config.validate()?;
        Ok(Self { settings })
    }

    #[must_use]
    pub fn with_config(mut self, config: ChartConfig) -> Self {
        self.settings.config = config;
        self
    }

    #[must_use]
    pub fn with_semantic_colors(mut self, semantic_colors: SemanticColors) -> Self {
        self.settings.semantic_colors = semantic_colors;
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.settings.palette = palette;
        self
    }

    #[must_use]
    pub fn with_tokens(mut self, tokens: TokenTable) -> Self {
        self.settings.tokens = tokens;
        self
    }

    #[must_use]
    pub fn settings(&self) -> &ProviderConfig {
        &self.settings
    }

    /// Freezes the settings into a context backed by `components`.
    pub fn provide<P: ChartPrimitives>(self, components: P) -> ChartResult<ChartContext<P>> {
        self.settings.config.validate()?;
        let ProviderConfig {
            config,
            semantic_colors,
            palette,
            tokens,
        } = self.settings;
        let context = ChartContext {
            id: ContextId::next(),
            config,
            semantic_colors,
            palette,
            resolver: ColorResolver::new(tokens),
            components,
        };
        debug!(
            context_id = context.id.get(),
            backend = context.components.backend_name(),
            palette_len = context.palette.len(),
            "chart context created"
        );
        Ok(context)
    }
}

/// Read-only configuration shared by every chart rendered through it.
///
/// Color expressions handed out here are unresolved; resolution happens in
/// the hook layer so plain CSS consumers keep their `var()` theming.
#[derive(Debug)]
pub struct ChartContext<P> {
    id: ContextId,
    config: ChartConfig,
    semantic_colors: SemanticColors,
    palette: Palette,
    resolver: ColorResolver,
    components: P,
}

impl<P: ChartPrimitives> ChartContext<P> {
    #[must_use]
    pub fn id(&self) -> ContextId {
        self.id
    }

    /// Palette entry for series `index`, cycling past the palette length.
    #[must_use]
    pub fn get_color(&self, index: usize) -> &str {
        self.palette.color(index)
    }

    /// Exactly `count` palette entries.
    #[must_use]
    pub fn get_colors(&self, count: usize) -> Vec<String> {
        self.palette.colors(count)
    }

    #[must_use]
    pub fn semantic_colors(&self) -> &SemanticColors {
        &self.semantic_colors
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    #[must_use]
    pub fn resolver(&self) -> &ColorResolver {
        &self.resolver
    }

    /// The backend's primitive set.
    #[must_use]
    pub fn use_chart_components(&self) -> &P {
        &self.components
    }
}
