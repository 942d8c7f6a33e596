use serde::{Deserialize, Serialize};

use crate::theme::ColorResolver;

/// Named design-system color role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SemanticRole {
    Grid,
    Axis,
    Text,
    TextMuted,
    Background,
    BackgroundElevated,
    Border,
    Primary,
    Success,
    Warning,
    Error,
}

impl SemanticRole {
    pub const ALL: [SemanticRole; 11] = [
        SemanticRole::Grid,
        SemanticRole::Axis,
        SemanticRole::Text,
        SemanticRole::TextMuted,
        SemanticRole::Background,
        SemanticRole::BackgroundElevated,
        SemanticRole::Border,
        SemanticRole::Primary,
        SemanticRole::Success,
        SemanticRole::Warning,
        SemanticRole::Error,
    ];
}

/// Semantic color expressions, possibly still referencing custom properties.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SemanticColors {
    pub grid: String,
    pub axis: String,
    pub text: String,
    pub text_muted: String,
    pub background: String,
    pub background_elevated: String,
    pub border: String,
    pub primary: String,
    pub success: String,
    pub warning: String,
    pub error: String,
}

impl Default for SemanticColors {
    fn default() -> Self {
        Self {
            grid: "var(--chart-grid, #e5e7eb)".to_owned(),
            axis: "var(--chart-axis, #9ca3af)".to_owned(),
            text: "var(--chart-text, #111827)".to_owned(),
            text_muted: "var(--chart-text-muted, #6b7280)".to_owned(),
            background: "var(--chart-background, #ffffff)".to_owned(),
            background_elevated: "var(--chart-background-elevated, #ffffff)".to_owned(),
            border: "var(--chart-border, #d1d5db)".to_owned(),
            primary: "var(--chart-primary, #2563eb)".to_owned(),
            success: "var(--chart-success, #048660)".to_owned(),
            warning: "var(--chart-warning, #d97706)".to_owned(),
            error: "var(--chart-error, #dc2626)".to_owned(),
        }
    }
}

impl SemanticColors {
    #[must_use]
    pub fn get(&self, role: SemanticRole) -> &str {
        match role {
            SemanticRole::Grid => &self.grid,
            SemanticRole::Axis => &self.axis,
            SemanticRole::Text => &self.text,
            SemanticRole::TextMuted => &self.text_muted,
            SemanticRole::Background => &self.background,
            SemanticRole::BackgroundElevated => &self.background_elevated,
            SemanticRole::Border => &self.border,
            SemanticRole::Primary => &self.primary,
            SemanticRole::Success => &self.success,
            SemanticRole::Warning => &self.warning,
            SemanticRole::Error => &self.error,
        }
    }

    #[must_use]
    pub fn with_role(mut self, role: SemanticRole, value: impl Into<String>) -> Self {
        let slot = match role {
            SemanticRole::Grid => &mut self.grid,
            SemanticRole::Axis => &mut self.axis,
            SemanticRole::Text => &mut self.text,
            SemanticRole::TextMuted => &mut self.text_muted,
            SemanticRole::Background => &mut self.background,
            SemanticRole::BackgroundElevated => &mut self.background_elevated,
            SemanticRole::Border => &mut self.border,
            SemanticRole::Primary => &mut self.primary,
            SemanticRole::Success => &mut self.success,
            SemanticRole::Warning => &mut self.warning,
            SemanticRole::Error => &mut self.error,
        };
        *slot = value.into();
        self
    }

    /// Runs every role through the resolver. Roles that cannot be resolved
    /// keep their unresolved expression.
    #[must_use]
    pub fn resolve(&self, resolver: &ColorResolver) -> ResolvedSemanticColors {
        let resolve = |value: &String| resolver.resolve_css_color(value);
        ResolvedSemanticColors(Self {
            grid: resolve(&self.grid),
            axis: resolve(&self.axis),
            text: resolve(&self.text),
            text_muted: resolve(&self.text_muted),
            background: resolve(&self.background),
            background_elevated: resolve(&self.background_elevated),
            border: resolve(&self.border),
            primary: resolve(&self.primary),
            success: resolve(&self.success),
            warning: resolve(&self.warning),
            error: resolve(&self.error),
        })
    }
}

/// Semantic colors after resolution, ready for SVG `fill`/`stroke`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSemanticColors(SemanticColors);

impl ResolvedSemanticColors {
    #[must_use]
    pub fn get(&self, role: SemanticRole) -> &str {
        self.0.get(role)
    }

    #[must_use]
    pub fn as_colors(&self) -> &SemanticColors {
        &self.0
    }

    #[must_use]
    pub fn grid(&self) -> &str {
        &self.0.grid
    }

    #[must_use]
    pub fn axis(&self) -> &str {
        &self.0.axis
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.0.text
    }

    #[must_use]
    pub fn text_muted(&self) -> &str {
        &self.0.text_muted
    }

    #[must_use]
    pub fn background(&self) -> &str {
        &self.0.background
    }

    #[must_use]
    pub fn background_elevated(&self) -> &str {
        &self.0.background_elevated
    }

    #[must_use]
    pub fn border(&self) -> &str {
        &self.0.border
    }
}
