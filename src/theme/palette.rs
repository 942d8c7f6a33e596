use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Ordered series colors. Index `i` always maps to `colors[i % len]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Palette {
    colors: Vec<String>,
}

impl Palette {
    pub fn new<I, S>(colors: I) -> ChartResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let colors: Vec<String> = colors.into_iter().map(Into::into).collect();
        if colors.is_empty() {
            return Err(ChartError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    #[must_use]
    pub fn color(&self, index: usize) -> &str {
        &self.colors[index % self.colors.len()]
    }

    /// Exactly `count` colors, cycling when `count` exceeds the palette.
    #[must_use]
    pub fn colors(&self, count: usize) -> Vec<String> {
        (0..count).map(|i| self.color(i).to_owned()).collect()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.colors
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: [
                "var(--chart-series-1, #2563eb)",
                "var(--chart-series-2, #048660)",
                "var(--chart-series-3, #d97706)",
                "var(--chart-series-4, #dc2626)",
                "var(--chart-series-5, #7c3aed)",
                "var(--chart-series-6, #0891b2)",
                "var(--chart-series-7, #db2777)",
                "var(--chart-series-8, #65a30d)",
            ]
            .into_iter()
            .map(str::to_owned)
            .collect(),
        }
    }
}

impl TryFrom<Vec<String>> for Palette {
    type Error = ChartError;

    fn try_from(colors: Vec<String>) -> ChartResult<Self> {
        Self::new(colors)
    }
}

impl From<Palette> for Vec<String> {
    fn from(palette: Palette) -> Self {
        palette.colors
    }
}
