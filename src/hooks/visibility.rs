use indexmap::IndexSet;
use tracing::trace;

/// Legend click payload; `data_key` is absent for decorative legend entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegendClick {
    pub data_key: Option<String>,
}

impl LegendClick {
    #[must_use]
    pub fn for_key(data_key: impl Into<String>) -> Self {
        Self {
            data_key: Some(data_key.into()),
        }
    }
}

/// Series toggled off through the legend, owned by one chart instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeriesVisibility {
    hidden: IndexSet<String>,
}

impl SeriesVisibility {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hides `key` when visible, shows it when hidden.
    pub fn toggle_series(&mut self, key: &str) {
        if !self.hidden.shift_remove(key) {
            self.hidden.insert(key.to_owned());
        }
        trace!(key, hidden = self.hidden.contains(key), "series visibility toggled");
    }

    #[must_use]
    pub fn is_hidden(&self, key: &str) -> bool {
        self.hidden.contains(key)
    }

    pub fn handle_legend_click(&mut self, click: &LegendClick) {
        if let Some(key) = click.data_key.as_deref() {
            self.toggle_series(key);
        }
    }

    #[must_use]
    pub fn hidden_keys(&self) -> &IndexSet<String> {
        &self.hidden
    }

    pub fn show_all(&mut self) {
        self.hidden.clear();
    }
}
