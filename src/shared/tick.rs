use std::sync::Arc;

use serde_json::Value;

use crate::core::value_label;

/// Formatter hook for axis and tooltip text.
pub type ValueFormatter = Arc<dyn Fn(&Value) -> String + Send + Sync + 'static>;

const ELLIPSIS: char = '…';

/// Tick label cut to a maximum length; the full text stays available for
/// the tooltip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruncatedTick {
    pub text: String,
    pub full_text: String,
    pub truncated: bool,
}

impl TruncatedTick {
    /// Text to surface on hover, only when something was cut.
    #[must_use]
    pub fn tooltip(&self) -> Option<&str> {
        self.truncated.then_some(self.full_text.as_str())
    }
}

/// Cuts `label` to `max_chars` characters (ellipsis included).
#[must_use]
pub fn truncate_tick(label: &str, max_chars: usize) -> TruncatedTick {
    let count = label.chars().count();
    if max_chars == 0 || count <= max_chars {
        return TruncatedTick {
            text: label.to_owned(),
            full_text: label.to_owned(),
            truncated: false,
        };
    }
    let mut text: String = label.chars().take(max_chars.saturating_sub(1)).collect();
    text.push(ELLIPSIS);
    TruncatedTick {
        text,
        full_text: label.to_owned(),
        truncated: true,
    }
}

/// Numbers without float noise: `20` rather than `20.0`.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    let text = format!("{value:.4}");
    text.trim_end_matches('0').trim_end_matches('.').to_owned()
}

/// Applies `formatter` when present, otherwise the plain value text.
#[must_use]
pub fn format_value(formatter: Option<&ValueFormatter>, value: &Value) -> String {
    match formatter {
        Some(format) => format(value),
        None => match value.as_f64() {
            Some(number) => format_number(number),
            None => value_label(value),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_labels_keep_full_text() {
        let tick = truncate_tick("International Sales", 10);
        assert_eq!(tick.text, "Internati…");
        assert_eq!(tick.tooltip(), Some("International Sales"));
        assert!(truncate_tick("Q1", 10).tooltip().is_none());
    }

    #[test]
    fn numbers_drop_trailing_zeros() {
        assert_eq!(format_number(20.0), "20");
        assert_eq!(format_number(0.25), "0.25");
        assert_eq!(format_number(-3.5), "-3.5");
    }
}
