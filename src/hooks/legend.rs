use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Color used when no series colors are available at all.
pub const FALLBACK_LEGEND_COLOR: &str = "currentColor";

/// One legend entry derived from series keys, names and colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendPayloadItem {
    pub value: String,
    pub data_key: String,
    pub color: String,
    pub inactive: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct LegendPayloadInput<'a> {
    pub keys: &'a [String],
    pub names: &'a IndexMap<String, String>,
    pub colors: &'a [String],
    pub inactive_keys: &'a IndexSet<String>,
}

/// Zips keys, display names, colors and the inactive set into legend items.
///
/// Colors cycle when there are fewer colors than keys.
#[must_use]
pub fn use_legend_payload(input: LegendPayloadInput<'_>) -> Vec<LegendPayloadItem> {
    input
        .keys
        .iter()
        .enumerate()
        .map(|(index, key)| LegendPayloadItem {
            value: input.names.get(key).unwrap_or(key).clone(),
            data_key: key.clone(),
            color: if input.colors.is_empty() {
                FALLBACK_LEGEND_COLOR.to_owned()
            } else {
                input.colors[index % input.colors.len()].clone()
            },
            inactive: input.inactive_keys.contains(key),
        })
        .collect()
}
