use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Custom-property table for one theme: `--name` to its declared value.
///
/// This stands in for the run-time stylesheet. Values are stored verbatim and
/// may reference other properties through `var()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenTable {
    tokens: IndexMap<String, String>,
}

impl TokenTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads every `--name: value;` declaration from a stylesheet fragment.
    ///
    /// Selectors and non-custom declarations are ignored; later declarations
    /// win, matching cascade order within a single rule set.
    pub fn from_declarations(css: &str) -> ChartResult<Self> {
        let stripped = strip_comments(css)?;
        let mut table = Self::new();
        for declaration in stripped.split([';', '{', '}']) {
            let Some((name, value)) = declaration.split_once(':') else {
                continue;
            };
            let name = name.trim();
            if !name.starts_with("--") {
                continue;
            }
            let value = value.trim();
            if value.is_empty() {
                return Err(ChartError::InvalidConfig(format!(
                    "custom property `{name}` has an empty value"
                )));
            }
            table.insert(name, value);
        }
        Ok(table)
    }

    /// Parses a JSON object of property names to values.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let raw: IndexMap<String, String> = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse tokens: {e}")))?;
        Ok(raw.into_iter().collect())
    }

    /// Declares (or overrides) one property. A missing `--` prefix is added.
    pub fn insert(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.tokens.insert(normalize_name(name.as_ref()), value.into());
    }

    #[must_use]
    pub fn with_token(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.tokens.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tokens.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for TokenTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (name, value) in iter {
            table.insert(name, value);
        }
        table
    }
}

fn normalize_name(name: &str) -> String {
    let name = name.trim();
    if name.starts_with("--") {
        name.to_owned()
    } else {
        format!("--{name}")
    }
}

fn strip_comments(css: &str) -> ChartResult<String> {
    let mut out = String::with_capacity(css.len());
    let mut rest = css;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        let Some(end) = rest[start + 2..].find("*/") else {
            return Err(ChartError::InvalidConfig(
                "unterminated comment in token stylesheet".to_owned(),
            ));
        };
        rest = &rest[start + 2 + end + 2..];
    }
    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declarations_ignore_selectors_and_plain_properties() {
        let table = TokenTable::from_declarations(
            ":root { --brand: #048660; color: red; /* note */ --grid: var(--brand); }",
        )
        .expect("parse");
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("--brand"), Some("#048660"));
        assert_eq!(table.get("--grid"), Some("var(--brand)"));
    }

    #[test]
    fn insert_adds_missing_prefix() {
        let table = TokenTable::new().with_token("brand", "red");
        assert_eq!(table.get("--brand"), Some("red"));
    }
}
