use std::cell::{OnceCell, RefCell};

use tracing::{debug, trace, warn};

use crate::core::CssColor;
use crate::error::{ChartError, ChartResult};
use crate::theme::TokenTable;

/// Maximum `var()` reference chain followed before a value is treated as cyclic.
pub const MAX_VAR_DEPTH: usize = 32;

/// Maximum `var()` substitutions performed for one expression, across all
/// depths. Tokens that reference the same name several times fan out, so
/// depth alone does not bound the work.
pub const MAX_VAR_SUBSTITUTIONS: usize = 1024;

/// Scratch slot that plays the role of a hidden style-probe element.
///
/// Every resolution goes write → read → reset, in that order, so a call never
/// observes the expression left behind by a previous one.
#[derive(Debug, Default)]
struct ResolverProbe {
    background: Option<String>,
    uses: u64,
}

impl ResolverProbe {
    fn write(&mut self, expression: &str) {
        self.background = Some(expression.to_owned());
        self.uses += 1;
    }

    fn read(&self, tokens: &TokenTable) -> ChartResult<CssColor> {
        let Some(expression) = self.background.as_deref() else {
            return Ok(CssColor::transparent());
        };
        let mut budget = MAX_VAR_SUBSTITUTIONS;
        let substituted = substitute_vars(expression, tokens, 0, &mut budget)?;
        CssColor::parse(&substituted)
    }

    fn reset(&mut self) {
        self.background = None;
    }
}

/// Resolves CSS color expressions, including nested `var()` references,
/// against one theme's custom-property table.
///
/// Resolution is best effort: any failure returns the input unchanged.
#[derive(Debug, Default)]
pub struct ColorResolver {
    tokens: TokenTable,
    probe: OnceCell<RefCell<ResolverProbe>>,
}

impl ColorResolver {
    #[must_use]
    pub fn new(tokens: TokenTable) -> Self {
        Self {
            tokens,
            probe: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn tokens(&self) -> &TokenTable {
        &self.tokens
    }

    /// Resolves `value` to an absolute `rgb(...)`/`rgba(...)` string.
    ///
    /// Inputs without `var(` are returned as-is without touching the probe.
    /// Transparent results and failures fall back to the original input.
    #[must_use]
    pub fn resolve_css_color(&self, value: &str) -> String {
        if !value.contains("var(") {
            return value.to_owned();
        }

        let probe = self.probe.get_or_init(|| {
            debug!("initializing color resolver probe");
            RefCell::new(ResolverProbe::default())
        });
        let Ok(mut probe) = probe.try_borrow_mut() else {
            warn!(value, "color resolver probe busy; returning unresolved value");
            return value.to_owned();
        };

        probe.write(value);
        let computed = probe.read(&self.tokens);
        probe.reset();

        match computed {
            Ok(color) if !color.is_transparent() => color.to_css_string(),
            Ok(_) => {
                trace!(value, "color resolved to transparent; keeping unresolved value");
                value.to_owned()
            }
            Err(err) => {
                debug!(value, error = %err, "color resolution failed; keeping unresolved value");
                value.to_owned()
            }
        }
    }

    /// Resolves and parses in one step; `None` when the result is not an
    /// absolute color.
    #[must_use]
    pub fn resolve_absolute(&self, value: &str) -> Option<CssColor> {
        CssColor::parse(&self.resolve_css_color(value)).ok()
    }

    #[must_use]
    pub fn is_probe_initialized(&self) -> bool {
        self.probe.get().is_some()
    }

    /// Number of expressions written to the probe so far.
    #[must_use]
    pub fn probe_uses(&self) -> u64 {
        self.probe
            .get()
            .and_then(|probe| probe.try_borrow().ok().map(|p| p.uses))
            .unwrap_or(0)
    }
}

/// Replaces every `var(--name[, fallback])` in `expression` with its value.
fn substitute_vars(
    expression: &str,
    tokens: &TokenTable,
    depth: usize,
    budget: &mut usize,
) -> ChartResult<String> {
    let mut out = String::with_capacity(expression.len());
    let mut rest = expression;

    while let Some(start) = rest.find("var(") {
        out.push_str(&rest[..start]);
        let args_start = start + "var(".len();
        let close = matching_paren(&rest[args_start..]).ok_or_else(|| {
            ChartError::InvalidColor(format!("unbalanced var() in `{expression}`"))
        })?;
        let args = &rest[args_start..args_start + close];
        out.push_str(&resolve_reference(args, tokens, depth, budget)?);
        rest = &rest[args_start + close + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

fn resolve_reference(
    args: &str,
    tokens: &TokenTable,
    depth: usize,
    budget: &mut usize,
) -> ChartResult<String> {
    let (name, fallback) = match top_level_comma(args) {
        Some(index) => (args[..index].trim(), Some(args[index + 1..].trim())),
        None => (args.trim(), None),
    };
    if !name.starts_with("--") {
        return Err(ChartError::InvalidColor(format!(
            "var() expects a custom property name, got `{name}`"
        )));
    }
    if depth >= MAX_VAR_DEPTH {
        return Err(ChartError::TokenCycle {
            token: name.to_owned(),
            depth,
        });
    }
    *budget = budget.checked_sub(1).ok_or(ChartError::TokenExpansionLimit {
        limit: MAX_VAR_SUBSTITUTIONS,
    })?;

    match (tokens.get(name), fallback) {
        (Some(value), _) => substitute_vars(value, tokens, depth + 1, budget),
        (None, Some(fallback)) => substitute_vars(fallback, tokens, depth + 1, budget),
        (None, None) => Err(ChartError::UnresolvedToken(name.to_owned())),
    }
}

/// Byte offset of the `)` closing an already-opened paren.
fn matching_paren(input: &str) -> Option<usize> {
    let mut level = 0usize;
    for (index, ch) in input.char_indices() {
        match ch {
            '(' => level += 1,
            ')' if level == 0 => return Some(index),
            ')' => level -= 1,
            _ => {}
        }
    }
    None
}

fn top_level_comma(input: &str) -> Option<usize> {
    let mut level = 0usize;
    for (index, ch) in input.char_indices() {
        match ch {
            '(' => level += 1,
            ')' => level = level.saturating_sub(1),
            ',' if level == 0 => return Some(index),
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens() -> TokenTable {
        TokenTable::new()
            .with_token("--green-500", "#048660")
            .with_token("--success", "var(--green-500)")
            .with_token("--a", "var(--b)")
            .with_token("--b", "var(--a)")
    }

    fn expand(expression: &str) -> ChartResult<String> {
        let mut budget = MAX_VAR_SUBSTITUTIONS;
        substitute_vars(expression, &tokens(), 0, &mut budget)
    }

    #[test]
    fn substitutes_chained_references() {
        let out = expand("var(--success)").expect("substitute");
        assert_eq!(out, "#048660");
    }

    #[test]
    fn nested_fallbacks_are_followed() {
        let out = expand("var(--missing, var(--also-missing, rgb(1, 2, 3)))")
            .expect("substitute");
        assert_eq!(out, "rgb(1, 2, 3)");
    }

    #[test]
    fn cycles_are_reported() {
        let err = expand("var(--a)").expect_err("cycle");
        assert!(matches!(err, ChartError::TokenCycle { .. }));
    }

    #[test]
    fn fan_out_stops_at_the_substitution_budget() {
        let mut table = TokenTable::new().with_token("--t24", "#048660");
        for level in 0..24 {
            let next = level + 1;
            table = table.with_token(format!("--t{level}"), format!("var(--t{next}) var(--t{next})"));
        }
        let mut budget = MAX_VAR_SUBSTITUTIONS;
        let err = substitute_vars("var(--t0)", &table, 0, &mut budget).expect_err("fan-out");
        assert!(matches!(err, ChartError::TokenExpansionLimit { .. }));
        assert_eq!(budget, 0);
    }

    #[test]
    fn probe_is_reset_after_each_read() {
        let resolver = ColorResolver::new(tokens());
        let _ = resolver.resolve_css_color("var(--success)");
        let probe = resolver.probe.get().expect("probe created").borrow();
        assert!(probe.background.is_none());
        assert_eq!(probe.uses, 1);
    }
}
