use chart_kit::core::CssColor;
use chart_kit::theme::{ColorResolver, TokenTable};
use proptest::prelude::*;
use std::time::{Duration, Instant};

fn theme_tokens() -> TokenTable {
    TokenTable::from_declarations(
        r"
        :root {
            /* base ramp */
            --green-500: #048660;
            --chart-success: var(--green-500);
            --chart-grid: rgba(0, 0, 0, 0.1);
            --unset: transparent;
            --loop-a: var(--loop-b);
            --loop-b: var(--loop-a);
        }
        ",
    )
    .expect("valid declarations")
}

#[test]
fn chained_tokens_resolve_to_computed_rgb() {
    let resolver = ColorResolver::new(theme_tokens());
    assert_eq!(
        resolver.resolve_css_color("var(--chart-success)"),
        "rgb(4, 134, 96)"
    );
    assert_eq!(
        resolver.resolve_css_color("var(--chart-grid)"),
        "rgba(0, 0, 0, 0.1)"
    );
}

#[test]
fn fallback_argument_is_used_for_missing_tokens() {
    let resolver = ColorResolver::new(theme_tokens());
    assert_eq!(
        resolver.resolve_css_color("var(--chart-missing, #ff0000)"),
        "rgb(255, 0, 0)"
    );
}

#[test]
fn unresolvable_input_is_returned_unchanged() {
    let resolver = ColorResolver::new(theme_tokens());
    for input in [
        "var(--nope)",
        "var(--unset)",
        "var(--loop-a)",
        "var(--green-500",
        "var(not-a-token)",
    ] {
        assert_eq!(resolver.resolve_css_color(input), input);
    }
}

#[test]
fn absolute_input_never_touches_the_probe() {
    let resolver = ColorResolver::new(theme_tokens());
    assert_eq!(resolver.resolve_css_color("#048660"), "#048660");
    assert_eq!(resolver.resolve_css_color("rebeccapurple"), "rebeccapurple");
    assert!(!resolver.is_probe_initialized());

    let _ = resolver.resolve_css_color("var(--chart-success)");
    let _ = resolver.resolve_css_color("var(--chart-grid)");
    assert!(resolver.is_probe_initialized());
    assert_eq!(resolver.probe_uses(), 2);
}

#[test]
fn interleaved_calls_do_not_see_previous_values() {
    let resolver = ColorResolver::new(theme_tokens());
    let first = resolver.resolve_css_color("var(--chart-success)");
    let missing = resolver.resolve_css_color("var(--nope)");
    let again = resolver.resolve_css_color("var(--chart-success)");
    assert_eq!(first, again);
    assert_eq!(missing, "var(--nope)");
}

#[test]
fn resolved_output_parses_as_absolute_color() {
    let resolver = ColorResolver::new(theme_tokens());
    let color = resolver
        .resolve_absolute("var(--chart-success)")
        .expect("absolute color");
    assert_eq!(color, CssColor::rgb(4, 134, 96));
}

#[test]
fn fan_out_tokens_fall_back_to_the_input_promptly() {
    let mut tokens = TokenTable::new().with_token("--t32", "#048660");
    for level in 0..32 {
        let next = level + 1;
        tokens = tokens.with_token(format!("--t{level}"), format!("var(--t{next}) var(--t{next})"));
    }
    let resolver = ColorResolver::new(tokens);

    let started = Instant::now();
    let out = resolver.resolve_css_color("var(--t0)");

    assert_eq!(out, "var(--t0)");
    assert!(started.elapsed() < Duration::from_secs(1));
    assert_eq!(
        resolver.resolve_css_color("var(--t31)"),
        "var(--t31)",
        "two references concatenated are not a single color"
    );
}

proptest! {
    #[test]
    fn inputs_without_var_pass_through(input in "[^v]{0,24}|v[^a]{0,8}") {
        prop_assume!(!input.contains("var("));
        let resolver = ColorResolver::new(theme_tokens());
        prop_assert_eq!(resolver.resolve_css_color(&input), input);
        prop_assert!(!resolver.is_probe_initialized());
    }

    #[test]
    fn resolution_is_idempotent(
        token in prop::sample::select(vec![
            "--chart-success", "--chart-grid", "--green-500", "--unset", "--loop-a", "--nope",
        ]),
        fallback in prop::option::of(prop::sample::select(vec!["#123456", "red", "var(--green-500)"])),
    ) {
        let resolver = ColorResolver::new(theme_tokens());
        let input = match fallback {
            Some(fallback) => format!("var({token}, {fallback})"),
            None => format!("var({token})"),
        };
        let once = resolver.resolve_css_color(&input);
        let twice = resolver.resolve_css_color(&once);
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(resolver.resolve_css_color(&input), once);
    }
}
