use chart_kit::context::{ChartConfig, ChartProvider, ProviderConfig};
use chart_kit::theme::{Palette, SemanticColors, SemanticRole, TokenTable};
use chart_kit::{ChartError, ChartPrimitives, FramePrimitives, SvgPrimitives};
use proptest::prelude::*;

#[test]
fn default_context_exposes_config_palette_and_backend() {
    let context = ChartProvider::new()
        .provide(SvgPrimitives::new())
        .expect("context");

    assert!(context.config().animate);
    assert_eq!(context.config().animation_duration_ms, 400);
    assert_eq!(context.palette().len(), 8);
    assert_eq!(context.get_colors(3).len(), 3);
    assert_eq!(
        context.semantic_colors().get(SemanticRole::Grid),
        "var(--chart-grid, #e5e7eb)"
    );
    assert_eq!(context.use_chart_components().backend_name(), "svg");
}

#[test]
fn each_provided_context_gets_a_fresh_identity() {
    let a = ChartProvider::new()
        .provide(FramePrimitives::default())
        .expect("context");
    let b = ChartProvider::new()
        .provide(FramePrimitives::default())
        .expect("context");
    assert_ne!(a.id(), b.id());
}

#[test]
fn get_colors_cycles_past_the_palette() {
    let palette = Palette::new(["#111111", "#222222"]).expect("palette");
    let context = ChartProvider::new()
        .with_palette(palette)
        .provide(FramePrimitives::default())
        .expect("context");

    assert_eq!(
        context.get_colors(5),
        vec!["#111111", "#222222", "#111111", "#222222", "#111111"]
    );
    assert_eq!(context.get_color(3), "#222222");
    assert!(context.get_colors(0).is_empty());
}

#[test]
fn empty_palette_is_rejected() {
    let err = Palette::new(Vec::<String>::new()).expect_err("empty palette");
    assert!(matches!(err, ChartError::EmptyPalette));

    let err = ChartProvider::from_json_str(r#"{"palette": []}"#).expect_err("empty palette");
    assert!(matches!(err, ChartError::InvalidConfig(_)));
}

#[test]
fn invalid_config_fails_at_provide_time() {
    let err = ChartProvider::new()
        .with_config(ChartConfig::default().with_spacing("m", -1.0))
        .provide(FramePrimitives::default())
        .expect_err("negative spacing");
    assert!(matches!(err, ChartError::InvalidConfig(_)));
}

#[test]
fn provider_loads_a_full_theme_document() {
    let provider = ChartProvider::from_json_str(
        r##"{
            "config": { "animate": false, "animationDurationMs": 250 },
            "palette": ["var(--brand)", "#00ff00"],
            "semanticColors": { "grid": "var(--brand)" },
            "tokens": { "--brand": "#ff8800" }
        }"##,
    )
    .expect("provider");
    let context = provider.provide(FramePrimitives::default()).expect("context");

    assert!(!context.config().animate);
    assert_eq!(context.config().animation_duration_ms, 250);
    assert_eq!(context.config().radius("m"), 6.0);
    assert_eq!(context.get_color(0), "var(--brand)");
    assert_eq!(
        context.resolver().resolve_css_color(context.get_color(0)),
        "rgb(255, 136, 0)"
    );
    assert_eq!(context.semantic_colors().grid, "var(--brand)");
    assert_eq!(
        context.semantic_colors().axis,
        SemanticColors::default().axis
    );
}

#[test]
fn config_round_trips_through_json() {
    let config = ChartConfig::default()
        .with_animate(false)
        .with_animation_duration_ms(120)
        .with_border_radius("xxl", 20.0)
        .with_shadow("xl", "0 20px 25px rgba(0, 0, 0, 0.15)");
    let json = config.to_json_pretty().expect("serialize");
    let parsed = ChartConfig::from_json_str(&json).expect("parse");
    assert_eq!(parsed, config);
    assert_eq!(parsed.radius("xxl"), 20.0);
    assert_eq!(parsed.radius("missing"), 0.0);
}

#[test]
fn provider_settings_round_trip_through_json() {
    let settings = ProviderConfig {
        tokens: TokenTable::default().with_token("--chart-grid", "#eeeeee"),
        semantic_colors: SemanticColors::default().with_role(SemanticRole::Error, "#ff0000"),
        ..ProviderConfig::default()
    };
    let json = serde_json::to_string(&settings).expect("serialize");
    let parsed: ProviderConfig = serde_json::from_str(&json).expect("parse");
    assert_eq!(parsed, settings);
}

proptest! {
    #[test]
    fn palette_lookup_is_deterministic_and_cyclic(
        colors in prop::collection::vec("#[0-9a-f]{6}", 1..12),
        count in 0usize..40,
    ) {
        let palette = Palette::new(colors.clone()).expect("palette");
        let context = ChartProvider::new()
            .with_palette(palette)
            .provide(FramePrimitives::default())
            .expect("context");

        let picked = context.get_colors(count);
        prop_assert_eq!(picked.len(), count);
        for (index, color) in picked.iter().enumerate() {
            prop_assert_eq!(color, &colors[index % colors.len()]);
            prop_assert_eq!(context.get_color(index), color.as_str());
        }
        prop_assert_eq!(context.get_colors(count), picked);
    }
}
