use std::cell::Cell;
use std::rc::Rc;

use chart_kit::context::ChartProvider;
use chart_kit::hooks::{
    ChartHooks, FALLBACK_LEGEND_COLOR, LegendPayloadInput, LegendPayloadItem, Memo, MemoStats,
    use_legend_payload,
};
use chart_kit::theme::{Palette, TokenTable};
use chart_kit::FramePrimitives;
use indexmap::{IndexMap, IndexSet};
use proptest::prelude::*;

fn keys(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_owned()).collect()
}

#[test]
fn legend_payload_zips_names_colors_and_hidden_keys() {
    let keys = keys(&["revenue", "cost"]);
    let names: IndexMap<String, String> = [("revenue".to_owned(), "Revenue".to_owned())]
        .into_iter()
        .collect();
    let colors = vec!["#2563eb".to_owned(), "#048660".to_owned()];
    let inactive: IndexSet<String> = ["cost".to_owned()].into_iter().collect();

    let payload = use_legend_payload(LegendPayloadInput {
        keys: &keys,
        names: &names,
        colors: &colors,
        inactive_keys: &inactive,
    });

    assert_eq!(
        payload,
        vec![
            LegendPayloadItem {
                value: "Revenue".to_owned(),
                data_key: "revenue".to_owned(),
                color: "#2563eb".to_owned(),
                inactive: false,
            },
            LegendPayloadItem {
                value: "cost".to_owned(),
                data_key: "cost".to_owned(),
                color: "#048660".to_owned(),
                inactive: true,
            },
        ]
    );
}

#[test]
fn legend_payload_without_colors_uses_current_color() {
    let keys = keys(&["a"]);
    let payload = use_legend_payload(LegendPayloadInput {
        keys: &keys,
        names: &IndexMap::new(),
        colors: &[],
        inactive_keys: &IndexSet::new(),
    });
    assert_eq!(payload[0].color, FALLBACK_LEGEND_COLOR);
}

#[test]
fn chart_colors_are_resolved_and_pointer_stable() {
    let context = ChartProvider::new()
        .with_palette(Palette::new(["var(--brand)", "#00ff00"]).expect("palette"))
        .with_tokens(TokenTable::new().with_token("--brand", "#ff0000"))
        .provide(FramePrimitives::default())
        .expect("context");
    let mut hooks = ChartHooks::new();

    let first = hooks.use_chart_colors(&context, 3, None);
    assert_eq!(
        *first,
        vec!["rgb(255, 0, 0)", "#00ff00", "rgb(255, 0, 0)"]
    );

    let second = hooks.use_chart_colors(&context, 3, None);
    assert!(Rc::ptr_eq(&first, &second));
    assert_eq!(hooks.colors_stats(), MemoStats { hits: 1, misses: 1 });

    let grown = hooks.use_chart_colors(&context, 4, None);
    assert!(!Rc::ptr_eq(&first, &grown));
    assert_eq!(grown.len(), 4);
}

#[test]
fn custom_colors_replace_the_palette_verbatim_in_length() {
    let context = ChartProvider::new()
        .with_tokens(TokenTable::new().with_token("--accent", "rgba(0, 0, 255, 0.5)"))
        .provide(FramePrimitives::default())
        .expect("context");
    let mut hooks = ChartHooks::new();
    let custom = vec!["var(--accent)".to_owned(), "tomato".to_owned()];

    let colors = hooks.use_chart_colors(&context, 5, Some(custom.as_slice()));
    assert_eq!(*colors, vec!["rgba(0, 0, 255, 0.5)", "tomato"]);
}

#[test]
fn a_new_context_invalidates_memoized_values() {
    let mut hooks = ChartHooks::new();
    let first_context = ChartProvider::new()
        .provide(FramePrimitives::default())
        .expect("context");
    let second_context = ChartProvider::new()
        .provide(FramePrimitives::default())
        .expect("context");

    let a = hooks.use_resolved_semantic_colors(&first_context);
    let b = hooks.use_resolved_semantic_colors(&first_context);
    assert!(Rc::ptr_eq(&a, &b));

    let c = hooks.use_resolved_semantic_colors(&second_context);
    assert!(!Rc::ptr_eq(&a, &c));
    assert_eq!(*a, *c);
    assert_eq!(hooks.semantic_stats(), MemoStats { hits: 1, misses: 2 });
}

#[test]
fn chart_theme_follows_context_config() {
    let context = ChartProvider::new()
        .with_config(
            chart_kit::ChartConfig::default()
                .with_animate(false)
                .with_animation_duration_ms(90),
        )
        .provide(FramePrimitives::default())
        .expect("context");
    let mut hooks = ChartHooks::new();
    let theme = hooks.use_chart_theme(&context);
    assert!(!theme.animate);
    assert_eq!(theme.animation_duration_ms, 90);
    assert!(Rc::ptr_eq(&theme, &hooks.use_chart_theme(&context)));
}

#[test]
fn memo_recomputes_only_on_key_change() {
    let mut memo: Memo<u32, String> = Memo::default();
    let computed = Cell::new(0);
    let compute = |key: u32| {
        computed.set(computed.get() + 1);
        format!("value-{key}")
    };

    let a = memo.get_or_compute(1, || compute(1));
    let b = memo.get_or_compute(1, || compute(1));
    let c = memo.get_or_compute(2, || compute(2));
    assert!(Rc::ptr_eq(&a, &b));
    assert_eq!(*c, "value-2");
    assert_eq!(computed.get(), 2);

    memo.clear();
    let _ = memo.get_or_compute(2, || compute(2));
    assert_eq!(computed.get(), 3);
}

proptest! {
    #[test]
    fn legend_payload_is_one_item_per_key(
        raw_keys in prop::collection::btree_set("[a-z]{1,6}", 0..10),
        colors in prop::collection::vec("#[0-9a-f]{6}", 0..5),
        hidden_mask in prop::collection::vec(any::<bool>(), 10),
    ) {
        let keys: Vec<String> = raw_keys.into_iter().collect();
        let inactive: IndexSet<String> = keys
            .iter()
            .zip(&hidden_mask)
            .filter(|(_, hidden)| **hidden)
            .map(|(key, _)| key.clone())
            .collect();
        let names = IndexMap::new();

        let payload = use_legend_payload(LegendPayloadInput {
            keys: &keys,
            names: &names,
            colors: &colors,
            inactive_keys: &inactive,
        });

        prop_assert_eq!(payload.len(), keys.len());
        for (index, item) in payload.iter().enumerate() {
            prop_assert_eq!(&item.data_key, &keys[index]);
            prop_assert_eq!(&item.value, &keys[index]);
            prop_assert_eq!(item.inactive, inactive.contains(&keys[index]));
            if colors.is_empty() {
                prop_assert_eq!(item.color.as_str(), FALLBACK_LEGEND_COLOR);
            } else {
                prop_assert_eq!(&item.color, &colors[index % colors.len()]);
            }
        }
    }
}
