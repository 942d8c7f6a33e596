use approx::assert_relative_eq;
use chart_kit::ChartInstance;
use chart_kit::core::Rect;
use chart_kit::hooks::{LegendClick, SeriesVisibility};
use chart_kit::interaction::{
    ChartEvent, HitMap, HitTarget, HoverSource, HoverState, SeriesEmphasis,
};
use chart_kit::shared::{
    ACTIVE_DOT_RADIUS, ACTIVE_STROKE_WIDTH, DEFAULT_DOT_RADIUS, DEFAULT_STROKE_WIDTH,
    DIMMED_OPACITY,
};
use proptest::prelude::*;

#[test]
fn toggling_a_series_twice_restores_it() {
    let mut visibility = SeriesVisibility::new();
    visibility.toggle_series("revenue");
    assert!(visibility.is_hidden("revenue"));
    assert!(!visibility.is_hidden("cost"));

    visibility.toggle_series("revenue");
    assert!(!visibility.is_hidden("revenue"));
    assert!(visibility.hidden_keys().is_empty());
}

#[test]
fn legend_click_without_key_is_ignored() {
    let mut visibility = SeriesVisibility::new();
    visibility.handle_legend_click(&LegendClick::default());
    assert!(visibility.hidden_keys().is_empty());

    visibility.handle_legend_click(&LegendClick::for_key("cost"));
    assert!(visibility.is_hidden("cost"));
}

#[test]
fn hovering_one_series_dims_every_other() {
    let mut instance = ChartInstance::new();
    assert!(instance.dispatch(ChartEvent::DataEnter {
        index: 1,
        datum: Some(4),
    }));

    assert_eq!(instance.hover(), HoverState::Hovering(1));
    assert_eq!(instance.interaction().active_datum(), Some(4));
    assert_eq!(instance.interaction().source(), Some(HoverSource::Data));
    assert!(instance.is_dimmed(0));
    assert!(!instance.is_dimmed(1));
    assert!(instance.is_dimmed(2));

    assert!(instance.dispatch(ChartEvent::DataLeave));
    assert_eq!(instance.hover(), HoverState::Idle);
    assert!((0..3).all(|index| !instance.is_dimmed(index)));
}

#[test]
fn legend_hover_replaces_data_hover() {
    let mut instance = ChartInstance::new();
    instance.dispatch(ChartEvent::DataEnter {
        index: 0,
        datum: None,
    });
    instance.dispatch(ChartEvent::LegendEnter { index: 2 });
    assert_eq!(instance.hover(), HoverState::Hovering(2));
    assert_eq!(instance.interaction().source(), Some(HoverSource::Legend));

    // Repeating the same hover is not a change.
    assert!(!instance.dispatch(ChartEvent::LegendEnter { index: 2 }));
}

#[test]
fn hover_never_touches_hidden_series() {
    let mut instance = ChartInstance::new();
    instance.toggle_series("b");
    instance.dispatch(ChartEvent::LegendEnter { index: 1 });
    instance.dispatch(ChartEvent::LegendLeave);
    assert!(instance.visibility().is_hidden("b"));
    assert_eq!(instance.visibility().hidden_keys().len(), 1);
}

#[test]
fn legend_click_event_reports_a_change() {
    let mut instance = ChartInstance::new();
    assert!(instance.dispatch(ChartEvent::LegendClick(LegendClick::for_key("a"))));
    assert!(instance.visibility().is_hidden("a"));
    assert!(!instance.dispatch(ChartEvent::LegendClick(LegendClick::default())));
}

#[test]
fn hidden_wins_over_hover_emphasis() {
    let hidden = SeriesEmphasis::resolve(0, true, HoverState::Hovering(0));
    assert!(!hidden.visible);
    assert!(!hidden.active);

    let dimmed = SeriesEmphasis::resolve(0, false, HoverState::Hovering(1));
    assert!(dimmed.visible);
    assert_relative_eq!(dimmed.opacity, DIMMED_OPACITY);
    assert_relative_eq!(dimmed.stroke_width, DEFAULT_STROKE_WIDTH);

    let active = SeriesEmphasis::resolve(1, false, HoverState::Hovering(1));
    assert!(active.active);
    assert_relative_eq!(active.opacity, 1.0);
    assert_relative_eq!(active.stroke_width, ACTIVE_STROKE_WIDTH);
    assert_relative_eq!(active.dot_radius, ACTIVE_DOT_RADIUS);

    let idle = SeriesEmphasis::resolve(1, false, HoverState::Idle);
    assert!(!idle.active);
    assert_relative_eq!(idle.dot_radius, DEFAULT_DOT_RADIUS);
}

#[test]
fn hit_map_prefers_the_topmost_region() {
    let mut hits = HitMap::default();
    hits.push(
        Rect::new(0.0, 0.0, 100.0, 100.0),
        HitTarget::Series {
            index: 0,
            datum: None,
        },
    );
    hits.push(Rect::new(40.0, 40.0, 20.0, 20.0), HitTarget::Legend { index: 3 });

    assert_eq!(hits.hit_test(50.0, 50.0), Some(HitTarget::Legend { index: 3 }));
    assert_eq!(
        hits.hit_test(10.0, 10.0),
        Some(HitTarget::Series {
            index: 0,
            datum: None
        })
    );
    assert_eq!(hits.hit_test(150.0, 10.0), None);
}

proptest! {
    #[test]
    fn toggle_is_an_involution(
        ops in prop::collection::vec(prop::sample::select(vec!["a", "b", "c", "d"]), 0..24),
    ) {
        let mut visibility = SeriesVisibility::new();
        for key in &ops {
            visibility.toggle_series(key);
        }
        for key in ["a", "b", "c", "d"] {
            let toggles = ops.iter().filter(|op| **op == key).count();
            prop_assert_eq!(visibility.is_hidden(key), toggles % 2 == 1);
        }
        let snapshot = visibility.clone();
        for key in &ops {
            visibility.toggle_series(key);
            visibility.toggle_series(key);
        }
        prop_assert_eq!(visibility, snapshot);
    }

    #[test]
    fn at_most_one_series_is_active(
        hovered in 0usize..6,
        series in 1usize..6,
    ) {
        let mut instance = ChartInstance::new();
        instance.dispatch(ChartEvent::LegendEnter { index: hovered });
        let active = (0..series)
            .filter(|index| instance.hover().is_active(*index))
            .count();
        prop_assert!(active <= 1);
        for index in 0..series {
            prop_assert_eq!(instance.is_dimmed(index), index != hovered);
        }
    }
}
