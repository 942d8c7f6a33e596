use approx::assert_relative_eq;
use chart_kit::core::Margins;
use chart_kit::shared::{MarginOptions, get_chart_margins};

#[test]
fn default_margins_leave_room_only_at_top_and_right() {
    let margins = get_chart_margins(&MarginOptions::default());
    assert_eq!(
        margins,
        Margins {
            top: 10.0,
            right: 10.0,
            bottom: 0.0,
            left: 0.0,
        }
    );
}

#[test]
fn horizontal_dual_axis_with_legend() {
    let margins = get_chart_margins(
        &MarginOptions::default()
            .horizontal(true)
            .dual_axis(true)
            .legend(true),
    );
    assert_eq!(
        margins,
        Margins {
            top: 10.0,
            right: 40.0,
            bottom: 30.0,
            left: 80.0,
        }
    );
}

#[test]
fn axis_labels_reserve_left_and_bottom() {
    let margins = get_chart_margins(&MarginOptions::default().axis_labels(true));
    assert_relative_eq!(margins.left, 60.0);
    assert_relative_eq!(margins.bottom, 40.0);

    // A legend takes the bottom band even when labels are present.
    let with_legend = get_chart_margins(&MarginOptions::default().axis_labels(true).legend(true));
    assert_relative_eq!(with_legend.bottom, 30.0);
    assert_relative_eq!(with_legend.left, 60.0);
}

#[test]
fn explicit_sides_override_the_rules() {
    let options = MarginOptions {
        top: Some(0.0),
        left: Some(12.5),
        ..MarginOptions::default().horizontal(true).legend(true)
    };
    let margins = get_chart_margins(&options);
    assert_relative_eq!(margins.top, 0.0);
    assert_relative_eq!(margins.left, 12.5);
    assert_relative_eq!(margins.right, 10.0);
    assert_relative_eq!(margins.bottom, 30.0);
}

#[test]
fn margin_options_deserialize_with_defaults() {
    let options: MarginOptions =
        serde_json::from_str(r#"{"hasDualAxis": true, "right": 55}"#).expect("options");
    assert!(options.has_dual_axis);
    assert!(!options.is_horizontal);
    assert_relative_eq!(get_chart_margins(&options).right, 55.0);
}
