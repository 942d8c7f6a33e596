use chart_kit::charts::{
    AreaChart, BarChart, Chart, ComposedChart, LineChart, PieChart, RadarChart, ScatterChart,
};
use chart_kit::context::ChartContext;
use chart_kit::core::{ChartLayout, Viewport};
use chart_kit::interaction::{ChartEvent, HitTarget, HoverState};
use chart_kit::render::{NullRenderer, Renderer};
use chart_kit::theme::TokenTable;
use chart_kit::{
    ChartError, ChartInstance, ChartProps, ChartProvider, FramePrimitives, SeriesConfig,
    SvgPrimitives,
};

const MONTHLY: &str = r#"[
    {"name": "Jan", "revenue": 120, "cost": 80},
    {"name": "Feb", "revenue": 150, "cost": 95},
    {"name": "Mar", "revenue": 90, "cost": 110}
]"#;

fn monthly_props() -> ChartProps {
    ChartProps::from_json_data(MONTHLY, "name")
        .expect("chart data")
        .with_series(SeriesConfig::new("revenue").with_name("Revenue"))
        .with_series(SeriesConfig::new("cost"))
        .with_viewport(Viewport::new(640, 320))
}

fn svg_context() -> ChartContext<SvgPrimitives> {
    ChartProvider::new()
        .with_tokens(TokenTable::new().with_token("--brand", "#ff8800"))
        .provide(SvgPrimitives::new())
        .expect("svg context")
}

fn frame_context() -> ChartContext<FramePrimitives> {
    ChartProvider::new()
        .provide(FramePrimitives::default())
        .expect("frame context")
}

fn render_svg<C: Chart>(instance: &mut ChartInstance, chart: &C) -> String {
    instance
        .render(&svg_context(), chart)
        .expect("svg render")
        .markup
}

fn assert_renders_through_frame<C: Chart>(chart: &C) {
    let context = frame_context();
    let mut instance = ChartInstance::new();
    let frame = instance.render(&context, chart).expect("frame render");
    frame.validate().expect("valid frame");
    assert!(!frame.is_empty(), "{:?} produced an empty frame", chart.kind());

    let mut renderer = NullRenderer::default();
    renderer.render(&frame).expect("null render");
    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_text_count, frame.texts.len());
}

#[test]
fn every_leaf_chart_renders_through_the_frame_backend() {
    assert_renders_through_frame(&LineChart::new(monthly_props()));
    assert_renders_through_frame(&AreaChart::new(monthly_props()));
    assert_renders_through_frame(&BarChart::new(monthly_props()));
    assert_renders_through_frame(&ComposedChart::new(monthly_props()).with_bar_key("cost"));
    assert_renders_through_frame(&PieChart::new(monthly_props()).donut(0.5));
    assert_renders_through_frame(&RadarChart::new(monthly_props()));

    let scatter = ChartProps::from_json_data(
        r#"[{"x": 1, "y": 4, "z": 10}, {"x": 3, "y": 9, "z": 40}, {"x": 7, "y": 2, "z": 25}]"#,
        "x",
    )
    .expect("scatter data")
    .with_series(SeriesConfig::new("y"));
    assert_renders_through_frame(&ScatterChart::new(scatter).with_z_key("z", (4.0, 16.0)));
}

#[test]
fn the_same_chart_renders_through_either_backend() {
    let chart = BarChart::new(monthly_props());

    let svg = render_svg(&mut ChartInstance::new(), &chart);
    assert!(svg.starts_with("<svg"));
    assert!(svg.ends_with("</svg>"));
    assert!(svg.contains("class=\"chart-kit bar-chart\""));
    assert_eq!(svg.matches("class=\"bar\"").count(), 2);

    let frame = ChartInstance::new()
        .render(&frame_context(), &chart)
        .expect("frame render");
    assert!(frame.rects.len() >= 6, "expected one rect per bar");
}

#[test]
fn line_chart_emits_one_line_per_series_and_a_legend() {
    let svg = render_svg(&mut ChartInstance::new(), &LineChart::new(monthly_props()));
    assert_eq!(svg.matches("class=\"line\"").count(), 2);
    assert_eq!(svg.matches("class=\"legend-item").count(), 2);
    assert!(svg.contains(">Revenue<"));
    assert!(svg.contains(">cost<"));
    assert!(svg.contains("class=\"cartesian-grid\""));
}

#[test]
fn empty_data_still_renders_a_valid_shell() {
    let props = ChartProps::new(Vec::new(), "name").with_viewport(Viewport::new(300, 200));
    let svg = render_svg(&mut ChartInstance::new(), &LineChart::new(props.clone()));
    assert!(svg.contains("class=\"chart-background\""));
    assert!(svg.ends_with("</svg>"));

    let context = frame_context();
    let mut instance = ChartInstance::new();
    let pie = instance
        .render(&context, &PieChart::new(props.clone()))
        .expect("pie render");
    pie.validate().expect("valid frame");
    assert!(pie.polygons.is_empty());
    assert!(pie.background.is_some());

    let radar = instance
        .render(&context, &RadarChart::new(props))
        .expect("radar render");
    radar.validate().expect("valid frame");
}

#[test]
fn duplicate_series_keys_are_rejected() {
    let props = monthly_props().with_series(SeriesConfig::new("cost"));
    let err = ChartInstance::new()
        .render(&frame_context(), &LineChart::new(props))
        .expect_err("duplicate key");
    assert!(matches!(err, ChartError::DuplicateSeriesKey(key) if key == "cost"));
}

#[test]
fn zero_viewport_is_rejected() {
    let props = monthly_props().with_viewport(Viewport::new(0, 200));
    let err = ChartInstance::new()
        .render(&frame_context(), &AreaChart::new(props))
        .expect_err("invalid viewport");
    assert!(matches!(err, ChartError::InvalidViewport { width: 0, .. }));
}

#[test]
fn hidden_series_are_skipped_but_stay_in_the_legend() {
    let chart = LineChart::new(monthly_props());
    let mut instance = ChartInstance::new();
    instance.toggle_series("cost");

    let svg = render_svg(&mut instance, &chart);
    assert_eq!(svg.matches("class=\"line\"").count(), 1);
    assert!(svg.contains("data-key=\"revenue\""));
    assert_eq!(svg.matches("class=\"legend-item").count(), 2);
    assert_eq!(
        svg.matches("class=\"legend-item inactive\" data-key=\"cost\"").count(),
        1
    );
}

#[test]
fn clicking_a_legend_item_toggles_its_series() {
    let chart = AreaChart::new(monthly_props());
    let mut instance = ChartInstance::new();
    render_svg(&mut instance, &chart);

    let second_item = instance
        .hit_map()
        .regions()
        .iter()
        .find(|region| region.target == HitTarget::Legend { index: 1 })
        .map(|region| region.bounds.center())
        .expect("legend hit region");

    assert!(instance.click_at(second_item.x, second_item.y));
    assert!(instance.visibility().is_hidden("cost"));

    let svg = render_svg(&mut instance, &chart);
    assert_eq!(svg.matches("class=\"area\"").count(), 1);

    assert!(instance.click_at(second_item.x, second_item.y));
    assert!(!instance.visibility().is_hidden("cost"));
    assert!(!instance.click_at(-10.0, -10.0));
}

#[test]
fn pointer_over_a_data_point_hovers_its_series() {
    let chart = LineChart::new(monthly_props());
    let mut instance = ChartInstance::new();
    render_svg(&mut instance, &chart);

    let (target, at) = instance
        .hit_map()
        .regions()
        .iter()
        .find(|region| {
            matches!(
                region.target,
                HitTarget::Series {
                    index: 1,
                    datum: Some(2)
                }
            )
        })
        .map(|region| (region.target, region.bounds.center()))
        .expect("series hit region");

    assert!(instance.dispatch(ChartEvent::PointerMove { x: at.x, y: at.y }));
    assert_eq!(instance.hover(), HoverState::Hovering(1));
    assert_eq!(instance.interaction().active_datum(), Some(2));
    assert_eq!(
        target,
        HitTarget::Series {
            index: 1,
            datum: Some(2)
        }
    );

    let svg = render_svg(&mut instance, &chart);
    assert!(svg.contains("class=\"line\" data-key=\"revenue\" opacity=\"0.25\""));
    assert!(svg.contains("class=\"tooltip\""));

    assert!(instance.dispatch(ChartEvent::PointerLeave));
    assert_eq!(instance.hover(), HoverState::Idle);
}

#[test]
fn tooltip_follows_the_active_datum_and_respects_the_toggle() {
    let mut instance = ChartInstance::new();
    instance.dispatch(ChartEvent::DataEnter {
        index: 0,
        datum: Some(1),
    });

    let svg = render_svg(&mut instance, &BarChart::new(monthly_props()));
    assert!(svg.contains("class=\"tooltip\""));
    assert!(svg.contains("class=\"tooltip-cursor\""));
    assert!(svg.contains(">Feb<"));

    let quiet = monthly_props().with_tooltip(false);
    let svg = render_svg(&mut instance, &BarChart::new(quiet));
    assert!(!svg.contains("class=\"tooltip\""));
}

#[test]
fn legend_can_be_turned_off() {
    let mut instance = ChartInstance::new();
    let svg = render_svg(
        &mut instance,
        &LineChart::new(monthly_props().with_legend(false)),
    );
    assert!(!svg.contains("class=\"legend\""));
    assert!(
        instance
            .hit_map()
            .regions()
            .iter()
            .all(|region| !matches!(region.target, HitTarget::Legend { .. }))
    );
}

#[test]
fn series_color_overrides_are_resolved_against_tokens() {
    let props = ChartProps::from_json_data(MONTHLY, "name")
        .expect("chart data")
        .with_series(SeriesConfig::new("revenue").with_color("var(--brand)"))
        .with_series(SeriesConfig::new("cost"))
        .with_colors(["#123456", "#654321"]);
    let svg = render_svg(&mut ChartInstance::new(), &LineChart::new(props));
    assert!(svg.contains("stroke=\"rgb(255, 136, 0)\""));
    assert!(svg.contains("stroke=\"#654321\""));
    assert!(!svg.contains("#123456"));
}

#[test]
fn accessibility_attributes_reach_the_root_element() {
    let props = monthly_props()
        .with_class_name("sales")
        .with_aria_label("Monthly <sales>");
    let svg = render_svg(&mut ChartInstance::new(), &AreaChart::new(props));
    assert!(svg.contains("class=\"chart-kit area-chart sales\""));
    assert!(svg.contains("aria-label=\"Monthly &lt;sales&gt;\""));
}

#[test]
fn animation_prop_overrides_the_context_config() {
    let animated = render_svg(&mut ChartInstance::new(), &LineChart::new(monthly_props()));
    assert!(animated.contains("data-animation-duration=\"400\""));

    let props = monthly_props().with_animation(true, Some(75));
    let custom = render_svg(&mut ChartInstance::new(), &LineChart::new(props));
    assert!(custom.contains("data-animation-duration=\"75\""));

    let still = render_svg(
        &mut ChartInstance::new(),
        &LineChart::new(monthly_props().with_animation(false, None)),
    );
    assert!(!still.contains("data-animation-duration"));
}

#[test]
fn vertical_bars_and_reference_lines_render() {
    let props = monthly_props()
        .with_layout(ChartLayout::Vertical)
        .with_reference_value(100.0);
    let svg = render_svg(&mut ChartInstance::new(), &BarChart::new(props));
    assert!(svg.contains("class=\"reference-line\""));
    assert!(svg.contains(">100<"));
    assert_eq!(svg.matches("class=\"bar\"").count(), 2);
}

#[test]
fn pie_slices_toggle_by_name() {
    let chart = PieChart::new(monthly_props());
    let mut instance = ChartInstance::new();

    let svg = render_svg(&mut instance, &chart);
    assert_eq!(svg.matches("class=\"sector\"").count(), 3);
    assert!(svg.contains("data-name=\"Feb\""));

    instance.toggle_series("Feb");
    let svg = render_svg(&mut instance, &chart);
    assert_eq!(svg.matches("class=\"sector\"").count(), 2);
    assert!(!svg.contains("data-name=\"Feb\""));
    assert!(svg.contains("class=\"legend-item inactive\" data-key=\"Feb\""));
}

#[test]
fn repeated_pie_labels_toggle_one_slice_at_a_time() {
    let props = ChartProps::from_json_data(
        r#"[{"name": "Feb", "v": 3}, {"name": "Mar", "v": 5}, {"name": "Feb", "v": 4}]"#,
        "name",
    )
    .expect("pie data")
    .with_series(SeriesConfig::new("v"))
    .with_viewport(Viewport::new(480, 320));
    let chart = PieChart::new(props);
    let mut instance = ChartInstance::new();

    let svg = render_svg(&mut instance, &chart);
    assert!(svg.contains("data-key=\"Feb\""));
    assert!(svg.contains("data-key=\"Feb #2\""));

    instance.toggle_series("Feb");
    let svg = render_svg(&mut instance, &chart);
    assert_eq!(svg.matches("class=\"sector\"").count(), 2);
    assert!(svg.contains("data-name=\"Feb #2\""));
    assert_eq!(svg.matches("class=\"legend-item inactive\"").count(), 1);
}

#[test]
fn vertical_tooltip_title_uses_the_category_axis_formatter() {
    let props = monthly_props()
        .with_layout(ChartLayout::Vertical)
        .with_x_axis_formatter(|v| format!("{}k", v.as_f64().unwrap_or(-1.0)))
        .with_y_axis_formatter(|v| format!("month {}", v.as_str().unwrap_or("?")));
    let mut instance = ChartInstance::new();
    instance.dispatch(ChartEvent::DataEnter {
        index: 0,
        datum: Some(1),
    });

    let svg = render_svg(&mut instance, &BarChart::new(props));
    assert!(svg.contains("class=\"tooltip\""));
    assert!(svg.contains(">month Feb<"));
    assert!(!svg.contains(">-1k<"));
}

#[test]
fn composed_chart_mixes_bars_and_lines() {
    let chart = ComposedChart::new(monthly_props()).with_bar_key("revenue");
    let svg = render_svg(&mut ChartInstance::new(), &chart);
    assert!(svg.contains("class=\"bar\" data-key=\"revenue\""));
    assert!(svg.contains("class=\"line\" data-key=\"cost\""));
    assert_eq!(svg.matches("class=\"line\"").count(), 1);
}

#[test]
fn radar_chart_draws_one_polygon_per_visible_series() {
    let mut instance = ChartInstance::new();
    let chart = RadarChart::new(monthly_props());
    let svg = render_svg(&mut instance, &chart);
    assert_eq!(svg.matches("class=\"radar\"").count(), 2);
    assert!(svg.contains("class=\"polar-grid\""));

    instance.toggle_series("revenue");
    let svg = render_svg(&mut instance, &chart);
    assert_eq!(svg.matches("class=\"radar\"").count(), 1);
}
