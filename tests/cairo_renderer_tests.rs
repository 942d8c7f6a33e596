#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use chart_kit::charts::{AreaChart, PieChart};
use chart_kit::core::Viewport;
use chart_kit::render::{CairoContextRenderer, CairoRenderer, Renderer};
use chart_kit::{ChartError, ChartInstance, ChartProps, ChartProvider, FramePrimitives, SeriesConfig};

fn props() -> ChartProps {
    ChartProps::from_json_data(
        r#"[{"name": "A", "v": 4}, {"name": "B", "v": 7}, {"name": "C", "v": 2}]"#,
        "name",
    )
    .expect("chart data")
    .with_series(SeriesConfig::new("v"))
    .with_viewport(Viewport::new(480, 320))
}

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn cairo_renderer_draws_a_composed_frame() {
    let context = ChartProvider::new()
        .provide(FramePrimitives::default())
        .expect("context");
    let frame = ChartInstance::new()
        .render(&context, &AreaChart::new(props()))
        .expect("frame");

    let mut renderer = CairoRenderer::new(480, 320).expect("renderer");
    renderer.render(&frame).expect("render");
    let stats = renderer.last_stats();

    assert_eq!(stats.lines_drawn, frame.lines.len());
    assert_eq!(stats.texts_drawn, frame.texts.len());
    assert!(stats.polygons_drawn >= 1);
}

#[test]
fn cairo_renderer_can_draw_on_external_context() {
    let context = ChartProvider::new()
        .provide(FramePrimitives::default())
        .expect("context");
    let frame = ChartInstance::new()
        .render(&context, &PieChart::new(props()))
        .expect("frame");

    let surface = ImageSurface::create(Format::ARgb32, 480, 320).expect("surface");
    let cairo = Context::new(&surface).expect("cairo context");
    let mut renderer = CairoRenderer::new(480, 320).expect("renderer");
    renderer
        .render_on_cairo_context(&cairo, &frame)
        .expect("render on context");

    assert_eq!(renderer.last_stats().polygons_drawn, 3);
}
