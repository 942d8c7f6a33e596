use chart_kit::charts::LineChart;
use chart_kit::core::{DataRecord, Viewport};
use chart_kit::theme::{ColorResolver, TokenTable};
use chart_kit::{ChartInstance, ChartProps, ChartProvider, FramePrimitives, SeriesConfig};
use criterion::{Criterion, criterion_group, criterion_main};
use serde_json::json;
use std::hint::black_box;

fn theme_tokens() -> TokenTable {
    TokenTable::new()
        .with_token("--blue-600", "#2563eb")
        .with_token("--chart-primary", "var(--blue-600)")
        .with_token("--chart-series-1", "var(--chart-primary)")
        .with_token("--chart-grid", "rgba(0, 0, 0, 0.1)")
}

fn bench_resolve_token_chain(c: &mut Criterion) {
    let resolver = ColorResolver::new(theme_tokens());

    c.bench_function("resolve_token_chain", |b| {
        b.iter(|| resolver.resolve_css_color(black_box("var(--chart-series-1)")))
    });
}

fn bench_resolve_absolute_passthrough(c: &mut Criterion) {
    let resolver = ColorResolver::new(theme_tokens());

    c.bench_function("resolve_absolute_passthrough", |b| {
        b.iter(|| resolver.resolve_css_color(black_box("#2563eb")))
    });
}

fn bench_line_chart_render_1k(c: &mut Criterion) {
    let context = ChartProvider::new()
        .with_tokens(theme_tokens())
        .provide(FramePrimitives::default())
        .expect("frame context");

    let data: Vec<DataRecord> = (0..1_000)
        .map(|i| {
            let t = f64::from(i);
            [
                ("name".to_owned(), json!(format!("p{i}"))),
                ("a".to_owned(), json!(100.0 + (t * 0.05).sin() * 20.0)),
                ("b".to_owned(), json!(80.0 + (t * 0.03).cos() * 15.0)),
            ]
            .into_iter()
            .collect()
        })
        .collect();
    let chart = LineChart::new(
        ChartProps::new(data, "name")
            .with_series(SeriesConfig::new("a"))
            .with_series(SeriesConfig::new("b"))
            .with_viewport(Viewport::new(1920, 1080)),
    )
    .with_dots(false);
    let mut instance = ChartInstance::new();

    c.bench_function("line_chart_render_1k", |b| {
        b.iter(|| {
            let frame = instance.render(&context, &chart).expect("render");
            black_box(frame.lines.len())
        })
    });
}

criterion_group!(
    benches,
    bench_resolve_token_chain,
    bench_resolve_absolute_passthrough,
    bench_line_chart_render_1k
);
criterion_main!(benches);
