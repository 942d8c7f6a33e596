use chart_kit::telemetry::init_default_tracing;

#[test]
fn tracing_can_only_be_installed_once() {
    let _ = init_default_tracing();
    assert!(!init_default_tracing());
}
