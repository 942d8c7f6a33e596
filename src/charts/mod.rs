//! Leaf charts and the per-instance state that drives them.
//!
//! Every leaf is generic over `ChartPrimitives`, so the same chart value
//! renders through any backend the context was built with.

mod area;
mod bar;
mod cartesian;
mod composed;
mod instance;
mod line;
mod pie;
mod props;
mod radar;
mod scatter;

pub use area::AreaChart;
pub use bar::BarChart;
pub use composed::ComposedChart;
pub use instance::{Chart, ChartInstance, RenderPass};
pub use line::LineChart;
pub use pie::PieChart;
pub use props::{ChartProps, SeriesConfig};
pub use radar::RadarChart;
pub use scatter::ScatterChart;
