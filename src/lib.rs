//! chart-kit: backend-agnostic chart abstraction layer.
//!
//! Leaf charts share one color system (design tokens resolved through a
//! `ColorResolver`), one legend/hover interaction model and one
//! axis/grid/margin policy, and render through any `ChartPrimitives`
//! backend supplied by the chart context.

pub mod backends;
pub mod charts;
pub mod context;
pub mod core;
pub mod error;
pub mod hooks;
pub mod interaction;
pub mod render;
pub mod shared;
pub mod telemetry;
pub mod theme;

pub use backends::{FramePrimitives, SvgPrimitives};
pub use charts::{ChartInstance, ChartProps, SeriesConfig};
pub use context::{ChartConfig, ChartContext, ChartPrimitives, ChartProvider};
pub use error::{ChartError, ChartResult};
pub use theme::ColorResolver;
