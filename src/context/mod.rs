//! Chart context: tree-wide config, palette, semantic colors and the
//! injected rendering backend.

mod components;
mod config;
mod provider;

pub use components::{
    AnimationProps, AreaProps, AxisOrientation, AxisProps, AxisTick, AxisType, BarProps,
    CellProps, ChartKind, ChartPrimitives, ChartShellProps, GridProps, LegendItemProps,
    LegendProps, LineProps, PieProps, PolarAngleAxisProps, PolarAngleTick, PolarGridProps,
    PolarRadiusAxisProps, PolarRadiusTick, RadarProps, ReferenceLineProps, ScatterPoint,
    ScatterProps, SectorProps, TooltipEntry, TooltipProps, ZAxisProps,
};
pub use config::ChartConfig;
pub use provider::{ChartContext, ChartProvider, ContextId, ProviderConfig};
