//! Logical chart primitives every rendering backend provides.
//!
//! Leaf charts only talk to `ChartPrimitives`; swapping the backend is a
//! matter of building the context with a different implementation.

use serde::{Deserialize, Serialize};

use crate::core::{PlotArea, Point, Rect, Viewport};
use crate::error::ChartResult;
use crate::hooks::LegendPayloadItem;
use crate::shared::{TickStyle, TruncatedTick};

/// Chart container kind (`LineChart`, `BarChart`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartKind {
    LineChart,
    AreaChart,
    BarChart,
    ScatterChart,
    ComposedChart,
    PieChart,
    RadarChart,
}

impl ChartKind {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::LineChart => "line-chart",
            Self::AreaChart => "area-chart",
            Self::BarChart => "bar-chart",
            Self::ScatterChart => "scatter-chart",
            Self::ComposedChart => "composed-chart",
            Self::PieChart => "pie-chart",
            Self::RadarChart => "radar-chart",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationProps {
    pub active: bool,
    pub duration_ms: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartShellProps {
    pub viewport: Viewport,
    pub plot: PlotArea,
    pub background: String,
    pub class_name: Option<String>,
    pub aria_label: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisOrientation {
    Top,
    Bottom,
    Left,
    Right,
}

impl AxisOrientation {
    #[must_use]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisType {
    Category,
    Number,
}

/// One tick at `offset` pixels along its axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub offset: f64,
    pub label: TruncatedTick,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisProps {
    pub orientation: AxisOrientation,
    pub axis_type: AxisType,
    /// Axis baseline from `start` to `end`.
    pub start: Point,
    pub end: Point,
    pub ticks: Vec<AxisTick>,
    pub stroke: String,
    pub tick_style: TickStyle,
    pub tick_size: f64,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ZAxisProps {
    pub data_key: String,
    /// Radius range (px) values of `data_key` map into.
    pub range: (f64, f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridProps {
    pub bounds: Rect,
    /// Y coordinates of horizontal lines.
    pub horizontal: Vec<f64>,
    /// X coordinates of vertical lines.
    pub vertical: Vec<f64>,
    pub stroke: String,
    pub dash: Option<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceLineProps {
    pub from: Point,
    pub to: Point,
    pub stroke: String,
    pub dash: Option<(f64, f64)>,
    pub label: Option<String>,
    pub tick_style: TickStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineProps {
    pub data_key: String,
    pub name: String,
    pub points: Vec<Point>,
    pub stroke: String,
    pub stroke_width: f64,
    pub opacity: f64,
    pub dot_radius: f64,
    pub animation: AnimationProps,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AreaProps {
    pub data_key: String,
    pub name: String,
    pub points: Vec<Point>,
    /// Pixel coordinate of the value-axis zero line the area fills toward.
    pub baseline: f64,
    pub vertical: bool,
    pub stroke: String,
    pub fill: String,
    pub fill_opacity: f64,
    pub stroke_width: f64,
    pub opacity: f64,
    pub animation: AnimationProps,
}

/// Per-datum fill override inside a `Bar` (the `Cell` primitive).
#[derive(Debug, Clone, PartialEq)]
pub struct CellProps {
    pub index: usize,
    pub fill: String,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarProps {
    pub data_key: String,
    pub name: String,
    pub rects: Vec<Rect>,
    pub fill: String,
    pub opacity: f64,
    pub radius: f64,
    pub cells: Vec<CellProps>,
    pub animation: AnimationProps,
}

impl BarProps {
    /// Fill and opacity for rect `index`, honoring cell overrides.
    #[must_use]
    pub fn paint_for(&self, index: usize) -> (&str, f64) {
        self.cells
            .iter()
            .find(|cell| cell.index == index)
            .map_or((self.fill.as_str(), self.opacity), |cell| {
                (cell.fill.as_str(), cell.opacity)
            })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub center: Point,
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterProps {
    pub data_key: String,
    pub name: String,
    pub points: Vec<ScatterPoint>,
    pub fill: String,
    pub opacity: f64,
    pub animation: AnimationProps,
}

/// Annular sector; angles in radians, clockwise from 12 o'clock.
#[derive(Debug, Clone, PartialEq)]
pub struct SectorProps {
    pub index: usize,
    pub name: String,
    pub center: Point,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub fill: String,
    pub opacity: f64,
    pub stroke: String,
}

impl SectorProps {
    /// Point at `radius` and `angle` around `center`.
    #[must_use]
    pub fn polar(center: Point, radius: f64, angle: f64) -> Point {
        Point::new(center.x + radius * angle.sin(), center.y - radius * angle.cos())
    }

    /// Outline approximated with one vertex per `step` radians.
    #[must_use]
    pub fn outline(&self, step: f64) -> Vec<Point> {
        let sweep = self.end_angle - self.start_angle;
        let segments = ((sweep.abs() / step.max(1e-3)).ceil() as usize).max(1);
        let mut points = Vec::with_capacity(segments * 2 + 2);
        for i in 0..=segments {
            let angle = self.start_angle + sweep * i as f64 / segments as f64;
            points.push(Self::polar(self.center, self.outer_radius, angle));
        }
        if self.inner_radius > 0.0 {
            for i in (0..=segments).rev() {
                let angle = self.start_angle + sweep * i as f64 / segments as f64;
                points.push(Self::polar(self.center, self.inner_radius, angle));
            }
        } else {
            points.push(self.center);
        }
        points
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieProps {
    pub data_key: String,
    pub name_key: String,
    pub center: Point,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub sectors: Vec<SectorProps>,
    pub animation: AnimationProps,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolarGridProps {
    pub center: Point,
    pub radii: Vec<f64>,
    /// Spoke angles in radians.
    pub angles: Vec<f64>,
    pub stroke: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolarAngleTick {
    pub angle: f64,
    pub position: Point,
    pub label: TruncatedTick,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolarAngleAxisProps {
    pub center: Point,
    pub radius: f64,
    pub ticks: Vec<PolarAngleTick>,
    pub tick_style: TickStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolarRadiusTick {
    pub radius: f64,
    pub position: Point,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolarRadiusAxisProps {
    pub center: Point,
    pub angle: f64,
    pub ticks: Vec<PolarRadiusTick>,
    pub stroke: String,
    pub tick_style: TickStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadarProps {
    pub data_key: String,
    pub name: String,
    pub points: Vec<Point>,
    pub stroke: String,
    pub fill: String,
    pub fill_opacity: f64,
    pub stroke_width: f64,
    pub opacity: f64,
    pub animation: AnimationProps,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipEntry {
    pub name: String,
    pub value: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipProps {
    pub bounds: Rect,
    pub title: String,
    pub entries: Vec<TooltipEntry>,
    /// Highlight band behind the active category, if any.
    pub cursor: Option<Rect>,
    pub background: String,
    pub border: String,
    pub text: String,
    pub radius: f64,
    pub font_size: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendItemProps {
    pub payload: LegendPayloadItem,
    pub bounds: Rect,
    pub swatch: Rect,
    pub opacity: f64,
    pub emphasized: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendProps {
    pub items: Vec<LegendItemProps>,
    pub text_color: String,
    pub font_size: f64,
}

/// Capability set of logical chart primitives.
///
/// Any backend exposes the same members regardless of what it draws with.
/// `Scene` is the in-progress drawing, `Output` what `finish` hands back.
pub trait ChartPrimitives {
    type Scene;
    type Output;

    fn backend_name(&self) -> &'static str;

    /// Opens a chart container of `kind`.
    fn chart(&self, kind: ChartKind, props: &ChartShellProps) -> Self::Scene;

    fn x_axis(&self, scene: &mut Self::Scene, props: &AxisProps);
    fn y_axis(&self, scene: &mut Self::Scene, props: &AxisProps);
    fn z_axis(&self, scene: &mut Self::Scene, props: &ZAxisProps);
    fn cartesian_grid(&self, scene: &mut Self::Scene, props: &GridProps);
    fn reference_line(&self, scene: &mut Self::Scene, props: &ReferenceLineProps);

    fn line(&self, scene: &mut Self::Scene, props: &LineProps);
    fn area(&self, scene: &mut Self::Scene, props: &AreaProps);
    fn bar(&self, scene: &mut Self::Scene, props: &BarProps);
    fn scatter(&self, scene: &mut Self::Scene, props: &ScatterProps);

    fn pie(&self, scene: &mut Self::Scene, props: &PieProps);
    fn sector(&self, scene: &mut Self::Scene, props: &SectorProps);

    fn polar_grid(&self, scene: &mut Self::Scene, props: &PolarGridProps);
    fn polar_angle_axis(&self, scene: &mut Self::Scene, props: &PolarAngleAxisProps);
    fn polar_radius_axis(&self, scene: &mut Self::Scene, props: &PolarRadiusAxisProps);
    fn radar(&self, scene: &mut Self::Scene, props: &RadarProps);

    fn tooltip(&self, scene: &mut Self::Scene, props: &TooltipProps);
    fn legend(&self, scene: &mut Self::Scene, props: &LegendProps);

    fn finish(&self, scene: Self::Scene) -> ChartResult<Self::Output>;

    fn line_chart(&self, props: &ChartShellProps) -> Self::Scene {
        self.chart(ChartKind::LineChart, props)
    }

    fn area_chart(&self, props: &ChartShellProps) -> Self::Scene {
        self.chart(ChartKind::AreaChart, props)
    }

    fn bar_chart(&self, props: &ChartShellProps) -> Self::Scene {
        self.chart(ChartKind::BarChart, props)
    }

    fn scatter_chart(&self, props: &ChartShellProps) -> Self::Scene {
        self.chart(ChartKind::ScatterChart, props)
    }

    fn composed_chart(&self, props: &ChartShellProps) -> Self::Scene {
        self.chart(ChartKind::ComposedChart, props)
    }

    fn pie_chart(&self, props: &ChartShellProps) -> Self::Scene {
        self.chart(ChartKind::PieChart, props)
    }

    fn radar_chart(&self, props: &ChartShellProps) -> Self::Scene {
        self.chart(ChartKind::RadarChart, props)
    }
}
