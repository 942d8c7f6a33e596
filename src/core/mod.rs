pub mod color;
pub mod scale;
pub mod types;

pub use color::CssColor;
pub use scale::{BandScale, LinearScale, TickValues, nice_ticks, numeric_extent, value_domain};
pub use types::{
    ChartLayout, DataRecord, Margins, PlotArea, Point, Rect, Viewport, value_as_f64, value_label,
};
