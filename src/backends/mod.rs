//! Concrete `ChartPrimitives` implementations.

mod frame;
mod svg;

pub use frame::FramePrimitives;
pub use svg::{SvgDocument, SvgPrimitives, SvgScene};
