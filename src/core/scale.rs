use ordered_float::OrderedFloat;
use smallvec::SmallVec;

use crate::error::{ChartError, ChartResult};

pub type TickValues = SmallVec<[f64; 8]>;

/// Continuous domain to pixel-range mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start: 0.0,
            range_end: 1.0,
        })
    }

    /// Sets the pixel range. A reversed range (start > end) is how Y axes
    /// grow upward.
    #[must_use]
    pub fn with_range(mut self, range_start: f64, range_end: f64) -> Self {
        self.range_start = range_start;
        self.range_end = range_end;
        self
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let span = self.range_end - self.range_start;
        if span == 0.0 {
            return self.domain_start;
        }
        let normalized = (pixel - self.range_start) / span;
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }

    /// Round tick values covering the domain, roughly `target_count` of them.
    #[must_use]
    pub fn ticks(self, target_count: usize) -> TickValues {
        nice_ticks(self.domain_start, self.domain_end, target_count)
    }
}

/// Evenly divided categorical range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandScale {
    count: usize,
    range_start: f64,
    range_end: f64,
    padding_ratio: f64,
}

impl BandScale {
    #[must_use]
    pub fn new(count: usize, range_start: f64, range_end: f64) -> Self {
        Self {
            count,
            range_start,
            range_end,
            padding_ratio: 0.1,
        }
    }

    /// Fraction of each step left empty around the band.
    #[must_use]
    pub fn with_padding(mut self, padding_ratio: f64) -> Self {
        self.padding_ratio = padding_ratio.clamp(0.0, 0.9);
        self
    }

    #[must_use]
    pub fn count(self) -> usize {
        self.count
    }

    #[must_use]
    pub fn step(self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        (self.range_end - self.range_start) / self.count as f64
    }

    #[must_use]
    pub fn bandwidth(self) -> f64 {
        self.step().abs() * (1.0 - self.padding_ratio)
    }

    /// Leading edge of band `index` (in range direction).
    #[must_use]
    pub fn band_start(self, index: usize) -> f64 {
        let step = self.step();
        let inset = (step.abs() - self.bandwidth()) / 2.0 * step.signum();
        self.range_start + step * index as f64 + inset
    }

    #[must_use]
    pub fn center(self, index: usize) -> f64 {
        self.range_start + self.step() * (index as f64 + 0.5)
    }

    /// Band whose step contains `pixel`, if any.
    #[must_use]
    pub fn index_at(self, pixel: f64) -> Option<usize> {
        let step = self.step();
        if self.count == 0 || step == 0.0 {
            return None;
        }
        let position = (pixel - self.range_start) / step;
        if position < 0.0 || position >= self.count as f64 {
            return None;
        }
        Some(position.floor() as usize)
    }
}

/// Smallest/largest finite value, `None` for an empty input.
#[must_use]
pub fn numeric_extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    let mut min: Option<OrderedFloat<f64>> = None;
    let mut max: Option<OrderedFloat<f64>> = None;
    for value in values.into_iter().filter(|v| v.is_finite()).map(OrderedFloat) {
        min = Some(min.map_or(value, |m| m.min(value)));
        max = Some(max.map_or(value, |m| m.max(value)));
    }
    Some((min?.into_inner(), max?.into_inner()))
}

/// Domain for a value axis: includes zero when `include_zero`, pads a flat
/// extent and falls back to `[0, 1]` without data.
#[must_use]
pub fn value_domain(extent: Option<(f64, f64)>, include_zero: bool) -> (f64, f64) {
    let Some((mut min, mut max)) = extent else {
        return (0.0, 1.0);
    };
    if include_zero {
        min = min.min(0.0);
        max = max.max(0.0);
    }
    if min == max {
        let pad = if min == 0.0 { 1.0 } else { min.abs() * 0.1 };
        return (min - pad, max + pad);
    }
    let ticks = nice_ticks(min, max, 5);
    match (ticks.first(), ticks.last()) {
        (Some(first), Some(last)) if *first <= min && *last >= max => (*first, *last),
        _ => (min, max),
    }
}

fn nice_step(span: f64, target_count: usize) -> f64 {
    let raw = span / target_count.max(1) as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let nice = if residual <= 1.0 {
        1.0
    } else if residual <= 2.0 {
        2.0
    } else if residual <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Tick values at a 1/2/5 step that cover `[start, end]`.
#[must_use]
pub fn nice_ticks(start: f64, end: f64, target_count: usize) -> TickValues {
    let (low, high) = if start <= end { (start, end) } else { (end, start) };
    let span = high - low;
    if !span.is_finite() || span <= 0.0 {
        let mut single = TickValues::new();
        if low.is_finite() {
            single.push(low);
        }
        return single;
    }

    let step = nice_step(span, target_count);
    let first = (low / step).floor() * step;
    let last = (high / step).ceil() * step;
    let count = ((last - first) / step).round() as usize;

    (0..=count)
        .map(|i| {
            let tick = first + step * i as f64;
            // Snap float noise such as 0.30000000000000004.
            (tick / step).round() * step
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nice_ticks_use_round_steps() {
        let ticks = nice_ticks(0.0, 97.0, 5);
        assert_eq!(ticks.as_slice(), &[0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
    }

    #[test]
    fn value_domain_defaults_without_data() {
        assert_eq!(value_domain(None, true), (0.0, 1.0));
        assert_eq!(value_domain(Some((5.0, 5.0)), false), (4.5, 5.5));
    }

    #[test]
    fn band_scale_centers_split_the_range() {
        let band = BandScale::new(4, 0.0, 400.0);
        assert_eq!(band.center(0), 50.0);
        assert_eq!(band.center(3), 350.0);
        assert_eq!(band.index_at(399.0), Some(3));
        assert_eq!(band.index_at(401.0), None);
    }
}
