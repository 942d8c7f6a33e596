//! Hover/active-index state machine shared by legend and chart body.

use serde::{Deserialize, Serialize};

use crate::core::Rect;
use crate::hooks::LegendClick;
use crate::shared::{
    ACTIVE_DOT_RADIUS, ACTIVE_STROKE_WIDTH, DEFAULT_DOT_RADIUS, DEFAULT_STROKE_WIDTH,
    DIMMED_OPACITY,
};

/// Where the current hover came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoverSource {
    Data,
    Legend,
}

/// At most one active series/slice index per chart instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HoverState {
    #[default]
    Idle,
    Hovering(usize),
}

impl HoverState {
    #[must_use]
    pub fn active_index(self) -> Option<usize> {
        match self {
            Self::Idle => None,
            Self::Hovering(index) => Some(index),
        }
    }

    /// Another index is hovered.
    #[must_use]
    pub fn is_dimmed(self, index: usize) -> bool {
        matches!(self, Self::Hovering(active) if active != index)
    }

    #[must_use]
    pub fn is_active(self, index: usize) -> bool {
        self == Self::Hovering(index)
    }
}

/// Input to a chart instance.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartEvent {
    /// Pointer entered data element `index` (series or slice), optionally
    /// over datum `datum`.
    DataEnter { index: usize, datum: Option<usize> },
    DataLeave,
    LegendEnter { index: usize },
    LegendLeave,
    LegendClick(LegendClick),
    /// Raw pointer position, hit-tested against the last render.
    PointerMove { x: f64, y: f64 },
    PointerLeave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InteractionState {
    hover: HoverState,
    source: Option<HoverSource>,
    active_datum: Option<usize>,
}

impl InteractionState {
    #[must_use]
    pub fn hover(self) -> HoverState {
        self.hover
    }

    #[must_use]
    pub fn source(self) -> Option<HoverSource> {
        self.source
    }

    /// Datum the tooltip follows, independent of which series is hovered.
    #[must_use]
    pub fn active_datum(self) -> Option<usize> {
        self.active_datum
    }

    pub fn set_hover(&mut self, index: usize, source: HoverSource) {
        self.hover = HoverState::Hovering(index);
        self.source = Some(source);
    }

    pub fn clear_hover(&mut self) {
        self.hover = HoverState::Idle;
        self.source = None;
    }

    pub fn set_active_datum(&mut self, datum: Option<usize>) {
        self.active_datum = datum;
    }

    #[must_use]
    pub fn is_dimmed(self, index: usize) -> bool {
        self.hover.is_dimmed(index)
    }
}

/// Visual treatment for one series after hover and visibility are combined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesEmphasis {
    pub visible: bool,
    pub opacity: f64,
    pub stroke_width: f64,
    pub dot_radius: f64,
    pub active: bool,
}

impl SeriesEmphasis {
    /// Hidden wins over every hover effect; then dimmed, then active.
    #[must_use]
    pub fn resolve(index: usize, hidden: bool, hover: HoverState) -> Self {
        if hidden {
            return Self {
                visible: false,
                opacity: 0.0,
                stroke_width: DEFAULT_STROKE_WIDTH,
                dot_radius: DEFAULT_DOT_RADIUS,
                active: false,
            };
        }
        if hover.is_dimmed(index) {
            return Self {
                visible: true,
                opacity: DIMMED_OPACITY,
                stroke_width: DEFAULT_STROKE_WIDTH,
                dot_radius: DEFAULT_DOT_RADIUS,
                active: false,
            };
        }
        let active = hover.is_active(index);
        Self {
            visible: true,
            opacity: 1.0,
            stroke_width: if active {
                ACTIVE_STROKE_WIDTH
            } else {
                DEFAULT_STROKE_WIDTH
            },
            dot_radius: if active {
                ACTIVE_DOT_RADIUS
            } else {
                DEFAULT_DOT_RADIUS
            },
            active,
        }
    }
}

/// What a hit region reports when the pointer is over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Series { index: usize, datum: Option<usize> },
    Legend { index: usize },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRegion {
    pub bounds: Rect,
    pub target: HitTarget,
}

/// Hit regions recorded by the last render, later entries on top.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HitMap {
    regions: Vec<HitRegion>,
}

impl HitMap {
    pub fn push(&mut self, bounds: Rect, target: HitTarget) {
        self.regions.push(HitRegion { bounds, target });
    }

    pub fn clear(&mut self) {
        self.regions.clear();
    }

    #[must_use]
    pub fn hit_test(&self, x: f64, y: f64) -> Option<HitTarget> {
        self.regions
            .iter()
            .rev()
            .find(|region| region.bounds.contains(x, y))
            .map(|region| region.target)
    }

    #[must_use]
    pub fn regions(&self) -> &[HitRegion] {
        &self.regions
    }
}
