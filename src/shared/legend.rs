use crate::context::{ChartPrimitives, LegendItemProps, LegendProps};
use crate::core::{Rect, Viewport};
use crate::hooks::{ChartTheme, LegendPayloadItem};
use crate::interaction::{HitMap, HitTarget, HoverState};
use crate::shared::{
    DEFAULT_TICK_FONT_SIZE, DIMMED_OPACITY, INACTIVE_LEGEND_OPACITY, LABEL_CHAR_WIDTH,
    MARGIN_LEGEND_BOTTOM,
};

const SWATCH_SIZE: f64 = 10.0;
const SWATCH_GAP: f64 = 4.0;
const ITEM_GAP: f64 = 16.0;

/// Legend row in the bottom margin band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChartLegendLayer;

impl ChartLegendLayer {
    /// Lays items out centered in the legend band and applies hover and
    /// inactive styling.
    #[must_use]
    pub fn layout(
        viewport: Viewport,
        payload: &[LegendPayloadItem],
        hover: HoverState,
        theme: &ChartTheme,
    ) -> LegendProps {
        let widths: Vec<f64> = payload
            .iter()
            .map(|item| SWATCH_SIZE + SWATCH_GAP + item.value.chars().count() as f64 * LABEL_CHAR_WIDTH)
            .collect();
        let total = widths.iter().sum::<f64>() + ITEM_GAP * widths.len().saturating_sub(1) as f64;
        let band_top = f64::from(viewport.height) - MARGIN_LEGEND_BOTTOM;
        let center_y = band_top + MARGIN_LEGEND_BOTTOM / 2.0;
        let mut x = ((f64::from(viewport.width) - total) / 2.0).max(0.0);

        let items = payload
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(index, (item, width))| {
                let bounds = Rect::new(x, band_top, width, MARGIN_LEGEND_BOTTOM);
                let swatch = Rect::new(x, center_y - SWATCH_SIZE / 2.0, SWATCH_SIZE, SWATCH_SIZE);
                x += width + ITEM_GAP;
                let opacity = if item.inactive {
                    INACTIVE_LEGEND_OPACITY
                } else if hover.is_dimmed(index) {
                    DIMMED_OPACITY
                } else {
                    1.0
                };
                LegendItemProps {
                    payload: item.clone(),
                    bounds,
                    swatch,
                    opacity,
                    emphasized: hover.is_active(index),
                }
            })
            .collect();

        LegendProps {
            items,
            text_color: theme.colors.text().to_owned(),
            font_size: DEFAULT_TICK_FONT_SIZE,
        }
    }

    /// Emits the legend and registers one hit region per item.
    pub fn render<P: ChartPrimitives>(
        components: &P,
        scene: &mut P::Scene,
        props: &LegendProps,
        hits: &mut HitMap,
    ) {
        for (index, item) in props.items.iter().enumerate() {
            hits.push(item.bounds, HitTarget::Legend { index });
        }
        components.legend(scene, props);
    }
}
