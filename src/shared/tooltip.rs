use crate::context::{ChartPrimitives, TooltipEntry, TooltipProps};
use crate::core::{Point, Rect, Viewport};
use crate::hooks::ChartTheme;
use crate::shared::LABEL_CHAR_WIDTH;

const PADDING: f64 = 8.0;
const ROW_HEIGHT: f64 = 18.0;
const ANCHOR_GAP: f64 = 10.0;

/// Tooltip box placed next to the active datum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChartTooltipLayer;

impl ChartTooltipLayer {
    /// Sizes and places the box, flipping left of `anchor` when it would
    /// overflow the viewport.
    #[must_use]
    pub fn layout(
        viewport: Viewport,
        anchor: Point,
        title: String,
        entries: Vec<TooltipEntry>,
        cursor: Option<Rect>,
        theme: &ChartTheme,
    ) -> TooltipProps {
        let widest = entries
            .iter()
            .map(|entry| entry.name.chars().count() + entry.value.chars().count() + 2)
            .chain(std::iter::once(title.chars().count()))
            .max()
            .unwrap_or(0);
        let width = widest as f64 * LABEL_CHAR_WIDTH + PADDING * 2.0;
        let height = (entries.len() + 1) as f64 * ROW_HEIGHT + PADDING * 2.0;

        let viewport_width = f64::from(viewport.width);
        let viewport_height = f64::from(viewport.height);
        let mut x = anchor.x + ANCHOR_GAP;
        if x + width > viewport_width {
            x = (anchor.x - ANCHOR_GAP - width).max(0.0);
        }
        let y = anchor.y.clamp(0.0, (viewport_height - height).max(0.0));

        TooltipProps {
            bounds: Rect::new(x, y, width, height),
            title,
            entries,
            cursor,
            background: theme.tooltip.background.clone(),
            border: theme.tooltip.border.clone(),
            text: theme.tooltip.text.clone(),
            radius: theme.tooltip.radius,
            font_size: theme.tooltip.font_size,
        }
    }

    pub fn render<P: ChartPrimitives>(components: &P, scene: &mut P::Scene, props: &TooltipProps) {
        components.tooltip(scene, props);
    }
}
