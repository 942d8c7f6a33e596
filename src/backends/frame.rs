use tracing::debug;

use crate::context::{
    AreaProps, AxisOrientation, AxisProps, BarProps, ChartKind, ChartPrimitives,
    ChartShellProps, GridProps, LegendProps, LineProps, PieProps, PolarAngleAxisProps,
    PolarGridProps, PolarRadiusAxisProps, RadarProps, ReferenceLineProps, ScatterProps,
    SectorProps, TooltipProps, ZAxisProps,
};
use crate::core::{CssColor, Point};
use crate::error::ChartResult;
use crate::render::{
    CirclePrimitive, Color, LinePrimitive, LineStrokeStyle, PolygonPrimitive, RectPrimitive,
    RenderFrame, TextHAlign, TextPrimitive,
};

use super::svg::area_outline;

const SECTOR_STEP_RAD: f64 = 0.05;
const FALLBACK_COLOR: Color = Color::rgb(0.5, 0.5, 0.5);

/// Backend that materializes charts into a [`RenderFrame`] for any
/// [`Renderer`](crate::render::Renderer).
#[derive(Debug, Clone, Copy)]
pub struct FramePrimitives {
    pub axis_stroke_width: f64,
    pub grid_stroke_width: f64,
}

impl Default for FramePrimitives {
    fn default() -> Self {
        Self {
            axis_stroke_width: 1.0,
            grid_stroke_width: 1.0,
        }
    }
}

impl FramePrimitives {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Parses a resolved CSS color; unparseable input paints neutral grey.
fn paint(css: &str, opacity: f64) -> Color {
    let color = match CssColor::parse(css) {
        Ok(parsed) => Color::from(parsed),
        Err(err) => {
            debug!(color = css, error = %err, "unpaintable color, using fallback");
            FALLBACK_COLOR
        }
    };
    color.with_alpha_factor(opacity)
}

fn dash_style(dash: Option<(f64, f64)>) -> LineStrokeStyle {
    match dash {
        Some((dash, gap)) if dash > 0.0 => LineStrokeStyle::Dashed { dash, gap },
        _ => LineStrokeStyle::Solid,
    }
}

fn push_line(frame: &mut RenderFrame, from: Point, to: Point, width: f64, color: Color) {
    if width > 0.0 {
        frame
            .lines
            .push(LinePrimitive::new(from.x, from.y, to.x, to.y, width, color));
    }
}

fn push_polyline(frame: &mut RenderFrame, points: &[Point], width: f64, color: Color) {
    for pair in points.windows(2) {
        push_line(frame, pair[0], pair[1], width, color);
    }
}

fn push_polygon(frame: &mut RenderFrame, points: &[Point], fill: Color) -> Option<usize> {
    if points.len() < 3 {
        return None;
    }
    frame.polygons.push(PolygonPrimitive::new(
        points.iter().map(|p| (p.x, p.y)).collect(),
        fill,
    ));
    Some(frame.polygons.len() - 1)
}

fn push_text(
    frame: &mut RenderFrame,
    text: &str,
    at: Point,
    font_size: f64,
    color: Color,
    h_align: TextHAlign,
) {
    if text.is_empty() || font_size <= 0.0 {
        return;
    }
    frame
        .texts
        .push(TextPrimitive::new(text, at.x, at.y, font_size, color, h_align));
}

impl ChartPrimitives for FramePrimitives {
    type Scene = RenderFrame;
    type Output = RenderFrame;

    fn backend_name(&self) -> &'static str {
        "frame"
    }

    fn chart(&self, kind: ChartKind, props: &ChartShellProps) -> RenderFrame {
        debug!(kind = kind.name(), width = props.viewport.width, height = props.viewport.height, "open frame");
        RenderFrame::new(props.viewport).with_background(paint(&props.background, 1.0))
    }

    fn x_axis(&self, scene: &mut RenderFrame, props: &AxisProps) {
        self.axis(scene, props);
    }

    fn y_axis(&self, scene: &mut RenderFrame, props: &AxisProps) {
        self.axis(scene, props);
    }

    fn z_axis(&self, _scene: &mut RenderFrame, _props: &ZAxisProps) {}

    fn cartesian_grid(&self, scene: &mut RenderFrame, props: &GridProps) {
        let color = paint(&props.stroke, 1.0);
        let style = dash_style(props.dash);
        let bounds = props.bounds;
        for y in &props.horizontal {
            scene.lines.push(
                LinePrimitive::new(bounds.x, *y, bounds.right(), *y, self.grid_stroke_width, color)
                    .with_stroke_style(style),
            );
        }
        for x in &props.vertical {
            scene.lines.push(
                LinePrimitive::new(*x, bounds.y, *x, bounds.bottom(), self.grid_stroke_width, color)
                    .with_stroke_style(style),
            );
        }
    }

    fn reference_line(&self, scene: &mut RenderFrame, props: &ReferenceLineProps) {
        let color = paint(&props.stroke, 1.0);
        scene.lines.push(
            LinePrimitive::new(
                props.from.x,
                props.from.y,
                props.to.x,
                props.to.y,
                self.axis_stroke_width,
                color,
            )
            .with_stroke_style(dash_style(props.dash)),
        );
        if let Some(label) = &props.label {
            push_text(
                scene,
                label,
                Point::new(props.to.x, props.to.y - props.tick_style.font_size),
                props.tick_style.font_size,
                paint(&props.tick_style.fill, 1.0),
                TextHAlign::Right,
            );
        }
    }

    fn line(&self, scene: &mut RenderFrame, props: &LineProps) {
        let color = paint(&props.stroke, props.opacity);
        push_polyline(scene, &props.points, props.stroke_width, color);
        if props.dot_radius > 0.0 {
            for point in &props.points {
                scene
                    .circles
                    .push(CirclePrimitive::new(point.x, point.y, props.dot_radius, color));
            }
        }
    }

    fn area(&self, scene: &mut RenderFrame, props: &AreaProps) {
        let fill = paint(&props.fill, props.fill_opacity * props.opacity);
        push_polygon(scene, &area_outline(props), fill);
        push_polyline(
            scene,
            &props.points,
            props.stroke_width,
            paint(&props.stroke, props.opacity),
        );
    }

    fn bar(&self, scene: &mut RenderFrame, props: &BarProps) {
        for (index, rect) in props.rects.iter().enumerate() {
            let (fill, opacity) = props.paint_for(index);
            scene.rects.push(
                RectPrimitive::new(rect.x, rect.y, rect.width, rect.height, paint(fill, opacity))
                    .with_corner_radius(props.radius),
            );
        }
    }

    fn scatter(&self, scene: &mut RenderFrame, props: &ScatterProps) {
        let color = paint(&props.fill, props.opacity);
        for point in props.points.iter().filter(|p| p.radius > 0.0) {
            scene.circles.push(CirclePrimitive::new(
                point.center.x,
                point.center.y,
                point.radius,
                color,
            ));
        }
    }

    fn pie(&self, scene: &mut RenderFrame, props: &PieProps) {
        for sector in &props.sectors {
            self.sector(scene, sector);
        }
    }

    fn sector(&self, scene: &mut RenderFrame, props: &SectorProps) {
        let outline = props.outline(SECTOR_STEP_RAD);
        if let Some(index) = push_polygon(scene, &outline, paint(&props.fill, props.opacity)) {
            let polygon = &mut scene.polygons[index];
            *polygon = polygon.clone().with_stroke(1.0, paint(&props.stroke, 1.0));
        }
    }

    fn polar_grid(&self, scene: &mut RenderFrame, props: &PolarGridProps) {
        let color = paint(&props.stroke, 1.0);
        for radius in &props.radii {
            let mut ring: Vec<Point> = props
                .angles
                .iter()
                .map(|angle| SectorProps::polar(props.center, *radius, *angle))
                .collect();
            if let Some(first) = ring.first().copied() {
                ring.push(first);
            }
            push_polyline(scene, &ring, self.grid_stroke_width, color);
        }
        let outer = props.radii.iter().copied().fold(0.0, f64::max);
        for angle in &props.angles {
            push_line(
                scene,
                props.center,
                SectorProps::polar(props.center, outer, *angle),
                self.grid_stroke_width,
                color,
            );
        }
    }

    fn polar_angle_axis(&self, scene: &mut RenderFrame, props: &PolarAngleAxisProps) {
        let color = paint(&props.tick_style.fill, 1.0);
        for tick in &props.ticks {
            let h_align = if tick.position.x > props.center.x + 1.0 {
                TextHAlign::Left
            } else if tick.position.x < props.center.x - 1.0 {
                TextHAlign::Right
            } else {
                TextHAlign::Center
            };
            push_text(
                scene,
                &tick.label.text,
                tick.position,
                props.tick_style.font_size,
                color,
                h_align,
            );
        }
    }

    fn polar_radius_axis(&self, scene: &mut RenderFrame, props: &PolarRadiusAxisProps) {
        if let Some(last) = props.ticks.last() {
            push_line(
                scene,
                props.center,
                last.position,
                self.axis_stroke_width,
                paint(&props.stroke, 1.0),
            );
        }
        let color = paint(&props.tick_style.fill, 1.0);
        for tick in &props.ticks {
            push_text(
                scene,
                &tick.label,
                Point::new(tick.position.x + 4.0, tick.position.y),
                props.tick_style.font_size,
                color,
                TextHAlign::Left,
            );
        }
    }

    fn radar(&self, scene: &mut RenderFrame, props: &RadarProps) {
        push_polygon(
            scene,
            &props.points,
            paint(&props.fill, props.fill_opacity * props.opacity),
        );
        let mut closed = props.points.clone();
        if let Some(first) = closed.first().copied() {
            closed.push(first);
        }
        push_polyline(
            scene,
            &closed,
            props.stroke_width,
            paint(&props.stroke, props.opacity),
        );
    }

    fn tooltip(&self, scene: &mut RenderFrame, props: &TooltipProps) {
        if let Some(cursor) = props.cursor {
            scene.rects.push(RectPrimitive::new(
                cursor.x,
                cursor.y,
                cursor.width,
                cursor.height,
                paint(&props.border, 0.3),
            ));
        }
        let bounds = props.bounds;
        scene.rects.push(
            RectPrimitive::new(
                bounds.x,
                bounds.y,
                bounds.width,
                bounds.height,
                paint(&props.background, 1.0),
            )
            .with_border(1.0, paint(&props.border, 1.0))
            .with_corner_radius(props.radius),
        );
        let row = (bounds.height - 16.0) / (props.entries.len() + 1) as f64;
        let left = bounds.x + 8.0;
        push_text(
            scene,
            &props.title,
            Point::new(left, bounds.y + 8.0 + row / 2.0),
            props.font_size,
            paint(&props.text, 1.0),
            TextHAlign::Left,
        );
        for (index, entry) in props.entries.iter().enumerate() {
            push_text(
                scene,
                &format!("{}: {}", entry.name, entry.value),
                Point::new(left, bounds.y + 8.0 + row * (index as f64 + 1.5)),
                props.font_size,
                paint(&entry.color, 1.0),
                TextHAlign::Left,
            );
        }
    }

    fn legend(&self, scene: &mut RenderFrame, props: &LegendProps) {
        for item in &props.items {
            let swatch = item.swatch;
            scene.rects.push(RectPrimitive::new(
                swatch.x,
                swatch.y,
                swatch.width,
                swatch.height,
                paint(&item.payload.color, item.opacity),
            ));
            push_text(
                scene,
                &item.payload.value,
                Point::new(swatch.right() + 4.0, swatch.center().y),
                props.font_size,
                paint(&props.text_color, item.opacity),
                TextHAlign::Left,
            );
        }
    }

    fn finish(&self, scene: RenderFrame) -> ChartResult<RenderFrame> {
        scene.validate()?;
        Ok(scene)
    }
}

impl FramePrimitives {
    fn axis(&self, frame: &mut RenderFrame, props: &AxisProps) {
        let stroke = paint(&props.stroke, 1.0);
        push_line(frame, props.start, props.end, self.axis_stroke_width, stroke);
        let fill = paint(&props.tick_style.fill, 1.0);
        let size = props.tick_size;
        let font = props.tick_style.font_size;
        for tick in &props.ticks {
            let (from, to, label_at, h_align) = match props.orientation {
                AxisOrientation::Bottom => (
                    Point::new(tick.offset, props.start.y),
                    Point::new(tick.offset, props.start.y + size),
                    Point::new(tick.offset, props.start.y + size + font),
                    TextHAlign::Center,
                ),
                AxisOrientation::Top => (
                    Point::new(tick.offset, props.start.y),
                    Point::new(tick.offset, props.start.y - size),
                    Point::new(tick.offset, props.start.y - size - font),
                    TextHAlign::Center,
                ),
                AxisOrientation::Left => (
                    Point::new(props.start.x, tick.offset),
                    Point::new(props.start.x - size, tick.offset),
                    Point::new(props.start.x - size - 2.0, tick.offset),
                    TextHAlign::Right,
                ),
                AxisOrientation::Right => (
                    Point::new(props.start.x, tick.offset),
                    Point::new(props.start.x + size, tick.offset),
                    Point::new(props.start.x + size + 2.0, tick.offset),
                    TextHAlign::Left,
                ),
            };
            push_line(frame, from, to, self.axis_stroke_width, stroke);
            push_text(frame, &tick.label.text, label_at, font, fill, h_align);
        }
        if let Some(label) = &props.label {
            let middle = Point::new(
                (props.start.x + props.end.x) / 2.0,
                (props.start.y + props.end.y) / 2.0,
            );
            let at = if props.orientation.is_horizontal() {
                Point::new(middle.x, middle.y + size + font * 2.5)
            } else {
                Point::new((middle.x - size - font * 4.0).max(0.0), middle.y)
            };
            push_text(frame, label, at, font, fill, TextHAlign::Center);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unparseable_colors_fall_back_to_grey() {
        assert_eq!(paint("var(--unresolved)", 1.0), FALLBACK_COLOR);
        let red = paint("#ff0000", 0.5);
        assert_eq!(red.red, 1.0);
        assert_eq!(red.alpha, 0.5);
    }

    #[test]
    fn short_polygons_are_skipped() {
        let mut frame = RenderFrame::new(crate::core::Viewport::default());
        assert!(push_polygon(&mut frame, &[Point::new(0.0, 0.0), Point::new(1.0, 1.0)], FALLBACK_COLOR).is_none());
        assert!(frame.polygons.is_empty());
    }
}
