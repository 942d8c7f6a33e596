use std::fmt::Write as _;

use crate::context::{
    AnimationProps, AreaProps, AxisOrientation, AxisProps, AxisType, BarProps, ChartKind,
    ChartPrimitives, ChartShellProps, GridProps, LegendProps, LineProps, PieProps,
    PolarAngleAxisProps, PolarGridProps, PolarRadiusAxisProps, RadarProps, ReferenceLineProps,
    ScatterProps, SectorProps, TooltipProps, ZAxisProps,
};
use crate::core::Point;
use crate::error::{ChartError, ChartResult};

const SECTOR_STEP_RAD: f64 = 0.05;

/// Finished SVG document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgDocument {
    pub kind: ChartKind,
    pub markup: String,
}

impl SvgDocument {
    /// Number of occurrences of `<tag` in the markup.
    #[must_use]
    pub fn count_elements(&self, tag: &str) -> usize {
        self.markup.matches(&format!("<{tag}")).count()
    }
}

#[derive(Debug, Clone)]
pub struct SvgScene {
    kind: ChartKind,
    body: String,
    open_groups: usize,
}

/// Backend emitting SVG markup, one element per logical primitive.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgPrimitives;

impl SvgPrimitives {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        return "0".to_owned();
    }
    let text = format!("{rounded:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_owned()
}

fn path_data(points: &[Point], close: bool) -> String {
    let mut d = String::new();
    for (index, point) in points.iter().enumerate() {
        let command = if index == 0 { 'M' } else { 'L' };
        let _ = write!(d, "{command}{},{}", num(point.x), num(point.y));
    }
    if close && !points.is_empty() {
        d.push('Z');
    }
    d
}

fn animation_attr(animation: AnimationProps) -> String {
    if animation.active {
        format!(" data-animation-duration=\"{}\"", animation.duration_ms)
    } else {
        String::new()
    }
}

fn dash_attr(dash: Option<(f64, f64)>) -> String {
    dash.map(|(d, g)| format!(" stroke-dasharray=\"{} {}\"", num(d), num(g)))
        .unwrap_or_default()
}

fn axis_class(orientation: AxisOrientation) -> &'static str {
    match orientation {
        AxisOrientation::Top => "axis axis-top",
        AxisOrientation::Bottom => "axis axis-bottom",
        AxisOrientation::Left => "axis axis-left",
        AxisOrientation::Right => "axis axis-right",
    }
}

impl SvgScene {
    fn push(&mut self, element: impl AsRef<str>) {
        self.body.push_str(element.as_ref());
        self.body.push('\n');
    }

    fn open_group(&mut self, attrs: impl AsRef<str>) {
        self.push(format!("<g {}>", attrs.as_ref()));
        self.open_groups += 1;
    }

    fn close_group(&mut self) {
        self.push("</g>");
        self.open_groups = self.open_groups.saturating_sub(1);
    }

    #[allow(clippy::too_many_arguments)]
    fn text(
        &mut self,
        x: f64,
        y: f64,
        anchor: &str,
        font_size: f64,
        fill: &str,
        text: &str,
        title: Option<&str>,
    ) {
        let title = title
            .map(|t| format!("<title>{}</title>", escape(t)))
            .unwrap_or_default();
        self.push(format!(
            "<text x=\"{}\" y=\"{}\" text-anchor=\"{anchor}\" dominant-baseline=\"central\" font-size=\"{}\" fill=\"{}\">{title}{}</text>",
            num(x),
            num(y),
            num(font_size),
            escape(fill),
            escape(text)
        ));
    }

    fn line(&mut self, from: Point, to: Point, stroke: &str, extra: &str) {
        self.push(format!(
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\"{extra}/>",
            num(from.x),
            num(from.y),
            num(to.x),
            num(to.y),
            escape(stroke)
        ));
    }
}

impl ChartPrimitives for SvgPrimitives {
    type Scene = SvgScene;
    type Output = SvgDocument;

    fn backend_name(&self) -> &'static str {
        "svg"
    }

    fn chart(&self, kind: ChartKind, props: &ChartShellProps) -> SvgScene {
        let width = props.viewport.width;
        let height = props.viewport.height;
        let class = match &props.class_name {
            Some(extra) => format!("chart-kit {} {}", kind.name(), escape(extra)),
            None => format!("chart-kit {}", kind.name()),
        };
        let aria = props
            .aria_label
            .as_deref()
            .map(|label| format!(" aria-label=\"{}\"", escape(label)))
            .unwrap_or_default();
        let mut scene = SvgScene {
            kind,
            body: String::new(),
            open_groups: 0,
        };
        scene.push(format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\" class=\"{class}\" role=\"img\"{aria}>"
        ));
        scene.push(format!(
            "<rect class=\"chart-background\" x=\"0\" y=\"0\" width=\"{width}\" height=\"{height}\" fill=\"{}\"/>",
            escape(&props.background)
        ));
        scene
    }

    fn x_axis(&self, scene: &mut SvgScene, props: &AxisProps) {
        render_axis(scene, props);
    }

    fn y_axis(&self, scene: &mut SvgScene, props: &AxisProps) {
        render_axis(scene, props);
    }

    fn z_axis(&self, _scene: &mut SvgScene, _props: &ZAxisProps) {
        // Z only scales scatter marks; it has no visual of its own.
    }

    fn cartesian_grid(&self, scene: &mut SvgScene, props: &GridProps) {
        scene.open_group("class=\"cartesian-grid\"");
        let dash = dash_attr(props.dash);
        for y in &props.horizontal {
            scene.line(
                Point::new(props.bounds.x, *y),
                Point::new(props.bounds.right(), *y),
                &props.stroke,
                &dash,
            );
        }
        for x in &props.vertical {
            scene.line(
                Point::new(*x, props.bounds.y),
                Point::new(*x, props.bounds.bottom()),
                &props.stroke,
                &dash,
            );
        }
        scene.close_group();
    }

    fn reference_line(&self, scene: &mut SvgScene, props: &ReferenceLineProps) {
        scene.open_group("class=\"reference-line\"");
        scene.line(props.from, props.to, &props.stroke, &dash_attr(props.dash));
        if let Some(label) = &props.label {
            scene.text(
                props.to.x,
                props.to.y - props.tick_style.font_size,
                "end",
                props.tick_style.font_size,
                &props.tick_style.fill,
                label,
                None,
            );
        }
        scene.close_group();
    }

    fn line(&self, scene: &mut SvgScene, props: &LineProps) {
        scene.open_group(format!(
            "class=\"line\" data-key=\"{}\" opacity=\"{}\"{}",
            escape(&props.data_key),
            num(props.opacity),
            animation_attr(props.animation)
        ));
        scene.push(format!(
            "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"/>",
            path_data(&props.points, false),
            escape(&props.stroke),
            num(props.stroke_width)
        ));
        if props.dot_radius > 0.0 {
            for point in &props.points {
                scene.push(format!(
                    "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\"/>",
                    num(point.x),
                    num(point.y),
                    num(props.dot_radius),
                    escape(&props.stroke)
                ));
            }
        }
        scene.close_group();
    }

    fn area(&self, scene: &mut SvgScene, props: &AreaProps) {
        scene.open_group(format!(
            "class=\"area\" data-key=\"{}\" opacity=\"{}\"{}",
            escape(&props.data_key),
            num(props.opacity),
            animation_attr(props.animation)
        ));
        let outline = area_outline(props);
        if outline.len() >= 3 {
            scene.push(format!(
                "<path d=\"{}\" fill=\"{}\" fill-opacity=\"{}\" stroke=\"none\"/>",
                path_data(&outline, true),
                escape(&props.fill),
                num(props.fill_opacity)
            ));
        }
        scene.push(format!(
            "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"/>",
            path_data(&props.points, false),
            escape(&props.stroke),
            num(props.stroke_width)
        ));
        scene.close_group();
    }

    fn bar(&self, scene: &mut SvgScene, props: &BarProps) {
        scene.open_group(format!(
            "class=\"bar\" data-key=\"{}\"{}",
            escape(&props.data_key),
            animation_attr(props.animation)
        ));
        for (index, rect) in props.rects.iter().enumerate() {
            let (fill, opacity) = props.paint_for(index);
            scene.push(format!(
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{}\" fill=\"{}\" opacity=\"{}\"/>",
                num(rect.x),
                num(rect.y),
                num(rect.width),
                num(rect.height),
                num(props.radius),
                escape(fill),
                num(opacity)
            ));
        }
        scene.close_group();
    }

    fn scatter(&self, scene: &mut SvgScene, props: &ScatterProps) {
        scene.open_group(format!(
            "class=\"scatter\" data-key=\"{}\" opacity=\"{}\"{}",
            escape(&props.data_key),
            num(props.opacity),
            animation_attr(props.animation)
        ));
        for point in &props.points {
            scene.push(format!(
                "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\"/>",
                num(point.center.x),
                num(point.center.y),
                num(point.radius),
                escape(&props.fill)
            ));
        }
        scene.close_group();
    }

    fn pie(&self, scene: &mut SvgScene, props: &PieProps) {
        scene.open_group(format!(
            "class=\"pie\" data-key=\"{}\"{}",
            escape(&props.data_key),
            animation_attr(props.animation)
        ));
        for sector in &props.sectors {
            self.sector(scene, sector);
        }
        scene.close_group();
    }

    fn sector(&self, scene: &mut SvgScene, props: &SectorProps) {
        scene.push(format!(
            "<path class=\"sector\" data-name=\"{}\" d=\"{}\" fill=\"{}\" stroke=\"{}\" opacity=\"{}\"/>",
            escape(&props.name),
            path_data(&props.outline(SECTOR_STEP_RAD), true),
            escape(&props.fill),
            escape(&props.stroke),
            num(props.opacity)
        ));
    }

    fn polar_grid(&self, scene: &mut SvgScene, props: &PolarGridProps) {
        scene.open_group("class=\"polar-grid\"");
        for radius in &props.radii {
            let ring: Vec<Point> = props
                .angles
                .iter()
                .map(|angle| SectorProps::polar(props.center, *radius, *angle))
                .collect();
            scene.push(format!(
                "<path d=\"{}\" fill=\"none\" stroke=\"{}\"/>",
                path_data(&ring, true),
                escape(&props.stroke)
            ));
        }
        let outer = props.radii.iter().copied().fold(0.0, f64::max);
        for angle in &props.angles {
            scene.line(
                props.center,
                SectorProps::polar(props.center, outer, *angle),
                &props.stroke,
                "",
            );
        }
        scene.close_group();
    }

    fn polar_angle_axis(&self, scene: &mut SvgScene, props: &PolarAngleAxisProps) {
        scene.open_group("class=\"polar-angle-axis\"");
        for tick in &props.ticks {
            let anchor = if tick.position.x > props.center.x + 1.0 {
                "start"
            } else if tick.position.x < props.center.x - 1.0 {
                "end"
            } else {
                "middle"
            };
            scene.text(
                tick.position.x,
                tick.position.y,
                anchor,
                props.tick_style.font_size,
                &props.tick_style.fill,
                &tick.label.text,
                tick.label.tooltip(),
            );
        }
        scene.close_group();
    }

    fn polar_radius_axis(&self, scene: &mut SvgScene, props: &PolarRadiusAxisProps) {
        scene.open_group("class=\"polar-radius-axis\"");
        if let Some(last) = props.ticks.last() {
            scene.line(props.center, last.position, &props.stroke, "");
        }
        for tick in &props.ticks {
            scene.text(
                tick.position.x + 4.0,
                tick.position.y,
                "start",
                props.tick_style.font_size,
                &props.tick_style.fill,
                &tick.label,
                None,
            );
        }
        scene.close_group();
    }

    fn radar(&self, scene: &mut SvgScene, props: &RadarProps) {
        scene.push(format!(
            "<path class=\"radar\" data-key=\"{}\" d=\"{}\" fill=\"{}\" fill-opacity=\"{}\" stroke=\"{}\" stroke-width=\"{}\" opacity=\"{}\"{}/>",
            escape(&props.data_key),
            path_data(&props.points, true),
            escape(&props.fill),
            num(props.fill_opacity),
            escape(&props.stroke),
            num(props.stroke_width),
            num(props.opacity),
            animation_attr(props.animation)
        ));
    }

    fn tooltip(&self, scene: &mut SvgScene, props: &TooltipProps) {
        scene.open_group("class=\"tooltip\" pointer-events=\"none\"");
        if let Some(cursor) = props.cursor {
            scene.push(format!(
                "<rect class=\"tooltip-cursor\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" fill-opacity=\"0.3\"/>",
                num(cursor.x),
                num(cursor.y),
                num(cursor.width),
                num(cursor.height),
                escape(&props.border)
            ));
        }
        let bounds = props.bounds;
        scene.push(format!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{}\" fill=\"{}\" stroke=\"{}\"/>",
            num(bounds.x),
            num(bounds.y),
            num(bounds.width),
            num(bounds.height),
            num(props.radius),
            escape(&props.background),
            escape(&props.border)
        ));
        let row = (bounds.height - 16.0) / (props.entries.len() + 1) as f64;
        let left = bounds.x + 8.0;
        scene.text(
            left,
            bounds.y + 8.0 + row / 2.0,
            "start",
            props.font_size,
            &props.text,
            &props.title,
            None,
        );
        for (index, entry) in props.entries.iter().enumerate() {
            scene.text(
                left,
                bounds.y + 8.0 + row * (index as f64 + 1.5),
                "start",
                props.font_size,
                &entry.color,
                &format!("{}: {}", entry.name, entry.value),
                None,
            );
        }
        scene.close_group();
    }

    fn legend(&self, scene: &mut SvgScene, props: &LegendProps) {
        scene.open_group("class=\"legend\"");
        for item in &props.items {
            let class = if item.payload.inactive {
                "legend-item inactive"
            } else if item.emphasized {
                "legend-item active"
            } else {
                "legend-item"
            };
            scene.open_group(format!(
                "class=\"{class}\" data-key=\"{}\" opacity=\"{}\"",
                escape(&item.payload.data_key),
                num(item.opacity)
            ));
            scene.push(format!(
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"/>",
                num(item.swatch.x),
                num(item.swatch.y),
                num(item.swatch.width),
                num(item.swatch.height),
                escape(&item.payload.color)
            ));
            scene.text(
                item.swatch.right() + 4.0,
                item.swatch.center().y,
                "start",
                props.font_size,
                &props.text_color,
                &item.payload.value,
                None,
            );
            scene.close_group();
        }
        scene.close_group();
    }

    fn finish(&self, mut scene: SvgScene) -> ChartResult<SvgDocument> {
        if scene.open_groups != 0 {
            return Err(ChartError::Backend(format!(
                "{} unclosed svg groups",
                scene.open_groups
            )));
        }
        scene.body.push_str("</svg>");
        Ok(SvgDocument {
            kind: scene.kind,
            markup: scene.body,
        })
    }
}

fn render_axis(scene: &mut SvgScene, props: &AxisProps) {
    let axis_type = match props.axis_type {
        AxisType::Category => "category",
        AxisType::Number => "number",
    };
    scene.open_group(format!(
        "class=\"{}\" data-axis-type=\"{axis_type}\"",
        axis_class(props.orientation)
    ));
    scene.line(props.start, props.end, &props.stroke, "");

    let size = props.tick_size;
    for tick in &props.ticks {
        let (from, to, label_at, anchor) = match props.orientation {
            AxisOrientation::Bottom => (
                Point::new(tick.offset, props.start.y),
                Point::new(tick.offset, props.start.y + size),
                Point::new(tick.offset, props.start.y + size + props.tick_style.font_size),
                "middle",
            ),
            AxisOrientation::Top => (
                Point::new(tick.offset, props.start.y),
                Point::new(tick.offset, props.start.y - size),
                Point::new(tick.offset, props.start.y - size - props.tick_style.font_size),
                "middle",
            ),
            AxisOrientation::Left => (
                Point::new(props.start.x, tick.offset),
                Point::new(props.start.x - size, tick.offset),
                Point::new(props.start.x - size - 2.0, tick.offset),
                "end",
            ),
            AxisOrientation::Right => (
                Point::new(props.start.x, tick.offset),
                Point::new(props.start.x + size, tick.offset),
                Point::new(props.start.x + size + 2.0, tick.offset),
                "start",
            ),
        };
        scene.line(from, to, &props.stroke, "");
        scene.text(
            label_at.x,
            label_at.y,
            anchor,
            props.tick_style.font_size,
            &props.tick_style.fill,
            &tick.label.text,
            tick.label.tooltip(),
        );
    }

    if let Some(label) = &props.label {
        let middle = Point::new(
            (props.start.x + props.end.x) / 2.0,
            (props.start.y + props.end.y) / 2.0,
        );
        let at = if props.orientation.is_horizontal() {
            Point::new(middle.x, middle.y + size + props.tick_style.font_size * 2.5)
        } else {
            Point::new(middle.x - size - props.tick_style.font_size * 4.0, middle.y)
        };
        scene.text(
            at.x,
            at.y,
            "middle",
            props.tick_style.font_size,
            &props.tick_style.fill,
            label,
            None,
        );
    }
    scene.close_group();
}

/// Line points followed by their projections on the baseline, reversed.
pub(crate) fn area_outline(props: &AreaProps) -> Vec<Point> {
    let mut outline = props.points.clone();
    for point in props.points.iter().rev() {
        if props.vertical {
            outline.push(Point::new(props.baseline, point.y));
        } else {
            outline.push(Point::new(point.x, props.baseline));
        }
    }
    outline
}
