use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Absolute sRGB color as reported by a computed-style read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CssColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: f64,
}

const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("black", [0, 0, 0]),
    ("white", [255, 255, 255]),
    ("red", [255, 0, 0]),
    ("green", [0, 128, 0]),
    ("lime", [0, 255, 0]),
    ("blue", [0, 0, 255]),
    ("yellow", [255, 255, 0]),
    ("cyan", [0, 255, 255]),
    ("aqua", [0, 255, 255]),
    ("magenta", [255, 0, 255]),
    ("fuchsia", [255, 0, 255]),
    ("gray", [128, 128, 128]),
    ("grey", [128, 128, 128]),
    ("silver", [192, 192, 192]),
    ("maroon", [128, 0, 0]),
    ("olive", [128, 128, 0]),
    ("navy", [0, 0, 128]),
    ("purple", [128, 0, 128]),
    ("teal", [0, 128, 128]),
    ("orange", [255, 165, 0]),
    ("pink", [255, 192, 203]),
    ("brown", [165, 42, 42]),
    ("gold", [255, 215, 0]),
    ("indigo", [75, 0, 130]),
    ("violet", [238, 130, 238]),
    ("coral", [255, 127, 80]),
    ("salmon", [250, 128, 114]),
    ("tomato", [255, 99, 71]),
    ("crimson", [220, 20, 60]),
    ("orchid", [218, 112, 214]),
    ("plum", [221, 160, 221]),
    ("khaki", [240, 230, 140]),
    ("tan", [210, 180, 140]),
    ("beige", [245, 245, 220]),
    ("ivory", [255, 255, 240]),
    ("lavender", [230, 230, 250]),
    ("turquoise", [64, 224, 208]),
    ("skyblue", [135, 206, 235]),
    ("steelblue", [70, 130, 180]),
    ("royalblue", [65, 105, 225]),
    ("slategray", [112, 128, 144]),
    ("darkgray", [169, 169, 169]),
    ("lightgray", [211, 211, 211]),
    ("gainsboro", [220, 220, 220]),
    ("whitesmoke", [245, 245, 245]),
    ("seagreen", [46, 139, 87]),
    ("forestgreen", [34, 139, 34]),
    ("darkgreen", [0, 100, 0]),
    ("firebrick", [178, 34, 34]),
    ("darkorange", [255, 140, 0]),
    ("rebeccapurple", [102, 51, 153]),
];

impl CssColor {
    #[must_use]
    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    #[must_use]
    pub const fn transparent() -> Self {
        Self::rgba(0, 0, 0, 0.0)
    }

    /// `true` for the computed "unset" sentinel (`rgba(0, 0, 0, 0)`).
    #[must_use]
    pub fn is_transparent(self) -> bool {
        self.alpha <= 0.0
    }

    /// Parses an absolute CSS color. Expressions that still contain `var(`
    /// are rejected; substitute them first.
    pub fn parse(input: &str) -> ChartResult<Self> {
        let value = input.trim().to_ascii_lowercase();
        if value.is_empty() {
            return Err(ChartError::InvalidColor(input.to_owned()));
        }
        if value == "transparent" {
            return Ok(Self::transparent());
        }
        if let Some(hex) = value.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ChartError::InvalidColor(input.to_owned()));
        }
        if let Some((name, args)) = split_function(&value) {
            let parsed = match name {
                "rgb" | "rgba" => parse_rgb_args(args),
                "hsl" | "hsla" => parse_hsl_args(args),
                _ => None,
            };
            return parsed.ok_or_else(|| ChartError::InvalidColor(input.to_owned()));
        }
        NAMED_COLORS
            .iter()
            .find(|(name, _)| *name == value)
            .map(|(_, [r, g, b])| Self::rgb(*r, *g, *b))
            .ok_or_else(|| ChartError::InvalidColor(input.to_owned()))
    }

    /// Serializes like a browser's computed `background-color`.
    #[must_use]
    pub fn to_css_string(self) -> String {
        if self.alpha >= 1.0 {
            format!("rgb({}, {}, {})", self.red, self.green, self.blue)
        } else {
            format!(
                "rgba({}, {}, {}, {})",
                self.red,
                self.green,
                self.blue,
                format_alpha(self.alpha)
            )
        }
    }

    /// Returns a copy with alpha multiplied by `factor`.
    #[must_use]
    pub fn with_opacity(self, factor: f64) -> Self {
        Self {
            alpha: (self.alpha * factor).clamp(0.0, 1.0),
            ..self
        }
    }
}

impl From<CssColor> for Color {
    fn from(color: CssColor) -> Self {
        Color::rgba(
            f64::from(color.red) / 255.0,
            f64::from(color.green) / 255.0,
            f64::from(color.blue) / 255.0,
            color.alpha.clamp(0.0, 1.0),
        )
    }
}

fn format_alpha(alpha: f64) -> String {
    let rounded = (alpha.clamp(0.0, 1.0) * 1000.0).round() / 1000.0;
    let text = format!("{rounded:.3}");
    text.trim_end_matches('0').trim_end_matches('.').to_owned()
}

fn split_function(value: &str) -> Option<(&str, &str)> {
    let open = value.find('(')?;
    let inner = value.strip_suffix(')')?;
    Some((value[..open].trim(), &inner[open + 1..]))
}

fn parse_hex(hex: &str) -> Option<CssColor> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => Some(CssColor::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
        4 => Some(CssColor::rgba(
            nibble(0)?,
            nibble(1)?,
            nibble(2)?,
            f64::from(nibble(3)?) / 255.0,
        )),
        6 => Some(CssColor::rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(CssColor::rgba(
            byte(0)?,
            byte(2)?,
            byte(4)?,
            f64::from(byte(6)?) / 255.0,
        )),
        _ => None,
    }
}

/// Splits function arguments in either legacy comma syntax or modern
/// space syntax with an optional `/ alpha`.
fn split_args(args: &str) -> Option<(Vec<&str>, Option<&str>)> {
    if args.contains(',') {
        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        return match parts.len() {
            3 => Some((parts, None)),
            4 => Some((parts[..3].to_vec(), Some(parts[3]))),
            _ => None,
        };
    }
    let (channels, alpha) = match args.split_once('/') {
        Some((channels, alpha)) => (channels, Some(alpha.trim())),
        None => (args, None),
    };
    let parts: Vec<&str> = channels.split_whitespace().collect();
    (parts.len() == 3).then_some((parts, alpha))
}

fn parse_number_or_percent(token: &str, percent_scale: f64) -> Option<f64> {
    let value = match token.strip_suffix('%') {
        Some(number) => number.trim().parse::<f64>().ok()? / 100.0 * percent_scale,
        None => token.parse::<f64>().ok()?,
    };
    value.is_finite().then_some(value)
}

fn parse_alpha(token: Option<&str>) -> Option<f64> {
    match token {
        None => Some(1.0),
        Some(token) => parse_number_or_percent(token, 1.0).map(|a| a.clamp(0.0, 1.0)),
    }
}

fn channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

fn parse_rgb_args(args: &str) -> Option<CssColor> {
    let (parts, alpha) = split_args(args)?;
    let red = parse_number_or_percent(parts[0], 255.0)?;
    let green = parse_number_or_percent(parts[1], 255.0)?;
    let blue = parse_number_or_percent(parts[2], 255.0)?;
    Some(CssColor::rgba(
        channel(red),
        channel(green),
        channel(blue),
        parse_alpha(alpha)?,
    ))
}

fn parse_hsl_args(args: &str) -> Option<CssColor> {
    let (parts, alpha) = split_args(args)?;
    let hue = parts[0].trim_end_matches("deg").parse::<f64>().ok()?;
    let saturation = parse_number_or_percent(parts[1], 1.0)?.clamp(0.0, 1.0);
    let lightness = parse_number_or_percent(parts[2], 1.0)?.clamp(0.0, 1.0);
    let (r, g, b) = hsl_to_rgb(hue.rem_euclid(360.0), saturation, lightness);
    Some(CssColor::rgba(
        channel(r * 255.0),
        channel(g * 255.0),
        channel(b * 255.0),
        parse_alpha(alpha)?,
    ))
}

fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> (f64, f64, f64) {
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let sector = hue / 60.0;
    let x = chroma * (1.0 - (sector.rem_euclid(2.0) - 1.0).abs());
    let (r, g, b) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = lightness - chroma / 2.0;
    (r + m, g + m, b + m)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_forms() {
        assert_eq!(CssColor::parse("#fff").expect("short hex"), CssColor::rgb(255, 255, 255));
        assert_eq!(
            CssColor::parse("#048660").expect("long hex"),
            CssColor::rgb(4, 134, 96)
        );
        let with_alpha = CssColor::parse("#00000080").expect("hex alpha");
        assert!((with_alpha.alpha - 128.0 / 255.0).abs() < 1e-9);
    }

    #[test]
    fn parses_functional_forms() {
        assert_eq!(
            CssColor::parse("rgb(4, 134, 96)").expect("legacy rgb"),
            CssColor::rgb(4, 134, 96)
        );
        assert_eq!(
            CssColor::parse("rgb(4 134 96 / 50%)").expect("modern rgb"),
            CssColor::rgba(4, 134, 96, 0.5)
        );
        assert_eq!(
            CssColor::parse("hsl(0, 100%, 50%)").expect("hsl"),
            CssColor::rgb(255, 0, 0)
        );
    }

    #[test]
    fn serializes_like_computed_style() {
        assert_eq!(CssColor::rgb(4, 134, 96).to_css_string(), "rgb(4, 134, 96)");
        assert_eq!(
            CssColor::rgba(0, 0, 0, 0.25).to_css_string(),
            "rgba(0, 0, 0, 0.25)"
        );
        assert_eq!(CssColor::transparent().to_css_string(), "rgba(0, 0, 0, 0)");
    }

    #[test]
    fn rejects_unknown_and_unsubstituted_values() {
        assert!(CssColor::parse("var(--x)").is_err());
        assert!(CssColor::parse("not-a-color").is_err());
        assert!(CssColor::parse("#12").is_err());
    }
}
