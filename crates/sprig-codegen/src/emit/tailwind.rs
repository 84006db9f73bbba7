//! Tailwind utility classes.
//!
//! Keys of the style descriptor are CSS property names, so a later step
//! replaces an earlier class for the same property. Values are one or more
//! space-separated classes.

use sprig_core::{
    LetterSpacingUnit, LineHeight, Rgb, ScaleMode, StrokeAlign, TextAlignHorizontal,
    TextAlignVertical, TextCase, TextDecoration, TextSegment,
};

use super::markup::Markup;
use super::{num, placeholder_url, ElementKind, ElementSpec, Emitter, TextSpec};
use crate::extract::{
    BlurDescriptor, BoxShadow, LinearGradient, PaintDescriptor, RadiusDescriptor,
    StrokeDescriptor,
};
use crate::layout::{CrossAxisAlignment, Direction, FlowLayout, MainAxisAlignment, Padding};
use crate::settings::Framework;
use crate::style::{Dimension, SizeDescriptor, StyleDescriptor};

/// Spacing scale in pixels and its class suffix.
const SPACING_SCALE: &[(f64, &str)] = &[
    (0.0, "0"),
    (1.0, "px"),
    (2.0, "0.5"),
    (4.0, "1"),
    (6.0, "1.5"),
    (8.0, "2"),
    (10.0, "2.5"),
    (12.0, "3"),
    (14.0, "3.5"),
    (16.0, "4"),
    (20.0, "5"),
    (24.0, "6"),
    (28.0, "7"),
    (32.0, "8"),
    (36.0, "9"),
    (40.0, "10"),
    (44.0, "11"),
    (48.0, "12"),
    (56.0, "14"),
    (64.0, "16"),
    (80.0, "20"),
    (96.0, "24"),
    (112.0, "28"),
    (128.0, "32"),
    (144.0, "36"),
    (160.0, "40"),
    (176.0, "44"),
    (192.0, "48"),
    (208.0, "52"),
    (224.0, "56"),
    (240.0, "60"),
    (256.0, "64"),
    (288.0, "72"),
    (320.0, "80"),
    (384.0, "96"),
];

const FONT_SIZES: &[(f64, &str)] = &[
    (12.0, "xs"),
    (14.0, "sm"),
    (16.0, "base"),
    (18.0, "lg"),
    (20.0, "xl"),
    (24.0, "2xl"),
    (30.0, "3xl"),
    (36.0, "4xl"),
    (48.0, "5xl"),
    (60.0, "6xl"),
    (72.0, "7xl"),
    (96.0, "8xl"),
    (128.0, "9xl"),
];

const RADII: &[(f64, &str)] = &[
    (2.0, "rounded-sm"),
    (4.0, "rounded"),
    (6.0, "rounded-md"),
    (8.0, "rounded-lg"),
    (12.0, "rounded-xl"),
    (16.0, "rounded-2xl"),
    (24.0, "rounded-3xl"),
];

const PALETTE: &[(&str, &str)] = &[
    ("black", "000000"),
    ("white", "FFFFFF"),
    ("gray-50", "F9FAFB"),
    ("gray-100", "F3F4F6"),
    ("gray-200", "E5E7EB"),
    ("gray-300", "D1D5DB"),
    ("gray-400", "9CA3AF"),
    ("gray-500", "6B7280"),
    ("gray-600", "4B5563"),
    ("gray-700", "374151"),
    ("gray-800", "1F2937"),
    ("gray-900", "111827"),
    ("red-50", "FEF2F2"),
    ("red-100", "FEE2E2"),
    ("red-200", "FECACA"),
    ("red-300", "FCA5A5"),
    ("red-400", "F87171"),
    ("red-500", "EF4444"),
    ("red-600", "DC2626"),
    ("red-700", "B91C1C"),
    ("red-800", "991B1B"),
    ("red-900", "7F1D1D"),
    ("orange-50", "FFF7ED"),
    ("orange-100", "FFEDD5"),
    ("orange-200", "FED7AA"),
    ("orange-300", "FDBA74"),
    ("orange-400", "FB923C"),
    ("orange-500", "F97316"),
    ("orange-600", "EA580C"),
    ("orange-700", "C2410C"),
    ("orange-800", "9A3412"),
    ("orange-900", "7C2D12"),
    ("yellow-50", "FEFCE8"),
    ("yellow-100", "FEF9C3"),
    ("yellow-200", "FEF08A"),
    ("yellow-300", "FDE047"),
    ("yellow-400", "FACC15"),
    ("yellow-500", "EAB308"),
    ("yellow-600", "CA8A04"),
    ("yellow-700", "A16207"),
    ("yellow-800", "854D0E"),
    ("yellow-900", "713F12"),
    ("green-50", "F0FDF4"),
    ("green-100", "DCFCE7"),
    ("green-200", "BBF7D0"),
    ("green-300", "86EFAC"),
    ("green-400", "4ADE80"),
    ("green-500", "22C55E"),
    ("green-600", "16A34A"),
    ("green-700", "15803D"),
    ("green-800", "166534"),
    ("green-900", "14532D"),
    ("blue-50", "EFF6FF"),
    ("blue-100", "DBEAFE"),
    ("blue-200", "BFDBFE"),
    ("blue-300", "93C5FD"),
    ("blue-400", "60A5FA"),
    ("blue-500", "3B82F6"),
    ("blue-600", "2563EB"),
    ("blue-700", "1D4ED8"),
    ("blue-800", "1E40AF"),
    ("blue-900", "1E3A8A"),
    ("indigo-50", "EEF2FF"),
    ("indigo-100", "E0E7FF"),
    ("indigo-200", "C7D2FE"),
    ("indigo-300", "A5B4FC"),
    ("indigo-400", "818CF8"),
    ("indigo-500", "6366F1"),
    ("indigo-600", "4F46E5"),
    ("indigo-700", "4338CA"),
    ("indigo-800", "3730A3"),
    ("indigo-900", "312E81"),
    ("purple-50", "FAF5FF"),
    ("purple-100", "F3E8FF"),
    ("purple-200", "E9D5FF"),
    ("purple-300", "D8B4FE"),
    ("purple-400", "C084FC"),
    ("purple-500", "A855F7"),
    ("purple-600", "9333EA"),
    ("purple-700", "7E22CE"),
    ("purple-800", "6B21A8"),
    ("purple-900", "581C87"),
    ("pink-50", "FDF2F8"),
    ("pink-100", "FCE7F3"),
    ("pink-200", "FBCFE8"),
    ("pink-300", "F9A8D4"),
    ("pink-400", "F472B6"),
    ("pink-500", "EC4899"),
    ("pink-600", "DB2777"),
    ("pink-700", "BE185D"),
    ("pink-800", "9D174D"),
    ("pink-900", "831843"),
];

fn distance(a: Rgb, b: Rgb) -> f64 {
    (a.r - b.r).powi(2) + (a.g - b.g).powi(2) + (a.b - b.b).powi(2)
}

/// Nearest palette entry to `color`.
pub fn nearest_color_name(color: Rgb) -> &'static str {
    let mut best = ("black", f64::INFINITY);
    for &(name, hex) in PALETTE {
        if let Some(entry) = Rgb::from_hex(hex) {
            let d = distance(color, entry);
            if d < best.1 {
                best = (name, d);
            }
        }
    }
    best.0
}

fn exact_color_name(color: Rgb) -> Option<&'static str> {
    let hex = color.to_hex6();
    PALETTE
        .iter()
        .find(|(_, entry)| *entry == hex)
        .map(|(name, _)| *name)
}

/// Opacity as a `/NN` suffix, empty when opaque.
fn opacity_suffix(opacity: f64) -> String {
    if opacity >= 1.0 {
        String::new()
    } else {
        format!("/{}", (opacity.max(0.0) * 100.0).round() as i64)
    }
}

fn lookup<'a>(table: &'a [(f64, &'a str)], value: f64, nearest: bool) -> Option<&'a str> {
    let exact = table
        .iter()
        .find(|(scale, _)| (scale - value).abs() < 0.01)
        .map(|(_, name)| *name);
    if exact.is_some() || !nearest {
        return exact;
    }
    table
        .iter()
        .min_by(|a, b| (a.0 - value).abs().total_cmp(&(b.0 - value).abs()))
        .map(|(_, name)| *name)
}

fn arbitrary_px(value: f64) -> String {
    format!("[{}px]", num(value))
}

#[derive(Debug, Clone, Copy)]
pub struct TailwindEmitter {
    markup: Markup,
    round_values: bool,
    round_colors: bool,
}

impl TailwindEmitter {
    pub fn new(jsx: bool, round_values: bool, round_colors: bool) -> Self {
        Self {
            markup: Markup { jsx },
            round_values,
            round_colors,
        }
    }

    /// `prefix-N` on the spacing scale, or an arbitrary pixel value.
    fn spacing(&self, prefix: &str, value: f64) -> String {
        match lookup(SPACING_SCALE, value.abs(), self.round_values) {
            Some(name) if value < 0.0 => format!("-{prefix}-{name}"),
            Some(name) => format!("{prefix}-{name}"),
            None => format!("{prefix}-{}", arbitrary_px(value)),
        }
    }

    fn padding(&self, padding: &Padding) -> String {
        if padding.is_uniform() {
            self.spacing("p", padding.top)
        } else if padding.is_symmetric() {
            format!(
                "{} {}",
                self.spacing("px", padding.left),
                self.spacing("py", padding.top)
            )
        } else {
            [
                ("pt", padding.top),
                ("pr", padding.right),
                ("pb", padding.bottom),
                ("pl", padding.left),
            ]
            .iter()
            .filter(|(_, v)| *v != 0.0)
            .map(|(p, v)| self.spacing(p, *v))
            .collect::<Vec<_>>()
            .join(" ")
        }
    }

    fn border_width(&self, prefix: &str, weight: f64) -> String {
        match weight {
            w if w == 1.0 => prefix.to_string(),
            w if w == 2.0 || w == 4.0 || w == 8.0 => format!("{prefix}-{}", num(w)),
            w => format!("{prefix}-{}", arbitrary_px(w)),
        }
    }

    fn shadow(&self, shadow: &BoxShadow) -> String {
        let (r, g, b) = shadow.color.to_rgb8();
        format!(
            "{}{}px_{}px_{}px_{}px_rgba({r},{g},{b},{})",
            if shadow.inset { "inset_" } else { "" },
            num(shadow.offset_x),
            num(shadow.offset_y),
            num(shadow.blur),
            num(shadow.spread),
            num(shadow.opacity)
        )
    }
}

impl Emitter for TailwindEmitter {
    fn framework(&self) -> Framework {
        Framework::Tailwind
    }

    /// The colour part of a colour utility, e.g. `red-500/50`.
    fn color(&self, color: Rgb, opacity: f64) -> String {
        let name = if self.round_colors {
            Some(nearest_color_name(color))
        } else {
            exact_color_name(color)
        };
        let base = match name {
            Some(name) => name.to_string(),
            None => format!("[{}]", color.to_hex()),
        };
        format!("{base}{}", opacity_suffix(opacity))
    }

    fn gradient(&self, gradient: &LinearGradient) -> String {
        const DIRECTIONS: [&str; 8] = ["t", "tr", "r", "br", "b", "bl", "l", "tl"];
        let index = ((gradient.angle_degrees() / 45.0).round() as usize) % 8;
        let mut classes = vec![format!("bg-gradient-to-{}", DIRECTIONS[index])];

        let color = |stop: &sprig_core::ColorStop| {
            self.color(stop.color.rgb(), stop.color.a * gradient.opacity)
        };
        if let Some(first) = gradient.stops.first() {
            classes.push(format!("from-{}", color(first)));
        }
        if gradient.stops.len() > 2 {
            classes.push(format!("via-{}", color(&gradient.stops[1])));
        }
        if let Some(last) = gradient.stops.last().filter(|_| gradient.stops.len() > 1) {
            classes.push(format!("to-{}", color(last)));
        }
        classes.join(" ")
    }

    fn size(&self, size: &SizeDescriptor, styles: &mut StyleDescriptor) {
        for (is_width, dimension) in [(true, size.width), (false, size.height)] {
            let (key, prefix) = if is_width { ("width", "w") } else { ("height", "h") };
            match dimension {
                Dimension::Fixed(value) => styles.insert(key, self.spacing(prefix, value)),
                Dimension::Fill if size.fills_primary(is_width) => styles.insert("flex", "flex-1"),
                Dimension::Fill => styles.insert("align-self", "self-stretch"),
                Dimension::Hug => {}
            }
        }
    }

    fn position(&self, x: f64, y: f64, styles: &mut StyleDescriptor) {
        styles.insert("position", "absolute");
        styles.insert("left", self.spacing("left", x));
        styles.insert("top", self.spacing("top", y));
    }

    fn blend(&self, opacity: f64, rotation: f64, styles: &mut StyleDescriptor) {
        if opacity < 1.0 {
            let percent = (opacity * 100.0).round() as i64;
            let class = if percent % 5 == 0 {
                format!("opacity-{percent}")
            } else {
                format!("opacity-[{}]", num(opacity))
            };
            styles.insert("opacity", class);
        }
        if rotation != 0.0 {
            styles.insert("transform", format!("rotate-[{}deg]", num(-rotation)));
            styles.insert("transform-origin", "origin-top-left");
        }
    }

    fn background(
        &self,
        paint: &PaintDescriptor,
        width: f64,
        height: f64,
        styles: &mut StyleDescriptor,
    ) {
        let value = match paint {
            PaintDescriptor::Solid { color, opacity } => {
                format!("bg-{}", self.color(*color, *opacity))
            }
            PaintDescriptor::LinearGradient(gradient) => self.gradient(gradient),
            PaintDescriptor::Image { scale_mode } => {
                let fit = match scale_mode {
                    ScaleMode::Fit => "bg-contain",
                    ScaleMode::Tile => "bg-repeat",
                    ScaleMode::Fill | ScaleMode::Crop => "bg-cover",
                };
                format!("bg-[url({})] {fit} bg-center", placeholder_url(width, height))
            }
        };
        styles.insert("background", value);
    }

    fn border(&self, stroke: &StrokeDescriptor, styles: &mut StyleDescriptor) {
        let color = self.color(stroke.color, stroke.opacity);
        match stroke.align {
            StrokeAlign::Outside => styles.insert(
                "outline",
                format!(
                    "{} outline-{color}",
                    self.border_width("outline", stroke.weight)
                ),
            ),
            StrokeAlign::Inside | StrokeAlign::Center => styles.insert(
                "border",
                format!(
                    "{} border-{color}",
                    self.border_width("border", stroke.weight)
                ),
            ),
        }
    }

    fn radius(
        &self,
        radius: &RadiusDescriptor,
        _width: f64,
        _height: f64,
        styles: &mut StyleDescriptor,
    ) {
        let value = match radius {
            RadiusDescriptor::Full => "rounded-full".to_string(),
            RadiusDescriptor::Uniform(r) => match lookup(RADII, *r, self.round_values) {
                Some(class) => class.to_string(),
                None => format!("rounded-{}", arbitrary_px(*r)),
            },
            RadiusDescriptor::Corners(c) => [
                ("tl", c.top_left),
                ("tr", c.top_right),
                ("br", c.bottom_right),
                ("bl", c.bottom_left),
            ]
            .iter()
            .filter(|(_, r)| *r > 0.0)
            .map(|(corner, r)| format!("rounded-{corner}-{}", arbitrary_px(*r)))
            .collect::<Vec<_>>()
            .join(" "),
        };
        styles.insert("border-radius", value);
    }

    fn shadows(&self, shadows: &[BoxShadow], styles: &mut StyleDescriptor) {
        let value: Vec<String> = shadows.iter().map(|s| self.shadow(s)).collect();
        styles.insert("box-shadow", format!("shadow-[{}]", value.join(",")));
    }

    fn blur(&self, blur: &BlurDescriptor, styles: &mut StyleDescriptor) {
        if let Some(radius) = blur.layer {
            styles.insert("filter", format!("blur-{}", arbitrary_px(radius)));
        }
        if let Some(radius) = blur.background {
            styles.insert(
                "backdrop-filter",
                format!("backdrop-blur-{}", arbitrary_px(radius)),
            );
        }
    }

    fn clip(&self, styles: &mut StyleDescriptor) {
        styles.insert("overflow", "overflow-hidden");
    }

    fn flow(&self, flow: &FlowLayout, styles: &mut StyleDescriptor) {
        styles.insert("display", "flex");
        if flow.direction == Direction::Column {
            styles.insert("flex-direction", "flex-col");
        }
        if flow.wrap {
            styles.insert("flex-wrap", "flex-wrap");
        }
        styles.insert(
            "justify-content",
            match flow.main_axis {
                MainAxisAlignment::Start => "justify-start",
                MainAxisAlignment::Center => "justify-center",
                MainAxisAlignment::End => "justify-end",
                MainAxisAlignment::SpaceBetween => "justify-between",
            },
        );
        styles.insert(
            "align-items",
            match flow.cross_axis {
                CrossAxisAlignment::Start => "items-start",
                CrossAxisAlignment::Center => "items-center",
                CrossAxisAlignment::End => "items-end",
                CrossAxisAlignment::Baseline => "items-baseline",
            },
        );
        if flow.gap > 0.0 && flow.main_axis != MainAxisAlignment::SpaceBetween {
            styles.insert("gap", self.spacing("gap", flow.gap));
        }
        if !flow.padding.is_zero() {
            styles.insert("padding", self.padding(&flow.padding));
        }
    }

    fn absolute_container(&self, styles: &mut StyleDescriptor) {
        if !styles.contains("position") {
            styles.insert("position", "relative");
        }
    }

    fn typography(
        &self,
        run: &TextSegment,
        fill: Option<(Rgb, f64)>,
        styles: &mut StyleDescriptor,
    ) {
        if let Some((color, opacity)) = fill {
            styles.insert("color", format!("text-{}", self.color(color, opacity)));
        }
        styles.insert(
            "font-family",
            format!("font-['{}']", run.font_name.family.replace(' ', "_")),
        );
        let size = match lookup(FONT_SIZES, run.font_size, self.round_values) {
            Some(name) => format!("text-{name}"),
            None => format!("text-{}", arbitrary_px(run.font_size)),
        };
        styles.insert("font-size", size);
        let weight = match run.font_weight {
            100 => "font-thin".to_string(),
            200 => "font-extralight".to_string(),
            300 => "font-light".to_string(),
            400 => "font-normal".to_string(),
            500 => "font-medium".to_string(),
            600 => "font-semibold".to_string(),
            700 => "font-bold".to_string(),
            800 => "font-extrabold".to_string(),
            900 => "font-black".to_string(),
            w => format!("font-[{w}]"),
        };
        styles.insert("font-weight", weight);
        if run.is_italic() {
            styles.insert("font-style", "italic");
        }
        match run.text_decoration {
            TextDecoration::Underline => styles.insert("text-decoration", "underline"),
            TextDecoration::Strikethrough => styles.insert("text-decoration", "line-through"),
            TextDecoration::None => {}
        }
        match run.text_case {
            TextCase::Upper => styles.insert("text-transform", "uppercase"),
            TextCase::Lower => styles.insert("text-transform", "lowercase"),
            TextCase::Title => styles.insert("text-transform", "capitalize"),
            TextCase::Original => {}
        }
        if run.letter_spacing.value != 0.0 {
            let value = match run.letter_spacing.unit {
                LetterSpacingUnit::Pixels => arbitrary_px(run.letter_spacing.value),
                LetterSpacingUnit::Percent => {
                    format!("[{}em]", num(run.letter_spacing.value / 100.0))
                }
            };
            styles.insert("letter-spacing", format!("tracking-{value}"));
        }
        match run.line_height {
            LineHeight::Pixels { value } => {
                styles.insert("line-height", format!("leading-{}", arbitrary_px(value)))
            }
            LineHeight::Percent { value } => {
                styles.insert("line-height", format!("leading-[{}%]", num(value)))
            }
            LineHeight::Auto => {}
        }
    }

    fn text_align(
        &self,
        horizontal: TextAlignHorizontal,
        vertical: TextAlignVertical,
        styles: &mut StyleDescriptor,
    ) {
        match horizontal {
            TextAlignHorizontal::Center => styles.insert("text-align", "text-center"),
            TextAlignHorizontal::Right => styles.insert("text-align", "text-right"),
            TextAlignHorizontal::Justified => styles.insert("text-align", "text-justify"),
            TextAlignHorizontal::Left => {}
        }
        let justify = match vertical {
            TextAlignVertical::Top => return,
            TextAlignVertical::Center => "justify-center",
            TextAlignVertical::Bottom => "justify-end",
        };
        styles.insert("display", "flex");
        styles.insert("flex-direction", "flex-col");
        styles.insert("justify-content", justify);
    }

    fn text_content(&self, text: &str, _case: TextCase) -> String {
        text.to_string()
    }

    fn attributes(&self, styles: &StyleDescriptor) -> String {
        let classes: Vec<&str> = styles
            .iter()
            .map(|(_, v)| v)
            .filter(|v| !v.is_empty())
            .collect();
        if classes.is_empty() {
            return String::new();
        }
        format!(
            "{}=\"{}\"",
            self.markup.class_attribute(),
            classes.join(" ")
        )
    }

    fn container(&self, element: &ElementSpec<'_>) -> String {
        let attributes = self.attributes(&element.styles);
        match &element.kind {
            ElementKind::Image { src } => self.markup.image(&attributes, element.name, src),
            ElementKind::Container => {
                self.markup
                    .element("div", &attributes, element.name, &element.children)
            }
        }
    }

    fn text(&self, text: &TextSpec<'_>) -> String {
        let attributes = self.attributes(&text.styles);
        let content: String = match text.runs.as_slice() {
            [run] if run.styles.is_none() => self.markup.escape_text(&run.text),
            runs => runs
                .iter()
                .map(|run| {
                    let run_attributes = run
                        .styles
                        .as_ref()
                        .map(|s| self.attributes(s))
                        .unwrap_or_default();
                    self.markup
                        .span(&run_attributes, &self.markup.escape_text(&run.text))
                })
                .collect(),
        };
        self.markup.text(&attributes, text.name, &content)
    }
}
