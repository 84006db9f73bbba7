//! Flutter widget trees.
//!
//! Style keys name widget arguments. [`FlutterEmitter::container`] decides
//! which widget each argument lands on: decoration fields go into a
//! `BoxDecoration`, placement and blend become wrapper widgets.

use sprig_core::{
    LetterSpacingUnit, LineHeight, Rgb, ScaleMode, StrokeAlign, TextAlignHorizontal,
    TextAlignVertical, TextDecoration, TextSegment,
};

use super::{indent, num, placeholder_url, ElementKind, ElementSpec, Emitter, TextSpec};
use crate::extract::{
    BlurDescriptor, BoxShadow, LinearGradient, PaintDescriptor, RadiusDescriptor,
    StrokeDescriptor,
};
use crate::layout::{CrossAxisAlignment, Direction, FlowLayout, MainAxisAlignment, Padding};
use crate::settings::Framework;
use crate::style::{Dimension, SizeDescriptor, StyleDescriptor};

const DECORATION_KEYS: [&str; 6] = [
    "color",
    "gradient",
    "image",
    "border",
    "borderRadius",
    "boxShadow",
];

const TEXT_STYLE_KEYS: [(&str, &str); 7] = [
    ("textColor", "color"),
    ("fontFamily", "fontFamily"),
    ("fontSize", "fontSize"),
    ("fontWeight", "fontWeight"),
    ("fontStyle", "fontStyle"),
    ("textDecoration", "decoration"),
    ("letterSpacing", "letterSpacing"),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct FlutterEmitter;

/// A constructor call with one argument per line. An empty key makes the
/// argument positional.
fn call(name: &str, args: &[(&str, String)]) -> String {
    if args.is_empty() {
        return format!("{name}()");
    }
    let mut out = format!("{name}(");
    for (key, value) in args {
        let value = indent(value);
        if key.is_empty() {
            out.push_str(&format!("\n  {value},"));
        } else {
            out.push_str(&format!("\n  {key}: {value},"));
        }
    }
    out.push_str("\n)");
    out
}

/// A list literal of fragments that each start with a newline.
fn list(items: &[String]) -> String {
    let body: String = items.iter().map(|item| format!("{},", indent(item))).collect();
    format!("[{body}\n]")
}

fn string_literal(text: &str) -> String {
    let escaped = text
        .replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('$', "\\$")
        .replace('\n', "\\n");
    format!("'{escaped}'")
}

fn edge_insets(padding: &Padding) -> String {
    if padding.is_uniform() {
        format!("const EdgeInsets.all({})", num(padding.top))
    } else if padding.is_symmetric() {
        format!(
            "const EdgeInsets.symmetric(horizontal: {}, vertical: {})",
            num(padding.left),
            num(padding.top)
        )
    } else {
        format!(
            "const EdgeInsets.only(left: {}, top: {}, right: {}, bottom: {})",
            num(padding.left),
            num(padding.top),
            num(padding.right),
            num(padding.bottom)
        )
    }
}

fn arg(styles: &StyleDescriptor, key: &'static str) -> Option<(&'static str, String)> {
    styles.get(key).map(|v| (key, v.to_string()))
}

impl FlutterEmitter {
    /// Children arranged per the `layout` key, a `Stack` by default.
    fn layout_widget(&self, styles: &StyleDescriptor, children: &[String]) -> String {
        let layout = styles.get("layout").unwrap_or("Stack");
        let children = ("children", list(children));
        match layout {
            "Row" | "Column" => {
                let args: Vec<_> = [
                    "mainAxisSize",
                    "mainAxisAlignment",
                    "crossAxisAlignment",
                    "textBaseline",
                    "spacing",
                ]
                .into_iter()
                .filter_map(|key| arg(styles, key))
                .chain(std::iter::once(children))
                .collect();
                call(layout, &args)
            }
            "Wrap" => {
                let mut args = Vec::new();
                if let Some(spacing) = styles.get("spacing") {
                    args.push(("spacing", spacing.to_string()));
                    args.push(("runSpacing", spacing.to_string()));
                }
                args.push(children);
                call("Wrap", &args)
            }
            _ => call("Stack", &[children]),
        }
    }

    /// Blend, blur and placement wrappers, innermost first.
    fn wrap(&self, styles: &StyleDescriptor, name: Option<&str>, mut widget: String) -> String {
        if let Some(sigma) = styles.get("blur") {
            widget = call(
                "ImageFiltered",
                &[
                    (
                        "imageFilter",
                        format!("ImageFilter.blur(sigmaX: {sigma}, sigmaY: {sigma})"),
                    ),
                    ("child", widget),
                ],
            );
        }
        if let Some(sigma) = styles.get("backdropBlur") {
            widget = call(
                "BackdropFilter",
                &[
                    (
                        "filter",
                        format!("ImageFilter.blur(sigmaX: {sigma}, sigmaY: {sigma})"),
                    ),
                    ("child", widget),
                ],
            );
        }
        if let Some(angle) = styles.get("rotation") {
            widget = call(
                "Transform.rotate",
                &[
                    ("angle", angle.to_string()),
                    ("alignment", "Alignment.topLeft".to_string()),
                    ("child", widget),
                ],
            );
        }
        if let Some(opacity) = styles.get("opacity") {
            widget = call(
                "Opacity",
                &[("opacity", opacity.to_string()), ("child", widget)],
            );
        }
        if styles.contains("flex") {
            widget = call("Expanded", &[("child", widget)]);
        } else if styles.contains("left") || styles.contains("top") {
            let mut args: Vec<_> = ["left", "top"]
                .into_iter()
                .filter_map(|key| arg(styles, key))
                .collect();
            args.push(("child", widget));
            widget = call("Positioned", &args);
        }
        match name {
            Some(name) => format!("\n// {name}\n{widget}"),
            None => format!("\n{widget}"),
        }
    }

    fn text_style(&self, styles: &StyleDescriptor) -> Option<String> {
        let mut args: Vec<(&str, String)> = TEXT_STYLE_KEYS
            .iter()
            .filter_map(|(key, field)| styles.get(key).map(|v| (*field, v.to_string())))
            .collect();
        if let Some(height) = styles.get("lineHeight") {
            args.push(("height", height.to_string()));
        }
        if args.is_empty() {
            None
        } else {
            Some(call("TextStyle", &args))
        }
    }
}

impl Emitter for FlutterEmitter {
    fn framework(&self) -> Framework {
        Framework::Flutter
    }

    fn color(&self, color: Rgb, opacity: f64) -> String {
        let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("Color(0x{alpha:02X}{})", color.to_hex6())
    }

    fn gradient(&self, gradient: &LinearGradient) -> String {
        let alignment = |p: glam::DVec2| {
            format!("Alignment({}, {})", num(p.x * 2.0 - 1.0), num(p.y * 2.0 - 1.0))
        };
        let colors: Vec<String> = gradient
            .stops
            .iter()
            .map(|s| self.color(s.color.rgb(), s.color.a * gradient.opacity))
            .collect();
        let stops: Vec<String> = gradient.stops.iter().map(|s| num(s.position)).collect();
        call(
            "LinearGradient",
            &[
                ("begin", alignment(gradient.start)),
                ("end", alignment(gradient.end)),
                ("colors", format!("[{}]", colors.join(", "))),
                ("stops", format!("[{}]", stops.join(", "))),
            ],
        )
    }

    fn size(&self, size: &SizeDescriptor, styles: &mut StyleDescriptor) {
        for (is_width, dimension) in [(true, size.width), (false, size.height)] {
            let key = if is_width { "width" } else { "height" };
            match dimension {
                Dimension::Fixed(value) => styles.insert(key, num(value)),
                Dimension::Fill if size.fills_primary(is_width) => styles.insert("flex", "1"),
                Dimension::Fill => styles.insert(key, "double.infinity"),
                Dimension::Hug => {}
            }
        }
    }

    fn position(&self, x: f64, y: f64, styles: &mut StyleDescriptor) {
        styles.insert("left", num(x));
        styles.insert("top", num(y));
    }

    fn blend(&self, opacity: f64, rotation: f64, styles: &mut StyleDescriptor) {
        if opacity < 1.0 {
            styles.insert("opacity", num(opacity));
        }
        if rotation != 0.0 {
            styles.insert("rotation", num(-rotation.to_radians()));
        }
    }

    fn background(
        &self,
        paint: &PaintDescriptor,
        width: f64,
        height: f64,
        styles: &mut StyleDescriptor,
    ) {
        match paint {
            PaintDescriptor::Solid { color, opacity } => {
                styles.insert("color", self.color(*color, *opacity))
            }
            PaintDescriptor::LinearGradient(gradient) => {
                styles.insert("gradient", self.gradient(gradient))
            }
            PaintDescriptor::Image { scale_mode } => {
                let fit = match scale_mode {
                    ScaleMode::Fit => "BoxFit.contain",
                    ScaleMode::Tile => "BoxFit.none",
                    ScaleMode::Fill | ScaleMode::Crop => "BoxFit.cover",
                };
                styles.insert(
                    "image",
                    call(
                        "DecorationImage",
                        &[
                            (
                                "image",
                                format!(
                                    "NetworkImage({})",
                                    string_literal(&placeholder_url(width, height))
                                ),
                            ),
                            ("fit", fit.to_string()),
                        ],
                    ),
                );
            }
        }
    }

    fn border(&self, stroke: &StrokeDescriptor, styles: &mut StyleDescriptor) {
        let align = match stroke.align {
            StrokeAlign::Inside => "BorderSide.strokeAlignInside",
            StrokeAlign::Center => "BorderSide.strokeAlignCenter",
            StrokeAlign::Outside => "BorderSide.strokeAlignOutside",
        };
        styles.insert(
            "border",
            format!(
                "Border.all(width: {}, color: {}, strokeAlign: {align})",
                num(stroke.weight),
                self.color(stroke.color, stroke.opacity)
            ),
        );
    }

    fn radius(
        &self,
        radius: &RadiusDescriptor,
        width: f64,
        height: f64,
        styles: &mut StyleDescriptor,
    ) {
        let value = match radius {
            RadiusDescriptor::Uniform(r) => format!("BorderRadius.circular({})", num(*r)),
            RadiusDescriptor::Corners(c) => call(
                "BorderRadius.only",
                &[
                    ("topLeft", format!("Radius.circular({})", num(c.top_left))),
                    ("topRight", format!("Radius.circular({})", num(c.top_right))),
                    ("bottomLeft", format!("Radius.circular({})", num(c.bottom_left))),
                    ("bottomRight", format!("Radius.circular({})", num(c.bottom_right))),
                ],
            ),
            RadiusDescriptor::Full => format!(
                "BorderRadius.all(Radius.elliptical({}, {}))",
                num(width / 2.0),
                num(height / 2.0)
            ),
        };
        styles.insert("borderRadius", value);
    }

    fn shadows(&self, shadows: &[BoxShadow], styles: &mut StyleDescriptor) {
        let items: Vec<String> = shadows
            .iter()
            .map(|s| {
                let mut args = vec![
                    ("color", self.color(s.color, s.opacity)),
                    ("blurRadius", num(s.blur)),
                    ("offset", format!("Offset({}, {})", num(s.offset_x), num(s.offset_y))),
                    ("spreadRadius", num(s.spread)),
                ];
                if s.inset {
                    args.push(("blurStyle", "BlurStyle.inner".to_string()));
                }
                format!("\n{}", call("BoxShadow", &args))
            })
            .collect();
        styles.insert("boxShadow", list(&items));
    }

    fn blur(&self, blur: &BlurDescriptor, styles: &mut StyleDescriptor) {
        if let Some(radius) = blur.layer {
            styles.insert("blur", num(radius / 2.0));
        }
        if let Some(radius) = blur.background {
            styles.insert("backdropBlur", num(radius / 2.0));
        }
    }

    fn clip(&self, styles: &mut StyleDescriptor) {
        styles.insert("clipBehavior", "Clip.antiAlias");
    }

    fn flow(&self, flow: &FlowLayout, styles: &mut StyleDescriptor) {
        let layout = match (flow.wrap, flow.direction) {
            (true, _) => "Wrap",
            (false, Direction::Row) => "Row",
            (false, Direction::Column) => "Column",
        };
        styles.insert("layout", layout);
        if flow.hug_primary {
            styles.insert("mainAxisSize", "MainAxisSize.min");
        }
        styles.insert(
            "mainAxisAlignment",
            match flow.main_axis {
                MainAxisAlignment::Start => "MainAxisAlignment.start",
                MainAxisAlignment::Center => "MainAxisAlignment.center",
                MainAxisAlignment::End => "MainAxisAlignment.end",
                MainAxisAlignment::SpaceBetween => "MainAxisAlignment.spaceBetween",
            },
        );
        styles.insert(
            "crossAxisAlignment",
            match flow.cross_axis {
                CrossAxisAlignment::Start => "CrossAxisAlignment.start",
                CrossAxisAlignment::Center => "CrossAxisAlignment.center",
                CrossAxisAlignment::End => "CrossAxisAlignment.end",
                CrossAxisAlignment::Baseline => "CrossAxisAlignment.baseline",
            },
        );
        if flow.cross_axis == CrossAxisAlignment::Baseline {
            styles.insert("textBaseline", "TextBaseline.alphabetic");
        }
        if flow.gap > 0.0 && flow.main_axis != MainAxisAlignment::SpaceBetween {
            styles.insert("spacing", num(flow.gap));
        }
        if !flow.padding.is_zero() {
            styles.insert("padding", edge_insets(&flow.padding));
        }
    }

    fn absolute_container(&self, styles: &mut StyleDescriptor) {
        if !styles.contains("layout") {
            styles.insert("layout", "Stack");
        }
    }

    fn typography(
        &self,
        run: &TextSegment,
        fill: Option<(Rgb, f64)>,
        styles: &mut StyleDescriptor,
    ) {
        if let Some((color, opacity)) = fill {
            styles.insert("textColor", self.color(color, opacity));
        }
        styles.insert("fontFamily", string_literal(&run.font_name.family));
        styles.insert("fontSize", num(run.font_size));
        let weight = (run.font_weight.clamp(100, 900) as f64 / 100.0).round() as u16 * 100;
        styles.insert("fontWeight", format!("FontWeight.w{weight}"));
        if run.is_italic() {
            styles.insert("fontStyle", "FontStyle.italic");
        }
        match run.text_decoration {
            TextDecoration::Underline => styles.insert("textDecoration", "TextDecoration.underline"),
            TextDecoration::Strikethrough => {
                styles.insert("textDecoration", "TextDecoration.lineThrough")
            }
            TextDecoration::None => {}
        }
        if run.letter_spacing.value != 0.0 {
            let value = match run.letter_spacing.unit {
                LetterSpacingUnit::Pixels => run.letter_spacing.value,
                LetterSpacingUnit::Percent => run.letter_spacing.value * run.font_size / 100.0,
            };
            styles.insert("letterSpacing", num(value));
        }
        match run.line_height {
            LineHeight::Pixels { value } if run.font_size > 0.0 => {
                styles.insert("lineHeight", num(value / run.font_size))
            }
            LineHeight::Percent { value } => styles.insert("lineHeight", num(value / 100.0)),
            _ => {}
        }
    }

    fn text_align(
        &self,
        horizontal: TextAlignHorizontal,
        _vertical: TextAlignVertical,
        styles: &mut StyleDescriptor,
    ) {
        let align = match horizontal {
            TextAlignHorizontal::Left => return,
            TextAlignHorizontal::Center => "TextAlign.center",
            TextAlignHorizontal::Right => "TextAlign.right",
            TextAlignHorizontal::Justified => "TextAlign.justify",
        };
        styles.insert("textAlign", align);
    }

    fn attributes(&self, styles: &StyleDescriptor) -> String {
        styles
            .iter()
            .map(|(k, v)| format!("{k}: {v}"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn container(&self, element: &ElementSpec<'_>) -> String {
        let styles = &element.styles;
        let size: Vec<_> = ["width", "height"]
            .into_iter()
            .filter_map(|key| arg(styles, key))
            .collect();

        let widget = match &element.kind {
            ElementKind::Image { src } => {
                let mut args = vec![("", string_literal(src))];
                args.extend(size);
                args.push(("fit", "BoxFit.cover".to_string()));
                let image = call("Image.network", &args);
                match styles.get("borderRadius") {
                    Some(radius) => call(
                        "ClipRRect",
                        &[("borderRadius", radius.to_string()), ("child", image)],
                    ),
                    None => image,
                }
            }
            ElementKind::Container => {
                let decoration: Vec<_> = DECORATION_KEYS
                    .into_iter()
                    .filter_map(|key| arg(styles, key))
                    .collect();
                let mut args = size;
                args.extend(arg(styles, "padding"));
                args.extend(arg(styles, "clipBehavior"));
                // Only size: a SizedBox is enough.
                let plain = decoration.is_empty()
                    && !styles.contains("padding")
                    && !styles.contains("clipBehavior");
                if !decoration.is_empty() {
                    args.push(("decoration", call("BoxDecoration", &decoration)));
                }
                if !element.children.is_empty() {
                    args.push(("child", self.layout_widget(styles, &element.children)));
                }
                call(if plain { "SizedBox" } else { "Container" }, &args)
            }
        };
        self.wrap(styles, element.name, widget)
    }

    fn text(&self, text: &TextSpec<'_>) -> String {
        let styles = &text.styles;
        let align = arg(styles, "textAlign");

        let widget = match text.runs.as_slice() {
            [run] if run.styles.is_none() => {
                let mut args = vec![("", string_literal(&run.text))];
                args.extend(align);
                args.extend(self.text_style(styles).map(|s| ("style", s)));
                call("Text", &args)
            }
            runs => {
                let spans: Vec<String> = runs
                    .iter()
                    .map(|run| {
                        let mut args = vec![("text", string_literal(&run.text))];
                        if let Some(style) = run.styles.as_ref().and_then(|s| self.text_style(s)) {
                            args.push(("style", style));
                        }
                        format!("\n{}", call("TextSpan", &args))
                    })
                    .collect();
                let mut args = vec![("", call("TextSpan", &[("children", list(&spans))]))];
                args.extend(align);
                call("Text.rich", &args)
            }
        };

        let size: Vec<_> = ["width", "height"]
            .into_iter()
            .filter_map(|key| arg(styles, key))
            .collect();
        let widget = if size.is_empty() {
            widget
        } else {
            let mut args = size;
            args.push(("child", widget));
            call("SizedBox", &args)
        };
        self.wrap(styles, text.name, widget)
    }
}
