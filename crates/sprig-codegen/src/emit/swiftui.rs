//! SwiftUI views and modifier chains.
//!
//! Style keys name modifiers and values hold the full modifier call. SwiftUI
//! modifier order changes the result, so views apply them in
//! [`MODIFIER_ORDER`] regardless of insertion order.

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

const MODIFIER_ORDER: [&str; 20] = [
    "font",
    "italic",
    "decoration",
    "kerning",
    "lineSpacing",
    "foregroundColor",
    "multilineTextAlignment",
    "padding",
    "frame",
    "background",
    "backgroundBlur",
    "overlay",
    "cornerRadius",
    "clipShape",
    "clipped",
    "shadow",
    "blur",
    "opacity",
    "rotationEffect",
    "offset",
];

/// Modifiers that return `Text` and so survive `Text` concatenation.
const TEXT_MODIFIERS: [&str; 5] = ["font", "italic", "decoration", "kerning", "foregroundColor"];

#[derive(Debug, Clone, Copy, Default)]
pub struct SwiftUIEmitter;

fn string_literal(text: &str) -> String {
    let escaped = text
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n");
    format!("\"{escaped}\"")
}

fn modifiers<'a>(styles: &'a StyleDescriptor, keys: &'a [&'a str]) -> impl Iterator<Item = &'a str> {
    keys.iter().filter_map(move |key| styles.get(key))
}

fn padding_modifier(padding: &Padding) -> String {
    if padding.is_uniform() {
        format!(".padding({})", num(padding.top))
    } else if padding.is_symmetric() {
        format!(
            ".padding(.horizontal, {})\n.padding(.vertical, {})",
            num(padding.left),
            num(padding.top)
        )
    } else {
        format!(
            ".padding(EdgeInsets(top: {}, leading: {}, bottom: {}, trailing: {}))",
            num(padding.top),
            num(padding.left),
            num(padding.bottom),
            num(padding.right)
        )
    }
}

impl SwiftUIEmitter {
    fn stack_body(&self, styles: &StyleDescriptor, children: &[String]) -> String {
        let spacer = "\nSpacer()".to_string();
        let mut items: Vec<String> = Vec::with_capacity(children.len() + 2);
        match styles.get("spacers") {
            Some("between") => {
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        items.push(spacer.clone());
                    }
                    items.push(child.clone());
                }
            }
            Some("center") => {
                items.push(spacer.clone());
                items.extend(children.iter().cloned());
                items.push(spacer);
            }
            Some("end") => {
                items.push(spacer);
                items.extend(children.iter().cloned());
            }
            _ => items.extend(children.iter().cloned()),
        }
        items.iter().map(|item| indent(item)).collect()
    }

    fn finish(&self, styles: &StyleDescriptor, name: Option<&str>, view: String) -> String {
        let mut out = String::from("\n");
        if let Some(name) = name {
            out.push_str(&format!("// {name}\n"));
        }
        out.push_str(&view);
        for modifier in modifiers(styles, &MODIFIER_ORDER) {
            out.push('\n');
            out.push_str(modifier);
        }
        out
    }
}

impl Emitter for SwiftUIEmitter {
    fn framework(&self) -> Framework {
        Framework::SwiftUI
    }

    fn color(&self, color: Rgb, opacity: f64) -> String {
        let base = format!(
            "Color(red: {}, green: {}, blue: {})",
            num(color.r),
            num(color.g),
            num(color.b)
        );
        if opacity < 1.0 {
            format!("{base}.opacity({})", num(opacity.max(0.0)))
        } else {
            base
        }
    }

    fn gradient(&self, gradient: &LinearGradient) -> String {
        let stops: Vec<String> = gradient
            .stops
            .iter()
            .map(|s| {
                format!(
                    "Gradient.Stop(color: {}, location: {})",
                    self.color(s.color.rgb(), s.color.a * gradient.opacity),
                    num(s.position)
                )
            })
            .collect();
        format!(
            "LinearGradient(stops: [{}], startPoint: UnitPoint(x: {}, y: {}), endPoint: UnitPoint(x: {}, y: {}))",
            stops.join(", "),
            num(gradient.start.x),
            num(gradient.start.y),
            num(gradient.end.x),
            num(gradient.end.y)
        )
    }

    fn size(&self, size: &SizeDescriptor, styles: &mut StyleDescriptor) {
        let flexible = matches!(size.width, Dimension::Fill) || matches!(size.height, Dimension::Fill);
        let mut args = Vec::new();
        for (axis, dimension) in [("Width", size.width), ("Height", size.height)] {
            match (dimension, flexible) {
                (Dimension::Fixed(v), false) => {
                    args.push(format!("{}: {}", axis.to_lowercase(), num(v)))
                }
                (Dimension::Fixed(v), true) => {
                    args.push(format!("min{axis}: {}", num(v)));
                    args.push(format!("max{axis}: {}", num(v)));
                }
                (Dimension::Fill, _) => args.push(format!("max{axis}: .infinity")),
                (Dimension::Hug, _) => {}
            }
        }
        if !args.is_empty() {
            styles.insert("frame", format!(".frame({})", args.join(", ")));
        }
    }

    fn position(&self, x: f64, y: f64, styles: &mut StyleDescriptor) {
        styles.insert("offset", format!(".offset(x: {}, y: {})", num(x), num(y)));
    }

    fn blend(&self, opacity: f64, rotation: f64, styles: &mut StyleDescriptor) {
        if opacity < 1.0 {
            styles.insert("opacity", format!(".opacity({})", num(opacity)));
        }
        if rotation != 0.0 {
            styles.insert(
                "rotationEffect",
                format!(
                    ".rotationEffect(.degrees({}), anchor: .topLeading)",
                    num(-rotation)
                ),
            );
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
            PaintDescriptor::Solid { color, opacity } => self.color(*color, *opacity),
            PaintDescriptor::LinearGradient(gradient) => self.gradient(gradient),
            PaintDescriptor::Image { scale_mode } => {
                let mode = match scale_mode {
                    ScaleMode::Fit => ".fit",
                    _ => ".fill",
                };
                format!(
                    "AsyncImage(url: URL(string: {})) {{ image in image.resizable().aspectRatio(contentMode: {mode}) }} placeholder: {{ Color.gray }}",
                    string_literal(&placeholder_url(width, height))
                )
            }
        };
        styles.insert("background", format!(".background({value})"));
    }

    fn border(&self, stroke: &StrokeDescriptor, styles: &mut StyleDescriptor) {
        let inset = match stroke.align {
            StrokeAlign::Inside => format!(".inset(by: {})", num(stroke.weight / 2.0)),
            StrokeAlign::Outside => format!(".inset(by: {})", num(-stroke.weight / 2.0)),
            StrokeAlign::Center => String::new(),
        };
        styles.insert(
            "overlay",
            format!(
                ".overlay(Rectangle(){inset}.stroke({}, lineWidth: {}))",
                self.color(stroke.color, stroke.opacity),
                num(stroke.weight)
            ),
        );
    }

    fn radius(
        &self,
        radius: &RadiusDescriptor,
        _width: f64,
        _height: f64,
        styles: &mut StyleDescriptor,
    ) {
        match radius {
            RadiusDescriptor::Uniform(r) => {
                styles.insert("cornerRadius", format!(".cornerRadius({})", num(*r)))
            }
            RadiusDescriptor::Corners(c) => styles.insert(
                "clipShape",
                format!(
                    ".clipShape(UnevenRoundedRectangle(topLeadingRadius: {}, bottomLeadingRadius: {}, bottomTrailingRadius: {}, topTrailingRadius: {}))",
                    num(c.top_left),
                    num(c.bottom_left),
                    num(c.bottom_right),
                    num(c.top_right)
                ),
            ),
            RadiusDescriptor::Full => styles.insert("clipShape", ".clipShape(Ellipse())"),
        }
    }

    fn shadows(&self, shadows: &[BoxShadow], styles: &mut StyleDescriptor) {
        // Inner shadows have no view modifier.
        let drops: Vec<String> = shadows
            .iter()
            .filter(|s| !s.inset)
            .map(|s| {
                format!(
                    ".shadow(color: {}, radius: {}, x: {}, y: {})",
                    self.color(s.color, s.opacity),
                    num(s.blur),
                    num(s.offset_x),
                    num(s.offset_y)
                )
            })
            .collect();
        if !drops.is_empty() {
            styles.insert("shadow", drops.join("\n"));
        }
    }

    fn blur(&self, blur: &BlurDescriptor, styles: &mut StyleDescriptor) {
        if let Some(radius) = blur.layer {
            styles.insert("blur", format!(".blur(radius: {})", num(radius)));
        }
        if blur.background.is_some() {
            styles.insert("backgroundBlur", ".background(.ultraThinMaterial)");
        }
    }

    fn clip(&self, styles: &mut StyleDescriptor) {
        styles.insert("clipped", ".clipped()");
    }

    fn flow(&self, flow: &FlowLayout, styles: &mut StyleDescriptor) {
        let (stack, alignment) = match flow.direction {
            Direction::Column => (
                "VStack",
                match flow.cross_axis {
                    CrossAxisAlignment::Start | CrossAxisAlignment::Baseline => ".leading",
                    CrossAxisAlignment::Center => ".center",
                    CrossAxisAlignment::End => ".trailing",
                },
            ),
            Direction::Row => (
                "HStack",
                match flow.cross_axis {
                    CrossAxisAlignment::Start => ".top",
                    CrossAxisAlignment::Center => ".center",
                    CrossAxisAlignment::End => ".bottom",
                    CrossAxisAlignment::Baseline => ".firstTextBaseline",
                },
            ),
        };
        let spacing = if flow.main_axis == MainAxisAlignment::SpaceBetween {
            0.0
        } else {
            flow.gap
        };
        styles.insert(
            "stack",
            format!("{stack}(alignment: {alignment}, spacing: {})", num(spacing)),
        );
        if !flow.hug_primary {
            match flow.main_axis {
                MainAxisAlignment::Start => {}
                MainAxisAlignment::Center => styles.insert("spacers", "center"),
                MainAxisAlignment::End => styles.insert("spacers", "end"),
                MainAxisAlignment::SpaceBetween => styles.insert("spacers", "between"),
            }
        }
        if !flow.padding.is_zero() {
            styles.insert("padding", padding_modifier(&flow.padding));
        }
    }

    fn absolute_container(&self, styles: &mut StyleDescriptor) {
        if !styles.contains("stack") {
            styles.insert("stack", "ZStack(alignment: .topLeading)");
        }
    }

    fn typography(
        &self,
        run: &TextSegment,
        fill: Option<(Rgb, f64)>,
        styles: &mut StyleDescriptor,
    ) {
        let weight = match run.font_weight {
            0..=149 => ".ultraLight",
            150..=249 => ".thin",
            250..=349 => ".light",
            350..=449 => ".regular",
            450..=549 => ".medium",
            550..=649 => ".semibold",
            650..=749 => ".bold",
            750..=849 => ".heavy",
            _ => ".black",
        };
        styles.insert(
            "font",
            format!(
                ".font(Font.custom({}, size: {}).weight({weight}))",
                string_literal(&run.font_name.family),
                num(run.font_size)
            ),
        );
        if run.is_italic() {
            styles.insert("italic", ".italic()");
        }
        match run.text_decoration {
            TextDecoration::Underline => styles.insert("decoration", ".underline()"),
            TextDecoration::Strikethrough => styles.insert("decoration", ".strikethrough()"),
            TextDecoration::None => {}
        }
        if run.letter_spacing.value != 0.0 {
            let value = match run.letter_spacing.unit {
                LetterSpacingUnit::Pixels => run.letter_spacing.value,
                LetterSpacingUnit::Percent => run.letter_spacing.value * run.font_size / 100.0,
            };
            styles.insert("kerning", format!(".kerning({})", num(value)));
        }
        let line_gap = match run.line_height {
            LineHeight::Pixels { value } => value - run.font_size,
            LineHeight::Percent { value } => run.font_size * (value / 100.0 - 1.0),
            LineHeight::Auto => 0.0,
        };
        if line_gap > 0.0 {
            styles.insert("lineSpacing", format!(".lineSpacing({})", num(line_gap)));
        }
        if let Some((color, opacity)) = fill {
            styles.insert(
                "foregroundColor",
                format!(".foregroundColor({})", self.color(color, opacity)),
            );
        }
    }

    fn text_align(
        &self,
        horizontal: TextAlignHorizontal,
        _vertical: TextAlignVertical,
        styles: &mut StyleDescriptor,
    ) {
        let align = match horizontal {
            TextAlignHorizontal::Center => ".center",
            TextAlignHorizontal::Right => ".trailing",
            TextAlignHorizontal::Left | TextAlignHorizontal::Justified => return,
        };
        styles.insert(
            "multilineTextAlignment",
            format!(".multilineTextAlignment({align})"),
        );
    }

    fn attributes(&self, styles: &StyleDescriptor) -> String {
        modifiers(styles, &MODIFIER_ORDER).collect()
    }

    fn container(&self, element: &ElementSpec<'_>) -> String {
        let styles = &element.styles;
        let view = match &element.kind {
            ElementKind::Image { src } => {
                format!("AsyncImage(url: URL(string: {}))", string_literal(src))
            }
            ElementKind::Container if element.children.is_empty() => {
                "Rectangle()\n.foregroundColor(.clear)".to_string()
            }
            ElementKind::Container => {
                let stack = styles
                    .get("stack")
                    .unwrap_or("ZStack(alignment: .topLeading)");
                format!(
                    "{stack} {{{}\n}}",
                    self.stack_body(styles, &element.children)
                )
            }
        };
        self.finish(styles, element.name, view)
    }

    fn text(&self, text: &TextSpec<'_>) -> String {
        let view = match text.runs.as_slice() {
            [run] if run.styles.is_none() => format!("Text({})", string_literal(&run.text)),
            runs => {
                let parts: Vec<String> = runs
                    .iter()
                    .map(|run| {
                        let mut part = format!("Text({})", string_literal(&run.text));
                        if let Some(styles) = &run.styles {
                            part.extend(modifiers(styles, &TEXT_MODIFIERS));
                        }
                        part
                    })
                    .collect();
                let joined = parts.join(" + ");
                if text.styles.is_empty() {
                    joined
                } else {
                    format!("({joined})")
                }
            }
        };
        self.finish(&text.styles, text.name, view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color() {
        let emitter = SwiftUIEmitter;
        assert_eq!(
            emitter.color(Rgb::new(1.0, 0.5, 0.0), 1.0),
            "Color(red: 1, green: 0.5, blue: 0)"
        );
        assert_eq!(
            emitter.color(Rgb::BLACK, 0.25),
            "Color(red: 0, green: 0, blue: 0).opacity(0.25)"
        );
    }

    #[test]
    fn test_modifiers_follow_fixed_order() {
        let emitter = SwiftUIEmitter;
        let mut styles = StyleDescriptor::new();
        emitter.position(10.0, 20.0, &mut styles);
        emitter.blend(0.5, 0.0, &mut styles);
        styles.insert("frame", ".frame(width: 10, height: 10)");

        let element = ElementSpec {
            name: None,
            kind: ElementKind::Container,
            styles,
            children: vec![],
        };
        assert_eq!(
            emitter.container(&element),
            "\nRectangle()\n.foregroundColor(.clear)\n.frame(width: 10, height: 10)\n.opacity(0.5)\n.offset(x: 10, y: 20)"
        );
    }

    #[test]
    fn test_mixed_frame_uses_flexible_form() {
        let emitter = SwiftUIEmitter;
        let mut styles = StyleDescriptor::new();
        emitter.size(
            &SizeDescriptor {
                width: Dimension::Fill,
                height: Dimension::Fixed(40.0),
                parent_direction: Some(Direction::Row),
            },
            &mut styles,
        );
        assert_eq!(
            styles.get("frame"),
            Some(".frame(maxWidth: .infinity, minHeight: 40, maxHeight: 40)")
        );
    }

    #[test]
    fn test_space_between_inserts_spacers() {
        let emitter = SwiftUIEmitter;
        let styles: StyleDescriptor = [("stack", "HStack(alignment: .top, spacing: 0)"), ("spacers", "between")]
            .into_iter()
            .collect();
        let element = ElementSpec {
            name: None,
            kind: ElementKind::Container,
            styles,
            children: vec!["\nText(\"a\")".to_string(), "\nText(\"b\")".to_string()],
        };
        assert_eq!(
            emitter.container(&element),
            "\nHStack(alignment: .top, spacing: 0) {\n  Text(\"a\")\n  Spacer()\n  Text(\"b\")\n}"
        );
    }
}
