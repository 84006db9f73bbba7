//! HTML with inline CSS, optionally in JSX syntax.

use convert_case::{Case, Casing};
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

#[derive(Debug, Clone, Copy)]
pub struct HtmlEmitter {
    markup: Markup,
}

impl HtmlEmitter {
    pub fn new(jsx: bool) -> Self {
        Self {
            markup: Markup { jsx },
        }
    }
}

fn px(value: f64) -> String {
    format!("{}px", num(value))
}

/// CSS padding shorthand.
pub(crate) fn padding_shorthand(padding: &Padding) -> String {
    if padding.is_uniform() {
        px(padding.top)
    } else if padding.is_symmetric() {
        format!("{} {}", px(padding.top), px(padding.left))
    } else {
        format!(
            "{} {} {} {}",
            px(padding.top),
            px(padding.right),
            px(padding.bottom),
            px(padding.left)
        )
    }
}

impl Emitter for HtmlEmitter {
    fn framework(&self) -> Framework {
        Framework::Html
    }

    fn color(&self, color: Rgb, opacity: f64) -> String {
        if opacity >= 1.0 {
            color.to_hex()
        } else {
            let (r, g, b) = color.to_rgb8();
            format!("rgba({r}, {g}, {b}, {})", num(opacity.max(0.0)))
        }
    }

    fn gradient(&self, gradient: &LinearGradient) -> String {
        let stops: Vec<String> = gradient
            .stops
            .iter()
            .map(|stop| {
                format!(
                    "{} {}%",
                    self.color(stop.color.rgb(), stop.color.a * gradient.opacity),
                    num(stop.position * 100.0)
                )
            })
            .collect();
        format!(
            "linear-gradient({}deg, {})",
            num(gradient.angle_degrees()),
            stops.join(", ")
        )
    }

    fn size(&self, size: &SizeDescriptor, styles: &mut StyleDescriptor) {
        for (is_width, dimension) in [(true, size.width), (false, size.height)] {
            let key = if is_width { "width" } else { "height" };
            match dimension {
                Dimension::Fixed(value) => styles.insert(key, px(value)),
                Dimension::Fill if size.fills_primary(is_width) => {
                    styles.insert("flex", "1 1 0")
                }
                Dimension::Fill => styles.insert("align-self", "stretch"),
                Dimension::Hug => {}
            }
        }
    }

    fn position(&self, x: f64, y: f64, styles: &mut StyleDescriptor) {
        styles.insert("position", "absolute");
        styles.insert("left", px(x));
        styles.insert("top", px(y));
    }

    fn blend(&self, opacity: f64, rotation: f64, styles: &mut StyleDescriptor) {
        if opacity < 1.0 {
            styles.insert("opacity", num(opacity));
        }
        if rotation != 0.0 {
            styles.insert("transform", format!("rotate({}deg)", num(-rotation)));
            styles.insert("transform-origin", "top left");
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
                styles.insert("background", self.color(*color, *opacity))
            }
            PaintDescriptor::LinearGradient(gradient) => {
                styles.insert("background", self.gradient(gradient))
            }
            PaintDescriptor::Image { scale_mode } => {
                styles.insert(
                    "background-image",
                    format!("url({})", placeholder_url(width, height)),
                );
                let size = match scale_mode {
                    ScaleMode::Fit => "contain",
                    ScaleMode::Tile => "auto",
                    ScaleMode::Fill | ScaleMode::Crop => "cover",
                };
                styles.insert("background-size", size);
                styles.insert("background-position", "center");
            }
        }
    }

    fn border(&self, stroke: &StrokeDescriptor, styles: &mut StyleDescriptor) {
        let value = format!(
            "{} solid {}",
            px(stroke.weight),
            self.color(stroke.color, stroke.opacity)
        );
        match stroke.align {
            StrokeAlign::Outside => styles.insert("outline", value),
            StrokeAlign::Inside | StrokeAlign::Center => {
                styles.insert("border", value);
                styles.insert("box-sizing", "border-box");
            }
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
            RadiusDescriptor::Uniform(r) => px(*r),
            RadiusDescriptor::Corners(c) => format!(
                "{} {} {} {}",
                px(c.top_left),
                px(c.top_right),
                px(c.bottom_right),
                px(c.bottom_left)
            ),
            RadiusDescriptor::Full => "50%".to_string(),
        };
        styles.insert("border-radius", value);
    }

    fn shadows(&self, shadows: &[BoxShadow], styles: &mut StyleDescriptor) {
        let value: Vec<String> = shadows
            .iter()
            .map(|s| {
                format!(
                    "{}{} {} {} {} {}",
                    if s.inset { "inset " } else { "" },
                    px(s.offset_x),
                    px(s.offset_y),
                    px(s.blur),
                    px(s.spread),
                    self.color(s.color, s.opacity)
                )
            })
            .collect();
        styles.insert("box-shadow", value.join(", "));
    }

    fn blur(&self, blur: &BlurDescriptor, styles: &mut StyleDescriptor) {
        if let Some(radius) = blur.layer {
            styles.insert("filter", format!("blur({})", px(radius)));
        }
        if let Some(radius) = blur.background {
            styles.insert("backdrop-filter", format!("blur({})", px(radius)));
        }
    }

    fn clip(&self, styles: &mut StyleDescriptor) {
        styles.insert("overflow", "hidden");
    }

    fn flow(&self, flow: &FlowLayout, styles: &mut StyleDescriptor) {
        styles.insert("display", "flex");
        styles.insert(
            "flex-direction",
            match flow.direction {
                Direction::Row => "row",
                Direction::Column => "column",
            },
        );
        if flow.wrap {
            styles.insert("flex-wrap", "wrap");
        }
        styles.insert(
            "justify-content",
            match flow.main_axis {
                MainAxisAlignment::Start => "flex-start",
                MainAxisAlignment::Center => "center",
                MainAxisAlignment::End => "flex-end",
                MainAxisAlignment::SpaceBetween => "space-between",
            },
        );
        styles.insert(
            "align-items",
            match flow.cross_axis {
                CrossAxisAlignment::Start => "flex-start",
                CrossAxisAlignment::Center => "center",
                CrossAxisAlignment::End => "flex-end",
                CrossAxisAlignment::Baseline => "baseline",
            },
        );
        if flow.gap > 0.0 && flow.main_axis != MainAxisAlignment::SpaceBetween {
            styles.insert("gap", px(flow.gap));
        }
        if !flow.padding.is_zero() {
            styles.insert("padding", padding_shorthand(&flow.padding));
            styles.insert("box-sizing", "border-box");
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
            styles.insert("color", self.color(color, opacity));
        }
        styles.insert("font-family", run.font_name.family.clone());
        styles.insert("font-size", px(run.font_size));
        styles.insert("font-weight", run.font_weight.to_string());
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
                LetterSpacingUnit::Pixels => px(run.letter_spacing.value),
                LetterSpacingUnit::Percent => {
                    format!("{}em", num(run.letter_spacing.value / 100.0))
                }
            };
            styles.insert("letter-spacing", value);
        }
        match run.line_height {
            LineHeight::Pixels { value } => styles.insert("line-height", px(value)),
            LineHeight::Percent { value } => {
                styles.insert("line-height", format!("{}%", num(value)))
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
            TextAlignHorizontal::Center => styles.insert("text-align", "center"),
            TextAlignHorizontal::Right => styles.insert("text-align", "right"),
            TextAlignHorizontal::Justified => styles.insert("text-align", "justify"),
            TextAlignHorizontal::Left => {}
        }
        let justify = match vertical {
            TextAlignVertical::Top => return,
            TextAlignVertical::Center => "center",
            TextAlignVertical::Bottom => "flex-end",
        };
        styles.insert("display", "flex");
        styles.insert("flex-direction", "column");
        styles.insert("justify-content", justify);
    }

    fn text_content(&self, text: &str, _case: TextCase) -> String {
        text.to_string()
    }

    fn attributes(&self, styles: &StyleDescriptor) -> String {
        if styles.is_empty() {
            return String::new();
        }
        if self.markup.jsx {
            let entries: Vec<String> = styles
                .iter()
                .map(|(k, v)| format!("{}: '{}'", k.to_case(Case::Camel), v.replace('\'', "\\'")))
                .collect();
            format!("style={{{{{}}}}}", entries.join(", "))
        } else {
            let entries: Vec<String> = styles.iter().map(|(k, v)| format!("{k}: {v}")).collect();
            format!(
                "style=\"{}\"",
                super::markup::escape_attribute(&entries.join("; "))
            )
        }
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

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;
    use sprig_core::{ColorStop, Rgba};

    #[test]
    fn test_color() {
        let emitter = HtmlEmitter::new(false);
        assert_eq!(emitter.color(Rgb::new(1.0, 0.0, 0.0), 1.0), "#FF0000");
        assert_eq!(
            emitter.color(Rgb::new(0.0, 0.0, 0.0), 0.25),
            "rgba(0, 0, 0, 0.25)"
        );
    }

    #[test]
    fn test_gradient() {
        let emitter = HtmlEmitter::new(false);
        let gradient = LinearGradient {
            stops: vec![
                ColorStop {
                    position: 0.0,
                    color: Rgba::new(1.0, 0.0, 0.0, 1.0),
                },
                ColorStop {
                    position: 1.0,
                    color: Rgba::new(0.0, 0.0, 1.0, 0.5),
                },
            ],
            start: DVec2::new(0.0, 0.5),
            end: DVec2::new(1.0, 0.5),
            opacity: 1.0,
        };
        assert_eq!(
            emitter.gradient(&gradient),
            "linear-gradient(90deg, #FF0000 0%, rgba(0, 0, 255, 0.5) 100%)"
        );
    }

    #[test]
    fn test_jsx_attributes() {
        let emitter = HtmlEmitter::new(true);
        let styles: StyleDescriptor = [("background-color", "#FFFFFF"), ("width", "10px")]
            .into_iter()
            .collect();
        assert_eq!(
            emitter.attributes(&styles),
            "style={{backgroundColor: '#FFFFFF', width: '10px'}}"
        );
    }

    #[test]
    fn test_padding_shorthand() {
        let uniform = Padding {
            top: 8.0,
            right: 8.0,
            bottom: 8.0,
            left: 8.0,
        };
        let symmetric = Padding {
            top: 4.0,
            right: 16.0,
            bottom: 4.0,
            left: 16.0,
        };
        assert_eq!(padding_shorthand(&uniform), "8px");
        assert_eq!(padding_shorthand(&symmetric), "4px 16px");
    }
}
