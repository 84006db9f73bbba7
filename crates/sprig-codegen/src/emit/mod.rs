//! Per-framework emitters.
//!
//! An [`Emitter`] turns framework-neutral descriptors into one target's
//! literal syntax. The style builder and the tree walker only talk to this
//! trait, so adding a target means adding one implementation.

mod flutter;
mod html;
mod markup;
mod swiftui;
mod tailwind;

pub use flutter::FlutterEmitter;
pub use html::HtmlEmitter;
pub use swiftui::SwiftUIEmitter;
pub use tailwind::{nearest_color_name, TailwindEmitter};

use sprig_core::{Rgb, TextAlignHorizontal, TextAlignVertical, TextCase, TextSegment};

use crate::extract::{
    BlurDescriptor, BoxShadow, LinearGradient, PaintDescriptor, RadiusDescriptor,
    StrokeDescriptor,
};
use crate::layout::FlowLayout;
use crate::settings::{Framework, GenerationContext};
use crate::style::{SizeDescriptor, StyleDescriptor};

/// What an element renders as.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    Container,
    /// Image placeholder loaded from `src`.
    Image { src: String },
}

/// A styled element with already rendered children.
#[derive(Debug, Clone)]
pub struct ElementSpec<'a> {
    /// Layer name, set only when layer names are shown.
    pub name: Option<&'a str>,
    pub kind: ElementKind,
    pub styles: StyleDescriptor,
    /// Child fragments, each starting with a newline.
    pub children: Vec<String>,
}

/// One style run of a text element. `styles` is `None` when the run's
/// typography was merged into the element itself.
#[derive(Debug, Clone)]
pub struct StyledRun {
    pub text: String,
    pub styles: Option<StyleDescriptor>,
}

#[derive(Debug, Clone)]
pub struct TextSpec<'a> {
    pub name: Option<&'a str>,
    pub styles: StyleDescriptor,
    pub runs: Vec<StyledRun>,
}

/// Target-language syntax for every style concern and element shape.
pub trait Emitter {
    fn framework(&self) -> Framework;

    /// A colour literal.
    fn color(&self, color: Rgb, opacity: f64) -> String;

    /// A linear gradient literal.
    fn gradient(&self, gradient: &LinearGradient) -> String;

    fn size(&self, size: &SizeDescriptor, styles: &mut StyleDescriptor);

    fn position(&self, x: f64, y: f64, styles: &mut StyleDescriptor);

    /// Opacity in `[0, 1]` and rotation in degrees, counterclockwise.
    fn blend(&self, opacity: f64, rotation: f64, styles: &mut StyleDescriptor);

    fn background(
        &self,
        paint: &PaintDescriptor,
        width: f64,
        height: f64,
        styles: &mut StyleDescriptor,
    );

    fn border(&self, stroke: &StrokeDescriptor, styles: &mut StyleDescriptor);

    fn radius(
        &self,
        radius: &RadiusDescriptor,
        width: f64,
        height: f64,
        styles: &mut StyleDescriptor,
    );

    fn shadows(&self, shadows: &[BoxShadow], styles: &mut StyleDescriptor);

    fn blur(&self, blur: &BlurDescriptor, styles: &mut StyleDescriptor);

    fn clip(&self, styles: &mut StyleDescriptor);

    fn flow(&self, flow: &FlowLayout, styles: &mut StyleDescriptor);

    /// Make the element the origin of absolutely positioned children.
    fn absolute_container(&self, styles: &mut StyleDescriptor);

    fn typography(
        &self,
        run: &TextSegment,
        fill: Option<(Rgb, f64)>,
        styles: &mut StyleDescriptor,
    );

    fn text_align(
        &self,
        horizontal: TextAlignHorizontal,
        vertical: TextAlignVertical,
        styles: &mut StyleDescriptor,
    );

    /// Text as it appears in the output. Targets without a text-transform
    /// style apply the case here.
    fn text_content(&self, text: &str, case: TextCase) -> String {
        apply_case(text, case)
    }

    /// Serialized attribute or argument form of `styles`.
    fn attributes(&self, styles: &StyleDescriptor) -> String;

    /// Render a container or image element. Output starts with a newline.
    fn container(&self, element: &ElementSpec<'_>) -> String;

    /// Render a text element. Output starts with a newline.
    fn text(&self, text: &TextSpec<'_>) -> String;
}

/// The emitter for the context's framework.
pub fn emitter_for(ctx: &GenerationContext) -> Box<dyn Emitter> {
    let settings = &ctx.settings;
    match ctx.framework {
        Framework::Html => Box::new(HtmlEmitter::new(ctx.jsx())),
        Framework::Tailwind => Box::new(TailwindEmitter::new(
            ctx.jsx(),
            settings.round_tailwind_values,
            settings.round_tailwind_colors,
        )),
        Framework::Flutter => Box::new(FlutterEmitter),
        Framework::SwiftUI => Box::new(SwiftUIEmitter),
    }
}

/// Format a number with at most two decimals and no trailing zeros.
pub(crate) fn num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    // -0.0 prints as "-0"
    let rounded = rounded + 0.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        let s = format!("{:.2}", rounded);
        s.trim_end_matches('0').to_string()
    }
}

/// Indent every line after the first by two spaces. Fragments start with
/// a newline, so this indents a whole fragment.
pub(crate) fn indent(fragment: &str) -> String {
    fragment.replace('\n', "\n  ")
}

/// Placeholder image URL sized to a node.
pub fn placeholder_url(width: f64, height: f64) -> String {
    format!(
        "https://placehold.co/{}x{}",
        width.round().max(1.0) as i64,
        height.round().max(1.0) as i64
    )
}

pub(crate) fn apply_case(text: &str, case: TextCase) -> String {
    match case {
        TextCase::Original => text.to_string(),
        TextCase::Upper => text.to_uppercase(),
        TextCase::Lower => text.to_lowercase(),
        TextCase::Title => {
            let mut out = String::with_capacity(text.len());
            let mut at_word_start = true;
            for ch in text.chars() {
                if at_word_start {
                    out.extend(ch.to_uppercase());
                } else {
                    out.push(ch);
                }
                at_word_start = ch.is_whitespace();
            }
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num() {
        assert_eq!(num(10.0), "10");
        assert_eq!(num(12.5), "12.5");
        assert_eq!(num(0.333333), "0.33");
        assert_eq!(num(-0.001), "0");
        assert_eq!(num(-4.0), "-4");
    }

    #[test]
    fn test_indent() {
        assert_eq!(indent("\na\nb"), "\n  a\n  b");
    }

    #[test]
    fn test_placeholder_url() {
        assert_eq!(placeholder_url(100.4, 49.6), "https://placehold.co/100x50");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(apply_case("hello big world", TextCase::Title), "Hello Big World");
        assert_eq!(apply_case("Hi", TextCase::Upper), "HI");
    }
}
