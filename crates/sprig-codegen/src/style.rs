//! Per-node style accumulation.
//!
//! [`StyleBuilder`] collects properties for one node, one concern per step.
//! Steps are independent: any subset may be called in any order. The
//! properties land in a [`StyleDescriptor`], whose keys and values are in
//! the active emitter's vocabulary.

use glam::DVec2;
use indexmap::IndexMap;
use serde::Serialize;
use sprig_core::{LayoutAlign, NodeBase, TextNode, TextSegment};

use crate::emit::Emitter;
use crate::extract::{
    blur_descriptor, box_shadows, radius_descriptor, retrieve_top_fill, stroke_descriptor,
    top_paint, PaintDescriptor,
};
use crate::layout::{Direction, FlowLayout, LayoutDecision};

/// Ordered property map. Insertion order is output order; inserting an
/// existing key overwrites its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StyleDescriptor {
    properties: IndexMap<String, String>,
}

impl StyleDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Insert every property of `other`, overwriting on conflict.
    pub fn merge(&mut self, other: &StyleDescriptor) {
        for (key, value) in other.iter() {
            self.insert(key, value);
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StyleDescriptor {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut styles = StyleDescriptor::new();
        for (key, value) in iter {
            styles.insert(key, value);
        }
        styles
    }
}

/// Sizing of one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dimension {
    Fixed(f64),
    /// Take the available space of the parent flow.
    Fill,
    /// Shrink to the content.
    Hug,
}

/// Sizing of a node relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeDescriptor {
    pub width: Dimension,
    pub height: Dimension,
    /// Direction of the enclosing flow, if any. Decides whether a fill is
    /// along the primary or the cross axis.
    pub parent_direction: Option<Direction>,
}

impl SizeDescriptor {
    /// `Fill` on the parent's primary axis.
    pub fn fills_primary(&self, dimension_is_width: bool) -> bool {
        match self.parent_direction {
            Some(Direction::Row) => dimension_is_width,
            Some(Direction::Column) => !dimension_is_width,
            None => false,
        }
    }
}

/// Which axes hug their content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hug {
    pub width: bool,
    pub height: bool,
}

impl Hug {
    pub const NONE: Hug = Hug {
        width: false,
        height: false,
    };

    /// Axes a flow container shrinks to its content on.
    pub fn from_flow(decision: &LayoutDecision) -> Self {
        match decision.flow() {
            Some(flow) => Hug {
                width: flow.hugs_width(),
                height: flow.hugs_height(),
            },
            None => Hug::NONE,
        }
    }

    /// Axes a text box grows with its content on.
    pub fn from_text(node: &TextNode) -> Self {
        use sprig_core::TextAutoResize;
        match node.text_auto_resize {
            TextAutoResize::WidthAndHeight => Hug {
                width: true,
                height: true,
            },
            TextAutoResize::Height => Hug {
                width: false,
                height: true,
            },
            TextAutoResize::None | TextAutoResize::Truncate => Hug::NONE,
        }
    }
}

/// How the parent of a node arranges it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Parent<'a> {
    /// Top level of the pass.
    Root,
    Flow(&'a FlowLayout),
    /// Positioned at coordinates relative to `origin`, in the coordinate
    /// space the node's own `x`/`y` are expressed in.
    Absolute(DVec2),
}

impl Parent<'_> {
    pub fn from_decision(decision: &LayoutDecision) -> Parent<'_> {
        match decision {
            LayoutDecision::ExplicitFlow(flow) => Parent::Flow(flow),
            LayoutDecision::Absolute => Parent::Absolute(DVec2::ZERO),
        }
    }
}

/// What kind of shape the shape step styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Box,
    Ellipse,
    /// The fill is rendered by an image element, not as a background.
    Image,
}

/// Accumulator bound to one node and one emitter.
pub struct StyleBuilder<'a> {
    base: &'a NodeBase,
    emitter: &'a dyn Emitter,
    width: f64,
    height: f64,
    styles: StyleDescriptor,
}

impl<'a> StyleBuilder<'a> {
    pub fn new(base: &'a NodeBase, emitter: &'a dyn Emitter) -> Self {
        Self {
            base,
            emitter,
            width: base.width,
            height: base.height,
            styles: StyleDescriptor::new(),
        }
    }

    /// Override the bounds used for sizing, e.g. for lines.
    pub fn with_bounds(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Size, position and blend. Coordinates are emitted only under an
    /// absolutely positioning parent; flow children get flex-relative sizes.
    pub fn position_styles(&mut self, parent: Parent<'_>, hug: Hug) -> &mut Self {
        self.size_styles(parent, hug);
        if let Parent::Absolute(origin) = parent {
            let at = DVec2::new(self.base.x, self.base.y) - origin;
            self.emitter.position(at.x, at.y, &mut self.styles);
        }
        self.blend_styles()
    }

    pub fn size_styles(&mut self, parent: Parent<'_>, hug: Hug) -> &mut Self {
        let (fill_width, fill_height, parent_direction) = match parent {
            Parent::Flow(flow) => {
                let grow = self.base.layout_grow > 0.0;
                let stretch = self.base.layout_align == LayoutAlign::Stretch;
                match flow.direction {
                    Direction::Row => (grow, stretch, Some(Direction::Row)),
                    Direction::Column => (stretch, grow, Some(Direction::Column)),
                }
            }
            Parent::Root | Parent::Absolute(_) => (false, false, None),
        };

        let dimension = |fill: bool, hug: bool, value: f64| {
            if fill {
                Dimension::Fill
            } else if hug {
                Dimension::Hug
            } else {
                Dimension::Fixed(value)
            }
        };

        let size = SizeDescriptor {
            width: dimension(fill_width, hug.width, self.width),
            height: dimension(fill_height, hug.height, self.height),
            parent_direction,
        };
        self.emitter.size(&size, &mut self.styles);
        self
    }

    /// Opacity and rotation, when they differ from the defaults.
    pub fn blend_styles(&mut self) -> &mut Self {
        let opacity = self.base.opacity.clamp(0.0, 1.0);
        if opacity < 1.0 || self.base.rotation != 0.0 {
            self.emitter
                .blend(opacity, self.base.rotation, &mut self.styles);
        }
        self
    }

    /// Background, radius, border, shadows and blur.
    pub fn shape_styles(&mut self, kind: ShapeKind) -> &mut Self {
        if kind != ShapeKind::Image {
            if let Some(paint) = top_paint(&self.base.fills, None) {
                self.emitter
                    .background(&paint, self.width, self.height, &mut self.styles);
            }
        }
        if let Some(radius) = radius_descriptor(self.base, kind == ShapeKind::Ellipse) {
            self.emitter
                .radius(&radius, self.width, self.height, &mut self.styles);
        }
        if let Some(stroke) = stroke_descriptor(self.base) {
            self.emitter.border(&stroke, &mut self.styles);
        }
        let shadows = box_shadows(self.base);
        if !shadows.is_empty() {
            self.emitter.shadows(&shadows, &mut self.styles);
        }
        let blur = blur_descriptor(self.base);
        if !blur.is_empty() {
            self.emitter.blur(&blur, &mut self.styles);
        }
        self
    }

    /// A line drawn as a bar filled with its stroke colour.
    pub fn line_styles(&mut self) -> &mut Self {
        if let Some(paint) = top_paint(&self.base.strokes, None) {
            self.emitter
                .background(&paint, self.width, self.height, &mut self.styles);
        }
        self
    }

    pub fn clip_styles(&mut self, clips_content: bool) -> &mut Self {
        if clips_content {
            self.emitter.clip(&mut self.styles);
        }
        self
    }

    /// Arrangement of the node's own children.
    pub fn layout_styles(&mut self, decision: &LayoutDecision, has_children: bool) -> &mut Self {
        match decision {
            LayoutDecision::ExplicitFlow(flow) => self.emitter.flow(flow, &mut self.styles),
            LayoutDecision::Absolute if has_children => {
                self.emitter.absolute_container(&mut self.styles)
            }
            LayoutDecision::Absolute => {}
        }
        self
    }

    /// Marks the node as the origin for absolutely positioned children,
    /// without replacing a position it already has.
    pub fn absolute_container(&mut self) -> &mut Self {
        self.emitter.absolute_container(&mut self.styles);
        self
    }

    /// Font, decoration and colour of one style run. The run's own fill
    /// wins over the node's.
    pub fn typography(&mut self, run: &TextSegment) -> &mut Self {
        let fill = retrieve_top_fill(&run.fills)
            .or_else(|| retrieve_top_fill(&self.base.fills))
            .and_then(|paint| match top_paint(std::slice::from_ref(paint), None) {
                Some(PaintDescriptor::Solid { color, opacity }) => Some((color, opacity)),
                _ => None,
            });
        self.emitter.typography(run, fill, &mut self.styles);
        self
    }

    pub fn text_align(&mut self, node: &TextNode) -> &mut Self {
        self.emitter.text_align(
            node.text_align_horizontal,
            node.text_align_vertical,
            &mut self.styles,
        );
        self
    }

    /// Merge arbitrary properties in, overwriting on conflict.
    pub fn add_styles(&mut self, styles: &StyleDescriptor) -> &mut Self {
        self.styles.merge(styles);
        self
    }

    /// No step has added anything.
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Serialized attributes with `extra` merged on top. Empty when no
    /// property was added.
    pub fn build(&self, extra: &StyleDescriptor) -> String {
        let mut styles = self.styles.clone();
        styles.merge(extra);
        if styles.is_empty() {
            return String::new();
        }
        self.emitter.attributes(&styles)
    }

    pub fn finish(self) -> StyleDescriptor {
        self.styles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::emitter_for;
    use crate::layout::{CrossAxisAlignment, MainAxisAlignment, Padding};
    use crate::settings::{Framework, GenerationContext, PluginSettings};
    use sprig_core::{CornerRadii, Paint, Rgb};

    fn html() -> GenerationContext {
        GenerationContext::new(PluginSettings::for_framework(Framework::Html), false)
    }

    fn row() -> FlowLayout {
        FlowLayout {
            direction: Direction::Row,
            gap: 8.0,
            padding: Padding::default(),
            main_axis: MainAxisAlignment::Start,
            cross_axis: CrossAxisAlignment::Start,
            wrap: false,
            hug_primary: false,
            hug_counter: false,
        }
    }

    #[test]
    fn test_descriptor_overwrites_in_place() {
        let mut styles = StyleDescriptor::new();
        styles.insert("width", "10px");
        styles.insert("height", "20px");
        styles.insert("width", "30px");

        let entries: Vec<_> = styles.iter().collect();
        assert_eq!(entries, vec![("width", "30px"), ("height", "20px")]);
    }

    #[test]
    fn test_empty_builder_builds_nothing() {
        let ctx = html();
        let emitter = emitter_for(&ctx);
        let base = NodeBase::new("n", 0.0, 0.0, 10.0, 10.0);
        let builder = StyleBuilder::new(&base, emitter.as_ref());
        assert!(builder.is_empty());
        assert_eq!(builder.build(&StyleDescriptor::new()), "");
    }

    #[test]
    fn test_position_depends_on_parent() {
        let ctx = html();
        let emitter = emitter_for(&ctx);
        let base = NodeBase::new("n", 10.0, 20.0, 100.0, 50.0);

        let mut absolute = StyleBuilder::new(&base, emitter.as_ref());
        absolute.position_styles(Parent::Absolute(DVec2::ZERO), Hug::NONE);
        let styles = absolute.finish();
        assert_eq!(styles.get("left"), Some("10px"));
        assert_eq!(styles.get("top"), Some("20px"));

        let flow = row();
        let mut flowing = StyleBuilder::new(&base, emitter.as_ref());
        flowing.position_styles(Parent::Flow(&flow), Hug::NONE);
        let styles = flowing.finish();
        assert_eq!(styles.get("width"), Some("100px"));
        assert!(!styles.contains("left"));
        assert!(!styles.contains("position"));
    }

    #[test]
    fn test_absolute_origin_is_subtracted() {
        let ctx = html();
        let emitter = emitter_for(&ctx);
        let base = NodeBase::new("n", 30.0, 45.0, 10.0, 10.0);
        let mut builder = StyleBuilder::new(&base, emitter.as_ref());
        builder.position_styles(Parent::Absolute(DVec2::new(20.0, 40.0)), Hug::NONE);
        let styles = builder.finish();
        assert_eq!(styles.get("left"), Some("10px"));
        assert_eq!(styles.get("top"), Some("5px"));
    }

    #[test]
    fn test_fill_and_stretch_in_flow() {
        let ctx = html();
        let emitter = emitter_for(&ctx);
        let mut base = NodeBase::new("n", 0.0, 0.0, 100.0, 50.0);
        base.layout_grow = 1.0;
        base.layout_align = LayoutAlign::Stretch;

        let flow = row();
        let mut builder = StyleBuilder::new(&base, emitter.as_ref());
        builder.size_styles(Parent::Flow(&flow), Hug::NONE);
        let styles = builder.finish();
        assert_eq!(styles.get("flex"), Some("1 1 0"));
        assert_eq!(styles.get("align-self"), Some("stretch"));
        assert!(!styles.contains("width"));
        assert!(!styles.contains("height"));
    }

    #[test]
    fn test_steps_in_any_order() {
        let ctx = html();
        let emitter = emitter_for(&ctx);
        let mut base = NodeBase::new("n", 0.0, 0.0, 10.0, 10.0)
            .with_fill(Paint::solid(Rgb::new(1.0, 0.0, 0.0)));
        base.corner_radii = CornerRadii::uniform(4.0);
        base.opacity = 0.5;

        let mut a = StyleBuilder::new(&base, emitter.as_ref());
        a.shape_styles(ShapeKind::Box).blend_styles();
        let mut b = StyleBuilder::new(&base, emitter.as_ref());
        b.blend_styles().shape_styles(ShapeKind::Box);

        let (a, b) = (a.finish(), b.finish());
        assert_eq!(a.len(), b.len());
        assert_eq!(a.get("background"), Some("#FF0000"));
        assert_eq!(b.get("border-radius"), Some("4px"));
        assert_eq!(b.get("opacity"), Some("0.5"));
    }

    #[test]
    fn test_build_serializes_inline_style() {
        let ctx = html();
        let emitter = emitter_for(&ctx);
        let base = NodeBase::new("n", 0.0, 0.0, 10.0, 20.0);
        let mut builder = StyleBuilder::new(&base, emitter.as_ref());
        builder.size_styles(Parent::Root, Hug::NONE);
        let extra: StyleDescriptor = [("overflow", "hidden")].into_iter().collect();
        assert_eq!(
            builder.build(&extra),
            r#"style="width: 10px; height: 20px; overflow: hidden""#
        );
    }
}
