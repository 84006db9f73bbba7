//! Scene-graph nodes as supplied by the host design tool.
//!
//! The shape mirrors the host's JSON export: `camelCase` fields and a
//! `SCREAMING_SNAKE_CASE` `type` tag. Every field the generator does not
//! strictly need is defaulted so partial exports still load, and kind
//! strings this model does not know fall back to a neutral variant.

use crate::errors::SceneError;
use crate::types::{
    default_one, default_true, CornerRadii, Effect, LayoutAlign, Paint, Paints, StrokeAlign,
};
use serde::{Deserialize, Serialize};

/// A node of the design tree. Closed over the kinds the generator knows;
/// anything else deserializes to [`SceneNode::Other`] and is skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SceneNode {
    #[serde(alias = "COMPONENT", alias = "COMPONENT_SET", alias = "INSTANCE")]
    Frame(FrameNode),
    Group(GroupNode),
    Rectangle(ShapeNode),
    Ellipse(ShapeNode),
    Text(TextNode),
    Line(ShapeNode),
    #[serde(alias = "STAR", alias = "POLYGON", alias = "BOOLEAN_OPERATION")]
    Vector(ShapeNode),
    #[serde(other)]
    Other,
}

impl SceneNode {
    /// Common attributes, absent only for [`SceneNode::Other`].
    pub fn base(&self) -> Option<&NodeBase> {
        match self {
            SceneNode::Frame(n) => Some(&n.base),
            SceneNode::Group(n) => Some(&n.base),
            SceneNode::Rectangle(n)
            | SceneNode::Ellipse(n)
            | SceneNode::Line(n)
            | SceneNode::Vector(n) => Some(&n.base),
            SceneNode::Text(n) => Some(&n.base),
            SceneNode::Other => None,
        }
    }

    pub fn children(&self) -> &[SceneNode] {
        match self {
            SceneNode::Frame(n) => &n.children,
            SceneNode::Group(n) => &n.children,
            _ => &[],
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<SceneNode>> {
        match self {
            SceneNode::Frame(n) => Some(&mut n.children),
            SceneNode::Group(n) => Some(&mut n.children),
            _ => None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.base().is_some_and(|b| b.visible)
    }

    /// Host-style type tag, used in log output.
    pub fn kind(&self) -> &'static str {
        match self {
            SceneNode::Frame(_) => "FRAME",
            SceneNode::Group(_) => "GROUP",
            SceneNode::Rectangle(_) => "RECTANGLE",
            SceneNode::Ellipse(_) => "ELLIPSE",
            SceneNode::Text(_) => "TEXT",
            SceneNode::Line(_) => "LINE",
            SceneNode::Vector(_) => "VECTOR",
            SceneNode::Other => "OTHER",
        }
    }
}

/// Attributes shared by every node kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeBase {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_true")]
    pub visible: bool,
    /// Position relative to the parent.
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    /// Counter-clockwise rotation in degrees.
    #[serde(default)]
    pub rotation: f64,
    #[serde(default = "default_one")]
    pub opacity: f64,
    #[serde(default)]
    pub fills: Paints,
    #[serde(default)]
    pub strokes: Paints,
    #[serde(default)]
    pub stroke_weight: f64,
    #[serde(default)]
    pub stroke_align: StrokeAlign,
    #[serde(default)]
    pub corner_radii: CornerRadii,
    #[serde(default)]
    pub effects: Vec<Effect>,
    /// Cross-axis sizing inside a flow parent.
    #[serde(default)]
    pub layout_align: LayoutAlign,
    /// Primary-axis grow factor inside a flow parent.
    #[serde(default)]
    pub layout_grow: f64,
}

impl NodeBase {
    /// A visible node with the given name and bounds.
    pub fn new(name: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
            x,
            y,
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_fill(mut self, paint: Paint) -> Self {
        self.fills.push(paint);
        self
    }

    /// Bounds are non-positive on either axis.
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

impl Default for NodeBase {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            visible: true,
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            rotation: 0.0,
            opacity: 1.0,
            fills: Paints::new(),
            strokes: Paints::new(),
            stroke_weight: 0.0,
            stroke_align: StrokeAlign::default(),
            corner_radii: CornerRadii::default(),
            effects: Vec::new(),
            layout_align: LayoutAlign::default(),
            layout_grow: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutMode {
    Horizontal,
    Vertical,
    #[default]
    #[serde(other)]
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutWrap {
    Wrap,
    #[default]
    #[serde(other)]
    NoWrap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrimaryAxisAlign {
    Center,
    Max,
    SpaceBetween,
    #[default]
    #[serde(other)]
    Min,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CounterAxisAlign {
    Center,
    Max,
    Baseline,
    #[default]
    #[serde(other)]
    Min,
}

/// `Auto` hugs the content on that axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AxisSizingMode {
    Auto,
    #[default]
    #[serde(other)]
    Fixed,
}

/// Auto-layout fields of a container, declared or inferred.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AutoLayoutProps {
    pub layout_mode: LayoutMode,
    pub layout_wrap: LayoutWrap,
    pub item_spacing: f64,
    pub padding_left: f64,
    pub padding_right: f64,
    pub padding_top: f64,
    pub padding_bottom: f64,
    pub primary_axis_align_items: PrimaryAxisAlign,
    pub counter_axis_align_items: CounterAxisAlign,
    pub primary_axis_sizing_mode: AxisSizingMode,
    pub counter_axis_sizing_mode: AxisSizingMode,
}

impl AutoLayoutProps {
    pub fn new(layout_mode: LayoutMode, item_spacing: f64) -> Self {
        Self {
            layout_mode,
            item_spacing,
            ..Self::default()
        }
    }

    pub fn with_padding(mut self, top: f64, right: f64, bottom: f64, left: f64) -> Self {
        self.padding_top = top;
        self.padding_right = right;
        self.padding_bottom = bottom;
        self.padding_left = left;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameNode {
    #[serde(flatten)]
    pub base: NodeBase,
    #[serde(flatten)]
    pub auto_layout: AutoLayoutProps,
    /// Best-guess flow arrangement computed by the host for frames that
    /// declare none.
    #[serde(default)]
    pub inferred_auto_layout: Option<AutoLayoutProps>,
    #[serde(default)]
    pub clips_content: bool,
    #[serde(default)]
    pub children: Vec<SceneNode>,
}

impl FrameNode {
    pub fn new(base: NodeBase) -> Self {
        Self {
            base,
            ..Self::default()
        }
    }

    pub fn with_auto_layout(mut self, auto_layout: AutoLayoutProps) -> Self {
        self.auto_layout = auto_layout;
        self
    }

    pub fn with_children(mut self, children: Vec<SceneNode>) -> Self {
        self.children = children;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupNode {
    #[serde(flatten)]
    pub base: NodeBase,
    #[serde(default)]
    pub children: Vec<SceneNode>,
}

/// Rectangles, ellipses, lines and vectors carry no extra attributes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeNode {
    #[serde(flatten)]
    pub base: NodeBase,
}

impl ShapeNode {
    pub fn new(base: NodeBase) -> Self {
        Self { base }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextAlignHorizontal {
    Center,
    Right,
    Justified,
    #[default]
    #[serde(other)]
    Left,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextAlignVertical {
    Center,
    Bottom,
    #[default]
    #[serde(other)]
    Top,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextAutoResize {
    WidthAndHeight,
    Height,
    Truncate,
    #[default]
    #[serde(other)]
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextDecoration {
    Underline,
    Strikethrough,
    #[default]
    #[serde(other)]
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextCase {
    Upper,
    Lower,
    Title,
    #[default]
    #[serde(other)]
    Original,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontName {
    pub family: String,
    #[serde(default = "regular_style")]
    pub style: String,
}

fn regular_style() -> String {
    "Regular".to_string()
}

impl Default for FontName {
    fn default() -> Self {
        Self {
            family: "Inter".to_string(),
            style: regular_style(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LetterSpacingUnit {
    Percent,
    #[default]
    #[serde(other)]
    Pixels,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LetterSpacing {
    pub value: f64,
    pub unit: LetterSpacingUnit,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "unit", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineHeight {
    Pixels {
        value: f64,
    },
    Percent {
        value: f64,
    },
    #[default]
    #[serde(other)]
    Auto,
}

/// A style run: a maximal span of characters sharing one typography.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSegment {
    pub characters: String,
    #[serde(default)]
    pub font_name: FontName,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default = "default_font_weight")]
    pub font_weight: u16,
    #[serde(default)]
    pub text_decoration: TextDecoration,
    #[serde(default)]
    pub text_case: TextCase,
    #[serde(default)]
    pub letter_spacing: LetterSpacing,
    #[serde(default)]
    pub line_height: LineHeight,
    #[serde(default)]
    pub fills: Paints,
}

fn default_font_size() -> f64 {
    14.0
}

fn default_font_weight() -> u16 {
    400
}

impl TextSegment {
    /// A run with default typography.
    pub fn new(characters: impl Into<String>) -> Self {
        Self {
            characters: characters.into(),
            font_name: FontName::default(),
            font_size: default_font_size(),
            font_weight: default_font_weight(),
            text_decoration: TextDecoration::default(),
            text_case: TextCase::default(),
            letter_spacing: LetterSpacing::default(),
            line_height: LineHeight::default(),
            fills: Paints::new(),
        }
    }

    pub fn is_italic(&self) -> bool {
        self.font_name.style.to_lowercase().contains("italic")
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextNode {
    #[serde(flatten)]
    pub base: NodeBase,
    #[serde(default)]
    pub characters: String,
    /// Style runs in reading order. Empty means one run over `characters`
    /// with default typography.
    #[serde(default)]
    pub segments: Vec<TextSegment>,
    #[serde(default)]
    pub text_align_horizontal: TextAlignHorizontal,
    #[serde(default)]
    pub text_align_vertical: TextAlignVertical,
    #[serde(default)]
    pub text_auto_resize: TextAutoResize,
}

impl TextNode {
    pub fn new(base: NodeBase, segments: Vec<TextSegment>) -> Self {
        let characters = segments.iter().map(|s| s.characters.as_str()).collect();
        Self {
            base,
            characters,
            segments,
            ..Self::default()
        }
    }
}

/// Parse a host export: either a single node or an array of nodes.
pub fn from_json(source: &str) -> Result<Vec<SceneNode>, SceneError> {
    let value: serde_json::Value = serde_json::from_str(source)?;
    match value {
        serde_json::Value::Array(_) => Ok(serde_json::from_value(value)?),
        serde_json::Value::Object(_) => Ok(vec![serde_json::from_value(value)?]),
        other => Err(SceneError::InvalidDocument(format!(
            "expected a node or an array of nodes, found {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_frame() {
        let nodes = from_json(
            r#"{
                "type": "FRAME", "name": "Card", "width": 200, "height": 100,
                "layoutMode": "VERTICAL", "itemSpacing": 8,
                "children": [
                    {"type": "RECTANGLE", "name": "Bg", "width": 10, "height": 10},
                    {"type": "TEXT", "name": "Title", "width": 50, "height": 20,
                     "characters": "Hi", "segments": [{"characters": "Hi"}]},
                    {"type": "SLICE", "name": "Export"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(nodes.len(), 1);
        let SceneNode::Frame(frame) = &nodes[0] else {
            panic!("expected frame");
        };
        assert_eq!(frame.base.name, "Card");
        assert!(frame.base.visible);
        assert_eq!(frame.auto_layout.layout_mode, LayoutMode::Vertical);
        assert_eq!(frame.auto_layout.item_spacing, 8.0);
        assert!(frame.inferred_auto_layout.is_none());
        assert_eq!(frame.children.len(), 3);
        assert_eq!(frame.children[2], SceneNode::Other);
        assert_eq!(frame.children[1].kind(), "TEXT");
    }

    #[test]
    fn test_component_aliases_frame() {
        let nodes = from_json(r#"[{"type": "INSTANCE", "width": 1, "height": 1}]"#).unwrap();
        assert_eq!(nodes[0].kind(), "FRAME");
    }

    #[test]
    fn test_line_height_units() {
        let segment: TextSegment = serde_json::from_str(
            r#"{"characters": "a", "lineHeight": {"unit": "PIXELS", "value": 20}}"#,
        )
        .unwrap();
        assert_eq!(segment.line_height, LineHeight::Pixels { value: 20.0 });
        assert_eq!(segment.font_weight, 400);
    }

    #[test]
    fn test_unknown_kinds_load_as_fallbacks() {
        let nodes = from_json(
            r#"[
                {"type": "RECTANGLE", "name": "Clip", "width": 10, "height": 10,
                 "fills": [{"type": "VIDEO"}, {"type": "SOLID", "color": {"r": 1, "g": 0, "b": 0}}],
                 "effects": [{"type": "NOISE", "radius": 2}]},
                {"type": "FRAME", "name": "Grid", "width": 20, "height": 20,
                 "layoutMode": "GRID", "strokeAlign": "SOMEWHERE"},
                {"type": "TEXT", "name": "Caps", "width": 50, "height": 20,
                 "segments": [{"characters": "Hi", "textCase": "SMALL_CAPS",
                               "textDecoration": "WAVY", "lineHeight": {"unit": "EM", "value": 1}}]}
            ]"#,
        )
        .unwrap();

        assert_eq!(nodes.len(), 3);
        let rect = nodes[0].base().unwrap();
        assert_eq!(rect.fills[0], Paint::Unknown);
        assert!(!rect.fills[0].is_visible());
        assert_eq!(rect.effects[0], Effect::Unknown);
        assert!(!rect.effects[0].is_visible());

        let SceneNode::Frame(frame) = &nodes[1] else {
            panic!("expected frame");
        };
        assert_eq!(frame.auto_layout.layout_mode, LayoutMode::None);
        assert_eq!(frame.base.stroke_align, StrokeAlign::Inside);

        let SceneNode::Text(text) = &nodes[2] else {
            panic!("expected text");
        };
        assert_eq!(text.segments[0].text_case, TextCase::Original);
        assert_eq!(text.segments[0].text_decoration, TextDecoration::None);
        assert_eq!(text.segments[0].line_height, LineHeight::Auto);
    }

    #[test]
    fn test_invalid_document() {
        let err = from_json("42").unwrap_err();
        assert!(matches!(err, SceneError::InvalidDocument(_)));
        assert!(from_json("{").is_err());
    }
}
