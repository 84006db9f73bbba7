//! The tree walker.
//!
//! One pass is a depth-first walk over the scene that dispatches on node
//! kind, resolves each container's layout once, and composes child
//! fragments into their parent. Nodes that cannot be rendered are skipped;
//! the walk never fails.

use glam::DVec2;
use sprig_core::{FrameNode, GroupNode, NodeBase, SceneNode, TextNode, TextSegment};
use tracing::{debug, warn};

use crate::emit::{
    emitter_for, placeholder_url, ElementKind, ElementSpec, Emitter, StyledRun, TextSpec,
};
use crate::extract::has_image_fill;
use crate::layout::resolve_layout;
use crate::prefix::apply_prefix_to_classes;
use crate::settings::{Framework, GenerationContext, PluginSettings};
use crate::style::{Hug, Parent, ShapeKind, StyleBuilder, StyleDescriptor};
use crate::templates::TemplateEngine;

/// Walks a scene for one generation pass.
pub struct Generator<'a> {
    ctx: &'a GenerationContext,
    emitter: Box<dyn Emitter>,
}

impl<'a> Generator<'a> {
    pub fn new(ctx: &'a GenerationContext) -> Self {
        Self {
            ctx,
            emitter: emitter_for(ctx),
        }
    }

    /// Code for `nodes` in input order, without a leading newline.
    pub fn generate(&self, nodes: &[SceneNode]) -> String {
        debug!(framework = %self.emitter.framework(), nodes = nodes.len(), "generating");
        let code = self.nodes(nodes, Parent::Root).concat();
        match code.strip_prefix('\n') {
            Some(stripped) => stripped.to_string(),
            None => code,
        }
    }

    fn nodes(&self, nodes: &[SceneNode], parent: Parent<'_>) -> Vec<String> {
        nodes
            .iter()
            .flat_map(|node| self.node(node, parent))
            .collect()
    }

    /// Fragments for one node. Usually one; none for skipped nodes, several
    /// when the node passes its children through.
    fn node(&self, node: &SceneNode, parent: Parent<'_>) -> Vec<String> {
        let Some(base) = node.base() else {
            debug!(kind = node.kind(), "skipping unsupported node");
            return Vec::new();
        };
        if !base.visible {
            debug!(name = %base.name, "skipping invisible node");
            return Vec::new();
        }

        match node {
            SceneNode::Frame(frame) => self.frame(frame, parent),
            SceneNode::Group(group) => self.group(group, parent),
            SceneNode::Rectangle(shape) | SceneNode::Vector(shape) => {
                self.leaf(&shape.base, parent, ShapeKind::Box)
            }
            SceneNode::Ellipse(shape) => self.leaf(&shape.base, parent, ShapeKind::Ellipse),
            SceneNode::Line(shape) => self.line(&shape.base, parent),
            SceneNode::Text(text) => self.text(text, parent),
            SceneNode::Other => Vec::new(),
        }
    }

    fn layer_name<'n>(&self, base: &'n NodeBase) -> Option<&'n str> {
        self.ctx
            .show_layer_names()
            .then_some(base.name.as_str())
            .filter(|name| !name.is_empty())
    }

    fn builder<'b>(&'b self, base: &'b NodeBase) -> StyleBuilder<'b> {
        StyleBuilder::new(base, self.emitter.as_ref())
    }

    fn frame(&self, frame: &FrameNode, parent: Parent<'_>) -> Vec<String> {
        let base = &frame.base;
        if base.is_degenerate() {
            debug!(name = %base.name, "zero-size frame passes its children through");
            // Children are positioned relative to the frame, which sits at
            // (x, y) in the parent.
            let parent = match parent {
                Parent::Absolute(origin) => Parent::Absolute(origin - DVec2::new(base.x, base.y)),
                other => other,
            };
            return self.nodes(&frame.children, parent);
        }

        let decision = resolve_layout(frame, self.ctx.optimize_layout());
        debug!(name = %base.name, ?decision, "resolved layout");
        let children = self.nodes(&frame.children, Parent::from_decision(&decision));

        let mut builder = self.builder(base);
        builder
            .position_styles(parent, Hug::from_flow(&decision))
            .shape_styles(ShapeKind::Box)
            .clip_styles(frame.clips_content)
            .layout_styles(&decision, !children.is_empty());

        vec![self.emitter.container(&ElementSpec {
            name: self.layer_name(base),
            kind: ElementKind::Container,
            styles: builder.finish(),
            children,
        })]
    }

    fn group(&self, group: &GroupNode, parent: Parent<'_>) -> Vec<String> {
        let base = &group.base;
        if base.is_degenerate() || group.children.is_empty() {
            debug!(name = %base.name, "skipping degenerate group");
            return Vec::new();
        }

        // At the top level a group has no box of its own.
        let mut builder = self.builder(base);
        match parent {
            Parent::Root => builder.blend_styles(),
            Parent::Flow(_) | Parent::Absolute(_) => builder.position_styles(parent, Hug::NONE),
        };

        if builder.is_empty() {
            debug!(name = %base.name, "flattening unstyled group");
            return self.nodes(&group.children, parent);
        }

        let children = self.nodes(
            &group.children,
            Parent::Absolute(DVec2::new(base.x, base.y)),
        );
        if children.is_empty() {
            return Vec::new();
        }
        builder.absolute_container();

        vec![self.emitter.container(&ElementSpec {
            name: self.layer_name(base),
            kind: ElementKind::Container,
            styles: builder.finish(),
            children,
        })]
    }

    /// Rectangles, ellipses and vectors. An image fill turns the node into
    /// an image placeholder.
    fn leaf(&self, base: &NodeBase, parent: Parent<'_>, kind: ShapeKind) -> Vec<String> {
        if base.is_degenerate() {
            debug!(name = %base.name, "skipping zero-size shape");
            return Vec::new();
        }

        let image = has_image_fill(&base.fills);
        let mut builder = self.builder(base);
        builder
            .position_styles(parent, Hug::NONE)
            .shape_styles(if image { ShapeKind::Image } else { kind });

        let kind = if image {
            ElementKind::Image {
                src: placeholder_url(base.width, base.height),
            }
        } else {
            ElementKind::Container
        };
        vec![self.emitter.container(&ElementSpec {
            name: self.layer_name(base),
            kind,
            styles: builder.finish(),
            children: Vec::new(),
        })]
    }

    /// A line is a bar as long as the node and as thick as its stroke.
    fn line(&self, base: &NodeBase, parent: Parent<'_>) -> Vec<String> {
        let (length, thickness) = (base.width, base.stroke_weight);
        if length <= 0.0 || thickness <= 0.0 {
            debug!(name = %base.name, "skipping zero-size line");
            return Vec::new();
        }

        let mut builder = self.builder(base).with_bounds(length, thickness);
        builder.position_styles(parent, Hug::NONE).line_styles();

        vec![self.emitter.container(&ElementSpec {
            name: self.layer_name(base),
            kind: ElementKind::Container,
            styles: builder.finish(),
            children: Vec::new(),
        })]
    }

    /// One run merges its typography into the element; several runs each
    /// carry their own.
    fn text(&self, node: &TextNode, parent: Parent<'_>) -> Vec<String> {
        let base = &node.base;
        if base.is_degenerate() {
            debug!(name = %base.name, "skipping zero-size text");
            return Vec::new();
        }

        let fallback;
        let runs: &[TextSegment] = if node.segments.is_empty() {
            fallback = [TextSegment::new(node.characters.clone())];
            &fallback
        } else {
            &node.segments
        };

        let mut builder = self.builder(base);
        builder
            .position_styles(parent, Hug::from_text(node))
            .text_align(node);

        let styled_runs = match runs {
            [run] => {
                builder.add_styles(&self.run_styles(base, run));
                vec![StyledRun {
                    text: self.emitter.text_content(&run.characters, run.text_case),
                    styles: None,
                }]
            }
            runs => runs
                .iter()
                .map(|run| StyledRun {
                    text: self.emitter.text_content(&run.characters, run.text_case),
                    styles: Some(self.run_styles(base, run)),
                })
                .collect(),
        };

        vec![self.emitter.text(&TextSpec {
            name: self.layer_name(base),
            styles: builder.finish(),
            runs: styled_runs,
        })]
    }

    fn run_styles(&self, base: &NodeBase, run: &TextSegment) -> StyleDescriptor {
        let mut builder = self.builder(base);
        builder.typography(run);
        builder.finish()
    }
}

/// Generate code for `nodes` in one pass.
pub fn generate(nodes: &[SceneNode], ctx: &GenerationContext) -> String {
    Generator::new(ctx).generate(nodes)
}

/// Code for the in-tool preview: plain HTML regardless of the selected
/// framework.
pub fn generate_preview(nodes: &[SceneNode], settings: &PluginSettings) -> String {
    let settings = PluginSettings {
        framework: Framework::Html,
        ..settings.clone()
    };
    generate(nodes, &GenerationContext::new(settings, true))
}

/// Generate code as shown in the code panel: the snippet with the class
/// prefix applied and wrapped per the framework's generation mode. A failed
/// post-processing step falls back to the output before it.
pub fn generate_code(nodes: &[SceneNode], settings: &PluginSettings) -> String {
    let ctx = GenerationContext::new(settings.clone(), false);
    let mut code = generate(nodes, &ctx);

    if ctx.framework == Framework::Tailwind {
        if let Some(prefix) = settings.class_prefix() {
            match apply_prefix_to_classes(&code, Some(prefix)) {
                Ok(prefixed) => code = prefixed,
                Err(err) => warn!(%err, "class prefix not applied"),
            }
        }
    }

    let name = nodes
        .iter()
        .filter(|n| n.is_visible())
        .find_map(|n| n.base())
        .map(|b| b.name.as_str())
        .unwrap_or_default();

    match TemplateEngine::new().and_then(|engine| engine.wrap(&code, name, settings)) {
        Ok(wrapped) => wrapped,
        Err(err) => {
            warn!(%err, "wrapping failed, returning the snippet");
            code
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprig_core::{NodeBase, Paint, Rgb, ShapeNode};

    fn html() -> GenerationContext {
        GenerationContext::new(PluginSettings::for_framework(Framework::Html), false)
    }

    fn rect(name: &str, x: f64, y: f64, w: f64, h: f64) -> SceneNode {
        SceneNode::Rectangle(ShapeNode::new(NodeBase::new(name, x, y, w, h)))
    }

    #[test]
    fn test_leading_newline_is_stripped() {
        let code = generate(&[rect("a", 0.0, 0.0, 10.0, 10.0)], &html());
        assert_eq!(code, r#"<div style="width: 10px; height: 10px"></div>"#);
    }

    #[test]
    fn test_siblings_keep_input_order() {
        let code = generate(
            &[rect("a", 0.0, 0.0, 10.0, 10.0), rect("b", 0.0, 0.0, 20.0, 20.0)],
            &html(),
        );
        let first = code.find("width: 10px").unwrap();
        let second = code.find("width: 20px").unwrap();
        assert!(first < second);
        assert!(code.contains("</div>\n<div"));
    }

    #[test]
    fn test_skips_invisible_degenerate_and_unknown() {
        let mut hidden = NodeBase::new("h", 0.0, 0.0, 10.0, 10.0);
        hidden.visible = false;
        let nodes = vec![
            SceneNode::Rectangle(ShapeNode::new(hidden)),
            rect("flat", 0.0, 0.0, 10.0, 0.0),
            SceneNode::Other,
        ];
        assert_eq!(generate(&nodes, &html()), "");
    }

    #[test]
    fn test_line_uses_stroke() {
        let mut base = NodeBase::new("rule", 0.0, 0.0, 100.0, 0.0);
        base.stroke_weight = 2.0;
        base.strokes.push(Paint::solid(Rgb::BLACK));
        let code = generate(&[SceneNode::Line(ShapeNode::new(base))], &html());
        assert_eq!(
            code,
            r#"<div style="width: 100px; height: 2px; background: #000000"></div>"#
        );
    }

    #[test]
    fn test_image_fill_becomes_placeholder() {
        let base = NodeBase::new("photo", 0.0, 0.0, 120.0, 80.0).with_fill(Paint::Image(
            sprig_core::ImagePaint {
                scale_mode: sprig_core::ScaleMode::Fill,
                image_hash: None,
                opacity: 1.0,
                visible: true,
            },
        ));
        let code = generate(&[SceneNode::Vector(ShapeNode::new(base))], &html());
        assert_eq!(
            code,
            r#"<img style="width: 120px; height: 80px" src="https://placehold.co/120x80" />"#
        );
    }

    #[test]
    fn test_layer_names() {
        let mut settings = PluginSettings::for_framework(Framework::Html);
        settings.show_layer_names = true;
        let ctx = GenerationContext::new(settings, false);
        let code = generate(&[rect("Card", 0.0, 0.0, 10.0, 10.0)], &ctx);
        assert!(code.contains(r#"data-layer="Card""#));
    }
}
