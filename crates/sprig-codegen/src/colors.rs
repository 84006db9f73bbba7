//! Selection-level colour and gradient summaries shown next to generated code.

use serde::Serialize;
use sprig_core::{Paint, Rgb, SceneNode};

use crate::emit::{emitter_for, nearest_color_name, Emitter, HtmlEmitter};
use crate::extract::{contrast_ratio, LinearGradient};
use crate::settings::GenerationContext;

/// A distinct solid colour of the selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolidColorConversion {
    /// `#RRGGBB`, used for ordering.
    pub hex: String,
    /// Closest Tailwind palette name.
    pub color_name: &'static str,
    /// The colour as the active framework writes it.
    pub export_value: String,
    pub contrast_black: f64,
    pub contrast_white: f64,
}

/// A linear gradient of the selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinearGradientConversion {
    /// CSS value for swatch display.
    pub css_preview: String,
    pub export_value: String,
}

/// Every paint in the fills of the visible nodes, text runs included,
/// in document order.
pub fn selection_paints(nodes: &[SceneNode]) -> Vec<Paint> {
    let mut paints = Vec::new();
    collect_paints(nodes, &mut paints);
    paints
}

fn collect_paints(nodes: &[SceneNode], out: &mut Vec<Paint>) {
    for node in nodes.iter().filter(|n| n.is_visible()) {
        if let Some(base) = node.base() {
            out.extend(base.fills.iter().cloned());
        }
        if let SceneNode::Text(text) = node {
            for segment in &text.segments {
                out.extend(segment.fills.iter().cloned());
            }
        }
        collect_paints(node.children(), out);
    }
}

/// Distinct visible solid colours, deduplicated by their exported value and
/// sorted by hex.
pub fn retrieve_solid_colors(paints: &[Paint], ctx: &GenerationContext) -> Vec<SolidColorConversion> {
    let emitter = emitter_for(ctx);
    let mut colors: Vec<SolidColorConversion> = Vec::new();

    for paint in paints.iter().filter(|p| p.is_visible()) {
        let Paint::Solid(solid) = paint else {
            continue;
        };
        let export_value = emitter.color(solid.color, solid.opacity);
        if colors.iter().any(|c| c.export_value == export_value) {
            continue;
        }
        colors.push(SolidColorConversion {
            hex: solid.color.to_hex(),
            color_name: nearest_color_name(solid.color),
            export_value,
            contrast_black: round2(contrast_ratio(solid.color, Rgb::BLACK)),
            contrast_white: round2(contrast_ratio(solid.color, Rgb::WHITE)),
        });
    }

    colors.sort_by(|a, b| a.hex.cmp(&b.hex));
    colors
}

/// All visible linear gradients in encounter order, without deduplication.
pub fn retrieve_linear_gradients(
    paints: &[Paint],
    ctx: &GenerationContext,
) -> Vec<LinearGradientConversion> {
    let emitter = emitter_for(ctx);
    let preview = HtmlEmitter::new(false);

    paints
        .iter()
        .filter(|p| p.is_visible())
        .filter_map(|paint| match paint {
            Paint::GradientLinear(gradient) => Some(LinearGradient::from_paint(gradient)),
            _ => None,
        })
        .map(|gradient| LinearGradientConversion {
            css_preview: preview.gradient(&gradient),
            export_value: emitter.gradient(&gradient),
        })
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{Framework, PluginSettings};
    use sprig_core::{ColorStop, FrameNode, GradientPaint, NodeBase, Rgba, SolidPaint};

    fn ctx(framework: Framework) -> GenerationContext {
        GenerationContext::new(PluginSettings::for_framework(framework), false)
    }

    fn solid(hex: &str, opacity: f64) -> Paint {
        Paint::Solid(SolidPaint {
            color: Rgb::from_hex(hex).unwrap(),
            opacity,
            visible: true,
        })
    }

    fn gradient(transform: sprig_core::Transform) -> Paint {
        Paint::GradientLinear(GradientPaint {
            gradient_stops: vec![
                ColorStop {
                    position: 0.0,
                    color: Rgba::new(1.0, 0.0, 0.0, 1.0),
                },
                ColorStop {
                    position: 1.0,
                    color: Rgba::new(0.0, 0.0, 1.0, 1.0),
                },
            ],
            gradient_transform: transform,
            opacity: 1.0,
            visible: true,
        })
    }

    #[test]
    fn test_solid_colors_dedup_and_sort() {
        let paints = vec![
            solid("#FFFFFF", 1.0),
            solid("#000000", 1.0),
            solid("#FFFFFF", 1.0),
            solid("#FF0000", 0.5),
        ];
        let colors = retrieve_solid_colors(&paints, &ctx(Framework::Html));

        let hexes: Vec<&str> = colors.iter().map(|c| c.hex.as_str()).collect();
        assert_eq!(hexes, vec!["#000000", "#FF0000", "#FFFFFF"]);
        assert_eq!(colors[0].color_name, "black");
        assert_eq!(colors[0].contrast_black, 1.0);
        assert_eq!(colors[0].contrast_white, 21.0);
    }

    #[test]
    fn test_dedup_uses_exported_value() {
        // Same colour at different opacities exports differently in HTML.
        let paints = vec![solid("#FF0000", 1.0), solid("#FF0000", 0.5)];
        assert_eq!(retrieve_solid_colors(&paints, &ctx(Framework::Html)).len(), 2);
    }

    #[test]
    fn test_hidden_paints_are_skipped() {
        let mut paint = solid("#123456", 1.0);
        if let Paint::Solid(p) = &mut paint {
            p.visible = false;
        }
        assert!(retrieve_solid_colors(&[paint], &ctx(Framework::Html)).is_empty());
    }

    #[test]
    fn test_gradients_keep_order_and_duplicates() {
        let identity = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        let vertical = [[0.0, 1.0, 0.0], [1.0, 0.0, 0.0]];
        let paints = vec![gradient(identity), solid("#000000", 1.0), gradient(vertical), gradient(identity)];
        let gradients = retrieve_linear_gradients(&paints, &ctx(Framework::Html));

        assert_eq!(gradients.len(), 3);
        assert_eq!(gradients[0], gradients[2]);
        assert_ne!(gradients[0], gradients[1]);
        assert!(gradients[0].css_preview.starts_with("linear-gradient(90deg"));
    }

    #[test]
    fn test_selection_paints_walks_visible_tree() {
        let mut hidden = NodeBase::new("hidden", 0.0, 0.0, 10.0, 10.0).with_fill(solid("#00FF00", 1.0));
        hidden.visible = false;
        let child = SceneNode::Rectangle(sprig_core::ShapeNode::new(
            NodeBase::new("child", 0.0, 0.0, 10.0, 10.0).with_fill(solid("#0000FF", 1.0)),
        ));
        let root = SceneNode::Frame(
            FrameNode::new(NodeBase::new("root", 0.0, 0.0, 20.0, 20.0).with_fill(solid("#FF0000", 1.0)))
                .with_children(vec![child, SceneNode::Rectangle(sprig_core::ShapeNode::new(hidden))]),
        );

        let paints = selection_paints(&[root]);
        assert_eq!(paints, vec![solid("#FF0000", 1.0), solid("#0000FF", 1.0)]);
    }
}
