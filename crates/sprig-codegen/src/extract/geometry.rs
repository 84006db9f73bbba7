//! Stroke, corner radius, shadow and blur extraction.

use sprig_core::{CornerRadii, Effect, NodeBase, Paint, Rgb, StrokeAlign};

use super::paint::retrieve_top_fill;

/// Corner rounding of a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RadiusDescriptor {
    Uniform(f64),
    Corners(CornerRadii),
    /// Fully rounded, used for ellipses.
    Full,
}

/// Rounding for a node, `None` when it has square corners.
pub fn radius_descriptor(base: &NodeBase, ellipse: bool) -> Option<RadiusDescriptor> {
    if ellipse {
        return Some(RadiusDescriptor::Full);
    }
    let radii = base.corner_radii;
    if radii.is_zero() {
        None
    } else if radii.is_uniform() {
        Some(RadiusDescriptor::Uniform(radii.top_left))
    } else {
        Some(RadiusDescriptor::Corners(radii))
    }
}

/// A solid border.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeDescriptor {
    pub weight: f64,
    pub color: Rgb,
    pub opacity: f64,
    pub align: StrokeAlign,
}

/// Border from the topmost solid stroke. Gradient and image strokes are
/// not representable as borders and are dropped.
pub fn stroke_descriptor(base: &NodeBase) -> Option<StrokeDescriptor> {
    if base.stroke_weight <= 0.0 {
        return None;
    }
    match retrieve_top_fill(&base.strokes)? {
        Paint::Solid(solid) => Some(StrokeDescriptor {
            weight: base.stroke_weight,
            color: solid.color,
            opacity: solid.opacity,
            align: base.stroke_align,
        }),
        _ => None,
    }
}

/// A drop or inner shadow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxShadow {
    pub inset: bool,
    pub offset_x: f64,
    pub offset_y: f64,
    pub blur: f64,
    pub spread: f64,
    pub color: Rgb,
    pub opacity: f64,
}

/// Visible shadows in declaration order.
pub fn box_shadows(base: &NodeBase) -> Vec<BoxShadow> {
    base.effects
        .iter()
        .filter(|e| e.is_visible())
        .filter_map(|effect| {
            let (shadow, inset) = match effect {
                Effect::DropShadow(s) => (s, false),
                Effect::InnerShadow(s) => (s, true),
                _ => return None,
            };
            Some(BoxShadow {
                inset,
                offset_x: shadow.offset.x,
                offset_y: shadow.offset.y,
                blur: shadow.radius,
                spread: shadow.spread,
                color: shadow.color.rgb(),
                opacity: shadow.color.a,
            })
        })
        .collect()
}

/// Layer and background blur radii.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BlurDescriptor {
    pub layer: Option<f64>,
    pub background: Option<f64>,
}

impl BlurDescriptor {
    pub fn is_empty(&self) -> bool {
        self.layer.is_none() && self.background.is_none()
    }
}

pub fn blur_descriptor(base: &NodeBase) -> BlurDescriptor {
    let mut blur = BlurDescriptor::default();
    for effect in base.effects.iter().filter(|e| e.is_visible()) {
        match effect {
            Effect::LayerBlur(b) if b.radius > 0.0 => blur.layer = Some(b.radius),
            Effect::BackgroundBlur(b) if b.radius > 0.0 => blur.background = Some(b.radius),
            _ => {}
        }
    }
    blur
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprig_core::{BlurEffect, Rgba, ShadowEffect, Vector};

    #[test]
    fn test_radius() {
        let mut base = NodeBase::new("r", 0.0, 0.0, 10.0, 10.0);
        assert_eq!(radius_descriptor(&base, false), None);
        assert_eq!(radius_descriptor(&base, true), Some(RadiusDescriptor::Full));

        base.corner_radii = CornerRadii::uniform(8.0);
        assert_eq!(
            radius_descriptor(&base, false),
            Some(RadiusDescriptor::Uniform(8.0))
        );

        base.corner_radii.bottom_left = 0.0;
        assert!(matches!(
            radius_descriptor(&base, false),
            Some(RadiusDescriptor::Corners(_))
        ));
    }

    #[test]
    fn test_stroke_requires_weight() {
        let mut base = NodeBase::new("s", 0.0, 0.0, 10.0, 10.0);
        base.strokes.push(Paint::solid(Rgb::BLACK));
        assert_eq!(stroke_descriptor(&base), None);

        base.stroke_weight = 2.0;
        let stroke = stroke_descriptor(&base).unwrap();
        assert_eq!(stroke.weight, 2.0);
        assert_eq!(stroke.color, Rgb::BLACK);
    }

    #[test]
    fn test_effects() {
        let mut base = NodeBase::new("e", 0.0, 0.0, 10.0, 10.0);
        base.effects = vec![
            Effect::DropShadow(ShadowEffect {
                color: Rgba::new(0.0, 0.0, 0.0, 0.25),
                offset: Vector { x: 0.0, y: 4.0 },
                radius: 4.0,
                spread: 0.0,
                visible: true,
            }),
            Effect::InnerShadow(ShadowEffect {
                color: Rgba::default(),
                offset: Vector::default(),
                radius: 2.0,
                spread: 0.0,
                visible: false,
            }),
            Effect::LayerBlur(BlurEffect {
                radius: 3.0,
                visible: true,
            }),
        ];

        let shadows = box_shadows(&base);
        assert_eq!(shadows.len(), 1);
        assert!(!shadows[0].inset);
        assert_eq!(shadows[0].opacity, 0.25);

        let blur = blur_descriptor(&base);
        assert_eq!(blur.layer, Some(3.0));
        assert_eq!(blur.background, None);
    }

    #[test]
    fn test_unknown_kinds_are_ignored() {
        let mut base = NodeBase::new("u", 0.0, 0.0, 10.0, 10.0);
        base.stroke_weight = 1.0;
        base.strokes.push(Paint::Unknown);
        base.effects = vec![Effect::Unknown];

        assert_eq!(stroke_descriptor(&base), None);
        assert!(box_shadows(&base).is_empty());
        assert!(blur_descriptor(&base).is_empty());
    }
}
