//! Fill and gradient extraction.

use glam::DVec2;
use sprig_core::{ColorStop, GradientPaint, Paint, Rgb, ScaleMode, Transform};

/// Framework-neutral description of a node's topmost paint.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintDescriptor {
    Solid { color: Rgb, opacity: f64 },
    LinearGradient(LinearGradient),
    Image { scale_mode: ScaleMode },
}

/// A linear gradient with endpoints in the node's unit space.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub stops: Vec<ColorStop>,
    pub start: DVec2,
    pub end: DVec2,
    pub opacity: f64,
}

impl LinearGradient {
    /// Build from a host paint, recomputing the endpoints from its transform.
    pub fn from_paint(paint: &GradientPaint) -> Self {
        let (start, end) = gradient_endpoints(&paint.gradient_transform);
        Self {
            stops: paint.gradient_stops.clone(),
            start,
            end,
            opacity: paint.opacity,
        }
    }

    /// CSS angle in degrees: 0 points up, 90 points right.
    pub fn angle_degrees(&self) -> f64 {
        let d = self.end - self.start;
        let angle = d.x.atan2(-d.y).to_degrees();
        let rounded = (angle.rem_euclid(360.0) * 100.0).round() / 100.0;
        // Adding 0.0 turns -0.0 into 0.0.
        (rounded % 360.0) + 0.0
    }
}

/// Start is the translation column, end is translation plus the first
/// column of the 2x3 matrix.
pub fn gradient_endpoints(transform: &Transform) -> (DVec2, DVec2) {
    let [[a, _, e], [b, _, f]] = *transform;
    let start = DVec2::new(e, f);
    let end = start + DVec2::new(a, b);
    (start, end)
}

/// The topmost paint, which is the first entry. Returns `None` when the list
/// is empty or the top paint is hidden.
pub fn retrieve_top_fill(paints: &[Paint]) -> Option<&Paint> {
    paints.first().filter(|p| p.is_visible())
}

/// Describe the topmost paint. `opacity_override` replaces the paint's own
/// opacity when given. Gradient kinds other than linear, and unknown
/// paint kinds, yield `None`.
pub fn top_paint(paints: &[Paint], opacity_override: Option<f64>) -> Option<PaintDescriptor> {
    let descriptor = match retrieve_top_fill(paints)? {
        Paint::Solid(solid) => PaintDescriptor::Solid {
            color: solid.color,
            opacity: solid.opacity,
        },
        Paint::GradientLinear(gradient) => {
            PaintDescriptor::LinearGradient(LinearGradient::from_paint(gradient))
        }
        Paint::Image(image) => PaintDescriptor::Image {
            scale_mode: image.scale_mode,
        },
        Paint::GradientRadial(_)
        | Paint::GradientAngular(_)
        | Paint::GradientDiamond(_)
        | Paint::Unknown => return None,
    };

    Some(match (descriptor, opacity_override) {
        (PaintDescriptor::Solid { color, .. }, Some(opacity)) => {
            PaintDescriptor::Solid { color, opacity }
        }
        (PaintDescriptor::LinearGradient(mut gradient), Some(opacity)) => {
            gradient.opacity = opacity;
            PaintDescriptor::LinearGradient(gradient)
        }
        (descriptor, _) => descriptor,
    })
}

/// True when the topmost paint is an image.
pub fn has_image_fill(paints: &[Paint]) -> bool {
    matches!(retrieve_top_fill(paints), Some(Paint::Image(_)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprig_core::{ImagePaint, Rgba, SolidPaint, IDENTITY_TRANSFORM};

    fn gradient(transform: Transform) -> GradientPaint {
        GradientPaint {
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
        }
    }

    #[test]
    fn test_endpoints_identity() {
        let (start, end) = gradient_endpoints(&IDENTITY_TRANSFORM);
        assert_eq!(start, DVec2::new(0.0, 0.0));
        assert_eq!(end, DVec2::new(1.0, 0.0));
    }

    #[test]
    fn test_endpoints_rotated_and_scaled() {
        // 90 degree rotation scaled by 2, translated to (0.5, 0.25)
        let transform = [[0.0, -2.0, 0.5], [2.0, 0.0, 0.25]];
        let (start, end) = gradient_endpoints(&transform);
        assert_eq!(start, DVec2::new(0.5, 0.25));
        assert_eq!(end, DVec2::new(0.5, 2.25));
    }

    #[test]
    fn test_gradient_angle() {
        let horizontal = LinearGradient::from_paint(&gradient(IDENTITY_TRANSFORM));
        assert_eq!(horizontal.angle_degrees(), 90.0);

        let vertical = LinearGradient::from_paint(&gradient([[0.0, 1.0, 0.0], [1.0, 0.0, 0.0]]));
        assert_eq!(vertical.angle_degrees(), 180.0);
    }

    #[test]
    fn test_top_fill_is_first_entry() {
        let paints = vec![
            Paint::solid(Rgb::new(1.0, 0.0, 0.0)),
            Paint::solid(Rgb::new(0.0, 1.0, 0.0)),
        ];
        assert_eq!(
            top_paint(&paints, None),
            Some(PaintDescriptor::Solid {
                color: Rgb::new(1.0, 0.0, 0.0),
                opacity: 1.0
            })
        );
    }

    #[test]
    fn test_hidden_top_fill_yields_none() {
        let paints = vec![
            Paint::Solid(SolidPaint {
                color: Rgb::BLACK,
                opacity: 1.0,
                visible: false,
            }),
            Paint::solid(Rgb::WHITE),
        ];
        assert_eq!(top_paint(&paints, None), None);
        assert_eq!(top_paint(&[], None), None);
    }

    #[test]
    fn test_non_linear_gradient_yields_none() {
        let paints = vec![Paint::GradientRadial(gradient(IDENTITY_TRANSFORM))];
        assert_eq!(top_paint(&paints, None), None);
    }

    #[test]
    fn test_unknown_paint_yields_none() {
        let paints = vec![Paint::Unknown, Paint::solid(Rgb::WHITE)];
        assert_eq!(retrieve_top_fill(&paints), None);
        assert_eq!(top_paint(&paints, Some(0.5)), None);
        assert!(!has_image_fill(&paints));
    }

    #[test]
    fn test_opacity_override() {
        let paints = vec![Paint::solid(Rgb::WHITE)];
        assert_eq!(
            top_paint(&paints, Some(0.5)),
            Some(PaintDescriptor::Solid {
                color: Rgb::WHITE,
                opacity: 0.5
            })
        );
    }

    #[test]
    fn test_image_fill() {
        let paints = vec![Paint::Image(ImagePaint {
            scale_mode: ScaleMode::Fill,
            image_hash: None,
            opacity: 1.0,
            visible: true,
        })];
        assert!(has_image_fill(&paints));
        assert!(!has_image_fill(&[Paint::solid(Rgb::BLACK)]));
    }
}
