//! Value types carried by scene nodes: colors, paints, effects, radii.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Ordered paint list, topmost paint first.
pub type Paints = SmallVec<[Paint; 2]>;

pub(crate) fn default_one() -> f64 {
    1.0
}

pub(crate) fn default_true() -> bool {
    true
}

/// An RGB color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Create from 8-bit RGB values.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }

    /// Create from hex string (e.g., "#FF5733" or "FF5733").
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
        let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
        let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
        Some(Self::from_rgb8(r, g, b))
    }

    /// Convert to 8-bit RGB tuple.
    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        (channel8(self.r), channel8(self.g), channel8(self.b))
    }

    /// Six digit uppercase hex without the leading `#` (e.g., "FF5733").
    pub fn to_hex6(&self) -> String {
        let (r, g, b) = self.to_rgb8();
        format!("{:02X}{:02X}{:02X}", r, g, b)
    }

    /// Convert to hex string (e.g., "#FF5733").
    pub fn to_hex(&self) -> String {
        format!("#{}", self.to_hex6())
    }

    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
}

/// An RGBA color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "default_one")]
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(&self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }
}

fn channel8(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// A 2D vector as the host tool serializes it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl From<Vector> for DVec2 {
    fn from(v: Vector) -> Self {
        DVec2::new(v.x, v.y)
    }
}

/// A 2x3 affine transform `[[a, c, e], [b, d, f]]`.
pub type Transform = [[f64; 3]; 2];

/// The identity transform.
pub const IDENTITY_TRANSFORM: Transform = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];

fn identity_transform() -> Transform {
    IDENTITY_TRANSFORM
}

/// A color stop in a gradient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    /// Position along the gradient (0.0 to 1.0)
    pub position: f64,
    /// Color at this position
    pub color: Rgba,
}

/// A fill or stroke paint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Paint {
    Solid(SolidPaint),
    GradientLinear(GradientPaint),
    GradientRadial(GradientPaint),
    GradientAngular(GradientPaint),
    GradientDiamond(GradientPaint),
    Image(ImagePaint),
    /// A paint kind this model does not know. Never drawn.
    #[serde(other)]
    Unknown,
}

impl Paint {
    /// Shorthand for an opaque, visible solid paint.
    pub fn solid(color: Rgb) -> Self {
        Paint::Solid(SolidPaint {
            color,
            opacity: 1.0,
            visible: true,
        })
    }

    pub fn is_visible(&self) -> bool {
        match self {
            Paint::Solid(p) => p.visible,
            Paint::GradientLinear(p)
            | Paint::GradientRadial(p)
            | Paint::GradientAngular(p)
            | Paint::GradientDiamond(p) => p.visible,
            Paint::Image(p) => p.visible,
            Paint::Unknown => false,
        }
    }

    pub fn opacity(&self) -> f64 {
        match self {
            Paint::Solid(p) => p.opacity,
            Paint::GradientLinear(p)
            | Paint::GradientRadial(p)
            | Paint::GradientAngular(p)
            | Paint::GradientDiamond(p) => p.opacity,
            Paint::Image(p) => p.opacity,
            Paint::Unknown => 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolidPaint {
    pub color: Rgb,
    #[serde(default = "default_one")]
    pub opacity: f64,
    #[serde(default = "default_true")]
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientPaint {
    pub gradient_stops: Vec<ColorStop>,
    /// Maps the unit gradient space onto the node's bounds. The handle
    /// positions some hosts also export are not trusted; endpoints are always
    /// derived from this matrix.
    #[serde(default = "identity_transform")]
    pub gradient_transform: Transform,
    #[serde(default = "default_one")]
    pub opacity: f64,
    #[serde(default = "default_true")]
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePaint {
    #[serde(default)]
    pub scale_mode: ScaleMode,
    #[serde(default)]
    pub image_hash: Option<String>,
    #[serde(default = "default_one")]
    pub opacity: f64,
    #[serde(default = "default_true")]
    pub visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScaleMode {
    Fit,
    Crop,
    Tile,
    #[default]
    #[serde(other)]
    Fill,
}

/// A visual effect attached to a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Effect {
    DropShadow(ShadowEffect),
    InnerShadow(ShadowEffect),
    LayerBlur(BlurEffect),
    BackgroundBlur(BlurEffect),
    /// An effect kind this model does not know. Ignored.
    #[serde(other)]
    Unknown,
}

impl Effect {
    pub fn is_visible(&self) -> bool {
        match self {
            Effect::DropShadow(s) | Effect::InnerShadow(s) => s.visible,
            Effect::LayerBlur(b) | Effect::BackgroundBlur(b) => b.visible,
            Effect::Unknown => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadowEffect {
    pub color: Rgba,
    #[serde(default)]
    pub offset: Vector,
    /// Blur radius
    #[serde(default)]
    pub radius: f64,
    #[serde(default)]
    pub spread: f64,
    #[serde(default = "default_true")]
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlurEffect {
    pub radius: f64,
    #[serde(default = "default_true")]
    pub visible: bool,
}

/// Independent radii for the four corners.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CornerRadii {
    pub top_left: f64,
    pub top_right: f64,
    pub bottom_right: f64,
    pub bottom_left: f64,
}

impl CornerRadii {
    pub const fn uniform(radius: f64) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_right: radius,
            bottom_left: radius,
        }
    }

    pub fn is_uniform(&self) -> bool {
        self.top_left == self.top_right
            && self.top_right == self.bottom_right
            && self.bottom_right == self.bottom_left
    }

    pub fn is_zero(&self) -> bool {
        self.is_uniform() && self.top_left <= 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrokeAlign {
    Outside,
    Center,
    #[default]
    #[serde(other)]
    Inside,
}

/// How a child sizes itself on its parent's cross axis in a flow layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutAlign {
    Stretch,
    Min,
    Center,
    Max,
    #[default]
    #[serde(other)]
    Inherit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        let c = Rgb::from_hex("#FF5733").unwrap();
        assert_eq!(c.to_hex(), "#FF5733");
        assert_eq!(Rgb::new(0.2, 0.4, 1.0).to_hex6(), "3366FF");
        assert!(Rgb::from_hex("#FFF").is_none());
    }

    #[test]
    fn test_paint_deserialize() {
        let paint: Paint = serde_json::from_str(
            r#"{"type":"SOLID","color":{"r":1,"g":0,"b":0},"opacity":0.5}"#,
        )
        .unwrap();
        assert!(paint.is_visible());
        assert_eq!(paint.opacity(), 0.5);

        let gradient: Paint = serde_json::from_str(
            r#"{"type":"GRADIENT_LINEAR","gradientStops":[
                {"position":0,"color":{"r":1,"g":1,"b":1,"a":1}},
                {"position":1,"color":{"r":0,"g":0,"b":0}}]}"#,
        )
        .unwrap();
        match gradient {
            Paint::GradientLinear(g) => {
                assert_eq!(g.gradient_transform, IDENTITY_TRANSFORM);
                assert_eq!(g.gradient_stops[1].color.a, 1.0);
            }
            other => panic!("unexpected paint {:?}", other),
        }
    }

    #[test]
    fn test_corner_radii() {
        assert!(CornerRadii::default().is_zero());
        assert!(CornerRadii::uniform(4.0).is_uniform());
        let mixed = CornerRadii {
            top_left: 4.0,
            ..CornerRadii::default()
        };
        assert!(!mixed.is_uniform());
        assert!(!mixed.is_zero());
    }
}
