//! Pure readers that turn node attributes into framework-neutral
//! descriptors.

mod contrast;
mod geometry;
mod paint;

pub use contrast::{contrast_ratio, relative_luminance};
pub use geometry::{
    blur_descriptor, box_shadows, radius_descriptor, stroke_descriptor, BlurDescriptor,
    BoxShadow, RadiusDescriptor, StrokeDescriptor,
};
pub use paint::{
    gradient_endpoints, has_image_fill, retrieve_top_fill, top_paint, LinearGradient,
    PaintDescriptor,
};
