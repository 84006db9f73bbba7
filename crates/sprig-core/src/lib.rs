//! Scene-graph input model for the Sprig design-to-code generator.
//!
//! This crate provides the read-only types the generator walks:
//! - Scene nodes (frames, groups, shapes, text, lines, vectors)
//! - Paints, effects and corner radii
//! - Auto-layout metadata, declared or inferred by the host
//! - Error types for loading host exports

pub mod errors;
pub mod scene;
pub mod types;

pub use errors::*;
pub use scene::*;
pub use types::*;
