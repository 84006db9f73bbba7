//! Code generation from design scene graphs to UI source code.
//!
//! This crate walks a design tree and emits source text for one of four
//! targets: HTML (optionally JSX), Tailwind, Flutter and SwiftUI.
//!
//! # Pipeline
//!
//! - `extract` reads paints, strokes, radii and effects into neutral descriptors
//! - `layout` decides between flow and absolute positioning per frame
//! - `style` collects per-node properties through the target's [`Emitter`]
//! - `generator` walks the tree and assembles fragments
//! - `templates` wraps fragments into complete Flutter and SwiftUI units
//!
//! # Example
//!
//! ```ignore
//! use sprig_codegen::{generate_code, Framework, PluginSettings};
//!
//! let nodes = sprig_core::from_json(&export)?;
//! let settings = PluginSettings::for_framework(Framework::Tailwind);
//! println!("{}", generate_code(&nodes, &settings));
//! ```

pub mod colors;
pub mod emit;
pub mod error;
pub mod extract;
pub mod generator;
pub mod layout;
pub mod prefix;
pub mod settings;
pub mod style;
pub mod templates;

pub use colors::{
    retrieve_linear_gradients, retrieve_solid_colors, selection_paints, LinearGradientConversion,
    SolidColorConversion,
};
pub use emit::{emitter_for, Emitter};
pub use error::{CodegenError, Result};
pub use generator::{generate, generate_code, generate_preview, Generator};
pub use layout::{annotate_inferred_layouts, infer_auto_layout, resolve_layout, LayoutDecision};
pub use prefix::apply_prefix_to_classes;
pub use settings::{
    FlutterGenerationMode, Framework, GenerationContext, PluginSettings, SwiftUIGenerationMode,
};
pub use style::{StyleBuilder, StyleDescriptor};
pub use templates::TemplateEngine;
