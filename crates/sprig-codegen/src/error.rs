//! Error types for code generation.
//!
//! The tree walk itself never fails; these cover the surfaces around it.

use thiserror::Error;

/// Result type alias for codegen operations.
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Errors that can occur around code generation.
#[derive(Error, Debug)]
pub enum CodegenError {
    /// Settings document could not be parsed.
    #[error("Invalid settings: {0}")]
    InvalidSettings(#[source] serde_json::Error),

    /// Scene document could not be loaded.
    #[error(transparent)]
    Scene(#[from] sprig_core::SceneError),

    /// Template rendering error.
    #[error("Template error: {0}")]
    TemplateError(#[from] handlebars::RenderError),

    /// Template not found.
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// Invalid template.
    #[error("Invalid template: {0}")]
    InvalidTemplate(#[from] handlebars::TemplateError),

    /// Pattern construction failed.
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}
