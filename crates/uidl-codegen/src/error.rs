//! Error types for code generation.

use thiserror::Error;
use uidl_core::{ReferenceType, ResolveError, UidlError, ValidationError};

/// Result type alias for codegen operations.
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Errors that can occur during code generation.
#[derive(Error, Debug)]
pub enum CodegenError {
    /// Structurally invalid UIDL.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A reference, state mutation or prop call with no declaration.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// The target has no prefix configured for this kind of reference.
    #[error("No identifier prefix configured for {reference_type} reference '{id}'")]
    UnmappedReference {
        reference_type: ReferenceType,
        id: String,
    },

    /// The `link_after` graph of the chunks contains a cycle.
    #[error("Chunks cannot be ordered, cycle through: {}", cycle.join(" -> "))]
    ChunkOrdering { cycle: Vec<String> },

    /// A module-level declaration collides with an import bound earlier.
    #[error("'{name}' is already bound to an import")]
    NameTaken { name: String },

    /// A pipeline plugin failed.
    #[error("Plugin '{plugin}' failed: {source}")]
    Plugin {
        plugin: String,
        #[source]
        source: Box<CodegenError>,
    },

    /// Unknown component, style, project or publisher selector.
    #[error("Invalid {kind} '{value}'")]
    InvalidSelector { kind: &'static str, value: String },

    /// Template rendering error.
    #[error("Template error: {0}")]
    TemplateError(#[from] handlebars::RenderError),

    /// Invalid template.
    #[error("Invalid template: {0}")]
    InvalidTemplate(#[from] handlebars::TemplateError),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Publisher failure.
    #[error("Publishing with {publisher} failed: {message}")]
    Publish { publisher: String, message: String },

    /// Project generation was cancelled between components.
    #[error("Generation cancelled")]
    Cancelled,
}

impl From<UidlError> for CodegenError {
    fn from(err: UidlError) -> Self {
        match err {
            UidlError::Validation(e) => CodegenError::Validation(e),
            UidlError::Resolve(e) => CodegenError::Resolve(e),
        }
    }
}

impl CodegenError {
    /// The innermost error, looking through plugin wrappers.
    pub fn root_cause(&self) -> &CodegenError {
        match self {
            CodegenError::Plugin { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
