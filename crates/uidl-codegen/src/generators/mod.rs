//! Generator façade: components, projects and publishing.

mod component;
mod project;
mod publish;
mod templates;

pub use component::ComponentGenerator;
pub use project::ProjectGenerator;
pub use publish::{pack_project, PackOptions, PublishOutcome, Publisher, PublisherRegistry};
pub use templates::TemplateEngine;

use crate::compiler::SlotHandling;
use crate::dependencies::DependencyTable;
use crate::pipeline::FileType;
use crate::targets::{ComponentType, StyleVariation};
use serde::{Deserialize, Serialize};

/// Options for component and project generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratorOptions {
    pub component_type: ComponentType,
    pub style_variation: StyleVariation,
    /// Keep non-ASCII characters in string literals escaped as `\uXXXX`.
    pub ascii_only: bool,
    pub slot_handling: SlotHandling,
    /// Base name of the generated files. Defaults to the kebab-cased
    /// component name.
    pub file_name: Option<String>,
}

/// A generated file.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedFile {
    /// File path relative to the output root.
    pub path: String,
    pub content: String,
    pub file_type: FileType,
}

/// The output of one component generation.
#[derive(Debug, Clone)]
pub struct CompiledComponent {
    /// One file per file type, JavaScript first.
    pub files: Vec<GeneratedFile>,
    /// Everything the generated code imports.
    pub dependencies: DependencyTable,
}

impl CompiledComponent {
    pub fn file(&self, file_type: FileType) -> Option<&GeneratedFile> {
        self.files.iter().find(|file| file.file_type == file_type)
    }

    /// The JavaScript source, if any.
    pub fn code(&self) -> Option<&str> {
        self.file(FileType::Js).map(|file| file.content.as_str())
    }
}

/// Generated project output.
#[derive(Debug, Clone)]
pub struct GeneratedProject {
    pub name: String,
    pub files: Vec<GeneratedFile>,
    /// Merged imports of every generated file.
    pub dependencies: DependencyTable,
}

impl GeneratedProject {
    pub fn file(&self, path: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|file| file.path == path)
    }
}
