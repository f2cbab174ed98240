//! Code generation from UIDL components and projects to React and Preact,
//! and from components to Vue single-file components.
//!
//! A component is validated and scope-resolved, then threaded through a
//! chunk pipeline: an ordered list of plugins that compile the UIDL tree to
//! JSX, emit named chunks of output and register the imports they need in a
//! shared dependency table. The ordered chunks are printed and post-processed
//! into files.
//!
//! # Features
//!
//! React is always available.
//!
//! - `preact` - the `preact` component type
//! - `vue` - the `vue` component type, for components only
//! - `parallel` - compile the components of a project on a rayon pool
//!
//! # Example
//!
//! ```ignore
//! use uidl_codegen::{ComponentGenerator, GeneratorOptions};
//!
//! let generator = ComponentGenerator::new(GeneratorOptions::default());
//! let compiled = generator.generate_component_json(source)?;
//! for file in &compiled.files {
//!     println!("{}:\n{}", file.path, file.content);
//! }
//! ```

pub mod compiler;
pub mod dependencies;
pub mod error;
pub mod generators;
pub mod jsx;
pub mod pipeline;
pub mod plugins;
pub mod postprocess;
pub mod targets;

pub use compiler::{compile_node, CompileContext, JsxOptions, NodesLookup, SlotHandling, TargetNode};
pub use dependencies::DependencyTable;
pub use error::{CodegenError, Result};
pub use generators::{
    pack_project, CompiledComponent, ComponentGenerator, GeneratedFile, GeneratedProject,
    GeneratorOptions, PackOptions, ProjectGenerator, PublishOutcome, Publisher, PublisherRegistry,
    TemplateEngine,
};
pub use jsx::{CodePrinter, JsxPrinter};
pub use pipeline::{run_pipeline, Chunk, ChunkType, FileType, GenerationStructure, Plugin};
pub use postprocess::{PostProcessor, TrailingNewline, UnicodeUnescape};
pub use targets::{ComponentType, JsxRuntime, ProjectType, PublisherType, StyleVariation};
