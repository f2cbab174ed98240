//! The chunk pipeline.
//!
//! A generation run threads one [`GenerationStructure`] through an ordered
//! list of plugins. Each plugin takes the structure by value and returns it,
//! so the pipeline is a left fold; nothing is shared between runs.

mod chunk;
mod ordering;

pub use chunk::{Chunk, ChunkContent, ChunkType, FileType};
pub use ordering::order_chunks;

use crate::compiler::{CompileContext, NodesLookup};
use crate::dependencies::DependencyTable;
use crate::error::{CodegenError, Result};
use crate::jsx::JsxArena;
use tracing::debug;
use uidl_core::ComponentUidl;

/// Settings a plugin may need about the file being generated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructureOptions {
    /// Base name of the generated files, without extension.
    pub file_name: String,
}

/// Everything one generation run produces and mutates.
#[derive(Debug, Clone)]
pub struct GenerationStructure {
    pub uidl: ComponentUidl,
    pub chunks: Vec<Chunk>,
    pub dependencies: DependencyTable,
    pub arena: JsxArena,
    pub nodes_lookup: NodesLookup,
    pub options: StructureOptions,
}

impl GenerationStructure {
    pub fn new(uidl: ComponentUidl, options: StructureOptions) -> Self {
        Self {
            uidl,
            chunks: Vec::new(),
            dependencies: DependencyTable::new(),
            arena: JsxArena::new(),
            nodes_lookup: NodesLookup::new(),
            options,
        }
    }

    /// Split borrows of the state the node compiler writes to, alongside the
    /// UIDL being compiled.
    pub fn compile_parts(&mut self) -> (&ComponentUidl, CompileContext<'_>) {
        let ctx = CompileContext {
            dependencies: &mut self.dependencies,
            arena: &mut self.arena,
            nodes_lookup: &mut self.nodes_lookup,
        };
        (&self.uidl, ctx)
    }

    pub fn chunk(&self, name: &str) -> Option<&Chunk> {
        self.chunks.iter().find(|chunk| chunk.name == name)
    }

    pub fn chunk_mut(&mut self, name: &str) -> Option<&mut Chunk> {
        self.chunks.iter_mut().find(|chunk| chunk.name == name)
    }

    /// Add a chunk, replacing one with the same name.
    pub fn push_chunk(&mut self, chunk: Chunk) {
        match self.chunk_mut(&chunk.name) {
            Some(existing) => *existing = chunk,
            None => self.chunks.push(chunk),
        }
    }
}

/// A pipeline stage.
pub trait Plugin: Send + Sync {
    fn name(&self) -> &'static str;

    fn run(&self, structure: GenerationStructure) -> Result<GenerationStructure>;
}

/// Run the plugins in order, then order the chunks over `link_after`.
///
/// The first failing plugin aborts the run; its error is wrapped with the
/// plugin name.
pub fn run_pipeline(
    initial: GenerationStructure,
    plugins: &[Box<dyn Plugin>],
) -> Result<GenerationStructure> {
    let mut structure = plugins.iter().try_fold(initial, |structure, plugin| {
        debug!(plugin = plugin.name(), component = %structure.uidl.name, "Running plugin");
        plugin
            .run(structure)
            .map_err(|source| CodegenError::Plugin {
                plugin: plugin.name().to_string(),
                source: Box::new(source),
            })
    })?;

    structure.chunks = order_chunks(std::mem::take(&mut structure.chunks))?;
    Ok(structure)
}
