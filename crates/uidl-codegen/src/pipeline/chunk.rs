//! Named fragments of generated output.

use crate::jsx::Statement;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkType {
    Ast,
    Markup,
    PlainText,
}

/// The file a chunk ends up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FileType {
    Js,
    Css,
    Html,
    Json,
    /// A single-file component holding template and script.
    #[cfg(feature = "vue")]
    Vue,
}

impl FileType {
    pub fn extension(self) -> &'static str {
        match self {
            FileType::Js => "js",
            FileType::Css => "css",
            FileType::Html => "html",
            FileType::Json => "json",
            #[cfg(feature = "vue")]
            FileType::Vue => "vue",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChunkContent {
    Ast(Vec<Statement>),
    Text(String),
}

/// A named, typed fragment produced by one pipeline stage.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    pub chunk_type: ChunkType,
    pub file_type: FileType,
    pub name: String,
    pub content: ChunkContent,
    /// Chunks this one must be emitted after.
    pub link_after: Vec<String>,
}

impl Chunk {
    /// A JavaScript chunk.
    pub fn ast(name: impl Into<String>, statements: Vec<Statement>) -> Self {
        Self {
            chunk_type: ChunkType::Ast,
            file_type: FileType::Js,
            name: name.into(),
            content: ChunkContent::Ast(statements),
            link_after: Vec::new(),
        }
    }

    pub fn text(name: impl Into<String>, file_type: FileType, text: impl Into<String>) -> Self {
        Self {
            chunk_type: ChunkType::PlainText,
            file_type,
            name: name.into(),
            content: ChunkContent::Text(text.into()),
            link_after: Vec::new(),
        }
    }

    pub fn markup(name: impl Into<String>, file_type: FileType, markup: impl Into<String>) -> Self {
        Self {
            chunk_type: ChunkType::Markup,
            ..Self::text(name, file_type, markup)
        }
    }

    pub fn link_after(mut self, names: &[&str]) -> Self {
        self.link_after
            .extend(names.iter().map(|name| name.to_string()));
        self
    }

    pub fn statements(&self) -> Option<&[Statement]> {
        match &self.content {
            ChunkContent::Ast(statements) => Some(statements),
            ChunkContent::Text(_) => None,
        }
    }
}
