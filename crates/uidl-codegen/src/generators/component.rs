//! Component generation: one UIDL component to its files.

use super::{CompiledComponent, GeneratedFile, GeneratorOptions};
use crate::compiler::{JsxOptions, TargetNode};
use crate::error::Result;
use crate::jsx::{CodePrinter, Expression, JsxArena, JsxAttributeValue, JsxElement, JsxPrinter, ObjectProperty};
use crate::pipeline::{run_pipeline, Chunk, ChunkContent, FileType, GenerationStructure, Plugin, StructureOptions};
use crate::plugins::{
    component_file_name, CssModulesPlugin, ImportStatementsPlugin, InlineStylesPlugin,
    PropTypesPlugin, ReactComponentPlugin, UidlNormalizer,
};
#[cfg(feature = "vue")]
use crate::{pipeline::ChunkType, plugins::VueComponentPlugin};
use crate::postprocess::{PostProcessor, TrailingNewline, UnicodeUnescape};
use crate::targets::{ComponentType, StyleVariation};
use tracing::{debug, instrument};
use uidl_core::{validate_component, ComponentUidl};
use uidl_resolver::resolve_component;

/// Raw markup goes into a `span` through `dangerouslySetInnerHTML`.
fn inject_html(markup: &str, arena: &mut JsxArena) -> TargetNode {
    let html = Expression::Object(vec![ObjectProperty::new(
        "__html",
        Expression::String(markup.to_string()),
    )]);
    let span = JsxElement::new("span")
        .with_attribute("dangerouslySetInnerHTML", JsxAttributeValue::Expression(html))
        .self_closing();
    TargetNode::Element(arena.alloc(span))
}

/// Generates React or Preact function components, or Vue single-file
/// components.
///
/// The plugin list is fixed at construction from the options; the printer
/// and post-processors can be swapped before the first run.
pub struct ComponentGenerator {
    options: GeneratorOptions,
    plugins: Vec<Box<dyn Plugin>>,
    printer: Box<dyn CodePrinter>,
    post_processors: Vec<Box<dyn PostProcessor>>,
}

/// Normalize, compile to JSX, style, then emit imports.
fn jsx_plugins(options: &GeneratorOptions) -> Vec<Box<dyn Plugin>> {
    let jsx = JsxOptions {
        dom_html_injection: Some(inject_html),
        slot_handling: options.slot_handling,
        ..JsxOptions::default()
    };

    let mut plugins: Vec<Box<dyn Plugin>> = vec![
        Box::new(UidlNormalizer::new()),
        Box::new(ReactComponentPlugin::new(options.component_type, jsx.clone())),
    ];
    match options.style_variation {
        StyleVariation::InlineStyles => plugins.push(Box::new(InlineStylesPlugin::new(jsx))),
        StyleVariation::CssModules => plugins.push(Box::new(CssModulesPlugin::new(
            options.component_type.class_attribute(),
            jsx,
        ))),
    }
    if options.component_type == ComponentType::React {
        plugins.push(Box::new(PropTypesPlugin::new()));
    }
    plugins.push(Box::new(ImportStatementsPlugin::new()));
    plugins
}

/// Vue keeps styles in the template, so the style variation does not apply.
#[cfg(feature = "vue")]
fn vue_plugins() -> Vec<Box<dyn Plugin>> {
    vec![
        Box::new(UidlNormalizer::new()),
        Box::new(VueComponentPlugin::new()),
        Box::new(ImportStatementsPlugin::new()),
    ]
}

#[cfg(feature = "vue")]
fn indent(text: &str) -> String {
    text.lines()
        .map(|line| if line.is_empty() { String::new() } else { format!("  {line}") })
        .collect::<Vec<_>>()
        .join("\n")
}

impl ComponentGenerator {
    pub fn new(options: GeneratorOptions) -> Self {
        let plugins = match options.component_type {
            #[cfg(feature = "vue")]
            ComponentType::Vue => vue_plugins(),
            _ => jsx_plugins(&options),
        };

        let mut post_processors: Vec<Box<dyn PostProcessor>> = Vec::new();
        if !options.ascii_only {
            post_processors.push(Box::new(UnicodeUnescape));
        }
        post_processors.push(Box::new(TrailingNewline));

        Self {
            options,
            plugins,
            printer: Box::new(JsxPrinter::new()),
            post_processors,
        }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    pub fn with_printer(mut self, printer: impl CodePrinter + 'static) -> Self {
        self.printer = Box::new(printer);
        self
    }

    /// Run an extra post-processor after the built-in ones.
    pub fn with_post_processor(mut self, processor: impl PostProcessor + 'static) -> Self {
        self.post_processors.push(Box::new(processor));
        self
    }

    /// Add a plugin. It runs after the built-in plugins but before imports
    /// are emitted, so dependencies it registers are imported.
    pub fn with_plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        let at = self.plugins.len().saturating_sub(1);
        self.plugins.insert(at, Box::new(plugin));
        self
    }

    /// Generate the files of a component.
    #[instrument(skip_all, fields(component = %uidl.name))]
    pub fn generate_component(&self, uidl: &ComponentUidl) -> Result<CompiledComponent> {
        validate_component(uidl)?;
        resolve_component(uidl)?;
        let file_name = self
            .options
            .file_name
            .clone()
            .unwrap_or_else(|| component_file_name(uidl));
        self.compile(uidl.clone(), &file_name)
    }

    /// Parse, validate and generate a component from UIDL JSON.
    pub fn generate_component_json(&self, source: &str) -> Result<CompiledComponent> {
        let uidl = uidl_core::parse_component(source)?;
        self.generate_component(&uidl)
    }

    /// Run the pipeline on an already checked component.
    pub(crate) fn compile(&self, uidl: ComponentUidl, file_name: &str) -> Result<CompiledComponent> {
        let structure = GenerationStructure::new(
            uidl,
            StructureOptions {
                file_name: file_name.to_string(),
            },
        );
        let structure = run_pipeline(structure, &self.plugins)?;
        let files = match self.options.component_type {
            #[cfg(feature = "vue")]
            ComponentType::Vue => self.emit_single_file(&structure.chunks, &structure.arena, file_name),
            _ => self.emit_files(&structure.chunks, &structure.arena, file_name),
        };
        debug!(files = files.len(), dependencies = structure.dependencies.len(), "Generated component");

        Ok(CompiledComponent {
            files,
            dependencies: structure.dependencies,
        })
    }

    /// Print and post-process ordered chunks, one file per file type with
    /// JavaScript first.
    pub(crate) fn emit_files(&self, chunks: &[Chunk], arena: &JsxArena, file_name: &str) -> Vec<GeneratedFile> {
        let mut groups: Vec<(FileType, Vec<String>)> = Vec::new();
        for chunk in chunks {
            let text = match &chunk.content {
                ChunkContent::Ast(statements) => self.printer.print(statements, arena),
                ChunkContent::Text(text) => text.trim_end().to_string(),
            };
            if text.is_empty() {
                continue;
            }
            match groups.iter_mut().find(|(file_type, _)| *file_type == chunk.file_type) {
                Some((_, texts)) => texts.push(text),
                None => groups.push((chunk.file_type, vec![text])),
            }
        }

        groups.sort_by_key(|(file_type, _)| *file_type);
        groups
            .into_iter()
            .map(|(file_type, texts)| {
                let content = self
                    .post_processors
                    .iter()
                    .fold(texts.join("\n\n"), |code, processor| processor.process(file_type, code));
                GeneratedFile {
                    path: format!("{}.{}", file_name, file_type.extension()),
                    content,
                    file_type,
                }
            })
            .collect()
    }

    /// One `.vue` file: the markup chunks inside `<template>`, everything
    /// else inside `<script>`. Each part is post-processed as the file type
    /// of its chunks before assembly.
    #[cfg(feature = "vue")]
    fn emit_single_file(&self, chunks: &[Chunk], arena: &JsxArena, file_name: &str) -> Vec<GeneratedFile> {
        let mut template = Vec::new();
        let mut script = Vec::new();
        for chunk in chunks {
            let text = match &chunk.content {
                ChunkContent::Ast(statements) => self.printer.print(statements, arena),
                ChunkContent::Text(text) => text.trim_end().to_string(),
            };
            if text.is_empty() {
                continue;
            }
            match chunk.chunk_type {
                ChunkType::Markup => template.push(text),
                _ => script.push(text),
            }
        }

        let process = |file_type: FileType, parts: Vec<String>| {
            self.post_processors
                .iter()
                .fold(parts.join("\n\n"), |code, processor| processor.process(file_type, code))
        };
        let template = process(FileType::Html, template);
        let script = process(FileType::Js, script);
        let content = format!(
            "<template>\n{}\n</template>\n\n<script>\n{}\n</script>\n",
            indent(template.trim_end()),
            script.trim_end()
        );

        vec![GeneratedFile {
            path: format!("{}.{}", file_name, FileType::Vue.extension()),
            content,
            file_type: FileType::Vue,
        }]
    }
}

impl Default for ComponentGenerator {
    fn default() -> Self {
        Self::new(GeneratorOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodegenError;
    use uidl_core::builders::{component, element, raw_node, static_node};
    use uidl_core::{PropDefinition, PropType, StateDefinition};

    #[test]
    fn test_generates_single_js_file() {
        let uidl = component("Greeting", element("p", vec![static_node("Hello")]));
        let compiled = ComponentGenerator::default().generate_component(&uidl).unwrap();

        assert_eq!(compiled.files.len(), 1);
        assert_eq!(compiled.files[0].path, "greeting.js");
        assert_eq!(
            compiled.code().unwrap(),
            "import React from 'react';\n\nconst Greeting = (props) => {\n  return (\n    <p>Hello</p>\n  );\n};\n\nexport default Greeting;\n"
        );
        assert!(compiled.dependencies.contains("React"));
    }

    #[cfg(feature = "preact")]
    #[test]
    fn test_preact_imports_h() {
        let uidl = component("Greeting", element("p", vec![static_node("Hello")]));
        let generator = ComponentGenerator::new(GeneratorOptions {
            component_type: ComponentType::Preact,
            ..GeneratorOptions::default()
        });
        let code = generator.generate_component(&uidl).unwrap().files.remove(0).content;
        assert!(code.starts_with("import { h } from 'preact';"));
    }

    #[test]
    fn test_raw_markup_is_injected() {
        let uidl = component("Note", element("div", vec![raw_node("<b>hi</b>")]));
        let code = ComponentGenerator::default().generate_component(&uidl).unwrap().files.remove(0).content;
        assert!(code.contains("<span dangerouslySetInnerHTML={{ __html: '<b>hi</b>' }} />"));
    }

    #[test]
    fn test_unicode_output() {
        let uidl = component("Hello", element("p", vec![static_node("你好")]))
            .with_state("title", StateDefinition::new(PropType::String, "你好"));
        let code = ComponentGenerator::default().generate_component(&uidl).unwrap().files.remove(0).content;
        assert!(code.contains("useState('你好')"));
        assert!(code.contains("<p>你好</p>"));

        let ascii = ComponentGenerator::new(GeneratorOptions {
            ascii_only: true,
            ..GeneratorOptions::default()
        });
        let code = ascii.generate_component(&uidl).unwrap().files.remove(0).content;
        assert!(code.contains(r"useState('\u4F60\u597D')"));
    }

    #[test]
    fn test_file_name_override() {
        let uidl = component("Greeting", element("p", vec![]));
        let generator = ComponentGenerator::new(GeneratorOptions {
            file_name: Some("index".into()),
            ..GeneratorOptions::default()
        });
        assert_eq!(generator.generate_component(&uidl).unwrap().files[0].path, "index.js");
    }

    #[cfg(feature = "preact")]
    #[test]
    fn test_prop_types_only_for_react() {
        let uidl = component("Badge", element("span", vec![]))
            .with_prop("label", PropDefinition::new(PropType::String));
        let react = ComponentGenerator::default().generate_component(&uidl).unwrap();
        assert!(react.dependencies.contains("PropTypes"));

        let preact = ComponentGenerator::new(GeneratorOptions {
            component_type: ComponentType::Preact,
            ..GeneratorOptions::default()
        })
        .generate_component(&uidl)
        .unwrap();
        assert!(!preact.dependencies.contains("PropTypes"));
    }

    #[cfg(feature = "vue")]
    fn vue() -> ComponentGenerator {
        ComponentGenerator::new(GeneratorOptions {
            component_type: ComponentType::Vue,
            ..GeneratorOptions::default()
        })
    }

    #[cfg(feature = "vue")]
    #[test]
    fn test_vue_single_file_component() {
        let uidl = component("Greeting", element("p", vec![static_node("Hello")]));
        let compiled = vue().generate_component(&uidl).unwrap();

        assert_eq!(compiled.files.len(), 1);
        assert_eq!(compiled.files[0].path, "greeting.vue");
        assert_eq!(compiled.files[0].file_type, FileType::Vue);
        assert_eq!(
            compiled.files[0].content,
            "<template>\n  <p>Hello</p>\n</template>\n\n<script>\nexport default {\n  name: 'Greeting',\n};\n</script>\n"
        );
        assert!(compiled.dependencies.is_empty());
    }

    #[cfg(feature = "vue")]
    #[test]
    fn test_vue_imports_precede_options() {
        let button = uidl_core::ElementNode::new("Button").with_dependency(uidl_core::Dependency::local("./button"));
        let uidl = component("Toolbar", element("div", vec![uidl_core::UidlNode::Element(button)]));
        let content = vue().generate_component(&uidl).unwrap().files.remove(0).content;

        assert!(content.contains("<template>\n  <div>\n    <Button></Button>\n  </div>\n</template>"));
        assert!(content.contains("<script>\nimport Button from './button';\n\nexport default {"));
        assert!(content.contains("  components: {\n    Button: Button,\n  },"));
    }

    #[cfg(feature = "vue")]
    #[test]
    fn test_vue_template_text_is_not_unescaped() {
        let uidl = component("Hello", element("p", vec![static_node(r"你好 C:\u0041")]))
            .with_state("title", StateDefinition::new(PropType::String, "你好"));
        let content = vue().generate_component(&uidl).unwrap().files.remove(0).content;

        assert!(content.contains(r"<p>你好 C:\u0041</p>"));
        assert!(content.contains("data: () => ({ title: '你好' }),"));
    }

    struct Banner;

    impl Plugin for Banner {
        fn name(&self) -> &'static str {
            "banner"
        }

        fn run(&self, mut structure: GenerationStructure) -> Result<GenerationStructure> {
            structure.push_chunk(Chunk::text("banner", FileType::Js, "/* generated */"));
            Ok(structure)
        }
    }

    #[test]
    fn test_custom_plugin_runs() {
        let uidl = component("Greeting", element("p", vec![]));
        let generator = ComponentGenerator::default().with_plugin(Banner);
        let code = generator.generate_component(&uidl).unwrap().files.remove(0).content;
        assert!(code.contains("/* generated */"));
    }

    #[test]
    fn test_invalid_root_rejected() {
        let uidl = component("Broken", static_node("text"));
        assert!(matches!(
            ComponentGenerator::default().generate_component(&uidl),
            Err(CodegenError::Validation(_))
        ));
    }
}
