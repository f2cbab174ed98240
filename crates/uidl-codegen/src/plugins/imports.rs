//! Import statements for everything in the dependency table.

use super::{IMPORT_LIB_CHUNK, IMPORT_LOCAL_CHUNK, IMPORT_PACK_CHUNK};
use crate::error::Result;
use crate::jsx::{ImportDeclaration, ImportSpecifier, Statement};
use crate::pipeline::{Chunk, GenerationStructure, Plugin};
use uidl_core::{Dependency, DependencyType};

/// Runs last: turns the dependency table into one import chunk per
/// dependency type, with one declaration per source path.
#[derive(Debug, Default)]
pub struct ImportStatementsPlugin;

impl ImportStatementsPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl Plugin for ImportStatementsPlugin {
    fn name(&self) -> &'static str {
        "import-statements"
    }

    fn run(&self, mut structure: GenerationStructure) -> Result<GenerationStructure> {
        let mut libraries = Vec::new();
        let mut packs = Vec::new();
        let mut locals = Vec::new();

        for (bound, dependency) in structure.dependencies.iter() {
            let group = match dependency.dependency_type {
                DependencyType::Package => &mut libraries,
                DependencyType::Custom => &mut packs,
                DependencyType::Local => &mut locals,
            };
            add_import(group, bound, dependency);
        }

        let groups = [
            (IMPORT_LIB_CHUNK, libraries, &[][..]),
            (IMPORT_PACK_CHUNK, packs, &[IMPORT_LIB_CHUNK][..]),
            (IMPORT_LOCAL_CHUNK, locals, &[IMPORT_LIB_CHUNK, IMPORT_PACK_CHUNK][..]),
        ];
        for (name, declarations, after) in groups {
            if declarations.is_empty() {
                continue;
            }
            let statements = declarations.into_iter().map(Statement::Import).collect();
            structure.push_chunk(Chunk::ast(name, statements).link_after(after));
        }

        Ok(structure)
    }
}

fn add_import(declarations: &mut Vec<ImportDeclaration>, bound: &str, dependency: &Dependency) {
    if dependency.meta.named {
        let imported = dependency
            .meta
            .import_alias
            .as_deref()
            .or(dependency.meta.original_name.as_deref())
            .unwrap_or(bound);
        let specifier = ImportSpecifier {
            imported: imported.to_string(),
            local: bound.to_string(),
        };
        match declarations.iter_mut().find(|d| d.source == dependency.path) {
            Some(declaration) => declaration.named.push(specifier),
            None => declarations.push(ImportDeclaration {
                source: dependency.path.clone(),
                default: None,
                named: vec![specifier],
            }),
        }
    } else {
        let free = declarations
            .iter_mut()
            .find(|d| d.source == dependency.path && d.default.is_none());
        match free {
            Some(declaration) => declaration.default = Some(bound.to_string()),
            None => declarations.push(ImportDeclaration {
                source: dependency.path.clone(),
                default: Some(bound.to_string()),
                named: Vec::new(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jsx::{CodePrinter, JsxPrinter};
    use crate::pipeline::StructureOptions;
    use uidl_core::builders::{component, element};

    fn print(structure: &GenerationStructure, chunk: &str) -> String {
        let statements = structure.chunk(chunk).and_then(Chunk::statements).unwrap();
        JsxPrinter::default().print(statements, &structure.arena)
    }

    #[test]
    fn test_grouped_imports() {
        let mut structure = GenerationStructure::new(
            component("Page", element("div", vec![])),
            StructureOptions::default(),
        );
        let table = &mut structure.dependencies;
        table.register("React", Dependency::package("react", Some("^17.0.2")));
        table.register("useState", Dependency::package("react", Some("^17.0.2")).named());
        table.register("Button", Dependency::local("./button"));
        table.register("Button", Dependency::local("../components/fancy"));
        table.register("Button", Dependency::package("antd", None).named());

        let structure = ImportStatementsPlugin.run(structure).unwrap();
        assert_eq!(
            print(&structure, IMPORT_LIB_CHUNK),
            "import React, { useState } from 'react';\nimport { Button as AntdButton } from 'antd';"
        );
        assert_eq!(
            print(&structure, IMPORT_LOCAL_CHUNK),
            "import Button from './button';\nimport ComponentsFancyButton from '../components/fancy';"
        );
        assert!(structure.chunk(IMPORT_PACK_CHUNK).is_none());
    }
}
