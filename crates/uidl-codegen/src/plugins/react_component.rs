//! The function component chunk.

use super::{component_name, COMPONENT_CHUNK, EXPORT_CHUNK, IMPORT_CHUNKS, TOKENS_CHUNK};
use crate::compiler::{compile_node, state_setter, static_expression, JsxOptions, TOKENS_IDENTIFIER};
use crate::error::{CodegenError, Result};
use crate::jsx::{Binding, Expression, ObjectProperty, Statement};
use crate::pipeline::{Chunk, GenerationStructure, Plugin};
use crate::targets::ComponentType;

/// Compiles the component root and declares it as a function component
/// with one `useState` hook per declared state entry.
#[derive(Debug)]
pub struct ReactComponentPlugin {
    component_type: ComponentType,
    options: JsxOptions,
}

impl ReactComponentPlugin {
    pub fn new(component_type: ComponentType, options: JsxOptions) -> Self {
        Self {
            component_type,
            options,
        }
    }
}

impl Plugin for ReactComponentPlugin {
    fn name(&self) -> &'static str {
        "react-component"
    }

    fn run(&self, mut structure: GenerationStructure) -> Result<GenerationStructure> {
        let (uidl, mut ctx) = structure.compile_parts();
        let name = component_name(uidl);
        if !ctx.dependencies.reserve(&name) {
            return Err(CodegenError::NameTaken { name });
        }

        let runtime = self
            .component_type
            .jsx_runtime()
            .ok_or_else(|| CodegenError::InvalidSelector {
                kind: "JSX component type",
                value: self.component_type.to_string(),
            })?;
        ctx.dependencies.register(runtime.pragma, runtime.runtime);

        let mut body = Vec::new();
        if !uidl.state_definitions.is_empty() {
            let use_state = ctx.dependencies.register("useState", runtime.hooks);
            for (state, definition) in &uidl.state_definitions {
                body.push(Statement::Const {
                    binding: Binding::ArrayPattern(vec![state.clone(), state_setter(state)]),
                    init: Expression::call(
                        Expression::identifier(use_state.as_str()),
                        vec![static_expression(&definition.default_value)],
                    ),
                });
            }
        }

        let root = compile_node(&uidl.node, &mut ctx, &self.options)?;
        body.push(Statement::Return(root.into_expression()));

        let tokens = (!uidl.design_tokens.is_empty()).then(|| {
            let properties = uidl
                .design_tokens
                .iter()
                .map(|(token, value)| ObjectProperty::new(token.as_str(), static_expression(value)))
                .collect();
            Statement::constant(TOKENS_IDENTIFIER, Expression::Object(properties))
        });

        let mut component_links = IMPORT_CHUNKS.to_vec();
        if let Some(tokens) = tokens {
            structure.push_chunk(Chunk::ast(TOKENS_CHUNK, vec![tokens]).link_after(&IMPORT_CHUNKS));
            component_links.push(TOKENS_CHUNK);
        }

        let component = Statement::constant(
            name.as_str(),
            Expression::arrow_block(vec!["props".to_string()], body),
        );
        structure.push_chunk(Chunk::ast(COMPONENT_CHUNK, vec![component]).link_after(&component_links));
        structure.push_chunk(
            Chunk::ast(
                EXPORT_CHUNK,
                vec![Statement::ExportDefault(Expression::identifier(name))],
            )
            .link_after(&[COMPONENT_CHUNK]),
        );

        Ok(structure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jsx::{CodePrinter, JsxPrinter};
    use crate::pipeline::StructureOptions;
    use uidl_core::builders::{component, element, static_node};
    use uidl_core::{Dependency, ElementNode, PropType, StateDefinition, StaticValue, UidlNode};

    fn print_chunk(structure: &GenerationStructure, name: &str) -> String {
        let statements = structure.chunk(name).and_then(Chunk::statements).unwrap();
        JsxPrinter::default().print(statements, &structure.arena)
    }

    #[test]
    fn test_component_with_state_and_tokens() {
        let uidl = component("toggle card", element("div", vec![static_node("Hi")]))
            .with_state("isOpen", StateDefinition::new(PropType::Boolean, false))
            .with_token("primary", StaticValue::from("#822cec"));
        let structure = GenerationStructure::new(uidl, StructureOptions::default());
        let plugin = ReactComponentPlugin::new(ComponentType::React, JsxOptions::default());
        let structure = plugin.run(structure).unwrap();

        assert_eq!(
            print_chunk(&structure, COMPONENT_CHUNK),
            "const ToggleCard = (props) => {\n  const [isOpen, setIsOpen] = useState(false);\n  return (\n    <div>Hi</div>\n  );\n};"
        );
        assert_eq!(
            print_chunk(&structure, TOKENS_CHUNK),
            "const TOKENS = {\n  primary: '#822cec',\n};"
        );
        assert_eq!(print_chunk(&structure, EXPORT_CHUNK), "export default ToggleCard;");
        assert!(structure.dependencies.contains("React"));
        assert!(structure.dependencies.contains("useState"));
    }

    #[test]
    fn test_dependency_named_like_component_is_renamed() {
        let button = ElementNode::new("Button").with_dependency(Dependency::local("../shared/button"));
        let uidl = component("Button", element("div", vec![UidlNode::Element(button)]));
        let structure = GenerationStructure::new(uidl, StructureOptions::default());
        let plugin = ReactComponentPlugin::new(ComponentType::React, JsxOptions::default());
        let structure = plugin.run(structure).unwrap();

        assert!(!structure.dependencies.contains("Button"));
        assert!(structure.dependencies.contains("SharedButtonButton"));
        let code = print_chunk(&structure, COMPONENT_CHUNK);
        assert!(code.starts_with("const Button = (props) => {"));
        assert!(code.contains("<SharedButtonButton></SharedButtonButton>"));
    }

    #[cfg(feature = "preact")]
    #[test]
    fn test_preact_runtime() {
        let uidl = component("Card", element("div", vec![]))
            .with_state("count", StateDefinition::new(PropType::Number, 0.0));
        let structure = GenerationStructure::new(uidl, StructureOptions::default());
        let plugin = ReactComponentPlugin::new(ComponentType::Preact, JsxOptions::default());
        let structure = plugin.run(structure).unwrap();

        assert_eq!(structure.dependencies.get("h").unwrap().path, "preact");
        assert_eq!(structure.dependencies.get("useState").unwrap().path, "preact/hooks");
    }
}
