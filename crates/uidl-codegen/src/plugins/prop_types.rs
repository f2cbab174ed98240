//! `propTypes` and `defaultProps` declarations.

use super::{component_name, COMPONENT_CHUNK, EXPORT_CHUNK, PROP_TYPES_CHUNK};
use crate::compiler::static_expression;
use crate::error::Result;
use crate::jsx::{Expression, ObjectProperty, Statement};
use crate::pipeline::{Chunk, GenerationStructure, Plugin};
use crate::targets::PROP_TYPES_VERSION;
use uidl_core::{Dependency, PropType};

/// Emits the prop declarations after the component and before its export.
#[derive(Debug, Default)]
pub struct PropTypesPlugin;

impl PropTypesPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl Plugin for PropTypesPlugin {
    fn name(&self) -> &'static str {
        "prop-types"
    }

    fn run(&self, mut structure: GenerationStructure) -> Result<GenerationStructure> {
        if structure.uidl.prop_definitions.is_empty() {
            return Ok(structure);
        }

        let prop_types = structure.dependencies.register(
            "PropTypes",
            Dependency::package("prop-types", Some(PROP_TYPES_VERSION)),
        );
        let name = component_name(&structure.uidl);

        let mut types = Vec::new();
        let mut defaults = Vec::new();
        for (prop, definition) in &structure.uidl.prop_definitions {
            let mut validator = Expression::member(
                Expression::identifier(prop_types.as_str()),
                validator_name(definition.prop_type),
            );
            if definition.required {
                validator = Expression::member(validator, "isRequired");
            }
            types.push(ObjectProperty::new(prop.as_str(), validator));

            if let Some(default) = &definition.default_value {
                defaults.push(ObjectProperty::new(prop.as_str(), static_expression(default)));
            }
        }

        let mut statements = vec![Statement::Assignment {
            target: Expression::member(Expression::identifier(name.as_str()), "propTypes"),
            value: Expression::Object(types),
        }];
        if !defaults.is_empty() {
            statements.push(Statement::Assignment {
                target: Expression::member(Expression::identifier(name.as_str()), "defaultProps"),
                value: Expression::Object(defaults),
            });
        }

        structure.push_chunk(Chunk::ast(PROP_TYPES_CHUNK, statements).link_after(&[COMPONENT_CHUNK]));
        if let Some(export) = structure.chunk_mut(EXPORT_CHUNK) {
            export.link_after.push(PROP_TYPES_CHUNK.to_string());
        }
        Ok(structure)
    }
}

fn validator_name(prop_type: PropType) -> &'static str {
    match prop_type {
        PropType::String => "string",
        PropType::Number => "number",
        PropType::Boolean => "bool",
        PropType::Array => "array",
        PropType::Object => "object",
        PropType::Func => "func",
        PropType::Children => "node",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::JsxOptions;
    use crate::jsx::{CodePrinter, JsxPrinter};
    use crate::pipeline::{order_chunks, StructureOptions};
    use crate::plugins::ReactComponentPlugin;
    use crate::targets::ComponentType;
    use uidl_core::builders::{component, element};
    use uidl_core::PropDefinition;

    #[test]
    fn test_declarations_precede_export() {
        let uidl = component("Badge", element("span", vec![]))
            .with_prop("label", PropDefinition::new(PropType::String).required())
            .with_prop("count", PropDefinition::new(PropType::Number).with_default(0.0));

        let mut structure = GenerationStructure::new(uidl, StructureOptions::default());
        structure = ReactComponentPlugin::new(ComponentType::React, JsxOptions::default())
            .run(structure)
            .unwrap();
        structure = PropTypesPlugin.run(structure).unwrap();

        let statements = structure.chunk(PROP_TYPES_CHUNK).and_then(Chunk::statements).unwrap();
        assert_eq!(
            JsxPrinter::default().print(statements, &structure.arena),
            "Badge.propTypes = {\n  label: PropTypes.string.isRequired,\n  count: PropTypes.number,\n};\n\nBadge.defaultProps = {\n  count: 0,\n};"
        );
        assert_eq!(
            structure.dependencies.get("PropTypes").unwrap().version.as_deref(),
            Some(PROP_TYPES_VERSION)
        );

        let ordered = order_chunks(structure.chunks).unwrap();
        let names: Vec<_> = ordered.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, [COMPONENT_CHUNK, PROP_TYPES_CHUNK, EXPORT_CHUNK]);
    }
}
