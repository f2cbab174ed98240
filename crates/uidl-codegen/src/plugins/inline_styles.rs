//! Element styles as `style={{...}}` attributes.

use super::visit_elements;
use crate::compiler::{reference_expression, static_expression, JsxOptions};
use crate::error::Result;
use crate::jsx::{Expression, JsxAttributeValue, ObjectProperty};
use crate::pipeline::{GenerationStructure, Plugin};
use convert_case::{Case, Casing};
use indexmap::IndexMap;
use uidl_core::StyleValue;

#[derive(Debug)]
pub struct InlineStylesPlugin {
    options: JsxOptions,
}

impl InlineStylesPlugin {
    pub fn new(options: JsxOptions) -> Self {
        Self { options }
    }
}

impl Plugin for InlineStylesPlugin {
    fn name(&self) -> &'static str {
        "inline-styles"
    }

    fn run(&self, mut structure: GenerationStructure) -> Result<GenerationStructure> {
        let mut styled: Vec<(String, IndexMap<String, StyleValue>)> = Vec::new();
        visit_elements(&structure.uidl.node, &mut |element| {
            if !element.style.is_empty() && !element.key.is_empty() {
                styled.push((element.key.clone(), element.style.clone()));
            }
        });

        for (key, style) in styled {
            let properties = style
                .iter()
                .map(|(property, value)| {
                    let value = match value {
                        StyleValue::Static(value) => static_expression(value),
                        StyleValue::Dynamic(reference) => reference_expression(reference, &self.options)?,
                    };
                    Ok(ObjectProperty::new(property.to_case(Case::Camel), value))
                })
                .collect::<Result<Vec<_>>>()?;

            let element = structure
                .nodes_lookup
                .get(&key)
                .copied()
                .and_then(|id| structure.arena.get_mut(id));
            if let Some(element) = element {
                element.set_attribute("style", JsxAttributeValue::Expression(Expression::Object(properties)));
            }
        }

        Ok(structure)
    }
}
