//! Element styles as a CSS module.

use super::{visit_elements, CSS_CHUNK};
use crate::compiler::{reference_expression, JsxOptions};
use crate::error::Result;
use crate::jsx::{Expression, JsxAttributeValue, ObjectProperty};
use crate::pipeline::{Chunk, FileType, GenerationStructure, Plugin};
use convert_case::{Case, Casing};
use indexmap::IndexMap;
use std::collections::HashSet;
use std::fmt::Write;
use tracing::trace;
use uidl_core::{format_number, Dependency, StaticValue, StyleValue};

/// CSS properties that take plain numbers.
const UNITLESS_PROPERTIES: &[&str] = &[
    "flex",
    "flexGrow",
    "flexShrink",
    "fontWeight",
    "lineHeight",
    "opacity",
    "order",
    "zIndex",
];

/// Moves static style declarations into a `.css` file and points each
/// element at its class through the nodes lookup. Dynamic declarations
/// cannot live in a stylesheet and stay inline.
#[derive(Debug)]
pub struct CssModulesPlugin {
    class_attribute: &'static str,
    options: JsxOptions,
}

impl CssModulesPlugin {
    pub fn new(class_attribute: &'static str, options: JsxOptions) -> Self {
        Self {
            class_attribute,
            options,
        }
    }
}

impl Plugin for CssModulesPlugin {
    fn name(&self) -> &'static str {
        "css-modules"
    }

    fn run(&self, mut structure: GenerationStructure) -> Result<GenerationStructure> {
        let mut styled: Vec<(String, IndexMap<String, StyleValue>)> = Vec::new();
        visit_elements(&structure.uidl.node, &mut |element| {
            if !element.style.is_empty() && !element.key.is_empty() {
                styled.push((element.key.clone(), element.style.clone()));
            }
        });
        if styled.is_empty() {
            return Ok(structure);
        }

        let mut css = String::new();
        let mut classes = Vec::new();
        let mut taken = HashSet::new();
        for (key, style) in &styled {
            let class_name = unique_class_name(key, &mut taken);
            let mut declarations = String::new();
            let mut inline = Vec::new();
            for (property, value) in style {
                match value {
                    StyleValue::Static(value) => {
                        let _ = writeln!(
                            declarations,
                            "  {}: {};",
                            property.to_case(Case::Kebab),
                            css_value(property, value)
                        );
                    }
                    StyleValue::Dynamic(reference) => inline.push(ObjectProperty::new(
                        property.to_case(Case::Camel),
                        reference_expression(reference, &self.options)?,
                    )),
                }
            }
            if !declarations.is_empty() {
                if !css.is_empty() {
                    css.push('\n');
                }
                let _ = write!(css, ".{class_name} {{\n{declarations}}}\n");
            }
            classes.push((key, (!declarations.is_empty()).then_some(class_name), inline));
        }

        let styles = if css.is_empty() {
            None
        } else {
            let path = format!("./{}.css", structure.options.file_name);
            Some(structure.dependencies.register("styles", Dependency::local(path)))
        };

        for (key, class_name, inline) in classes {
            let Some(&id) = structure.nodes_lookup.get(key.as_str()) else {
                trace!(%key, "Styled element was not compiled");
                continue;
            };
            let Some(element) = structure.arena.get_mut(id) else {
                continue;
            };
            if let (Some(styles), Some(class_name)) = (&styles, class_name) {
                element.set_attribute(
                    self.class_attribute,
                    JsxAttributeValue::Expression(Expression::member(
                        Expression::identifier(styles.as_str()),
                        class_name,
                    )),
                );
            }
            if !inline.is_empty() {
                element.set_attribute("style", JsxAttributeValue::Expression(Expression::Object(inline)));
            }
        }

        if !css.is_empty() {
            structure.push_chunk(Chunk::text(CSS_CHUNK, FileType::Css, css));
        }
        Ok(structure)
    }
}

/// `title-1` and `title1` both camel-case to `title1`; later keys get a
/// numeric suffix.
fn unique_class_name(key: &str, taken: &mut HashSet<String>) -> String {
    let base = key.to_case(Case::Camel);
    let mut candidate = base.clone();
    let mut suffix = 2;
    while !taken.insert(candidate.clone()) {
        candidate = format!("{base}{suffix}");
        suffix += 1;
    }
    candidate
}

/// A static style value as CSS text; numbers get `px` unless the property
/// is unitless.
pub(crate) fn css_value(property: &str, value: &StaticValue) -> String {
    match value {
        StaticValue::Number(n) if !UNITLESS_PROPERTIES.contains(&property) => {
            format!("{}px", format_number(*n))
        }
        other => other.to_text(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::{ReactComponentPlugin, UidlNormalizer};
    use crate::pipeline::{ChunkContent, StructureOptions};
    use crate::targets::ComponentType;
    use uidl_core::builders::component;
    use uidl_core::{DynamicReference, ElementNode, PropDefinition, PropType, UidlNode};

    #[test]
    fn test_static_styles_move_to_css() {
        let title = ElementNode::new("h1")
            .with_key("title")
            .with_style("fontSize", StyleValue::Static(StaticValue::Number(24.0)))
            .with_style("color", StyleValue::Dynamic(DynamicReference::prop("color")));
        let uidl = component("Card", UidlNode::Element(ElementNode::new("div").with_child(UidlNode::Element(title))))
            .with_prop("color", PropDefinition::new(PropType::String));

        let options = StructureOptions {
            file_name: "card".into(),
        };
        let mut structure = GenerationStructure::new(uidl, options);
        structure = UidlNormalizer.run(structure).unwrap();
        structure = ReactComponentPlugin::new(ComponentType::React, JsxOptions::default())
            .run(structure)
            .unwrap();
        structure = CssModulesPlugin::new("className", JsxOptions::default())
            .run(structure)
            .unwrap();

        let css = structure.chunk(CSS_CHUNK).unwrap();
        assert_eq!(css.file_type, FileType::Css);
        assert_eq!(css.content, ChunkContent::Text(".title {\n  font-size: 24px;\n}\n".into()));
        assert_eq!(structure.dependencies.get("styles").unwrap().path, "./card.css");

        let id = structure.nodes_lookup["title"];
        let element = &structure.arena[id];
        assert_eq!(
            element.attribute("className"),
            Some(&JsxAttributeValue::Expression(Expression::path("styles.title")))
        );
        assert!(element.attribute("style").is_some());
    }

    #[test]
    fn test_colliding_keys_get_distinct_classes() {
        let heading = |key: &str, size: f64| {
            UidlNode::Element(
                ElementNode::new("h2")
                    .with_key(key)
                    .with_style("fontSize", StyleValue::Static(StaticValue::Number(size))),
            )
        };
        let root = ElementNode::new("div")
            .with_child(heading("title-1", 20.0))
            .with_child(heading("title1", 16.0));
        let options = StructureOptions {
            file_name: "titles".into(),
        };
        let mut structure = GenerationStructure::new(component("Titles", UidlNode::Element(root)), options);
        structure = UidlNormalizer.run(structure).unwrap();
        structure = ReactComponentPlugin::new(ComponentType::React, JsxOptions::default())
            .run(structure)
            .unwrap();
        structure = CssModulesPlugin::new("className", JsxOptions::default())
            .run(structure)
            .unwrap();

        assert_eq!(
            structure.chunk(CSS_CHUNK).unwrap().content,
            ChunkContent::Text(".title1 {\n  font-size: 20px;\n}\n\n.title12 {\n  font-size: 16px;\n}\n".into())
        );
        let class_of = |key: &str| structure.arena[structure.nodes_lookup[key]].attribute("className").cloned();
        assert_eq!(class_of("title-1"), Some(JsxAttributeValue::Expression(Expression::path("styles.title1"))));
        assert_eq!(class_of("title1"), Some(JsxAttributeValue::Expression(Expression::path("styles.title12"))));
    }

    #[test]
    fn test_unitless_numbers() {
        assert_eq!(css_value("opacity", &StaticValue::Number(0.5)), "0.5");
        assert_eq!(css_value("width", &StaticValue::Number(10.0)), "10px");
        assert_eq!(css_value("width", &StaticValue::from("50%")), "50%");
    }
}
