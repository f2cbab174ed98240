//! Element compilation.

use super::expressions::{event_attribute_name, handler_expression, reference_expression, static_expression};
use super::{compile_node, CompileContext, DependencyHandling, JsxOptions, TargetNode};
use crate::error::Result;
use crate::jsx::{ElementId, Expression, JsxAttributeValue, JsxChild, JsxElement};
use tracing::trace;
use uidl_core::{AttributeValue, DependencyType, ElementNode, StaticValue};

/// Compile an element and its subtree into the arena.
///
/// The element is recorded in the nodes lookup under its key once its
/// children are compiled.
pub fn compile_element(
    element: &ElementNode,
    ctx: &mut CompileContext<'_>,
    options: &JsxOptions,
) -> Result<ElementId> {
    let tag = element_tag(element, ctx, options);
    trace!(element = %element.element_type, %tag, key = %element.key, "Compiling element");

    let mut jsx = JsxElement::new(tag);
    jsx.self_closing = element.self_closing;

    for (name, value) in &element.attrs {
        let value = attribute_value(value, ctx, options)?;
        jsx.set_attribute(name.as_str(), value);
    }

    for (event, handlers) in &element.events {
        if handlers.is_empty() {
            continue;
        }
        let handler = handler_expression(handlers, options)?;
        jsx.set_attribute(event_attribute_name(event), JsxAttributeValue::Expression(handler));
    }

    for child in &element.children {
        let child = match compile_node(child, ctx, options)? {
            TargetNode::Text(text) => JsxChild::Text(text),
            TargetNode::Element(id) => JsxChild::Element(id),
            TargetNode::Expression(expression) => JsxChild::Expression(expression),
        };
        jsx.children.push(child);
    }

    let id = ctx.arena.alloc(jsx);
    if !element.key.is_empty() {
        ctx.nodes_lookup.insert(element.key.clone(), id);
    }
    Ok(id)
}

/// The tag an element is emitted with, binding its dependency first.
fn element_tag(element: &ElementNode, ctx: &mut CompileContext<'_>, options: &JsxOptions) -> String {
    let Some(dependency) = &element.dependency else {
        return element.element_type.clone();
    };

    let tag = match options.dependency_handling {
        DependencyHandling::Import => ctx
            .dependencies
            .register(&element.element_type, dependency.clone()),
        DependencyHandling::None => element.element_type.clone(),
    };

    match options.custom_element_tag {
        Some(rewrite) if dependency.dependency_type == DependencyType::Local => rewrite(&tag),
        _ => tag,
    }
}

fn attribute_value(
    value: &AttributeValue,
    ctx: &mut CompileContext<'_>,
    options: &JsxOptions,
) -> Result<JsxAttributeValue> {
    Ok(match value {
        AttributeValue::Static(StaticValue::String(s)) => JsxAttributeValue::String(s.clone()),
        AttributeValue::Static(other) => JsxAttributeValue::Expression(static_expression(other)),
        AttributeValue::Dynamic(reference) => {
            JsxAttributeValue::Expression(reference_expression(reference, options)?)
        }
        AttributeValue::Import { id } => JsxAttributeValue::Expression(Expression::identifier(id)),
        AttributeValue::Slot(content) => match compile_node(content, ctx, options)? {
            TargetNode::Text(text) => JsxAttributeValue::String(text),
            TargetNode::Element(id) => JsxAttributeValue::Expression(Expression::Jsx(id)),
            TargetNode::Expression(expression) => JsxAttributeValue::Expression(expression),
        },
    })
}
