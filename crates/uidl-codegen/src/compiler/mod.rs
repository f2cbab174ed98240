//! The node compiler: UIDL nodes to JSX target nodes.
//!
//! Compilation is a recursive, exhaustive match over the node union. It
//! performs no I/O; its only side effects are the dependency registrations,
//! arena allocations and nodes lookup entries made through the
//! [`CompileContext`], in source order.

mod element;
mod expressions;
mod options;

pub use element::compile_element;
pub use expressions::{
    condition_expression, event_attribute_name, handler_expression, reference_expression,
    state_setter, static_expression,
};
pub use options::{
    CustomElementTag, DependencyHandling, HtmlInjection, JsxOptions, ReferencePrefixMap,
    SlotHandling, TOKENS_IDENTIFIER,
};

use crate::dependencies::DependencyTable;
use crate::error::Result;
use crate::jsx::{ElementId, Expression, JsxArena, JsxAttributeValue, LogicalOperator};
use indexmap::IndexMap;
use uidl_core::{
    ConditionalNode, DynamicReference, RepeatNode, RepeatSource, SlotNode, UidlNode, INDEX_NAME,
};

/// Compiled elements by UIDL key.
pub type NodesLookup = IndexMap<String, ElementId>;

/// The result of compiling one node.
#[derive(Debug, Clone, PartialEq)]
pub enum TargetNode {
    Text(String),
    Expression(Expression),
    Element(ElementId),
}

impl TargetNode {
    /// The node in expression position: text becomes a string literal.
    pub fn into_expression(self) -> Expression {
        match self {
            TargetNode::Text(text) => Expression::String(text),
            TargetNode::Expression(expression) => expression,
            TargetNode::Element(id) => Expression::Jsx(id),
        }
    }
}

/// The mutable state one compilation writes to.
pub struct CompileContext<'a> {
    pub dependencies: &'a mut DependencyTable,
    pub arena: &'a mut JsxArena,
    pub nodes_lookup: &'a mut NodesLookup,
}

/// Compile a UIDL node.
pub fn compile_node(
    node: &UidlNode,
    ctx: &mut CompileContext<'_>,
    options: &JsxOptions,
) -> Result<TargetNode> {
    match node {
        UidlNode::Static(value) => Ok(TargetNode::Text(value.to_text())),
        UidlNode::Dynamic(reference) => {
            Ok(TargetNode::Expression(reference_expression(reference, options)?))
        }
        UidlNode::Raw(markup) => Ok(match options.dom_html_injection {
            Some(inject) => inject(markup, ctx.arena),
            None => TargetNode::Text(markup.clone()),
        }),
        UidlNode::Element(element) => Ok(TargetNode::Element(compile_element(element, ctx, options)?)),
        UidlNode::Repeat(repeat) => compile_repeat(repeat, ctx, options).map(TargetNode::Expression),
        UidlNode::Conditional(conditional) => {
            compile_conditional(conditional, ctx, options).map(TargetNode::Expression)
        }
        UidlNode::Slot(slot) => compile_slot(slot, ctx, options).map(TargetNode::Expression),
    }
}

/// `source.map((item, index) => <node key={...} />)`
fn compile_repeat(
    repeat: &RepeatNode,
    ctx: &mut CompileContext<'_>,
    options: &JsxOptions,
) -> Result<Expression> {
    let source = match &repeat.data_source {
        RepeatSource::Reference(reference) => reference_expression(reference, options)?,
        RepeatSource::Inline(items) => Expression::Array(items.iter().map(static_expression).collect()),
    };

    let id = compile_element(&repeat.node, ctx, options)?;
    let key = reference_expression(&DynamicReference::local(repeat.meta.iterator_key()), options)?;
    ctx.arena[id].set_attribute("key", JsxAttributeValue::Expression(key));

    let mut params = vec![repeat.meta.iterator_name().to_string()];
    if repeat.meta.binds_index() {
        params.push(INDEX_NAME.to_string());
    }

    Ok(Expression::call(
        Expression::member(source, "map"),
        vec![Expression::arrow(params, Expression::Jsx(id))],
    ))
}

/// `test && subtree`
fn compile_conditional(
    conditional: &ConditionalNode,
    ctx: &mut CompileContext<'_>,
    options: &JsxOptions,
) -> Result<Expression> {
    let subject = reference_expression(&conditional.reference, options)?;
    let test = condition_expression(&subject, &conditional.effective_condition());
    let subtree = compile_node(&conditional.node, ctx, options)?.into_expression();
    Ok(Expression::logical(LogicalOperator::And, test, subtree))
}

fn compile_slot(slot: &SlotNode, ctx: &mut CompileContext<'_>, options: &JsxOptions) -> Result<Expression> {
    let prop = slot.name.as_deref().unwrap_or(&options.children_prop);
    let forwarded = reference_expression(&DynamicReference::prop(prop), options)?;

    match (&slot.fallback, options.slot_handling) {
        (Some(fallback), SlotHandling::FallbackWhenEmpty) => {
            let fallback = compile_node(fallback, ctx, options)?.into_expression();
            Ok(Expression::logical(LogicalOperator::Or, forwarded, fallback))
        }
        _ => Ok(forwarded),
    }
}
