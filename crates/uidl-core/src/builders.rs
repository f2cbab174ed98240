//! Shorthand constructors for building UIDL trees in code.

use crate::ast::{
    ComponentUidl, ConditionalExpression, ConditionalNode, DynamicReference, ElementNode,
    RepeatMeta, RepeatNode, RepeatSource, SlotNode, StaticValue, UidlNode,
};

/// An element node with the given children.
pub fn element(element_type: &str, children: Vec<UidlNode>) -> UidlNode {
    let mut node = ElementNode::new(element_type);
    node.children = children;
    UidlNode::Element(node)
}

pub fn static_node(value: impl Into<StaticValue>) -> UidlNode {
    UidlNode::Static(value.into())
}

pub fn dynamic_node(reference: DynamicReference) -> UidlNode {
    UidlNode::Dynamic(reference)
}

pub fn raw_node(markup: impl Into<String>) -> UidlNode {
    UidlNode::Raw(markup.into())
}

/// A default slot with optional fallback content.
pub fn slot(fallback: Option<UidlNode>) -> UidlNode {
    UidlNode::Slot(SlotNode {
        name: None,
        fallback: fallback.map(Box::new),
    })
}

pub fn named_slot(name: &str, fallback: Option<UidlNode>) -> UidlNode {
    UidlNode::Slot(SlotNode {
        name: Some(name.to_string()),
        fallback: fallback.map(Box::new),
    })
}

pub fn repeat(node: ElementNode, data_source: RepeatSource, meta: RepeatMeta) -> UidlNode {
    UidlNode::Repeat(RepeatNode {
        node,
        data_source,
        meta,
    })
}

/// A conditional rendering `node` when `reference === value`.
pub fn conditional(node: UidlNode, reference: DynamicReference, value: StaticValue) -> UidlNode {
    UidlNode::Conditional(ConditionalNode {
        node: Box::new(node),
        reference,
        value: Some(value),
        condition: None,
    })
}

/// A conditional evaluated through an explicit condition.
pub fn conditional_with(
    node: UidlNode,
    reference: DynamicReference,
    condition: ConditionalExpression,
) -> UidlNode {
    UidlNode::Conditional(ConditionalNode {
        node: Box::new(node),
        reference,
        value: None,
        condition: Some(condition),
    })
}

pub fn component(name: &str, node: UidlNode) -> ComponentUidl {
    ComponentUidl::new(name, node)
}
