//! Dynamic reference resolution.
//!
//! Walks a component tree with a stack of local scopes (one per enclosing
//! repeat) and checks that every reference, state mutation and prop call
//! names something declared.

use std::collections::HashSet;
use tracing::trace;
use uidl_core::{
    AttributeValue, ComponentUidl, DynamicReference, ElementNode, EventHandler, NodePath,
    ReferenceType, RepeatSource, ResolveError, StyleValue, UidlNode, INDEX_NAME,
};

/// Resolve all references in a component.
pub fn resolve_references(component: &ComponentUidl) -> Result<(), ResolveError> {
    let mut resolver = ReferenceResolver::new(component);
    resolver.resolve_node(&component.node, &NodePath::root())
}

/// Names bound by one enclosing repeat.
struct LocalScope {
    names: HashSet<String>,
}

struct ReferenceResolver<'a> {
    component: &'a ComponentUidl,
    /// Stack of scopes as we descend into repeats.
    scope_stack: Vec<LocalScope>,
}

impl<'a> ReferenceResolver<'a> {
    fn new(component: &'a ComponentUidl) -> Self {
        Self {
            component,
            scope_stack: Vec::new(),
        }
    }

    fn resolve_node(&mut self, node: &UidlNode, path: &NodePath) -> Result<(), ResolveError> {
        match node {
            UidlNode::Static(_) | UidlNode::Raw(_) => Ok(()),
            UidlNode::Dynamic(reference) => self.check_reference(reference, path),
            UidlNode::Element(element) => self.resolve_element(element, path),
            UidlNode::Repeat(repeat) => {
                if let RepeatSource::Reference(source) = &repeat.data_source {
                    self.check_reference(source, &path.field("dataSource"))?;
                }

                let mut names = HashSet::new();
                names.insert(repeat.meta.iterator_name().to_string());
                if repeat.meta.binds_index() {
                    names.insert(INDEX_NAME.to_string());
                }
                self.scope_stack.push(LocalScope { names });

                let key = DynamicReference::local(repeat.meta.iterator_key());
                let result = self
                    .check_reference(&key, &path.field("meta").field("iteratorKey"))
                    .and_then(|_| self.resolve_element(&repeat.node, &path.field("node")));

                self.scope_stack.pop();
                result
            }
            UidlNode::Conditional(conditional) => {
                self.check_reference(&conditional.reference, &path.field("reference"))?;
                self.resolve_node(&conditional.node, &path.field("node"))
            }
            UidlNode::Slot(slot) => match &slot.fallback {
                Some(fallback) => self.resolve_node(fallback, &path.field("fallback")),
                None => Ok(()),
            },
        }
    }

    fn resolve_element(&mut self, element: &ElementNode, path: &NodePath) -> Result<(), ResolveError> {
        trace!(element = %element.element_type, %path, "Resolving element");

        for (name, value) in &element.attrs {
            let attr_path = path.field("attrs").field(name.as_str());
            match value {
                AttributeValue::Dynamic(reference) => self.check_reference(reference, &attr_path)?,
                AttributeValue::Slot(content) => self.resolve_node(content, &attr_path)?,
                AttributeValue::Static(_) | AttributeValue::Import { .. } => {}
            }
        }

        for (name, value) in &element.style {
            if let StyleValue::Dynamic(reference) = value {
                self.check_reference(reference, &path.field("style").field(name.as_str()))?;
            }
        }

        for (event, handlers) in &element.events {
            let event_path = path.field("events").field(event.as_str());
            for handler in handlers {
                self.check_handler(event, handler, &event_path)?;
            }
        }

        for (i, child) in element.children.iter().enumerate() {
            self.resolve_node(child, &path.field("children").index(i))?;
        }
        Ok(())
    }

    fn check_handler(
        &self,
        event: &str,
        handler: &EventHandler,
        path: &NodePath,
    ) -> Result<(), ResolveError> {
        match handler {
            EventHandler::StateChange { modifies, .. } => {
                if !self.component.state_definitions.contains_key(modifies) {
                    return Err(ResolveError::UnknownStateTarget {
                        component: self.component.name.clone(),
                        event: event.to_string(),
                        state: modifies.clone(),
                        path: path.clone(),
                    });
                }
            }
            EventHandler::PropCall { calls, .. } => {
                if !self.component.prop_definitions.contains_key(calls) {
                    return Err(ResolveError::UnknownPropCall {
                        component: self.component.name.clone(),
                        event: event.to_string(),
                        prop: calls.clone(),
                        path: path.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    fn check_reference(
        &self,
        reference: &DynamicReference,
        path: &NodePath,
    ) -> Result<(), ResolveError> {
        let name = reference.root_name();
        let declared = match reference.reference_type {
            ReferenceType::Prop => self.component.prop_definitions.contains_key(name),
            ReferenceType::State => self.component.state_definitions.contains_key(name),
            ReferenceType::Token => self.component.design_tokens.contains_key(name),
            ReferenceType::Local => self
                .scope_stack
                .iter()
                .rev()
                .any(|scope| scope.names.contains(name)),
        };

        if declared {
            Ok(())
        } else {
            Err(ResolveError::UnresolvedReference {
                component: self.component.name.clone(),
                id: reference.id.clone(),
                reference_type: reference.reference_type,
                path: path.clone(),
            })
        }
    }
}
