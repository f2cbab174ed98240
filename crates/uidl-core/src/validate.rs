//! The UIDL validation contract.
//!
//! Raw JSON is checked tag by tag before it is deserialized so that an
//! unknown node or attribute variant is reported with its exact location
//! instead of as a generic decoding failure. Typed values get the remaining
//! structural checks (renderable roots, operands, unique component names).

use crate::ast::{
    ComponentUidl, ConditionalExpression, ElementNode, Operation, ProjectUidl, UidlNode,
};
use crate::errors::ValidationError;
use crate::path::NodePath;
use std::collections::HashSet;

/// Check a typed component.
pub fn validate_component(component: &ComponentUidl) -> Result<(), ValidationError> {
    let path = NodePath::root();
    if component.name.trim().is_empty() {
        return Err(ValidationError::malformed(&path, "component name is empty"));
    }
    if !component.node.is_renderable_root() {
        return Err(ValidationError::malformed(
            &path,
            format!(
                "component {} has a '{}' root; expected element, repeat or conditional",
                component.name,
                component.node.tag()
            ),
        ));
    }
    validate_node(&component.node, &path)
}

/// Check a typed project: every component is valid and names are unique.
pub fn validate_project(project: &ProjectUidl) -> Result<(), ValidationError> {
    validate_component(&project.root)?;

    let mut seen = HashSet::new();
    seen.insert(project.root.name.as_str());
    for component in &project.components {
        if !seen.insert(component.name.as_str()) {
            return Err(ValidationError::DuplicateComponent {
                name: component.name.clone(),
            });
        }
        validate_component(component)?;
    }
    Ok(())
}

/// Check a typed node and everything below it.
pub fn validate_node(node: &UidlNode, path: &NodePath) -> Result<(), ValidationError> {
    match node {
        UidlNode::Static(_) | UidlNode::Dynamic(_) | UidlNode::Raw(_) => Ok(()),
        UidlNode::Element(element) => validate_element(element, path),
        UidlNode::Repeat(repeat) => validate_element(&repeat.node, &path.field("node")),
        UidlNode::Conditional(conditional) => {
            if conditional.value.is_none() {
                if let Some(condition) = &conditional.condition {
                    validate_condition(condition, &path.field("condition"))?;
                }
            }
            validate_node(&conditional.node, &path.field("node"))
        }
        UidlNode::Slot(slot) => match &slot.fallback {
            Some(fallback) => validate_node(fallback, &path.field("fallback")),
            None => Ok(()),
        },
    }
}

fn validate_element(element: &ElementNode, path: &NodePath) -> Result<(), ValidationError> {
    if element.element_type.trim().is_empty() {
        return Err(ValidationError::malformed(path, "element type is empty"));
    }
    for (name, value) in &element.attrs {
        if let crate::ast::AttributeValue::Slot(content) = value {
            validate_node(content, &path.field("attrs").field(name.as_str()))?;
        }
    }
    for (i, child) in element.children.iter().enumerate() {
        validate_node(child, &path.field("children").index(i))?;
    }
    Ok(())
}

fn validate_condition(
    condition: &ConditionalExpression,
    path: &NodePath,
) -> Result<(), ValidationError> {
    if condition.conditions.is_empty() {
        return Err(ValidationError::malformed(path, "condition has no operands"));
    }
    for (i, cond) in condition.conditions.iter().enumerate() {
        let unary = matches!(cond.operation, Operation::Truthy | Operation::Falsy);
        match (unary, cond.operand.is_some()) {
            (true, true) => {
                return Err(ValidationError::malformed(
                    &path.field("conditions").index(i),
                    "truthiness tests take no operand",
                ))
            }
            (false, false) => {
                return Err(ValidationError::malformed(
                    &path.field("conditions").index(i),
                    "comparison is missing its operand",
                ))
            }
            _ => {}
        }
    }
    Ok(())
}

#[cfg(feature = "serde")]
pub use json::{parse_component, parse_project, validate_node_value};

#[cfg(feature = "serde")]
mod json {
    use super::*;
    use serde_json::{Map, Value};

    const NODE_TYPES: &[&str] = &[
        "static",
        "dynamic",
        "raw",
        "element",
        "repeat",
        "conditional",
        "slot",
    ];

    /// Parse and validate a component from JSON.
    pub fn parse_component(source: &str) -> Result<ComponentUidl, ValidationError> {
        let value: Value = serde_json::from_str(source)?;
        check_component_value(&value, &NodePath::root())?;
        let component: ComponentUidl = serde_json::from_value(value)?;
        validate_component(&component)?;
        Ok(component)
    }

    /// Parse and validate a project from JSON.
    pub fn parse_project(source: &str) -> Result<ProjectUidl, ValidationError> {
        let value: Value = serde_json::from_str(source)?;
        let root = NodePath::root();
        let object = as_object(&value, &root)?;
        let root_component = object
            .get("root")
            .ok_or_else(|| ValidationError::malformed(&root, "project has no root component"))?;
        check_component_value(root_component, &root.field("root"))?;
        if let Some(components) = object.get("components") {
            let components = components.as_array().ok_or_else(|| {
                ValidationError::malformed(&root.field("components"), "expected an array")
            })?;
            for (i, component) in components.iter().enumerate() {
                check_component_value(component, &root.field("components").index(i))?;
            }
        }
        let project: ProjectUidl = serde_json::from_value(value)?;
        validate_project(&project)?;
        Ok(project)
    }

    fn check_component_value(value: &Value, path: &NodePath) -> Result<(), ValidationError> {
        let object = as_object(value, path)?;
        let node = object
            .get("node")
            .ok_or_else(|| ValidationError::malformed(path, "component has no node"))?;
        validate_node_value(node, &path.field("node"))
    }

    /// Check that a JSON value is a well-formed UIDL node.
    pub fn validate_node_value(value: &Value, path: &NodePath) -> Result<(), ValidationError> {
        let object = as_object(value, path)?;
        let node_type = type_tag(object, path)?;
        // Unknown tags are reported before the content is inspected.
        if !NODE_TYPES.contains(&node_type) {
            return Err(ValidationError::UnsupportedNodeType {
                path: path.clone(),
                node_type: node_type.to_string(),
            });
        }
        let content = object
            .get("content")
            .ok_or_else(|| ValidationError::malformed(path, "node has no content"))?;
        let content_path = path.field("content");

        match node_type {
            "static" => check_scalar(content, &content_path),
            "raw" => match content {
                Value::String(_) => Ok(()),
                _ => Err(ValidationError::malformed(&content_path, "raw content must be a string")),
            },
            "dynamic" => check_reference(content, &content_path),
            "element" => check_element(content, &content_path),
            "repeat" => {
                let repeat = as_object(content, &content_path)?;
                let node_path = content_path.field("node");
                let node = repeat
                    .get("node")
                    .ok_or_else(|| ValidationError::malformed(&content_path, "repeat has no node"))?;
                validate_node_value(node, &node_path)?;
                if type_tag(as_object(node, &node_path)?, &node_path)? != "element" {
                    return Err(ValidationError::malformed(
                        &node_path,
                        "repeat template must be an element",
                    ));
                }
                let source_path = content_path.field("dataSource");
                let source = repeat.get("dataSource").ok_or_else(|| {
                    ValidationError::malformed(&content_path, "repeat has no dataSource")
                })?;
                let source_object = as_object(source, &source_path)?;
                match type_tag(source_object, &source_path)? {
                    "dynamic" | "static" => Ok(()),
                    other => Err(ValidationError::malformed(
                        &source_path,
                        format!("dataSource of type '{}' is not supported", other),
                    )),
                }
            }
            "conditional" => {
                let conditional = as_object(content, &content_path)?;
                let node = conditional.get("node").ok_or_else(|| {
                    ValidationError::malformed(&content_path, "conditional has no node")
                })?;
                validate_node_value(node, &content_path.field("node"))?;
                let reference_path = content_path.field("reference");
                let reference = conditional.get("reference").ok_or_else(|| {
                    ValidationError::malformed(&content_path, "conditional has no reference")
                })?;
                let reference_object = as_object(reference, &reference_path)?;
                if type_tag(reference_object, &reference_path)? != "dynamic" {
                    return Err(ValidationError::malformed(
                        &reference_path,
                        "conditional reference must be dynamic",
                    ));
                }
                Ok(())
            }
            "slot" => {
                let slot = as_object(content, &content_path)?;
                match slot.get("fallback") {
                    Some(fallback) => validate_node_value(fallback, &content_path.field("fallback")),
                    None => Ok(()),
                }
            }
            other => Err(ValidationError::UnsupportedNodeType {
                path: path.clone(),
                node_type: other.to_string(),
            }),
        }
    }

    fn check_element(content: &Value, path: &NodePath) -> Result<(), ValidationError> {
        let element = as_object(content, path)?;
        match element.get("elementType") {
            Some(Value::String(_)) => {}
            _ => return Err(ValidationError::malformed(path, "element has no elementType")),
        }

        if let Some(attrs) = element.get("attrs") {
            let attrs_path = path.field("attrs");
            for (name, attr) in as_object(attrs, &attrs_path)? {
                let attr_path = attrs_path.field(name.as_str());
                let attr_object = as_object(attr, &attr_path)?;
                let kind = type_tag(attr_object, &attr_path)?;
                match kind {
                    "static" | "dynamic" | "import" => {}
                    "slot" => {
                        let slot_content = attr_object.get("content").ok_or_else(|| {
                            ValidationError::malformed(&attr_path, "slot attribute has no content")
                        })?;
                        validate_node_value(slot_content, &attr_path.field("content"))?;
                    }
                    other => {
                        return Err(ValidationError::UnsupportedAttribute {
                            path: path.clone(),
                            attribute: name.clone(),
                            kind: other.to_string(),
                        })
                    }
                }
            }
        }

        if let Some(style) = element.get("style") {
            let style_path = path.field("style");
            for (name, value) in as_object(style, &style_path)? {
                let value_path = style_path.field(name.as_str());
                match type_tag(as_object(value, &value_path)?, &value_path)? {
                    "static" | "dynamic" => {}
                    other => {
                        return Err(ValidationError::UnsupportedAttribute {
                            path: path.clone(),
                            attribute: format!("style.{}", name),
                            kind: other.to_string(),
                        })
                    }
                }
            }
        }

        if let Some(events) = element.get("events") {
            let events_path = path.field("events");
            for (name, handlers) in as_object(events, &events_path)? {
                let handlers_path = events_path.field(name.as_str());
                let handlers = handlers.as_array().ok_or_else(|| {
                    ValidationError::malformed(&handlers_path, "event handlers must be an array")
                })?;
                for (i, handler) in handlers.iter().enumerate() {
                    let handler_path = handlers_path.index(i);
                    match type_tag(as_object(handler, &handler_path)?, &handler_path)? {
                        "stateChange" | "propCall" => {}
                        other => {
                            return Err(ValidationError::malformed(
                                &handler_path,
                                format!("unsupported event handler '{}'", other),
                            ))
                        }
                    }
                }
            }
        }

        if let Some(children) = element.get("children") {
            let children_path = path.field("children");
            let children = children.as_array().ok_or_else(|| {
                ValidationError::malformed(&children_path, "children must be an array")
            })?;
            for (i, child) in children.iter().enumerate() {
                validate_node_value(child, &children_path.index(i))?;
            }
        }
        Ok(())
    }

    fn check_scalar(value: &Value, path: &NodePath) -> Result<(), ValidationError> {
        match value {
            Value::String(_) | Value::Number(_) | Value::Bool(_) => Ok(()),
            _ => Err(ValidationError::malformed(
                path,
                "static content must be a string, number or boolean",
            )),
        }
    }

    fn check_reference(value: &Value, path: &NodePath) -> Result<(), ValidationError> {
        let reference = as_object(value, path)?;
        match (reference.get("id"), reference.get("referenceType")) {
            (Some(Value::String(_)), Some(Value::String(_))) => Ok(()),
            _ => Err(ValidationError::malformed(
                path,
                "dynamic reference needs a string id and referenceType",
            )),
        }
    }

    fn as_object<'v>(
        value: &'v Value,
        path: &NodePath,
    ) -> Result<&'v Map<String, Value>, ValidationError> {
        value
            .as_object()
            .ok_or_else(|| ValidationError::malformed(path, "expected an object"))
    }

    fn type_tag<'v>(
        object: &'v Map<String, Value>,
        path: &NodePath,
    ) -> Result<&'v str, ValidationError> {
        object
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| ValidationError::malformed(path, "missing string 'type' tag"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Condition, ConditionalNode, DynamicReference, MatchType, StaticValue};

    fn component(node: UidlNode) -> ComponentUidl {
        ComponentUidl::new("Card", node)
    }

    #[test]
    fn test_static_root_is_malformed() {
        let err = validate_component(&component(UidlNode::Static("text".into()))).unwrap_err();
        assert!(matches!(err, ValidationError::Malformed { .. }));
    }

    #[test]
    fn test_empty_element_type_reports_path() {
        let root = ElementNode::new("div").with_child(UidlNode::Element(ElementNode::new("")));
        let err = validate_component(&component(UidlNode::Element(root))).unwrap_err();
        match err {
            ValidationError::Malformed { path, .. } => {
                assert_eq!(path.to_string(), "root.children[0]")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_comparison_without_operand() {
        let node = UidlNode::Conditional(ConditionalNode {
            node: Box::new(UidlNode::Element(ElementNode::new("span"))),
            reference: DynamicReference::prop("count"),
            value: None,
            condition: Some(ConditionalExpression {
                conditions: vec![Condition {
                    operation: Operation::Greater,
                    operand: None,
                }],
                match_type: MatchType::All,
            }),
        });
        assert!(validate_component(&component(node)).is_err());
    }

    #[test]
    fn test_duplicate_component_names() {
        let root = component(UidlNode::Element(ElementNode::new("div")));
        let project = ProjectUidl {
            name: "app".into(),
            globals: Default::default(),
            root: ComponentUidl::new("App", UidlNode::Element(ElementNode::new("div"))),
            components: vec![root.clone(), root],
        };
        let err = validate_project(&project).unwrap_err();
        assert!(matches!(err, ValidationError::DuplicateComponent { name } if name == "Card"));
    }

    #[test]
    fn test_value_wins_over_condition() {
        let node = UidlNode::Conditional(ConditionalNode {
            node: Box::new(UidlNode::Static("x".into())),
            reference: DynamicReference::state("open"),
            value: Some(StaticValue::Boolean(true)),
            condition: Some(ConditionalExpression {
                conditions: vec![],
                match_type: MatchType::All,
            }),
        });
        assert!(validate_node(&node, &NodePath::root()).is_ok());
    }

    #[cfg(feature = "serde")]
    mod json {
        use super::super::*;
        use crate::ast::{AttributeValue, UidlNode};

        #[test]
        fn test_parse_component() {
            let source = r#"{
                "name": "Greeting",
                "propDefinitions": { "title": { "type": "string", "defaultValue": "Hello" } },
                "node": {
                    "type": "element",
                    "content": {
                        "elementType": "div",
                        "key": "root",
                        "attrs": { "title": { "type": "dynamic", "content": { "id": "title", "referenceType": "prop" } } },
                        "children": [ { "type": "static", "content": "Hi" } ]
                    }
                }
            }"#;
            let component = parse_component(source).unwrap();
            let UidlNode::Element(root) = &component.node else {
                panic!("expected element root");
            };
            assert_eq!(root.key, "root");
            assert!(matches!(root.attrs.get("title"), Some(AttributeValue::Dynamic(_))));
        }

        #[test]
        fn test_unknown_node_type() {
            let source = r#"{
                "name": "Player",
                "node": {
                    "type": "element",
                    "content": {
                        "elementType": "div",
                        "children": [ { "type": "video", "content": {} } ]
                    }
                }
            }"#;
            match parse_component(source).unwrap_err() {
                ValidationError::UnsupportedNodeType { path, node_type } => {
                    assert_eq!(node_type, "video");
                    assert_eq!(path.to_string(), "root.node.content.children[0]");
                }
                other => panic!("unexpected error: {other}"),
            }
        }

        #[test]
        fn test_unknown_attribute_type() {
            let source = r#"{
                "name": "Field",
                "node": {
                    "type": "element",
                    "content": {
                        "elementType": "input",
                        "attrs": { "value": { "type": "computed", "content": "a + b" } }
                    }
                }
            }"#;
            match parse_component(source).unwrap_err() {
                ValidationError::UnsupportedAttribute { attribute, kind, .. } => {
                    assert_eq!(attribute, "value");
                    assert_eq!(kind, "computed");
                }
                other => panic!("unexpected error: {other}"),
            }
        }

        #[test]
        fn test_repeat_node_roundtrip_shape() {
            let source = r#"{
                "name": "List",
                "node": {
                    "type": "repeat",
                    "content": {
                        "node": { "type": "element", "content": { "elementType": "li" } },
                        "dataSource": { "type": "static", "content": [] },
                        "meta": { "useIndex": true }
                    }
                }
            }"#;
            let component = parse_component(source).unwrap();
            assert!(matches!(component.node, UidlNode::Repeat(_)));
        }
    }
}
