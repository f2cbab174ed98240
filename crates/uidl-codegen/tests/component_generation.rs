//! End-to-end component generation from UIDL JSON.

use uidl_codegen::{
    CodegenError, ComponentGenerator, ComponentType, FileType, GeneratorOptions, StyleVariation,
};
use uidl_core::{ResolveError, ValidationError};

fn generate(source: &str) -> String {
    ComponentGenerator::default()
        .generate_component_json(source)
        .unwrap()
        .code()
        .unwrap()
        .to_string()
}

#[test]
fn slot_forwards_children() {
    let code = generate(
        r#"{
            "name": "Container",
            "node": {
                "type": "element",
                "content": {
                    "elementType": "div",
                    "children": [
                        { "type": "slot", "content": { "fallback": { "type": "static", "content": "1234" } } }
                    ]
                }
            }
        }"#,
    );
    assert!(code.contains("{props.children}"));
    assert!(!code.contains("1234"));
}

#[test]
fn conditional_on_state_with_toggle() {
    let code = generate(
        r#"{
            "name": "Reveal",
            "stateDefinitions": { "isVisible": { "type": "boolean", "defaultValue": true } },
            "node": {
                "type": "element",
                "content": {
                    "elementType": "div",
                    "events": { "click": [ { "type": "stateChange", "modifies": "isVisible", "newState": "$toggle" } ] },
                    "children": [
                        {
                            "type": "conditional",
                            "content": {
                                "node": { "type": "element", "content": { "elementType": "div", "children": [ { "type": "static", "content": "Now you see me" } ] } },
                                "reference": { "type": "dynamic", "content": { "id": "isVisible", "referenceType": "state" } },
                                "value": true
                            }
                        }
                    ]
                }
            }
        }"#,
    );
    assert!(code.contains("import React, { useState } from 'react';"));
    assert!(code.contains("const [isVisible, setIsVisible] = useState(true);"));
    assert!(code.contains("onClick={() => setIsVisible(!isVisible)}"));
    assert!(code.contains("{isVisible === true && <div>Now you see me</div>}"));
}

#[test]
fn literal_unicode_escapes_in_text_survive() {
    let code = generate(
        r#"{
            "name": "Path",
            "node": {
                "type": "element",
                "content": {
                    "elementType": "p",
                    "attrs": { "title": { "type": "static", "content": "C:\\u0041" } },
                    "children": [ { "type": "static", "content": "path C:\\u0041dir" } ]
                }
            }
        }"#,
    );
    assert!(code.contains(r"<p title={'C:\\u0041'}>{'path C:\\u0041dir'}</p>"));
    assert!(!code.contains("C:A"));
}

#[test]
fn clashing_dependencies_are_disambiguated() {
    let compiled = ComponentGenerator::default()
        .generate_component_json(
            r#"{
                "name": "Toolbar",
                "node": {
                    "type": "element",
                    "content": {
                        "elementType": "div",
                        "children": [
                            { "type": "element", "content": { "elementType": "Button", "dependency": { "type": "local", "path": "./button" } } },
                            { "type": "element", "content": { "elementType": "Button", "dependency": { "type": "local", "path": "../components/fancy" } } }
                        ]
                    }
                }
            }"#,
        )
        .unwrap();
    let code = compiled.code().unwrap();
    assert!(code.contains("import Button from './button';\nimport ComponentsFancyButton from '../components/fancy';"));
    assert!(code.contains("<Button></Button>"));
    assert!(code.contains("<ComponentsFancyButton></ComponentsFancyButton>"));

    let renamed = compiled.dependencies.get("ComponentsFancyButton").unwrap();
    assert_eq!(renamed.meta.original_name.as_deref(), Some("Button"));
}

#[test]
fn css_modules_emit_stylesheet() {
    let generator = ComponentGenerator::new(GeneratorOptions {
        style_variation: StyleVariation::CssModules,
        ..GeneratorOptions::default()
    });
    let compiled = generator
        .generate_component_json(
            r#"{
                "name": "Panel",
                "node": {
                    "type": "element",
                    "content": {
                        "elementType": "div",
                        "key": "panel",
                        "style": { "padding": { "type": "static", "content": 8 } }
                    }
                }
            }"#,
        )
        .unwrap();

    let css = compiled.file(FileType::Css).unwrap();
    assert_eq!(css.path, "panel.css");
    assert_eq!(css.content, ".panel {\n  padding: 8px;\n}\n");

    let code = compiled.code().unwrap();
    assert!(code.contains("import styles from './panel.css';"));
    assert!(code.contains("<div className={styles.panel}></div>"));
}

#[cfg(feature = "preact")]
#[test]
fn preact_css_modules_use_class() {
    let generator = ComponentGenerator::new(GeneratorOptions {
        component_type: ComponentType::Preact,
        style_variation: StyleVariation::CssModules,
        ..GeneratorOptions::default()
    });
    let compiled = generator
        .generate_component_json(
            r#"{
                "name": "Panel",
                "node": {
                    "type": "element",
                    "content": {
                        "elementType": "div",
                        "key": "panel",
                        "style": { "color": { "type": "static", "content": "red" } }
                    }
                }
            }"#,
        )
        .unwrap();
    assert!(compiled.code().unwrap().contains("<div class={styles.panel}></div>"));
}

#[test]
fn prop_types_sit_between_component_and_export() {
    let code = generate(
        r#"{
            "name": "Badge",
            "propDefinitions": { "label": { "type": "string", "defaultValue": "New" } },
            "node": {
                "type": "element",
                "content": {
                    "elementType": "span",
                    "children": [ { "type": "dynamic", "content": { "id": "label", "referenceType": "prop" } } ]
                }
            }
        }"#,
    );
    let component = code.find("const Badge = (props) =>").unwrap();
    let prop_types = code.find("Badge.propTypes = {").unwrap();
    let export = code.find("export default Badge;").unwrap();
    assert!(component < prop_types && prop_types < export);
    assert!(code.contains("import PropTypes from 'prop-types';"));
    assert!(code.contains("{props.label}"));
}

#[test]
fn unknown_node_type_names_its_path() {
    let err = ComponentGenerator::default()
        .generate_component_json(
            r#"{
                "name": "Player",
                "node": { "type": "element", "content": { "elementType": "div", "children": [ { "type": "video", "content": {} } ] } }
            }"#,
        )
        .unwrap_err();
    match err {
        CodegenError::Validation(ValidationError::UnsupportedNodeType { path, node_type }) => {
            assert_eq!(node_type, "video");
            assert_eq!(path.to_string(), "root.node.content.children[0]");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unknown_attribute_type_names_the_attribute() {
    let err = ComponentGenerator::default()
        .generate_component_json(
            r#"{
                "name": "Field",
                "node": { "type": "element", "content": { "elementType": "input", "attrs": { "value": { "type": "computed", "content": "a + b" } } } }
            }"#,
        )
        .unwrap_err();
    assert!(matches!(
        err,
        CodegenError::Validation(ValidationError::UnsupportedAttribute { ref attribute, .. }) if attribute == "value"
    ));
}

#[test]
fn undeclared_prop_is_unresolved() {
    let err = ComponentGenerator::default()
        .generate_component_json(
            r#"{
                "name": "Title",
                "node": {
                    "type": "element",
                    "content": {
                        "elementType": "h1",
                        "children": [ { "type": "dynamic", "content": { "id": "title", "referenceType": "prop" } } ]
                    }
                }
            }"#,
        )
        .unwrap_err();
    assert!(matches!(
        err,
        CodegenError::Resolve(ResolveError::UnresolvedReference { ref id, .. }) if id == "title"
    ));
}

#[test]
fn unknown_selectors_are_rejected() {
    for (result, kind) in [
        ("angular".parse::<ComponentType>().map(|_| ()), "component type"),
        ("sass".parse::<StyleVariation>().map(|_| ()), "style variation"),
    ] {
        assert!(matches!(result, Err(CodegenError::InvalidSelector { kind: k, .. }) if k == kind));
    }
}

#[test]
fn generation_is_deterministic() {
    let source = r#"{
        "name": "List",
        "propDefinitions": { "items": { "type": "array" } },
        "node": {
            "type": "repeat",
            "content": {
                "node": { "type": "element", "content": { "elementType": "li", "children": [ { "type": "dynamic", "content": { "id": "item", "referenceType": "local" } } ] } },
                "dataSource": { "type": "dynamic", "content": { "id": "items", "referenceType": "prop" } },
                "meta": { "useIndex": true }
            }
        }
    }"#;
    let first = generate(source);
    let second = generate(source);
    assert_eq!(first, second);
    assert!(first.contains("props.items.map((item, index) =>"));
}
