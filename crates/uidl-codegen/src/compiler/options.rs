//! Per-target options for the node compiler.

use crate::compiler::TargetNode;
use crate::jsx::JsxArena;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uidl_core::ReferenceType;

/// Whether element dependencies are registered as imports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DependencyHandling {
    #[default]
    Import,
    None,
}

/// What a slot compiles to when it carries fallback content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SlotHandling {
    /// Always forward the children; the fallback is not rendered.
    #[default]
    ForwardChildren,
    /// Render the fallback when no children are passed.
    FallbackWhenEmpty,
}

/// Identifier prefix per reference type. `Some(None)` means the reference
/// is emitted bare, a missing entry means the target cannot express it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferencePrefixMap {
    prefixes: HashMap<ReferenceType, Option<String>>,
}

impl ReferencePrefixMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, reference_type: ReferenceType, prefix: Option<&str>) -> Self {
        self.prefixes
            .insert(reference_type, prefix.map(str::to_string));
        self
    }

    pub fn get(&self, reference_type: ReferenceType) -> Option<Option<&str>> {
        self.prefixes
            .get(&reference_type)
            .map(|prefix| prefix.as_deref())
    }

    /// The mapping used by function components: props through `props`,
    /// state and locals bare, tokens through `TOKENS`.
    pub fn function_component() -> Self {
        Self::new()
            .with(ReferenceType::Prop, Some("props"))
            .with(ReferenceType::State, None)
            .with(ReferenceType::Local, None)
            .with(ReferenceType::Token, Some(TOKENS_IDENTIFIER))
    }

    /// The mapping used inside component templates, where props, state
    /// and locals are all in scope by name.
    pub fn template() -> Self {
        Self::new()
            .with(ReferenceType::Prop, None)
            .with(ReferenceType::State, None)
            .with(ReferenceType::Local, None)
            .with(ReferenceType::Token, Some(TOKENS_IDENTIFIER))
    }
}

/// Name of the constant holding a component's design tokens.
pub const TOKENS_IDENTIFIER: &str = "TOKENS";

/// Rewrites the tag of an element backed by a local dependency.
pub type CustomElementTag = fn(&str) -> String;

/// Turns raw markup into a node that injects it unescaped.
pub type HtmlInjection = fn(&str, &mut JsxArena) -> TargetNode;

#[derive(Clone)]
pub struct JsxOptions {
    pub dependency_handling: DependencyHandling,
    pub reference_prefixes: ReferencePrefixMap,
    pub custom_element_tag: Option<CustomElementTag>,
    pub dom_html_injection: Option<HtmlInjection>,
    pub slot_handling: SlotHandling,
    /// Prop forwarded by an unnamed slot.
    pub children_prop: String,
}

impl Default for JsxOptions {
    fn default() -> Self {
        Self {
            dependency_handling: DependencyHandling::Import,
            reference_prefixes: ReferencePrefixMap::function_component(),
            custom_element_tag: None,
            dom_html_injection: None,
            slot_handling: SlotHandling::ForwardChildren,
            children_prop: "children".to_string(),
        }
    }
}

impl fmt::Debug for JsxOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsxOptions")
            .field("dependency_handling", &self.dependency_handling)
            .field("reference_prefixes", &self.reference_prefixes)
            .field("custom_element_tag", &self.custom_element_tag.is_some())
            .field("dom_html_injection", &self.dom_html_injection.is_some())
            .field("slot_handling", &self.slot_handling)
            .field("children_prop", &self.children_prop)
            .finish()
    }
}
