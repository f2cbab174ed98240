//! Pipeline plugins shipped with the generator.

mod css_modules;
mod imports;
mod inline_styles;
mod normalize;
mod prop_types;
mod react_component;
mod router;
#[cfg(feature = "vue")]
mod vue_component;

pub use css_modules::CssModulesPlugin;
pub use imports::ImportStatementsPlugin;
pub use inline_styles::InlineStylesPlugin;
pub use normalize::UidlNormalizer;
pub use prop_types::PropTypesPlugin;
pub use react_component::ReactComponentPlugin;
pub use router::{ReactRouterPlugin, RouteEntry};
#[cfg(feature = "vue")]
pub use vue_component::{VueComponentPlugin, VUE_SCRIPT_CHUNK, VUE_TEMPLATE_CHUNK};

use convert_case::{Case, Casing};
use uidl_core::{AttributeValue, ComponentUidl, ElementNode, UidlNode};

pub const COMPONENT_CHUNK: &str = "jsx-component";
pub const EXPORT_CHUNK: &str = "export";
pub const TOKENS_CHUNK: &str = "tokens";
pub const PROP_TYPES_CHUNK: &str = "prop-types";
pub const CSS_CHUNK: &str = "css-modules";
pub const IMPORT_LIB_CHUNK: &str = "import-lib";
pub const IMPORT_PACK_CHUNK: &str = "import-pack";
pub const IMPORT_LOCAL_CHUNK: &str = "import-local";
pub const ROUTER_CHUNK: &str = "app-router";
pub const RENDER_CHUNK: &str = "render";

/// Chunks that must precede any code using imported names.
pub const IMPORT_CHUNKS: [&str; 3] = [IMPORT_LIB_CHUNK, IMPORT_PACK_CHUNK, IMPORT_LOCAL_CHUNK];

/// The identifier a component is declared under: `user card` is `UserCard`.
pub fn component_name(uidl: &ComponentUidl) -> String {
    let name = words(&uidl.name).to_case(Case::Pascal);
    match name.chars().next() {
        Some(c) if c.is_ascii_alphabetic() => name,
        _ => format!("Component{name}"),
    }
}

/// Base name of the files generated for a component: `user card` is `user-card`.
pub fn component_file_name(uidl: &ComponentUidl) -> String {
    kebab_name(&uidl.name)
}

/// `My <Shop>` is `my-shop`.
pub fn kebab_name(name: &str) -> String {
    words(name).to_case(Case::Kebab)
}

fn words(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Visit every element of a tree in pre-order, including repeat templates,
/// conditional subtrees, slot fallbacks and nodes passed as attributes.
pub(crate) fn visit_elements<'a>(node: &'a UidlNode, visit: &mut dyn FnMut(&'a ElementNode)) {
    match node {
        UidlNode::Element(element) => visit_element(element, visit),
        UidlNode::Repeat(repeat) => visit_element(&repeat.node, visit),
        UidlNode::Conditional(conditional) => visit_elements(&conditional.node, visit),
        UidlNode::Slot(slot) => {
            if let Some(fallback) = &slot.fallback {
                visit_elements(fallback, visit);
            }
        }
        UidlNode::Static(_) | UidlNode::Dynamic(_) | UidlNode::Raw(_) => {}
    }
}

fn visit_element<'a>(element: &'a ElementNode, visit: &mut dyn FnMut(&'a ElementNode)) {
    visit(element);
    for value in element.attrs.values() {
        if let AttributeValue::Slot(content) = value {
            visit_elements(content, visit);
        }
    }
    for child in &element.children {
        visit_elements(child, visit);
    }
}

/// Mutable counterpart of [`visit_elements`], in the same order.
pub(crate) fn visit_elements_mut(node: &mut UidlNode, visit: &mut dyn FnMut(&mut ElementNode)) {
    match node {
        UidlNode::Element(element) => visit_element_mut(element, visit),
        UidlNode::Repeat(repeat) => visit_element_mut(&mut repeat.node, visit),
        UidlNode::Conditional(conditional) => visit_elements_mut(&mut conditional.node, visit),
        UidlNode::Slot(slot) => {
            if let Some(fallback) = &mut slot.fallback {
                visit_elements_mut(fallback, visit);
            }
        }
        UidlNode::Static(_) | UidlNode::Dynamic(_) | UidlNode::Raw(_) => {}
    }
}

fn visit_element_mut(element: &mut ElementNode, visit: &mut dyn FnMut(&mut ElementNode)) {
    visit(element);
    for value in element.attrs.values_mut() {
        if let AttributeValue::Slot(content) = value {
            visit_elements_mut(content, visit);
        }
    }
    for child in &mut element.children {
        visit_elements_mut(child, visit);
    }
}
