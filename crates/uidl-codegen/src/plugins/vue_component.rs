//! Vue components: the template as markup and the options object as script.

use super::css_modules::css_value;
use super::{component_name, IMPORT_CHUNKS};
use crate::compiler::{
    condition_expression, reference_expression, static_expression, JsxOptions, ReferencePrefixMap,
    TOKENS_IDENTIFIER,
};
use crate::dependencies::DependencyTable;
use crate::error::Result;
use crate::jsx::{Expression, JsxArena, JsxPrinter, ObjectProperty, Statement};
use crate::pipeline::{Chunk, FileType, GenerationStructure, Plugin};
use convert_case::{Case, Casing};
use tracing::trace;
use uidl_core::{
    AttributeValue, ConditionalNode, DynamicReference, ElementNode, EventHandler, PropType,
    RepeatNode, RepeatSource, SlotNode, StaticValue, StyleValue, UidlNode, TOGGLE_STATE,
};

pub const VUE_TEMPLATE_CHUNK: &str = "component-html";
pub const VUE_SCRIPT_CHUNK: &str = "component-js";

const INDENT: &str = "  ";

/// Emits the template chunk and the script chunk of a Vue component.
///
/// The UIDL is not modified. Element dependencies are registered so the
/// import plugin brings them into scope, and listed under `components`.
/// Slots render their fallback when nothing is passed, as Vue slots do.
#[derive(Debug)]
pub struct VueComponentPlugin {
    options: JsxOptions,
    printer: JsxPrinter,
}

impl VueComponentPlugin {
    pub fn new() -> Self {
        Self {
            options: JsxOptions {
                reference_prefixes: ReferencePrefixMap::template(),
                ..JsxOptions::default()
            },
            printer: JsxPrinter::new().ascii_only(false),
        }
    }
}

impl Default for VueComponentPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for VueComponentPlugin {
    fn name(&self) -> &'static str {
        "vue-component"
    }

    fn run(&self, mut structure: GenerationStructure) -> Result<GenerationStructure> {
        let mut writer = TemplateWriter {
            options: &self.options,
            printer: &self.printer,
            arena: JsxArena::new(),
            dependencies: &mut structure.dependencies,
            components: Vec::new(),
        };
        let markup = writer.node(&structure.uidl.node, 0)?;
        let components = writer.components;

        let statements = script(&structure, &components);
        structure.push_chunk(Chunk::markup(VUE_TEMPLATE_CHUNK, FileType::Html, markup));
        structure.push_chunk(Chunk::ast(VUE_SCRIPT_CHUNK, statements).link_after(&IMPORT_CHUNKS));
        Ok(structure)
    }
}

/// `const TOKENS = ...` when there are tokens, then the exported options.
fn script(structure: &GenerationStructure, components: &[String]) -> Vec<Statement> {
    let uidl = &structure.uidl;
    let mut statements = Vec::new();
    let mut options = vec![ObjectProperty::new(
        "name",
        Expression::String(component_name(uidl)),
    )];

    if !components.is_empty() {
        let registered = components
            .iter()
            .map(|name| ObjectProperty::new(name.as_str(), Expression::identifier(name.as_str())))
            .collect();
        options.push(ObjectProperty::new("components", Expression::Object(registered)));
    }

    let props: Vec<_> = uidl
        .prop_definitions
        .iter()
        .filter_map(|(prop, definition)| {
            let constructor = prop_constructor(definition.prop_type)?;
            let mut fields = vec![ObjectProperty::new("type", Expression::identifier(constructor))];
            if definition.required {
                fields.push(ObjectProperty::new("required", Expression::Boolean(true)));
            }
            if let Some(default) = &definition.default_value {
                fields.push(ObjectProperty::new("default", static_expression(default)));
            }
            Some(ObjectProperty::new(prop.as_str(), Expression::Object(fields)))
        })
        .collect();
    if !props.is_empty() {
        options.push(ObjectProperty::new("props", Expression::Object(props)));
    }

    let mut data: Vec<_> = uidl
        .state_definitions
        .iter()
        .map(|(state, definition)| {
            ObjectProperty::new(state.as_str(), static_expression(&definition.default_value))
        })
        .collect();
    if !uidl.design_tokens.is_empty() {
        let tokens = uidl
            .design_tokens
            .iter()
            .map(|(token, value)| ObjectProperty::new(token.as_str(), static_expression(value)))
            .collect();
        statements.push(Statement::constant(TOKENS_IDENTIFIER, Expression::Object(tokens)));
        data.push(ObjectProperty::new(
            TOKENS_IDENTIFIER,
            Expression::identifier(TOKENS_IDENTIFIER),
        ));
    }
    if !data.is_empty() {
        options.push(ObjectProperty::new(
            "data",
            Expression::arrow(vec![], Expression::Object(data)),
        ));
    }

    statements.push(Statement::ExportDefault(Expression::Object(options)));
    statements
}

/// Children are passed as slots, not props.
fn prop_constructor(prop_type: PropType) -> Option<&'static str> {
    match prop_type {
        PropType::String => Some("String"),
        PropType::Number => Some("Number"),
        PropType::Boolean => Some("Boolean"),
        PropType::Array => Some("Array"),
        PropType::Object => Some("Object"),
        PropType::Func => Some("Function"),
        PropType::Children => None,
    }
}

struct TemplateWriter<'a> {
    options: &'a JsxOptions,
    printer: &'a JsxPrinter,
    arena: JsxArena,
    dependencies: &'a mut DependencyTable,
    components: Vec<String>,
}

impl TemplateWriter<'_> {
    fn node(&mut self, node: &UidlNode, level: usize) -> Result<String> {
        match node {
            UidlNode::Static(value) => Ok(self.text(&value.to_text())),
            UidlNode::Dynamic(reference) => {
                let expression = reference_expression(reference, self.options)?;
                Ok(format!("{{{{ {} }}}}", self.expression(&expression)))
            }
            UidlNode::Raw(markup) => Ok(markup.clone()),
            UidlNode::Element(element) => self.element(element, Vec::new(), level),
            UidlNode::Repeat(repeat) => self.repeat(repeat, level),
            UidlNode::Conditional(conditional) => self.conditional(conditional, level),
            UidlNode::Slot(slot) => self.slot(slot, level),
        }
    }

    fn element(&mut self, element: &ElementNode, directives: Vec<String>, level: usize) -> Result<String> {
        let tag = self.tag(element);
        trace!(element = %element.element_type, %tag, "Writing template element");

        let mut attributes = directives;
        let mut children = Vec::new();
        for (name, value) in &element.attrs {
            match value {
                AttributeValue::Static(StaticValue::String(text)) => {
                    attributes.push(format!("{name}=\"{}\"", escape_attribute(text)));
                }
                AttributeValue::Static(other) => {
                    attributes.push(self.bind(name, &static_expression(other)));
                }
                AttributeValue::Dynamic(reference) => {
                    let expression = reference_expression(reference, self.options)?;
                    attributes.push(self.bind(name, &expression));
                }
                AttributeValue::Import { id } => {
                    attributes.push(self.bind(name, &Expression::identifier(id.as_str())));
                }
                AttributeValue::Slot(content) => {
                    let content = self.node(content, level + 1)?;
                    children.push(format!("<template #{name}>{content}</template>"));
                }
            }
        }

        let mut rules = Vec::new();
        let mut bound = Vec::new();
        for (property, value) in &element.style {
            match value {
                StyleValue::Static(value) => {
                    rules.push(format!("{}: {}", property.to_case(Case::Kebab), css_value(property, value)));
                }
                StyleValue::Dynamic(reference) => bound.push(ObjectProperty::new(
                    property.to_case(Case::Camel),
                    reference_expression(reference, self.options)?,
                )),
            }
        }
        if !rules.is_empty() {
            attributes.push(format!("style=\"{}\"", escape_attribute(&rules.join("; "))));
        }
        if !bound.is_empty() {
            attributes.push(self.bind("style", &Expression::Object(bound)));
        }

        for (event, handlers) in &element.events {
            if handlers.is_empty() {
                continue;
            }
            let statements = handlers
                .iter()
                .map(|handler| self.handler(handler))
                .collect::<Result<Vec<_>>>()?;
            attributes.push(format!("@{event}=\"{}\"", escape_attribute(&statements.join("; "))));
        }

        let inline = element
            .children
            .iter()
            .any(|child| matches!(child, UidlNode::Static(_) | UidlNode::Dynamic(_) | UidlNode::Raw(_)));
        for child in &element.children {
            children.push(self.node(child, level + 1)?);
        }

        let mut out = format!("<{tag}");
        for attribute in &attributes {
            out.push(' ');
            out.push_str(attribute);
        }
        if children.is_empty() {
            if element.self_closing {
                out.push_str(" />");
            } else {
                out.push_str(&format!("></{tag}>"));
            }
            return Ok(out);
        }

        out.push('>');
        if inline {
            out.push_str(&children.concat());
        } else {
            let pad = INDENT.repeat(level + 1);
            for child in &children {
                out.push('\n');
                out.push_str(&pad);
                out.push_str(child);
            }
            out.push('\n');
            out.push_str(&INDENT.repeat(level));
        }
        out.push_str(&format!("</{tag}>"));
        Ok(out)
    }

    /// The tag an element is written with, registering its dependency.
    fn tag(&mut self, element: &ElementNode) -> String {
        let Some(dependency) = &element.dependency else {
            return element.element_type.clone();
        };
        let bound = self
            .dependencies
            .register(&element.element_type, dependency.clone());
        if !self.components.contains(&bound) {
            self.components.push(bound.clone());
        }
        bound
    }

    /// `v-for` and `:key` on the repeated element.
    fn repeat(&mut self, repeat: &RepeatNode, level: usize) -> Result<String> {
        let source = match &repeat.data_source {
            RepeatSource::Reference(reference) => reference_expression(reference, self.options)?,
            RepeatSource::Inline(items) => Expression::Array(items.iter().map(static_expression).collect()),
        };
        let item = repeat.meta.iterator_name();
        let binding = if repeat.meta.binds_index() {
            format!("({item}, {})", uidl_core::INDEX_NAME)
        } else {
            item.to_string()
        };
        let key = reference_expression(&DynamicReference::local(repeat.meta.iterator_key()), self.options)?;

        let directives = vec![
            format!("v-for=\"{}\"", escape_attribute(&format!("{binding} in {}", self.expression(&source)))),
            self.bind("key", &key),
        ];
        self.element(&repeat.node, directives, level)
    }

    /// `v-if` on the subtree, through a `template` wrapper when it is not
    /// an element.
    fn conditional(&mut self, conditional: &ConditionalNode, level: usize) -> Result<String> {
        let subject = reference_expression(&conditional.reference, self.options)?;
        let test = condition_expression(&subject, &conditional.effective_condition());
        let directive = format!("v-if=\"{}\"", escape_attribute(&self.expression(&test)));
        match conditional.node.as_ref() {
            UidlNode::Element(element) => self.element(element, vec![directive], level),
            other => {
                let content = self.node(other, level + 1)?;
                Ok(format!("<template {directive}>{content}</template>"))
            }
        }
    }

    fn slot(&mut self, slot: &SlotNode, level: usize) -> Result<String> {
        let open = match &slot.name {
            Some(name) => format!("<slot name=\"{}\">", escape_attribute(name)),
            None => "<slot>".to_string(),
        };
        let fallback = match &slot.fallback {
            Some(fallback) => self.node(fallback, level + 1)?,
            None => String::new(),
        };
        Ok(format!("{open}{fallback}</slot>"))
    }

    fn handler(&self, handler: &EventHandler) -> Result<String> {
        match handler {
            EventHandler::StateChange { modifies, new_state } => {
                let target = reference_expression(&DynamicReference::state(modifies), self.options)?;
                let value = if new_state.as_str() == Some(TOGGLE_STATE) {
                    Expression::not(target.clone())
                } else {
                    static_expression(new_state)
                };
                Ok(format!("{} = {}", self.expression(&target), self.expression(&value)))
            }
            EventHandler::PropCall { calls, args } => {
                let callee = reference_expression(&DynamicReference::prop(calls), self.options)?;
                let call = Expression::call(callee, args.iter().map(static_expression).collect());
                Ok(self.expression(&call))
            }
        }
    }

    /// `:name="expression"`
    fn bind(&self, name: &str, expression: &Expression) -> String {
        format!(":{name}=\"{}\"", escape_attribute(&self.expression(expression)))
    }

    fn expression(&self, expression: &Expression) -> String {
        self.printer.print_expression(expression, &self.arena)
    }

    /// Text that would read as an interpolation is kept out of compilation.
    fn text(&self, text: &str) -> String {
        if text.contains("{{") {
            format!("<span v-pre>{}</span>", escape_text(text))
        } else {
            escape_text(text)
        }
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_attribute(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}
