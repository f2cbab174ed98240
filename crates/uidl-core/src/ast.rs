//! UIDL node types and the component/project envelopes.
//!
//! These are plain data: the node compiler, the resolver and the pipeline
//! plugins read them, nothing here has behavior beyond construction and the
//! structural checks in [`crate::validate`].

use indexmap::IndexMap;

/// A node in a UIDL tree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", content = "content", rename_all = "lowercase")
)]
pub enum UidlNode {
    /// Literal scalar content.
    Static(StaticValue),
    /// Reference to a prop, state, local or token value.
    Dynamic(DynamicReference),
    /// Pre-formed markup, optionally injected unescaped.
    Raw(String),
    Element(ElementNode),
    Repeat(RepeatNode),
    Conditional(ConditionalNode),
    Slot(SlotNode),
}

impl UidlNode {
    /// The tag this node carries in its serialized form.
    pub fn tag(&self) -> &'static str {
        match self {
            UidlNode::Static(_) => "static",
            UidlNode::Dynamic(_) => "dynamic",
            UidlNode::Raw(_) => "raw",
            UidlNode::Element(_) => "element",
            UidlNode::Repeat(_) => "repeat",
            UidlNode::Conditional(_) => "conditional",
            UidlNode::Slot(_) => "slot",
        }
    }

    /// Whether this node may be the root of a component.
    pub fn is_renderable_root(&self) -> bool {
        matches!(
            self,
            UidlNode::Element(_) | UidlNode::Repeat(_) | UidlNode::Conditional(_)
        )
    }
}

/// A literal scalar.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum StaticValue {
    Boolean(bool),
    Number(f64),
    String(String),
}

impl StaticValue {
    /// The string used when this value is rendered as text content.
    pub fn to_text(&self) -> String {
        match self {
            StaticValue::Boolean(b) => b.to_string(),
            StaticValue::Number(n) => format_number(*n),
            StaticValue::String(s) => s.clone(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            StaticValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for StaticValue {
    fn from(s: &str) -> Self {
        StaticValue::String(s.to_string())
    }
}

impl From<String> for StaticValue {
    fn from(s: String) -> Self {
        StaticValue::String(s)
    }
}

impl From<f64> for StaticValue {
    fn from(n: f64) -> Self {
        StaticValue::Number(n)
    }
}

impl From<bool> for StaticValue {
    fn from(b: bool) -> Self {
        StaticValue::Boolean(b)
    }
}

/// Render a number the way JavaScript prints it: integral values drop the
/// fractional part.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// What kind of declaration a dynamic reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ReferenceType {
    Prop,
    State,
    Local,
    Token,
}

impl std::fmt::Display for ReferenceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Prop => write!(f, "prop"),
            Self::State => write!(f, "state"),
            Self::Local => write!(f, "local"),
            Self::Token => write!(f, "token"),
        }
    }
}

/// A reference to a named value resolved at generation time.
///
/// Dotted ids (`item.title`) address a member of the referenced value; the
/// first segment is the declared name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DynamicReference {
    pub id: String,
    pub reference_type: ReferenceType,
}

impl DynamicReference {
    pub fn new(reference_type: ReferenceType, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            reference_type,
        }
    }

    pub fn prop(id: impl Into<String>) -> Self {
        Self::new(ReferenceType::Prop, id)
    }

    pub fn state(id: impl Into<String>) -> Self {
        Self::new(ReferenceType::State, id)
    }

    pub fn local(id: impl Into<String>) -> Self {
        Self::new(ReferenceType::Local, id)
    }

    pub fn token(id: impl Into<String>) -> Self {
        Self::new(ReferenceType::Token, id)
    }

    /// The declared name this reference resolves against.
    pub fn root_name(&self) -> &str {
        self.id.split('.').next().unwrap_or(&self.id)
    }
}

/// An element node: a tag with attributes, events, style and children.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ElementNode {
    pub element_type: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub name: Option<String>,
    /// Stable identifier under which the compiled node is recorded.
    #[cfg_attr(feature = "serde", serde(default))]
    pub key: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub self_closing: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attrs: IndexMap<String, AttributeValue>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub events: IndexMap<String, Vec<EventHandler>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub style: IndexMap<String, StyleValue>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub children: Vec<UidlNode>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub dependency: Option<Dependency>,
}

impl ElementNode {
    pub fn new(element_type: impl Into<String>) -> Self {
        Self {
            element_type: element_type.into(),
            ..Self::default()
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: AttributeValue) -> Self {
        self.attrs.insert(name.into(), value);
        self
    }

    pub fn with_event(mut self, name: impl Into<String>, handler: EventHandler) -> Self {
        self.events.entry(name.into()).or_default().push(handler);
        self
    }

    pub fn with_style(mut self, property: impl Into<String>, value: StyleValue) -> Self {
        self.style.insert(property.into(), value);
        self
    }

    pub fn with_child(mut self, child: UidlNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_dependency(mut self, dependency: Dependency) -> Self {
        self.dependency = Some(dependency);
        self
    }

    pub fn self_closing(mut self) -> Self {
        self.self_closing = true;
        self
    }
}

/// The value of an element attribute.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", content = "content", rename_all = "lowercase")
)]
pub enum AttributeValue {
    Static(StaticValue),
    Dynamic(DynamicReference),
    /// A bare identifier brought in by an import.
    Import { id: String },
    /// A node passed to the element as a prop.
    Slot(Box<UidlNode>),
}

impl AttributeValue {
    pub fn kind(&self) -> &'static str {
        match self {
            AttributeValue::Static(_) => "static",
            AttributeValue::Dynamic(_) => "dynamic",
            AttributeValue::Import { .. } => "import",
            AttributeValue::Slot(_) => "slot",
        }
    }
}

/// A single style declaration value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", content = "content", rename_all = "lowercase")
)]
pub enum StyleValue {
    Static(StaticValue),
    Dynamic(DynamicReference),
}

/// One statement of an event handler.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "camelCase"))]
pub enum EventHandler {
    /// Assign a new value to a state entry. The string `$toggle` negates it.
    StateChange {
        modifies: String,
        #[cfg_attr(feature = "serde", serde(rename = "newState"))]
        new_state: StaticValue,
    },
    /// Invoke a function received through props.
    PropCall {
        calls: String,
        #[cfg_attr(feature = "serde", serde(default))]
        args: Vec<StaticValue>,
    },
}

/// Marker value that flips a boolean state entry.
pub const TOGGLE_STATE: &str = "$toggle";

/// A repeated element template.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RepeatNode {
    #[cfg_attr(feature = "serde", serde(with = "envelope::element"))]
    pub node: ElementNode,
    pub data_source: RepeatSource,
    #[cfg_attr(feature = "serde", serde(default))]
    pub meta: RepeatMeta,
}

/// Where a repeat takes its items from.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", content = "content"))]
pub enum RepeatSource {
    #[cfg_attr(feature = "serde", serde(rename = "dynamic"))]
    Reference(DynamicReference),
    #[cfg_attr(feature = "serde", serde(rename = "static"))]
    Inline(Vec<StaticValue>),
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RepeatMeta {
    #[cfg_attr(feature = "serde", serde(default))]
    pub iterator_name: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub iterator_key: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub use_index: bool,
}

/// Name bound to each item when the repeat does not name it.
pub const DEFAULT_ITERATOR_NAME: &str = "item";
/// Name bound to the item position.
pub const INDEX_NAME: &str = "index";

impl RepeatMeta {
    pub fn iterator_name(&self) -> &str {
        self.iterator_name.as_deref().unwrap_or(DEFAULT_ITERATOR_NAME)
    }

    /// The key expression for each item; falls back to the index.
    pub fn iterator_key(&self) -> &str {
        self.iterator_key.as_deref().unwrap_or(INDEX_NAME)
    }

    /// Whether the index must be bound, either on request or because the
    /// key fell back to it.
    pub fn binds_index(&self) -> bool {
        self.use_index || self.iterator_key.is_none()
    }
}

/// A subtree rendered only when its test passes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ConditionalNode {
    pub node: Box<UidlNode>,
    #[cfg_attr(feature = "serde", serde(with = "envelope::dynamic"))]
    pub reference: DynamicReference,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub value: Option<StaticValue>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub condition: Option<ConditionalExpression>,
}

impl ConditionalNode {
    /// The effective test: an equality against `value` when set, otherwise
    /// the explicit condition (an empty condition tests truthiness).
    pub fn effective_condition(&self) -> ConditionalExpression {
        match (&self.value, &self.condition) {
            (Some(value), _) => ConditionalExpression {
                conditions: vec![Condition {
                    operation: Operation::Equal,
                    operand: Some(value.clone()),
                }],
                match_type: MatchType::All,
            },
            (None, Some(condition)) => condition.clone(),
            (None, None) => ConditionalExpression {
                conditions: vec![Condition {
                    operation: Operation::Truthy,
                    operand: None,
                }],
                match_type: MatchType::All,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ConditionalExpression {
    pub conditions: Vec<Condition>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub match_type: MatchType,
}

/// How multiple conditions combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MatchType {
    #[default]
    All,
    Any,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Condition {
    pub operation: Operation,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub operand: Option<StaticValue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Operation {
    #[cfg_attr(feature = "serde", serde(rename = "==="))]
    Equal,
    #[cfg_attr(feature = "serde", serde(rename = "!=="))]
    NotEqual,
    #[cfg_attr(feature = "serde", serde(rename = ">"))]
    Greater,
    #[cfg_attr(feature = "serde", serde(rename = ">="))]
    GreaterOrEqual,
    #[cfg_attr(feature = "serde", serde(rename = "<"))]
    Less,
    #[cfg_attr(feature = "serde", serde(rename = "<="))]
    LessOrEqual,
    #[cfg_attr(feature = "serde", serde(rename = "truthy"))]
    Truthy,
    #[cfg_attr(feature = "serde", serde(rename = "falsy"))]
    Falsy,
}

/// A placeholder for externally supplied children.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotNode {
    /// Named slots forward a prop of that name instead of the children.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub name: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub fallback: Option<Box<UidlNode>>,
}

/// An import the generated code needs.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Dependency {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub dependency_type: DependencyType,
    pub path: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub version: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub meta: DependencyMeta,
}

impl Dependency {
    pub fn package(path: impl Into<String>, version: Option<&str>) -> Self {
        Self {
            dependency_type: DependencyType::Package,
            path: path.into(),
            version: version.map(str::to_string),
            meta: DependencyMeta::default(),
        }
    }

    pub fn local(path: impl Into<String>) -> Self {
        Self {
            dependency_type: DependencyType::Local,
            path: path.into(),
            version: None,
            meta: DependencyMeta::default(),
        }
    }

    pub fn custom(path: impl Into<String>) -> Self {
        Self {
            dependency_type: DependencyType::Custom,
            path: path.into(),
            version: None,
            meta: DependencyMeta::default(),
        }
    }

    /// Mark the dependency as a named (`{ X }`) import.
    pub fn named(mut self) -> Self {
        self.meta.named = true;
        self
    }

    /// Whether two dependencies describe the same import, ignoring the
    /// bookkeeping recorded when a binding was renamed.
    pub fn same_import(&self, other: &Dependency) -> bool {
        self.dependency_type == other.dependency_type
            && self.path == other.path
            && self.meta.named == other.meta.named
            && self.meta.import_alias == other.meta.import_alias
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DependencyType {
    /// Published package, listed in the project manifest.
    Package,
    /// Module inside the generated project.
    Local,
    /// Anything else the caller provides (CDN builds, globals).
    Custom,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DependencyMeta {
    #[cfg_attr(feature = "serde", serde(default))]
    pub named: bool,
    /// Name exported by the module when the binding was renamed.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub original_name: Option<String>,
    /// Exported name when it differs from the tag using it.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub import_alias: Option<String>,
}

/// A component definition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ComponentUidl {
    pub name: String,
    pub node: UidlNode,
    #[cfg_attr(feature = "serde", serde(default))]
    pub prop_definitions: IndexMap<String, PropDefinition>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub state_definitions: IndexMap<String, StateDefinition>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub design_tokens: IndexMap<String, StaticValue>,
}

impl ComponentUidl {
    pub fn new(name: impl Into<String>, node: UidlNode) -> Self {
        Self {
            name: name.into(),
            node,
            prop_definitions: IndexMap::new(),
            state_definitions: IndexMap::new(),
            design_tokens: IndexMap::new(),
        }
    }

    pub fn with_prop(mut self, name: impl Into<String>, definition: PropDefinition) -> Self {
        self.prop_definitions.insert(name.into(), definition);
        self
    }

    pub fn with_state(mut self, name: impl Into<String>, definition: StateDefinition) -> Self {
        self.state_definitions.insert(name.into(), definition);
        self
    }

    pub fn with_token(mut self, name: impl Into<String>, value: StaticValue) -> Self {
        self.design_tokens.insert(name.into(), value);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PropDefinition {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub prop_type: PropType,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub default_value: Option<StaticValue>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub required: bool,
}

impl PropDefinition {
    pub fn new(prop_type: PropType) -> Self {
        Self {
            prop_type,
            default_value: None,
            required: false,
        }
    }

    pub fn with_default(mut self, value: impl Into<StaticValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PropType {
    String,
    Number,
    Boolean,
    Array,
    Object,
    Func,
    Children,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct StateDefinition {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub state_type: PropType,
    pub default_value: StaticValue,
    /// Enumerated values; the project root's `route` state lists its pages here.
    #[cfg_attr(feature = "serde", serde(default))]
    pub values: Vec<StateValueDetails>,
}

impl StateDefinition {
    pub fn new(state_type: PropType, default_value: impl Into<StaticValue>) -> Self {
        Self {
            state_type,
            default_value: default_value.into(),
            values: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct StateValueDetails {
    pub value: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub page_options: Option<PageOptions>,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PageOptions {
    #[cfg_attr(feature = "serde", serde(default))]
    pub component_name: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub nav_link: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub file_name: Option<String>,
}

/// Name of the root state that selects the current page.
pub const ROUTE_STATE: &str = "route";

/// A complete project: an application root plus its components.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ProjectUidl {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub globals: ProjectGlobals,
    pub root: ComponentUidl,
    #[cfg_attr(feature = "serde", serde(default))]
    pub components: Vec<ComponentUidl>,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ProjectGlobals {
    #[cfg_attr(feature = "serde", serde(default))]
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub language: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub meta: Vec<MetaTag>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetaTag {
    pub name: String,
    pub content: String,
}

/// Serializes a bare element or reference inside its `{type, content}`
/// envelope, matching how the same values appear as standalone nodes.
#[cfg(feature = "serde")]
mod envelope {
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize)]
    #[serde(tag = "type", content = "content", rename_all = "lowercase")]
    enum Element<T> {
        Element(T),
    }

    #[derive(Serialize, Deserialize)]
    #[serde(tag = "type", content = "content", rename_all = "lowercase")]
    enum Dynamic<T> {
        Dynamic(T),
    }

    pub mod element {
        use super::Element;
        use crate::ast::ElementNode;
        use serde::{Deserialize, Deserializer, Serialize, Serializer};

        pub fn serialize<S: Serializer>(node: &ElementNode, s: S) -> Result<S::Ok, S::Error> {
            Element::Element(node).serialize(s)
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<ElementNode, D::Error> {
            let Element::Element(node) = Element::<ElementNode>::deserialize(d)?;
            Ok(node)
        }
    }

    pub mod dynamic {
        use super::Dynamic;
        use crate::ast::DynamicReference;
        use serde::{Deserialize, Deserializer, Serialize, Serializer};

        pub fn serialize<S: Serializer>(
            reference: &DynamicReference,
            s: S,
        ) -> Result<S::Ok, S::Error> {
            Dynamic::Dynamic(reference).serialize(s)
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DynamicReference, D::Error> {
            let Dynamic::Dynamic(reference) = Dynamic::<DynamicReference>::deserialize(d)?;
            Ok(reference)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeat_meta_defaults() {
        let meta = RepeatMeta::default();
        assert_eq!(meta.iterator_name(), "item");
        assert_eq!(meta.iterator_key(), "index");
        assert!(meta.binds_index());

        let keyed = RepeatMeta {
            iterator_name: Some("user".into()),
            iterator_key: Some("user.id".into()),
            use_index: false,
        };
        assert!(!keyed.binds_index());
    }

    #[test]
    fn test_conditional_value_becomes_equality() {
        let node = ConditionalNode {
            node: Box::new(UidlNode::Static("hi".into())),
            reference: DynamicReference::state("isVisible"),
            value: Some(StaticValue::Boolean(true)),
            condition: None,
        };
        let condition = node.effective_condition();
        assert_eq!(condition.conditions.len(), 1);
        assert_eq!(condition.conditions[0].operation, Operation::Equal);
        assert_eq!(condition.conditions[0].operand, Some(StaticValue::Boolean(true)));
    }

    #[test]
    fn test_same_import_ignores_original_name() {
        let a = Dependency::local("../components/button");
        let mut b = a.clone();
        b.meta.original_name = Some("Button".into());
        assert!(a.same_import(&b));
        assert!(!a.same_import(&Dependency::local("../components/fancy")));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(2.5), "2.5");
    }

    #[test]
    fn test_reference_root_name() {
        assert_eq!(DynamicReference::local("item.title").root_name(), "item");
        assert_eq!(DynamicReference::prop("title").root_name(), "title");
    }
}
