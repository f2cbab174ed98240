//! JavaScript/JSX syntax produced by the node compiler and the plugins.
//!
//! Elements are stored in a [`JsxArena`] and referenced by [`ElementId`], so
//! a plugin that runs after compilation can add attributes to an element it
//! finds through the nodes lookup without walking the tree again.

use std::ops::{Index, IndexMut};

/// Handle to an element stored in a [`JsxArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

impl ElementId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Owner of every element compiled for one generation run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsxArena {
    elements: Vec<JsxElement>,
}

impl JsxArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an element and return its handle.
    pub fn alloc(&mut self, element: JsxElement) -> ElementId {
        let id = ElementId(self.elements.len());
        self.elements.push(element);
        id
    }

    pub fn get(&self, id: ElementId) -> Option<&JsxElement> {
        self.elements.get(id.0)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut JsxElement> {
        self.elements.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl Index<ElementId> for JsxArena {
    type Output = JsxElement;

    fn index(&self, id: ElementId) -> &JsxElement {
        &self.elements[id.0]
    }
}

impl IndexMut<ElementId> for JsxArena {
    fn index_mut(&mut self, id: ElementId) -> &mut JsxElement {
        &mut self.elements[id.0]
    }
}

/// A JSX element.
#[derive(Debug, Clone, PartialEq)]
pub struct JsxElement {
    pub name: String,
    pub attributes: Vec<JsxAttribute>,
    pub children: Vec<JsxChild>,
    /// Printed as `<name />` when there are no children.
    pub self_closing: bool,
}

impl JsxElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            self_closing: false,
        }
    }

    pub fn self_closing(mut self) -> Self {
        self.self_closing = true;
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: JsxAttributeValue) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_child(mut self, child: JsxChild) -> Self {
        self.children.push(child);
        self
    }

    /// Set an attribute, replacing the value of an existing one in place.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: JsxAttributeValue) {
        let name = name.into();
        match self.attributes.iter_mut().find(|attr| attr.name == name) {
            Some(existing) => existing.value = value,
            None => self.attributes.push(JsxAttribute { name, value }),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&JsxAttributeValue> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| &attr.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct JsxAttribute {
    pub name: String,
    pub value: JsxAttributeValue,
}

#[derive(Debug, Clone, PartialEq)]
pub enum JsxAttributeValue {
    /// `name="value"`
    String(String),
    /// `name={expression}`
    Expression(Expression),
    /// A bare boolean attribute: `name`
    Flag,
}

#[derive(Debug, Clone, PartialEq)]
pub enum JsxChild {
    Text(String),
    Element(ElementId),
    /// `{expression}`
    Expression(Expression),
}

/// A JavaScript expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(String),
    Member {
        object: Box<Expression>,
        property: String,
    },
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
    Array(Vec<Expression>),
    Object(Vec<ObjectProperty>),
    Binary {
        operator: BinaryOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Logical {
        operator: LogicalOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Unary {
        operator: UnaryOperator,
        argument: Box<Expression>,
    },
    Call {
        callee: Box<Expression>,
        arguments: Vec<Expression>,
    },
    Arrow {
        params: Vec<String>,
        body: ArrowBody,
    },
    Jsx(ElementId),
}

impl Expression {
    pub fn identifier(name: impl Into<String>) -> Self {
        Expression::Identifier(name.into())
    }

    /// `object.property`
    pub fn member(object: Expression, property: impl Into<String>) -> Self {
        Expression::Member {
            object: Box::new(object),
            property: property.into(),
        }
    }

    /// A member path written with dots: `props.user.name`.
    pub fn path(dotted: &str) -> Self {
        let mut segments = dotted.split('.');
        let first = segments.next().unwrap_or_default();
        segments.fold(Expression::identifier(first), |object, segment| {
            Expression::member(object, segment)
        })
    }

    pub fn call(callee: Expression, arguments: Vec<Expression>) -> Self {
        Expression::Call {
            callee: Box::new(callee),
            arguments,
        }
    }

    pub fn binary(operator: BinaryOperator, left: Expression, right: Expression) -> Self {
        Expression::Binary {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn logical(operator: LogicalOperator, left: Expression, right: Expression) -> Self {
        Expression::Logical {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn not(argument: Expression) -> Self {
        Expression::Unary {
            operator: UnaryOperator::Not,
            argument: Box::new(argument),
        }
    }

    /// `(params) => body`
    pub fn arrow(params: Vec<String>, body: Expression) -> Self {
        Expression::Arrow {
            params,
            body: ArrowBody::Expression(Box::new(body)),
        }
    }

    pub fn arrow_block(params: Vec<String>, statements: Vec<Statement>) -> Self {
        Expression::Arrow {
            params,
            body: ArrowBody::Block(statements),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectProperty {
    pub key: String,
    pub value: Expression,
}

impl ObjectProperty {
    pub fn new(key: impl Into<String>, value: Expression) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArrowBody {
    Expression(Box<Expression>),
    Block(Vec<Statement>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    StrictEqual,
    StrictNotEqual,
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
}

impl BinaryOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOperator::StrictEqual => "===",
            BinaryOperator::StrictNotEqual => "!==",
            BinaryOperator::Greater => ">",
            BinaryOperator::GreaterOrEqual => ">=",
            BinaryOperator::Less => "<",
            BinaryOperator::LessOrEqual => "<=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    And,
    Or,
}

impl LogicalOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            LogicalOperator::And => "&&",
            LogicalOperator::Or => "||",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Not,
}

/// A top-level or block statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Import(ImportDeclaration),
    /// `const binding = init;`
    Const { binding: Binding, init: Expression },
    Expression(Expression),
    Return(Expression),
    /// `export default expression;`
    ExportDefault(Expression),
    /// `target = value;`
    Assignment { target: Expression, value: Expression },
}

impl Statement {
    pub fn constant(name: impl Into<String>, init: Expression) -> Self {
        Statement::Const {
            binding: Binding::Identifier(name.into()),
            init,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    Identifier(String),
    /// `[a, b]`
    ArrayPattern(Vec<String>),
}

/// `import Default, { named as local } from 'source';`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImportDeclaration {
    pub source: String,
    pub default: Option<String>,
    pub named: Vec<ImportSpecifier>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportSpecifier {
    pub imported: String,
    pub local: String,
}
