//! JSX target syntax and its printer.

pub mod ast;
mod printer;

pub use ast::{
    ArrowBody, BinaryOperator, Binding, ElementId, Expression, ImportDeclaration, ImportSpecifier,
    JsxArena, JsxAttribute, JsxAttributeValue, JsxChild, JsxElement, LogicalOperator,
    ObjectProperty, Statement, UnaryOperator,
};
pub use printer::{is_identifier, CodePrinter, JsxPrinter};
