//! Expressions for references, literals, conditions and event handlers.

use crate::compiler::JsxOptions;
use crate::error::{CodegenError, Result};
use crate::jsx::{BinaryOperator, Expression, LogicalOperator, Statement};
use convert_case::{Case, Casing};
use uidl_core::{
    Condition, ConditionalExpression, DynamicReference, EventHandler, MatchType, Operation,
    StaticValue, TOGGLE_STATE,
};

/// The identifier expression a reference compiles to, e.g. `props.title`.
pub fn reference_expression(reference: &DynamicReference, options: &JsxOptions) -> Result<Expression> {
    let prefix = options
        .reference_prefixes
        .get(reference.reference_type)
        .ok_or_else(|| CodegenError::UnmappedReference {
            reference_type: reference.reference_type,
            id: reference.id.clone(),
        })?;

    Ok(match prefix {
        Some(prefix) => reference
            .id
            .split('.')
            .fold(Expression::path(prefix), |object, segment| {
                Expression::member(object, segment)
            }),
        None => Expression::path(&reference.id),
    })
}

pub fn static_expression(value: &StaticValue) -> Expression {
    match value {
        StaticValue::Boolean(b) => Expression::Boolean(*b),
        StaticValue::Number(n) => Expression::Number(*n),
        StaticValue::String(s) => Expression::String(s.clone()),
    }
}

/// The test guarding a conditional subtree.
///
/// Conditions combine with `&&` for `All` and `||` for `Any`; an empty list
/// tests the subject's truthiness.
pub fn condition_expression(subject: &Expression, condition: &ConditionalExpression) -> Expression {
    let operator = match condition.match_type {
        MatchType::All => LogicalOperator::And,
        MatchType::Any => LogicalOperator::Or,
    };
    condition
        .conditions
        .iter()
        .map(|c| single_condition(subject, c))
        .reduce(|left, right| Expression::logical(operator, left, right))
        .unwrap_or_else(|| subject.clone())
}

fn single_condition(subject: &Expression, condition: &Condition) -> Expression {
    let operator = match condition.operation {
        Operation::Truthy => return subject.clone(),
        Operation::Falsy => return Expression::not(subject.clone()),
        Operation::Equal => BinaryOperator::StrictEqual,
        Operation::NotEqual => BinaryOperator::StrictNotEqual,
        Operation::Greater => BinaryOperator::Greater,
        Operation::GreaterOrEqual => BinaryOperator::GreaterOrEqual,
        Operation::Less => BinaryOperator::Less,
        Operation::LessOrEqual => BinaryOperator::LessOrEqual,
    };
    let operand = condition
        .operand
        .as_ref()
        .map(static_expression)
        .unwrap_or(Expression::Null);
    Expression::binary(operator, subject.clone(), operand)
}

/// `isOpen` is written through `setIsOpen`.
pub fn state_setter(state: &str) -> String {
    format!("set{}", state.to_case(Case::Pascal))
}

/// The JSX attribute an event handler is attached to.
pub fn event_attribute_name(event: &str) -> String {
    if event.starts_with("on") && event.chars().nth(2).is_some_and(|c| c.is_ascii_uppercase()) {
        return event.to_string();
    }
    let name = match event {
        "dblclick" => "DoubleClick",
        "keydown" => "KeyDown",
        "keyup" => "KeyUp",
        "keypress" => "KeyPress",
        "mouseenter" => "MouseEnter",
        "mouseleave" => "MouseLeave",
        "mouseover" => "MouseOver",
        "mouseout" => "MouseOut",
        "mousedown" => "MouseDown",
        "mouseup" => "MouseUp",
        other => return format!("on{}", other.to_case(Case::Pascal)),
    };
    format!("on{name}")
}

/// The arrow function run for an event.
pub fn handler_expression(handlers: &[EventHandler], options: &JsxOptions) -> Result<Expression> {
    let mut calls = handlers
        .iter()
        .map(|handler| handler_call(handler, options))
        .collect::<Result<Vec<_>>>()?;

    if calls.len() == 1 {
        if let Some(call) = calls.pop() {
            return Ok(Expression::arrow(vec![], call));
        }
    }
    Ok(Expression::arrow_block(
        vec![],
        calls.into_iter().map(Statement::Expression).collect(),
    ))
}

fn handler_call(handler: &EventHandler, options: &JsxOptions) -> Result<Expression> {
    match handler {
        EventHandler::StateChange { modifies, new_state } => {
            let value = if new_state.as_str() == Some(TOGGLE_STATE) {
                Expression::not(reference_expression(&DynamicReference::state(modifies), options)?)
            } else {
                static_expression(new_state)
            };
            Ok(Expression::call(Expression::identifier(state_setter(modifies)), vec![value]))
        }
        EventHandler::PropCall { calls, args } => {
            let callee = reference_expression(&DynamicReference::prop(calls), options)?;
            Ok(Expression::call(callee, args.iter().map(static_expression).collect()))
        }
    }
}
