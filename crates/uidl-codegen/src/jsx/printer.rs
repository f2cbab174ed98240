//! Source text rendering for the JSX AST.

use super::ast::{
    ArrowBody, Binding, ElementId, Expression, ImportDeclaration, JsxArena, JsxAttribute,
    JsxAttributeValue, JsxChild, LogicalOperator, ObjectProperty, Statement,
};
use std::fmt::Write;
use uidl_core::format_number;

/// Renders statements to source text.
pub trait CodePrinter: Send + Sync {
    fn print(&self, statements: &[Statement], arena: &JsxArena) -> String;
}

/// Two-space indented JavaScript with JSX.
#[derive(Debug, Clone)]
pub struct JsxPrinter {
    pub indent_width: usize,
    /// Escape non-ASCII characters in string literals as `\uXXXX`.
    pub ascii_only: bool,
}

impl Default for JsxPrinter {
    fn default() -> Self {
        Self {
            indent_width: 2,
            ascii_only: true,
        }
    }
}

impl JsxPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ascii_only(mut self, ascii_only: bool) -> Self {
        self.ascii_only = ascii_only;
        self
    }

    /// Render one expression as it reads in expression position.
    pub fn print_expression(&self, expression: &Expression, arena: &JsxArena) -> String {
        self.writer(arena).expression(expression, 0)
    }

    fn writer<'a>(&self, arena: &'a JsxArena) -> Writer<'a> {
        Writer {
            arena,
            indent: " ".repeat(self.indent_width),
            ascii_only: self.ascii_only,
        }
    }
}

impl CodePrinter for JsxPrinter {
    fn print(&self, statements: &[Statement], arena: &JsxArena) -> String {
        let writer = self.writer(arena);

        let mut out = String::new();
        let mut previous: Option<&Statement> = None;
        for statement in statements {
            if let Some(previous) = previous {
                out.push('\n');
                let both_imports = matches!(previous, Statement::Import(_))
                    && matches!(statement, Statement::Import(_));
                if !both_imports {
                    out.push('\n');
                }
            }
            out.push_str(&writer.statement(statement, 0));
            previous = Some(statement);
        }
        out
    }
}

/// Binding strength of an expression, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Arrow,
    Or,
    And,
    Comparison,
    Unary,
    Member,
    Primary,
}

fn precedence(expression: &Expression) -> Precedence {
    match expression {
        Expression::Arrow { .. } => Precedence::Arrow,
        Expression::Logical {
            operator: LogicalOperator::Or,
            ..
        } => Precedence::Or,
        Expression::Logical {
            operator: LogicalOperator::And,
            ..
        } => Precedence::And,
        Expression::Binary { .. } => Precedence::Comparison,
        Expression::Unary { .. } => Precedence::Unary,
        Expression::Member { .. } | Expression::Call { .. } => Precedence::Member,
        _ => Precedence::Primary,
    }
}

struct Writer<'a> {
    arena: &'a JsxArena,
    indent: String,
    ascii_only: bool,
}

impl Writer<'_> {
    fn pad(&self, level: usize) -> String {
        self.indent.repeat(level)
    }

    fn statement(&self, statement: &Statement, level: usize) -> String {
        match statement {
            Statement::Import(import) => self.import(import),
            Statement::Const { binding, init } => format!(
                "const {} = {};",
                binding_text(binding),
                self.statement_value(init, level)
            ),
            Statement::Expression(expression) => {
                format!("{};", self.expression(expression, level))
            }
            Statement::Return(Expression::Jsx(id)) => format!(
                "return (\n{}{}\n{});",
                self.pad(level + 1),
                self.element(*id, level + 1),
                self.pad(level)
            ),
            Statement::Return(expression) => format!("return {};", self.expression(expression, level)),
            Statement::ExportDefault(expression) => {
                format!("export default {};", self.statement_value(expression, level))
            }
            Statement::Assignment { target, value } => format!(
                "{} = {};",
                self.expression(target, level),
                self.statement_value(value, level)
            ),
        }
    }

    /// Objects at statement level get one property per line.
    fn statement_value(&self, expression: &Expression, level: usize) -> String {
        match expression {
            Expression::Object(properties) if !properties.is_empty() => {
                let mut out = String::from("{\n");
                for property in properties {
                    let _ = writeln!(
                        out,
                        "{}{}: {},",
                        self.pad(level + 1),
                        self.property_key(&property.key),
                        self.statement_value(&property.value, level + 1)
                    );
                }
                out.push_str(&self.pad(level));
                out.push('}');
                out
            }
            other => self.expression(other, level),
        }
    }

    fn import(&self, import: &ImportDeclaration) -> String {
        let mut clauses = Vec::new();
        if let Some(default) = &import.default {
            clauses.push(default.clone());
        }
        if !import.named.is_empty() {
            let specifiers = import
                .named
                .iter()
                .map(|specifier| {
                    if specifier.imported == specifier.local {
                        specifier.local.clone()
                    } else {
                        format!("{} as {}", specifier.imported, specifier.local)
                    }
                })
                .collect::<Vec<_>>()
                .join(", ");
            clauses.push(format!("{{ {specifiers} }}"));
        }

        let source = self.string_literal(&import.source);
        if clauses.is_empty() {
            format!("import {source};")
        } else {
            format!("import {} from {source};", clauses.join(", "))
        }
    }

    fn expression(&self, expression: &Expression, level: usize) -> String {
        match expression {
            Expression::Identifier(name) => name.clone(),
            Expression::Member { object, property } => {
                let object = self.operand(object, level, Precedence::Member);
                if is_identifier(property) {
                    format!("{object}.{property}")
                } else {
                    format!("{object}[{}]", self.string_literal(property))
                }
            }
            Expression::String(value) => self.string_literal(value),
            Expression::Number(n) => format_number(*n),
            Expression::Boolean(b) => b.to_string(),
            Expression::Null => "null".to_string(),
            Expression::Array(items) => {
                let items = items
                    .iter()
                    .map(|item| self.expression(item, level))
                    .collect::<Vec<_>>();
                format!("[{}]", items.join(", "))
            }
            Expression::Object(properties) => self.inline_object(properties, level),
            Expression::Binary {
                operator,
                left,
                right,
            } => format!(
                "{} {} {}",
                self.operand(left, level, Precedence::Unary),
                operator.as_str(),
                self.operand(right, level, Precedence::Unary)
            ),
            Expression::Logical {
                operator,
                left,
                right,
            } => {
                let min = precedence(expression);
                format!(
                    "{} {} {}",
                    self.operand(left, level, min),
                    operator.as_str(),
                    self.operand(right, level, min)
                )
            }
            Expression::Unary { argument, .. } => {
                format!("!{}", self.operand(argument, level, Precedence::Unary))
            }
            Expression::Call { callee, arguments } => {
                let arguments = arguments
                    .iter()
                    .map(|argument| self.expression(argument, level))
                    .collect::<Vec<_>>();
                format!(
                    "{}({})",
                    self.operand(callee, level, Precedence::Member),
                    arguments.join(", ")
                )
            }
            Expression::Arrow { params, body } => {
                let params = format!("({})", params.join(", "));
                match body {
                    ArrowBody::Expression(body) => match body.as_ref() {
                        Expression::Object(_) => {
                            format!("{params} => ({})", self.expression(body, level))
                        }
                        other => format!("{params} => {}", self.expression(other, level)),
                    },
                    ArrowBody::Block(statements) => {
                        let mut out = format!("{params} => {{\n");
                        for statement in statements {
                            let _ = writeln!(
                                out,
                                "{}{}",
                                self.pad(level + 1),
                                self.statement(statement, level + 1)
                            );
                        }
                        out.push_str(&self.pad(level));
                        out.push('}');
                        out
                    }
                }
            }
            Expression::Jsx(id) => self.element(*id, level),
        }
    }

    /// An operand, parenthesized when it binds looser than `min`.
    fn operand(&self, expression: &Expression, level: usize, min: Precedence) -> String {
        let text = self.expression(expression, level);
        if precedence(expression) < min {
            format!("({text})")
        } else {
            text
        }
    }

    fn inline_object(&self, properties: &[ObjectProperty], level: usize) -> String {
        if properties.is_empty() {
            return "{}".to_string();
        }
        let properties = properties
            .iter()
            .map(|property| {
                format!(
                    "{}: {}",
                    self.property_key(&property.key),
                    self.expression(&property.value, level)
                )
            })
            .collect::<Vec<_>>();
        format!("{{ {} }}", properties.join(", "))
    }

    fn property_key(&self, key: &str) -> String {
        if is_identifier(key) {
            key.to_string()
        } else {
            self.string_literal(key)
        }
    }

    fn element(&self, id: ElementId, level: usize) -> String {
        let element = &self.arena[id];
        let mut out = format!("<{}", element.name);
        for attribute in &element.attributes {
            out.push(' ');
            out.push_str(&self.attribute(attribute, level));
        }

        if element.children.is_empty() {
            if element.self_closing {
                out.push_str(" />");
            } else {
                let _ = write!(out, "></{}>", element.name);
            }
            return out;
        }
        out.push('>');

        // Line breaks next to text would change the rendered whitespace.
        let inline = element
            .children
            .iter()
            .any(|child| matches!(child, JsxChild::Text(_)));
        if inline {
            for child in &element.children {
                out.push_str(&self.child(child, level));
            }
        } else {
            for child in &element.children {
                out.push('\n');
                out.push_str(&self.pad(level + 1));
                out.push_str(&self.child(child, level + 1));
            }
            out.push('\n');
            out.push_str(&self.pad(level));
        }
        let _ = write!(out, "</{}>", element.name);
        out
    }

    fn child(&self, child: &JsxChild, level: usize) -> String {
        match child {
            JsxChild::Text(text) => self.jsx_text(text),
            JsxChild::Element(id) => self.element(*id, level),
            JsxChild::Expression(expression) => format!("{{{}}}", self.expression(expression, level)),
        }
    }

    fn attribute(&self, attribute: &JsxAttribute, level: usize) -> String {
        match &attribute.value {
            JsxAttributeValue::String(value) if value.contains('\\') => {
                format!("{}={{{}}}", attribute.name, self.string_literal(value))
            }
            JsxAttributeValue::String(value) => {
                format!("{}=\"{}\"", attribute.name, value.replace('"', "&quot;"))
            }
            JsxAttributeValue::Expression(expression) => {
                format!("{}={{{}}}", attribute.name, self.expression(expression, level))
            }
            JsxAttributeValue::Flag => attribute.name.clone(),
        }
    }

    fn jsx_text(&self, text: &str) -> String {
        // Backslashes only ever reach the output escaped inside a literal.
        if text.contains(['{', '}', '<', '>', '\\']) {
            format!("{{{}}}", self.string_literal(text))
        } else {
            text.to_string()
        }
    }

    fn string_literal(&self, value: &str) -> String {
        let mut out = String::with_capacity(value.len() + 2);
        out.push('\'');
        for c in value.chars() {
            match c {
                '\\' => out.push_str("\\\\"),
                '\'' => out.push_str("\\'"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                c if self.ascii_only && !c.is_ascii() => {
                    let mut units = [0u16; 2];
                    for unit in c.encode_utf16(&mut units) {
                        let _ = write!(out, "\\u{:04X}", unit);
                    }
                }
                c => out.push(c),
            }
        }
        out.push('\'');
        out
    }
}

fn binding_text(binding: &Binding) -> String {
    match binding {
        Binding::Identifier(name) => name.clone(),
        Binding::ArrayPattern(names) => format!("[{}]", names.join(", ")),
    }
}

/// Whether `name` can be written as a bare identifier or property.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
