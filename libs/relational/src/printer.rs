//! Rendering of expression trees into SQL text.
//!
//! Nodes print themselves through [`SqlExpression::print`](crate::ast::SqlExpression::print),
//! so node types defined outside of this crate render without the printer knowing about
//! them. The printer only owns the output buffer, the indentation and the parameters seen
//! so far.
use crate::{ast::Expression, dialect::SqlGenerationHelper};
use std::ops::{Deref, DerefMut};

const INDENT: &str = "    ";

/// The SQL text of a printed tree and the names of the parameters it references, in order
/// of first appearance.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PrintedQuery {
    pub sql: String,
    pub parameters: Vec<String>,
}

#[derive(Debug, Default)]
struct IndentedStringBuilder {
    buffer: String,
    level: usize,
    at_line_start: bool,
}

impl IndentedStringBuilder {
    fn append(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }

        if self.at_line_start {
            for _ in 0..self.level {
                self.buffer.push_str(INDENT);
            }

            self.at_line_start = false;
        }

        self.buffer.push_str(s);
    }

    fn append_line(&mut self) {
        self.buffer.push('\n');
        self.at_line_start = true;
    }
}

pub struct ExpressionPrinter<'a> {
    helper: &'a dyn SqlGenerationHelper,
    builder: IndentedStringBuilder,
    parameters: Vec<String>,
}

impl<'a> ExpressionPrinter<'a> {
    pub fn new(helper: &'a dyn SqlGenerationHelper) -> Self {
        Self {
            helper,
            builder: IndentedStringBuilder::default(),
            parameters: Vec::new(),
        }
    }

    /// Renders a tree as a SQL fragment.
    pub fn print(helper: &'a dyn SqlGenerationHelper, expression: &Expression) -> PrintedQuery {
        let mut printer = Self::new(helper);
        printer.visit(expression);
        printer.finish()
    }

    /// Renders a tree as a complete statement, ending with the dialect's terminator.
    pub fn print_statement(helper: &'a dyn SqlGenerationHelper, expression: &Expression) -> PrintedQuery {
        let mut printer = Self::new(helper);
        printer.visit(expression);
        printer.append(helper.statement_terminator());
        printer.finish()
    }

    pub fn helper(&self) -> &'a dyn SqlGenerationHelper {
        self.helper
    }

    pub fn visit(&mut self, expression: &Expression) {
        expression.print(self);
    }

    /// Appends text. A multi-line string keeps the current indentation on every line.
    pub fn append(&mut self, s: &str) {
        let mut lines = s.split('\n');

        if let Some(first) = lines.next() {
            self.builder.append(first);
        }

        for line in lines {
            self.builder.append_line();
            self.builder.append(line);
        }
    }

    /// Appends text as is. Line breaks inside it are part of the text, e.g. of a string
    /// literal, and get no indentation.
    pub fn append_verbatim(&mut self, s: &str) {
        self.builder.append(s);
    }

    pub fn append_line(&mut self) {
        self.builder.append_line();
    }

    /// Appends an identifier quoted by the dialect.
    pub fn append_identifier(&mut self, identifier: &str) {
        let delimited = self.helper.delimit_identifier(identifier);
        self.append_verbatim(&delimited);
    }

    /// Records a parameter reference. Repeated references are recorded once.
    pub fn add_parameter(&mut self, name: &str) {
        if !self.parameters.iter().any(|p| p == name) {
            self.parameters.push(name.to_owned());
        }
    }

    /// Increases the indentation until the returned guard is dropped.
    pub fn indent(&mut self) -> IndentGuard<'_, 'a> {
        self.builder.level += 1;
        IndentGuard { printer: self }
    }

    pub fn finish(self) -> PrintedQuery {
        PrintedQuery {
            sql: self.builder.buffer,
            parameters: self.parameters,
        }
    }
}

/// Scoped indentation, see [`ExpressionPrinter::indent`].
pub struct IndentGuard<'p, 'a> {
    printer: &'p mut ExpressionPrinter<'a>,
}

impl<'a> Deref for IndentGuard<'_, 'a> {
    type Target = ExpressionPrinter<'a>;

    fn deref(&self) -> &Self::Target {
        &*self.printer
    }
}

impl DerefMut for IndentGuard<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.printer
    }
}

impl Drop for IndentGuard<'_, '_> {
    fn drop(&mut self) {
        self.printer.builder.level -= 1;
    }
}
