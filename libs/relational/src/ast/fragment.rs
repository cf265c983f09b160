use super::{Expression, SqlExpression};
use crate::{printer::ExpressionPrinter, visitor::ExpressionVisitor};
use std::sync::Arc;

/// Raw SQL text emitted verbatim, e.g. `*` or a provider keyword.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SqlFragmentExpression {
    pub(crate) sql: String,
}

impl SqlFragmentExpression {
    pub fn new(sql: impl Into<String>) -> Self {
        Self { sql: sql.into() }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }
}

impl SqlExpression for SqlFragmentExpression {
    fn visit_children(self: Arc<Self>, _: &mut dyn ExpressionVisitor) -> Expression {
        self.into()
    }

    fn print(&self, printer: &mut ExpressionPrinter<'_>) {
        printer.append(&self.sql);
    }
}
