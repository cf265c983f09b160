use super::{opt_ptr_eq, Expression, SqlExpression};
use crate::{printer::ExpressionPrinter, visitor::ExpressionVisitor};
use std::sync::Arc;

/// A base table in a `FROM` clause.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableExpression {
    pub(crate) name: String,
    pub(crate) schema: Option<String>,
    pub(crate) alias: String,
}

impl TableExpression {
    pub fn new(name: impl Into<String>, schema: Option<String>, alias: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema,
            alias: alias.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }
}

impl SqlExpression for TableExpression {
    fn visit_children(self: Arc<Self>, _: &mut dyn ExpressionVisitor) -> Expression {
        self.into()
    }

    fn print(&self, printer: &mut ExpressionPrinter<'_>) {
        let table = printer
            .helper()
            .delimit_identifier_with_schema(&self.name, self.schema.as_deref());

        printer.append(&table);
        printer.append(" AS ");
        printer.append_identifier(&self.alias);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinKind {
    Inner,
    Left,
    Cross,
}

/// A joined table source. Cross joins carry no predicate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JoinExpression {
    pub(crate) kind: JoinKind,
    pub(crate) table: Expression,
    pub(crate) predicate: Option<Expression>,
}

impl JoinExpression {
    /// # Panics
    ///
    /// If a cross join gets a predicate, or an inner/left join gets none.
    pub fn new(kind: JoinKind, table: Expression, predicate: Option<Expression>) -> Self {
        assert_eq!(
            kind == JoinKind::Cross,
            predicate.is_none(),
            "only cross joins are allowed to omit the join predicate"
        );

        Self { kind, table, predicate }
    }

    pub fn kind(&self) -> JoinKind {
        self.kind
    }

    pub fn table(&self) -> &Expression {
        &self.table
    }

    pub fn update(self: Arc<Self>, table: Expression, predicate: Option<Expression>) -> Arc<Self> {
        if table.ptr_eq(&self.table) && opt_ptr_eq(predicate.as_ref(), self.predicate.as_ref()) {
            return self;
        }

        Arc::new(Self::new(self.kind, table, predicate))
    }
}

impl SqlExpression for JoinExpression {
    fn visit_children(self: Arc<Self>, visitor: &mut dyn ExpressionVisitor) -> Expression {
        let table = visitor.visit(&self.table);
        let predicate = self.predicate.as_ref().map(|predicate| visitor.visit(predicate));

        self.update(table, predicate).into()
    }

    fn print(&self, printer: &mut ExpressionPrinter<'_>) {
        let keyword = match self.kind {
            JoinKind::Inner => "INNER JOIN ",
            JoinKind::Left => "LEFT JOIN ",
            JoinKind::Cross => "CROSS JOIN ",
        };

        printer.append(keyword);
        printer.visit(&self.table);

        if let Some(predicate) = &self.predicate {
            printer.append(" ON ");
            printer.visit(predicate);
        }
    }
}
