use super::{all_ptr_eq, opt_ptr_eq, precedence, Expression, JoinExpression, JoinKind, SqlExpression, TypeMapping, ValueType};
use crate::{
    printer::ExpressionPrinter,
    visitor::{self, ExpressionVisitor},
};
use std::sync::Arc;

/// One item of the `SELECT` list, optionally aliased.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectionExpression {
    pub(crate) expression: Expression,
    pub(crate) alias: Option<String>,
}

impl ProjectionExpression {
    pub fn new(expression: Expression, alias: Option<String>) -> Self {
        Self { expression, alias }
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn update(self: Arc<Self>, expression: Expression) -> Arc<Self> {
        if expression.ptr_eq(&self.expression) {
            return self;
        }

        Arc::new(Self::new(expression, self.alias.clone()))
    }
}

impl SqlExpression for ProjectionExpression {
    fn value_type(&self) -> Option<&ValueType> {
        self.expression.value_type()
    }

    fn type_mapping(&self) -> Option<&TypeMapping> {
        self.expression.type_mapping()
    }

    fn is_nullable(&self) -> bool {
        self.expression.is_nullable()
    }

    fn visit_children(self: Arc<Self>, visitor: &mut dyn ExpressionVisitor) -> Expression {
        let expression = visitor.visit(&self.expression);
        self.update(expression).into()
    }

    fn print(&self, printer: &mut ExpressionPrinter<'_>) {
        printer.visit(&self.expression);

        if let Some(alias) = &self.alias {
            printer.append(" AS ");
            printer.append_identifier(alias);
        }
    }
}

/// An `ORDER BY` item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderingExpression {
    pub(crate) expression: Expression,
    pub(crate) ascending: bool,
}

impl OrderingExpression {
    pub fn new(expression: Expression, ascending: bool) -> Self {
        Self { expression, ascending }
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    pub fn is_ascending(&self) -> bool {
        self.ascending
    }

    pub fn update(self: Arc<Self>, expression: Expression) -> Arc<Self> {
        if expression.ptr_eq(&self.expression) {
            return self;
        }

        Arc::new(Self::new(expression, self.ascending))
    }
}

impl SqlExpression for OrderingExpression {
    fn visit_children(self: Arc<Self>, visitor: &mut dyn ExpressionVisitor) -> Expression {
        let expression = visitor.visit(&self.expression);
        self.update(expression).into()
    }

    fn print(&self, printer: &mut ExpressionPrinter<'_>) {
        printer.visit(&self.expression);

        if !self.ascending {
            printer.append(" DESC");
        }
    }
}

/// A complete `SELECT` statement.
///
/// The first table is the `FROM` source, every following one is a [`JoinExpression`].
/// Instances are assembled with the builder methods and frozen once they are part of a
/// tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SelectExpression {
    pub(crate) distinct: bool,
    pub(crate) projection: Vec<Expression>,
    pub(crate) tables: Vec<Expression>,
    pub(crate) predicate: Option<Expression>,
    pub(crate) orderings: Vec<Expression>,
    pub(crate) limit: Option<Expression>,
    pub(crate) offset: Option<Expression>,
}

impl SelectExpression {
    pub fn new(table: Expression) -> Self {
        Self {
            distinct: false,
            projection: Vec::new(),
            tables: vec![table],
            predicate: None,
            orderings: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    pub fn project(mut self, expression: Expression, alias: Option<&str>) -> Self {
        let projection = ProjectionExpression::new(expression, alias.map(ToOwned::to_owned));
        self.projection.push(Expression::new(projection));
        self
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// # Panics
    ///
    /// See [`JoinExpression::new`].
    pub fn join(mut self, kind: JoinKind, table: Expression, predicate: Option<Expression>) -> Self {
        self.tables.push(Expression::new(JoinExpression::new(kind, table, predicate)));
        self
    }

    pub fn with_predicate(mut self, predicate: Expression) -> Self {
        self.predicate = Some(predicate);
        self
    }

    pub fn order_by(mut self, expression: Expression, ascending: bool) -> Self {
        self.orderings
            .push(Expression::new(OrderingExpression::new(expression, ascending)));
        self
    }

    pub fn with_limit(mut self, limit: Expression) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: Expression) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn is_distinct(&self) -> bool {
        self.distinct
    }

    pub fn projection(&self) -> &[Expression] {
        &self.projection
    }

    pub fn tables(&self) -> &[Expression] {
        &self.tables
    }

    pub fn predicate(&self) -> Option<&Expression> {
        self.predicate.as_ref()
    }

    pub fn orderings(&self) -> &[Expression] {
        &self.orderings
    }

    pub fn limit(&self) -> Option<&Expression> {
        self.limit.as_ref()
    }

    pub fn offset(&self) -> Option<&Expression> {
        self.offset.as_ref()
    }

    #[allow(clippy::too_many_arguments)]
    pub fn update(
        self: Arc<Self>,
        projection: Vec<Expression>,
        tables: Vec<Expression>,
        predicate: Option<Expression>,
        orderings: Vec<Expression>,
        limit: Option<Expression>,
        offset: Option<Expression>,
    ) -> Arc<Self> {
        let unchanged = all_ptr_eq(&projection, &self.projection)
            && all_ptr_eq(&tables, &self.tables)
            && opt_ptr_eq(predicate.as_ref(), self.predicate.as_ref())
            && all_ptr_eq(&orderings, &self.orderings)
            && opt_ptr_eq(limit.as_ref(), self.limit.as_ref())
            && opt_ptr_eq(offset.as_ref(), self.offset.as_ref());

        if unchanged {
            return self;
        }

        Arc::new(Self {
            distinct: self.distinct,
            projection,
            tables,
            predicate,
            orderings,
            limit,
            offset,
        })
    }

    fn print_list(printer: &mut ExpressionPrinter<'_>, expressions: &[Expression]) {
        for (i, expression) in expressions.iter().enumerate() {
            if i > 0 {
                printer.append(", ");
            }

            printer.visit(expression);
        }
    }

    fn print_limit_offset(&self, printer: &mut ExpressionPrinter<'_>) {
        match (&self.limit, &self.offset) {
            (Some(limit), offset) => {
                printer.append_line();
                printer.append("LIMIT ");
                printer.visit(limit);

                if let Some(offset) = offset {
                    printer.append(" OFFSET ");
                    printer.visit(offset);
                }
            }
            (None, Some(offset)) => {
                printer.append_line();

                if let Some(unbounded) = printer.helper().unbounded_limit() {
                    printer.append("LIMIT ");
                    printer.append(unbounded);
                    printer.append(" ");
                }

                printer.append("OFFSET ");
                printer.visit(offset);
            }
            (None, None) => (),
        }
    }
}

impl SqlExpression for SelectExpression {
    fn precedence(&self) -> u8 {
        precedence::SUBQUERY
    }

    fn visit_children(self: Arc<Self>, visitor: &mut dyn ExpressionVisitor) -> Expression {
        let projection = visitor::visit_list(visitor, &self.projection).unwrap_or_else(|| self.projection.clone());
        let tables = visitor::visit_list(visitor, &self.tables).unwrap_or_else(|| self.tables.clone());
        let predicate = self.predicate.as_ref().map(|predicate| visitor.visit(predicate));
        let orderings = visitor::visit_list(visitor, &self.orderings).unwrap_or_else(|| self.orderings.clone());
        let limit = self.limit.as_ref().map(|limit| visitor.visit(limit));
        let offset = self.offset.as_ref().map(|offset| visitor.visit(offset));

        self.update(projection, tables, predicate, orderings, limit, offset)
            .into()
    }

    fn print(&self, printer: &mut ExpressionPrinter<'_>) {
        printer.append("SELECT ");

        if self.distinct {
            printer.append("DISTINCT ");
        }

        if self.projection.is_empty() {
            printer.append("1");
        } else {
            Self::print_list(printer, &self.projection);
        }

        if let Some((from, joins)) = self.tables.split_first() {
            printer.append_line();
            printer.append("FROM ");
            printer.visit(from);

            for join in joins {
                printer.append_line();
                printer.visit(join);
            }
        }

        if let Some(predicate) = &self.predicate {
            printer.append_line();
            printer.append("WHERE ");
            printer.visit(predicate);
        }

        if !self.orderings.is_empty() {
            printer.append_line();
            printer.append("ORDER BY ");
            Self::print_list(printer, &self.orderings);
        }

        self.print_limit_offset(printer);
    }
}

#[cfg(test)]
mod tests {
    use crate::{dialect::RelationalSqlGenerationHelper, prelude::*};
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn print(expr: &Expression) -> String {
        ExpressionPrinter::print(&RelationalSqlGenerationHelper::default(), expr).sql
    }

    #[test]
    fn select_prints_every_clause_on_its_own_line() {
        let f = SqlExpressionFactory::default();
        let blog_id = f.column("Id", "b", ValueType::Int64, false);
        let post_blog_id = f.column("BlogId", "p", ValueType::Int64, false);

        let select = f
            .select(f.table("Blogs", Some("dbo"), "b"))
            .distinct()
            .project(f.column("Title", "p", ValueType::String, true), Some("PostTitle"))
            .join(
                JoinKind::Left,
                f.table("Posts", None, "p"),
                Some(f.equal(blog_id.clone(), post_blog_id)),
            )
            .with_predicate(f.equal(blog_id.clone(), f.parameter("blogId", ValueType::Int64, false)))
            .order_by(blog_id, false)
            .with_limit(f.constant(10i64.into()));

        let expected = indoc! {r#"
            SELECT DISTINCT "p"."Title" AS "PostTitle"
            FROM "dbo"."Blogs" AS "b"
            LEFT JOIN "Posts" AS "p" ON "b"."Id" = "p"."BlogId"
            WHERE "b"."Id" = @blogId
            ORDER BY "b"."Id" DESC
            LIMIT 10"#};

        assert_eq!(expected, print(&Expression::new(select)));
    }

    #[test]
    fn empty_projection_selects_a_constant() {
        let f = SqlExpressionFactory::default();
        let select = f.select(f.table("Blogs", None, "b"));

        assert_eq!("SELECT 1\nFROM \"Blogs\" AS \"b\"", print(&Expression::new(select)));
    }

    #[test]
    fn offset_without_limit_has_no_limit_in_the_default_dialect() {
        let f = SqlExpressionFactory::default();
        let select = f
            .select(f.table("Blogs", None, "b"))
            .with_offset(f.constant(5i64.into()));

        assert_eq!(
            "SELECT 1\nFROM \"Blogs\" AS \"b\"\nOFFSET 5",
            print(&Expression::new(select))
        );
    }

    #[test]
    fn subqueries_are_parenthesized_as_operands() {
        let f = SqlExpressionFactory::default();
        let count = f
            .select(f.table("Posts", None, "p"))
            .project(f.function("count", vec![f.fragment("*")], false, vec![false], ValueType::Int64), None);

        let comparison = f.equal(Expression::new(count), f.constant(0i64.into()));

        assert_eq!(
            "(SELECT count(*)\nFROM \"Posts\" AS \"p\") = 0",
            print(&comparison)
        );
    }
}
