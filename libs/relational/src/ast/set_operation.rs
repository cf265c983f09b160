use super::{Expression, SelectExpression, SqlExpression};
use crate::{
    printer::ExpressionPrinter,
    visitor::{self, ExpressionVisitor},
};
use std::{ops::Deref, sync::Arc};

/// The parts shared by `EXCEPT`, `UNION` and `INTERSECT`: two complete selects combined
/// into a derived table named by `alias`. The alias is printed as given and has to be a
/// valid SQL identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SetOperationBase {
    pub(crate) alias: String,
    pub(crate) source1: Arc<SelectExpression>,
    pub(crate) source2: Arc<SelectExpression>,
    pub(crate) is_distinct: bool,
}

impl SetOperationBase {
    /// # Panics
    ///
    /// If `alias` is empty.
    pub fn new(
        alias: impl Into<String>,
        source1: Arc<SelectExpression>,
        source2: Arc<SelectExpression>,
        is_distinct: bool,
    ) -> Self {
        let alias = alias.into();
        assert!(!alias.is_empty(), "a set operation needs an alias");

        Self {
            alias,
            source1,
            source2,
            is_distinct,
        }
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// The left operand.
    pub fn source1(&self) -> &Arc<SelectExpression> {
        &self.source1
    }

    /// The right operand.
    pub fn source2(&self) -> &Arc<SelectExpression> {
        &self.source2
    }

    /// `false` keeps duplicate rows (`ALL`).
    pub fn is_distinct(&self) -> bool {
        self.is_distinct
    }

    fn is_same(&self, source1: &Arc<SelectExpression>, source2: &Arc<SelectExpression>) -> bool {
        Arc::ptr_eq(source1, &self.source1) && Arc::ptr_eq(source2, &self.source2)
    }

    fn with_sources(&self, source1: Arc<SelectExpression>, source2: Arc<SelectExpression>) -> Self {
        Self {
            alias: self.alias.clone(),
            source1,
            source2,
            is_distinct: self.is_distinct,
        }
    }

    fn print(&self, printer: &mut ExpressionPrinter<'_>, keyword: &str) {
        printer.append("(");
        printer.append_line();

        {
            let mut printer = printer.indent();

            self.source1.print(&mut printer);
            printer.append_line();
            printer.append(keyword);

            if !self.is_distinct {
                printer.append(" ALL");
            }

            printer.append_line();
            self.source2.print(&mut printer);
        }

        printer.append_line();
        printer.append(") AS ");
        printer.append_verbatim(&self.alias);
    }
}

macro_rules! set_operation {
    ($($(#[$docs:meta])* $kind:ident => $keyword:literal),*) => (
        $(
            $(#[$docs])*
            #[derive(Debug, Clone, PartialEq, Eq, Hash)]
            pub struct $kind {
                base: SetOperationBase,
            }

            impl $kind {
                /// # Panics
                ///
                /// If `alias` is empty.
                pub fn new(
                    alias: impl Into<String>,
                    source1: Arc<SelectExpression>,
                    source2: Arc<SelectExpression>,
                    is_distinct: bool,
                ) -> Self {
                    Self {
                        base: SetOperationBase::new(alias, source1, source2, is_distinct),
                    }
                }

                /// Returns this node if both sources are the current ones.
                pub fn update(self: Arc<Self>, source1: Arc<SelectExpression>, source2: Arc<SelectExpression>) -> Arc<Self> {
                    if self.base.is_same(&source1, &source2) {
                        return self;
                    }

                    Arc::new(Self {
                        base: self.base.with_sources(source1, source2),
                    })
                }
            }

            impl Deref for $kind {
                type Target = SetOperationBase;

                fn deref(&self) -> &SetOperationBase {
                    &self.base
                }
            }

            impl SqlExpression for $kind {
                fn visit_children(self: Arc<Self>, visitor: &mut dyn ExpressionVisitor) -> Expression {
                    let source1 = visitor::visit_select(visitor, &self.base.source1);
                    let source2 = visitor::visit_select(visitor, &self.base.source2);

                    self.update(source1, source2).into()
                }

                fn print(&self, printer: &mut ExpressionPrinter<'_>) {
                    self.base.print(printer, $keyword);
                }
            }
        )*
    );
}

set_operation!(
    /// Rows of the left select that the right select does not return.
    ExceptExpression => "EXCEPT",
    /// Rows returned by either select.
    UnionExpression => "UNION",
    /// Rows returned by both selects.
    IntersectExpression => "INTERSECT"
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{dialect::RelationalSqlGenerationHelper, prelude::*};
    use expect_test::expect;
    use std::{
        collections::hash_map::DefaultHasher,
        hash::{Hash, Hasher},
    };

    fn names(table: &str, alias: &str) -> Arc<SelectExpression> {
        let f = SqlExpressionFactory::default();

        Arc::new(
            f.select(f.table(table, None, alias))
                .project(f.column("Name", alias, ValueType::String, true), None),
        )
    }

    fn hash_of(expr: &Expression) -> u64 {
        let mut hasher = DefaultHasher::new();
        expr.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn update_with_the_current_sources_keeps_the_node() {
        let except = Arc::new(ExceptExpression::new("t", names("A", "a"), names("B", "b"), true));

        let same = Arc::clone(&except).update(Arc::clone(except.source1()), Arc::clone(except.source2()));
        assert!(Arc::ptr_eq(&except, &same));

        let swapped = Arc::clone(&except).update(Arc::clone(except.source2()), Arc::clone(except.source1()));
        assert!(!Arc::ptr_eq(&except, &swapped));
        assert_eq!("t", swapped.alias());
        assert!(swapped.is_distinct());
        assert!(Arc::ptr_eq(except.source1(), swapped.source2()));
    }

    #[test]
    fn equality_needs_the_same_variant_alias_and_flag() {
        let except = Expression::new(ExceptExpression::new("t", names("A", "a"), names("B", "b"), false));
        let same_shape = Expression::new(ExceptExpression::new("t", names("A", "a"), names("B", "b"), false));

        assert_eq!(except, same_shape);
        assert_eq!(hash_of(&except), hash_of(&same_shape));

        let union = Expression::new(UnionExpression::new("t", names("A", "a"), names("B", "b"), false));
        let other_alias = Expression::new(ExceptExpression::new("u", names("A", "a"), names("B", "b"), false));
        let distinct = Expression::new(ExceptExpression::new("t", names("A", "a"), names("B", "b"), true));
        let other_source = Expression::new(ExceptExpression::new("t", names("A", "a"), names("C", "c"), false));

        assert_ne!(except, union);
        assert_ne!(except, other_alias);
        assert_ne!(except, distinct);
        assert_ne!(except, other_source);
    }

    #[test]
    #[should_panic(expected = "needs an alias")]
    fn empty_alias_is_rejected() {
        UnionExpression::new("", names("A", "a"), names("B", "b"), true);
    }

    #[test]
    fn nested_set_operations_indent_per_level() {
        let f = SqlExpressionFactory::default();
        let inner = f.union("u", (*names("A", "a")).clone(), (*names("B", "b")).clone(), true);
        let outer_left = f.select(inner).project(f.column("Name", "u", ValueType::String, true), None);

        let outer = f.intersect("i", outer_left, (*names("C", "c")).clone(), false);
        let printed = ExpressionPrinter::print(&RelationalSqlGenerationHelper::default(), &outer);

        expect![[r#"
            (
                SELECT "u"."Name"
                FROM (
                    SELECT "a"."Name"
                    FROM "A" AS "a"
                    UNION
                    SELECT "b"."Name"
                    FROM "B" AS "b"
                ) AS u
                INTERSECT ALL
                SELECT "c"."Name"
                FROM "C" AS "c"
            ) AS i"#]]
        .assert_eq(&printed.sql);
    }
}
