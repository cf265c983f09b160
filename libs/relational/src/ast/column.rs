use super::{Expression, SqlExpression, TypeMapping, ValueType};
use crate::{printer::ExpressionPrinter, visitor::ExpressionVisitor};
use std::sync::Arc;

/// A column of a table source, qualified with the source's alias.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnExpression {
    pub(crate) name: String,
    pub(crate) table_alias: String,
    pub(crate) value_type: ValueType,
    pub(crate) type_mapping: Option<TypeMapping>,
    pub(crate) nullable: bool,
}

impl ColumnExpression {
    pub fn new(
        name: impl Into<String>,
        table_alias: impl Into<String>,
        value_type: ValueType,
        type_mapping: Option<TypeMapping>,
        nullable: bool,
    ) -> Self {
        Self {
            name: name.into(),
            table_alias: table_alias.into(),
            value_type,
            type_mapping,
            nullable,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table_alias(&self) -> &str {
        &self.table_alias
    }
}

impl SqlExpression for ColumnExpression {
    fn value_type(&self) -> Option<&ValueType> {
        Some(&self.value_type)
    }

    fn type_mapping(&self) -> Option<&TypeMapping> {
        self.type_mapping.as_ref()
    }

    fn is_nullable(&self) -> bool {
        self.nullable
    }

    fn visit_children(self: Arc<Self>, _: &mut dyn ExpressionVisitor) -> Expression {
        self.into()
    }

    fn print(&self, printer: &mut ExpressionPrinter<'_>) {
        printer.append_identifier(&self.table_alias);
        printer.append(".");
        printer.append_identifier(&self.name);
    }
}
