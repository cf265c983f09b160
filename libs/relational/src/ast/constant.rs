use super::{Expression, SqlExpression, TypeMapping, Value, ValueType};
use crate::{printer::ExpressionPrinter, visitor::ExpressionVisitor};
use std::sync::Arc;

/// A constant rendered as a literal in the generated SQL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SqlConstantExpression {
    pub(crate) value: Value,
    pub(crate) value_type: ValueType,
    pub(crate) type_mapping: Option<TypeMapping>,
}

impl SqlConstantExpression {
    pub fn new(value: Value, value_type: ValueType, type_mapping: Option<TypeMapping>) -> Self {
        Self {
            value,
            value_type,
            type_mapping,
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl SqlExpression for SqlConstantExpression {
    fn value_type(&self) -> Option<&ValueType> {
        Some(&self.value_type)
    }

    fn type_mapping(&self) -> Option<&TypeMapping> {
        self.type_mapping.as_ref()
    }

    fn is_nullable(&self) -> bool {
        self.value.is_null()
    }

    fn visit_children(self: Arc<Self>, _: &mut dyn ExpressionVisitor) -> Expression {
        self.into()
    }

    fn print(&self, printer: &mut ExpressionPrinter<'_>) {
        let literal = printer.helper().generate_literal(&self.value);
        printer.append_verbatim(&literal);
    }
}
