use super::{Expression, SqlExpression, TypeMapping, ValueType};
use crate::{printer::ExpressionPrinter, visitor::ExpressionVisitor};
use std::sync::Arc;

/// A named query parameter, bound by the command executor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SqlParameterExpression {
    pub(crate) name: String,
    pub(crate) value_type: ValueType,
    pub(crate) type_mapping: Option<TypeMapping>,
    pub(crate) nullable: bool,
}

impl SqlParameterExpression {
    pub fn new(
        name: impl Into<String>,
        value_type: ValueType,
        type_mapping: Option<TypeMapping>,
        nullable: bool,
    ) -> Self {
        Self {
            name: name.into(),
            value_type,
            type_mapping,
            nullable,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl SqlExpression for SqlParameterExpression {
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
        printer.add_parameter(&self.name);

        let placeholder = printer.helper().generate_parameter_name(&self.name);
        printer.append(&placeholder);
    }
}
