use super::{all_ptr_eq, Expression, SqlExpression, TypeMapping, ValueType};
use crate::{
    printer::ExpressionPrinter,
    visitor::{self, ExpressionVisitor},
};
use std::sync::Arc;

/// A call of a SQL function.
///
/// `arguments_propagate_nullability` runs parallel to `arguments`: when a flagged argument
/// is NULL the whole call is NULL, which lets the nullability processor fold the call
/// away.
///
/// ```rust
/// # use relational::{prelude::*, dialect::RelationalSqlGenerationHelper};
/// let factory = SqlExpressionFactory::default();
/// let column = factory.column("Data", "b", ValueType::Bytes, true);
/// let hex = factory.function("hex", vec![column], true, vec![true], ValueType::String);
///
/// let printed = ExpressionPrinter::print(&RelationalSqlGenerationHelper::default(), &hex);
/// assert_eq!("hex(\"b\".\"Data\")", printed.sql);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SqlFunctionExpression {
    pub(crate) name: String,
    pub(crate) schema: Option<String>,
    /// `None` for niladic functions such as `CURRENT_TIMESTAMP`.
    pub(crate) arguments: Option<Vec<Expression>>,
    pub(crate) nullable: bool,
    pub(crate) arguments_propagate_nullability: Vec<bool>,
    pub(crate) value_type: ValueType,
    pub(crate) type_mapping: Option<TypeMapping>,
}

impl SqlFunctionExpression {
    /// # Panics
    ///
    /// If `arguments` and `arguments_propagate_nullability` differ in length.
    pub fn new(
        name: impl Into<String>,
        arguments: Vec<Expression>,
        nullable: bool,
        arguments_propagate_nullability: Vec<bool>,
        value_type: ValueType,
        type_mapping: Option<TypeMapping>,
    ) -> Self {
        assert_eq!(
            arguments.len(),
            arguments_propagate_nullability.len(),
            "every function argument needs a nullability propagation flag"
        );

        Self {
            name: name.into(),
            schema: None,
            arguments: Some(arguments),
            nullable,
            arguments_propagate_nullability,
            value_type,
            type_mapping,
        }
    }

    pub fn niladic(
        name: impl Into<String>,
        nullable: bool,
        value_type: ValueType,
        type_mapping: Option<TypeMapping>,
    ) -> Self {
        Self {
            name: name.into(),
            schema: None,
            arguments: None,
            nullable,
            arguments_propagate_nullability: Vec::new(),
            value_type,
            type_mapping,
        }
    }

    /// Qualifies the function with a schema, e.g. for user-defined functions.
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn is_niladic(&self) -> bool {
        self.arguments.is_none()
    }

    pub fn arguments(&self) -> &[Expression] {
        self.arguments.as_deref().unwrap_or_default()
    }

    pub fn arguments_propagate_nullability(&self) -> &[bool] {
        &self.arguments_propagate_nullability
    }

    /// The arguments whose NULL-ness makes the whole call NULL.
    pub fn propagating_arguments(&self) -> impl Iterator<Item = &Expression> {
        self.arguments()
            .iter()
            .zip(self.arguments_propagate_nullability.iter())
            .filter_map(|(argument, propagates)| propagates.then_some(argument))
    }

    /// A copy with different nullability, sharing the arguments.
    pub fn with_nullability(self: Arc<Self>, nullable: bool) -> Arc<Self> {
        if self.nullable == nullable {
            return self;
        }

        Arc::new(Self {
            nullable,
            ..Self::clone(&self)
        })
    }

    /// Returns this node if `arguments` are the current arguments, element by element.
    pub fn update(self: Arc<Self>, arguments: Option<Vec<Expression>>) -> Arc<Self> {
        let unchanged = match (&self.arguments, &arguments) {
            (Some(current), Some(new)) => all_ptr_eq(current, new),
            (None, None) => true,
            _ => false,
        };

        if unchanged {
            return self;
        }

        if let Some(arguments) = &arguments {
            assert_eq!(
                arguments.len(),
                self.arguments_propagate_nullability.len(),
                "every function argument needs a nullability propagation flag"
            );
        }

        Arc::new(Self {
            name: self.name.clone(),
            schema: self.schema.clone(),
            arguments,
            nullable: self.nullable,
            arguments_propagate_nullability: self.arguments_propagate_nullability.clone(),
            value_type: self.value_type,
            type_mapping: self.type_mapping.clone(),
        })
    }
}

impl SqlExpression for SqlFunctionExpression {
    fn value_type(&self) -> Option<&ValueType> {
        Some(&self.value_type)
    }

    fn type_mapping(&self) -> Option<&TypeMapping> {
        self.type_mapping.as_ref()
    }

    fn is_nullable(&self) -> bool {
        self.nullable
    }

    fn visit_children(self: Arc<Self>, visitor: &mut dyn ExpressionVisitor) -> Expression {
        let Some(arguments) = &self.arguments else {
            return self.into();
        };

        let Some(arguments) = visitor::visit_list(visitor, arguments) else {
            return self.into();
        };

        self.update(Some(arguments)).into()
    }

    fn print(&self, printer: &mut ExpressionPrinter<'_>) {
        if let Some(schema) = &self.schema {
            printer.append_identifier(schema);
            printer.append(".");
        }

        printer.append(&self.name);

        if let Some(arguments) = &self.arguments {
            printer.append("(");

            for (i, argument) in arguments.iter().enumerate() {
                if i > 0 {
                    printer.append(", ");
                }

                printer.visit(argument);
            }

            printer.append(")");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::SqlConstantExpression;

    fn constant(i: i64) -> Expression {
        Expression::new(SqlConstantExpression::new(i.into(), ValueType::Int64, None))
    }

    #[test]
    #[should_panic(expected = "nullability propagation flag")]
    fn mismatched_propagation_flags_are_rejected() {
        SqlFunctionExpression::new("abs", vec![constant(1)], true, vec![], ValueType::Int64, None);
    }

    #[test]
    fn update_with_the_same_arguments_returns_the_same_node() {
        let function = Arc::new(SqlFunctionExpression::new(
            "max",
            vec![constant(1), constant(2)],
            true,
            vec![true, true],
            ValueType::Int64,
            None,
        ));

        let same = Arc::clone(&function).update(function.arguments.clone());
        assert!(Arc::ptr_eq(&function, &same));

        let other = Arc::clone(&function).update(Some(vec![constant(1), constant(3)]));
        assert!(!Arc::ptr_eq(&function, &other));
        assert_eq!("max", other.name());
        assert_eq!(vec![true, true], other.arguments_propagate_nullability);
    }

    #[test]
    fn propagating_arguments_follow_the_flags() {
        let function = SqlFunctionExpression::new(
            "substr",
            vec![constant(1), constant(2), constant(3)],
            true,
            vec![true, false, true],
            ValueType::String,
            None,
        );

        let propagating: Vec<_> = function.propagating_arguments().cloned().collect();
        assert_eq!(vec![constant(1), constant(3)], propagating);
    }
}
