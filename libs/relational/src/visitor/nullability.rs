use super::ExpressionVisitor;
use crate::ast::{Expression, SqlConstantExpression, SqlFunctionExpression, SqlUnaryExpression, UnaryOperator, Value};
use std::sync::Arc;

/// Simplifies a tree using what is known about the nullability of its nodes.
///
/// - A function call with a `NULL` constant in a propagating argument is `NULL`.
/// - A nullable function whose arguments all propagate and are all non-nullable is
///   non-nullable.
/// - `x IS NULL` and `x IS NOT NULL` over a non-nullable `x` are constants.
///
/// Works bottom-up, so a folded argument feeds into the decision for its parent.
#[derive(Debug, Default)]
pub struct SqlNullabilityProcessor;

impl SqlNullabilityProcessor {
    pub fn new() -> Self {
        Self
    }

    pub fn process(&mut self, expression: &Expression) -> Expression {
        self.visit(expression)
    }

    fn process_function(function: Arc<SqlFunctionExpression>) -> Expression {
        let null_argument = function.propagating_arguments().any(|argument| {
            argument
                .downcast_ref::<SqlConstantExpression>()
                .map_or(false, |constant| constant.value().is_null())
        });

        if null_argument {
            return Expression::new(SqlConstantExpression::new(
                Value::Null,
                function.value_type,
                function.type_mapping.clone(),
            ));
        }

        let flags = function.arguments_propagate_nullability();
        let becomes_non_nullable = function.nullable
            && !flags.is_empty()
            && flags.iter().all(|propagates| *propagates)
            && function.arguments().iter().all(|argument| !argument.is_nullable());

        if becomes_non_nullable {
            function.with_nullability(false).into()
        } else {
            function.into()
        }
    }

    fn process_unary(unary: Arc<SqlUnaryExpression>) -> Expression {
        let folded = match unary.operator() {
            UnaryOperator::IsNull if !unary.operand().is_nullable() => false,
            UnaryOperator::IsNotNull if !unary.operand().is_nullable() => true,
            _ => return unary.into(),
        };

        Expression::new(SqlConstantExpression::new(
            Value::Boolean(folded),
            unary.value_type,
            unary.type_mapping.clone(),
        ))
    }
}

impl ExpressionVisitor for SqlNullabilityProcessor {
    fn visit(&mut self, expression: &Expression) -> Expression {
        let visited = expression.visit_children(self);

        if let Some(function) = visited.downcast_arc::<SqlFunctionExpression>() {
            return Self::process_function(function);
        }

        if let Some(unary) = visited.downcast_arc::<SqlUnaryExpression>() {
            return Self::process_unary(unary);
        }

        visited
    }
}
