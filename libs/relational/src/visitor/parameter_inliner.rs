use super::ExpressionVisitor;
use crate::{
    ast::{Expression, SqlConstantExpression, SqlParameterExpression, Value},
    factory::SqlExpressionFactory,
};
use std::collections::HashMap;

/// Replaces parameters with constants of their bound values. Parameters without a value
/// are left alone.
pub struct ParameterValueInliner<'a> {
    factory: &'a SqlExpressionFactory,
    values: &'a HashMap<String, Value>,
}

impl<'a> ParameterValueInliner<'a> {
    pub fn new(factory: &'a SqlExpressionFactory, values: &'a HashMap<String, Value>) -> Self {
        Self { factory, values }
    }
}

impl ExpressionVisitor for ParameterValueInliner<'_> {
    fn visit(&mut self, expression: &Expression) -> Expression {
        let Some(parameter) = expression.downcast_ref::<SqlParameterExpression>() else {
            return expression.visit_children(self);
        };

        let Some(value) = self.values.get(parameter.name()) else {
            return expression.clone();
        };

        let mapping = parameter
            .type_mapping
            .clone()
            .or_else(|| self.factory.find_mapping(&parameter.value_type));

        Expression::new(SqlConstantExpression::new(value.clone(), parameter.value_type, mapping))
    }
}
