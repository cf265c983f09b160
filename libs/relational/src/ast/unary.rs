use super::{precedence, Expression, SqlConstantExpression, SqlExpression, SqlFragmentExpression, TypeMapping, ValueType};
use crate::{printer::ExpressionPrinter, visitor::ExpressionVisitor};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Not,
    Negate,
    IsNull,
    IsNotNull,
}

impl UnaryOperator {
    pub fn precedence(self) -> u8 {
        match self {
            UnaryOperator::Not => precedence::NOT,
            UnaryOperator::Negate => precedence::NEGATE,
            UnaryOperator::IsNull | UnaryOperator::IsNotNull => precedence::EQUALITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SqlUnaryExpression {
    pub(crate) operator: UnaryOperator,
    pub(crate) operand: Expression,
    pub(crate) value_type: ValueType,
    pub(crate) type_mapping: Option<TypeMapping>,
}

impl SqlUnaryExpression {
    pub fn new(
        operator: UnaryOperator,
        operand: Expression,
        value_type: ValueType,
        type_mapping: Option<TypeMapping>,
    ) -> Self {
        Self {
            operator,
            operand,
            value_type,
            type_mapping,
        }
    }

    pub fn operator(&self) -> UnaryOperator {
        self.operator
    }

    pub fn operand(&self) -> &Expression {
        &self.operand
    }

    pub fn update(self: Arc<Self>, operand: Expression) -> Arc<Self> {
        if operand.ptr_eq(&self.operand) {
            return self;
        }

        Arc::new(Self {
            operator: self.operator,
            operand,
            value_type: self.value_type,
            type_mapping: self.type_mapping.clone(),
        })
    }

    fn operand_starts_with_minus(&self, printer: &ExpressionPrinter<'_>) -> bool {
        if let Some(constant) = self.operand.downcast_ref::<SqlConstantExpression>() {
            return printer.helper().generate_literal(constant.value()).starts_with('-');
        }

        self.operand
            .downcast_ref::<SqlFragmentExpression>()
            .map_or(false, |fragment| fragment.sql().trim_start().starts_with('-'))
    }

    fn print_operand(&self, printer: &mut ExpressionPrinter<'_>) {
        let needs_parentheses = match self.operator {
            UnaryOperator::IsNull | UnaryOperator::IsNotNull => self.operand.precedence() <= self.precedence(),
            UnaryOperator::Not => self.operand.precedence() < self.precedence(),
            // `--` starts a line comment.
            UnaryOperator::Negate => {
                self.operand.precedence() <= self.precedence() || self.operand_starts_with_minus(printer)
            }
        };

        if needs_parentheses {
            printer.append("(");
            printer.visit(&self.operand);
            printer.append(")");
        } else {
            printer.visit(&self.operand);
        }
    }
}

impl SqlExpression for SqlUnaryExpression {
    fn value_type(&self) -> Option<&ValueType> {
        Some(&self.value_type)
    }

    fn type_mapping(&self) -> Option<&TypeMapping> {
        self.type_mapping.as_ref()
    }

    fn is_nullable(&self) -> bool {
        match self.operator {
            UnaryOperator::IsNull | UnaryOperator::IsNotNull => false,
            UnaryOperator::Not | UnaryOperator::Negate => self.operand.is_nullable(),
        }
    }

    fn precedence(&self) -> u8 {
        self.operator.precedence()
    }

    fn visit_children(self: Arc<Self>, visitor: &mut dyn ExpressionVisitor) -> Expression {
        let operand = visitor.visit(&self.operand);
        self.update(operand).into()
    }

    fn print(&self, printer: &mut ExpressionPrinter<'_>) {
        match self.operator {
            UnaryOperator::Not => {
                printer.append("NOT ");
                self.print_operand(printer);
            }
            UnaryOperator::Negate => {
                printer.append("-");
                self.print_operand(printer);
            }
            UnaryOperator::IsNull => {
                self.print_operand(printer);
                printer.append(" IS NULL");
            }
            UnaryOperator::IsNotNull => {
                self.print_operand(printer);
                printer.append(" IS NOT NULL");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{dialect::RelationalSqlGenerationHelper, prelude::*};
    use pretty_assertions::assert_eq;

    fn print(expression: &Expression) -> String {
        ExpressionPrinter::print(&RelationalSqlGenerationHelper, expression).sql
    }

    #[test]
    fn nested_negations_never_print_a_comment_marker() {
        let f = SqlExpressionFactory::default();
        let x = f.column("x", "t", ValueType::Int64, false);

        let expr = f.equal(f.negate(f.negate(x)), f.constant(1i64.into()));

        assert_eq!(r#"-(-"t"."x") = 1"#, print(&expr));
    }

    #[test]
    fn negative_literals_are_parenthesized_under_a_negation() {
        let f = SqlExpressionFactory::default();

        assert_eq!("-(-5)", print(&f.negate(f.constant((-5i64).into()))));
        assert_eq!("-(-2.5)", print(&f.negate(f.constant(Value::Real(-2.5)))));
        assert_eq!("-5", print(&f.negate(f.constant(5i64.into()))));
        assert_eq!("-(- 1)", print(&f.negate(f.fragment("- 1"))));
    }

    #[test]
    fn null_checks_parenthesize_comparisons() {
        let f = SqlExpressionFactory::default();
        let a = f.column("a", "t", ValueType::Int64, true);
        let b = f.column("b", "t", ValueType::Int64, true);

        assert_eq!(r#"("t"."a" = "t"."b") IS NULL"#, print(&f.is_null(f.equal(a, b))));
    }
}
