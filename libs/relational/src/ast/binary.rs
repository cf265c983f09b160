use super::{precedence, Expression, SqlExpression, TypeMapping, ValueType};
use crate::{printer::ExpressionPrinter, visitor::ExpressionVisitor};
use std::{fmt, sync::Arc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Concat,
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    And,
    Or,
}

impl BinaryOperator {
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOperator::Or => precedence::OR,
            BinaryOperator::And => precedence::AND,
            BinaryOperator::Equal | BinaryOperator::NotEqual => precedence::EQUALITY,
            BinaryOperator::LessThan
            | BinaryOperator::LessThanOrEqual
            | BinaryOperator::GreaterThan
            | BinaryOperator::GreaterThanOrEqual => precedence::COMPARISON,
            BinaryOperator::Add | BinaryOperator::Subtract => precedence::ADDITIVE,
            BinaryOperator::Multiply | BinaryOperator::Divide | BinaryOperator::Modulo => precedence::MULTIPLICATIVE,
            BinaryOperator::Concat => precedence::CONCAT,
        }
    }

    /// `a op (b op c)` means the same as `(a op b) op c`.
    pub fn is_associative(self) -> bool {
        matches!(
            self,
            BinaryOperator::Add
                | BinaryOperator::Multiply
                | BinaryOperator::Concat
                | BinaryOperator::And
                | BinaryOperator::Or
        )
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOperator::Equal
                | BinaryOperator::NotEqual
                | BinaryOperator::LessThan
                | BinaryOperator::LessThanOrEqual
                | BinaryOperator::GreaterThan
                | BinaryOperator::GreaterThanOrEqual
        )
    }

    pub fn is_logical(self) -> bool {
        matches!(self, BinaryOperator::And | BinaryOperator::Or)
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::Concat => "||",
            BinaryOperator::Equal => "=",
            BinaryOperator::NotEqual => "<>",
            BinaryOperator::LessThan => "<",
            BinaryOperator::LessThanOrEqual => "<=",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::GreaterThanOrEqual => ">=",
            BinaryOperator::And => "AND",
            BinaryOperator::Or => "OR",
        };

        f.write_str(op)
    }
}

/// `left <op> right`, parenthesizing operands only where the precedence table requires.
///
/// ```rust
/// # use relational::{prelude::*, dialect::RelationalSqlGenerationHelper};
/// let factory = SqlExpressionFactory::default();
/// let a = factory.column("a", "t", ValueType::Bool, false);
/// let b = factory.column("b", "t", ValueType::Bool, false);
/// let c = factory.column("c", "t", ValueType::Bool, false);
///
/// let expr = factory.and(factory.or(a, b), c);
/// let printed = ExpressionPrinter::print(&RelationalSqlGenerationHelper::default(), &expr);
///
/// assert_eq!(r#"("t"."a" OR "t"."b") AND "t"."c""#, printed.sql);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SqlBinaryExpression {
    pub(crate) operator: BinaryOperator,
    pub(crate) left: Expression,
    pub(crate) right: Expression,
    pub(crate) value_type: ValueType,
    pub(crate) type_mapping: Option<TypeMapping>,
}

impl SqlBinaryExpression {
    pub fn new(
        operator: BinaryOperator,
        left: Expression,
        right: Expression,
        value_type: ValueType,
        type_mapping: Option<TypeMapping>,
    ) -> Self {
        Self {
            operator,
            left,
            right,
            value_type,
            type_mapping,
        }
    }

    pub fn operator(&self) -> BinaryOperator {
        self.operator
    }

    pub fn left(&self) -> &Expression {
        &self.left
    }

    pub fn right(&self) -> &Expression {
        &self.right
    }

    pub fn update(self: Arc<Self>, left: Expression, right: Expression) -> Arc<Self> {
        if left.ptr_eq(&self.left) && right.ptr_eq(&self.right) {
            return self;
        }

        Arc::new(Self {
            operator: self.operator,
            left,
            right,
            value_type: self.value_type,
            type_mapping: self.type_mapping.clone(),
        })
    }

    fn requires_parentheses(&self, operand: &Expression, is_right: bool) -> bool {
        let outer = self.operator.precedence();
        let inner = operand.precedence();

        if inner != outer {
            return inner < outer;
        }

        // Same precedence level: comparisons do not chain, and on the right side only the
        // very same associative operator can drop the parentheses.
        if self.operator.is_comparison() {
            return true;
        }

        if !is_right {
            return false;
        }

        let same_operator = operand
            .downcast_ref::<SqlBinaryExpression>()
            .map_or(false, |binary| binary.operator == self.operator);

        !(same_operator && self.operator.is_associative())
    }

    fn print_operand(&self, printer: &mut ExpressionPrinter<'_>, operand: &Expression, is_right: bool) {
        if self.requires_parentheses(operand, is_right) {
            printer.append("(");
            printer.visit(operand);
            printer.append(")");
        } else {
            printer.visit(operand);
        }
    }
}

impl SqlExpression for SqlBinaryExpression {
    fn value_type(&self) -> Option<&ValueType> {
        Some(&self.value_type)
    }

    fn type_mapping(&self) -> Option<&TypeMapping> {
        self.type_mapping.as_ref()
    }

    fn is_nullable(&self) -> bool {
        self.left.is_nullable() || self.right.is_nullable()
    }

    fn precedence(&self) -> u8 {
        self.operator.precedence()
    }

    fn visit_children(self: Arc<Self>, visitor: &mut dyn ExpressionVisitor) -> Expression {
        let left = visitor.visit(&self.left);
        let right = visitor.visit(&self.right);

        self.update(left, right).into()
    }

    fn print(&self, printer: &mut ExpressionPrinter<'_>) {
        self.print_operand(printer, &self.left, false);
        printer.append(" ");
        printer.append(&self.operator.to_string());
        printer.append(" ");
        self.print_operand(printer, &self.right, true);
    }
}
