//! Construction of expression nodes with their default store type mappings.
use crate::ast::*;
use std::{fmt, sync::Arc};

/// Resolves the store type a host type is mapped to by default.
pub trait TypeMappingSource: Send + Sync {
    fn find_mapping(&self, value_type: &ValueType) -> Option<TypeMapping>;
}

/// ANSI store types.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelationalTypeMappingSource;

impl TypeMappingSource for RelationalTypeMappingSource {
    fn find_mapping(&self, value_type: &ValueType) -> Option<TypeMapping> {
        let store_type = match value_type {
            ValueType::Bool => "boolean",
            ValueType::Int32 => "integer",
            ValueType::Int64 => "bigint",
            ValueType::Double => "double precision",
            ValueType::Decimal => "decimal(18, 2)",
            ValueType::String => "varchar",
            ValueType::Char => "char(1)",
            ValueType::Bytes => "varbinary",
            ValueType::DateTime => "timestamp",
            ValueType::Guid => "uuid",
            ValueType::DbFunctions | ValueType::Object => return None,
        };

        Some(TypeMapping::new(store_type, *value_type))
    }
}

/// Builds nodes and attaches the default type mapping of their host type.
///
/// Translators receive the factory of their provider, so the function calls they create
/// carry the provider's store types.
#[derive(Clone)]
pub struct SqlExpressionFactory {
    type_mappings: Arc<dyn TypeMappingSource>,
}

impl fmt::Debug for SqlExpressionFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqlExpressionFactory").finish_non_exhaustive()
    }
}

impl Default for SqlExpressionFactory {
    fn default() -> Self {
        Self::new(Arc::new(RelationalTypeMappingSource))
    }
}

impl SqlExpressionFactory {
    pub fn new(type_mappings: Arc<dyn TypeMappingSource>) -> Self {
        Self { type_mappings }
    }

    pub fn find_mapping(&self, value_type: &ValueType) -> Option<TypeMapping> {
        self.type_mappings.find_mapping(value_type)
    }

    pub fn column(
        &self,
        name: impl Into<String>,
        table_alias: impl Into<String>,
        value_type: ValueType,
        nullable: bool,
    ) -> Expression {
        let mapping = self.find_mapping(&value_type);
        Expression::new(ColumnExpression::new(name, table_alias, value_type, mapping, nullable))
    }

    pub fn constant(&self, value: Value) -> Expression {
        let value_type = value.value_type();
        self.typed_constant(value, value_type)
    }

    /// A constant of an explicit host type, e.g. a `NULL` standing in for a string.
    pub fn typed_constant(&self, value: Value, value_type: ValueType) -> Expression {
        let mapping = self.find_mapping(&value_type);
        Expression::new(SqlConstantExpression::new(value, value_type, mapping))
    }

    pub fn parameter(&self, name: impl Into<String>, value_type: ValueType, nullable: bool) -> Expression {
        let mapping = self.find_mapping(&value_type);
        Expression::new(SqlParameterExpression::new(name, value_type, mapping, nullable))
    }

    pub fn fragment(&self, sql: impl Into<String>) -> Expression {
        Expression::new(SqlFragmentExpression::new(sql))
    }

    /// # Panics
    ///
    /// If `arguments` and `arguments_propagate_nullability` differ in length.
    pub fn function(
        &self,
        name: impl Into<String>,
        arguments: Vec<Expression>,
        nullable: bool,
        arguments_propagate_nullability: Vec<bool>,
        return_type: ValueType,
    ) -> Expression {
        let mapping = self.find_mapping(&return_type);

        Expression::new(SqlFunctionExpression::new(
            name,
            arguments,
            nullable,
            arguments_propagate_nullability,
            return_type,
            mapping,
        ))
    }

    pub fn niladic_function(&self, name: impl Into<String>, nullable: bool, return_type: ValueType) -> Expression {
        let mapping = self.find_mapping(&return_type);
        Expression::new(SqlFunctionExpression::niladic(name, nullable, return_type, mapping))
    }

    /// Comparisons and logical operators produce booleans, arithmetic keeps the type of
    /// the left operand.
    pub fn binary(&self, operator: BinaryOperator, left: Expression, right: Expression) -> Expression {
        let (value_type, mapping) = if operator.is_comparison() || operator.is_logical() {
            (ValueType::Bool, self.find_mapping(&ValueType::Bool))
        } else {
            let value_type = left
                .value_type()
                .or_else(|| right.value_type())
                .copied()
                .unwrap_or(ValueType::Object);

            let mapping = left
                .type_mapping()
                .or_else(|| right.type_mapping())
                .cloned()
                .or_else(|| self.find_mapping(&value_type));

            (value_type, mapping)
        };

        Expression::new(SqlBinaryExpression::new(operator, left, right, value_type, mapping))
    }

    pub fn add(&self, left: Expression, right: Expression) -> Expression {
        self.binary(BinaryOperator::Add, left, right)
    }

    pub fn subtract(&self, left: Expression, right: Expression) -> Expression {
        self.binary(BinaryOperator::Subtract, left, right)
    }

    pub fn multiply(&self, left: Expression, right: Expression) -> Expression {
        self.binary(BinaryOperator::Multiply, left, right)
    }

    pub fn divide(&self, left: Expression, right: Expression) -> Expression {
        self.binary(BinaryOperator::Divide, left, right)
    }

    pub fn concat(&self, left: Expression, right: Expression) -> Expression {
        self.binary(BinaryOperator::Concat, left, right)
    }

    pub fn equal(&self, left: Expression, right: Expression) -> Expression {
        self.binary(BinaryOperator::Equal, left, right)
    }

    pub fn not_equal(&self, left: Expression, right: Expression) -> Expression {
        self.binary(BinaryOperator::NotEqual, left, right)
    }

    pub fn less_than(&self, left: Expression, right: Expression) -> Expression {
        self.binary(BinaryOperator::LessThan, left, right)
    }

    pub fn greater_than(&self, left: Expression, right: Expression) -> Expression {
        self.binary(BinaryOperator::GreaterThan, left, right)
    }

    pub fn and(&self, left: Expression, right: Expression) -> Expression {
        self.binary(BinaryOperator::And, left, right)
    }

    pub fn or(&self, left: Expression, right: Expression) -> Expression {
        self.binary(BinaryOperator::Or, left, right)
    }

    fn unary(&self, operator: UnaryOperator, operand: Expression) -> Expression {
        let value_type = match operator {
            UnaryOperator::Negate => operand.value_type().copied().unwrap_or(ValueType::Object),
            UnaryOperator::Not | UnaryOperator::IsNull | UnaryOperator::IsNotNull => ValueType::Bool,
        };

        let mapping = match operator {
            UnaryOperator::Negate => operand.type_mapping().cloned(),
            _ => self.find_mapping(&value_type),
        };

        Expression::new(SqlUnaryExpression::new(operator, operand, value_type, mapping))
    }

    pub fn not(&self, operand: Expression) -> Expression {
        self.unary(UnaryOperator::Not, operand)
    }

    pub fn negate(&self, operand: Expression) -> Expression {
        self.unary(UnaryOperator::Negate, operand)
    }

    pub fn is_null(&self, operand: Expression) -> Expression {
        self.unary(UnaryOperator::IsNull, operand)
    }

    pub fn is_not_null(&self, operand: Expression) -> Expression {
        self.unary(UnaryOperator::IsNotNull, operand)
    }

    pub fn table(&self, name: impl Into<String>, schema: Option<&str>, alias: impl Into<String>) -> Expression {
        Expression::new(TableExpression::new(name, schema.map(ToOwned::to_owned), alias))
    }

    /// Starts a select over `table`, see the builder methods of [`SelectExpression`].
    pub fn select(&self, table: Expression) -> SelectExpression {
        SelectExpression::new(table)
    }

    pub fn except(
        &self,
        alias: impl Into<String>,
        source1: SelectExpression,
        source2: SelectExpression,
        is_distinct: bool,
    ) -> Expression {
        Expression::new(ExceptExpression::new(
            alias,
            Arc::new(source1),
            Arc::new(source2),
            is_distinct,
        ))
    }

    pub fn union(
        &self,
        alias: impl Into<String>,
        source1: SelectExpression,
        source2: SelectExpression,
        is_distinct: bool,
    ) -> Expression {
        Expression::new(UnionExpression::new(alias, Arc::new(source1), Arc::new(source2), is_distinct))
    }

    pub fn intersect(
        &self,
        alias: impl Into<String>,
        source1: SelectExpression,
        source2: SelectExpression,
        is_distinct: bool,
    ) -> Expression {
        Expression::new(IntersectExpression::new(
            alias,
            Arc::new(source1),
            Arc::new(source2),
            is_distinct,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nodes_get_the_default_store_type() {
        let f = SqlExpressionFactory::default();
        let column = f.column("Id", "b", ValueType::Int64, false);

        assert_eq!(Some("bigint"), column.type_mapping().map(|m| m.store_type.as_ref()));
        assert!(!column.is_nullable());
    }

    #[test]
    fn comparisons_are_boolean() {
        let f = SqlExpressionFactory::default();
        let comparison = f.less_than(f.column("Rating", "b", ValueType::Double, true), f.constant(3.0.into()));

        assert_eq!(Some(&ValueType::Bool), comparison.value_type());
        assert!(comparison.is_nullable());
    }

    #[test]
    fn arithmetic_keeps_the_operand_mapping() {
        let f = SqlExpressionFactory::default();
        let sum = f.add(f.column("Count", "b", ValueType::Int32, false), f.constant(1i32.into()));

        assert_eq!(Some(&ValueType::Int32), sum.value_type());
        assert_eq!(Some("integer"), sum.type_mapping().map(|m| m.store_type.as_ref()));
    }

    #[test]
    fn niladic_functions_print_without_parentheses() {
        let f = SqlExpressionFactory::default();
        let now = f.niladic_function("CURRENT_TIMESTAMP", false, ValueType::DateTime);

        let printed = crate::printer::ExpressionPrinter::print(&crate::dialect::RelationalSqlGenerationHelper, &now);

        assert_eq!("CURRENT_TIMESTAMP", printed.sql);
        assert_eq!(Some("timestamp"), now.type_mapping().map(|m| m.store_type.as_ref()));
    }
}
