//! An immutable syntax tree for SQL expressions.
//!
//! Every node implements [`SqlExpression`] and is shared through an [`Expression`]
//! handle. Nodes own their children exclusively and are never mutated after
//! construction: a rewrite produces new nodes along the changed path and keeps the
//! original ones everywhere else.
//!
//! Two handles compare equal when the trees they point to are structurally equal, which
//! makes a whole tree usable as a cache key.
mod binary;
mod column;
mod constant;
mod expression;
mod fragment;
mod function;
mod parameter;
mod select;
mod set_operation;
mod table;
mod unary;
mod values;

pub use binary::{BinaryOperator, SqlBinaryExpression};
pub use column::ColumnExpression;
pub use constant::SqlConstantExpression;
pub use expression::{precedence, DynSqlExpression, Expression, SqlExpression};

pub(crate) use expression::{all_ptr_eq, opt_ptr_eq};
pub use fragment::SqlFragmentExpression;
pub use function::SqlFunctionExpression;
pub use parameter::SqlParameterExpression;
pub use select::{OrderingExpression, ProjectionExpression, SelectExpression};
pub use set_operation::{ExceptExpression, IntersectExpression, SetOperationBase, UnionExpression};
pub use table::{JoinExpression, JoinKind, TableExpression};
pub use unary::{SqlUnaryExpression, UnaryOperator};
pub use values::{TypeMapping, Value, ValueType};
