//! Rewriting of expression trees.
//!
//! A visitor maps a node to its replacement. The usual implementation handles the nodes
//! it is interested in and hands everything else to
//! [`Expression::visit_children`](crate::ast::Expression::visit_children), which visits
//! the children in order and returns the original node when none of them changed:
//!
//! ```rust
//! # use relational::prelude::*;
//! struct Noop;
//!
//! impl ExpressionVisitor for Noop {
//!     fn visit(&mut self, expression: &Expression) -> Expression {
//!         expression.visit_children(self)
//!     }
//! }
//!
//! let f = SqlExpressionFactory::default();
//! let tree = f.and(
//!     f.equal(f.column("Id", "b", ValueType::Int64, false), f.parameter("id", ValueType::Int64, false)),
//!     f.is_not_null(f.column("Url", "b", ValueType::String, true)),
//! );
//!
//! assert!(Noop.visit(&tree).ptr_eq(&tree));
//! ```
mod nullability;
mod parameter_inliner;

pub use nullability::SqlNullabilityProcessor;
pub use parameter_inliner::ParameterValueInliner;

use crate::ast::{Expression, SelectExpression};
use std::sync::Arc;

pub trait ExpressionVisitor {
    fn visit(&mut self, expression: &Expression) -> Expression;
}

/// Visits every element in order. Returns `None` if every result is the very same node
/// as its input.
pub fn visit_list(visitor: &mut dyn ExpressionVisitor, expressions: &[Expression]) -> Option<Vec<Expression>> {
    let visited: Vec<Expression> = expressions.iter().map(|e| visitor.visit(e)).collect();

    if visited.iter().zip(expressions).all(|(new, old)| new.ptr_eq(old)) {
        None
    } else {
        Some(visited)
    }
}

/// Visits a select that has to stay a select, e.g. the operand of a set operation.
///
/// # Panics
///
/// If the visitor replaces the select with another kind of node.
pub fn visit_select(visitor: &mut dyn ExpressionVisitor, select: &Arc<SelectExpression>) -> Arc<SelectExpression> {
    let visited = visitor.visit(&Expression::from(Arc::clone(select)));

    visited
        .downcast_arc::<SelectExpression>()
        .expect("a select expression must be rewritten into a select expression")
}
