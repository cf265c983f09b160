use super::{TypeMapping, ValueType};
use crate::{printer::ExpressionPrinter, visitor::ExpressionVisitor};
use std::{
    any::{Any, TypeId},
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

/// Binding strength of a node when it is printed as an operand. Higher binds tighter.
pub mod precedence {
    pub const SUBQUERY: u8 = 0;
    pub const OR: u8 = 1;
    pub const AND: u8 = 2;
    pub const NOT: u8 = 3;
    pub const EQUALITY: u8 = 4;
    pub const COMPARISON: u8 = 5;
    pub const ADDITIVE: u8 = 7;
    pub const MULTIPLICATIVE: u8 = 8;
    pub const CONCAT: u8 = 9;
    pub const NEGATE: u8 = 10;
    pub const ATOM: u8 = u8::MAX;
}

/// A syntactic SQL construct.
///
/// The trait is object safe so that variants defined outside of this crate can take part
/// in rewriting and printing: a node prints itself through [`SqlExpression::print`] and
/// rebuilds itself through [`SqlExpression::visit_children`], the printer and the
/// visitors never enumerate the variants.
pub trait SqlExpression: DynSqlExpression + fmt::Debug + Send + Sync + 'static {
    /// The host type of the value the expression produces, if it produces one.
    fn value_type(&self) -> Option<&ValueType> {
        None
    }

    /// The store type the expression is mapped to, once known.
    fn type_mapping(&self) -> Option<&TypeMapping> {
        None
    }

    fn is_nullable(&self) -> bool {
        true
    }

    /// See [`precedence`].
    fn precedence(&self) -> u8 {
        precedence::ATOM
    }

    /// Visits every child in order and returns this node again if none of them changed.
    fn visit_children(self: Arc<Self>, visitor: &mut dyn ExpressionVisitor) -> Expression;

    fn print(&self, printer: &mut ExpressionPrinter<'_>);
}

/// Type-erased equality, hashing and downcasting, implemented for every node that is
/// `PartialEq + Hash`.
pub trait DynSqlExpression {
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
    fn dyn_eq(&self, other: &dyn Any) -> bool;
    fn dyn_hash(&self, state: &mut dyn Hasher);
}

impl<T> DynSqlExpression for T
where
    T: PartialEq + Hash + Send + Sync + 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }

    fn dyn_eq(&self, other: &dyn Any) -> bool {
        other.downcast_ref::<T>().map_or(false, |other| self == other)
    }

    fn dyn_hash(&self, mut state: &mut dyn Hasher) {
        TypeId::of::<T>().hash(&mut state);
        self.hash(&mut state);
    }
}

/// A shared handle to an immutable expression node.
#[derive(Clone)]
pub struct Expression {
    inner: Arc<dyn SqlExpression>,
}

impl Expression {
    pub fn new<T>(node: T) -> Self
    where
        T: SqlExpression,
    {
        Self { inner: Arc::new(node) }
    }

    /// True if both handles point to the very same node.
    pub fn ptr_eq(&self, other: &Expression) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn visit_children(&self, visitor: &mut dyn ExpressionVisitor) -> Expression {
        Arc::clone(&self.inner).visit_children(visitor)
    }

    pub fn print(&self, printer: &mut ExpressionPrinter<'_>) {
        self.inner.print(printer)
    }

    pub fn value_type(&self) -> Option<&ValueType> {
        self.inner.value_type()
    }

    pub fn type_mapping(&self) -> Option<&TypeMapping> {
        self.inner.type_mapping()
    }

    pub fn is_nullable(&self) -> bool {
        self.inner.is_nullable()
    }

    pub fn precedence(&self) -> u8 {
        self.inner.precedence()
    }

    pub fn is<T>(&self) -> bool
    where
        T: SqlExpression,
    {
        self.inner.as_ref().as_any().is::<T>()
    }

    pub fn downcast_ref<T>(&self) -> Option<&T>
    where
        T: SqlExpression,
    {
        self.inner.as_ref().as_any().downcast_ref::<T>()
    }

    /// A typed handle to the same node, if it is a `T`.
    pub fn downcast_arc<T>(&self) -> Option<Arc<T>>
    where
        T: SqlExpression,
    {
        Arc::clone(&self.inner).into_any().downcast::<T>().ok()
    }
}

impl<T> From<Arc<T>> for Expression
where
    T: SqlExpression,
{
    fn from(node: Arc<T>) -> Self {
        Self { inner: node }
    }
}

impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.inner.as_ref().dyn_eq(other.inner.as_ref().as_any())
    }
}

impl Eq for Expression {}

impl Hash for Expression {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.as_ref().dyn_hash(state)
    }
}

impl fmt::Debug for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.inner.as_ref(), f)
    }
}

/// True if both lists hold the very same nodes in the same order.
pub(crate) fn all_ptr_eq(left: &[Expression], right: &[Expression]) -> bool {
    left.len() == right.len() && left.iter().zip(right).all(|(a, b)| a.ptr_eq(b))
}

pub(crate) fn opt_ptr_eq(left: Option<&Expression>, right: Option<&Expression>) -> bool {
    match (left, right) {
        (Some(left), Some(right)) => left.ptr_eq(right),
        (None, None) => true,
        _ => false,
    }
}
