//! A "prelude" for users of the `relational` crate.
pub use crate::ast::*;
pub use crate::cache::RelationalCommandCache;
pub use crate::dialect::{DialectCapabilities, DialectCapability, SqlGenerationHelper};
pub use crate::factory::SqlExpressionFactory;
pub use crate::printer::{ExpressionPrinter, PrintedQuery};
pub use crate::translation::{MethodCallTranslator, MethodCallTranslatorProvider, MethodCatalog, MethodInfo};
pub use crate::update::{
    ColumnFlag, ColumnModification, CommandParameter, EntityState, ModificationCommand, ModificationCommandBatch,
    RawSqlCommand, ResultSetMapping, UpdateSqlGenerator,
};
pub use crate::visitor::ExpressionVisitor;
