//! # relational-sqlite
//!
//! The SQLite dialect of the `relational` SQL generation core: lexical rules, store types,
//! method call translators and the update SQL generator.
//!
//! ```rust
//! # use relational::prelude::*;
//! # use relational_sqlite::SqliteProvider;
//! let provider = SqliteProvider::from_connection_string("file:app.db").unwrap();
//! let f = provider.expression_factory();
//!
//! let select = f
//!     .select(f.table("Blogs", None, "b"))
//!     .project(f.column("Name", "b", ValueType::String, true), None)
//!     .with_offset(f.constant(10i64.into()));
//!
//! let printed = provider.print(&Expression::new(select));
//! assert_eq!("SELECT \"b\".\"Name\"\nFROM \"Blogs\" AS \"b\"\nLIMIT -1 OFFSET 10", printed.sql);
//! ```
pub mod functions;
pub mod translators;

mod helper;
mod options;
mod type_mapping;
mod update;

pub use helper::SqliteSqlGenerationHelper;
pub use options::SqliteOptions;
pub use type_mapping::SqliteTypeMappingSource;
pub use update::SqliteUpdateSqlGenerator;

use relational::{
    ast::Expression,
    cache::RelationalCommandCache,
    factory::SqlExpressionFactory,
    printer::{ExpressionPrinter, PrintedQuery},
    translation::{MethodCallTranslator, MethodCallTranslatorProvider, MethodCatalog},
    update::ModificationCommandBatch,
};
use std::sync::Arc;

/// Everything SQL generation for one SQLite configuration needs.
pub struct SqliteProvider {
    options: SqliteOptions,
    helper: SqliteSqlGenerationHelper,
    factory: SqlExpressionFactory,
    translators: MethodCallTranslatorProvider,
    methods: MethodCatalog,
    update_generator: SqliteUpdateSqlGenerator,
    command_cache: RelationalCommandCache,
}

impl SqliteProvider {
    pub fn new(options: SqliteOptions) -> Self {
        let helper = SqliteSqlGenerationHelper::new(options.returning);

        let mut methods = MethodCatalog::new();
        functions::register(&mut methods);

        Self {
            helper,
            factory: SqlExpressionFactory::new(Arc::new(SqliteTypeMappingSource)),
            translators: MethodCallTranslatorProvider::new(translators::method_call_translators()),
            methods,
            update_generator: SqliteUpdateSqlGenerator::new(helper),
            command_cache: RelationalCommandCache::new(Arc::new(helper)),
            options,
        }
    }

    pub fn from_connection_string(connection_string: &str) -> relational::Result<Self> {
        Ok(Self::new(SqliteOptions::try_from(connection_string)?))
    }

    pub fn options(&self) -> &SqliteOptions {
        &self.options
    }

    pub fn sql_generation_helper(&self) -> &SqliteSqlGenerationHelper {
        &self.helper
    }

    pub fn expression_factory(&self) -> &SqlExpressionFactory {
        &self.factory
    }

    pub fn method_catalog(&self) -> &MethodCatalog {
        &self.methods
    }

    pub fn method_call_translators(&self) -> &MethodCallTranslatorProvider {
        &self.translators
    }

    /// Registers a translator that takes precedence over the built-in ones.
    pub fn add_method_call_translator_plugin(&mut self, plugin: Arc<dyn MethodCallTranslator>) {
        self.translators.add_plugin(plugin);
    }

    pub fn update_sql_generator(&self) -> &SqliteUpdateSqlGenerator {
        &self.update_generator
    }

    pub fn command_cache(&self) -> &RelationalCommandCache {
        &self.command_cache
    }

    pub fn print(&self, expression: &Expression) -> PrintedQuery {
        ExpressionPrinter::print(&self.helper, expression)
    }

    /// An empty batch sized by the `max_batch_size` option.
    pub fn create_batch(&self) -> ModificationCommandBatch<'_> {
        ModificationCommandBatch::new(&self.update_generator, self.options.max_batch_size)
    }
}
