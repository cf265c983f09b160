//! Method call translators of the SQLite provider.
mod glob;
mod hex;
mod math;
mod string;

pub use glob::SqliteGlobMethodTranslator;
pub use hex::SqliteHexMethodTranslator;
pub use math::SqliteMathTranslator;
pub use string::SqliteStringMethodTranslator;

use crate::SqliteTypeMappingSource;
use once_cell::sync::Lazy;
use relational::{factory::SqlExpressionFactory, translation::MethodCallTranslator};
use std::sync::Arc;

static TRANSLATORS: Lazy<Vec<Arc<dyn MethodCallTranslator>>> = Lazy::new(|| {
    let factory = SqlExpressionFactory::new(Arc::new(SqliteTypeMappingSource));

    vec![
        Arc::new(SqliteHexMethodTranslator::new(factory.clone())),
        Arc::new(SqliteGlobMethodTranslator::new(factory.clone())),
        Arc::new(SqliteStringMethodTranslator::new(factory.clone())),
        Arc::new(SqliteMathTranslator::new(factory)),
    ]
});

/// The built-in translators, shared by every SQLite provider in the process.
pub fn method_call_translators() -> impl Iterator<Item = Arc<dyn MethodCallTranslator>> {
    TRANSLATORS.iter().cloned()
}
