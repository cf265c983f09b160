//! SQLite-specific functions callable from queries, as extension methods of
//! `DbFunctions`.
use relational::{ast::ValueType, translation::MethodInfo};

/// `Hex(this DbFunctions, byte[] bytes)`: the bytes as upper case hexadecimal text.
pub static HEX: MethodInfo = MethodInfo {
    declaring_type: "SqliteDbFunctionsExtensions",
    name: "Hex",
    parameters: &[ValueType::DbFunctions, ValueType::Bytes],
    return_type: ValueType::String,
    is_static: true,
};

/// `Glob(this DbFunctions, string matchExpression, string pattern)`: Unix file globbing.
pub static GLOB: MethodInfo = MethodInfo {
    declaring_type: "SqliteDbFunctionsExtensions",
    name: "Glob",
    parameters: &[ValueType::DbFunctions, ValueType::String, ValueType::String],
    return_type: ValueType::Bool,
    is_static: true,
};

/// Adds the SQLite functions to a method catalog.
pub fn register(catalog: &mut relational::translation::MethodCatalog) {
    catalog.register(&HEX);
    catalog.register(&GLOB);
}
