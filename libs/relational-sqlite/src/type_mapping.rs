use relational::{
    ast::{TypeMapping, ValueType},
    factory::TypeMappingSource,
};

/// Maps host types onto SQLite's storage classes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteTypeMappingSource;

impl TypeMappingSource for SqliteTypeMappingSource {
    fn find_mapping(&self, value_type: &ValueType) -> Option<TypeMapping> {
        let store_type = match value_type {
            ValueType::Bool | ValueType::Int32 | ValueType::Int64 => "INTEGER",
            ValueType::Double => "REAL",
            ValueType::Decimal | ValueType::String | ValueType::Char | ValueType::DateTime | ValueType::Guid => {
                "TEXT"
            }
            ValueType::Bytes => "BLOB",
            ValueType::DbFunctions | ValueType::Object => return None,
        };

        Some(TypeMapping::new(store_type, *value_type))
    }
}
