use crate::SqliteSqlGenerationHelper;
use relational::{
    dialect::SqlGenerationHelper,
    error::Error,
    update::{ColumnModification, ResultSetMapping, UpdateSqlGenerator},
};
use std::fmt::Write;

/// SQLite reports generated keys through `last_insert_rowid()` and affected rows through
/// `changes()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteUpdateSqlGenerator {
    helper: SqliteSqlGenerationHelper,
}

impl SqliteUpdateSqlGenerator {
    pub fn new(helper: SqliteSqlGenerationHelper) -> Self {
        Self { helper }
    }
}

impl UpdateSqlGenerator for SqliteUpdateSqlGenerator {
    fn sql_generation_helper(&self) -> &dyn SqlGenerationHelper {
        &self.helper
    }

    fn append_identity_where_condition(&self, sql: &mut String, _: &ColumnModification) {
        sql.push_str(&self.helper.delimit_identifier("rowid"));
        sql.push_str(" = last_insert_rowid()");
    }

    fn append_select_affected_count_command(
        &self,
        sql: &mut String,
        _: &str,
        _: Option<&str>,
        _: usize,
    ) -> ResultSetMapping {
        sql.push_str("SELECT changes()");
        sql.push_str(self.helper.statement_terminator());
        sql.push_str("\n\n");

        ResultSetMapping::LastInResultSet
    }

    fn append_rows_affected_where_condition(&self, sql: &mut String, expected_rows_affected: usize) {
        let _ = write!(sql, "changes() = {expected_rows_affected}");
    }

    fn generate_next_sequence_value_operation(&self, _: &str, _: Option<&str>) -> relational::Result<String> {
        Err(Error::not_supported(
            "SQLite",
            "Sequences",
            "SQLite does not support sequences.",
        ))
    }
}
