use super::{ColumnModification, EntityState, ModificationCommand};
use crate::{
    dialect::{DialectCapability, SqlGenerationHelper},
    error::Error,
};

/// What the executor has to expect from the statements of one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultSetMapping {
    /// The statements return no rows.
    NoResultSet,
    /// The command returns a result set and more result sets follow for it.
    NotLastInResultSet,
    /// The command's final result set, carrying the read back values or the affected row
    /// probe.
    LastInResultSet,
}

/// Writes the SQL of modification commands.
///
/// The provided methods produce the statement layout shared by all dialects:
///
/// ```text
/// INSERT INTO "Blogs" ("Name")
/// VALUES (@p0);
/// SELECT "Id"
/// FROM "Blogs"
/// WHERE <rows affected> = 1 AND <identity condition>;
/// ```
///
/// A dialect supplies the three `append_*` hooks that have no portable SQL. With the
/// [`DialectCapability::Returning`] capability, generated values and the affected row
/// probe come from a `RETURNING` clause instead of a follow-up query.
pub trait UpdateSqlGenerator: Send + Sync {
    fn sql_generation_helper(&self) -> &dyn SqlGenerationHelper;

    /// Matches the row the last insert generated an identity for.
    fn append_identity_where_condition(&self, sql: &mut String, column: &ColumnModification);

    /// Queries the number of rows the previous statement affected.
    fn append_select_affected_count_command(
        &self,
        sql: &mut String,
        table: &str,
        schema: Option<&str>,
        command_position: usize,
    ) -> ResultSetMapping;

    /// A condition that holds if the previous statement affected `expected_rows_affected`
    /// rows.
    fn append_rows_affected_where_condition(&self, sql: &mut String, expected_rows_affected: usize);

    /// Written once at the start of a batch.
    fn append_batch_header(&self, _sql: &mut String) {}

    fn append_operation(
        &self,
        sql: &mut String,
        command: &ModificationCommand,
        command_position: usize,
    ) -> ResultSetMapping {
        match command.entity_state() {
            EntityState::Added => self.append_insert_operation(sql, command, command_position),
            EntityState::Modified => self.append_update_operation(sql, command, command_position),
            EntityState::Deleted => self.append_delete_operation(sql, command, command_position),
        }
    }

    fn append_insert_operation(
        &self,
        sql: &mut String,
        command: &ModificationCommand,
        command_position: usize,
    ) -> ResultSetMapping {
        let write_columns: Vec<_> = command.write_columns().collect();
        let read_columns: Vec<_> = command.read_columns().collect();

        self.append_insert_command_header(sql, command.table(), command.schema(), &write_columns);
        self.append_values_header(sql, &write_columns);
        self.append_values(sql, &write_columns);

        if read_columns.is_empty() {
            self.append_statement_end(sql);
            return ResultSetMapping::NoResultSet;
        }

        if self.supports_returning() {
            self.append_returning_clause(sql, &read_columns);
            self.append_statement_end(sql);
            return ResultSetMapping::LastInResultSet;
        }

        self.append_statement_end(sql);

        let key_columns: Vec<_> = command.key_columns().collect();
        self.append_select_affected_command(
            sql,
            command.table(),
            command.schema(),
            &read_columns,
            &key_columns,
            command_position,
        )
    }

    fn append_update_operation(
        &self,
        sql: &mut String,
        command: &ModificationCommand,
        command_position: usize,
    ) -> ResultSetMapping {
        let write_columns: Vec<_> = command.write_columns().collect();
        let condition_columns: Vec<_> = command.condition_columns().collect();
        let read_columns: Vec<_> = command.read_columns().collect();

        self.append_update_command_header(sql, command.table(), command.schema(), &write_columns);
        self.append_where_clause(sql, &condition_columns);

        if self.supports_returning() {
            self.append_returning_clause(sql, &read_columns);
            self.append_statement_end(sql);
            return ResultSetMapping::LastInResultSet;
        }

        self.append_statement_end(sql);

        if read_columns.is_empty() {
            return self.append_select_affected_count_command(sql, command.table(), command.schema(), command_position);
        }

        let key_columns: Vec<_> = command.key_columns().collect();
        self.append_select_affected_command(
            sql,
            command.table(),
            command.schema(),
            &read_columns,
            &key_columns,
            command_position,
        )
    }

    fn append_delete_operation(
        &self,
        sql: &mut String,
        command: &ModificationCommand,
        command_position: usize,
    ) -> ResultSetMapping {
        let condition_columns: Vec<_> = command.condition_columns().collect();

        self.append_delete_command_header(sql, command.table(), command.schema());
        self.append_where_clause(sql, &condition_columns);

        if self.supports_returning() {
            self.append_returning_clause(sql, &[]);
            self.append_statement_end(sql);
            return ResultSetMapping::LastInResultSet;
        }

        self.append_statement_end(sql);
        self.append_select_affected_count_command(sql, command.table(), command.schema(), command_position)
    }

    /// `SELECT NEXT VALUE FOR "schema"."sequence"`, for dialects with sequences.
    fn generate_next_sequence_value_operation(&self, name: &str, schema: Option<&str>) -> crate::Result<String> {
        let helper = self.sql_generation_helper();

        if !helper.has_capability(DialectCapability::Sequences) {
            return Err(Error::not_supported(
                helper.provider_name(),
                "Sequences",
                "The database does not support sequences.",
            ));
        }

        Ok(format!(
            "SELECT NEXT VALUE FOR {}",
            helper.delimit_identifier_with_schema(name, schema)
        ))
    }

    fn append_next_sequence_value_operation(
        &self,
        sql: &mut String,
        name: &str,
        schema: Option<&str>,
    ) -> crate::Result<()> {
        let operation = self.generate_next_sequence_value_operation(name, schema)?;
        sql.push_str(&operation);
        sql.push_str(self.sql_generation_helper().statement_terminator());
        sql.push('\n');

        Ok(())
    }

    fn supports_returning(&self) -> bool {
        self.sql_generation_helper()
            .has_capability(DialectCapability::Returning)
    }

    fn append_statement_end(&self, sql: &mut String) {
        sql.push_str(self.sql_generation_helper().statement_terminator());
        sql.push('\n');
    }

    fn append_insert_command_header(
        &self,
        sql: &mut String,
        table: &str,
        schema: Option<&str>,
        write_columns: &[&ColumnModification],
    ) {
        let helper = self.sql_generation_helper();

        sql.push_str("INSERT INTO ");
        sql.push_str(&helper.delimit_identifier_with_schema(table, schema));

        if !write_columns.is_empty() {
            sql.push_str(" (");
            self.append_column_list(sql, write_columns);
            sql.push(')');
        }

        sql.push('\n');
    }

    fn append_values_header(&self, sql: &mut String, write_columns: &[&ColumnModification]) {
        if write_columns.is_empty() {
            sql.push_str("DEFAULT VALUES");
        } else {
            sql.push_str("VALUES ");
        }
    }

    fn append_values(&self, sql: &mut String, write_columns: &[&ColumnModification]) {
        if write_columns.is_empty() {
            return;
        }

        let helper = self.sql_generation_helper();
        sql.push('(');

        for (i, column) in write_columns.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }

            match column.parameter_name() {
                Some(parameter) => sql.push_str(&helper.generate_parameter_name(parameter)),
                None => sql.push_str(&helper.generate_literal(column.value())),
            }
        }

        sql.push(')');
    }

    fn append_update_command_header(
        &self,
        sql: &mut String,
        table: &str,
        schema: Option<&str>,
        write_columns: &[&ColumnModification],
    ) {
        let helper = self.sql_generation_helper();

        sql.push_str("UPDATE ");
        sql.push_str(&helper.delimit_identifier_with_schema(table, schema));
        sql.push_str(" SET ");

        for (i, column) in write_columns.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }

            sql.push_str(&helper.delimit_identifier(column.column_name()));
            sql.push_str(" = ");

            match column.parameter_name() {
                Some(parameter) => sql.push_str(&helper.generate_parameter_name(parameter)),
                None => sql.push_str(&helper.generate_literal(column.value())),
            }
        }

        sql.push('\n');
    }

    fn append_delete_command_header(&self, sql: &mut String, table: &str, schema: Option<&str>) {
        sql.push_str("DELETE FROM ");
        sql.push_str(
            &self
                .sql_generation_helper()
                .delimit_identifier_with_schema(table, schema),
        );
        sql.push('\n');
    }

    fn append_where_clause(&self, sql: &mut String, condition_columns: &[&ColumnModification]) {
        if condition_columns.is_empty() {
            return;
        }

        sql.push_str("WHERE ");

        for (i, column) in condition_columns.iter().enumerate() {
            if i > 0 {
                sql.push_str(" AND ");
            }

            self.append_where_condition(sql, column, true);
        }
    }

    /// Compares a column with its original or current value parameter, or checks it for
    /// `NULL` when there is no value to compare with.
    fn append_where_condition(&self, sql: &mut String, column: &ColumnModification, use_original_value: bool) {
        let parameter = if use_original_value {
            column.original_parameter_name()
        } else {
            column.parameter_name()
        };

        self.sql_generation_helper()
            .write_column_condition(sql, column.column_name(), parameter);
    }

    fn append_returning_clause(&self, sql: &mut String, read_columns: &[&ColumnModification]) {
        sql.push_str("\nRETURNING ");

        if read_columns.is_empty() {
            sql.push('1');
        } else {
            self.append_column_list(sql, read_columns);
        }
    }

    /// Reads back generated values of the row the previous statement affected.
    fn append_select_affected_command(
        &self,
        sql: &mut String,
        table: &str,
        schema: Option<&str>,
        read_columns: &[&ColumnModification],
        key_columns: &[&ColumnModification],
        _command_position: usize,
    ) -> ResultSetMapping {
        let helper = self.sql_generation_helper();

        sql.push_str("SELECT ");
        self.append_column_list(sql, read_columns);
        sql.push_str("\nFROM ");
        sql.push_str(&helper.delimit_identifier_with_schema(table, schema));
        sql.push_str("\nWHERE ");
        self.append_rows_affected_where_condition(sql, 1);

        for column in key_columns {
            sql.push_str(" AND ");

            if column.is_identity() {
                self.append_identity_where_condition(sql, column);
            } else {
                self.append_where_condition(sql, column, column.is_condition());
            }
        }

        sql.push_str(helper.statement_terminator());
        sql.push_str("\n\n");

        ResultSetMapping::LastInResultSet
    }

    fn append_column_list(&self, sql: &mut String, columns: &[&ColumnModification]) {
        let helper = self.sql_generation_helper();

        for (i, column) in columns.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }

            sql.push_str(&helper.delimit_identifier(column.column_name()));
        }
    }
}
