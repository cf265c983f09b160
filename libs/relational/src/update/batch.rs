use super::{ModificationCommand, ResultSetMapping, UpdateSqlGenerator};
use crate::{
    ast::{TypeMapping, Value},
    error::Error,
};

/// A value the batch sends along with its SQL.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandParameter {
    pub name: String,
    pub value: Value,
    /// The store type of the column the value is written to or compared with.
    pub type_mapping: Option<TypeMapping>,
}

/// The SQL text of a batch, ready for the executor.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSqlCommand {
    pub sql: String,
    /// In order of assignment.
    pub parameters: Vec<CommandParameter>,
    /// One entry per command of the batch.
    pub result_set_mappings: Vec<ResultSetMapping>,
}

/// Collects modification commands and renders them as one command text.
///
/// Parameters are named `p0`, `p1`, ... across the whole batch. Within a command the
/// written values come first, then the original values of the condition columns. A
/// command is rendered once, when it is added.
pub struct ModificationCommandBatch<'a> {
    generator: &'a dyn UpdateSqlGenerator,
    max_batch_size: usize,
    commands: Vec<ModificationCommand>,
    parameters: Vec<CommandParameter>,
    sql: String,
    result_set_mappings: Vec<ResultSetMapping>,
}

impl<'a> ModificationCommandBatch<'a> {
    /// # Panics
    ///
    /// If `max_batch_size` is zero.
    pub fn new(generator: &'a dyn UpdateSqlGenerator, max_batch_size: usize) -> Self {
        assert!(max_batch_size > 0, "a batch must be able to hold at least one command");

        Self {
            generator,
            max_batch_size,
            commands: Vec::new(),
            parameters: Vec::new(),
            sql: String::new(),
            result_set_mappings: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[ModificationCommand] {
        &self.commands
    }

    pub fn is_full(&self) -> bool {
        self.commands.len() >= self.max_batch_size
    }

    /// Adds a command and names its parameters. A full batch hands the command back.
    pub fn add_command(&mut self, mut command: ModificationCommand) -> Result<(), ModificationCommand> {
        if self.is_full() {
            return Err(command);
        }

        for column in command.column_modifications_mut().iter_mut().filter(|c| c.is_write()) {
            let name = format!("p{}", self.parameters.len());

            self.parameters.push(CommandParameter {
                name: name.clone(),
                value: column.value().clone(),
                type_mapping: column.type_mapping().cloned(),
            });

            column.parameter_name = Some(name);
        }

        for column in command
            .column_modifications_mut()
            .iter_mut()
            .filter(|c| c.needs_original_value_parameter())
        {
            let name = format!("p{}", self.parameters.len());

            self.parameters.push(CommandParameter {
                name: name.clone(),
                value: column.original_value().clone(),
                type_mapping: column.type_mapping().cloned(),
            });

            column.original_parameter_name = Some(name);
        }

        let position = self.commands.len();
        let mapping = self.generator.append_operation(&mut self.sql, &command, position);

        self.result_set_mappings.push(mapping);
        self.commands.push(command);

        Ok(())
    }

    pub fn build(&self) -> RawSqlCommand {
        let mut sql = String::new();

        self.generator.append_batch_header(&mut sql);
        sql.push_str(&self.sql);

        tracing::debug!(commands = self.commands.len(), %sql, "built modification batch");

        RawSqlCommand {
            sql,
            parameters: self.parameters.clone(),
            result_set_mappings: self.result_set_mappings.clone(),
        }
    }

    /// Validates the affected row counts the executor read from the result sets, one count
    /// per command that produces a result set, in command order.
    ///
    /// Every such command modifies exactly one row. Any other count means the row was
    /// changed or removed concurrently.
    pub fn consume(&self, rows_affected: &[u64]) -> crate::Result<()> {
        let expected = self
            .result_set_mappings
            .iter()
            .filter(|mapping| **mapping != ResultSetMapping::NoResultSet)
            .count();

        if rows_affected.len() != expected {
            return Err(Error::result_set_count_mismatch(expected, rows_affected.len()));
        }

        let commands = self
            .commands
            .iter()
            .zip(&self.result_set_mappings)
            .filter(|(_, mapping)| **mapping != ResultSetMapping::NoResultSet);

        for ((command, _), &actual) in commands.zip(rows_affected) {
            if actual != 1 {
                tracing::warn!(table = command.table(), actual, "concurrency conflict detected");
                return Err(Error::concurrency_conflict(command.table(), 1, actual));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dialect::{RelationalSqlGenerationHelper, SqlGenerationHelper},
        error::ErrorKind,
        prelude::*,
    };
    use tracing_test::traced_test;

    struct CountingUpdateSqlGenerator(RelationalSqlGenerationHelper);

    impl UpdateSqlGenerator for CountingUpdateSqlGenerator {
        fn sql_generation_helper(&self) -> &dyn SqlGenerationHelper {
            &self.0
        }

        fn append_identity_where_condition(&self, sql: &mut String, _: &ColumnModification) {
            sql.push_str("id = identity()");
        }

        fn append_select_affected_count_command(
            &self,
            sql: &mut String,
            _: &str,
            _: Option<&str>,
            _: usize,
        ) -> ResultSetMapping {
            sql.push_str("SELECT row_count();\n");
            ResultSetMapping::LastInResultSet
        }

        fn append_rows_affected_where_condition(&self, sql: &mut String, expected: usize) {
            sql.push_str(&format!("row_count() = {expected}"));
        }
    }

    fn update(id: i64, name: &'static str, version: i64) -> ModificationCommand {
        ModificationCommand::new("Blogs", None, EntityState::Modified)
            .with_column(ColumnModification::new("Id", ColumnFlag::Key | ColumnFlag::Condition).with_original_value(id))
            .with_column(ColumnModification::new("Name", ColumnFlag::Write).with_value(name))
            .with_column(
                ColumnModification::new(
                    "Version",
                    ColumnFlag::Write | ColumnFlag::Condition | ColumnFlag::ConcurrencyToken,
                )
                .with_value(version + 1)
                .with_original_value(version),
            )
    }

    #[test]
    fn parameters_are_numbered_across_the_batch() {
        let generator = CountingUpdateSqlGenerator(RelationalSqlGenerationHelper);
        let mut batch = ModificationCommandBatch::new(&generator, 10);

        batch.add_command(update(1, "a", 7)).unwrap();
        batch.add_command(update(2, "b", 3)).unwrap();

        let names: Vec<_> = batch.build().parameters.into_iter().map(|p| p.name).collect();
        assert_eq!(vec!["p0", "p1", "p2", "p3", "p4", "p5", "p6", "p7"], names);

        let first = &batch.commands()[0].column_modifications()[2];
        assert_eq!(Some("p1"), first.parameter_name());
        assert_eq!(Some("p3"), first.original_parameter_name());
    }

    #[test]
    fn full_batches_hand_the_command_back() {
        let generator = CountingUpdateSqlGenerator(RelationalSqlGenerationHelper);
        let mut batch = ModificationCommandBatch::new(&generator, 1);

        assert!(batch.add_command(update(1, "a", 1)).is_ok());

        let rejected = batch.add_command(update(2, "b", 1)).unwrap_err();
        assert_eq!("Blogs", rejected.table());
        assert_eq!(1, batch.commands().len());
    }

    #[test]
    #[traced_test]
    fn unexpected_row_counts_are_concurrency_conflicts() {
        let generator = CountingUpdateSqlGenerator(RelationalSqlGenerationHelper);
        let mut batch = ModificationCommandBatch::new(&generator, 10);

        batch.add_command(update(1, "a", 1)).unwrap();
        batch.add_command(update(2, "b", 1)).unwrap();

        assert!(batch.consume(&[1, 1]).is_ok());

        let err = batch.consume(&[1, 0]).unwrap_err();
        assert!(err.is_concurrency_conflict());
        assert!(logs_contain("concurrency conflict detected"));
    }

    #[test]
    fn missing_or_extra_row_counts_are_reported() {
        let generator = CountingUpdateSqlGenerator(RelationalSqlGenerationHelper);
        let mut batch = ModificationCommandBatch::new(&generator, 10);

        batch.add_command(update(1, "a", 1)).unwrap();
        batch.add_command(update(2, "b", 1)).unwrap();

        let err = batch.consume(&[1]).unwrap_err();
        assert_eq!(&ErrorKind::ResultSetCountMismatch { expected: 2, actual: 1 }, err.kind());

        let err = batch.consume(&[1, 1, 1]).unwrap_err();
        assert_eq!(&ErrorKind::ResultSetCountMismatch { expected: 2, actual: 3 }, err.kind());
    }

    #[test]
    fn parameters_carry_the_column_store_type() {
        let generator = CountingUpdateSqlGenerator(RelationalSqlGenerationHelper);
        let mut batch = ModificationCommandBatch::new(&generator, 10);
        let mapping = TypeMapping::new("varchar(200)", ValueType::String);

        let command = ModificationCommand::new("Blogs", None, EntityState::Added).with_column(
            ColumnModification::new("Name", ColumnFlag::Write)
                .with_value("a")
                .with_type_mapping(mapping.clone()),
        );

        batch.add_command(command).unwrap();

        assert_eq!(
            vec![CommandParameter {
                name: "p0".into(),
                value: Value::text("a"),
                type_mapping: Some(mapping),
            }],
            batch.build().parameters
        );
    }

    #[test]
    fn commands_without_result_sets_expect_no_counts() {
        let generator = CountingUpdateSqlGenerator(RelationalSqlGenerationHelper);
        let mut batch = ModificationCommandBatch::new(&generator, 10);

        batch
            .add_command(
                ModificationCommand::new("Blogs", None, EntityState::Added)
                    .with_column(ColumnModification::new("Name", ColumnFlag::Write).with_value("a")),
            )
            .unwrap();

        assert_eq!(vec![ResultSetMapping::NoResultSet], batch.build().result_set_mappings);
        assert!(batch.consume(&[]).is_ok());
    }
}
