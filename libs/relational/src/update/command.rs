use super::ColumnModification;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityState {
    Added,
    Modified,
    Deleted,
}

/// The modification of one row of one table.
#[derive(Debug, Clone, PartialEq)]
pub struct ModificationCommand {
    table: String,
    schema: Option<String>,
    state: EntityState,
    columns: Vec<ColumnModification>,
}

impl ModificationCommand {
    pub fn new(table: impl Into<String>, schema: Option<&str>, state: EntityState) -> Self {
        Self {
            table: table.into(),
            schema: schema.map(ToOwned::to_owned),
            state,
            columns: Vec::new(),
        }
    }

    pub fn with_column(mut self, column: ColumnModification) -> Self {
        self.columns.push(column);
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn entity_state(&self) -> EntityState {
        self.state
    }

    pub fn column_modifications(&self) -> &[ColumnModification] {
        &self.columns
    }

    pub(crate) fn column_modifications_mut(&mut self) -> &mut [ColumnModification] {
        &mut self.columns
    }

    pub fn write_columns(&self) -> impl Iterator<Item = &ColumnModification> {
        self.columns.iter().filter(|c| c.is_write())
    }

    pub fn read_columns(&self) -> impl Iterator<Item = &ColumnModification> {
        self.columns.iter().filter(|c| c.is_read())
    }

    pub fn condition_columns(&self) -> impl Iterator<Item = &ColumnModification> {
        self.columns.iter().filter(|c| c.is_condition())
    }

    pub fn key_columns(&self) -> impl Iterator<Item = &ColumnModification> {
        self.columns.iter().filter(|c| c.is_key())
    }
}
