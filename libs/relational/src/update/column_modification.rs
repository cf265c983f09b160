use crate::ast::{TypeMapping, Value};
use enumflags2::BitFlags;

/// The roles a column plays in a modification.
#[enumflags2::bitflags]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ColumnFlag {
    /// Part of the primary key.
    Key = 0b00001,
    /// Compared against its original value in the `WHERE` clause.
    Condition = 0b00010,
    /// Generated by the database and read back after the statement.
    Read = 0b00100,
    /// Written by the statement.
    Write = 0b01000,
    /// Checked against its original value like a [`ColumnFlag::Condition`], so a concurrent
    /// change makes the statement affect no rows.
    ConcurrencyToken = 0b10000,
}

pub type ColumnFlags = BitFlags<ColumnFlag>;

/// One column of a modified row.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnModification {
    column_name: String,
    type_mapping: Option<TypeMapping>,
    value: Value,
    original_value: Value,
    flags: ColumnFlags,
    pub(crate) parameter_name: Option<String>,
    pub(crate) original_parameter_name: Option<String>,
}

impl ColumnModification {
    pub fn new(column_name: impl Into<String>, flags: impl Into<ColumnFlags>) -> Self {
        Self {
            column_name: column_name.into(),
            type_mapping: None,
            value: Value::Null,
            original_value: Value::Null,
            flags: flags.into(),
            parameter_name: None,
            original_parameter_name: None,
        }
    }

    /// The value written by the statement.
    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = value.into();
        self
    }

    /// The value the row is expected to have when it is matched.
    pub fn with_original_value(mut self, value: impl Into<Value>) -> Self {
        self.original_value = value.into();
        self
    }

    pub fn with_type_mapping(mut self, mapping: TypeMapping) -> Self {
        self.type_mapping = Some(mapping);
        self
    }

    pub fn column_name(&self) -> &str {
        &self.column_name
    }

    pub fn type_mapping(&self) -> Option<&TypeMapping> {
        self.type_mapping.as_ref()
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn original_value(&self) -> &Value {
        &self.original_value
    }

    pub fn flags(&self) -> ColumnFlags {
        self.flags
    }

    pub fn is_key(&self) -> bool {
        self.flags.contains(ColumnFlag::Key)
    }

    /// Matched in the `WHERE` clause. Concurrency tokens always are.
    pub fn is_condition(&self) -> bool {
        self.flags.contains(ColumnFlag::Condition) || self.is_concurrency_token()
    }

    pub fn is_read(&self) -> bool {
        self.flags.contains(ColumnFlag::Read)
    }

    pub fn is_write(&self) -> bool {
        self.flags.contains(ColumnFlag::Write)
    }

    pub fn is_concurrency_token(&self) -> bool {
        self.flags.contains(ColumnFlag::ConcurrencyToken)
    }

    /// The key column the database generates on insert.
    pub fn is_identity(&self) -> bool {
        self.is_key() && self.is_read()
    }

    /// The parameter carrying [`Self::value`], assigned by the batch.
    pub fn parameter_name(&self) -> Option<&str> {
        self.parameter_name.as_deref()
    }

    /// The parameter carrying [`Self::original_value`], assigned by the batch. Stays empty
    /// when the original value is `NULL`, which is matched with `IS NULL` instead.
    pub fn original_parameter_name(&self) -> Option<&str> {
        self.original_parameter_name.as_deref()
    }

    pub(crate) fn needs_original_value_parameter(&self) -> bool {
        self.is_condition() && !self.original_value.is_null()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concurrency_tokens_are_conditions() {
        let token = ColumnModification::new("Version", ColumnFlag::ConcurrencyToken).with_original_value(3i64);

        assert!(token.is_condition());
        assert!(token.needs_original_value_parameter());
        assert!(!ColumnModification::new("Name", ColumnFlag::Write).is_condition());
    }

    #[test]
    fn generated_keys_are_identities() {
        assert!(ColumnModification::new("Id", ColumnFlag::Key | ColumnFlag::Read).is_identity());
        assert!(!ColumnModification::new("Id", ColumnFlag::Key | ColumnFlag::Condition).is_identity());
        assert!(!ColumnModification::new("Stamp", ColumnFlag::Read).is_identity());
    }
}
