//! Lexical rules and capabilities of a SQL dialect.
use crate::ast::Value;
use enumflags2::BitFlags;
use std::fmt::Write;

/// Optional statement features a dialect may offer.
#[enumflags2::bitflags]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DialectCapability {
    /// `INSERT ... RETURNING`, `UPDATE ... RETURNING`, `DELETE ... RETURNING`.
    Returning = 0b01,
    /// Database sequences, read with `NEXT VALUE FOR`.
    Sequences = 0b10,
}

pub type DialectCapabilities = BitFlags<DialectCapability>;

/// The dialect-specific parts of SQL generation, consulted by the printer and the update
/// generators.
pub trait SqlGenerationHelper: Send + Sync {
    /// Used in error messages.
    fn provider_name(&self) -> &'static str;

    fn capabilities(&self) -> DialectCapabilities;

    fn has_capability(&self, capability: DialectCapability) -> bool {
        self.capabilities().contains(capability)
    }

    fn statement_terminator(&self) -> &'static str {
        ";"
    }

    /// Quotes an identifier, doubling any embedded quote.
    fn delimit_identifier(&self, identifier: &str) -> String {
        format!("\"{}\"", identifier.replace('"', "\"\""))
    }

    fn delimit_identifier_with_schema(&self, name: &str, schema: Option<&str>) -> String {
        match schema {
            Some(schema) => format!("{}.{}", self.delimit_identifier(schema), self.delimit_identifier(name)),
            None => self.delimit_identifier(name),
        }
    }

    /// The placeholder a named parameter is referenced with in SQL text.
    fn generate_parameter_name(&self, name: &str) -> String {
        format!("@{name}")
    }

    fn generate_boolean_literal(&self, value: bool) -> &'static str {
        if value {
            "TRUE"
        } else {
            "FALSE"
        }
    }

    /// Infinite reals overflow to infinity as `9e999`. NaN has no SQL literal and becomes
    /// `NULL`.
    fn generate_literal(&self, value: &Value) -> String {
        match value {
            Value::Null => "NULL".to_owned(),
            Value::Boolean(b) => self.generate_boolean_literal(*b).to_owned(),
            Value::Integer(i) => i.to_string(),
            Value::Real(r) if r.is_nan() => "NULL".to_owned(),
            Value::Real(r) if r.is_infinite() => {
                if r.is_sign_positive() {
                    "9e999".to_owned()
                } else {
                    "-9e999".to_owned()
                }
            }
            Value::Real(r) => format!("{r:?}"),
            Value::Text(t) => format!("'{}'", t.replace('\'', "''")),
            Value::Bytes(bytes) => {
                let mut literal = String::with_capacity(bytes.len() * 2 + 3);
                literal.push_str("X'");
                literal.push_str(&hex::encode_upper(bytes));
                literal.push('\'');
                literal
            }
        }
    }

    /// The `LIMIT` value that lifts the row limit, for dialects that cannot write an
    /// `OFFSET` without a `LIMIT`.
    fn unbounded_limit(&self) -> Option<&'static str> {
        None
    }

    /// Writes `"column" = @parameter`, or `"column" IS NULL` when there is no value to
    /// compare with.
    fn write_column_condition(&self, sql: &mut String, column: &str, parameter: Option<&str>) {
        let column = self.delimit_identifier(column);

        match parameter {
            Some(parameter) => {
                let _ = write!(sql, "{column} = {}", self.generate_parameter_name(parameter));
            }
            None => {
                let _ = write!(sql, "{column} IS NULL");
            }
        }
    }
}

/// ANSI-flavoured defaults. Supports both `RETURNING` and sequences.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelationalSqlGenerationHelper;

impl SqlGenerationHelper for RelationalSqlGenerationHelper {
    fn provider_name(&self) -> &'static str {
        "Relational"
    }

    fn capabilities(&self) -> DialectCapabilities {
        DialectCapability::Returning | DialectCapability::Sequences
    }
}
