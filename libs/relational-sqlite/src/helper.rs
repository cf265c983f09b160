use relational::dialect::{DialectCapabilities, DialectCapability, SqlGenerationHelper};

/// SQLite's lexical rules. SQLite has no sequences and knows `RETURNING` only from 3.35 on,
/// so the clause is opt-in.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteSqlGenerationHelper {
    returning: bool,
}

impl SqliteSqlGenerationHelper {
    pub fn new(returning: bool) -> Self {
        Self { returning }
    }
}

impl SqlGenerationHelper for SqliteSqlGenerationHelper {
    fn provider_name(&self) -> &'static str {
        "SQLite"
    }

    fn capabilities(&self) -> DialectCapabilities {
        if self.returning {
            DialectCapability::Returning.into()
        } else {
            DialectCapabilities::empty()
        }
    }

    fn generate_boolean_literal(&self, value: bool) -> &'static str {
        if value {
            "1"
        } else {
            "0"
        }
    }

    fn unbounded_limit(&self) -> Option<&'static str> {
        Some("-1")
    }
}
