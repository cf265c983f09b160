//! Compiled command caching.
use crate::{
    ast::Expression,
    dialect::SqlGenerationHelper,
    printer::{ExpressionPrinter, PrintedQuery},
    visitor::SqlNullabilityProcessor,
};
use parking_lot::RwLock;
use std::{collections::HashMap, sync::Arc};

/// Maps query trees to their printed SQL.
///
/// Trees are keyed by structure, so two separately built but equal trees share an entry.
/// On a miss the tree is postprocessed and printed without holding the lock; when two
/// threads race on the same tree, the first insert wins and both get the stored command.
///
/// Entries are never evicted. The cache grows with the number of distinct trees, which is
/// bounded when queries are parameterized; callers printing trees with inlined constants
/// should [`clear`](Self::clear) it periodically.
pub struct RelationalCommandCache {
    helper: Arc<dyn SqlGenerationHelper>,
    commands: RwLock<HashMap<Expression, Arc<PrintedQuery>>>,
}

impl RelationalCommandCache {
    pub fn new(helper: Arc<dyn SqlGenerationHelper>) -> Self {
        Self {
            helper,
            commands: RwLock::new(HashMap::new()),
        }
    }

    pub fn get_or_print(&self, query: &Expression) -> Arc<PrintedQuery> {
        if let Some(command) = self.commands.read().get(query) {
            tracing::trace!("command cache hit");
            return Arc::clone(command);
        }

        let processed = SqlNullabilityProcessor::new().process(query);
        let printed = Arc::new(ExpressionPrinter::print_statement(self.helper.as_ref(), &processed));

        let mut commands = self.commands.write();
        let command = commands.entry(query.clone()).or_insert_with(|| {
            tracing::debug!(sql = %printed.sql, "caching new command");
            printed
        });

        Arc::clone(command)
    }

    pub fn len(&self) -> usize {
        self.commands.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.read().is_empty()
    }

    pub fn clear(&self) {
        self.commands.write().clear();
    }
}
