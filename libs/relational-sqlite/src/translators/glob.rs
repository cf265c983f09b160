use crate::functions;
use relational::{
    ast::{Expression, ValueType},
    factory::SqlExpressionFactory,
    translation::{MethodCallTranslator, MethodInfo},
};

/// `EF.Functions.Glob(matchExpression, pattern)` to `glob(pattern, matchExpression)`.
#[derive(Debug, Clone)]
pub struct SqliteGlobMethodTranslator {
    factory: SqlExpressionFactory,
}

impl SqliteGlobMethodTranslator {
    pub fn new(factory: SqlExpressionFactory) -> Self {
        Self { factory }
    }
}

impl MethodCallTranslator for SqliteGlobMethodTranslator {
    fn translate(&self, _: Option<&Expression>, method: &MethodInfo, arguments: &[Expression]) -> Option<Expression> {
        if method != &functions::GLOB {
            return None;
        }

        let match_expression = arguments[1].clone();
        let pattern = arguments[2].clone();

        Some(self.factory.function(
            "glob",
            vec![pattern, match_expression],
            true,
            vec![true, true],
            ValueType::Bool,
        ))
    }
}
