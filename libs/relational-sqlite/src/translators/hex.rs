use crate::functions;
use relational::{
    ast::{Expression, ValueType},
    factory::SqlExpressionFactory,
    translation::{MethodCallTranslator, MethodInfo},
};

/// `EF.Functions.Hex(bytes)` to `hex(bytes)`.
#[derive(Debug, Clone)]
pub struct SqliteHexMethodTranslator {
    factory: SqlExpressionFactory,
}

impl SqliteHexMethodTranslator {
    pub fn new(factory: SqlExpressionFactory) -> Self {
        Self { factory }
    }
}

impl MethodCallTranslator for SqliteHexMethodTranslator {
    fn translate(&self, _: Option<&Expression>, method: &MethodInfo, arguments: &[Expression]) -> Option<Expression> {
        if method != &functions::HEX {
            return None;
        }

        // The first argument is the `DbFunctions` receiver.
        Some(
            self.factory
                .function("hex", vec![arguments[1].clone()], true, vec![true], ValueType::String),
        )
    }
}
