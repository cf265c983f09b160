use relational::{
    ast::Expression,
    factory::SqlExpressionFactory,
    translation::{methods, MethodCallTranslator, MethodInfo},
};

/// Static methods of `Math` that have a SQLite counterpart.
#[derive(Debug, Clone)]
pub struct SqliteMathTranslator {
    factory: SqlExpressionFactory,
}

impl SqliteMathTranslator {
    pub fn new(factory: SqlExpressionFactory) -> Self {
        Self { factory }
    }
}

impl MethodCallTranslator for SqliteMathTranslator {
    fn translate(&self, _: Option<&Expression>, method: &MethodInfo, arguments: &[Expression]) -> Option<Expression> {
        let function = [
            (&methods::MATH_ABS_INT64, "abs"),
            (&methods::MATH_ABS_DOUBLE, "abs"),
            (&methods::MATH_MAX_INT64, "max"),
            (&methods::MATH_MIN_INT64, "min"),
            (&methods::MATH_ROUND_DOUBLE, "round"),
        ]
        .into_iter()
        .find_map(|(known, function)| (known == method).then_some(function))?;

        Some(self.factory.function(
            function,
            arguments.to_vec(),
            true,
            vec![true; arguments.len()],
            method.return_type,
        ))
    }
}
