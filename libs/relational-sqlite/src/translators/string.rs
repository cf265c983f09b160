use relational::{
    ast::{Expression, ValueType},
    factory::SqlExpressionFactory,
    translation::{methods, MethodCallTranslator, MethodInfo},
};

/// Instance methods of strings.
#[derive(Debug, Clone)]
pub struct SqliteStringMethodTranslator {
    factory: SqlExpressionFactory,
}

impl SqliteStringMethodTranslator {
    pub fn new(factory: SqlExpressionFactory) -> Self {
        Self { factory }
    }

    fn unary(&self, name: &str, instance: &Expression) -> Expression {
        self.factory
            .function(name, vec![instance.clone()], true, vec![true], ValueType::String)
    }
}

impl MethodCallTranslator for SqliteStringMethodTranslator {
    fn translate(
        &self,
        instance: Option<&Expression>,
        method: &MethodInfo,
        arguments: &[Expression],
    ) -> Option<Expression> {
        let instance = instance?;

        if method == &methods::STRING_TO_UPPER {
            return Some(self.unary("upper", instance));
        }

        if method == &methods::STRING_TO_LOWER {
            return Some(self.unary("lower", instance));
        }

        if method == &methods::STRING_TRIM {
            return Some(self.unary("trim", instance));
        }

        if method == &methods::STRING_SUBSTRING {
            // `substr` counts from one.
            let start = self
                .factory
                .add(arguments[0].clone(), self.factory.typed_constant(1i32.into(), ValueType::Int32));

            return Some(self.factory.function(
                "substr",
                vec![instance.clone(), start, arguments[1].clone()],
                true,
                vec![true, true, true],
                ValueType::String,
            ));
        }

        None
    }
}
