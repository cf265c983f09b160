use pretty_assertions::assert_eq;
use relational::{error::ErrorKind, prelude::*, translation::methods};
use relational_sqlite::{functions, SqliteProvider};
use std::sync::Arc;

fn provider() -> SqliteProvider {
    SqliteProvider::from_connection_string("file:app.db").unwrap()
}

fn receiver(provider: &SqliteProvider) -> Expression {
    provider.expression_factory().fragment("EF.Functions")
}

#[test]
fn hex_is_resolved_and_translated() {
    let provider = provider();
    let f = provider.expression_factory();

    let method = provider
        .method_catalog()
        .get_required_method("SqliteDbFunctionsExtensions", "Hex", &[ValueType::DbFunctions, ValueType::Bytes])
        .unwrap();

    let data = f.column("Data", "b", ValueType::Bytes, true);
    let translated = provider
        .method_call_translators()
        .translate_required(None, method, &[receiver(&provider), data])
        .unwrap();

    assert_eq!(r#"hex("b"."Data")"#, provider.print(&translated).sql);
}

#[test]
fn glob_takes_the_pattern_first() {
    let provider = provider();
    let f = provider.expression_factory();

    let name = f.column("Name", "b", ValueType::String, true);
    let pattern = f.parameter("pattern", ValueType::String, false);

    let translated = provider
        .method_call_translators()
        .translate(None, &functions::GLOB, &[receiver(&provider), name, pattern])
        .unwrap();

    assert_eq!(r#"glob(@pattern, "b"."Name")"#, provider.print(&translated).sql);
    assert_eq!(Some(&ValueType::Bool), translated.value_type());
}

#[test]
fn substring_shifts_the_start_index() {
    let provider = provider();
    let f = provider.expression_factory();

    let name = f.column("Name", "b", ValueType::String, true);
    let start = f.parameter("start", ValueType::Int32, false);
    let length = f.parameter("length", ValueType::Int32, false);

    let translated = provider
        .method_call_translators()
        .translate(Some(&name), &methods::STRING_SUBSTRING, &[start, length])
        .unwrap();

    assert_eq!(r#"substr("b"."Name", @start + 1, @length)"#, provider.print(&translated).sql);
}

#[test]
fn math_overloads_map_to_the_same_function() {
    let provider = provider();
    let f = provider.expression_factory();
    let translators = provider.method_call_translators();

    let rating = f.column("Rating", "b", ValueType::Double, false);
    let abs_double = translators
        .translate(None, &methods::MATH_ABS_DOUBLE, &[rating])
        .unwrap();

    let count = f.column("Count", "b", ValueType::Int64, false);
    let abs_int = translators.translate(None, &methods::MATH_ABS_INT64, &[count]).unwrap();

    assert_eq!(r#"abs("b"."Rating")"#, provider.print(&abs_double).sql);
    assert_eq!(r#"abs("b"."Count")"#, provider.print(&abs_int).sql);
    assert_eq!(Some("REAL"), abs_double.type_mapping().map(|m| m.store_type.as_ref()));
    assert_eq!(Some("INTEGER"), abs_int.type_mapping().map(|m| m.store_type.as_ref()));
}

#[test]
fn untranslatable_calls_fail() {
    let provider = provider();
    let f = provider.expression_factory();
    let name = f.column("Name", "b", ValueType::String, true);

    static REVERSE: MethodInfo = MethodInfo {
        declaring_type: "String",
        name: "Reverse",
        parameters: &[],
        return_type: ValueType::String,
        is_static: false,
    };

    let err = provider
        .method_call_translators()
        .translate_required(Some(&name), &REVERSE, &[])
        .unwrap_err();

    assert_eq!(
        &ErrorKind::TranslationFailed {
            method: "String.Reverse()".into()
        },
        err.kind()
    );
}

struct UnicodeUpperTranslator(SqlExpressionFactory);

impl MethodCallTranslator for UnicodeUpperTranslator {
    fn translate(&self, instance: Option<&Expression>, method: &MethodInfo, _: &[Expression]) -> Option<Expression> {
        if method != &methods::STRING_TO_UPPER {
            return None;
        }

        Some(self.0.function(
            "upper_unicode",
            vec![instance?.clone()],
            true,
            vec![true],
            ValueType::String,
        ))
    }
}

#[test]
fn plugins_take_precedence_over_built_in_translators() {
    let mut provider = provider();
    let factory = provider.expression_factory().clone();
    provider.add_method_call_translator_plugin(Arc::new(UnicodeUpperTranslator(factory.clone())));

    let name = factory.column("Name", "b", ValueType::String, true);
    let translated = provider
        .method_call_translators()
        .translate(Some(&name), &methods::STRING_TO_UPPER, &[])
        .unwrap();

    assert_eq!(r#"upper_unicode("b"."Name")"#, provider.print(&translated).sql);
}

#[test]
fn cached_commands_use_sqlite_literals() {
    let provider = provider();
    let f = provider.expression_factory();

    let query = Expression::new(
        f.select(f.table("Blogs", None, "b"))
            .project(f.column("Name", "b", ValueType::String, true), None)
            .with_predicate(f.equal(
                f.column("IsPublic", "b", ValueType::Bool, false),
                f.constant(true.into()),
            )),
    );

    let command = provider.command_cache().get_or_print(&query);

    assert_eq!(
        "SELECT \"b\".\"Name\"\nFROM \"Blogs\" AS \"b\"\nWHERE \"b\".\"IsPublic\" = 1;",
        command.sql
    );
}
