use expect_test::expect;
use indoc::indoc;
use pretty_assertions::assert_eq;
use relational::{error::ErrorKind, prelude::*};
use relational_sqlite::{SqliteProvider, SqliteUpdateSqlGenerator};

fn provider(connection_string: &str) -> SqliteProvider {
    SqliteProvider::from_connection_string(connection_string).unwrap()
}

fn insert_with_identity() -> ModificationCommand {
    ModificationCommand::new("t", None, EntityState::Added)
        .with_column(ColumnModification::new("id", ColumnFlag::Key | ColumnFlag::Read))
        .with_column(ColumnModification::new("a", ColumnFlag::Write).with_value("x"))
        .with_column(ColumnModification::new("b", ColumnFlag::Write).with_value(None::<i64>))
}

fn update_blog_name() -> ModificationCommand {
    ModificationCommand::new("Blogs", None, EntityState::Modified)
        .with_column(ColumnModification::new("Id", ColumnFlag::Key | ColumnFlag::Condition).with_original_value(1i64))
        .with_column(ColumnModification::new("Name", ColumnFlag::Write).with_value("Rust"))
}

#[test]
fn insert_reads_the_identity_through_last_insert_rowid() {
    let provider = provider("file:app.db");
    let mut batch = provider.create_batch();
    batch.add_command(insert_with_identity()).unwrap();

    let raw = batch.build();

    let expected = indoc! {r#"
        INSERT INTO "t" ("a", "b")
        VALUES (@p0, @p1);
        SELECT "id"
        FROM "t"
        WHERE changes() = 1 AND "rowid" = last_insert_rowid();

    "#};

    assert_eq!(expected, raw.sql);
    let parameters: Vec<_> = raw.parameters.into_iter().map(|p| (p.name, p.value)).collect();
    assert_eq!(
        vec![("p0".to_owned(), Value::text("x")), ("p1".to_owned(), Value::Null)],
        parameters
    );
    assert_eq!(vec![ResultSetMapping::LastInResultSet], raw.result_set_mappings);
}

#[test]
fn update_without_returning_selects_changes_last() {
    let provider = provider("file:app.db");
    let mut batch = provider.create_batch();
    batch.add_command(update_blog_name()).unwrap();

    let raw = batch.build();

    let expected = indoc! {r#"
        UPDATE "Blogs" SET "Name" = @p0
        WHERE "Id" = @p1;
        SELECT changes();

    "#};

    assert_eq!(expected, raw.sql);
    assert_eq!(vec![ResultSetMapping::LastInResultSet], raw.result_set_mappings);
}

#[test]
fn update_without_returning_reads_generated_values_back() {
    let provider = provider("file:app.db");
    let mut batch = provider.create_batch();

    let command = update_blog_name().with_column(ColumnModification::new("UpdatedAt", ColumnFlag::Read));
    batch.add_command(command).unwrap();

    let raw = batch.build();

    let expected = indoc! {r#"
        UPDATE "Blogs" SET "Name" = @p0
        WHERE "Id" = @p1;
        SELECT "UpdatedAt"
        FROM "Blogs"
        WHERE changes() = 1 AND "Id" = @p1;

    "#};

    assert_eq!(expected, raw.sql);
    assert_eq!(vec![ResultSetMapping::LastInResultSet], raw.result_set_mappings);
}

#[test]
fn update_checks_a_concurrency_token_without_a_condition_flag() {
    let provider = provider("file:app.db");
    let mut batch = provider.create_batch();

    let command = update_blog_name()
        .with_column(
            ColumnModification::new("Version", ColumnFlag::Write | ColumnFlag::ConcurrencyToken)
                .with_value(5i64)
                .with_original_value(4i64),
        )
        .with_column(ColumnModification::new("UpdatedAt", ColumnFlag::Read));

    batch.add_command(command).unwrap();

    let raw = batch.build();

    let expected = indoc! {r#"
        UPDATE "Blogs" SET "Name" = @p0, "Version" = @p1
        WHERE "Id" = @p2 AND "Version" = @p3;
        SELECT "UpdatedAt"
        FROM "Blogs"
        WHERE changes() = 1 AND "Id" = @p2;

    "#};

    assert_eq!(expected, raw.sql);

    let parameters: Vec<_> = raw.parameters.into_iter().map(|p| (p.name, p.value)).collect();
    assert_eq!(
        vec![
            ("p0".to_owned(), Value::text("Rust")),
            ("p1".to_owned(), Value::Integer(5)),
            ("p2".to_owned(), Value::Integer(1)),
            ("p3".to_owned(), Value::Integer(4)),
        ],
        parameters
    );

    assert!(batch.consume(&[0]).unwrap_err().is_concurrency_conflict());
}

#[test]
fn affected_count_command_is_the_last_result_set() {
    let generator = SqliteUpdateSqlGenerator::default();
    let mut sql = String::new();

    let mapping = generator.append_select_affected_count_command(&mut sql, "Blogs", None, 0);

    assert_eq!("SELECT changes();\n\n", sql);
    assert_eq!(ResultSetMapping::LastInResultSet, mapping);
}

#[test]
fn sequences_are_not_supported() {
    let err = SqliteUpdateSqlGenerator::default()
        .generate_next_sequence_value_operation("OrderNumbers", None)
        .unwrap_err();

    assert_eq!(
        &ErrorKind::NotSupported {
            provider: "SQLite",
            operation: "Sequences".into(),
            message: "SQLite does not support sequences.".into(),
        },
        err.kind()
    );

    let mut sql = String::new();
    assert!(SqliteUpdateSqlGenerator::default()
        .append_next_sequence_value_operation(&mut sql, "OrderNumbers", None)
        .is_err());
    assert!(sql.is_empty());
}

#[test]
fn returning_replaces_the_follow_up_queries() {
    let provider = provider("file:app.db?returning=true");
    let mut batch = provider.create_batch();

    batch.add_command(insert_with_identity()).unwrap();
    batch.add_command(update_blog_name()).unwrap();

    let raw = batch.build();

    expect![[r#"
        INSERT INTO "t" ("a", "b")
        VALUES (@p0, @p1)
        RETURNING "id";
        UPDATE "Blogs" SET "Name" = @p2
        WHERE "Id" = @p3
        RETURNING 1;
    "#]]
    .assert_eq(&raw.sql);

    assert_eq!(
        vec![ResultSetMapping::LastInResultSet, ResultSetMapping::LastInResultSet],
        raw.result_set_mappings
    );
}

#[test]
fn concurrency_tokens_are_checked_and_conflicts_reported() {
    let provider = provider("file:app.db");
    let mut batch = provider.create_batch();

    let command = ModificationCommand::new("Blogs", None, EntityState::Deleted)
        .with_column(ColumnModification::new("Id", ColumnFlag::Key | ColumnFlag::Condition).with_original_value(1i64))
        .with_column(
            ColumnModification::new("Version", ColumnFlag::Condition | ColumnFlag::ConcurrencyToken)
                .with_original_value(4i64),
        );

    batch.add_command(command).unwrap();

    let raw = batch.build();

    let expected = indoc! {r#"
        DELETE FROM "Blogs"
        WHERE "Id" = @p0 AND "Version" = @p1;
        SELECT changes();

    "#};

    assert_eq!(expected, raw.sql);
    assert!(batch.consume(&[1]).is_ok());

    let err = batch.consume(&[0]).unwrap_err();
    assert_eq!(
        &ErrorKind::ConcurrencyConflict {
            table: "Blogs".into(),
            expected: 1,
            actual: 0
        },
        err.kind()
    );
}

#[test]
fn batches_are_limited_by_the_configured_size() {
    let provider = provider("file:app.db?max_batch_size=1");
    let mut batch = provider.create_batch();

    assert!(batch.add_command(update_blog_name()).is_ok());
    assert!(batch.add_command(update_blog_name()).is_err());
    assert!(batch.is_full());
}
