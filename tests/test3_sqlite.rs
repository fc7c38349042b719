#![cfg(feature = "sqlite")]

use std::time::Duration;

use crud_sql::prelude::*;
use crud_sql::{crud, statement};
use tokio::runtime::Runtime;

const DDL: &str = "
    CREATE TABLE users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        age INTEGER
    );
";

#[test]
fn sqlite_end_to_end_crud() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let cap = ConfigAndPool::new_sqlite(":memory:").await?;
        let mut conn = cap.get_connection().await?;
        crud::execute_batch(&mut conn, DDL).await?;

        let options = ExecOptions::default();

        // insert
        let mut record = Record::new();
        record.set("name", "Ada").set("age", 30);
        let affected = crud::insert(&mut conn, "users", &record, &options).await?;
        assert_eq!(affected, 1);

        // insert with generated id readback
        let mut record = Record::new();
        record.set("name", "Grace").set("age", 45);
        let id = crud::insert_returning_id(&mut conn, "users", &record, "id", &options).await?;
        assert_eq!(id, 2);

        // select, ordered
        let query = SelectQuery::new("users")
            .columns(["name", "age"])
            .filter(WhereClause::new().and("age", ">", 21))
            .order_by("age", OrderDirection::Asc);
        let rows = crud::select(&mut conn, &query, &options).await?;
        assert_eq!(rows.len(), 2);
        let first = rows.first().expect("row");
        assert_eq!(first.get("name").and_then(|v| v.as_text()), Some("Ada"));
        assert_eq!(first.get("age"), Some(&RowValues::Int(30)));

        // zero-row select is a success with an empty set
        let query = SelectQuery::new("users").filter(WhereClause::new().and("age", ">", 100));
        let rows = crud::select(&mut conn, &query, &options).await?;
        assert!(rows.is_empty());

        // update, bounded to one row by default
        let mut changes = Record::new();
        changes.set("age", 31);
        let affected = crud::update(
            &mut conn,
            "users",
            &changes,
            &WhereClause::new().and("name", "=", "Ada"),
            None,
            &options,
        )
        .await?;
        assert_eq!(affected, 1);

        let query = SelectQuery::new("users").filter(WhereClause::new().and("name", "=", "Ada"));
        let rows = crud::select(&mut conn, &query, &options).await?;
        assert_eq!(
            rows.first().and_then(|r| r.get("age")),
            Some(&RowValues::Int(31))
        );

        // zero rows affected is a legitimate success, not an error
        let affected = crud::update(
            &mut conn,
            "users",
            &changes,
            &WhereClause::new().and("name", "=", "nobody"),
            None,
            &options,
        )
        .await?;
        assert_eq!(affected, 0);

        Ok::<(), Box<dyn std::error::Error>>(())
    })?;
    Ok(())
}

#[test]
fn delete_and_update_limits_bound_matched_rows() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let cap = ConfigAndPool::new_sqlite(":memory:").await?;
        let mut conn = cap.get_connection().await?;
        crud::execute_batch(&mut conn, DDL).await?;

        let options = ExecOptions::default();
        for name in ["a", "b", "c"] {
            let mut record = Record::new();
            record.set("name", name).set("age", 30);
            crud::insert(&mut conn, "users", &record, &options).await?;
        }

        // The filter matches all three rows; the default limit deletes one
        let filter = WhereClause::new().and("age", "=", 30);
        let affected = crud::delete(&mut conn, "users", &filter, None, &options).await?;
        assert_eq!(affected, 1);

        let rows = crud::select(&mut conn, &SelectQuery::new("users"), &options).await?;
        assert_eq!(rows.len(), 2);

        // An unfiltered delete is still bounded
        let affected = crud::delete(&mut conn, "users", &WhereClause::new(), None, &options).await?;
        assert_eq!(affected, 1);

        // An explicit limit widens the bound
        let mut record = Record::new();
        record.set("name", "d").set("age", 30);
        crud::insert(&mut conn, "users", &record, &options).await?;
        let affected = crud::delete(&mut conn, "users", &filter, Some(5), &options).await?;
        assert_eq!(affected, 2);

        // Bounded update touches exactly one of several matching rows
        for name in ["x", "y"] {
            let mut record = Record::new();
            record.set("name", name).set("age", 30);
            crud::insert(&mut conn, "users", &record, &options).await?;
        }
        let mut changes = Record::new();
        changes.set("age", 99);
        let affected = crud::update(&mut conn, "users", &changes, &filter, None, &options).await?;
        assert_eq!(affected, 1);
        let rows = crud::select(
            &mut conn,
            &SelectQuery::new("users").filter(WhereClause::new().and("age", "=", 99)),
            &options,
        )
        .await?;
        assert_eq!(rows.len(), 1);

        Ok::<(), Box<dyn std::error::Error>>(())
    })?;
    Ok(())
}

#[test]
fn field_filter_feeds_the_builder() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let cap = ConfigAndPool::new_sqlite(":memory:").await?;
        let mut conn = cap.get_connection().await?;
        crud::execute_batch(&mut conn, DDL).await?;

        // Untrusted input carries a column the table must never see
        let mut input = Record::new();
        input.set("name", "Ada").set("age", 30).set("is_admin", true);
        let record = input.retain_fields(&["name", "age"]);
        let affected =
            crud::insert(&mut conn, "users", &record, &ExecOptions::default()).await?;
        assert_eq!(affected, 1);

        Ok::<(), Box<dyn std::error::Error>>(())
    })?;
    Ok(())
}

#[test]
fn executor_honors_timeout_and_translation_options() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let cap = ConfigAndPool::new_sqlite(":memory:").await?;
        let mut conn = cap.get_connection().await?;
        crud::execute_batch(&mut conn, DDL).await?;

        let mut record = Record::new();
        record.set("name", "Ada").set("age", 30);
        crud::insert(&mut conn, "users", &record, &ExecOptions::default()).await?;

        // A generous timeout passes through
        let options = ExecOptions::default().with_timeout(Duration::from_secs(30));
        let rows = crud::select(&mut conn, &SelectQuery::new("users"), &options).await?;
        assert_eq!(rows.len(), 1);

        // Postgres-style SQL runs on SQLite when translation is forced on
        let statement = Statement::new(
            "SELECT name FROM users WHERE age = $1 LIMIT 15",
            vec![RowValues::Int(30)],
        );
        let options = ExecOptions::default().with_translation(TranslationMode::ForceOn);
        let rows = conn.execute_select(&statement, &options).await?;
        assert_eq!(
            rows.first().and_then(|r| r.get("name")).and_then(|v| v.as_text()),
            Some("Ada")
        );

        Ok::<(), Box<dyn std::error::Error>>(())
    })?;
    Ok(())
}

#[test]
fn built_statements_execute_through_the_trait_surface() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let cap = ConfigAndPool::new_sqlite(":memory:").await?;
        let mut conn = cap.get_connection().await?;
        conn.execute_batch(DDL).await?;

        let mut record = Record::new();
        record.set("name", "Ada").set("age", 30);
        let statement = statement::insert(conn.dialect(), "users", &record)?;
        let affected = conn
            .execute_dml(&statement, &ExecOptions::default())
            .await?;
        assert_eq!(affected, 1);

        Ok::<(), Box<dyn std::error::Error>>(())
    })?;
    Ok(())
}

#[test]
fn file_backed_database_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    let dir = tempfile::tempdir()?;
    let db_path = dir.path().join("crud.db").to_string_lossy().into_owned();

    rt.block_on(async {
        let cap = ConfigAndPool::new_sqlite(db_path.clone()).await?;
        let mut conn = cap.get_connection().await?;
        crud::execute_batch(&mut conn, DDL).await?;

        let mut record = Record::new();
        record.set("name", "Ada").set("age", 30);
        crud::insert(&mut conn, "users", &record, &ExecOptions::default()).await?;
        Ok::<(), Box<dyn std::error::Error>>(())
    })?;

    // Reopen and read back
    rt.block_on(async {
        let cap = ConfigAndPool::new_sqlite(db_path.clone()).await?;
        let mut conn = cap.get_connection().await?;
        let rows = crud::select(
            &mut conn,
            &SelectQuery::new("users"),
            &ExecOptions::default(),
        )
        .await?;
        assert_eq!(rows.len(), 1);
        Ok::<(), Box<dyn std::error::Error>>(())
    })?;
    Ok(())
}
