use chrono::NaiveDate;
use crud_sql::prelude::*;
use crud_sql::render::{escape_str, inline_sql, literal, prepare_record};
use crud_sql::statement;
use serde_json::json;

#[test]
fn where_fragment_begins_with_where_and_joins_with_and() {
    for n in 1..=5 {
        let mut clause = WhereClause::new();
        for i in 0..n {
            clause = clause.and(format!("col{i}"), "=", i64::from(i));
        }
        let fragment = clause.render(Dialect::Postgres, 1).unwrap();
        assert!(fragment.sql.starts_with(" WHERE"));
        assert_eq!(fragment.sql.matches(" AND ").count(), (n - 1) as usize);
        assert!(!fragment.sql.ends_with("AND "));
        assert_eq!(fragment.params.len(), n as usize);
    }
}

#[test]
fn duplicate_looking_predicates_each_get_their_own_placeholder() {
    let clause = WhereClause::new().and("age", ">", 50).and("age", ">", 50);
    let fragment = clause.render(Dialect::Postgres, 1).unwrap();
    assert_eq!(fragment.sql, " WHERE age > $1 AND age > $2");
    assert_eq!(fragment.params.len(), 2);
}

#[test]
fn spec_example_fragment() {
    let clause = WhereClause::new().and("id", "=", 45).and("age", ">", 50);
    let fragment = clause.render(Dialect::Postgres, 1).unwrap();
    assert_eq!(fragment.sql, " WHERE id = $1 AND age > $2");
    assert_eq!(fragment.params, vec![RowValues::Int(45), RowValues::Int(50)]);
}

#[test]
fn unary_predicates_are_embedded_verbatim_without_binding() {
    let clause = WhereClause::new()
        .and_raw("deleted_at", "IS NULL")
        .and("age", ">", 21);
    let fragment = clause.render(Dialect::Sqlite, 1).unwrap();
    assert_eq!(fragment.sql, " WHERE deleted_at IS NULL AND age > ?1");
    assert_eq!(fragment.params, vec![RowValues::Int(21)]);
}

#[test]
fn empty_clause_renders_empty_fragment() {
    let fragment = WhereClause::new().render(Dialect::Postgres, 1).unwrap();
    assert!(fragment.is_empty());
    assert!(fragment.sql.is_empty());
    assert!(fragment.params.is_empty());
}

#[test]
fn malformed_predicates_are_rejected() {
    let clause = WhereClause::new().and("", "=", 1);
    assert!(matches!(
        clause.render(Dialect::Postgres, 1),
        Err(CrudError::MalformedInput(_))
    ));

    let clause = WhereClause::new().and_raw("age", " ");
    assert!(matches!(
        clause.render(Dialect::Postgres, 1),
        Err(CrudError::MalformedInput(_))
    ));
}

#[test]
fn first_placeholder_offsets_numbering() {
    let clause = WhereClause::new().and("id", "=", 1);
    let fragment = clause.render(Dialect::Postgres, 4).unwrap();
    assert_eq!(fragment.sql, " WHERE id = $4");
}

#[test]
fn escaping_neutralizes_single_quotes() {
    assert_eq!(escape_str("O'Brien"), "O''Brien");
    // Already-escaped text stays balanced: every quote is doubled again
    assert_eq!(escape_str("O''Brien"), "O''''Brien");
}

#[test]
fn text_literals_are_always_quoted_and_terminated() {
    let rendered = literal(Dialect::Sqlite, &RowValues::Text("'; DROP TABLE users; --".into()))
        .unwrap();
    assert_eq!(rendered, "'''; DROP TABLE users; --'");
    // An even count of quote characters means the literal terminates
    assert_eq!(rendered.matches('\'').count() % 2, 0);
}

#[test]
fn numeric_values_render_unquoted() {
    assert_eq!(literal(Dialect::Postgres, &RowValues::Int(30)).unwrap(), "30");
    assert_eq!(
        literal(Dialect::Postgres, &RowValues::Float(2.5)).unwrap(),
        "2.5"
    );
    assert_eq!(literal(Dialect::Sqlite, &RowValues::Int(-7)).unwrap(), "-7");
}

#[test]
fn non_finite_floats_have_no_literal_form() {
    assert!(matches!(
        literal(Dialect::Postgres, &RowValues::Float(f64::NAN)),
        Err(CrudError::MalformedInput(_))
    ));
    assert!(matches!(
        literal(Dialect::Sqlite, &RowValues::Float(f64::INFINITY)),
        Err(CrudError::MalformedInput(_))
    ));
}

#[test]
fn dialect_specific_literal_forms() {
    assert_eq!(
        literal(Dialect::Postgres, &RowValues::Bool(true)).unwrap(),
        "TRUE"
    );
    assert_eq!(literal(Dialect::Sqlite, &RowValues::Bool(true)).unwrap(), "1");
    assert_eq!(literal(Dialect::Postgres, &RowValues::Null).unwrap(), "NULL");
    assert_eq!(
        literal(Dialect::Sqlite, &RowValues::Blob(vec![0x01, 0xAB])).unwrap(),
        "X'01AB'"
    );
    assert_eq!(
        literal(Dialect::Postgres, &RowValues::Blob(vec![0x01, 0xAB])).unwrap(),
        r"'\x01AB'"
    );
    assert_eq!(
        literal(Dialect::Postgres, &RowValues::JSON(json!({"a": 1}))).unwrap(),
        r#"'{"a":1}'"#
    );
}

#[test]
fn postgres_backslashes_use_the_e_string_form() {
    assert_eq!(
        literal(Dialect::Postgres, &RowValues::Text(r"a\b".into())).unwrap(),
        r"E'a\\b'"
    );
    // SQLite has no backslash escapes; the text passes through
    assert_eq!(
        literal(Dialect::Sqlite, &RowValues::Text(r"a\b".into())).unwrap(),
        r"'a\b'"
    );
}

#[test]
fn timestamps_render_quoted() {
    let dt = NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(3, 4, 5)
        .unwrap();
    assert_eq!(
        literal(Dialect::Sqlite, &RowValues::Timestamp(dt)).unwrap(),
        "'2024-01-02 03:04:05'"
    );
}

#[test]
fn inline_sql_substitutes_literals_for_placeholders() {
    let out = inline_sql(
        Dialect::Postgres,
        "SELECT * FROM users WHERE id = $1 AND name = $2",
        &[RowValues::Int(45), RowValues::Text("Ada".into())],
    )
    .unwrap();
    assert_eq!(out, "SELECT * FROM users WHERE id = 45 AND name = 'Ada'");
}

#[test]
fn inline_sql_leaves_placeholders_inside_literals_untouched() {
    let out = inline_sql(
        Dialect::Postgres,
        "SELECT '$1' FROM t WHERE a = $1 -- $1",
        &[RowValues::Int(5)],
    )
    .unwrap();
    assert_eq!(out, "SELECT '$1' FROM t WHERE a = 5 -- $1");
}

#[test]
fn inline_sql_rejects_missing_parameters() {
    assert!(matches!(
        inline_sql(Dialect::Sqlite, "SELECT ?1, ?2", &[RowValues::Int(1)]),
        Err(CrudError::ParameterError(_))
    ));
}

#[test]
fn spec_example_insert_renders_inline() {
    let mut record = Record::new();
    record.set("name", "Ada").set("age", 30);
    let statement = statement::insert(Dialect::Postgres, "users", &record).unwrap();
    assert_eq!(
        statement.to_inline_sql(Dialect::Postgres).unwrap(),
        "INSERT INTO users (name, age) VALUES ('Ada', 30)"
    );
}

#[test]
fn prepare_record_keeps_shape_and_order() {
    let mut record = Record::new();
    record.set("name", "O'Brien").set("age", 30);
    let prepared = prepare_record(Dialect::Sqlite, &record).unwrap();
    assert_eq!(
        prepared,
        vec![
            ("name".to_string(), "'O''Brien'".to_string()),
            ("age".to_string(), "30".to_string())
        ]
    );
}

#[test]
fn field_filter_keeps_permitted_columns_in_order() {
    let mut record = Record::new();
    record.set("name", "Ada").set("age", 30).set("secret", "x");
    let filtered = record.retain_fields(&["name", "age"]);
    assert_eq!(filtered.columns().collect::<Vec<_>>(), vec!["name", "age"]);
    assert_eq!(filtered.len(), 2);
    assert!(filtered.get("secret").is_none());
}
