//! Integration tests covering builder and ledger together.

use crate::{Clause, ParamLedger, SqlValue, query, query_with_base};

#[test]
fn full_chain_numbers_placeholders_across_clauses() {
    let stmt = query()
        .select("*")
        .from(r#""USERS""#)
        .where_eq("name", "taro")
        .where_eq_opt("age", Some(1i64))
        .offset(2)
        .limit(1)
        .build();

    assert_eq!(
        stmt.sql,
        r#"SELECT * FROM "USERS" WHERE name = $1 AND age = $2 OFFSET $3 LIMIT $4;"#
    );
    assert_eq!(
        stmt.params,
        vec![
            SqlValue::from("taro"),
            SqlValue::Int(1),
            SqlValue::Int(2),
            SqlValue::Int(1),
        ]
    );
    assert!(stmt.verify().is_ok());
}

#[test]
fn base_prefix_composes_with_structured_clauses() {
    let stmt = query_with_base(r#"SELECT * FROM "USERS""#)
        .where_eq("name", "taro")
        .build();
    assert_eq!(stmt.sql, r#"SELECT * FROM "USERS" WHERE name = $1;"#);
    assert_eq!(stmt.params, vec![SqlValue::from("taro")]);
}

#[test]
fn placeholder_indices_shift_with_where_width() {
    // One predicate pushes OFFSET to $2 and LIMIT to $3.
    let one = query().select("*").from("t").where_eq("a", 1i64).offset(5).limit(10).build();
    assert!(one.sql.ends_with("WHERE a = $1 OFFSET $2 LIMIT $3;"));

    // No predicates and no offset: LIMIT falls back to $1.
    let bare = query().select("*").from("t").limit(10).build();
    assert!(bare.sql.ends_with("LIMIT $1;"));
}

#[test]
fn ledger_and_builder_agree_on_start_indices() {
    let mut ledger = ParamLedger::new();
    ledger.push_where("taro").push_where(1i64);
    ledger.set_offset(2);

    assert_eq!(ledger.start_index(&[Clause::Where]), 3);
    assert_eq!(ledger.start_index(&[Clause::Where, Clause::Offset]), 4);

    let sql = query()
        .select("*")
        .from("t")
        .where_eq("name", "taro")
        .where_eq("age", 1i64)
        .offset(2)
        .limit(1)
        .to_sql();
    assert!(sql.contains("OFFSET $3"));
    assert!(sql.contains("LIMIT $4"));
}

#[test]
fn count_variant_excludes_pagination_even_when_set() {
    let qb = query()
        .select("id")
        .select("name")
        .from(r#""USERS""#)
        .where_eq("status", "active")
        .order_by_asc("id")
        .offset(40)
        .limit(20);

    let data = qb.build();
    let count = qb.build_count();

    assert_eq!(data.params.len(), 3);
    assert_eq!(count.params, vec![SqlValue::from("active")]);
    assert_eq!(
        count.sql,
        r#"SELECT count(*) OVER() as found FROM "USERS" WHERE status = $1 LIMIT 1;"#
    );
}

#[test]
fn statements_compare_equal_across_repeated_builds() {
    let qb = query_with_base("SELECT 1").append_opt(Some("FOR UPDATE"));
    let first = qb.build();
    let second = qb.build();
    assert_eq!(first, second);
    assert_eq!(first.sql, "SELECT 1 FOR UPDATE;");
}
