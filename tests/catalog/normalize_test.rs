#[cfg(test)]
mod tests {
    use schemascan::catalog::helpers::{
        group_foreign_key_rows, group_index_rows, index_kind, parse_nullability, ForeignKeyRow,
        IndexRow,
    };
    use schemascan::catalog::{adapter_for, CatalogAdapter, MySqlCatalog, PostgresCatalog};
    use schemascan::config::Backend;
    use schemascan::connection::{Row, ScriptedConnection, Value};
    use schemascan::schema::{IndexKind, TableRef};

    #[test]
    fn test_nullability_string_forms() {
        assert!(parse_nullability("YES"));
        assert!(parse_nullability("1"));
        assert!(!parse_nullability("NO"));
        assert!(!parse_nullability("0"));
    }

    #[test]
    fn test_index_kind_normalization() {
        assert_eq!(index_kind("BTREE", false), IndexKind::BTree);
        assert_eq!(index_kind("NONCLUSTERED", false), IndexKind::BTree);
        assert_eq!(index_kind("HASH", false), IndexKind::Hash);
        assert_eq!(index_kind("FULLTEXT", false), IndexKind::FullText);
        assert_eq!(index_kind("gist", false), IndexKind::Other);
        // Uniqueness beats the access-method tag.
        assert_eq!(index_kind("HASH", true), IndexKind::Unique);
    }

    fn fk_row(constraint: &str, foreign: &str, key: &str, ordinal: i64) -> ForeignKeyRow {
        ForeignKeyRow {
            constraint: constraint.to_string(),
            source_schema: "public".to_string(),
            source_table: "order_items".to_string(),
            foreign_column: foreign.to_string(),
            target_schema: "public".to_string(),
            target_table: "products".to_string(),
            key_column: key.to_string(),
            ordinal,
        }
    }

    #[test]
    fn test_composite_constraint_grouping_preserves_ordinal_order() {
        let rows = vec![
            fk_row("fk_combo", "product_id", "product_id", 2),
            fk_row("fk_combo", "order_id", "order_id", 1),
            fk_row("fk_other", "vendor_id", "id", 1),
        ];

        let rels = group_foreign_key_rows(rows);
        assert_eq!(rels.len(), 2);

        let combo = rels.iter().find(|r| r.name == "fk_combo").unwrap();
        assert_eq!(combo.keys, vec!["order_id", "product_id"]);
        assert_eq!(combo.foreigns, vec!["order_id", "product_id"]);
        assert!(combo.is_well_formed());
        assert!(combo.is_composite());
    }

    #[test]
    fn test_index_grouping_orders_key_columns() {
        let rows = vec![
            IndexRow {
                index_name: "ix_pair".to_string(),
                column: "second".to_string(),
                is_unique: false,
                type_tag: "btree".to_string(),
                ordinal: 2,
            },
            IndexRow {
                index_name: "ix_pair".to_string(),
                column: "first".to_string(),
                is_unique: false,
                type_tag: "btree".to_string(),
                ordinal: 1,
            },
        ];

        let indexes = group_index_rows("public", "t", rows);
        assert_eq!(indexes.len(), 1);
        assert_eq!(indexes[0].columns, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_postgres_columns_normalize_nullability_and_comments() {
        let conn = ScriptedConnection::new().on(
            "information_schema.columns",
            vec![
                Row::new(vec![
                    Value::text("id"),
                    Value::text("integer"),
                    Value::text("NO"),
                    Value::Null,
                ]),
                Row::new(vec![
                    Value::text("email"),
                    Value::text("character varying"),
                    Value::text("YES"),
                    Value::text("login address"),
                ]),
            ],
        );

        let adapter = PostgresCatalog;
        let columns = adapter
            .list_columns(&conn, &TableRef::new("public", "users"))
            .await
            .unwrap();

        assert_eq!(columns.len(), 2);
        assert!(!columns[0].nullable);
        assert_eq!(columns[0].comment, "");
        assert!(columns[1].nullable);
        assert_eq!(columns[1].comment, "login address");
    }

    #[tokio::test]
    async fn test_mysql_inverted_uniqueness_flag() {
        let conn = ScriptedConnection::new().on(
            "information_schema.statistics",
            vec![
                Row::new(vec![
                    Value::text("ux_email"),
                    Value::text("email"),
                    Value::int(0),
                    Value::text("BTREE"),
                    Value::int(1),
                ]),
                Row::new(vec![
                    Value::text("ix_name"),
                    Value::text("name"),
                    Value::int(1),
                    Value::text("BTREE"),
                    Value::int(1),
                ]),
            ],
        );

        let adapter = MySqlCatalog;
        let indexes = adapter
            .list_indexes(&conn, &TableRef::new("app", "users"))
            .await
            .unwrap();

        let ux = indexes.iter().find(|i| i.name == "ux_email").unwrap();
        assert_eq!(ux.kind, IndexKind::Unique);
        let ix = indexes.iter().find(|i| i.name == "ix_name").unwrap();
        assert_eq!(ix.kind, IndexKind::BTree);
    }

    #[tokio::test]
    async fn test_postgres_fk_rows_grouped_by_constraint() {
        let conn = ScriptedConnection::new().on(
            "foreign key",
            vec![
                Row::new(vec![
                    Value::text("fk_items_orders"),
                    Value::text("public"),
                    Value::text("order_items"),
                    Value::text("order_id"),
                    Value::text("public"),
                    Value::text("orders"),
                    Value::text("order_id"),
                    Value::int(1),
                ]),
                Row::new(vec![
                    Value::text("fk_items_orders"),
                    Value::text("public"),
                    Value::text("order_items"),
                    Value::text("line_no"),
                    Value::text("public"),
                    Value::text("orders"),
                    Value::text("line_no"),
                    Value::int(2),
                ]),
            ],
        );

        let adapter = PostgresCatalog;
        let rels = adapter.list_relationships(&conn, None, &[]).await.unwrap();
        assert_eq!(rels.len(), 1);
        assert_eq!(rels[0].keys, vec!["order_id", "line_no"]);
        assert_eq!(rels[0].foreigns, vec!["order_id", "line_no"]);
    }

    #[test]
    fn test_factory_rejects_oracle() {
        assert!(adapter_for(Backend::Oracle).is_err());
    }
}
