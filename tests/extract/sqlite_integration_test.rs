#[cfg(test)]
mod tests {
    use schemascan::config::{Backend, ExtractionOptions};
    use schemascan::connection::SqliteConnection;
    use schemascan::extract::Extractor;
    use schemascan::schema::{IndexKind, InferredType};

    async fn seeded(ddl: &str) -> SqliteConnection {
        let conn = SqliteConnection::open_in_memory().unwrap();
        conn.execute_batch(ddl).await.unwrap();
        conn
    }

    #[tokio::test]
    async fn test_end_to_end_extraction() {
        let conn = seeded(
            "CREATE TABLE users (
                 id INTEGER PRIMARY KEY,
                 email TEXT NOT NULL,
                 is_active TINYINT NOT NULL DEFAULT 1
             );
             CREATE TABLE orders (
                 id INTEGER PRIMARY KEY,
                 user_id INTEGER NOT NULL REFERENCES users(id),
                 total REAL
             );
             CREATE UNIQUE INDEX ux_users_email ON users(email);
             CREATE INDEX ix_orders_user ON orders(user_id);
             CREATE VIEW paid_orders AS SELECT * FROM orders WHERE total > 0;",
        )
        .await;

        let extractor = Extractor::new(Backend::Sqlite, ExtractionOptions::default()).unwrap();
        let schema = extractor.extract(&conn).await.unwrap();

        let names: Vec<_> = schema.tables.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["orders", "users", "paid_orders"]);
        assert!(schema.tables[2].is_view);

        let users = schema.table("", "users").unwrap();
        assert_eq!(users.columns.len(), 3);
        assert!(!users.columns[1].nullable);
        assert_eq!(users.columns[2].inferred, InferredType::Boolean);
        assert_eq!(users.indexes.len(), 1);
        assert_eq!(users.indexes[0].kind, IndexKind::Unique);

        assert_eq!(schema.relationships.len(), 1);
        let rel = &schema.relationships[0];
        assert_eq!(rel.source_table, "orders");
        assert_eq!(rel.target_table, "users");
        assert_eq!(rel.foreigns, vec!["user_id"]);
        assert_eq!(rel.keys, vec!["id"]);

        let orders = schema.table("", "orders").unwrap();
        assert_eq!(orders.outgoing.len(), 1);
        assert_eq!(users.incoming.len(), 1);
    }

    #[tokio::test]
    async fn test_sampling_confirms_ambiguous_flag_column() {
        let conn = seeded(
            "CREATE TABLE accounts (id INTEGER PRIMARY KEY, legacy_flags TINYINT);
             INSERT INTO accounts (legacy_flags) VALUES (0), (1), (1), (NULL), (0);",
        )
        .await;

        let options = ExtractionOptions {
            data_sampling: true,
            ..Default::default()
        };
        let extractor = Extractor::new(Backend::Sqlite, options).unwrap();
        let schema = extractor.extract(&conn).await.unwrap();

        let accounts = schema.table("", "accounts").unwrap();
        assert_eq!(accounts.columns[1].inferred, InferredType::Boolean);
    }

    #[tokio::test]
    async fn test_sampling_rejects_wide_domain() {
        let conn = seeded(
            "CREATE TABLE accounts (id INTEGER PRIMARY KEY, legacy_flags TINYINT);
             INSERT INTO accounts (legacy_flags) VALUES (0), (1), (3);",
        )
        .await;

        let options = ExtractionOptions {
            data_sampling: true,
            ..Default::default()
        };
        let extractor = Extractor::new(Backend::Sqlite, options).unwrap();
        let schema = extractor.extract(&conn).await.unwrap();

        let accounts = schema.table("", "accounts").unwrap();
        assert_eq!(accounts.columns[1].inferred, InferredType::Unresolved);
    }

    #[tokio::test]
    async fn test_legacy_inference_on_constraint_free_schema() {
        let conn = seeded(
            "CREATE TABLE users (id INTEGER PRIMARY KEY, email TEXT);
             CREATE TABLE orders (id INTEGER PRIMARY KEY, user_id INTEGER, total REAL);",
        )
        .await;

        let options = ExtractionOptions {
            legacy_relationship_inference: true,
            ..Default::default()
        };
        let extractor = Extractor::new(Backend::Sqlite, options).unwrap();
        let schema = extractor.extract(&conn).await.unwrap();

        assert_eq!(schema.relationships.len(), 1);
        let rel = &schema.relationships[0];
        assert_eq!(rel.name, "fk_orders_user_id");
        assert_eq!(rel.source_table, "orders");
        assert_eq!(rel.target_table, "users");
        assert_eq!(rel.keys, vec!["id"]);
    }

    #[tokio::test]
    async fn test_structure_only_leaves_inference_untouched() {
        let conn = seeded("CREATE TABLE users (id INTEGER PRIMARY KEY, is_active TINYINT);").await;

        let extractor =
            Extractor::new(Backend::Sqlite, ExtractionOptions::structure_only()).unwrap();
        let schema = extractor.extract(&conn).await.unwrap();

        let users = schema.table("", "users").unwrap();
        assert_eq!(users.columns[1].inferred, InferredType::Unresolved);
    }
}
