#[cfg(test)]
mod tests {
    use schemascan::catalog::{adapter_for, CatalogAdapter};
    use schemascan::config::Backend;
    use schemascan::connection::{Row, ScriptedConnection, Value};
    use schemascan::inference::sampling::{confirm_boolean, confirm_guid};
    use schemascan::schema::TableRef;

    fn adapter() -> Box<dyn CatalogAdapter> {
        adapter_for(Backend::Postgres).unwrap()
    }

    fn single(values: Vec<Value>) -> Vec<Row> {
        values.into_iter().map(|v| Row::new(vec![v])).collect()
    }

    fn guid_rows(count: usize) -> Vec<Row> {
        (0..count)
            .map(|i| {
                Row::new(vec![Value::text(format!(
                    "6f9619ff-8b86-d011-b42d-00c04fc9{i:04x}"
                ))])
            })
            .collect()
    }

    #[tokio::test]
    async fn test_boolean_confirmed_for_zero_one_domain() {
        let conn = ScriptedConnection::new()
            .on("select distinct", single(vec![Value::int(0), Value::int(1)]));
        let table = TableRef::new("public", "users");

        let confirmed = confirm_boolean(&conn, adapter().as_ref(), &table, "flags")
            .await
            .unwrap();
        assert!(confirmed);
    }

    #[tokio::test]
    async fn test_boolean_rejected_for_wider_domain() {
        let conn = ScriptedConnection::new().on(
            "select distinct",
            single(vec![Value::int(0), Value::int(1), Value::int(2)]),
        );
        let table = TableRef::new("public", "users");

        let confirmed = confirm_boolean(&conn, adapter().as_ref(), &table, "flags")
            .await
            .unwrap();
        assert!(!confirmed);
    }

    #[tokio::test]
    async fn test_boolean_inconclusive_for_all_null_column() {
        // No route: the distinct query returns an empty set.
        let conn = ScriptedConnection::new();
        let table = TableRef::new("public", "users");

        let confirmed = confirm_boolean(&conn, adapter().as_ref(), &table, "flags")
            .await
            .unwrap();
        assert!(!confirmed);
    }

    #[tokio::test]
    async fn test_guid_needs_ten_valid_values() {
        let table = TableRef::new("public", "events");

        let conn = ScriptedConnection::new().on("is not null", guid_rows(9));
        assert!(!confirm_guid(&conn, adapter().as_ref(), &table, "token")
            .await
            .unwrap());

        let conn = ScriptedConnection::new().on("is not null", guid_rows(10));
        assert!(confirm_guid(&conn, adapter().as_ref(), &table, "token")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_single_blank_vetoes_guid_confirmation() {
        let mut rows = guid_rows(10);
        rows.push(Row::new(vec![Value::text("   ")]));

        let conn = ScriptedConnection::new().on("is not null", rows);
        let table = TableRef::new("public", "events");
        assert!(!confirm_guid(&conn, adapter().as_ref(), &table, "token")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_invalid_values_do_not_count_toward_threshold() {
        let mut rows = guid_rows(9);
        rows.push(Row::new(vec![Value::text("not-a-guid")]));

        let conn = ScriptedConnection::new().on("is not null", rows);
        let table = TableRef::new("public", "events");
        assert!(!confirm_guid(&conn, adapter().as_ref(), &table, "token")
            .await
            .unwrap());
    }
}
