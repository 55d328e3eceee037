#[cfg(test)]
mod tests {
    use schemascan::inference::relationships::infer_relationships;
    use schemascan::schema::{Column, Table};

    fn table(name: &str, columns: &[&str]) -> Table {
        Table {
            schema: "public".to_string(),
            name: name.to_string(),
            columns: columns
                .iter()
                .map(|c| Column::new(*c, "integer", false))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_users_orders_convention() {
        let tables = vec![
            table("users", &["id", "email"]),
            table("orders", &["id", "user_id", "total"]),
        ];

        let rels = infer_relationships(&tables);
        assert_eq!(rels.len(), 1);
        let rel = &rels[0];
        assert_eq!(rel.source_table, "orders");
        assert_eq!(rel.target_table, "users");
        assert_eq!(rel.foreigns, vec!["user_id"]);
        assert_eq!(rel.keys, vec!["id"]);
    }

    #[test]
    fn test_first_matching_pattern_wins() {
        // "users_id" matches the "_id" suffix first, producing candidate
        // "users". Only a table named "users_" exists, which the bare-"id"
        // pattern (candidate "users_") would have resolved; since only the
        // first matching pattern is ever tried, nothing is emitted.
        let tables = vec![
            table("users_", &["id"]),
            table("accounts", &["id", "users_id"]),
        ];
        assert!(infer_relationships(&tables).is_empty());
    }

    #[test]
    fn test_pluralization_blind_spot() {
        // company_id -> candidate "company": exact, "companys",
        // s-stripped "compan", and underscore-stripped "company" all miss
        // the "companies" table. The y->ies gap is documented behavior.
        let tables = vec![
            table("companies", &["company_id", "name"]),
            table("invoices", &["id", "company_id"]),
        ];
        assert!(infer_relationships(&tables).is_empty());
    }

    #[test]
    fn test_own_key_columns_are_not_foreign_keys() {
        let tables = vec![table("orders", &["id", "orders_id", "total"])];
        assert!(infer_relationships(&tables).is_empty());
    }

    #[test]
    fn test_fk_suffix_pattern() {
        let tables = vec![
            table("customers", &["id"]),
            table("tickets", &["id", "customer_fk"]),
        ];
        let rels = infer_relationships(&tables);
        assert_eq!(rels.len(), 1);
        assert_eq!(rels[0].target_table, "customers");
        assert_eq!(rels[0].foreigns, vec!["customer_fk"]);
    }

    #[test]
    fn test_fk_prefix_pattern() {
        let tables = vec![
            table("regions", &["id"]),
            table("stores", &["id", "fk_region"]),
        ];
        let rels = infer_relationships(&tables);
        assert_eq!(rels.len(), 1);
        assert_eq!(rels[0].target_table, "regions");
    }

    #[test]
    fn test_underscore_stripped_resolution() {
        let tables = vec![
            table("orderitems", &["id"]),
            table("shipments", &["id", "order_items_id"]),
        ];
        let rels = infer_relationships(&tables);
        assert_eq!(rels.len(), 1);
        assert_eq!(rels[0].target_table, "orderitems");
    }

    #[test]
    fn test_default_key_is_literal_id_even_when_absent() {
        // The referenced table has no "id" and no "warehouses_id"; the
        // synthesized relationship still points at the literal "id".
        let tables = vec![
            table("warehouses", &["code", "city"]),
            table("stock", &["id", "warehouse_id"]),
        ];
        let rels = infer_relationships(&tables);
        assert_eq!(rels.len(), 1);
        assert_eq!(rels[0].keys, vec!["id"]);
        assert!(rels[0].is_well_formed());
    }

    #[test]
    fn test_unresolvable_candidate_emits_nothing() {
        let tables = vec![table("orders", &["id", "warehouse_id"])];
        assert!(infer_relationships(&tables).is_empty());
    }
}
