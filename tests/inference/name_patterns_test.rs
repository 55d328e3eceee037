#[cfg(test)]
mod tests {
    use schemascan::inference::name_patterns::infer;
    use schemascan::schema::InferredType;

    #[test]
    fn test_boolean_prefixes() {
        for name in [
            "is_active",
            "has_children",
            "can_edit",
            "should_notify",
            "will_expire",
            "allow_login",
            "enable_sync",
            "disable_alerts",
        ] {
            assert_eq!(infer(name, "tinyint"), InferredType::Boolean, "{name}");
        }
    }

    #[test]
    fn test_boolean_suffixes() {
        for name in [
            "admin_flag",
            "sync_enabled",
            "account_disabled",
            "user_active",
            "row_deleted",
            "item_visible",
            "menu_hidden",
            "field_required",
        ] {
            assert_eq!(infer(name, "smallint"), InferredType::Boolean, "{name}");
        }
    }

    #[test]
    fn test_boolean_exact_names() {
        for name in [
            "active",
            "enabled",
            "disabled",
            "deleted",
            "visible",
            "hidden",
            "published",
            "approved",
            "verified",
            "confirmed",
        ] {
            assert_eq!(infer(name, "bit"), InferredType::Boolean, "{name}");
        }
    }

    #[test]
    fn test_boolean_compatible_types() {
        for ty in ["tinyint", "smallint", "bit", "boolean", "bool", "int2", "int1"] {
            assert_eq!(infer("is_active", ty), InferredType::Boolean, "{ty}");
        }
    }

    #[test]
    fn test_boolean_name_with_incompatible_type() {
        assert_eq!(infer("is_active", "int"), InferredType::Unresolved);
        assert_eq!(infer("is_active", "varchar(10)"), InferredType::Unresolved);
        assert_eq!(infer("deleted", "datetime"), InferredType::Unresolved);
    }

    #[test]
    fn test_guid_patterns() {
        assert_eq!(infer("uuid", "char(36)"), InferredType::Guid);
        assert_eq!(infer("guid", "uniqueidentifier"), InferredType::Guid);
        assert_eq!(infer("device_uuid", "varchar(36)"), InferredType::Guid);
        assert_eq!(infer("row_guid", "uuid"), InferredType::Guid);
        for name in [
            "correlation_id",
            "tracking_id",
            "external_id",
            "request_id",
            "session_id",
            "transaction_id",
        ] {
            assert_eq!(infer(name, "character(36)"), InferredType::Guid, "{name}");
        }
    }

    #[test]
    fn test_guid_name_with_incompatible_type() {
        assert_eq!(infer("uuid", "varchar(64)"), InferredType::Unresolved);
        assert_eq!(infer("session_id", "bigint"), InferredType::Unresolved);
    }

    #[test]
    fn test_case_insensitive_matching() {
        assert_eq!(infer("IS_DELETED", "TINYINT"), InferredType::Boolean);
        assert_eq!(infer("Tracking_ID", "VarChar(36)"), InferredType::Guid);
    }

    #[test]
    fn test_unrelated_columns_stay_unresolved() {
        assert_eq!(infer("email", "varchar(255)"), InferredType::Unresolved);
        assert_eq!(infer("quantity", "smallint"), InferredType::Unresolved);
        assert_eq!(infer("notes", "char(36)"), InferredType::Unresolved);
    }
}
