#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use timewise::db::db::Db;
    use timewise::db::schema::SchemaManager;
    use timewise::db::settings::Settings;

    struct SettingsTestContext {
        _temp_dir: TempDir,
        db: Db,
    }

    impl TestContext for SettingsTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(&temp_dir.path().join("timewise.db")).unwrap();
            SchemaManager::new().unwrap().setup(&db).unwrap();
            SettingsTestContext { _temp_dir: temp_dir, db }
        }
    }

    #[test_context(SettingsTestContext)]
    #[test]
    fn test_seeded_defaults_are_readable(ctx: &mut SettingsTestContext) {
        let settings = Settings::new(&ctx.db);

        assert_eq!(settings.get("default_sort").unwrap().as_deref(), Some("due_time"));
        assert_eq!(settings.get("default_category").unwrap().as_deref(), Some("General"));
        assert_eq!(settings.get("priority_min").unwrap().as_deref(), Some("0"));
        assert_eq!(settings.get("priority_max").unwrap().as_deref(), Some("5"));
        assert_eq!(settings.get("nonexistent").unwrap(), None);
    }

    #[test_context(SettingsTestContext)]
    #[test]
    fn test_set_inserts_then_updates(ctx: &mut SettingsTestContext) {
        let settings = Settings::new(&ctx.db);

        settings.set("week_start", "monday").unwrap();
        assert_eq!(settings.get("week_start").unwrap().as_deref(), Some("monday"));

        settings.set("week_start", "sunday").unwrap();
        assert_eq!(settings.get("week_start").unwrap().as_deref(), Some("sunday"));

        // Upsert overwrote in place, no second row appeared.
        let count = settings.fetch().unwrap().iter().filter(|setting| setting.key == "week_start").count();
        assert_eq!(count, 1);
    }

    #[test_context(SettingsTestContext)]
    #[test]
    fn test_set_overrides_seeded_value(ctx: &mut SettingsTestContext) {
        let settings = Settings::new(&ctx.db);

        settings.set("default_sort", "priority").unwrap();
        assert_eq!(settings.get("default_sort").unwrap().as_deref(), Some("priority"));
    }

    #[test_context(SettingsTestContext)]
    #[test]
    fn test_fetch_ordered_by_key(ctx: &mut SettingsTestContext) {
        let settings = Settings::new(&ctx.db);
        settings.set("zz_last", "1").unwrap();
        settings.set("aa_first", "2").unwrap();

        let keys: Vec<String> = settings.fetch().unwrap().into_iter().map(|setting| setting.key).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert_eq!(keys.first().map(String::as_str), Some("aa_first"));
    }

    #[test_context(SettingsTestContext)]
    #[test]
    fn test_get_numeric_parses_and_rejects(ctx: &mut SettingsTestContext) {
        let settings = Settings::new(&ctx.db);

        settings.set("page_size", " 42 ").unwrap();
        assert_eq!(settings.get_numeric("page_size").unwrap(), Some(42));

        settings.set("page_size", "lots").unwrap();
        assert!(settings.get_numeric("page_size").is_err());

        assert_eq!(settings.get_numeric("missing").unwrap(), None);
    }

    #[test_context(SettingsTestContext)]
    #[test]
    fn test_priority_bounds_follow_settings(ctx: &mut SettingsTestContext) {
        let settings = Settings::new(&ctx.db);

        assert_eq!(settings.priority_bounds().unwrap(), (0, 5));

        settings.set("priority_max", "9").unwrap();
        settings.set("priority_min", "1").unwrap();
        assert_eq!(settings.priority_bounds().unwrap(), (1, 9));
    }
}
