#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use timewise::db::db::Db;
    use timewise::db::schema::SchemaManager;
    use timewise::db::tags::Tags;
    use timewise::db::tasks::Tasks;
    use timewise::libs::task::Task;

    struct TagTestContext {
        _temp_dir: TempDir,
        db: Db,
    }

    impl TestContext for TagTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(&temp_dir.path().join("timewise.db")).unwrap();
            SchemaManager::new().unwrap().setup(&db).unwrap();
            TagTestContext { _temp_dir: temp_dir, db }
        }
    }

    #[test_context(TagTestContext)]
    #[test]
    fn test_tag_create_and_fetch_alphabetical(ctx: &mut TagTestContext) {
        let tags = Tags::new(&ctx.db);

        tags.insert("urgent", Some("Needs attention today".to_string())).unwrap();
        tags.insert("errand", None).unwrap();

        let names: Vec<String> = tags.fetch().unwrap().into_iter().map(|tag| tag.name).collect();
        assert_eq!(names, vec!["errand".to_string(), "urgent".to_string()]);
    }

    #[test_context(TagTestContext)]
    #[test]
    fn test_tag_duplicate_active_rejected(ctx: &mut TagTestContext) {
        let tags = Tags::new(&ctx.db);

        tags.insert("urgent", None).unwrap();
        assert!(tags.insert("urgent", None).is_err());
    }

    #[test_context(TagTestContext)]
    #[test]
    fn test_tag_insert_reactivates_deactivated(ctx: &mut TagTestContext) {
        let tags = Tags::new(&ctx.db);

        let original = tags.insert("urgent", None).unwrap();
        tags.deactivate("urgent").unwrap();
        assert!(tags.fetch().unwrap().is_empty());

        let revived = tags.insert("urgent", None).unwrap();
        assert_eq!(revived.id, original.id);
        assert!(revived.is_active);
    }

    #[test_context(TagTestContext)]
    #[test]
    fn test_tag_deactivate_missing_errors(ctx: &mut TagTestContext) {
        let tags = Tags::new(&ctx.db);
        assert!(tags.deactivate("ghost").is_err());
    }

    #[test_context(TagTestContext)]
    #[test]
    fn test_tag_get_or_create(ctx: &mut TagTestContext) {
        let tags = Tags::new(&ctx.db);

        let first = tags.get_or_create("reading").unwrap();
        let second = tags.get_or_create("reading").unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(tags.fetch().unwrap().len(), 1);
    }

    #[test_context(TagTestContext)]
    #[test]
    fn test_tag_deactivation_hides_links_but_keeps_them(ctx: &mut TagTestContext) {
        let tags = Tags::new(&ctx.db);
        let tasks = Tasks::new(&ctx.db);

        let stored = tasks.insert(&Task::new("Read paper", None, None)).unwrap();
        let task_id = stored.id.unwrap();
        let keep = tags.insert("keep", None).unwrap();
        let hide = tags.insert("hide", None).unwrap();
        tasks.add_tag(task_id, keep.id.unwrap()).unwrap();
        tasks.add_tag(task_id, hide.id.unwrap()).unwrap();

        tags.deactivate("hide").unwrap();

        let listed = tags.list_for_task(task_id).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "keep");

        // Reactivating brings the link back into view; it was never removed.
        tags.insert("hide", None).unwrap();
        assert_eq!(tags.list_for_task(task_id).unwrap().len(), 2);
    }

    #[test_context(TagTestContext)]
    #[test]
    fn test_tag_list_for_task_sorted_by_name(ctx: &mut TagTestContext) {
        let tags = Tags::new(&ctx.db);
        let tasks = Tasks::new(&ctx.db);

        let stored = tasks.insert(&Task::new("Sort me", None, None)).unwrap();
        let task_id = stored.id.unwrap();
        for name in ["zeta", "alpha", "mid"] {
            let tag = tags.insert(name, None).unwrap();
            tasks.add_tag(task_id, tag.id.unwrap()).unwrap();
        }

        let names: Vec<String> = tags.list_for_task(task_id).unwrap().into_iter().map(|tag| tag.name).collect();
        assert_eq!(names, vec!["alpha".to_string(), "mid".to_string(), "zeta".to_string()]);
    }
}
