#[cfg(test)]
mod tests {
    use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use timewise::db::categories::Categories;
    use timewise::db::db::Db;
    use timewise::db::query::SqlValue;
    use timewise::db::recurrences::Recurrences;
    use timewise::db::reminders::Reminders;
    use timewise::db::schema::SchemaManager;
    use timewise::db::tags::Tags;
    use timewise::db::tasks::Tasks;
    use timewise::libs::task::{Task, TaskFilter};

    struct TaskTestContext {
        _temp_dir: TempDir,
        db: Db,
    }

    impl TestContext for TaskTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(&temp_dir.path().join("timewise.db")).unwrap();
            SchemaManager::new().unwrap().setup(&db).unwrap();
            TaskTestContext { _temp_dir: temp_dir, db }
        }
    }

    fn datetime(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, 0, 0).unwrap()
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_task_create_and_fetch(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);

        let stored = tasks.insert(&Task::new("Water plants", Some("Balcony only".to_string()), None)).unwrap();
        assert!(stored.id.is_some());
        assert!(!stored.uuid.is_empty());
        assert_eq!(stored.name, "Water plants");
        assert_eq!(stored.description.as_deref(), Some("Balcony only"));
        assert!(stored.created_at.is_some());

        assert_eq!(tasks.fetch(TaskFilter::All).unwrap().len(), 1);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_task_create_rejects_blank_name(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);
        assert!(tasks.insert(&Task::new("   ", None, None)).is_err());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_task_create_rejects_overlong_fields(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);

        let long_name = "x".repeat(256);
        assert!(tasks.insert(&Task::new(&long_name, None, None)).is_err());

        let long_description = "x".repeat(2001);
        assert!(tasks.insert(&Task::new("Ok", Some(long_description), None)).is_err());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_task_create_rejects_due_before_start(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);

        let mut task = Task::new("Backwards", None, Some(datetime(2026, 1, 1, 9)));
        task.start_time = Some(datetime(2026, 1, 2, 9));
        assert!(tasks.insert(&task).is_err());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_task_create_enforces_priority_bounds(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);

        let mut task = Task::new("Too high", None, None);
        task.priority = Some(99);
        assert!(tasks.insert(&task).is_err());

        let mut task = Task::new("Too low", None, None);
        task.priority = Some(-1);
        assert!(tasks.insert(&task).is_err());

        let mut task = Task::new("Just right", None, None);
        task.priority = Some(5);
        assert_eq!(tasks.insert(&task).unwrap().priority, Some(5));
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_task_create_rejects_unknown_or_inactive_category(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);
        let categories = Categories::new(&ctx.db);

        let mut task = Task::new("Orphan", None, None);
        task.category_id = Some(999);
        assert!(tasks.insert(&task).is_err());

        let category = categories.insert("Errands", None, None).unwrap();
        categories.deactivate("Errands").unwrap();
        let mut task = Task::new("Stale", None, None);
        task.category_id = category.id;
        assert!(tasks.insert(&task).is_err());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_task_create_spawns_due_based_reminder(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);
        let reminders = Reminders::new(&ctx.db);

        let due = datetime(2026, 9, 1, 18);
        let stored = tasks.insert(&Task::new("Dentist", None, Some(due))).unwrap();

        let attached = reminders.list_for_task(stored.id.unwrap()).unwrap();
        assert_eq!(attached.len(), 1);
        assert_eq!(attached[0].reminder_time, due - Duration::minutes(30));
        assert!(attached[0].is_active);
        assert!(!attached[0].is_sent);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_task_create_spawns_fallback_reminder_without_due(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);
        let reminders = Reminders::new(&ctx.db);

        let now = Local::now().naive_local();
        let stored = tasks.insert(&Task::new("Someday", None, None)).unwrap();

        let attached = reminders.list_for_task(stored.id.unwrap()).unwrap();
        assert_eq!(attached.len(), 1);
        assert!(attached[0].reminder_time > now + Duration::hours(11));
        assert!(attached[0].reminder_time < now + Duration::hours(13));
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_task_duplicate_identity_rejected(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);

        let due = datetime(2026, 9, 1, 18);
        let task = Task::new("Dentist", Some("Checkup".to_string()), Some(due));
        tasks.insert(&task).unwrap();
        assert!(tasks.insert(&task).is_err());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_task_update_applies_whitelisted_changes(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);
        let stored = tasks.insert(&Task::new("Draft", Some("v1".to_string()), None)).unwrap();
        let id = stored.id.unwrap();

        tasks
            .update(
                id,
                &[
                    ("name", "Final".into()),
                    ("priority", SqlValue::Integer(2)),
                    ("description", SqlValue::Null),
                ],
            )
            .unwrap();

        let updated = tasks.get_by_id(id).unwrap().unwrap();
        assert_eq!(updated.name, "Final");
        assert_eq!(updated.priority, Some(2));
        assert_eq!(updated.description, None);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_task_update_rejects_unknown_field(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);
        let stored = tasks.insert(&Task::new("Locked", None, None)).unwrap();

        assert!(tasks.update(stored.id.unwrap(), &[("uuid", "forged".into())]).is_err());
        assert!(tasks.update(stored.id.unwrap(), &[("deleted_at", SqlValue::Null)]).is_err());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_task_update_enforces_priority_bounds(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);
        let stored = tasks.insert(&Task::new("Calm", None, None)).unwrap();

        assert!(tasks.update(stored.id.unwrap(), &[("priority", SqlValue::Integer(42))]).is_err());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_task_update_rejects_completion_before_creation(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);
        let stored = tasks.insert(&Task::new("Backdated", None, None)).unwrap();
        let id = stored.id.unwrap();

        assert!(tasks.update(id, &[("completed_at", datetime(1990, 1, 1, 0).into())]).is_err());

        tasks.update(id, &[("completed_at", datetime(2030, 1, 1, 0).into())]).unwrap();
        let updated = tasks.get_by_id(id).unwrap().unwrap();
        assert_eq!(updated.completed_at, Some(datetime(2030, 1, 1, 0)));
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_task_update_missing_row_errors(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);
        assert!(tasks.update(12345, &[("name", "Ghost".into())]).is_err());
        // No changes is a no-op, not an error.
        tasks.update(12345, &[]).unwrap();
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_task_complete_sets_timestamp(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);
        let stored = tasks.insert(&Task::new("Finish report", None, None)).unwrap();

        tasks.mark_completed(stored.id.unwrap()).unwrap();
        let completed = tasks.get_by_id(stored.id.unwrap()).unwrap().unwrap();
        assert!(completed.completed_at.is_some());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_task_soft_delete_hides_from_active(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);
        let stored = tasks.insert(&Task::new("Old chore", None, None)).unwrap();

        tasks.soft_delete(stored.id.unwrap()).unwrap();

        assert!(tasks.fetch(TaskFilter::Active).unwrap().is_empty());
        assert_eq!(tasks.fetch(TaskFilter::All).unwrap().len(), 1);
        assert!(tasks.get_by_name("Old chore").unwrap().is_none());
        assert!(tasks.get_by_id(stored.id.unwrap()).unwrap().unwrap().deleted_at.is_some());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_task_hard_delete_cascades(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);
        let tags = Tags::new(&ctx.db);
        let reminders = Reminders::new(&ctx.db);
        let recurrences = Recurrences::new(&ctx.db);

        let stored = tasks.insert(&Task::new("Doomed", None, Some(datetime(2026, 9, 1, 18)))).unwrap();
        let id = stored.id.unwrap();

        let tag = tags.insert("chore", None).unwrap();
        tasks.add_tag(id, tag.id.unwrap()).unwrap();
        recurrences.insert(id, 86400, datetime(2026, 9, 1, 18), None).unwrap();
        assert_eq!(reminders.list_for_task(id).unwrap().len(), 1);

        tasks.delete(id).unwrap();

        assert!(tasks.get_by_id(id).unwrap().is_none());
        assert!(reminders.list_for_task(id).unwrap().is_empty());
        assert!(recurrences.list_for_task(id).unwrap().is_empty());
        assert!(tags.list_for_task(id).unwrap().is_empty());
        // The tag itself is untouched.
        assert_eq!(tags.fetch().unwrap().len(), 1);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_task_soft_delete_by_category(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);
        let categories = Categories::new(&ctx.db);

        let category = categories.insert("Errands", None, None).unwrap();
        for name in ["One", "Two"] {
            let mut task = Task::new(name, None, None);
            task.category_id = category.id;
            tasks.insert(&task).unwrap();
        }
        tasks.insert(&Task::new("Elsewhere", None, None)).unwrap();

        let affected = tasks.soft_delete_by_category(category.id.unwrap()).unwrap();
        assert_eq!(affected, 2);

        let remaining = tasks.fetch(TaskFilter::Active).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name, "Elsewhere");

        // Already soft-deleted rows are not touched again.
        assert_eq!(tasks.soft_delete_by_category(category.id.unwrap()).unwrap(), 0);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_task_filter_by_category(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);
        let categories = Categories::new(&ctx.db);

        let home = categories.insert("Home", None, None).unwrap();
        let work = categories.insert("Work", None, None).unwrap();

        let mut chores = Task::new("Vacuum", None, None);
        chores.category_id = home.id;
        tasks.insert(&chores).unwrap();

        let mut report = Task::new("Quarterly report", None, None);
        report.category_id = work.id;
        let report = tasks.insert(&report).unwrap();

        let work_tasks = tasks.fetch(TaskFilter::ByCategory(work.id.unwrap())).unwrap();
        assert_eq!(work_tasks.len(), 1);
        assert_eq!(work_tasks[0].name, "Quarterly report");

        tasks.soft_delete(report.id.unwrap()).unwrap();
        assert!(tasks.fetch(TaskFilter::ByCategory(work.id.unwrap())).unwrap().is_empty());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_task_filter_by_tag(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);
        let tags = Tags::new(&ctx.db);

        let urgent = tags.insert("urgent", None).unwrap();
        let tagged = tasks.insert(&Task::new("Tagged", None, None)).unwrap();
        let also_tagged = tasks.insert(&Task::new("Also tagged", None, None)).unwrap();
        tasks.insert(&Task::new("Plain", None, None)).unwrap();

        tasks.add_tag(tagged.id.unwrap(), urgent.id.unwrap()).unwrap();
        tasks.add_tag(also_tagged.id.unwrap(), urgent.id.unwrap()).unwrap();

        let found = tasks.fetch(TaskFilter::ByTag(urgent.id.unwrap())).unwrap();
        assert_eq!(found.len(), 2);

        tasks.soft_delete(also_tagged.id.unwrap()).unwrap();
        let found = tasks.fetch(TaskFilter::ByTag(urgent.id.unwrap())).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Tagged");
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_task_filter_by_ids(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);

        let first = tasks.insert(&Task::new("First", None, None)).unwrap();
        tasks.insert(&Task::new("Second", None, None)).unwrap();
        let third = tasks.insert(&Task::new("Third", None, None)).unwrap();

        let picked = tasks.fetch(TaskFilter::ByIds(vec![first.id.unwrap(), third.id.unwrap()])).unwrap();
        let mut names: Vec<&str> = picked.iter().map(|task| task.name.as_str()).collect();
        names.sort();
        assert_eq!(names, vec!["First", "Third"]);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_task_tag_links_are_idempotent(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);
        let tags = Tags::new(&ctx.db);

        let stored = tasks.insert(&Task::new("Tagged twice", None, None)).unwrap();
        let tag = tags.insert("dup", None).unwrap();

        tasks.add_tag(stored.id.unwrap(), tag.id.unwrap()).unwrap();
        tasks.add_tag(stored.id.unwrap(), tag.id.unwrap()).unwrap();
        assert_eq!(tags.list_for_task(stored.id.unwrap()).unwrap().len(), 1);

        tasks.remove_tag(stored.id.unwrap(), tag.id.unwrap()).unwrap();
        assert!(tags.list_for_task(stored.id.unwrap()).unwrap().is_empty());
    }
}
