#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use timewise::db::categories::Category;
    use timewise::db::settings::Setting;
    use timewise::db::tags::Tag;
    use timewise::libs::task::Task;
    use timewise::libs::view::{View, DEFAULT_TASK_COLUMNS};

    fn sample_task() -> Task {
        let due = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap().and_hms_opt(18, 0, 0).unwrap();
        let mut task = Task::new("Dentist", Some("Checkup".to_string()), Some(due));
        task.id = Some(3);
        task.priority = Some(2);
        task.category_id = Some(1);
        task
    }

    #[test]
    fn test_tasks_render_with_default_columns() {
        let columns: Vec<&str> = DEFAULT_TASK_COLUMNS.split(',').collect();
        assert!(View::tasks(&[sample_task()], &columns).is_ok());
    }

    #[test]
    fn test_tasks_render_every_known_column() {
        let columns = vec![
            "id",
            "uuid",
            "name",
            "description",
            "start_time",
            "due_time",
            "completed_at",
            "priority",
            "count",
            "category_id",
            "parent_task_id",
            "unit_id",
            "created_at",
            "updated_at",
            "deleted_at",
        ];
        assert!(View::tasks(&[sample_task()], &columns).is_ok());
    }

    #[test]
    fn test_tasks_reject_unknown_column() {
        let err = View::tasks(&[sample_task()], &["id", "mood"]).unwrap_err();
        assert!(err.to_string().contains("mood"));
    }

    #[test]
    fn test_entity_tables_render() {
        let category = Category {
            id: Some(1),
            uuid: "u".to_string(),
            name: "Home".to_string(),
            description: None,
            is_active: true,
            color: Some("#00ff00".to_string()),
        };
        let tag = Tag {
            id: Some(1),
            uuid: "u".to_string(),
            name: "urgent".to_string(),
            description: None,
            is_active: true,
        };
        let setting = Setting {
            id: Some(1),
            key: "default_sort".to_string(),
            value: "due_time".to_string(),
        };

        assert!(View::categories(&[category]).is_ok());
        assert!(View::tags(&[tag]).is_ok());
        assert!(View::settings(&[setting]).is_ok());
        assert!(View::sort_methods().is_ok());
    }
}
