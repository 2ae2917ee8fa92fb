#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use timewise::db::query::{
        CheckSpec, ColumnSpec, CreateIndex, CreateTable, CreateTrigger, CreateView, Delete, FkAction, ForeignKeySpec, Insert, QueryError, Select,
        SqlQuery, SqlValue, TriggerAction, TriggerTiming, UniqueSpec, Update,
    };

    #[test]
    fn test_select_renders_full_chain() {
        let query = Select::new("tasks")
            .unwrap()
            .columns(&["id", "name", "due_time"])
            .unwrap()
            .filter(&[("category_id", SqlValue::Integer(1))])
            .unwrap()
            .order_by("due_time", "ASC")
            .unwrap()
            .limit(10, 0)
            .unwrap();

        assert_eq!(
            query.query().unwrap(),
            "SELECT id, name, due_time FROM tasks WHERE category_id = :category_id ORDER BY due_time ASC LIMIT 10;"
        );
        assert_eq!(query.parameters().len(), 1);
        assert_eq!(query.parameters()[0].0, "category_id");
    }

    #[test]
    fn test_select_defaults_to_star() {
        let query = Select::new("tasks").unwrap();
        assert_eq!(query.query().unwrap(), "SELECT * FROM tasks;");
        assert!(query.parameters().is_empty());
    }

    #[test]
    fn test_select_join_renders_on_clause() {
        let query = Select::new("tasks")
            .unwrap()
            .columns(&["tasks.id"])
            .unwrap()
            .join("inner", "task_tags", "tasks.id", "task_tags.task_id")
            .unwrap();

        assert_eq!(
            query.query().unwrap(),
            "SELECT tasks.id FROM tasks INNER JOIN task_tags ON tasks.id = task_tags.task_id;"
        );
    }

    #[test]
    fn test_select_rejects_unknown_join_kind() {
        let result = Select::new("tasks").unwrap().join("CROSS", "task_tags", "tasks.id", "task_tags.task_id");
        assert_eq!(result.unwrap_err(), QueryError::InvalidJoin("CROSS".to_string()));
    }

    #[test]
    fn test_select_limit_bounds() {
        let result = Select::new("tasks").unwrap().limit(0, 0);
        assert_eq!(result.unwrap_err(), QueryError::InvalidLimit(0));

        let result = Select::new("tasks").unwrap().limit(10, -1);
        assert_eq!(result.unwrap_err(), QueryError::InvalidOffset(-1));

        let query = Select::new("tasks").unwrap().limit(10, 20).unwrap();
        assert_eq!(query.query().unwrap(), "SELECT * FROM tasks LIMIT 10 OFFSET 20;");
    }

    #[test]
    fn test_select_order_random_renders_function() {
        let query = Select::new("tasks").unwrap().order_by("id", "random").unwrap();
        assert_eq!(query.query().unwrap(), "SELECT * FROM tasks ORDER BY RANDOM();");
    }

    #[test]
    fn test_select_rejects_bad_order_direction() {
        let result = Select::new("tasks").unwrap().order_by("id", "sideways");
        assert_eq!(result.unwrap_err(), QueryError::InvalidOrder("sideways".to_string()));
    }

    #[test]
    fn test_filter_in_numbers_each_placeholder() {
        let query = Select::new("tasks")
            .unwrap()
            .filter_in("id", &[1.into(), 2.into(), 3.into()])
            .unwrap();

        assert_eq!(query.query().unwrap(), "SELECT * FROM tasks WHERE id IN (:id, :id_2, :id_3);");
        assert_eq!(query.parameters().len(), 3);
    }

    #[test]
    fn test_filter_in_rejects_empty_list() {
        let result = Select::new("tasks").unwrap().filter_in("id", &[]);
        assert_eq!(result.unwrap_err(), QueryError::EmptyValues);
    }

    #[test]
    fn test_filter_between_names_both_bounds() {
        let query = Select::new("tasks")
            .unwrap()
            .filter_between("due_time", "2026-01-01 00:00:00".into(), "2026-02-01 00:00:00".into())
            .unwrap();

        assert_eq!(
            query.query().unwrap(),
            "SELECT * FROM tasks WHERE due_time BETWEEN :due_time_low AND :due_time_high;"
        );
    }

    #[test]
    fn test_filter_op_rejects_list_operators() {
        let result = Select::new("tasks").unwrap().filter_op("id", "IN", SqlValue::Integer(1));
        assert_eq!(result.unwrap_err(), QueryError::OperatorArity("IN".to_string()));

        let result = Select::new("tasks").unwrap().filter_op("id", "between", SqlValue::Integer(1));
        assert_eq!(result.unwrap_err(), QueryError::OperatorArity("BETWEEN".to_string()));
    }

    #[test]
    fn test_is_null_renders_inline_without_parameter() {
        let query = Select::new("tasks").unwrap().filter_op("deleted_at", "IS", SqlValue::Null).unwrap();
        assert_eq!(query.query().unwrap(), "SELECT * FROM tasks WHERE deleted_at IS NULL;");
        assert!(query.parameters().is_empty());

        let query = Select::new("tasks").unwrap().filter_op("deleted_at", "IS NOT", SqlValue::Null).unwrap();
        assert_eq!(query.query().unwrap(), "SELECT * FROM tasks WHERE deleted_at IS NOT NULL;");
    }

    #[test]
    fn test_repeated_column_gets_fresh_placeholder() {
        let query = Select::new("tasks")
            .unwrap()
            .filter_op("priority", ">=", 1.into())
            .unwrap()
            .filter_op("priority", "<=", 5.into())
            .unwrap();

        assert_eq!(
            query.query().unwrap(),
            "SELECT * FROM tasks WHERE priority >= :priority AND priority <= :priority_2;"
        );
    }

    #[test]
    fn test_qualified_column_placeholder_swaps_dot() {
        let query = Select::new("tasks").unwrap().filter(&[("tasks.id", 7.into())]).unwrap();
        assert_eq!(query.query().unwrap(), "SELECT * FROM tasks WHERE tasks.id = :tasks_id;");
    }

    #[test]
    fn test_insert_renders_placeholders() {
        let query = Insert::new("tags")
            .unwrap()
            .values(&[("name", "urgent".into()), ("description", SqlValue::Null)])
            .unwrap();

        assert_eq!(query.query().unwrap(), "INSERT INTO tags (name, description) VALUES (:name, :description);");
    }

    #[test]
    fn test_insert_or_ignore_switches_verb() {
        let query = Insert::new("settings")
            .unwrap()
            .values(&[("key", "default_sort".into()), ("value", "due_time".into())])
            .unwrap()
            .or_ignore();

        assert_eq!(query.query().unwrap(), "INSERT OR IGNORE INTO settings (key, value) VALUES (:key, :value);");
    }

    #[test]
    fn test_insert_requires_columns() {
        let query = Insert::new("tags").unwrap();
        assert_eq!(query.query().unwrap_err(), QueryError::EmptyColumns);
    }

    #[test]
    fn test_update_where_placeholder_does_not_collide_with_set() {
        let query = Update::new("tasks")
            .unwrap()
            .set(&[("name", "after".into())])
            .unwrap()
            .filter(&[("name", "before".into())])
            .unwrap();

        assert_eq!(query.query().unwrap(), "UPDATE tasks SET name = :name WHERE name = :w_name;");
        let names: Vec<&str> = query.parameters().iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["name", "w_name"]);
    }

    #[test]
    fn test_update_requires_assignments() {
        let query = Update::new("tasks").unwrap().filter(&[("id", 1.into())]).unwrap();
        assert_eq!(query.query().unwrap_err(), QueryError::EmptyColumns);
    }

    #[test]
    fn test_delete_refuses_to_run_unconditionally() {
        let query = Delete::new("tasks").unwrap();
        assert_eq!(query.query().unwrap_err(), QueryError::UnconditionalDelete);

        let query = Delete::new("tasks").unwrap().force();
        assert_eq!(query.query().unwrap(), "DELETE FROM tasks;");

        let query = Delete::new("tasks").unwrap().filter(&[("id", 3.into())]).unwrap();
        assert_eq!(query.query().unwrap(), "DELETE FROM tasks WHERE id = :id;");
    }

    #[test]
    fn test_identifier_validation_blocks_injection() {
        assert!(Select::new("tasks; DROP TABLE tasks").is_err());
        assert!(Select::new("").is_err());
        assert!(Select::new("tasks").unwrap().columns(&["name, password"]).is_err());
        assert!(Insert::new("tasks").unwrap().values(&[("na me", 1.into())]).is_err());
        assert!(SqlValue::identifier("CURRENT_TIMESTAMP").is_ok());
        assert!(SqlValue::identifier("NEW.id").is_ok());
        assert!(SqlValue::identifier("1); DROP").is_err());
    }

    #[test]
    fn test_with_parameters_quotes_and_escapes_text() {
        let query = Select::new("tasks").unwrap().filter(&[("name", "O'Brien".into())]).unwrap();
        assert_eq!(query.with_parameters().unwrap(), "SELECT * FROM tasks WHERE name = 'O''Brien';");
    }

    #[test]
    fn test_with_parameters_replaces_longest_names_first() {
        let query = Select::new("tasks")
            .unwrap()
            .filter(&[("count", 1.into()), ("count_2", 2.into())])
            .unwrap();

        assert_eq!(query.with_parameters().unwrap(), "SELECT * FROM tasks WHERE count = 1 AND count_2 = 2;");
    }

    #[test]
    fn test_sql_value_conversions() {
        assert_eq!(SqlValue::from(true), SqlValue::Integer(1));
        assert_eq!(SqlValue::from(false), SqlValue::Integer(0));
        assert_eq!(SqlValue::from(None::<i64>), SqlValue::Null);
        assert_eq!(SqlValue::from(Some(3_i64)), SqlValue::Integer(3));

        let datetime = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap().and_hms_opt(9, 30, 0).unwrap();
        assert_eq!(SqlValue::from(datetime), SqlValue::Text("2026-03-01 09:30:00".to_string()));
    }

    #[test]
    fn test_sql_value_literals() {
        assert_eq!(SqlValue::Null.to_literal(), "NULL");
        assert_eq!(SqlValue::Integer(-4).to_literal(), "-4");
        assert_eq!(SqlValue::Real(2.5).to_literal(), "2.5");
        assert_eq!(SqlValue::Text("it's".to_string()).to_literal(), "'it''s'");
        assert_eq!(SqlValue::identifier("CURRENT_TIMESTAMP").unwrap().to_literal(), "CURRENT_TIMESTAMP");
    }

    #[test]
    fn test_create_table_appends_bookkeeping_columns() {
        let table = CreateTable::new(
            "notes",
            vec![
                ColumnSpec::new("id", "INTEGER").unwrap().primary_key().auto_increment(),
                ColumnSpec::new("body", "TEXT").unwrap().not_null(),
            ],
        )
        .unwrap();

        assert_eq!(table.columns().len(), 4);
        assert_eq!(
            table.query().unwrap(),
            "CREATE TABLE IF NOT EXISTS notes (id INTEGER PRIMARY KEY AUTOINCREMENT, body TEXT NOT NULL, \
             created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP, updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP);"
        );
    }

    #[test]
    fn test_create_table_keeps_declared_bookkeeping() {
        let table = CreateTable::new(
            "notes",
            vec![
                ColumnSpec::new("id", "INTEGER").unwrap().primary_key().auto_increment(),
                ColumnSpec::new("created_at", "TEXT")
                    .unwrap()
                    .not_null()
                    .default_value(SqlValue::identifier("CURRENT_TIMESTAMP").unwrap()),
            ],
        )
        .unwrap();

        // Only updated_at is missing, so only updated_at is appended.
        assert_eq!(table.columns().len(), 3);
    }

    #[test]
    fn test_create_table_renders_constraints() {
        let table = CreateTable::new("task_tags", vec![ColumnSpec::new("task_id", "INTEGER").unwrap().not_null()])
            .unwrap()
            .foreign_key(ForeignKeySpec::new("task_id", "tasks", "id").unwrap().on_delete(FkAction::Cascade))
            .unique(UniqueSpec::new(&["task_id"]).unwrap())
            .check(CheckSpec::new("task_id", ">", SqlValue::Integer(0)).unwrap());

        let sql = table.query().unwrap();
        assert!(sql.contains("FOREIGN KEY (task_id) REFERENCES tasks(id) ON DELETE CASCADE"));
        assert!(sql.contains("UNIQUE (task_id)"));
        assert!(sql.contains("CHECK (task_id > 0)"));
    }

    #[test]
    fn test_column_flag_invariants() {
        let result = CreateTable::new("notes", vec![ColumnSpec::new("id", "INTEGER").unwrap().auto_increment()]);
        assert_eq!(result.unwrap_err(), QueryError::AutoIncrementWithoutPrimaryKey("id".to_string()));

        let result = CreateTable::new("notes", vec![ColumnSpec::new("n", "INTEGER").unwrap().default_value(SqlValue::Integer(1))]);
        assert_eq!(result.unwrap_err(), QueryError::DefaultOnNullable("n".to_string()));

        let result = CreateTable::new(
            "notes",
            vec![ColumnSpec::new("n", "INTEGER").unwrap().not_null().default_value("one".into())],
        );
        assert_eq!(result.unwrap_err(), QueryError::DefaultTypeMismatch("n".to_string(), "INTEGER".to_string()));
    }

    #[test]
    fn test_column_rejects_unknown_data_type() {
        let result = ColumnSpec::new("name", "VARCHAR");
        assert_eq!(result.unwrap_err(), QueryError::InvalidDataType("VARCHAR".to_string()));
    }

    #[test]
    fn test_create_index_derives_its_name() {
        let index = CreateIndex::new("tasks", &["due_time"]).unwrap();
        assert_eq!(index.name(), "idx_tasks_due_time");
        assert_eq!(index.query().unwrap(), "CREATE INDEX IF NOT EXISTS idx_tasks_due_time ON tasks (due_time);");

        let index = CreateIndex::new("tags", &["name"]).unwrap().unique();
        assert_eq!(index.query().unwrap(), "CREATE UNIQUE INDEX IF NOT EXISTS idx_tags_name ON tags (name);");
    }

    #[test]
    fn test_create_view_inlines_its_body() {
        let body = Select::new("tasks").unwrap().filter_op("deleted_at", "IS", SqlValue::Null).unwrap();
        let view = CreateView::new("active_tasks", &body).unwrap();

        assert_eq!(view.name(), "active_tasks");
        assert_eq!(
            view.query().unwrap(),
            "CREATE VIEW IF NOT EXISTS active_tasks AS SELECT * FROM tasks WHERE deleted_at IS NULL;"
        );
    }

    #[test]
    fn test_create_view_inlines_bound_values_as_literals() {
        let body = Select::new("reminders")
            .unwrap()
            .filter(&[("is_active", true.into()), ("is_sent", false.into())])
            .unwrap();
        let view = CreateView::new("pending_reminders", &body).unwrap();

        assert_eq!(
            view.query().unwrap(),
            "CREATE VIEW IF NOT EXISTS pending_reminders AS SELECT * FROM reminders WHERE is_active = 1 AND is_sent = 0;"
        );
    }

    #[test]
    fn test_create_trigger_wraps_inlined_body() {
        let body = Update::new("tasks")
            .unwrap()
            .set(&[("updated_at", SqlValue::identifier("CURRENT_TIMESTAMP").unwrap())])
            .unwrap()
            .filter(&[("id", SqlValue::identifier("NEW.id").unwrap())])
            .unwrap();
        let trigger = CreateTrigger::new("touch_tasks_updated_at", "tasks", TriggerTiming::After, TriggerAction::Update, &body).unwrap();

        assert_eq!(
            trigger.query().unwrap(),
            "CREATE TRIGGER IF NOT EXISTS touch_tasks_updated_at AFTER UPDATE ON tasks \
             BEGIN UPDATE tasks SET updated_at = CURRENT_TIMESTAMP WHERE id = NEW.id; END;"
        );
    }
}
