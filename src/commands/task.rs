//! Task management command.
//!
//! Covers the task lifecycle end to end: creation with optional
//! category, tags and scheduling fields, ranked listings, field updates
//! given as `column=value` pairs, completion, and soft deletion by
//! name, id or whole category.

use crate::{
    db::{
        categories::Categories, db::Db, query::SqlValue, recurrences::Recurrences, settings::Settings, tags::Tags, tasks::Tasks,
        units::Units,
    },
    libs::{
        config::Config,
        messages::Message,
        rank,
        task::{parse_datetime_input, Task, TaskFilter},
        view::{View, DEFAULT_TASK_COLUMNS},
    },
    msg_error, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use chrono::Local;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

/// Priority written when `task add` gets no explicit value, the middle
/// of the seeded 0 to 5 range.
const DEFAULT_PRIORITY: i64 = 3;

#[derive(Debug, Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    command: Option<TaskCommand>,
}

#[derive(Debug, Subcommand)]
enum TaskCommand {
    /// Create a new task
    Add {
        /// Task name
        name: Option<String>,
        /// Task description
        #[arg(short, long)]
        description: Option<String>,
        /// Start time, YYYY-MM-DD or YYYY-MM-DD HH:MM:SS
        #[arg(long)]
        start: Option<String>,
        /// Due time, YYYY-MM-DD or YYYY-MM-DD HH:MM:SS
        #[arg(long)]
        due: Option<String>,
        /// Repeat interval in seconds, attaches a recurrence
        #[arg(long)]
        interval: Option<i64>,
        /// Task priority
        #[arg(short, long)]
        priority: Option<i64>,
        /// Category name, created when missing
        #[arg(short, long)]
        category: Option<String>,
        /// Comma-separated tag names, created when missing
        #[arg(short, long)]
        tags: Option<String>,
        /// Target amount for countable tasks
        #[arg(long)]
        count: Option<i64>,
        /// Unit name for the count
        #[arg(long)]
        unit: Option<String>,
        /// Parent task id for subtasks
        #[arg(long)]
        parent: Option<i64>,
    },
    /// List tasks
    List {
        /// Sort method, see `task sort-methods`
        #[arg(short, long)]
        sort_by: Option<String>,
        /// Comma-separated columns to display
        #[arg(long)]
        columns: Option<String>,
        /// Show only tasks of this category
        #[arg(short, long)]
        category: Option<String>,
        /// Show only tasks with this tag
        #[arg(short, long)]
        tag: Option<String>,
        /// Include soft-deleted tasks
        #[arg(short, long)]
        all: bool,
    },
    /// Change task fields, given as column=value pairs
    Update {
        /// Task id
        id: i64,
        /// Changes like due_time=2026-09-01 or priority=3
        #[arg(required = true)]
        changes: Vec<String>,
    },
    /// Mark a task as completed
    Complete {
        /// Task name or id
        task: String,
    },
    /// Soft-delete tasks by name, id or category
    Delete {
        /// Task name or id
        task: Option<String>,
        /// Delete every task of this category
        #[arg(short, long)]
        category: Option<String>,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// List available sort methods
    SortMethods,
}

pub fn cmd(args: TaskArgs) -> Result<()> {
    match args.command {
        Some(TaskCommand::Add {
            name,
            description,
            start,
            due,
            interval,
            priority,
            category,
            tags,
            count,
            unit,
            parent,
        }) => handle_add(name, description, start, due, interval, priority, category, tags, count, unit, parent),
        Some(TaskCommand::List {
            sort_by,
            columns,
            category,
            tag,
            all,
        }) => handle_list(sort_by, columns, category, tag, all),
        Some(TaskCommand::Update { id, changes }) => handle_update(id, changes),
        Some(TaskCommand::Complete { task }) => handle_complete(task),
        Some(TaskCommand::Delete { task, category, yes }) => handle_delete(task, category, yes),
        Some(TaskCommand::SortMethods) => handle_sort_methods(),
        None => handle_interactive(),
    }
}

#[allow(clippy::too_many_arguments)]
fn handle_add(
    name: Option<String>,
    description: Option<String>,
    start: Option<String>,
    due: Option<String>,
    interval: Option<i64>,
    priority: Option<i64>,
    category: Option<String>,
    tags: Option<String>,
    count: Option<i64>,
    unit: Option<String>,
    parent: Option<i64>,
) -> Result<()> {
    let db = Db::new()?;

    let name = match name {
        Some(name) => name,
        None => Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptTaskName.to_string())
            .interact_text()?,
    };
    let start_time = start.as_deref().map(parse_datetime_input).transpose()?;
    let due_time = due.as_deref().map(parse_datetime_input).transpose()?;
    let category_id = match category {
        Some(category_name) => Categories::new(&db).get_or_create(&category_name)?.id,
        None => None,
    };
    let unit_id = match unit {
        Some(unit_name) => Units::new(&db).get_or_create(&unit_name, None)?.id,
        None => None,
    };

    let mut task = Task::new(&name, description, due_time);
    task.start_time = start_time;
    task.priority = priority.or(Some(DEFAULT_PRIORITY));
    task.count = count;
    task.category_id = category_id;
    task.parent_task_id = parent;
    task.unit_id = unit_id;

    let stored = Tasks::new(&db).insert(&task)?;

    if let Some(tag_names) = tags {
        let tags_db = Tags::new(&db);
        let tasks_db = Tasks::new(&db);
        for tag_name in tag_names.split(',').map(str::trim).filter(|name| !name.is_empty()) {
            let tag = tags_db.get_or_create(tag_name)?;
            tasks_db.add_tag(stored.id.unwrap(), tag.id.unwrap())?;
        }
    }

    if let Some(interval) = interval {
        let recur_start = stored.start_time.unwrap_or_else(|| Local::now().naive_local());
        Recurrences::new(&db).insert(stored.id.unwrap(), interval, recur_start, None)?;
    }

    msg_success!(Message::TaskCreated(stored.name));
    Ok(())
}

fn handle_list(sort_by: Option<String>, columns: Option<String>, category: Option<String>, tag: Option<String>, all: bool) -> Result<()> {
    let db = Db::new()?;
    let tasks_config = Config::read()?.tasks.unwrap_or_default();

    let filter = if let Some(category_name) = category {
        match Categories::new(&db).get_by_name(&category_name)? {
            Some(category) => TaskFilter::ByCategory(category.id.unwrap()),
            None => {
                msg_error!(Message::CategoryNotFound(category_name));
                return Ok(());
            }
        }
    } else if let Some(tag_name) = tag {
        match Tags::new(&db).get_by_name(&tag_name)? {
            Some(tag) => TaskFilter::ByTag(tag.id.unwrap()),
            None => {
                msg_error!(Message::TagNotFound(tag_name));
                return Ok(());
            }
        }
    } else if all {
        TaskFilter::All
    } else {
        TaskFilter::Active
    };

    let tasks = Tasks::new(&db).fetch(filter)?;
    if tasks.is_empty() {
        msg_info!(Message::NoTasksFound);
        return Ok(());
    }

    // Resolution order: flag, config file, settings table seed.
    let sort = match sort_by.or(tasks_config.default_sort) {
        Some(sort) => sort,
        None => Settings::new(&db).get("default_sort")?.unwrap_or_else(|| "due_time".to_string()),
    };
    let tasks = rank::rank(tasks, &sort)?;

    let column_spec = match columns.or(tasks_config.display_columns) {
        Some(spec) => spec,
        None => Settings::new(&db)
            .get("display_columns")?
            .unwrap_or_else(|| DEFAULT_TASK_COLUMNS.to_string()),
    };
    let column_list: Vec<&str> = column_spec.split(',').map(str::trim).filter(|column| !column.is_empty()).collect();

    msg_print!(Message::TasksHeader, true);
    View::tasks(&tasks, &column_list)?;
    Ok(())
}

fn handle_update(id: i64, changes: Vec<String>) -> Result<()> {
    let db = Db::new()?;

    let mut parsed: Vec<(String, SqlValue)> = Vec::with_capacity(changes.len());
    for change in &changes {
        let Some((field, value)) = change.split_once('=') else {
            msg_error!(Message::InvalidKeyValuePair(change.clone()));
            return Ok(());
        };
        let field = field.trim();
        let value = value.trim();
        match coerce_field(field, value) {
            Some(coerced) => parsed.push((field.to_string(), coerced)),
            None => {
                msg_error!(Message::TaskFieldValueInvalid(field.to_string(), value.to_string()));
                return Ok(());
            }
        }
    }

    let change_refs: Vec<(&str, SqlValue)> = parsed.iter().map(|(field, value)| (field.as_str(), value.clone())).collect();
    Tasks::new(&db).update(id, &change_refs)?;

    msg_success!(Message::TaskUpdated(id));
    Ok(())
}

/// Maps a textual field value to a typed one. An empty value clears the
/// field. Unknown fields pass through as text so the repository can
/// reject them with its own message.
fn coerce_field(field: &str, value: &str) -> Option<SqlValue> {
    if value.is_empty() {
        return Some(SqlValue::Null);
    }
    match field {
        "start_time" | "due_time" | "completed_at" => parse_datetime_input(value).ok().map(SqlValue::from),
        "priority" | "count" | "category_id" | "parent_task_id" | "unit_id" => value.parse::<i64>().ok().map(SqlValue::from),
        _ => Some(SqlValue::from(value)),
    }
}

fn handle_complete(identifier: String) -> Result<()> {
    let db = Db::new()?;
    let tasks_db = Tasks::new(&db);

    let task = match find_task(&tasks_db, &identifier)? {
        Some(task) => task,
        None => {
            msg_error!(Message::TaskNotFound(identifier));
            return Ok(());
        }
    };

    let id = task.id.unwrap();
    tasks_db.mark_completed(id)?;
    msg_success!(Message::TaskCompleted(id));
    Ok(())
}

fn handle_delete(task: Option<String>, category: Option<String>, yes: bool) -> Result<()> {
    let db = Db::new()?;
    let tasks_db = Tasks::new(&db);
    let prompt_on_delete = Config::read()?.tasks.unwrap_or_default().prompt_on_delete.unwrap_or(true);
    let skip_confirm = yes || !prompt_on_delete;

    if let Some(category_name) = category {
        let Some(category) = Categories::new(&db).get_by_name(&category_name)? else {
            msg_error!(Message::CategoryNotFound(category_name));
            return Ok(());
        };
        let tasks = tasks_db.fetch(TaskFilter::ByCategory(category.id.unwrap()))?;
        if tasks.is_empty() {
            msg_info!(Message::NoTasksFound);
            return Ok(());
        }
        if !skip_confirm && !confirm(Message::ConfirmDeleteTasks(tasks.len()))? {
            msg_info!(Message::OperationCancelled);
            return Ok(());
        }
        let deleted = tasks_db.soft_delete_by_category(category.id.unwrap())?;
        msg_success!(Message::TasksDeletedCount(deleted));
        return Ok(());
    }

    let Some(identifier) = task else {
        msg_error!(Message::TaskNameRequired);
        return Ok(());
    };
    let task = match find_task(&tasks_db, &identifier)? {
        Some(task) => task,
        None => {
            msg_error!(Message::TaskNotFound(identifier));
            return Ok(());
        }
    };

    if !skip_confirm && !confirm(Message::ConfirmDeleteTask(task.name.clone()))? {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    let id = task.id.unwrap();
    tasks_db.soft_delete(id)?;
    msg_success!(Message::TaskDeleted(id));
    Ok(())
}

fn handle_sort_methods() -> Result<()> {
    msg_print!(Message::SortMethodsHeader, true);
    View::sort_methods()
}

/// Resolves a task by numeric id first, then by active name.
fn find_task(tasks_db: &Tasks, identifier: &str) -> Result<Option<Task>> {
    if let Ok(id) = identifier.parse::<i64>() {
        return tasks_db.get_by_id(id);
    }
    tasks_db.get_by_name(identifier)
}

fn confirm(prompt: Message) -> Result<bool> {
    Ok(Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt.to_string())
        .default(false)
        .interact()?)
}

fn handle_interactive() -> Result<()> {
    let options = vec!["Add task", "List tasks", "Complete task", "Delete task"];
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::SelectTaskAction.to_string())
        .items(&options)
        .interact()?;

    match selection {
        0 => {
            let name: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptTaskName.to_string())
                .interact_text()?;
            let description: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptTaskDescription.to_string())
                .allow_empty(true)
                .interact_text()?;
            let due: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptTaskDueTime.to_string())
                .allow_empty(true)
                .interact_text()?;
            let priority: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptTaskPriority.to_string())
                .allow_empty(true)
                .interact_text()?;
            let category: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptTaskCategory.to_string())
                .allow_empty(true)
                .interact_text()?;

            let priority = if priority.is_empty() {
                None
            } else {
                match priority.parse::<i64>() {
                    Ok(priority) => Some(priority),
                    Err(_) => {
                        msg_error!(Message::TaskFieldValueInvalid("priority".to_string(), priority));
                        return Ok(());
                    }
                }
            };

            handle_add(
                Some(name),
                if description.is_empty() { None } else { Some(description) },
                None,
                if due.is_empty() { None } else { Some(due) },
                None,
                priority,
                if category.is_empty() { None } else { Some(category) },
                None,
                None,
                None,
                None,
            )
        }
        1 => handle_list(None, None, None, None, false),
        2 => select_task_then(Message::SelectTaskToComplete, handle_complete),
        3 => select_task_then(Message::SelectTaskToDelete, |name| handle_delete(Some(name), None, false)),
        _ => Ok(()),
    }
}

fn select_task_then(prompt: Message, action: impl FnOnce(String) -> Result<()>) -> Result<()> {
    let db = Db::new()?;
    let tasks = Tasks::new(&db).fetch(TaskFilter::Active)?;
    if tasks.is_empty() {
        msg_info!(Message::NoTasksFound);
        return Ok(());
    }

    let task_names: Vec<String> = tasks.iter().map(|task| task.name.clone()).collect();
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt.to_string())
        .items(&task_names)
        .interact()?;
    action(task_names[selection].clone())
}
