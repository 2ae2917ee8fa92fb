use super::messages::Message;
use super::rank::SORT_METHOD_HELP;
use super::task::Task;
use crate::db::categories::Category;
use crate::db::query::DATETIME_FORMAT;
use crate::db::recurrences::Recurrence;
use crate::db::reminders::Reminder;
use crate::db::settings::Setting;
use crate::db::tags::Tag;
use crate::msg_error_anyhow;
use anyhow::Result;
use chrono::NaiveDateTime;
use prettytable::{row, Cell, Row, Table};

/// Task columns shown when neither flag nor config says otherwise.
pub const DEFAULT_TASK_COLUMNS: &str = "id,name,due_time,priority,category_id";

pub struct View {}

impl View {
    /// Prints tasks with a caller-chosen column set.
    pub fn tasks(tasks: &[Task], columns: &[&str]) -> Result<()> {
        let mut table = Table::new();
        table.add_row(Row::new(columns.iter().map(|column| Cell::new(&column.to_uppercase())).collect()));
        for task in tasks {
            let mut cells = Vec::with_capacity(columns.len());
            for column in columns {
                cells.push(Cell::new(&Self::task_cell(task, column)?));
            }
            table.add_row(Row::new(cells));
        }
        table.printstd();
        Ok(())
    }

    pub fn categories(categories: &[Category]) -> Result<()> {
        let mut table = Table::new();
        table.add_row(row!["ID", "NAME", "DESCRIPTION", "COLOR"]);
        for category in categories {
            table.add_row(row![
                category.id.unwrap_or(0),
                category.name,
                category.description.clone().unwrap_or_default(),
                category.color.clone().unwrap_or_default()
            ]);
        }
        table.printstd();
        Ok(())
    }

    pub fn tags(tags: &[Tag]) -> Result<()> {
        let mut table = Table::new();
        table.add_row(row!["ID", "NAME", "DESCRIPTION"]);
        for tag in tags {
            table.add_row(row![
                tag.id.unwrap_or(0),
                tag.name,
                tag.description.clone().unwrap_or_default()
            ]);
        }
        table.printstd();
        Ok(())
    }

    pub fn reminders(reminders: &[Reminder]) -> Result<()> {
        let mut table = Table::new();
        table.add_row(row!["ID", "TASK ID", "TIME", "SENT"]);
        for reminder in reminders {
            table.add_row(row![
                reminder.id.unwrap_or(0),
                reminder.task_id,
                reminder.reminder_time.format(DATETIME_FORMAT),
                if reminder.is_sent { "yes" } else { "no" }
            ]);
        }
        table.printstd();
        Ok(())
    }

    pub fn recurrences(recurrences: &[Recurrence]) -> Result<()> {
        let mut table = Table::new();
        table.add_row(row!["ID", "TASK ID", "INTERVAL", "START", "END", "ACTIVE"]);
        for recurrence in recurrences {
            table.add_row(row![
                recurrence.id.unwrap_or(0),
                recurrence.task_id,
                recurrence.interval,
                recurrence.start.format(DATETIME_FORMAT),
                Self::time_cell(recurrence.end),
                if recurrence.is_active { "yes" } else { "no" }
            ]);
        }
        table.printstd();
        Ok(())
    }

    pub fn settings(settings: &[Setting]) -> Result<()> {
        let mut table = Table::new();
        table.add_row(row!["KEY", "VALUE"]);
        for setting in settings {
            table.add_row(row![setting.key, setting.value]);
        }
        table.printstd();
        Ok(())
    }

    pub fn sort_methods() -> Result<()> {
        let mut table = Table::new();
        table.add_row(row!["METHOD", "DESCRIPTION"]);
        for (name, description) in SORT_METHOD_HELP {
            table.add_row(row![name, description]);
        }
        table.printstd();
        Ok(())
    }

    fn task_cell(task: &Task, column: &str) -> Result<String> {
        let cell = match column {
            "id" => Self::int_cell(task.id),
            "uuid" => task.uuid.clone(),
            "name" => task.name.clone(),
            "description" => task.description.clone().unwrap_or_default(),
            "start_time" => Self::time_cell(task.start_time),
            "due_time" => Self::time_cell(task.due_time),
            "completed_at" => Self::time_cell(task.completed_at),
            "priority" => Self::int_cell(task.priority),
            "count" => Self::int_cell(task.count),
            "category_id" => Self::int_cell(task.category_id),
            "parent_task_id" => Self::int_cell(task.parent_task_id),
            "unit_id" => Self::int_cell(task.unit_id),
            "created_at" => Self::time_cell(task.created_at),
            "updated_at" => Self::time_cell(task.updated_at),
            "deleted_at" => Self::time_cell(task.deleted_at),
            other => return Err(msg_error_anyhow!(Message::UnknownColumn(other.to_string()))),
        };
        Ok(cell)
    }

    fn int_cell(value: Option<i64>) -> String {
        value.map(|v| v.to_string()).unwrap_or_default()
    }

    fn time_cell(value: Option<NaiveDateTime>) -> String {
        value.map(|v| v.format(DATETIME_FORMAT).to_string()).unwrap_or_default()
    }
}
