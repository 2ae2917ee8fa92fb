//! Display implementation for timewise application messages.
//!
//! All user-facing text lives in this single match so that wording stays
//! consistent, parameters stay type-checked at the call site, and a future
//! localization pass has one place to touch. Messages follow sentence case
//! and name the affected object where it helps the user act on the text.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration removed".to_string(),
            Message::ConfigModuleDatabase => "Database settings".to_string(),
            Message::ConfigModuleTasks => "Task display settings".to_string(),
            Message::PromptSelectModules => "Select modules to configure".to_string(),
            Message::PromptDbFileName => "Database file name".to_string(),
            Message::PromptDefaultSort => "Default sort strategy for task listing".to_string(),
            Message::PromptDisplayColumns => "Columns to display (comma-separated)".to_string(),
            Message::PromptConfirmBeforeDelete => "Ask for confirmation before deleting tasks?".to_string(),

            // === DATABASE MESSAGES ===
            Message::StatementFailed(statement, names) => format!("Statement failed: {} [parameters: {}]", statement, names),
            Message::ConstraintViolation(table) => format!("Constraint violation on '{}'", table),
            Message::DatabasePath(path) => format!("Database file: {}", path),
            Message::DatabaseNotFound(path) => format!("No database file at {}", path),
            Message::ConfirmDropDatabase => "This removes the database file and every task in it. Continue?".to_string(),
            Message::DatabaseDropped => "Database dropped".to_string(),

            // === TASK MESSAGES ===
            Message::TaskCreated(name) => format!("Task '{}' created successfully", name),
            Message::TaskUpdated(id) => format!("Task {} updated successfully", id),
            Message::TaskCompleted(id) => format!("Task {} marked as completed", id),
            Message::TaskDeleted(id) => format!("Task {} deleted", id),
            Message::TasksDeletedCount(count) => format!("Deleted {} task(s)", count),
            Message::TaskNotFound(task) => format!("Task not found: {}", task),
            Message::TaskNameRequired => "Task name must not be empty".to_string(),
            Message::TaskNameTooLong(limit) => format!("Task name exceeds {} characters", limit),
            Message::TaskDescriptionTooLong(limit) => format!("Task description exceeds {} characters", limit),
            Message::TaskDueBeforeStart => "Due time must not be earlier than start time".to_string(),
            Message::TaskCompletedBeforeCreated => "Completion time must not be earlier than creation time".to_string(),
            Message::TaskPriorityOutOfRange(value, min, max) => format!("Priority {} is outside the allowed range {}..{}", value, min, max),
            Message::TaskFieldUnknown(field) => format!("Unknown task field: '{}'", field),
            Message::TaskFieldValueInvalid(field, value) => format!("Invalid value '{}' for field '{}'", value, field),
            Message::TasksHeader => "Tasks:".to_string(),
            Message::NoTasksFound => "No tasks found".to_string(),
            Message::SortMethodsHeader => "Available sort strategies:".to_string(),
            Message::UnknownSortMethod(name, known) => format!("Unknown sort strategy '{}'. Available: {}", name, known),
            Message::ConfirmDeleteTask(name) => format!("Are you sure you want to delete task '{}'?", name),
            Message::ConfirmDeleteTasks(count) => format!("Are you sure you want to delete {} task(s)?", count),
            Message::PromptTaskName => "Task name".to_string(),
            Message::PromptTaskDescription => "Description (optional)".to_string(),
            Message::PromptTaskDueTime => "Due time, YYYY-MM-DD or YYYY-MM-DD HH:MM:SS (optional)".to_string(),
            Message::PromptTaskPriority => "Priority (optional)".to_string(),
            Message::PromptTaskCategory => "Category name (optional)".to_string(),
            Message::SelectTaskAction => "What would you like to do?".to_string(),
            Message::SelectTaskToComplete => "Select task to complete".to_string(),
            Message::SelectTaskToDelete => "Select task to delete".to_string(),

            // === CATEGORY MESSAGES ===
            Message::CategoryCreated(name) => format!("Category '{}' created successfully", name),
            Message::CategoryNotFound(name) => format!("Category not found: {}", name),
            Message::CategoryAlreadyExists(name) => format!("Category '{}' already exists", name),
            Message::CategoryDeactivated(name) => format!("Category '{}' deactivated", name),
            Message::ConfirmDeactivateCategory(name) => format!("Deactivate category '{}'? Its tasks keep their assignment", name),
            Message::CategoriesHeader => "Categories:".to_string(),
            Message::NoCategoriesFound => "No categories found".to_string(),
            Message::PromptCategoryName => "Category name".to_string(),
            Message::PromptCategoryDescription => "Description (optional)".to_string(),
            Message::PromptCategoryColor => "Color (optional)".to_string(),
            Message::SelectCategoryAction => "What would you like to do?".to_string(),
            Message::SelectCategoryToDeactivate => "Select category to deactivate".to_string(),

            // === TAG MESSAGES ===
            Message::TagCreated(name) => format!("Tag '{}' created successfully", name),
            Message::TagNotFound(name) => format!("Tag not found: {}", name),
            Message::TagAlreadyExists(name) => format!("Tag '{}' already exists", name),
            Message::TagDeactivated(name) => format!("Tag '{}' deactivated", name),
            Message::ConfirmDeactivateTag(name) => format!("Deactivate tag '{}'? Task links stay in place", name),
            Message::TagsHeader => "Tags:".to_string(),
            Message::NoTagsFound => "No tags found".to_string(),
            Message::TasksWithTag(name) => format!("Tasks tagged '{}':", name),
            Message::NoTasksWithTag(name) => format!("No tasks tagged '{}'", name),
            Message::PromptTagName => "Tag name".to_string(),
            Message::PromptTagDescription => "Description (optional)".to_string(),
            Message::SelectTagAction => "What would you like to do?".to_string(),
            Message::SelectTagToDeactivate => "Select tag to deactivate".to_string(),

            // === REMINDER MESSAGES ===
            Message::ReminderCreated(time) => format!("Reminder set for {}", time),
            Message::ReminderNotFound(id) => format!("Reminder not found: {}", id),
            Message::ReminderMarkedSent(id) => format!("Reminder {} marked as sent", id),
            Message::ReminderDeactivated(id) => format!("Reminder {} deactivated", id),
            Message::RemindersHeader => "Reminders:".to_string(),
            Message::NoRemindersFound => "No reminders found".to_string(),
            Message::PromptReminderTaskId => "Task id".to_string(),
            Message::PromptReminderTime => "Reminder time, YYYY-MM-DD or YYYY-MM-DD HH:MM:SS".to_string(),
            Message::SelectReminderAction => "What would you like to do?".to_string(),

            // === RECURRENCE MESSAGES ===
            Message::RecurrenceCreated(task_id) => format!("Recurrence created for task {}", task_id),
            Message::RecurrenceNotFound(id) => format!("Recurrence not found: {}", id),
            Message::RecurrenceIntervalInvalid(interval) => format!("Recurrence interval must be positive, got {}", interval),
            Message::RecurrenceAdvanced(id, start) => format!("Recurrence {} advanced to {}", id, start),
            Message::RecurrenceExhausted(id) => format!("Recurrence {} has passed its end date and was deactivated", id),
            Message::RecurrenceDeactivated(id) => format!("Recurrence {} deactivated", id),
            Message::RecurrencesHeader => "Recurrences:".to_string(),
            Message::NoRecurrencesFound => "No recurrences found".to_string(),
            Message::PromptRecurrenceTaskId => "Task id".to_string(),
            Message::PromptRecurrenceInterval => "Repeat interval in seconds".to_string(),
            Message::PromptRecurrenceStart => "First occurrence, YYYY-MM-DD or YYYY-MM-DD HH:MM:SS".to_string(),
            Message::PromptRecurrenceEnd => "Last occurrence, empty for no end".to_string(),
            Message::SelectRecurrenceAction => "What would you like to do?".to_string(),

            // === SETTING MESSAGES ===
            Message::SettingSet(key) => format!("Setting '{}' updated", key),
            Message::SettingValue(key, value) => format!("{} = {}", key, value),
            Message::SettingNotFound(key) => format!("Setting not found: {}", key),
            Message::SettingNotNumeric(key, value) => format!("Setting '{}' must be numeric, got '{}'", key, value),
            Message::SettingsHeader => "Settings:".to_string(),
            Message::PromptSettingKey => "Setting key".to_string(),
            Message::PromptSettingValue => "Setting value".to_string(),
            Message::SelectSettingAction => "What would you like to do?".to_string(),

            // === INPUT MESSAGES ===
            Message::InvalidDateTimeInput(input) => format!("Could not parse '{}' as a date, expected YYYY-MM-DD or YYYY-MM-DD HH:MM:SS", input),
            Message::InvalidKeyValuePair(input) => format!("Expected field=value, got '{}'", input),
            Message::UnknownColumn(column) => format!("Unknown display column: '{}'", column),
            Message::OperationCancelled => "Operation cancelled".to_string(),
        };
        write!(f, "{}", text)
    }
}
