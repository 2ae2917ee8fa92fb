//! Database layer for the timewise application.
//!
//! Provides a complete persistence layer built on SQLite: a validated
//! SQL builder, a declarative schema with additive reconciliation, and
//! one repository module per entity. All statements that repositories
//! run are produced by the builder, so identifiers are validated and
//! values travel as named parameters.
//!
//! ## Features
//!
//! - **Core Infrastructure**: Connection management behind a mutex and
//!   schema setup on open
//! - **Query Builder**: Composable SELECT / INSERT / UPDATE / DELETE and
//!   CREATE statements with named placeholders
//! - **Task Management**: Tasks with categories, tags, units and
//!   parent/subtask links
//! - **Scheduling**: Reminders and interval recurrences attached to
//!   tasks
//!
//! ## Usage
//!
//! ```rust,no_run
//! use timewise::db::{db::Db, tasks::Tasks};
//! use timewise::libs::task::Task;
//!
//! # fn main() -> anyhow::Result<()> {
//! let db = Db::new()?;
//! let task = Task::new("Review code", Some("Check the release PR".to_string()), None);
//! let stored = Tasks::new(&db).insert(&task)?;
//! println!("created #{}", stored.id.unwrap_or_default());
//! # Ok(())
//! # }
//! ```

/// Core database connection and initialization module.
///
/// Provides the `Db` struct that owns the SQLite connection, runs
/// builder statements, and applies the schema on startup.
pub mod db;

/// Validated SQL statement builders with named placeholders.
pub mod query;

/// Declarative schema definition and reconciliation.
///
/// Declares every table, index, view, trigger and seed row, and brings
/// an existing database up to date by creating missing objects and
/// adding missing columns.
pub mod schema;

/// Task categorization with color labels.
pub mod categories;

/// Interval-based task recurrence management.
///
/// Stores repeat rules in seconds granularity and computes or persists
/// the next occurrence of each rule.
pub mod recurrences;

/// Reminder scheduling for tasks.
///
/// Every task gets a default reminder at creation; this module manages
/// the pending queue and delivery flags.
pub mod reminders;

/// Key-value application settings with seeded defaults.
pub mod settings;

/// Free-form task labels and the task/tag link table.
pub mod tags;

/// Core task management operations.
///
/// Handles CRUD for tasks, including validation, soft deletion, filter
/// queries, and tag attachment.
pub mod tasks;

/// Measurement units for countable tasks.
pub mod units;
