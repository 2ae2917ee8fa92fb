//! # Timewise - Personal Task Tracking
//!
//! A command-line utility for managing personal tasks with categories,
//! tags, reminders and recurring schedules, backed by a local SQLite
//! database.
//!
//! ## Features
//!
//! - **Task Management**: Create, update, complete and soft-delete tasks
//! - **Organization**: Categories with colors, free-form tags, units and subtasks
//! - **Scheduling**: Per-task reminders and interval-based recurrences
//! - **Ranked Listings**: Pluggable sort strategies for the task list
//! - **Validated SQL**: Every statement is built and checked before it runs
//!
//! ## Usage
//!
//! ```rust,no_run
//! use timewise::commands::Cli;
//!
//! fn main() -> anyhow::Result<()> {
//!     Cli::menu()
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
