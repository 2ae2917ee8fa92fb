//! Core library modules for the timewise application.
//!
//! Serves as the main entry point for all timewise library components,
//! providing a centralized access point to the application's core
//! functionality.
//!
//! ## Features
//!
//! - **Core Infrastructure**: Configuration, data storage, messaging
//! - **Task Ranking**: Pluggable scoring strategies for list ordering
//! - **User Interface**: Console table rendering and input parsing
//!
//! ## Usage
//!
//! ```rust,no_run
//! use timewise::db::{db::Db, tasks::Tasks};
//! use timewise::libs::task::Task;
//!
//! # fn main() -> anyhow::Result<()> {
//! let db = Db::new()?;
//! let task = Task::new("Implement feature", Some("Add user authentication".to_string()), None);
//! Tasks::new(&db).insert(&task)?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod data_storage;
pub mod messages;
pub mod rank;
pub mod task;
pub mod view;
