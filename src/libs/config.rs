//! Configuration management for the timewise application.
//!
//! Handles the JSON configuration file stored in the platform application
//! data directory, plus the interactive setup wizard behind `timewise init`.
//! Configuration is modular: each section is optional, and unset sections
//! are omitted from the file entirely so it stays readable.
//!
//! ## File Location
//!
//! - **Windows**: `%LOCALAPPDATA%\lacodda\timewise\config.json`
//! - **macOS**: `~/Library/Application Support/lacodda/timewise/config.json`
//! - **Linux**: `~/.local/share/lacodda/timewise/config.json`
//!
//! ## Resolution Order
//!
//! Values configured here sit between command-line flags and the seeded
//! `settings` table: a flag wins over the config file, and the config file
//! wins over the seed defaults.

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};

/// Configuration file name used for storing application settings.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Represents a configurable module in the setup wizard.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    /// Unique identifier for the module used in configuration routing
    pub key: String,
    /// Display name shown to users during interactive setup
    pub name: String,
}

/// Database storage configuration.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct DbConfig {
    /// File name of the SQLite database inside the application data
    /// directory. Defaults to `timewise.db` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

/// Task listing preferences.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct TasksConfig {
    /// Sort strategy applied when `task list` is called without
    /// `--sort-by`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_sort: Option<String>,

    /// Comma-separated column names shown by `task list` when
    /// `--columns` is not given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_columns: Option<String>,

    /// Whether destructive task commands ask for confirmation first.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_on_delete: Option<bool>,
}

/// Main configuration container for the entire application.
///
/// Every section is optional so users only configure what they need and
/// new sections can be added without breaking existing files.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Config {
    /// Database storage settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<DbConfig>,

    /// Task listing preferences.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tasks: Option<TasksConfig>,
}

impl Config {
    /// Reads configuration from the filesystem.
    ///
    /// Returns a default configuration when no file exists yet; a file
    /// that exists but cannot be read or parsed is an error.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Saves the current configuration as pretty-printed JSON.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes the configuration file if it exists.
    pub fn delete() -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if config_file_path.exists() {
            fs::remove_file(config_file_path)?;
        }
        Ok(())
    }

    /// Runs the interactive configuration setup wizard.
    ///
    /// Loads the existing configuration as defaults, presents a
    /// multi-select of available modules and walks through the prompts
    /// of each selected one. The updated configuration is returned for
    /// saving.
    pub fn init() -> Result<Self> {
        let mut config = match Self::read() {
            Ok(config) => config,
            Err(_) => Config::default(),
        };

        let node_descriptions = vec![
            ConfigModule {
                key: "database".to_string(),
                name: "Database".to_string(),
            },
            ConfigModule {
                key: "tasks".to_string(),
                name: "Tasks".to_string(),
            },
        ];

        let selected_nodes = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&node_descriptions.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected_nodes {
            match node_descriptions[selection].key.as_str() {
                "database" => {
                    let default = config.database.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleDatabase);
                    config.database = Some(DbConfig {
                        file_name: Some(
                            Input::with_theme(&ColorfulTheme::default())
                                .with_prompt(Message::PromptDbFileName.to_string())
                                .default(default.file_name.unwrap_or_else(|| crate::db::db::DB_FILE_NAME.to_string()))
                                .interact_text()?,
                        ),
                    });
                }
                "tasks" => {
                    let default = config.tasks.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleTasks);
                    config.tasks = Some(TasksConfig {
                        default_sort: Some(
                            Input::with_theme(&ColorfulTheme::default())
                                .with_prompt(Message::PromptDefaultSort.to_string())
                                .default(default.default_sort.unwrap_or_else(|| "due_time".to_string()))
                                .interact_text()?,
                        ),
                        display_columns: Some(
                            Input::with_theme(&ColorfulTheme::default())
                                .with_prompt(Message::PromptDisplayColumns.to_string())
                                .default(default.display_columns.unwrap_or_else(|| crate::libs::view::DEFAULT_TASK_COLUMNS.to_string()))
                                .interact_text()?,
                        ),
                        prompt_on_delete: Some(
                            Confirm::with_theme(&ColorfulTheme::default())
                                .with_prompt(Message::PromptConfirmBeforeDelete.to_string())
                                .default(default.prompt_on_delete.unwrap_or(true))
                                .interact()?,
                        ),
                    });
                }
                _ => {}
            }
        }

        Ok(config)
    }
}
