pub mod category;
pub mod db;
pub mod init;
pub mod recurrence;
pub mod reminder;
pub mod setting;
pub mod tag;
pub mod task;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Manage tasks")]
    Task(task::TaskArgs),
    #[command(about = "Manage task categories")]
    Category(category::CategoryArgs),
    #[command(about = "Manage task tags")]
    Tag(tag::TagArgs),
    #[command(about = "Manage task reminders")]
    Reminder(reminder::ReminderArgs),
    #[command(about = "Manage task recurrences")]
    Recurrence(recurrence::RecurrenceArgs),
    #[command(about = "Read and write application settings")]
    Setting(setting::SettingArgs),
    #[command(about = "Database maintenance")]
    Db(db::DbArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Task(args) => task::cmd(args),
            Commands::Category(args) => category::cmd(args),
            Commands::Tag(args) => tag::cmd(args),
            Commands::Reminder(args) => reminder::cmd(args),
            Commands::Recurrence(args) => recurrence::cmd(args),
            Commands::Setting(args) => setting::cmd(args),
            Commands::Db(args) => db::cmd(args),
        }
    }
}
