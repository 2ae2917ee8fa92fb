use crate::{
    db::{db::Db, query::DATETIME_FORMAT, reminders::Reminders},
    libs::{messages::Message, task::parse_datetime_input, view::View},
    msg_error, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Input, Select};

#[derive(Debug, Args)]
pub struct ReminderArgs {
    #[command(subcommand)]
    command: Option<ReminderCommand>,
}

#[derive(Debug, Subcommand)]
enum ReminderCommand {
    /// Attach a reminder to a task
    Add {
        /// Task id
        task: i64,
        /// Reminder time, YYYY-MM-DD or YYYY-MM-DD HH:MM:SS
        time: String,
    },
    /// List reminders, pending ones by default
    List {
        /// Show reminders of one task only, sent included
        #[arg(short, long)]
        task: Option<i64>,
    },
    /// Mark a reminder as sent
    Sent {
        /// Reminder id
        id: i64,
    },
    /// Deactivate a reminder
    Delete {
        /// Reminder id
        id: i64,
    },
}

pub fn cmd(args: ReminderArgs) -> Result<()> {
    match args.command {
        Some(ReminderCommand::Add { task, time }) => handle_add(task, time),
        Some(ReminderCommand::List { task }) => handle_list(task),
        Some(ReminderCommand::Sent { id }) => handle_sent(id),
        Some(ReminderCommand::Delete { id }) => handle_delete(id),
        None => handle_interactive(),
    }
}

fn handle_add(task_id: i64, time: String) -> Result<()> {
    let db = Db::new()?;
    let reminder_time = parse_datetime_input(&time)?;

    let reminder = Reminders::new(&db).insert(task_id, reminder_time)?;
    msg_success!(Message::ReminderCreated(reminder.reminder_time.format(DATETIME_FORMAT).to_string()));
    Ok(())
}

fn handle_list(task: Option<i64>) -> Result<()> {
    let db = Db::new()?;
    let reminders_db = Reminders::new(&db);

    let reminders = match task {
        Some(task_id) => reminders_db.list_for_task(task_id)?,
        None => reminders_db.fetch_pending()?,
    };

    if reminders.is_empty() {
        msg_info!(Message::NoRemindersFound);
        return Ok(());
    }

    msg_print!(Message::RemindersHeader, true);
    View::reminders(&reminders)?;
    Ok(())
}

fn handle_sent(id: i64) -> Result<()> {
    let db = Db::new()?;

    if Reminders::new(&db).get_by_id(id)?.is_none() {
        msg_error!(Message::ReminderNotFound(id));
        return Ok(());
    }

    Reminders::new(&db).mark_sent(id)?;
    msg_success!(Message::ReminderMarkedSent(id));
    Ok(())
}

fn handle_delete(id: i64) -> Result<()> {
    let db = Db::new()?;

    if Reminders::new(&db).get_by_id(id)?.is_none() {
        msg_error!(Message::ReminderNotFound(id));
        return Ok(());
    }

    Reminders::new(&db).deactivate(id)?;
    msg_success!(Message::ReminderDeactivated(id));
    Ok(())
}

fn handle_interactive() -> Result<()> {
    let options = vec!["Add reminder", "List pending reminders"];
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::SelectReminderAction.to_string())
        .items(&options)
        .interact()?;

    match selection {
        0 => {
            let task: i64 = Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptReminderTaskId.to_string())
                .interact_text()?;
            let time: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptReminderTime.to_string())
                .interact_text()?;
            handle_add(task, time)
        }
        1 => handle_list(None),
        _ => Ok(()),
    }
}
