use crate::{
    db::{db::Db, query::DATETIME_FORMAT, recurrences::Recurrences},
    libs::{messages::Message, task::parse_datetime_input, view::View},
    msg_error, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use chrono::Local;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Input, Select};

#[derive(Debug, Args)]
pub struct RecurrenceArgs {
    #[command(subcommand)]
    command: Option<RecurrenceCommand>,
}

#[derive(Debug, Subcommand)]
enum RecurrenceCommand {
    /// Attach a repeat rule to a task
    Add {
        /// Task id
        task: i64,
        /// Repeat interval in seconds
        #[arg(short, long)]
        interval: i64,
        /// First occurrence, defaults to now
        #[arg(short, long)]
        start: Option<String>,
        /// Last occurrence, open-ended when omitted
        #[arg(short, long)]
        end: Option<String>,
    },
    /// List recurrences, active ones by default
    List {
        /// Show recurrences of one task only, inactive included
        #[arg(short, long)]
        task: Option<i64>,
    },
    /// Move a recurrence to its next occurrence
    Advance {
        /// Recurrence id
        id: i64,
    },
    /// Deactivate a recurrence
    Delete {
        /// Recurrence id
        id: i64,
    },
}

pub fn cmd(args: RecurrenceArgs) -> Result<()> {
    match args.command {
        Some(RecurrenceCommand::Add { task, interval, start, end }) => handle_add(task, interval, start, end),
        Some(RecurrenceCommand::List { task }) => handle_list(task),
        Some(RecurrenceCommand::Advance { id }) => handle_advance(id),
        Some(RecurrenceCommand::Delete { id }) => handle_delete(id),
        None => handle_interactive(),
    }
}

fn handle_add(task_id: i64, interval: i64, start: Option<String>, end: Option<String>) -> Result<()> {
    let db = Db::new()?;

    let start = match start {
        Some(start) => parse_datetime_input(&start)?,
        None => Local::now().naive_local(),
    };
    let end = end.as_deref().map(parse_datetime_input).transpose()?;

    Recurrences::new(&db).insert(task_id, interval, start, end)?;
    msg_success!(Message::RecurrenceCreated(task_id));
    Ok(())
}

fn handle_list(task: Option<i64>) -> Result<()> {
    let db = Db::new()?;
    let recurrences_db = Recurrences::new(&db);

    let recurrences = match task {
        Some(task_id) => recurrences_db.list_for_task(task_id)?,
        None => recurrences_db.fetch()?,
    };

    if recurrences.is_empty() {
        msg_info!(Message::NoRecurrencesFound);
        return Ok(());
    }

    msg_print!(Message::RecurrencesHeader, true);
    View::recurrences(&recurrences)?;
    Ok(())
}

fn handle_advance(id: i64) -> Result<()> {
    let db = Db::new()?;
    let recurrences_db = Recurrences::new(&db);

    if recurrences_db.get_by_id(id)?.is_none() {
        msg_error!(Message::RecurrenceNotFound(id));
        return Ok(());
    }

    match recurrences_db.advance(id, Local::now().naive_local())? {
        Some(next) => msg_success!(Message::RecurrenceAdvanced(id, next.format(DATETIME_FORMAT).to_string())),
        None => msg_info!(Message::RecurrenceExhausted(id)),
    }
    Ok(())
}

fn handle_delete(id: i64) -> Result<()> {
    let db = Db::new()?;

    if Recurrences::new(&db).get_by_id(id)?.is_none() {
        msg_error!(Message::RecurrenceNotFound(id));
        return Ok(());
    }

    Recurrences::new(&db).deactivate(id)?;
    msg_success!(Message::RecurrenceDeactivated(id));
    Ok(())
}

fn handle_interactive() -> Result<()> {
    let options = vec!["Add recurrence", "List recurrences"];
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::SelectRecurrenceAction.to_string())
        .items(&options)
        .interact()?;

    match selection {
        0 => {
            let task: i64 = Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptRecurrenceTaskId.to_string())
                .interact_text()?;
            let interval: i64 = Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptRecurrenceInterval.to_string())
                .interact_text()?;
            let start: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptRecurrenceStart.to_string())
                .allow_empty(true)
                .interact_text()?;
            let end: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptRecurrenceEnd.to_string())
                .allow_empty(true)
                .interact_text()?;
            handle_add(
                task,
                interval,
                if start.is_empty() { None } else { Some(start) },
                if end.is_empty() { None } else { Some(end) },
            )
        }
        1 => handle_list(None),
        _ => Ok(()),
    }
}
