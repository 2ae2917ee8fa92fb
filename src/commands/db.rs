use crate::{
    db::db::Db,
    libs::messages::Message,
    msg_error, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};
use std::fs;

#[derive(Debug, Args)]
pub struct DbArgs {
    #[command(subcommand)]
    command: DbCommand,
}

#[derive(Debug, Subcommand)]
enum DbCommand {
    /// Show the database file location
    Path,
    /// Remove the database file and everything in it
    #[command(hide = true)]
    Drop {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub fn cmd(args: DbArgs) -> Result<()> {
    match args.command {
        DbCommand::Path => handle_path(),
        DbCommand::Drop { yes } => handle_drop(yes),
    }
}

fn handle_path() -> Result<()> {
    let path = Db::path()?;
    msg_print!(Message::DatabasePath(path.display().to_string()));
    Ok(())
}

fn handle_drop(yes: bool) -> Result<()> {
    let path = Db::path()?;
    if !path.exists() {
        msg_error!(Message::DatabaseNotFound(path.display().to_string()));
        return Ok(());
    }

    if !yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDropDatabase.to_string())
            .default(false)
            .interact()?;
        if !confirmed {
            msg_info!(Message::OperationCancelled);
            return Ok(());
        }
    }

    fs::remove_file(&path)?;
    msg_success!(Message::DatabaseDropped);
    Ok(())
}
