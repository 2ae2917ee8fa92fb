use crate::{
    db::{db::Db, settings::Settings},
    libs::{messages::Message, view::View},
    msg_error, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Input, Select};

#[derive(Debug, Args)]
pub struct SettingArgs {
    #[command(subcommand)]
    command: Option<SettingCommand>,
}

#[derive(Debug, Subcommand)]
enum SettingCommand {
    /// Set a setting, overriding any seeded default
    Set {
        /// Setting key
        key: String,
        /// Setting value
        value: String,
    },
    /// Show one setting
    Get {
        /// Setting key
        key: String,
    },
    /// List all settings
    List,
}

pub fn cmd(args: SettingArgs) -> Result<()> {
    match args.command {
        Some(SettingCommand::Set { key, value }) => handle_set(key, value),
        Some(SettingCommand::Get { key }) => handle_get(key),
        Some(SettingCommand::List) => handle_list(),
        None => handle_interactive(),
    }
}

fn handle_set(key: String, value: String) -> Result<()> {
    let db = Db::new()?;
    Settings::new(&db).set(&key, &value)?;
    msg_success!(Message::SettingSet(key));
    Ok(())
}

fn handle_get(key: String) -> Result<()> {
    let db = Db::new()?;
    match Settings::new(&db).get(&key)? {
        Some(value) => msg_print!(Message::SettingValue(key, value)),
        None => msg_error!(Message::SettingNotFound(key)),
    }
    Ok(())
}

fn handle_list() -> Result<()> {
    let db = Db::new()?;
    let settings = Settings::new(&db).fetch()?;

    msg_print!(Message::SettingsHeader, true);
    View::settings(&settings)?;
    Ok(())
}

fn handle_interactive() -> Result<()> {
    let options = vec!["Set setting", "List settings"];
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::SelectSettingAction.to_string())
        .items(&options)
        .interact()?;

    match selection {
        0 => {
            let key: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptSettingKey.to_string())
                .interact_text()?;
            let value: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptSettingValue.to_string())
                .interact_text()?;
            handle_set(key, value)
        }
        1 => handle_list(),
        _ => Ok(()),
    }
}
