use crate::{
    db::{db::Db, tags::Tags, tasks::Tasks},
    libs::{messages::Message, task::TaskFilter, view::View},
    msg_error, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

#[derive(Debug, Args)]
pub struct TagArgs {
    #[command(subcommand)]
    command: Option<TagCommand>,
}

#[derive(Debug, Subcommand)]
enum TagCommand {
    /// Create a new tag
    Create {
        /// Tag name
        name: String,
        /// Tag description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// List active tags
    List,
    /// Deactivate a tag
    Delete {
        /// Tag name
        name: String,
    },
    /// Show tasks with a specific tag
    Tasks {
        /// Tag name
        tag: String,
    },
}

pub fn cmd(args: TagArgs) -> Result<()> {
    match args.command {
        Some(TagCommand::Create { name, description }) => handle_create(name, description),
        Some(TagCommand::List) => handle_list(),
        Some(TagCommand::Delete { name }) => handle_delete(name),
        Some(TagCommand::Tasks { tag }) => handle_show_tasks(tag),
        None => handle_interactive(),
    }
}

fn handle_create(name: String, description: Option<String>) -> Result<()> {
    let db = Db::new()?;
    let tags_db = Tags::new(&db);

    if let Some(existing) = tags_db.get_by_name(&name)? {
        if existing.is_active {
            msg_error!(Message::TagAlreadyExists(name));
            return Ok(());
        }
    }

    tags_db.insert(&name, description)?;
    msg_success!(Message::TagCreated(name));
    Ok(())
}

fn handle_list() -> Result<()> {
    let db = Db::new()?;
    let tags = Tags::new(&db).fetch()?;

    if tags.is_empty() {
        msg_info!(Message::NoTagsFound);
        return Ok(());
    }

    msg_print!(Message::TagsHeader, true);
    View::tags(&tags)?;
    Ok(())
}

fn handle_delete(name: String) -> Result<()> {
    let db = Db::new()?;
    let tags_db = Tags::new(&db);

    if tags_db.get_by_name(&name)?.is_none() {
        msg_error!(Message::TagNotFound(name));
        return Ok(());
    }

    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::ConfirmDeactivateTag(name.clone()).to_string())
        .default(false)
        .interact()?;

    if confirmed {
        tags_db.deactivate(&name)?;
        msg_success!(Message::TagDeactivated(name));
    } else {
        msg_info!(Message::OperationCancelled);
    }

    Ok(())
}

fn handle_show_tasks(tag_name: String) -> Result<()> {
    let db = Db::new()?;

    let tag = match Tags::new(&db).get_by_name(&tag_name)? {
        Some(tag) => tag,
        None => {
            msg_error!(Message::TagNotFound(tag_name));
            return Ok(());
        }
    };

    let tasks = Tasks::new(&db).fetch(TaskFilter::ByTag(tag.id.unwrap()))?;
    if tasks.is_empty() {
        msg_info!(Message::NoTasksWithTag(tag_name));
        return Ok(());
    }

    msg_print!(Message::TasksWithTag(tag_name), true);
    View::tasks(&tasks, &["id", "name", "due_time", "priority"])?;
    Ok(())
}

fn handle_interactive() -> Result<()> {
    let options = vec!["Create tag", "List tags", "Deactivate tag"];
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::SelectTagAction.to_string())
        .items(&options)
        .interact()?;

    match selection {
        0 => {
            let name: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptTagName.to_string())
                .interact_text()?;
            let description: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptTagDescription.to_string())
                .allow_empty(true)
                .interact_text()?;
            handle_create(name, if description.is_empty() { None } else { Some(description) })
        }
        1 => handle_list(),
        2 => {
            let db = Db::new()?;
            let tags = Tags::new(&db).fetch()?;
            if tags.is_empty() {
                msg_info!(Message::NoTagsFound);
                return Ok(());
            }

            let names: Vec<String> = tags.iter().map(|tag| tag.name.clone()).collect();
            let selection = Select::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::SelectTagToDeactivate.to_string())
                .items(&names)
                .interact()?;
            handle_delete(names[selection].clone())
        }
        _ => Ok(()),
    }
}
