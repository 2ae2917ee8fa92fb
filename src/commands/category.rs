use crate::{
    db::{categories::Categories, db::Db},
    libs::{messages::Message, view::View},
    msg_error, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

#[derive(Debug, Args)]
pub struct CategoryArgs {
    #[command(subcommand)]
    command: Option<CategoryCommand>,
}

#[derive(Debug, Subcommand)]
enum CategoryCommand {
    /// Create a new category
    Create {
        /// Category name
        name: String,
        /// Category description
        #[arg(short, long)]
        description: Option<String>,
        /// Category color
        #[arg(short, long)]
        color: Option<String>,
    },
    /// List active categories
    List,
    /// Deactivate a category
    Delete {
        /// Category name
        name: String,
    },
}

pub fn cmd(args: CategoryArgs) -> Result<()> {
    match args.command {
        Some(CategoryCommand::Create { name, description, color }) => handle_create(name, description, color),
        Some(CategoryCommand::List) => handle_list(),
        Some(CategoryCommand::Delete { name }) => handle_delete(name),
        None => handle_interactive(),
    }
}

fn handle_create(name: String, description: Option<String>, color: Option<String>) -> Result<()> {
    let db = Db::new()?;
    let categories_db = Categories::new(&db);

    if let Some(existing) = categories_db.get_by_name(&name)? {
        if existing.is_active {
            msg_error!(Message::CategoryAlreadyExists(name));
            return Ok(());
        }
    }

    categories_db.insert(&name, description, color)?;
    msg_success!(Message::CategoryCreated(name));
    Ok(())
}

fn handle_list() -> Result<()> {
    let db = Db::new()?;
    let categories = Categories::new(&db).fetch()?;

    if categories.is_empty() {
        msg_info!(Message::NoCategoriesFound);
        return Ok(());
    }

    msg_print!(Message::CategoriesHeader, true);
    View::categories(&categories)?;
    Ok(())
}

fn handle_delete(name: String) -> Result<()> {
    let db = Db::new()?;
    let categories_db = Categories::new(&db);

    if categories_db.get_by_name(&name)?.is_none() {
        msg_error!(Message::CategoryNotFound(name));
        return Ok(());
    }

    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::ConfirmDeactivateCategory(name.clone()).to_string())
        .default(false)
        .interact()?;

    if confirmed {
        categories_db.deactivate(&name)?;
        msg_success!(Message::CategoryDeactivated(name));
    } else {
        msg_info!(Message::OperationCancelled);
    }

    Ok(())
}

fn handle_interactive() -> Result<()> {
    let options = vec!["Create category", "List categories", "Deactivate category"];
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::SelectCategoryAction.to_string())
        .items(&options)
        .interact()?;

    match selection {
        0 => {
            let name: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptCategoryName.to_string())
                .interact_text()?;
            let description: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptCategoryDescription.to_string())
                .allow_empty(true)
                .interact_text()?;
            let color: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptCategoryColor.to_string())
                .allow_empty(true)
                .interact_text()?;
            handle_create(
                name,
                if description.is_empty() { None } else { Some(description) },
                if color.is_empty() { None } else { Some(color) },
            )
        }
        1 => handle_list(),
        2 => {
            let db = Db::new()?;
            let categories = Categories::new(&db).fetch()?;
            if categories.is_empty() {
                msg_info!(Message::NoCategoriesFound);
                return Ok(());
            }

            let names: Vec<String> = categories.iter().map(|category| category.name.clone()).collect();
            let selection = Select::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::SelectCategoryToDeactivate.to_string())
                .items(&names)
                .interact()?;
            handle_delete(names[selection].clone())
        }
        _ => Ok(()),
    }
}
