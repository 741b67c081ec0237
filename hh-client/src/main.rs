//! household - command-line client for the household backend
//!
//! Each command loads the relevant view, applies at most one action, and
//! prints the resulting view. A view error string ends the process with a
//! non-zero exit code.

use anyhow::{bail, Context, Result};
use clap::Parser;
use hh_client::cli::{Cli, Command, DishCommand, ItemCommand, RecipeAddArgs, RecipeCommand};
use hh_client::render;
use hh_client::views::{
    DishwashingView, RecipeDetailView, RecipeEditor, RecipeListView, ShoppingListView,
};
use hh_client::HouseholdClient;
use hh_common::config::{load_toml_config, ClientConfig};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = load_toml_config(cli.config.as_deref()).context("Failed to load config")?;
    let config = ClientConfig::resolve(cli.api_url.as_deref(), cli.timeout_secs, &loaded.config)?;

    // Logs go to stderr so rendered views on stdout stay clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    info!(
        "household v{} [{}] built {}",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP")
    );
    match &loaded.source {
        Some(path) => info!("Config file: {}", path.display()),
        None => debug!("No config file found, using defaults"),
    }
    info!("Backend: {}", config.api_url);

    let api = HouseholdClient::from_config(&config)?;
    let output = run(cli.command, &api).await?;
    print!("{}", output);

    Ok(())
}

fn ensure_ok(error: Option<&str>) -> Result<()> {
    match error {
        Some(message) => bail!("{}", message),
        None => Ok(()),
    }
}

async fn run(command: Command, api: &HouseholdClient) -> Result<String> {
    match command {
        Command::Recipes(cmd) => run_recipes(cmd, api).await,
        Command::Items(cmd) => run_items(cmd, api).await,
        Command::Dishes(cmd) => run_dishes(cmd, api).await,
    }
}

async fn load_detail(api: &HouseholdClient, recipe_id: i64) -> Result<RecipeDetailView> {
    let mut view = RecipeDetailView::new(recipe_id);
    view.load(api).await;
    ensure_ok(view.error())?;
    Ok(view)
}

async fn run_recipes(command: RecipeCommand, api: &HouseholdClient) -> Result<String> {
    match command {
        RecipeCommand::List => {
            let mut view = RecipeListView::new();
            view.refresh(api).await;
            ensure_ok(view.error())?;
            Ok(render::recipe_list(&view))
        }
        RecipeCommand::Show { id } => {
            let view = load_detail(api, id).await?;
            Ok(render::recipe_detail(&view))
        }
        RecipeCommand::Add(args) => add_recipe(args, api).await,
        RecipeCommand::Edit {
            id,
            name,
            description,
        } => {
            let mut editor = RecipeEditor::for_edit(api, id).await;
            ensure_ok(editor.error())?;
            if let Some(name) = name {
                editor.draft_mut().name = name;
            }
            if let Some(description) = description {
                editor.draft_mut().description = description;
            }
            let saved = editor.save(api).await;
            ensure_ok(editor.error())?;
            Ok(render::saved_recipe(&editor, saved.and_then(|r| r.id)))
        }
        RecipeCommand::Delete { id } => {
            let mut view = RecipeListView::new();
            view.delete(api, id).await;
            ensure_ok(view.error())?;
            Ok(render::recipe_list(&view))
        }
        RecipeCommand::ToggleAvailable {
            recipe_id,
            ingredient_row_id,
        } => {
            let mut view = load_detail(api, recipe_id).await?;
            view.toggle_availability(api, ingredient_row_id).await;
            ensure_ok(view.error())?;
            Ok(render::recipe_detail(&view))
        }
        RecipeCommand::Shop { recipe_id, item_id } => {
            let mut view = load_detail(api, recipe_id).await?;
            view.add_to_shopping_list(api, item_id).await;
            ensure_ok(view.error())?;
            Ok(render::recipe_detail(&view))
        }
        RecipeCommand::AddIngredient {
            recipe_id,
            item_id,
            weight,
            available,
        } => {
            let mut view = load_detail(api, recipe_id).await?;
            view.add_ingredient(api, item_id, &weight, available).await;
            ensure_ok(view.error())?;
            Ok(render::recipe_detail(&view))
        }
        RecipeCommand::RemoveIngredient {
            recipe_id,
            ingredient_row_id,
        } => {
            let mut view = load_detail(api, recipe_id).await?;
            view.remove_ingredient(api, ingredient_row_id).await;
            ensure_ok(view.error())?;
            Ok(render::recipe_detail(&view))
        }
    }
}

async fn add_recipe(args: RecipeAddArgs, api: &HouseholdClient) -> Result<String> {
    let mut editor = RecipeEditor::for_create(api).await;
    ensure_ok(editor.error())?;

    editor.draft_mut().name = args.name;
    editor.draft_mut().description = args.description;
    for spec in &args.ingredients {
        editor.draft_mut().lines.push(spec.to_draft_line());
        let index = editor.draft().lines.len() - 1;
        if !editor.select_item(index, spec.item_id) {
            debug!(item_id = spec.item_id, "Ingredient item not in catalog");
        }
    }

    let saved = editor.save(api).await;
    ensure_ok(editor.error())?;
    Ok(render::saved_recipe(&editor, saved.and_then(|r| r.id)))
}

async fn run_items(command: ItemCommand, api: &HouseholdClient) -> Result<String> {
    let mut view = ShoppingListView::new();
    view.refresh(api).await;
    ensure_ok(view.error())?;

    match command {
        ItemCommand::List => {}
        ItemCommand::Toggle { ids } => view.toggle_many(api, &ids).await,
        ItemCommand::Add { name } => view.create_item(api, &name).await,
        ItemCommand::Delete { id } => view.delete_item(api, id).await,
    }

    ensure_ok(view.error())?;
    Ok(render::shopping_list(&view))
}

async fn run_dishes(command: DishCommand, api: &HouseholdClient) -> Result<String> {
    let mut view = DishwashingView::new();
    match command {
        DishCommand::Show => view.refresh(api).await,
        DishCommand::Record { person } => view.record(api, person).await,
    }

    ensure_ok(view.error())?;
    Ok(render::dishwashing(&view))
}
