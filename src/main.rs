use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::{
    AppContext, CategoriesCommand, CategoryCommand, ConfigCommand, FavoritesCommand,
    FridgeCommand, IngredientsCommand, RecipeCommand, SearchCommand, ThemeCommand,
};
use config::Config;
use recetapp_core::{FileStore, KeyValueStore, MealDbClient, MemoryStore};

#[derive(Parser)]
#[command(name = "recetapp")]
#[command(version)]
#[command(about = "Browse recipes, keep favorites and manage your fridges", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Keep favorites, fridges and theme in memory only
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search recipes by name
    Search(SearchCommand),

    /// List recipe categories
    Categories(CategoriesCommand),

    /// Show a category and its recipes
    Category(CategoryCommand),

    /// Show a recipe's details
    Recipe(RecipeCommand),

    /// Manage favorite recipes
    Favorites(FavoritesCommand),

    /// Manage fridges and their ingredients
    Fridge(FridgeCommand),

    /// Search the ingredient catalog
    Ingredients(IngredientsCommand),

    /// Show or change the theme preference
    Theme(ThemeCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recetapp=warn,recetapp_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = Config::load(cli.config)?;

    let storage: Arc<dyn KeyValueStore> = if cli.ephemeral {
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(FileStore::new(config.data_dir.value.clone()))
    };
    let service = Arc::new(MealDbClient::new(config.api_base_url.value.clone()));
    tracing::debug!("Using recipe service at {}", service.base_url());

    let ctx = AppContext {
        config,
        storage,
        service,
    };

    match cli.command {
        Some(Commands::Search(cmd)) => cmd.run(&ctx).await?,
        Some(Commands::Categories(cmd)) => cmd.run(&ctx).await?,
        Some(Commands::Category(cmd)) => cmd.run(&ctx).await?,
        Some(Commands::Recipe(cmd)) => cmd.run(&ctx).await?,
        Some(Commands::Favorites(cmd)) => cmd.run(&ctx).await?,
        Some(Commands::Fridge(cmd)) => cmd.run(&ctx).await?,
        Some(Commands::Ingredients(cmd)) => cmd.run(&ctx).await?,
        Some(Commands::Theme(cmd)) => cmd.run(&ctx).await?,
        Some(Commands::Config(cmd)) => cmd.run(&ctx.config)?,
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}
