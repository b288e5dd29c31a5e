use clap::{Args, Subcommand};

use super::{truncate, AppContext, OutputFormat};
use recetapp_core::{FavoritesStore, RecipeService};

#[derive(Args)]
pub struct FavoritesCommand {
    #[command(subcommand)]
    pub command: FavoritesSubcommand,
}

#[derive(Subcommand)]
pub enum FavoritesSubcommand {
    /// List favorite recipes
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Add a recipe to favorites, or remove it if already there
    Toggle {
        /// Recipe ID
        id: String,
    },

    /// Check whether a recipe is a favorite
    Check {
        /// Recipe ID
        id: String,
    },
}

impl FavoritesCommand {
    pub async fn run(&self, ctx: &AppContext) -> Result<(), Box<dyn std::error::Error>> {
        let store = FavoritesStore::load(ctx.storage.clone()).await;

        match &self.command {
            FavoritesSubcommand::List { format } => {
                let favorites = store.favorites();

                if favorites.is_empty() {
                    println!("No favorites yet");
                    return Ok(());
                }

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&favorites)?);
                    }
                    OutputFormat::Text => {
                        println!("{:<8}  NAME", "ID");
                        println!("{}", "-".repeat(60));
                        for meal in &favorites {
                            println!("{:<8}  {}", meal.id_meal, truncate(&meal.str_meal, 50));
                        }
                        println!("\nTotal: {} favorite(s)", favorites.len());
                    }
                }
                Ok(())
            }

            FavoritesSubcommand::Toggle { id } => {
                // Removing only needs the id; adding needs the recipe summary.
                let preview = match store.favorites().into_iter().find(|m| &m.id_meal == id) {
                    Some(existing) => existing,
                    None => match ctx.service.recipe_by_id(id).await? {
                        Some(meal) => meal.preview(),
                        None => return Err(format!("Recipe not found: {}", id).into()),
                    },
                };

                let name = preview.str_meal.clone();
                if store.toggle_favorite(preview) {
                    println!("Added to favorites: {}", name);
                } else {
                    println!("Removed from favorites: {}", name);
                }
                store.flush().await;
                Ok(())
            }

            FavoritesSubcommand::Check { id } => {
                if store.is_favorite(id) {
                    println!("{} is a favorite", id);
                } else {
                    println!("{} is not a favorite", id);
                }
                Ok(())
            }
        }
    }
}
