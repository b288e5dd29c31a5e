use clap::{Args, Subcommand};

use super::{truncate, AppContext, OutputFormat};
use recetapp_core::{Fridge, FridgeStore, Ingredient, IngredientCatalog};

#[derive(Args)]
pub struct FridgeCommand {
    #[command(subcommand)]
    pub command: FridgeSubcommand,
}

#[derive(Subcommand)]
pub enum FridgeSubcommand {
    /// List all fridges
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Create a new fridge
    Create {
        /// Name of the fridge
        name: String,
    },

    /// Show a fridge's ingredients
    Show {
        /// Fridge ID or name
        fridge: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Add an ingredient from the catalog to a fridge
    Add {
        /// Fridge ID or name
        fridge: String,

        /// Ingredient name (or part of it)
        ingredient: String,
    },

    /// Remove an ingredient from a fridge
    Remove {
        /// Fridge ID or name
        fridge: String,

        /// Ingredient ID
        ingredient_id: String,
    },

    /// Remove every ingredient from a fridge
    Clear {
        /// Fridge ID or name
        fridge: String,
    },

    /// Delete a fridge
    Delete {
        /// Fridge ID or name
        fridge: String,
    },
}

impl FridgeCommand {
    pub async fn run(&self, ctx: &AppContext) -> Result<(), Box<dyn std::error::Error>> {
        let store = FridgeStore::load(ctx.storage.clone()).await;

        match &self.command {
            FridgeSubcommand::List { format } => {
                let fridges = store.fridges();

                if fridges.is_empty() {
                    println!("No fridges found");
                    return Ok(());
                }

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&fridges)?);
                    }
                    OutputFormat::Text => {
                        println!("{:<36}  {:<30}  INGREDIENTS", "ID", "NAME");
                        println!("{}", "-".repeat(80));
                        for fridge in &fridges {
                            println!(
                                "{:<36}  {:<30}  {}",
                                fridge.id,
                                truncate(&fridge.name, 30),
                                fridge.ingredients.len()
                            );
                        }
                        println!("\nTotal: {} fridge(s)", fridges.len());
                    }
                }
                Ok(())
            }

            FridgeSubcommand::Create { name } => match store.create_fridge(name) {
                Some(id) => {
                    store.flush().await;
                    println!("Created fridge: {} ({})", name.trim(), id);
                    Ok(())
                }
                None => Err("Fridge name cannot be empty".into()),
            },

            FridgeSubcommand::Show { fridge, format } => {
                let fridge = find_fridge(&store, fridge)?;
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&fridge)?);
                    }
                    OutputFormat::Text => {
                        print!("{}", fridge);
                    }
                }
                Ok(())
            }

            FridgeSubcommand::Add { fridge, ingredient } => {
                let fridge = find_fridge(&store, fridge)?;
                let catalog = IngredientCatalog::new(ctx.service.clone());
                let matches = catalog.search(ingredient).await?;
                let picked = pick_ingredient(ingredient, matches)?;

                let label = picked.to_string();
                store.add_ingredient(&fridge.id, picked);
                store.flush().await;
                println!("Added to '{}': {}", fridge.name, label);
                Ok(())
            }

            FridgeSubcommand::Remove {
                fridge,
                ingredient_id,
            } => {
                let fridge = find_fridge(&store, fridge)?;
                if !store.remove_ingredient(&fridge.id, ingredient_id) {
                    return Err(format!(
                        "Ingredient {} is not in '{}'",
                        ingredient_id, fridge.name
                    )
                    .into());
                }
                store.flush().await;
                println!("Removed {} from '{}'", ingredient_id, fridge.name);
                Ok(())
            }

            FridgeSubcommand::Clear { fridge } => {
                let fridge = find_fridge(&store, fridge)?;
                store.clear_fridge(&fridge.id);
                store.flush().await;
                println!("Cleared fridge: {}", fridge.name);
                Ok(())
            }

            FridgeSubcommand::Delete { fridge } => {
                let fridge = find_fridge(&store, fridge)?;
                store.delete_fridge(&fridge.id);
                store.flush().await;
                println!("Deleted fridge: {}", fridge.name);
                Ok(())
            }
        }
    }
}

fn find_fridge(store: &FridgeStore, identifier: &str) -> Result<Fridge, String> {
    store
        .find(identifier)
        .ok_or_else(|| format!("Fridge not found: {}", identifier))
}

/// Chooses the catalog entry for `query`: an exact (case-insensitive) name
/// match wins, otherwise the search must have a single match.
fn pick_ingredient(query: &str, matches: Vec<Ingredient>) -> Result<Ingredient, String> {
    let wanted = query.trim().to_lowercase();
    if let Some(exact) = matches.iter().find(|i| i.name.to_lowercase() == wanted) {
        return Ok(exact.clone());
    }

    let mut matches = matches;
    match matches.len() {
        0 => Err(format!("No ingredient matches '{}'", query.trim())),
        1 => Ok(matches.remove(0)),
        n => {
            let candidates: Vec<String> = matches.iter().take(10).map(|i| i.to_string()).collect();
            let more = if n > candidates.len() {
                format!("\n  ... and {} more", n - candidates.len())
            } else {
                String::new()
            };
            Err(format!(
                "'{}' matches {} ingredients:\n  {}{}",
                query.trim(),
                n,
                candidates.join("\n  "),
                more
            ))
        }
    }
}
