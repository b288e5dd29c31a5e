use clap::Args;

use super::{AppContext, OutputFormat};
use recetapp_core::IngredientCatalog;

#[derive(Args)]
pub struct IngredientsCommand {
    /// Ingredient name (or part of it)
    query: String,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl IngredientsCommand {
    pub async fn run(&self, ctx: &AppContext) -> Result<(), Box<dyn std::error::Error>> {
        let catalog = IngredientCatalog::new(ctx.service.clone());
        let matches = catalog.search(&self.query).await?;

        if matches.is_empty() {
            println!("No ingredients match '{}'", self.query.trim());
            return Ok(());
        }

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&matches)?);
            }
            OutputFormat::Text => {
                println!("{:<6}  NAME", "ID");
                println!("{}", "-".repeat(40));
                for ingredient in &matches {
                    println!("{:<6}  {}", ingredient.id, ingredient.name);
                }
                println!("\nTotal: {} ingredient(s)", matches.len());
            }
        }
        Ok(())
    }
}
