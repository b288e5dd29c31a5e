use clap::Args;
use serde::Serialize;

use super::{truncate, AppContext, OutputFormat};
use recetapp_core::{Category, MealPreview, RecipeService};

#[derive(Args)]
pub struct CategoriesCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl CategoriesCommand {
    pub async fn run(&self, ctx: &AppContext) -> Result<(), Box<dyn std::error::Error>> {
        let categories = ctx.service.list_categories().await?;

        if categories.is_empty() {
            println!("No categories found");
            return Ok(());
        }

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&categories)?);
            }
            OutputFormat::Text => {
                println!("{:<4}  {:<20}  DESCRIPTION", "ID", "NAME");
                println!("{}", "-".repeat(80));
                for category in &categories {
                    let summary = category
                        .str_category_description
                        .lines()
                        .next()
                        .unwrap_or_default();
                    println!(
                        "{:<4}  {:<20}  {}",
                        category.id_category,
                        category.str_category,
                        truncate(summary, 52)
                    );
                }
                println!("\nTotal: {} category(ies)", categories.len());
            }
        }
        Ok(())
    }
}

#[derive(Args)]
pub struct CategoryCommand {
    /// Category name, e.g. "Seafood"
    name: String,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Serialize)]
struct CategoryDetails {
    category: Category,
    meals: Vec<MealPreview>,
}

impl CategoryCommand {
    pub async fn run(&self, ctx: &AppContext) -> Result<(), Box<dyn std::error::Error>> {
        let category = match ctx.service.find_category(&self.name).await? {
            Some(c) => c,
            None => return Err(format!("Category not found: {}", self.name).into()),
        };
        let meals = ctx.service.list_by_category(&category.str_category).await?;

        match self.format {
            OutputFormat::Json => {
                let details = CategoryDetails { category, meals };
                println!("{}", serde_json::to_string_pretty(&details)?);
            }
            OutputFormat::Text => {
                println!("{}", category);
                if meals.is_empty() {
                    println!("No recipes in this category");
                } else {
                    println!("Recipes:");
                    for meal in &meals {
                        println!("  {}", meal);
                    }
                    println!("\nTotal: {} recipe(s)", meals.len());
                }
            }
        }
        Ok(())
    }
}

#[derive(Args)]
pub struct RecipeCommand {
    /// Recipe ID
    id: String,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl RecipeCommand {
    pub async fn run(&self, ctx: &AppContext) -> Result<(), Box<dyn std::error::Error>> {
        let meal = match ctx.service.recipe_by_id(&self.id).await? {
            Some(m) => m,
            None => return Err(format!("Recipe not found: {}", self.id).into()),
        };

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&meal)?);
            }
            OutputFormat::Text => {
                print!("{}", meal);
            }
        }
        Ok(())
    }
}
