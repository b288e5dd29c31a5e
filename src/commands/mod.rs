mod browse;
mod config_cmd;
mod favorites;
mod fridge;
mod ingredients;
mod search;
mod theme;

use clap::ValueEnum;
use std::sync::Arc;

use crate::config::Config;
use recetapp_core::{KeyValueStore, MealDbClient};

pub use browse::{CategoriesCommand, CategoryCommand, RecipeCommand};
pub use config_cmd::ConfigCommand;
pub use favorites::FavoritesCommand;
pub use fridge::FridgeCommand;
pub use ingredients::IngredientsCommand;
pub use search::SearchCommand;
pub use theme::ThemeCommand;

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Everything a command needs: configuration, local storage and the
/// recipe service.
pub struct AppContext {
    pub config: Config,
    pub storage: Arc<dyn KeyValueStore>,
    pub service: Arc<MealDbClient>,
}

/// Shortens `text` to `width` characters for table columns.
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let kept: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}
