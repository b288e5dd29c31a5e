use clap::Args;

use super::{truncate, AppContext, OutputFormat};
use recetapp_core::{SearchCoordinator, SearchPhase, SearchSettings};

#[derive(Args)]
pub struct SearchCommand {
    /// Recipe name (or part of it)
    query: String,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl SearchCommand {
    pub async fn run(&self, ctx: &AppContext) -> Result<(), Box<dyn std::error::Error>> {
        let settings = SearchSettings {
            debounce: ctx.config.search_debounce(),
            ..SearchSettings::default()
        };
        let coordinator = SearchCoordinator::with_settings(ctx.service.clone(), settings);
        let mut rx = coordinator.subscribe();

        coordinator.set_focused(true);
        coordinator.set_query(&self.query);

        if coordinator.state().phase == SearchPhase::Idle {
            return Err(format!(
                "Search needs at least {} characters",
                settings.min_query_chars
            )
            .into());
        }

        let state = rx.wait_for(|s| s.phase.is_finished()).await?.clone();

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&state)?);
            }
            OutputFormat::Text => match state.phase {
                SearchPhase::Succeeded => {
                    println!("{:<8}  {:<40}  {:<15}  AREA", "ID", "NAME", "CATEGORY");
                    println!("{}", "-".repeat(80));
                    for meal in &state.results {
                        println!(
                            "{:<8}  {:<40}  {:<15}  {}",
                            meal.id_meal,
                            truncate(&meal.str_meal, 40),
                            meal.str_category.as_deref().unwrap_or("-"),
                            meal.str_area.as_deref().unwrap_or("-"),
                        );
                    }
                    println!("\nTotal: {} recipe(s)", state.results.len());
                }
                SearchPhase::Failed => {
                    return Err(state.message.unwrap_or_default().into());
                }
                _ => {
                    if let Some(message) = state.message {
                        println!("{}", message);
                    }
                }
            },
        }
        Ok(())
    }
}
