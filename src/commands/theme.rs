use clap::{Args, Subcommand, ValueEnum};

use super::AppContext;
use recetapp_core::{Appearance, ThemePreference, ThemeStore};

#[derive(Args)]
pub struct ThemeCommand {
    #[command(subcommand)]
    pub command: ThemeSubcommand,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SystemAppearance {
    Light,
    Dark,
}

impl From<SystemAppearance> for Appearance {
    fn from(value: SystemAppearance) -> Self {
        match value {
            SystemAppearance::Light => Appearance::Light,
            SystemAppearance::Dark => Appearance::Dark,
        }
    }
}

#[derive(Subcommand)]
pub enum ThemeSubcommand {
    /// Show the stored preference and the theme in effect
    Show {
        /// Appearance reported by the system, used when the preference is auto
        #[arg(long, value_enum)]
        system: Option<SystemAppearance>,
    },

    /// Set the theme preference
    Set {
        /// light, dark or auto
        preference: String,
    },

    /// Cycle auto -> light -> dark -> auto
    Toggle,
}

impl ThemeCommand {
    pub async fn run(&self, ctx: &AppContext) -> Result<(), Box<dyn std::error::Error>> {
        let store = ThemeStore::load(ctx.storage.clone()).await;

        match &self.command {
            ThemeSubcommand::Show { system } => {
                let effective = store.effective(system.map(Appearance::from));
                println!("preference: {}", store.preference());
                println!("effective: {}", effective);
            }
            ThemeSubcommand::Set { preference } => {
                let preference: ThemePreference = preference.parse()?;
                store.set_preference(preference);
                store.flush().await;
                println!("Theme set to {}", preference);
            }
            ThemeSubcommand::Toggle => {
                let next = store.toggle();
                store.flush().await;
                println!("Theme set to {}", next);
            }
        }
        Ok(())
    }
}
