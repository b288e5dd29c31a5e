//! Fridges: named ingredient inventories.
//!
//! Every transform here returns a new `Fridge` and leaves the receiver
//! untouched; the fridge store swaps whole values in and out of its
//! collection.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::Ingredient;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Fridge {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
}

impl Fridge {
    /// Creates an empty fridge with a fresh random id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            ingredients: Vec::new(),
        }
    }

    pub fn with_ingredient(&self, ingredient: Ingredient) -> Self {
        let mut ingredients = self.ingredients.clone();
        ingredients.push(ingredient);
        Self {
            ingredients,
            ..self.clone()
        }
    }

    /// Drops every ingredient whose id matches.
    pub fn without_ingredient(&self, ingredient_id: &str) -> Self {
        Self {
            ingredients: self
                .ingredients
                .iter()
                .filter(|i| i.id != ingredient_id)
                .cloned()
                .collect(),
            ..self.clone()
        }
    }

    pub fn cleared(&self) -> Self {
        Self {
            ingredients: Vec::new(),
            ..self.clone()
        }
    }

    pub fn contains(&self, ingredient_id: &str) -> bool {
        self.ingredients.iter().any(|i| i.id == ingredient_id)
    }
}

impl fmt::Display for Fridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "{}", "=".repeat(self.name.chars().count()))?;
        writeln!(f, "ID: {}", self.id)?;

        if self.ingredients.is_empty() {
            writeln!(f, "\n(empty)")?;
        } else {
            writeln!(f, "\nIngredients:")?;
            for ingredient in &self.ingredients {
                writeln!(f, "  - {}", ingredient)?;
            }
        }

        Ok(())
    }
}
