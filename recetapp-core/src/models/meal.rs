use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Highest ingredient slot the recipe service fills (`strIngredient1..=20`).
const INGREDIENT_SLOTS: usize = 20;

/// Lightweight recipe summary: id, title and thumbnail.
///
/// This is also the shape persisted for favorites.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MealPreview {
    pub id_meal: String,
    pub str_meal: String,
    #[serde(default)]
    pub str_meal_thumb: String,
}

impl MealPreview {
    pub fn new(
        id_meal: impl Into<String>,
        str_meal: impl Into<String>,
        str_meal_thumb: impl Into<String>,
    ) -> Self {
        Self {
            id_meal: id_meal.into(),
            str_meal: str_meal.into(),
            str_meal_thumb: str_meal_thumb.into(),
        }
    }
}

impl fmt::Display for MealPreview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<8} {}", self.id_meal, self.str_meal)
    }
}

/// One (ingredient, measure) line of a recipe.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MeasuredIngredient {
    pub ingredient: String,
    pub measure: String,
}

impl fmt::Display for MeasuredIngredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.measure.is_empty() {
            write!(f, "{}", self.ingredient)
        } else {
            write!(f, "{} {}", self.measure, self.ingredient)
        }
    }
}

/// Full recipe record.
///
/// The numbered `strIngredientN` / `strMeasureN` slots are kept in `slots`
/// so the record survives a serialize round-trip unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub id_meal: String,
    pub str_meal: String,
    #[serde(default)]
    pub str_category: Option<String>,
    #[serde(default)]
    pub str_area: Option<String>,
    #[serde(default)]
    pub str_instructions: Option<String>,
    #[serde(default)]
    pub str_meal_thumb: Option<String>,
    #[serde(default)]
    pub str_tags: Option<String>,
    #[serde(default)]
    pub str_youtube: Option<String>,
    #[serde(default)]
    pub str_source: Option<String>,
    #[serde(flatten)]
    pub slots: BTreeMap<String, Value>,
}

impl Meal {
    pub fn new(id_meal: impl Into<String>, str_meal: impl Into<String>) -> Self {
        Self {
            id_meal: id_meal.into(),
            str_meal: str_meal.into(),
            str_category: None,
            str_area: None,
            str_instructions: None,
            str_meal_thumb: None,
            str_tags: None,
            str_youtube: None,
            str_source: None,
            slots: BTreeMap::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.str_category = Some(category.into());
        self
    }

    pub fn with_thumb(mut self, thumb: impl Into<String>) -> Self {
        self.str_meal_thumb = Some(thumb.into());
        self
    }

    /// Fills the next ingredient slot (`strIngredientN` / `strMeasureN`).
    /// The meal is returned unchanged once all slots are taken.
    pub fn with_ingredient(mut self, ingredient: &str, measure: &str) -> Self {
        let Some(next) = (1..=INGREDIENT_SLOTS)
            .find(|n| self.slot(&format!("strIngredient{}", n)).is_none())
        else {
            tracing::debug!("No free ingredient slot on meal {}", self.id_meal);
            return self;
        };
        self.slots.insert(
            format!("strIngredient{}", next),
            Value::String(ingredient.to_string()),
        );
        self.slots.insert(
            format!("strMeasure{}", next),
            Value::String(measure.to_string()),
        );
        self
    }

    fn slot(&self, name: &str) -> Option<&str> {
        self.slots
            .get(name)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Non-blank ingredient lines in slot order, trimmed.
    pub fn ingredients(&self) -> Vec<MeasuredIngredient> {
        (1..=INGREDIENT_SLOTS)
            .filter_map(|n| {
                let ingredient = self.slot(&format!("strIngredient{}", n))?;
                let measure = self.slot(&format!("strMeasure{}", n)).unwrap_or("");
                Some(MeasuredIngredient {
                    ingredient: ingredient.to_string(),
                    measure: measure.to_string(),
                })
            })
            .collect()
    }

    /// Comma-separated `strTags` split into trimmed, non-empty tags.
    pub fn tag_list(&self) -> Vec<String> {
        self.str_tags
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn preview(&self) -> MealPreview {
        MealPreview::new(
            self.id_meal.clone(),
            self.str_meal.clone(),
            self.str_meal_thumb.clone().unwrap_or_default(),
        )
    }
}

impl fmt::Display for Meal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.str_meal)?;
        writeln!(f, "{}", "=".repeat(self.str_meal.chars().count()))?;
        writeln!(f, "ID: {}", self.id_meal)?;

        if let Some(category) = &self.str_category {
            writeln!(f, "Category: {}", category)?;
        }
        if let Some(area) = &self.str_area {
            writeln!(f, "Area: {}", area)?;
        }

        let tags = self.tag_list();
        if !tags.is_empty() {
            writeln!(f, "Tags: {}", tags.join(", "))?;
        }

        let ingredients = self.ingredients();
        if !ingredients.is_empty() {
            writeln!(f, "\nIngredients:")?;
            for ingredient in &ingredients {
                writeln!(f, "  - {}", ingredient)?;
            }
        }

        if let Some(instructions) = self.str_instructions.as_deref() {
            if !instructions.trim().is_empty() {
                writeln!(f, "\nInstructions:\n{}", instructions.trim())?;
            }
        }

        if let Some(youtube) = &self.str_youtube {
            if !youtube.is_empty() {
                writeln!(f, "\nVideo: {}", youtube)?;
            }
        }

        Ok(())
    }
}

/// Body of `search.php` and `lookup.php`.
#[derive(Debug, Clone, Deserialize)]
pub struct MealsResponse {
    pub meals: Option<Vec<Meal>>,
}

/// Body of `filter.php`.
#[derive(Debug, Clone, Deserialize)]
pub struct MealPreviewsResponse {
    pub meals: Option<Vec<MealPreview>>,
}
