use serde::{Deserialize, Serialize};
use std::fmt;

/// An ingredient stored in a fridge.
///
/// Identity is `id`; a fridge may hold several entries with the same id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ingredient {
    pub id: String,
    pub name: String,
}

impl Ingredient {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// Ingredient entry as returned by the recipe service's ingredient list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawIngredient {
    #[serde(rename = "idIngredient")]
    pub id_ingredient: String,
    #[serde(rename = "strIngredient")]
    pub str_ingredient: String,
    #[serde(rename = "strDescription", default)]
    pub str_description: Option<String>,
    #[serde(rename = "strType", default)]
    pub str_type: Option<String>,
}

impl From<&RawIngredient> for Ingredient {
    fn from(raw: &RawIngredient) -> Self {
        Ingredient::new(raw.id_ingredient.clone(), raw.str_ingredient.clone())
    }
}

impl From<RawIngredient> for Ingredient {
    fn from(raw: RawIngredient) -> Self {
        Ingredient::new(raw.id_ingredient, raw.str_ingredient)
    }
}

/// Body of `list.php?i=list`.
#[derive(Debug, Clone, Deserialize)]
pub struct IngredientListResponse {
    pub meals: Option<Vec<RawIngredient>>,
}
