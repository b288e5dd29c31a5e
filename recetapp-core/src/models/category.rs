use serde::{Deserialize, Serialize};
use std::fmt;

/// A recipe category as listed by the recipe service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id_category: String,
    pub str_category: String,
    #[serde(default)]
    pub str_category_thumb: String,
    #[serde(default)]
    pub str_category_description: String,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.str_category)?;
        writeln!(f, "{}", "=".repeat(self.str_category.chars().count()))?;
        if !self.str_category_description.trim().is_empty() {
            writeln!(f, "{}", self.str_category_description.trim())?;
        }
        Ok(())
    }
}

/// Body of `categories.php`.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoriesResponse {
    #[serde(default)]
    pub categories: Option<Vec<Category>>,
}
