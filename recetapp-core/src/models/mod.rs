mod category;
mod fridge;
mod ingredient;
mod meal;
mod theme;

pub use category::{CategoriesResponse, Category};
pub use fridge::Fridge;
pub use ingredient::{Ingredient, IngredientListResponse, RawIngredient};
pub use meal::{Meal, MealPreview, MealPreviewsResponse, MealsResponse, MeasuredIngredient};
pub use theme::{Appearance, ParseThemeError, ThemePreference};
