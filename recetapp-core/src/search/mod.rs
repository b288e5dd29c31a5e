mod coordinator;
mod ingredients;

pub use coordinator::{
    SearchCoordinator, SearchPhase, SearchSettings, SearchState, EMPTY_RESULT_MESSAGE,
    SEARCH_ERROR_MESSAGE,
};
pub use ingredients::IngredientCatalog;
