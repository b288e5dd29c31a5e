//! Debounced recipe search.
//!
//! Query edits restart a trailing-edge timer; when the timer fires the
//! settled query is sent to the recipe service. Every scheduling decision
//! takes a new sequence number, and a response is published only if its
//! sequence number is still the latest, so a slow response for an old
//! query can never replace newer results.
//!
//! ```text
//! Idle -> Debouncing -> Fetching -> Succeeded | EmptyResult | Failed
//!   ^__________________________________________________________|
//!                    (query cleared)
//! ```

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::models::Meal;
use crate::service::RecipeService;

pub const EMPTY_RESULT_MESSAGE: &str = "No recipes found for this search.";
pub const SEARCH_ERROR_MESSAGE: &str = "Something went wrong while searching recipes.";

#[derive(Debug, Clone, Copy)]
pub struct SearchSettings {
    /// Quiet period before a query is sent.
    pub debounce: Duration,
    /// Minimum trimmed query length (in characters) that triggers a search.
    pub min_query_chars: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(500),
            min_query_chars: 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPhase {
    #[default]
    Idle,
    Debouncing,
    Fetching,
    Succeeded,
    Failed,
    EmptyResult,
}

impl SearchPhase {
    /// True once a fetch has completed, whatever its outcome.
    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            SearchPhase::Succeeded | SearchPhase::Failed | SearchPhase::EmptyResult
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchState {
    pub query: String,
    pub phase: SearchPhase,
    pub loading: bool,
    pub results: Vec<Meal>,
    /// Empty-state or error text for the user.
    pub message: Option<String>,
}

struct Input {
    query: String,
    focused: bool,
    timer: Option<JoinHandle<()>>,
}

struct Shared<S> {
    service: Arc<S>,
    state: watch::Sender<SearchState>,
    latest: AtomicU64,
}

impl<S: RecipeService> Shared<S> {
    fn is_current(&self, seq: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == seq
    }

    /// Applies `change` only while `seq` is the latest request.
    fn publish_if_current(&self, seq: u64, change: impl FnOnce(&mut SearchState)) -> bool {
        self.state.send_if_modified(|state| {
            if !self.is_current(seq) {
                return false;
            }
            change(state);
            true
        })
    }

    async fn fetch(&self, seq: u64, query: String) {
        let started = self.publish_if_current(seq, |state| {
            state.phase = SearchPhase::Fetching;
            state.loading = true;
            state.results.clear();
            state.message = None;
        });
        if !started {
            return;
        }

        let outcome = self.service.search_by_name(&query).await;

        let published = self.publish_if_current(seq, |state| {
            state.loading = false;
            match outcome {
                Ok(meals) if meals.is_empty() => {
                    state.phase = SearchPhase::EmptyResult;
                    state.message = Some(EMPTY_RESULT_MESSAGE.to_string());
                }
                Ok(meals) => {
                    state.phase = SearchPhase::Succeeded;
                    state.results = meals;
                }
                Err(e) => {
                    tracing::error!("Recipe search for '{}' failed: {}", query, e);
                    state.phase = SearchPhase::Failed;
                    state.message = Some(SEARCH_ERROR_MESSAGE.to_string());
                }
            }
        });
        if !published {
            tracing::debug!("Discarding stale results for '{}'", query);
        }
    }
}

/// Coordinates search input with the recipe service.
///
/// Must be used from within a Tokio runtime.
pub struct SearchCoordinator<S> {
    shared: Arc<Shared<S>>,
    settings: SearchSettings,
    input: Mutex<Input>,
}

impl<S: RecipeService + 'static> SearchCoordinator<S> {
    pub fn new(service: Arc<S>) -> Self {
        Self::with_settings(service, SearchSettings::default())
    }

    pub fn with_settings(service: Arc<S>, settings: SearchSettings) -> Self {
        let (state, _) = watch::channel(SearchState::default());
        Self {
            shared: Arc::new(Shared {
                service,
                state,
                latest: AtomicU64::new(0),
            }),
            settings,
            input: Mutex::new(Input {
                query: String::new(),
                focused: false,
                timer: None,
            }),
        }
    }

    pub fn settings(&self) -> SearchSettings {
        self.settings
    }

    /// Records a change of the search text.
    pub fn set_query(&self, text: &str) {
        let mut input = self.lock_input();
        if input.query == text {
            return;
        }
        input.query = text.to_string();
        self.reschedule(&mut input);
    }

    /// Records focus changes of the search input. Searches only run while
    /// the input has focus; losing focus cancels a pending timer.
    pub fn set_focused(&self, focused: bool) {
        let mut input = self.lock_input();
        if input.focused == focused {
            return;
        }
        input.focused = focused;
        self.reschedule(&mut input);
    }

    pub fn clear(&self) {
        self.set_query("");
    }

    pub fn state(&self) -> SearchState {
        self.shared.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.shared.state.subscribe()
    }

    fn lock_input(&self) -> std::sync::MutexGuard<'_, Input> {
        self.input.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn next_seq(&self) -> u64 {
        self.shared.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn reschedule(&self, input: &mut Input) {
        if let Some(timer) = input.timer.take() {
            timer.abort();
        }

        let query = input.query.trim().to_string();

        if query.is_empty() {
            self.next_seq();
            self.shared.state.send_replace(SearchState::default());
            return;
        }

        if query.chars().count() < self.settings.min_query_chars {
            self.next_seq();
            self.shared.state.send_replace(SearchState {
                query,
                ..SearchState::default()
            });
            return;
        }

        if !input.focused {
            // The last fetch for this query stays valid; only a pending
            // timer is dropped.
            self.shared.state.send_if_modified(|state| {
                if state.phase != SearchPhase::Debouncing {
                    return false;
                }
                state.phase = SearchPhase::Idle;
                true
            });
            return;
        }

        let seq = self.next_seq();
        self.shared.state.send_modify(|state| {
            state.query = query.clone();
            state.phase = SearchPhase::Debouncing;
            state.loading = false;
        });

        let shared = Arc::clone(&self.shared);
        let delay = self.settings.debounce;
        input.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The fetch runs as its own task so later edits, which abort
            // this timer, never cancel a request already on the wire.
            tokio::spawn(async move { shared.fetch(seq, query).await });
        }));
    }
}

impl<S> Drop for SearchCoordinator<S> {
    fn drop(&mut self) {
        if let Ok(mut input) = self.input.lock() {
            if let Some(timer) = input.timer.take() {
                timer.abort();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, MealPreview, RawIngredient};
    use crate::service::ServiceError;
    use async_trait::async_trait;
    use std::collections::HashMap;

    #[derive(Clone, Copy)]
    enum Reply {
        Meals(usize),
        Empty,
        Fail,
    }

    /// Records search calls and answers from a per-query script.
    #[derive(Default)]
    struct ScriptedService {
        calls: Mutex<Vec<String>>,
        replies: HashMap<String, (Duration, Reply)>,
    }

    impl ScriptedService {
        fn with(mut self, query: &str, delay_ms: u64, reply: Reply) -> Self {
            self.replies
                .insert(query.to_string(), (Duration::from_millis(delay_ms), reply));
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RecipeService for ScriptedService {
        async fn search_by_name(&self, query: &str) -> Result<Vec<Meal>, ServiceError> {
            self.calls.lock().unwrap().push(query.to_string());
            let (delay, reply) = self
                .replies
                .get(query)
                .copied()
                .unwrap_or((Duration::ZERO, Reply::Meals(1)));
            tokio::time::sleep(delay).await;
            match reply {
                Reply::Meals(n) => Ok((0..n)
                    .map(|i| Meal::new(i.to_string(), format!("{} {}", query, i)))
                    .collect()),
                Reply::Empty => Ok(Vec::new()),
                Reply::Fail => Err(ServiceError::Decode {
                    endpoint: "search.php",
                    message: "connection reset".to_string(),
                }),
            }
        }

        async fn list_categories(&self) -> Result<Vec<Category>, ServiceError> {
            Ok(Vec::new())
        }

        async fn list_by_category(&self, _: &str) -> Result<Vec<MealPreview>, ServiceError> {
            Ok(Vec::new())
        }

        async fn recipe_by_id(&self, _: &str) -> Result<Option<Meal>, ServiceError> {
            Ok(None)
        }

        async fn list_ingredients(&self) -> Result<Vec<RawIngredient>, ServiceError> {
            Ok(Vec::new())
        }
    }

    fn focused(service: &Arc<ScriptedService>) -> SearchCoordinator<ScriptedService> {
        let coordinator = SearchCoordinator::new(Arc::clone(service));
        coordinator.set_focused(true);
        coordinator
    }

    async fn advance(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_query_never_fetches() {
        let service = Arc::new(ScriptedService::default());
        let coordinator = focused(&service);

        coordinator.set_query("to");
        advance(2000).await;

        assert!(service.calls().is_empty());
        let state = coordinator.state();
        assert_eq!(state.phase, SearchPhase::Idle);
        assert!(state.results.is_empty());
        assert!(!state.loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_settled_query_fetches_once() {
        let service = Arc::new(ScriptedService::default());
        let coordinator = focused(&service);

        coordinator.set_query("tom");
        assert_eq!(coordinator.state().phase, SearchPhase::Debouncing);

        advance(499).await;
        assert!(service.calls().is_empty());

        advance(100).await;
        assert_eq!(service.calls(), vec!["tom"]);

        advance(2000).await;
        assert_eq!(service.calls(), vec!["tom"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_edits_fetch_only_latest() {
        let service = Arc::new(ScriptedService::default());
        let coordinator = focused(&service);

        coordinator.set_query("tom");
        advance(100).await;
        coordinator.set_query("toma");
        advance(1000).await;

        assert_eq!(service.calls(), vec!["toma"]);
        assert_eq!(coordinator.state().query, "toma");
    }

    #[tokio::test(start_paused = true)]
    async fn test_query_is_trimmed() {
        let service = Arc::new(ScriptedService::default());
        let coordinator = focused(&service);

        coordinator.set_query("  pie  ");
        advance(600).await;
        assert_eq!(service.calls(), vec!["pie"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_results_published() {
        let service = Arc::new(ScriptedService::default().with("chicken", 0, Reply::Meals(3)));
        let coordinator = focused(&service);

        coordinator.set_query("chicken");
        advance(600).await;

        let state = coordinator.state();
        assert_eq!(state.phase, SearchPhase::Succeeded);
        assert_eq!(state.results.len(), 3);
        assert!(!state.loading);
        assert!(state.message.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_while_fetching() {
        let service = Arc::new(ScriptedService::default().with("chicken", 300, Reply::Meals(1)));
        let coordinator = focused(&service);

        coordinator.set_query("chicken");
        advance(600).await;
        let state = coordinator.state();
        assert_eq!(state.phase, SearchPhase::Fetching);
        assert!(state.loading);

        advance(300).await;
        assert!(!coordinator.state().loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_result_is_not_an_error() {
        let service = Arc::new(ScriptedService::default().with("xyzzy", 0, Reply::Empty));
        let coordinator = focused(&service);

        coordinator.set_query("xyzzy");
        advance(600).await;

        let state = coordinator.state();
        assert_eq!(state.phase, SearchPhase::EmptyResult);
        assert_eq!(state.message.as_deref(), Some(EMPTY_RESULT_MESSAGE));
        assert!(!state.loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_publishes_generic_message() {
        let service = Arc::new(ScriptedService::default().with("soup", 0, Reply::Fail));
        let coordinator = focused(&service);

        coordinator.set_query("soup");
        advance(600).await;

        let state = coordinator.state();
        assert_eq!(state.phase, SearchPhase::Failed);
        assert_eq!(state.message.as_deref(), Some(SEARCH_ERROR_MESSAGE));
        assert!(!state.message.unwrap().contains("connection reset"));
        assert!(!state.loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_search_without_focus() {
        let service = Arc::new(ScriptedService::default());
        let coordinator = SearchCoordinator::new(Arc::clone(&service));

        coordinator.set_query("tomato");
        advance(1000).await;
        assert!(service.calls().is_empty());

        coordinator.set_focused(true);
        advance(600).await;
        assert_eq!(service.calls(), vec!["tomato"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blur_cancels_pending_timer() {
        let service = Arc::new(ScriptedService::default());
        let coordinator = focused(&service);

        coordinator.set_query("tomato");
        advance(200).await;
        coordinator.set_focused(false);
        advance(1000).await;

        assert!(service.calls().is_empty());
        assert_eq!(coordinator.state().phase, SearchPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clearing_query_resets_state() {
        let service = Arc::new(ScriptedService::default().with("beef", 0, Reply::Meals(2)));
        let coordinator = focused(&service);

        coordinator.set_query("beef");
        advance(600).await;
        assert_eq!(coordinator.state().results.len(), 2);

        coordinator.set_query("beef stew");
        coordinator.clear();
        advance(1000).await;

        assert_eq!(service.calls(), vec!["beef"]);
        assert_eq!(coordinator.state(), SearchState::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_response_is_discarded() {
        let service = Arc::new(
            ScriptedService::default()
                .with("tom", 1000, Reply::Meals(1))
                .with("tomato", 10, Reply::Meals(4)),
        );
        let coordinator = focused(&service);

        coordinator.set_query("tom");
        advance(600).await;
        assert_eq!(coordinator.state().phase, SearchPhase::Fetching);

        coordinator.set_query("tomato");
        advance(2000).await;

        assert_eq!(service.calls(), vec!["tom", "tomato"]);
        let state = coordinator.state();
        assert_eq!(state.query, "tomato");
        assert_eq!(state.phase, SearchPhase::Succeeded);
        assert_eq!(state.results.len(), 4);
        assert!(state.results.iter().all(|m| m.str_meal.starts_with("tomato")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribers_observe_outcome() {
        let service = Arc::new(ScriptedService::default().with("rice", 0, Reply::Meals(2)));
        let coordinator = focused(&service);
        let mut rx = coordinator.subscribe();

        coordinator.set_query("rice");
        let state = rx
            .wait_for(|s| s.phase.is_finished())
            .await
            .unwrap()
            .clone();
        assert_eq!(state.results.len(), 2);
    }

    #[test]
    fn test_default_settings() {
        let settings = SearchSettings::default();
        assert_eq!(settings.debounce, Duration::from_millis(500));
        assert_eq!(settings.min_query_chars, 3);
    }
}
