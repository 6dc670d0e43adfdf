//! Debounced search session for one search box.
//!
//! Phases: `Idle` (empty query, local list) → `Debouncing` (keystroke within
//! the debounce window, previous list kept) → `Searching` (one remote request
//! for the settled query) → `Resolved` (remote hits, or empty plus a notice
//! on failure). Every request is tagged with the generation current when the
//! query was typed; a response whose tag is no longer current is dropped.
//!
//! Company/role filters are applied through `filter::apply_filters` on
//! whichever base list is active.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;

use crate::models::InterviewListing;
use crate::services::filter::{self, FilterOptions, FilterSelection};
use crate::utils::{AppError, CompanyKey};

pub const DEBOUNCE: Duration = Duration::from_millis(300);
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const REMOTE_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    pub debounce: Duration,
    pub request_timeout: Duration,
    pub cache_ttl: Duration,
    pub company_key: CompanyKey,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce: DEBOUNCE,
            request_timeout: REQUEST_TIMEOUT,
            cache_ttl: REMOTE_CACHE_TTL,
            company_key: CompanyKey::default(),
        }
    }
}

/// Remote full-text search (`GET /search?q=`).
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<InterviewListing>, AppError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    Debouncing,
    Searching,
    Resolved,
}

/// Non-blocking, user-visible message (rendered as a toast).
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub title: String,
    pub description: String,
}

impl Notice {
    fn search_failed(err: &AppError) -> Self {
        Notice {
            title: "Search failed".to_string(),
            description: format!("Showing no results. {}", err),
        }
    }
}

/// What the search box currently renders.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchView {
    pub phase: SearchPhase,
    pub query: String,
    pub items: Vec<InterviewListing>,
    pub options: FilterOptions,
    pub notice: Option<Notice>,
}

struct SessionState {
    generation: u64,
    query: String,
    phase: SearchPhase,
    local: Vec<InterviewListing>,
    base: Vec<InterviewListing>,
    selection: FilterSelection,
    notice: Option<Notice>,
}

impl SessionState {
    fn view(&self, key: CompanyKey) -> SearchView {
        SearchView {
            phase: self.phase,
            query: self.query.clone(),
            items: filter::apply_filters(&self.base, &self.selection, key),
            options: filter::filter_options(&self.base),
            notice: self.notice.clone(),
        }
    }
}

pub struct SearchSession {
    backend: Arc<dyn SearchBackend>,
    config: SearchConfig,
    state: Arc<Mutex<SessionState>>,
    view_tx: Arc<watch::Sender<SearchView>>,
}

impl SearchSession {
    pub fn new(
        backend: Arc<dyn SearchBackend>,
        local: Vec<InterviewListing>,
        config: SearchConfig,
    ) -> Self {
        let state = SessionState {
            generation: 0,
            query: String::new(),
            phase: SearchPhase::Idle,
            base: local.clone(),
            local,
            selection: FilterSelection::default(),
            notice: None,
        };
        let (view_tx, _) = watch::channel(state.view(config.company_key));
        Self {
            backend,
            config,
            state: Arc::new(Mutex::new(state)),
            view_tx: Arc::new(view_tx),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchView> {
        self.view_tx.subscribe()
    }

    pub fn view(&self) -> SearchView {
        self.view_tx.borrow().clone()
    }

    /// Feeds the latest text of the search box. Must be called from within a
    /// tokio runtime.
    pub fn set_query(&self, query: &str) {
        let generation = {
            let mut st = lock(&self.state);
            st.generation += 1;
            st.query = query.to_string();

            if query.trim().is_empty() {
                st.phase = SearchPhase::Idle;
                st.base = st.local.clone();
                st.notice = None;
                publish(&st, &self.view_tx, self.config.company_key);
                return;
            }

            st.phase = SearchPhase::Debouncing;
            publish(&st, &self.view_tx, self.config.company_key);
            st.generation
        };

        tokio::spawn(run_search(
            self.backend.clone(),
            self.state.clone(),
            self.view_tx.clone(),
            self.config,
            generation,
            query.trim().to_string(),
        ));
    }

    pub fn set_filters(&self, selection: FilterSelection) {
        let mut st = lock(&self.state);
        st.selection = selection;
        publish(&st, &self.view_tx, self.config.company_key);
    }

    /// Replaces the locally aggregated list (e.g. after a store refetch).
    pub fn set_local(&self, local: Vec<InterviewListing>) {
        let mut st = lock(&self.state);
        st.local = local;
        if st.phase == SearchPhase::Idle {
            st.base = st.local.clone();
            publish(&st, &self.view_tx, self.config.company_key);
        }
    }
}

async fn run_search(
    backend: Arc<dyn SearchBackend>,
    state: Arc<Mutex<SessionState>>,
    view_tx: Arc<watch::Sender<SearchView>>,
    config: SearchConfig,
    generation: u64,
    query: String,
) {
    tokio::time::sleep(config.debounce).await;

    {
        let mut st = lock(&state);
        if st.generation != generation {
            // another keystroke landed inside the window
            return;
        }
        st.phase = SearchPhase::Searching;
        publish(&st, &view_tx, config.company_key);
    }

    log::debug!("🔍 Searching for '{}' (generation {})", query, generation);

    let outcome = match tokio::time::timeout(config.request_timeout, backend.search(&query)).await {
        Ok(result) => result,
        Err(_) => Err(AppError::Timeout(format!(
            "search for '{}' exceeded {:?}",
            query, config.request_timeout
        ))),
    };

    let mut st = lock(&state);
    if st.generation != generation {
        log::debug!(
            "Discarding stale results for '{}' (generation {}, current {})",
            query,
            generation,
            st.generation
        );
        return;
    }

    match outcome {
        Ok(hits) => {
            log::debug!("✅ {} results for '{}'", hits.len(), query);
            st.base = hits;
            st.notice = None;
        }
        Err(e) => {
            log::warn!("⚠️ Search for '{}' failed: {}", query, e);
            st.base = Vec::new();
            st.notice = Some(Notice::search_failed(&e));
        }
    }
    st.phase = SearchPhase::Resolved;
    publish(&st, &view_tx, config.company_key);
}

fn lock(state: &Mutex<SessionState>) -> MutexGuard<'_, SessionState> {
    match state.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn publish(st: &SessionState, tx: &watch::Sender<SearchView>, key: CompanyKey) {
    tx.send_replace(st.view(key));
}
