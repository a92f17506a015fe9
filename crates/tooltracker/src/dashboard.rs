//! Dashboard controller.
//!
//! Drives the [`ViewState`] reducer from `tooltracker_core`: one concurrent load of all
//! four data sets on mount, then an independent tool list fetch per filter change.
//! Filter fetches run as tasks in a `JoinSet` and are applied as they are joined, so the
//! state itself is only ever touched by whoever owns the `Dashboard`.

use crate::source::CatalogSource;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::{self, JoinError, JoinSet};
use tooltracker_core::catalog::Tool;
use tooltracker_core::dashboard::{FetchOutcome, FilterTicket, InitialLoad, ToolsApplied, ViewState};

#[derive(Debug)]
struct ResolvedTools {
    seq: u64,
    outcome: FetchOutcome<Vec<Tool>>,
}

pub struct Dashboard<S> {
    source: Arc<S>,
    state: ViewState,
    fetches: JoinSet<ResolvedTools>,
    fetch_seqs: HashMap<task::Id, u64>,
}

impl<S: CatalogSource + 'static> Dashboard<S> {
    pub fn new(source: S) -> Self {
        Self::with_source(Arc::new(source))
    }

    pub fn with_source(source: Arc<S>) -> Self {
        Self {
            source,
            state: ViewState::new(),
            fetches: JoinSet::new(),
            fetch_seqs: HashMap::new(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Number of filter fetches that have not been joined yet.
    pub fn in_flight(&self) -> usize {
        self.fetches.len()
    }

    /// Initial load: fetch tools, trending, stats and categories concurrently and wait
    /// for all four to settle. Only the first call does anything.
    pub async fn mount(&mut self) {
        let Some(ticket) = self.state.begin_initial() else {
            log::debug!("Dashboard already mounted");
            return;
        };

        let source = Arc::clone(&self.source);
        let (tools, trending, stats, categories) = futures::join!(
            source.list_tools(&ticket.query),
            source.list_trending_tools(),
            source.get_stats(),
            source.list_categories(),
        );

        self.state.apply_initial(
            &ticket,
            InitialLoad {
                tools,
                trending,
                stats,
                categories,
            },
        );

        // Filter changes made while loading may already have resolved.
        self.apply_ready();
    }

    /// Select a category, empty to clear. Returns `true` if a fetch was issued.
    pub fn set_category(&mut self, name: impl Into<String>) -> bool {
        let ticket = self.state.set_category(name);
        self.dispatch(ticket)
    }

    /// Select a pricing tier, empty to clear. Returns `true` if a fetch was issued.
    pub fn set_pricing(&mut self, tier: impl Into<String>) -> bool {
        let ticket = self.state.set_pricing(tier);
        self.dispatch(ticket)
    }

    /// Clear both filters at once. Returns `true` if a fetch was issued.
    pub fn clear_filters(&mut self) -> bool {
        let ticket = self.state.clear_filters();
        self.dispatch(ticket)
    }

    fn dispatch(&mut self, ticket: Option<FilterTicket>) -> bool {
        let Some(ticket) = ticket else {
            return false;
        };

        log::debug!("Fetching tools for {:?} (seq {})", ticket.query, ticket.seq);

        let source = Arc::clone(&self.source);
        let handle = self.fetches.spawn(async move {
            let outcome = source.list_tools(&ticket.query).await;
            ResolvedTools {
                seq: ticket.seq,
                outcome,
            }
        });
        self.fetch_seqs.insert(handle.id(), ticket.seq);

        true
    }

    /// Wait for the next filter fetch to finish and apply it. Never resolves while
    /// nothing is in flight.
    pub async fn next_update(&mut self) -> ToolsApplied {
        match self.fetches.join_next_with_id().await {
            Some(joined) => self.finish(joined),
            None => std::future::pending().await,
        }
    }

    /// Apply every fetch that has already finished, without waiting.
    pub fn apply_ready(&mut self) -> usize {
        let mut applied = 0;
        while let Some(joined) = self.fetches.try_join_next_with_id() {
            if self.finish(joined) == ToolsApplied::Applied {
                applied += 1;
            }
        }
        applied
    }

    /// Wait until every issued filter fetch has finished, including ones that panicked.
    pub async fn settle(&mut self) {
        while self.in_flight() > 0 {
            self.next_update().await;
        }
    }

    fn finish(&mut self, joined: Result<(task::Id, ResolvedTools), JoinError>) -> ToolsApplied {
        let resolved = match joined {
            Ok((id, resolved)) => {
                self.fetch_seqs.remove(&id);
                resolved
            }
            Err(err) => {
                let seq = self.fetch_seqs.remove(&err.id()).unwrap_or(0);
                log::warn!("Tool list fetch (seq {seq}) did not complete: {err}");
                ResolvedTools {
                    seq,
                    outcome: FetchOutcome::fallback(format!("fetch task failed: {err}")),
                }
            }
        };
        self.apply(resolved)
    }

    fn apply(&mut self, resolved: ResolvedTools) -> ToolsApplied {
        let applied = self.state.apply_tools(resolved.seq, resolved.outcome);
        if applied == ToolsApplied::Stale {
            log::debug!(
                "Discarding stale tool list (seq {}, latest {})",
                resolved.seq,
                self.state.latest_seq()
            );
        }
        applied
    }
}
