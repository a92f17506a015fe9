//! Dashboard state machine.
//!
//! [`ViewState`] is a pure reducer: the shell performs the fetches and feeds the
//! outcomes back in. It moves `Initializing -> Loaded` exactly once and stays in
//! `Loaded` for every later filter change.
//!
//! Every tool list request carries a [`FilterTicket`] with a monotonically increasing
//! sequence number. Only the result of the most recently issued ticket is applied, so
//! overlapping filter fetches cannot overwrite a newer selection with an older one.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt::Display;

use crate::catalog::{Category, Stats, Tool};
use crate::filter::{FilterSelection, ToolQuery};

/// Number of trending tools shown on the overview.
pub const TRENDING_PREVIEW: usize = 6;

/// Result of a degrading fetch: the value is always usable, the tag says whether it
/// came from the server or is a substituted default.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    Fresh(T),
    Fallback { value: T, error: String },
}

impl<T> FetchOutcome<T> {
    pub fn from_result<E: Display>(result: Result<T, E>, fallback: impl FnOnce() -> T) -> Self {
        match result {
            Ok(value) => FetchOutcome::Fresh(value),
            Err(err) => FetchOutcome::Fallback {
                value: fallback(),
                error: err.to_string(),
            },
        }
    }

    pub fn value(&self) -> &T {
        match self {
            FetchOutcome::Fresh(value) => value,
            FetchOutcome::Fallback { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        self.into_parts().0
    }

    pub fn into_parts(self) -> (T, Option<String>) {
        match self {
            FetchOutcome::Fresh(value) => (value, None),
            FetchOutcome::Fallback { value, error } => (value, Some(error)),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, FetchOutcome::Fallback { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchOutcome::Fresh(_) => None,
            FetchOutcome::Fallback { error, .. } => Some(error),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchOutcome<U> {
        match self {
            FetchOutcome::Fresh(value) => FetchOutcome::Fresh(f(value)),
            FetchOutcome::Fallback { value, error } => FetchOutcome::Fallback {
                value: f(value),
                error,
            },
        }
    }
}

impl<T: Default> FetchOutcome<T> {
    pub fn fallback(error: impl Into<String>) -> Self {
        FetchOutcome::Fallback {
            value: T::default(),
            error: error.into(),
        }
    }
}

/// The four independently fetched data sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Tools,
    Trending,
    Stats,
    Categories,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Initializing,
    Loaded,
}

/// A sequenced tool list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterTicket {
    pub seq: u64,
    pub query: ToolQuery,
}

/// Outcomes of the initial concurrent fetch.
#[derive(Debug, Clone)]
pub struct InitialLoad {
    pub tools: FetchOutcome<Vec<Tool>>,
    pub trending: FetchOutcome<Vec<Tool>>,
    pub stats: FetchOutcome<Stats>,
    pub categories: FetchOutcome<Vec<Category>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolsApplied {
    Applied,
    Stale,
}

/// What the tool list section should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolListStatus {
    Populated(usize),
    NoMatches,
    Unavailable,
}

#[derive(Debug, Clone, Serialize)]
pub struct ViewState {
    phase: Phase,
    loading: bool,
    tools: Vec<Tool>,
    trending_tools: Vec<Tool>,
    stats: Stats,
    categories: Vec<Category>,
    filters: FilterSelection,
    failures: BTreeSet<Section>,
    #[serde(skip)]
    last_issued: u64,
    #[serde(skip)]
    last_applied: u64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Initializing,
            loading: true,
            tools: Vec::new(),
            trending_tools: Vec::new(),
            stats: Stats::default(),
            categories: Vec::new(),
            filters: FilterSelection::default(),
            failures: BTreeSet::new(),
            last_issued: 0,
            last_applied: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    pub fn trending_tools(&self) -> &[Tool] {
        &self.trending_tools
    }

    pub fn trending_preview(&self) -> &[Tool] {
        let end = self.trending_tools.len().min(TRENDING_PREVIEW);
        &self.trending_tools[..end]
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn filters(&self) -> &FilterSelection {
        &self.filters
    }

    pub fn has_active_filters(&self) -> bool {
        !self.filters.is_empty()
    }

    pub fn failed(&self, section: Section) -> bool {
        self.failures.contains(&section)
    }

    pub fn failures(&self) -> impl Iterator<Item = Section> + '_ {
        self.failures.iter().copied()
    }

    pub fn latest_seq(&self) -> u64 {
        self.last_issued
    }

    /// True when a tool list request newer than the displayed list is outstanding.
    pub fn awaiting_tools(&self) -> bool {
        self.last_applied < self.last_issued
    }

    pub fn is_stale(&self, seq: u64) -> bool {
        seq < self.last_issued
    }

    pub fn tool_list_status(&self) -> ToolListStatus {
        if !self.tools.is_empty() {
            ToolListStatus::Populated(self.tools.len())
        } else if self.failed(Section::Tools) {
            ToolListStatus::Unavailable
        } else {
            ToolListStatus::NoMatches
        }
    }

    /// Start the initial load. Returns the ticket for the tool list fetch, or `None`
    /// once the dashboard has left `Initializing`.
    pub fn begin_initial(&mut self) -> Option<FilterTicket> {
        if self.phase != Phase::Initializing {
            return None;
        }
        Some(self.issue_ticket())
    }

    /// Apply the settled initial fetch and move to `Loaded`.
    pub fn apply_initial(&mut self, ticket: &FilterTicket, load: InitialLoad) {
        self.apply_tools(ticket.seq, load.tools);

        let (trending, trending_error) = load.trending.into_parts();
        self.trending_tools = trending;
        self.mark(Section::Trending, trending_error.is_some());

        let (stats, stats_error) = load.stats.into_parts();
        self.stats = stats;
        self.mark(Section::Stats, stats_error.is_some());

        let (categories, categories_error) = load.categories.into_parts();
        self.categories = categories;
        self.mark(Section::Categories, categories_error.is_some());

        self.phase = Phase::Loaded;
        self.loading = false;
    }

    /// Select a category (empty clears it). Returns a ticket when the selection changed.
    pub fn set_category(&mut self, name: impl Into<String>) -> Option<FilterTicket> {
        let name = name.into();
        if self.filters.category == name {
            return None;
        }
        self.filters.category = name;
        Some(self.issue_ticket())
    }

    /// Select a pricing tier (empty clears it). Returns a ticket when the selection changed.
    pub fn set_pricing(&mut self, tier: impl Into<String>) -> Option<FilterTicket> {
        let tier = tier.into();
        if self.filters.pricing == tier {
            return None;
        }
        self.filters.pricing = tier;
        Some(self.issue_ticket())
    }

    /// Reset both filters in a single transition.
    pub fn clear_filters(&mut self) -> Option<FilterTicket> {
        if self.filters.is_empty() {
            return None;
        }
        self.filters = FilterSelection::default();
        Some(self.issue_ticket())
    }

    /// Replace the tool list with a resolved fetch, unless a newer ticket was issued.
    pub fn apply_tools(&mut self, seq: u64, outcome: FetchOutcome<Vec<Tool>>) -> ToolsApplied {
        if self.is_stale(seq) {
            return ToolsApplied::Stale;
        }

        let (tools, error) = outcome.into_parts();
        self.tools = tools;
        self.mark(Section::Tools, error.is_some());
        self.last_applied = seq;

        ToolsApplied::Applied
    }

    fn issue_ticket(&mut self) -> FilterTicket {
        self.last_issued += 1;
        FilterTicket {
            seq: self.last_issued,
            query: ToolQuery::from_selection(&self.filters),
        }
    }

    fn mark(&mut self, section: Section, failed: bool) {
        if failed {
            self.failures.insert(section);
        } else {
            self.failures.remove(&section);
        }
    }
}
