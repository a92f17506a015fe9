//! Filter semantics for the tool list.
//!
//! A [`FilterSelection`] is what the user picked; a [`ToolQuery`] is what goes over the
//! wire. Empty strings mean "no constraint" on that dimension.

use serde::{Deserialize, Serialize};

use crate::catalog::{Pricing, Tool};

/// Pricing choices offered by the filter bar. `all` clears the pricing filter.
pub const PRICING_OPTIONS: [&str; 4] = ["all", "free", "freemium", "paid"];

/// The user's current category/pricing narrowing criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub category: String,
    pub pricing: String,
}

impl FilterSelection {
    pub fn new(category: impl Into<String>, pricing: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            pricing: pricing.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.category.is_empty() && self.pricing.is_empty()
    }

    /// `category` is an exact match, `pricing` a case-insensitive exact match.
    pub fn matches(&self, tool: &Tool) -> bool {
        let category_ok = self.category.is_empty()
            || tool.category.as_deref() == Some(self.category.as_str());

        let pricing_ok = self.pricing.is_empty()
            || tool
                .pricing
                .as_ref()
                .is_some_and(|pricing| pricing.matches(&self.pricing));

        category_ok && pricing_ok
    }
}

/// Map a filter bar pricing option to the selection value (`all` becomes empty).
/// Known tiers are lowercased; unknown tiers pass through trimmed.
pub fn pricing_option_to_selection(option: &str) -> String {
    let option = option.trim();
    if option.eq_ignore_ascii_case("all") {
        return String::new();
    }
    match Pricing::parse(option) {
        Pricing::Other(other) => other,
        known => known.as_str().to_string(),
    }
}

/// Parameters of a tool list request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolQuery {
    pub category: Option<String>,
    pub pricing: Option<String>,
    pub limit: Option<usize>,
}

impl ToolQuery {
    pub fn from_selection(selection: &FilterSelection) -> Self {
        Self {
            category: non_empty(&selection.category),
            pricing: non_empty(&selection.pricing),
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit.filter(|l| *l > 0);
        self
    }

    pub fn selection(&self) -> FilterSelection {
        FilterSelection {
            category: self.category.clone().unwrap_or_default(),
            pricing: self.pricing.clone().unwrap_or_default(),
        }
    }

    /// Query string pairs, omitting anything empty.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(category) = self.category.as_deref().and_then(non_empty) {
            pairs.push(("category", category));
        }
        if let Some(pricing) = self.pricing.as_deref().and_then(non_empty) {
            pairs.push(("pricing", pricing));
        }
        if let Some(limit) = self.limit.filter(|l| *l > 0) {
            pairs.push(("limit", limit.to_string()));
        }

        pairs
    }

    /// A request with no filters and no limit.
    pub fn unfiltered() -> Self {
        Self::default()
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Order-preserving subset of `tools` matching `selection`.
pub fn filter_tools(tools: &[Tool], selection: &FilterSelection) -> Vec<Tool> {
    tools
        .iter()
        .filter(|tool| selection.matches(tool))
        .cloned()
        .collect()
}

/// Apply a full query locally: filter, then truncate to `limit`.
pub fn apply_query(tools: Vec<Tool>, query: &ToolQuery) -> Vec<Tool> {
    let selection = query.selection();
    let mut filtered: Vec<Tool> = if selection.is_empty() {
        tools
    } else {
        tools
            .into_iter()
            .filter(|tool| selection.matches(tool))
            .collect()
    };

    if let Some(limit) = query.limit.filter(|l| *l > 0) {
        filtered.truncate(limit);
    }

    filtered
}
