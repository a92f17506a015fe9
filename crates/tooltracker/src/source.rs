use async_trait::async_trait;
use tooltracker_core::catalog::{Category, Stats, Tool};
use tooltracker_core::dashboard::FetchOutcome;
use tooltracker_core::filter::ToolQuery;

/// Read-only access to the tool catalog.
///
/// Every operation settles to a usable value. Failures come back as
/// [`FetchOutcome::Fallback`] carrying the documented default, never as an error, so
/// the dashboard can always render.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn list_tools(&self, query: &ToolQuery) -> FetchOutcome<Vec<Tool>>;

    async fn list_trending_tools(&self) -> FetchOutcome<Vec<Tool>>;

    async fn get_stats(&self) -> FetchOutcome<Stats>;

    async fn list_categories(&self) -> FetchOutcome<Vec<Category>>;
}
