//! HTTP client for the AI Tool Tracker API.
//!
//! The `fetch_*` methods are the fallible primitives used by single-shot commands.
//! The [`CatalogSource`] implementation wraps them so that dashboard reads never fail:
//! errors are logged and replaced by the documented default for that data set.

use crate::config::{ApiConfig, FilterMode};
use crate::prelude::Error;
use crate::source::CatalogSource;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tooltracker_core::catalog::{
    normalize_categories, normalize_stats, normalize_tools, ApiHealth, Category, RawCategory,
    RawStats, RawTool, Stats, Tool,
};
use tooltracker_core::dashboard::FetchOutcome;
use tooltracker_core::filter::{apply_query, ToolQuery};

const TOOLS_PATH: &str = "/api/tools";
const TRENDING_PATH: &str = "/api/tools/trending";
const STATS_PATH: &str = "/api/stats";
const CATEGORIES_PATH: &str = "/api/categories";
const HEALTH_PATH: &str = "/";

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    api_root: String,
    filter_mode: FilterMode,
}

/// Validate the global options and build a client. Fails before any request is made
/// when the base URL is missing or malformed.
pub fn connect(global: &crate::Global) -> Result<ApiClient, Error> {
    let config = ApiConfig::from_global(global)?;
    ApiClient::new(&config)
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, Error> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("tooltracker/", env!("CARGO_PKG_VERSION")));

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let http = builder
            .build()
            .map_err(|e| Error::InvalidClientConfig(e.to_string()))?;

        Ok(Self {
            http,
            api_root: config.api_root().to_string(),
            filter_mode: config.filter_mode,
        })
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    pub fn filter_mode(&self) -> FilterMode {
        self.filter_mode
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.api_root)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.endpoint(path);
        log::debug!("GET {url} {query:?}");

        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| Error::Network(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                url,
            });
        }

        response.json::<T>().await.map_err(|e| {
            if e.is_decode() {
                Error::Decode(format!("{url}: {e}"))
            } else {
                Error::Network(format!("{url}: {e}"))
            }
        })
    }

    /// Fetch the tool list, filtered on the server or locally depending on the
    /// configured [`FilterMode`].
    pub async fn fetch_tools(&self, query: &ToolQuery) -> Result<Vec<Tool>, Error> {
        match self.filter_mode {
            FilterMode::Server => {
                let raw: Vec<RawTool> = self.get_json(TOOLS_PATH, &query.to_query_pairs()).await?;
                Ok(normalize_tools(raw))
            }
            FilterMode::Client => {
                let raw: Vec<RawTool> = self.get_json(TOOLS_PATH, &[]).await?;
                Ok(apply_query(normalize_tools(raw), query))
            }
        }
    }

    pub async fn fetch_trending(&self) -> Result<Vec<Tool>, Error> {
        let raw: Vec<RawTool> = self.get_json(TRENDING_PATH, &[]).await?;
        Ok(normalize_tools(raw))
    }

    pub async fn fetch_stats(&self) -> Result<Stats, Error> {
        let raw: RawStats = self.get_json(STATS_PATH, &[]).await?;
        Ok(normalize_stats(raw))
    }

    pub async fn fetch_categories(&self) -> Result<Vec<Category>, Error> {
        let raw: Vec<RawCategory> = self.get_json(CATEGORIES_PATH, &[]).await?;
        Ok(normalize_categories(raw))
    }

    /// Fetch a single tool. A 404 is `Ok(None)`.
    pub async fn fetch_tool(&self, id: u64) -> Result<Option<Tool>, Error> {
        let path = format!("{TOOLS_PATH}/{id}");
        match self.get_json::<RawTool>(&path, &[]).await {
            Ok(raw) => Ok(normalize_tools(vec![raw]).into_iter().next()),
            Err(Error::Http { status: 404, .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }

    pub async fn health(&self) -> Result<ApiHealth, Error> {
        self.get_json(HEALTH_PATH, &[]).await
    }
}

/// Turn a failed read into its default value, keeping the error for the caller.
fn degrade<T: Default>(what: &str, result: Result<T, Error>) -> FetchOutcome<T> {
    if let Err(err) = &result {
        log::warn!("Failed to fetch {what}: {err}");
    }
    FetchOutcome::from_result(result, T::default)
}

#[async_trait]
impl CatalogSource for ApiClient {
    async fn list_tools(&self, query: &ToolQuery) -> FetchOutcome<Vec<Tool>> {
        degrade("tools", self.fetch_tools(query).await)
    }

    async fn list_trending_tools(&self) -> FetchOutcome<Vec<Tool>> {
        degrade("trending tools", self.fetch_trending().await)
    }

    async fn get_stats(&self) -> FetchOutcome<Stats> {
        degrade("stats", self.fetch_stats().await)
    }

    async fn list_categories(&self) -> FetchOutcome<Vec<Category>> {
        degrade("categories", self.fetch_categories().await)
    }
}
