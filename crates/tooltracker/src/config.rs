use crate::prelude::*;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where category/pricing filters are applied.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Send filters as query parameters and let the API narrow the list
    #[default]
    Server,
    /// Fetch the unfiltered list and narrow it locally
    Client,
}

/// API connection settings, validated once at startup.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: Url,
    pub timeout: Option<Duration>,
    pub filter_mode: FilterMode,
}

impl ApiConfig {
    /// Build a configuration from an optional base URL. A missing or blank URL is
    /// an error: nothing can be fetched without it.
    pub fn new(base_url: Option<&str>) -> Result<Self, Error> {
        let raw = base_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(Error::MissingBaseUrl)?;

        Ok(Self {
            base_url: parse_base_url(raw)?,
            timeout: None,
            filter_mode: FilterMode::default(),
        })
    }

    /// Load configuration from the global CLI options (which clap already merged with
    /// the environment).
    pub fn from_global(global: &crate::Global) -> Result<Self, Error> {
        Ok(Self::new(global.api_base_url.as_deref())?
            .with_timeout(global.timeout_secs.map(Duration::from_secs))
            .with_filter_mode(global.filter_mode))
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout.filter(|t| !t.is_zero());
        self
    }

    pub fn with_filter_mode(mut self, filter_mode: FilterMode) -> Self {
        self.filter_mode = filter_mode;
        self
    }

    /// Base URL without a trailing slash, ready to have API paths appended.
    pub fn api_root(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }
}

fn parse_base_url(raw: &str) -> Result<Url, Error> {
    let url = Url::parse(raw).map_err(|e| Error::InvalidBaseUrl(format!("{raw}: {e}")))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(Error::InvalidBaseUrl(format!(
                "{raw}: unsupported scheme '{scheme}'"
            )))
        }
    }

    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(Error::InvalidBaseUrl(format!("{raw}: missing host")));
    }

    if url.query().is_some() || url.fragment().is_some() {
        return Err(Error::InvalidBaseUrl(format!(
            "{raw}: query strings and fragments are not allowed"
        )));
    }

    Ok(url)
}
