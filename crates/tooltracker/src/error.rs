#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("TOOLTRACKER_API_BASE_URL is not set; pass --api-base-url or export the variable")]
    MissingBaseUrl,

    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Failed to build HTTP client: {0}")]
    InvalidClientConfig(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

