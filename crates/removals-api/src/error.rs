use thiserror::Error;

/// Errors returned by the removals backend client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// A success response lacked a value the caller depends on, such as the
    /// booking reference of a newly created order.
    #[error("response from {context} is missing {field}")]
    MissingField {
        context: String,
        field: &'static str,
    },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
