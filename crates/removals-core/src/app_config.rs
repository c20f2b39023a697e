#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Which mapping capability produces the journey distance and duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceStrategy {
    /// `POST /distance` with origin and destination only.
    Matrix,
    /// A routing collaborator that resolves the full route, extra stops included,
    /// and reports back through a callback.
    Directions,
}

impl std::fmt::Display for DistanceStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DistanceStrategy::Matrix => write!(f, "matrix"),
            DistanceStrategy::Directions => write!(f, "directions"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub env: Environment,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub autocomplete_debounce_ms: u64,
    pub selection_suppress_ms: u64,
    pub distance_strategy: DistanceStrategy,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("api_base_url", &self.api_base_url)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("autocomplete_debounce_ms", &self.autocomplete_debounce_ms)
            .field("selection_suppress_ms", &self.selection_suppress_ms)
            .field("distance_strategy", &self.distance_strategy)
            .finish()
    }
}
