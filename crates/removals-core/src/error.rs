use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read booking draft {path}: {source}")]
    DraftIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse booking draft: {0}")]
    DraftParse(#[from] serde_yaml::Error),
}
