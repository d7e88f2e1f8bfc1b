use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum JobscopeError {
    #[error("invalid job info: {0}")]
    InvalidJobInfo(#[from] serde_json::Error),

    #[error("failed to read config file {}: {source}", .path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {origin}: {source}")]
    ConfigParse {
        origin: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid config value for {key}: {message}")]
    InvalidConfig { key: &'static str, message: String },

    #[error("reload failed: {0}")]
    Reload(String),
}
