use thiserror::Error;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("selector `{selector}` was rejected: {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("local storage is unavailable")]
    StorageUnavailable,

    #[error("failed writing `{key}` to local storage: {reason}")]
    StorageWrite { key: String, reason: String },

    #[error("missing #{0} mount point")]
    MissingMountPoint(&'static str),

    #[error("invalid page config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("failed to initialise logger: {0}")]
    Logger(String),
}
