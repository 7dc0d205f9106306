//! Error types shared by the player core.

use std::path::PathBuf;

/// Result type alias for player operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failures that reach the controller or presentation boundary.
///
/// Parsing and formatting problems never show up here: malformed status
/// lines and missing progress data degrade to default values instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The decoder process exited or its command channel closed
    #[error("decoder process is unavailable")]
    ProcessUnavailable,

    /// The station kept returning empty batches
    #[error("station returned no tracks after {attempts} attempts")]
    ProviderExhausted { attempts: u32 },

    /// The station failed to produce a batch
    #[error("station error: {0}")]
    Provider(String),

    /// Spawning or talking to the decoder failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file exists but cannot be parsed
    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
