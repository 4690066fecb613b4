use thiserror::Error;
use tokio::task::JoinError;

/// Unrecoverable engine failures.
///
/// Per-record problems never appear here; those are collected as values in
/// the validation result. Anything in this enum means the run cannot
/// produce analytics and is reported with a `failure` status.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Input document is not a well-formed batch: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Failed to read input file [{path}]: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Analytics stage [{stage}] did not complete: {source}")]
    StageJoin {
        stage: &'static str,
        #[source]
        source: JoinError,
    },
}

impl EngineError {
    pub fn io(path: &str, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_string(),
            source,
        }
    }

    pub fn stage_join(stage: &'static str, source: JoinError) -> Self {
        Self::StageJoin { stage, source }
    }
}
