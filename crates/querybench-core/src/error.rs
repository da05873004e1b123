use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuerybenchError {
    #[error("process error: {0}")]
    Process(String),
    #[error("query timed out after {0}s")]
    Timeout(u64),
    #[error("engine unavailable: {0}")]
    Unavailable(String),
    #[error("unknown query: {0}")]
    UnknownQuery(String),
}
