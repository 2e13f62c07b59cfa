use thiserror::Error;

/// Batch-level failures. Per-message and per-member lookup failures never
/// surface here; they are logged and the item is dropped.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to fetch channel history: {0}")]
    History(village_slack::Error),

    #[error("failed to fetch channel members: {0}")]
    Members(village_slack::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
