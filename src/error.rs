use crate::document::BlockKey;
use thiserror::Error;

/// Errors surfaced at the host/document boundary.
///
/// Interaction-path failures (stale block keys, degenerate selections) never
/// become errors: they degrade to no-ops because this code runs inline with
/// live user input. `EditorError` is reserved for host mutations that were
/// actually attempted and could not be applied.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("block {0} is not present in the document")]
    UnknownBlock(BlockKey),

    #[error("block {0} does not carry a data map")]
    BlockNotResizable(BlockKey),

    #[error("invalid block data: {0}")]
    InvalidBlockData(#[from] serde_json::Error),
}

/// Result type for host mutations.
pub type EditorResult<T> = Result<T, EditorError>;
