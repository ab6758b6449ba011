use async_trait::async_trait;

/// Loose field-edit payload handed to per-card batch callbacks — the shape
/// a JSON record store takes for a partial update.
pub type FieldUpdates = serde_json::Map<String, serde_json::Value>;

/// Error surfaced by a record store or batch callback.
///
/// The engine collapses these to a failed outcome at its public boundary;
/// the variants exist so the log line says which kind of failure it was.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store rejected the update: {0}")]
    Rejected(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("backend error: {0}")]
    Backend(String),
}

/// The persistence collaborator a [`Board`](crate::Board) commits moves to.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persist a card's move to `to_column`.
    ///
    /// Must resolve `Ok(true)` only if the backing store durably reflects
    /// the new column. `Ok(false)` and `Err` both trigger rollback of the
    /// optimistic mutation.
    async fn commit_move(&self, card_id: &str, to_column: &str) -> Result<bool, StoreError>;
}
