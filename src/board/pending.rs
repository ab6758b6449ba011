use crate::model::card::Card;

/// The pre-move snapshot held while a commit is outstanding.
///
/// One optimistic move is pending from the moment the mutation is applied
/// until the store answers; it then settles as committed (snapshot dropped)
/// or rolled back (snapshot written over the card's current value). The
/// snapshot is the full pre-move record, not just the column field, so a
/// rollback also undoes edits that rode along on the optimistic copy.
#[derive(Debug)]
pub(crate) struct PendingMove<T> {
    card_id: String,
    snapshot: T,
}

impl<T: Card> PendingMove<T> {
    pub fn begin(snapshot: T) -> Self {
        PendingMove {
            card_id: snapshot.id().to_string(),
            snapshot,
        }
    }

    /// Settle with the store's verdict. On failure the snapshot is restored
    /// in place; if the card has left the collection since (a concurrent
    /// resync), the restore is a silent no-op rather than re-inserting a
    /// stale record. Returns the verdict.
    pub fn settle(self, committed: bool, items: &mut [T]) -> bool {
        if !committed
            && let Some(slot) = items.iter_mut().find(|card| card.id() == self.card_id)
        {
            *slot = self.snapshot;
        }
        committed
    }
}
