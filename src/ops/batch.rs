//! Multi-select state and bulk operations with partial-failure accounting.

use std::collections::HashSet;
use std::future::Future;

use tracing::warn;

use crate::model::card::Card;
use crate::store::{FieldUpdates, StoreError};

/// Tally of a batch operation.
///
/// `successful + failed == total` always holds, and `total` is the size of
/// the selection at the moment the batch started.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
}

impl BatchOutcome {
    pub(crate) fn tally(results: impl IntoIterator<Item = bool>) -> Self {
        let mut outcome = BatchOutcome::default();
        for ok in results {
            outcome.total += 1;
            if ok {
                outcome.successful += 1;
            } else {
                outcome.failed += 1;
            }
        }
        outcome
    }
}

/// The set of card ids chosen for a batch operation.
///
/// Mutated only by explicit selection calls; batch operations clear it
/// when they resolve, whatever the outcome.
#[derive(Debug, Default)]
pub struct Selection {
    ids: HashSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Selection::default()
    }

    /// Toggle one card in or out of the selection.
    pub fn toggle(&mut self, card_id: impl Into<String>) {
        let id = card_id.into();
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
    }

    /// Select every card in `items`, replacing the current selection.
    pub fn select_all<T: Card>(&mut self, items: &[T]) {
        self.ids = items.iter().map(|card| card.id().to_string()).collect();
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, card_id: &str) -> bool {
        self.ids.contains(card_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Apply `updates` to every selected card through `per_card`, all
    /// dispatched concurrently.
    ///
    /// One card's failure (an `Ok(false)` or an error, which is logged and
    /// swallowed) never aborts the rest; the batch is per-card best-effort,
    /// not transactional. The selection is cleared once every outcome is
    /// in. An empty selection returns a zero tally without invoking the
    /// callback.
    pub async fn batch_update<F, Fut>(&mut self, updates: &FieldUpdates, per_card: F) -> BatchOutcome
    where
        F: Fn(String, FieldUpdates) -> Fut,
        Fut: Future<Output = Result<bool, StoreError>>,
    {
        self.run_batch(|id| per_card(id, updates.clone())).await
    }

    /// Delete every selected card through `per_card`. Same dispatch and
    /// failure semantics as [`Selection::batch_update`].
    pub async fn batch_delete<F, Fut>(&mut self, per_card: F) -> BatchOutcome
    where
        F: Fn(String) -> Fut,
        Fut: Future<Output = Result<bool, StoreError>>,
    {
        self.run_batch(per_card).await
    }

    async fn run_batch<F, Fut>(&mut self, per_card: F) -> BatchOutcome
    where
        F: Fn(String) -> Fut,
        Fut: Future<Output = Result<bool, StoreError>>,
    {
        if self.ids.is_empty() {
            return BatchOutcome::default();
        }

        // Snapshot at call start; later selection changes don't affect a
        // batch already in flight.
        let snapshot: Vec<String> = self.ids.iter().cloned().collect();
        let results = futures::future::join_all(snapshot.iter().map(|id| {
            let member = per_card(id.clone());
            async move {
                match member.await {
                    Ok(ok) => ok,
                    Err(err) => {
                        warn!(card = %id, error = %err, "batch member failed");
                        false
                    }
                }
            }
        }))
        .await;

        self.clear();
        BatchOutcome::tally(results)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Debug, Clone)]
    struct Contact {
        id: String,
        group: String,
    }

    impl Contact {
        fn new(id: &str) -> Self {
            Contact {
                id: id.to_string(),
                group: "leads".to_string(),
            }
        }
    }

    impl Card for Contact {
        fn id(&self) -> &str {
            &self.id
        }

        fn column(&self) -> &str {
            &self.group
        }

        fn with_column(&self, column: &str) -> Self {
            Contact {
                id: self.id.clone(),
                group: column.to_string(),
            }
        }
    }

    fn selection_of(ids: &[&str]) -> Selection {
        let mut selection = Selection::new();
        for id in ids {
            selection.toggle(*id);
        }
        selection
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut selection = Selection::new();
        selection.toggle("a");
        assert!(selection.contains("a"));
        selection.toggle("a");
        assert!(!selection.contains("a"));
        assert!(selection.is_empty());
    }

    #[test]
    fn select_all_replaces_the_current_selection() {
        let mut selection = selection_of(&["stale"]);
        selection.select_all(&[Contact::new("a"), Contact::new("b")]);
        assert_eq!(selection.len(), 2);
        assert!(!selection.contains("stale"));
        assert!(selection.contains("a") && selection.contains("b"));
    }

    #[tokio::test]
    async fn empty_selection_returns_zero_tally_without_calls() {
        let calls = AtomicUsize::new(0);
        let mut selection = Selection::new();

        let outcome = selection
            .batch_delete(|_id| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok(true) }
            })
            .await;

        assert_eq!(outcome, BatchOutcome::default());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn tally_counts_mixed_outcomes_and_clears_selection() {
        let mut selection = selection_of(&["a", "b"]);
        let mut updates = FieldUpdates::new();
        updates.insert("stage".to_string(), serde_json::json!("qualified"));

        let outcome = selection
            .batch_update(&updates, |id, _updates| async move {
                if id == "a" {
                    Err(StoreError::Unavailable("backend down".to_string()))
                } else {
                    Ok(true)
                }
            })
            .await;

        assert_eq!(
            outcome,
            BatchOutcome {
                total: 2,
                successful: 1,
                failed: 1,
            }
        );
        assert!(selection.is_empty());
    }

    #[tokio::test]
    async fn false_result_counts_as_failed() {
        let mut selection = selection_of(&["a", "b", "c"]);

        let outcome = selection
            .batch_delete(|id| async move { Ok(id != "b") })
            .await;

        assert_eq!(outcome.total, 3);
        assert_eq!(outcome.successful, 2);
        assert_eq!(outcome.failed, 1);
    }

    #[tokio::test]
    async fn selection_clears_even_when_every_member_fails() {
        let mut selection = selection_of(&["a", "b"]);

        let outcome = selection.batch_delete(|_id| async { Ok(false) }).await;

        assert_eq!(outcome.failed, 2);
        assert!(selection.is_empty());
    }

    #[tokio::test]
    async fn every_member_is_dispatched_despite_failures() {
        let calls = AtomicUsize::new(0);
        let mut selection = selection_of(&["a", "b", "c", "d"]);

        selection
            .batch_update(&FieldUpdates::new(), |_id, _updates| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(StoreError::Rejected("nope".to_string())) }
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }
}
