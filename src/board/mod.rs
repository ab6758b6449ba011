//! The board state engine: owns the card collection, derives column
//! groupings for the active view, and applies moves optimistically with
//! rollback when the record store refuses.

mod pending;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::model::card::Card;
use crate::model::column::Column;
use crate::model::config::BoardConfig;
use crate::ops::batch::BatchOutcome;
use crate::ops::drag::MoveInstruction;
use crate::store::RecordStore;

use self::pending::PendingMove;

/// Business-rule gate consulted before a move is attempted:
/// `(card, from_column, to_column) -> allowed`. A rejected move fails
/// without touching the collection or the store.
pub type MoveGuard<T> = Box<dyn Fn(&T, &str, &str) -> bool + Send + Sync>;

struct BoardState<T> {
    items: Vec<T>,
    active_view: Option<String>,
    in_flight: HashSet<String>,
}

/// A board over a collection of cards of type `T`.
///
/// The board holds a copy of the collection and re-derives column groupings
/// from it on demand. It has no subscription to the record store: the
/// consuming application re-renders from [`Board::columns_for_active_view`]
/// after every state change and calls [`Board::replace_items`] whenever the
/// store's canonical list changes.
///
/// Methods take `&self`; moves on different cards may be awaited
/// concurrently, while moves on the same card are serialized internally.
pub struct Board<T> {
    state: Mutex<BoardState<T>>,
    config: BoardConfig,
    store: Arc<dyn RecordStore>,
    guard: Option<MoveGuard<T>>,
    /// One async lock per card id; serializes same-card moves so a second
    /// move's snapshot never captures a peer's unsettled optimistic state.
    card_locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl<T: Card> Board<T> {
    /// Construct a board over a copy of `items`. The active view starts as
    /// the configured default, or all columns when none is set.
    pub fn new(items: Vec<T>, config: BoardConfig, store: Arc<dyn RecordStore>) -> Self {
        let active_view = config.default_view.clone();
        Board {
            state: Mutex::new(BoardState {
                items,
                active_view,
                in_flight: HashSet::new(),
            }),
            config,
            store,
            guard: None,
            card_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Install a guard predicate (e.g. "a closed deal cannot re-enter an
    /// active stage").
    pub fn with_guard<G>(mut self, guard: G) -> Self
    where
        G: Fn(&T, &str, &str) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Box::new(guard));
        self
    }

    // -----------------------------------------------------------------------
    // Views and grouping
    // -----------------------------------------------------------------------

    /// Switch the active view. Pure state change; an unknown name is kept
    /// and resolves to the all-columns view.
    pub fn set_view(&self, name: impl Into<String>) {
        self.state.lock().active_view = Some(name.into());
    }

    pub fn active_view(&self) -> Option<String> {
        self.state.lock().active_view.clone()
    }

    /// Group the collection into the active view's columns.
    ///
    /// Every card whose column id belongs to the view lands in exactly one
    /// column; cards whose column id is outside the view stay in the
    /// collection but appear in no group.
    pub fn columns_for_active_view(&self) -> Vec<Column<T>> {
        let state = self.state.lock();
        let mut columns: Vec<Column<T>> = self
            .config
            .effective_columns(state.active_view.as_deref())
            .into_iter()
            .map(|(id, spec)| Column::empty(id, spec))
            .collect();
        for card in &state.items {
            if let Some(column) = columns.iter_mut().find(|c| c.id == card.column()) {
                column.push(card.clone());
            }
        }
        columns
    }

    // -----------------------------------------------------------------------
    // Collection access
    // -----------------------------------------------------------------------

    /// Resynchronize the collection from the external source of truth.
    /// Replaces unconditionally; the active view and in-flight markers are
    /// preserved.
    pub fn replace_items(&self, items: Vec<T>) {
        self.state.lock().items = items;
    }

    pub fn items(&self) -> Vec<T> {
        self.state.lock().items.clone()
    }

    pub fn card(&self, id: &str) -> Option<T> {
        self.state.lock().items.iter().find(|c| c.id() == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.state.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().items.is_empty()
    }

    /// True while a commit for this card is outstanding.
    pub fn is_in_flight(&self, id: &str) -> bool {
        self.state.lock().in_flight.contains(id)
    }

    pub fn in_flight_ids(&self) -> HashSet<String> {
        self.state.lock().in_flight.clone()
    }

    // -----------------------------------------------------------------------
    // Moves
    // -----------------------------------------------------------------------

    /// Apply a move: optimistic mutation, commit through the record store,
    /// rollback on refusal or error.
    ///
    /// Returns `true` when the store confirmed the move, and for
    /// same-column moves, which are accepted as no-ops without a commit
    /// (within-column ordering is display-only). Store errors are logged
    /// and collapse to `false`; they never propagate.
    pub async fn apply_move(&self, mv: &MoveInstruction) -> bool {
        if mv.from_column == mv.to_column {
            return true;
        }
        self.commit_card_move(&mv.card_id, &mv.to_column).await
    }

    /// Move every card in `ids` to `to_column`, committing each through the
    /// record store concurrently. A member already in `to_column` counts as
    /// successful without a commit; failed members roll back individually
    /// while the rest stand.
    pub async fn batch_move(&self, ids: &[String], to_column: &str) -> BatchOutcome {
        let results = futures::future::join_all(ids.iter().map(|id| async move {
            match self.card(id) {
                Some(card) if card.column() == to_column => true,
                _ => self.commit_card_move(id, to_column).await,
            }
        }))
        .await;
        BatchOutcome::tally(results)
    }

    async fn commit_card_move(&self, card_id: &str, to_column: &str) -> bool {
        let lock = self.card_lock(card_id);
        let _serialized = lock.lock().await;

        let pending = {
            let mut state = self.state.lock();
            let state = &mut *state;
            let Some(slot) = state.items.iter_mut().find(|c| c.id() == card_id) else {
                debug!(card = %card_id, "move target not in collection");
                return false;
            };
            if let Some(guard) = &self.guard
                && !guard(slot, slot.column(), to_column)
            {
                debug!(card = %card_id, to = %to_column, "move rejected by guard");
                return false;
            }
            let pending = PendingMove::begin(slot.clone());
            *slot = slot.with_column(to_column);
            state.in_flight.insert(card_id.to_string());
            pending
        };

        let committed = match self.store.commit_move(card_id, to_column).await {
            Ok(confirmed) => confirmed,
            Err(err) => {
                warn!(card = %card_id, to = %to_column, error = %err, "commit failed");
                false
            }
        };

        let mut state = self.state.lock();
        state.in_flight.remove(card_id);
        let settled = pending.settle(committed, &mut state.items);
        debug!(card = %card_id, to = %to_column, committed = settled, "move settled");
        settled
    }

    fn card_lock(&self, id: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.card_locks.lock();
        locks.entry(id.to_string()).or_default().clone()
    }
}
