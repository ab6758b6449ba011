//! boardkit — a generic Kanban board state engine.
//!
//! boardkit owns the state layer of a board UI: it groups an arbitrary
//! collection of typed records into named columns, slices them through
//! named views, applies drag-and-drop moves optimistically (rolling back
//! when the backing store refuses), and runs bulk operations over a
//! multi-selection. Rendering, gestures, and persistence stay outside:
//! implement [`Card`] for your record type and [`RecordStore`] for your
//! backend, then re-render from [`Board::columns_for_active_view`] after
//! every state change.

pub mod board;
pub mod model;
pub mod ops;
pub mod store;

pub use board::{Board, MoveGuard};
pub use model::card::Card;
pub use model::column::{Column, ColumnSpec};
pub use model::config::BoardConfig;
pub use ops::batch::{BatchOutcome, Selection};
pub use ops::drag::{DropTarget, MoveInstruction, resolve_drop};
pub use store::{FieldUpdates, RecordStore, StoreError};
