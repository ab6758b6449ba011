pub mod batch;
pub mod drag;

pub use batch::{BatchOutcome, Selection};
pub use drag::{DropTarget, MoveInstruction, resolve_drop};
