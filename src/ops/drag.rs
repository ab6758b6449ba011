use crate::model::card::Card;
use crate::model::column::Column;

/// What a completed drag gesture landed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// Empty space within a column.
    Column(String),
    /// Another card; the dragged card takes its position.
    Card(String),
}

/// A structural move: produced once per completed gesture, consumed
/// immediately by [`Board::apply_move`](crate::Board::apply_move), never
/// stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveInstruction {
    pub card_id: String,
    pub from_column: String,
    pub to_column: String,
    pub from_index: usize,
    pub to_index: usize,
}

/// Translate a gesture outcome into a move instruction.
///
/// `columns` is the grouping the gesture happened over (the same one the
/// drop zones were rendered from). Returns `None` when the gesture should
/// be discarded: no drop target, the dragged card is not on the board, the
/// target card is gone, or the drop lands exactly where the card already
/// is. A failed move later on must not re-derive positions from this
/// gesture; the UI re-renders from the engine's reverted state.
pub fn resolve_drop<T: Card>(
    columns: &[Column<T>],
    card_id: &str,
    target: Option<DropTarget>,
) -> Option<MoveInstruction> {
    let target = target?;
    let (from_column, from_index) = locate(columns, card_id)?;

    let (to_column, to_index) = match &target {
        // Dropped on a column's empty space: append to its end.
        DropTarget::Column(column_id) => {
            let count = columns
                .iter()
                .find(|c| c.id == *column_id)
                .map_or(0, Column::item_count);
            (column_id.clone(), count)
        }
        DropTarget::Card(target_id) => locate(columns, target_id)?,
    };

    if from_column == to_column && from_index == to_index {
        return None;
    }

    Some(MoveInstruction {
        card_id: card_id.to_string(),
        from_column,
        to_column,
        from_index,
        to_index,
    })
}

/// Find which column holds `card_id`, and where.
fn locate<T: Card>(columns: &[Column<T>], card_id: &str) -> Option<(String, usize)> {
    for column in columns {
        if let Some(index) = column.items.iter().position(|c| c.id() == card_id) {
            return Some((column.id.clone(), index));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::column::ColumnSpec;

    #[derive(Debug, Clone, PartialEq)]
    struct Note {
        id: String,
        lane: String,
    }

    impl Card for Note {
        fn id(&self) -> &str {
            &self.id
        }

        fn column(&self) -> &str {
            &self.lane
        }

        fn with_column(&self, column: &str) -> Self {
            Note {
                id: self.id.clone(),
                lane: column.to_string(),
            }
        }
    }

    /// Two columns: todo = [t1, t2], done = [d1].
    fn sample_columns() -> Vec<Column<Note>> {
        let mut todo = Column::empty("todo".to_string(), ColumnSpec::new("To Do"));
        for id in ["t1", "t2"] {
            todo.push(Note {
                id: id.to_string(),
                lane: "todo".to_string(),
            });
        }
        let mut done = Column::empty("done".to_string(), ColumnSpec::new("Done"));
        done.push(Note {
            id: "d1".to_string(),
            lane: "done".to_string(),
        });
        vec![todo, done]
    }

    #[test]
    fn no_target_discards_the_gesture() {
        assert_eq!(resolve_drop(&sample_columns(), "t1", None), None);
    }

    #[test]
    fn drop_on_a_column_appends_to_its_end() {
        let mv = resolve_drop(
            &sample_columns(),
            "t1",
            Some(DropTarget::Column("done".to_string())),
        )
        .unwrap();
        assert_eq!(
            mv,
            MoveInstruction {
                card_id: "t1".to_string(),
                from_column: "todo".to_string(),
                to_column: "done".to_string(),
                from_index: 0,
                to_index: 1,
            }
        );
    }

    #[test]
    fn drop_on_a_card_takes_its_position() {
        let mv = resolve_drop(
            &sample_columns(),
            "d1",
            Some(DropTarget::Card("t2".to_string())),
        )
        .unwrap();
        assert_eq!(mv.from_column, "done");
        assert_eq!(mv.to_column, "todo");
        assert_eq!(mv.to_index, 1);
    }

    #[test]
    fn drop_on_own_position_is_discarded() {
        let columns = sample_columns();
        assert_eq!(
            resolve_drop(&columns, "t1", Some(DropTarget::Card("t1".to_string()))),
            None
        );
    }

    #[test]
    fn reorder_within_a_column_still_resolves() {
        // Same column, different index: emitted, and the engine treats it
        // as a successful no-op.
        let mv = resolve_drop(
            &sample_columns(),
            "t1",
            Some(DropTarget::Card("t2".to_string())),
        )
        .unwrap();
        assert_eq!(mv.from_column, mv.to_column);
        assert_eq!(mv.to_index, 1);
    }

    #[test]
    fn unknown_dragged_card_is_discarded() {
        assert_eq!(
            resolve_drop(
                &sample_columns(),
                "ghost",
                Some(DropTarget::Column("done".to_string()))
            ),
            None
        );
    }

    #[test]
    fn unknown_target_card_is_discarded() {
        assert_eq!(
            resolve_drop(
                &sample_columns(),
                "t1",
                Some(DropTarget::Card("ghost".to_string()))
            ),
            None
        );
    }

    #[test]
    fn drop_on_empty_column_lands_at_index_zero() {
        let mut columns = sample_columns();
        columns.push(Column::empty("blocked".to_string(), ColumnSpec::new("Blocked")));
        let mv = resolve_drop(
            &columns,
            "t1",
            Some(DropTarget::Column("blocked".to_string())),
        )
        .unwrap();
        assert_eq!(mv.to_column, "blocked");
        assert_eq!(mv.to_index, 0);
    }
}
