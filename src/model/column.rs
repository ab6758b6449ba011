use serde::{Deserialize, Serialize};

use super::card::Card;

/// Static definition of a column, keyed by column id in
/// [`BoardConfig`](super::config::BoardConfig).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Display title.
    pub title: String,
    /// Color/style tag for the rendering layer; opaque to the engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Soft WIP limit; surfaced via [`Column::at_capacity`], never enforced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,
}

impl ColumnSpec {
    pub fn new(title: impl Into<String>) -> Self {
        ColumnSpec {
            title: title.into(),
            color: None,
            max_items: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = Some(max_items);
        self
    }

    /// Stand-in for a column id no definition exists for: the id itself
    /// becomes the title, with no color and no limit.
    pub(crate) fn synthesized(id: &str) -> Self {
        ColumnSpec::new(id)
    }
}

/// A column as grouped for display: its definition plus the cards currently
/// in it. Derived from the item collection on access, never stored.
#[derive(Debug, Clone)]
pub struct Column<T> {
    pub id: String,
    pub title: String,
    pub color: Option<String>,
    pub max_items: Option<usize>,
    pub items: Vec<T>,
    /// Sum of [`Card::value`] over `items`.
    pub total_value: f64,
}

impl<T: Card> Column<T> {
    pub(crate) fn empty(id: String, spec: ColumnSpec) -> Self {
        Column {
            id,
            title: spec.title,
            color: spec.color,
            max_items: spec.max_items,
            items: Vec::new(),
            total_value: 0.0,
        }
    }

    pub(crate) fn push(&mut self, card: T) {
        self.total_value += card.value();
        self.items.push(card);
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// True when a configured WIP limit is reached or exceeded.
    pub fn at_capacity(&self) -> bool {
        self.max_items.is_some_and(|max| self.items.len() >= max)
    }

    /// True when the column holds more cards than its configured limit.
    pub fn over_capacity(&self) -> bool {
        self.max_items.is_some_and(|max| self.items.len() > max)
    }
}
