/// A record that can be placed on a board.
///
/// The engine never assumes a field name for the column. It reads the
/// current column through [`Card::column`] and writes it through
/// [`Card::with_column`]; implementations must keep the two in sync so
/// that `card.with_column(c).column() == c` for any column id.
pub trait Card: Clone {
    /// Unique, stable identifier within the collection.
    fn id(&self) -> &str;

    /// Id of the column currently holding this card.
    fn column(&self) -> &str;

    /// A copy of this card with its column set to `column`.
    fn with_column(&self, column: &str) -> Self;

    /// Numeric value aggregated per column (e.g. a deal amount).
    fn value(&self) -> f64 {
        0.0
    }
}
