use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::column::ColumnSpec;

/// Board configuration: column definitions, named views, default view.
///
/// Column insertion order is left-to-right display order when no view
/// narrows the set. Views are ordered subsets of column ids; a view may
/// reference ids that have no definition (they resolve to synthesized
/// columns rather than erroring).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardConfig {
    #[serde(default)]
    pub columns: IndexMap<String, ColumnSpec>,
    /// View name → ordered column-id list.
    #[serde(default)]
    pub views: IndexMap<String, Vec<String>>,
    /// View active at construction; absent means all columns.
    #[serde(default)]
    pub default_view: Option<String>,
}

impl BoardConfig {
    pub fn new() -> Self {
        BoardConfig::default()
    }

    /// Define a column. Insertion order is preserved.
    pub fn column(mut self, id: impl Into<String>, spec: ColumnSpec) -> Self {
        self.columns.insert(id.into(), spec);
        self
    }

    /// Define a named view over a subset of column ids.
    pub fn view<I, S>(mut self, name: impl Into<String>, column_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.views
            .insert(name.into(), column_ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn default_view(mut self, name: impl Into<String>) -> Self {
        self.default_view = Some(name.into());
        self
    }

    /// Resolve the effective columns for a view.
    ///
    /// A known view name yields its column-id list verbatim. Anything else —
    /// no name, or a name with no configured view — falls back to every
    /// defined column in insertion order. Ids a view references without a
    /// definition pass through with a synthesized title equal to the id, so
    /// malformed configuration degrades instead of erroring.
    pub fn effective_columns(&self, view: Option<&str>) -> Vec<(String, ColumnSpec)> {
        match view.and_then(|name| self.views.get(name)) {
            Some(ids) => ids.iter().map(|id| (id.clone(), self.spec_for(id))).collect(),
            None => self
                .columns
                .iter()
                .map(|(id, spec)| (id.clone(), spec.clone()))
                .collect(),
        }
    }

    fn spec_for(&self, id: &str) -> ColumnSpec {
        self.columns
            .get(id)
            .cloned()
            .unwrap_or_else(|| ColumnSpec::synthesized(id))
    }
}
