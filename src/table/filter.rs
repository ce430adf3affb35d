use std::collections::HashMap;

/// Conjunctive column-index → value predicate over parsed rows.
///
/// An empty filter matches every row. A row shorter than a required index
/// fails the match; it is skipped by the caller, never treated as a fault.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowFilter {
    wanted: HashMap<usize, String>,
}

impl RowFilter {
    pub fn new() -> RowFilter {
        RowFilter::default()
    }

    /// Build a filter from URL query parameters, resolving column names to
    /// positions. Keys that name no column are dropped.
    pub fn from_params(params: &HashMap<String, String>, columns: &[String]) -> RowFilter {
        let mut filter = RowFilter::new();
        for (key, value) in params {
            if let Some(index) = columns.iter().position(|c| c == key) {
                filter.require(index, value.clone());
            }
        }
        filter
    }

    pub fn require(&mut self, index: usize, value: String) {
        self.wanted.insert(index, value);
    }

    pub fn is_empty(&self) -> bool {
        self.wanted.is_empty()
    }

    /// All entries must match positionally.
    pub fn matches(&self, row: &[String]) -> bool {
        self.wanted
            .iter()
            .all(|(index, value)| row.get(*index) == Some(value))
    }
}
