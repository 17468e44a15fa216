//! Dataset preview table: the first rows of the filtered view, as loaded

use crate::filter::FilteredDataset;
use serde::Serialize;

pub const PREVIEW_ROWS: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preview {
    /// Column names in file order
    pub columns: Vec<String>,
    /// Raw cells, at most [`PREVIEW_ROWS`] rows
    pub rows: Vec<Vec<String>>,
    /// Rows in the filtered view (may exceed `rows.len()`)
    pub total_rows: usize,
}

impl Preview {
    pub fn from_view(view: &FilteredDataset<'_>) -> Self {
        Self {
            columns: view.columns().to_vec(),
            rows: view
                .rows()
                .take(PREVIEW_ROWS)
                .map(|r| r.cells.clone())
                .collect(),
            total_rows: view.len(),
        }
    }
}
