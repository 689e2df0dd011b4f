use tracing::trace;

use crate::page::{Page, Row, TableSurface};

/// One captured name entry. Fields are set once from the form and never
/// edited afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRecord {
    pub first: String,
    pub middle: String,
    pub last: String,
}

impl NameRecord {
    pub fn new(
        first: impl Into<String>,
        middle: impl Into<String>,
        last: impl Into<String>,
    ) -> Self {
        Self {
            first: first.into(),
            middle: middle.into(),
            last: last.into(),
        }
    }

    /// Display cells in their fixed order. The order is this explicit field
    /// list, not any enumeration of the struct.
    pub fn cells(&self) -> [&str; 3] {
        [&self.first, &self.middle, &self.last]
    }
}

/// Snapshot the current content of the three name fields. Blank fields are
/// captured as empty strings, not failures.
pub fn capture_record(page: &Page) -> NameRecord {
    NameRecord::new(
        page.first.value.clone(),
        page.middle.value.clone(),
        page.last.value.clone(),
    )
}

/// Project a record into one row and append it as the last row of the
/// table surface.
pub fn render_record(record: &NameRecord, surface: &mut TableSurface) {
    let mut row = Row::default();
    for value in record.cells() {
        row.push_cell(value);
    }
    trace!("Appending row {row:?}");
    surface.append_row(row);
}
