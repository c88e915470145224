//! Raw field extraction
//!
//! Turns text cells into one `f64` array per recognized column. Header names
//! are resolved to cell indices once, before the row loop.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::columns::{clean_header_cell, Column};

/// Parse one cell, mapping blanks, `NaN` tokens and garbage to `f64::NAN`
pub fn parse_cell(cell: Option<&str>) -> f64 {
    let Some(cell) = cell.map(str::trim) else {
        return f64::NAN;
    };
    if cell.is_empty() || cell.eq_ignore_ascii_case("nan") {
        return f64::NAN;
    }
    cell.parse::<f64>().unwrap_or(f64::NAN)
}

/// Header-to-index resolution for the recognized columns of one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPlan {
    /// (column, cell index) pairs in recognized-column order
    entries: Vec<(Column, usize)>,
    /// Number of cells in the header row
    header_len: usize,
}

impl ColumnPlan {
    /// Resolve recognized columns against a header row.
    ///
    /// Unrecognized header cells are ignored. If a name appears twice the
    /// first occurrence wins.
    pub fn resolve<S: AsRef<str>>(header: &[S]) -> Self {
        let entries: Vec<(Column, usize)> = Column::recognized()
            .filter_map(|col| {
                header
                    .iter()
                    .position(|h| clean_header_cell(h.as_ref()) == col.name())
                    .map(|idx| (col, idx))
            })
            .collect();

        debug!(
            "Resolved {} of {} header cells: {:?}",
            entries.len(),
            header.len(),
            entries
        );

        Self {
            entries,
            header_len: header.len(),
        }
    }

    /// Cell index of a column, if present in the header
    pub fn index_of(&self, column: Column) -> Option<usize> {
        self.entries
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, idx)| *idx)
    }

    /// Number of header cells the plan was resolved against
    pub fn header_len(&self) -> usize {
        self.header_len
    }

    /// Resolved columns in recognized-column order
    pub fn columns(&self) -> impl Iterator<Item = Column> + '_ {
        self.entries.iter().map(|(c, _)| *c)
    }
}

/// Parsed CSV contents keyed by recognized column.
///
/// Every stored array has exactly `row_count` entries; columns absent from
/// the header are not stored at all.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawTable {
    columns: BTreeMap<Column, Vec<f64>>,
    row_count: usize,
    mismatched_rows: usize,
}

impl RawTable {
    /// Values for a column, if it was in the header
    pub fn get(&self, column: Column) -> Option<&[f64]> {
        self.columns.get(&column).map(Vec::as_slice)
    }

    /// Whether the column was in the header
    pub fn contains(&self, column: Column) -> bool {
        self.columns.contains_key(&column)
    }

    /// Take ownership of a column's values
    pub fn take(&mut self, column: Column) -> Option<Vec<f64>> {
        self.columns.remove(&column)
    }

    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of rows whose cell count differed from the header
    pub fn mismatched_rows(&self) -> usize {
        self.mismatched_rows
    }

    /// Columns present, in recognized-column order
    pub fn columns(&self) -> impl Iterator<Item = Column> + '_ {
        self.columns.keys().copied()
    }
}

/// Incrementally builds a [`RawTable`] from rows of text cells
#[derive(Debug)]
pub struct RawTableBuilder {
    plan: ColumnPlan,
    values: Vec<Vec<f64>>,
    row_count: usize,
    mismatched_rows: usize,
}

impl RawTableBuilder {
    /// Create a builder for an already-resolved header
    pub fn new(plan: ColumnPlan) -> Self {
        let values = vec![Vec::new(); plan.entries.len()];
        Self {
            plan,
            values,
            row_count: 0,
            mismatched_rows: 0,
        }
    }

    /// Append one data row.
    ///
    /// Short rows yield `NaN` for the missing trailing cells; long rows are
    /// read as far as the plan needs.
    pub fn push_row<S: AsRef<str>>(&mut self, cells: &[S]) {
        if cells.len() != self.plan.header_len {
            // Header line is line 1
            let line = self.row_count + 2;
            if self.mismatched_rows == 0 {
                warn!(
                    "Line {} has {} cells, header has {}",
                    line,
                    cells.len(),
                    self.plan.header_len
                );
            } else {
                debug!(
                    "Line {} has {} cells, header has {}",
                    line,
                    cells.len(),
                    self.plan.header_len
                );
            }
            self.mismatched_rows += 1;
        }

        for ((_, idx), column) in self.plan.entries.iter().zip(self.values.iter_mut()) {
            column.push(parse_cell(cells.get(*idx).map(|c| c.as_ref())));
        }
        self.row_count += 1;
    }

    /// Finish building
    pub fn finish(self) -> RawTable {
        if self.mismatched_rows > 1 {
            warn!(
                "{} of {} rows did not match the header length",
                self.mismatched_rows, self.row_count
            );
        }

        let columns = self
            .plan
            .entries
            .iter()
            .map(|(col, _)| *col)
            .zip(self.values)
            .collect();

        RawTable {
            columns,
            row_count: self.row_count,
            mismatched_rows: self.mismatched_rows,
        }
    }
}

/// Extract every recognized column from a header and its data rows
pub fn extract<H, R, S>(header: &[H], rows: &[R]) -> RawTable
where
    H: AsRef<str>,
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    let mut builder = RawTableBuilder::new(ColumnPlan::resolve(header));
    for row in rows {
        builder.push_row(row.as_ref());
    }
    builder.finish()
}
