//! In-memory tabular dataset consumed by the reconciliation core.
//!
//! A [`Dataset`] is an ordered list of unique column labels plus rows holding
//! exactly one cell per column. Missing cells are explicit `None` values.
//! Datasets are never mutated by the core; projections build new ones.

use std::collections::HashSet;

use crate::{
    data::Value,
    error::{ReconcileError, Result},
};

pub type Cell = Option<Value>;
pub type Row = Vec<Cell>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(ReconcileError::DuplicateColumn(column.clone()));
            }
        }
        for (idx, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(ReconcileError::RowWidth {
                    row: idx,
                    expected: columns.len(),
                    found: row.len(),
                });
            }
        }
        Ok(Self { columns, rows })
    }

    /// A dataset with no columns and no rows.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// `(row_count, column_count)`
    pub fn shape(&self) -> (usize, usize) {
        (self.row_count(), self.column_count())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == label)
    }

    pub fn cell(&self, row: usize, label: &str) -> Option<&Value> {
        let idx = self.column_index(label)?;
        self.rows.get(row)?.get(idx)?.as_ref()
    }

    /// Iterates one column's cells in row order, or `None` if the column is absent.
    pub fn column_cells<'a>(
        &'a self,
        label: &str,
    ) -> Option<impl Iterator<Item = &'a Cell> + use<'a>> {
        let idx = self.column_index(label)?;
        Some(self.rows.iter().map(move |row| &row[idx]))
    }

    /// Builds a new dataset holding `selection` columns, in that order, each
    /// emitted under its paired output label.
    pub(crate) fn select(&self, selection: &[(&str, &str)]) -> Result<Self> {
        let mut indices = Vec::with_capacity(selection.len());
        for (source, _) in selection {
            let idx = self
                .column_index(source)
                .ok_or_else(|| ReconcileError::FieldNotFound {
                    field: source.to_string(),
                })?;
            indices.push(idx);
        }
        let columns = selection
            .iter()
            .map(|(_, output)| output.to_string())
            .collect::<Vec<_>>();
        let rows = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|idx| row[*idx].clone()).collect())
            .collect();
        Self::new(columns, rows)
    }

    /// Builds a new dataset with the same columns holding the rows at `positions`.
    pub(crate) fn take_rows(&self, positions: &[usize]) -> Self {
        let rows = positions
            .iter()
            .filter_map(|pos| self.rows.get(*pos).cloned())
            .collect();
        Self {
            columns: self.columns.clone(),
            rows,
        }
    }

    pub(crate) fn with_columns(&self, columns: Vec<String>) -> Result<Self> {
        Self::new(columns, self.rows.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::new(
            vec!["id".into(), "name".into()],
            vec![
                vec![Some(Value::Number(1.0)), Some("Ada".into())],
                vec![Some(Value::Number(2.0)), None],
            ],
        )
        .expect("dataset")
    }

    #[test]
    fn new_rejects_ragged_rows() {
        let err = Dataset::new(vec!["a".into(), "b".into()], vec![vec![None]]).unwrap_err();
        assert_eq!(
            err,
            ReconcileError::RowWidth {
                row: 0,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn new_rejects_duplicate_labels() {
        let err = Dataset::new(vec!["a".into(), "a".into()], Vec::new()).unwrap_err();
        assert_eq!(err, ReconcileError::DuplicateColumn("a".into()));
    }

    #[test]
    fn select_reorders_and_renames() {
        let data = sample();
        let projected = data.select(&[("name", "full_name"), ("id", "ID")]).unwrap();
        assert_eq!(projected.columns(), ["full_name", "ID"]);
        assert_eq!(projected.cell(0, "full_name"), Some(&Value::from("Ada")));
        assert_eq!(projected.cell(1, "full_name"), None);
        assert_eq!(projected.shape(), (2, 2));
        assert_eq!(data.columns(), ["id", "name"]);
    }

    #[test]
    fn select_reports_unknown_column() {
        let err = sample().select(&[("missing", "missing")]).unwrap_err();
        assert_eq!(
            err,
            ReconcileError::FieldNotFound {
                field: "missing".into()
            }
        );
    }

    #[test]
    fn take_rows_keeps_requested_order() {
        let picked = sample().take_rows(&[1, 0]);
        assert_eq!(picked.cell(0, "id"), Some(&Value::Number(2.0)));
        assert_eq!(picked.cell(1, "id"), Some(&Value::Number(1.0)));
    }
}
