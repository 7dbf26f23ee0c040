//! Key-based and field-based comparison of two datasets.

use std::collections::HashSet;

use indexmap::IndexMap;
use log::debug;

use crate::{
    dataset::{Cell, Dataset},
    error::{ReconcileError, Result, Side},
    mapping::{DEFAULT_SIMILARITY_THRESHOLD, FieldMapping, GreedyAssignment, MatchingStrategy},
    reconcile::reconcile,
};

/// Record-level comparison driven by one identifying column per side.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedResult {
    pub key_a: String,
    pub key_b: String,
    pub mapping: FieldMapping,
    /// Number of distinct key values present on both sides.
    pub common_count: usize,
    pub total_a: usize,
    pub total_b: usize,
    /// Left rows whose key is common, one per key, in left key order.
    pub common_rows_a: Dataset,
    /// Right rows for the same keys and order, columns renamed through `mapping`.
    pub common_rows_b: Dataset,
}

/// Content comparison over the inferred common columns.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldResult {
    pub mapping: FieldMapping,
    pub common_fields: Vec<String>,
    pub shape_a: (usize, usize),
    pub shape_b: (usize, usize),
    pub projected_a: Dataset,
    pub projected_b: Dataset,
}

impl FieldResult {
    pub fn has_common_fields(&self) -> bool {
        !self.common_fields.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ComparisonResult {
    Keyed(KeyedResult),
    Fields(FieldResult),
}

impl ComparisonResult {
    pub fn mapping(&self) -> &FieldMapping {
        match self {
            ComparisonResult::Keyed(result) => &result.mapping,
            ComparisonResult::Fields(result) => &result.mapping,
        }
    }

    /// The pair of tables value analysis and export operate on.
    pub fn tables(&self) -> (&Dataset, &Dataset) {
        match self {
            ComparisonResult::Keyed(result) => (&result.common_rows_a, &result.common_rows_b),
            ComparisonResult::Fields(result) => (&result.projected_a, &result.projected_b),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Comparator<S = GreedyAssignment> {
    threshold: f64,
    strategy: S,
}

impl Default for Comparator {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
            strategy: GreedyAssignment,
        }
    }
}

impl Comparator {
    pub fn new(threshold: f64) -> Result<Self> {
        Self::with_strategy(threshold, GreedyAssignment)
    }
}

impl<S: MatchingStrategy> Comparator<S> {
    pub fn with_strategy(threshold: f64, strategy: S) -> Result<Self> {
        if threshold.is_nan() || threshold < 0.0 {
            return Err(ReconcileError::InvalidThreshold(threshold));
        }
        Ok(Self {
            threshold,
            strategy,
        })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    pub fn field_mapping(&self, left: &Dataset, right: &Dataset) -> FieldMapping {
        self.strategy
            .assign(left.columns(), right.columns(), self.threshold)
    }

    /// Runs a keyed comparison when both keys are given, a field comparison otherwise.
    pub fn compare(
        &self,
        left: &Dataset,
        right: &Dataset,
        keys: Option<(&str, &str)>,
    ) -> Result<ComparisonResult> {
        match keys {
            Some((key_a, key_b)) => self
                .compare_by_key(left, right, key_a, key_b)
                .map(ComparisonResult::Keyed),
            None => self
                .compare_by_fields(left, right)
                .map(ComparisonResult::Fields),
        }
    }

    pub fn compare_by_key(
        &self,
        left: &Dataset,
        right: &Dataset,
        key_a: &str,
        key_b: &str,
    ) -> Result<KeyedResult> {
        let left_key = left
            .column_index(key_a)
            .ok_or_else(|| ReconcileError::KeyNotFound {
                side: Side::Left,
                column: key_a.to_string(),
            })?;
        let right_key = right
            .column_index(key_b)
            .ok_or_else(|| ReconcileError::KeyNotFound {
                side: Side::Right,
                column: key_b.to_string(),
            })?;

        let mapping = self.field_mapping(left, right);
        let left_index = index_by_key(left, left_key);
        let right_index = index_by_key(right, right_key);
        debug!(
            "Indexed {} left key(s) and {} right key(s)",
            left_index.len(),
            right_index.len()
        );

        let (left_positions, right_positions): (Vec<usize>, Vec<usize>) = left_index
            .iter()
            .filter_map(|(key, left_pos)| {
                right_index
                    .get(key)
                    .map(|right_pos| (*left_pos, *right_pos))
            })
            .unzip();

        let renamed = right.with_columns(renamed_right_columns(right.columns(), &mapping))?;

        Ok(KeyedResult {
            key_a: key_a.to_string(),
            key_b: key_b.to_string(),
            mapping,
            common_count: left_positions.len(),
            total_a: left.row_count(),
            total_b: right.row_count(),
            common_rows_a: left.take_rows(&left_positions),
            common_rows_b: renamed.take_rows(&right_positions),
        })
    }

    /// Maps the headers and projects both datasets onto the mapped columns.
    /// An empty mapping yields an empty result rather than an error.
    pub fn compare_by_fields(&self, left: &Dataset, right: &Dataset) -> Result<FieldResult> {
        let mapping = self.field_mapping(left, right);
        let (projected_a, projected_b) = match reconcile(left, right, &mapping) {
            Ok(projected) => projected,
            Err(ReconcileError::EmptyMapping) => (Dataset::empty(), Dataset::empty()),
            Err(err) => return Err(err),
        };
        Ok(FieldResult {
            common_fields: mapping.left_labels(),
            mapping,
            shape_a: projected_a.shape(),
            shape_b: projected_b.shape(),
            projected_a,
            projected_b,
        })
    }
}

// Duplicate keys keep the last row at the position the key first appeared.
fn index_by_key(dataset: &Dataset, key_column: usize) -> IndexMap<&Cell, usize> {
    let mut index = IndexMap::with_capacity(dataset.row_count());
    for (pos, row) in dataset.rows().iter().enumerate() {
        index.insert(&row[key_column], pos);
    }
    index
}

fn renamed_right_columns(columns: &[String], mapping: &FieldMapping) -> Vec<String> {
    let mut seen: HashSet<String> = columns
        .iter()
        .filter_map(|c| mapping.left_for(c))
        .map(str::to_string)
        .collect();
    columns
        .iter()
        .map(|column| {
            if let Some(left) = mapping.left_for(column) {
                return left.to_string();
            }
            let mut candidate = column.clone();
            let mut counter = 1usize;
            while seen.contains(&candidate) {
                candidate = format!("right_{column}_{counter}");
                counter += 1;
            }
            seen.insert(candidate.clone());
            candidate
        })
        .collect()
}
