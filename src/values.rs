use std::collections::BTreeSet;

use serde::Serialize;

use crate::{
    compare::ComparisonResult,
    data::Value,
    dataset::Dataset,
    error::{ReconcileError, Result},
};

/// Value sets of one field across both sides of a comparison. Missing cells
/// are excluded, so the three sets partition the union of observed values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueSetAnalysis {
    pub field: String,
    pub common_values: BTreeSet<Value>,
    pub unique_to_a: BTreeSet<Value>,
    pub unique_to_b: BTreeSet<Value>,
}

impl ValueSetAnalysis {
    pub fn total_common(&self) -> usize {
        self.common_values.len()
    }
}

pub fn analyze(result: &ComparisonResult, field: &str) -> Result<ValueSetAnalysis> {
    let (left, right) = result.tables();
    let values_a = value_set(left, field)?;
    let values_b = value_set(right, field)?;
    Ok(ValueSetAnalysis {
        field: field.to_string(),
        common_values: values_a.intersection(&values_b).cloned().collect(),
        unique_to_a: values_a.difference(&values_b).cloned().collect(),
        unique_to_b: values_b.difference(&values_a).cloned().collect(),
    })
}

fn value_set(dataset: &Dataset, field: &str) -> Result<BTreeSet<Value>> {
    let cells = dataset
        .column_cells(field)
        .ok_or_else(|| ReconcileError::FieldNotFound {
            field: field.to_string(),
        })?;
    Ok(cells.flatten().cloned().collect())
}
