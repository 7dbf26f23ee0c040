use log::debug;

use crate::{
    dataset::Dataset,
    error::{ReconcileError, Result},
    mapping::FieldMapping,
};

/// Projects both datasets onto the mapped columns.
///
/// The left projection keeps the mapping's left labels in mapping order. The
/// right projection takes the paired right columns in the same order and
/// renames them to the left labels, so both outputs share one schema.
pub fn reconcile(
    left: &Dataset,
    right: &Dataset,
    mapping: &FieldMapping,
) -> Result<(Dataset, Dataset)> {
    if mapping.is_empty() {
        return Err(ReconcileError::EmptyMapping);
    }
    let left_selection = mapping
        .iter()
        .map(|pair| (pair.left.as_str(), pair.left.as_str()))
        .collect::<Vec<_>>();
    let right_selection = mapping
        .iter()
        .map(|pair| (pair.right.as_str(), pair.left.as_str()))
        .collect::<Vec<_>>();

    let projected_left = left.select(&left_selection)?;
    let projected_right = right.select(&right_selection)?;
    debug!(
        "Reconciled {} column(s): left {:?}, right {:?}",
        mapping.len(),
        projected_left.shape(),
        projected_right.shape()
    );
    Ok((projected_left, projected_right))
}
