//! Column correspondence between two datasets.
//!
//! A [`FieldMapping`] pairs left columns with right columns one-to-one. It is
//! produced by a [`MatchingStrategy`]; [`GreedyAssignment`] is the default.
//!
//! The greedy strategy is order dependent: left columns claim right columns in
//! left header order, and within one scan the first right column reaching the
//! best score wins. Reordering either header can change the mapping.

use std::collections::HashSet;

use log::debug;
use serde::Serialize;

use crate::{naming::normalize, similarity::token_score};

pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.6;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldPair {
    pub left: String,
    pub right: String,
    pub score: f64,
}

/// Ordered, right-injective mapping from left column labels to right column labels.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldMapping {
    pairs: Vec<FieldPair>,
}

impl FieldMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a pair. Returns `false` and leaves the mapping unchanged when
    /// either label is already mapped.
    pub fn insert(
        &mut self,
        left: impl Into<String>,
        right: impl Into<String>,
        score: f64,
    ) -> bool {
        let left = left.into();
        let right = right.into();
        if self.get(&left).is_some() || self.left_for(&right).is_some() {
            return false;
        }
        self.pairs.push(FieldPair { left, right, score });
        true
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[FieldPair] {
        &self.pairs
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldPair> {
        self.pairs.iter()
    }

    pub fn get(&self, left: &str) -> Option<&FieldPair> {
        self.pairs.iter().find(|pair| pair.left == left)
    }

    pub fn right_for(&self, left: &str) -> Option<&str> {
        self.get(left).map(|pair| pair.right.as_str())
    }

    pub fn left_for(&self, right: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|pair| pair.right == right)
            .map(|pair| pair.left.as_str())
    }

    pub fn left_labels(&self) -> Vec<String> {
        self.pairs.iter().map(|pair| pair.left.clone()).collect()
    }
}

impl<'a> IntoIterator for &'a FieldMapping {
    type Item = &'a FieldPair;
    type IntoIter = std::slice::Iter<'a, FieldPair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

/// Assigns right columns to left columns.
///
/// A candidate qualifies when its score is `>= threshold`. A NaN threshold
/// qualifies nothing and yields an empty mapping.
pub trait MatchingStrategy {
    fn name(&self) -> &'static str;

    fn assign(&self, left: &[String], right: &[String], threshold: f64) -> FieldMapping;
}

/// Left columns, in order, each take the best-scoring right column still
/// available. Ties go to the earlier right column.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyAssignment;

impl MatchingStrategy for GreedyAssignment {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn assign(&self, left: &[String], right: &[String], threshold: f64) -> FieldMapping {
        let mut mapping = FieldMapping::new();
        if left.is_empty() || right.is_empty() || threshold.is_nan() {
            return mapping;
        }
        let right_tokens = right.iter().map(|r| normalize(r)).collect::<Vec<_>>();
        let mut consumed: HashSet<usize> = HashSet::with_capacity(right.len());

        for left_label in left {
            let left_token = normalize(left_label);
            let mut best: Option<(usize, f64)> = None;
            for (idx, right_token) in right_tokens.iter().enumerate() {
                if consumed.contains(&idx) {
                    continue;
                }
                let candidate = token_score(&left_token, right_token);
                if candidate < threshold {
                    continue;
                }
                if best.is_none_or(|(_, best_score)| candidate > best_score) {
                    best = Some((idx, candidate));
                }
            }
            match best {
                Some((idx, best_score)) => {
                    if mapping.insert(left_label.as_str(), right[idx].as_str(), best_score) {
                        consumed.insert(idx);
                        debug!(
                            "Mapped '{}' -> '{}' (similarity {:.2})",
                            left_label, right[idx], best_score
                        );
                    }
                }
                None => debug!("No column above threshold {threshold} for '{left_label}'"),
            }
        }
        mapping
    }
}

/// Runs [`GreedyAssignment`] over the two headers.
pub fn map_fields(left: &[String], right: &[String], threshold: f64) -> FieldMapping {
    GreedyAssignment.assign(left, right, threshold)
}
