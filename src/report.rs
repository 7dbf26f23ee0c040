//! Human-readable summaries of mappings, comparison results, and value
//! analyses. Everything here renders to `String`; callers decide where it goes.

use std::{collections::BTreeSet, fmt::Write as _};

use crate::{
    compare::{ComparisonResult, FieldResult, KeyedResult},
    data::Value,
    mapping::FieldMapping,
    table::{render_dataset, render_table},
    values::ValueSetAnalysis,
};

pub const NO_MATCH_HINT: &str =
    "No matching fields found; check the file headers or lower --threshold";

pub fn render_mapping(mapping: &FieldMapping) -> String {
    if mapping.is_empty() {
        return format!("{NO_MATCH_HINT}\n");
    }
    let headers = vec![
        "left".to_string(),
        "right".to_string(),
        "similarity".to_string(),
    ];
    let rows = mapping
        .iter()
        .map(|pair| {
            vec![
                pair.left.clone(),
                pair.right.clone(),
                format!("{:.2}", pair.score),
            ]
        })
        .collect::<Vec<_>>();
    render_table(&headers, &rows)
}

pub fn render_result(result: &ComparisonResult, preview_rows: usize) -> String {
    match result {
        ComparisonResult::Keyed(keyed) => render_keyed(keyed, preview_rows),
        ComparisonResult::Fields(fields) => render_fields(fields, preview_rows),
    }
}

fn render_keyed(result: &KeyedResult, preview_rows: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Key comparison on '{}' <-> '{}'",
        result.key_a, result.key_b
    );
    let _ = writeln!(out, "Left records:   {}", result.total_a);
    let _ = writeln!(out, "Right records:  {}", result.total_b);
    let _ = writeln!(out, "Common records: {}", result.common_count);
    if preview_rows > 0 && result.common_count > 0 {
        let _ = writeln!(out, "\nLeft common rows:");
        out.push_str(&render_dataset(&result.common_rows_a, preview_rows));
        let _ = writeln!(out, "\nRight common rows:");
        out.push_str(&render_dataset(&result.common_rows_b, preview_rows));
    }
    out
}

fn render_fields(result: &FieldResult, preview_rows: usize) -> String {
    let mut out = String::new();
    if !result.has_common_fields() {
        let _ = writeln!(out, "{NO_MATCH_HINT}");
        return out;
    }
    let _ = writeln!(out, "Common fields: {}", result.common_fields.len());
    let _ = writeln!(
        out,
        "Left shape:    {} row(s) x {} column(s)",
        result.shape_a.0, result.shape_a.1
    );
    let _ = writeln!(
        out,
        "Right shape:   {} row(s) x {} column(s)",
        result.shape_b.0, result.shape_b.1
    );
    if preview_rows > 0 {
        let _ = writeln!(out, "\nLeft data:");
        out.push_str(&render_dataset(&result.projected_a, preview_rows));
        let _ = writeln!(out, "\nRight data:");
        out.push_str(&render_dataset(&result.projected_b, preview_rows));
    }
    out
}

pub fn render_analysis(analysis: &ValueSetAnalysis, samples: usize) -> String {
    let sample = |values: &BTreeSet<Value>| {
        values
            .iter()
            .take(samples)
            .map(|v| v.as_display())
            .collect::<Vec<_>>()
            .join(", ")
    };
    let mut out = String::new();
    let _ = writeln!(out, "Value analysis for '{}'", analysis.field);
    let _ = writeln!(out, "Common values:  {}", analysis.total_common());
    let _ = writeln!(out, "Only in left:   {}", analysis.unique_to_a.len());
    let _ = writeln!(out, "Only in right:  {}", analysis.unique_to_b.len());
    if samples > 0 && !analysis.common_values.is_empty() {
        let _ = writeln!(out, "Common sample:  {}", sample(&analysis.common_values));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_mapping_renders_hint() {
        assert!(render_mapping(&FieldMapping::new()).contains("lower --threshold"));
    }

    #[test]
    fn mapping_scores_use_two_decimals() {
        let mut mapping = FieldMapping::new();
        mapping.insert("Name", "full_name", 8.0 / 13.0);
        let rendered = render_mapping(&mapping);
        assert!(rendered.contains("0.62"), "{rendered}");
    }
}
