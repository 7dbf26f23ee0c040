use std::fmt::Write as _;

use crate::dataset::Dataset;

/// Renders rows as a left-aligned plain-text table with a dashed separator
/// under the header. Cells beyond the header width are ignored.
pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths = headers.iter().map(|h| cell_width(h)).collect::<Vec<_>>();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell_width(cell));
        }
    }

    let mut output = String::new();
    let _ = writeln!(output, "{}", render_line(headers, &widths));
    let rule = widths
        .iter()
        .map(|w| "-".repeat((*w).max(3)))
        .collect::<Vec<_>>();
    let rule_widths = widths.iter().map(|w| (*w).max(3)).collect::<Vec<_>>();
    let _ = writeln!(output, "{}", render_line(&rule, &rule_widths));
    for row in rows {
        let _ = writeln!(output, "{}", render_line(row, &widths));
    }
    output
}

/// Renders up to `limit` rows of a dataset; missing cells show as blanks.
pub fn render_dataset(dataset: &Dataset, limit: usize) -> String {
    let rows = dataset
        .rows()
        .iter()
        .take(limit)
        .map(|row| {
            row.iter()
                .map(|cell| cell.as_ref().map(|v| v.as_display()).unwrap_or_default())
                .collect()
        })
        .collect::<Vec<Vec<String>>>();
    render_table(dataset.columns(), &rows)
}

fn render_line(values: &[String], widths: &[usize]) -> String {
    let line = values
        .iter()
        .zip(widths)
        .map(|(value, width)| {
            let cell = flatten_whitespace(value);
            let padding = width.saturating_sub(cell_width(&cell));
            format!("{cell}{}", " ".repeat(padding))
        })
        .collect::<Vec<_>>()
        .join("  ");
    line.trim_end().to_string()
}

fn cell_width(value: &str) -> usize {
    value.chars().count().max(1)
}

fn flatten_whitespace(value: &str) -> String {
    value
        .chars()
        .map(|ch| if matches!(ch, '\n' | '\r' | '\t') { ' ' } else { ch })
        .collect()
}
