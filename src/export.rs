//! Spreadsheet export of comparison results.
//!
//! One worksheet per section: the two compared tables (`Left_Common` /
//! `Right_Common` for keyed results, `Left_Data` / `Right_Data` for field
//! results) followed by `Field_Mappings`.

use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::{
    compare::ComparisonResult,
    data::Value,
    dataset::Dataset,
    mapping::FieldMapping,
};

pub const MAPPING_SHEET: &str = "Field_Mappings";

pub fn sheet_names(result: &ComparisonResult) -> [&'static str; 3] {
    match result {
        ComparisonResult::Keyed(_) => ["Left_Common", "Right_Common", MAPPING_SHEET],
        ComparisonResult::Fields(_) => ["Left_Data", "Right_Data", MAPPING_SHEET],
    }
}

pub fn export_workbook(result: &ComparisonResult, path: &Path) -> Result<()> {
    let [left_sheet, right_sheet, mapping_sheet] = sheet_names(result);
    let (left, right) = result.tables();
    let header = Format::new().set_bold();

    let mut workbook = Workbook::new();
    write_dataset(workbook.add_worksheet(), left_sheet, left, &header)
        .with_context(|| format!("Writing sheet {left_sheet}"))?;
    write_dataset(workbook.add_worksheet(), right_sheet, right, &header)
        .with_context(|| format!("Writing sheet {right_sheet}"))?;
    write_mapping(workbook.add_worksheet(), mapping_sheet, result.mapping(), &header)
        .with_context(|| format!("Writing sheet {mapping_sheet}"))?;
    workbook
        .save(path)
        .with_context(|| format!("Saving workbook {path:?}"))?;
    info!(
        "Exported comparison ({} mapped field(s)) to {:?}",
        result.mapping().len(),
        path
    );
    Ok(())
}

fn write_dataset(
    sheet: &mut Worksheet,
    name: &str,
    dataset: &Dataset,
    header: &Format,
) -> Result<()> {
    sheet.set_name(name)?;
    for (col, label) in dataset.columns().iter().enumerate() {
        sheet.write_string_with_format(0, column_number(col)?, label, header)?;
    }
    for (row_idx, row) in dataset.rows().iter().enumerate() {
        let row_number = u32::try_from(row_idx + 1).context("Too many rows for a worksheet")?;
        for (col, cell) in row.iter().enumerate() {
            let col = column_number(col)?;
            match cell {
                Some(Value::Number(n)) => {
                    sheet.write_number(row_number, col, *n)?;
                }
                Some(Value::Text(s)) => {
                    sheet.write_string(row_number, col, s)?;
                }
                None => {}
            }
        }
    }
    Ok(())
}

fn write_mapping(
    sheet: &mut Worksheet,
    name: &str,
    mapping: &FieldMapping,
    header: &Format,
) -> Result<()> {
    sheet.set_name(name)?;
    sheet.write_string_with_format(0, 0, "Left_Field", header)?;
    sheet.write_string_with_format(0, 1, "Right_Field", header)?;
    for (idx, pair) in mapping.iter().enumerate() {
        let row = u32::try_from(idx + 1).context("Too many mapped fields")?;
        sheet.write_string(row, 0, &pair.left)?;
        sheet.write_string(row, 1, &pair.right)?;
    }
    Ok(())
}

fn column_number(col: usize) -> Result<u16> {
    u16::try_from(col).context("Too many columns for a worksheet")
}
