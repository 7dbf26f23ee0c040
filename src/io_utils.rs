//! Delimiter, encoding, and CSV reader helpers shared by the loader.
//!
//! - **Delimiter resolution**: explicit override, otherwise by extension
//!   (`.tsv` → tab, anything else → comma).
//! - **Encoding**: labels resolve through `encoding_rs`; `utf-8-sig` is
//!   accepted as UTF-8 with its byte-order mark removed.
//! - **Reader construction**: strict (non-flexible) readers so ragged rows
//!   surface as errors instead of silently misaligned cells.

use std::{io::Read, path::Path};

use encoding_rs::{Encoding, UTF_8};

pub const DEFAULT_CSV_DELIMITER: u8 = b',';
pub const DEFAULT_TSV_DELIMITER: u8 = b'\t';

pub fn encoding_for_label(label: &str) -> Option<&'static Encoding> {
    let trimmed = label.trim();
    if trimmed.eq_ignore_ascii_case("utf-8-sig") || trimmed.eq_ignore_ascii_case("utf8-sig") {
        return Some(UTF_8);
    }
    Encoding::for_label(trimmed.as_bytes())
}

pub fn resolve_input_delimiter(path: &Path, provided: Option<u8>) -> u8 {
    provided.unwrap_or_else(|| match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => DEFAULT_TSV_DELIMITER,
        _ => DEFAULT_CSV_DELIMITER,
    })
}

pub fn open_csv_reader<R>(reader: R, delimiter: u8, has_headers: bool) -> csv::Reader<R>
where
    R: Read,
{
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(has_headers)
        .delimiter(delimiter)
        .double_quote(true)
        .flexible(false);
    builder.from_reader(reader)
}

/// Decodes `bytes` strictly, dropping a leading byte-order mark of the same
/// encoding. Returns `None` when the bytes are not valid in `encoding`.
pub fn decode_bytes(bytes: &[u8], encoding: &'static Encoding) -> Option<String> {
    let (text, had_errors) = encoding.decode_with_bom_removal(bytes);
    if had_errors {
        None
    } else {
        Some(text.into_owned())
    }
}

pub(crate) fn printable_delimiter(delimiter: u8) -> String {
    match delimiter {
        b',' => ",".to_string(),
        b'\t' => "\\t".to_string(),
        other => (other as char).to_string(),
    }
}
