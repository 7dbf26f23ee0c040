//! CSV loading into [`Dataset`]s.
//!
//! Input bytes are probed against a list of encodings (the requested one first,
//! then [`FALLBACK_ENCODINGS`]); the first that decodes cleanly wins. Header
//! labels are trimmed and duplicates are suffixed (`name`, `name.1`, ...).
//! Columns whose present cells all parse as numbers load as numbers.

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use encoding_rs::Encoding;
use log::{debug, info};
use thiserror::Error;

use crate::{
    data::{is_missing_marker, is_numeric_literal, parse_cell},
    dataset::Dataset,
    error::ReconcileError,
    io_utils,
};

pub const FALLBACK_ENCODINGS: &[&str] = &["utf-8", "gbk", "gb2312", "utf-8-sig"];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Unknown encoding '{0}'")]
    UnknownEncoding(String),
    #[error("Unable to decode {path:?} with any of: {tried}")]
    Undecodable { path: PathBuf, tried: String },
    #[error("Malformed CSV input")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Dataset(#[from] ReconcileError),
}

#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    pub delimiter: Option<u8>,
    pub encoding: Option<String>,
}

pub fn load_dataset(path: &Path, options: &LoadOptions) -> Result<Dataset, LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let candidates = candidate_encodings(options.encoding.as_deref())?;
    let mut decoded = None;
    for encoding in candidates.iter().copied() {
        if let Some(text) = io_utils::decode_bytes(&bytes, encoding) {
            decoded = Some((text, encoding));
            break;
        }
        debug!("{:?} is not valid {}", path, encoding.name());
    }
    let Some((text, encoding)) = decoded else {
        let tried = candidates
            .iter()
            .map(|e| e.name())
            .collect::<Vec<_>>()
            .join(", ");
        return Err(LoadError::Undecodable {
            path: path.to_path_buf(),
            tried,
        });
    };
    info!("Read {:?} using encoding {}", path, encoding.name());

    let delimiter = io_utils::resolve_input_delimiter(path, options.delimiter);
    parse_dataset(&text, delimiter)
}

/// Parses already-decoded CSV text.
pub fn parse_dataset(text: &str, delimiter: u8) -> Result<Dataset, LoadError> {
    let mut reader = io_utils::open_csv_reader(text.as_bytes(), delimiter, true);
    let headers = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect::<Vec<_>>();
    let columns = dedupe_headers(headers);

    let mut raw_rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        raw_rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }

    let numeric = (0..columns.len())
        .map(|idx| {
            let mut present = raw_rows
                .iter()
                .filter_map(|row| row.get(idx))
                .filter(|raw| !is_missing_marker(raw))
                .peekable();
            present.peek().is_some() && present.all(|raw| is_numeric_literal(raw))
        })
        .collect::<Vec<_>>();

    let rows = raw_rows
        .iter()
        .map(|row| {
            row.iter()
                .zip(&numeric)
                .map(|(raw, is_numeric)| parse_cell(raw, *is_numeric))
                .collect()
        })
        .collect();
    let dataset = Dataset::new(columns, rows)?;
    debug!(
        "Parsed dataset with {} row(s) and {} column(s)",
        dataset.row_count(),
        dataset.column_count()
    );
    Ok(dataset)
}

fn candidate_encodings(requested: Option<&str>) -> Result<Vec<&'static Encoding>, LoadError> {
    let mut candidates: Vec<&'static Encoding> = Vec::new();
    if let Some(label) = requested {
        let encoding = io_utils::encoding_for_label(label)
            .ok_or_else(|| LoadError::UnknownEncoding(label.to_string()))?;
        candidates.push(encoding);
    }
    for label in FALLBACK_ENCODINGS {
        if let Some(encoding) = io_utils::encoding_for_label(label)
            && !candidates.contains(&encoding)
        {
            candidates.push(encoding);
        }
    }
    Ok(candidates)
}

fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(headers.len());
    headers
        .into_iter()
        .map(|header| {
            let mut candidate = header.clone();
            let mut counter = 1usize;
            while seen.contains(&candidate) {
                candidate = format!("{header}.{counter}");
                counter += 1;
            }
            seen.insert(candidate.clone());
            candidate
        })
        .collect()
}
