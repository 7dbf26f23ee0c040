use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::mapping::DEFAULT_SIMILARITY_THRESHOLD;

#[derive(Debug, Parser)]
#[command(author, version, about = "Match columns and compare records across two CSV files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Infer the column mapping between two CSV files
    Map(MapArgs),
    /// Compare two CSV files by key columns or by matched fields
    Compare(CompareArgs),
    /// Compare the distinct values of one field across two CSV files
    Values(ValuesArgs),
}

#[derive(Debug, Args)]
pub struct InputArgs {
    /// Left CSV input
    #[arg(long = "left")]
    pub left: PathBuf,
    /// Right CSV input
    #[arg(long = "right")]
    pub right: PathBuf,
    /// CSV delimiter character for both inputs (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding to try first for the left file
    #[arg(long = "left-encoding")]
    pub left_encoding: Option<String>,
    /// Character encoding to try first for the right file
    #[arg(long = "right-encoding")]
    pub right_encoding: Option<String>,
    /// Minimum header similarity (0.0 to 1.0) for two columns to match
    #[arg(short = 't', long, default_value_t = DEFAULT_SIMILARITY_THRESHOLD)]
    pub threshold: f64,
}

#[derive(Debug, Args)]
pub struct KeyArgs {
    /// Key column in the left file
    #[arg(long = "left-key", requires = "right_key")]
    pub left_key: Option<String>,
    /// Key column in the right file
    #[arg(long = "right-key", requires = "left_key")]
    pub right_key: Option<String>,
}

impl KeyArgs {
    pub fn pair(&self) -> Option<(&str, &str)> {
        match (&self.left_key, &self.right_key) {
            (Some(left), Some(right)) => Some((left.as_str(), right.as_str())),
            _ => None,
        }
    }
}

#[derive(Debug, Args)]
pub struct MapArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Emit the mapping as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct CompareArgs {
    #[command(flatten)]
    pub input: InputArgs,
    #[command(flatten)]
    pub keys: KeyArgs,
    /// Also analyse the values of this (left-side) field
    #[arg(long)]
    pub field: Option<String>,
    /// Write the comparison to an .xlsx workbook
    #[arg(long)]
    pub export: Option<PathBuf>,
    /// Number of rows of each compared table to print
    #[arg(long, default_value_t = 0)]
    pub preview: usize,
}

#[derive(Debug, Args)]
pub struct ValuesArgs {
    #[command(flatten)]
    pub input: InputArgs,
    #[command(flatten)]
    pub keys: KeyArgs,
    /// Field (left-side name) to analyse
    #[arg(long)]
    pub field: String,
    /// Number of common values to list
    #[arg(long, default_value_t = 10)]
    pub samples: usize,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
