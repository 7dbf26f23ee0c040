pub mod cli;
pub mod compare;
pub mod data;
pub mod dataset;
pub mod error;
pub mod export;
pub mod io_utils;
pub mod loader;
pub mod mapping;
pub mod naming;
pub mod reconcile;
pub mod report;
pub mod similarity;
pub mod table;
pub mod values;

use std::{env, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, debug, info};

pub use compare::{Comparator, ComparisonResult, FieldResult, KeyedResult};
pub use dataset::Dataset;
pub use error::{ReconcileError, Side};
pub use mapping::{
    DEFAULT_SIMILARITY_THRESHOLD, FieldMapping, FieldPair, GreedyAssignment, MatchingStrategy,
};
pub use values::{ValueSetAnalysis, analyze};

use crate::{
    cli::{Cli, Commands, CompareArgs, InputArgs, MapArgs, ValuesArgs},
    loader::LoadOptions,
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("csv_reconcile", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Map(args) => handle_map(&args),
        Commands::Compare(args) => handle_compare(&args),
        Commands::Values(args) => handle_values(&args),
    }
}

fn load_inputs(args: &InputArgs) -> Result<(Dataset, Dataset)> {
    let left_options = LoadOptions {
        delimiter: args.delimiter,
        encoding: args.left_encoding.clone(),
    };
    let right_options = LoadOptions {
        delimiter: args.delimiter,
        encoding: args.right_encoding.clone(),
    };
    if let Some(delimiter) = args.delimiter {
        debug!(
            "Using delimiter '{}' for both inputs",
            io_utils::printable_delimiter(delimiter)
        );
    }
    let left = loader::load_dataset(&args.left, &left_options)
        .with_context(|| format!("Loading left input {:?}", args.left))?;
    let right = loader::load_dataset(&args.right, &right_options)
        .with_context(|| format!("Loading right input {:?}", args.right))?;
    info!("Left columns: {:?}", left.columns());
    info!("Right columns: {:?}", right.columns());
    Ok((left, right))
}

fn comparator(args: &InputArgs) -> Result<Comparator> {
    let comparator = Comparator::new(args.threshold).context("Configuring comparator")?;
    info!(
        "Matching columns with {} assignment at threshold {}",
        comparator.strategy().name(),
        comparator.threshold()
    );
    Ok(comparator)
}

fn handle_map(args: &MapArgs) -> Result<()> {
    let comparator = comparator(&args.input)?;
    let (left, right) = load_inputs(&args.input)?;
    let mapping = comparator.field_mapping(&left, &right);
    info!(
        "Matched {} of {} left column(s) at threshold {}",
        mapping.len(),
        left.column_count(),
        comparator.threshold()
    );
    if args.json {
        let json = serde_json::to_string_pretty(&mapping).context("Serializing field mapping")?;
        println!("{json}");
    } else {
        print!("{}", report::render_mapping(&mapping));
    }
    Ok(())
}

fn handle_compare(args: &CompareArgs) -> Result<()> {
    let comparator = comparator(&args.input)?;
    let (left, right) = load_inputs(&args.input)?;
    let result = comparator
        .compare(&left, &right, args.keys.pair())
        .context("Comparing inputs")?;

    print!("{}", report::render_mapping(result.mapping()));
    println!();
    print!("{}", report::render_result(&result, args.preview));

    if let ComparisonResult::Fields(fields) = &result
        && !fields.has_common_fields()
    {
        info!("Nothing to compare; skipping value analysis and export");
        return Ok(());
    }

    if let Some(field) = &args.field {
        let analysis = analyze(&result, field)
            .with_context(|| format!("Analysing values of '{field}'"))?;
        println!();
        print!("{}", report::render_analysis(&analysis, 10));
    }
    if let Some(path) = &args.export {
        export::export_workbook(&result, path)?;
    }
    Ok(())
}

fn handle_values(args: &ValuesArgs) -> Result<()> {
    let comparator = comparator(&args.input)?;
    let (left, right) = load_inputs(&args.input)?;
    let result = comparator
        .compare(&left, &right, args.keys.pair())
        .context("Comparing inputs")?;
    let analysis = analyze(&result, &args.field)
        .with_context(|| format!("Analysing values of '{}'", args.field))?;
    print!("{}", report::render_analysis(&analysis, args.samples));
    Ok(())
}
