//! CSV Data Loader Module
//! Loads the raw case CSV with Polars and cleans it into a [`CleanTable`].

use chrono::NaiveDate;
use log::{debug, info};
use polars::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use super::model::{CaseRecord, CleanTable};

/// Columns expected in the raw CSV.
const DATE_COL: &str = "Date";
const REGION_COL: &str = "State/UnionTerritory";
const CONFIRMED_COL: &str = "Confirmed";
const DEATHS_COL: &str = "Deaths";
const CURED_COL: &str = "Cured";

/// Date formats seen in the source data, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%y", "%d-%m-%Y"];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),
    #[error("Row {row}: unparsable date {value:?}")]
    MalformedDate { row: usize, value: String },
}

/// Loads and cleans case CSVs, memoizing one [`CleanTable`] per source path
/// so repeated UI interactions never re-parse the file.
pub struct DataLoader {
    cache: HashMap<PathBuf, Arc<CleanTable>>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    /// Load a CSV file, returning the cached table when this path was already
    /// loaded. The source is treated as immutable for the process lifetime;
    /// use [`DataLoader::invalidate`] to force a re-read.
    pub fn load_csv(&mut self, file_path: &Path) -> Result<Arc<CleanTable>, LoaderError> {
        if let Some(table) = self.cache.get(file_path) {
            debug!("cache hit for {}", file_path.display());
            return Ok(Arc::clone(table));
        }

        // Disable schema inference so every column arrives as a string and
        // cleaning happens in one place below.
        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(0))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        let raw_rows = df.height();
        let table = Arc::new(clean(&df)?);
        info!(
            "loaded {}: {} raw rows, {} cleaned rows, {} regions",
            file_path.display(),
            raw_rows,
            table.len(),
            table.regions().len()
        );

        self.cache.insert(file_path.to_path_buf(), Arc::clone(&table));
        Ok(table)
    }

    /// Drop the cached table for one source path.
    pub fn invalidate(&mut self, file_path: &Path) {
        self.cache.remove(file_path);
    }

    /// Drop every cached table.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

/// Clean a raw DataFrame into a [`CleanTable`].
///
/// Dates must parse. Everything else is lossy by policy: region labels are
/// trimmed, and non-numeric or missing counters become zero, which silently
/// masks bad cells in the source data rather than rejecting the row.
fn clean(df: &DataFrame) -> Result<CleanTable, LoaderError> {
    let dates = str_column(df, DATE_COL)?;
    let regions = str_column(df, REGION_COL)?;
    let confirmed = str_column(df, CONFIRMED_COL)?;
    let deaths = str_column(df, DEATHS_COL)?;
    let cured = str_column(df, CURED_COL)?;

    let mut records = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        records.push(CaseRecord {
            date: parse_date(dates.get(row).unwrap_or(""), row)?,
            region: regions.get(row).unwrap_or("").trim().to_string(),
            confirmed: to_non_negative_int(parse_or_default(confirmed.get(row))),
            deaths: to_non_negative_int(parse_or_default(deaths.get(row))),
            cured: to_non_negative_int(parse_or_default(cured.get(row))),
        });
    }

    Ok(CleanTable::from_records(records))
}

fn str_column<'a>(df: &'a DataFrame, name: &'static str) -> Result<&'a StringChunked, LoaderError> {
    df.column(name)
        .map_err(|_| LoaderError::MissingColumn(name))?
        .str()
        .map_err(LoaderError::CsvError)
}

/// Parse a calendar date, trying each format the source data uses.
fn parse_date(value: &str, row: usize) -> Result<NaiveDate, LoaderError> {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .ok_or_else(|| LoaderError::MalformedDate {
            row,
            value: value.to_string(),
        })
}

/// First counter-cleaning stage: read a cell as a number, defaulting missing
/// and non-numeric values to zero.
fn parse_or_default(value: Option<&str>) -> f64 {
    value
        .and_then(|v| v.trim().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Second counter-cleaning stage: floor at zero and truncate to a count.
fn to_non_negative_int(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value as u64
    } else {
        0
    }
}
