//! CSV Dataset Loader

use crate::StorageError;
use data_validator::RawRecord;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;
use tracing::info;

/// Columns every dataset must carry besides the price
pub const REQUIRED_COLUMNS: [&str; 5] = ["brand", "model", "fuel", "gear", "year_model"];

/// Price column name
pub const PRICE_COLUMN: &str = "avg_price";

/// Accepted alternative name for the price column
pub const PRICE_COLUMN_ALIAS: &str = "avg_price_brl";

/// One CSV row; unparsable cells become `None` like empty ones
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default, deserialize_with = "csv::invalid_option")]
    brand: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    model: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    fuel: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    gear: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    year_model: Option<i32>,
    #[serde(
        default,
        alias = "avg_price_brl",
        deserialize_with = "csv::invalid_option"
    )]
    avg_price: Option<f64>,
}

impl From<CsvRow> for RawRecord {
    fn from(row: CsvRow) -> Self {
        Self {
            brand: row.brand,
            model: row.model,
            fuel: row.fuel,
            gear: row.gear,
            year_model: row.year_model,
            avg_price: row.avg_price,
        }
    }
}

/// Load raw rows from a CSV file
pub fn load_dataset(path: &Path) -> Result<Vec<RawRecord>, StorageError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => StorageError::DataSourceNotFound(path.to_path_buf()),
        _ => StorageError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        },
    })?;

    let rows = read_dataset(BufReader::new(file))?;
    info!("Loaded {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Read raw rows from any CSV source with a header line
pub fn read_dataset<R: Read>(reader: R) -> Result<Vec<RawRecord>, StorageError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::None).from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| StorageError::MalformedDataSource(e.to_string()))?
        .clone();
    check_headers(&headers)?;

    rdr.deserialize::<CsvRow>()
        .map(|row| {
            row.map(RawRecord::from)
                .map_err(|e| StorageError::MalformedDataSource(e.to_string()))
        })
        .collect()
}

fn check_headers(headers: &csv::StringRecord) -> Result<(), StorageError> {
    let has = |name: &str| headers.iter().any(|h| h == name);

    if let Some(missing) = REQUIRED_COLUMNS.iter().find(|c| !has(c)) {
        return Err(StorageError::MalformedDataSource(format!(
            "missing column '{}'",
            missing
        )));
    }
    if !has(PRICE_COLUMN) && !has(PRICE_COLUMN_ALIAS) {
        return Err(StorageError::MalformedDataSource(format!(
            "missing column '{}' (or '{}')",
            PRICE_COLUMN, PRICE_COLUMN_ALIAS
        )));
    }
    Ok(())
}
