use std::path::PathBuf;

use thiserror::Error;
use umya_spreadsheet::XlsxError;

use crate::models::record::RowId;

/// Reasons a workbook could not be turned into records.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read spreadsheet {path}: {source}")]
    Read {
        path: PathBuf,
        source: XlsxError,
    },
    #[error("Sheet {name:?} not found in {path}")]
    MissingSheet { path: PathBuf, name: String },
    #[error("Spreadsheet {path} has no sheets")]
    EmptyBook { path: PathBuf },
    #[error("Required column {column:?} is missing from the header row of {path}")]
    MissingColumn { path: PathBuf, column: String },
}

/// Errors that may occur while loading or saving review settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid settings at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to serialize settings for {path}: {source}")]
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid settings: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("Row {row} does not exist, the sheet has {len} data rows")]
    InvalidRow { row: RowId, len: usize },
    #[error("Failed to write spreadsheet {path}: {source}")]
    Persist {
        path: PathBuf,
        source: XlsxError,
    },
    #[error("Page {page} is outside 1..={page_count}")]
    InvalidPage { page: usize, page_count: usize },
    #[error(transparent)]
    Settings(#[from] SettingsError),
}
