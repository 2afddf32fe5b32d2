//! Stock list loading and validation.
//!
//! The default list is embedded at compile time from `seed_data/stocks.yml`.
//! Entries are validated before they reach the analyzer; rejected entries
//! are reported and dropped.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::report::{ReportEntry, Reporter};
use crate::term::Horizon;

pub const MAX_SYMBOL_LENGTH: usize = 16;

#[derive(Error, Debug)]
pub enum StockListError {
    #[error("Failed to parse stock list YAML: {0}")]
    YamlParse(#[from] serde_yml::Error),
    #[error("Failed to read stock list {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Why a stock list entry was rejected. The display text is the reported message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntryError {
    #[error("Stock data doesn't have required field")]
    MissingField,
    #[error("Stock data's term type is not suitable")]
    UnsuitableTerm,
    #[error("Stock data's name is not a valid symbol")]
    InvalidSymbol,
}

#[derive(Deserialize, Debug)]
pub struct StockListFile {
    #[serde(default)]
    pub stocks: Vec<StockEntry>,
}

/// A raw stock list record. Both fields are optional on the wire so that
/// incomplete records can be reported instead of failing the whole file.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct StockEntry {
    pub name: Option<String>,
    pub term: Option<String>,
}

impl StockEntry {
    pub fn new(name: &str, term: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            term: Some(term.to_string()),
        }
    }
}

/// A validated analysis request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockRequest {
    pub symbol: String,
    pub horizon: Horizon,
}

pub fn parse_stock_list(yaml_content: &str) -> Result<Vec<StockEntry>, StockListError> {
    let file: StockListFile = serde_yml::from_str(yaml_content)?;
    Ok(file.stocks)
}

/// Load the stock list embedded at compile time.
pub fn load_default_stock_list() -> Result<Vec<StockEntry>, StockListError> {
    let yaml_content = include_str!("../../seed_data/stocks.yml");
    parse_stock_list(yaml_content)
}

pub fn load_stock_list_file(path: &Path) -> Result<Vec<StockEntry>, StockListError> {
    let content = std::fs::read_to_string(path).map_err(|source| StockListError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_stock_list(&content)
}

/// Trim, strip control characters, upper-case, and length-check a symbol.
pub fn normalize_symbol(input: &str) -> Option<String> {
    let cleaned: String = input
        .chars()
        .filter(|c| !c.is_control())
        .collect::<String>()
        .trim()
        .to_uppercase();
    if cleaned.is_empty() || cleaned.len() > MAX_SYMBOL_LENGTH || cleaned.contains(' ') {
        return None;
    }
    Some(cleaned)
}

pub fn validate_entry(entry: &StockEntry) -> Result<StockRequest, EntryError> {
    let name = present(entry.name.as_deref()).ok_or(EntryError::MissingField)?;
    let term = present(entry.term.as_deref()).ok_or(EntryError::MissingField)?;
    let horizon: Horizon = term.parse().map_err(|_| EntryError::UnsuitableTerm)?;
    let symbol = normalize_symbol(name).ok_or(EntryError::InvalidSymbol)?;
    Ok(StockRequest { symbol, horizon })
}

fn present(field: Option<&str>) -> Option<&str> {
    field.filter(|s| !s.trim().is_empty())
}

/// Validates every entry, reporting and dropping the rejected ones.
pub fn collect_requests(entries: &[StockEntry], reporter: &mut Reporter) -> Vec<StockRequest> {
    let mut requests = Vec::with_capacity(entries.len());
    for entry in entries {
        match validate_entry(entry) {
            Ok(request) => requests.push(request),
            Err(e) => {
                let data = serde_json::to_value(entry).unwrap_or_default();
                reporter.error(ReportEntry::new(e.to_string()).with_data(data));
            }
        }
    }
    tracing::info!("{} of {} stock entries accepted", requests.len(), entries.len());
    requests
}
