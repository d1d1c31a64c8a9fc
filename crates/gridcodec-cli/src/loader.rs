//! Record and event file loading
//!
//! Both files are either a JSON array or JSON Lines (one document per line).

use gridcodec_codec::Record;
use gridcodec_session::GridEvent;
use gridcodec_types::ValueError;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid JSON in entry {index}: {source}")]
    Json {
        index: usize,
        source: serde_json::Error,
    },

    #[error("Invalid record {index}: {source}")]
    Record { index: usize, source: ValueError },
}

pub fn load_records(path: &Path, infer_dates: bool) -> Result<Vec<Record>, LoadError> {
    let records = parse_records(&read(path)?, infer_dates)?;
    debug!(path = %path.display(), records = records.len(), "loaded records");
    Ok(records)
}

pub fn parse_records(text: &str, infer_dates: bool) -> Result<Vec<Record>, LoadError> {
    documents(text)?
        .into_iter()
        .enumerate()
        .map(|(index, json)| {
            Record::from_json_object(json, infer_dates)
                .map_err(|source| LoadError::Record { index, source })
        })
        .collect()
}

pub fn load_events(path: &Path) -> Result<Vec<GridEvent>, LoadError> {
    let events = parse_events(&read(path)?)?;
    debug!(path = %path.display(), events = events.len(), "loaded events");
    Ok(events)
}

pub fn parse_events(text: &str) -> Result<Vec<GridEvent>, LoadError> {
    documents(text)?
        .into_iter()
        .enumerate()
        .map(|(index, json)| {
            serde_json::from_value(json).map_err(|source| LoadError::Json { index, source })
        })
        .collect()
}

fn read(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Split a JSON array or a JSON Lines document into its entries
fn documents(text: &str) -> Result<Vec<serde_json::Value>, LoadError> {
    if text.trim_start().starts_with('[') {
        return serde_json::from_str(text).map_err(|source| LoadError::Json { index: 0, source });
    }

    serde_json::Deserializer::from_str(text)
        .into_iter::<serde_json::Value>()
        .enumerate()
        .map(|(index, doc)| doc.map_err(|source| LoadError::Json { index, source }))
        .collect()
}
