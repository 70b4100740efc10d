//! CSV file adapter: statement and reference reader, TradingView writer.

use crate::domain::error::ConvertError;
use crate::domain::record::{NormalizedRecord, OUTPUT_HEADER};
use crate::ports::output_port::OutputPort;
use crate::ports::source_port::SourcePort;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::warn;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

#[derive(Debug, Default, Clone, Copy)]
pub struct CsvAdapter;

impl CsvAdapter {
    pub fn new() -> Self {
        Self
    }

    fn read_bytes(path: &Path) -> Result<Vec<u8>, ConvertError> {
        fs::read(path).map_err(|e| ConvertError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

fn strip_bom(content: &[u8]) -> &[u8] {
    content.strip_prefix(UTF8_BOM).unwrap_or(content)
}

/// Splits statement text into raw rows. Row lengths may vary.
pub fn decode_rows(content: &[u8], origin: &str) -> Result<Vec<Vec<String>>, ConvertError> {
    let content = strip_bom(content);
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content);

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| ConvertError::Csv {
            path: origin.to_string(),
            reason: e.to_string(),
        })?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

/// Decodes a single-header table. Undecodable rows are logged and skipped.
pub fn decode_table(
    content: &[u8],
    origin: &str,
) -> Result<Vec<HashMap<String, String>>, ConvertError> {
    let content = strip_bom(content);
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content);

    let header: Vec<String> = rdr
        .headers()
        .map_err(|e| ConvertError::Csv {
            path: origin.to_string(),
            reason: e.to_string(),
        })?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (line, result) in rdr.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!(file = origin, row = line + 1, error = %e, "skipping unreadable reference row");
                continue;
            }
        };
        let row = header
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), record.get(i).unwrap_or("").to_string()))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

/// Renders the TradingView import file.
pub fn encode_records(records: &[NormalizedRecord]) -> Result<Vec<u8>, csv::Error> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(OUTPUT_HEADER)?;
    for r in records {
        wtr.write_record(r.to_row())?;
    }
    wtr.into_inner().map_err(|e| e.into_error().into())
}

impl SourcePort for CsvAdapter {
    fn read_rows(&self, path: &Path) -> Result<Vec<Vec<String>>, ConvertError> {
        let bytes = Self::read_bytes(path)?;
        decode_rows(&bytes, &path.display().to_string())
    }

    fn read_table(&self, path: &Path) -> Result<Vec<HashMap<String, String>>, ConvertError> {
        let bytes = Self::read_bytes(path)?;
        decode_table(&bytes, &path.display().to_string())
    }
}

impl OutputPort for CsvAdapter {
    /// The file is written in one call after encoding succeeds, so a
    /// failed run never leaves a partial output behind.
    fn write(&self, records: &[NormalizedRecord], path: &Path) -> Result<(), ConvertError> {
        let write_err = |reason: String| ConvertError::Write {
            path: path.display().to_string(),
            reason,
        };
        let bytes = encode_records(records).map_err(|e| write_err(e.to_string()))?;
        fs::write(path, bytes).map_err(|e| write_err(e.to_string()))
    }
}
