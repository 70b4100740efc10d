//! Per-statement orchestration: parse sections, run every converter.

use crate::domain::convert::{convert_dividends, convert_taxes, convert_trades, convert_transfers};
use crate::domain::error::ConvertError;
use crate::domain::exchange::SymbolResolver;
use crate::domain::layout::{LayoutChoice, StatementLayout};
use crate::domain::record::NormalizedRecord;
use crate::domain::section::{Sections, parse_rows};
use crate::ports::source_port::SourcePort;
use std::path::Path;
use tracing::debug;

/// Converted rows of one statement plus the counts reported per file.
#[derive(Debug, Clone)]
pub struct StatementResult {
    pub layout: &'static str,
    pub records: Vec<NormalizedRecord>,
    pub trade_count: usize,
    pub cash_count: usize,
}

/// Runs the four converters in fixed order: trades, transfers, dividends,
/// taxes. Sections the statement does not define contribute nothing.
pub fn process_sections(
    sections: &Sections,
    resolver: &SymbolResolver,
    layout: &StatementLayout,
) -> Result<StatementResult, ConvertError> {
    let mut records = convert_trades(sections.get(layout.trades_section), resolver, layout)?;
    records.extend(convert_transfers(
        sections.get(layout.transfers_section),
        resolver,
        layout,
    )?);
    records.extend(convert_dividends(
        sections.get(layout.dividends_section),
        resolver,
        layout,
    )?);
    records.extend(convert_taxes(
        sections.get(layout.taxes_section),
        resolver,
        layout,
    )?);

    let trade_count = records.iter().filter(|r| r.side.is_trade()).count();
    let cash_count = records.len() - trade_count;

    Ok(StatementResult {
        layout: layout.name,
        records,
        trade_count,
        cash_count,
    })
}

pub fn process_statement(
    source: &dyn SourcePort,
    path: &Path,
    resolver: &SymbolResolver,
    choice: LayoutChoice,
) -> Result<StatementResult, ConvertError> {
    let sections = parse_rows(source.read_rows(path)?);
    let layout = choice.select(&sections);
    debug!(
        path = %path.display(),
        layout = layout.name,
        sections = sections.len(),
        "parsed statement"
    );
    process_sections(&sections, resolver, &layout)
}
