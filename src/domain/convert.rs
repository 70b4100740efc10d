//! Section-specific conversion rules.
//!
//! Each converter takes the raw records of one section and returns
//! normalized records in input order. Summary rows in the cash sections
//! have the same shape as data rows but carry no description or amount,
//! so every cash converter drops those first.

use crate::domain::error::ConvertError;
use crate::domain::exchange::SymbolResolver;
use crate::domain::layout::{CashColumns, ORDER_DISCRIMINATOR, StatementLayout};
use crate::domain::record::{NormalizedRecord, Side, date_at_midnight, normalize_trade_time};
use crate::domain::section::RawRecord;

/// Parses a broker number. Thousands separators are accepted.
pub fn parse_number(raw: &str, section: &str, field: &str) -> Result<f64, ConvertError> {
    let cleaned = raw.trim().replace(',', "");
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ConvertError::InvalidNumber {
            section: section.to_string(),
            field: field.to_string(),
            value: raw.to_string(),
        })
}

/// Stock order fills. Quantity sign selects Buy (`> 0`) or Sell.
pub fn convert_trades(
    records: &[RawRecord],
    resolver: &SymbolResolver,
    layout: &StatementLayout,
) -> Result<Vec<NormalizedRecord>, ConvertError> {
    let cols = &layout.trades;
    let section = layout.trades_section;
    let mut out = Vec::new();

    for r in records {
        if r.get(cols.discriminator) != ORDER_DISCRIMINATOR {
            continue;
        }
        if r.get(cols.asset_class) != cols.equities_marker {
            continue;
        }

        let symbol = r.get(cols.symbol).trim();
        let currency = r.get(cols.currency).trim();

        let signed = parse_number(r.get(cols.quantity), section, cols.quantity)?;
        let side = if signed > 0.0 { Side::Buy } else { Side::Sell };

        let fee_raw = r.get(cols.commission);
        let commission = if fee_raw.trim().is_empty() {
            None
        } else {
            Some(parse_number(fee_raw, section, cols.commission)?.abs())
        };

        out.push(NormalizedRecord {
            symbol: resolver.resolve(symbol, currency),
            side,
            qty: signed.abs(),
            fill_price: r.get(cols.price).trim().to_string(),
            commission,
            closing_time: normalize_trade_time(r.get(cols.date_time)),
        });
    }

    Ok(out)
}

/// Description and signed amount of a cash row, or `None` for summary rows.
fn cash_amount(
    r: &RawRecord,
    cols: &CashColumns,
    section: &str,
) -> Result<Option<f64>, ConvertError> {
    if r.get(cols.description).trim().is_empty() {
        return Ok(None);
    }
    let raw = r.get(cols.amount);
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_number(raw, section, cols.amount).map(Some)
}

/// Deposits (`> 0`) and withdrawals, dated by settlement date.
pub fn convert_transfers(
    records: &[RawRecord],
    _resolver: &SymbolResolver,
    layout: &StatementLayout,
) -> Result<Vec<NormalizedRecord>, ConvertError> {
    let cols = &layout.transfers;
    let mut out = Vec::new();

    for r in records {
        let Some(amount) = cash_amount(r, cols, layout.transfers_section)? else {
            continue;
        };
        let side = if amount > 0.0 {
            Side::Deposit
        } else {
            Side::Withdrawal
        };
        out.push(NormalizedRecord::cash(
            side,
            amount.abs(),
            date_at_midnight(r.get(cols.date)),
        ));
    }

    Ok(out)
}

/// Positive dividend payments. Reversals and adjustments (`<= 0`) are dropped.
pub fn convert_dividends(
    records: &[RawRecord],
    _resolver: &SymbolResolver,
    layout: &StatementLayout,
) -> Result<Vec<NormalizedRecord>, ConvertError> {
    let cols = &layout.income;
    let mut out = Vec::new();

    for r in records {
        let Some(amount) = cash_amount(r, cols, layout.dividends_section)? else {
            continue;
        };
        if amount <= 0.0 {
            continue;
        }
        out.push(NormalizedRecord::cash(
            Side::Dividend,
            amount,
            date_at_midnight(r.get(cols.date)),
        ));
    }

    Ok(out)
}

/// Withholding debits only; refunds (`>= 0`) are dropped.
pub fn convert_taxes(
    records: &[RawRecord],
    _resolver: &SymbolResolver,
    layout: &StatementLayout,
) -> Result<Vec<NormalizedRecord>, ConvertError> {
    let cols = &layout.income;
    let mut out = Vec::new();

    for r in records {
        let Some(amount) = cash_amount(r, cols, layout.taxes_section)? else {
            continue;
        };
        if amount >= 0.0 {
            continue;
        }
        out.push(NormalizedRecord::cash(
            Side::TaxesAndFees,
            amount.abs(),
            date_at_midnight(r.get(cols.date)),
        ));
    }

    Ok(out)
}
