//! Normalized TradingView portfolio record.

use std::fmt;

/// Symbol used for every cash-category row.
pub const CASH_SYMBOL: &str = "$CASH";

/// Output column order of the TradingView import file.
pub const OUTPUT_HEADER: [&str; 6] = [
    "Symbol",
    "Side",
    "Qty",
    "Fill Price",
    "Commission",
    "Closing Time",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Buy,
    Sell,
    Deposit,
    Withdrawal,
    Dividend,
    TaxesAndFees,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "Buy",
            Side::Sell => "Sell",
            Side::Deposit => "Deposit",
            Side::Withdrawal => "Withdrawal",
            Side::Dividend => "Dividend",
            Side::TaxesAndFees => "Taxes and fees",
        }
    }

    pub fn is_trade(&self) -> bool {
        matches!(self, Side::Buy | Side::Sell)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One output row. `qty` is never negative; direction lives in `side`.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    pub symbol: String,
    pub side: Side,
    pub qty: f64,
    pub fill_price: String,
    pub commission: Option<f64>,
    pub closing_time: String,
}

impl NormalizedRecord {
    /// A `$CASH` row: no fill price, no commission.
    pub fn cash(side: Side, qty: f64, closing_time: String) -> Self {
        Self {
            symbol: CASH_SYMBOL.to_string(),
            side,
            qty,
            fill_price: String::new(),
            commission: None,
            closing_time,
        }
    }

    /// Fields in `OUTPUT_HEADER` order, rendered as output text.
    pub fn to_row(&self) -> [String; 6] {
        [
            self.symbol.clone(),
            self.side.to_string(),
            self.qty.to_string(),
            self.fill_price.clone(),
            self.commission.map(|c| c.to_string()).unwrap_or_default(),
            self.closing_time.clone(),
        ]
    }
}

/// Appends the midnight time component used for date-only rows.
/// Empty dates stay empty.
pub fn date_at_midnight(date: &str) -> String {
    let date = date.trim();
    if date.is_empty() {
        String::new()
    } else {
        format!("{} 0:00:00", date)
    }
}

/// `"2025-08-14, 11:32:43"` -> `"2025-08-14 11:32:43"`.
pub fn normalize_trade_time(raw: &str) -> String {
    raw.trim().replace(", ", " ")
}
