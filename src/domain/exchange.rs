//! Symbol -> TradingView market prefix resolution.
//!
//! Listing exchanges come from auxiliary Flex reference exports
//! (`Symbol`, `ListingExchange` columns). IBKR exchange codes are
//! translated to TradingView prefixes through an [`ExchangeTable`].

use std::collections::HashMap;
use tracing::debug;

pub const SYMBOL_COLUMN: &str = "Symbol";
pub const LISTING_EXCHANGE_COLUMN: &str = "ListingExchange";

pub const DEFAULT_PREFIX: &str = "NASDAQ";
pub const HONG_KONG_PREFIX: &str = "HKEX";
pub const HONG_KONG_CURRENCY: &str = "HKD";

const BUILTIN_CODES: [(&str, &str); 5] = [
    ("NASDAQ", "NASDAQ"),
    ("NYSE", "NYSE"),
    ("AMEX", "AMEX"),
    ("SEHK", "HKEX"),
    ("ARCA", "AMEX"),
];

/// IBKR exchange code -> TradingView prefix. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeTable {
    codes: HashMap<String, String>,
}

impl Default for ExchangeTable {
    fn default() -> Self {
        Self {
            codes: BUILTIN_CODES
                .iter()
                .map(|(code, prefix)| (code.to_string(), prefix.to_string()))
                .collect(),
        }
    }
}

impl ExchangeTable {
    pub fn empty() -> Self {
        Self {
            codes: HashMap::new(),
        }
    }

    /// Adds or overrides entries. Codes are matched upper-cased.
    pub fn extend<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (code, prefix) in entries {
            self.codes
                .insert(code.as_ref().trim().to_uppercase(), prefix.into());
        }
        self
    }

    /// Known prefix for `code`, or the code itself.
    pub fn translate(&self, code: &str) -> String {
        self.codes
            .get(code)
            .or_else(|| self.codes.get(&code.to_uppercase()))
            .cloned()
            .unwrap_or_else(|| code.to_string())
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// Prefixes that do not come from the reference map.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketRules {
    pub default_prefix: String,
    pub hong_kong_prefix: String,
    pub hong_kong_currency: String,
}

impl Default for MarketRules {
    fn default() -> Self {
        Self {
            default_prefix: DEFAULT_PREFIX.to_string(),
            hong_kong_prefix: HONG_KONG_PREFIX.to_string(),
            hong_kong_currency: HONG_KONG_CURRENCY.to_string(),
        }
    }
}

/// Read-only symbol map plus the market fallback rules.
#[derive(Debug, Clone, Default)]
pub struct SymbolResolver {
    exchanges: HashMap<String, String>,
    rules: MarketRules,
}

impl SymbolResolver {
    pub fn new(exchanges: HashMap<String, String>, rules: MarketRules) -> Self {
        Self { exchanges, rules }
    }

    /// Builds the symbol map from reference tables in order. The first
    /// table to list a symbol wins; rows with a blank symbol or exchange
    /// are skipped.
    pub fn from_reference_tables<'a, I>(tables: I, table: &ExchangeTable, rules: MarketRules) -> Self
    where
        I: IntoIterator<Item = &'a [HashMap<String, String>]>,
    {
        let mut exchanges = HashMap::new();
        let mut skipped = 0usize;
        for rows in tables {
            for row in rows {
                let symbol = row.get(SYMBOL_COLUMN).map(|s| s.trim()).unwrap_or("");
                let code = row
                    .get(LISTING_EXCHANGE_COLUMN)
                    .map(|s| s.trim())
                    .unwrap_or("");
                if symbol.is_empty() || code.is_empty() {
                    skipped += 1;
                    continue;
                }
                exchanges
                    .entry(symbol.to_string())
                    .or_insert_with(|| table.translate(code));
            }
        }
        if skipped > 0 {
            debug!(skipped, "skipped reference rows without symbol or exchange");
        }
        Self { exchanges, rules }
    }

    /// Market prefix for a symbol traded in `currency`.
    pub fn market_prefix(&self, symbol: &str, currency: &str) -> &str {
        if currency == self.rules.hong_kong_currency {
            return &self.rules.hong_kong_prefix;
        }
        self.exchanges
            .get(symbol)
            .map(String::as_str)
            .unwrap_or(self.rules.default_prefix.as_str())
    }

    /// `PREFIX:SYMBOL` as TradingView expects it.
    pub fn resolve(&self, symbol: &str, currency: &str) -> String {
        format!("{}:{}", self.market_prefix(symbol, currency), symbol)
    }

    /// Number of symbols with a mapped exchange.
    pub fn mapped_count(&self) -> usize {
        self.exchanges.len()
    }

    pub fn rules(&self) -> &MarketRules {
        &self.rules
    }
}
