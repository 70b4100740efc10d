//! Section and column names of the activity statement.
//!
//! IBKR localizes both the section tags and the header names of the
//! activity statement. The converters read fields through a
//! [`StatementLayout`] so the same rules apply to every language.

use crate::domain::section::Sections;
use std::fmt;
use std::str::FromStr;

/// Marker in the trades `DataDiscriminator` column for real order fills.
pub const ORDER_DISCRIMINATOR: &str = "Order";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeColumns {
    pub discriminator: &'static str,
    pub asset_class: &'static str,
    pub equities_marker: &'static str,
    pub symbol: &'static str,
    pub currency: &'static str,
    pub quantity: &'static str,
    pub price: &'static str,
    pub commission: &'static str,
    pub date_time: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CashColumns {
    pub description: &'static str,
    pub amount: &'static str,
    pub date: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementLayout {
    pub name: &'static str,
    pub trades_section: &'static str,
    pub transfers_section: &'static str,
    pub dividends_section: &'static str,
    pub taxes_section: &'static str,
    pub trades: TradeColumns,
    /// Deposits & withdrawals are dated by settlement date.
    pub transfers: CashColumns,
    /// Dividends and withholding tax share one shape.
    pub income: CashColumns,
}

impl StatementLayout {
    pub fn chinese() -> Self {
        Self {
            name: "zh",
            trades_section: "交易",
            transfers_section: "存款和取款",
            dividends_section: "股息",
            taxes_section: "代扣税",
            trades: TradeColumns {
                discriminator: "DataDiscriminator",
                asset_class: "资产分类",
                equities_marker: "股票",
                symbol: "代码",
                currency: "货币",
                quantity: "数量",
                price: "交易价格",
                commission: "佣金/税",
                date_time: "日期/时间",
            },
            transfers: CashColumns {
                description: "描述",
                amount: "金额",
                date: "结算日期",
            },
            income: CashColumns {
                description: "描述",
                amount: "金额",
                date: "日期",
            },
        }
    }

    pub fn english() -> Self {
        Self {
            name: "en",
            trades_section: "Trades",
            transfers_section: "Deposits & Withdrawals",
            dividends_section: "Dividends",
            taxes_section: "Withholding Tax",
            trades: TradeColumns {
                discriminator: "DataDiscriminator",
                asset_class: "Asset Category",
                equities_marker: "Stocks",
                symbol: "Symbol",
                currency: "Currency",
                quantity: "Quantity",
                price: "T. Price",
                commission: "Comm/Fee",
                date_time: "Date/Time",
            },
            transfers: CashColumns {
                description: "Description",
                amount: "Amount",
                date: "Settle Date",
            },
            income: CashColumns {
                description: "Description",
                amount: "Amount",
                date: "Date",
            },
        }
    }

    fn section_names(&self) -> [&'static str; 4] {
        [
            self.trades_section,
            self.transfers_section,
            self.dividends_section,
            self.taxes_section,
        ]
    }

    /// True when the statement defines any of this layout's sections.
    pub fn matches(&self, sections: &Sections) -> bool {
        self.section_names().iter().any(|s| sections.contains(s))
    }
}

/// Layout choice from the command line or config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutChoice {
    Chinese,
    English,
    #[default]
    Auto,
}

impl LayoutChoice {
    /// Resolves `Auto` against a parsed statement; Chinese when nothing matches.
    pub fn select(&self, sections: &Sections) -> StatementLayout {
        match self {
            LayoutChoice::Chinese => StatementLayout::chinese(),
            LayoutChoice::English => StatementLayout::english(),
            LayoutChoice::Auto => {
                let english = StatementLayout::english();
                if english.matches(sections) {
                    english
                } else {
                    StatementLayout::chinese()
                }
            }
        }
    }
}

impl FromStr for LayoutChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "zh" | "chinese" => Ok(LayoutChoice::Chinese),
            "en" | "english" => Ok(LayoutChoice::English),
            "auto" => Ok(LayoutChoice::Auto),
            other => Err(format!("unknown layout '{other}' (expected zh, en or auto)")),
        }
    }
}

impl fmt::Display for LayoutChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LayoutChoice::Chinese => "zh",
            LayoutChoice::English => "en",
            LayoutChoice::Auto => "auto",
        };
        f.write_str(s)
    }
}
