#![allow(dead_code)]

use ibkr2tv::adapters::csv_adapter::{decode_rows, decode_table};
use ibkr2tv::domain::error::ConvertError;
pub use ibkr2tv::domain::record::{NormalizedRecord, Side};
use ibkr2tv::ports::output_port::OutputPort;
use ibkr2tv::ports::source_port::SourcePort;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// In-memory files keyed by path.
pub struct MockSource {
    pub files: HashMap<PathBuf, String>,
}

impl MockSource {
    pub fn new() -> Self {
        Self {
            files: HashMap::new(),
        }
    }

    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        self.files.insert(PathBuf::from(path), content.to_string());
        self
    }

    fn content(&self, path: &Path) -> Result<&str, ConvertError> {
        self.files
            .get(path)
            .map(String::as_str)
            .ok_or_else(|| ConvertError::Read {
                path: path.display().to_string(),
                reason: "not found".into(),
            })
    }
}

impl SourcePort for MockSource {
    fn read_rows(&self, path: &Path) -> Result<Vec<Vec<String>>, ConvertError> {
        decode_rows(self.content(path)?.as_bytes(), &path.display().to_string())
    }

    fn read_table(&self, path: &Path) -> Result<Vec<HashMap<String, String>>, ConvertError> {
        decode_table(self.content(path)?.as_bytes(), &path.display().to_string())
    }
}

/// Captures every write instead of touching the filesystem.
pub struct MockOutput {
    pub writes: RefCell<Vec<(PathBuf, Vec<NormalizedRecord>)>>,
}

impl MockOutput {
    pub fn new() -> Self {
        Self {
            writes: RefCell::new(Vec::new()),
        }
    }

    pub fn last(&self) -> Vec<NormalizedRecord> {
        self.writes
            .borrow()
            .last()
            .map(|(_, records)| records.clone())
            .unwrap_or_default()
    }

    pub fn write_count(&self) -> usize {
        self.writes.borrow().len()
    }
}

impl OutputPort for MockOutput {
    fn write(&self, records: &[NormalizedRecord], path: &Path) -> Result<(), ConvertError> {
        self.writes
            .borrow_mut()
            .push((path.to_path_buf(), records.to_vec()));
        Ok(())
    }
}

pub fn paths(names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(PathBuf::from).collect()
}

/// English statement covering January, with one trade, one deposit, one
/// dividend and its withholding.
pub const EN_JANUARY: &str = "\
Statement,Header,Field Name,Field Value
Statement,Data,Period,\"January 1, 2025 - January 31, 2025\"
Trades,Header,DataDiscriminator,Asset Category,Currency,Symbol,Date/Time,Quantity,T. Price,C. Price,Proceeds,Comm/Fee,Basis,Realized P/L,MTM P/L,Code
Trades,Data,Order,Stocks,USD,AAPL,\"2025-01-03, 09:30:00\",10,190.25,191,-1902.5,-1.00,1903.5,0,8,O
Trades,Data,Order,Stocks,USD,SPY,\"2025-01-20, 15:59:58\",-3,580,579,1740,-1.02,-1700,38.98,3,C
Trades,SubTotal,,Stocks,USD,AAPL,,10,,,-1902.5,-1,,,,
Trades,Data,Order,Forex,USD,EUR.USD,\"2025-01-04, 10:00:00\",1000,1.03,,,0,,,,
Deposits & Withdrawals,Header,Currency,Settle Date,Description,Amount
Deposits & Withdrawals,Data,USD,2025-01-02,Electronic Fund Transfer,\"5,000\"
Deposits & Withdrawals,Data,Total,,,5000
Dividends,Header,Currency,Date,Description,Amount
Dividends,Data,USD,2025-01-15,SPY(US78462F1030) Cash Dividend USD 1.74 per Share,5.22
Dividends,Data,Total,,,5.22
Withholding Tax,Header,Currency,Date,Description,Amount,Code
Withholding Tax,Data,USD,2025-01-15,SPY(US78462F1030) Cash Dividend USD 1.74 per Share - US Tax,-1.57,
Withholding Tax,Data,Total,,,-1.57,
";

/// Overlaps January's last week: repeats the SPY sale with a differently
/// rounded commission and adds a February withdrawal.
pub const EN_FEBRUARY: &str = "\
Trades,Header,DataDiscriminator,Asset Category,Currency,Symbol,Date/Time,Quantity,T. Price,Comm/Fee
Trades,Data,Order,Stocks,USD,SPY,\"2025-01-20, 15:59:58\",-3,580,-1.0199
Trades,Data,Order,Stocks,HKD,0700,\"2025-02-05, 10:15:00\",100,380.2,-18.5
Deposits & Withdrawals,Header,Currency,Settle Date,Description,Amount
Deposits & Withdrawals,Data,USD,2025-02-10,Disbursement,-250.50
";

/// Chinese-language statement with the repeated symbol column.
pub const ZH_STATEMENT: &str = "\
交易,Header,DataDiscriminator,资产分类,货币,代码,代码,日期/时间,数量,交易价格,佣金/税
交易,Data,Order,股票,USD,IBM,IBM.X,\"2025-03-03, 10:00:00\",20,250.1,-0.35
存款和取款,Header,货币,结算日期,描述,金额
存款和取款,Data,USD,2025-03-01,电子资金转账,1000.00
股息,Header,货币,日期,描述,金额
股息,Data,USD,2025-03-10,IBM 现金股息,-5.00
代扣税,Header,货币,日期,描述,金额
代扣税,Data,USD,2025-03-10,IBM 美国税,-1.00
代扣税,Data,USD,2025-03-11,IBM 美国税 退还,2.00
";

pub const FLEX_PRIMARY: &str = "\u{feff}Symbol,ListingExchange,Description
SPY,ARCA,SPDR S&P 500
IBM,NYSE,INTL BUSINESS MACHINES
,NYSE,blank symbol
";

pub const FLEX_SECONDARY: &str = "Symbol,ListingExchange
SPY,NYSE
AAPL,NASDAQ
";
