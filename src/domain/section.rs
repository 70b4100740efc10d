//! Multi-section statement parser.
//!
//! An activity statement is one flat CSV stream in which every row starts
//! with a section tag and a row kind:
//!
//! ```text
//! Trades,Header,DataDiscriminator,Asset Category,Currency,Symbol,...
//! Trades,Data,Order,Stocks,USD,AAPL,...
//! Dividends,Header,Currency,Date,Description,Amount
//! ```
//!
//! [`SectionParser`] turns those rows into per-section lists of
//! [`RawRecord`]s keyed by the most recent header for that section.

use std::collections::HashMap;
use tracing::debug;

pub const HEADER_KIND: &str = "Header";
pub const DATA_KIND: &str = "Data";

/// One Data row keyed by its (de-duplicated) header names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    values: HashMap<String, String>,
}

impl RawRecord {
    /// Pairs `values` with `header`. Missing trailing values become empty
    /// strings; values beyond the header are dropped.
    pub fn from_row(header: &[String], values: &[String]) -> Self {
        let values = header
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), values.get(i).cloned().unwrap_or_default()))
            .collect();
        Self { values }
    }

    /// Field value, or `""` when the header has no such column.
    pub fn get(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }
}

/// Renames repeated header names so every column keeps its own key.
///
/// The first occurrence is unchanged; the k-th occurrence becomes `name_k`.
/// `[A, A, A]` yields `[A, A_2, A_3]`.
pub fn dedup_header(fields: &[String]) -> Vec<String> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    fields
        .iter()
        .map(|name| {
            let count = seen.entry(name.as_str()).or_insert(0);
            *count += 1;
            if *count == 1 {
                name.clone()
            } else {
                format!("{}_{}", name, count)
            }
        })
        .collect()
}

/// Parsed statement: section tag -> records, in first-seen section order.
#[derive(Debug, Clone, Default)]
pub struct Sections {
    order: Vec<String>,
    records: HashMap<String, Vec<RawRecord>>,
}

impl Sections {
    /// Records for `tag`; an absent section reads as empty.
    pub fn get(&self, tag: &str) -> &[RawRecord] {
        self.records.get(tag).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.records.contains_key(tag)
    }

    /// Section tags in the order their first header appeared.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn register(&mut self, tag: &str) {
        if !self.records.contains_key(tag) {
            self.order.push(tag.to_string());
            self.records.insert(tag.to_string(), Vec::new());
        }
    }
}

/// Row-by-row state machine. The cursor holds the active section and its
/// header; only Header rows move it, only Data rows read it.
#[derive(Debug, Default)]
pub struct SectionParser {
    cursor: Option<(String, Vec<String>)>,
    sections: Sections,
    dropped: usize,
}

impl SectionParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, row: &[String]) {
        if row.len() < 2 {
            self.dropped += 1;
            return;
        }
        let tag = row[0].trim();
        let kind = row[1].trim();
        let rest = &row[2..];

        match kind {
            HEADER_KIND => {
                let names: Vec<String> = rest.iter().map(|s| s.trim().to_string()).collect();
                self.sections.register(tag);
                self.cursor = Some((tag.to_string(), dedup_header(&names)));
            }
            DATA_KIND => match &self.cursor {
                Some((active, header)) if active == tag && !header.is_empty() => {
                    let record = RawRecord::from_row(header, rest);
                    if let Some(list) = self.sections.records.get_mut(tag) {
                        list.push(record);
                    }
                }
                _ => {
                    debug!(section = tag, "dropping Data row outside its section header");
                    self.dropped += 1;
                }
            },
            _ => {}
        }
    }

    /// Rows dropped so far because they were too short or orphaned.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn finish(self) -> Sections {
        self.sections
    }
}

/// Convenience wrapper: feeds every row and returns the parsed sections.
pub fn parse_rows<I>(rows: I) -> Sections
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut parser = SectionParser::new();
    for row in rows {
        parser.feed(&row);
    }
    if parser.dropped() > 0 {
        debug!(dropped = parser.dropped(), "skipped malformed statement rows");
    }
    parser.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn dedup_header_renames_repeats() {
        let header = row(&["A", "A", "A"]);
        assert_eq!(dedup_header(&header), row(&["A", "A_2", "A_3"]));
    }

    #[test]
    fn dedup_header_keeps_order_with_interleaved_names() {
        let header = row(&["Symbol", "Qty", "Symbol", "Qty", "Price"]);
        assert_eq!(
            dedup_header(&header),
            row(&["Symbol", "Qty", "Symbol_2", "Qty_2", "Price"])
        );
    }

    #[test]
    fn duplicate_columns_keep_all_values() {
        let sections = parse_rows(vec![
            row(&["S", "Header", "A", "A", "A"]),
            row(&["S", "Data", "1", "2", "3"]),
        ]);
        let rec = &sections.get("S")[0];
        assert_eq!(rec.get("A"), "1");
        assert_eq!(rec.get("A_2"), "2");
        assert_eq!(rec.get("A_3"), "3");
    }

    #[test]
    fn short_data_rows_are_padded() {
        let sections = parse_rows(vec![
            row(&["S", "Header", "A", "B", "C"]),
            row(&["S", "Data", "1"]),
        ]);
        let rec = &sections.get("S")[0];
        assert_eq!(rec.get("A"), "1");
        assert_eq!(rec.get("B"), "");
        assert!(rec.contains("C"));
        assert_eq!(rec.get("C"), "");
    }

    #[test]
    fn long_data_rows_are_truncated() {
        let sections = parse_rows(vec![
            row(&["S", "Header", "A"]),
            row(&["S", "Data", "1", "extra", "more"]),
        ]);
        let rec = &sections.get("S")[0];
        assert_eq!(rec.get("A"), "1");
        assert!(!rec.contains("extra"));
    }

    #[test]
    fn short_lines_are_ignored() {
        let sections = parse_rows(vec![
            row(&[]),
            row(&["S"]),
            row(&["S", "Header", "A"]),
            row(&["S"]),
            row(&["S", "Data", "1"]),
        ]);
        assert_eq!(sections.get("S").len(), 1);
    }

    #[test]
    fn orphaned_data_rows_are_dropped() {
        let mut parser = SectionParser::new();
        parser.feed(&row(&["S", "Data", "1"]));
        parser.feed(&row(&["S", "Header", "A"]));
        parser.feed(&row(&["T", "Data", "2"]));
        parser.feed(&row(&["S", "Data", "3"]));
        assert_eq!(parser.dropped(), 2);

        let sections = parser.finish();
        assert_eq!(sections.get("S").len(), 1);
        assert_eq!(sections.get("S")[0].get("A"), "3");
        assert!(!sections.contains("T"));
    }

    #[test]
    fn data_after_other_section_header_is_dropped() {
        let sections = parse_rows(vec![
            row(&["S", "Header", "A"]),
            row(&["T", "Header", "B"]),
            row(&["S", "Data", "1"]),
        ]);
        assert!(sections.get("S").is_empty());
        assert!(sections.get("T").is_empty());
    }

    #[test]
    fn header_without_data_registers_empty_section() {
        let sections = parse_rows(vec![row(&["Dividends", "Header", "Amount"])]);
        assert!(sections.contains("Dividends"));
        assert!(sections.get("Dividends").is_empty());
        assert!(!sections.contains("Trades"));
        assert!(sections.get("Trades").is_empty());
    }

    #[test]
    fn empty_header_accepts_no_data() {
        let sections = parse_rows(vec![row(&["S", "Header"]), row(&["S", "Data", "1"])]);
        assert!(sections.contains("S"));
        assert!(sections.get("S").is_empty());
    }

    #[test]
    fn reheader_applies_to_following_rows_only() {
        let sections = parse_rows(vec![
            row(&["S", "Header", "A", "B"]),
            row(&["S", "Data", "1", "2"]),
            row(&["S", "Header", "B", "A"]),
            row(&["S", "Data", "3", "4"]),
        ]);
        let recs = sections.get("S");
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].get("A"), "1");
        assert_eq!(recs[0].get("B"), "2");
        assert_eq!(recs[1].get("A"), "4");
        assert_eq!(recs[1].get("B"), "3");
    }

    #[test]
    fn section_and_kind_are_trimmed() {
        let sections = parse_rows(vec![
            row(&[" S ", " Header ", "A"]),
            row(&["S", "Data ", "1"]),
        ]);
        assert_eq!(sections.get("S").len(), 1);
    }

    #[test]
    fn other_row_kinds_are_ignored() {
        let sections = parse_rows(vec![
            row(&["S", "Header", "A"]),
            row(&["S", "Total", "9"]),
            row(&["S", "SubTotal", "9"]),
            row(&["S", "Data", "1"]),
        ]);
        assert_eq!(sections.get("S").len(), 1);
    }

    #[test]
    fn tags_follow_first_header_order() {
        let sections = parse_rows(vec![
            row(&["B", "Header", "x"]),
            row(&["A", "Header", "x"]),
            row(&["B", "Header", "y"]),
        ]);
        assert_eq!(sections.tags().collect::<Vec<_>>(), vec!["B", "A"]);
        assert_eq!(sections.len(), 2);
    }
}
