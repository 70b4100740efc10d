//! Statement and reference file access port.

use crate::domain::error::ConvertError;
use std::collections::HashMap;
use std::path::Path;

pub trait SourcePort {
    /// Every line of a statement as raw fields, without header handling.
    fn read_rows(&self, path: &Path) -> Result<Vec<Vec<String>>, ConvertError>;

    /// A single-header reference table as header-keyed rows. Rows that
    /// cannot be decoded are skipped.
    fn read_table(&self, path: &Path) -> Result<Vec<HashMap<String, String>>, ConvertError>;
}
