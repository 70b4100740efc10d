//! Output port for the merged record set.

use crate::domain::error::ConvertError;
use crate::domain::record::NormalizedRecord;
use std::path::Path;

pub trait OutputPort {
    fn write(&self, records: &[NormalizedRecord], path: &Path) -> Result<(), ConvertError>;
}
