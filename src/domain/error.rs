//! Domain error types.

/// Top-level error type for ibkr2tv.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("failed to read {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("CSV decode error in {path}: {reason}")]
    Csv { path: String, reason: String },

    #[error("invalid number in section {section}, field {field}: {value:?}")]
    InvalidNumber {
        section: String,
        field: String,
        value: String,
    },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("failed to write {path}: {reason}")]
    Write { path: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ConvertError {
    /// Process exit status: 1 for IO, 2 for configuration, 3 for statement data.
    pub fn exit_status(&self) -> u8 {
        match self {
            ConvertError::Io(_)
            | ConvertError::Read { .. }
            | ConvertError::Csv { .. }
            | ConvertError::Write { .. } => 1,
            ConvertError::ConfigParse { .. } | ConvertError::ConfigInvalid { .. } => 2,
            ConvertError::InvalidNumber { .. } => 3,
        }
    }
}

impl From<&ConvertError> for std::process::ExitCode {
    fn from(err: &ConvertError) -> Self {
        std::process::ExitCode::from(err.exit_status())
    }
}
