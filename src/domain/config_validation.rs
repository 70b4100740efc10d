//! Configuration validation.
//!
//! Checks every recognised key before a conversion starts so a bad
//! config file fails fast instead of after statements were read.

use crate::domain::error::ConvertError;
use crate::domain::layout::LayoutChoice;
use crate::ports::config_port::ConfigPort;

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), ConvertError> {
    validate_layout(config)?;
    validate_output_path(config)?;
    validate_markets(config)?;
    validate_exchanges(config)?;
    Ok(())
}

fn validate_layout(config: &dyn ConfigPort) -> Result<(), ConvertError> {
    if let Some(value) = config.get_string("input", "layout") {
        value
            .parse::<LayoutChoice>()
            .map_err(|reason| ConvertError::ConfigInvalid {
                section: "input".to_string(),
                key: "layout".to_string(),
                reason,
            })?;
    }
    Ok(())
}

fn validate_output_path(config: &dyn ConfigPort) -> Result<(), ConvertError> {
    if let Some(value) = config.get_string("output", "path") {
        if value.trim().is_empty() {
            return Err(ConvertError::ConfigInvalid {
                section: "output".to_string(),
                key: "path".to_string(),
                reason: "path must not be empty".to_string(),
            });
        }
    }
    Ok(())
}

fn validate_markets(config: &dyn ConfigPort) -> Result<(), ConvertError> {
    for key in ["default_prefix", "hong_kong_prefix", "hong_kong_currency"] {
        if let Some(value) = config.get_string("markets", key) {
            if value.trim().is_empty() {
                return Err(ConvertError::ConfigInvalid {
                    section: "markets".to_string(),
                    key: key.to_string(),
                    reason: format!("{key} must not be empty"),
                });
            }
            if value.contains(':') {
                return Err(ConvertError::ConfigInvalid {
                    section: "markets".to_string(),
                    key: key.to_string(),
                    reason: format!("{key} must not contain ':'"),
                });
            }
        }
    }
    Ok(())
}

fn validate_exchanges(config: &dyn ConfigPort) -> Result<(), ConvertError> {
    for (code, prefix) in config.entries("exchanges") {
        if prefix.trim().is_empty() || prefix.contains(':') {
            return Err(ConvertError::ConfigInvalid {
                section: "exchanges".to_string(),
                key: code,
                reason: "exchange prefix must be non-empty and contain no ':'".to_string(),
            });
        }
    }
    Ok(())
}
