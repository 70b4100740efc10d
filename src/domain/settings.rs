//! Run settings assembled from the optional INI config file.

use crate::domain::config_validation::validate_config;
use crate::domain::error::ConvertError;
use crate::domain::exchange::{ExchangeTable, MarketRules};
use crate::domain::layout::LayoutChoice;
use crate::ports::config_port::ConfigPort;
use std::path::PathBuf;

pub const DEFAULT_OUTPUT: &str = "output.csv";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub layout: LayoutChoice,
    pub output: PathBuf,
    pub rules: MarketRules,
    pub exchanges: ExchangeTable,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            layout: LayoutChoice::Auto,
            output: PathBuf::from(DEFAULT_OUTPUT),
            rules: MarketRules::default(),
            exchanges: ExchangeTable::default(),
        }
    }
}

impl Settings {
    /// Validates `config` and overlays it on the defaults.
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, ConvertError> {
        validate_config(config)?;
        let defaults = Self::default();

        let layout = match config.get_string("input", "layout") {
            Some(v) => v.parse::<LayoutChoice>().map_err(|reason| ConvertError::ConfigInvalid {
                section: "input".into(),
                key: "layout".into(),
                reason,
            })?,
            None => defaults.layout,
        };

        let output = config
            .get_string("output", "path")
            .map(|p| PathBuf::from(p.trim()))
            .unwrap_or(defaults.output);

        let market = |key: &str, fallback: String| {
            config
                .get_string("markets", key)
                .map(|v| v.trim().to_string())
                .unwrap_or(fallback)
        };
        let rules = MarketRules {
            default_prefix: market("default_prefix", defaults.rules.default_prefix),
            hong_kong_prefix: market("hong_kong_prefix", defaults.rules.hong_kong_prefix),
            hong_kong_currency: market("hong_kong_currency", defaults.rules.hong_kong_currency),
        };

        let exchanges = defaults.exchanges.extend(
            config
                .entries("exchanges")
                .into_iter()
                .map(|(code, prefix)| (code, prefix.trim().to_string())),
        );

        Ok(Self {
            layout,
            output,
            rules,
            exchanges,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    #[test]
    fn empty_config_yields_defaults() {
        let adapter = FileConfigAdapter::from_string("").unwrap();
        assert_eq!(Settings::from_config(&adapter).unwrap(), Settings::default());
    }

    #[test]
    fn overrides_are_applied() {
        let ini = "\
[input]
layout = zh

[output]
path = tv.csv

[markets]
default_prefix = NYSE
hong_kong_currency = HKD

[exchanges]
lse = LSE
arca = NYSEARCA
";
        let adapter = FileConfigAdapter::from_string(ini).unwrap();
        let settings = Settings::from_config(&adapter).unwrap();

        assert_eq!(settings.layout, LayoutChoice::Chinese);
        assert_eq!(settings.output, PathBuf::from("tv.csv"));
        assert_eq!(settings.rules.default_prefix, "NYSE");
        assert_eq!(settings.rules.hong_kong_prefix, "HKEX");
        assert_eq!(settings.exchanges.translate("LSE"), "LSE");
        assert_eq!(settings.exchanges.translate("ARCA"), "NYSEARCA");
        assert_eq!(settings.exchanges.translate("SEHK"), "HKEX");
    }

    #[test]
    fn invalid_config_is_rejected() {
        let adapter = FileConfigAdapter::from_string("[input]\nlayout = klingon\n").unwrap();
        assert!(Settings::from_config(&adapter).is_err());
    }
}
