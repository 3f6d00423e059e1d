#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::{ConfigProvider, Damage};
use crate::utils::error::{HitError, Result};
use crate::utils::validation::{validate_source_location, Validate};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SOURCE: &str = "data/characters.json";
pub const DEFAULT_ICON_BASE: &str = "img/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

/// 合併預設值、TOML 與命令列之後的最終設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitConfig {
    pub source_location: String,
    pub default_damage: Damage,
    pub icon_base: String,
    pub format: OutputFormat,
    pub pretty: bool,
}

impl Default for HitConfig {
    fn default() -> Self {
        Self {
            source_location: DEFAULT_SOURCE.to_string(),
            default_damage: Damage::DEFAULT,
            icon_base: DEFAULT_ICON_BASE.to_string(),
            format: OutputFormat::default(),
            pretty: false,
        }
    }
}

impl HitConfig {
    /// 以 TOML 的值覆蓋預設值
    pub fn from_toml(file: &toml_config::TomlConfig) -> Result<Self> {
        let mut config = Self::default();

        if let Some(location) = file.source_location() {
            config.source_location = location.to_string();
        }
        if let Some(value) = file.default_damage() {
            config.default_damage =
                Damage::new(value).ok_or_else(|| HitError::InvalidConfigValueError {
                    field: "calculation.default_damage".to_string(),
                    value: value.to_string(),
                    reason: "Damage must be greater than zero".to_string(),
                })?;
        }
        if let Some(icon_base) = file.icon_base() {
            config.icon_base = icon_base.to_string();
        }
        if let Some(format) = file.format() {
            config.format = format;
        }
        if let Some(pretty) = file.pretty() {
            config.pretty = pretty;
        }

        Ok(config)
    }
}

impl ConfigProvider for HitConfig {
    fn source_location(&self) -> &str {
        &self.source_location
    }

    fn default_damage(&self) -> Damage {
        self.default_damage
    }

    fn icon_base(&self) -> &str {
        &self.icon_base
    }
}

impl Validate for HitConfig {
    fn validate(&self) -> Result<()> {
        validate_source_location("source.location", &self.source_location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::toml_config::TomlConfig;

    #[test]
    fn test_defaults() {
        let config = HitConfig::default();
        assert_eq!(config.source_location(), "data/characters.json");
        assert_eq!(config.default_damage().get(), 2600);
        assert_eq!(config.icon_base(), "img/");
        assert_eq!(config.format, OutputFormat::Text);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_overrides_defaults() {
        let file = TomlConfig::from_toml_str(
            "[source]\nlocation = \"https://example.com/c.json\"\n[output]\nformat = \"csv\"\n",
        )
        .unwrap();

        let config = HitConfig::from_toml(&file).unwrap();

        assert_eq!(config.source_location, "https://example.com/c.json");
        assert_eq!(config.format, OutputFormat::Csv);
        assert_eq!(config.default_damage, Damage::DEFAULT);
    }

    #[test]
    fn test_from_toml_rejects_zero_damage() {
        let file = TomlConfig::from_toml_str("[calculation]\ndefault_damage = 0\n").unwrap();

        let err = HitConfig::from_toml(&file).unwrap_err();
        assert!(matches!(err, HitError::InvalidConfigValueError { .. }));
    }

    #[test]
    fn test_validate_rejects_unsupported_scheme() {
        let config = HitConfig {
            source_location: "ftp://example.com/c.json".to_string(),
            ..HitConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
