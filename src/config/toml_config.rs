use crate::config::OutputFormat;
use crate::utils::error::{HitError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub source: Option<SourceConfig>,
    pub calculation: Option<CalculationConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// 檔案路徑或 http(s) URL
    pub location: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationConfig {
    pub default_damage: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
    pub icon_base: Option<String>,
    pub pretty: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| HitError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${HITCALC_SOURCE})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| HitError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn source_location(&self) -> Option<&str> {
        self.source.as_ref().map(|s| s.location.as_str())
    }

    pub fn default_damage(&self) -> Option<u64> {
        self.calculation.as_ref().and_then(|c| c.default_damage)
    }

    pub fn format(&self) -> Option<OutputFormat> {
        self.output.as_ref().and_then(|o| o.format)
    }

    pub fn icon_base(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.icon_base.as_deref())
    }

    pub fn pretty(&self) -> Option<bool> {
        self.output.as_ref().and_then(|o| o.pretty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[source]
location = "https://cdn.example.com/characters.json"

[calculation]
default_damage = 3100

[output]
format = "json"
icon_base = "assets/"
pretty = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(
            config.source_location(),
            Some("https://cdn.example.com/characters.json")
        );
        assert_eq!(config.default_damage(), Some(3100));
        assert_eq!(config.format(), Some(OutputFormat::Json));
        assert_eq!(config.icon_base(), Some("assets/"));
        assert_eq!(config.pretty(), Some(true));
    }

    #[test]
    fn test_empty_toml_is_all_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert!(config.source_location().is_none());
        assert!(config.default_damage().is_none());
        assert!(config.format().is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("HITCALC_TEST_SOURCE", "/srv/game/characters.json");

        let toml_content = r#"
[source]
location = "${HITCALC_TEST_SOURCE}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.source_location(), Some("/srv/game/characters.json"));

        std::env::remove_var("HITCALC_TEST_SOURCE");
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let toml_content = r#"
[output]
format = "xml"
"#;

        let err = TomlConfig::from_toml_str(toml_content).unwrap_err();
        assert!(matches!(err, HitError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[calculation]\ndefault_damage = 500\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.default_damage(), Some(500));
    }
}
