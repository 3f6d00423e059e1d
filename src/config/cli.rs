use crate::config::toml_config::TomlConfig;
use crate::config::{HitConfig, OutputFormat};
use crate::utils::error::Result;
use crate::utils::validation::parse_damage;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "hitcalc")]
#[command(about = "Groups game characters by how many hits it takes to defeat them")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Character data location (file path or http(s) URL)
    #[arg(long)]
    pub source: Option<String>,

    /// Damage per hit for the initial calculation
    #[arg(short, long, allow_hyphen_values = true)]
    pub damage: Option<String>,

    /// Prefix prepended to each icon reference
    #[arg(long)]
    pub icon_base: Option<String>,

    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Keep reading damage values from stdin after the first calculation
    #[arg(short, long)]
    pub interactive: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,
}

impl CliConfig {
    /// 預設值 < TOML 檔 < 命令列參數
    pub fn resolve(&self) -> Result<HitConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                HitConfig::from_toml(&TomlConfig::from_file(path)?)?
            }
            None => HitConfig::default(),
        };

        if let Some(source) = &self.source {
            config.source_location = source.clone();
        }
        if let Some(raw) = &self.damage {
            config.default_damage = parse_damage(raw)?;
        }
        if let Some(icon_base) = &self.icon_base {
            config.icon_base = icon_base.clone();
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if self.pretty {
            config.pretty = true;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::HitError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_flags() {
        let cli = CliConfig::parse_from([
            "hitcalc",
            "--source",
            "chars.json",
            "--damage",
            "1500",
            "--format",
            "csv",
            "-i",
        ]);

        assert!(cli.interactive);
        let config = cli.resolve().unwrap();
        assert_eq!(config.source_location, "chars.json");
        assert_eq!(config.default_damage.get(), 1500);
        assert_eq!(config.format, OutputFormat::Csv);
    }

    #[test]
    fn test_invalid_damage_flag_is_rejected() {
        let cli = CliConfig::parse_from(["hitcalc", "--damage", "-5"]);

        let err = cli.resolve().unwrap_err();
        assert!(matches!(err, HitError::InvalidDamage { .. }));
    }

    #[test]
    fn test_cli_overrides_config_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(
                b"[source]\nlocation = \"from-file.json\"\n[calculation]\ndefault_damage = 700\n",
            )
            .unwrap();
        let path = temp_file.path().to_str().unwrap().to_string();

        let cli = CliConfig::parse_from(["hitcalc", "--config", path.as_str(), "--damage", "900"]);
        let config = cli.resolve().unwrap();

        assert_eq!(config.source_location, "from-file.json");
        assert_eq!(config.default_damage.get(), 900);
    }
}
