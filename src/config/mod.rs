pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "contact-book")]
#[command(about = "A console address book with CSV save and load")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory that relative file names are resolved against
    #[arg(long)]
    pub data_dir: Option<String>,

    /// File to load before the menu starts
    #[arg(long)]
    pub load: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 讀取設定檔後套用命令列覆蓋
    pub fn settings(&self) -> Result<Settings> {
        let file = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        let mut settings = Settings::from_toml(&file);
        if let Some(dir) = &self.data_dir {
            settings.data_dir = dir.clone();
        }
        settings.startup_file = self.load.clone();
        settings.validate()?;
        Ok(settings)
    }
}

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Settings {
    pub data_dir: String,
    pub default_file: String,
    pub quote_special: bool,
    pub log_level: Option<String>,
    pub startup_file: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_toml(&TomlConfig::default())
    }
}

impl Settings {
    pub fn from_toml(config: &TomlConfig) -> Self {
        Self {
            data_dir: config.storage.data_dir.clone(),
            default_file: config.storage.default_file.clone(),
            quote_special: config.csv.quote_special,
            log_level: config.log_level().map(str::to_string),
            startup_file: None,
        }
    }
}

impl ConfigProvider for Settings {
    fn data_dir(&self) -> &str {
        &self.data_dir
    }

    fn default_file(&self) -> &str {
        &self.default_file
    }

    fn quote_special(&self) -> bool {
        self.quote_special
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        use crate::utils::validation::{validate_non_empty_string, validate_one_of, validate_path};

        validate_path("storage.data_dir", &self.data_dir)?;
        validate_non_empty_string("storage.default_file", &self.default_file)?;
        if let Some(level) = &self.log_level {
            validate_one_of("logging.level", level, &toml_config::LOG_LEVELS)?;
        }
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_cli_overrides_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[storage]\ndata_dir = \"/from/file\"\ndefault_file = \"a.csv\"\n")
            .unwrap();

        let cli = CliConfig::parse_from([
            "contact-book",
            "--config",
            temp_file.path().to_str().unwrap(),
            "--data-dir",
            "/from/cli",
            "--load",
            "start.csv",
        ]);
        let settings = cli.settings().unwrap();

        assert_eq!(settings.data_dir, "/from/cli");
        assert_eq!(settings.default_file, "a.csv");
        assert_eq!(settings.startup_file.as_deref(), Some("start.csv"));
    }

    #[test]
    fn test_defaults_without_config_file() {
        let settings = CliConfig::parse_from(["contact-book"]).settings().unwrap();
        assert_eq!(settings.data_dir, ".");
        assert_eq!(settings.default_file, "contacts.csv");
        assert!(settings.quote_special);
    }

    #[test]
    fn test_empty_data_dir_rejected() {
        let cli = CliConfig::parse_from(["contact-book", "--data-dir", ""]);
        assert!(cli.settings().is_err());
    }
}
