use crate::domain::{
    config::{ConfigOverrides, SchemyConfig},
    error::{SchemyError, SchemyResult},
};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a configuration manager for `config_path`, or for the default
    /// location when no path is given.
    pub fn new(config_path: Option<&Path>) -> SchemyResult<Self> {
        let config_path = match config_path {
            Some(path) => path.to_path_buf(),
            None => Self::default_config_path()?,
        };
        Ok(Self { config_path })
    }

    /// `$XDG_CONFIG_HOME/schemy/config.toml`, or the platform equivalent.
    pub fn default_config_path() -> SchemyResult<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| SchemyError::Config {
            message: "Could not determine the user configuration directory".to_string(),
        })?;

        Ok(config_dir.join("schemy").join("config.toml"))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Load configuration from the file, the process environment and the
    /// command line, in increasing order of precedence.
    pub fn load_config(&self, overrides: &ConfigOverrides) -> SchemyResult<SchemyConfig> {
        self.load_config_with_env(overrides, |name| std::env::var(name).ok())
    }

    /// Same as [`ConfigManager::load_config`] with a custom environment lookup.
    pub fn load_config_with_env<F>(
        &self,
        overrides: &ConfigOverrides,
        env: F,
    ) -> SchemyResult<SchemyConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = self.read_or_create()?;
        config.merge_env(env);
        config.merge_overrides(overrides);
        Ok(config)
    }

    /// Read the config file. A missing file is created with default values,
    /// and the caller is told to fill it in.
    fn read_or_create(&self) -> SchemyResult<SchemyConfig> {
        match fs::read_to_string(&self.config_path) {
            Ok(content) => toml::from_str(&content).map_err(|e| SchemyError::Config {
                message: format!(
                    "Failed to parse config file {}: {}",
                    self.config_path.display(),
                    e
                ),
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                if let Some(parent) = self.config_path.parent() {
                    if !parent.as_os_str().is_empty() {
                        fs::create_dir_all(parent).map_err(|e| SchemyError::Config {
                            message: format!("Failed to create config directory: {}", e),
                        })?;
                    }
                }
                self.write_config(&SchemyConfig::default())?;
                Err(SchemyError::ConfigCreated {
                    path: self.config_path.clone(),
                })
            }
            Err(e) => Err(SchemyError::Config {
                message: format!(
                    "Failed to read config file {}: {}",
                    self.config_path.display(),
                    e
                ),
            }),
        }
    }

    /// Write `config` to the config file.
    fn write_config(&self, config: &SchemyConfig) -> SchemyResult<()> {
        let content = toml::to_string_pretty(config).map_err(|e| SchemyError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        fs::write(&self.config_path, content).map_err(|e| SchemyError::Config {
            message: format!(
                "Failed to write config file {}: {}",
                self.config_path.display(),
                e
            ),
        })
    }
}
