//! Configuration management

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::application::errors::ConfigError;
use crate::domain::entities::User;
use crate::infrastructure::plugins::{LoadedModule, ALWAYS_ON_MODULE};

/// Bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub forum: ForumConfig,
    pub command_prefix: String,
    /// Per-module settings keyed by module name
    pub modules: BTreeMap<String, ModuleSettings>,
    /// Set by authentication, never read from the file
    #[serde(skip)]
    pub user: Option<User>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ForumConfig {
    pub base_url: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Operator settings for one module
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ModuleSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Module-specific options
    #[serde(flatten)]
    pub options: BTreeMap<String, serde_yaml::Value>,
}

impl ModuleSettings {
    pub fn enabled(enabled: bool) -> Self {
        Self {
            enabled: Some(enabled),
            options: BTreeMap::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(false)
    }
}

impl Default for ForumConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost".to_string(),
            username: None,
            password: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            forum: ForumConfig::default(),
            command_prefix: "!".to_string(),
            modules: BTreeMap::new(),
            user: None,
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.command_prefix.trim().is_empty() {
            return Err(ConfigError::InvalidValue("command-prefix must not be empty".to_string()));
        }
        Ok(())
    }

    /// Overlay forum credentials from the environment
    pub fn apply_env(&mut self) {
        if let Ok(username) = std::env::var("SOCKBOT_USERNAME") {
            self.forum.username = Some(username);
        }
        if let Ok(password) = std::env::var("SOCKBOT_PASSWORD") {
            self.forum.password = Some(password);
        }
    }

    /// Give every loaded module an entry, taking its declared default where
    /// the operator did not say
    pub fn seed_modules(&mut self, modules: &[LoadedModule]) {
        for loaded in modules {
            let name = loaded.module.name();
            let default = match loaded.module.configuration() {
                Some(c) => c.enabled,
                None => name == ALWAYS_ON_MODULE,
            };
            let entry = self.modules.entry(name.to_string()).or_default();
            if entry.enabled.is_none() {
                entry.enabled = Some(default);
            }
        }
    }

    pub fn module(&self, name: &str) -> Option<&ModuleSettings> {
        self.modules.get(name)
    }

    /// Missing entries count as disabled
    pub fn module_enabled(&self, name: &str) -> bool {
        self.module(name).is_some_and(ModuleSettings::is_enabled)
    }
}

/// Produces the runtime configuration for a set of loaded modules
pub trait ConfigLoader: Send + Sync {
    fn load(&self, modules: &[LoadedModule], source: &str) -> Result<Config, ConfigError>;
}

/// Reads a YAML file, then the environment, then module defaults
#[derive(Debug, Default, Clone, Copy)]
pub struct YamlConfigLoader;

impl ConfigLoader for YamlConfigLoader {
    fn load(&self, modules: &[LoadedModule], source: &str) -> Result<Config, ConfigError> {
        let mut config = if Path::new(source).exists() {
            Config::load(source)?
        } else {
            tracing::warn!("Config file {} not found, using defaults", source);
            Config::default()
        };
        config.apply_env();
        config.seed_modules(modules);
        Ok(config)
    }
}
