use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{OptimizeError, Result};
use crate::platform::{PlatformCatalog, PlatformOverride};
use crate::OptimizeOptions;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8787,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Values used when a request leaves platform/tone/audience/length out.
    pub defaults: OptimizeOptions,
    pub platforms: BTreeMap<String, PlatformOverride>,
    pub server: ServerConfig,
}

impl OptimizerConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>)> {
        let config_path = path.or_else(default_config_path);
        let mut config = match config_path.as_ref() {
            Some(path) if path.exists() => {
                let contents = std::fs::read_to_string(path).map_err(|err| {
                    OptimizeError::Config(format!("failed to read {}: {}", path.display(), err))
                })?;
                Self::from_toml(&contents)?
            }
            _ => OptimizerConfig::default(),
        };

        config.apply_env_overrides();
        Ok((config, config_path))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|err| OptimizeError::Config(format!("failed to parse config: {}", err)))
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|err| {
                OptimizeError::Config(format!("failed to create config dir: {}", err))
            })?;
        }
        let payload = toml::to_string_pretty(self)
            .map_err(|err| OptimizeError::Config(format!("failed to serialize config: {}", err)))?;
        std::fs::write(path, payload)
            .map_err(|err| OptimizeError::Config(format!("failed to write config: {}", err)))?;
        Ok(())
    }

    /// Built once at start-up; overrides are validated here.
    pub fn catalog(&self) -> Result<PlatformCatalog> {
        PlatformCatalog::with_overrides(&self.platforms)
    }

    /// Fills the blanks of a request from the configured defaults.
    pub fn options_with(
        &self,
        platform: Option<String>,
        tone: Option<String>,
        target_audience: Option<String>,
        length: Option<String>,
    ) -> OptimizeOptions {
        let pick = |value: Option<String>, fallback: &str| -> String {
            value
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| fallback.to_string())
        };
        OptimizeOptions {
            platform: pick(platform, &self.defaults.platform),
            tone: pick(tone, &self.defaults.tone),
            target_audience: target_audience
                .unwrap_or_else(|| self.defaults.target_audience.clone()),
            length: pick(length, &self.defaults.length),
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(platform) = non_empty("OPTIMIZER_PLATFORM") {
            self.defaults.platform = platform;
        }
        if let Some(tone) = non_empty("OPTIMIZER_TONE") {
            self.defaults.tone = tone;
        }
        if let Some(audience) = lookup("OPTIMIZER_TARGET_AUDIENCE") {
            self.defaults.target_audience = audience;
        }
        if let Some(length) = non_empty("OPTIMIZER_LENGTH") {
            self.defaults.length = length;
        }
        if let Some(host) = non_empty("OPTIMIZER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = non_empty("OPTIMIZER_PORT") {
            if let Ok(value) = port.parse::<u16>() {
                self.server.port = value;
            }
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    env::var("OPTIMIZER_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/optimizer.toml")))
}
