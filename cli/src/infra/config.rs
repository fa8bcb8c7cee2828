//! Configuration discovery and root resolution backed by YAML files.

use std::path::{Path, PathBuf};

use crate::domain::config::{CONFIG_VAR, ROOT_VAR, expand_home};
use crate::domain::{ConfigError, Layout, ShelpConfig};

/// Where configuration may come from, captured once from the CLI and the
/// environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    /// `--config` path; must exist.
    pub explicit: Option<PathBuf>,
    /// `$SHELP_CONFIG`; must exist.
    pub env_config: Option<PathBuf>,
    /// `$SHELP_ROOT`.
    pub env_root: Option<PathBuf>,
    pub home: Option<PathBuf>,
}

impl ConfigSources {
    /// Read the environment; empty variables count as unset.
    #[must_use]
    pub fn from_env(explicit: Option<PathBuf>) -> Self {
        let var = |name: &str| {
            std::env::var_os(name)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        };
        Self {
            explicit,
            env_config: var(CONFIG_VAR),
            env_root: var(ROOT_VAR),
            home: dirs::home_dir(),
        }
    }
}

/// A loaded configuration and the layout it resolves to.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: ShelpConfig,
    /// File the configuration was read from, if any.
    pub file: Option<PathBuf>,
    pub layout: Layout,
}

/// Loads `ShelpConfig` from the first YAML file found.
pub struct YamlConfigStore {
    sources: ConfigSources,
}

impl YamlConfigStore {
    #[must_use]
    pub fn new(sources: ConfigSources) -> Self {
        Self { sources }
    }

    /// Root before any file is read: `$SHELP_ROOT`, else `~/.shelp`.
    fn fallback_root(&self) -> Result<PathBuf, ConfigError> {
        if let Some(root) = &self.sources.env_root {
            return Ok(root.clone());
        }
        self.sources
            .home
            .as_ref()
            .map(|h| h.join(".shelp"))
            .ok_or(ConfigError::NoHomeDir)
    }

    /// Discover, parse, and resolve the root.
    ///
    /// Discovery order: `--config`, `$SHELP_CONFIG`, `<root>/config.yml`.
    /// The first two must exist; the last is optional. `path.root` in the
    /// loaded file overrides the fallback root.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] for a missing required file,
    /// [`ConfigError::Malformed`] for unreadable or invalid YAML,
    /// [`ConfigError::NoHomeDir`] when no root can be determined and
    /// [`ConfigError::InvalidRoot`] when it cannot be made absolute.
    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        let required = self
            .sources
            .explicit
            .clone()
            .or_else(|| self.sources.env_config.clone());

        let (config, file) = if let Some(path) = required {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.display().to_string()));
            }
            (read_config(&path)?, Some(path))
        } else {
            let path = Layout::new(self.fallback_root()?).default_config_path();
            if path.exists() {
                (read_config(&path)?, Some(path))
            } else {
                tracing::debug!(path = %path.display(), "no config file");
                (ShelpConfig::default(), None)
            }
        };

        let root = match config.path.root.as_deref().filter(|r| !r.is_empty()) {
            Some(root) => expand_home(root, self.sources.home.as_deref()),
            None => self.fallback_root()?,
        };
        // Link targets are stored as given; a relative root would leave them dangling.
        let root = std::path::absolute(&root).map_err(|e| ConfigError::InvalidRoot {
            path: root.display().to_string(),
            reason: e.to_string(),
        })?;
        tracing::debug!(root = %root.display(), file = ?file, "configuration resolved");

        Ok(LoadedConfig {
            config,
            file,
            layout: Layout::new(root),
        })
    }
}

fn read_config(path: &Path) -> Result<ShelpConfig, ConfigError> {
    let malformed = |reason: String| ConfigError::Malformed {
        path: path.display().to_string(),
        reason,
    };
    let content = std::fs::read_to_string(path).map_err(|e| malformed(e.to_string()))?;
    if content.trim().is_empty() {
        return Ok(ShelpConfig::default());
    }
    serde_yaml::from_str(&content).map_err(|e| malformed(e.to_string()))
}
