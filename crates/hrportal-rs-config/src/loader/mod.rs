//! Layered configuration loading.
//!
//! Precedence (low -> high): system, user, project root, working directory,
//! runtime files. A requirements file is applied first and its keys cannot be
//! overridden by any later layer.

mod layer_io;
mod merge;
mod schema;
mod utils;


use crate::{ConfigError, PortalConfig};
use log::{debug, info};
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Config filename looked up in every local layer.
const DEFAULT_CONFIG_FILE: &str = "hrportal.json5";
/// Directory holding the user config under the home directory.
const DEFAULT_CONFIG_DIR: &str = ".hrportal";
/// Entries that mark a directory as the project root.
const DEFAULT_PROJECT_ROOT_MARKERS: &[&str] = &[".git", "package.json"];

#[cfg(unix)]
const SYSTEM_CONFIG_PATH: &str = "/etc/hrportal/hrportal.json5";
#[cfg(unix)]
const SYSTEM_REQUIREMENTS_PATH: &str = "/etc/hrportal/requirements.json5";
#[cfg(windows)]
const SYSTEM_CONFIG_PATH: &str = "C:\\ProgramData\\hrportal\\hrportal.json5";
#[cfg(windows)]
const SYSTEM_REQUIREMENTS_PATH: &str = "C:\\ProgramData\\hrportal\\requirements.json5";

/// Effective config plus the layers that contributed to it.
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub config: PortalConfig,
    pub layers: Vec<ConfigLayer>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLayerSource {
    /// Locked keys applied before everything else.
    Requirements,
    System,
    User,
    Project,
    Cwd,
    /// Files passed explicitly at startup.
    Runtime,
}

/// A layer that was found and merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLayer {
    pub source: ConfigLayerSource,
    pub path: PathBuf,
}

/// Where to look for each layer.
#[derive(Debug, Clone)]
pub struct LayeredConfigOptions {
    pub cwd: PathBuf,
    pub system_config_path: Option<PathBuf>,
    pub user_config_path: Option<PathBuf>,
    pub requirements_path: Option<PathBuf>,
    pub runtime_paths: Vec<PathBuf>,
    pub project_root_markers: Vec<String>,
}

impl LayeredConfigOptions {
    /// Options with the platform default locations for the given directory.
    pub fn new(cwd: impl AsRef<Path>) -> Self {
        Self {
            cwd: cwd.as_ref().to_path_buf(),
            system_config_path: layer_io::default_system_config_path(),
            user_config_path: layer_io::default_user_config_path(),
            requirements_path: layer_io::default_requirements_path(),
            runtime_paths: Vec::new(),
            project_root_markers: DEFAULT_PROJECT_ROOT_MARKERS
                .iter()
                .map(|marker| marker.to_string())
                .collect(),
        }
    }

    pub fn with_runtime_path(mut self, path: impl AsRef<Path>) -> Self {
        self.runtime_paths.push(path.as_ref().to_path_buf());
        self
    }
}

impl PortalConfig {
    /// Load a single config file with no layering.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        info!("loading config from path: {}", path.as_ref().display());
        let contents = fs::read_to_string(path)?;
        Self::load_from_str(&contents)
    }

    /// Load a single config from JSON5 text with no layering.
    pub fn load_from_str(contents: &str) -> Result<Self, ConfigError> {
        debug!("loading config from raw contents (len={})", contents.len());
        let value: Value = json5::from_str(contents)?;
        config_from_value(value, "config")
    }

    /// Load the layer stack from the default locations.
    pub fn load_layered(cwd: impl AsRef<Path>) -> Result<LayeredConfig, ConfigError> {
        Self::load_layered_with_options(LayeredConfigOptions::new(cwd))
    }

    pub fn load_layered_with_options(
        options: LayeredConfigOptions,
    ) -> Result<LayeredConfig, ConfigError> {
        let cwd = utils::normalize_path(&options.cwd)?;
        debug!("loading layered config (cwd={})", cwd.display());

        let mut layers = Vec::new();
        let mut values = Vec::new();
        let mut seen = HashSet::new();

        let requirements = match options.requirements_path.as_deref() {
            Some(path) => layer_io::load_optional(ConfigLayerSource::Requirements, path)?,
            None => None,
        };
        if let Some((layer, _)) = &requirements {
            layers.push(layer.clone());
        }

        let mut candidates: Vec<(ConfigLayerSource, PathBuf)> = Vec::new();
        if let Some(path) = &options.system_config_path {
            candidates.push((ConfigLayerSource::System, path.clone()));
        }
        if let Some(path) = &options.user_config_path {
            candidates.push((ConfigLayerSource::User, path.clone()));
        }
        match utils::find_project_root(&cwd, &options.project_root_markers) {
            Some(root) => {
                debug!("resolved project root: {}", root.display());
                candidates.push((ConfigLayerSource::Project, root.join(DEFAULT_CONFIG_FILE)));
            }
            None => debug!("no project root found above {}", cwd.display()),
        }
        candidates.push((ConfigLayerSource::Cwd, cwd.join(DEFAULT_CONFIG_FILE)));

        for (source, path) in candidates {
            if !seen.insert(utils::unique_path(&path)) {
                debug!(
                    "skipping duplicate layer (source={:?}, path={})",
                    source,
                    path.display()
                );
                continue;
            }
            if let Some((layer, value)) = layer_io::load_optional(source, &path)? {
                layers.push(layer);
                values.push(value);
            }
        }

        for path in &options.runtime_paths {
            let (layer, value) = layer_io::load_required(ConfigLayerSource::Runtime, path)?;
            layers.push(layer);
            values.push(value);
        }

        let locked = requirements.map(|(_, value)| value);
        let mut merged = Value::Object(serde_json::Map::new());
        if let Some(locked) = &locked {
            merge::merge_json_values(&mut merged, locked);
        }
        for value in &values {
            merge::merge_json_with_constraints(&mut merged, value, locked.as_ref());
        }

        let config = config_from_value(merged, "effective")?;
        info!("layered config loaded (layers={})", layers.len());
        Ok(LayeredConfig { config, layers })
    }

    /// Check invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = self.api.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidField {
                path: "api.base_url".to_string(),
                message: "must start with http:// or https://".to_string(),
            });
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::InvalidField {
                path: "api.timeout_secs".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if self.announcements.page_size == 0 {
            return Err(ConfigError::InvalidField {
                path: "announcements.page_size".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

fn config_from_value(value: Value, label: &str) -> Result<PortalConfig, ConfigError> {
    schema::validate_layer_schema(&value, label)?;
    let config: PortalConfig = serde_json::from_value(value)?;
    config.validate()?;
    Ok(config)
}
