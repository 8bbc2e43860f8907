//! Configuration handling for Shadowr
//!
//! Configuration is stored in `.shadowr/config.toml` (workspace) and
//! `~/.config/shadowr/config.toml` (global).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::css::{parse_hex, ExportNames};
use crate::domain::{ShadowStyle, StackLimits};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Names used by `shadowr export`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExportConfig {
    /// Class selector for the stylesheet export
    pub class_name: String,

    /// SCSS variable and CSS custom property name
    pub variable_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        let names = ExportNames::default();
        Self {
            class_name: names.class_name,
            variable_name: names.variable_name,
        }
    }
}

impl ExportConfig {
    pub fn names(&self) -> ExportNames {
        ExportNames {
            class_name: self.class_name.clone(),
            variable_name: self.variable_name.clone(),
        }
    }
}

/// Workspace-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Most layers a stack may hold
    pub max_layers: usize,

    /// Fewest layers a stack may hold
    pub min_layers: usize,

    /// Undo entries kept
    pub max_history: usize,

    /// Named snapshots kept
    pub max_snapshots: usize,

    /// Recently used colors kept
    pub max_recent_colors: usize,

    /// Export settings
    pub export: ExportConfig,

    /// Values for newly added or reset layers
    pub layer_defaults: LayerDefaults,
}

/// Default layer values, in snake_case for TOML
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LayerDefaults {
    pub offset_x: i32,
    pub offset_y: i32,
    pub blur: i32,
    pub spread: i32,
    pub color: String,
    pub opacity: i32,
    pub inset: bool,
}

impl Default for LayerDefaults {
    fn default() -> Self {
        let style = ShadowStyle::default();
        Self {
            offset_x: style.offset_x,
            offset_y: style.offset_y,
            blur: style.blur,
            spread: style.spread,
            color: style.color,
            opacity: style.opacity,
            inset: style.inset,
        }
    }
}

impl LayerDefaults {
    pub fn style(&self) -> ShadowStyle {
        ShadowStyle {
            offset_x: self.offset_x,
            offset_y: self.offset_y,
            blur: self.blur,
            spread: self.spread,
            color: self.color.clone(),
            opacity: self.opacity,
            inset: self.inset,
        }
    }
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            max_layers: 6,
            min_layers: 1,
            max_history: 50,
            max_snapshots: 10,
            max_recent_colors: 8,
            export: ExportConfig::default(),
            layer_defaults: LayerDefaults::default(),
        }
    }
}

impl WorkspaceConfig {
    /// Checks that the limits are consistent and the layer defaults are usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_layers == 0 {
            return Err(ConfigError::Invalid("max_layers must be at least 1".to_string()));
        }
        if self.min_layers > self.max_layers {
            return Err(ConfigError::Invalid(format!(
                "min_layers ({}) exceeds max_layers ({})",
                self.min_layers, self.max_layers
            )));
        }
        if self.max_history == 0 {
            return Err(ConfigError::Invalid("max_history must be at least 1".to_string()));
        }
        if parse_hex(&self.layer_defaults.color).is_none() {
            return Err(ConfigError::Invalid(format!(
                "layer_defaults.color '{}' is not #RRGGBB",
                self.layer_defaults.color
            )));
        }
        if !(0..=100).contains(&self.layer_defaults.opacity) {
            return Err(ConfigError::Invalid(format!(
                "layer_defaults.opacity ({}) must be between 0 and 100",
                self.layer_defaults.opacity
            )));
        }
        Ok(())
    }

    pub fn limits(&self) -> StackLimits {
        StackLimits {
            min: self.min_layers,
            max: self.max_layers,
        }
    }
}

/// Global user configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GlobalConfig {
    /// Default output format (text or json)
    pub default_format: OutputFormat,
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Combined configuration (global + workspace)
#[derive(Debug, Clone)]
pub struct Config {
    pub workspace: WorkspaceConfig,
    pub global: GlobalConfig,
    pub workspace_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from default locations
    pub fn load() -> Result<Self> {
        let global = Self::load_global()?;
        let workspace_root = Self::find_workspace_root();
        let workspace = match &workspace_root {
            Some(root) => Self::load_workspace_config(root)?,
            None => WorkspaceConfig::default(),
        };

        Ok(Self {
            workspace,
            global,
            workspace_root,
        })
    }

    /// Loads configuration for a specific workspace
    pub fn for_workspace(root: &Path) -> Result<Self> {
        let global = Self::load_global()?;
        let workspace = Self::load_workspace_config(root)?;

        Ok(Self {
            workspace,
            global,
            workspace_root: Some(root.to_path_buf()),
        })
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "shadowr", "shadowr").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads global configuration
    fn load_global() -> Result<GlobalConfig> {
        let config_dir = match Self::global_config_dir() {
            Some(dir) => dir,
            None => return Ok(GlobalConfig::default()),
        };

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            return Ok(GlobalConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read global config: {}", config_path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse global config")
    }

    /// Loads workspace configuration from a specific root
    fn load_workspace_config(root: &Path) -> Result<WorkspaceConfig> {
        let config_path = root.join(".shadowr").join("config.toml");

        if !config_path.exists() {
            return Ok(WorkspaceConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read workspace config: {}", config_path.display()))?;

        let config: WorkspaceConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse workspace config")?;
        config.validate().context("Invalid workspace config")?;
        Ok(config)
    }

    /// Finds the workspace root by looking for a `.shadowr/` directory
    pub fn find_workspace_root() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            if current.join(".shadowr").is_dir() {
                return Some(current);
            }

            if !current.pop() {
                return None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config {
            workspace: WorkspaceConfig::default(),
            global: GlobalConfig::default(),
            workspace_root: None,
        };

        assert_eq!(config.workspace.max_layers, 6);
        assert_eq!(config.workspace.max_history, 50);
        assert_eq!(config.workspace.layer_defaults.style(), ShadowStyle::default());
        assert_eq!(config.global.default_format, OutputFormat::Text);
    }

    #[test]
    fn parse_workspace_config() {
        let toml = r##"
max_layers = 10
max_history = 20

[export]
class_name = "card"

[layer_defaults]
color = "#3b82f6"
opacity = 40
"##;

        let config: WorkspaceConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.max_layers, 10);
        assert_eq!(config.min_layers, 1);
        assert_eq!(config.export.class_name, "card");
        assert_eq!(config.export.variable_name, "shadow-custom");
        assert_eq!(config.layer_defaults.color, "#3b82f6");
        assert_eq!(config.layer_defaults.offset_y, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_global_config() {
        let toml = r#"
default_format = "json"
"#;

        let config: GlobalConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.default_format, OutputFormat::Json);
    }

    #[test]
    fn validate_rejects_inverted_limits() {
        let config = WorkspaceConfig {
            min_layers: 4,
            max_layers: 2,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn validate_rejects_bad_layer_defaults() {
        let mut config = WorkspaceConfig::default();
        config.layer_defaults.color = "red".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = WorkspaceConfig::default();
        config.layer_defaults.opacity = 150;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = WorkspaceConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let back: WorkspaceConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn loads_invalid_workspace_config_as_error() {
        let dir = TempDir::new().unwrap();
        let shadowr_dir = dir.path().join(".shadowr");
        fs::create_dir_all(&shadowr_dir).unwrap();
        fs::write(shadowr_dir.join("config.toml"), "min_layers = 9\n").unwrap();

        assert!(Config::for_workspace(dir.path()).is_err());
    }
}
