//! Workspace management
//!
//! Handles workspace initialization and provides access to stores.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use super::{Config, EditorStore, FileStore, KeyValueStore, STATE_KEY};
use crate::domain::EditorState;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("Not in a shadowr workspace. Run 'shadowr init' first.")]
    NotInWorkspace,
}

/// A Shadowr workspace
pub struct Workspace {
    root: PathBuf,
    config: Config,
}

impl Workspace {
    /// Opens an existing workspace at the given path
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();

        if !root.join(".shadowr").is_dir() {
            return Err(WorkspaceError::NotInWorkspace.into());
        }

        let config = Config::for_workspace(&root)?;

        Ok(Self { root, config })
    }

    /// Opens the workspace at the current directory or a parent
    pub fn open_current() -> Result<Self> {
        let root = Config::find_workspace_root().ok_or(WorkspaceError::NotInWorkspace)?;

        Self::open(root)
    }

    /// Initializes a new workspace at the given path
    ///
    /// Running it on an existing workspace leaves its files untouched.
    pub fn init(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let shadowr_dir = root.join(".shadowr");

        let store_dir = shadowr_dir.join("store");
        fs::create_dir_all(&store_dir).with_context(|| {
            format!("Failed to create store directory: {}", store_dir.display())
        })?;

        let config_path = shadowr_dir.join("config.toml");
        if !config_path.exists() {
            let default_config = r##"# Shadowr configuration

# Layer count limits
max_layers = 6
min_layers = 1

# Undo steps and named snapshots kept
max_history = 50
max_snapshots = 10

# Recently used colors kept
max_recent_colors = 8

[export]
class_name = "shadow-custom"
variable_name = "shadow-custom"

# Values for new and reset layers
[layer_defaults]
offset_x = 0
offset_y = 4
blur = 8
spread = 0
color = "#000000"
opacity = 15
inset = false
"##;
            fs::write(&config_path, default_config)
                .with_context(|| format!("Failed to write config: {}", config_path.display()))?;
        }

        let workspace = Self::open(root)?;
        let editor = workspace.editor();
        if editor.inner().get(STATE_KEY)?.is_none() {
            editor.save_state(&EditorState::default())?;
        }
        Ok(workspace)
    }

    /// Returns the workspace root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the .shadowr directory path
    pub fn shadowr_dir(&self) -> PathBuf {
        self.root.join(".shadowr")
    }

    /// Returns the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the editor store for this workspace
    pub fn editor(&self) -> EditorStore<FileStore> {
        EditorStore::new(
            FileStore::for_workspace(&self.root),
            self.config.workspace.clone(),
        )
    }
}
