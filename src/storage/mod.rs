//! # Storage Layer
//!
//! Persistence layer for Shadowr with plain JSON and TOML files.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Editor state, history, presets | JSON, one file per key | `.shadowr/store/{key}.json` |
//! | Config | TOML | `.shadowr/config.toml` |
//! | Global config | TOML | platform config dir |
//!
//! ## Concurrency Safety
//!
//! - [`FileStore`] takes shared locks for reads and exclusive locks for writes (`fs2`)
//! - All writes are atomic (temp file + rename)
//!
//! ## Key Types
//!
//! - [`Workspace`] - Entry point for accessing a Shadowr workspace
//! - [`KeyValueStore`] - Storage port; [`FileStore`] and [`MemoryStore`] implement it
//! - [`EditorStore`] - Typed editor data over any [`KeyValueStore`]
//! - [`Config`] - Workspace and global configuration

mod kv;
mod config;
mod editor;
mod workspace;

pub use kv::{KeyValueStore, FileStore, MemoryStore, StoreError};
pub use config::{Config, ConfigError, ExportConfig, GlobalConfig, LayerDefaults, OutputFormat, WorkspaceConfig};
pub use editor::{
    EditorStore, CUSTOM_PRESETS_KEY, HISTORY_KEY, RECENT_COLORS_KEY, SNAPSHOTS_KEY, STATE_KEY,
};
pub use workspace::{Workspace, WorkspaceError};
