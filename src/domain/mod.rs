//! Domain models for Shadowr
//!
//! Contains the layer model and editing rules without any I/O concerns.

mod id;
mod layer;
mod stack;
mod preset;
mod history;

pub use id::{LayerId, IdError};
pub use layer::{ShadowLayer, ShadowStyle, LayerPatch};
pub use stack::{LayerStack, StackLimits, StackError, EditorState};
pub use preset::{Preset, PresetCategory, CustomPreset, builtin_categories, find_builtin};
pub use history::{History, Snapshot, push_snapshot, push_recent_color};
