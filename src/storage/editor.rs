//! Typed editor data on top of a [`KeyValueStore`]
//!
//! | Key | Value |
//! |-----|-------|
//! | `shadowr-state` | [`EditorState`] |
//! | `shadowr-history` | [`History`] |
//! | `shadowr-custom-presets` | `[CustomPreset]` |
//! | `shadowr-snapshots` | `[Snapshot]`, newest first |
//! | `shadowr-recent-colors` | `[String]`, newest first |
//!
//! Missing or unreadable values load as their defaults so a corrupt file
//! never locks the user out of the editor.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::config::WorkspaceConfig;
use super::kv::KeyValueStore;
use crate::domain::{
    push_recent_color, push_snapshot, CustomPreset, EditorState, History, LayerStack, ShadowLayer,
    Snapshot,
};

pub const STATE_KEY: &str = "shadowr-state";
pub const HISTORY_KEY: &str = "shadowr-history";
pub const CUSTOM_PRESETS_KEY: &str = "shadowr-custom-presets";
pub const SNAPSHOTS_KEY: &str = "shadowr-snapshots";
pub const RECENT_COLORS_KEY: &str = "shadowr-recent-colors";

/// Editor persistence backed by any key-value store
pub struct EditorStore<S> {
    store: S,
    config: WorkspaceConfig,
}

impl<S: KeyValueStore> EditorStore<S> {
    pub fn new(store: S, config: WorkspaceConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    pub fn inner(&self) -> &S {
        &self.store
    }

    fn load_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T> {
        let raw = self
            .store
            .get(key)
            .with_context(|| format!("Failed to read '{}'", key))?;

        Ok(raw
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or_default())
    }

    fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let text = serde_json::to_string_pretty(value)
            .with_context(|| format!("Failed to serialize '{}'", key))?;
        self.store
            .set(key, &text)
            .with_context(|| format!("Failed to write '{}'", key))
    }

    /// Loads the editor state, or the initial single-layer state
    pub fn load_state(&self) -> Result<EditorState> {
        self.load_or_default(STATE_KEY)
    }

    pub fn save_state(&self, state: &EditorState) -> Result<()> {
        self.save(STATE_KEY, state)
    }

    /// Loads the editor state as an editable stack
    pub fn load_stack(&self) -> Result<(LayerStack, EditorState)> {
        let state = self.load_state()?;
        let stack = LayerStack::from_state(&state, self.config.limits());
        Ok((stack, state))
    }

    /// Saves new editor state and records its layers in the undo history
    pub fn commit(&self, state: &EditorState) -> Result<()> {
        let mut history = self.load_history()?;
        if history.is_empty() {
            // seed with the state being replaced so the first change can be undone
            history.push(self.load_state()?.layers, self.config.max_history);
        }
        history.push(state.layers.clone(), self.config.max_history);

        self.save_state(state)?;
        self.save_history(&history)
    }

    pub fn load_history(&self) -> Result<History> {
        self.load_or_default(HISTORY_KEY)
    }

    pub fn save_history(&self, history: &History) -> Result<()> {
        self.save(HISTORY_KEY, history)
    }

    /// Steps the history back, applying the restored layers to the state
    ///
    /// Returns `None` when there is nothing to undo.
    pub fn undo(&self) -> Result<Option<EditorState>> {
        self.step(History::undo)
    }

    /// Steps the history forward, applying the restored layers to the state
    pub fn redo(&self) -> Result<Option<EditorState>> {
        self.step(History::redo)
    }

    fn step(&self, mv: fn(&mut History) -> Option<&[ShadowLayer]>) -> Result<Option<EditorState>> {
        let mut history = self.load_history()?;
        let layers = match mv(&mut history) {
            Some(layers) => layers.to_vec(),
            None => return Ok(None),
        };

        let state = EditorState {
            layers,
            locked: vec![],
            active_preset: None,
        };
        self.save_state(&state)?;
        self.save_history(&history)?;
        Ok(Some(state))
    }

    pub fn load_custom_presets(&self) -> Result<Vec<CustomPreset>> {
        self.load_or_default(CUSTOM_PRESETS_KEY)
    }

    pub fn save_custom_presets(&self, presets: &[CustomPreset]) -> Result<()> {
        self.save(CUSTOM_PRESETS_KEY, presets)
    }

    pub fn load_snapshots(&self) -> Result<Vec<Snapshot>> {
        self.load_or_default(SNAPSHOTS_KEY)
    }

    /// Saves a named snapshot at the front of the list
    pub fn add_snapshot(&self, snapshot: Snapshot) -> Result<()> {
        let mut snapshots = self.load_snapshots()?;
        push_snapshot(&mut snapshots, snapshot, self.config.max_snapshots);
        self.save(SNAPSHOTS_KEY, &snapshots)
    }

    pub fn save_snapshots(&self, snapshots: &[Snapshot]) -> Result<()> {
        self.save(SNAPSHOTS_KEY, snapshots)
    }

    pub fn load_recent_colors(&self) -> Result<Vec<String>> {
        self.load_or_default(RECENT_COLORS_KEY)
    }

    /// Moves `color` to the front of the recent colors
    pub fn record_color(&self, color: &str) -> Result<()> {
        let mut colors = self.load_recent_colors()?;
        push_recent_color(&mut colors, color, self.config.max_recent_colors);
        self.save(RECENT_COLORS_KEY, &colors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ShadowStyle, find_builtin};
    use crate::storage::MemoryStore;

    fn editor() -> EditorStore<MemoryStore> {
        EditorStore::new(MemoryStore::new(), WorkspaceConfig::default())
    }

    fn state_with(layers: Vec<ShadowLayer>) -> EditorState {
        EditorState {
            layers,
            locked: vec![],
            active_preset: None,
        }
    }

    #[test]
    fn missing_state_loads_initial_layer() {
        let state = editor().load_state().unwrap();
        assert_eq!(state.layers.len(), 1);
        assert_eq!(state.layers[0].style(), ShadowStyle::initial());
    }

    #[test]
    fn corrupt_state_loads_default() {
        let editor = editor();
        editor.inner().set(STATE_KEY, "{not json").unwrap();

        let state = editor.load_state().unwrap();
        assert_eq!(state.layers.len(), 1);
    }

    #[test]
    fn state_round_trips() {
        let editor = editor();
        let mut state = state_with(find_builtin("Neon").unwrap().instantiate());
        state.active_preset = Some("Neon".to_string());
        editor.save_state(&state).unwrap();

        assert_eq!(editor.load_state().unwrap(), state);
    }

    #[test]
    fn commit_then_undo_and_redo() {
        let editor = editor();
        let first = state_with(find_builtin("Soft").unwrap().instantiate());
        let second = state_with(find_builtin("Sharp").unwrap().instantiate());
        editor.commit(&first).unwrap();
        editor.commit(&second).unwrap();

        let undone = editor.undo().unwrap().unwrap();
        assert_eq!(undone.layers, first.layers);
        assert_eq!(editor.load_state().unwrap().layers, first.layers);

        let redone = editor.redo().unwrap().unwrap();
        assert_eq!(redone.layers, second.layers);
        assert!(editor.redo().unwrap().is_none());
    }

    #[test]
    fn first_commit_can_be_undone() {
        let editor = editor();
        let initial = editor.load_state().unwrap();
        editor.save_state(&initial).unwrap();
        editor.commit(&state_with(find_builtin("Soft").unwrap().instantiate())).unwrap();

        let undone = editor.undo().unwrap().unwrap();
        assert_eq!(undone.layers, initial.layers);
        assert!(editor.undo().unwrap().is_none());
    }

    #[test]
    fn snapshots_and_recent_colors_persist() {
        let editor = editor();
        editor.add_snapshot(Snapshot::new("one", vec![])).unwrap();
        editor.add_snapshot(Snapshot::new("two", vec![])).unwrap();
        let names: Vec<_> = editor.load_snapshots().unwrap().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["two", "one"]);

        editor.record_color("#000000").unwrap();
        editor.record_color("#ff0000").unwrap();
        editor.record_color("#000000").unwrap();
        assert_eq!(editor.load_recent_colors().unwrap(), vec!["#000000", "#ff0000"]);
    }

    #[test]
    fn custom_presets_persist() {
        let editor = editor();
        let layers = find_builtin("Glow").unwrap().instantiate();
        editor.save_custom_presets(&[CustomPreset::capture("Mine", &layers)]).unwrap();

        let presets = editor.load_custom_presets().unwrap();
        assert_eq!(presets.len(), 1);
        assert_eq!(presets[0].layers[0].color, "#3b82f6");
    }
}
