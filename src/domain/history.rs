//! Undo history, named snapshots and recent colors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::layer::ShadowLayer;

/// Linear undo/redo history of layer snapshots
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct History {
    entries: Vec<Vec<ShadowLayer>>,
    /// Index of the current entry; `None` while empty
    index: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn entries(&self) -> &[Vec<ShadowLayer>] {
        &self.entries
    }

    /// Records a new state, discarding any redo tail
    ///
    /// The oldest entry is dropped once `capacity` is exceeded.
    pub fn push(&mut self, layers: Vec<ShadowLayer>, capacity: usize) {
        let keep = self.index.map_or(0, |i| i + 1);
        self.entries.truncate(keep);
        if self.entries.last() == Some(&layers) {
            return;
        }
        self.entries.push(layers);

        let capacity = capacity.max(1);
        if self.entries.len() > capacity {
            let excess = self.entries.len() - capacity;
            self.entries.drain(..excess);
        }
        self.index = Some(self.entries.len() - 1);
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.index, Some(i) if i > 0)
    }

    pub fn can_redo(&self) -> bool {
        matches!(self.index, Some(i) if i + 1 < self.entries.len())
    }

    /// Steps back, returning the restored state
    pub fn undo(&mut self) -> Option<&[ShadowLayer]> {
        let i = self.index.filter(|&i| i > 0)? - 1;
        self.index = Some(i);
        Some(&self.entries[i])
    }

    /// Steps forward, returning the restored state
    pub fn redo(&mut self) -> Option<&[ShadowLayer]> {
        let i = self.index? + 1;
        let entry = self.entries.get(i)?;
        self.index = Some(i);
        Some(entry)
    }
}

/// A named copy of the layers at some point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub name: String,
    pub layers: Vec<ShadowLayer>,
    pub created_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(name: impl Into<String>, layers: Vec<ShadowLayer>) -> Self {
        Self {
            name: name.into(),
            layers,
            created_at: Utc::now(),
        }
    }
}

/// Adds a snapshot at the front, keeping at most `capacity`
pub fn push_snapshot(snapshots: &mut Vec<Snapshot>, snapshot: Snapshot, capacity: usize) {
    snapshots.insert(0, snapshot);
    snapshots.truncate(capacity);
}

/// Moves `color` to the front of the recent list, keeping at most `capacity`
pub fn push_recent_color(colors: &mut Vec<String>, color: &str, capacity: usize) {
    colors.retain(|c| c != color);
    colors.insert(0, color.to_string());
    colors.truncate(capacity);
}
