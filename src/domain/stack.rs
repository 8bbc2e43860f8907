//! Layer stack editing
//!
//! Order is meaningful: the first layer serializes first and paints on top.
//! Locked layers cannot be edited, removed or moved, but can still be
//! toggled on and off.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::LayerId;
use super::layer::{LayerPatch, ShadowLayer, ShadowStyle};

#[derive(Debug, Error, PartialEq)]
pub enum StackError {
    #[error("Layer not found: {0}")]
    NotFound(String),

    #[error("Layer {0} is locked")]
    Locked(LayerId),

    #[error("Stack is full ({0} layers max)")]
    Full(usize),

    #[error("Stack needs at least {0} layer(s)")]
    AtMinimum(usize),

    /// Positions are 1-based
    #[error("No layer at position {position} (stack has {len} layers)")]
    OutOfRange { position: usize, len: usize },
}

/// Limits on the number of layers in a stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackLimits {
    pub min: usize,
    pub max: usize,
}

impl Default for StackLimits {
    fn default() -> Self {
        Self { min: 1, max: 6 }
    }
}

/// Persisted editor state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorState {
    pub layers: Vec<ShadowLayer>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locked: Vec<LayerId>,

    #[serde(default)]
    pub active_preset: Option<String>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            layers: vec![ShadowLayer::from_style(&ShadowStyle::initial())],
            locked: vec![],
            active_preset: None,
        }
    }
}

/// An editable, ordered stack of shadow layers
#[derive(Debug, Clone)]
pub struct LayerStack {
    layers: Vec<ShadowLayer>,
    locked: HashSet<LayerId>,
    limits: StackLimits,
}

impl LayerStack {
    pub fn new(layers: Vec<ShadowLayer>, limits: StackLimits) -> Self {
        Self {
            layers,
            locked: HashSet::new(),
            limits,
        }
    }

    /// Restores a stack from persisted state
    pub fn from_state(state: &EditorState, limits: StackLimits) -> Self {
        let mut stack = Self::new(state.layers.clone(), limits);
        stack.locked = state
            .locked
            .iter()
            .filter(|id| state.layers.iter().any(|l| &l.id == *id))
            .cloned()
            .collect();
        stack
    }

    /// Converts the stack back into persistable state
    pub fn to_state(&self, active_preset: Option<String>) -> EditorState {
        let mut locked: Vec<_> = self
            .layers
            .iter()
            .filter(|l| self.locked.contains(&l.id))
            .map(|l| l.id.clone())
            .collect();
        locked.dedup();

        EditorState {
            layers: self.layers.clone(),
            locked,
            active_preset,
        }
    }

    pub fn layers(&self) -> &[ShadowLayer] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn is_locked(&self, id: &LayerId) -> bool {
        self.locked.contains(id)
    }

    /// Finds a layer by full id or by 1-based position
    pub fn resolve(&self, key: &str) -> Result<LayerId, StackError> {
        if let Ok(position) = key.parse::<usize>() {
            return position
                .checked_sub(1)
                .and_then(|i| self.layers.get(i))
                .map(|l| l.id.clone())
                .ok_or(StackError::OutOfRange {
                    position,
                    len: self.layers.len(),
                });
        }

        let id: LayerId = key
            .parse()
            .map_err(|_| StackError::NotFound(key.to_string()))?;
        self.position(&id)?;
        Ok(id)
    }

    pub fn get(&self, id: &LayerId) -> Option<&ShadowLayer> {
        self.layers.iter().find(|l| &l.id == id)
    }

    fn position(&self, id: &LayerId) -> Result<usize, StackError> {
        self.layers
            .iter()
            .position(|l| &l.id == id)
            .ok_or_else(|| StackError::NotFound(id.to_string()))
    }

    fn ensure_unlocked(&self, id: &LayerId) -> Result<(), StackError> {
        if self.locked.contains(id) {
            return Err(StackError::Locked(id.clone()));
        }
        Ok(())
    }

    /// Appends a new enabled layer with the given defaults
    pub fn add(&mut self, defaults: &ShadowStyle) -> Result<LayerId, StackError> {
        if self.layers.len() >= self.limits.max {
            return Err(StackError::Full(self.limits.max));
        }
        let layer = ShadowLayer::from_style(defaults);
        let id = layer.id.clone();
        self.layers.push(layer);
        Ok(id)
    }

    pub fn remove(&mut self, id: &LayerId) -> Result<ShadowLayer, StackError> {
        let index = self.position(id)?;
        if self.layers.len() <= self.limits.min {
            return Err(StackError::AtMinimum(self.limits.min));
        }
        self.ensure_unlocked(id)?;
        Ok(self.layers.remove(index))
    }

    /// Copies a layer under a fresh id, directly after the original
    pub fn duplicate(&mut self, id: &LayerId) -> Result<LayerId, StackError> {
        let index = self.position(id)?;
        if self.layers.len() >= self.limits.max {
            return Err(StackError::Full(self.limits.max));
        }
        let copy = self.layers[index].duplicate();
        let new_id = copy.id.clone();
        self.layers.insert(index + 1, copy);
        Ok(new_id)
    }

    /// Flips the enabled flag, returning the new value
    pub fn toggle(&mut self, id: &LayerId) -> Result<bool, StackError> {
        let index = self.position(id)?;
        let layer = &mut self.layers[index];
        layer.enabled = !layer.enabled;
        Ok(layer.enabled)
    }

    pub fn reset(&mut self, id: &LayerId, defaults: &ShadowStyle) -> Result<(), StackError> {
        let index = self.position(id)?;
        self.ensure_unlocked(id)?;
        self.layers[index].set_style(defaults);
        Ok(())
    }

    pub fn update(&mut self, id: &LayerId, patch: &LayerPatch) -> Result<(), StackError> {
        let index = self.position(id)?;
        self.ensure_unlocked(id)?;
        self.layers[index].apply(patch);
        Ok(())
    }

    pub fn lock(&mut self, id: &LayerId) -> Result<(), StackError> {
        self.position(id)?;
        self.locked.insert(id.clone());
        Ok(())
    }

    pub fn unlock(&mut self, id: &LayerId) -> Result<(), StackError> {
        self.position(id)?;
        self.locked.remove(id);
        Ok(())
    }

    /// Moves the layer at `from` to index `to` (0-based)
    pub fn move_layer(&mut self, from: usize, to: usize) -> Result<(), StackError> {
        let len = self.layers.len();
        for index in [from, to] {
            if index >= len {
                return Err(StackError::OutOfRange { position: index + 1, len });
            }
        }
        if from == to {
            return Ok(());
        }
        self.ensure_unlocked(&self.layers[from].id)?;
        self.ensure_unlocked(&self.layers[to].id)?;

        let moved = self.layers.remove(from);
        self.layers.insert(to, moved);
        Ok(())
    }

    /// Replaces every layer, dropping all locks
    pub fn replace(&mut self, layers: Vec<ShadowLayer>) {
        self.layers = layers;
        self.locked.clear();
    }
}
