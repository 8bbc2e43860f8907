//! Snapshot CLI commands

use anyhow::{bail, Result};
use clap::Subcommand;
use serde::Serialize;

use super::output::Output;
use super::session::Session;
use crate::css::generate_shadow_css;
use crate::domain::{Snapshot, LayerId};
use crate::storage::Workspace;

#[derive(Subcommand)]
pub enum SnapshotCommands {
    /// Save the current layers under a name
    Save {
        /// Snapshot name
        name: String,
    },

    /// List snapshots, newest first
    List,

    /// Replace the current layers with a snapshot
    Restore {
        /// Snapshot name or 1-based position in the list
        snapshot: String,
    },

    /// Delete a snapshot
    Delete {
        /// Snapshot name or 1-based position in the list
        snapshot: String,
    },
}

pub fn run(cmd: SnapshotCommands, output: &Output) -> Result<()> {
    match cmd {
        SnapshotCommands::Save { name } => save_snapshot(output, &name),
        SnapshotCommands::List => list_snapshots(output),
        SnapshotCommands::Restore { snapshot } => restore_snapshot(output, &snapshot),
        SnapshotCommands::Delete { snapshot } => delete_snapshot(output, &snapshot),
    }
}

/// Finds a snapshot index by 1-based position or name
fn find_snapshot(snapshots: &[Snapshot], key: &str) -> Result<usize> {
    if let Ok(position) = key.parse::<usize>() {
        if position >= 1 && position <= snapshots.len() {
            return Ok(position - 1);
        }
    }
    match snapshots.iter().position(|s| s.name == key) {
        Some(index) => Ok(index),
        None => bail!("Snapshot not found: {}", key),
    }
}

fn save_snapshot(output: &Output, name: &str) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        bail!("Snapshot name cannot be empty");
    }

    let session = Session::open(output)?;
    session
        .editor
        .add_snapshot(Snapshot::new(name, session.layers().to_vec()))?;

    output.success(&format!("Saved snapshot {}", name));
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotEntry<'a> {
    position: usize,
    name: &'a str,
    created_at: String,
    layers: usize,
    css: String,
}

fn list_snapshots(output: &Output) -> Result<()> {
    let workspace = Workspace::open_current()?;
    let snapshots = workspace.editor().load_snapshots()?;

    let entries: Vec<SnapshotEntry> = snapshots
        .iter()
        .enumerate()
        .map(|(i, s)| SnapshotEntry {
            position: i + 1,
            name: &s.name,
            created_at: s.created_at.to_rfc3339(),
            layers: s.layers.len(),
            css: generate_shadow_css(&s.layers),
        })
        .collect();

    if output.is_json() {
        output.data(&entries);
        return Ok(());
    }

    if entries.is_empty() {
        output.success("No snapshots saved");
        return Ok(());
    }
    for entry in &entries {
        let position = entry.position.to_string();
        let created = entry.created_at.as_str();
        output.row(&[position.as_str(), entry.name, created, entry.css.replace(",\n  ", ", ").as_str()]);
    }
    Ok(())
}

fn restore_snapshot(output: &Output, key: &str) -> Result<()> {
    let mut session = Session::open(output)?;
    let snapshots = session.editor.load_snapshots()?;
    let snapshot = &snapshots[find_snapshot(&snapshots, key)?];

    // restored layers get fresh ids so they never collide with live ones
    let layers = snapshot
        .layers
        .iter()
        .cloned()
        .map(|mut layer| {
            layer.id = LayerId::generate();
            layer
        })
        .collect();
    session.commit_replace(layers, None)?;

    output.success(&format!("Restored snapshot {}", snapshot.name));
    Ok(())
}

fn delete_snapshot(output: &Output, key: &str) -> Result<()> {
    let workspace = Workspace::open_current()?;
    let editor = workspace.editor();
    let mut snapshots = editor.load_snapshots()?;

    let removed = snapshots.remove(find_snapshot(&snapshots, key)?);
    editor.save_snapshots(&snapshots)?;

    output.success(&format!("Deleted snapshot {}", removed.name));
    Ok(())
}
