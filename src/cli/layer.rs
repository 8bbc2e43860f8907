//! Layer CLI commands

use anyhow::{bail, Result};
use clap::Subcommand;
use serde::Serialize;

use super::output::Output;
use super::session::Session;
use crate::css::{layer_clause, parse_hex};
use crate::domain::{LayerPatch, ShadowLayer};

#[derive(Subcommand)]
pub enum LayerCommands {
    /// List layers in paint order
    List,

    /// Add a layer with the configured defaults
    Add,

    /// Remove a layer
    ///
    /// Layers are addressed by 1-based position or by ID (e.g. `l-7f2b4c1`).
    Remove {
        /// Layer position or ID
        layer: String,
    },

    /// Duplicate a layer directly after itself
    Duplicate {
        /// Layer position or ID
        layer: String,
    },

    /// Enable or disable a layer
    Toggle {
        /// Layer position or ID
        layer: String,
    },

    /// Reset a layer to the configured defaults
    Reset {
        /// Layer position or ID
        layer: String,
    },

    /// Change layer values
    ///
    /// Examples:
    ///   shadowr layer set 1 --x -4 --y 8
    ///   shadowr layer set 2 --color "#3b82f6" --opacity 40 --inset
    Set {
        /// Layer position or ID
        layer: String,

        /// Horizontal offset in pixels
        #[arg(long, allow_hyphen_values = true)]
        x: Option<i32>,

        /// Vertical offset in pixels
        #[arg(long, allow_hyphen_values = true)]
        y: Option<i32>,

        /// Blur radius in pixels (negative values become 0)
        #[arg(long, allow_hyphen_values = true)]
        blur: Option<i32>,

        /// Spread in pixels
        #[arg(long, allow_hyphen_values = true)]
        spread: Option<i32>,

        /// Color as #RRGGBB
        #[arg(long)]
        color: Option<String>,

        /// Opacity percent, 0-100
        #[arg(long, allow_hyphen_values = true)]
        opacity: Option<i32>,

        /// Draw the shadow inside the box
        #[arg(long, conflicts_with = "outset")]
        inset: bool,

        /// Draw the shadow outside the box
        #[arg(long)]
        outset: bool,
    },

    /// Move a layer to another position
    Move {
        /// Current 1-based position
        from: usize,

        /// New 1-based position
        to: usize,
    },

    /// Protect a layer from edits, removal and moves
    Lock {
        /// Layer position or ID
        layer: String,
    },

    /// Remove protection from a layer
    Unlock {
        /// Layer position or ID
        layer: String,
    },
}

pub fn run(cmd: LayerCommands, output: &Output) -> Result<()> {
    match cmd {
        LayerCommands::List => list_layers(output),
        LayerCommands::Add => add_layer(output),
        LayerCommands::Remove { layer } => remove_layer(output, &layer),
        LayerCommands::Duplicate { layer } => duplicate_layer(output, &layer),
        LayerCommands::Toggle { layer } => toggle_layer(output, &layer),
        LayerCommands::Reset { layer } => reset_layer(output, &layer),
        LayerCommands::Set {
            layer,
            x,
            y,
            blur,
            spread,
            color,
            opacity,
            inset,
            outset,
        } => {
            let patch = LayerPatch {
                offset_x: x,
                offset_y: y,
                blur,
                spread,
                color,
                opacity,
                inset: match (inset, outset) {
                    (true, _) => Some(true),
                    (_, true) => Some(false),
                    _ => None,
                },
            };
            set_layer(output, &layer, patch)
        }
        LayerCommands::Move { from, to } => move_layer(output, from, to),
        LayerCommands::Lock { layer } => set_lock(output, &layer, true),
        LayerCommands::Unlock { layer } => set_lock(output, &layer, false),
    }
}

#[derive(Serialize)]
struct LayerRow<'a> {
    position: usize,
    #[serde(flatten)]
    layer: &'a ShadowLayer,
    locked: bool,
    css: String,
}

fn list_layers(output: &Output) -> Result<()> {
    let session = Session::open(output)?;

    let rows: Vec<LayerRow> = session
        .layers()
        .iter()
        .enumerate()
        .map(|(i, layer)| LayerRow {
            position: i + 1,
            layer,
            locked: session.stack.is_locked(&layer.id),
            css: layer_clause(layer),
        })
        .collect();

    if output.is_json() {
        output.data(&rows);
        return Ok(());
    }

    for row in &rows {
        let position = row.position.to_string();
        let id = row.layer.id.to_string();
        let mut flags = String::new();
        flags.push(if row.layer.enabled { ' ' } else { '-' });
        flags.push(if row.locked { 'L' } else { ' ' });
        output.row(&[position.as_str(), id.as_str(), flags.as_str(), row.css.as_str()]);
    }
    if let Some(preset) = &session.state.active_preset {
        output.blank();
        output.row(&["preset:", preset.as_str()]);
    }
    Ok(())
}

fn add_layer(output: &Output) -> Result<()> {
    let mut session = Session::open(output)?;
    let defaults = session.editor.config().layer_defaults.style();

    let id = session.stack.add(&defaults)?;
    session.commit_edit()?;

    output.success(&format!("Added layer {} ({} total)", id, session.stack.len()));
    Ok(())
}

fn remove_layer(output: &Output, key: &str) -> Result<()> {
    let mut session = Session::open(output)?;
    let id = session.stack.resolve(key)?;

    session.stack.remove(&id)?;
    session.commit_edit()?;

    output.success(&format!("Removed layer {}", id));
    Ok(())
}

fn duplicate_layer(output: &Output, key: &str) -> Result<()> {
    let mut session = Session::open(output)?;
    let id = session.stack.resolve(key)?;

    let copy = session.stack.duplicate(&id)?;
    session.commit_edit()?;

    output.success(&format!("Duplicated layer {} as {}", id, copy));
    Ok(())
}

fn toggle_layer(output: &Output, key: &str) -> Result<()> {
    let mut session = Session::open(output)?;
    let id = session.stack.resolve(key)?;

    let enabled = session.stack.toggle(&id)?;
    session.commit_edit()?;

    let state = if enabled { "enabled" } else { "disabled" };
    output.success(&format!("Layer {} {}", id, state));
    Ok(())
}

fn reset_layer(output: &Output, key: &str) -> Result<()> {
    let mut session = Session::open(output)?;
    let id = session.stack.resolve(key)?;
    let defaults = session.editor.config().layer_defaults.style();

    session.stack.reset(&id, &defaults)?;
    session.commit_edit()?;

    output.success(&format!("Reset layer {}", id));
    Ok(())
}

fn set_layer(output: &Output, key: &str, patch: LayerPatch) -> Result<()> {
    if patch.is_empty() {
        bail!("Nothing to change. Pass at least one of --x, --y, --blur, --spread, --color, --opacity, --inset, --outset");
    }
    if let Some(color) = &patch.color {
        if parse_hex(color).is_none() {
            bail!("Invalid color '{}': expected #RRGGBB", color);
        }
    }

    let mut session = Session::open(output)?;
    let id = session.stack.resolve(key)?;
    output.verbose_ctx("layer", &format!("Applying {:?} to {}", patch, id));

    session.stack.update(&id, &patch)?;
    session.commit_edit()?;

    if let Some(color) = &patch.color {
        session.editor.record_color(color)?;
    }

    let css = session
        .stack
        .get(&id)
        .map(layer_clause)
        .unwrap_or_default();
    output.success(&format!("Updated layer {}: {}", id, css));
    Ok(())
}

fn move_layer(output: &Output, from: usize, to: usize) -> Result<()> {
    if from == 0 || to == 0 {
        bail!("Positions start at 1");
    }

    let mut session = Session::open(output)?;
    session.stack.move_layer(from - 1, to - 1)?;
    session.commit_edit()?;

    output.success(&format!("Moved layer {} to position {}", from, to));
    Ok(())
}

fn set_lock(output: &Output, key: &str, locked: bool) -> Result<()> {
    let mut session = Session::open(output)?;
    let id = session.stack.resolve(key)?;

    if locked {
        session.stack.lock(&id)?;
    } else {
        session.stack.unlock(&id)?;
    }
    session.commit_keep_preset()?;

    let state = if locked { "locked" } else { "unlocked" };
    output.success(&format!("Layer {} {}", id, state));
    Ok(())
}
