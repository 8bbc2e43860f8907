//! Preset CLI commands

use anyhow::{bail, Result};
use clap::Subcommand;
use serde::Serialize;

use super::output::Output;
use super::session::Session;
use crate::css::generate_shadow_css;
use crate::domain::{builtin_categories, find_builtin, CustomPreset, Preset};
use crate::storage::Workspace;

#[derive(Subcommand)]
pub enum PresetCommands {
    /// List built-in and saved presets
    List,

    /// Replace the current layers with a preset
    Apply {
        /// Preset name (case-insensitive); saved presets take precedence
        name: String,
    },

    /// Save the current layers as a custom preset
    Save {
        /// Preset name
        name: String,
    },

    /// Delete a custom preset
    Delete {
        /// Preset name
        name: String,
    },
}

pub fn run(cmd: PresetCommands, output: &Output) -> Result<()> {
    match cmd {
        PresetCommands::List => list_presets(output),
        PresetCommands::Apply { name } => apply_preset(output, &name),
        PresetCommands::Save { name } => save_preset(output, &name),
        PresetCommands::Delete { name } => delete_preset(output, &name),
    }
}

#[derive(Serialize)]
struct PresetEntry {
    category: String,
    name: String,
    css: String,
}

impl PresetEntry {
    fn new(category: &str, preset: &Preset) -> Self {
        Self {
            category: category.to_string(),
            name: preset.name.clone(),
            css: generate_shadow_css(&preset.instantiate()),
        }
    }
}

fn list_presets(output: &Output) -> Result<()> {
    let mut entries: Vec<PresetEntry> = builtin_categories()
        .iter()
        .flat_map(|c| c.presets.iter().map(move |p| PresetEntry::new(c.id, p)))
        .collect();

    // Custom presets are optional outside a workspace
    if let Ok(workspace) = Workspace::open_current() {
        let custom = workspace.editor().load_custom_presets()?;
        output.verbose_ctx("preset", &format!("Found {} custom preset(s)", custom.len()));
        entries.extend(custom.iter().map(|c| PresetEntry::new("custom", &c.preset())));
    }

    if output.is_json() {
        output.data(&entries);
        return Ok(());
    }

    for entry in &entries {
        output.row(&[
            entry.category.as_str(),
            entry.name.as_str(),
            entry.css.replace(",\n  ", ", ").as_str(),
        ]);
    }
    Ok(())
}

fn find_custom<'a>(presets: &'a [CustomPreset], name: &str) -> Option<&'a CustomPreset> {
    presets.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

fn apply_preset(output: &Output, name: &str) -> Result<()> {
    let mut session = Session::open(output)?;
    let custom = session.editor.load_custom_presets()?;

    let preset = match find_custom(&custom, name) {
        Some(c) => c.preset(),
        None => match find_builtin(name) {
            Some(p) => p,
            None => bail!("Preset not found: {}", name),
        },
    };

    output.verbose_ctx("preset", &format!("Applying {} ({} layer(s))", preset.name, preset.layers.len()));
    let layers = preset.instantiate();
    let css = generate_shadow_css(&layers);
    session.commit_replace(layers, Some(preset.name.clone()))?;

    output.success(&format!("Applied preset {}: {}", preset.name, css));
    Ok(())
}

fn save_preset(output: &Output, name: &str) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        bail!("Preset name cannot be empty");
    }

    let session = Session::open(output)?;
    let mut presets = session.editor.load_custom_presets()?;
    if find_custom(&presets, name).is_some() {
        bail!("Custom preset already exists: {}", name);
    }

    presets.push(CustomPreset::capture(name, session.layers()));
    session.editor.save_custom_presets(&presets)?;

    output.success(&format!("Saved preset {} ({} layer(s))", name, session.layers().len()));
    Ok(())
}

fn delete_preset(output: &Output, name: &str) -> Result<()> {
    let workspace = Workspace::open_current()?;
    let editor = workspace.editor();
    let mut presets = editor.load_custom_presets()?;

    let before = presets.len();
    presets.retain(|p| !p.name.eq_ignore_ascii_case(name));
    if presets.len() == before {
        bail!("Custom preset not found: {}", name);
    }
    editor.save_custom_presets(&presets)?;

    output.success(&format!("Deleted preset {}", name));
    Ok(())
}
