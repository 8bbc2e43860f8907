//! Main CLI application structure

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use super::output::{Output, OutputFormat};
use super::session::Session;
use super::{layer, preset, snapshot};
use crate::css::{
    generate_shadow_css, generate_transition_css, layer_clause, parse_clauses, render, Easing,
    ExportFormat, ExportNames, HoverSettings,
};
use crate::domain::ShadowLayer;
use crate::storage::{Config, Workspace};

/// Shown when pasted CSS has no usable clause
const PARSE_FAILED: &str = "Could not parse CSS. Check the format.";

#[derive(Parser)]
#[command(name = "shadowr")]
#[command(author, version, about = "Compose box-shadow layers and export them as CSS")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the global config, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new shadowr workspace
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,
    },

    /// Print the current box-shadow value
    Show,

    /// Export the current layers as code
    Export {
        /// Export format
        #[arg(long = "as", value_enum, default_value = "css")]
        export_as: ExportFormat,

        /// Print every format
        #[arg(long, conflicts_with = "export_as")]
        all: bool,

        /// Convert this CSS instead of the workspace layers
        #[arg(long)]
        from: Option<String>,

        /// Write to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Replace the current layers with parsed CSS
    Import {
        /// CSS text, e.g. "box-shadow: 0px 4px 6px 0px rgba(0, 0, 0, 0.1);"
        css: Option<String>,

        /// Read the CSS from stdin
        #[arg(long, conflicts_with = "css")]
        stdin: bool,
    },

    /// Parse CSS and print the layers without changing anything
    Parse {
        /// CSS text
        css: Option<String>,

        /// Read the CSS from stdin
        #[arg(long, conflicts_with = "css")]
        stdin: bool,
    },

    /// Manage layers
    #[command(subcommand)]
    Layer(layer::LayerCommands),

    /// Built-in and custom presets
    #[command(subcommand)]
    Preset(preset::PresetCommands),

    /// Named snapshots of the layers
    #[command(subcommand)]
    Snapshot(snapshot::SnapshotCommands),

    /// Undo the last change
    Undo,

    /// Redo the last undone change
    Redo,

    /// Show recently used colors
    Colors,

    /// Generate hover transition CSS for the current layers
    Transition {
        /// Duration in milliseconds
        #[arg(long, default_value = "300")]
        duration: u32,

        /// Timing function
        #[arg(long, value_enum, default_value = "ease")]
        easing: Easing,

        /// Offset multiplier on hover
        #[arg(long, default_value = "1.0")]
        scale: f64,

        /// Pixels added to both offsets on hover
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        offset: i32,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let format = cli.format.unwrap_or_else(|| {
        Config::load()
            .map(|config| config.global.default_format.into())
            .unwrap_or_default()
    });
    let output = Output::new(format, cli.verbose);

    output.verbose("Shadowr starting");

    match cli.command {
        Commands::Init { path } => {
            output.verbose_ctx("init", &format!("Initializing workspace at: {}", path));
            let workspace = Workspace::init(&path)?;
            output.verbose_ctx(
                "init",
                &format!("Created .shadowr directory at: {}", workspace.shadowr_dir().display()),
            );
            output.success(&format!("Initialized shadowr workspace at {}", workspace.root().display()));
        }

        Commands::Show => {
            let session = Session::open(&output)?;
            output.code("box-shadow", &generate_shadow_css(session.layers()));
        }

        Commands::Export { export_as, all, from, output: path } => {
            export(&output, export_as, all, from.as_deref(), path)?
        }

        Commands::Import { css, stdin } => {
            let text = read_css(css, stdin)?;
            import(&output, &text)?
        }

        Commands::Parse { css, stdin } => {
            let text = read_css(css, stdin)?;
            parse(&output, &text)?
        }

        Commands::Layer(cmd) => layer::run(cmd, &output)?,
        Commands::Preset(cmd) => preset::run(cmd, &output)?,
        Commands::Snapshot(cmd) => snapshot::run(cmd, &output)?,

        Commands::Undo => {
            let workspace = Workspace::open_current()?;
            match workspace.editor().undo()? {
                Some(state) => output.success(&format!("Undone: {}", generate_shadow_css(&state.layers))),
                None => output.success("Nothing to undo"),
            }
        }

        Commands::Redo => {
            let workspace = Workspace::open_current()?;
            match workspace.editor().redo()? {
                Some(state) => output.success(&format!("Redone: {}", generate_shadow_css(&state.layers))),
                None => output.success("Nothing to redo"),
            }
        }

        Commands::Colors => {
            let workspace = Workspace::open_current()?;
            let colors = workspace.editor().load_recent_colors()?;
            if output.is_json() {
                output.data(&colors);
            } else {
                for color in &colors {
                    output.row(&[color.as_str()]);
                }
            }
        }

        Commands::Transition { duration, easing, scale, offset } => {
            let session = Session::open(&output)?;
            let settings = HoverSettings {
                duration_ms: duration,
                easing,
                scale,
                offset,
            };
            output.verbose_ctx("transition", &format!("{:?}", settings));
            output.code("transition", &generate_transition_css(session.layers(), &settings));
        }
    }

    Ok(())
}

/// Takes CSS from the argument or stdin
fn read_css(css: Option<String>, stdin: bool) -> Result<String> {
    if stdin {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read CSS from stdin")?;
        return Ok(text);
    }
    match css {
        Some(text) => Ok(text),
        None => bail!("Pass the CSS as an argument or use --stdin"),
    }
}

/// Parses CSS, logging skipped clauses, or fails with the parse notice
fn parse_layers(output: &Output, text: &str) -> Result<Vec<ShadowLayer>> {
    let outcome = match parse_clauses(text) {
        Some(outcome) => outcome,
        None => bail!(PARSE_FAILED),
    };
    for clause in &outcome.skipped {
        output.verbose_ctx("parse", &format!("Skipped clause: {}", clause));
    }
    if outcome.layers.is_empty() {
        bail!(PARSE_FAILED);
    }
    Ok(outcome.layers)
}

fn import(output: &Output, text: &str) -> Result<()> {
    let mut session = Session::open(output)?;
    let layers = parse_layers(output, text)?;

    let count = layers.len();
    if count > session.editor.config().max_layers {
        output.verbose_ctx("import", &format!("Imported {} layers, above max_layers", count));
    }
    session.commit_replace(layers, None)?;

    output.success(&format!("Imported {} layer(s)", count));
    Ok(())
}

#[derive(Serialize)]
struct ParsedLayer<'a> {
    #[serde(flatten)]
    layer: &'a ShadowLayer,
    css: String,
}

fn parse(output: &Output, text: &str) -> Result<()> {
    let layers = parse_layers(output, text)?;

    if output.is_json() {
        let parsed: Vec<ParsedLayer> = layers
            .iter()
            .map(|layer| ParsedLayer {
                layer,
                css: layer_clause(layer),
            })
            .collect();
        output.data(&parsed);
        return Ok(());
    }

    for (i, layer) in layers.iter().enumerate() {
        let position = (i + 1).to_string();
        let geometry = format!(
            "x={} y={} blur={} spread={}",
            layer.offset_x, layer.offset_y, layer.blur, layer.spread
        );
        let color = format!("{} {}%", layer.color, layer.opacity);
        let kind = if layer.inset { "inset" } else { "outset" };
        output.row(&[position.as_str(), geometry.as_str(), color.as_str(), kind]);
    }
    Ok(())
}

fn export(
    output: &Output,
    format: ExportFormat,
    all: bool,
    from: Option<&str>,
    path: Option<PathBuf>,
) -> Result<()> {
    // Only a missing workspace falls back; a broken one is reported
    let workspace = match Config::find_workspace_root() {
        Some(root) => Some(Workspace::open(root)?),
        None => None,
    };
    let names = workspace
        .as_ref()
        .map(|w| w.config().workspace.export.names())
        .unwrap_or_default();

    let layers = match (from, &workspace) {
        (Some(text), _) => parse_layers(output, text)?,
        (None, Some(workspace)) => workspace.editor().load_state()?.layers,
        (None, None) => bail!("Not in a shadowr workspace. Run 'shadowr init' first, or pass --from"),
    };

    let formats: Vec<ExportFormat> = if all {
        ExportFormat::all().to_vec()
    } else {
        vec![format]
    };
    output.verbose_ctx("export", &format!("Rendering {} format(s)", formats.len()));

    match path {
        Some(path) => {
            let content = render_all(&layers, &formats, &names);
            fs::write(&path, content)
                .with_context(|| format!("Failed to write export: {}", path.display()))?;
            output.success(&format!("Wrote {}", path.display()));
        }
        None => {
            for (i, format) in formats.iter().enumerate() {
                if all && i > 0 {
                    output.blank();
                }
                output.code(format.as_str(), &render(&layers, *format, &names));
            }
        }
    }
    Ok(())
}

fn render_all(layers: &[ShadowLayer], formats: &[ExportFormat], names: &ExportNames) -> String {
    let mut content = formats
        .iter()
        .map(|f| render(layers, *f, names))
        .collect::<Vec<_>>()
        .join("\n\n");
    if !content.ends_with('\n') {
        content.push('\n');
    }
    content
}
