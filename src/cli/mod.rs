//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Command Groups
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Core | Workspace and current value | `init`, `show`, `colors` |
//! | Layer | Editing the stack | `layer add`, `layer set`, `layer move` |
//! | Code | CSS in and out | `import`, `parse`, `export --as tailwind` |
//! | Preset | Built-in and saved presets | `preset list`, `preset apply` |
//! | History | Undo, redo and snapshots | `undo`, `redo`, `snapshot save` |
//! | Hover | Transition snippet | `transition --scale 1.5` |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! The default can be changed with `default_format` in the global config.
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output on stderr:
//! ```bash
//! shadowr --verbose import "box-shadow: 0px 4px 6px 0px rgba(0, 0, 0, 0.1);"
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod session;
mod layer;
mod preset;
mod snapshot;

pub use app::{Cli, Commands, run};
pub use output::{Output, OutputFormat};
