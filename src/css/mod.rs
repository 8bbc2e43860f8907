//! # CSS Transcoding
//!
//! Pure conversions between layers and `box-shadow` text. Nothing here
//! does I/O or keeps state, so every function is safe to call from any
//! thread.
//!
//! | Function | Direction |
//! |----------|-----------|
//! | [`hex_to_rgba`] | `#RRGGBB` + opacity → `rgba(r, g, b, a)` |
//! | [`generate_shadow_css`] | layers → `box-shadow` value |
//! | [`generate_tailwind_css`] | layers → `shadow-[...]` class |
//! | [`parse_shadow_css`] | `box-shadow` text → layers |
//!
//! ## Round trip
//!
//! For enabled layers with non-negative blur and valid hex colors,
//! parsing the generated value gives back the same geometry and inset
//! flags, and colors that render to the same `rgba(...)` string.

mod color;
mod serializer;
mod parser;
mod export;
mod transition;

pub use color::{hex_to_rgba, parse_hex, to_hex, format_alpha, FALLBACK_RGBA};
pub use serializer::{generate_shadow_css, generate_tailwind_css, layer_clause, NONE, TAILWIND_NONE};
pub use parser::{
    parse_shadow_css, parse_clauses, parse_clause, resolve_color, split_top_level, ParseOutcome,
    DEFAULT_COLOR, DEFAULT_OPACITY,
};
pub use export::{render, css_declaration, ExportFormat, ExportNames};
pub use transition::{hover_layers, generate_transition_css, Easing, HoverSettings};
