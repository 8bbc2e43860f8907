//! Shadowr - compose layered CSS `box-shadow` values from the command line
//!
//! Shadowr keeps an ordered stack of shadow layers in a local workspace,
//! converts between that model and CSS text, and exports the result as
//! CSS, Tailwind, SCSS, custom properties or React style objects.

pub mod domain;
pub mod css;
pub mod storage;
pub mod cli;

pub use css::{generate_shadow_css, generate_tailwind_css, hex_to_rgba, parse_shadow_css};
pub use domain::{LayerId, LayerStack, ShadowLayer, ShadowStyle};
