//! Layers to `box-shadow` text
//!
//! Output format per enabled layer:
//!
//! ```text
//! [inset ]{x}px {y}px {blur}px {spread}px rgba(r, g, b, a)
//! ```
//!
//! Clauses are joined with `,\n  `. The parser splits on top-level commas,
//! so the comma in the joiner is required; the whitespace is cosmetic.

use super::color::hex_to_rgba;
use crate::domain::ShadowLayer;

/// Value used when no enabled layer remains
pub const NONE: &str = "none";

/// Utility class used when no enabled layer remains
pub const TAILWIND_NONE: &str = "shadow-none";

const JOINER: &str = ",\n  ";

/// Renders one layer as a `box-shadow` clause, ignoring `enabled`
pub fn layer_clause(layer: &ShadowLayer) -> String {
    let inset = if layer.inset { "inset " } else { "" };
    format!(
        "{}{}px {}px {}px {}px {}",
        inset,
        layer.offset_x,
        layer.offset_y,
        layer.blur,
        layer.spread,
        hex_to_rgba(&layer.color, layer.opacity)
    )
}

/// Renders the enabled layers as a `box-shadow` value
///
/// Returns `none` for an empty stack or one where every layer is disabled.
pub fn generate_shadow_css(layers: &[ShadowLayer]) -> String {
    let clauses: Vec<String> = layers
        .iter()
        .filter(|l| l.enabled)
        .map(layer_clause)
        .collect();

    if clauses.is_empty() {
        return NONE.to_string();
    }
    clauses.join(JOINER)
}

/// Renders the layers as a Tailwind arbitrary-value class
///
/// Whitespace runs become a single `_`. Commas are left as they are.
pub fn generate_tailwind_css(layers: &[ShadowLayer]) -> String {
    let value = generate_shadow_css(layers);
    if value == NONE {
        return TAILWIND_NONE.to_string();
    }

    let escaped = value.split_whitespace().collect::<Vec<_>>().join("_");
    format!("shadow-[{}]", escaped)
}
