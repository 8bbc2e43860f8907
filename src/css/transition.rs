//! Hover transition snippets

use serde::Serialize;

use super::serializer::generate_shadow_css;
use crate::domain::ShadowLayer;

/// Timing function for the transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    #[default]
    Ease,
    EaseIn,
    EaseOut,
    EaseInOut,
    Linear,
    /// Overshooting cubic-bezier curve
    Bounce,
}

impl Easing {
    /// CSS timing-function text
    pub fn css(&self) -> &'static str {
        match self {
            Easing::Ease => "ease",
            Easing::EaseIn => "ease-in",
            Easing::EaseOut => "ease-out",
            Easing::EaseInOut => "ease-in-out",
            Easing::Linear => "linear",
            Easing::Bounce => "cubic-bezier(0.68, -0.55, 0.265, 1.55)",
        }
    }
}

/// How the hover state differs from the base state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverSettings {
    pub duration_ms: u32,
    pub easing: Easing,
    /// Multiplier applied to both offsets
    pub scale: f64,
    /// Pixels added to both offsets after scaling
    pub offset: i32,
}

impl Default for HoverSettings {
    fn default() -> Self {
        Self {
            duration_ms: 300,
            easing: Easing::Ease,
            scale: 1.0,
            offset: 0,
        }
    }
}

/// Returns a copy of the layers with offsets moved for the hover state
///
/// Each offset becomes `round(value * scale + offset)`; blur, spread and
/// color are untouched.
pub fn hover_layers(layers: &[ShadowLayer], scale: f64, offset: i32) -> Vec<ShadowLayer> {
    let shift = |v: i32| (f64::from(v) * scale + f64::from(offset)).round() as i32;
    layers
        .iter()
        .map(|layer| ShadowLayer {
            offset_x: shift(layer.offset_x),
            offset_y: shift(layer.offset_y),
            ..layer.clone()
        })
        .collect()
}

/// Renders base, hover and active rules for `.shadow-element`
pub fn generate_transition_css(layers: &[ShadowLayer], settings: &HoverSettings) -> String {
    let base = generate_shadow_css(layers);
    let hover = generate_shadow_css(&hover_layers(layers, settings.scale, settings.offset));
    let duration = settings.duration_ms;
    let easing = settings.easing.css();

    format!(
        ".shadow-element {{
  box-shadow: {base};
  transition: box-shadow {duration}ms {easing}, transform {duration}ms {easing};
}}

.shadow-element:hover {{
  box-shadow: {hover};
  transform: translateY(-2px);
}}

.shadow-element:active {{
  box-shadow: {base};
  transform: translateY(0);
}}"
    )
}
