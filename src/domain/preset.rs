//! Preset catalog
//!
//! Built-in presets are grouped into categories. Custom presets are saved
//! by the user from the current layers, with ids stripped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::layer::{ShadowLayer, ShadowStyle};

/// A named set of layer styles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    pub name: String,
    pub layers: Vec<ShadowStyle>,
}

impl Preset {
    pub fn new(name: impl Into<String>, layers: Vec<ShadowStyle>) -> Self {
        Self {
            name: name.into(),
            layers,
        }
    }

    /// Instantiates the preset as enabled layers with fresh ids
    pub fn instantiate(&self) -> Vec<ShadowLayer> {
        self.layers.iter().map(ShadowLayer::from_style).collect()
    }
}

/// A group of built-in presets
#[derive(Debug, Clone, PartialEq)]
pub struct PresetCategory {
    pub id: &'static str,
    pub name: &'static str,
    pub presets: Vec<Preset>,
}

/// A user-saved preset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomPreset {
    pub name: String,
    pub layers: Vec<ShadowStyle>,
    pub created_at: DateTime<Utc>,
}

impl CustomPreset {
    /// Captures the given layers, disabled ones included
    pub fn capture(name: impl Into<String>, layers: &[ShadowLayer]) -> Self {
        Self {
            name: name.into(),
            layers: layers.iter().map(ShadowLayer::style).collect(),
            created_at: Utc::now(),
        }
    }

    pub fn preset(&self) -> Preset {
        Preset::new(self.name.clone(), self.layers.clone())
    }
}

fn black(offset_x: i32, offset_y: i32, blur: i32, spread: i32, opacity: i32) -> ShadowStyle {
    ShadowStyle::new(offset_x, offset_y, blur, spread, "#000000", opacity)
}

/// Returns the built-in preset catalog
pub fn builtin_categories() -> Vec<PresetCategory> {
    vec![
        PresetCategory {
            id: "intensity",
            name: "Intensity",
            presets: vec![
                Preset::new("Subtle", vec![black(0, 1, 3, 0, 12)]),
                Preset::new("Medium", vec![black(0, 4, 6, -1, 10), black(0, 2, 4, -2, 10)]),
                Preset::new("Bold", vec![black(0, 10, 15, -3, 15), black(0, 4, 6, -4, 10)]),
                Preset::new("Heavy", vec![black(0, 20, 40, -5, 25)]),
            ],
        },
        PresetCategory {
            id: "elevation",
            name: "Elevation",
            presets: vec![
                Preset::new("Flat", vec![black(0, 1, 2, 0, 8)]),
                Preset::new("Raised", vec![black(0, 4, 8, -2, 12)]),
                Preset::new("Float", vec![black(0, 12, 20, -4, 15), black(0, 4, 6, -2, 8)]),
                Preset::new("Hover", vec![black(0, 20, 25, -5, 15), black(0, 8, 10, -6, 10)]),
            ],
        },
        PresetCategory {
            id: "style",
            name: "Style",
            presets: vec![
                Preset::new("Sharp", vec![black(5, 5, 0, 0, 20)]),
                Preset::new("Soft", vec![black(0, 8, 30, 0, 12)]),
                Preset::new("Glow", vec![ShadowStyle::new(0, 0, 20, 2, "#3b82f6", 40)]),
                Preset::new(
                    "Neon",
                    vec![
                        ShadowStyle::new(0, 0, 10, 1, "#22c55e", 60),
                        ShadowStyle::new(0, 0, 30, 5, "#22c55e", 30),
                    ],
                ),
            ],
        },
        PresetCategory {
            id: "direction",
            name: "Direction",
            presets: vec![
                Preset::new("Center", vec![black(0, 0, 15, 0, 15)]),
                Preset::new("Bottom", vec![black(0, 8, 15, -3, 15)]),
                Preset::new("Right", vec![black(8, 4, 15, -3, 15)]),
                Preset::new("Left", vec![black(-8, 4, 15, -3, 15)]),
            ],
        },
        PresetCategory {
            id: "special",
            name: "Special",
            presets: vec![
                Preset::new("Inset", vec![black(0, 2, 4, 0, 15).inset()]),
                Preset::new("Deep Inset", vec![black(0, 4, 8, -2, 20).inset()]),
                Preset::new(
                    "Layered",
                    vec![
                        black(0, 1, 1, 0, 5),
                        black(0, 2, 2, 0, 5),
                        black(0, 4, 4, 0, 5),
                        black(0, 8, 8, 0, 5),
                    ],
                ),
                Preset::new("Material", vec![black(0, 3, 5, -1, 20), black(0, 6, 10, 0, 14)]),
            ],
        },
    ]
}

/// Finds a built-in preset by name, ignoring case
pub fn find_builtin(name: &str) -> Option<Preset> {
    builtin_categories()
        .into_iter()
        .flat_map(|c| c.presets)
        .find(|p| p.name.eq_ignore_ascii_case(name))
}
