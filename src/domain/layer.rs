//! Shadow layer domain model
//!
//! A layer is one shadow effect: geometry, a `#RRGGBB` color, an integer
//! opacity percent and the inset flag. Disabled layers stay in the model
//! but never reach generated CSS.

use serde::{Deserialize, Serialize};

use super::id::LayerId;

fn default_enabled() -> bool {
    true
}

/// Layer parameters without identity
///
/// Used for presets and for the default values of new layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShadowStyle {
    pub offset_x: i32,
    pub offset_y: i32,
    pub blur: i32,
    pub spread: i32,
    pub color: String,
    pub opacity: i32,
    pub inset: bool,
}

impl ShadowStyle {
    /// Creates an outset style
    pub fn new(offset_x: i32, offset_y: i32, blur: i32, spread: i32, color: &str, opacity: i32) -> Self {
        Self {
            offset_x,
            offset_y,
            blur,
            spread,
            color: color.to_string(),
            opacity,
            inset: false,
        }
    }

    /// Returns the same style drawn inward
    pub fn inset(mut self) -> Self {
        self.inset = true;
        self
    }

    /// The layer an empty editor starts with
    pub fn initial() -> Self {
        Self::new(5, 5, 15, 0, "#000000", 20)
    }
}

impl Default for ShadowStyle {
    fn default() -> Self {
        Self::new(0, 4, 8, 0, "#000000", 15)
    }
}

/// One shadow effect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadowLayer {
    pub id: LayerId,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    pub offset_x: i32,
    pub offset_y: i32,
    pub blur: i32,
    pub spread: i32,
    pub color: String,
    pub opacity: i32,
    #[serde(default)]
    pub inset: bool,
}

impl ShadowLayer {
    /// Creates an enabled layer with a fresh id from the given style
    pub fn from_style(style: &ShadowStyle) -> Self {
        Self {
            id: LayerId::generate(),
            enabled: true,
            offset_x: style.offset_x,
            offset_y: style.offset_y,
            blur: style.blur,
            spread: style.spread,
            color: style.color.clone(),
            opacity: style.opacity,
            inset: style.inset,
        }
    }

    /// Returns the layer parameters without identity
    pub fn style(&self) -> ShadowStyle {
        ShadowStyle {
            offset_x: self.offset_x,
            offset_y: self.offset_y,
            blur: self.blur,
            spread: self.spread,
            color: self.color.clone(),
            opacity: self.opacity,
            inset: self.inset,
        }
    }

    /// Overwrites the parameters, keeping id and enabled state
    pub fn set_style(&mut self, style: &ShadowStyle) {
        self.offset_x = style.offset_x;
        self.offset_y = style.offset_y;
        self.blur = style.blur;
        self.spread = style.spread;
        self.color = style.color.clone();
        self.opacity = style.opacity;
        self.inset = style.inset;
    }

    /// Copies the layer under a fresh id
    pub fn duplicate(&self) -> Self {
        Self {
            id: LayerId::generate(),
            ..self.clone()
        }
    }

    /// Applies a partial update
    ///
    /// Blur is clamped to zero and opacity to `0..=100`; CSS has no
    /// negative blur and the serializer prints the stored number as is.
    pub fn apply(&mut self, patch: &LayerPatch) {
        if let Some(x) = patch.offset_x {
            self.offset_x = x;
        }
        if let Some(y) = patch.offset_y {
            self.offset_y = y;
        }
        if let Some(blur) = patch.blur {
            self.blur = blur.max(0);
        }
        if let Some(spread) = patch.spread {
            self.spread = spread;
        }
        if let Some(color) = &patch.color {
            self.color = color.clone();
        }
        if let Some(opacity) = patch.opacity {
            self.opacity = opacity.clamp(0, 100);
        }
        if let Some(inset) = patch.inset {
            self.inset = inset;
        }
    }
}

/// Partial update for a layer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerPatch {
    pub offset_x: Option<i32>,
    pub offset_y: Option<i32>,
    pub blur: Option<i32>,
    pub spread: Option<i32>,
    pub color: Option<String>,
    pub opacity: Option<i32>,
    pub inset: Option<bool>,
}

impl LayerPatch {
    /// Returns true if the patch changes nothing
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_style_is_enabled_with_fresh_id() {
        let style = ShadowStyle::default();
        let a = ShadowLayer::from_style(&style);
        let b = ShadowLayer::from_style(&style);

        assert!(a.enabled);
        assert_ne!(a.id, b.id);
        assert_eq!(a.style(), style);
    }

    #[test]
    fn apply_patch_clamps_blur_and_opacity() {
        let mut layer = ShadowLayer::from_style(&ShadowStyle::initial());
        layer.apply(&LayerPatch {
            blur: Some(-4),
            opacity: Some(140),
            color: Some("#ff0000".to_string()),
            ..Default::default()
        });

        assert_eq!(layer.blur, 0);
        assert_eq!(layer.opacity, 100);
        assert_eq!(layer.color, "#ff0000");
        assert_eq!(layer.offset_x, 5);
    }

    #[test]
    fn set_style_keeps_identity_and_enabled() {
        let mut layer = ShadowLayer::from_style(&ShadowStyle::initial());
        layer.enabled = false;
        let id = layer.id.clone();

        layer.set_style(&ShadowStyle::default().inset());

        assert_eq!(layer.id, id);
        assert!(!layer.enabled);
        assert!(layer.inset);
        assert_eq!(layer.offset_y, 4);
    }

    #[test]
    fn layer_json_uses_camel_case() {
        let layer = ShadowLayer::from_style(&ShadowStyle::initial());
        let json = serde_json::to_value(&layer).unwrap();

        assert_eq!(json["offsetX"], 5);
        assert_eq!(json["offsetY"], 5);
        assert_eq!(json["enabled"], true);
    }

    #[test]
    fn style_deserializes_with_missing_fields() {
        let style: ShadowStyle = serde_json::from_str(r#"{"offsetY": 12, "inset": true}"#).unwrap();
        assert_eq!(style.offset_y, 12);
        assert_eq!(style.blur, 8);
        assert!(style.inset);
    }

    #[test]
    fn empty_patch() {
        assert!(LayerPatch::default().is_empty());
        assert!(!LayerPatch { inset: Some(true), ..Default::default() }.is_empty());
    }
}
