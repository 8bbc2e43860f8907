//! Code snippets built around the serialized `box-shadow` value

use serde::Serialize;

use super::serializer::{generate_shadow_css, generate_tailwind_css};
use crate::domain::ShadowLayer;

/// Export target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ExportFormat {
    /// `box-shadow: ...;` declaration
    #[default]
    Css,
    /// Tailwind arbitrary-value class
    Tailwind,
    /// SCSS variable plus usage
    Scss,
    /// CSS custom property plus usage
    CssVar,
    /// React inline style object
    React,
    /// Complete stylesheet with hover rule and custom property
    Stylesheet,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Css => "css",
            ExportFormat::Tailwind => "tailwind",
            ExportFormat::Scss => "scss",
            ExportFormat::CssVar => "css-var",
            ExportFormat::React => "react",
            ExportFormat::Stylesheet => "stylesheet",
        }
    }

    pub fn all() -> [ExportFormat; 6] {
        [
            ExportFormat::Css,
            ExportFormat::Tailwind,
            ExportFormat::Scss,
            ExportFormat::CssVar,
            ExportFormat::React,
            ExportFormat::Stylesheet,
        ]
    }
}

/// Names used inside generated snippets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportNames {
    /// Class selector for the stylesheet export, without the dot
    pub class_name: String,
    /// SCSS variable and custom property name, without `$` or `--`
    pub variable_name: String,
}

impl Default for ExportNames {
    fn default() -> Self {
        Self {
            class_name: "shadow-custom".to_string(),
            variable_name: "shadow-custom".to_string(),
        }
    }
}

/// Renders the layers in the requested format
pub fn render(layers: &[ShadowLayer], format: ExportFormat, names: &ExportNames) -> String {
    let value = generate_shadow_css(layers);
    let var = &names.variable_name;

    match format {
        ExportFormat::Css => css_declaration(&value),
        ExportFormat::Tailwind => generate_tailwind_css(layers),
        ExportFormat::Scss => format!(
            "${var}: {value};\n\n.element {{\n  box-shadow: ${var};\n}}"
        ),
        ExportFormat::CssVar => format!(
            ":root {{\n  --{var}: {value};\n}}\n\n.element {{\n  box-shadow: var(--{var});\n}}"
        ),
        ExportFormat::React => format!("const styles = {{\n  boxShadow: '{value}',\n}};"),
        ExportFormat::Stylesheet => stylesheet(&value, names),
    }
}

/// Wraps a value as a `box-shadow` declaration
pub fn css_declaration(value: &str) -> String {
    format!("box-shadow: {};", value)
}

fn stylesheet(value: &str, names: &ExportNames) -> String {
    let class = &names.class_name;
    let var = &names.variable_name;
    format!(
        ".{class} {{
  box-shadow: {value};
}}

/* Hover state example */
.{class}-hover:hover {{
  box-shadow: {value};
  transition: box-shadow 0.3s ease;
}}

/* CSS Variable */
:root {{
  --{var}: {value};
}}
"
    )
}
